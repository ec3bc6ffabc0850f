use crate::resource::Resource;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::collections::{BTreeMap, BTreeSet};

/// A crawled page and the links found on it.
///
/// Same-domain links are kept as the target path (`/page2`), external links
/// as the full absolute URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vertex {
    resource: Resource,
    adjacent: BTreeSet<String>,
}

impl Vertex {
    pub fn new<I>(resource: Resource, links: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            resource,
            adjacent: links.into_iter().collect(),
        }
    }

    pub fn resource(&self) -> &Resource {
        &self.resource
    }

    pub fn adjacent(&self) -> &BTreeSet<String> {
        &self.adjacent
    }

    pub fn is_isolated(&self) -> bool {
        self.adjacent.is_empty()
    }
}

/// Page path to vertex, shared by every worker of a crawl.
#[derive(Debug, Default, Clone)]
pub struct Graph {
    vertices: DashMap<String, Vertex>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `resource` with its outbound links, keyed by its path.
    ///
    /// Pages sharing a path (`/p?a=1`, `/p?a=2`) end up in one vertex holding
    /// the union of their links and the lowest URL as its resource, so the
    /// result does not depend on which worker finished first. Returns `true`
    /// when the path was not in the graph yet.
    pub fn add_vertex<I>(&self, resource: Resource, links: I) -> bool
    where
        I: IntoIterator<Item = String>,
    {
        let path = resource.path().to_string();
        match self.vertices.entry(path) {
            Entry::Vacant(slot) => {
                slot.insert(Vertex::new(resource, links));
                true
            }
            Entry::Occupied(mut slot) => {
                let vertex = slot.get_mut();
                vertex.adjacent.extend(links);
                if resource.as_str() < vertex.resource.as_str() {
                    vertex.resource = resource;
                }
                false
            }
        }
    }

    pub fn get(&self, path: &str) -> Option<Vertex> {
        self.vertices.get(path).map(|v| v.value().clone())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.vertices.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.vertices.iter().map(|v| v.adjacent.len()).sum()
    }

    /// All page paths, sorted.
    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.vertices.iter().map(|e| e.key().clone()).collect();
        paths.sort();
        paths
    }

    /// Sorted snapshot of every `(path, vertex)` pair.
    pub fn vertices(&self) -> Vec<(String, Vertex)> {
        let mut vertices: Vec<(String, Vertex)> = self
            .vertices
            .iter()
            .map(|e| (e.key().clone(), e.value().clone()))
            .collect();
        vertices.sort_by(|a, b| a.0.cmp(&b.0));
        vertices
    }

    /// Ordered path -> links view, handy for comparing two crawls.
    pub fn to_adjacency(&self) -> BTreeMap<String, BTreeSet<String>> {
        self.vertices
            .iter()
            .map(|e| (e.key().clone(), e.value().adjacent.clone()))
            .collect()
    }
}
