// Report generation from a finished crawl graph

use serde::{Deserialize, Serialize};
use sitegraph_scanner::Graph;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Page shipped with the crate. `{graph_json}` is replaced by the graph.
pub const DEFAULT_HTML_TEMPLATE: &str = include_str!("../assets/graph.html");

pub const GRAPH_JSON_PLACEHOLDER: &str = "{graph_json}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
    Html,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            "html" => Some(ReportFormat::Html),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Json => "json",
            ReportFormat::Html => "html",
        }
    }
}

/// A node of the force-directed graph: a page path or an external URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub group: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
    pub value: u32,
}

/// The `{"nodes": [...], "links": [...]}` document D3 consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDocument {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

impl GraphDocument {
    /// Every crawled page and every link target becomes a node exactly once;
    /// every adjacency entry becomes a link of weight 1.
    pub fn from_graph(graph: &Graph) -> Self {
        let mut ids = BTreeSet::new();
        let mut links = Vec::new();

        for (path, vertex) in graph.vertices() {
            for target in vertex.adjacent() {
                ids.insert(target.clone());
                links.push(GraphLink {
                    source: path.clone(),
                    target: target.clone(),
                    value: 1,
                });
            }
            ids.insert(path);
        }

        let nodes = ids
            .into_iter()
            .enumerate()
            .map(|(idx, id)| GraphNode { id, group: idx + 1 })
            .collect();

        Self { nodes, links }
    }
}

pub fn generate_json_report(graph: &Graph) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&GraphDocument::from_graph(graph))
}

/// Substitute the graph JSON into `template` at every `{graph_json}`.
pub fn generate_html_report(graph: &Graph, template: &str) -> Result<String, serde_json::Error> {
    let graph_json = serde_json::to_string(&GraphDocument::from_graph(graph))?;
    Ok(template.replace(GRAPH_JSON_PLACEHOLDER, &graph_json))
}

pub fn generate_text_report(root: &str, graph: &Graph) -> String {
    let vertices = graph.vertices();
    let isolated = vertices.iter().filter(|(_, v)| v.is_isolated()).count();
    let external: BTreeSet<&String> = vertices
        .iter()
        .flat_map(|(_, v)| v.adjacent().iter())
        .filter(|link| !link.starts_with('/'))
        .collect();

    let mut report = String::new();

    report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
    report.push_str("                   SITE GRAPH\n");
    report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

    report.push_str(&format!("Root:            {}\n", root));
    report.push_str(&format!("Pages crawled:   {}\n", vertices.len()));
    report.push_str(&format!("Links found:     {}\n", graph.edge_count()));
    report.push_str(&format!("External links:  {}\n", external.len()));
    report.push_str(&format!("Dead ends:       {}\n", isolated));
    report.push('\n');

    report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

    for (path, vertex) in &vertices {
        report.push_str(&format!("{} ({})\n", path, vertex.adjacent().len()));

        let count = vertex.adjacent().len();
        for (i, link) in vertex.adjacent().iter().enumerate() {
            let prefix = if i == count - 1 { "└── " } else { "├── " };
            report.push_str(&format!("  {}{}\n", prefix, link));
        }
        report.push('\n');
    }

    report
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}
