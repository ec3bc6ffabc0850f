use crate::extract::extract_links;
use crate::fetch::Fetcher;
use crate::frontier::Frontier;
use crate::graph::Graph;
use crate::resolver::resolve;
use crate::resource::Resource;
use crate::visited::VisitedRegistry;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

pub type ProgressCallback = Arc<dyn Fn(usize, String) + Send + Sync>;

/// Everything a worker shares with the rest of the pool.
#[derive(Clone)]
pub struct WorkerContext {
    pub fetcher: Arc<dyn Fetcher>,
    pub frontier: Arc<Frontier>,
    pub visited: Arc<VisitedRegistry>,
    pub graph: Arc<Graph>,
    pub root: Url,
    pub idle_timeout: Duration,
    pub include_external: bool,
    pub progress_callback: Option<ProgressCallback>,
}

pub struct Worker {
    id: usize,
    ctx: WorkerContext,
}

impl Worker {
    pub fn new(id: usize, ctx: WorkerContext) -> Self {
        Self { id, ctx }
    }

    /// Crawl until the frontier has been idle for `idle_timeout` with no
    /// work left anywhere in the pool.
    pub async fn run(self) {
        debug!("Worker {} started", self.id);

        loop {
            let Some(lease) = self.ctx.frontier.pop_timeout(self.ctx.idle_timeout).await else {
                if self.ctx.frontier.is_drained() {
                    break;
                }
                debug!("Worker {} timed out but work is still in flight", self.id);
                continue;
            };

            let resource = lease.resource();
            if !self.ctx.visited.claim(resource.as_str()) {
                debug!("Worker {} skipping already claimed {}", self.id, resource);
                continue;
            }

            self.crawl(resource).await;
        }

        debug!("Worker {} finished", self.id);
    }

    async fn crawl(&self, resource: &Resource) {
        if let Some(ref callback) = self.ctx.progress_callback {
            callback(self.id, resource.to_string());
        }
        debug!("Worker {} crawling {}", self.id, resource);

        let body = match self.ctx.fetcher.fetch(resource.url()).await {
            Ok(body) => body,
            Err(e) => {
                warn!("Unable to reach {}: {}", resource, e);
                self.ctx.graph.add_vertex(resource.clone(), Vec::new());
                return;
            }
        };

        let root_host = self.ctx.root.host_str().unwrap_or_default();
        let mut adjacent = Vec::new();
        let mut internal = Vec::new();

        for href in extract_links(&body) {
            let link = match resolve(resource.url(), &href) {
                Ok(link) => link,
                Err(e) => {
                    warn!("{}", e);
                    continue;
                }
            };

            if link.is_on_host(root_host) {
                adjacent.push(link.path().to_string());
                internal.push(link);
            } else if self.ctx.include_external {
                adjacent.push(link.as_str().to_string());
            }
        }

        debug!(
            "Worker {} found {} links on {} ({} same-domain)",
            self.id,
            adjacent.len(),
            resource,
            internal.len()
        );
        self.ctx.graph.add_vertex(resource.clone(), adjacent);

        for link in internal {
            if self.ctx.visited.contains(link.as_str()) {
                continue;
            }
            self.ctx.frontier.push_if_absent(link).await;
        }
    }
}
