use crate::error::{Result, ScanError};
use crate::fetch::Fetcher;
use crate::frontier::Frontier;
use crate::graph::Graph;
use crate::resource::Resource;
use crate::visited::VisitedRegistry;
use crate::worker::{ProgressCallback, Worker, WorkerContext};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::{JoinHandle, JoinSet};
use tracing::{error, info};

pub const DEFAULT_WORKERS: usize = 4;
pub const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 4;

/// What to crawl and how many workers to throw at it.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub root_url: String,
    pub worker_count: usize,
    pub idle_timeout: Duration,
    pub include_external: bool,
}

impl CrawlConfig {
    pub fn new(root_url: impl Into<String>) -> Self {
        Self {
            root_url: root_url.into(),
            worker_count: DEFAULT_WORKERS,
            idle_timeout: Duration::from_secs(DEFAULT_IDLE_TIMEOUT_SECS),
            include_external: false,
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.worker_count = workers;
        self
    }

    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    pub fn with_external_links(mut self, include: bool) -> Self {
        self.include_external = include;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.worker_count == 0 {
            return Err(ScanError::InvalidConfig(
                "worker count must be greater than 0".to_string(),
            ));
        }
        if self.idle_timeout.is_zero() {
            return Err(ScanError::InvalidConfig(
                "idle timeout must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Owns a crawl run: seeds the frontier, runs the worker pool and hands back
/// the finished graph.
pub struct Orchestrator {
    fetcher: Arc<dyn Fetcher>,
    root: Resource,
    worker_count: usize,
    idle_timeout: Duration,
    include_external: bool,
    progress_callback: Option<ProgressCallback>,
}

impl Orchestrator {
    /// Fails with [`ScanError::InvalidUrl`] when the root can't be parsed and
    /// with [`ScanError::InvalidConfig`] for a zero worker count or timeout.
    pub fn new(config: CrawlConfig, fetcher: Arc<dyn Fetcher>) -> Result<Self> {
        config.validate()?;
        let root = Resource::root(&config.root_url)?;

        Ok(Self {
            fetcher,
            root,
            worker_count: config.worker_count,
            idle_timeout: config.idle_timeout,
            include_external: config.include_external,
            progress_callback: None,
        })
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    pub fn root(&self) -> &Resource {
        &self.root
    }

    /// Run the crawl to completion.
    pub async fn crawl(self) -> Graph {
        self.crawl_on(Arc::new(Frontier::new())).await
    }

    /// Crawl using `frontier` as the shared queue. It must start out empty.
    pub(crate) async fn crawl_on(self, frontier: Arc<Frontier>) -> Graph {
        info!(
            "Starting crawl of {} with {} workers",
            self.root, self.worker_count
        );

        let visited = Arc::new(VisitedRegistry::new());
        let graph = Arc::new(Graph::new());

        // Seed before any worker exists so none of them can see an empty
        // frontier and quit straight away.
        frontier.push(self.root.clone()).await;

        let ctx = WorkerContext {
            fetcher: self.fetcher,
            frontier,
            visited,
            graph: graph.clone(),
            root: self.root.url().clone(),
            idle_timeout: self.idle_timeout,
            include_external: self.include_external,
            progress_callback: self.progress_callback,
        };

        let mut workers = JoinSet::new();
        for worker_id in 0..self.worker_count {
            workers.spawn(Worker::new(worker_id, ctx.clone()).run());
        }
        drop(ctx);

        while let Some(joined) = workers.join_next().await {
            if let Err(e) = joined {
                error!("Worker task failed: {}", e);
            }
        }

        let graph = Arc::try_unwrap(graph).unwrap_or_else(|shared| (*shared).clone());
        info!(
            "Crawl complete. Visited {} pages, {} links",
            graph.len(),
            graph.edge_count()
        );
        graph
    }

    /// Start the crawl in the background.
    pub fn spawn(self) -> CrawlTask {
        CrawlTask {
            handle: tokio::spawn(self.crawl()),
        }
    }
}

/// Handle to a crawl running in the background.
#[derive(Debug)]
pub struct CrawlTask {
    handle: JoinHandle<Graph>,
}

impl CrawlTask {
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Tear down the worker pool. Does nothing once the crawl has finished.
    pub fn shutdown(&self) {
        self.handle.abort();
    }

    /// Wait for the graph. Errors only if the task was shut down or panicked.
    pub async fn join(self) -> Result<Graph> {
        Ok(self.handle.await?)
    }
}
