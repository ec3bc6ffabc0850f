use indicatif::{ProgressBar, ProgressStyle};
use sitegraph_scanner::{
    CrawlConfig, Graph, HttpFetcher, Orchestrator, ProgressCallback, Result,
    fetch::DEFAULT_REQUEST_TIMEOUT_SECS,
    orchestrator::{DEFAULT_IDLE_TIMEOUT_SECS, DEFAULT_WORKERS},
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::info;
use url::Url;

/// Options for configuring a crawl operation
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    pub url: String,
    pub workers: usize,
    pub idle_timeout: Duration,
    pub include_external: bool,
    pub request_timeout_secs: u64,
    pub show_progress: bool,
}

impl CrawlOptions {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            workers: DEFAULT_WORKERS,
            idle_timeout: Duration::from_secs(DEFAULT_IDLE_TIMEOUT_SECS),
            include_external: false,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            show_progress: false,
        }
    }

    pub fn crawl_config(&self) -> CrawlConfig {
        CrawlConfig::new(self.url.clone())
            .with_workers(self.workers)
            .with_idle_timeout(self.idle_timeout)
            .with_external_links(self.include_external)
    }
}

/// Extract the path component from a URL
pub fn extract_url_path(url: &str) -> String {
    Url::parse(url)
        .ok()
        .map(|u| {
            let path = u.path().to_string();
            if path.is_empty() || path == "/" {
                "/".to_string()
            } else {
                path
            }
        })
        .unwrap_or_else(|| url.to_string())
}

/// Crawl `options.url` over HTTP and return the page graph.
///
/// `progress_callback` is invoked with `(worker_id, url)` every time a worker
/// starts on a page. Fails only when the root URL or the options are invalid.
pub async fn execute_crawl(
    options: CrawlOptions,
    progress_callback: Option<ProgressCallback>,
) -> Result<Graph> {
    let fetcher = Arc::new(HttpFetcher::with_timeout(options.request_timeout_secs)?);

    let progress_bar = if options.show_progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message("Starting crawl...");
        Some(pb)
    } else {
        None
    };

    let processed_count = Arc::new(AtomicUsize::new(0));
    let pb_clone = progress_bar.clone();
    let count_clone = processed_count.clone();
    let internal_callback: ProgressCallback = Arc::new(move |worker_id: usize, url: String| {
        let count = count_clone.fetch_add(1, Ordering::Relaxed) + 1;
        if let Some(ref pb) = pb_clone {
            pb.set_message(format!(
                "Crawling... {} pages [worker {}: {}]",
                count,
                worker_id,
                extract_url_path(&url)
            ));
        }
        if let Some(ref callback) = progress_callback {
            callback(worker_id, url);
        }
    });

    let orchestrator = Orchestrator::new(options.crawl_config(), fetcher)?
        .with_progress_callback(internal_callback);
    info!(
        "Crawling {} with {} workers",
        orchestrator.root(),
        options.workers
    );

    let graph = orchestrator.crawl().await;

    if let Some(ref pb) = progress_bar {
        pb.finish_with_message(format!(
            "Crawl complete! {} pages processed",
            processed_count.load(Ordering::Relaxed)
        ));
    }

    Ok(graph)
}
