pub mod error;
pub mod extract;
pub mod fetch;
pub mod frontier;
pub mod graph;
pub mod orchestrator;
pub mod resolver;
pub mod resource;
pub mod visited;
pub mod worker;

pub use error::{Result, ScanError};
pub use fetch::{Fetcher, HttpFetcher};
pub use graph::{Graph, Vertex};
pub use orchestrator::{CrawlConfig, CrawlTask, Orchestrator};
pub use resource::Resource;
pub use worker::ProgressCallback;
