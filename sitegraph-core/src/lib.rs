pub mod crawl;
pub mod report;

pub use crawl::{CrawlOptions, execute_crawl, extract_url_path};
pub use report::{ReportFormat, generate_html_report, generate_json_report, generate_text_report};
pub use sitegraph_scanner::{Graph, ProgressCallback, ScanError, Vertex};
