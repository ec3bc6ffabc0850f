use clap::ArgMatches;
use colored::Colorize;
use sitegraph_core::crawl::{CrawlOptions, execute_crawl};
use sitegraph_core::report::{
    DEFAULT_HTML_TEMPLATE, ReportFormat, generate_html_report, generate_json_report,
    generate_text_report, save_report,
};
use sitegraph_scanner::{Graph, Resource};
use std::path::{Path, PathBuf};
use std::time::Duration;

// Helper functions for crawl handler

/// Build crawl options from the parsed command line
pub fn crawl_options_from_args(args: &ArgMatches) -> Result<CrawlOptions, String> {
    let url = args
        .get_one::<String>("URL")
        .ok_or_else(|| "A root URL must be provided".to_string())?;

    let mut options = CrawlOptions::new(url.as_str());
    if let Some(workers) = args.get_one::<u64>("workers") {
        options.workers = usize::try_from(*workers)
            .map_err(|_| format!("Worker count {} is too large", workers))?;
    }
    if let Some(idle) = args.get_one::<u64>("idle-time") {
        options.idle_timeout = Duration::from_secs(*idle);
    }
    if let Some(timeout) = args.get_one::<u64>("timeout") {
        options.request_timeout_secs = *timeout;
    }
    options.include_external = args.get_flag("external");
    options.show_progress = !args.get_flag("quiet");

    Ok(options)
}

/// Parse a `--format` value
pub fn parse_format(value: &str) -> Result<ReportFormat, String> {
    ReportFormat::from_str(value).ok_or_else(|| {
        format!(
            "Unknown output format '{}' (expected html, json or text)",
            value
        )
    })
}

/// Expand `~` in the output path
pub fn resolve_output_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

/// Render the graph in the requested format
pub fn render_report(format: ReportFormat, root: &str, graph: &Graph) -> Result<String, String> {
    match format {
        ReportFormat::Text => Ok(generate_text_report(root, graph)),
        ReportFormat::Json => generate_json_report(graph)
            .map_err(|e| format!("Failed to serialize graph: {}", e)),
        ReportFormat::Html => generate_html_report(graph, DEFAULT_HTML_TEMPLATE)
            .map_err(|e| format!("Failed to serialize graph: {}", e)),
    }
}

/// Write a rendered report, creating parent directories as needed
pub fn write_report(content: &str, path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create {}: {}", parent.display(), e))?;
    }
    save_report(content, path).map_err(|e| format!("Failed to write {}: {}", path.display(), e))
}

fn print_summary(root: &str, graph: &Graph, path: &Path, format: ReportFormat) {
    println!();
    println!("{} Crawl complete!", "✓".green().bold());
    println!(
        "{} Root: {}",
        "→".blue(),
        root.to_string().bright_white()
    );
    println!(
        "{} Pages: {}  Links: {}",
        "→".blue(),
        graph.len().to_string().cyan(),
        graph.edge_count().to_string().cyan()
    );
    println!(
        "{} Wrote {} graph to {}",
        "✓".green().bold(),
        format.extension().cyan(),
        path.display().to_string().bright_white()
    );
}

/// Crawl, render and save. Returns the path written.
pub async fn run_crawl(args: &ArgMatches) -> Result<PathBuf, String> {
    let options = crawl_options_from_args(args)?;
    let format = parse_format(
        args.get_one::<String>("format")
            .map(String::as_str)
            .unwrap_or("html"),
    )?;
    let output = resolve_output_path(
        args.get_one::<String>("output")
            .map(String::as_str)
            .unwrap_or("output.html"),
    );
    let quiet = !options.show_progress;

    if !quiet {
        println!(
            "\n🕸️  Crawling {} with {} worker(s)\n",
            options.url.bright_white(),
            options.workers
        );
    }

    let root = Resource::root(&options.url)
        .map(|r| r.to_string())
        .unwrap_or_else(|_| options.url.clone());
    let graph = execute_crawl(options, None)
        .await
        .map_err(|e| format!("Crawl failed: {}", e))?;

    let report = render_report(format, &root, &graph)?;
    write_report(&report, &output)?;

    if !quiet {
        print_summary(&root, &graph, &output, format);
    }

    Ok(output)
}

pub async fn handle_crawl(args: &ArgMatches) {
    if let Err(e) = run_crawl(args).await {
        eprintln!("{} {}", "✗".red().bold(), e);
        std::process::exit(1);
    }
}
