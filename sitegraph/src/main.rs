use sitegraph::commands::command_argument_builder;
use sitegraph::handlers::handle_crawl;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cmd = command_argument_builder();
    let matches = cmd.get_matches();

    // RUST_LOG wins; otherwise info, or warn when --quiet
    let default_level = if matches.get_flag("quiet") { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    handle_crawl(&matches).await;
}
