use crate::CLAP_STYLING;
use clap::arg;

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("sitegraph")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("sitegraph")
        .about("Crawl a web site and map how its pages link to each other")
        .styles(CLAP_STYLING)
        .arg(
            arg!(<URL>)
                .required(true)
                .help("The root URL to crawl, e.g. http://example.com"),
        )
        .arg(
            arg!(-w --"workers" <NUM_WORKERS>)
                .required(false)
                .help("The number of crawler workers in the pool")
                .value_parser(clap::value_parser!(u64).range(1..))
                .default_value("4"),
        )
        .arg(
            arg!(-i --"idle-time" <SECONDS>)
                .required(false)
                .help("Seconds a worker sits idle waiting for new pages before giving up")
                .value_parser(clap::value_parser!(u64).range(1..))
                .default_value("4"),
        )
        .arg(
            arg!(-e --"external")
                .required(false)
                .help("Add links to other domains to the graph (they are never crawled)")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            arg!(-t --"timeout" <SECONDS>)
                .required(false)
                .help("Per-request timeout in seconds")
                .value_parser(clap::value_parser!(u64).range(1..))
                .default_value("10"),
        )
        .arg(
            arg!(-o --"output" <PATH>)
                .required(false)
                .help("Where to write the graph")
                .default_value("output.html"),
        )
        .arg(
            arg!(-f --"format" <FORMAT>)
                .required(false)
                .help("Output format: html, json, text")
                .value_parser(["html", "json", "text"])
                .default_value("html"),
        )
        .arg(
            arg!(-q --"quiet" "Suppress the progress spinner and summary output")
                .required(false),
        )
}
