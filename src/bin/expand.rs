use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use wikigraph::{expand_graph, Config, EntityView, WikidataFetcher};

#[derive(Parser, Debug)]
#[command(name = "expand")]
#[command(about = "Expand the relationship graph around a Wikidata entity and print it as JSON")]
struct Args {
    /// Entity identifier, e.g. Q42 (case-insensitive)
    #[arg(default_value = "Q3111140")]
    id: String,

    /// Number of hops to expand from the root
    #[arg(short, long, default_value_t = 1)]
    depth: usize,

    /// Only record and follow these relations (property ids or "alias"); repeatable
    #[arg(short, long = "property")]
    properties: Vec<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load()?;

    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or("RUST_LOG", config.log_level()),
    )
    .init();

    log::info!("Starting wikigraph expand v{}", env!("CARGO_PKG_VERSION"));
    log::info!("API endpoint: {}", config.wikidata.api_url);

    let fetcher = Arc::new(
        WikidataFetcher::from_config(&config.wikidata).context("Failed to build HTTP client")?,
    );
    let root = EntityView::new(&args.id, fetcher);

    let properties = if args.properties.is_empty() {
        None
    } else {
        Some(args.properties.as_slice())
    };

    let graph = expand_graph(&root, args.depth, properties)?;
    println!("{}", serde_json::to_string_pretty(&graph)?);

    Ok(())
}
