use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use wikigraph::{Config, EntityView, WikidataFetcher};

#[derive(Parser, Debug)]
#[command(name = "wikigraph")]
#[command(about = "Print a Wikidata entity and its named relationships")]
struct Args {
    /// Entity identifier, e.g. Q42 (case-insensitive)
    #[arg(default_value = "Q3111140")]
    id: String,

    /// Fetch the entity while constructing the view instead of on first access
    #[arg(long)]
    fetch_on_init: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load()?;

    // RUST_LOG wins over the configured level
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or("RUST_LOG", config.log_level()),
    )
    .init();

    let fetcher = Arc::new(
        WikidataFetcher::from_config(&config.wikidata).context("Failed to build HTTP client")?,
    );

    let entity = if args.fetch_on_init {
        EntityView::fetched(&args.id, fetcher)?
    } else {
        EntityView::new(&args.id, fetcher)
    };

    println!("{} {}", entity.name()?, entity.description()?);

    for edge in entity.relationships()? {
        println!(
            "{} {}",
            edge.relation.display_name()?,
            edge.value.display_name()?
        );
    }

    Ok(())
}
