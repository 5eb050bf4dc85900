//! linkedin-lookup - command-line entry point
//!
//! Resolves a name or description to a LinkedIn profile URL and optionally
//! prints the cleaned profile record.

use clap::Parser;
use linkedin_lookup::{Config, ProfileResolver, SearchQuery};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "linkedin-lookup", version, about = "Find a LinkedIn profile and fetch its data")]
struct Cli {
    /// Person's name, or a description with --description
    text: String,

    /// Treat TEXT as a description of the person rather than a name
    #[arg(long)]
    description: bool,

    /// Also fetch and print the normalized profile record
    #[arg(long)]
    fetch: bool,

    /// Fetch the static mock document instead of calling the provider
    #[arg(long)]
    mock: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before reading configuration
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "linkedin_lookup=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    info!("Loaded configuration: model={}", config.model);

    let query = if cli.description {
        SearchQuery::by_description(cli.text)
    } else {
        SearchQuery::by_name(cli.text)
    };

    let resolver = ProfileResolver::from_config(&config)?;
    let url = resolver.lookup_url(&query).await?;
    println!("{}", url);

    if cli.fetch || cli.mock {
        let mock = cli.mock || resolver.mock_by_default();
        let profile = resolver.fetch_profile(&url, mock).await?;
        println!("{}", serde_json::to_string_pretty(&profile)?);
    }

    Ok(())
}
