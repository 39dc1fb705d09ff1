//! Batch news ingestion: fetch from NewsAPI and RSS feeds, normalize, and
//! store into Postgres with URL deduplication. Runs to completion and exits.

use anyhow::Context;
use clap::Parser;

use newspipe_db::PoolConfig;

mod logging;
mod pipeline;

#[derive(Debug, Parser)]
#[command(name = "newspipe")]
#[command(about = "News ingestion pipeline: fetch, normalize, dedupe, store")]
struct Cli {
    /// Skip the NewsAPI source.
    #[arg(long)]
    no_newsapi: bool,

    /// Skip RSS feed ingestion.
    #[arg(long)]
    no_rss: bool,

    /// Search query for NewsAPI; also becomes the topic of that batch.
    #[arg(long)]
    query: Option<String>,

    /// Number of days back to fetch articles (default from config).
    #[arg(long)]
    days_back: Option<u32>,

    /// Enable verbose (debug) logging.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = newspipe_core::load_app_config().context("failed to load configuration")?;
    let level = if cli.verbose {
        "debug"
    } else {
        config.log_level.as_str()
    };
    logging::init(level, cli.verbose, config.log_file.as_deref())?;

    tracing::info!(?config, "starting news ingestion pipeline");

    // Fail fast on missing credentials before any network or DB work.
    if !cli.no_newsapi && config.news_api_key.is_none() {
        anyhow::bail!("NEWS_API_KEY is required unless --no-newsapi is given");
    }

    // The feed list is part of startup configuration: a missing file falls
    // back to the defaults, but an unreadable or invalid one aborts here,
    // before any database or network work.
    let feeds = if cli.no_rss {
        Vec::new()
    } else {
        newspipe_core::load_feeds(&config.feeds_path).context("failed to load feeds file")?
    };

    let pool = newspipe_db::connect_pool(&config.database_url, PoolConfig::from_app_config(&config))
        .await
        .context("failed to connect to database")?;
    newspipe_db::ping(&pool).await.context("database ping failed")?;
    newspipe_db::init_schema(&pool)
        .await
        .context("failed to initialize schema")?;

    let options = pipeline::RunOptions {
        fetch_newsapi: !cli.no_newsapi,
        fetch_rss: !cli.no_rss,
        query: cli.query,
        days_back: cli.days_back,
    };

    let summary = pipeline::run(&pool, &config, options, feeds).await?;
    pipeline::report(&pool, &summary).await;

    // Partial per-source failures still exit 0; only fatal startup or
    // mid-run connection loss produce a non-zero exit.
    Ok(())
}
