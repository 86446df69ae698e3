use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "infoflow")]
#[command(about = "InfoFlow content scoring and daily brief pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run heat and potential scoring over unprocessed content
    Score {
        /// Cap how many items this run picks up (default: whole backlog)
        #[arg(long)]
        limit: Option<i64>,
    },
    /// Classify unprocessed content into topic, sentiment, and keyword tags
    Classify {
        /// Cap how many items this run picks up (default: whole backlog)
        #[arg(long)]
        limit: Option<i64>,
    },
    /// Generate (or regenerate) the daily brief
    Brief {
        /// Date the brief covers, YYYY-MM-DD (default: yesterday, UTC)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Custom brief title (default: auto-generated from the date)
        #[arg(long)]
        title: Option<String>,
    },
    /// Show store counts and the latest generated brief
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = infoflow_core::load_app_config()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .init();

    let pool = infoflow_db::connect_pool(
        &config.database_url,
        infoflow_db::PoolConfig::from_app_config(&config),
    )
    .await?;
    let applied = infoflow_db::run_migrations(&pool).await?;
    if applied > 0 {
        tracing::info!(applied, "applied pending migrations");
    }

    match cli.command {
        Commands::Score { limit } => {
            let limit = limit.or(config.batch_limit);
            let summary = infoflow_pipeline::score_unprocessed(&pool, limit).await?;
            println!(
                "scored {} item(s), {} failed",
                summary.scored, summary.failed
            );
        }
        Commands::Classify { limit } => {
            let limit = limit.or(config.batch_limit);
            let classified = infoflow_pipeline::classify_unprocessed(&pool, limit).await?;
            println!("classified {classified} item(s)");
        }
        Commands::Brief { date, title } => {
            let date = infoflow_pipeline::resolve_brief_date(date, Utc::now());
            let title = title.unwrap_or_else(|| {
                infoflow_pipeline::default_title(&config.brief_title_prefix, date)
            });
            let brief = infoflow_pipeline::generate_brief(&pool, date, title).await?;
            println!(
                "brief #{} stored for {} ({} contents)",
                brief.id, brief.brief_date, brief.total_contents
            );
        }
        Commands::Status => run_status(&pool).await?,
    }

    Ok(())
}

/// Print row counts per table and the latest brief, if any.
async fn run_status(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let counts = infoflow_db::status_counts(pool).await?;

    println!("{:<14}{}", "CONTENTS", counts.contents);
    println!("{:<14}{}", "UNPROCESSED", counts.unprocessed);
    println!("{:<14}{}", "SCORES", counts.scores);
    println!("{:<14}{}", "TAG LINKS", counts.tag_links);
    println!("{:<14}{}", "BRIEFS", counts.briefs);

    if let Some(brief) = infoflow_db::latest_brief(pool).await? {
        println!(
            "latest brief: #{} \"{}\" for {}",
            brief.id, brief.title, brief.brief_date
        );
    } else {
        println!("no briefs generated yet; run `infoflow brief` first");
    }

    Ok(())
}
