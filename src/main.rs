use anyhow::Result;
use clap::Parser;
use console::style;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use articlegen::{ArticlePipeline, Cli, Commands, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let default_filter = if cli.verbose {
        "articlegen=debug"
    } else {
        "articlegen=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().await?;

    match cli.command {
        Commands::Generate {
            videos,
            context,
            output_size,
            research,
            delay,
            output_dir,
        } => {
            let pipeline = ArticlePipeline::new(config)?;

            tracing::info!("Processing {} video reference(s)", videos.len());

            let summary = pipeline
                .generate_from_videos(
                    &videos,
                    context.as_deref(),
                    output_size,
                    research,
                    delay,
                    output_dir,
                )
                .await?;

            for failure in &summary.skipped {
                eprintln!(
                    "{} Skipped {}: {}",
                    style("warning:").yellow().bold(),
                    failure.reference,
                    failure.error
                );
            }

            println!("Article saved to: {}", summary.article_path.display());
            if !cli.quiet {
                println!("  Title: {}", summary.title);
                println!(
                    "  Hashtags: {}",
                    if summary.hashtags.is_empty() {
                        "none".to_string()
                    } else {
                        summary.hashtags.join(" ")
                    }
                );
            }
        }
        Commands::Config { show } => {
            if show {
                config.display();
            } else {
                config.interactive_setup().await?;
            }
        }
    }

    Ok(())
}
