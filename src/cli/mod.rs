use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "articlegen",
    about = "Articlegen - Turn YouTube video transcripts into LinkedIn-style articles with Google Gemini",
    version,
    long_about = "A CLI tool that downloads caption transcripts for one or more YouTube videos, synthesizes them into a single LinkedIn-style article using the Google Gemini API, and writes the article to disk with front-matter metadata."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential console output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate an article from one or more YouTube videos
    Generate {
        /// YouTube video URLs or bare video IDs (first required, up to 10 total)
        #[arg(value_name = "VIDEO", required = true, num_args = 1..=10)]
        videos: Vec<String>,

        /// Free-text context describing the article's topic or angle
        #[arg(short, long, value_name = "TEXT")]
        context: Option<String>,

        /// Target article length
        #[arg(short = 's', long, value_enum, default_value_t = OutputSize::Medium)]
        output_size: OutputSize,

        /// Attach web-search grounding to the generation request
        #[arg(long)]
        research: bool,

        /// Seconds to wait between transcript fetches (overrides config)
        #[arg(long, value_name = "SECONDS")]
        delay: Option<u64>,

        /// Directory to write the article into (overrides config)
        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },

    /// Configure model and output settings
    Config {
        /// Show current configuration
        #[arg(short, long)]
        show: bool,
    },
}

/// Target article length, mapped to a page-count range in the prompt
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputSize {
    /// Approximately 1-2 pages (500-1000 words)
    Short,
    /// Approximately 2-4 pages (1000-2000 words)
    Medium,
    /// Approximately 4-6 pages (2000-3000 words)
    Long,
}

impl OutputSize {
    /// Word-count target recorded in article front-matter (band midpoint)
    pub fn word_count_target(&self) -> u32 {
        match self {
            OutputSize::Short => 750,
            OutputSize::Medium => 1500,
            OutputSize::Long => 2500,
        }
    }
}

impl std::fmt::Display for OutputSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputSize::Short => write!(f, "short"),
            OutputSize::Medium => write!(f, "medium"),
            OutputSize::Long => write!(f, "long"),
        }
    }
}
