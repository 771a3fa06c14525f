//! Articlegen - a Rust CLI tool for turning YouTube video transcripts into articles
//!
//! This library fetches caption transcripts for one or more YouTube videos,
//! combines them, and asks the Google Gemini API to synthesize a single
//! LinkedIn-style article, which is written to disk with front-matter metadata.

pub mod cli;
pub mod config;
pub mod generate;
pub mod output;
pub mod transcripts;
pub mod utils;

pub use cli::{Cli, Commands, OutputSize};
pub use config::Config;
pub use generate::{ArticlePipeline, GenerationRequest, RunSummary};
pub use transcripts::{TranscriptError, TranscriptFetcher, VideoTranscript};

/// Result type used throughout the library
pub type Result<T> = anyhow::Result<T>;

/// Fatal run errors; per-video transcript failures live in [`TranscriptError`]
#[derive(thiserror::Error, Debug)]
pub enum ArticleError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No transcripts could be fetched for any of the requested videos")]
    NoTranscriptsAvailable,

    #[error("Article generation failed: {0}")]
    Generation(String),

    #[error("Failed to write article: {0}")]
    Write(String),
}
