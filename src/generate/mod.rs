use std::path::PathBuf;
use std::time::Duration;

use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::OutputSize;
use crate::config::Config;
use crate::output::{self, ArticleMetadata};
use crate::transcripts::youtube::YoutubeTranscriptFetcher;
use crate::transcripts::{
    extract_video_id, CombinedTranscript, FetchFailure, TranscriptAggregator, TranscriptFetcher,
};
use crate::Result;

pub mod gemini;
pub mod prompt;

use gemini::{GeminiClient, GenerateContentRequest, THINKING_LEVEL_HIGH};
use prompt::Prompt;

/// Immutable inputs for one generation call, built once after aggregation
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Combined transcript with per-video attribution headers
    pub transcript: CombinedTranscript,

    /// Optional operator-supplied context for the article
    pub context: Option<String>,

    /// Target article length
    pub output_size: OutputSize,

    /// Whether to attach search augmentation to the request
    pub research_enabled: bool,

    /// Audience embedded in the context block and front-matter
    pub audience: String,
}

/// Outcome of a completed pipeline run
#[derive(Debug)]
pub struct RunSummary {
    /// Where the article was written
    pub article_path: PathBuf,

    /// The article title
    pub title: String,

    /// Extracted hashtags
    pub hashtags: Vec<String>,

    /// Videos that were skipped during transcript aggregation
    pub skipped: Vec<FetchFailure>,
}

/// The article generation pipeline: fetch transcripts, build the prompt,
/// call Gemini, and write the formatted article.
///
/// The Gemini client and transcript fetcher are constructed at run start
/// and dropped at run end; no module-level state survives a run.
pub struct ArticlePipeline {
    config: Config,
    fetcher: Box<dyn TranscriptFetcher>,
    client: GeminiClient,
}

impl ArticlePipeline {
    /// Create a new pipeline.
    ///
    /// Fails with a configuration error when the API key is missing,
    /// before any network call is made.
    pub fn new(config: Config) -> Result<Self> {
        let api_key = config.api_key()?;

        let client = GeminiClient::new(
            api_key,
            config.gemini.endpoint.clone(),
            Duration::from_secs(config.gemini.request_timeout_secs),
        );
        let fetcher = Box::new(YoutubeTranscriptFetcher::new()?);

        Ok(Self {
            config,
            fetcher,
            client,
        })
    }

    /// Run the full pipeline for a set of video references
    pub async fn generate_from_videos(
        &self,
        videos: &[String],
        context: Option<&str>,
        output_size: OutputSize,
        research_enabled: bool,
        delay_override: Option<u64>,
        output_dir_override: Option<PathBuf>,
    ) -> Result<RunSummary> {
        let fetch_delay =
            Duration::from_secs(delay_override.unwrap_or(self.config.app.fetch_delay_secs));
        let output_dir = output_dir_override.unwrap_or_else(|| self.config.app.output_dir.clone());

        let supplied_ids = supplied_video_ids(videos);

        let aggregator = TranscriptAggregator::new(self.fetcher.as_ref(), fetch_delay);
        let aggregated = aggregator.collect(videos).await?;

        tracing::info!(
            "Combined {} transcript(s), {} video(s) skipped",
            aggregated.combined.video_ids.len(),
            aggregated.failures.len()
        );

        let request = GenerationRequest {
            transcript: aggregated.combined,
            context: context.map(str::to_string),
            output_size,
            research_enabled,
            audience: self.config.app.audience.clone(),
        };
        let prompt = prompt::build(&request);

        let raw = self.generate_article(&prompt, research_enabled).await?;

        let generated_at = Utc::now();
        let article = output::parse(&raw, generated_at);
        let metadata = ArticleMetadata {
            word_count_target: output_size.word_count_target(),
            audience: self.config.app.audience.clone(),
            generated_at,
            source_videos: videos.len(),
            video_ids: supplied_ids,
            research_enabled,
        };

        let document = output::render_document(&article, &metadata);
        let filename = output::derive_filename(&article.title, generated_at);
        let article_path = output::save_article(&document, &output_dir, &filename).await?;

        Ok(RunSummary {
            article_path,
            title: article.title,
            hashtags: article.hashtags,
            skipped: aggregated.failures,
        })
    }

    /// Call the generation API once; a failure here aborts the run
    async fn generate_article(&self, prompt: &Prompt, research_enabled: bool) -> Result<String> {
        let mut request = GenerateContentRequest::new(prompt.user_prompt.clone())
            .system(prompt.system_instruction.clone())
            .thinking_level(THINKING_LEVEL_HIGH);

        if research_enabled {
            request = request.with_research_tools();
        }

        let progress = ProgressBar::new_spinner();
        progress.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .unwrap(),
        );
        progress.enable_steady_tick(Duration::from_millis(120));
        progress.set_message("Generating article with Gemini (this may take a few minutes)...");

        let result = self
            .client
            .generate(&self.config.gemini.model, request)
            .await;

        match &result {
            Ok(_) => progress.finish_with_message("Article generation complete"),
            Err(_) => progress.finish_with_message("Article generation failed"),
        }

        result
    }
}

/// IDs recorded in front-matter: every supplied reference, canonical where
/// extractable, the raw reference otherwise
fn supplied_video_ids(references: &[String]) -> Vec<String> {
    references
        .iter()
        .map(|reference| {
            extract_video_id(reference).unwrap_or_else(|_| reference.trim().to_string())
        })
        .collect()
}
