use async_trait::async_trait;
use yt_transcript_rs::api::YouTubeTranscriptApi;
use yt_transcript_rs::FetchedTranscript;

use super::{LanguageSelection, TranscriptError, TranscriptFetcher, VideoTranscript};
use crate::Result;

/// Caption languages tried in order before falling back
const PREFERRED_LANGUAGES: &[&str] = &["en", "en-US", "en-GB"];

/// Transcript fetcher backed by YouTube's caption tracks
pub struct YoutubeTranscriptFetcher {
    api: YouTubeTranscriptApi,
}

impl YoutubeTranscriptFetcher {
    pub fn new() -> Result<Self> {
        let api = YouTubeTranscriptApi::new(None, None, None)
            .map_err(|e| anyhow::anyhow!("Failed to create YouTube transcript client: {e}"))?;

        Ok(Self { api })
    }

    /// English was unavailable; take the first caption track the provider lists
    async fn fetch_fallback(
        &self,
        video_id: &str,
    ) -> std::result::Result<VideoTranscript, TranscriptError> {
        let listing = self.api.list_transcripts(video_id).await.map_err(|e| {
            TranscriptError::Unavailable {
                video_id: video_id.to_string(),
                reason: e.to_string(),
            }
        })?;

        let language_code = listing
            .transcripts()
            .into_iter()
            .next()
            .map(|track| track.language_code.clone())
            .ok_or_else(|| TranscriptError::Unavailable {
                video_id: video_id.to_string(),
                reason: "no caption tracks listed".to_string(),
            })?;

        tracing::info!(
            "English captions unavailable for {}, falling back to '{}'",
            video_id,
            language_code
        );

        let fetched = self
            .api
            .fetch_transcript(video_id, &[language_code.as_str()], false)
            .await
            .map_err(|e| TranscriptError::Fetch {
                video_id: video_id.to_string(),
                reason: e.to_string(),
            })?;

        Ok(into_transcript(
            video_id,
            fetched,
            LanguageSelection::Fallback(language_code),
        ))
    }
}

#[async_trait]
impl TranscriptFetcher for YoutubeTranscriptFetcher {
    async fn fetch(&self, video_id: &str) -> std::result::Result<VideoTranscript, TranscriptError> {
        match self
            .api
            .fetch_transcript(video_id, PREFERRED_LANGUAGES, false)
            .await
        {
            Ok(fetched) => Ok(into_transcript(
                video_id,
                fetched,
                LanguageSelection::Preferred,
            )),
            Err(e) => {
                tracing::debug!("Preferred-language fetch failed for {}: {}", video_id, e);
                self.fetch_fallback(video_id).await
            }
        }
    }
}

/// Concatenate caption segments into one text blob, discarding timing metadata
fn into_transcript(
    video_id: &str,
    fetched: FetchedTranscript,
    selection: LanguageSelection,
) -> VideoTranscript {
    let segment_count = fetched.snippets.len();
    let text = fetched
        .snippets
        .iter()
        .map(|snippet| snippet.text.trim())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    VideoTranscript {
        video_id: video_id.to_string(),
        text,
        language_code: fetched.language_code,
        selection,
        segment_count,
    }
}
