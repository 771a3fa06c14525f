use async_trait::async_trait;
use url::Url;

pub mod aggregator;
pub mod youtube;

pub use aggregator::{AggregatedTranscripts, CombinedTranscript, FetchFailure, TranscriptAggregator};

/// How the transcript language was chosen for a video
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageSelection {
    /// An English caption track was available
    Preferred,

    /// English was unavailable; the first listed language was used
    Fallback(String),
}

/// One successfully fetched transcript
#[derive(Debug, Clone)]
pub struct VideoTranscript {
    /// Canonical 11-character video ID
    pub video_id: String,

    /// Caption text in original order, timing metadata discarded
    pub text: String,

    /// Language code of the fetched caption track
    pub language_code: String,

    /// Whether the preferred language was found or a fallback was used
    pub selection: LanguageSelection,

    /// Number of caption segments that were concatenated
    pub segment_count: usize,
}

/// Per-video transcript failures; recoverable at the aggregation level
#[derive(thiserror::Error, Debug)]
pub enum TranscriptError {
    #[error("Could not extract a video ID from '{0}'")]
    InvalidReference(String),

    #[error("No transcript available for video {video_id}: {reason}")]
    Unavailable { video_id: String, reason: String },

    #[error("Failed to fetch transcript for video {video_id}: {reason}")]
    Fetch { video_id: String, reason: String },
}

/// Trait for retrieving a transcript for a single video
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranscriptFetcher: Send + Sync {
    /// Fetch the caption transcript for a canonical video ID
    async fn fetch(&self, video_id: &str) -> std::result::Result<VideoTranscript, TranscriptError>;
}

/// Extract the canonical video ID from a reference.
///
/// Accepted shapes: bare 11-character IDs, watch URLs (`youtube.com/watch?v=`),
/// short URLs (`youtu.be/`), and `embed`/`shorts`/`v`/`live` path URLs.
pub fn extract_video_id(reference: &str) -> std::result::Result<String, TranscriptError> {
    let input = reference.trim();

    if is_video_id(input) {
        return Ok(input.to_string());
    }

    let invalid = || TranscriptError::InvalidReference(reference.to_string());

    let parsed = Url::parse(input).map_err(|_| invalid())?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid());
    }

    let host = parsed
        .host_str()
        .unwrap_or("")
        .trim_start_matches("www.")
        .trim_start_matches("m.");

    let candidate = match host {
        "youtu.be" => parsed
            .path_segments()
            .and_then(|mut segments| segments.next())
            .map(str::to_string),
        "youtube.com" | "youtube-nocookie.com" => {
            let query_id = parsed
                .query_pairs()
                .find(|(key, _)| key == "v")
                .map(|(_, value)| value.into_owned());

            query_id.or_else(|| {
                let segments: Vec<&str> = parsed
                    .path_segments()
                    .map(|segments| segments.collect())
                    .unwrap_or_default();

                match segments.as_slice() {
                    ["embed", id, ..] | ["shorts", id, ..] | ["v", id, ..] | ["live", id, ..] => {
                        Some((*id).to_string())
                    }
                    _ => None,
                }
            })
        }
        _ => None,
    };

    candidate.filter(|id| is_video_id(id)).ok_or_else(invalid)
}

/// Check that a string is a plausible YouTube video ID
fn is_video_id(s: &str) -> bool {
    s.len() == 11
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "dQw4w9WgXcQ";

    #[test]
    fn test_bare_video_id() {
        assert_eq!(extract_video_id(ID).unwrap(), ID);
        assert_eq!(extract_video_id("  dQw4w9WgXcQ  ").unwrap(), ID);
    }

    #[test]
    fn test_watch_url() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ").unwrap(),
            ID
        );
    }

    #[test]
    fn test_watch_url_with_extra_params() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=120&list=PL1").unwrap(),
            ID
        );
    }

    #[test]
    fn test_short_url() {
        assert_eq!(extract_video_id("https://youtu.be/dQw4w9WgXcQ").unwrap(), ID);
        assert_eq!(
            extract_video_id("https://youtu.be/dQw4w9WgXcQ?t=42").unwrap(),
            ID
        );
    }

    #[test]
    fn test_embed_and_shorts_urls() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/embed/dQw4w9WgXcQ").unwrap(),
            ID
        );
        assert_eq!(
            extract_video_id("https://youtube.com/shorts/dQw4w9WgXcQ").unwrap(),
            ID
        );
    }

    #[test]
    fn test_mobile_url() {
        assert_eq!(
            extract_video_id("https://m.youtube.com/watch?v=dQw4w9WgXcQ").unwrap(),
            ID
        );
    }

    #[test]
    fn test_rejects_invalid_references() {
        assert!(extract_video_id("").is_err());
        assert!(extract_video_id("not a reference").is_err());
        assert!(extract_video_id("tooshort").is_err());
        assert!(extract_video_id("ftp://youtube.com/watch?v=dQw4w9WgXcQ").is_err());
        assert!(extract_video_id("https://example.com/watch?v=dQw4w9WgXcQ").is_err());
        assert!(extract_video_id("https://www.youtube.com/watch?v=bad/id").is_err());
    }

    #[test]
    fn test_is_video_id() {
        assert!(is_video_id("abcDEF123-_"));
        assert!(!is_video_id("abcDEF123-!"));
        assert!(!is_video_id("abcDEF123"));
    }
}
