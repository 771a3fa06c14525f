use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tokio::time::sleep;

use super::{extract_video_id, TranscriptError, TranscriptFetcher};
use crate::{ArticleError, Result};

/// Ordered concatenation of all successfully fetched transcripts, each
/// section prefixed with its source video's identifier for attribution
#[derive(Debug, Clone)]
pub struct CombinedTranscript {
    /// Combined transcript text with per-video attribution headers
    pub text: String,

    /// IDs of the videos that contributed text, in input order
    pub video_ids: Vec<String>,
}

/// A video that could not contribute a transcript, and why
#[derive(Debug)]
pub struct FetchFailure {
    /// The reference as the operator supplied it
    pub reference: String,

    /// What went wrong for this video
    pub error: TranscriptError,
}

/// Aggregation outcome: the combined document plus any skipped videos
#[derive(Debug)]
pub struct AggregatedTranscripts {
    pub combined: CombinedTranscript,
    pub failures: Vec<FetchFailure>,
}

/// Fetches transcripts strictly one at a time, in input order, pausing
/// between fetches to respect the caption provider's rate limits.
///
/// The delay gate is a deliberate throttle; fetches must not be parallelized.
pub struct TranscriptAggregator<'a> {
    fetcher: &'a dyn TranscriptFetcher,
    fetch_delay: Duration,
}

impl<'a> TranscriptAggregator<'a> {
    pub fn new(fetcher: &'a dyn TranscriptFetcher, fetch_delay: Duration) -> Self {
        Self {
            fetcher,
            fetch_delay,
        }
    }

    /// Fetch every referenced video's transcript and combine the successes.
    ///
    /// Individual failures are recorded and skipped; only a run where zero
    /// transcripts succeed is an error.
    pub async fn collect(&self, references: &[String]) -> Result<AggregatedTranscripts> {
        let mut transcripts = Vec::new();
        let mut failures = Vec::new();

        let progress = ProgressBar::new_spinner();
        progress.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );

        for (index, reference) in references.iter().enumerate() {
            if index > 0 && !self.fetch_delay.is_zero() {
                progress.set_message(format!(
                    "Waiting {}s before next transcript fetch...",
                    self.fetch_delay.as_secs()
                ));
                tracing::info!(
                    "Waiting {}s before next transcript fetch",
                    self.fetch_delay.as_secs()
                );
                sleep(self.fetch_delay).await;
            }

            progress.set_message(format!(
                "Fetching transcript {}/{}...",
                index + 1,
                references.len()
            ));

            let video_id = match extract_video_id(reference) {
                Ok(id) => id,
                Err(error) => {
                    tracing::warn!("Skipping '{}': {}", reference, error);
                    failures.push(FetchFailure {
                        reference: reference.clone(),
                        error,
                    });
                    continue;
                }
            };

            tracing::info!("Fetching transcript for video {}", video_id);

            match self.fetcher.fetch(&video_id).await {
                Ok(transcript) => {
                    tracing::info!(
                        "Downloaded transcript for {} ({} segments, {} chars, language {})",
                        video_id,
                        transcript.segment_count,
                        transcript.text.len(),
                        transcript.language_code
                    );
                    transcripts.push(transcript);
                }
                Err(error) => {
                    tracing::warn!("Skipping video {}: {}", video_id, error);
                    failures.push(FetchFailure {
                        reference: reference.clone(),
                        error,
                    });
                }
            }
        }

        progress.finish_and_clear();

        if transcripts.is_empty() {
            return Err(ArticleError::NoTranscriptsAvailable.into());
        }

        let mut text = String::new();
        let mut video_ids = Vec::with_capacity(transcripts.len());

        for (index, transcript) in transcripts.iter().enumerate() {
            if index > 0 {
                text.push_str("\n\n");
            }
            text.push_str(&format!(
                "--- TRANSCRIPT {} ({}) ---\n\n{}",
                index + 1,
                transcript.video_id,
                transcript.text
            ));
            video_ids.push(transcript.video_id.clone());
        }

        Ok(AggregatedTranscripts {
            combined: CombinedTranscript { text, video_ids },
            failures,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcripts::{LanguageSelection, MockTranscriptFetcher, VideoTranscript};
    use std::sync::{Arc, Mutex};
    use tokio::time::Instant;

    const ID_A: &str = "aaaaaaaaaaa";
    const ID_B: &str = "bbbbbbbbbbb";
    const ID_C: &str = "ccccccccccc";

    fn transcript(video_id: &str, text: &str) -> VideoTranscript {
        VideoTranscript {
            video_id: video_id.to_string(),
            text: text.to_string(),
            language_code: "en".to_string(),
            selection: LanguageSelection::Preferred,
            segment_count: 1,
        }
    }

    fn refs(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    #[tokio::test]
    async fn test_single_video_combined_without_delay() {
        let mut fetcher = MockTranscriptFetcher::new();
        fetcher
            .expect_fetch()
            .times(1)
            .returning(|id| Ok(transcript(id, "some caption text")));

        let aggregator = TranscriptAggregator::new(&fetcher, Duration::from_secs(15));
        let start = Instant::now();
        let result = aggregator.collect(&refs(&[ID_A])).await.unwrap();

        // No delay gate before the first (and only) fetch
        assert!(start.elapsed() < Duration::from_secs(1));
        assert_eq!(result.combined.video_ids, vec![ID_A.to_string()]);
        assert!(result
            .combined
            .text
            .starts_with("--- TRANSCRIPT 1 (aaaaaaaaaaa) ---"));
        assert!(result.combined.text.contains("some caption text"));
        assert!(result.failures.is_empty());
    }

    #[tokio::test]
    async fn test_partial_failures_are_isolated() {
        let mut fetcher = MockTranscriptFetcher::new();
        fetcher.expect_fetch().times(3).returning(|id| {
            if id == ID_B {
                Err(TranscriptError::Unavailable {
                    video_id: id.to_string(),
                    reason: "captions disabled".to_string(),
                })
            } else {
                Ok(transcript(id, &format!("text from {id}")))
            }
        });

        let aggregator = TranscriptAggregator::new(&fetcher, Duration::ZERO);
        let result = aggregator.collect(&refs(&[ID_A, ID_B, ID_C])).await.unwrap();

        assert_eq!(
            result.combined.video_ids,
            vec![ID_A.to_string(), ID_C.to_string()]
        );
        assert!(result.combined.text.contains("text from aaaaaaaaaaa"));
        assert!(result.combined.text.contains("text from ccccccccccc"));
        assert!(!result.combined.text.contains(ID_B));
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].reference, ID_B);
    }

    #[tokio::test]
    async fn test_all_failures_abort_the_run() {
        let mut fetcher = MockTranscriptFetcher::new();
        fetcher.expect_fetch().times(2).returning(|id| {
            Err(TranscriptError::Fetch {
                video_id: id.to_string(),
                reason: "connection reset".to_string(),
            })
        });

        let aggregator = TranscriptAggregator::new(&fetcher, Duration::ZERO);
        let error = aggregator
            .collect(&refs(&[ID_A, ID_B]))
            .await
            .expect_err("aggregation should fail when every fetch fails");

        assert!(matches!(
            error.downcast_ref::<ArticleError>(),
            Some(ArticleError::NoTranscriptsAvailable)
        ));
    }

    #[tokio::test]
    async fn test_invalid_reference_is_recorded_not_fetched() {
        let mut fetcher = MockTranscriptFetcher::new();
        fetcher
            .expect_fetch()
            .times(1)
            .returning(|id| Ok(transcript(id, "caption text")));

        let aggregator = TranscriptAggregator::new(&fetcher, Duration::ZERO);
        let result = aggregator
            .collect(&refs(&["definitely not a video", ID_A]))
            .await
            .unwrap();

        assert_eq!(result.combined.video_ids, vec![ID_A.to_string()]);
        assert_eq!(result.failures.len(), 1);
        assert!(matches!(
            result.failures[0].error,
            TranscriptError::InvalidReference(_)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_gate_between_fetch_starts() {
        let call_starts: Arc<Mutex<Vec<Instant>>> = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&call_starts);

        let mut fetcher = MockTranscriptFetcher::new();
        fetcher.expect_fetch().times(3).returning(move |id| {
            recorded.lock().unwrap().push(Instant::now());
            Ok(transcript(id, "caption text"))
        });

        let delay = Duration::from_secs(15);
        let aggregator = TranscriptAggregator::new(&fetcher, delay);
        aggregator
            .collect(&refs(&[ID_A, ID_B, ID_C]))
            .await
            .unwrap();

        let starts = call_starts.lock().unwrap();
        assert_eq!(starts.len(), 3);
        for pair in starts.windows(2) {
            assert!(pair[1] - pair[0] >= delay);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_applies_even_after_a_failure() {
        let call_starts: Arc<Mutex<Vec<Instant>>> = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&call_starts);

        let mut fetcher = MockTranscriptFetcher::new();
        fetcher.expect_fetch().times(2).returning(move |id| {
            recorded.lock().unwrap().push(Instant::now());
            if id == ID_A {
                Err(TranscriptError::Fetch {
                    video_id: id.to_string(),
                    reason: "timeout".to_string(),
                })
            } else {
                Ok(transcript(id, "caption text"))
            }
        });

        let delay = Duration::from_secs(15);
        let aggregator = TranscriptAggregator::new(&fetcher, delay);
        aggregator.collect(&refs(&[ID_A, ID_B])).await.unwrap();

        let starts = call_starts.lock().unwrap();
        assert_eq!(starts.len(), 2);
        assert!(starts[1] - starts[0] >= delay);
    }
}
