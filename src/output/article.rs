use chrono::{DateTime, SecondsFormat, Utc};

use crate::utils;

/// Title marker the model is instructed to emit on its first line
const TITLE_MARKER: &str = "TITLE:";

/// Hashtag marker the model is instructed to emit on its final line
const HASHTAG_MARKER: &str = "HASHTAGS:";

/// File extension for written articles
const ARTICLE_EXTENSION: &str = "md";

/// Article parsed from raw model output
#[derive(Debug, Clone)]
pub struct GeneratedArticle {
    /// Extracted title, or a timestamp placeholder when parsing fails
    pub title: String,

    /// Body text, verbatim apart from the removed title/hashtag lines
    pub body: String,

    /// Extracted hashtags, each normalized to a leading `#`
    pub hashtags: Vec<String>,

    /// The unmodified model output
    pub raw: String,
}

/// Front-matter metadata for the written article
#[derive(Debug, Clone)]
pub struct ArticleMetadata {
    /// Word-count target matching the requested output size
    pub word_count_target: u32,

    /// Intended audience
    pub audience: String,

    /// When the article was generated
    pub generated_at: DateTime<Utc>,

    /// Number of video references supplied (not the number that succeeded)
    pub source_videos: usize,

    /// All supplied video IDs, in input order
    pub video_ids: Vec<String>,

    /// Whether search augmentation was attached to the generation request
    pub research_enabled: bool,
}

/// Parse raw model output into title, body, and hashtags.
///
/// Title: the `TITLE:` marker line, else the first markdown heading, else
/// the first non-empty line, else a timestamp placeholder. Hashtags: the
/// last `HASHTAGS:` marker line, else a trailing line made up solely of
/// `#tags`, else empty. Whatever remains is the body, spacing untouched.
pub fn parse(raw: &str, generated_at: DateTime<Utc>) -> GeneratedArticle {
    let mut lines: Vec<&str> = raw.lines().collect();

    let hashtags = extract_hashtags(&mut lines);
    let title = extract_title(&mut lines)
        .unwrap_or_else(|| format!("Article {}", generated_at.format("%Y%m%d %H%M%S")));
    let body = lines.join("\n").trim().to_string();

    GeneratedArticle {
        title,
        body,
        hashtags,
        raw: raw.to_string(),
    }
}

fn extract_title(lines: &mut Vec<&str>) -> Option<String> {
    if let Some(pos) = lines
        .iter()
        .position(|line| line.trim_start().starts_with(TITLE_MARKER))
    {
        let title = lines[pos]
            .trim_start()
            .trim_start_matches(TITLE_MARKER)
            .trim()
            .to_string();
        lines.remove(pos);
        if !title.is_empty() {
            return Some(title);
        }
    }

    if let Some(pos) = lines.iter().position(|line| is_heading(line)) {
        let title = lines[pos]
            .trim_start()
            .trim_start_matches('#')
            .trim()
            .to_string();
        lines.remove(pos);
        return Some(title);
    }

    if let Some(pos) = lines.iter().position(|line| !line.trim().is_empty()) {
        let title = lines[pos].trim().to_string();
        lines.remove(pos);
        return Some(title);
    }

    None
}

/// A markdown heading: one or more `#` followed by whitespace and text
fn is_heading(line: &str) -> bool {
    let trimmed = line.trim_start();
    let after_hashes = trimmed.trim_start_matches('#');
    trimmed.starts_with('#')
        && after_hashes.starts_with(char::is_whitespace)
        && !after_hashes.trim().is_empty()
}

fn extract_hashtags(lines: &mut Vec<&str>) -> Vec<String> {
    if let Some(pos) = lines
        .iter()
        .rposition(|line| line.trim_start().starts_with(HASHTAG_MARKER))
    {
        let tags = lines[pos]
            .trim_start()
            .trim_start_matches(HASHTAG_MARKER)
            .split_whitespace()
            .map(|tag| {
                if tag.starts_with('#') {
                    tag.to_string()
                } else {
                    format!("#{tag}")
                }
            })
            .collect();
        lines.remove(pos);
        return tags;
    }

    // No marker; accept a trailing line made up solely of #tags
    if let Some(pos) = lines.iter().rposition(|line| !line.trim().is_empty()) {
        let tokens: Vec<&str> = lines[pos].split_whitespace().collect();
        if !tokens.is_empty() && tokens.iter().all(|t| t.starts_with('#') && t.len() > 1) {
            let tags = tokens.iter().map(|t| t.to_string()).collect();
            lines.remove(pos);
            return tags;
        }
    }

    Vec::new()
}

/// Render the complete article document: front-matter, title heading, body,
/// and a trailing hashtag line when hashtags were found
pub fn render_document(article: &GeneratedArticle, metadata: &ArticleMetadata) -> String {
    let mut document = String::new();

    document.push_str("---\n");
    document.push_str(&format!("title: {}\n", article.title));
    document.push_str("article_type: LinkedIn Article\n");
    document.push_str(&format!(
        "word_count_target: {}\n",
        metadata.word_count_target
    ));
    document.push_str(&format!("audience: {}\n", metadata.audience));
    document.push_str(&format!(
        "generated_date: {}\n",
        metadata
            .generated_at
            .to_rfc3339_opts(SecondsFormat::Secs, true)
    ));
    document.push_str(&format!("source_videos: {}\n", metadata.source_videos));
    document.push_str(&format!("video_ids: {}\n", metadata.video_ids.join(",")));
    document.push_str(&format!(
        "research_enabled: {}\n",
        metadata.research_enabled
    ));
    document.push_str("---\n\n");

    document.push_str(&format!("# {}\n\n", article.title));
    document.push_str(&article.body);
    document.push('\n');

    if !article.hashtags.is_empty() {
        document.push_str(&format!("\n**Hashtags:** {}\n", article.hashtags.join(" ")));
    }

    document
}

/// Derive the output filename from the article title.
///
/// Deterministic and idempotent; falls back to a timestamp-based name when
/// the title slugifies to nothing.
pub fn derive_filename(title: &str, generated_at: DateTime<Utc>) -> String {
    let slug = utils::slugify(title);
    if slug.is_empty() {
        format!("{}.{ARTICLE_EXTENSION}", utils::timestamp_slug(generated_at))
    } else {
        format!("{slug}.{ARTICLE_EXTENSION}")
    }
}
