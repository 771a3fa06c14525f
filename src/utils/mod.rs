use chrono::{DateTime, Utc};

/// Maximum length of a derived filename stem, in characters
const MAX_SLUG_CHARS: usize = 80;

/// Derive a filesystem-safe slug from an article title.
///
/// Lowercases the title and collapses every run of non-alphanumeric
/// characters into a single `-`. The result is bounded to
/// [`MAX_SLUG_CHARS`] characters and never starts or ends with a separator.
/// Deriving twice yields the same slug.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut gap = false;

    for c in title.chars() {
        if c.is_alphanumeric() {
            if gap && !slug.is_empty() {
                slug.push('-');
            }
            gap = false;
            slug.extend(c.to_lowercase());
        } else {
            gap = true;
        }
    }

    let truncated: String = slug.chars().take(MAX_SLUG_CHARS).collect();
    truncated.trim_end_matches('-').to_string()
}

/// Timestamp-based name for articles whose title slugifies to nothing
pub fn timestamp_slug(at: DateTime<Utc>) -> String {
    format!("article-{}", at.format("%Y%m%d-%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("Rust vs. Go: A Comparison"), "rust-vs-go-a-comparison");
    }

    #[test]
    fn test_slugify_collapses_punctuation_runs() {
        assert_eq!(slugify("Hello --- World!!!"), "hello-world");
        assert_eq!(slugify("  spaced   out  "), "spaced-out");
    }

    #[test]
    fn test_slugify_case_and_punctuation_insensitive() {
        assert_eq!(slugify("Why Rust?"), slugify("why rust"));
        assert_eq!(slugify("WHY, RUST!"), slugify("Why Rust?"));
    }

    #[test]
    fn test_slugify_idempotent() {
        let once = slugify("The Real Cost of Microservices (2026 Edition)");
        assert_eq!(slugify(&once), once);
    }

    #[test]
    fn test_slugify_truncates() {
        let long_title = "word ".repeat(50);
        let slug = slugify(&long_title);
        assert!(slug.chars().count() <= 80);
        assert!(!slug.ends_with('-'));
    }

    #[test]
    fn test_slugify_empty_and_symbol_only() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!! ???"), "");
    }

    #[test]
    fn test_slugify_keeps_unicode_letters() {
        assert_eq!(slugify("Café Culture"), "café-culture");
    }

    #[test]
    fn test_timestamp_slug() {
        let at = Utc.with_ymd_and_hms(2026, 1, 15, 9, 30, 0).unwrap();
        assert_eq!(timestamp_slug(at), "article-20260115-093000");
    }
}
