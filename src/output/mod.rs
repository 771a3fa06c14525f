use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::{ArticleError, Result};

pub mod article;

pub use article::{
    derive_filename, parse, render_document, ArticleMetadata, GeneratedArticle,
};

/// Write the rendered article atomically into the output directory,
/// creating the directory if absent.
///
/// The document is written to a temporary file in the target directory and
/// renamed into place, so a failed run never leaves a partial article.
pub async fn save_article(document: &str, directory: &Path, filename: &str) -> Result<PathBuf> {
    fs_err::create_dir_all(directory).map_err(|e| {
        ArticleError::Write(format!(
            "could not create output directory {}: {e}",
            directory.display()
        ))
    })?;

    let path = directory.join(filename);

    let mut temp = NamedTempFile::new_in(directory)
        .map_err(|e| ArticleError::Write(format!("could not create temporary file: {e}")))?;

    temp.write_all(document.as_bytes())
        .map_err(|e| ArticleError::Write(format!("could not write article: {e}")))?;

    temp.persist(&path).map_err(|e| {
        ArticleError::Write(format!("could not persist article to {}: {e}", path.display()))
    })?;

    tracing::info!("Article written to {}", path.display());

    Ok(path)
}
