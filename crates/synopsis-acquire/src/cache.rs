use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Cache a raw page to the cache directory for archival/debugging.
///
/// The page is stored as `tt{external_id}.html` so it can be re-examined
/// without re-fetching. Returns the path written.
pub fn cache_html(cache_dir: &Path, external_id: &str, html: &str) -> Result<PathBuf> {
    fs::create_dir_all(cache_dir)
        .with_context(|| format!("Failed to create cache directory {}", cache_dir.display()))?;
    let path = cache_dir.join(format!("tt{external_id}.html"));
    fs::write(&path, html).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = html.len(), "Cached raw HTML");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_html_creates_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("pages");

        let path = cache_html(&dir, "0114709", "<html></html>").unwrap();

        assert_eq!(path, dir.join("tt0114709.html"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "<html></html>");
    }
}
