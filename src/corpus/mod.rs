//! Corpus loading.
//!
//! A corpus is a plain-text UTF-8 file with one segment per line. Blank lines
//! are skipped; the remaining lines get stable zero-based indices in file
//! order, which ranking uses for tie-breaking.

use crate::error::{Result, SvarError};
use std::path::Path;
use tracing::debug;

/// One indexed unit of source text. Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Stable position among non-empty lines.
    pub index: usize,
    /// Trimmed line content.
    pub text: String,
}

/// Load a corpus file into ordered segments.
///
/// Fails if the file is missing or unreadable; an existing but empty file
/// yields an empty corpus.
pub fn load(path: &Path) -> Result<Vec<Segment>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        SvarError::Corpus(format!("Cannot read corpus file {}: {}", path.display(), e))
    })?;

    let segments: Vec<Segment> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(index, line)| Segment {
            index,
            text: line.to_string(),
        })
        .collect();

    debug!("Loaded {} segments from {}", segments.len(), path.display());
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_skips_blank_lines_and_trims() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Alphabet dropped 8 percent.").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  Nvidia stock rose.  ").unwrap();
        writeln!(file, "   ").unwrap();

        let segments = load(file.path()).unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].index, 0);
        assert_eq!(segments[0].text, "Alphabet dropped 8 percent.");
        assert_eq!(segments[1].index, 1);
        assert_eq!(segments[1].text, "Nvidia stock rose.");
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = load(Path::new("/nonexistent/corpus.txt"));
        assert!(matches!(result, Err(SvarError::Corpus(_))));
    }

    #[test]
    fn test_load_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let segments = load(file.path()).unwrap();
        assert!(segments.is_empty());
    }
}
