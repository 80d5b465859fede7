use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, info};

use crate::errors::{AppError, AppResult};

/// Lowercased, trimmed, non-empty keywords in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet {
    keywords: Vec<String>,
}

/// What the run does with the catalog, decided solely by the keyword set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterMode {
    /// No keywords: list channel names so the operator can write some
    Discovery,
    /// Keep channels whose name contains any keyword
    Selection(KeywordSet),
}

impl KeywordSet {
    /// One keyword per non-blank line
    pub fn parse(contents: &str) -> Self {
        Self::from_keywords(contents.lines())
    }

    pub fn from_keywords<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Case-insensitive, unanchored substring match against any keyword
    pub fn matches(&self, channel_name: &str) -> bool {
        let name = channel_name.to_lowercase();
        self.keywords.iter().any(|keyword| name.contains(keyword.as_str()))
    }
}

impl FilterMode {
    pub fn from_keywords(keywords: KeywordSet) -> Self {
        if keywords.is_empty() {
            Self::Discovery
        } else {
            Self::Selection(keywords)
        }
    }
}

/// Read the keyword file; a missing file is an empty set
pub async fn load_keywords(path: &Path) -> AppResult<KeywordSet> {
    match tokio::fs::read_to_string(path).await {
        Ok(contents) => {
            let keywords = KeywordSet::parse(&contents);
            debug!("Loaded {} keyword(s) from {}", keywords.len(), path.display());
            Ok(keywords)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("Keyword file {} does not exist", path.display());
            Ok(KeywordSet::default())
        }
        Err(e) => Err(AppError::io(path, e)),
    }
}

/// Create (or truncate) the keyword file so the operator has somewhere to
/// paste names after a discovery run
pub async fn create_empty_keyword_file(path: &Path) -> AppResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| AppError::io(parent, e))?;
    }
    tokio::fs::write(path, b"")
        .await
        .map_err(|e| AppError::io(path, e))?;
    info!("Created empty keyword file at {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_parse_trims_lowercases_and_skips_blank_lines() {
        let keywords = KeywordSet::parse("  Nick Jr \n\n\t\nCARTOONS\r\n   \n");
        assert_eq!(keywords.keywords(), &["nick jr".to_string(), "cartoons".to_string()]);
    }

    #[test]
    fn test_blank_only_file_is_discovery() {
        let keywords = KeywordSet::parse("\n   \n\t\n");
        assert!(keywords.is_empty());
        assert_eq!(FilterMode::from_keywords(keywords), FilterMode::Discovery);
    }

    #[test]
    fn test_non_empty_set_is_selection() {
        let keywords = KeywordSet::from_keywords(["jr"]);
        assert_eq!(
            FilterMode::from_keywords(keywords.clone()),
            FilterMode::Selection(keywords)
        );
    }

    #[rstest]
    #[case("Nick Jr", true)]
    #[case("DISNEY JR.", true)]
    #[case("Junior Cooking", false)]
    #[case("Cartoon Classics", true)]
    #[case("News 24/7", false)]
    fn test_matches_any_keyword(#[case] name: &str, #[case] expected: bool) {
        let keywords = KeywordSet::from_keywords(["jr", "cartoon"]);
        assert_eq!(keywords.matches(name), expected);
    }

    #[tokio::test]
    async fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let keywords = load_keywords(&dir.path().join("absent.txt")).await.unwrap();
        assert!(keywords.is_empty());
    }

    #[tokio::test]
    async fn test_load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("channels.txt");
        tokio::fs::write(&path, "Kids\nAnime All Day\n").await.unwrap();

        let keywords = load_keywords(&path).await.unwrap();
        assert_eq!(keywords.keywords(), &["kids".to_string(), "anime all day".to_string()]);
    }

    #[tokio::test]
    async fn test_create_empty_keyword_file_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/lists/channels.txt");

        create_empty_keyword_file(&path).await.unwrap();

        assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), "");
        assert!(load_keywords(&path).await.unwrap().is_empty());
    }
}
