//! Keyword-based channel selection

pub mod keywords;

pub use keywords::{FilterMode, KeywordSet, create_empty_keyword_file, load_keywords};
