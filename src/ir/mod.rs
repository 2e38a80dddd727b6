//! Code artifacts handed to the evaluator.
//!
//! A `CodeContext` is the complete text of one file plus the labels the
//! selector may use. The evaluator never dereferences `file_path`; it is
//! only a grouping label for reports.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One artifact to evaluate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeContext {
    pub file_path: String,
    /// Complete textual body of the artifact.
    pub content: String,
    /// Category used for rule selection when the options name none.
    pub category: Option<String>,
    pub language: Option<Language>,
}

impl CodeContext {
    pub fn new(file_path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            content: content.into(),
            category: None,
            language: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    /// Read a file from disk, inferring the language from its extension.
    ///
    /// Bytes that are not valid UTF-8 (Latin-1 comments in legacy trees)
    /// are replaced with U+FFFD rather than failing the read.
    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let content = match String::from_utf8(bytes) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(path = %path.display(), "file is not valid UTF-8, decoding lossily");
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };
        let language = path
            .extension()
            .map(|e| Language::from_extension(&e.to_string_lossy()))
            .unwrap_or(Language::Unknown);
        Ok(Self::new(path.display().to_string(), content).with_language(language))
    }
}

/// Programming language of a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    C,
    Cpp,
    Unknown,
}

impl Language {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "c" | "h" => Self::C,
            "cpp" | "cc" | "cxx" | "hpp" | "hh" => Self::Cpp,
            _ => Self::Unknown,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::C => write!(f, "C"),
            Self::Cpp => write!(f, "C++"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}
