//! Source discovery: turns CLI paths into code contexts.

use std::path::Path;

use glob::Pattern;

use crate::config::FilesSection;
use crate::error::{Result, StandardsError};
use crate::ir::CodeContext;

const MAX_FILE_BYTES: u64 = 1_048_576;

/// Include/exclude globs, matched against paths relative to the walk root.
#[derive(Debug, Clone)]
pub struct FileFilter {
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
}

impl FileFilter {
    pub fn new(files: &FilesSection) -> Result<Self> {
        Ok(Self {
            include: compile(&files.include)?,
            exclude: compile(&files.exclude)?,
        })
    }

    pub fn matches(&self, relative: &Path) -> bool {
        self.include.iter().any(|p| p.matches_path(relative))
            && !self.exclude.iter().any(|p| p.matches_path(relative))
    }
}

fn compile(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| {
            Pattern::new(p).map_err(|e| StandardsError::Glob {
                pattern: p.clone(),
                message: e.to_string(),
            })
        })
        .collect()
}

/// Collect code contexts under `root`, sorted by path.
///
/// A file given directly as `root` is always included. Directories are
/// walked with `.gitignore` support; hidden entries and files over 1 MiB
/// are skipped.
pub fn collect_contexts(root: &Path, filter: &FileFilter) -> Result<Vec<CodeContext>> {
    if root.is_file() {
        return Ok(vec![CodeContext::from_file(root)?]);
    }

    let walker = ignore::WalkBuilder::new(root)
        .hidden(true)
        .git_ignore(true)
        .build();

    let mut paths = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let relative = path.strip_prefix(root).unwrap_or(path);
        if !filter.matches(relative) {
            continue;
        }

        let metadata = std::fs::metadata(path)?;
        if metadata.len() > MAX_FILE_BYTES {
            tracing::warn!(path = %path.display(), bytes = metadata.len(), "skipping large file");
            continue;
        }

        paths.push(path.to_path_buf());
    }

    paths.sort();
    tracing::debug!(root = %root.display(), files = paths.len(), "collected sources");

    paths.iter().map(|p| CodeContext::from_file(p)).collect()
}
