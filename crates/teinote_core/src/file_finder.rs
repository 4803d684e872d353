//! Input document discovery.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use teinote_parser::Parser;
use tracing::info;
use walkdir::WalkDir;

use crate::TransformError;

/// Finds input documents below a directory.
///
/// Patterns are matched against paths relative to the directory being
/// searched. With no include patterns, any file whose extension the parser
/// accepts is selected.
pub struct FileFinder {
    include_globs: Option<GlobSet>,
    exclude_globs: Option<GlobSet>,
    recursive: bool,
}

impl FileFinder {
    pub fn new(
        include: &[String],
        exclude: &[String],
        recursive: bool,
    ) -> Result<Self, TransformError> {
        let include_globs = Self::build_globset(include)?;
        let exclude_globs = Self::build_globset(exclude)?;

        Ok(Self {
            include_globs,
            exclude_globs,
            recursive,
        })
    }

    fn build_globset(patterns: &[String]) -> Result<Option<GlobSet>, TransformError> {
        if patterns.is_empty() {
            return Ok(None);
        }

        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| {
                TransformError::config(format!("Invalid glob pattern '{}': {}", pattern, e))
            })?;
            builder.add(glob);
        }

        let globset = builder
            .build()
            .map_err(|e| TransformError::config(format!("Failed to build globset: {}", e)))?;

        Ok(Some(globset))
    }

    /// Checks if a relative path should be skipped based on the
    /// include/exclude patterns. Exclusion wins.
    pub fn should_ignore(&self, relative: &Path, parser: &dyn Parser) -> bool {
        if self
            .exclude_globs
            .as_ref()
            .is_some_and(|excludes| excludes.is_match(relative))
        {
            return true;
        }

        match &self.include_globs {
            Some(includes) => !includes.is_match(relative),
            None => !relative
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| parser.can_parse(ext)),
        }
    }

    /// Returns the matching files below `base_dir`, sorted.
    pub fn discover_files(
        &self,
        base_dir: &Path,
        parser: &dyn Parser,
    ) -> Result<Vec<PathBuf>, TransformError> {
        let mut walker = WalkDir::new(base_dir).min_depth(1);
        if !self.recursive {
            walker = walker.max_depth(1);
        }

        let mut files = Vec::new();
        for entry in walker.into_iter() {
            let entry = entry.map_err(|e| {
                TransformError::file(format!("Failed to read {}: {}", base_dir.display(), e))
            })?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(base_dir).unwrap_or(path);
            if self.should_ignore(relative, parser) {
                continue;
            }

            files.push(path.to_path_buf());
        }

        files.sort();
        files.dedup();

        info!("Discovered {} files to process", files.len());
        Ok(files)
    }
}
