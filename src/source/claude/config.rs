//! Claude Code data source configuration
//!
//! Defines the ClaudeSource implementation of the Source trait.

use std::path::{Path, PathBuf};

use crate::error::AppResult;
use crate::source::{ParsedFile, Source};

use super::parser::{find_claude_files, parse_claude_file};

/// Claude data source rooted at a projects directory
pub(crate) struct ClaudeSource {
    root: PathBuf,
}

impl ClaudeSource {
    pub(crate) fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// `~/.claude/projects`, where Claude Code keeps one directory per project
    pub(crate) fn default_root() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".claude").join("projects"))
    }
}

impl Source for ClaudeSource {
    fn display_name(&self) -> &'static str {
        "Claude Code"
    }

    fn root(&self) -> &Path {
        &self.root
    }

    fn find_files(&self) -> Vec<PathBuf> {
        find_claude_files(&self.root)
    }

    fn parse_file(&self, path: &Path) -> AppResult<ParsedFile> {
        parse_claude_file(path)
    }
}
