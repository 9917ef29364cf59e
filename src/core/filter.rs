//! Include/exclude project selection by shell-style glob

use glob::{MatchOptions, Pattern};

use crate::error::{AppError, AppResult};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: false,
    // Display names contain `/`; `*` must match across it like fnmatch does
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

#[derive(Debug, Clone)]
struct NamedPattern {
    raw: String,
    pattern: Pattern,
}

impl NamedPattern {
    fn parse(raw: Option<&str>) -> AppResult<Option<Self>> {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(None);
        };
        let pattern = Pattern::new(raw).map_err(|e| AppError::InvalidPattern {
            pattern: raw.to_string(),
            reason: e.msg.to_string(),
        })?;
        Ok(Some(Self {
            raw: raw.to_string(),
            pattern,
        }))
    }

    fn matches(&self, name: &str) -> bool {
        self.pattern.matches_with(name, MATCH_OPTIONS)
    }
}

/// Decides which projects take part in a report
#[derive(Debug, Clone, Default)]
pub(crate) struct ProjectFilter {
    include: Option<NamedPattern>,
    exclude: Option<NamedPattern>,
}

impl ProjectFilter {
    pub(crate) fn new(include: Option<&str>, exclude: Option<&str>) -> AppResult<Self> {
        Ok(Self {
            include: NamedPattern::parse(include)?,
            exclude: NamedPattern::parse(exclude)?,
        })
    }

    /// Filter that lets every project through
    pub(crate) fn all() -> Self {
        Self::default()
    }

    pub(crate) fn matches(&self, project: &str) -> bool {
        if let Some(include) = &self.include
            && !include.matches(project)
        {
            return false;
        }
        if let Some(exclude) = &self.exclude
            && exclude.matches(project)
        {
            return false;
        }
        true
    }

    pub(crate) fn include_pattern(&self) -> Option<&str> {
        self.include.as_ref().map(|p| p.raw.as_str())
    }

    pub(crate) fn exclude_pattern(&self) -> Option<&str> {
        self.exclude.as_ref().map(|p| p.raw.as_str())
    }

    pub(crate) fn is_active(&self) -> bool {
        self.include.is_some() || self.exclude.is_some()
    }
}
