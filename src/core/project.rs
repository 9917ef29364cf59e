//! Readable project names from Claude's flattened directory names
//!
//! Claude stores each project's logs under a directory named after the working
//! directory with every separator replaced by `-`, e.g.
//! `/Users/alice/Code/acme` becomes `-Users-alice-Code-acme`. Turning that back
//! into a path is lossy (dashes inside names become `/`), but it is stable,
//! which is all grouping needs.

use std::path::Path;

/// Flatten a real path the way Claude names its project directories
pub(crate) fn flatten_path(path: &str) -> String {
    path.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .trim_end_matches('-')
        .to_string()
}

/// Maps raw project directory names to display names
#[derive(Debug, Clone, Default)]
pub(crate) struct ProjectNamer {
    /// Flattened prefixes removed entirely, longest first
    strip_prefixes: Vec<String>,
    /// Flattened home directory, shown as `~/`
    home: Option<String>,
}

impl ProjectNamer {
    pub(crate) fn new(home: Option<&Path>, strip_prefixes: &[String]) -> Self {
        let mut strip_prefixes: Vec<String> = strip_prefixes
            .iter()
            .map(|p| flatten_path(p))
            .filter(|p| !p.is_empty())
            .collect();
        strip_prefixes.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        strip_prefixes.dedup();

        let home = home
            .map(|h| flatten_path(&h.to_string_lossy()))
            .filter(|h| !h.is_empty());

        Self {
            strip_prefixes,
            home,
        }
    }

    /// Namer for the current user's home directory
    pub(crate) fn for_current_user(strip_prefixes: &[String]) -> Self {
        Self::new(dirs::home_dir().as_deref(), strip_prefixes)
    }

    pub(crate) fn display_name(&self, raw: &str) -> String {
        for prefix in &self.strip_prefixes {
            if let Some(rest) = strip_segment_prefix(raw, prefix) {
                return unflatten(rest);
            }
        }

        if let Some(home) = &self.home
            && let Some(rest) = strip_segment_prefix(raw, home)
        {
            return format!("~/{}", unflatten(rest));
        }

        unflatten(raw)
    }
}

/// Strip `prefix` only when it ends on a segment boundary and leaves something behind
fn strip_segment_prefix<'a>(raw: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = raw.strip_prefix(prefix)?;
    if rest.len() > 1 && rest.starts_with('-') {
        Some(rest)
    } else {
        None
    }
}

fn unflatten(raw: &str) -> String {
    raw.strip_prefix('-').unwrap_or(raw).replace('-', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn namer() -> ProjectNamer {
        ProjectNamer::new(
            Some(Path::new("/Users/alice")),
            &["/Users/alice/Code".to_string()],
        )
    }

    #[test]
    fn test_flatten_path() {
        assert_eq!(flatten_path("/Users/alice/Code"), "-Users-alice-Code");
        assert_eq!(flatten_path("/home/bob/my.project/"), "-home-bob-my-project");
        assert_eq!(flatten_path(r"C:\Users\carol"), "C--Users-carol");
    }

    #[test]
    fn strip_prefix_removes_code_dir() {
        assert_eq!(namer().display_name("-Users-alice-Code-acme-api"), "acme/api");
    }

    #[test]
    fn home_dir_becomes_tilde() {
        assert_eq!(namer().display_name("-Users-alice-notes"), "~/notes");
    }

    #[test]
    fn unrelated_path_is_unflattened() {
        assert_eq!(namer().display_name("-opt-work-infra"), "opt/work/infra");
        assert_eq!(namer().display_name("simple"), "simple");
    }

    #[test]
    fn prefix_must_end_on_segment_boundary() {
        // "-Users-alicex" shares the "-Users-alice" prefix text but is another user
        assert_eq!(namer().display_name("-Users-alicex-site"), "Users/alicex/site");
    }

    #[test]
    fn bare_prefix_is_not_stripped_to_nothing() {
        assert_eq!(namer().display_name("-Users-alice-Code"), "~/Code");
        assert_eq!(namer().display_name("-Users-alice"), "Users/alice");
    }

    #[test]
    fn longest_strip_prefix_wins() {
        let namer = ProjectNamer::new(
            None,
            &["/srv".to_string(), "/srv/clients".to_string()],
        );
        assert_eq!(namer.display_name("-srv-clients-acme"), "acme");
        assert_eq!(namer.display_name("-srv-tools"), "tools");
    }

    #[test]
    fn display_name_is_stable() {
        let n = namer();
        let raw = "-Users-alice-Code-wallfacer";
        assert_eq!(n.display_name(raw), n.display_name(raw));
    }
}
