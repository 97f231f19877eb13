//! GitHub repository references
//!
//! Accepted forms:
//! - `owner/repo`
//! - `owner/repo/branch` (the third segment is always a branch)
//! - `https://host/owner/repo[.git]`
//! - `https://host/owner/repo/tree/<branch>`
//! - `https://host/owner/repo/tree/<branch>/<subpath>`

use super::SourceError;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

pub const DEFAULT_BRANCH: &str = "main";
pub const FALLBACK_BRANCH: &str = "master";

/// Host that serves `/<owner>/<repo>/archive/refs/heads/<branch>.tar.gz`
pub const GITHUB_BASE_URL: &str = "https://github.com";

static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://[^/\s]+/([^/\s]+)/([^/\s]+?)(?:\.git)?(?:/tree/([^/\s]+)(?:/(.+?))?)?/?$")
        .expect("valid repository URL pattern")
});

static SHORTHAND_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^/\s]+)/([^/\s]+)(?:/([^/\s]+))?$").expect("valid shorthand pattern")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
    pub branch: String,
    pub subpath: Option<String>,
}

impl RepoRef {
    /// Branches to try, in order
    pub fn branch_candidates(&self) -> Vec<&str> {
        if self.branch == DEFAULT_BRANCH {
            vec![DEFAULT_BRANCH, FALLBACK_BRANCH]
        } else {
            vec![self.branch.as_str()]
        }
    }

    pub fn tarball_url(&self, base_url: &str, branch: &str) -> String {
        format!(
            "{}/{}/{}/archive/refs/heads/{}.tar.gz",
            base_url.trim_end_matches('/'),
            self.owner,
            self.repo,
            branch
        )
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}@{}", self.owner, self.repo, self.branch)?;
        if let Some(subpath) = &self.subpath {
            write!(f, ":{}", subpath)?;
        }
        Ok(())
    }
}

/// Parse a repository reference; the URL form is tried first
pub fn parse_reference(input: &str) -> Result<RepoRef, SourceError> {
    if let Some(caps) = URL_RE.captures(input) {
        return Ok(RepoRef {
            owner: caps[1].to_string(),
            repo: caps[2].to_string(),
            branch: caps
                .get(3)
                .map_or_else(|| DEFAULT_BRANCH.to_string(), |m| m.as_str().to_string()),
            subpath: caps.get(4).map(|m| m.as_str().to_string()),
        });
    }

    if let Some(caps) = SHORTHAND_RE.captures(input) {
        return Ok(RepoRef {
            owner: caps[1].to_string(),
            repo: caps[2].to_string(),
            branch: caps
                .get(3)
                .map_or_else(|| DEFAULT_BRANCH.to_string(), |m| m.as_str().to_string()),
            subpath: None,
        });
    }

    Err(SourceError::InvalidReference(input.to_string()))
}
