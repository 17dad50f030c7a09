//! Ref-aware route rewriting.
//!
//! When the user picks another branch, tag or commit, the current view should be
//! kept: a file stays a file, a directory stays a directory, and the repository
//! root moves into the tree view of the selected ref. [`compute_new_path`] works
//! out the path for that, or `None` when no redirect should happen.
//!
//! # Strategies (first match wins)
//! 1. **Blob**: `owner/repo/blob/<current_ref>/file` -> `owner/repo/blob/<new>/file`
//! 2. **Tree**: `owner/repo/tree/<ref or branch>/dir` -> `owner/repo/tree/<new>/dir`
//! 3. **Root**: `owner/repo` -> `owner/repo/tree/<new>`
//!
//! The new ref is percent-encoded into a single segment, so `feature/login`
//! becomes `feature%2Flogin`.

use serde::{Deserialize, Serialize};
use std::fmt;

const BLOB_SEGMENT: &str = "blob";
const TREE_SEGMENT: &str = "tree";

/// Everything the rewriter needs to know about the current route
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRefDescriptor {
    pub pathname: String,
    pub owner: Option<String>,
    pub repo: Option<String>,
    /// Ref embedded in a blob or tree path
    pub current_ref: Option<String>,
    /// Branch route parameter, used for the tree view when no ref is known
    pub branch: Option<String>,
    pub new_ref_name: String,
}

impl RouteRefDescriptor {
    pub fn new(pathname: impl Into<String>, new_ref_name: impl Into<String>) -> Self {
        Self {
            pathname: pathname.into(),
            new_ref_name: new_ref_name.into(),
            ..Self::default()
        }
    }

    pub fn with_repo(mut self, owner: impl Into<String>, repo: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self.repo = Some(repo.into());
        self
    }

    pub fn with_current_ref(mut self, current_ref: impl Into<String>) -> Self {
        self.current_ref = Some(current_ref.into());
        self
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewriteStrategy {
    Blob,
    Tree,
    Root,
}

impl fmt::Display for RewriteStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RewriteStrategy::Blob => "blob",
            RewriteStrategy::Tree => "tree",
            RewriteStrategy::Root => "root",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rewrite {
    pub strategy: RewriteStrategy,
    pub path: String,
}

/// New path for the selected ref, or `None` when the caller must not navigate.
pub fn compute_new_path(descriptor: &RouteRefDescriptor) -> Option<String> {
    rewrite(descriptor).map(|rewrite| rewrite.path)
}

/// Same as [`compute_new_path`], also reporting which strategy applied.
pub fn rewrite(descriptor: &RouteRefDescriptor) -> Option<Rewrite> {
    let owner = non_empty(descriptor.owner.as_deref())?;
    let repo = non_empty(descriptor.repo.as_deref())?;
    if descriptor.new_ref_name.is_empty() {
        return None;
    }

    let pathname = descriptor.pathname.trim_end_matches('/');
    let segments: Vec<&str> = pathname.split('/').collect();
    let encoded = urlencoding::encode(&descriptor.new_ref_name);

    if let Some(current_ref) = non_empty(descriptor.current_ref.as_deref()) {
        if let Some(path) = replace_ref(&segments, owner, repo, BLOB_SEGMENT, current_ref, &encoded) {
            log::debug!("blob rewrite: {pathname} -> {path}");
            return Some(Rewrite {
                strategy: RewriteStrategy::Blob,
                path,
            });
        }
    }

    let tree_ref = non_empty(descriptor.current_ref.as_deref())
        .or_else(|| non_empty(descriptor.branch.as_deref()));
    if let Some(tree_ref) = tree_ref {
        if let Some(path) = replace_ref(&segments, owner, repo, TREE_SEGMENT, tree_ref, &encoded) {
            log::debug!("tree rewrite: {pathname} -> {path}");
            return Some(Rewrite {
                strategy: RewriteStrategy::Tree,
                path,
            });
        }
    }

    if is_repo_root(&segments, owner, repo) {
        let path = format!("{pathname}/{TREE_SEGMENT}/{encoded}");
        log::debug!("root rewrite: {pathname} -> {path}");
        return Some(Rewrite {
            strategy: RewriteStrategy::Root,
            path,
        });
    }

    log::debug!("no rewrite applies to {pathname}");
    None
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Replace the ref following `owner/repo/<view>` with `encoded`.
///
/// The ref may appear percent-encoded as one segment or raw, spanning as many
/// segments as it has `/`-separated parts.
fn replace_ref(
    segments: &[&str],
    owner: &str,
    repo: &str,
    view: &str,
    current_ref: &str,
    encoded: &str,
) -> Option<String> {
    let ref_parts: Vec<&str> = current_ref.split('/').collect();
    let encoded_ref = urlencoding::encode(current_ref);

    for start in 0..segments.len() {
        let head = &segments[start..];
        if head.len() < 4 || head[0] != owner || head[1] != repo || head[2] != view {
            continue;
        }

        let after_view = &head[3..];
        let consumed = if after_view[0] == encoded_ref || after_view[0] == current_ref {
            1
        } else if after_view.len() >= ref_parts.len() && after_view[..ref_parts.len()] == ref_parts[..] {
            ref_parts.len()
        } else {
            continue;
        };

        let ref_index = start + 3;
        let mut rebuilt: Vec<&str> = Vec::with_capacity(segments.len());
        rebuilt.extend_from_slice(&segments[..ref_index]);
        rebuilt.push(encoded);
        rebuilt.extend_from_slice(&segments[ref_index + consumed..]);
        return Some(rebuilt.join("/"));
    }

    None
}

/// A path whose non-empty segments are exactly `owner/repo`, optionally
/// behind a single provider segment such as `gh`
fn is_repo_root(segments: &[&str], owner: &str, repo: &str) -> bool {
    let named: Vec<&str> = segments.iter().copied().filter(|s| !s.is_empty()).collect();
    match named.as_slice() {
        [o, r] => *o == owner && *r == repo,
        [provider, o, r] => {
            *provider != BLOB_SEGMENT && *provider != TREE_SEGMENT && *o == owner && *r == repo
        }
        _ => false,
    }
}
