//! Directory-listing style decoration for flat item lists.
//!
//! ```text
//! ├── Version Control
//! ├── Zero Drift
//! └── Instant Rollbacks
//! ```

use tracing::debug;

use super::error::RevealError;

/// Prefix for every entry except the last.
pub const BRANCH: &str = "├──";
/// Prefix for the final entry.
pub const LAST_BRANCH: &str = "└──";

/// One decorated row of a tree listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeLine<'a> {
    pub prefix: &'static str,
    pub text: &'a str,
}

/// Pair each item with its tree prefix.  Empty input yields an empty listing.
pub fn format_tree_list<S: AsRef<str>>(items: &[S]) -> Vec<TreeLine<'_>> {
    if items.is_empty() {
        debug!("{}", RevealError::EmptyListInput { context: "tree list" });
        return Vec::new();
    }
    let last = items.len() - 1;
    items
        .iter()
        .enumerate()
        .map(|(i, item)| TreeLine {
            prefix: if i == last { LAST_BRANCH } else { BRANCH },
            text: item.as_ref(),
        })
        .collect()
}

/// Path segment shown in the pseudo prompt above a listing:
/// `"Cloud Native"` → `"CLOUD-NATIVE"`.  Every whitespace run, leading and
/// trailing ones included, becomes a single `-`.
pub fn terminal_path(title: &str) -> String {
    let mut path = String::with_capacity(title.len());
    let mut in_gap = false;
    for ch in title.chars() {
        if ch.is_whitespace() {
            if !in_gap {
                path.push('-');
            }
            in_gap = true;
        } else {
            path.extend(ch.to_uppercase());
            in_gap = false;
        }
    }
    path
}
