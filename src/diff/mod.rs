//! Line-level diff classification.
//!
//! Takes two extracted text blobs, computes a line alignment with the
//! `similar` crate, and reduces the raw change stream into categorized
//! entries plus aggregate counts. An adjacent delete/insert pair in the
//! change stream is merged into a single [`DiffEntry::Modified`] entry;
//! this merge is strictly pairwise, never block-wise.
//!
//! # Example
//!
//! ```
//! use pdfdiff::diff::{compare, DiffEntry};
//!
//! let result = compare("line1\nline2\n", "line1\nline3\n");
//! assert_eq!(result.summary.modifications, 1);
//! assert!(matches!(result.differences[1], DiffEntry::Modified { .. }));
//! ```

use serde::{Deserialize, Serialize};
use similar::{Algorithm, ChangeTag, TextDiff};

/// The category of a single diff entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffKind {
    Unchanged,
    Added,
    Removed,
    Modified,
}

/// One classified unit of comparison output.
///
/// Line text keeps its trailing line terminator when the source line had
/// one. `Modified` carries the old and new line separately so the caller
/// always knows which is which.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DiffEntry {
    Unchanged { text: String },
    Added { text: String },
    Removed { text: String },
    Modified { old: String, new: String },
}

impl DiffEntry {
    /// The category of this entry.
    pub fn kind(&self) -> DiffKind {
        match self {
            DiffEntry::Unchanged { .. } => DiffKind::Unchanged,
            DiffEntry::Added { .. } => DiffKind::Added,
            DiffEntry::Removed { .. } => DiffKind::Removed,
            DiffEntry::Modified { .. } => DiffKind::Modified,
        }
    }
}

/// Aggregate counts of classified differences.
///
/// A merged delete/insert pair counts as one modification, not as one
/// addition plus one deletion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub additions: usize,
    pub deletions: usize,
    pub modifications: usize,
}

impl Summary {
    /// True when the inputs had no differences.
    pub fn is_empty(&self) -> bool {
        self.additions == 0 && self.deletions == 0 && self.modifications == 0
    }
}

/// Result of comparing two texts: ordered entries plus the summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub differences: Vec<DiffEntry>,
    pub summary: Summary,
}

impl Comparison {
    /// Serialize to compact JSON.
    pub fn to_json(&self) -> crate::Result<String> {
        serde_json::to_string(self).map_err(|e| crate::Error::Comparison(e.to_string()))
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> crate::Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| crate::Error::Comparison(e.to_string()))
    }
}

/// Compare two texts line by line and categorize the differences.
///
/// Total over string inputs: two empty texts compare to zero entries.
/// Both texts are split into lines with trailing terminators preserved,
/// aligned with a Myers line diff, and the change stream is reduced with
/// this policy, preserving relative order:
///
/// - a line present in both → [`DiffEntry::Unchanged`]
/// - a deleted line immediately followed by an inserted line → one
///   [`DiffEntry::Modified`], consuming both
/// - any other deleted line → [`DiffEntry::Removed`]
/// - any other inserted line → [`DiffEntry::Added`]
pub fn compare(old: &str, new: &str) -> Comparison {
    let diff = TextDiff::configure()
        .algorithm(Algorithm::Myers)
        .diff_lines(old, new);

    let changes: Vec<(ChangeTag, String)> = diff
        .iter_all_changes()
        .map(|change| (change.tag(), change.value().to_string()))
        .collect();

    let mut differences = Vec::with_capacity(changes.len());
    let mut summary = Summary::default();
    let mut index = 0;

    while index < changes.len() {
        match changes[index].0 {
            ChangeTag::Equal => {
                differences.push(DiffEntry::Unchanged {
                    text: changes[index].1.clone(),
                });
                index += 1;
            }
            ChangeTag::Insert => {
                differences.push(DiffEntry::Added {
                    text: changes[index].1.clone(),
                });
                summary.additions += 1;
                index += 1;
            }
            ChangeTag::Delete => {
                // A removal directly followed by an addition is a single-line
                // replacement. Only the adjacent pair merges; the rest of a
                // delete/insert block stays standalone.
                if index + 1 < changes.len() && changes[index + 1].0 == ChangeTag::Insert {
                    differences.push(DiffEntry::Modified {
                        old: changes[index].1.clone(),
                        new: changes[index + 1].1.clone(),
                    });
                    summary.modifications += 1;
                    index += 2;
                } else {
                    differences.push(DiffEntry::Removed {
                        text: changes[index].1.clone(),
                    });
                    summary.deletions += 1;
                    index += 1;
                }
            }
        }
    }

    log::debug!(
        "comparison produced {} entries ({} additions, {} deletions, {} modifications)",
        differences.len(),
        summary.additions,
        summary.deletions,
        summary.modifications
    );

    Comparison {
        differences,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_texts_only_unchanged() {
        let result = compare("a\nb\nc\n", "a\nb\nc\n");
        assert_eq!(result.differences.len(), 3);
        assert!(result
            .differences
            .iter()
            .all(|e| e.kind() == DiffKind::Unchanged));
        assert!(result.summary.is_empty());
    }

    #[test]
    fn test_empty_texts() {
        let result = compare("", "");
        assert!(result.differences.is_empty());
        assert!(result.summary.is_empty());
    }

    #[test]
    fn test_single_line_replacement_merges() {
        let result = compare("line1\nline2\n", "line1\nline3\n");
        assert_eq!(
            result.differences,
            vec![
                DiffEntry::Unchanged {
                    text: "line1\n".into()
                },
                DiffEntry::Modified {
                    old: "line2\n".into(),
                    new: "line3\n".into()
                },
            ]
        );
        assert_eq!(
            result.summary,
            Summary {
                additions: 0,
                deletions: 0,
                modifications: 1
            }
        );
    }

    #[test]
    fn test_pure_addition() {
        let result = compare("x\n", "x\ny\n");
        assert_eq!(
            result.differences,
            vec![
                DiffEntry::Unchanged { text: "x\n".into() },
                DiffEntry::Added { text: "y\n".into() },
            ]
        );
        assert_eq!(result.summary.additions, 1);
        assert_eq!(result.summary.deletions, 0);
        assert_eq!(result.summary.modifications, 0);
    }

    #[test]
    fn test_pure_removal() {
        let result = compare("x\ny\n", "x\n");
        assert_eq!(
            result.differences,
            vec![
                DiffEntry::Unchanged { text: "x\n".into() },
                DiffEntry::Removed { text: "y\n".into() },
            ]
        );
        assert_eq!(result.summary.deletions, 1);
    }

    #[test]
    fn test_removal_not_followed_by_addition_stays_standalone() {
        let result = compare("a\nb\nc\n", "a\nc\n");
        assert_eq!(
            result.differences,
            vec![
                DiffEntry::Unchanged { text: "a\n".into() },
                DiffEntry::Removed { text: "b\n".into() },
                DiffEntry::Unchanged { text: "c\n".into() },
            ]
        );
    }

    /// Documented behavior for delete/insert blocks longer than one line:
    /// the merge is pairwise on the raw change stream, so only the removal
    /// adjacent to the first insertion becomes a modification. The rest of
    /// the block stays standalone. This is intentional, not a block-wise
    /// multi-line replacement.
    #[test]
    fn test_block_replacement_merges_pairwise_only() {
        let result = compare("d1\nd2\n", "i1\ni2\n");
        assert_eq!(
            result.differences,
            vec![
                DiffEntry::Removed { text: "d1\n".into() },
                DiffEntry::Modified {
                    old: "d2\n".into(),
                    new: "i1\n".into()
                },
                DiffEntry::Added { text: "i2\n".into() },
            ]
        );
        assert_eq!(
            result.summary,
            Summary {
                additions: 1,
                deletions: 1,
                modifications: 1
            }
        );
    }

    #[test]
    fn test_order_invariant_reconstructs_both_sides() {
        let old = "a\nb\nc\nd\n";
        let new = "a\nx\nc\ne\nf\n";
        let result = compare(old, new);

        let mut reconstructed_old = String::new();
        let mut reconstructed_new = String::new();
        for entry in &result.differences {
            match entry {
                DiffEntry::Unchanged { text } => {
                    reconstructed_old.push_str(text);
                    reconstructed_new.push_str(text);
                }
                DiffEntry::Removed { text } => reconstructed_old.push_str(text),
                DiffEntry::Added { text } => reconstructed_new.push_str(text),
                DiffEntry::Modified { old, new } => {
                    reconstructed_old.push_str(old);
                    reconstructed_new.push_str(new);
                }
            }
        }
        assert_eq!(reconstructed_old, old);
        assert_eq!(reconstructed_new, new);
    }

    #[test]
    fn test_summary_counts_match_entries() {
        let result = compare("a\nb\nc\n", "b\nc\nd\ne\n");
        let added = result
            .differences
            .iter()
            .filter(|e| e.kind() == DiffKind::Added)
            .count();
        let removed = result
            .differences
            .iter()
            .filter(|e| e.kind() == DiffKind::Removed)
            .count();
        let modified = result
            .differences
            .iter()
            .filter(|e| e.kind() == DiffKind::Modified)
            .count();
        assert_eq!(result.summary.additions, added);
        assert_eq!(result.summary.deletions, removed);
        assert_eq!(result.summary.modifications, modified);
    }

    #[test]
    fn test_missing_trailing_newline_preserved() {
        let result = compare("a\nb", "a\nc");
        assert_eq!(
            result.differences,
            vec![
                DiffEntry::Unchanged { text: "a\n".into() },
                DiffEntry::Modified {
                    old: "b".into(),
                    new: "c".into()
                },
            ]
        );
    }

    #[test]
    fn test_json_shape() {
        let result = compare("x\n", "y\n");
        let json = result.to_json().unwrap();
        assert!(json.contains("\"kind\":\"modified\""));
        assert!(json.contains("\"summary\""));
        assert!(json.contains("\"modifications\":1"));
    }
}
