//! Policy-driven ordering of directory listings.
//!
//! Names listed in the effective policy (global entries, then the folder's own entries) are
//! pulled to the front in policy order, whatever their kind. Everything else follows in the
//! usual shape: directories first, then files, each alphabetical.

use std::cmp::Ordering;

use crate::config::Policy;
use crate::file_system::Entry;

// ============================================================================
// Effective policy
// ============================================================================

/// Global and local order lists concatenated. Rank is the first position of a name.
#[derive(Debug, Clone, Default)]
pub struct EffectivePolicy<'a> {
    names: Vec<&'a str>,
}

impl<'a> EffectivePolicy<'a> {
    /// Global ranks come first (0..g), local ranks follow (g..g+l).
    pub fn new(global: Option<&'a Policy>, local: Option<&'a Policy>) -> Self {
        let names = global
            .into_iter()
            .chain(local)
            .flat_map(|policy| policy.entries().iter().map(|entry| entry.name()))
            .collect();
        Self { names }
    }

    pub fn rank_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|candidate| *candidate == name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

// ============================================================================
// Name collation
// ============================================================================

/// Compares names the way a case-sensitive locale collation does.
///
/// Letters compare case-insensitively first, so `"B"` sorts between `"a"` and `"c"`. Names that
/// differ only in case put lowercase first (`"a" < "A"`), and anything still tied falls back to
/// code point order.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    if folded != Ordering::Equal {
        return folded;
    }

    for (ca, cb) in a.chars().zip(b.chars()) {
        if ca != cb {
            return match (ca.is_lowercase(), cb.is_lowercase()) {
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                _ => ca.cmp(&cb),
            };
        }
    }
    a.cmp(b)
}

/// Directories before files, then by name.
fn compare_baseline(a: &Entry, b: &Entry) -> Ordering {
    match (a.is_directory(), b.is_directory()) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => compare_names(&a.name, &b.name),
    }
}

// ============================================================================
// Ordering
// ============================================================================

/// Orders one directory's entries by the merged global and local policy.
///
/// Deterministic: the same input always produces the same output, regardless of the order the
/// file system returned the entries in (names within a directory are unique).
pub fn order_entries(entries: Vec<Entry>, local: Option<&Policy>, global: Option<&Policy>) -> Vec<Entry> {
    let effective = EffectivePolicy::new(global, local);

    // Directories then files, each in read order: the tie-break order for equal ranks
    let (directories, files): (Vec<Entry>, Vec<Entry>) = entries.into_iter().partition(Entry::is_directory);
    let concatenated = directories.into_iter().chain(files);

    if effective.is_empty() {
        let mut baseline: Vec<Entry> = concatenated.collect();
        baseline.sort_by(compare_baseline);
        return baseline;
    }

    let mut matched: Vec<(usize, Entry)> = Vec::new();
    let mut unmatched: Vec<Entry> = Vec::new();
    for entry in concatenated {
        match effective.rank_of(&entry.name) {
            Some(rank) => matched.push((rank, entry)),
            None => unmatched.push(entry),
        }
    }

    // Stable sort keeps concatenation order between equal ranks
    matched.sort_by_key(|(rank, _)| *rank);
    unmatched.sort_by(compare_baseline);

    log::trace!(
        "order_entries: policy={} names, matched={}, unmatched={}",
        effective.len(),
        matched.len(),
        unmatched.len()
    );

    matched
        .into_iter()
        .map(|(_, entry)| entry)
        .chain(unmatched)
        .collect()
}
