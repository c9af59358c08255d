//! Duplicate detection by content digest

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use super::catalog::Catalog;

/// Files sharing one digest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateGroup {
    pub digest: String,
    /// Path of the first catalog record with this digest
    pub representative: PathBuf,
    /// Number of records with this digest, always at least 2
    pub count: usize,
}

/// Count how many records carry each digest
pub fn count_digests(catalog: &Catalog) -> HashMap<&str, usize> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in catalog {
        *counts.entry(record.digest.as_str()).or_insert(0) += 1;
    }
    counts
}

/// Find digests shared by two or more records
///
/// The representative of each group is the earliest record in catalog order.
/// Groups are returned in the order their representatives appear in the
/// catalog, so output is stable for a given tree.
///
/// # Arguments
/// * `catalog` - Completed catalog
///
/// # Returns
/// One group per duplicated digest; empty if every digest is unique
pub fn find_duplicates(catalog: &Catalog) -> Vec<DuplicateGroup> {
    let counts = count_digests(catalog);
    let mut seen: HashSet<&str> = HashSet::new();

    catalog
        .iter()
        .filter_map(|record| {
            let digest = record.digest.as_str();
            let count = counts.get(digest).copied().unwrap_or(0);
            if count > 1 && seen.insert(digest) {
                Some(DuplicateGroup {
                    digest: record.digest.clone(),
                    representative: record.path.clone(),
                    count,
                })
            } else {
                None
            }
        })
        .collect()
}

/// Number of files that could be removed while keeping one copy per group
pub fn redundant_count(groups: &[DuplicateGroup]) -> usize {
    groups.iter().map(|g| g.count - 1).sum()
}
