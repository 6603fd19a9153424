//! Orphan detection - result owners with no matching geometry

use serde::Serialize;
use std::collections::BTreeSet;

use crate::document::{Collection, ResultRecord};
use crate::index::IdIndex;

/// Distinct owner ids of a result collection missing from geometry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrphanReport {
    pub collection: Collection,
    pub owners: BTreeSet<String>,
}

impl OrphanReport {
    /// Number of distinct orphaned owners
    pub fn count(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    pub fn contains(&self, owner_id: &str) -> bool {
        self.owners.contains(owner_id)
    }
}

/// Collect result owners that `geometry` does not contain
pub fn find_orphans<R: ResultRecord>(records: &[R], geometry: &IdIndex) -> OrphanReport {
    let owners: BTreeSet<String> = records
        .iter()
        .map(ResultRecord::owner_id)
        .filter(|owner| !geometry.contains(owner))
        .map(str::to_string)
        .collect();
    if !owners.is_empty() {
        log::debug!("{}: {} orphaned owners", R::COLLECTION, owners.len());
    }
    OrphanReport {
        collection: R::COLLECTION,
        owners,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{CurveMember, Result1D};

    fn bars(ids: &[&str]) -> IdIndex {
        let records: Vec<CurveMember> = ids
            .iter()
            .map(|id| CurveMember {
                id: id.to_string(),
                ..Default::default()
            })
            .collect();
        IdIndex::from_records(&records, 8)
    }

    fn result(member: &str, load: &str) -> Result1D {
        Result1D {
            member: member.to_string(),
            load: load.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_orphans_are_distinct() {
        let records = vec![
            result("B1", "L1"),
            result("B9", "L1"),
            result("B9", "L2"),
            result("B7", "L1"),
        ];
        let report = find_orphans(&records, &bars(&["B1", "B2"]));
        assert_eq!(report.count(), 2);
        assert!(report.contains("B9"));
        assert!(report.contains("B7"));
        assert!(!report.contains("B1"));
        assert_eq!(report.collection, Collection::Results1D);
    }

    #[test]
    fn test_no_results_no_orphans() {
        let report = find_orphans::<Result1D>(&[], &bars(&[]));
        assert!(report.is_empty());
    }

    #[test]
    fn test_every_owner_orphaned_without_geometry() {
        let records = vec![result("B1", "L1"), result("B2", "L1")];
        let report = find_orphans(&records, &bars(&[]));
        assert_eq!(report.count(), 2);
    }
}
