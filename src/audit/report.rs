//! Audit report - errors, warnings and per-collection result summaries

use serde::Serialize;
use std::fmt;

use super::completeness::{CompletenessCounts, ResultSummary};
use super::orphans::{find_orphans, OrphanReport};
use super::references::ReferenceIssue;
use crate::document::{Collection, ResultRecord};
use crate::index::IdIndex;

/// Kind of completeness concern a warning reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum WarningCategory {
    /// Result records whose owner is not in the geometry
    OrphanResults,
    /// Result records with no non-zero component
    EmptyResults,
    /// Collections present in the document with no records
    EmptyCollections,
}

impl WarningCategory {
    pub fn label(self) -> &'static str {
        match self {
            WarningCategory::OrphanResults => "orphan results",
            WarningCategory::EmptyResults => "empty results",
            WarningCategory::EmptyCollections => "empty collections",
        }
    }
}

/// A completeness or coverage concern
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditWarning {
    pub message: String,
    pub category: WarningCategory,
    /// Result collection concerned, `None` for empty collections
    pub collection: Option<Collection>,
}

impl fmt::Display for AuditWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Classifier and orphan output for one result collection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionAudit {
    pub summary: ResultSummary,
    pub orphans: OrphanReport,
}

impl CollectionAudit {
    /// Classify `records` and find owners missing from `geometry`
    pub fn new<R: ResultRecord>(records: &[R], geometry: &IdIndex, tolerance: f64) -> Self {
        Self {
            summary: ResultSummary::classify(records, tolerance),
            orphans: find_orphans(records, geometry),
        }
    }

    pub fn collection(&self) -> Collection {
        self.summary.collection
    }

    pub fn counts(&self) -> &CompletenessCounts {
        &self.summary.counts
    }

    fn owner_noun(&self) -> &'static str {
        match self.collection() {
            Collection::MeshResults => "surfaces",
            _ => "bars",
        }
    }
}

/// Result of auditing one document
///
/// Errors are dangling references. Warnings are ordered: orphans for 1D then
/// mesh results, empty records for 1D then mesh results, then empty
/// collections. The report is a plain value, auditing the same document twice
/// yields equal reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditReport {
    pub model_name: String,
    pub errors: Vec<ReferenceIssue>,
    pub warnings: Vec<AuditWarning>,
    pub results_1d: CollectionAudit,
    pub mesh_results: CollectionAudit,
    /// Keys of the collections present with no records
    pub empty_collections: Vec<String>,
}

impl AuditReport {
    /// Merge the pass outputs into errors and ordered warnings
    pub fn assemble(
        model_name: String,
        errors: Vec<ReferenceIssue>,
        results_1d: CollectionAudit,
        mesh_results: CollectionAudit,
        empty_collections: Vec<String>,
    ) -> Self {
        let mut warnings = Vec::new();

        for audit in [&results_1d, &mesh_results] {
            if !audit.orphans.is_empty() {
                warnings.push(AuditWarning {
                    message: format!(
                        "{}: {} orphaned {}",
                        audit.collection(),
                        audit.orphans.count(),
                        audit.owner_noun()
                    ),
                    category: WarningCategory::OrphanResults,
                    collection: Some(audit.collection()),
                });
            }
        }

        for audit in [&results_1d, &mesh_results] {
            let counts = audit.counts();
            if counts.empty > 0 {
                warnings.push(AuditWarning {
                    message: format!(
                        "{}: {}/{} records empty",
                        audit.collection(),
                        counts.empty,
                        counts.total
                    ),
                    category: WarningCategory::EmptyResults,
                    collection: Some(audit.collection()),
                });
            }
        }

        if !empty_collections.is_empty() {
            warnings.push(AuditWarning {
                message: format!("Empty collections: {}", empty_collections.join(", ")),
                category: WarningCategory::EmptyCollections,
                collection: None,
            });
        }

        let report = Self {
            model_name,
            errors,
            warnings,
            results_1d,
            mesh_results,
            empty_collections,
        };
        report.log_summary();
        report
    }

    /// No errors and no warnings
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Warnings of one category, in report order
    pub fn warnings_of(&self, category: WarningCategory) -> impl Iterator<Item = &AuditWarning> {
        self.warnings.iter().filter(move |w| w.category == category)
    }

    fn log_summary(&self) {
        if self.is_clean() {
            log::info!("Audit of '{}': no problems found", self.model_name);
            return;
        }
        log::info!(
            "Audit of '{}': {} errors, {} warnings",
            self.model_name,
            self.errors.len(),
            self.warnings.len()
        );
        for warning in &self.warnings {
            log::warn!("{}", warning.message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::references::ReferenceKind;
    use crate::document::{CurveMember, MeshResult, Result1D};

    fn bar_index(ids: &[&str]) -> IdIndex {
        let bars: Vec<CurveMember> = ids
            .iter()
            .map(|id| CurveMember {
                id: id.to_string(),
                ..Default::default()
            })
            .collect();
        IdIndex::from_records(&bars, 8)
    }

    fn empty_mesh() -> CollectionAudit {
        CollectionAudit::new::<MeshResult>(&[], &IdIndex::default(), 1e-6)
    }

    #[test]
    fn test_clean_report() {
        let records = vec![Result1D {
            member: "B1".into(),
            load: "L1".into(),
            n: vec![1.0],
            ..Default::default()
        }];
        let results_1d = CollectionAudit::new(&records, &bar_index(&["B1"]), 1e-6);
        let report =
            AuditReport::assemble("M".into(), Vec::new(), results_1d, empty_mesh(), Vec::new());
        assert!(report.is_clean());
        assert_eq!(report.results_1d.counts().partial, 1);
    }

    #[test]
    fn test_warning_order() {
        let records = vec![
            Result1D {
                member: "B9".into(),
                load: "L1".into(),
                ..Default::default()
            },
            Result1D {
                member: "B1".into(),
                load: "L1".into(),
                n: vec![2.0],
                ..Default::default()
            },
        ];
        let results_1d = CollectionAudit::new(&records, &bar_index(&["B1"]), 1e-6);
        let report = AuditReport::assemble(
            "M".into(),
            Vec::new(),
            results_1d,
            empty_mesh(),
            vec!["Materials".into(), "MeshResults".into()],
        );

        let messages: Vec<&str> = report.warnings.iter().map(|w| w.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Results1D: 1 orphaned bars",
                "Results1D: 1/2 records empty",
                "Empty collections: Materials, MeshResults",
            ]
        );
        assert_eq!(report.warnings_of(WarningCategory::EmptyResults).count(), 1);
        assert!(!report.is_clean());
    }

    #[test]
    fn test_errors_alone_make_report_unclean() {
        let issue = ReferenceIssue {
            message: "Bar 'B1' references missing node 'N9'".into(),
            source_name: "B1".into(),
            source_id: "B1".into(),
            source_collection: Collection::CurveMembers,
            kind: ReferenceKind::Node,
            dangling_id: "N9".into(),
        };
        let results_1d = CollectionAudit::new::<Result1D>(&[], &IdIndex::default(), 1e-6);
        let report =
            AuditReport::assemble("M".into(), vec![issue], results_1d, empty_mesh(), Vec::new());
        assert!(report.warnings.is_empty());
        assert_eq!(report.error_count(), 1);
        assert!(!report.is_clean());
    }
}
