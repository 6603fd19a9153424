//! Audit engine
//!
//! Runs reference validation, result classification and orphan detection over
//! one document and merges their output into an [`AuditReport`]. Every pass is
//! a pure function of the document and the [`ModelIndex`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::document::{Collection, JsafDocument, ResultRecord};
use crate::error::{AuditError, AuditResult};
use crate::index::{ModelIndex, DEFAULT_DISPLAY_ID_LEN};

pub mod completeness;
pub mod orphans;
pub mod references;
pub mod report;

pub use completeness::{
    Completeness, CompletenessCounts, OwnerFilter, OwnerRow, OwnerStatus, OwnerSummary,
    RecordDetail, ResultIndex, ResultSummary, DEFAULT_TOLERANCE,
};
pub use orphans::OrphanReport;
pub use references::{ReferenceIssue, ReferenceKind};
pub use report::{AuditReport, AuditWarning, CollectionAudit, WarningCategory};

/// Options for auditing a document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditOptions {
    /// Magnitude a value must exceed to count as non-zero
    pub tolerance: f64,
    /// Characters of an unnamed record's id shown in place of its name
    pub display_id_len: usize,
    /// Warn about collections present with no records
    pub check_empty_collections: bool,
}

impl Default for AuditOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            display_id_len: DEFAULT_DISPLAY_ID_LEN,
            check_empty_collections: true,
        }
    }
}

impl AuditOptions {
    /// Set the non-zero tolerance
    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }

    /// Set the number of id characters shown for unnamed records
    pub fn with_display_id_len(mut self, len: usize) -> Self {
        self.display_id_len = len;
        self
    }

    /// Skip the empty collection check
    pub fn without_empty_collection_check(mut self) -> Self {
        self.check_empty_collections = false;
        self
    }
}

/// Result collection selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    /// `Results1D`, owned by bars
    #[serde(rename = "1d")]
    OneD,
    /// `MeshResults`, owned by surfaces
    Mesh,
}

impl ResultKind {
    pub fn collection(self) -> Collection {
        match self {
            ResultKind::OneD => Collection::Results1D,
            ResultKind::Mesh => Collection::MeshResults,
        }
    }
}

impl FromStr for ResultKind {
    type Err = AuditError;

    fn from_str(s: &str) -> AuditResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "1d" | "results1d" | "bar" | "bars" => Ok(ResultKind::OneD),
            "mesh" | "meshresults" | "2d" | "surface" | "surfaces" => Ok(ResultKind::Mesh),
            _ => Err(AuditError::UnknownResultKind(s.to_string())),
        }
    }
}

impl fmt::Display for ResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultKind::OneD => f.write_str("1d"),
            ResultKind::Mesh => f.write_str("mesh"),
        }
    }
}

/// A load id present in a result collection with its display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadOption {
    pub id: String,
    pub name: String,
}

/// Audits one document
///
/// Holds the index so that report, owner and record queries share one build.
#[derive(Debug)]
pub struct Auditor<'a> {
    doc: &'a JsafDocument,
    index: ModelIndex,
    options: AuditOptions,
}

impl<'a> Auditor<'a> {
    pub fn new(doc: &'a JsafDocument, options: AuditOptions) -> Self {
        let index = ModelIndex::build(doc, options.display_id_len);
        Self {
            doc,
            index,
            options,
        }
    }

    pub fn document(&self) -> &'a JsafDocument {
        self.doc
    }

    pub fn index(&self) -> &ModelIndex {
        &self.index
    }

    pub fn options(&self) -> &AuditOptions {
        &self.options
    }

    /// Run every pass and assemble the report
    pub fn run(&self) -> AuditReport {
        let tolerance = self.options.tolerance;
        let errors = references::validate_references(self.doc, &self.index);
        let results_1d = CollectionAudit::new(self.doc.results_1d(), &self.index.bars, tolerance);
        let mesh_results =
            CollectionAudit::new(self.doc.mesh_results(), &self.index.surfaces, tolerance);
        let empty_collections = if self.options.check_empty_collections {
            self.doc.declared_empty_collections()
        } else {
            Vec::new()
        };

        AuditReport::assemble(
            self.doc.name.clone(),
            errors,
            results_1d,
            mesh_results,
            empty_collections,
        )
    }

    /// Classify one result collection
    pub fn summarize(&self, kind: ResultKind) -> ResultSummary {
        match kind {
            ResultKind::OneD => ResultSummary::classify(self.doc.results_1d(), self.tolerance()),
            ResultKind::Mesh => ResultSummary::classify(self.doc.mesh_results(), self.tolerance()),
        }
    }

    fn tolerance(&self) -> f64 {
        self.options.tolerance
    }

    /// Detail of the record for (owner, load)
    ///
    /// Repeated pairs resolve to the record that appears last.
    pub fn record_detail(
        &self,
        kind: ResultKind,
        owner_id: &str,
        load_id: &str,
    ) -> AuditResult<RecordDetail> {
        let detail = match kind {
            ResultKind::OneD => self.detail_in(self.doc.results_1d(), owner_id, load_id),
            ResultKind::Mesh => self.detail_in(self.doc.mesh_results(), owner_id, load_id),
        };
        detail.ok_or_else(|| AuditError::ResultNotFound {
            owner: owner_id.to_string(),
            load: load_id.to_string(),
        })
    }

    fn detail_in<R: ResultRecord>(
        &self,
        records: &[R],
        owner_id: &str,
        load_id: &str,
    ) -> Option<RecordDetail> {
        ResultIndex::build(records)
            .get(owner_id, load_id)
            .map(|record| RecordDetail::from_record(record, self.options.tolerance))
    }

    /// Distinct load ids of a result collection, sorted, with display names
    pub fn loads(&self, kind: ResultKind) -> Vec<LoadOption> {
        let ids = match kind {
            ResultKind::OneD => ResultIndex::build(self.doc.results_1d()).load_ids(),
            ResultKind::Mesh => ResultIndex::build(self.doc.mesh_results()).load_ids(),
        };
        ids.into_iter()
            .map(|id| LoadOption {
                id: id.to_string(),
                name: self.index.load_display_name(id).to_string(),
            })
            .collect()
    }

    /// Display name of a result owner
    pub fn owner_name<'b>(&'b self, kind: ResultKind, owner_id: &'b str) -> &'b str {
        match kind {
            ResultKind::OneD => self.index.bars.display_name(owner_id),
            ResultKind::Mesh => self.index.surfaces.display_name(owner_id),
        }
    }
}

/// Audit a document with default options
pub fn audit(doc: &JsafDocument) -> AuditReport {
    run_audit(doc, &AuditOptions::default())
}

/// Audit a document
pub fn run_audit(doc: &JsafDocument, options: &AuditOptions) -> AuditReport {
    Auditor::new(doc, options.clone()).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> JsafDocument {
        JsafDocument::from_value(json!({
            "Name": "Frame",
            "PointConnections": [{ "Id": "N1" }, { "Id": "N2" }],
            "CurveMembers": [{ "Id": "1", "Name": "Beam 1", "Nodes": ["N1", "N2"] }],
            "LoadCases": [{ "Id": "LC1", "Name": "Dead" }],
            "Results1D": [
                { "Member": "1", "Load": "LC1", "SectionsAt": [0.0, 1.0], "aMy": [0.0, 12.0] },
                { "Member": "1", "Load": "LC2" }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_default_options() {
        let options = AuditOptions::default();
        assert_eq!(options.tolerance, 1e-6);
        assert_eq!(options.display_id_len, 8);
        assert!(options.check_empty_collections);

        let options = AuditOptions::default()
            .with_tolerance(1e-3)
            .with_display_id_len(4)
            .without_empty_collection_check();
        assert_eq!(options.tolerance, 1e-3);
        assert_eq!(options.display_id_len, 4);
        assert!(!options.check_empty_collections);
    }

    #[test]
    fn test_options_from_partial_json() {
        let options: AuditOptions = serde_json::from_str(r#"{ "tolerance": 0.01 }"#).unwrap();
        assert_eq!(options.tolerance, 0.01);
        assert_eq!(options.display_id_len, 8);
    }

    #[test]
    fn test_result_kind_parsing() {
        assert_eq!("1d".parse::<ResultKind>().unwrap(), ResultKind::OneD);
        assert_eq!("Mesh".parse::<ResultKind>().unwrap(), ResultKind::Mesh);
        assert!(matches!(
            "3d".parse::<ResultKind>(),
            Err(AuditError::UnknownResultKind(_))
        ));
    }

    #[test]
    fn test_run_reports_empty_record() {
        let doc = sample();
        let report = audit(&doc);
        assert!(report.errors.is_empty());
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].message, "Results1D: 1/2 records empty");
        assert_eq!(report.model_name, "Frame");
    }

    #[test]
    fn test_record_detail_lookup() {
        let doc = sample();
        let auditor = Auditor::new(&doc, AuditOptions::default());
        let detail = auditor.record_detail(ResultKind::OneD, "1", "LC1").unwrap();
        assert_eq!(detail.completeness, Completeness::Partial);
        assert_eq!(detail.positions, vec![0.0, 1.0]);

        let err = auditor
            .record_detail(ResultKind::Mesh, "1", "LC1")
            .unwrap_err();
        assert!(matches!(err, AuditError::ResultNotFound { .. }));
    }

    #[test]
    fn test_loads_with_display_names() {
        let doc = sample();
        let auditor = Auditor::new(&doc, AuditOptions::default());
        let loads = auditor.loads(ResultKind::OneD);
        assert_eq!(
            loads,
            vec![
                LoadOption {
                    id: "LC1".into(),
                    name: "Dead".into()
                },
                LoadOption {
                    id: "LC2".into(),
                    name: "LC2".into()
                },
            ]
        );
        assert_eq!(auditor.owner_name(ResultKind::OneD, "1"), "Beam 1");
    }
}
