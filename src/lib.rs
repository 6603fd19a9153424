//! JSAF Audit - integrity and completeness checks for JSAF structural models
//!
//! This library reads a JSAF (JSON Structural Analysis Format) model export and
//! reports on its consistency, supporting:
//! - Dangling reference detection (materials, cross-sections, nodes, surfaces)
//! - Result completeness classification for 1D and mesh results
//! - Orphaned result detection
//! - Model overviews and per-record result detail
//!
//! Auditing never modifies the document and never fails on inconsistent data:
//! problems are entries of the [`AuditReport`](audit::AuditReport).
//!
//! ## Example
//! ```rust
//! use jsaf_audit::prelude::*;
//!
//! let doc = JsafDocument::from_str(r#"{
//!     "PointConnections": [{ "Id": "N1" }],
//!     "CurveMembers": [{ "Id": "B1", "Name": "Beam", "Nodes": ["N1", "N2"] }]
//! }"#).unwrap();
//!
//! let report = run_audit(&doc, &AuditOptions::default());
//! assert_eq!(report.errors.len(), 1);
//! assert_eq!(report.errors[0].dangling_id, "N2");
//! ```

pub mod audit;
pub mod document;
pub mod error;
pub mod index;
pub mod overview;
pub mod render;

// Re-export common types
pub mod prelude {
    pub use crate::audit::{
        audit, run_audit, AuditOptions, AuditReport, AuditWarning, Auditor, Completeness,
        CompletenessCounts, OwnerFilter, OwnerStatus, OwnerSummary, RecordDetail, ReferenceIssue,
        ReferenceKind, ResultKind, ResultSummary, WarningCategory,
    };
    pub use crate::document::{
        Collection, CrossSection, CurveMember, Identified, JsafDocument, LoadCase,
        LoadCombination, Material, MeshResult, PointConnection, PointSupport, Result1D,
        ResultRecord, SurfaceMember, SurfaceMemberOpening,
    };
    pub use crate::error::{AuditError, AuditResult};
    pub use crate::index::{IdIndex, ModelIndex};
    pub use crate::overview::ModelOverview;
}
