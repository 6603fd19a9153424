//! Reference validation
//!
//! Checks every cross-entity reference against the model index. Issues come
//! out in document order of the referencing entity, then in reference-list
//! order.

use serde::Serialize;
use std::fmt;

use crate::document::{Collection, Identified, JsafDocument};
use crate::index::{IdIndex, ModelIndex};

/// What a reference field points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ReferenceKind {
    Material,
    CrossSection,
    Node,
    Surface,
}

impl ReferenceKind {
    /// Collection the reference resolves against
    pub fn target(self) -> Collection {
        match self {
            ReferenceKind::Material => Collection::Materials,
            ReferenceKind::CrossSection => Collection::CrossSections,
            ReferenceKind::Node => Collection::PointConnections,
            ReferenceKind::Surface => Collection::SurfaceMembers,
        }
    }

    /// Field semantics, e.g. "node reference"
    pub fn describe(self) -> &'static str {
        match self {
            ReferenceKind::Material => "material reference",
            ReferenceKind::CrossSection => "cross-section reference",
            ReferenceKind::Node => "node reference",
            ReferenceKind::Surface => "surface reference",
        }
    }
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A reference that does not resolve
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceIssue {
    pub message: String,
    /// Name of the referencing entity, or its id if unnamed
    pub source_name: String,
    pub source_id: String,
    pub source_collection: Collection,
    pub kind: ReferenceKind,
    pub dangling_id: String,
}

impl fmt::Display for ReferenceIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

struct Checker<'a> {
    index: &'a ModelIndex,
    issues: Vec<ReferenceIssue>,
}

impl<'a> Checker<'a> {
    fn target(&self, kind: ReferenceKind) -> &'a IdIndex {
        match kind {
            ReferenceKind::Material => &self.index.materials,
            ReferenceKind::CrossSection => &self.index.cross_sections,
            ReferenceKind::Node => &self.index.nodes,
            ReferenceKind::Surface => &self.index.surfaces,
        }
    }

    fn check<T: Identified>(
        &mut self,
        source: &T,
        collection: Collection,
        kind: ReferenceKind,
        id: &str,
    ) {
        if self.target(kind).contains(id) {
            return;
        }
        let source_name = source.label();
        self.issues.push(ReferenceIssue {
            message: format!(
                "{} '{}' references missing {} '{}'",
                collection.entity_noun(),
                source_name,
                kind.target().entity_noun().to_lowercase(),
                id
            ),
            source_name: source_name.to_string(),
            source_id: source.id().to_string(),
            source_collection: collection,
            kind,
            dangling_id: id.to_string(),
        });
    }

    fn check_all<T: Identified>(
        &mut self,
        source: &T,
        collection: Collection,
        kind: ReferenceKind,
        ids: &[String],
    ) {
        for id in ids {
            self.check(source, collection, kind, id);
        }
    }
}

/// Validate every reference of the document against `index`
pub fn validate_references(doc: &JsafDocument, index: &ModelIndex) -> Vec<ReferenceIssue> {
    let mut checker = Checker {
        index,
        issues: Vec::new(),
    };

    for section in doc.cross_sections() {
        checker.check_all(
            section,
            Collection::CrossSections,
            ReferenceKind::Material,
            &section.materials,
        );
    }

    for bar in doc.bars() {
        if !bar.cross_section.is_empty() {
            checker.check(
                bar,
                Collection::CurveMembers,
                ReferenceKind::CrossSection,
                &bar.cross_section,
            );
        }
        checker.check_all(bar, Collection::CurveMembers, ReferenceKind::Node, &bar.nodes);
    }

    for surface in doc.surfaces() {
        checker.check_all(
            surface,
            Collection::SurfaceMembers,
            ReferenceKind::Node,
            &surface.nodes,
        );
    }

    for support in doc.supports() {
        if !support.node.is_empty() {
            checker.check(
                support,
                Collection::PointSupports,
                ReferenceKind::Node,
                &support.node,
            );
        }
    }

    // An opening always needs a host surface, an empty id is dangling too
    for opening in doc.openings() {
        checker.check(
            opening,
            Collection::SurfaceMemberOpenings,
            ReferenceKind::Surface,
            &opening.surface,
        );
    }

    log::debug!("Reference validation found {} issues", checker.issues.len());
    checker.issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validate(value: serde_json::Value) -> Vec<ReferenceIssue> {
        let doc = JsafDocument::from_value(value).unwrap();
        let index = ModelIndex::new(&doc);
        validate_references(&doc, &index)
    }

    #[test]
    fn test_consistent_model_has_no_issues() {
        let issues = validate(json!({
            "Materials": [{ "Id": "M1" }],
            "CrossSections": [{ "Id": "CS1", "Materials": ["M1"] }],
            "PointConnections": [{ "Id": "N1" }, { "Id": "N2" }, { "Id": "N3" }],
            "CurveMembers": [{ "Id": "B1", "CrossSection": "CS1", "Nodes": ["N1", "N2"] }],
            "SurfaceMembers": [{ "Id": "P1", "Nodes": ["N1", "N2", "N3"] }],
            "PointSupports": [{ "Id": "S1", "Node": "N1" }],
            "SurfaceMemberOpenings": [{ "Id": "O1", "Surface": "P1" }]
        }));
        assert!(issues.is_empty());
    }

    #[test]
    fn test_missing_cross_section() {
        let issues = validate(json!({
            "PointConnections": [{ "Id": "N1" }, { "Id": "N2" }],
            "CurveMembers": [{ "Id": "B1", "Name": "B1", "CrossSection": "CS-missing", "Nodes": ["N1", "N2"] }]
        }));
        assert_eq!(issues.len(), 1);
        let issue = &issues[0];
        assert_eq!(issue.source_name, "B1");
        assert_eq!(issue.source_collection, Collection::CurveMembers);
        assert_eq!(issue.kind, ReferenceKind::CrossSection);
        assert_eq!(issue.dangling_id, "CS-missing");
        assert_eq!(
            issue.message,
            "Bar 'B1' references missing cross-section 'CS-missing'"
        );
    }

    #[test]
    fn test_empty_optional_references_are_skipped() {
        let issues = validate(json!({
            "PointConnections": [{ "Id": "N1" }],
            "CurveMembers": [{ "Id": "B1", "CrossSection": "", "Nodes": ["N1"] }],
            "PointSupports": [{ "Id": "S1", "Node": "" }]
        }));
        assert!(issues.is_empty());
    }

    #[test]
    fn test_opening_with_empty_surface_is_reported() {
        let issues = validate(json!({
            "SurfaceMemberOpenings": [{ "Id": "O1", "Name": "Shaft" }]
        }));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, ReferenceKind::Surface);
        assert_eq!(issues[0].dangling_id, "");
        assert_eq!(issues[0].source_name, "Shaft");
    }

    #[test]
    fn test_issue_order_follows_document() {
        let issues = validate(json!({
            "CrossSections": [{ "Id": "CS1", "Materials": ["M9"] }],
            "CurveMembers": [
                { "Id": "B1", "CrossSection": "CS2", "Nodes": ["N1", "N2"] },
                { "Id": "B2", "Nodes": ["N3"] }
            ],
            "SurfaceMembers": [{ "Id": "P1", "Nodes": ["N4"] }],
            "PointSupports": [{ "Id": "S1", "Node": "N5" }]
        }));
        let dangling: Vec<&str> = issues.iter().map(|i| i.dangling_id.as_str()).collect();
        assert_eq!(dangling, vec!["M9", "CS2", "N1", "N2", "N3", "N4", "N5"]);
        assert_eq!(issues[0].source_name, "CS1");
        assert_eq!(issues[6].source_collection, Collection::PointSupports);
    }
}
