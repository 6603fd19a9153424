//! JSAF document decoding
//!
//! Every field has a default at this boundary: missing strings are empty,
//! missing numbers are 0 and missing lists are empty. A `null` is read the
//! same way as a missing field. A collection that is
//! absent from the document is kept distinct from one that is present but
//! empty, since only the latter is reported.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use crate::error::{AuditError, AuditResult};

/// Identifier and display name shared by every keyed record
pub trait Identified {
    /// Record id, unique within its collection
    fn id(&self) -> &str;

    /// Record name, empty when absent
    fn name(&self) -> &str;

    /// Name, or the id when the record has no name
    fn label(&self) -> &str {
        if self.name().is_empty() {
            self.id()
        } else {
            self.name()
        }
    }
}

/// Read a `null` field as the type's default
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Read a `null` list as empty and `null` elements as their default
pub(crate) fn null_as_empty_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    let items = Option::<Vec<Option<T>>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(items.into_iter().map(Option::unwrap_or_default).collect())
}

macro_rules! identified {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Identified for $ty {
                fn id(&self) -> &str {
                    &self.id
                }

                fn name(&self) -> &str {
                    &self.name
                }
            }
        )+
    };
}

pub mod codes;
mod geometry;
mod loads;
mod results;

pub use geometry::{
    CrossSection, CurveMember, Material, PointConnection, PointSupport, SurfaceMember,
    SurfaceMemberOpening,
};
pub use loads::{
    CombinationEntry, CurveAction, LoadCase, LoadCombination, PointAction, SurfaceAction,
};
pub use results::{MeshResult, Result1D, ResultRecord, COMPONENTS_1D, COMPONENTS_MESH};

/// Top-level collections of a JSAF document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Collection {
    Materials,
    CrossSections,
    PointConnections,
    CurveMembers,
    SurfaceMembers,
    SurfaceMemberOpenings,
    PointSupports,
    LoadCases,
    LoadCombinations,
    PointActions,
    CurveActions,
    SurfaceActions,
    Results1D,
    MeshResults,
}

/// Grouping of collections for overviews
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollectionGroup {
    Geometry,
    Loads,
    Results,
}

impl Collection {
    /// All collections in declaration order
    pub const ALL: [Collection; 14] = [
        Collection::Materials,
        Collection::CrossSections,
        Collection::PointConnections,
        Collection::CurveMembers,
        Collection::SurfaceMembers,
        Collection::SurfaceMemberOpenings,
        Collection::PointSupports,
        Collection::LoadCases,
        Collection::LoadCombinations,
        Collection::PointActions,
        Collection::CurveActions,
        Collection::SurfaceActions,
        Collection::Results1D,
        Collection::MeshResults,
    ];

    /// Key of the collection in the JSON document
    pub fn key(self) -> &'static str {
        match self {
            Collection::Materials => "Materials",
            Collection::CrossSections => "CrossSections",
            Collection::PointConnections => "PointConnections",
            Collection::CurveMembers => "CurveMembers",
            Collection::SurfaceMembers => "SurfaceMembers",
            Collection::SurfaceMemberOpenings => "SurfaceMemberOpenings",
            Collection::PointSupports => "PointSupports",
            Collection::LoadCases => "LoadCases",
            Collection::LoadCombinations => "LoadCombinations",
            Collection::PointActions => "PointActions",
            Collection::CurveActions => "CurveActions",
            Collection::SurfaceActions => "SurfaceActions",
            Collection::Results1D => "Results1D",
            Collection::MeshResults => "MeshResults",
        }
    }

    /// Singular noun for one record of the collection
    pub fn entity_noun(self) -> &'static str {
        match self {
            Collection::Materials => "Material",
            Collection::CrossSections => "Cross-section",
            Collection::PointConnections => "Node",
            Collection::CurveMembers => "Bar",
            Collection::SurfaceMembers => "Surface",
            Collection::SurfaceMemberOpenings => "Opening",
            Collection::PointSupports => "Support",
            Collection::LoadCases => "Load case",
            Collection::LoadCombinations => "Load combination",
            Collection::PointActions => "Point action",
            Collection::CurveActions => "Curve action",
            Collection::SurfaceActions => "Surface action",
            Collection::Results1D => "1D result",
            Collection::MeshResults => "Mesh result",
        }
    }

    pub fn group(self) -> CollectionGroup {
        match self {
            Collection::Materials
            | Collection::CrossSections
            | Collection::PointConnections
            | Collection::CurveMembers
            | Collection::SurfaceMembers
            | Collection::SurfaceMemberOpenings
            | Collection::PointSupports => CollectionGroup::Geometry,
            Collection::LoadCases
            | Collection::LoadCombinations
            | Collection::PointActions
            | Collection::CurveActions
            | Collection::SurfaceActions => CollectionGroup::Loads,
            Collection::Results1D | Collection::MeshResults => CollectionGroup::Results,
        }
    }
}

impl FromStr for Collection {
    type Err = AuditError;

    /// Parse a collection key, ignoring case
    fn from_str(s: &str) -> AuditResult<Self> {
        Collection::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| AuditError::UnknownCollection(s.to_string()))
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A JSAF structural model document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JsafDocument {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub materials: Option<Vec<Material>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cross_sections: Option<Vec<CrossSection>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point_connections: Option<Vec<PointConnection>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curve_members: Option<Vec<CurveMember>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface_members: Option<Vec<SurfaceMember>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface_member_openings: Option<Vec<SurfaceMemberOpening>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point_supports: Option<Vec<PointSupport>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_cases: Option<Vec<LoadCase>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_combinations: Option<Vec<LoadCombination>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point_actions: Option<Vec<PointAction>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curve_actions: Option<Vec<CurveAction>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface_actions: Option<Vec<SurfaceAction>>,

    #[serde(default, rename = "Results1D", skip_serializing_if = "Option::is_none")]
    pub results_1d: Option<Vec<Result1D>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mesh_results: Option<Vec<MeshResult>>,

    /// Top-level fields outside the known schema (e.g. `Macros`)
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl JsafDocument {
    // ========================
    // Loading
    // ========================

    /// Parse a document from JSON text
    pub fn from_str(json: &str) -> AuditResult<Self> {
        Self::from_value(serde_json::from_str(json)?)
    }

    /// Parse a document from a reader
    pub fn from_reader<R: Read>(reader: R) -> AuditResult<Self> {
        Self::from_value(serde_json::from_reader(reader)?)
    }

    /// Parse a document from a file
    pub fn from_path<P: AsRef<Path>>(path: P) -> AuditResult<Self> {
        let file = File::open(path.as_ref())?;
        log::debug!("Loading JSAF document from {}", path.as_ref().display());
        Self::from_reader(BufReader::new(file))
    }

    /// Decode an already parsed JSON value
    pub fn from_value(value: Value) -> AuditResult<Self> {
        if !value.is_object() {
            return Err(AuditError::InvalidDocument(format!(
                "top level must be an object, found {}",
                json_type_name(&value)
            )));
        }
        Ok(serde_json::from_value(value)?)
    }

    // ========================
    // Collection Access
    // ========================

    pub fn materials(&self) -> &[Material] {
        self.materials.as_deref().unwrap_or_default()
    }

    pub fn cross_sections(&self) -> &[CrossSection] {
        self.cross_sections.as_deref().unwrap_or_default()
    }

    pub fn nodes(&self) -> &[PointConnection] {
        self.point_connections.as_deref().unwrap_or_default()
    }

    pub fn bars(&self) -> &[CurveMember] {
        self.curve_members.as_deref().unwrap_or_default()
    }

    pub fn surfaces(&self) -> &[SurfaceMember] {
        self.surface_members.as_deref().unwrap_or_default()
    }

    pub fn openings(&self) -> &[SurfaceMemberOpening] {
        self.surface_member_openings.as_deref().unwrap_or_default()
    }

    pub fn supports(&self) -> &[PointSupport] {
        self.point_supports.as_deref().unwrap_or_default()
    }

    pub fn load_cases(&self) -> &[LoadCase] {
        self.load_cases.as_deref().unwrap_or_default()
    }

    pub fn load_combinations(&self) -> &[LoadCombination] {
        self.load_combinations.as_deref().unwrap_or_default()
    }

    pub fn point_actions(&self) -> &[PointAction] {
        self.point_actions.as_deref().unwrap_or_default()
    }

    pub fn curve_actions(&self) -> &[CurveAction] {
        self.curve_actions.as_deref().unwrap_or_default()
    }

    pub fn surface_actions(&self) -> &[SurfaceAction] {
        self.surface_actions.as_deref().unwrap_or_default()
    }

    pub fn results_1d(&self) -> &[Result1D] {
        self.results_1d.as_deref().unwrap_or_default()
    }

    pub fn mesh_results(&self) -> &[MeshResult] {
        self.mesh_results.as_deref().unwrap_or_default()
    }

    /// Number of records in a collection, `None` when the document omits it
    pub fn collection_len(&self, collection: Collection) -> Option<usize> {
        match collection {
            Collection::Materials => self.materials.as_ref().map(Vec::len),
            Collection::CrossSections => self.cross_sections.as_ref().map(Vec::len),
            Collection::PointConnections => self.point_connections.as_ref().map(Vec::len),
            Collection::CurveMembers => self.curve_members.as_ref().map(Vec::len),
            Collection::SurfaceMembers => self.surface_members.as_ref().map(Vec::len),
            Collection::SurfaceMemberOpenings => {
                self.surface_member_openings.as_ref().map(Vec::len)
            }
            Collection::PointSupports => self.point_supports.as_ref().map(Vec::len),
            Collection::LoadCases => self.load_cases.as_ref().map(Vec::len),
            Collection::LoadCombinations => self.load_combinations.as_ref().map(Vec::len),
            Collection::PointActions => self.point_actions.as_ref().map(Vec::len),
            Collection::CurveActions => self.curve_actions.as_ref().map(Vec::len),
            Collection::SurfaceActions => self.surface_actions.as_ref().map(Vec::len),
            Collection::Results1D => self.results_1d.as_ref().map(Vec::len),
            Collection::MeshResults => self.mesh_results.as_ref().map(Vec::len),
        }
    }

    /// Length of an unknown top-level list, `None` if absent or not a list
    pub fn extra_list_len(&self, key: &str) -> Option<usize> {
        self.extra.get(key).and_then(Value::as_array).map(Vec::len)
    }

    /// Keys of every list present in the document with no records
    ///
    /// Known collections come first in [`Collection::ALL`] order, followed by
    /// unknown top-level lists in key order.
    pub fn declared_empty_collections(&self) -> Vec<String> {
        let known = Collection::ALL
            .iter()
            .filter(|c| self.collection_len(**c) == Some(0))
            .map(|c| c.key().to_string());
        let unknown = self
            .extra
            .iter()
            .filter(|(_, value)| value.as_array().is_some_and(Vec::is_empty))
            .map(|(key, _)| key.clone());
        known.chain(unknown).collect()
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_collections_are_empty() {
        let doc = JsafDocument::from_str(r#"{"Name": "Empty model"}"#).unwrap();
        assert_eq!(doc.name, "Empty model");
        assert!(doc.bars().is_empty());
        assert!(doc.results_1d().is_empty());
        assert_eq!(doc.collection_len(Collection::CurveMembers), None);
        assert!(doc.declared_empty_collections().is_empty());
    }

    #[test]
    fn test_declared_empty_collections() {
        let doc = JsafDocument::from_value(json!({
            "Materials": [],
            "CurveMembers": [{ "Id": "B1" }],
            "MeshResults": [],
            "Macros": [],
            "Tags": ["x"]
        }))
        .unwrap();
        assert_eq!(
            doc.declared_empty_collections(),
            vec!["Materials", "MeshResults", "Macros"]
        );
        assert_eq!(doc.extra_list_len("Tags"), Some(1));
    }

    #[test]
    fn test_results_key_spelling() {
        let doc = JsafDocument::from_value(json!({
            "Results1D": [{ "Member": "B1", "Load": "LC1" }]
        }))
        .unwrap();
        assert_eq!(doc.results_1d().len(), 1);
        assert!(doc.extra.is_empty());
    }

    #[test]
    fn test_null_fields_read_as_empty() {
        let doc = JsafDocument::from_value(json!({
            "Name": null,
            "Description": null,
            "Materials": null,
            "CurveMembers": [{ "Id": "B1", "Name": null, "Type": null, "CrossSection": null, "Nodes": null }],
            "PointSupports": [{ "Id": "S1", "Name": null, "Node": "N1", "Ux": null }],
            "Results1D": [{ "Member": "B1", "Load": "LC1", "aN": [1.0, null], "aVz": null }]
        }))
        .unwrap();
        assert!(doc.name.is_empty());
        assert!(doc.description.is_empty());
        assert_eq!(doc.collection_len(Collection::Materials), None);

        let bar = &doc.bars()[0];
        assert_eq!(bar.label(), "B1");
        assert!(bar.cross_section.is_empty());
        assert!(bar.nodes.is_empty());
        assert_eq!(bar.curve_type, 0);
        assert_eq!(doc.supports()[0].label(), "S1");
        assert_eq!(doc.results_1d()[0].n, vec![1.0, 0.0]);
        assert!(doc.results_1d()[0].vz.is_empty());
    }

    #[test]
    fn test_collection_keys_parse() {
        assert_eq!("CurveMembers".parse::<Collection>().unwrap(), Collection::CurveMembers);
        assert_eq!("results1d".parse::<Collection>().unwrap(), Collection::Results1D);
        assert!(matches!(
            "Macros".parse::<Collection>(),
            Err(AuditError::UnknownCollection(_))
        ));
    }

    #[test]
    fn test_non_object_document_is_rejected() {
        let err = JsafDocument::from_str("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, AuditError::InvalidDocument(_)));

        let err = JsafDocument::from_str("{ not json").unwrap_err();
        assert!(matches!(err, AuditError::SerializationError(_)));
    }
}
