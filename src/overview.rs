//! Model overview - record counts per collection and type distributions

use serde::Serialize;
use std::collections::BTreeMap;

use crate::document::{Collection, CollectionGroup, JsafDocument};

/// Top-level list outside the schema that is still counted under results
pub const MACROS_KEY: &str = "Macros";

/// Record count of one collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionCount {
    /// Key in the JSON document
    pub key: String,
    /// Display label
    pub label: &'static str,
    pub count: usize,
}

/// Counts of the collections in one group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverviewGroup {
    pub group: CollectionGroup,
    pub counts: Vec<CollectionCount>,
}

impl OverviewGroup {
    pub fn title(&self) -> &'static str {
        match self.group {
            CollectionGroup::Geometry => "Geometry",
            CollectionGroup::Loads => "Loads",
            CollectionGroup::Results => "Results",
        }
    }

    /// Total records in the group
    pub fn total(&self) -> usize {
        self.counts.iter().map(|c| c.count).sum()
    }
}

/// Summary of what a document contains
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelOverview {
    pub name: String,
    pub description: String,
    /// Geometry, loads and results, in that order
    pub groups: Vec<OverviewGroup>,
    /// Bars per type label
    pub bar_types: BTreeMap<String, usize>,
    /// Surfaces per type label
    pub surface_types: BTreeMap<String, usize>,
    /// Materials per type label
    pub material_types: BTreeMap<String, usize>,
}

fn collection_label(collection: Collection) -> &'static str {
    match collection {
        Collection::Materials => "Materials",
        Collection::CrossSections => "Cross-sections",
        Collection::PointConnections => "Nodes",
        Collection::CurveMembers => "Bars",
        Collection::SurfaceMembers => "Surfaces",
        Collection::SurfaceMemberOpenings => "Openings",
        Collection::PointSupports => "Supports",
        Collection::LoadCases => "Load cases",
        Collection::LoadCombinations => "Combinations",
        Collection::PointActions => "Point actions",
        Collection::CurveActions => "Line actions",
        Collection::SurfaceActions => "Surface actions",
        Collection::Results1D => "1D results",
        Collection::MeshResults => "Mesh results",
    }
}

fn tally<I: IntoIterator<Item = String>>(labels: I) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for label in labels {
        *counts.entry(label).or_insert(0) += 1;
    }
    counts
}

impl ModelOverview {
    pub fn from_document(doc: &JsafDocument) -> Self {
        let groups = [
            CollectionGroup::Geometry,
            CollectionGroup::Loads,
            CollectionGroup::Results,
        ]
        .into_iter()
        .map(|group| {
            let mut counts: Vec<CollectionCount> = Collection::ALL
                .iter()
                .filter(|c| c.group() == group)
                .map(|c| CollectionCount {
                    key: c.key().to_string(),
                    label: collection_label(*c),
                    count: doc.collection_len(*c).unwrap_or(0),
                })
                .collect();
            if group == CollectionGroup::Results {
                counts.push(CollectionCount {
                    key: MACROS_KEY.to_string(),
                    label: "Macros",
                    count: doc.extra_list_len(MACROS_KEY).unwrap_or(0),
                });
            }
            OverviewGroup { group, counts }
        })
        .collect();

        Self {
            name: doc.name.clone(),
            description: doc.description.clone(),
            groups,
            bar_types: tally(doc.bars().iter().map(|b| b.type_label().into_owned())),
            surface_types: tally(doc.surfaces().iter().map(|s| s.type_label().into_owned())),
            material_types: tally(doc.materials().iter().map(|m| m.type_label().into_owned())),
        }
    }

    /// Count of a collection by JSON key, 0 when unknown
    pub fn count(&self, key: &str) -> usize {
        self.groups
            .iter()
            .flat_map(|g| &g.counts)
            .find(|c| c.key == key)
            .map_or(0, |c| c.count)
    }
}
