//! Load cases, load combinations and actions

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use super::codes::{ActionType, CombinationCategory, CoordinateSystem, Distribution, LoadType};
use super::{null_as_default, null_as_empty_list, Identified};

/// A load case groups related actions under a common name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LoadCase {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// See [`ActionType`]
    #[serde(deserialize_with = "null_as_default")]
    pub action_type: i64,
    /// See [`LoadType`]
    #[serde(rename = "Type", deserialize_with = "null_as_default")]
    pub load_type: i64,
}

impl LoadCase {
    pub fn action_label(&self) -> Cow<'static, str> {
        ActionType::describe(self.action_type)
    }

    pub fn type_label(&self) -> Cow<'static, str> {
        LoadType::describe(self.load_type)
    }
}

/// A load combination defines how load cases are combined
///
/// `load_factors` and `multipliers` are index-aligned with `load_cases`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LoadCombination {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// See [`CombinationCategory`]
    #[serde(deserialize_with = "null_as_default")]
    pub category: i64,
    /// Referenced load case ids
    #[serde(deserialize_with = "null_as_empty_list")]
    pub load_cases: Vec<String>,
    #[serde(deserialize_with = "null_as_empty_list")]
    pub load_factors: Vec<f64>,
    #[serde(deserialize_with = "null_as_empty_list")]
    pub multipliers: Vec<f64>,
}

/// One load case of a combination with its factor and multiplier
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CombinationEntry<'a> {
    pub load_case: &'a str,
    /// `None` when the factor array is shorter than the case list
    pub factor: Option<f64>,
    /// `None` when the multiplier array is shorter than the case list
    pub multiplier: Option<f64>,
}

impl LoadCombination {
    pub fn category_label(&self) -> Cow<'static, str> {
        CombinationCategory::describe(self.category)
    }

    /// Pair each referenced load case with its factor and multiplier
    pub fn entries(&self) -> Vec<CombinationEntry<'_>> {
        self.load_cases
            .iter()
            .enumerate()
            .map(|(i, case)| CombinationEntry {
                load_case: case,
                factor: self.load_factors.get(i).copied(),
                multiplier: self.multipliers.get(i).copied(),
            })
            .collect()
    }
}

/// A concentrated action on a node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PointAction {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub reference_node: String,
    #[serde(deserialize_with = "null_as_default")]
    pub load_case: String,
    /// See [`CoordinateSystem`]
    #[serde(deserialize_with = "null_as_default")]
    pub coordinate_system: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub x: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub y: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub z: f64,
}

impl PointAction {
    pub fn coordinate_label(&self) -> Cow<'static, str> {
        CoordinateSystem::describe(self.coordinate_system)
    }
}

/// A line action along a bar
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CurveAction {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub curve_member: String,
    #[serde(deserialize_with = "null_as_default")]
    pub load_case: String,
    /// See [`Distribution`]
    #[serde(deserialize_with = "null_as_default")]
    pub distribution: i64,
    /// See [`CoordinateSystem`]
    #[serde(deserialize_with = "null_as_default")]
    pub coordinate_system: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub x: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub y: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub z: f64,
}

impl CurveAction {
    pub fn distribution_label(&self) -> Cow<'static, str> {
        Distribution::describe(self.distribution)
    }
}

/// A pressure action on a surface
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SurfaceAction {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub surface_element: String,
    #[serde(deserialize_with = "null_as_default")]
    pub load_case: String,
    #[serde(deserialize_with = "null_as_default")]
    pub qx: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub qy: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub qz: f64,
}

identified!(
    LoadCase,
    LoadCombination,
    PointAction,
    CurveAction,
    SurfaceAction,
);
