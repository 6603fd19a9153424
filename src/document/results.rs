//! Analysis result records
//!
//! Both record kinds carry a fixed set of component sequences. Sequences are
//! index-aligned: section positions for 1D results, finite-element nodes for
//! mesh results.

use serde::{Deserialize, Serialize};

use super::{null_as_default, null_as_empty_list, Collection};

/// Internal force components of a 1D result, in report order
pub const COMPONENTS_1D: [&str; 6] = ["aN", "aVy", "aVz", "aMx", "aMy", "aMz"];

/// Plate force components of a mesh result, in report order
pub const COMPONENTS_MESH: [&str; 8] = ["amx", "amy", "amxy", "avx", "avy", "anx", "any", "anxy"];

/// A result record owned by one geometric entity under one load
pub trait ResultRecord {
    /// Component names, fixed per record kind
    const COMPONENTS: &'static [&'static str];

    /// Collection the records are read from
    const COLLECTION: Collection;

    /// Owning bar or surface id
    fn owner_id(&self) -> &str;

    /// Load case or combination id
    fn load_id(&self) -> &str;

    /// Values of the component at `index` in [`Self::COMPONENTS`]
    fn component(&self, index: usize) -> &[f64];

    /// Values of a component by name
    fn component_by_name(&self, name: &str) -> Option<&[f64]> {
        Self::COMPONENTS
            .iter()
            .position(|c| *c == name)
            .map(|index| self.component(index))
    }

    /// Positions the component values are sampled at, empty if not recorded
    fn positions(&self) -> &[f64] {
        &[]
    }
}

/// Internal forces along a bar for one load
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Result1D {
    /// Owning bar id
    #[serde(rename = "Member", deserialize_with = "null_as_default")]
    pub member: String,
    /// Load case or combination id
    #[serde(rename = "Load", deserialize_with = "null_as_default")]
    pub load: String,
    /// Section positions along the bar in metres
    #[serde(rename = "SectionsAt", deserialize_with = "null_as_empty_list")]
    pub sections_at: Vec<f64>,
    /// Axial force
    #[serde(rename = "aN", deserialize_with = "null_as_empty_list")]
    pub n: Vec<f64>,
    /// Shear force in local y
    #[serde(rename = "aVy", deserialize_with = "null_as_empty_list")]
    pub vy: Vec<f64>,
    /// Shear force in local z
    #[serde(rename = "aVz", deserialize_with = "null_as_empty_list")]
    pub vz: Vec<f64>,
    /// Torsion
    #[serde(rename = "aMx", deserialize_with = "null_as_empty_list")]
    pub mx: Vec<f64>,
    /// Bending moment about local y
    #[serde(rename = "aMy", deserialize_with = "null_as_empty_list")]
    pub my: Vec<f64>,
    /// Bending moment about local z
    #[serde(rename = "aMz", deserialize_with = "null_as_empty_list")]
    pub mz: Vec<f64>,
}

impl ResultRecord for Result1D {
    const COMPONENTS: &'static [&'static str] = &COMPONENTS_1D;
    const COLLECTION: Collection = Collection::Results1D;

    fn owner_id(&self) -> &str {
        &self.member
    }

    fn load_id(&self) -> &str {
        &self.load
    }

    fn component(&self, index: usize) -> &[f64] {
        match index {
            0 => &self.n,
            1 => &self.vy,
            2 => &self.vz,
            3 => &self.mx,
            4 => &self.my,
            5 => &self.mz,
            _ => &[],
        }
    }

    fn positions(&self) -> &[f64] {
        &self.sections_at
    }
}

/// Plate forces over a surface mesh for one load
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshResult {
    /// Owning surface id
    #[serde(rename = "Member", deserialize_with = "null_as_default")]
    pub member: String,
    /// Load case or combination id
    #[serde(rename = "Load", deserialize_with = "null_as_default")]
    pub load: String,
    #[serde(deserialize_with = "null_as_empty_list")]
    pub amx: Vec<f64>,
    #[serde(deserialize_with = "null_as_empty_list")]
    pub amy: Vec<f64>,
    #[serde(deserialize_with = "null_as_empty_list")]
    pub amxy: Vec<f64>,
    #[serde(deserialize_with = "null_as_empty_list")]
    pub avx: Vec<f64>,
    #[serde(deserialize_with = "null_as_empty_list")]
    pub avy: Vec<f64>,
    #[serde(deserialize_with = "null_as_empty_list")]
    pub anx: Vec<f64>,
    #[serde(deserialize_with = "null_as_empty_list")]
    pub any: Vec<f64>,
    #[serde(deserialize_with = "null_as_empty_list")]
    pub anxy: Vec<f64>,
}

impl ResultRecord for MeshResult {
    const COMPONENTS: &'static [&'static str] = &COMPONENTS_MESH;
    const COLLECTION: Collection = Collection::MeshResults;

    fn owner_id(&self) -> &str {
        &self.member
    }

    fn load_id(&self) -> &str {
        &self.load
    }

    fn component(&self, index: usize) -> &[f64] {
        match index {
            0 => &self.amx,
            1 => &self.amy,
            2 => &self.amxy,
            3 => &self.avx,
            4 => &self.avy,
            5 => &self.anx,
            6 => &self.any,
            7 => &self.anxy,
            _ => &[],
        }
    }
}
