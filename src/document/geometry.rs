//! Geometry records: materials, cross-sections, nodes, bars, surfaces,
//! openings and supports

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use super::codes::{
    CurveType, MaterialType, RotationRestraint, SectionShape, SectionType, SurfaceType,
    TranslationRestraint,
};
use super::{null_as_default, null_as_empty_list, Identified};

/// Material properties
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Material {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Material family code, see [`MaterialType`]
    #[serde(rename = "Type", deserialize_with = "null_as_default")]
    pub material_type: i64,
    /// Modulus of elasticity
    #[serde(deserialize_with = "null_as_default")]
    pub e_modulus: f64,
    /// Shear modulus
    #[serde(deserialize_with = "null_as_default")]
    pub g_modulus: f64,
    /// Poisson's ratio
    #[serde(deserialize_with = "null_as_default")]
    pub poisson_coefficient: f64,
    /// Unit mass (weight density in most exports)
    #[serde(deserialize_with = "null_as_default")]
    pub unit_mass: f64,
    /// Characteristic compressive strength, concrete only
    #[serde(deserialize_with = "null_as_default")]
    pub fck: f64,
    /// Yield strength, steel only
    #[serde(deserialize_with = "null_as_default")]
    pub fy: f64,
    /// Ultimate strength, steel only
    #[serde(deserialize_with = "null_as_default")]
    pub fu: f64,
}

impl Material {
    /// Decoded material family
    pub fn kind(&self) -> Option<MaterialType> {
        MaterialType::from_code(self.material_type)
    }

    /// Material family label
    pub fn type_label(&self) -> Cow<'static, str> {
        MaterialType::describe(self.material_type)
    }
}

/// Cross-section of a bar
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CrossSection {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Definition type code, see [`SectionType`]
    #[serde(rename = "Type", deserialize_with = "null_as_default")]
    pub section_type: i64,
    /// Shape code, see [`SectionShape`]
    #[serde(deserialize_with = "null_as_default")]
    pub shape: i64,
    /// Shape-dependent dimensions in metres
    #[serde(deserialize_with = "null_as_empty_list")]
    pub parameters: Vec<f64>,
    /// Material ids
    #[serde(deserialize_with = "null_as_empty_list")]
    pub materials: Vec<String>,
}

impl CrossSection {
    pub fn type_label(&self) -> Cow<'static, str> {
        SectionType::describe(self.section_type)
    }

    pub fn shape_label(&self) -> Cow<'static, str> {
        SectionShape::describe(self.shape)
    }
}

/// A point connection (node)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PointConnection {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub x: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub y: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub z: f64,
}

impl PointConnection {
    /// Get the coordinates as an array
    pub fn coords(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

/// A curve member (bar): polyline through two or more nodes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CurveMember {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Role code, see [`CurveType`]
    #[serde(rename = "Type", deserialize_with = "null_as_default")]
    pub curve_type: i64,
    /// Cross-section id; empty when none is assigned
    #[serde(deserialize_with = "null_as_default")]
    pub cross_section: String,
    /// Node ids along the bar
    #[serde(deserialize_with = "null_as_empty_list")]
    pub nodes: Vec<String>,
}

impl CurveMember {
    pub fn type_label(&self) -> Cow<'static, str> {
        CurveType::describe(self.curve_type)
    }
}

/// A surface member (panel): polygon of three or more nodes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SurfaceMember {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Role code, see [`SurfaceType`]
    #[serde(rename = "Type", deserialize_with = "null_as_default")]
    pub surface_type: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub thickness: f64,
    #[serde(deserialize_with = "null_as_empty_list")]
    pub materials: Vec<String>,
    #[serde(deserialize_with = "null_as_empty_list")]
    pub nodes: Vec<String>,
}

impl SurfaceMember {
    pub fn type_label(&self) -> Cow<'static, str> {
        SurfaceType::describe(self.surface_type)
    }
}

/// A polygonal hole in a surface member
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SurfaceMemberOpening {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Id of the surface the opening cuts
    #[serde(deserialize_with = "null_as_default")]
    pub surface: String,
    #[serde(deserialize_with = "null_as_empty_list")]
    pub nodes: Vec<String>,
}

/// Support conditions at a node
///
/// Translations use [`TranslationRestraint`] codes, rotations use
/// [`RotationRestraint`] codes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PointSupport {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub node: String,
    #[serde(deserialize_with = "null_as_default")]
    pub ux: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub uy: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub uz: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub fix: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub fiy: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub fiz: i64,
}

impl PointSupport {
    /// Translation labels [Ux, Uy, Uz]
    pub fn translation_labels(&self) -> [Cow<'static, str>; 3] {
        [self.ux, self.uy, self.uz].map(TranslationRestraint::describe)
    }

    /// Rotation labels [Rx, Ry, Rz]
    pub fn rotation_labels(&self) -> [Cow<'static, str>; 3] {
        [self.fix, self.fiy, self.fiz].map(RotationRestraint::describe)
    }

    /// Check if any DOF is restrained
    pub fn is_supported(&self) -> bool {
        [self.ux, self.uy, self.uz, self.fix, self.fiy, self.fiz]
            .iter()
            .any(|&code| code != 0)
    }
}

identified!(
    Material,
    CrossSection,
    PointConnection,
    CurveMember,
    SurfaceMember,
    SurfaceMemberOpening,
    PointSupport,
);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bar_decoding() {
        let bar: CurveMember = serde_json::from_value(json!({
            "Id": "B1",
            "Name": "Beam 1",
            "Type": 1,
            "CrossSection": "CS1",
            "Nodes": ["N1", "N2"]
        }))
        .unwrap();
        assert_eq!(bar.type_label(), CurveType::Beam.label());
        assert_eq!(bar.nodes, vec!["N1", "N2"]);
        assert_eq!(bar.cross_section, "CS1");
    }

    #[test]
    fn test_missing_fields_default() {
        let bar: CurveMember = serde_json::from_value(json!({ "Id": "B2" })).unwrap();
        assert!(bar.name.is_empty());
        assert!(bar.cross_section.is_empty());
        assert!(bar.nodes.is_empty());
        assert_eq!(bar.type_label(), "General");
        assert_eq!(bar.label(), "B2");
    }

    #[test]
    fn test_support_labels() {
        let support: PointSupport = serde_json::from_value(json!({
            "Id": "S1", "Node": "N1", "Ux": 1, "Uy": 1, "Uz": 3, "Fix": 0, "Fiy": 2, "Fiz": 9
        }))
        .unwrap();
        let [ux, _, uz] = support.translation_labels();
        assert_eq!(ux, "Rigid");
        assert_eq!(uz, "Comp. Only");
        let [rx, ry, rz] = support.rotation_labels();
        assert_eq!(rx, "Free");
        assert_eq!(ry, "Flexible");
        assert_eq!(rz, "9");
        assert!(support.is_supported());
    }

    #[test]
    fn test_material_fields() {
        let material: Material = serde_json::from_value(json!({
            "Id": "M1", "Name": "S355", "Type": 2, "EModulus": 210e9, "Fy": 355e6
        }))
        .unwrap();
        assert_eq!(material.kind(), Some(MaterialType::Steel));
        assert_eq!(material.e_modulus, 210e9);
        assert_eq!(material.fy, 355e6);
        assert_eq!(material.fu, 0.0);
    }
}
