//! Model index - id sets and display names for every referenceable collection

use std::collections::HashMap;

use crate::document::{Identified, JsafDocument};

/// Number of id characters shown when a record has no name
pub const DEFAULT_DISPLAY_ID_LEN: usize = 8;

/// Ids and names of one collection
#[derive(Debug, Clone, Default)]
pub struct IdIndex {
    /// id -> name, the name may be empty
    names: HashMap<String, String>,
    display_id_len: usize,
}

impl IdIndex {
    /// Index a slice of records. A repeated id keeps the last name.
    pub fn from_records<T: Identified>(records: &[T], display_id_len: usize) -> Self {
        let names = records
            .iter()
            .map(|r| (r.id().to_string(), r.name().to_string()))
            .collect();
        Self {
            names,
            display_id_len,
        }
    }

    /// Check if an id is present
    pub fn contains(&self, id: &str) -> bool {
        self.names.contains_key(id)
    }

    /// Number of distinct ids
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Name of a record, `None` if the id is absent or the record is unnamed
    pub fn name(&self, id: &str) -> Option<&str> {
        self.names
            .get(id)
            .map(String::as_str)
            .filter(|name| !name.is_empty())
    }

    /// Name of a record, falling back to the truncated id
    pub fn display_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.name(id)
            .unwrap_or_else(|| truncate_id(id, self.display_id_len))
    }
}

/// Shorten an id to at most `len` characters
pub fn truncate_id(id: &str, len: usize) -> &str {
    match id.char_indices().nth(len) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}

/// Lookup structure over a whole document
///
/// Built once per audit and never mutated. Absent collections index as empty.
#[derive(Debug, Clone, Default)]
pub struct ModelIndex {
    pub materials: IdIndex,
    pub cross_sections: IdIndex,
    pub nodes: IdIndex,
    pub bars: IdIndex,
    pub surfaces: IdIndex,
    pub load_cases: IdIndex,
    pub load_combinations: IdIndex,
}

impl ModelIndex {
    /// Build an index with the default display id length
    pub fn new(doc: &JsafDocument) -> Self {
        Self::build(doc, DEFAULT_DISPLAY_ID_LEN)
    }

    /// Build an index showing `display_id_len` characters of unnamed ids
    pub fn build(doc: &JsafDocument, display_id_len: usize) -> Self {
        let index = Self {
            materials: IdIndex::from_records(doc.materials(), display_id_len),
            cross_sections: IdIndex::from_records(doc.cross_sections(), display_id_len),
            nodes: IdIndex::from_records(doc.nodes(), display_id_len),
            bars: IdIndex::from_records(doc.bars(), display_id_len),
            surfaces: IdIndex::from_records(doc.surfaces(), display_id_len),
            load_cases: IdIndex::from_records(doc.load_cases(), display_id_len),
            load_combinations: IdIndex::from_records(doc.load_combinations(), display_id_len),
        };
        log::debug!(
            "Indexed {} materials, {} sections, {} nodes, {} bars, {} surfaces, {} load cases, {} combinations",
            index.materials.len(),
            index.cross_sections.len(),
            index.nodes.len(),
            index.bars.len(),
            index.surfaces.len(),
            index.load_cases.len(),
            index.load_combinations.len()
        );
        index
    }

    /// Display name of a load case or combination
    ///
    /// A combination shadows a load case with the same id.
    pub fn load_display_name<'a>(&'a self, id: &'a str) -> &'a str {
        if self.load_combinations.contains(id) {
            self.load_combinations.display_name(id)
        } else {
            self.load_cases.display_name(id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> JsafDocument {
        JsafDocument::from_value(json!({
            "Materials": [{ "Id": "M1", "Name": "C30/37" }],
            "PointConnections": [
                { "Id": "N1", "Name": "Node 1" },
                { "Id": "5f0c2a9e-41d7-4bb8-9d77-4ac1c8a5f3b1" }
            ],
            "LoadCases": [{ "Id": "L1", "Name": "Dead" }, { "Id": "L2", "Name": "Live" }],
            "LoadCombinations": [{ "Id": "L2", "Name": "ULS" }]
        }))
        .unwrap()
    }

    #[test]
    fn test_present_ids_hit_and_absent_miss() {
        let doc = sample();
        let index = ModelIndex::new(&doc);
        for node in doc.nodes() {
            assert!(index.nodes.contains(&node.id));
        }
        assert!(!index.nodes.contains("N2"));
        assert!(!index.bars.contains("N1"));
        assert!(index.bars.is_empty());
    }

    #[test]
    fn test_display_name_falls_back_to_short_id() {
        let index = ModelIndex::new(&sample());
        assert_eq!(index.nodes.display_name("N1"), "Node 1");
        assert_eq!(
            index.nodes.display_name("5f0c2a9e-41d7-4bb8-9d77-4ac1c8a5f3b1"),
            "5f0c2a9e"
        );
        assert_eq!(index.materials.display_name("unknown-material-id"), "unknown-");
        assert_eq!(index.materials.name("M1"), Some("C30/37"));
    }

    #[test]
    fn test_combinations_shadow_load_cases() {
        let index = ModelIndex::new(&sample());
        assert_eq!(index.load_display_name("L1"), "Dead");
        assert_eq!(index.load_display_name("L2"), "ULS");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate_id("ñññññññññ", 3), "ñññ");
        assert_eq!(truncate_id("abc", 8), "abc");
        assert_eq!(truncate_id("", 8), "");
    }
}
