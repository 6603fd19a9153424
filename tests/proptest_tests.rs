//! Property-based tests for the audit engine
//!
//! These tests generate random result collections and small models and check
//! that classification and reporting invariants hold for all of them.

use jsaf_audit::audit::completeness::{classify, is_nonzero};
use jsaf_audit::prelude::*;
use proptest::prelude::*;
use serde_json::{json, Value};

const TOL: f64 = 1e-6;

// ============================================================================
// Generators
// ============================================================================

/// Exact zeros, values inside the tolerance band and ordinary magnitudes
fn value_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![
        Just(0.0),
        -TOL..=TOL,
        -1.0e3..1.0e3f64,
    ]
}

fn series_strategy() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(value_strategy(), 0..4)
}

fn result_1d_strategy() -> impl Strategy<Value = Result1D> {
    (
        "[1-6]",
        "LC[1-3]",
        prop::collection::vec(series_strategy(), 6),
    )
        .prop_map(|(member, load, mut series)| Result1D {
            member,
            load,
            sections_at: Vec::new(),
            mz: series.pop().unwrap_or_default(),
            my: series.pop().unwrap_or_default(),
            mx: series.pop().unwrap_or_default(),
            vz: series.pop().unwrap_or_default(),
            vy: series.pop().unwrap_or_default(),
            n: series.pop().unwrap_or_default(),
        })
}

fn mesh_result_strategy() -> impl Strategy<Value = MeshResult> {
    (
        "P[1-4]",
        "LC[1-2]",
        prop::collection::vec(series_strategy(), 8),
    )
        .prop_map(|(member, load, series)| MeshResult {
            member,
            load,
            amx: series[0].clone(),
            amy: series[1].clone(),
            amxy: series[2].clone(),
            avx: series[3].clone(),
            avy: series[4].clone(),
            anx: series[5].clone(),
            any: series[6].clone(),
            anxy: series[7].clone(),
        })
}

fn shuffled<T: Clone + std::fmt::Debug>(
    records: impl Strategy<Value = Vec<T>>,
) -> impl Strategy<Value = (Vec<T>, Vec<T>)> {
    records.prop_flat_map(|records| (Just(records.clone()), Just(records).prop_shuffle()))
}

/// Small frame: node count, bars with node references, results by bar index
#[derive(Debug, Clone)]
struct FrameCase {
    nodes: usize,
    bars: Vec<Vec<usize>>,
    results: Vec<(usize, Vec<f64>)>,
}

fn frame_strategy() -> impl Strategy<Value = FrameCase> {
    (
        0usize..4,
        prop::collection::vec(prop::collection::vec(0usize..5, 0..3), 0..4),
        prop::collection::vec((0usize..5, series_strategy()), 0..5),
    )
        .prop_map(|(nodes, bars, results)| FrameCase {
            nodes,
            bars,
            results,
        })
}

impl FrameCase {
    fn to_json(&self) -> Value {
        let nodes: Vec<Value> = (0..self.nodes).map(|i| json!({ "Id": format!("N{i}") })).collect();
        let bars: Vec<Value> = self
            .bars
            .iter()
            .enumerate()
            .map(|(i, refs)| {
                let refs: Vec<String> = refs.iter().map(|n| format!("N{n}")).collect();
                json!({ "Id": format!("B{i}"), "Nodes": refs })
            })
            .collect();
        let results: Vec<Value> = self
            .results
            .iter()
            .map(|(bar, values)| json!({ "Member": format!("B{bar}"), "Load": "LC1", "aMy": values }))
            .collect();
        json!({
            "PointConnections": nodes,
            "CurveMembers": bars,
            "Results1D": results
        })
    }

    fn has_dangling_reference(&self) -> bool {
        self.bars.iter().flatten().any(|&n| n >= self.nodes)
    }

    fn has_orphan(&self) -> bool {
        self.results.iter().any(|(bar, _)| *bar >= self.bars.len())
    }

    fn has_empty_record(&self) -> bool {
        self.results.iter().any(|(_, values)| !is_nonzero(values, TOL))
    }

    fn has_empty_collection(&self) -> bool {
        self.nodes == 0 || self.bars.is_empty() || self.results.is_empty()
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn test_counts_partition_total(records in prop::collection::vec(result_1d_strategy(), 0..30)) {
        let summary = ResultSummary::classify(&records, TOL);
        let counts = summary.counts;
        prop_assert_eq!(counts.total, records.len());
        prop_assert_eq!(counts.total, counts.complete + counts.partial + counts.empty);
        let owned: usize = summary.owners.values().map(OwnerSummary::total).sum();
        prop_assert_eq!(owned, records.len());
    }

    #[test]
    fn test_1d_summary_is_order_independent(
        (records, reordered) in shuffled(prop::collection::vec(result_1d_strategy(), 0..30))
    ) {
        prop_assert_eq!(
            ResultSummary::classify(&records, TOL),
            ResultSummary::classify(&reordered, TOL)
        );
    }

    #[test]
    fn test_mesh_summary_is_order_independent(
        (records, reordered) in shuffled(prop::collection::vec(mesh_result_strategy(), 0..30))
    ) {
        prop_assert_eq!(
            ResultSummary::classify(&records, TOL),
            ResultSummary::classify(&reordered, TOL)
        );
    }

    #[test]
    fn test_sharded_merge_matches_single_pass(
        records in prop::collection::vec(mesh_result_strategy(), 0..30),
        split in 0usize..30,
    ) {
        let split = split.min(records.len());
        let (left, right) = records.split_at(split);
        let mut merged = ResultSummary::classify(right, TOL);
        merged.merge(&ResultSummary::classify(left, TOL));
        prop_assert_eq!(merged, ResultSummary::classify(&records, TOL));
    }

    #[test]
    fn test_values_within_tolerance_are_zero(values in prop::collection::vec(-TOL..=TOL, 0..10)) {
        prop_assert!(!is_nonzero(&values, TOL));
        let record = Result1D { n: values, ..Default::default() };
        prop_assert_eq!(classify(&record, TOL), Completeness::Empty);
    }

    #[test]
    fn test_one_value_above_tolerance_is_nonzero(
        mut values in prop::collection::vec(-TOL..=TOL, 0..10),
        magnitude in 2.0e-6..1.0e6f64,
        negative in any::<bool>(),
        position in 0usize..10,
    ) {
        let value = if negative { -magnitude } else { magnitude };
        let position = position.min(values.len());
        values.insert(position, value);
        prop_assert!(is_nonzero(&values, TOL));
    }

    #[test]
    fn test_clean_iff_no_findings(case in frame_strategy()) {
        let doc = JsafDocument::from_value(case.to_json()).unwrap();
        let report = run_audit(&doc, &AuditOptions::default());

        prop_assert_eq!(!report.errors.is_empty(), case.has_dangling_reference());
        prop_assert_eq!(!report.results_1d.orphans.is_empty(), case.has_orphan());
        let expected_clean = !case.has_dangling_reference()
            && !case.has_orphan()
            && !case.has_empty_record()
            && !case.has_empty_collection();
        prop_assert_eq!(report.is_clean(), expected_clean);
    }

    #[test]
    fn test_index_hits_present_ids_only(case in frame_strategy(), lookup in 0usize..8) {
        let doc = JsafDocument::from_value(case.to_json()).unwrap();
        let index = ModelIndex::new(&doc);
        for node in doc.nodes() {
            prop_assert!(index.nodes.contains(&node.id));
        }
        for bar in doc.bars() {
            prop_assert!(index.bars.contains(&bar.id));
        }
        let lookup_id = format!("N{lookup}");
        prop_assert_eq!(index.nodes.contains(&lookup_id), lookup < case.nodes);
    }
}
