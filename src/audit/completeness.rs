//! Result completeness classification
//!
//! A record is classified by how many of its fixed components carry at least
//! one value above the tolerance. Per-owner statistics are built by folding
//! single-record summaries with [`OwnerSummary::merge`], which is commutative
//! and associative: counts add, magnitudes take the maximum. Summaries are
//! therefore independent of record order and can be computed per shard and
//! merged.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::document::{Collection, ResultRecord};

/// Default magnitude above which a value counts as non-zero
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Completeness class of one result record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Completeness {
    /// Every component has a non-zero value
    Complete,
    /// Some, but not all, components have a non-zero value
    Partial,
    /// No component has a non-zero value
    Empty,
}

impl Completeness {
    pub fn label(self) -> &'static str {
        match self {
            Completeness::Complete => "Complete",
            Completeness::Partial => "Partial",
            Completeness::Empty => "Empty",
        }
    }
}

/// Check if any value exceeds the tolerance in magnitude
pub fn is_nonzero(values: &[f64], tolerance: f64) -> bool {
    values.iter().any(|v| v.abs() > tolerance)
}

/// Largest magnitude in a sequence, 0 for an empty sequence
pub fn max_abs(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |acc: f64, v| acc.max(v.abs()))
}

/// Number of non-zero components of a record
pub fn nonzero_count<R: ResultRecord>(record: &R, tolerance: f64) -> usize {
    (0..R::COMPONENTS.len())
        .filter(|&i| is_nonzero(record.component(i), tolerance))
        .count()
}

/// Fraction of non-zero components of a record
pub fn nonzero_ratio<R: ResultRecord>(record: &R, tolerance: f64) -> f64 {
    nonzero_count(record, tolerance) as f64 / R::COMPONENTS.len() as f64
}

/// Classify a record
///
/// Decided on the integer count so the boundaries are exact.
pub fn classify<R: ResultRecord>(record: &R, tolerance: f64) -> Completeness {
    match nonzero_count(record, tolerance) {
        0 => Completeness::Empty,
        n if n == R::COMPONENTS.len() => Completeness::Complete,
        _ => Completeness::Partial,
    }
}

// ========================
// Aggregates
// ========================

/// Completeness counts over a result collection
///
/// `total == complete + partial + empty` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CompletenessCounts {
    pub total: usize,
    pub complete: usize,
    pub partial: usize,
    pub empty: usize,
}

impl CompletenessCounts {
    /// Count one classified record
    pub fn record(&mut self, class: Completeness) {
        self.total += 1;
        match class {
            Completeness::Complete => self.complete += 1,
            Completeness::Partial => self.partial += 1,
            Completeness::Empty => self.empty += 1,
        }
    }

    pub fn merge(&mut self, other: &CompletenessCounts) {
        self.total += other.total;
        self.complete += other.complete;
        self.partial += other.partial;
        self.empty += other.empty;
    }

    /// Check the partition invariant
    pub fn is_consistent(&self) -> bool {
        self.total == self.complete + self.partial + self.empty
    }
}

/// Whether an owner has any non-empty record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OwnerStatus {
    HasValues,
    AllZero,
}

/// Selection of owners by status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OwnerFilter {
    #[default]
    All,
    HasValues,
    AllZero,
}

impl OwnerFilter {
    pub fn matches(self, status: OwnerStatus) -> bool {
        match self {
            OwnerFilter::All => true,
            OwnerFilter::HasValues => status == OwnerStatus::HasValues,
            OwnerFilter::AllZero => status == OwnerStatus::AllZero,
        }
    }
}

/// Statistics of every record owned by one bar or surface
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OwnerSummary {
    /// Records with at least one non-zero component
    pub nonzero: usize,
    /// Records with no non-zero component
    pub zero: usize,
    /// Largest magnitude per component over all records
    pub max_values: BTreeMap<&'static str, f64>,
}

impl OwnerSummary {
    /// Summary of a single record
    pub fn from_record<R: ResultRecord>(record: &R, tolerance: f64) -> Self {
        let empty = classify(record, tolerance) == Completeness::Empty;
        Self {
            nonzero: usize::from(!empty),
            zero: usize::from(empty),
            max_values: R::COMPONENTS
                .iter()
                .enumerate()
                .map(|(i, c)| (*c, max_abs(record.component(i))))
                .collect(),
        }
    }

    /// Combine with another summary of the same owner
    pub fn merge(&mut self, other: &OwnerSummary) {
        self.nonzero += other.nonzero;
        self.zero += other.zero;
        for (component, value) in &other.max_values {
            let entry = self.max_values.entry(*component).or_insert(0.0);
            *entry = entry.max(*value);
        }
    }

    /// Number of records of this owner
    pub fn total(&self) -> usize {
        self.nonzero + self.zero
    }

    pub fn status(&self) -> OwnerStatus {
        if self.nonzero > 0 {
            OwnerStatus::HasValues
        } else {
            OwnerStatus::AllZero
        }
    }

    /// Maximum magnitude of a component, 0 if unknown
    pub fn max_of(&self, component: &str) -> f64 {
        self.max_values.get(component).copied().unwrap_or(0.0)
    }
}

/// One row of the owner table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OwnerRow<'a> {
    pub owner: &'a str,
    pub status: OwnerStatus,
    pub summary: &'a OwnerSummary,
}

/// Classifier output for one result collection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultSummary {
    pub collection: Collection,
    pub components: &'static [&'static str],
    pub counts: CompletenessCounts,
    pub owners: BTreeMap<String, OwnerSummary>,
}

impl ResultSummary {
    /// Summary with no records
    pub fn empty<R: ResultRecord>() -> Self {
        Self {
            collection: R::COLLECTION,
            components: R::COMPONENTS,
            counts: CompletenessCounts::default(),
            owners: BTreeMap::new(),
        }
    }

    /// Classify every record and fold the per-owner statistics
    pub fn classify<R: ResultRecord>(records: &[R], tolerance: f64) -> Self {
        let summary = records.iter().fold(Self::empty::<R>(), |mut acc, record| {
            acc.add(record, tolerance);
            acc
        });
        log::debug!(
            "{}: {} records, {} complete, {} partial, {} empty, {} owners",
            summary.collection,
            summary.counts.total,
            summary.counts.complete,
            summary.counts.partial,
            summary.counts.empty,
            summary.owners.len()
        );
        summary
    }

    /// Fold one record into the summary
    pub fn add<R: ResultRecord>(&mut self, record: &R, tolerance: f64) {
        self.counts.record(classify(record, tolerance));
        let single = OwnerSummary::from_record(record, tolerance);
        match self.owners.get_mut(record.owner_id()) {
            Some(existing) => existing.merge(&single),
            None => {
                self.owners.insert(record.owner_id().to_string(), single);
            }
        }
    }

    /// Combine with the summary of another shard of the same collection
    pub fn merge(&mut self, other: &ResultSummary) {
        self.counts.merge(&other.counts);
        for (owner, summary) in &other.owners {
            match self.owners.get_mut(owner) {
                Some(existing) => existing.merge(summary),
                None => {
                    self.owners.insert(owner.clone(), summary.clone());
                }
            }
        }
    }

    pub fn owner(&self, owner_id: &str) -> Option<&OwnerSummary> {
        self.owners.get(owner_id)
    }

    /// Owner rows matching `filter`, numeric ids in numeric order
    ///
    /// Ids that are not all digits sort as 0, ties keep id order.
    pub fn owner_rows(&self, filter: OwnerFilter) -> Vec<OwnerRow<'_>> {
        let mut rows: Vec<OwnerRow<'_>> = self
            .owners
            .iter()
            .map(|(owner, summary)| OwnerRow {
                owner: owner.as_str(),
                status: summary.status(),
                summary,
            })
            .filter(|row| filter.matches(row.status))
            .collect();
        rows.sort_by_key(|row| numeric_sort_key(row.owner));
        rows
    }
}

fn numeric_sort_key(id: &str) -> u128 {
    if !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()) {
        id.parse().unwrap_or(u128::MAX)
    } else {
        0
    }
}

// ========================
// Record Lookup
// ========================

/// Records keyed by (owner id, load id)
///
/// A repeated pair keeps the record that appears last.
#[derive(Debug, Clone)]
pub struct ResultIndex<'a, R> {
    records: HashMap<(&'a str, &'a str), &'a R>,
}

impl<'a, R: ResultRecord> ResultIndex<'a, R> {
    pub fn build(records: &'a [R]) -> Self {
        let records = records
            .iter()
            .map(|r| ((r.owner_id(), r.load_id()), r))
            .collect();
        Self { records }
    }

    pub fn get(&self, owner_id: &str, load_id: &str) -> Option<&'a R> {
        self.records.get(&(owner_id, load_id)).copied()
    }

    /// Number of distinct (owner, load) pairs
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct load ids, sorted
    pub fn load_ids(&self) -> Vec<&'a str> {
        self.records
            .keys()
            .map(|(_, load)| *load)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Per-component view of one record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentDetail {
    pub name: &'static str,
    /// Number of values
    pub len: usize,
    /// `None` for an empty sequence
    pub min: Option<f64>,
    /// `None` for an empty sequence
    pub max: Option<f64>,
    pub nonzero: bool,
}

/// Completeness view of one record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordDetail {
    pub owner: String,
    pub load: String,
    pub completeness: Completeness,
    pub nonzero_components: usize,
    pub component_count: usize,
    pub ratio: f64,
    /// Section positions for 1D results, empty for mesh results
    pub positions: Vec<f64>,
    pub components: Vec<ComponentDetail>,
}

impl RecordDetail {
    pub fn from_record<R: ResultRecord>(record: &R, tolerance: f64) -> Self {
        let components = R::COMPONENTS
            .iter()
            .enumerate()
            .map(|(i, &name)| {
                let values = record.component(i);
                ComponentDetail {
                    name,
                    len: values.len(),
                    min: values.iter().copied().reduce(f64::min),
                    max: values.iter().copied().reduce(f64::max),
                    nonzero: is_nonzero(values, tolerance),
                }
            })
            .collect();
        Self {
            owner: record.owner_id().to_string(),
            load: record.load_id().to_string(),
            completeness: classify(record, tolerance),
            nonzero_components: nonzero_count(record, tolerance),
            component_count: R::COMPONENTS.len(),
            ratio: nonzero_ratio(record, tolerance),
            positions: record.positions().to_vec(),
            components,
        }
    }
}
