//! Structural comparison — scores a generated policy record against the reference.
//!
//! Flow: flatten both records → partition paths → classify shared paths →
//!       aggregate metrics. Pure; no I/O.

pub mod flatten;
pub mod scoring;

use serde::Serialize;

use crate::comparison::flatten::{flatten, FlatRecord, Leaf, Record};
use crate::comparison::scoring::{classify, ratio, Verdict};

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExactMatch {
    pub field: String,
    pub value: Leaf,
}

/// A shared path whose values differ (close or mismatched).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDiff {
    pub field: String,
    pub generated: Leaf,
    pub ground_truth: Leaf,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingField {
    pub field: String,
    pub ground_truth: Leaf,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtraField {
    pub field: String,
    pub generated: Leaf,
}

/// Per-path classification. Every list is sorted by `field`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ComparisonDetails {
    pub exact_matches: Vec<ExactMatch>,
    pub close_matches: Vec<FieldDiff>,
    pub mismatches: Vec<FieldDiff>,
    pub missing_in_generated: Vec<MissingField>,
    pub extra_in_generated: Vec<ExtraField>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonMetrics {
    pub total_fields_in_ground_truth: usize,
    pub total_fields_in_generated: usize,
    pub exact_matches: usize,
    pub close_matches: usize,
    pub mismatches: usize,
    pub missing_fields: usize,
    pub extra_fields: usize,
    /// (exact + close) / reference fields, 0.0 – 1.0
    pub accuracy: f64,
    /// exact / reference fields, 0.0 – 1.0
    pub exact_match_rate: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonOutcome {
    pub metrics: ComparisonMetrics,
    pub details: ComparisonDetails,
}

/// Paths split by which flattened record contains them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathPartition {
    pub common: Vec<String>,
    pub reference_only: Vec<String>,
    pub generated_only: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Comparison
// ────────────────────────────────────────────────────────────────────────────

pub fn partition_paths(generated: &FlatRecord, reference: &FlatRecord) -> PathPartition {
    let mut partition = PathPartition::default();

    for path in reference.keys() {
        if generated.contains_key(path) {
            partition.common.push(path.clone());
        } else {
            partition.reference_only.push(path.clone());
        }
    }
    partition.generated_only = generated
        .keys()
        .filter(|path| !reference.contains_key(*path))
        .cloned()
        .collect();

    partition
}

/// Compares a generated record against the reference record.
pub fn compare_records(generated: &Record, reference: &Record) -> ComparisonOutcome {
    let generated_flat = flatten(generated);
    let reference_flat = flatten(reference);
    let partition = partition_paths(&generated_flat, &reference_flat);

    let mut details = ComparisonDetails::default();

    for path in partition.common {
        let generated_leaf = &generated_flat[&path];
        let reference_leaf = &reference_flat[&path];

        match classify(generated_leaf, reference_leaf) {
            Verdict::Exact => details.exact_matches.push(ExactMatch {
                field: path,
                value: reference_leaf.clone(),
            }),
            Verdict::Close => details.close_matches.push(FieldDiff {
                field: path,
                generated: generated_leaf.clone(),
                ground_truth: reference_leaf.clone(),
            }),
            Verdict::Mismatch => details.mismatches.push(FieldDiff {
                field: path,
                generated: generated_leaf.clone(),
                ground_truth: reference_leaf.clone(),
            }),
        }
    }

    for path in partition.reference_only {
        let ground_truth = reference_flat[&path].clone();
        details.missing_in_generated.push(MissingField {
            field: path,
            ground_truth,
        });
    }

    for path in partition.generated_only {
        let generated = generated_flat[&path].clone();
        details.extra_in_generated.push(ExtraField {
            field: path,
            generated,
        });
    }

    let total_reference = reference_flat.len();
    let exact = details.exact_matches.len();
    let close = details.close_matches.len();

    let metrics = ComparisonMetrics {
        total_fields_in_ground_truth: total_reference,
        total_fields_in_generated: generated_flat.len(),
        exact_matches: exact,
        close_matches: close,
        mismatches: details.mismatches.len(),
        missing_fields: details.missing_in_generated.len(),
        extra_fields: details.extra_in_generated.len(),
        accuracy: ratio(exact + close, total_reference),
        exact_match_rate: ratio(exact, total_reference),
    };

    ComparisonOutcome { metrics, details }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
