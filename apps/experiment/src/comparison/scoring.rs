use serde_json::Number;

use crate::comparison::flatten::Leaf;

/// A numeric field within this fraction of the reference magnitude is a close match.
pub const CLOSE_MATCH_TOLERANCE: f64 = 0.10;

/// Per-field verdict for a path present in both records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Exact,
    Close,
    Mismatch,
}

/// Classifies one shared path.
///
/// 1. Equal leaves → `Exact`. Two integers compare exactly; a float on either
///    side compares by `f64` value, so `1000` and `1000.0` are equal.
///    Sequences compare by rendering.
/// 2. Both numeric → `Close` when the relative difference is within
///    `CLOSE_MATCH_TOLERANCE`, otherwise `Mismatch`.
/// 3. Anything else → `Mismatch`.
pub fn classify(generated: &Leaf, reference: &Leaf) -> Verdict {
    if leaves_equal(generated, reference) {
        return Verdict::Exact;
    }

    match (generated.as_number(), reference.as_number()) {
        (Some(g), Some(r)) => match relative_difference(g, r) {
            Some(diff) if diff <= CLOSE_MATCH_TOLERANCE => Verdict::Close,
            _ => Verdict::Mismatch,
        },
        _ => Verdict::Mismatch,
    }
}

/// `|generated - reference| / |reference|`, or `None` when the reference is zero.
pub fn relative_difference(generated: f64, reference: f64) -> Option<f64> {
    if reference == 0.0 {
        return None;
    }
    Some((generated - reference).abs() / reference.abs())
}

/// `count / total`, or 0.0 for an empty denominator.
pub fn ratio(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

fn leaves_equal(a: &Leaf, b: &Leaf) -> bool {
    match (a.as_json_number(), b.as_json_number()) {
        (Some(x), Some(y)) => numbers_equal(x, y),
        _ => a == b,
    }
}

fn numbers_equal(a: &Number, b: &Number) -> bool {
    if a.is_f64() || b.is_f64() {
        return a.as_f64() == b.as_f64();
    }
    match (a.as_i64(), b.as_i64()) {
        (Some(x), Some(y)) => x == y,
        // at least one side is above i64::MAX
        _ => a.as_u64() == b.as_u64(),
    }
}
