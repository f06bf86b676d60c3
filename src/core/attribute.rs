use crate::models::AttributeValue;

/// Units of absolute difference that exhaust full numeric credit
const NUMERIC_DECAY_SPAN: f64 = 10.0;

/// One attribute's share of a candidate's weighted score
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Contribution {
    pub achieved: f64,
    pub max_possible: f64,
}

impl Contribution {
    /// An attribute the candidate does not carry: neither credited nor counted
    pub const EXCLUDED: Contribution = Contribution {
        achieved: 0.0,
        max_possible: 0.0,
    };
}

/// Score a single attribute against its desired value
///
/// Dispatch is on the shape of the candidate's value:
/// - numbers decay linearly, losing 10% of the weight per unit of difference
/// - lists score the fraction of desired elements present, or membership
///   when the desired value is a single scalar
/// - everything else, including mismatched shapes, is exact equality
///
/// Numeric similarity is not floored at zero: a difference of more than ten
/// units yields a negative contribution.
pub fn score_attribute(
    candidate: Option<&AttributeValue>,
    desired: &AttributeValue,
    weight: f64,
) -> Contribution {
    let Some(have) = candidate else {
        return Contribution::EXCLUDED;
    };

    let achieved = match (have, desired) {
        (AttributeValue::Number(have), AttributeValue::Number(want)) => {
            weight * numeric_similarity(*have, *want)
        }
        (AttributeValue::List(have), AttributeValue::List(want)) => {
            weight * list_overlap(have, want)
        }
        (AttributeValue::List(have), want) => credit(have.contains(want), weight),
        (have, want) => credit(have == want, weight),
    };

    Contribution {
        achieved,
        max_possible: weight,
    }
}

/// `1 - |diff| / 10`, unbounded below
#[inline]
pub fn numeric_similarity(have: f64, want: f64) -> f64 {
    1.0 - (have - want).abs() / NUMERIC_DECAY_SPAN
}

/// Fraction of `want` elements found in `have`
///
/// Duplicates in `want` are counted individually; an empty `want` scores 0.
#[inline]
pub fn list_overlap(have: &[AttributeValue], want: &[AttributeValue]) -> f64 {
    let overlap = want.iter().filter(|v| have.contains(v)).count();
    overlap as f64 / want.len().max(1) as f64
}

#[inline]
fn credit(hit: bool, weight: f64) -> f64 {
    if hit {
        weight
    } else {
        0.0
    }
}
