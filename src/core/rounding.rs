//! Whole-unit rounding for aggregated columns
//!
//! Aggregation accumulates exact quotients; this module turns a column of
//! those exact values into whole units exactly once, at the reporting
//! boundary.
//!
//! Rounding every value independently can make a column drift from its own
//! total (three shares of 100000/3 round to 99999). [`round_column`] uses the
//! largest remainder method instead:
//! 1. Round the column total to the nearest unit; this is the target sum
//! 2. Take the floor of every value
//! 3. Hand the missing units to the values with the largest fractional parts
//!
//! Every result is the floor or the ceiling of its exact value, and the
//! results sum to the rounded exact total.

use rust_decimal::{Decimal, RoundingStrategy};

/// Round a single value to whole units, halves away from zero
pub fn round_unit(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Round a column of exact values to whole units, preserving the total
///
/// Ties between equal fractional parts go to the earlier entry, so the
/// result is fully determined by the input order.
pub fn round_column(exact: &[Decimal]) -> Vec<Decimal> {
    let target = round_unit(exact.iter().copied().sum());

    let mut rounded: Vec<Decimal> = exact.iter().map(|value| value.floor()).collect();
    let floor_sum: Decimal = rounded.iter().copied().sum();

    let mut order: Vec<usize> = (0..exact.len()).collect();
    order.sort_by(|&a, &b| {
        let frac_a = exact[a] - rounded[a];
        let frac_b = exact[b] - rounded[b];
        frac_b.cmp(&frac_a).then(a.cmp(&b))
    });

    let mut missing = target - floor_sum;
    for index in order {
        if missing <= Decimal::ZERO {
            break;
        }
        if exact[index] == rounded[index] {
            // Whole values never need a bump; the rest of the order is whole too
            break;
        }
        rounded[index] += Decimal::ONE;
        missing -= Decimal::ONE;
    }

    rounded
}
