//! Debt simplification
//!
//! Converts net balances into a short list of transfers that settle them.
//!
//! # Algorithm
//!
//! Greedy pairing over the members with a non-trivial balance:
//! 1. Pick the first debtor and the first creditor in member order
//! 2. Transfer the smaller of the two magnitudes from debtor to creditor
//! 3. Drop whichever party is now settled (or both) and repeat
//!
//! Every round settles at least one party, so at most `N - 1` transfers are
//! produced for `N` unsettled members whose balances sum to zero.
//!
//! # Limitations
//!
//! The result is not guaranteed to have the fewest possible transfers.
//! Finding that minimum means partitioning balances into zero-sum subsets,
//! which is a subset-sum search; the greedy pass trades that optimum for a
//! simple, always-terminating loop.

use crate::core::rounding::round_unit;
use crate::types::{PersonSummary, Transaction};
use rust_decimal::Decimal;
use tracing::debug;

/// Smallest balance magnitude still considered unsettled (one minor unit)
pub const SETTLEMENT_THRESHOLD: Decimal = Decimal::ONE;

/// Produce the transfers that zero out the given balances
///
/// Members are paired in the order given, so callers control the tie-break
/// by the order of `summaries`. Balances whose magnitude is below
/// [`SETTLEMENT_THRESHOLD`] are treated as settled. If the balances do not
/// sum to zero the leftover side is simply not paired.
pub fn simplify(summaries: &[PersonSummary]) -> Vec<Transaction> {
    let mut open: Vec<(&str, Decimal)> = summaries
        .iter()
        .filter(|s| s.balance.abs() >= SETTLEMENT_THRESHOLD)
        .map(|s| (s.name.as_str(), s.balance))
        .collect();

    let mut transactions = Vec::with_capacity(open.len().saturating_sub(1));

    loop {
        let debtor = open.iter().position(|(_, balance)| *balance < Decimal::ZERO);
        let creditor = open.iter().position(|(_, balance)| *balance > Decimal::ZERO);

        let (Some(d), Some(c)) = (debtor, creditor) else {
            break;
        };

        let amount = open[d].1.abs().min(open[c].1);

        transactions.push(Transaction {
            from: open[d].0.to_string(),
            to: open[c].0.to_string(),
            amount: round_unit(amount),
        });

        open[d].1 += amount;
        open[c].1 -= amount;

        open.retain(|(_, balance)| balance.abs() >= SETTLEMENT_THRESHOLD);
    }

    debug!(
        transactions = transactions.len(),
        unsettled = open.len(),
        "simplified balances"
    );

    transactions
}
