//! Property-based tests for settlement.
//!
//! - Conservation: paid and share columns both sum to the total expense
//! - Zero-sum: balances sum to zero
//! - Simplifier correctness: applying the transfers settles every member
//! - Transfer bound: at most N - 1 transfers for N unsettled members
//! - Determinism: the same snapshot always settles the same way
//! - Validator totality: every draft yields a verdict, and only valid drafts
//!   become records, including drafts whose totals overflow

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use super::engine::SettlementEngine;
use super::validator::{validate, ExpenseDraft};
use crate::types::{ExpenseRecord, MemberName, ParticipantSplit, PayerSplit, Share};

fn member_names(count: usize) -> Vec<MemberName> {
    (0..count).map(|i| format!("M{}", i)).collect()
}

/// Pick a non-empty subset of `members` from a bit mask
fn subset(members: &[MemberName], mask: u32) -> Vec<MemberName> {
    let picked: Vec<MemberName> = members
        .iter()
        .enumerate()
        .filter(|(i, _)| mask & (1 << i) != 0)
        .map(|(_, name)| name.clone())
        .collect();
    if picked.is_empty() {
        vec![members[0].clone()]
    } else {
        picked
    }
}

/// Split `amount` into `parts` whole amounts that sum to it, cutting at
/// positions picked by `seeds`
fn partition(amount: i64, parts: usize, seeds: &[u32]) -> Vec<Decimal> {
    let mut cuts: Vec<i64> = seeds
        .iter()
        .take(parts - 1)
        .map(|seed| i64::from(*seed) % (amount + 1))
        .collect();
    cuts.push(0);
    cuts.push(amount);
    cuts.sort_unstable();
    cuts.windows(2).map(|w| Decimal::from(w[1] - w[0])).collect()
}

/// Strategy to generate a group of 2 to 8 members and up to 30 expenses
/// between them, mixing equal splits with custom payer amounts and custom
/// shares that add up to each amount.
fn group() -> impl Strategy<Value = (Vec<MemberName>, Vec<ExpenseRecord>)> {
    (2usize..=8).prop_flat_map(|count| {
        let expense = (
            1i64..=10_000_000,
            any::<u32>(),
            any::<u32>(),
            any::<bool>(),
            any::<bool>(),
            prop::collection::vec(any::<u32>(), 16),
        );
        prop::collection::vec(expense, 0..30).prop_map(move |raw| {
            let members = member_names(count);
            let expenses = raw
                .into_iter()
                .enumerate()
                .map(|(i, (amount, payer_mask, participant_mask, custom_payers, custom_shares, seeds))| {
                    let payers = subset(&members, payer_mask);
                    let payer_split = if custom_payers && payers.len() > 1 {
                        let paid = partition(amount, payers.len(), &seeds);
                        PayerSplit::Custom(payers.iter().cloned().zip(paid).collect())
                    } else {
                        PayerSplit::Equal
                    };

                    let names = subset(&members, participant_mask);
                    let participants = if custom_shares {
                        let owed = partition(amount, names.len(), &seeds[8..]);
                        ParticipantSplit::Custom(
                            names.into_iter().zip(owed).map(|(name, amount)| Share::new(name, amount)).collect(),
                        )
                    } else {
                        ParticipantSplit::Equal(names)
                    };

                    ExpenseRecord::new(
                        i as u64 + 1,
                        "generated",
                        Decimal::from(amount),
                        payers,
                        payer_split,
                        participants,
                        "",
                    )
                    .expect("generated expense is valid")
                })
                .collect();
            (members, expenses)
        })
    })
}

/// Any representable whole amount, from tiny to near the `Decimal` limit
fn any_amount() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        (0i64..100_000).prop_map(Decimal::from),
        (-(1i128 << 95)..(1i128 << 95)).prop_map(|v| Decimal::from_i128_with_scale(v, 0)),
    ]
}

/// Strategy to generate arbitrary, often invalid, drafts
fn draft() -> impl Strategy<Value = ExpenseDraft> {
    let name = prop_oneof![Just(String::new()), Just("  ".to_string()), "[a-z]{1,8}"];
    let amount = prop::option::of(prop_oneof![
        (-1_000i64..1_000_000).prop_map(|v| Decimal::new(v, 1)),
        any_amount(),
    ]);
    let payers = prop::collection::vec("[A-C]", 0..3);
    let payer_amounts = prop::collection::btree_map("[A-C]", any_amount(), 0..3);
    let custom_payers = any::<bool>();
    let shares = prop::collection::vec(("[A-C]", any_amount()), 0..3);
    let custom_shares = any::<bool>();

    (name, amount, payers, payer_amounts, custom_payers, shares, custom_shares).prop_map(
        |(name, amount, payers, payer_amounts, custom_payers, shares, custom_shares)| {
            let payer_split = if custom_payers {
                PayerSplit::Custom(payer_amounts)
            } else {
                PayerSplit::Equal
            };
            let participants = if custom_shares {
                ParticipantSplit::Custom(
                    shares
                        .into_iter()
                        .map(|(name, amount)| Share::new(name, amount))
                        .collect(),
                )
            } else {
                ParticipantSplit::Equal(shares.into_iter().map(|(name, _)| name).collect())
            };
            ExpenseDraft {
                name,
                amount,
                payers,
                payer_split,
                participants,
            }
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Total paid and total share each equal the sum of expense amounts.
    #[test]
    fn prop_conservation((members, expenses) in group()) {
        let settlement = SettlementEngine::new().settle(&members, &expenses);

        let paid: Decimal = settlement.summaries.iter().map(|s| s.total_paid).sum();
        let share: Decimal = settlement.summaries.iter().map(|s| s.total_share).sum();

        prop_assert_eq!(paid, settlement.total_expense);
        prop_assert_eq!(share, settlement.total_expense);
    }

    /// Balances sum to exactly zero after rounding.
    #[test]
    fn prop_balances_sum_to_zero((members, expenses) in group()) {
        let settlement = SettlementEngine::new().settle(&members, &expenses);

        let sum: Decimal = settlement.summaries.iter().map(|s| s.balance).sum();
        prop_assert_eq!(sum, Decimal::ZERO);
    }

    /// Applying every transfer leaves every member settled.
    #[test]
    fn prop_transfers_settle_everyone((members, expenses) in group()) {
        let settlement = SettlementEngine::new().settle(&members, &expenses);

        let mut balances: BTreeMap<&str, Decimal> = settlement
            .summaries
            .iter()
            .map(|s| (s.name.as_str(), s.balance))
            .collect();

        for tx in &settlement.transactions {
            prop_assert!(tx.amount > Decimal::ZERO);
            prop_assert_ne!(&tx.from, &tx.to);
            *balances.get_mut(tx.from.as_str()).unwrap() += tx.amount;
            *balances.get_mut(tx.to.as_str()).unwrap() -= tx.amount;
        }

        for (name, balance) in balances {
            prop_assert!(balance.abs() < Decimal::ONE, "{} left with {}", name, balance);
        }
    }

    /// At most N - 1 transfers for N members with a non-zero balance.
    #[test]
    fn prop_transfer_count_bound((members, expenses) in group()) {
        let settlement = SettlementEngine::new().settle(&members, &expenses);

        let unsettled = settlement
            .summaries
            .iter()
            .filter(|s| s.balance.abs() >= Decimal::ONE)
            .count();
        prop_assert!(settlement.transactions.len() <= unsettled.saturating_sub(1));
    }

    /// Each rounded share is within one unit of its unrounded value.
    #[test]
    fn prop_shares_stay_near_exact((members, expenses) in group()) {
        let settlement = SettlementEngine::new().settle(&members, &expenses);

        for summary in &settlement.summaries {
            let exact: Decimal = expenses
                .iter()
                .filter_map(|e| match e.participants() {
                    ParticipantSplit::Equal(names) if names.contains(&summary.name) => {
                        Some(e.amount() / Decimal::from(names.len()))
                    }
                    ParticipantSplit::Equal(_) => None,
                    ParticipantSplit::Custom(shares) => shares
                        .iter()
                        .find(|share| share.name == summary.name)
                        .map(|share| share.amount),
                })
                .sum();
            prop_assert!((summary.total_share - exact).abs() < Decimal::ONE);
        }
    }

    /// Settling the same snapshot twice gives identical output.
    #[test]
    fn prop_settlement_is_deterministic((members, expenses) in group()) {
        let engine = SettlementEngine::new();
        prop_assert_eq!(engine.settle(&members, &expenses), engine.settle(&members, &expenses));
    }

    /// Validation never panics, and a draft becomes a record exactly when it
    /// has no issues.
    #[test]
    fn prop_validator_is_total(input in draft()) {
        let issues = validate(&input);
        let built = input.into_record(1, "");

        prop_assert_eq!(issues.is_empty(), built.is_ok());
    }
}
