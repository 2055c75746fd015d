use crate::core::ExpenseDraft;
use crate::io::ReportKind;
use crate::strategy::ConcurrencyConfig;
use crate::types::{ExpenseId, MemberName, ParticipantSplit, PayerSplit, Share};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::str::FromStr;

/// Split group expenses and work out who pays whom
#[derive(Parser, Debug)]
#[command(name = "settlement-engine")]
#[command(about = "Split group expenses and work out who pays whom", long_about = None)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Settle one or more groups and print a report
    Settle(SettleArgs),

    /// Add a member to a group
    AddMember {
        /// Group snapshot file (created if missing)
        #[arg(value_name = "SNAPSHOT")]
        snapshot: PathBuf,

        /// Member name, unique ignoring case
        #[arg(value_name = "NAME")]
        name: String,
    },

    /// Remove a member from a group and from every expense
    RemoveMember {
        #[arg(value_name = "SNAPSHOT")]
        snapshot: PathBuf,

        #[arg(value_name = "NAME")]
        name: String,
    },

    /// Record a new expense
    AddExpense {
        #[arg(value_name = "SNAPSHOT")]
        snapshot: PathBuf,

        #[command(flatten)]
        expense: ExpenseArgs,
    },

    /// Replace an existing expense, keeping its id and date
    UpdateExpense {
        #[arg(value_name = "SNAPSHOT")]
        snapshot: PathBuf,

        #[arg(value_name = "ID")]
        id: ExpenseId,

        #[command(flatten)]
        expense: ExpenseArgs,
    },

    /// Delete an expense by id
    RemoveExpense {
        #[arg(value_name = "SNAPSHOT")]
        snapshot: PathBuf,

        #[arg(value_name = "ID")]
        id: ExpenseId,
    },
}

/// Arguments of the `settle` subcommand
#[derive(Args, Debug)]
pub struct SettleArgs {
    /// Group snapshot files; each file is one group named after its file stem
    #[arg(value_name = "SNAPSHOT", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Processing strategy to use for settling groups
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "async",
        help = "Processing strategy: 'sync' for sequential or 'async' for concurrent"
    )]
    pub strategy: StrategyType,

    /// Maximum number of groups settled concurrently (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Maximum number of groups settled concurrently (default: CPU cores)"
    )]
    pub max_concurrent: Option<usize>,

    /// Report to print
    #[arg(long = "report", value_name = "REPORT", value_enum, default_value_t = ReportKind::Transactions)]
    pub report: ReportKind,
}

/// Available processing strategies for batch settlement
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

impl SettleArgs {
    /// Create a ConcurrencyConfig from CLI arguments
    ///
    /// Falls back to the default when `--max-concurrent` is absent; an
    /// explicit zero also falls back, with a warning.
    pub fn to_concurrency_config(&self) -> ConcurrencyConfig {
        match self.max_concurrent {
            Some(max_concurrent) => ConcurrencyConfig::new(max_concurrent),
            None => ConcurrencyConfig::default(),
        }
    }
}

/// Expense fields shared by `add-expense` and `update-expense`
///
/// Every field is optional at the parser level so the validator can report
/// all problems with the expense at once.
#[derive(Args, Debug, Clone, Default)]
pub struct ExpenseArgs {
    /// Expense description
    #[arg(long = "name", value_name = "NAME")]
    pub name: Option<String>,

    /// Total amount
    #[arg(long = "amount", value_name = "AMOUNT", allow_negative_numbers = true)]
    pub amount: Option<Decimal>,

    /// A member who paid (repeatable)
    #[arg(long = "payer", value_name = "MEMBER")]
    pub payers: Vec<MemberName>,

    /// Custom amount paid by one payer, as MEMBER=AMOUNT (repeatable)
    #[arg(long = "payer-amount", value_name = "MEMBER=AMOUNT", value_parser = parse_name_amount)]
    pub payer_amounts: Vec<(MemberName, Decimal)>,

    /// A member sharing the cost equally (repeatable)
    #[arg(long = "participant", value_name = "MEMBER", conflicts_with = "shares")]
    pub participants: Vec<MemberName>,

    /// Custom share of one participant, as MEMBER=AMOUNT (repeatable)
    #[arg(long = "share", value_name = "MEMBER=AMOUNT", value_parser = parse_name_amount)]
    pub shares: Vec<(MemberName, Decimal)>,
}

impl ExpenseArgs {
    /// Build an expense draft from the parsed flags
    ///
    /// Any `--payer-amount` selects a custom payer split; any `--share`
    /// selects a custom participant split.
    pub fn to_draft(&self) -> ExpenseDraft {
        let payer_split = if self.payer_amounts.is_empty() {
            PayerSplit::Equal
        } else {
            PayerSplit::Custom(self.payer_amounts.iter().cloned().collect())
        };

        let participants = if self.shares.is_empty() {
            ParticipantSplit::Equal(self.participants.clone())
        } else {
            ParticipantSplit::Custom(
                self.shares
                    .iter()
                    .map(|(name, amount)| Share::new(name.clone(), *amount))
                    .collect(),
            )
        };

        ExpenseDraft {
            name: self.name.clone().unwrap_or_default(),
            amount: self.amount,
            payers: self.payers.clone(),
            payer_split,
            participants,
        }
    }
}

/// Parse a `MEMBER=AMOUNT` pair
fn parse_name_amount(value: &str) -> Result<(MemberName, Decimal), String> {
    let (name, amount) = value
        .split_once('=')
        .ok_or_else(|| format!("expected MEMBER=AMOUNT, got '{}'", value))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing member name in '{}'", value));
    }

    let amount = Decimal::from_str(amount.trim())
        .map_err(|_| format!("invalid amount '{}' for {}", amount.trim(), name))?;

    Ok((name.to_string(), amount))
}
