//! Subcommand execution
//!
//! Editing commands load the group snapshot into a [`MemoryStore`], apply one
//! mutation and save the snapshot back. A missing snapshot file is treated
//! as an empty group and created on save; a failed mutation leaves the file
//! untouched.

use crate::cli::args::{Command, SettleArgs};
use crate::core::{MemoryStore, RecordStore};
use crate::io::{read_snapshot_or_default, save_snapshot};
use crate::strategy::create_strategy;
use crate::types::SplitError;
use std::io::Write;
use std::path::Path;

/// Run a parsed subcommand, writing any report or result to `output`
pub fn run(command: Command, output: &mut dyn Write) -> Result<(), SplitError> {
    match command {
        Command::Settle(args) => settle(&args, output),
        Command::AddMember { snapshot, name } => edit(&snapshot, |store| store.add_member(&name)),
        Command::RemoveMember { snapshot, name } => {
            let dropped = edit(&snapshot, |store| store.remove_member(&name))?;
            for id in dropped {
                writeln!(output, "Dropped expense {}", id)?;
            }
            Ok(())
        }
        Command::AddExpense { snapshot, expense } => {
            let id = edit(&snapshot, |store| store.add_expense(expense.to_draft()))?;
            writeln!(output, "{}", id)?;
            Ok(())
        }
        Command::UpdateExpense {
            snapshot,
            id,
            expense,
        } => edit(&snapshot, |store| store.update_expense(id, expense.to_draft())),
        Command::RemoveExpense { snapshot, id } => {
            edit(&snapshot, |store| store.remove_by_id(id)).map(|_| ())
        }
    }
}

fn settle(args: &SettleArgs, output: &mut dyn Write) -> Result<(), SplitError> {
    let strategy = create_strategy(args.strategy, Some(args.to_concurrency_config()));
    strategy.process(&args.inputs, args.report, output)
}

/// Load, mutate and save one snapshot file
fn edit<T>(
    path: &Path,
    mutate: impl FnOnce(&mut MemoryStore) -> Result<T, SplitError>,
) -> Result<T, SplitError> {
    let mut store = MemoryStore::from_snapshot(read_snapshot_or_default(path)?);
    let result = mutate(&mut store)?;
    save_snapshot(path, &store.snapshot())?;
    Ok(result)
}
