//! Post-construction simplification of the driver body
//!
//! Passes run in a fixed order: nops, guards that skip nothing, gotos
//! that jump to themselves, then label pruning. Running the whole
//! sequence twice changes nothing.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::features::driver_builder::domain::{DriverProcedure, Label, Stmt, Unit};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CleanupReport {
    pub nops_removed: usize,
    pub empty_guards_removed: usize,
    pub self_loops_removed: usize,
}

pub fn cleanup(procedure: &mut DriverProcedure) -> CleanupReport {
    let units = &mut procedure.units;
    let report = CleanupReport {
        nops_removed: eliminate_nops(units),
        empty_guards_removed: eliminate_empty_guards(units),
        self_loops_removed: eliminate_self_loops(units),
    };
    prune_labels(units);
    debug!(
        "Driver cleanup: {} nops, {} empty guards, {} self-loops removed",
        report.nops_removed, report.empty_guards_removed, report.self_loops_removed
    );
    report
}

/// Drop `nop` units, handing their labels to the following unit
pub fn eliminate_nops(units: &mut Vec<Unit>) -> usize {
    remove_where(units, |units, i| {
        matches!(units[i].stmt, Stmt::Nop) && i + 1 < units.len()
    })
}

/// Drop guards whose skip target is the very next unit
pub fn eliminate_empty_guards(units: &mut Vec<Unit>) -> usize {
    remove_where(units, |units, i| match &units[i].stmt {
        Stmt::Guard { skip_to, .. } => {
            i + 1 < units.len() && units[i + 1].label == Some(*skip_to)
        }
        _ => false,
    })
}

/// Drop `goto` units that jump to their own label
pub fn eliminate_self_loops(units: &mut Vec<Unit>) -> usize {
    remove_where(units, |units, i| match &units[i].stmt {
        Stmt::Goto(target) => units[i].label == Some(*target) && i + 1 < units.len(),
        _ => false,
    })
}

/// Clear labels nothing jumps to and renumber the rest in order
pub fn prune_labels(units: &mut [Unit]) {
    let referenced: FxHashSet<Label> = units.iter().filter_map(|u| u.stmt.jump_target()).collect();
    let mut renumbered: FxHashMap<Label, Label> = FxHashMap::default();

    for unit in units.iter_mut() {
        unit.label = match unit.label {
            Some(label) if referenced.contains(&label) => {
                let next = Label(renumbered.len() as u32 + 1);
                Some(*renumbered.entry(label).or_insert(next))
            }
            _ => None,
        };
    }

    for unit in units.iter_mut() {
        match &mut unit.stmt {
            Stmt::Guard { skip_to, .. } => {
                if let Some(new) = renumbered.get(skip_to) {
                    *skip_to = *new;
                }
            }
            Stmt::Goto(target) => {
                if let Some(new) = renumbered.get(target) {
                    *target = *new;
                }
            }
            _ => {}
        }
    }
}

fn remove_where(units: &mut Vec<Unit>, pred: impl Fn(&[Unit], usize) -> bool) -> usize {
    let mut removed = 0;
    let mut i = 0;
    while i < units.len() {
        if pred(units, i) {
            remove_unit(units, i);
            removed += 1;
        } else {
            i += 1;
        }
    }
    removed
}

/// Remove unit `index`; jumps to it land on its successor instead
fn remove_unit(units: &mut Vec<Unit>, index: usize) {
    let removed = units.remove(index);
    let Some(label) = removed.label else {
        return;
    };
    let Some(next) = units.get_mut(index) else {
        return;
    };
    match next.label {
        None => next.label = Some(label),
        Some(existing) => {
            for unit in units.iter_mut() {
                unit.stmt.retarget(label, existing);
            }
        }
    }
}
