//! # Conflict Reduction
//!
//! Collapses a program's log to at most one operation per token index.
//!
//! Runs in two passes over a scratch copy of the log, both in `seq` order.
//!
//! ## Replace pass
//! For each replace `R`:
//! - earlier inserts at `R.from` become a prefix of `R`'s text
//! - earlier inserts strictly inside `R` are dropped
//! - `R` itself is dropped when it sits strictly inside an earlier replace
//! - earlier replaces nested in `R` are dropped
//! - earlier deletes overlapping a delete `R` merge into one wider delete
//! - any other overlap with an earlier replace is a conflict
//!
//! ## Insert pass
//! For each surviving insert `I`:
//! - earlier inserts at the same index are appended to `I`'s text, so the
//!   most recently registered text comes first
//! - an earlier replace starting at `I.index` takes `I`'s text as a prefix
//! - an earlier replace covering `I.index` past its start is a conflict
//!
//! The stored log is never touched. Reduction is a pure function of it.

use crate::error::{RewriteError, RewriteResult};
use crate::operation::Operation;
use crate::program::Program;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Reduced operations keyed by anchor index, in ascending order
pub type ReducedProgram = BTreeMap<usize, Operation>;

type Scratch = Vec<Option<Operation>>;

pub fn reduce(program: &Program) -> RewriteResult<ReducedProgram> {
    let mut ops: Scratch = program.operations().iter().cloned().map(Some).collect();

    reduce_replaces(&program.name, &mut ops)?;
    reduce_inserts(&program.name, &mut ops)?;

    let mut reduced = ReducedProgram::new();
    for op in ops.into_iter().flatten() {
        match reduced.entry(op.anchor()) {
            Entry::Vacant(slot) => {
                slot.insert(op);
            }
            Entry::Occupied(slot) => {
                warn!(program = %program.name, index = *slot.key(), "Two operations survived at one index");
                return Err(RewriteError::DuplicateAnchor {
                    program: program.name.clone(),
                    index: *slot.key(),
                });
            }
        }
    }

    debug!(program = %program.name, logged = program.len(), reduced = reduced.len(), "Reduced program");
    Ok(reduced)
}

fn reduce_replaces(program: &str, ops: &mut Scratch) -> RewriteResult<()> {
    for i in 0..ops.len() {
        let (mut from, mut to, mut text, seq) = match &ops[i] {
            Some(Operation::Replace { from, to, text, seq }) => (*from, *to, text.clone(), *seq),
            _ => continue,
        };

        // Checked before absorbing so earlier inserts survive a dropped `R`
        let enclosing = (0..i).find(|&j| {
            matches!(&ops[j], Some(Operation::Replace { from: outer_from, to: outer_to, .. })
                if *outer_from <= from && to <= *outer_to && (*outer_from, *outer_to) != (from, to))
        });
        if let Some(outer) = enclosing {
            debug!(program, seq, outer, "Dropping replace nested in an earlier replace");
            ops[i] = None;
            continue;
        }

        absorb_inserts(program, ops, i, from, to, &mut text);

        for j in 0..i {
            let previous = match &ops[j] {
                Some(op @ Operation::Replace { .. }) => op,
                _ => continue,
            };
            let (prev_from, prev_to) = (previous.anchor(), *previous.token_range().end());

            if prev_from >= from && prev_to <= to {
                debug!(program, seq, dropped = j, "Dropping replace nested in a later replace");
                ops[j] = None;
                continue;
            }

            let disjoint = prev_to < from || prev_from > to;
            if disjoint {
                continue;
            }

            if previous.is_delete() && text.is_none() {
                from = from.min(prev_from);
                to = to.max(prev_to);
                debug!(program, seq, merged = j, from, to, "Merging overlapping deletes");
                ops[j] = None;
                // The wider range may now cover inserts it did not before
                absorb_inserts(program, ops, i, from, to, &mut text);
                continue;
            }

            let op = Operation::replace(from, to, text, seq);
            let previous = previous.clone();
            warn!(program, op = %op, previous = %previous, "Overlapping replace operations");
            return Err(RewriteError::OverlappingReplace {
                program: program.to_string(),
                op,
                previous,
            });
        }

        ops[i] = Some(Operation::replace(from, to, text, seq));
    }

    Ok(())
}

/// Fold inserts registered before `ops[before]` into the replace `from..=to`
fn absorb_inserts(program: &str, ops: &mut Scratch, before: usize, from: usize, to: usize, text: &mut Option<String>) {
    for j in 0..before {
        let index = match &ops[j] {
            Some(Operation::InsertBefore { index, .. }) => *index,
            _ => continue,
        };

        if index == from {
            if let Some(Operation::InsertBefore { text: prefix, .. }) = ops[j].take() {
                debug!(program, insert = j, index, "Folding insert into replace");
                *text = Some(prefix + text.as_deref().unwrap_or(""));
            }
        } else if index > from && index <= to {
            debug!(program, insert = j, index, "Dropping insert inside replaced range");
            ops[j] = None;
        }
    }
}

fn reduce_inserts(program: &str, ops: &mut Scratch) -> RewriteResult<()> {
    for i in 0..ops.len() {
        let (index, mut text, seq) = match &ops[i] {
            Some(Operation::InsertBefore { index, text, seq }) => (*index, text.clone(), *seq),
            _ => continue,
        };

        for j in 0..i {
            let same_index = matches!(&ops[j], Some(Operation::InsertBefore { index: prev, .. }) if *prev == index);
            if !same_index {
                continue;
            }
            if let Some(Operation::InsertBefore { text: prev_text, .. }) = ops[j].take() {
                debug!(program, seq, merged = j, index, "Merging inserts at the same index");
                text.push_str(&prev_text);
            }
        }

        let mut folded = false;
        for j in 0..i {
            let previous = match &ops[j] {
                Some(op @ Operation::Replace { .. }) => op,
                _ => continue,
            };
            let (from, to) = (previous.anchor(), *previous.token_range().end());

            if index == from {
                if let Some(Operation::Replace { text: replaced, .. }) = &mut ops[j] {
                    *replaced = Some(format!("{}{}", text, replaced.as_deref().unwrap_or("")));
                }
                debug!(program, seq, replace = j, index, "Folding insert into earlier replace");
                folded = true;
                break;
            }

            if index > from && index <= to {
                let op = Operation::insert_before(index, text, seq);
                let previous = previous.clone();
                warn!(program, op = %op, previous = %previous, "Insert inside replaced range");
                return Err(RewriteError::InsertWithinReplace {
                    program: program.to_string(),
                    op,
                    previous,
                });
            }
        }

        ops[i] = if folded {
            None
        } else {
            Some(Operation::insert_before(index, text, seq))
        };
    }

    Ok(())
}
