//! Named, independent operation logs

use crate::operation::Operation;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// An append-only log of operations under one name.
///
/// Deserializing rejects logs whose `seq` values are not their positions or
/// whose replace ranges are inverted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProgramData")]
pub struct Program {
    pub name: String,
    operations: Vec<Operation>,
}

#[derive(Deserialize)]
struct ProgramData {
    name: String,
    operations: Vec<Operation>,
}

impl TryFrom<ProgramData> for Program {
    type Error = String;

    fn try_from(data: ProgramData) -> Result<Self, Self::Error> {
        for (position, op) in data.operations.iter().enumerate() {
            if op.seq() != position {
                return Err(format!(
                    "program '{}': operation {} has seq {}, expected {}",
                    data.name,
                    op,
                    op.seq(),
                    position
                ));
            }
            if let Operation::Replace { from, to, .. } = op {
                if from > to {
                    return Err(format!("program '{}': operation {} has an inverted range", data.name, op));
                }
            }
        }

        Ok(Self {
            name: data.name,
            operations: data.operations,
        })
    }
}

impl Program {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_capacity(name, 0)
    }

    pub fn with_capacity(name: impl Into<String>, capacity: usize) -> Self {
        Self {
            name: name.into(),
            operations: Vec::with_capacity(capacity),
        }
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Sequence number the next appended operation receives
    pub fn next_seq(&self) -> usize {
        self.operations.len()
    }

    pub(crate) fn push(&mut self, op: Operation) {
        debug_assert_eq!(op.seq(), self.next_seq());
        self.operations.push(op);
    }

    /// Keep only operations with `seq < cutoff`
    pub fn truncate(&mut self, cutoff: usize) {
        self.operations.truncate(cutoff);
    }
}

/// All programs of one rewriter, plus the advisory last-rewrite index per name
#[derive(Debug, Default)]
pub struct ProgramRegistry {
    programs: HashMap<String, Program>,
    last_rewrite_token_indexes: HashMap<String, usize>,
    capacity: usize,
}

impl ProgramRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// New programs preallocate room for `capacity` operations
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    pub fn get(&self, name: &str) -> Option<&Program> {
        self.programs.get(name)
    }

    /// Fetch a program, creating it empty on first use
    pub fn get_or_create(&mut self, name: &str) -> &mut Program {
        let capacity = self.capacity;
        self.programs.entry(name.to_string()).or_insert_with(|| {
            debug!(program = %name, "Initializing program");
            Program::with_capacity(name, capacity)
        })
    }

    /// Append `build(seq)` to the named program and return the stored operation
    pub fn append(&mut self, name: &str, build: impl FnOnce(usize) -> Operation) -> &Operation {
        let program = self.get_or_create(name);
        let op = build(program.next_seq());
        debug!(program = %name, op = %op, "Registered operation");
        program.push(op);
        &program.operations[program.operations.len() - 1]
    }

    /// Truncate a program back to operations with `seq < cutoff`.
    ///
    /// Unknown programs are left alone.
    pub fn rollback(&mut self, name: &str, cutoff: usize) {
        if let Some(program) = self.programs.get_mut(name) {
            let before = program.len();
            program.truncate(cutoff);
            debug!(program = %name, cutoff, removed = before - program.len(), "Rolled back program");
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.programs.keys().map(String::as_str)
    }

    pub fn last_rewrite_token_index(&self, name: &str) -> Option<usize> {
        self.last_rewrite_token_indexes.get(name).copied()
    }

    pub fn set_last_rewrite_token_index(&mut self, name: &str, index: usize) {
        self.last_rewrite_token_indexes.insert(name.to_string(), index);
    }
}
