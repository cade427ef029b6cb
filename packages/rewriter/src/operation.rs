//! # Rewrite Operations
//!
//! A program's log is a sequence of [`Operation`]s. Each one records a single
//! edit intent against the original token indices; nothing is applied until
//! the log is reduced and rendered.
//!
//! - `InsertBefore` puts text in front of the token at `index`.
//! - `Replace` swaps tokens `from..=to` for `text`. A `None` text is a delete.
//!
//! `seq` is the position of the operation in its program's log and is the
//! only ordering used when two operations interact.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    InsertBefore {
        index: usize,
        text: String,
        seq: usize,
    },

    Replace {
        from: usize,
        to: usize,
        text: Option<String>,
        seq: usize,
    },
}

impl Operation {
    pub fn insert_before(index: usize, text: impl Into<String>, seq: usize) -> Self {
        Operation::InsertBefore {
            index,
            text: text.into(),
            seq,
        }
    }

    pub fn replace(from: usize, to: usize, text: Option<String>, seq: usize) -> Self {
        debug_assert!(from <= to);
        Operation::Replace { from, to, text, seq }
    }

    /// Token index this operation is keyed by once reduced
    pub fn anchor(&self) -> usize {
        match self {
            Operation::InsertBefore { index, .. } => *index,
            Operation::Replace { from, .. } => *from,
        }
    }

    pub fn seq(&self) -> usize {
        match self {
            Operation::InsertBefore { seq, .. } | Operation::Replace { seq, .. } => *seq,
        }
    }

    /// Tokens this operation touches
    pub fn token_range(&self) -> RangeInclusive<usize> {
        match self {
            Operation::InsertBefore { index, .. } => *index..=*index,
            Operation::Replace { from, to, .. } => *from..=*to,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Operation::InsertBefore { text, .. } => Some(text),
            Operation::Replace { text, .. } => text.as_deref(),
        }
    }

    pub fn is_delete(&self) -> bool {
        matches!(self, Operation::Replace { text: None, .. })
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::InsertBefore { index, text, .. } => {
                write!(f, "<InsertBeforeOp@{}:{:?}>", index, text)
            }
            Operation::Replace { from, to, text: None, .. } => {
                write!(f, "<DeleteOp@{}..{}>", from, to)
            }
            Operation::Replace { from, to, text: Some(text), .. } => {
                write!(f, "<ReplaceOp@{}..{}:{:?}>", from, to, text)
            }
        }
    }
}
