//! Error types for building token streams

use std::ops::Range;
use thiserror::Error;

pub type LexResult<T> = Result<T, LexError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    #[error("Unrecognized input at {span:?}: {text:?} ({message})")]
    Unrecognized {
        span: Range<usize>,
        text: String,
        message: String,
    },
}

impl LexError {
    pub fn unrecognized(span: Range<usize>, text: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Unrecognized {
            span,
            text: text.into(),
            message: message.into(),
        }
    }

    pub fn span(&self) -> Range<usize> {
        match self {
            LexError::Unrecognized { span, .. } => span.clone(),
        }
    }
}
