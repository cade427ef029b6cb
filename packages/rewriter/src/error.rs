//! Error types for the rewriter

use crate::operation::Operation;
use std::ops::RangeInclusive;
use thiserror::Error;

pub type RewriteResult<T> = Result<T, RewriteError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RewriteError {
    /// Rejected at registration: `from > to` or `to` past the last token
    #[error("replace: range invalid: {from}..{to} (size={size}) in program '{program}'")]
    InvalidRange {
        program: String,
        from: usize,
        to: usize,
        size: usize,
    },

    /// Rejected at registration: insert past the end of the stream
    #[error("insert: index invalid: {index} (size={size}) in program '{program}'")]
    InvalidIndex {
        program: String,
        index: usize,
        size: usize,
    },

    #[error("replace op boundaries of {op} overlap with previous {previous} in program '{program}'")]
    OverlappingReplace {
        program: String,
        op: Operation,
        previous: Operation,
    },

    #[error("insert op {op} within boundaries of previous {previous} in program '{program}'")]
    InsertWithinReplace {
        program: String,
        op: Operation,
        previous: Operation,
    },

    /// Reduction left two operations on one index. Never expected.
    #[error("internal error: more than one operation at token index {index} in program '{program}'")]
    DuplicateAnchor { program: String, index: usize },
}

impl RewriteError {
    pub fn program(&self) -> &str {
        match self {
            RewriteError::InvalidRange { program, .. }
            | RewriteError::InvalidIndex { program, .. }
            | RewriteError::OverlappingReplace { program, .. }
            | RewriteError::InsertWithinReplace { program, .. }
            | RewriteError::DuplicateAnchor { program, .. } => program,
        }
    }

    /// Conflicts are only found while reducing a log for rendering
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            RewriteError::OverlappingReplace { .. } | RewriteError::InsertWithinReplace { .. }
        )
    }

    /// Token ranges the error refers to, offending operation first
    pub fn token_ranges(&self) -> Vec<RangeInclusive<usize>> {
        match self {
            RewriteError::InvalidRange { from, to, .. } => vec![*from..=*to],
            RewriteError::InvalidIndex { index, .. } | RewriteError::DuplicateAnchor { index, .. } => {
                vec![*index..=*index]
            }
            RewriteError::OverlappingReplace { op, previous, .. }
            | RewriteError::InsertWithinReplace { op, previous, .. } => {
                vec![op.token_range(), previous.token_range()]
            }
        }
    }
}

/// Pretty-print an error against the source the tokens were lexed from
#[cfg(feature = "pretty-errors")]
pub fn format_error<S>(source: &str, filename: &str, tokens: &S, error: &RewriteError) -> String
where
    S: splice_tokens::TokenSource + ?Sized,
{
    use ariadne::{Color, Label, Report, ReportKind, Source};
    use splice_tokens::Token;

    let byte_span = |range: &RangeInclusive<usize>| {
        let start = tokens.token_at(*range.start()).and_then(|t| t.span());
        let end = tokens.token_at(*range.end()).and_then(|t| t.span());
        match (start, end) {
            (Some(start), Some(end)) => start.start..end.end.max(start.start),
            (Some(start), None) => start.start..source.len(),
            _ => source.len()..source.len(),
        }
    };

    let ranges = error.token_ranges();
    let messages = match error {
        RewriteError::OverlappingReplace { op, previous, .. }
        | RewriteError::InsertWithinReplace { op, previous, .. } => {
            vec![op.to_string(), format!("previously registered {}", previous)]
        }
        RewriteError::InvalidRange { .. } | RewriteError::InvalidIndex { .. } => {
            vec!["outside of the token stream".to_string()]
        }
        RewriteError::DuplicateAnchor { .. } => vec!["anchored here".to_string()],
    };

    let primary = ranges.first().map(&byte_span).unwrap_or(0..0);
    let colors = [Color::Red, Color::Yellow];

    let mut report = Report::build(ReportKind::Error, filename, primary.start).with_message(error.to_string());
    for ((range, message), color) in ranges.iter().zip(messages).zip(colors) {
        report = report.with_label(
            Label::new((filename, byte_span(range)))
                .with_color(color)
                .with_message(message),
        );
    }

    let mut output = Vec::new();
    if report
        .finish()
        .write((filename, Source::from(source)), &mut output)
        .is_err()
    {
        return error.to_string();
    }

    String::from_utf8(output).unwrap_or_else(|_| error.to_string())
}
