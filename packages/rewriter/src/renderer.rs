//! Walks the token stream and applies a reduced program

use crate::operation::Operation;
use crate::reducer::ReducedProgram;
use splice_tokens::{Token, TokenSource};
use std::ops::RangeInclusive;

/// Render tokens in `range`, consuming the reduced operations.
///
/// The stop bound is clamped to the last token. When the walk reaches the end
/// of the stream, inserts anchored past the last token are emitted as well.
pub fn render<S>(tokens: &S, range: RangeInclusive<usize>, mut ops: ReducedProgram) -> String
where
    S: TokenSource + ?Sized,
{
    let count = tokens.token_count();
    let last = count.checked_sub(1);
    let stop = last.map(|last| (*range.end()).min(last));
    let mut buf = String::new();

    if let Some(stop) = stop {
        let mut i = *range.start();
        while i <= stop {
            let Some(token) = tokens.token_at(i) else {
                break;
            };

            match ops.remove(&i) {
                None => {
                    if !token.is_eof() {
                        buf.push_str(token.text());
                    }
                    i += 1;
                }
                Some(Operation::InsertBefore { text, .. }) => {
                    buf.push_str(&text);
                    if !token.is_eof() {
                        buf.push_str(token.text());
                    }
                    i += 1;
                }
                Some(Operation::Replace { to, text, .. }) => {
                    if let Some(text) = text {
                        buf.push_str(&text);
                    }
                    i = to + 1;
                }
            }
        }
    }

    // Inserts registered after the final token
    if stop == last {
        for (_, op) in ops.range(count..) {
            if let Some(text) = op.text() {
                buf.push_str(text);
            }
        }
    }

    buf
}
