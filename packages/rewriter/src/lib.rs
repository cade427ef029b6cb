//! # Splice Rewriter
//!
//! Non-destructive editing of a token stream.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ TokenStreamRewriter: registration API       │
//! │  - insert / replace / delete per program    │
//! │  - range checks at registration time        │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ ProgramRegistry: name → append-only log     │
//! │  - rollback truncates by sequence number    │
//! └─────────────────────────────────────────────┘
//!                     ↓  (on every render)
//! ┌─────────────────────────────────────────────┐
//! │ reduce: log → one operation per index       │
//! │  - merges exact cases, rejects overlaps     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ render: walk tokens, apply reduced ops      │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Tokens are never mutated**: edits are instructions, not changes
//! 2. **Programs are isolated**: no operation crosses a program boundary
//! 3. **Fail late, fail loudly**: structural mistakes are rejected when
//!    registered, overlapping edits are rejected when rendered
//! 4. **Rendering is pure**: same log, same text
//!
//! ## Usage
//!
//! ```rust
//! use splice_rewriter::TokenStreamRewriter;
//! use splice_tokens::CommonTokenStream;
//!
//! let tokens = CommonTokenStream::from_texts(["a", "b", "c", "d"]);
//! let mut rewriter = TokenStreamRewriter::new(&tokens);
//!
//! rewriter.replace(1, 2, "X")?;
//! assert_eq!(rewriter.text()?, "aXd");
//!
//! // A separate program sees none of the default program's edits
//! rewriter.delete_in("strip", 0, 0)?;
//! assert_eq!(rewriter.text_in("strip", 0..=4)?, "bcd");
//! # Ok::<(), splice_rewriter::RewriteError>(())
//! ```

mod config;
mod error;
mod operation;
mod program;
mod reducer;
mod renderer;
mod rewriter;

#[cfg(test)]
mod tests_rewriter;

pub use config::RewriterConfig;
pub use error::{RewriteError, RewriteResult};
pub use operation::Operation;
pub use program::{Program, ProgramRegistry};
pub use reducer::{reduce, ReducedProgram};
pub use renderer::render;
pub use rewriter::{TokenIndex, TokenStreamRewriter};

#[cfg(feature = "pretty-errors")]
pub use error::format_error;
