//! # Splice Tokens
//!
//! The token source consumed by `splice-rewriter`.
//!
//! The rewriter never lexes anything itself. It only needs to ask a stream for
//! the token at an index and for the literal text between two indices, which is
//! what [`TokenSource`] describes. [`CommonTokenStream`] is the in-memory
//! implementation used by the rest of the workspace: either built from token
//! texts directly or from any `logos` lexer.
//!
//! ```rust
//! use splice_tokens::{CommonTokenStream, TokenSource};
//!
//! let stream = CommonTokenStream::from_texts(["let", " ", "x"]);
//! assert_eq!(stream.token_count(), 4); // trailing EOF
//! assert_eq!(stream.raw_text(0, 3), "let x");
//! ```

pub mod error;
pub mod lexer;
pub mod stream;
pub mod token;

pub use error::{LexError, LexResult};
pub use stream::{CommonTokenStream, TokenSource};
pub use token::{CommonToken, Token, TokenKind};
