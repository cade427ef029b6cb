use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// A single lexical unit as seen by the rewriter
pub trait Token {
    /// Zero-based position of this token in its stream
    fn index(&self) -> usize;

    /// Literal text of the token. The end-of-stream sentinel has none.
    fn text(&self) -> &str;

    /// Whether this token is the end-of-stream sentinel
    fn is_eof(&self) -> bool;

    /// Byte range of the token in the underlying source, when known
    fn span(&self) -> Option<Range<usize>> {
        None
    }
}

/// What kind of token a [`CommonToken`] is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    /// Produced by the lexer
    Default,

    /// Input the lexer skipped (whitespace, comments), kept so the stream
    /// still covers every byte of the source
    Hidden,

    /// End-of-stream sentinel
    Eof,
}

/// Owned token stored by [`crate::CommonTokenStream`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonToken {
    pub index: usize,
    pub kind: TokenKind,
    pub text: String,
    pub span: Range<usize>,
}

impl CommonToken {
    pub fn new(index: usize, kind: TokenKind, text: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            index,
            kind,
            text: text.into(),
            span,
        }
    }

    pub fn eof(index: usize, offset: usize) -> Self {
        Self::new(index, TokenKind::Eof, String::new(), offset..offset)
    }

    pub fn is_hidden(&self) -> bool {
        self.kind == TokenKind::Hidden
    }
}

impl Token for CommonToken {
    fn index(&self) -> usize {
        self.index
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    fn span(&self) -> Option<Range<usize>> {
        Some(self.span.clone())
    }
}

impl fmt::Display for CommonToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = if self.is_eof() {
            "<EOF>".to_string()
        } else {
            self.text
                .replace('\n', "\\n")
                .replace('\r', "\\r")
                .replace('\t', "\\t")
        };
        write!(f, "[@{},{}:{}='{}'", self.index, self.span.start, self.span.end, text)?;
        if self.is_hidden() {
            write!(f, ",hidden")?;
        }
        write!(f, "]")
    }
}
