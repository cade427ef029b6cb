use crate::token::{CommonToken, Token, TokenKind};
use serde::{Deserialize, Serialize};

/// Read-only, random-access view over a fully materialized token sequence
pub trait TokenSource {
    type Token: Token;

    /// Number of tokens, including the end-of-stream sentinel if present
    fn token_count(&self) -> usize;

    fn token_at(&self, index: usize) -> Option<&Self::Token>;

    /// Verbatim text of the tokens in `start..=stop`.
    ///
    /// Out-of-range bounds are clamped; an empty range yields an empty string.
    fn raw_text(&self, start: usize, stop: usize) -> String;
}

/// In-memory token stream, always terminated by an EOF token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommonTokenStream {
    tokens: Vec<CommonToken>,
}

impl CommonTokenStream {
    /// Build a stream whose tokens have exactly the given texts
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut stream = Self { tokens: Vec::new() };
        let mut offset = 0;
        for text in texts {
            let text = text.into();
            let end = offset + text.len();
            stream.push(TokenKind::Default, text, offset..end);
            offset = end;
        }
        stream.finish(offset)
    }

    pub(crate) fn empty() -> Self {
        Self { tokens: Vec::new() }
    }

    pub(crate) fn push(&mut self, kind: TokenKind, text: impl Into<String>, span: std::ops::Range<usize>) {
        let index = self.tokens.len();
        self.tokens.push(CommonToken::new(index, kind, text, span));
    }

    pub(crate) fn finish(mut self, offset: usize) -> Self {
        let index = self.tokens.len();
        self.tokens.push(CommonToken::eof(index, offset));
        self
    }

    pub fn tokens(&self) -> &[CommonToken] {
        &self.tokens
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommonToken> {
        self.tokens.iter()
    }

    /// Tokens the lexer produced, skipping hidden and EOF tokens
    pub fn visible(&self) -> impl Iterator<Item = &CommonToken> {
        self.tokens.iter().filter(|t| t.kind == TokenKind::Default)
    }
}

impl TokenSource for CommonTokenStream {
    type Token = CommonToken;

    fn token_count(&self) -> usize {
        self.tokens.len()
    }

    fn token_at(&self, index: usize) -> Option<&CommonToken> {
        self.tokens.get(index)
    }

    fn raw_text(&self, start: usize, stop: usize) -> String {
        if self.tokens.is_empty() || start > stop {
            return String::new();
        }
        let stop = stop.min(self.tokens.len() - 1);
        match self.tokens.get(start..=stop) {
            Some(slice) => slice
                .iter()
                .filter(|t| !t.is_eof())
                .map(|t| t.text.as_str())
                .collect(),
            None => String::new(),
        }
    }
}
