//! Building a [`CommonTokenStream`] from a `logos` lexer
//!
//! Logos grammars usually skip whitespace and comments. A rewriter that
//! renders only lexed tokens would lose that text, so every gap between two
//! lexed tokens becomes a [`TokenKind::Hidden`] token. An unedited stream
//! therefore concatenates back to the exact source.

use crate::error::{LexError, LexResult};
use crate::stream::CommonTokenStream;
use crate::token::TokenKind;
use logos::Logos;

impl CommonTokenStream {
    /// Lex `source` with the logos token type `T`
    pub fn from_logos<'src, T>(source: &'src str) -> LexResult<Self>
    where
        T: Logos<'src, Source = str>,
        T::Extras: Default,
    {
        let mut stream = CommonTokenStream::empty();
        let mut lexer = T::lexer(source);
        let mut cursor = 0;

        while let Some(result) = lexer.next() {
            let span = lexer.span();
            if let Err(err) = result {
                return Err(LexError::unrecognized(span, lexer.slice(), format!("{:?}", err)));
            }

            if span.start > cursor {
                stream.push(TokenKind::Hidden, &source[cursor..span.start], cursor..span.start);
            }
            stream.push(TokenKind::Default, lexer.slice(), span.clone());
            cursor = span.end;
        }

        if cursor < source.len() {
            stream.push(TokenKind::Hidden, &source[cursor..], cursor..source.len());
        }

        Ok(stream.finish(source.len()))
    }
}
