//! # Token Stream Rewriter
//!
//! Entry point for registering edits and rendering them.
//!
//! Every registration call comes in two forms: `*_in` takes the program name,
//! the plain form uses the configured default program. Positions are anything
//! implementing [`TokenIndex`], so both `3` and `&token` work.
//!
//! ```rust
//! use splice_rewriter::TokenStreamRewriter;
//! use splice_tokens::CommonTokenStream;
//!
//! let tokens = CommonTokenStream::from_texts(["a", "b", "c", "d"]);
//! let mut rewriter = TokenStreamRewriter::new(&tokens);
//!
//! rewriter.insert_before(1, "P")?;
//! rewriter.insert_before(1, "Q")?;
//! assert_eq!(rewriter.text()?, "aQPbcd");
//! # Ok::<(), splice_rewriter::RewriteError>(())
//! ```

use crate::config::RewriterConfig;
use crate::error::{RewriteError, RewriteResult};
use crate::operation::Operation;
use crate::program::{Program, ProgramRegistry};
use crate::reducer::reduce;
use crate::renderer::render;
use splice_tokens::{Token, TokenSource};
use std::ops::RangeInclusive;
use tracing::instrument;

/// Something that names a token position
pub trait TokenIndex {
    fn token_index(&self) -> usize;
}

impl TokenIndex for usize {
    fn token_index(&self) -> usize {
        *self
    }
}

impl<T: Token + ?Sized> TokenIndex for &T {
    fn token_index(&self) -> usize {
        (**self).index()
    }
}

/// Records edits against a borrowed token stream and renders them on demand.
///
/// The stream is never modified. Each named program is an independent log;
/// rendering reduces the chosen program from scratch every time.
pub struct TokenStreamRewriter<'a, S: TokenSource + ?Sized> {
    tokens: &'a S,
    programs: ProgramRegistry,
    config: RewriterConfig,
}

impl<'a, S: TokenSource + ?Sized> TokenStreamRewriter<'a, S> {
    pub fn new(tokens: &'a S) -> Self {
        Self::with_config(tokens, RewriterConfig::default())
    }

    pub fn with_config(tokens: &'a S, config: RewriterConfig) -> Self {
        let mut programs = ProgramRegistry::with_capacity(config.program_capacity);
        programs.get_or_create(&config.default_program);
        Self {
            tokens,
            programs,
            config,
        }
    }

    pub fn token_stream(&self) -> &'a S {
        self.tokens
    }

    pub fn config(&self) -> &RewriterConfig {
        &self.config
    }

    pub fn default_program(&self) -> &str {
        &self.config.default_program
    }

    pub fn program(&self, name: &str) -> Option<&Program> {
        self.programs.get(name)
    }

    pub fn program_names(&self) -> impl Iterator<Item = &str> {
        self.programs.names()
    }

    // -- Registration --

    pub fn insert_before_in(&mut self, program: &str, at: impl TokenIndex, text: impl Into<String>) -> RewriteResult<()> {
        let index = at.token_index();
        let size = self.tokens.token_count();
        if index > size {
            return Err(RewriteError::InvalidIndex {
                program: program.to_string(),
                index,
                size,
            });
        }

        let text = text.into();
        self.programs.append(program, |seq| Operation::insert_before(index, text, seq));
        Ok(())
    }

    pub fn insert_before(&mut self, at: impl TokenIndex, text: impl Into<String>) -> RewriteResult<()> {
        let program = self.config.default_program.clone();
        self.insert_before_in(&program, at, text)
    }

    pub fn insert_after_in(&mut self, program: &str, at: impl TokenIndex, text: impl Into<String>) -> RewriteResult<()> {
        let index = at.token_index();
        match index.checked_add(1) {
            Some(next) => self.insert_before_in(program, next, text),
            None => Err(RewriteError::InvalidIndex {
                program: program.to_string(),
                index,
                size: self.tokens.token_count(),
            }),
        }
    }

    pub fn insert_after(&mut self, at: impl TokenIndex, text: impl Into<String>) -> RewriteResult<()> {
        let program = self.config.default_program.clone();
        self.insert_after_in(&program, at, text)
    }

    pub fn replace_in(
        &mut self,
        program: &str,
        from: impl TokenIndex,
        to: impl TokenIndex,
        text: impl Into<String>,
    ) -> RewriteResult<()> {
        self.push_replace(program, from.token_index(), to.token_index(), Some(text.into()))
    }

    pub fn replace(&mut self, from: impl TokenIndex, to: impl TokenIndex, text: impl Into<String>) -> RewriteResult<()> {
        let program = self.config.default_program.clone();
        self.replace_in(&program, from, to, text)
    }

    pub fn replace_token(&mut self, at: impl TokenIndex, text: impl Into<String>) -> RewriteResult<()> {
        let index = at.token_index();
        self.replace(index, index, text)
    }

    pub fn delete_in(&mut self, program: &str, from: impl TokenIndex, to: impl TokenIndex) -> RewriteResult<()> {
        self.push_replace(program, from.token_index(), to.token_index(), None)
    }

    pub fn delete(&mut self, from: impl TokenIndex, to: impl TokenIndex) -> RewriteResult<()> {
        let program = self.config.default_program.clone();
        self.delete_in(&program, from, to)
    }

    pub fn delete_token(&mut self, at: impl TokenIndex) -> RewriteResult<()> {
        let index = at.token_index();
        self.delete(index, index)
    }

    fn push_replace(&mut self, program: &str, from: usize, to: usize, text: Option<String>) -> RewriteResult<()> {
        let size = self.tokens.token_count();
        if from > to || to >= size {
            return Err(RewriteError::InvalidRange {
                program: program.to_string(),
                from,
                to,
                size,
            });
        }

        self.programs.append(program, |seq| Operation::replace(from, to, text, seq));
        Ok(())
    }

    // -- Session control --

    /// Drop every operation of `program` with `seq >= cutoff`
    pub fn rollback_in(&mut self, program: &str, cutoff: usize) {
        self.programs.rollback(program, cutoff);
    }

    pub fn rollback(&mut self, cutoff: usize) {
        let program = self.config.default_program.clone();
        self.rollback_in(&program, cutoff);
    }

    pub fn delete_program_in(&mut self, program: &str) {
        self.rollback_in(program, 0);
    }

    pub fn delete_program(&mut self) {
        let program = self.config.default_program.clone();
        self.delete_program_in(&program);
    }

    /// Advisory index a caller recorded for `program`, if any
    pub fn last_rewrite_token_index_in(&self, program: &str) -> Option<usize> {
        self.programs.last_rewrite_token_index(program)
    }

    pub fn last_rewrite_token_index(&self) -> Option<usize> {
        self.last_rewrite_token_index_in(&self.config.default_program)
    }

    pub fn set_last_rewrite_token_index_in(&mut self, program: &str, index: usize) {
        self.programs.set_last_rewrite_token_index(program, index);
    }

    pub fn set_last_rewrite_token_index(&mut self, index: usize) {
        let program = self.config.default_program.clone();
        self.set_last_rewrite_token_index_in(&program, index);
    }

    // -- Rendering --

    /// Whole stream, default program
    pub fn text(&self) -> RewriteResult<String> {
        self.text_in(&self.config.default_program, self.full_range())
    }

    /// Part of the stream, default program
    pub fn text_range(&self, range: RangeInclusive<usize>) -> RewriteResult<String> {
        self.text_in(&self.config.default_program, range)
    }

    /// Render `range` with the edits of `program` applied.
    ///
    /// Conflicts in the log fail the render and leave the log as it was.
    #[instrument(level = "debug", skip(self))]
    pub fn text_in(&self, program: &str, range: RangeInclusive<usize>) -> RewriteResult<String> {
        match self.programs.get(program) {
            Some(log) if !log.is_empty() => {
                let reduced = reduce(log)?;
                Ok(render(self.tokens, range, reduced))
            }
            _ => Ok(self.tokens.raw_text(*range.start(), *range.end())),
        }
    }

    fn full_range(&self) -> RangeInclusive<usize> {
        0..=self.tokens.token_count().saturating_sub(1)
    }
}
