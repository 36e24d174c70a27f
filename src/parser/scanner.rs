//! Scanner (tokenizer) for ntlang expressions
//!
//! Converts an input string into a [`ScanTable`] of tokens. Only integers,
//! `+`, `-`, spaces and tabs are recognised; the table always ends with a
//! single [`TokenKind::EndOfText`].

use super::ast::Span;
use super::limits::{Limits, PoolExhausted};
use super::scan_table::ScanTable;
use super::token::{Token, TokenKind};
use crate::trace::{PoolView, Step, Tracer};
use thiserror::Error;
use tracing::{debug, trace};

/// Errors raised while scanning
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("input is {len} bytes long, limit is {limit}")]
    InputTooLong { len: usize, limit: usize },

    #[error("invalid character {ch:?} at position {position}")]
    InvalidCharacter { ch: char, position: usize },

    #[error(transparent)]
    PoolExhausted(#[from] PoolExhausted),
}

/// Scan `input` into a fresh scan table sized by `limits`
pub fn scan(input: &str, limits: &Limits, tracer: &mut dyn Tracer) -> Result<ScanTable, ScanError> {
    Scanner::new(input, limits)?.scan(tracer)
}

/// Scanner for a single input string
pub struct Scanner<'a> {
    input: &'a str,
    position: usize,
    table: ScanTable,
}

impl<'a> Scanner<'a> {
    /// Create a scanner, rejecting input longer than `limits.max_input_len`
    pub fn new(input: &'a str, limits: &Limits) -> Result<Self, ScanError> {
        if input.len() > limits.max_input_len {
            return Err(ScanError::InputTooLong {
                len: input.len(),
                limit: limits.max_input_len,
            });
        }
        Ok(Self {
            input,
            position: 0,
            table: ScanTable::new(limits.scan_capacity),
        })
    }

    /// Tokenize the entire input
    pub fn scan(mut self, tracer: &mut dyn Tracer) -> Result<ScanTable, ScanError> {
        debug!(input = self.input, "scanning");
        self.notify(
            tracer,
            &Step::ScanStarted {
                len: self.input.len(),
            },
        );

        loop {
            let token = match self.next_token() {
                Ok(token) => token,
                Err(err) => return self.fail(tracer, err),
            };
            let kind = token.kind;
            let step = Step::TokenScanned {
                index: self.table.len(),
                kind,
                text: token.text.clone(),
            };
            trace!(?kind, text = %token.text, start = token.span.start, "token");
            if let Err(err) = self.table.push(token) {
                return self.fail(tracer, err.into());
            }
            self.notify(tracer, &step);

            if kind == TokenKind::EndOfText {
                break;
            }
        }

        debug!(tokens = self.table.len(), "scan complete");
        self.notify(
            tracer,
            &Step::ScanComplete {
                tokens: self.table.len(),
            },
        );
        Ok(self.table)
    }

    fn fail<T>(&self, tracer: &mut dyn Tracer, err: ScanError) -> Result<T, ScanError> {
        debug!(error = %err, "scan failed");
        self.notify(
            tracer,
            &Step::Failed {
                message: err.to_string(),
            },
        );
        Err(err)
    }

    fn notify(&self, tracer: &mut dyn Tracer, step: &Step) {
        tracer.observe(
            step,
            &PoolView {
                scan_table: &self.table,
                parse_table: None,
            },
        );
    }

    /// Scan one token starting at the current position
    fn next_token(&mut self) -> Result<Token, ScanError> {
        self.skip_whitespace();

        let start = self.position;
        let Some(ch) = self.peek() else {
            return Ok(Token::new(TokenKind::EndOfText, "", Span::new(start, start)));
        };

        match ch {
            b'0'..=b'9' => Ok(self.int_literal()),
            b'+' => Ok(self.single(TokenKind::Plus)),
            b'-' => Ok(self.single(TokenKind::Minus)),
            _ => Err(ScanError::InvalidCharacter {
                // `position` is always on a char boundary: everything
                // consumed so far is ASCII
                ch: self.input[start..].chars().next().unwrap_or(char::from(ch)),
                position: start,
            }),
        }
    }

    /// Maximal run of decimal digits
    fn int_literal(&mut self) -> Token {
        let start = self.position;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.position += 1;
        }
        self.token(TokenKind::IntLiteral, start)
    }

    fn single(&mut self, kind: TokenKind) -> Token {
        let start = self.position;
        self.position += 1;
        self.token(kind, start)
    }

    fn token(&self, kind: TokenKind, start: usize) -> Token {
        Token::new(
            kind,
            &self.input[start..self.position],
            Span::new(start, self.position),
        )
    }

    /// Skip spaces and tabs
    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t')) {
            self.position += 1;
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.position).copied()
    }
}
