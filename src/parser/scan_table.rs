//! Token pool with a read cursor
//!
//! The scanner appends tokens; the parser walks them through the cursor with
//! [`ScanTable::accept`] instead of copying them out. The cursor only moves
//! forward and never passes `len()`.

use super::limits::{Pool, PoolExhausted};
use super::token::{Expected, Token, TokenKind};
use std::fmt;

/// Fixed-capacity, append-only token store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanTable {
    tokens: Vec<Token>,
    capacity: usize,
    cursor: usize,
}

impl ScanTable {
    pub fn new(capacity: usize) -> Self {
        ScanTable {
            tokens: Vec::new(),
            capacity,
            cursor: 0,
        }
    }

    /// Append a token, returning its index
    pub fn push(&mut self, token: Token) -> Result<usize, PoolExhausted> {
        if self.tokens.len() >= self.capacity {
            return Err(PoolExhausted {
                pool: Pool::ScanTable,
                capacity: self.capacity,
            });
        }
        self.tokens.push(token);
        Ok(self.tokens.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Token under the cursor
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.cursor)
    }

    /// Kind under the cursor; a table that ran out of tokens reads as end of text
    pub fn peek_kind(&self) -> TokenKind {
        self.peek().map_or(TokenKind::EndOfText, |tok| tok.kind)
    }

    /// Token just behind the cursor (the one most recently accepted)
    pub fn previous(&self) -> Option<&Token> {
        self.cursor
            .checked_sub(1)
            .and_then(|index| self.tokens.get(index))
    }

    /// Consume the token under the cursor if it matches `expected`.
    ///
    /// [`Expected::Any`] consumes unconditionally, except at the end of the
    /// table where there is nothing left to consume.
    pub fn accept(&mut self, expected: impl Into<Expected>) -> bool {
        let matched = match (expected.into(), self.peek()) {
            (_, None) => false,
            (Expected::Any, Some(_)) => true,
            (Expected::Kind(kind), Some(tok)) => tok.kind == kind,
        };
        if matched {
            self.cursor += 1;
        }
        matched
    }
}

impl fmt::Display for ScanTable {
    /// One token per line
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for tok in &self.tokens {
            writeln!(f, "{}", tok)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::Span;

    fn table(kinds: &[TokenKind]) -> ScanTable {
        let mut table = ScanTable::new(8);
        for (i, kind) in kinds.iter().enumerate() {
            table.push(Token::new(*kind, "", Span::new(i, i))).unwrap();
        }
        table
    }

    #[test]
    fn test_accept_match_advances() {
        let mut t = table(&[TokenKind::IntLiteral, TokenKind::EndOfText]);
        assert!(t.accept(TokenKind::IntLiteral));
        assert_eq!(t.cursor(), 1);
        assert_eq!(t.previous().map(|tok| tok.kind), Some(TokenKind::IntLiteral));
    }

    #[test]
    fn test_accept_mismatch_leaves_cursor() {
        let mut t = table(&[TokenKind::Plus, TokenKind::EndOfText]);
        assert!(!t.accept(TokenKind::IntLiteral));
        assert_eq!(t.cursor(), 0);
        assert!(t.previous().is_none());
    }

    #[test]
    fn test_accept_any_stops_at_end() {
        let mut t = table(&[TokenKind::Minus, TokenKind::EndOfText]);
        assert!(t.accept(Expected::Any));
        assert!(t.accept(Expected::Any));
        assert!(!t.accept(Expected::Any));
        assert_eq!(t.cursor(), t.len());
        assert_eq!(t.peek_kind(), TokenKind::EndOfText);
    }

    #[test]
    fn test_push_past_capacity() {
        let mut t = ScanTable::new(1);
        t.push(Token::new(TokenKind::EndOfText, "", Span::default()))
            .unwrap();
        let err = t
            .push(Token::new(TokenKind::EndOfText, "", Span::default()))
            .unwrap_err();
        assert_eq!(err.pool, Pool::ScanTable);
        assert_eq!(err.capacity, 1);
        assert_eq!(t.len(), 1);
    }
}
