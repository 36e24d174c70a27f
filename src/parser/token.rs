//! Tokens produced by the scanner and consumed by the parser.

use super::ast::Span;
use std::fmt;

/// Token classes recognised by the scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    IntLiteral,
    Plus,
    Minus,
    EndOfText,
}

impl TokenKind {
    /// Name used in token listings (`TK_INTLIT`, `TK_PLUS`, ...)
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::IntLiteral => "TK_INTLIT",
            TokenKind::Plus => "TK_PLUS",
            TokenKind::Minus => "TK_MINUS",
            TokenKind::EndOfText => "TK_EOT",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What [`ScanTable::accept`](super::scan_table::ScanTable::accept) should match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    /// Consume whatever token is under the cursor
    Any,
    Kind(TokenKind),
}

impl From<TokenKind> for Expected {
    fn from(kind: TokenKind) -> Self {
        Expected::Kind(kind)
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Any => f.write_str("TK_ANY"),
            Expected::Kind(kind) => kind.fmt(f),
        }
    }
}

/// A classified lexical unit.
///
/// `text` is the exact source slice; it is empty for [`TokenKind::EndOfText`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(\"{}\")", self.kind, self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_display() {
        let tok = Token::new(TokenKind::IntLiteral, "12", Span::new(0, 2));
        assert_eq!(tok.to_string(), "TK_INTLIT(\"12\")");

        let eot = Token::new(TokenKind::EndOfText, "", Span::new(2, 2));
        assert_eq!(eot.to_string(), "TK_EOT(\"\")");
    }

    #[test]
    fn test_expected_display() {
        assert_eq!(Expected::Any.to_string(), "TK_ANY");
        assert_eq!(Expected::from(TokenKind::Minus).to_string(), "TK_MINUS");
    }
}
