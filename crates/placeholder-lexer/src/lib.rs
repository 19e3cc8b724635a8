//! Delimiter-based tokenizer for placeholder text.
//!
//! This crate scans arbitrary text for placeholder tokens such as
//! `%player_name%` or `{player_name}` and splits each token body into an
//! identifier and a parameter string. It performs no resolution itself; the
//! engine crate feeds the produced [`Token`]s to registered expansions.
//!
//! # Example
//!
//! ```rust
//! use placeholder_lexer::{Closure, Piece, Tokenizer};
//!
//! let pieces: Vec<_> = Tokenizer::new("Hello %player_name%!", Closure::Percent).collect();
//! assert_eq!(pieces.len(), 3);
//!
//! match &pieces[1] {
//!     Piece::Token(token) => {
//!         assert_eq!(token.identifier, "player");
//!         assert_eq!(token.parameters, "name");
//!     }
//!     other => panic!("expected a token, got {:?}", other),
//! }
//!
//! // Every piece keeps its source slice, so the input can always be rebuilt.
//! let rebuilt: String = pieces.iter().map(Piece::as_str).collect();
//! assert_eq!(rebuilt, "Hello %player_name%!");
//! ```
//!
//! # Token Syntax
//!
//! | Closure | Form | Notes |
//! |---------|------|-------|
//! | [`Closure::Percent`] | `%identifier_parameters%` | no escaping, no nested `%` |
//! | [`Closure::Bracket`] | `{identifier_parameters}` | an inner `{` restarts the span |
//! | relational | `%rel_identifier_parameters%` | see [`Tokenizer::relational`] |
//!
//! The body is split on the **first** underscore. A body without an
//! underscore is a bare identifier with empty parameters. The identifier must
//! be non-empty and contain no whitespace; anything else is
//! [`Piece::Malformed`] and is passed through as literal text.
//!
//! A malformed span gives its closing delimiter back to the scanner, so in
//! `100% sure %player_name%` the second `%` is not swallowed by the
//! malformed `% sure %` span and the real token is still found.

use std::borrow::Cow;

/// Prefix that marks a relational token body (`%rel_friend_status%`).
pub const RELATIONAL_PREFIX: &str = "rel_";

/// Separator between identifier and parameters inside a token body.
pub const PARAMETER_SEPARATOR: char = '_';

/// The delimiter pair that bounds a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Closure {
    /// `%identifier_parameters%`
    Percent,
    /// `{identifier_parameters}`
    Bracket,
}

impl Closure {
    /// Opening delimiter.
    pub const fn head(self) -> char {
        match self {
            Closure::Percent => '%',
            Closure::Bracket => '{',
        }
    }

    /// Closing delimiter.
    pub const fn tail(self) -> char {
        match self {
            Closure::Percent => '%',
            Closure::Bracket => '}',
        }
    }
}

/// Which family of token bodies a tokenizer recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Single-subject token: `%identifier_parameters%`.
    Standard,
    /// Two-subject token: `%rel_identifier_parameters%`.
    Relational,
}

/// A well-formed placeholder token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    /// The full span including both delimiters, e.g. `%player_name%`.
    pub raw: &'a str,
    /// Identifier as written in the text (not yet case-folded).
    pub identifier: &'a str,
    /// Everything after the first underscore, possibly empty.
    pub parameters: &'a str,
    pub kind: TokenKind,
}

impl<'a> Token<'a> {
    /// The identifier lowercased for registry lookup.
    ///
    /// Borrows when the identifier is already lowercase.
    pub fn lookup_key(&self) -> Cow<'a, str> {
        fold_identifier(self.identifier)
    }
}

/// One piece of scanned input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Piece<'a> {
    /// Literal text between candidate spans.
    Text(&'a str),
    /// A well-formed token.
    Token(Token<'a>),
    /// A candidate span whose body could not be parsed. Carries the opening
    /// delimiter and body, but not the closing delimiter.
    Malformed(&'a str),
}

impl<'a> Piece<'a> {
    /// The slice of the input this piece covers.
    pub fn as_str(&self) -> &'a str {
        match self {
            Piece::Text(text) | Piece::Malformed(text) => text,
            Piece::Token(token) => token.raw,
        }
    }
}

/// Lowercases an identifier, borrowing when nothing changes.
pub fn fold_identifier(identifier: &str) -> Cow<'_, str> {
    if identifier.chars().any(char::is_uppercase) {
        Cow::Owned(identifier.to_lowercase())
    } else {
        Cow::Borrowed(identifier)
    }
}

/// Checks whether `identifier` can name an expansion.
///
/// Identifiers are non-empty and contain no whitespace. Underscores cannot
/// appear because the body is split on the first one.
pub fn is_valid_identifier(identifier: &str) -> bool {
    !identifier.is_empty() && !identifier.chars().any(char::is_whitespace)
}

/// Splits a token body into `(identifier, parameters)`.
///
/// For [`TokenKind::Relational`] the body must start with
/// [`RELATIONAL_PREFIX`], which is stripped before splitting.
pub fn parse_body(body: &str, kind: TokenKind) -> Option<(&str, &str)> {
    let body = match kind {
        TokenKind::Standard => body,
        TokenKind::Relational => body.strip_prefix(RELATIONAL_PREFIX)?,
    };

    let (identifier, parameters) = body.split_once(PARAMETER_SEPARATOR).unwrap_or((body, ""));
    is_valid_identifier(identifier).then_some((identifier, parameters))
}

/// Cheap pre-check: is there an opening delimiter followed somewhere by a
/// closing one?
///
/// When this returns `false` no token can exist and callers can skip
/// tokenization entirely.
pub fn has_candidate(input: &str, closure: Closure) -> bool {
    match input.find(closure.head()) {
        Some(open) => input[open + closure.head().len_utf8()..].contains(closure.tail()),
        None => false,
    }
}

/// Returns `true` if `input` holds at least one well-formed standard token.
pub fn contains_tokens(input: &str, closure: Closure) -> bool {
    has_candidate(input, closure)
        && Tokenizer::new(input, closure).any(|piece| matches!(piece, Piece::Token(_)))
}

/// Lazy, left-to-right scanner producing [`Piece`]s.
///
/// Pieces never overlap and, concatenated in order, reproduce the input
/// exactly.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
    closure: Closure,
    kind: TokenKind,
}

impl<'a> Tokenizer<'a> {
    /// Scanner for standard tokens.
    pub fn new(input: &'a str, closure: Closure) -> Self {
        Self {
            input,
            pos: 0,
            closure,
            kind: TokenKind::Standard,
        }
    }

    /// Scanner for relational tokens. Spans whose body lacks the `rel_`
    /// prefix are reported as [`Piece::Malformed`].
    pub fn relational(input: &'a str, closure: Closure) -> Self {
        Self {
            input,
            pos: 0,
            closure,
            kind: TokenKind::Relational,
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Piece<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.input.len() {
            return None;
        }

        let head = self.closure.head();
        let tail = self.closure.tail();
        let remaining = &self.input[self.pos..];

        let Some(open) = remaining.find(head) else {
            self.pos = self.input.len();
            return Some(Piece::Text(remaining));
        };

        if open > 0 {
            self.pos += open;
            return Some(Piece::Text(&remaining[..open]));
        }

        let body_start = head.len_utf8();
        let after_head = &remaining[body_start..];

        let Some(close) = after_head.find(|c: char| c == tail || c == head) else {
            // No closing delimiter anywhere: the rest is literal.
            self.pos = self.input.len();
            return Some(Piece::Text(remaining));
        };

        if !after_head[close..].starts_with(tail) {
            // Inner opening delimiter: the outer span is abandoned and the
            // inner one becomes the next candidate.
            self.pos += body_start + close;
            return Some(Piece::Text(&remaining[..body_start + close]));
        }

        let body = &after_head[..close];
        match parse_body(body, self.kind) {
            Some((identifier, parameters)) => {
                let end = body_start + close + tail.len_utf8();
                self.pos += end;
                Some(Piece::Token(Token {
                    raw: &remaining[..end],
                    identifier,
                    parameters,
                    kind: self.kind,
                }))
            }
            None => {
                self.pos += body_start + close;
                Some(Piece::Malformed(&remaining[..body_start + close]))
            }
        }
    }
}
