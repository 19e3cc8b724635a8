//! The replacer strategy: one left-to-right pass that swaps tokens for
//! resolved values, followed by exactly one color pass.
//!
//! Resolved values are written once and never scanned again, so a provider
//! returning `%other%` produces the literal text `%other%`.

use std::borrow::Cow;

use placeholder_color::{ColorTarget, Colorizer};
use placeholder_lexer::{has_candidate, Closure, Piece, Token, Tokenizer};

use crate::accumulator::Accumulator;
use crate::dispatch::{dispatch_relational, dispatch_standard, ResolutionOutcome, ResolveFailure};
use crate::lookup::ExpansionLookup;
use crate::subject::Subject;

/// Substitutes placeholder tokens under one [`Closure`].
///
/// ```rust
/// use std::collections::HashMap;
/// use placeholder_engine::{FnExpansion, ProviderHandle, Replacer};
///
/// let handle = ProviderHandle::from_expansion(FnExpansion::standard("server", |_, params| {
///     Ok((params == "name").then(|| "Lobby".to_string()))
/// }));
/// let lookup = HashMap::from([(handle.identifier().to_string(), handle)]);
///
/// let replacer = Replacer::percent();
/// assert_eq!(replacer.apply("&aWelcome to %server_name%", None, &lookup), "§aWelcome to Lobby");
/// assert_eq!(
///     replacer.colorize(false).apply("{server_name}", None, &lookup),
///     "{server_name}"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Replacer {
    closure: Closure,
    colorize: bool,
    colorizer: Colorizer,
}

impl Replacer {
    /// A replacer with colorizing on and the section target.
    pub const fn new(closure: Closure) -> Self {
        Self {
            closure,
            colorize: true,
            colorizer: Colorizer::new(ColorTarget::Section),
        }
    }

    /// `%identifier_parameters%`
    pub const fn percent() -> Self {
        Self::new(Closure::Percent)
    }

    /// `{identifier_parameters}`
    pub const fn bracket() -> Self {
        Self::new(Closure::Bracket)
    }

    /// Turns the final color pass on or off.
    pub const fn colorize(mut self, enabled: bool) -> Self {
        self.colorize = enabled;
        self
    }

    pub const fn color_target(mut self, target: ColorTarget) -> Self {
        self.colorizer = Colorizer::new(target);
        self
    }

    pub const fn closure(&self) -> Closure {
        self.closure
    }

    pub const fn is_colorizing(&self) -> bool {
        self.colorize
    }

    /// Whether `text` holds at least one well-formed token for this closure.
    pub fn contains(&self, text: &str) -> bool {
        placeholder_lexer::contains_tokens(text, self.closure)
    }

    /// Resolves every standard token in `text` for `subject`.
    ///
    /// Tokens that fail for any reason keep their original text. Borrows
    /// `text` when nothing changed.
    pub fn apply<'a, L>(&self, text: &'a str, subject: Option<&Subject>, lookup: &L) -> Cow<'a, str>
    where
        L: ExpansionLookup + ?Sized,
    {
        if !has_candidate(text, self.closure) {
            return self.finish(Cow::Borrowed(text));
        }

        let substituted = substitute(text, Tokenizer::new(text, self.closure), |token| {
            dispatch_standard(lookup, &token.lookup_key(), token.parameters, subject)
        });
        self.finish(substituted)
    }

    /// Resolves every `rel_` token in `text` between `one` and `two`.
    ///
    /// With an empty registry or a missing subject the tokens stay literal
    /// and only the color pass runs.
    pub fn apply_relational<'a, L>(
        &self,
        text: &'a str,
        one: Option<&Subject>,
        two: Option<&Subject>,
        lookup: &L,
    ) -> Cow<'a, str>
    where
        L: ExpansionLookup + ?Sized,
    {
        if lookup.count() == 0 || !has_candidate(text, self.closure) {
            return self.finish(Cow::Borrowed(text));
        }

        let substituted = substitute(text, Tokenizer::relational(text, self.closure), |token| {
            dispatch_relational(lookup, &token.lookup_key(), token.parameters, one, two)
        });
        self.finish(substituted)
    }

    /// Lists every candidate span in `text` with what resolving it yields,
    /// without building output or running the color pass.
    pub fn outcomes<'a, L>(
        &self,
        text: &'a str,
        subject: Option<&Subject>,
        lookup: &L,
    ) -> Vec<(&'a str, ResolutionOutcome)>
    where
        L: ExpansionLookup + ?Sized,
    {
        Tokenizer::new(text, self.closure)
            .filter_map(|piece| match piece {
                Piece::Text(_) => None,
                Piece::Malformed(span) => Some((
                    span,
                    ResolutionOutcome::Unresolved(ResolveFailure::MalformedToken),
                )),
                Piece::Token(token) => {
                    let outcome =
                        dispatch_standard(lookup, &token.lookup_key(), token.parameters, subject);
                    Some((token.raw, outcome))
                }
            })
            .collect()
    }

    fn finish<'a>(&self, text: Cow<'a, str>) -> Cow<'a, str> {
        if !self.colorize {
            return text;
        }

        match text {
            Cow::Borrowed(text) => self.colorizer.process(text),
            Cow::Owned(text) => {
                let colored = match self.colorizer.process(&text) {
                    Cow::Owned(colored) => Some(colored),
                    Cow::Borrowed(_) => None,
                };
                Cow::Owned(colored.unwrap_or(text))
            }
        }
    }
}

impl Default for Replacer {
    fn default() -> Self {
        Self::percent()
    }
}

fn substitute<'a, F>(text: &'a str, pieces: Tokenizer<'a>, mut resolve: F) -> Cow<'a, str>
where
    F: FnMut(&Token<'a>) -> ResolutionOutcome,
{
    let mut acc = Accumulator::new(text);
    let mut offset = 0;

    for piece in pieces {
        let start = offset;
        offset += piece.as_str().len();

        if let Piece::Token(token) = &piece {
            if let ResolutionOutcome::Resolved(value) = resolve(token) {
                acc.replace(start, offset, &value);
            }
        }
    }

    acc.finish()
}
