//! # placeholder-engine
//!
//! Resolves placeholder tokens in text against a set of registered
//! expansions.
//!
//! The engine is a pure function of its inputs: a [`Replacer`] takes the text,
//! the subject(s), and an [`ExpansionLookup`] and returns the substituted
//! text. It keeps no global state and holds no locks, so any number of
//! threads can apply concurrently against the same lookup.
//!
//! ## Pipeline
//!
//! ```text
//! text ──► Tokenizer ──► dispatch ──► Accumulator ──► Colorizer ──► output
//!              │             │
//!          (lexer)     ExpansionLookup
//! ```
//!
//! 1. The tokenizer splits the text into literal runs and candidate spans.
//! 2. Each well-formed token is looked up by its lowercased identifier and,
//!    if the expansion has the right [`Capabilities`], invoked.
//! 3. Resolved values replace their span once; everything else is copied
//!    verbatim.
//! 4. One color pass runs over the assembled result.
//!
//! Provider errors and panics are contained in dispatch: they are logged
//! through `tracing` at `warn` and the token stays literal.
//!
//! ## Quick start
//!
//! ```rust
//! use std::collections::HashMap;
//! use placeholder_engine::{FnExpansion, ProviderHandle, Replacer, Subject};
//!
//! let player = ProviderHandle::from_expansion(FnExpansion::standard("player", |subject, params| {
//!     Ok(match params {
//!         "name" => subject.map(|s| s.name().to_string()),
//!         _ => None,
//!     })
//! }));
//! let lookup = HashMap::from([(player.identifier().to_string(), player)]);
//!
//! let steve = Subject::new("069a79f4", "Steve");
//! let out = Replacer::percent().apply("Hello %PLAYER_name%!", Some(&steve), &lookup);
//! assert_eq!(out, "Hello Steve!");
//! ```

mod accumulator;
mod capability;
mod dispatch;
mod expansion;
mod handle;
mod lookup;
mod replacer;
mod subject;

pub use capability::Capabilities;
pub use dispatch::{
    dispatch_cleanup, dispatch_relational, dispatch_standard, ResolutionOutcome, ResolveFailure,
};
pub use expansion::{Expansion, ExpansionError, ExpansionResult, FnExpansion, UNKNOWN_OWNER};
pub use handle::ProviderHandle;
pub use lookup::ExpansionLookup;
pub use replacer::Replacer;
pub use subject::Subject;

pub use placeholder_color::ColorTarget;
pub use placeholder_lexer::Closure;
