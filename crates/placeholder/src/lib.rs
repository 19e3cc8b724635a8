//! # placeholder
//!
//! Placeholder resolution for chat lines, scoreboards, and any other text
//! that embeds `%identifier_parameters%` tokens.
//!
//! This crate ties the workspace together:
//!
//! - [`ExpansionRegistry`]: thread-safe, copy-on-write store of expansions
//! - [`PlaceholderConfig`]: YAML-loadable settings (color pass, booleans)
//! - [`Placeholders`]: the facade most callers want
//!
//! The pieces underneath are re-exported: expansions and the replacer from
//! `placeholder-engine`, the tokenizer types from `placeholder-lexer`, and
//! the color pass from `placeholder-color`.
//!
//! ## Quick start
//!
//! ```rust
//! use placeholder::{FnExpansion, Placeholders, Subject};
//!
//! let placeholders = Placeholders::new();
//! placeholders
//!     .register(FnExpansion::relational("friend", |one, two, params| {
//!         Ok((params == "status" && one != two).then(|| "&aFriendly".to_string()))
//!     }))
//!     .unwrap();
//!
//! let alex = Subject::new("1", "Alex");
//! let sam = Subject::new("2", "Sam");
//! assert_eq!(
//!     placeholders.set_relational_placeholders(Some(&alex), Some(&sam), "%rel_friend_status%"),
//!     "§aFriendly"
//! );
//! ```
//!
//! ## Logging
//!
//! Registration is logged at `debug`, lookups that miss at `trace`, and
//! expansion failures at `warn`, all through `tracing`. The library never
//! installs a subscriber.

mod config;
mod placeholders;
mod registry;

pub use config::{BooleanStrings, ConfigError, PlaceholderConfig};
pub use placeholders::Placeholders;
pub use registry::{validate_identifier, ExpansionRegistry, RegistryError, RegistrySnapshot};

pub use placeholder_color::{colorize, strip_codes, ColorTarget, Colorizer};
pub use placeholder_engine::{
    Capabilities, Expansion, ExpansionError, ExpansionLookup, ExpansionResult, FnExpansion,
    ProviderHandle, Replacer, ResolutionOutcome, ResolveFailure, Subject,
};
pub use placeholder_lexer::Closure;
