//! The provider contract.
//!
//! An [`Expansion`] owns one identifier and answers the tokens that name it.
//! Which entry points the engine calls is decided by
//! [`Expansion::capabilities`], never by downcasting.
//!
//! # Example
//!
//! ```rust
//! use placeholder_engine::{Capabilities, Expansion, ExpansionResult, Subject};
//!
//! struct PlayerExpansion;
//!
//! impl Expansion for PlayerExpansion {
//!     fn identifier(&self) -> &str {
//!         "player"
//!     }
//!
//!     fn on_request(&self, subject: Option<&Subject>, params: &str) -> ExpansionResult {
//!         Ok(match (subject, params) {
//!             (Some(s), "name") => Some(s.name().to_string()),
//!             _ => None,
//!         })
//!     }
//! }
//!
//! let steve = Subject::new("1", "Steve");
//! assert_eq!(
//!     PlayerExpansion.on_request(Some(&steve), "name").unwrap(),
//!     Some("Steve".to_string())
//! );
//! assert_eq!(PlayerExpansion.capabilities(), Capabilities::STANDARD);
//! ```

use thiserror::Error;

use crate::capability::Capabilities;
use crate::subject::Subject;

/// Owner label used when an expansion does not name one.
pub const UNKNOWN_OWNER: &str = "unknown";

/// Failure raised by an expansion while answering a request.
#[derive(Debug, Error)]
pub enum ExpansionError {
    /// Provider-supplied description.
    #[error("{0}")]
    Message(String),

    /// Any underlying error.
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl ExpansionError {
    pub fn msg(message: impl Into<String>) -> Self {
        ExpansionError::Message(message.into())
    }
}

/// `Ok(None)` means "no value": the token stays literal. `Ok(Some(""))` is a
/// real, empty value.
pub type ExpansionResult = Result<Option<String>, ExpansionError>;

/// A placeholder provider.
pub trait Expansion: Send + Sync {
    /// Identifier claimed by this expansion. Matched without case.
    fn identifier(&self) -> &str;

    /// Diagnostic label for logs.
    fn owner(&self) -> &str {
        UNKNOWN_OWNER
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::STANDARD
    }

    /// Last chance to refuse registration, e.g. when a required plugin is
    /// missing.
    fn can_register(&self) -> bool {
        true
    }

    fn on_request(&self, _subject: Option<&Subject>, _params: &str) -> ExpansionResult {
        Ok(None)
    }

    fn on_relational_request(&self, _one: &Subject, _two: &Subject, _params: &str) -> ExpansionResult {
        Ok(None)
    }

    /// Called when `subject` leaves. Only for [`Capabilities::CLEANABLE`].
    fn cleanup(&self, _subject: &Subject) {}
}

type RequestFn = dyn Fn(Option<&Subject>, &str) -> ExpansionResult + Send + Sync;
type RelationalFn = dyn Fn(&Subject, &Subject, &str) -> ExpansionResult + Send + Sync;
type CleanupFn = dyn Fn(&Subject) + Send + Sync;

/// An [`Expansion`] assembled from closures.
///
/// Capabilities follow from which closures are set.
///
/// ```rust
/// use placeholder_engine::{Capabilities, Expansion, FnExpansion};
///
/// let friend = FnExpansion::relational("friend", |_a, _b, params| {
///     Ok((params == "status").then(|| "Friendly".to_string()))
/// })
/// .with_owner("social");
///
/// assert_eq!(friend.capabilities(), Capabilities::RELATIONAL);
/// assert_eq!(friend.owner(), "social");
/// ```
pub struct FnExpansion {
    identifier: String,
    owner: String,
    request: Option<Box<RequestFn>>,
    relational: Option<Box<RelationalFn>>,
    cleanup: Option<Box<CleanupFn>>,
}

impl FnExpansion {
    /// An expansion with no entry points yet.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            owner: UNKNOWN_OWNER.to_string(),
            request: None,
            relational: None,
            cleanup: None,
        }
    }

    /// Shorthand for `new(identifier).with_request(f)`.
    pub fn standard<F>(identifier: impl Into<String>, f: F) -> Self
    where
        F: Fn(Option<&Subject>, &str) -> ExpansionResult + Send + Sync + 'static,
    {
        Self::new(identifier).with_request(f)
    }

    /// Shorthand for `new(identifier).with_relational(f)`.
    pub fn relational<F>(identifier: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Subject, &Subject, &str) -> ExpansionResult + Send + Sync + 'static,
    {
        Self::new(identifier).with_relational(f)
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = owner.into();
        self
    }

    pub fn with_request<F>(mut self, f: F) -> Self
    where
        F: Fn(Option<&Subject>, &str) -> ExpansionResult + Send + Sync + 'static,
    {
        self.request = Some(Box::new(f));
        self
    }

    pub fn with_relational<F>(mut self, f: F) -> Self
    where
        F: Fn(&Subject, &Subject, &str) -> ExpansionResult + Send + Sync + 'static,
    {
        self.relational = Some(Box::new(f));
        self
    }

    pub fn with_cleanup<F>(mut self, f: F) -> Self
    where
        F: Fn(&Subject) + Send + Sync + 'static,
    {
        self.cleanup = Some(Box::new(f));
        self
    }
}

impl std::fmt::Debug for FnExpansion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnExpansion")
            .field("identifier", &self.identifier)
            .field("owner", &self.owner)
            .field("capabilities", &self.capabilities())
            .finish()
    }
}

impl Expansion for FnExpansion {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn owner(&self) -> &str {
        &self.owner
    }

    fn capabilities(&self) -> Capabilities {
        let mut caps = Capabilities::empty();
        caps.set(Capabilities::STANDARD, self.request.is_some());
        caps.set(Capabilities::RELATIONAL, self.relational.is_some());
        caps.set(Capabilities::CLEANABLE, self.cleanup.is_some());
        caps
    }

    fn on_request(&self, subject: Option<&Subject>, params: &str) -> ExpansionResult {
        match &self.request {
            Some(f) => f(subject, params),
            None => Ok(None),
        }
    }

    fn on_relational_request(&self, one: &Subject, two: &Subject, params: &str) -> ExpansionResult {
        match &self.relational {
            Some(f) => f(one, two, params),
            None => Ok(None),
        }
    }

    fn cleanup(&self, subject: &Subject) {
        if let Some(f) = &self.cleanup {
            f(subject);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn capabilities_follow_closures() {
        let none = FnExpansion::new("empty");
        assert_eq!(none.capabilities(), Capabilities::empty());

        let both = FnExpansion::standard("x", |_, _| Ok(None))
            .with_relational(|_, _, _| Ok(None))
            .with_cleanup(|_| {});
        assert_eq!(both.capabilities(), Capabilities::all());
    }

    #[test]
    fn default_owner_is_unknown() {
        assert_eq!(FnExpansion::new("x").owner(), UNKNOWN_OWNER);
    }

    #[test]
    fn missing_closure_yields_none() {
        let exp = FnExpansion::new("x");
        let s = Subject::new("1", "Alex");
        assert!(exp.on_request(Some(&s), "a").unwrap().is_none());
        assert!(exp.on_relational_request(&s, &s, "a").unwrap().is_none());
    }

    #[test]
    fn request_receives_subject_and_params() {
        let exp = FnExpansion::standard("player", |subject, params| {
            Ok(subject.map(|s| format!("{}:{params}", s.name())))
        });
        let s = Subject::new("1", "Alex");
        assert_eq!(exp.on_request(Some(&s), "name").unwrap().as_deref(), Some("Alex:name"));
        assert_eq!(exp.on_request(None, "name").unwrap(), None);
    }

    #[test]
    fn cleanup_invokes_closure() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let exp = FnExpansion::new("x").with_cleanup(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        exp.cleanup(&Subject::new("1", "Alex"));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn error_message_display() {
        assert_eq!(ExpansionError::msg("boom").to_string(), "boom");
        let io: Box<dyn std::error::Error + Send + Sync> = "wrapped".into();
        assert_eq!(ExpansionError::from(io).to_string(), "wrapped");
    }
}
