//! Token to value resolution.
//!
//! Dispatch is where provider faults stop. An `Err` or a panic from an
//! expansion is logged with its identifier and owner and turned into
//! [`ResolutionOutcome::Unresolved`]; the caller keeps the token literal and
//! moves on to the next one.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::capability::Capabilities;
use crate::expansion::ExpansionResult;
use crate::handle::ProviderHandle;
use crate::lookup::ExpansionLookup;
use crate::subject::Subject;

/// Why a token was left literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolveFailure {
    /// The span did not parse into a token.
    MalformedToken,
    /// No expansion owns the identifier.
    UnknownIdentifier,
    /// The expansion exists but does not answer this kind of token.
    CapabilityMismatch,
    /// A relational token needs two subjects.
    MissingSubject,
    /// The expansion answered `Ok(None)`.
    Declined,
    /// The expansion returned an error or panicked.
    ProviderFault,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    Resolved(String),
    Unresolved(ResolveFailure),
}

impl ResolutionOutcome {
    pub fn is_resolved(&self) -> bool {
        matches!(self, ResolutionOutcome::Resolved(_))
    }

    pub fn into_value(self) -> Option<String> {
        match self {
            ResolutionOutcome::Resolved(value) => Some(value),
            ResolutionOutcome::Unresolved(_) => None,
        }
    }
}

/// Resolves a standard token. `identifier` must already be lowercased.
pub fn dispatch_standard<L>(
    lookup: &L,
    identifier: &str,
    params: &str,
    subject: Option<&Subject>,
) -> ResolutionOutcome
where
    L: ExpansionLookup + ?Sized,
{
    match find_capable(lookup, identifier, Capabilities::STANDARD) {
        Ok(handle) => invoke(handle, || handle.expansion().on_request(subject, params)),
        Err(failure) => ResolutionOutcome::Unresolved(failure),
    }
}

/// Resolves a relational token between `one` and `two`.
pub fn dispatch_relational<L>(
    lookup: &L,
    identifier: &str,
    params: &str,
    one: Option<&Subject>,
    two: Option<&Subject>,
) -> ResolutionOutcome
where
    L: ExpansionLookup + ?Sized,
{
    let (Some(one), Some(two)) = (one, two) else {
        return ResolutionOutcome::Unresolved(ResolveFailure::MissingSubject);
    };

    match find_capable(lookup, identifier, Capabilities::RELATIONAL) {
        Ok(handle) => invoke(handle, || {
            handle.expansion().on_relational_request(one, two, params)
        }),
        Err(failure) => ResolutionOutcome::Unresolved(failure),
    }
}

/// Tells every cleanable expansion in `handles` that `subject` left.
///
/// A panicking expansion is logged and skipped. Returns how many expansions
/// were notified without fault.
pub fn dispatch_cleanup<'h, I>(handles: I, subject: &Subject) -> usize
where
    I: IntoIterator<Item = &'h ProviderHandle>,
{
    let mut notified = 0;
    for handle in handles {
        if !handle.supports(Capabilities::CLEANABLE) {
            continue;
        }
        match panic::catch_unwind(AssertUnwindSafe(|| handle.expansion().cleanup(subject))) {
            Ok(()) => notified += 1,
            Err(payload) => tracing::warn!(
                identifier = handle.identifier(),
                owner = handle.owner(),
                subject = subject.id(),
                panic = panic_message(payload.as_ref()),
                "expansion cleanup panicked"
            ),
        }
    }
    notified
}

fn find_capable<'l, L>(
    lookup: &'l L,
    identifier: &str,
    capability: Capabilities,
) -> Result<&'l ProviderHandle, ResolveFailure>
where
    L: ExpansionLookup + ?Sized,
{
    let Some(handle) = lookup.lookup(identifier) else {
        tracing::trace!(identifier, "no expansion registered");
        return Err(ResolveFailure::UnknownIdentifier);
    };

    if !handle.supports(capability) {
        tracing::trace!(
            identifier,
            owner = handle.owner(),
            wanted = ?capability,
            "expansion lacks capability"
        );
        return Err(ResolveFailure::CapabilityMismatch);
    }

    Ok(handle)
}

fn invoke<F>(handle: &ProviderHandle, call: F) -> ResolutionOutcome
where
    F: FnOnce() -> ExpansionResult,
{
    match panic::catch_unwind(AssertUnwindSafe(call)) {
        Ok(Ok(Some(value))) => ResolutionOutcome::Resolved(value),
        Ok(Ok(None)) => ResolutionOutcome::Unresolved(ResolveFailure::Declined),
        Ok(Err(error)) => {
            tracing::warn!(
                identifier = handle.identifier(),
                owner = handle.owner(),
                error = %error,
                "expansion failed"
            );
            ResolutionOutcome::Unresolved(ResolveFailure::ProviderFault)
        }
        Err(payload) => {
            tracing::warn!(
                identifier = handle.identifier(),
                owner = handle.owner(),
                panic = panic_message(payload.as_ref()),
                "expansion panicked"
            );
            ResolutionOutcome::Unresolved(ResolveFailure::ProviderFault)
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "non-string panic payload"
    }
}
