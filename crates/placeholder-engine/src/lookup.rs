use std::collections::HashMap;

use crate::handle::ProviderHandle;

/// Read-only view of the registered expansions.
///
/// Keys are lowercased identifiers; callers fold before looking up.
pub trait ExpansionLookup {
    fn lookup(&self, identifier: &str) -> Option<&ProviderHandle>;

    /// Number of registered expansions.
    fn count(&self) -> usize;
}

impl ExpansionLookup for HashMap<String, ProviderHandle> {
    fn lookup(&self, identifier: &str) -> Option<&ProviderHandle> {
        self.get(identifier)
    }

    fn count(&self) -> usize {
        self.len()
    }
}

impl<L: ExpansionLookup + ?Sized> ExpansionLookup for &L {
    fn lookup(&self, identifier: &str) -> Option<&ProviderHandle> {
        (**self).lookup(identifier)
    }

    fn count(&self) -> usize {
        (**self).count()
    }
}
