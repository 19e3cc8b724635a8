use std::fmt;
use std::sync::Arc;

use placeholder_lexer::fold_identifier;

use crate::capability::Capabilities;
use crate::expansion::Expansion;

/// A registered expansion as the engine sees it.
///
/// Identifier and capabilities are captured once, when the handle is built,
/// so dispatch never has to ask the provider again. Cloning is cheap.
#[derive(Clone)]
pub struct ProviderHandle {
    identifier: String,
    owner: String,
    capabilities: Capabilities,
    expansion: Arc<dyn Expansion>,
}

impl ProviderHandle {
    pub fn new(expansion: Arc<dyn Expansion>) -> Self {
        Self {
            identifier: fold_identifier(expansion.identifier()).into_owned(),
            owner: expansion.owner().to_string(),
            capabilities: expansion.capabilities(),
            expansion,
        }
    }

    pub fn from_expansion<E: Expansion + 'static>(expansion: E) -> Self {
        Self::new(Arc::new(expansion))
    }

    /// Lowercased identifier.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn supports(&self, capability: Capabilities) -> bool {
        self.capabilities.contains(capability)
    }

    pub fn expansion(&self) -> &Arc<dyn Expansion> {
        &self.expansion
    }
}

impl fmt::Debug for ProviderHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderHandle")
            .field("identifier", &self.identifier)
            .field("owner", &self.owner)
            .field("capabilities", &self.capabilities)
            .finish_non_exhaustive()
    }
}
