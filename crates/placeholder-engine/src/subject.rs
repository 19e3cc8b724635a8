use std::fmt;

/// The identity a placeholder is resolved for.
///
/// An absent subject (`None` at call sites) stands for the console or an
/// unauthenticated viewer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Subject {
    id: String,
    name: String,
}

impl Subject {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Stable identifier, unchanged across renames.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
