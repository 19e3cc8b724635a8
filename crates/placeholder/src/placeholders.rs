use std::borrow::Cow;

use placeholder_engine::{Expansion, ProviderHandle, Replacer, Subject};
use placeholder_lexer::Closure;

use crate::config::PlaceholderConfig;
use crate::registry::{self, ExpansionRegistry};

/// Registry plus configuration behind one handle.
///
/// Every text operation takes a single registry snapshot, so a registration
/// racing with a call is either fully visible to it or not at all.
///
/// ```rust
/// use placeholder::{FnExpansion, Placeholders, Subject};
///
/// let placeholders = Placeholders::new();
/// placeholders
///     .register(FnExpansion::standard("player", |subject, params| {
///         Ok(match params {
///             "name" => subject.map(|s| s.name().to_string()),
///             _ => None,
///         })
///     }))
///     .unwrap();
///
/// let steve = Subject::new("069a79f4", "Steve");
/// assert_eq!(
///     placeholders.set_placeholders(Some(&steve), "&eHi %player_name%"),
///     "§eHi Steve"
/// );
/// ```
#[derive(Debug, Default)]
pub struct Placeholders {
    registry: ExpansionRegistry,
    config: PlaceholderConfig,
}

impl Placeholders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: PlaceholderConfig) -> Self {
        Self {
            registry: ExpansionRegistry::new(),
            config,
        }
    }

    pub fn registry(&self) -> &ExpansionRegistry {
        &self.registry
    }

    pub fn config(&self) -> &PlaceholderConfig {
        &self.config
    }

    // -------------------------------------------------------------------------
    // Registration
    // -------------------------------------------------------------------------

    /// See [`ExpansionRegistry::register`].
    pub fn register<E: Expansion + 'static>(
        &self,
        expansion: E,
    ) -> registry::Result<Option<ProviderHandle>> {
        self.registry.register(expansion)
    }

    /// Returns `true` if something was removed.
    pub fn unregister(&self, identifier: &str) -> bool {
        self.registry.unregister(identifier).is_some()
    }

    pub fn is_registered(&self, identifier: &str) -> bool {
        self.registry.is_registered(identifier)
    }

    /// Sorted, lowercased identifiers.
    pub fn registered_identifiers(&self) -> Vec<String> {
        self.registry.identifiers()
    }

    /// See [`ExpansionRegistry::cleanup`].
    pub fn cleanup(&self, subject: &Subject) -> usize {
        self.registry.cleanup(subject)
    }

    // -------------------------------------------------------------------------
    // Substitution
    // -------------------------------------------------------------------------

    /// Resolves `%identifier_parameters%` tokens.
    pub fn set_placeholders<'a>(&self, subject: Option<&Subject>, text: &'a str) -> Cow<'a, str> {
        self.apply(Closure::Percent, subject, text)
    }

    /// Resolves `{identifier_parameters}` tokens.
    pub fn set_bracket_placeholders<'a>(
        &self,
        subject: Option<&Subject>,
        text: &'a str,
    ) -> Cow<'a, str> {
        self.apply(Closure::Bracket, subject, text)
    }

    /// Resolves `%rel_identifier_parameters%` tokens between two subjects.
    pub fn set_relational_placeholders<'a>(
        &self,
        one: Option<&Subject>,
        two: Option<&Subject>,
        text: &'a str,
    ) -> Cow<'a, str> {
        let snapshot = self.registry.snapshot();
        self.replacer(Closure::Percent)
            .apply_relational(text, one, two, &snapshot)
    }

    /// [`set_placeholders`](Self::set_placeholders) over each line, against
    /// one snapshot.
    pub fn set_placeholders_list<S: AsRef<str>>(
        &self,
        subject: Option<&Subject>,
        lines: &[S],
    ) -> Vec<String> {
        self.apply_list(Closure::Percent, subject, lines)
    }

    pub fn set_bracket_placeholders_list<S: AsRef<str>>(
        &self,
        subject: Option<&Subject>,
        lines: &[S],
    ) -> Vec<String> {
        self.apply_list(Closure::Bracket, subject, lines)
    }

    pub fn set_relational_placeholders_list<S: AsRef<str>>(
        &self,
        one: Option<&Subject>,
        two: Option<&Subject>,
        lines: &[S],
    ) -> Vec<String> {
        let snapshot = self.registry.snapshot();
        let replacer = self.replacer(Closure::Percent);
        lines
            .iter()
            .map(|line| {
                replacer
                    .apply_relational(line.as_ref(), one, two, &snapshot)
                    .into_owned()
            })
            .collect()
    }

    pub fn contains_placeholders(&self, text: &str) -> bool {
        placeholder_lexer::contains_tokens(text, Closure::Percent)
    }

    pub fn contains_bracket_placeholders(&self, text: &str) -> bool {
        placeholder_lexer::contains_tokens(text, Closure::Bracket)
    }

    // -------------------------------------------------------------------------
    // Booleans
    // -------------------------------------------------------------------------

    /// Configured text for `true`.
    pub fn boolean_true(&self) -> &str {
        self.config.format_boolean(true)
    }

    /// Configured text for `false`.
    pub fn boolean_false(&self) -> &str {
        self.config.format_boolean(false)
    }

    pub fn format_boolean(&self, value: bool) -> &str {
        self.config.format_boolean(value)
    }

    fn replacer(&self, closure: Closure) -> Replacer {
        self.config.replacer(closure)
    }

    fn apply<'a>(&self, closure: Closure, subject: Option<&Subject>, text: &'a str) -> Cow<'a, str> {
        let snapshot = self.registry.snapshot();
        self.replacer(closure).apply(text, subject, &snapshot)
    }

    fn apply_list<S: AsRef<str>>(
        &self,
        closure: Closure,
        subject: Option<&Subject>,
        lines: &[S],
    ) -> Vec<String> {
        let snapshot = self.registry.snapshot();
        let replacer = self.replacer(closure);
        lines
            .iter()
            .map(|line| replacer.apply(line.as_ref(), subject, &snapshot).into_owned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BooleanStrings;
    use placeholder_engine::FnExpansion;

    fn online() -> Placeholders {
        let placeholders = Placeholders::new();
        placeholders
            .register(FnExpansion::standard("server", |_, params| {
                Ok((params == "online").then(|| "42".to_string()))
            }))
            .unwrap();
        placeholders
    }

    #[test]
    fn percent_and_bracket() {
        let placeholders = online();
        assert_eq!(placeholders.set_placeholders(None, "%server_online%"), "42");
        assert_eq!(
            placeholders.set_bracket_placeholders(None, "{server_online}"),
            "42"
        );
        assert_eq!(
            placeholders.set_bracket_placeholders(None, "%server_online%"),
            "%server_online%"
        );
    }

    #[test]
    fn lists_resolve_each_line() {
        let placeholders = online();
        let out = placeholders.set_placeholders_list(None, &["a %server_online%", "b"]);
        assert_eq!(out, vec!["a 42".to_string(), "b".to_string()]);

        let lines = vec!["{server_online}".to_string()];
        assert_eq!(
            placeholders.set_bracket_placeholders_list(None, &lines),
            vec!["42".to_string()]
        );
    }

    #[test]
    fn contains_checks() {
        let placeholders = online();
        assert!(placeholders.contains_placeholders("x %a_b% y"));
        assert!(!placeholders.contains_placeholders("50% off"));
        assert!(placeholders.contains_bracket_placeholders("{a}"));
        assert!(!placeholders.contains_bracket_placeholders("%a%"));
    }

    #[test]
    fn registration_passthrough() {
        let placeholders = online();
        assert!(placeholders.is_registered("SERVER"));
        assert_eq!(placeholders.registered_identifiers(), vec!["server".to_string()]);
        assert!(placeholders.unregister("server"));
        assert!(!placeholders.unregister("server"));
        assert_eq!(
            placeholders.set_placeholders(None, "%server_online%"),
            "%server_online%"
        );
    }

    #[test]
    fn boolean_strings_from_config() {
        let placeholders = Placeholders::with_config(PlaceholderConfig {
            boolean: BooleanStrings {
                yes: "on".into(),
                no: "off".into(),
            },
            ..PlaceholderConfig::default()
        });
        assert_eq!(placeholders.boolean_true(), "on");
        assert_eq!(placeholders.boolean_false(), "off");
        assert_eq!(placeholders.format_boolean(true), "on");
    }
}
