use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use placeholder_engine::{
    ColorTarget, ExpansionError, ExpansionLookup, FnExpansion, ProviderHandle, Replacer, Subject,
};

fn lookup_of(expansions: Vec<FnExpansion>) -> HashMap<String, ProviderHandle> {
    expansions
        .into_iter()
        .map(ProviderHandle::from_expansion)
        .map(|h| (h.identifier().to_string(), h))
        .collect()
}

fn world() -> FnExpansion {
    FnExpansion::standard("name", |_, _| Ok(Some("World".to_string())))
}

fn counted(identifier: &str, hits: &Arc<AtomicUsize>) -> FnExpansion {
    let hits = hits.clone();
    FnExpansion::standard(identifier, move |_, params| {
        hits.fetch_add(1, Ordering::SeqCst);
        Ok(Some(params.to_uppercase()))
    })
}

fn plain() -> Replacer {
    Replacer::percent().colorize(false)
}

// =============================================================================
// Standard substitution
// =============================================================================

#[test]
fn test_hello_world() {
    let lookup = lookup_of(vec![world()]);
    assert_eq!(plain().apply("Hello %name%", None, &lookup), "Hello World");
}

#[test]
fn test_unknown_identifier_left_unchanged() {
    let lookup = lookup_of(vec![world()]);
    assert_eq!(
        plain().apply("Hello %unknown_x%", None, &lookup),
        "Hello %unknown_x%"
    );
}

#[test]
fn test_identifier_case_insensitive() {
    let lookup = lookup_of(vec![world()]);
    assert_eq!(plain().apply("%NAME%", None, &lookup), "World");
    assert_eq!(plain().apply("%Name%", None, &lookup), "World");
    assert_eq!(plain().apply("%name%", None, &lookup), "World");
}

#[test]
fn test_parameters_after_first_underscore() {
    let hits = Arc::new(AtomicUsize::new(0));
    let lookup = lookup_of(vec![counted("stat", &hits)]);
    assert_eq!(
        plain().apply("%stat_kills_total%", None, &lookup),
        "KILLS_TOTAL"
    );
}

#[test]
fn test_subject_passed_through() {
    let lookup = lookup_of(vec![FnExpansion::standard("player", |subject, _| {
        Ok(Some(subject.map_or("console", |s| s.name()).to_string()))
    })]);
    let alex = Subject::new("1", "Alex");
    assert_eq!(plain().apply("%player_name%", Some(&alex), &lookup), "Alex");
    assert_eq!(plain().apply("%player_name%", None, &lookup), "console");
}

#[test]
fn test_resolved_values_not_rescanned() {
    let lookup = lookup_of(vec![
        FnExpansion::standard("name", |_, _| Ok(Some("%other%".to_string()))),
        FnExpansion::standard("other", |_, _| Ok(Some("nope".to_string()))),
    ]);
    assert_eq!(plain().apply("%name%", None, &lookup), "%other%");
}

#[test]
fn test_empty_value_replaces_token() {
    let lookup = lookup_of(vec![FnExpansion::standard("blank", |_, _| {
        Ok(Some(String::new()))
    })]);
    assert_eq!(plain().apply("[%blank%]", None, &lookup), "[]");
}

#[test]
fn test_declined_value_keeps_token() {
    let lookup = lookup_of(vec![FnExpansion::standard("maybe", |_, _| Ok(None))]);
    assert_eq!(plain().apply("[%maybe%]", None, &lookup), "[%maybe%]");
}

#[test]
fn test_percent_signs_in_prose() {
    let lookup = lookup_of(vec![world()]);
    assert_eq!(
        plain().apply("100% sure, %name%!", None, &lookup),
        "100% sure, World!"
    );
}

// =============================================================================
// Bracket closure
// =============================================================================

#[test]
fn test_bracket_closure() {
    let lookup = lookup_of(vec![world()]);
    let replacer = Replacer::bracket().colorize(false);
    assert_eq!(replacer.apply("Hi {name}, 5% off", None, &lookup), "Hi World, 5% off");
    assert_eq!(replacer.apply("%name%", None, &lookup), "%name%");
}

#[test]
fn test_bracket_inner_span_wins() {
    let hits = Arc::new(AtomicUsize::new(0));
    let lookup = lookup_of(vec![counted("b", &hits)]);
    let replacer = Replacer::bracket().colorize(false);
    // `{b}` has empty parameters, so it resolves to ""
    assert_eq!(replacer.apply("{a{b}c}", None, &lookup), "{ac}");
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

// =============================================================================
// Fault isolation
// =============================================================================

#[test]
fn test_failing_provider_isolated() {
    let lookup = lookup_of(vec![
        world(),
        FnExpansion::standard("broken", |_, _| Err(ExpansionError::msg("boom"))),
    ]);
    assert_eq!(
        plain().apply("%broken% %name%", None, &lookup),
        "%broken% World"
    );
}

#[test]
fn test_panicking_provider_isolated() {
    let lookup = lookup_of(vec![
        world(),
        FnExpansion::standard("panics", |_, _| panic!("provider bug")),
    ]);
    assert_eq!(
        plain().apply("%panics_x% %name%", None, &lookup),
        "%panics_x% World"
    );
}

// =============================================================================
// Invocation counts
// =============================================================================

#[test]
fn test_one_invocation_per_valid_token() {
    let hits = Arc::new(AtomicUsize::new(0));
    let lookup = lookup_of(vec![counted("x", &hits)]);
    plain().apply("%x_a% %x_b% % x% %y_c% %x_d%", None, &lookup);
    assert_eq!(hits.load(Ordering::SeqCst), 3);
}

#[test]
fn test_no_candidate_no_invocation() {
    let hits = Arc::new(AtomicUsize::new(0));
    let lookup = lookup_of(vec![counted("x", &hits)]);
    let out = plain().apply("nothing to see", None, &lookup);
    assert_eq!(out, "nothing to see");
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

// =============================================================================
// Color pass
// =============================================================================

#[test]
fn test_color_applied_once_after_substitution() {
    let lookup = lookup_of(vec![FnExpansion::standard("rank", |_, _| {
        Ok(Some("&c&lAdmin".to_string()))
    })]);
    let out = Replacer::percent().apply("&7[%rank%&7]", None, &lookup);
    assert_eq!(out, "§7[§c§lAdmin§7]");
}

#[test]
fn test_no_tokens_still_colorized() {
    let lookup: HashMap<String, ProviderHandle> = HashMap::new();
    assert_eq!(Replacer::percent().apply("&aok", None, &lookup), "§aok");
    assert_eq!(plain().apply("&aok", None, &lookup), "&aok");
}

#[test]
fn test_strip_target() {
    let lookup = lookup_of(vec![world()]);
    let replacer = Replacer::percent().color_target(ColorTarget::Strip);
    assert_eq!(replacer.apply("&a%name%&r!", None, &lookup), "World!");
}

// =============================================================================
// Relational
// =============================================================================

fn friend() -> FnExpansion {
    FnExpansion::relational("friend", |one, two, params| {
        Ok((params == "status" && one != two).then(|| "Friendly".to_string()))
    })
}

#[test]
fn test_relational_resolves() {
    let lookup = lookup_of(vec![friend()]);
    let a = Subject::new("1", "Alex");
    let b = Subject::new("2", "Sam");
    let out = plain().apply_relational("%rel_friend_status%", Some(&a), Some(&b), &lookup);
    assert_eq!(out, "Friendly");
}

#[test]
fn test_relational_missing_subject_unchanged() {
    let lookup = lookup_of(vec![friend()]);
    let a = Subject::new("1", "Alex");
    assert_eq!(
        plain().apply_relational("%rel_friend_status%", Some(&a), None, &lookup),
        "%rel_friend_status%"
    );
    assert_eq!(
        Replacer::percent().apply_relational("&a%rel_friend_status%", None, Some(&a), &lookup),
        "§a%rel_friend_status%"
    );
}

#[test]
fn test_relational_ignores_standard_tokens() {
    let lookup = lookup_of(vec![friend(), world()]);
    let a = Subject::new("1", "Alex");
    let b = Subject::new("2", "Sam");
    assert_eq!(
        plain().apply_relational("%name% %rel_friend_status%", Some(&a), Some(&b), &lookup),
        "%name% Friendly"
    );
}

#[test]
fn test_relational_requires_capability() {
    let lookup = lookup_of(vec![world()]);
    let a = Subject::new("1", "Alex");
    assert_eq!(
        plain().apply_relational("%rel_name%", Some(&a), Some(&a), &lookup),
        "%rel_name%"
    );
}

// Reports itself as empty while still holding handles, and counts lookups.
struct EmptyLookingLookup {
    inner: HashMap<String, ProviderHandle>,
    lookups: AtomicUsize,
}

impl ExpansionLookup for EmptyLookingLookup {
    fn lookup(&self, identifier: &str) -> Option<&ProviderHandle> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.lookup(identifier)
    }

    fn count(&self) -> usize {
        0
    }
}

#[test]
fn test_relational_empty_registry_fast_path() {
    let lookup = EmptyLookingLookup {
        inner: lookup_of(vec![friend()]),
        lookups: AtomicUsize::new(0),
    };
    let a = Subject::new("1", "Alex");
    let b = Subject::new("2", "Sam");

    assert_eq!(
        Replacer::percent().apply_relational("&b%rel_friend_status%", Some(&a), Some(&b), &lookup),
        "§b%rel_friend_status%"
    );
    assert_eq!(lookup.lookups.load(Ordering::SeqCst), 0);
}

#[test]
fn test_standard_apply_has_no_empty_registry_shortcut() {
    let lookup = EmptyLookingLookup {
        inner: lookup_of(vec![world()]),
        lookups: AtomicUsize::new(0),
    };
    assert_eq!(plain().apply("Hi %name%", None, &lookup), "Hi World");
    assert_eq!(lookup.lookups.load(Ordering::SeqCst), 1);
}
