use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use placeholder::{FnExpansion, Placeholders};

#[test]
fn test_concurrent_apply_and_register() {
    let placeholders = Placeholders::new();
    placeholders
        .register(FnExpansion::standard("stable", |_, _| Ok(Some("ok".to_string()))))
        .unwrap();
    let done = AtomicBool::new(false);

    thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                while !done.load(Ordering::Relaxed) {
                    let out = placeholders.set_placeholders(None, "%stable% %late_x%");
                    // `late` is either fully registered or absent.
                    assert!(out == "ok %late_x%" || out == "ok late", "{out:?}");
                }
            });
        }

        scope.spawn(|| {
            for i in 0..200 {
                if i % 2 == 0 {
                    placeholders
                        .register(FnExpansion::standard("late", |_, _| Ok(Some("late".to_string()))))
                        .unwrap();
                } else {
                    placeholders.unregister("late");
                }
            }
            done.store(true, Ordering::Relaxed);
        });
    });

    assert!(placeholders.is_registered("stable"));
}

#[test]
fn test_snapshot_outlives_registry_changes() {
    let placeholders = Placeholders::new();
    placeholders
        .register(FnExpansion::standard("a", |_, _| Ok(Some("1".to_string()))))
        .unwrap();

    let snapshot = placeholders.registry().snapshot();
    placeholders.registry().clear();

    assert_eq!(snapshot.len(), 1);
    assert!(placeholders.registry().is_empty());
}
