use buildver_registry::{Category, ReportError, VersionRegistry, shared};
use std::sync::Arc;
use std::thread;

// Tests in this file share one process-wide registry, so each uses its own names.

#[test]
fn shared_handles_see_same_state() {
    let reporter = shared();
    reporter
        .report("shared-handles/edk2", "0f1e2d3c", Category::Commit)
        .unwrap();

    let reader = shared();
    let info = reader.get("shared-handles/edk2").unwrap();
    assert_eq!(info.value, "0f1e2d3c");
    assert_eq!(info.category, Category::Commit);
    assert!(reader.snapshot().contains_key("shared-handles/edk2"));
}

#[test]
fn concurrent_reports_of_distinct_names_all_land() {
    let handles: Vec<_> = (0..16)
        .map(|i| {
            thread::spawn(move || {
                shared().report(format!("distinct/tool-{i}"), format!("{i}.0"), Category::Tool)
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap().unwrap();
    }

    let snap = shared().snapshot();
    for i in 0..16 {
        assert_eq!(snap[&format!("distinct/tool-{i}")].value, format!("{i}.0"));
    }
}

#[test]
fn concurrent_conflicting_reports_have_one_winner() {
    let registry = Arc::new(VersionRegistry::new());
    let handles: Vec<_> = (0..16)
        .map(|i| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || registry.report("contested", format!("v{i}"), Category::Binary))
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let winners = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1);

    let recorded = registry.get("contested").unwrap().value;
    for r in &results {
        if let Err(ReportError::Conflict { old, .. }) = r {
            assert_eq!(old, &recorded);
        }
    }
    assert_eq!(registry.len(), 1);
}
