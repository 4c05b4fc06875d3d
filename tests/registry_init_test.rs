//! One-time initialization behavior under concurrent first use.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use pretty_assertions::assert_eq;

use auth_registry::registry::InitGate;
use auth_registry::{MechanismRegistry, RegistryError};
use common::{MarkerGenerator, StubMechanism};

#[test]
fn racing_selection_calls_initialize_exactly_once() {
    let mut registry = MechanismRegistry::with_callback_url(
        "https://app.example/cb",
        vec![
            StubMechanism::redirect("oidc"),
            StubMechanism::direct("basic"),
        ],
    );
    // One shared generator: were initialization to run twice, every chain
    // would grow past a single entry.
    registry.set_authorization_generators(vec![Arc::new(MarkerGenerator)]);
    let registry = Arc::new(registry);

    let threads = 16;
    let barrier = Arc::new(Barrier::new(threads));
    let handles: Vec<_> = (0..threads)
        .map(|i| {
            let registry = Arc::clone(&registry);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                if i % 2 == 0 {
                    registry.select_by_name("oidc").map(|m| m.name().to_string())
                } else {
                    registry.select_by_name("basic").map(|m| m.name().to_string())
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("thread").expect("selection succeeds");
    }

    for mechanism in registry.select_all().expect("ready") {
        assert_eq!(mechanism.authorization_generators().len(), 1);
    }
}

#[test]
fn repeated_selection_does_not_reconfigure_mechanisms() {
    let mut registry = MechanismRegistry::with_callback_url(
        "https://app.example/cb",
        vec![StubMechanism::redirect("oidc")],
    );
    registry.set_authorization_generators(vec![Arc::new(MarkerGenerator)]);

    for _ in 0..10 {
        registry.select_by_name("oidc").expect("selection succeeds");
    }

    let oidc = registry.select_by_name("oidc").unwrap();
    assert_eq!(oidc.authorization_generators().len(), 1);
    assert_eq!(
        oidc.redirect().unwrap().callback_url().as_deref(),
        Some("https://app.example/cb?client_name=oidc")
    );
}

#[test]
fn duplicate_names_fail_initialization_for_every_caller() {
    let registry = Arc::new(MechanismRegistry::new(vec![
        StubMechanism::redirect("Google"),
        StubMechanism::redirect("google"),
    ]));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || registry.select_by_name("google"))
        })
        .collect();

    for handle in handles {
        let result = handle.join().expect("thread");
        assert!(matches!(
            result,
            Err(RegistryError::DuplicateMechanismName { ref name }) if name == "google"
        ));
    }
}

#[test]
fn initialization_failure_surfaces_on_every_operation() {
    let registry = MechanismRegistry::new(Vec::new());

    assert!(matches!(
        registry.select_by_name("oidc"),
        Err(RegistryError::NoMechanismsConfigured)
    ));
    assert!(matches!(
        registry.select_all(),
        Err(RegistryError::NoMechanismsConfigured)
    ));
    // The gate did not poison itself; the error is reproducible, not a hang.
    assert!(matches!(
        registry.select_by_name("oidc"),
        Err(RegistryError::NoMechanismsConfigured)
    ));
}

#[test]
fn gate_runs_its_routine_once_across_threads() {
    let gate = Arc::new(InitGate::new());
    let runs = Arc::new(AtomicUsize::new(0));
    let threads = 32;
    let barrier = Arc::new(Barrier::new(threads));

    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let gate = Arc::clone(&gate);
            let runs = Arc::clone(&runs);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                gate.ensure(|| {
                    runs.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                })
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("thread").expect("setup succeeds");
    }
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}
