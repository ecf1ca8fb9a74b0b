//! Subscriber installation. Kept in its own test binary so the global
//! subscriber does not leak into other tests.

#![cfg(feature = "logging")]

#[test]
fn test_second_init_is_rejected() {
    cra_preset::logging::init(1, false);
    assert!(!cra_preset::logging::init(0, true));
}
