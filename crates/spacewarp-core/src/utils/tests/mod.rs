
use crate::utils::panic_message;

#[test]
fn test_panic_message_variants() {
    let static_payload = std::panic::catch_unwind(|| panic!("static text")).expect_err("panicked");
    assert_eq!(panic_message(&*static_payload), "static text");

    let owned_payload = std::panic::catch_unwind(|| panic!("{} text", "formatted")).expect_err("panicked");
    assert_eq!(panic_message(&*owned_payload), "formatted text");

    let other_payload = std::panic::catch_unwind(|| std::panic::panic_any(42_u8)).expect_err("panicked");
    assert_eq!(panic_message(&*other_payload), "Unknown panic reason");
}
