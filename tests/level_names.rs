// SPDX-License-Identifier: MIT OR Apache-2.0
use tierlog::{Level, ParseLevelError, level_from_name};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_test::*;

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn lenient_lookup() {
    assert_eq!(level_from_name("WARN"), Level::WARN);
    assert_eq!(level_from_name("warn"), Level::WARN);
    assert_eq!(level_from_name("  Warn "), Level::WARN);
    assert_eq!(level_from_name("emergency"), Level::EMERGENCY);
    assert_eq!(level_from_name("Off"), Level::OFF);
    assert_eq!(level_from_name("bogus"), Level::ALL);
    assert_eq!(level_from_name(""), Level::ALL);
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn strict_lookup() {
    assert_eq!("finer".parse::<Level>(), Ok(Level::FINER));
    let err: ParseLevelError = "bogus".parse::<Level>().unwrap_err();
    assert_eq!(err.name(), "bogus");
    assert_eq!(err.to_string(), r#"unknown log level: "bogus""#);
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn names_round_trip_through_display() {
    for level in Level::STANDARD {
        assert_eq!(level_from_name(level.to_string()), level);
    }
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn documented_order() {
    let order = [
        Level::FINEST,
        Level::FINER,
        Level::FINE,
        Level::TRACE,
        Level::DEBUG,
        Level::INFO,
        Level::NOTICE,
        Level::WARN,
        Level::ERROR,
        Level::SEVERE,
        Level::CRITICAL,
        Level::ALERT,
        Level::FATAL,
        Level::EMERGENCY,
    ];
    for pair in order.windows(2) {
        assert!(pair[0] < pair[1], "{} < {}", pair[0], pair[1]);
    }
    assert!(Level::ALL < Level::FINEST);
    assert!(Level::EMERGENCY < Level::OFF);
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn custom_levels_slot_between_standard_ones() {
    let audit = Level::custom(65_000, "AUDIT");
    assert!(Level::WARN < audit && audit < Level::ERROR);
    assert!(audit.passes(Level::WARN));
    assert!(!audit.passes(Level::ERROR));
    assert_eq!(format!("[{:<7}]", audit), "[AUDIT  ]");
}
