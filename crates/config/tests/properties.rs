// MVBC Configurator - Fieldbus Controller Setup
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use mvbc_config::validate::{
    validate_device_address, validate_function_code, validate_interrupt_number,
    validate_poll_interval, validate_port_address, PollAdvisory,
};
use mvbc_config::{capped, PollInterval, MAX_STRING_LENGTH};
use proptest::prelude::*;

proptest! {
    #[test]
    fn addresses_accepted_iff_in_bus_range(raw in any::<i64>()) {
        let in_range = (1..=4095).contains(&raw);
        prop_assert_eq!(validate_port_address(raw).is_ok(), in_range);
        prop_assert_eq!(validate_device_address(raw).is_ok(), in_range);
    }

    #[test]
    fn addresses_near_range_edges(raw in -2i64..4100) {
        let in_range = (1..=4095).contains(&raw);
        let accepted = validate_port_address(raw).map(|a| i64::from(a.get())).ok();
        prop_assert_eq!(accepted, in_range.then_some(raw));
    }

    #[test]
    fn function_code_accepted_iff_nibble(raw in -100i64..100) {
        prop_assert_eq!(validate_function_code(raw).is_ok(), (0..=15).contains(&raw));
    }

    #[test]
    fn interrupt_accepted_iff_three_bits(raw in -20i64..20) {
        prop_assert_eq!(validate_interrupt_number(raw).is_ok(), (0..=7).contains(&raw));
    }

    #[test]
    fn poll_interval_always_resolves(raw in any::<i64>()) {
        let check = validate_poll_interval(raw);
        let ms = check.interval.get();
        if PollInterval::RECOMMENDED.iter().any(|&r| i64::from(r) == raw) {
            prop_assert_eq!(i64::from(ms), raw);
            prop_assert_eq!(check.advisory, None);
        } else if PollInterval::RESOURCE_HEAVY.iter().any(|&r| i64::from(r) == raw) {
            prop_assert_eq!(i64::from(ms), raw);
            prop_assert_eq!(check.advisory, Some(PollAdvisory::ResourceHeavy));
        } else {
            prop_assert_eq!(check.interval, PollInterval::DEFAULT);
            let replaced = PollAdvisory::ReplacedByDefault { requested: raw };
            prop_assert_eq!(check.advisory, Some(replaced));
        }
    }

    #[test]
    fn capped_strings_fit_driver_buffers(s in "\\PC{0,120}") {
        let out = capped(&s);
        prop_assert!(out.len() < MAX_STRING_LENGTH);
        prop_assert!(s.starts_with(&out));
    }
}
