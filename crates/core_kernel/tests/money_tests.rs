//! Amount and currency tests

use core_kernel::{Amount, AmountError, Currency};
use proptest::prelude::*;

#[test]
fn amount_is_ordered_by_minor_units() {
    let small = Amount::from_minor(100).unwrap();
    let large = Amount::from_minor(50000).unwrap();
    assert!(small < large);
}

#[test]
fn amount_serializes_as_bare_integer() {
    let amount = Amount::from_minor(500).unwrap();
    assert_eq!(serde_json::to_string(&amount).unwrap(), "500");
}

#[test]
fn currency_serializes_as_upper_case_code() {
    assert_eq!(serde_json::to_string(&Currency::Inr).unwrap(), "\"INR\"");
}

#[test]
fn default_currency_is_inr() {
    assert_eq!(Currency::default(), Currency::Inr);
}

proptest! {
    #[test]
    fn non_negative_minor_units_always_construct(units in 0i64..=i64::MAX) {
        let amount = Amount::from_minor(units).unwrap();
        prop_assert_eq!(amount.minor_units(), units);
    }

    #[test]
    fn negative_minor_units_never_construct(units in i64::MIN..0i64) {
        prop_assert_eq!(Amount::from_minor(units), Err(AmountError::Negative(units)));
    }
}
