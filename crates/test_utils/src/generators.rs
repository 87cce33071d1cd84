//! Property-based test data generators

use proptest::prelude::*;

/// Appends the Luhn check digit to a digit body.
pub fn append_luhn_check_digit(body: &[u8]) -> String {
    let mut sum = 0u32;
    let mut double = true;
    for &d in body.iter().rev() {
        let mut v = u32::from(d);
        if double {
            v *= 2;
            if v > 9 {
                v -= 9;
            }
        }
        sum += v;
        double = !double;
    }
    let check = (10 - (sum % 10)) % 10;
    let mut s: String = body.iter().map(|d| char::from(b'0' + d)).collect();
    s.push(char::from(b'0' + check as u8));
    s
}

/// Strategy producing Luhn-valid card numbers of length 13-19
pub fn luhn_valid_card_number() -> impl Strategy<Value = String> {
    prop::collection::vec(0u8..=9, 12..=18).prop_map(|body| append_luhn_check_digit(&body))
}

/// Strategy producing syntactically valid VPAs
pub fn valid_vpa() -> impl Strategy<Value = String> {
    ("[A-Za-z0-9._-]{1,32}", "[A-Za-z0-9]{1,16}")
        .prop_map(|(local, handle)| format!("{local}@{handle}"))
}

/// Strategy producing order amounts at or above the floor
pub fn valid_order_amount() -> impl Strategy<Value = i64> {
    100i64..=10_000_000
}
