//! Pre-built test data
//!
//! Card numbers are the industry-standard test PANs; all of them pass the
//! Luhn check, none of them is a live card.

/// Card number fixtures
pub struct CardFixtures;

impl CardFixtures {
    /// Luhn-valid Visa test number
    pub fn visa() -> &'static str {
        "4111111111111111"
    }

    /// Second Luhn-valid Visa test number
    pub fn visa_alt() -> &'static str {
        "4012888888881881"
    }

    /// Luhn-valid Mastercard test number
    pub fn mastercard() -> &'static str {
        "5555555555554444"
    }

    /// Luhn-valid Amex test number
    pub fn amex() -> &'static str {
        "378282246310005"
    }

    /// Luhn-valid number in the RuPay prefix range
    pub fn rupay() -> &'static str {
        "6011111111111117"
    }

    /// Fails the Luhn checksum by one
    pub fn invalid() -> &'static str {
        "4111111111111112"
    }
}

/// VPA fixtures
pub struct VpaFixtures;

impl VpaFixtures {
    pub fn valid() -> &'static str {
        "user@bank"
    }

    pub fn valid_with_separators() -> &'static str {
        "first.last-01@okaxis"
    }

    pub fn missing_handle() -> &'static str {
        "user@"
    }

    pub fn missing_local() -> &'static str {
        "@bank"
    }

    pub fn missing_at() -> &'static str {
        "userbank"
    }
}

/// Amount fixtures, in minor units
pub struct AmountFixtures;

impl AmountFixtures {
    /// Smallest accepted order amount
    pub fn minimum() -> i64 {
        100
    }

    /// One below the accepted floor
    pub fn below_minimum() -> i64 {
        99
    }

    /// A typical checkout amount
    pub fn typical() -> i64 {
        50_000
    }
}
