//! Payment instrument validation
//!
//! Pure, stateless checks over card numbers, UPI identifiers, and expiry
//! dates. Nothing here touches the clock except the `Utc::now()` wrapper
//! around [`validate_expiry_at`]; everything else is a single pass over a
//! short string.
//!
//! The same rules run client-side for optimistic feedback; this module is
//! the authoritative copy.

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

/// Card networks recognized by prefix
///
/// The prefix ranges are mutually exclusive by construction, so the order
/// of the checks does not matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardNetwork {
    Visa,
    Mastercard,
    Amex,
    Rupay,
    Unknown,
}

impl CardNetwork {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardNetwork::Visa => "visa",
            CardNetwork::Mastercard => "mastercard",
            CardNetwork::Amex => "amex",
            CardNetwork::Rupay => "rupay",
            CardNetwork::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for CardNetwork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CardNetwork {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "visa" => CardNetwork::Visa,
            "mastercard" => CardNetwork::Mastercard,
            "amex" => CardNetwork::Amex,
            "rupay" => CardNetwork::Rupay,
            _ => CardNetwork::Unknown,
        })
    }
}

/// Validates a UPI Virtual Payment Address.
///
/// Accepts `local@handle` where local is one or more of `[A-Za-z0-9._-]`
/// and handle is one or more alphanumerics. Empty input is invalid.
pub fn validate_vpa(vpa: &str) -> bool {
    let Some((local, handle)) = vpa.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        && !handle.is_empty()
        && handle.chars().all(|c| c.is_ascii_alphanumeric())
}

// Spaces and hyphens are presentation; everything else must be a digit.
fn clean_card_number(number: &str) -> Option<String> {
    let cleaned: String = number
        .chars()
        .filter(|c| !matches!(c, ' ' | '-'))
        .collect();
    if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(cleaned)
}

/// Validates a card number with the Luhn checksum.
///
/// Spaces and hyphens are stripped first; the cleaned string must be
/// 13-19 digits. Double every second digit from the rightmost, subtract 9
/// when the doubled value exceeds 9, and require the digit sum to be a
/// multiple of 10.
pub fn validate_luhn(number: &str) -> bool {
    let Some(cleaned) = clean_card_number(number) else {
        return false;
    };
    if !(13..=19).contains(&cleaned.len()) {
        return false;
    }

    let mut sum = 0u32;
    let mut double = false;
    for c in cleaned.chars().rev() {
        let mut digit = c.to_digit(10).unwrap_or(0);
        if double {
            digit *= 2;
            if digit > 9 {
                digit -= 9;
            }
        }
        sum += digit;
        double = !double;
    }
    sum % 10 == 0
}

/// Classifies a card number by its numeric prefix.
///
/// `4` is Visa, `51`-`55` Mastercard, `34`/`37` Amex, and `60`/`65`/
/// `81`-`89` RuPay. Anything else, including non-numeric input, is
/// [`CardNetwork::Unknown`].
pub fn card_network(number: &str) -> CardNetwork {
    let Some(cleaned) = clean_card_number(number) else {
        return CardNetwork::Unknown;
    };
    let bytes = cleaned.as_bytes();

    if bytes.first() == Some(&b'4') {
        return CardNetwork::Visa;
    }
    if let Some(two) = cleaned.get(0..2) {
        match two {
            "51" | "52" | "53" | "54" | "55" => return CardNetwork::Mastercard,
            "34" | "37" => return CardNetwork::Amex,
            "60" | "65" | "81" | "82" | "83" | "84" | "85" | "86" | "87" | "88" | "89" => {
                return CardNetwork::Rupay
            }
            _ => {}
        }
    }
    CardNetwork::Unknown
}

/// Validates a card expiry against a supplied calendar month.
///
/// Months outside 1-12 are invalid. Two-digit years mean `2000 + year`.
/// A card expiring in the current month is still accepted; only a (year,
/// month) pair strictly before `(now_year, now_month)` fails.
pub fn validate_expiry_at(month: u32, year: i32, now_year: i32, now_month: u32) -> bool {
    if !(1..=12).contains(&month) {
        return false;
    }
    let year = if (0..100).contains(&year) { 2000 + year } else { year };

    if year < now_year {
        return false;
    }
    if year == now_year && month < now_month {
        return false;
    }
    true
}

/// Validates a card expiry against the current UTC calendar month.
pub fn validate_expiry(month: u32, year: i32) -> bool {
    let now = Utc::now();
    validate_expiry_at(month, year, now.year(), now.month())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luhn_accepts_known_good_number() {
        assert!(validate_luhn("4111111111111111"));
    }

    #[test]
    fn test_luhn_rejects_off_by_one_checksum() {
        assert!(!validate_luhn("4111111111111112"));
    }

    #[test]
    fn test_luhn_ignores_spaces_and_hyphens() {
        assert!(validate_luhn("4111 1111 1111 1111"));
        assert!(validate_luhn("4111-1111-1111-1111"));
    }

    #[test]
    fn test_luhn_rejects_non_digits_and_bad_lengths() {
        assert!(!validate_luhn(""));
        assert!(!validate_luhn("4111x11111111111"));
        assert!(!validate_luhn("411111111111")); // 12 digits
        assert!(!validate_luhn("41111111111111111111")); // 20 digits
    }

    #[test]
    fn test_network_detection() {
        assert_eq!(card_network("4012888888881881"), CardNetwork::Visa);
        assert_eq!(card_network("5500005555555559"), CardNetwork::Mastercard);
        assert_eq!(card_network("340000000000009"), CardNetwork::Amex);
        assert_eq!(card_network("370000000000002"), CardNetwork::Amex);
        assert_eq!(card_network("6000000000000000"), CardNetwork::Rupay);
        assert_eq!(card_network("6521111111111117"), CardNetwork::Rupay);
        assert_eq!(card_network("8112345678901234"), CardNetwork::Rupay);
        assert_eq!(card_network("1234567890123456"), CardNetwork::Unknown);
    }

    #[test]
    fn test_network_of_garbage_is_unknown() {
        assert_eq!(card_network(""), CardNetwork::Unknown);
        assert_eq!(card_network("not-a-card"), CardNetwork::Unknown);
    }

    #[test]
    fn test_vpa_accepts_simple_address() {
        assert!(validate_vpa("user@bank"));
        assert!(validate_vpa("first.last-01@okhdfc"));
    }

    #[test]
    fn test_vpa_rejects_missing_parts() {
        assert!(!validate_vpa(""));
        assert!(!validate_vpa("user@"));
        assert!(!validate_vpa("@bank"));
        assert!(!validate_vpa("userbank"));
    }

    #[test]
    fn test_vpa_rejects_symbols_in_handle() {
        assert!(!validate_vpa("user@ba_nk"));
        assert!(!validate_vpa("user@bank@extra"));
    }

    #[test]
    fn test_expiry_month_13_invalid_any_year() {
        assert!(!validate_expiry_at(13, 2099, 2026, 8));
        assert!(!validate_expiry_at(0, 2099, 2026, 8));
    }

    #[test]
    fn test_expiry_current_month_is_valid() {
        assert!(validate_expiry_at(8, 2026, 2026, 8));
    }

    #[test]
    fn test_expiry_one_month_past_is_invalid() {
        assert!(!validate_expiry_at(7, 2026, 2026, 8));
    }

    #[test]
    fn test_expiry_two_digit_year_is_2000_based() {
        assert!(validate_expiry_at(12, 30, 2026, 8)); // 2030
        assert!(!validate_expiry_at(12, 20, 2026, 8)); // 2020
    }
}
