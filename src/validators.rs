use rust_decimal::Decimal;

pub const DEFAULT_COUNTRY_CODE: &str = "+44";
pub const MIN_PHONE_DIGITS: usize = 10;
pub const MAX_PHONE_DIGITS: usize = 15;

/// Digit bounds and fallback dialling prefix used when canonicalizing phones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneRules {
    pub default_country_code: String,
    pub min_digits: usize,
    pub max_digits: usize,
}

impl Default for PhoneRules {
    fn default() -> Self {
        Self {
            default_country_code: DEFAULT_COUNTRY_CODE.to_string(),
            min_digits: MIN_PHONE_DIGITS,
            max_digits: MAX_PHONE_DIGITS,
        }
    }
}

/// Letters (any case), digits and hyphens only; blank is invalid.
pub fn is_valid_account_number(account: &str) -> bool {
    if account.trim().is_empty() {
        return false;
    }
    account
        .chars()
        .all(|c| c.is_alphabetic() || c.is_ascii_digit() || c == '-')
}

pub fn is_valid_amount(amount: Decimal) -> bool {
    amount > Decimal::ZERO
}

/// Canonical `+<digits>` form of `raw`, or `None` when the digit count is out of bounds.
///
/// A literal `+` anywhere in the input keeps the caller's own country code;
/// otherwise the configured default prefix is prepended to the digits as-is.
pub fn is_valid_phone(raw: &str, rules: &PhoneRules) -> Option<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() < rules.min_digits || digits.len() > rules.max_digits {
        return None;
    }
    if raw.contains('+') {
        Some(format!("+{digits}"))
    } else {
        Some(format!("{}{digits}", rules.default_country_code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn phone(raw: &str) -> Option<String> {
        is_valid_phone(raw, &PhoneRules::default())
    }

    #[test]
    fn test_account_number_rules() {
        assert!(is_valid_account_number("AB-123"));
        assert!(is_valid_account_number("ab-123-xyz"));
        assert!(is_valid_account_number("0042"));
        assert!(!is_valid_account_number("AB 123"));
        assert!(!is_valid_account_number("AB_123"));
        assert!(!is_valid_account_number("AB#123"));
        assert!(!is_valid_account_number(""));
        assert!(!is_valid_account_number("   "));
    }

    #[test]
    fn test_amount_must_be_positive() {
        assert!(!is_valid_amount(dec("0")));
        assert!(!is_valid_amount(dec("-5.00")));
        assert!(is_valid_amount(dec("0.01")));
        assert!(is_valid_amount(dec("1500")));
    }

    #[test]
    fn test_phone_without_plus_gets_default_prefix() {
        assert_eq!(phone("07911123456"), Some("+4407911123456".to_string()));
        assert_eq!(phone("07911 123 456"), Some("+4407911123456".to_string()));
    }

    #[test]
    fn test_phone_with_plus_keeps_own_code() {
        assert_eq!(phone("+1-555-123-4567"), Some("+115551234567".to_string()));
        assert_eq!(phone("(555) +44 7911123456"), Some("+555447911123456".to_string()));
    }

    #[test]
    fn test_phone_digit_bounds() {
        assert_eq!(phone("12345"), None);
        assert_eq!(phone("123456789"), None);
        assert!(phone("1234567890").is_some());
        assert!(phone("123456789012345").is_some());
        assert_eq!(phone("1234567890123456"), None);
        assert_eq!(phone("no digits here"), None);
    }

    #[test]
    fn test_phone_custom_rules() {
        let rules = PhoneRules {
            default_country_code: "+353".to_string(),
            min_digits: 7,
            max_digits: 9,
        };
        assert_eq!(is_valid_phone("1234567", &rules), Some("+3531234567".to_string()));
        assert_eq!(is_valid_phone("1234567890", &rules), None);
    }
}
