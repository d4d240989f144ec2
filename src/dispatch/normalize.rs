use super::DispatchError;
use crate::config::NumberRules;

/// Turn a caller number into the digits-only international form WhatsApp
/// expects.
///
/// Every non-digit is dropped. A number with exactly `local_length` digits
/// that does not already start with the country code gets it prepended.
pub fn normalize_number(raw: &str, rules: &NumberRules) -> Result<String, DispatchError> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.len() < rules.min_length {
        return Err(DispatchError::InvalidNumber(raw.to_string()));
    }

    let code = rules.country_code.as_str();
    if !code.is_empty() && digits.len() == rules.local_length && !digits.starts_with(code) {
        return Ok(format!("{code}{digits}"));
    }

    Ok(digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_number_gets_country_code() {
        let rules = NumberRules::default();
        assert_eq!(normalize_number("3001234567", &rules).unwrap(), "573001234567");
        assert_eq!(normalize_number("(300) 123-4567", &rules).unwrap(), "573001234567");
    }

    #[test]
    fn test_international_number_unchanged() {
        let rules = NumberRules::default();
        assert_eq!(normalize_number("+57 300 123 4567", &rules).unwrap(), "573001234567");
        assert_eq!(normalize_number("+1 415 555 0100", &rules).unwrap(), "14155550100");
    }

    #[test]
    fn test_local_number_already_prefixed() {
        // Ten digits starting with the code are assumed to carry it already
        let rules = NumberRules::default();
        assert_eq!(normalize_number("5712345678", &rules).unwrap(), "5712345678");
    }

    #[test]
    fn test_short_number_rejected() {
        let rules = NumberRules::default();
        assert!(matches!(
            normalize_number("12345", &rules),
            Err(DispatchError::InvalidNumber(n)) if n == "12345"
        ));
        assert!(normalize_number("private", &rules).is_err());
    }

    #[test]
    fn test_custom_rules() {
        let rules = NumberRules {
            country_code: "52".to_string(),
            local_length: 10,
            min_length: 8,
        };
        assert_eq!(normalize_number("5512345678", &rules).unwrap(), "525512345678");
        assert_eq!(normalize_number("12345678", &rules).unwrap(), "12345678");

        let no_prefix = NumberRules {
            country_code: String::new(),
            ..NumberRules::default()
        };
        assert_eq!(normalize_number("3001234567", &no_prefix).unwrap(), "3001234567");
    }
}
