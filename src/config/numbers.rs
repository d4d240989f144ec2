use serde::{Deserialize, Serialize};

/// Rules used to turn a caller number into a WhatsApp phone id.
///
/// The defaults reproduce the Colombian layout: ten-digit mobile numbers get
/// the `57` country code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberRules {
    /// Country code prepended to local numbers. Empty disables prefixing.
    #[serde(default = "default_country_code")]
    pub country_code: String,

    /// Digit count of a local number that still needs the country code
    #[serde(default = "default_local_length")]
    pub local_length: usize,

    /// Numbers with fewer digits are rejected
    #[serde(default = "default_min_length")]
    pub min_length: usize,
}

fn default_country_code() -> String {
    "57".to_string()
}

fn default_local_length() -> usize {
    10
}

fn default_min_length() -> usize {
    10
}

impl Default for NumberRules {
    fn default() -> Self {
        Self {
            country_code: default_country_code(),
            local_length: default_local_length(),
            min_length: default_min_length(),
        }
    }
}
