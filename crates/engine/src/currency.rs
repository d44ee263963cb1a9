use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Reporting currency tag attached to a snapshot and to every expense.
///
/// The engine never converts between currencies: the code is an opaque,
/// normalized tag (trimmed and upper-cased) used only to check that all
/// expenses of one computation share the same currency.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency(String);

impl Currency {
    /// Canonical currency code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.0
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self("EUR".to_string())
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<&str> for Currency {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let code = value.trim().to_ascii_uppercase();
        if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(EngineError::InvalidCurrency(value.to_string()));
        }
        Ok(Self(code))
    }
}

impl TryFrom<String> for Currency {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<Currency> for String {
    fn from(value: Currency) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_code() {
        let currency = Currency::try_from(" eur ").unwrap();
        assert_eq!(currency, Currency::default());
        assert_eq!(currency.to_string(), "EUR");
    }

    #[test]
    fn rejects_empty_or_symbolic_codes() {
        assert_eq!(
            Currency::try_from("  "),
            Err(EngineError::InvalidCurrency("  ".to_string()))
        );
        assert!(Currency::try_from("€").is_err());
    }

    #[test]
    fn deserializes_through_validation() {
        let currency: Currency = serde_json::from_str("\"usd\"").unwrap();
        assert_eq!(currency.code(), "USD");
        assert!(serde_json::from_str::<Currency>("\"\"").is_err());
    }
}
