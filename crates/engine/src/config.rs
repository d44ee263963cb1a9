use serde::{Deserialize, Serialize};

use crate::MoneyCents;

/// Who shares an expense recorded without explicit splits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultSplitPolicy {
    /// Every participant of the snapshot, payer included.
    #[default]
    AllParticipants,
    /// Every participant except the payer. Falls back to the payer alone when
    /// nobody else is left.
    ExcludePayer,
}

/// Tunable choices of the engine.
///
/// Deserializable so hosts can load it from their settings file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub default_split: DefaultSplitPolicy,
    /// Largest accepted gap, in cents, between an expense amount and the sum
    /// of its custom shares.
    pub tolerance_cents: i64,
}

impl EngineConfig {
    pub fn tolerance(&self) -> MoneyCents {
        MoneyCents::new(self.tolerance_cents.max(0))
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_split: DefaultSplitPolicy::AllParticipants,
            tolerance_cents: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"default_split":"exclude_payer"}"#).unwrap();
        assert_eq!(config.default_split, DefaultSplitPolicy::ExcludePayer);
        assert_eq!(config.tolerance(), MoneyCents::new(1));
    }

    #[test]
    fn negative_tolerance_is_clamped() {
        let config = EngineConfig {
            tolerance_cents: -5,
            ..EngineConfig::default()
        };
        assert_eq!(config.tolerance(), MoneyCents::ZERO);
    }
}
