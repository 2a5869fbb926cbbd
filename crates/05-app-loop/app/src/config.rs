//! Session configuration.

use hub::{DEFAULT_INTENT_BUDGET, DEFAULT_REPORT_BUDGET};
use serde::Deserialize;
use world::ReducerConfig;

/// Budgets for the scheduler plus the reducer's rendering knobs.
///
/// Every field is optional in serialized form; missing ones take their
/// defaults.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Intents processed per scheduler pass.
    pub intent_budget: usize,
    /// Reports drained per scheduler pass.
    pub report_budget: usize,
    #[serde(flatten)]
    pub reducer: ReducerConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            intent_budget: DEFAULT_INTENT_BUDGET,
            report_budget: DEFAULT_REPORT_BUDGET,
            reducer: ReducerConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use world::WeekdayStyle;

    #[test]
    fn missing_fields_take_defaults() {
        let config: SessionConfig =
            serde_json::from_str(r#"{ "intent_budget": 1, "weekday_style": "korean" }"#)
                .expect("decode config");

        assert_eq!(config.intent_budget, 1);
        assert_eq!(config.report_budget, DEFAULT_REPORT_BUDGET);
        assert_eq!(config.reducer.weekday_style, WeekdayStyle::Korean);
        assert_eq!(config.reducer.closed_round, ReducerConfig::default().closed_round);
    }

    #[test]
    fn empty_object_is_default() {
        let config: SessionConfig = serde_json::from_str("{}").expect("decode config");
        assert_eq!(config, SessionConfig::default());
    }
}
