use gameportal_core::Difficulty;
use serde::{Deserialize, Serialize};

use crate::utils::*;

/// Player preferences that survive a reload. Games themselves are never stored.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub difficulty: Difficulty,
}

impl StorageKey for Settings {
    const KEY: &'static str = "gameportal:settings:v1";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings.difficulty, Difficulty::Easy);
    }

    #[test]
    fn difficulty_is_stored_by_name() {
        let settings = Settings {
            difficulty: Difficulty::Hard,
        };
        assert_eq!(
            serde_json::to_string(&settings).unwrap(),
            r#"{"difficulty":"Hard"}"#
        );
    }
}
