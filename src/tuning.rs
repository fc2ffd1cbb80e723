//! Data-driven game balance
//!
//! Defaults reproduce the classic feel; overrides come from JSON (LocalStorage
//! on the web) and are validated before use.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::PlayVolume;
use crate::storage;

/// Why a tuning document was rejected
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Gameplay balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub volume: PlayVolume,
    pub sphere_radius: f32,
    /// Units per frame
    pub sphere_fall_speed: f64,
    pub catcher_radius: f32,
    pub catcher_height: f64,
    /// Units per frame, per held axis
    pub catcher_speed: f32,
    pub starting_lives: u32,
    pub wave_interval_ms: f64,
    pub spawn_stagger_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            volume: PlayVolume::default(),
            sphere_radius: SPHERE_RADIUS,
            sphere_fall_speed: SPHERE_FALL_SPEED,
            catcher_radius: CATCHER_RADIUS,
            catcher_height: CATCHER_HEIGHT,
            catcher_speed: CATCHER_SPEED,
            starting_lives: STARTING_LIVES,
            wave_interval_ms: WAVE_INTERVAL_MS,
            spawn_stagger_ms: SPAWN_STAGGER_MS,
        }
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), TuningError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TuningError::Invalid {
            field,
            reason: "must be a positive number",
        })
    }
}

impl Tuning {
    const STORAGE_KEY: &'static str = "sphere_catch_tuning";

    /// Parse and validate a JSON document; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        positive("volume.width", self.volume.width as f64)?;
        positive("volume.height", self.volume.height as f64)?;
        positive("volume.depth", self.volume.depth as f64)?;
        positive("sphere_radius", self.sphere_radius as f64)?;
        positive("sphere_fall_speed", self.sphere_fall_speed)?;
        positive("catcher_radius", self.catcher_radius as f64)?;
        positive("catcher_height", self.catcher_height)?;
        positive("catcher_speed", self.catcher_speed as f64)?;
        positive("wave_interval_ms", self.wave_interval_ms)?;

        if self.starting_lives == 0 {
            return Err(TuningError::Invalid {
                field: "starting_lives",
                reason: "must be at least 1",
            });
        }
        if !(self.spawn_stagger_ms.is_finite() && self.spawn_stagger_ms >= 0.0) {
            return Err(TuningError::Invalid {
                field: "spawn_stagger_ms",
                reason: "must be zero or positive",
            });
        }
        if self.catcher_radius * 2.0 > self.volume.width.min(self.volume.depth) {
            return Err(TuningError::Invalid {
                field: "catcher_radius",
                reason: "catcher does not fit inside the play volume",
            });
        }
        Ok(())
    }

    /// Stored overrides, or the defaults when none are stored or they fail validation
    pub fn load() -> Self {
        let Some(json) = storage::read(Self::STORAGE_KEY) else {
            return Self::default();
        };
        match Self::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring stored tuning: {}", e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "sphere_fall_speed": 0.05 }"#).unwrap();
        assert_eq!(tuning.sphere_fall_speed, 0.05);
        assert_eq!(tuning.catcher_speed, CATCHER_SPEED);
        assert_eq!(tuning.volume, PlayVolume::default());
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = Tuning::from_json(r#"{ "catcher_speed": -1.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "catcher_speed",
                ..
            }
        ));

        let err = Tuning::from_json(r#"{ "starting_lives": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "starting_lives",
                ..
            }
        ));

        let err = Tuning::from_json(r#"{ "catcher_radius": 6.0 }"#).unwrap_err();
        assert!(err.to_string().contains("catcher_radius"));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_load_without_stored_overrides() {
        assert_eq!(Tuning::load(), Tuning::default());
    }
}
