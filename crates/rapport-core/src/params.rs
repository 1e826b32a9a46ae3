//! Simulation tunables.
//!
//! `SimParams` is the live configuration record the engine reads every
//! frame. Hosts change it through `ParamsPatch`, a shallow partial update
//! where every field is optional. The engine accepts any values; range
//! checks are available through `SimParams::validate` for hosts that want
//! them.

use crate::error::{RapportError, Result};
use serde::{Deserialize, Serialize};

/// Upper bound on a single frame's delta, in seconds.
pub const MAX_FRAME_DT: f64 = 0.05;

/// Range the wander countdown is redrawn from, in seconds.
pub const WANDER_TTL_RANGE: (f64, f64) = (0.5, 1.2);

/// Gender preference term for pairs in the same category.
pub const SAME_GENDER_PREFERENCE: f64 = 0.48;

/// Gender preference term for pairs in opposite categories.
pub const OPPOSITE_GENDER_PREFERENCE: f64 = 0.52;

/// Distance below which a pairwise direction is undefined.
pub const DEGENERATE_DISTANCE: f64 = 1e-6;

/// Default pick radius for screen-coordinate selection.
pub const DEFAULT_PICK_RADIUS: f64 = 10.0;

/// Maximum hop count explored by contact-set queries.
pub const CONTACT_MAX_HOPS: usize = 3;

/// All named tunables of the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimParams {
    // Sensing
    /// Maximum distance at which two agents update affinity (default: 150).
    pub sense_radius: f64,

    // Affinity
    /// Exponential decay rate of affinity toward zero (default: 0.05).
    pub forget_rate: f64,
    /// Gain applied to the signed match term (default: 2.0).
    pub match_rate: f64,
    /// Gain applied to the crowding penalty (default: 0.6).
    pub crowd_rate: f64,
    /// Distance under which crowding kicks in (default: 20).
    pub personal_space: f64,

    // Hysteresis thresholds
    /// Both directed affinities must exceed this to connect (default: 0.3).
    pub connect_on: f64,
    /// Either directed affinity below this disconnects (default: 0.1).
    pub connect_off: f64,

    // Match score weights
    pub w_interest: f64,
    pub w_age: f64,
    pub w_gender: f64,
    pub w_mutual: f64,
    /// Age difference scale of the exponential age term (default: 12).
    pub age_scale: f64,

    // Movement
    /// Distance under which agents repel each other (default: 25).
    pub sep_range: f64,
    /// Repulsive acceleration at zero distance (default: 500).
    pub sep_strength: f64,
    /// Saturated attraction toward connected agents (default: 30).
    pub friend_attract: f64,
    /// Constant acceleration along the wander direction (default: 35).
    pub wander_accel: f64,
    /// Exponential velocity drag (default: 3.0).
    pub drag: f64,
    /// Speed cap (default: 120).
    pub v_max: f64,
    /// Velocity retained on a boundary bounce (default: 0.85).
    pub restitution: f64,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            sense_radius: 150.0,
            forget_rate: 0.05,
            match_rate: 2.0,
            crowd_rate: 0.6,
            personal_space: 20.0,
            connect_on: 0.3,
            connect_off: 0.1,
            w_interest: 0.55,
            w_age: 0.2,
            w_gender: 0.05,
            w_mutual: 0.2,
            age_scale: 12.0,
            sep_range: 25.0,
            sep_strength: 500.0,
            friend_attract: 30.0,
            wander_accel: 35.0,
            drag: 3.0,
            v_max: 120.0,
            restitution: 0.85,
        }
    }
}

/// A partial update to `SimParams`. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sense_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forget_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crowd_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal_space: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connect_on: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connect_off: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub w_interest: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub w_age: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub w_gender: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub w_mutual: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_scale: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sep_range: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sep_strength: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub friend_attract: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wander_accel: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drag: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub v_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restitution: Option<f64>,
}

impl ParamsPatch {
    /// Parse a patch from a JSON object such as `{"connect_on": 0.2}`.
    /// Unknown keys are rejected.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if let Some(obj) = value.as_object() {
            let known = serde_json::to_value(SimParams::default())?;
            for key in obj.keys() {
                if known.get(key).is_none() {
                    return Err(RapportError::invalid_config(key, "", "unknown parameter"));
                }
            }
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn is_empty(&self) -> bool {
        *self == ParamsPatch::default()
    }
}

macro_rules! merge_fields {
    ($target:expr, $patch:expr, $($field:ident),+ $(,)?) => {
        $(
            if let Some(v) = $patch.$field {
                $target.$field = v;
            }
        )+
    };
}

impl SimParams {
    /// Shallow-merge `patch` into these parameters.
    pub fn merge(&mut self, patch: &ParamsPatch) {
        merge_fields!(
            self, patch,
            sense_radius, forget_rate, match_rate, crowd_rate, personal_space,
            connect_on, connect_off,
            w_interest, w_age, w_gender, w_mutual, age_scale,
            sep_range, sep_strength, friend_attract, wander_accel,
            drag, v_max, restitution,
        );
    }

    /// Check the values a host would consider sane. The engine itself never
    /// calls this.
    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("sense_radius", self.sense_radius),
            ("forget_rate", self.forget_rate),
            ("match_rate", self.match_rate),
            ("crowd_rate", self.crowd_rate),
            ("personal_space", self.personal_space),
            ("w_interest", self.w_interest),
            ("w_age", self.w_age),
            ("w_gender", self.w_gender),
            ("w_mutual", self.w_mutual),
            ("sep_strength", self.sep_strength),
            ("friend_attract", self.friend_attract),
            ("wander_accel", self.wander_accel),
            ("drag", self.drag),
            ("v_max", self.v_max),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(RapportError::invalid_config(
                    field,
                    value.to_string(),
                    "must be finite and non-negative",
                ));
            }
        }
        for (field, value) in [("age_scale", self.age_scale), ("sep_range", self.sep_range)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(RapportError::invalid_config(
                    field,
                    value.to_string(),
                    "must be positive",
                ));
            }
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(RapportError::out_of_range("restitution", 0.0, 1.0, self.restitution));
        }
        if self.connect_off > self.connect_on {
            return Err(RapportError::invalid_config(
                "connect_off",
                self.connect_off.to_string(),
                "must not exceed connect_on",
            ));
        }
        let weight_sum = self.w_interest + self.w_age + self.w_gender + self.w_mutual;
        if weight_sum > 1.0 + 1e-9 {
            return Err(RapportError::out_of_range("match weights", 0.0, 1.0, weight_sum));
        }
        Ok(())
    }
}
