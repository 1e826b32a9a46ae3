//! Rapport Core Prelude: convenient imports for common usage.
//!
//! ```rust
//! use rapport_core::prelude::*;
//! ```

// Re-export commonly used types
pub use crate::types::{
    Agent, AgentId, Arena, Frame, Gender, InterestTag, Interests, Vec2, WanderState, INTEREST_DIM,
};

// Re-export math helpers
pub use crate::math::{clamp, cosine01, exp_damp_factor, rand_range, rand_unit};

// Re-export parameters
pub use crate::params::{ParamsPatch, SimParams, DEFAULT_PICK_RADIUS, MAX_FRAME_DT};

// Re-export the Topology trait
pub use crate::topology::Topology;

// Re-export error types
pub use crate::error::{RapportError, Result};
