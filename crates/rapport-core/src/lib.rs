//! # Rapport Core
//!
//! Core types, math and graph algorithms for the rapport social simulation.
//!
//! This crate holds everything that is independent of a running engine:
//!
//! - **Types**: agent identity, kinematics, interests and the agent record
//! - **Math**: 2D vector helpers, damping, bounded cosine similarity, random draws
//! - **Parameters**: the live tunables and partial updates to them
//! - **Topology**: the adjacency-snapshot trait and the BFS algorithms queries run on it
//! - **Errors**: the error surface used by hosts around the engine
//!
//! ## Quick Start
//!
//! ```rust
//! use rapport_core::prelude::*;
//!
//! let a = Vec2::new(0.0, 0.0);
//! let b = Vec2::new(3.0, 4.0);
//! assert_eq!(a.distance_to(&b), 5.0);
//!
//! let mut params = SimParams::default();
//! params.merge(&ParamsPatch { sense_radius: Some(90.0), ..Default::default() });
//! assert_eq!(params.sense_radius, 90.0);
//! ```

pub mod types;
pub mod math;
pub mod params;
pub mod topology;
pub mod error;
pub mod prelude;
