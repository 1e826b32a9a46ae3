//! # Rapport
//!
//! Agent-based social simulation in a bounded 2D arena.
//!
//! Agents with an age, a gender category and a handful of interests wander,
//! keep personal space and drift toward their friends. Whenever two agents
//! are within sensing range, each one's directed affinity toward the other
//! decays a little and is pushed by how well they match. Pairs whose mutual
//! affinity clears a threshold become friends; a lower release threshold
//! keeps friendships from flickering.
//!
//! ## Quick Start
//!
//! ```rust
//! use rapport::prelude::*;
//!
//! // A reproducible population of 40 agents
//! let mut engine = SimulationEngine::with_seed(800.0, 600.0, 40, 7);
//!
//! // Drive it the way a render loop would
//! for _ in 0..120 {
//!     engine.step(1.0 / 60.0);
//! }
//!
//! let stats = engine.stats();
//! println!(
//!     "{} agents, {} friendships, {} groups",
//!     stats.node_count, stats.edge_count, stats.component_count
//! );
//!
//! // Ask the graph about one agent
//! let me = engine.snapshot()[0].id.clone();
//! for m in engine.match_top_n(&me, 3) {
//!     println!("{} (score: {:.3})", m.id, m.score);
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`rapport_core`] - Shared types, vector math, parameters, graph algorithms
//! - [`rapport_runtime`] - Population, movement, affinity, connectivity, queries, export
//!
//! ## Tuning
//!
//! Parameters are merged shallowly and apply from the next frame:
//!
//! ```rust
//! use rapport::prelude::*;
//!
//! let mut engine = SimulationEngine::with_seed(400.0, 400.0, 10, 1);
//! engine.update_params(&ParamsPatch {
//!     connect_on: Some(0.25),
//!     sense_radius: Some(200.0),
//!     ..Default::default()
//! });
//! assert_eq!(engine.params().connect_on, 0.25);
//! ```

// Re-export all subcrates
pub use rapport_core as core;
pub use rapport_runtime as runtime;

/// Prelude module for convenient imports.
///
/// ```rust
/// use rapport::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use rapport_core::types::{
        Agent, AgentId, Arena, Frame, Gender, InterestTag, Interests, Vec2, WanderState,
    };

    // Parameters
    pub use rapport_core::params::{ParamsPatch, SimParams, DEFAULT_PICK_RADIUS};

    // Core traits
    pub use rapport_core::topology::Topology;

    // Error types
    pub use rapport_core::error::{RapportError, Result};

    // Runtime
    pub use rapport_runtime::engine::{EngineConfig, EngineEvent, EngineStats, SimulationEngine};
    pub use rapport_runtime::query::{ContactSets, GraphStats, MatchResult};
    pub use rapport_runtime::export::{to_dot, to_graph, to_json, weighted_edges, EngineSnapshot};
}
