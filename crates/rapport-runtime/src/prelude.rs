//! Rapport Runtime Prelude: convenient imports for common usage.
//!
//! ```rust
//! use rapport_runtime::prelude::*;
//! ```

// Re-export the engine
pub use crate::engine::{EngineConfig, EngineEvent, EngineStats, SimulationEngine};

// Re-export queries
pub use crate::query::{ContactSets, GraphQuery, GraphStats, MatchResult};

// Re-export connectivity
pub use crate::connectivity::{Adjacency, PairState};

// Re-export export types
pub use crate::export::{AgentSnapshot, EngineSnapshot, WeightedEdge};

// Re-export from core
pub use rapport_core::prelude::*;
