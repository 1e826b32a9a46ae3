//! # Rapport Runtime
//!
//! Population management and the frame-based simulation loop.
//!
//! The engine owns a flat population of agents. Every frame it moves them,
//! lets nearby pairs grow or lose affinity, and turns mutual affinity into
//! an undirected friendship graph that the query layer reads between frames.

pub mod population;
pub mod movement;
pub mod affinity;
pub mod connectivity;
pub mod query;
pub mod engine;
pub mod export;
pub mod prelude;

#[cfg(test)]
mod testing;
