//! Graph export: the friendship graph as petgraph, JSON or Graphviz DOT.
//!
//! Edge weight is the mean of the two directed affinities, so the strongest
//! friendships sort first.

use crate::engine::{EngineStats, SimulationEngine};
use petgraph::dot::{Config, Dot};
use petgraph::graph::{NodeIndex, UnGraph};
use rapport_core::error::Result;
use rapport_core::types::*;
use serde::Serialize;

/// One undirected friendship with both directed affinities.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightedEdge {
    pub a: AgentId,
    pub b: AgentId,
    pub affinity_ab: f64,
    pub affinity_ba: f64,
}

impl WeightedEdge {
    pub fn mean(&self) -> f64 {
        (self.affinity_ab + self.affinity_ba) / 2.0
    }
}

/// Serializable view of one agent.
#[derive(Debug, Clone, Serialize)]
pub struct AgentSnapshot {
    pub id: AgentId,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub interests: Vec<InterestTag>,
    pub position: Vec2,
    pub velocity: Vec2,
    pub connections: Vec<AgentId>,
}

/// Serializable view of the whole engine.
#[derive(Debug, Clone, Serialize)]
pub struct EngineSnapshot {
    pub arena: Arena,
    pub frame: Frame,
    pub elapsed: f64,
    pub agents: Vec<AgentSnapshot>,
    pub edges: Vec<WeightedEdge>,
    pub stats: EngineStats,
}

/// Every committed edge once, strongest mean affinity first.
pub fn weighted_edges(engine: &SimulationEngine) -> Vec<WeightedEdge> {
    let agents = engine.snapshot();
    let mut edges: Vec<WeightedEdge> = engine
        .adjacency()
        .edges()
        .map(|(i, j)| WeightedEdge {
            a: agents[i].id.clone(),
            b: agents[j].id.clone(),
            affinity_ab: agents[i].affinity_toward(&agents[j].id),
            affinity_ba: agents[j].affinity_toward(&agents[i].id),
        })
        .collect();

    edges.sort_by(|x, y| {
        y.mean()
            .partial_cmp(&x.mean())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    edges
}

/// The friendship graph as a petgraph `UnGraph`. Node indices follow
/// population order.
pub fn to_graph(engine: &SimulationEngine) -> UnGraph<AgentId, f64> {
    let agents = engine.snapshot();
    let mut graph = UnGraph::with_capacity(agents.len(), engine.adjacency().edges().count());
    for agent in agents {
        graph.add_node(agent.id.clone());
    }
    for (i, j) in engine.adjacency().edges() {
        let mean = (agents[i].affinity_toward(&agents[j].id)
            + agents[j].affinity_toward(&agents[i].id))
            / 2.0;
        graph.add_edge(NodeIndex::new(i), NodeIndex::new(j), mean);
    }
    graph
}

pub fn snapshot(engine: &SimulationEngine) -> EngineSnapshot {
    let agents = engine
        .snapshot()
        .iter()
        .map(|a| AgentSnapshot {
            id: a.id.clone(),
            name: a.name.clone(),
            age: a.age,
            gender: a.gender,
            interests: a.interests.tags(),
            position: a.position,
            velocity: a.velocity,
            connections: a.connections.clone(),
        })
        .collect();

    EngineSnapshot {
        arena: engine.arena(),
        frame: engine.frame(),
        elapsed: engine.elapsed(),
        agents,
        edges: weighted_edges(engine),
        stats: engine.engine_stats(),
    }
}

/// Pretty-printed JSON of `snapshot`.
pub fn to_json(engine: &SimulationEngine) -> Result<String> {
    Ok(serde_json::to_string_pretty(&snapshot(engine))?)
}

/// Graphviz DOT, nodes labelled by id.
pub fn to_dot(engine: &SimulationEngine) -> String {
    let graph = to_graph(engine);
    format!("{}", Dot::with_config(&graph, &[Config::EdgeNoLabel]))
}
