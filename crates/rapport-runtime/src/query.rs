//! Graph queries over the committed adjacency snapshot.
//!
//! Every query is read-only. Unknown ids produce empty results instead of
//! errors, so a host can pass through whatever id it has on hand.

use crate::affinity::match_score;
use rapport_core::params::{SimParams, CONTACT_MAX_HOPS};
use rapport_core::topology::{connected_components, hop_distances, shortest_path, Topology};
use rapport_core::types::*;
use serde::Serialize;
use std::collections::HashMap;

/// Agents reachable within three hops and within a physical radius.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContactSets {
    /// Hop distance 1.
    pub direct: Vec<AgentId>,
    /// Hop distance 2 or 3.
    pub indirect: Vec<AgentId>,
    /// Hop count of every classified agent, in discovery order.
    pub hops: Vec<(AgentId, usize)>,
}

impl ContactSets {
    pub fn is_empty(&self) -> bool {
        self.direct.is_empty() && self.indirect.is_empty()
    }

    pub fn hops_to(&self, id: &AgentId) -> Option<usize> {
        self.hops.iter().find(|(h, _)| h == id).map(|(_, n)| *n)
    }
}

/// One ranked candidate from `match_top_n`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub id: AgentId,
    pub score: f64,
}

/// Population-level graph statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub component_count: usize,
}

/// Borrowed view used to answer graph queries between frames.
pub struct GraphQuery<'a> {
    agents: &'a [Agent],
    index: &'a HashMap<AgentId, usize>,
    topology: &'a dyn Topology,
    params: &'a SimParams,
}

impl<'a> GraphQuery<'a> {
    pub fn new(
        agents: &'a [Agent],
        index: &'a HashMap<AgentId, usize>,
        topology: &'a dyn Topology,
        params: &'a SimParams,
    ) -> Self {
        Self {
            agents,
            index,
            topology,
            params,
        }
    }

    fn position_of(&self, id: &AgentId) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Nearest agent to `(x, y)` if it lies within `radius`.
    /// On equal distances the earlier agent wins.
    pub fn pick_agent(&self, x: f64, y: f64, radius: f64) -> Option<AgentId> {
        let point = Vec2::new(x, y);
        let mut best: Option<(&Agent, f64)> = None;
        for agent in self.agents {
            let d = agent.position.distance_to(&point);
            match best {
                Some((_, best_d)) if d >= best_d => {}
                _ => best = Some((agent, d)),
            }
        }
        best.filter(|(_, d)| *d <= radius).map(|(a, _)| a.id.clone())
    }

    /// Fewest-edges path from `from` to `to`, both inclusive.
    ///
    /// Among equally short paths the one found first under neighbor order
    /// is returned; that order is ascending population index, so callers
    /// should not rely on a particular tie-break beyond that.
    pub fn find_path(&self, from: &AgentId, to: &AgentId) -> Vec<AgentId> {
        let (Some(a), Some(b)) = (self.position_of(from), self.position_of(to)) else {
            return Vec::new();
        };
        shortest_path(self.topology, a, b)
            .map(|path| path.into_iter().map(|i| self.agents[i].id.clone()).collect())
            .unwrap_or_default()
    }

    /// Contacts up to three hops away that are physically within `radius`.
    ///
    /// Expansion continues through agents outside the radius; the radius
    /// only decides who gets reported.
    pub fn contact_sets(&self, id: &AgentId, radius: f64) -> ContactSets {
        let Some(source) = self.position_of(id) else {
            return ContactSets::default();
        };
        let origin = self.agents[source].position;
        let mut sets = ContactSets::default();

        for (node, hops) in hop_distances(self.topology, source, CONTACT_MAX_HOPS) {
            let Some(agent) = self.agents.get(node) else {
                continue;
            };
            if agent.position.distance_to(&origin) > radius {
                continue;
            }
            if hops == 1 {
                sets.direct.push(agent.id.clone());
            } else {
                sets.indirect.push(agent.id.clone());
            }
            sets.hops.push((agent.id.clone(), hops));
        }
        sets
    }

    /// The `n` best match scores from `id` toward everyone else.
    ///
    /// The mutual-friends term is left at zero here, unlike the per-frame
    /// affinity update which uses last frame's adjacency.
    pub fn match_top_n(&self, id: &AgentId, n: usize) -> Vec<MatchResult> {
        let Some(source) = self.position_of(id) else {
            return Vec::new();
        };
        let me = &self.agents[source];

        let mut scored: Vec<MatchResult> = self
            .agents
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != source)
            .map(|(_, other)| MatchResult {
                id: other.id.clone(),
                score: match_score(me, other, self.params, 0),
            })
            .collect();

        // Stable sort keeps population order among equal scores.
        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(n);
        scored
    }

    pub fn stats(&self) -> GraphStats {
        let degree_sum: usize = self.agents.iter().map(|a| a.connections.len()).sum();
        GraphStats {
            node_count: self.agents.len(),
            edge_count: degree_sum / 2,
            component_count: connected_components(self.topology),
        }
    }
}

/// Map every id to its population index.
pub fn build_index(agents: &[Agent]) -> HashMap<AgentId, usize> {
    agents
        .iter()
        .enumerate()
        .map(|(i, a)| (a.id.clone(), i))
        .collect()
}
