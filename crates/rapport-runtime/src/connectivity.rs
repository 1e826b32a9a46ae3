//! Connectivity builder: hysteresis thresholding of directed affinities
//! into an undirected friendship graph.
//!
//! Every unordered pair is a two-state machine evaluated once per frame
//! against the previous frame's state. The whole next adjacency is built
//! in one pass and then committed to every agent's `connections` list.

use rapport_core::params::SimParams;
use rapport_core::topology::Topology;
use rapport_core::types::*;
use serde::Serialize;

/// State of one unordered pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PairState {
    Disconnected,
    Connected,
}

impl PairState {
    pub fn from_connected(connected: bool) -> Self {
        if connected {
            PairState::Connected
        } else {
            PairState::Disconnected
        }
    }

    /// Apply one hysteresis step given both directed affinities.
    ///
    /// Connecting needs both above `connect_on`; disconnecting needs either
    /// below `connect_off`. Anything in between keeps the current state.
    pub fn next(self, f_ij: f64, f_ji: f64, connect_on: f64, connect_off: f64) -> Self {
        match self {
            PairState::Disconnected => {
                PairState::from_connected(f_ij > connect_on && f_ji > connect_on)
            }
            PairState::Connected => {
                PairState::from_connected(!(f_ij < connect_off || f_ji < connect_off))
            }
        }
    }
}

/// A pair whose state changed during a rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub a: usize,
    pub b: usize,
    pub state: PairState,
}

/// Undirected adjacency snapshot indexed by population position.
///
/// Built by `rebuild`, neighbor lists are in ascending index order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Adjacency {
    neighbors: Vec<Vec<usize>>,
}

impl Adjacency {
    /// `n` nodes, no edges.
    pub fn empty(n: usize) -> Self {
        Self {
            neighbors: vec![Vec::new(); n],
        }
    }

    /// Build from an undirected edge list. Self-loops and out-of-range
    /// endpoints are dropped, duplicates collapse.
    pub fn from_edges(n: usize, edges: &[(usize, usize)]) -> Self {
        let mut adj = Self::empty(n);
        for &(a, b) in edges {
            if a == b || a >= n || b >= n || adj.neighbors[a].contains(&b) {
                continue;
            }
            adj.neighbors[a].push(b);
            adj.neighbors[b].push(a);
        }
        for list in &mut adj.neighbors {
            list.sort_unstable();
        }
        adj
    }

    /// Each undirected edge once, as `(low, high)`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.neighbors
            .iter()
            .enumerate()
            .flat_map(|(a, list)| list.iter().filter(move |&&b| a < b).map(move |&b| (a, b)))
    }

    pub fn is_empty(&self) -> bool {
        self.neighbors.iter().all(|l| l.is_empty())
    }
}

impl Topology for Adjacency {
    fn node_count(&self) -> usize {
        self.neighbors.len()
    }

    fn neighbors(&self, node: usize) -> &[usize] {
        self.neighbors.get(node).map(|v| v.as_slice()).unwrap_or(&[])
    }

    fn is_connected(&self, a: usize, b: usize) -> bool {
        self.neighbors(a).binary_search(&b).is_ok()
    }
}

/// Evaluate every unordered pair against `previous` and return the next
/// adjacency plus the pairs whose state flipped.
pub fn rebuild(agents: &[Agent], previous: &Adjacency, params: &SimParams) -> (Adjacency, Vec<Transition>) {
    let n = agents.len();
    let mut next = Adjacency::empty(n);
    let mut transitions = Vec::new();

    for i in 0..n {
        for j in (i + 1)..n {
            let ai = &agents[i];
            let aj = &agents[j];
            let f_ij = ai.affinity_toward(&aj.id);
            let f_ji = aj.affinity_toward(&ai.id);

            let was = PairState::from_connected(previous.is_connected(i, j));
            let now = was.next(f_ij, f_ji, params.connect_on, params.connect_off);

            if now == PairState::Connected {
                next.neighbors[i].push(j);
                next.neighbors[j].push(i);
            }
            if now != was {
                transitions.push(Transition { a: i, b: j, state: now });
            }
        }
    }

    (next, transitions)
}

/// Rewrite every agent's `connections` from `adjacency`.
pub fn commit(agents: &mut [Agent], adjacency: &Adjacency) {
    let ids: Vec<AgentId> = agents.iter().map(|a| a.id.clone()).collect();
    for (i, agent) in agents.iter_mut().enumerate() {
        agent.connections = adjacency
            .neighbors(i)
            .iter()
            .filter_map(|&j| ids.get(j).cloned())
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::agent_at;

    fn pair(f_ab: f64, f_ba: f64) -> Vec<Agent> {
        let mut a = agent_at("a", 0.0, 0.0);
        let mut b = agent_at("b", 10.0, 0.0);
        a.affinity.insert(b.id.clone(), f_ab);
        b.affinity.insert(a.id.clone(), f_ba);
        vec![a, b]
    }

    fn set(agents: &mut [Agent], f_ab: f64, f_ba: f64) {
        let (a_id, b_id) = (agents[0].id.clone(), agents[1].id.clone());
        agents[0].affinity.insert(b_id, f_ab);
        agents[1].affinity.insert(a_id, f_ba);
    }

    #[test]
    fn state_machine_transitions() {
        use PairState::*;
        assert_eq!(Disconnected.next(0.5, 0.5, 0.3, 0.1), Connected);
        assert_eq!(Disconnected.next(0.5, 0.2, 0.3, 0.1), Disconnected);
        assert_eq!(Disconnected.next(0.3, 0.3, 0.3, 0.1), Disconnected);
        assert_eq!(Connected.next(0.15, 0.5, 0.3, 0.1), Connected);
        assert_eq!(Connected.next(0.1, 0.1, 0.3, 0.1), Connected);
        assert_eq!(Connected.next(0.05, 0.5, 0.3, 0.1), Disconnected);
    }

    #[test]
    fn hysteresis_deadband_holds_connection() {
        let params = SimParams::default();
        let mut agents = pair(0.5, 0.5);

        let (adj, transitions) = rebuild(&agents, &Adjacency::empty(2), &params);
        assert!(adj.is_connected(0, 1));
        assert_eq!(transitions, vec![Transition { a: 0, b: 1, state: PairState::Connected }]);

        set(&mut agents, 0.5, 0.15);
        let (adj, transitions) = rebuild(&agents, &adj, &params);
        assert!(adj.is_connected(0, 1), "deadband must keep the edge");
        assert!(transitions.is_empty());

        set(&mut agents, 0.5, 0.09);
        let (adj, transitions) = rebuild(&agents, &adj, &params);
        assert!(!adj.is_connected(0, 1));
        assert_eq!(transitions[0].state, PairState::Disconnected);

        // Back in the deadband but previously disconnected: stays apart.
        set(&mut agents, 0.5, 0.15);
        let (adj, _) = rebuild(&agents, &adj, &params);
        assert!(!adj.is_connected(0, 1));
    }

    #[test]
    fn missing_affinity_counts_as_zero() {
        let agents = vec![agent_at("a", 0.0, 0.0), agent_at("b", 1.0, 0.0)];
        let (adj, _) = rebuild(&agents, &Adjacency::empty(2), &SimParams::default());
        assert!(adj.is_empty());
    }

    #[test]
    fn commit_writes_both_directions() {
        let mut agents = vec![
            agent_at("a", 0.0, 0.0),
            agent_at("b", 1.0, 0.0),
            agent_at("c", 2.0, 0.0),
        ];
        let adj = Adjacency::from_edges(3, &[(0, 2), (1, 2)]);
        commit(&mut agents, &adj);

        assert_eq!(agents[0].connections, vec![AgentId::from("c")]);
        assert_eq!(agents[1].connections, vec![AgentId::from("c")]);
        assert_eq!(agents[2].connections, vec![AgentId::from("a"), AgentId::from("b")]);
    }

    #[test]
    fn rebuilt_lists_are_sorted_and_symmetric() {
        let mut agents: Vec<Agent> = (0..5)
            .map(|i| agent_at(&format!("n{}", i), i as f64, 0.0))
            .collect();
        let ids: Vec<AgentId> = agents.iter().map(|a| a.id.clone()).collect();
        for a in agents.iter_mut() {
            for id in &ids {
                if *id != a.id {
                    a.affinity.insert(id.clone(), 0.9);
                }
            }
        }
        let (adj, transitions) = rebuild(&agents, &Adjacency::empty(5), &SimParams::default());
        assert_eq!(transitions.len(), 10);
        assert_eq!(adj.edge_count(), 10);
        for i in 0..5 {
            let list = adj.neighbors(i);
            assert!(list.windows(2).all(|w| w[0] < w[1]));
            for &j in list {
                assert!(adj.is_connected(j, i));
            }
        }
    }

    #[test]
    fn from_edges_ignores_garbage() {
        let adj = Adjacency::from_edges(3, &[(0, 0), (0, 1), (1, 0), (2, 7)]);
        assert_eq!(adj.edges().collect::<Vec<_>>(), vec![(0, 1)]);
    }
}
