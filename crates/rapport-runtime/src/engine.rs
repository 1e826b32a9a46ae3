//! Simulation engine: owns the population and drives one frame at a time.
//!
//! Each step:
//! 1. Clamp the frame delta to `[0, MAX_FRAME_DT]`
//! 2. Move every agent (separation, friend attraction, wander, walls)
//! 3. Update directed affinities for every pair within sense radius
//! 4. Rebuild the friendship graph with hysteresis and commit it
//! 5. Refresh the id index and advance the frame counters
//!
//! The engine is single-threaded and never blocks. Queries borrow the
//! committed state between steps.

use crate::affinity::update_affinities;
use crate::connectivity::{self, Adjacency, PairState};
use crate::movement::integrate;
use crate::population::spawn_population;
use crate::query::{build_index, ContactSets, GraphQuery, GraphStats, MatchResult};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use rapport_core::error::{RapportError, Result};
use rapport_core::math::clamp;
use rapport_core::params::{ParamsPatch, SimParams, MAX_FRAME_DT};
use rapport_core::types::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Event emitted by the engine during a step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum EngineEvent {
    /// A pair crossed the connect-on threshold in both directions.
    Connected { a: AgentId, b: AgentId },
    /// A connected pair fell below connect-off in at least one direction.
    Disconnected { a: AgentId, b: AgentId },
    /// A frame completed.
    FrameComplete { frame: Frame, nodes: usize, edges: usize },
}

/// Graph statistics plus frame bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EngineStats {
    #[serde(flatten)]
    pub graph: GraphStats,
    pub frame: Frame,
    pub elapsed: f64,
    pub mean_degree: f64,
    pub density: f64,
}

/// Configuration for building an engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub width: f64,
    pub height: f64,
    pub agent_count: usize,
    /// Seed for the engine RNG. `None` draws one from the OS.
    pub rng_seed: Option<u64>,
    pub params: SimParams,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            agent_count: 80,
            rng_seed: None,
            params: SimParams::default(),
        }
    }
}

/// The social-proximity simulation.
pub struct SimulationEngine {
    agents: Vec<Agent>,
    arena: Arena,
    params: SimParams,
    adjacency: Adjacency,
    index: HashMap<AgentId, usize>,
    rng: SmallRng,
    generation: u64,
    frame: Frame,
    elapsed: f64,
}

impl SimulationEngine {
    /// Build a populated engine with an entropy-seeded RNG.
    pub fn new(width: f64, height: f64, agent_count: usize) -> Self {
        Self::with_rng(SmallRng::from_entropy(), width, height, agent_count, SimParams::default())
    }

    /// Build a populated engine whose every random draw follows `seed`.
    pub fn with_seed(width: f64, height: f64, agent_count: usize, seed: u64) -> Self {
        Self::with_rng(
            SmallRng::seed_from_u64(seed),
            width,
            height,
            agent_count,
            SimParams::default(),
        )
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self::with_rng(
            rng,
            config.width,
            config.height,
            config.agent_count,
            config.params.clone(),
        )
    }

    fn with_rng(rng: SmallRng, width: f64, height: f64, agent_count: usize, params: SimParams) -> Self {
        let mut engine = Self {
            agents: Vec::new(),
            arena: Arena::new(width, height),
            params,
            adjacency: Adjacency::default(),
            index: HashMap::new(),
            rng,
            generation: 0,
            frame: 0,
            elapsed: 0.0,
        };
        engine.reset(agent_count);
        engine
    }

    /// Set new bounds and build a fresh population inside them.
    pub fn initialize(&mut self, width: f64, height: f64, agent_count: usize) {
        self.arena = Arena::new(width, height);
        self.reset(agent_count);
    }

    /// Change the bounds used for wall reflection. Agents are not moved.
    pub fn resize(&mut self, width: f64, height: f64) {
        debug!(width, height, "Arena resized");
        self.arena = Arena::new(width, height);
    }

    /// Discard every agent and build a new generation of `agent_count`.
    ///
    /// Ids carry the generation number, so two resets never share an id.
    pub fn reset(&mut self, agent_count: usize) {
        self.generation += 1;
        self.agents = spawn_population(&mut self.rng, self.arena, agent_count, self.generation);
        self.adjacency = Adjacency::empty(agent_count);
        connectivity::commit(&mut self.agents, &self.adjacency);
        self.index = build_index(&self.agents);
        self.frame = 0;
        self.elapsed = 0.0;
        debug!(
            generation = self.generation,
            agents = agent_count,
            width = self.arena.width,
            height = self.arena.height,
            "Population reset"
        );
    }

    /// Merge `patch` into the live parameters. Takes effect next step.
    pub fn update_params(&mut self, patch: &ParamsPatch) {
        self.params.merge(patch);
        debug!(?patch, "Parameters updated");
    }

    pub fn params(&self) -> &SimParams {
        &self.params
    }

    /// Advance the simulation by `dt` seconds, clamped to `[0, MAX_FRAME_DT]`.
    pub fn step(&mut self, dt: f64) -> Vec<EngineEvent> {
        let dt = if dt.is_nan() { 0.0 } else { clamp(dt, 0.0, MAX_FRAME_DT) };

        integrate(
            &mut self.agents,
            &self.adjacency,
            &self.params,
            self.arena,
            dt,
            &mut self.rng,
        );
        update_affinities(&mut self.agents, &self.adjacency, &self.params, dt);

        let (next, transitions) = connectivity::rebuild(&self.agents, &self.adjacency, &self.params);
        connectivity::commit(&mut self.agents, &next);
        self.adjacency = next;
        self.index = build_index(&self.agents);

        self.frame += 1;
        self.elapsed += dt;

        let mut events = Vec::with_capacity(transitions.len() + 1);
        for t in transitions {
            let a = self.agents[t.a].id.clone();
            let b = self.agents[t.b].id.clone();
            match t.state {
                PairState::Connected => {
                    debug!(frame = self.frame, %a, %b, "Connected");
                    events.push(EngineEvent::Connected { a, b });
                }
                PairState::Disconnected => {
                    debug!(frame = self.frame, %a, %b, "Disconnected");
                    events.push(EngineEvent::Disconnected { a, b });
                }
            }
        }

        let nodes = self.agents.len();
        let edges = self.adjacency.edges().count();
        trace!(frame = self.frame, nodes, edges, "Frame complete");
        events.push(EngineEvent::FrameComplete {
            frame: self.frame,
            nodes,
            edges,
        });
        events
    }

    /// Run `frames` steps of `dt` seconds each.
    pub fn run(&mut self, frames: u64, dt: f64) -> Vec<Vec<EngineEvent>> {
        (0..frames).map(|_| self.step(dt)).collect()
    }

    /// Current population, read-only.
    pub fn snapshot(&self) -> &[Agent] {
        &self.agents
    }

    pub fn get_agent(&self, id: &AgentId) -> Option<&Agent> {
        self.index.get(id).and_then(|&i| self.agents.get(i))
    }

    /// Like `get_agent`, for hosts that want a typed error.
    pub fn require_agent(&self, id: &AgentId) -> Result<&Agent> {
        self.get_agent(id)
            .ok_or_else(|| RapportError::agent_not_found(id.as_str()))
    }

    /// Agent at population position `index`.
    pub fn agent_at(&self, index: usize) -> Result<&Agent> {
        self.agents
            .get(index)
            .ok_or_else(|| RapportError::index_out_of_range(index, self.agents.len()))
    }

    /// Borrow a query view over the committed state.
    pub fn query(&self) -> GraphQuery<'_> {
        GraphQuery::new(&self.agents, &self.index, &self.adjacency, &self.params)
    }

    pub fn pick_agent(&self, x: f64, y: f64, radius: f64) -> Option<AgentId> {
        self.query().pick_agent(x, y, radius)
    }

    pub fn find_path(&self, from: &AgentId, to: &AgentId) -> Vec<AgentId> {
        self.query().find_path(from, to)
    }

    pub fn contact_sets(&self, id: &AgentId, radius: f64) -> ContactSets {
        self.query().contact_sets(id, radius)
    }

    pub fn match_top_n(&self, id: &AgentId, n: usize) -> Vec<MatchResult> {
        self.query().match_top_n(id, n)
    }

    pub fn stats(&self) -> GraphStats {
        self.query().stats()
    }

    pub fn engine_stats(&self) -> EngineStats {
        let graph = self.stats();
        let n = graph.node_count as f64;
        let e = graph.edge_count as f64;
        let mean_degree = if graph.node_count > 0 { 2.0 * e / n } else { 0.0 };
        let density = if graph.node_count > 1 {
            2.0 * e / (n * (n - 1.0))
        } else {
            0.0
        };
        EngineStats {
            graph,
            frame: self.frame,
            elapsed: self.elapsed,
            mean_degree,
            density,
        }
    }

    pub fn adjacency(&self) -> &Adjacency {
        &self.adjacency
    }

    pub fn arena(&self) -> Arena {
        self.arena
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    /// Simulated seconds since the last reset.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
