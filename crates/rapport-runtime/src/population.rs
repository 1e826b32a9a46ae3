//! Population: randomized construction of a fresh agent generation.
//!
//! All randomness flows through the caller's RNG so a seeded source
//! reproduces the same population.

use rand::Rng;
use rapport_core::math::{rand_range, rand_unit};
use rapport_core::params::WANDER_TTL_RANGE;
use rapport_core::types::*;
use std::collections::HashMap;

/// Distance kept between spawn positions and the arena edge.
const SPAWN_MARGIN: f64 = 40.0;
/// Initial velocity components are drawn from `[-v, v)`.
const SPAWN_SPEED: f64 = 30.0;
const MIN_AGE: u32 = 18;
const MAX_AGE: u32 = 65;
const MIN_INTERESTS: usize = 2;
const MAX_INTERESTS: usize = 4;

/// Build `count` agents for population `generation` inside `arena`.
pub fn spawn_population<R: Rng + ?Sized>(
    rng: &mut R,
    arena: Arena,
    count: usize,
    generation: u64,
) -> Vec<Agent> {
    (0..count)
        .map(|i| spawn_agent(rng, arena, generation, i))
        .collect()
}

/// Build the `index`-th agent of a generation with zero affinity and no
/// connections.
pub fn spawn_agent<R: Rng + ?Sized>(
    rng: &mut R,
    arena: Arena,
    generation: u64,
    index: usize,
) -> Agent {
    let id = AgentId::generate(rng, generation, index);
    let gender = if rng.gen_bool(0.5) {
        Gender::Male
    } else {
        Gender::Female
    };

    Agent {
        id,
        name: format!("User-{}", 1000 + index),
        age: rng.gen_range(MIN_AGE..=MAX_AGE),
        gender,
        interests: random_interests(rng),
        position: Vec2::new(
            spawn_coordinate(rng, arena.width),
            spawn_coordinate(rng, arena.height),
        ),
        velocity: Vec2::new(
            rand_range(rng, -SPAWN_SPEED, SPAWN_SPEED),
            rand_range(rng, -SPAWN_SPEED, SPAWN_SPEED),
        ),
        wander: WanderState {
            dir: rand_unit(rng),
            ttl: rand_range(rng, WANDER_TTL_RANGE.0, WANDER_TTL_RANGE.1),
        },
        affinity: HashMap::new(),
        connections: Vec::new(),
    }
}

/// Between two and four distinct interests, chosen uniformly.
pub fn random_interests<R: Rng + ?Sized>(rng: &mut R) -> Interests {
    let k = rng.gen_range(MIN_INTERESTS..=MAX_INTERESTS);
    let chosen = rand::seq::index::sample(rng, INTEREST_DIM, k);
    let mut bits = [0u8; INTEREST_DIM];
    for idx in chosen.iter() {
        bits[idx] = 1;
    }
    Interests::from_bits(bits)
}

fn spawn_coordinate<R: Rng + ?Sized>(rng: &mut R, extent: f64) -> f64 {
    if extent > 2.0 * SPAWN_MARGIN {
        rand_range(rng, SPAWN_MARGIN, extent - SPAWN_MARGIN)
    } else {
        rand_range(rng, 0.0, extent.max(0.0))
    }
}
