//! Hand-built agents for unit tests.

use rapport_core::types::*;
use std::collections::HashMap;

/// A resting agent at `(x, y)` with a fixed, neutral profile.
pub fn agent_at(id: &str, x: f64, y: f64) -> Agent {
    Agent {
        id: AgentId::from(id),
        name: id.to_string(),
        age: 30,
        gender: Gender::Male,
        interests: Interests::from_tags(&[InterestTag::Technology]),
        position: Vec2::new(x, y),
        velocity: Vec2::ZERO,
        wander: WanderState {
            dir: Vec2::new(1.0, 0.0),
            ttl: 1.0,
        },
        affinity: HashMap::new(),
        connections: Vec::new(),
    }
}

/// An agent at the origin with the given profile.
pub fn agent_with(id: &str, age: u32, gender: Gender, interests: &[InterestTag]) -> Agent {
    Agent {
        age,
        gender,
        interests: Interests::from_tags(interests),
        ..agent_at(id, 0.0, 0.0)
    }
}
