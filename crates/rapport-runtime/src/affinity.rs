//! Affinity engine: directed, decaying, bounded pairwise attraction.
//!
//! For every ordered pair within sense radius, agent `i`'s affinity toward
//! `j` decays exponentially toward zero and is pushed by the signed match
//! score minus a crowding penalty. Pairs outside the radius are untouched,
//! so an entry that is never sensed again keeps its last value.

use rapport_core::math::{clamp, cosine01};
use rapport_core::params::{SimParams, OPPOSITE_GENDER_PREFERENCE, SAME_GENDER_PREFERENCE};
use rapport_core::topology::{mutual_count, Topology};
use rapport_core::types::*;

/// Saturation constant of the mutual-friends term `m / (m + K)`.
const MUTUAL_SATURATION: f64 = 3.0;

/// Weighted compatibility of `a` toward `b`, clamped to [0, 1].
///
/// Interest, age and gender terms are symmetric; only the supplied
/// `mutual` count can make the score differ between directions.
pub fn match_score(a: &Agent, b: &Agent, params: &SimParams, mutual: usize) -> f64 {
    let interest_sim = cosine01(&a.interests, &b.interests);
    let age_gap = (f64::from(a.age) - f64::from(b.age)).abs();
    let age_sim = (-age_gap / params.age_scale).exp();
    let gender_pref = if a.gender == b.gender {
        SAME_GENDER_PREFERENCE
    } else {
        OPPOSITE_GENDER_PREFERENCE
    };
    let mutual = mutual as f64;
    let mutual_sim = mutual / (mutual + MUTUAL_SATURATION);

    let score = params.w_interest * interest_sim
        + params.w_age * age_sim
        + params.w_gender * gender_pref
        + params.w_mutual * mutual_sim;
    clamp(score, 0.0, 1.0)
}

/// Crowding penalty in [0, 2]: zero at or beyond `personal_space`, rising
/// linearly as the pair closes in.
pub fn crowding(distance: f64, personal_space: f64) -> f64 {
    if distance < personal_space {
        clamp((personal_space - distance) / personal_space, 0.0, 2.0)
    } else {
        0.0
    }
}

/// One frame of affinity update for a single directed pair.
pub fn next_affinity(old: f64, score: f64, crowd: f64, params: &SimParams, dt: f64) -> f64 {
    let signed_match = (score - 0.5) * 2.0;
    let decayed = old * (-params.forget_rate * dt).exp();
    let updated = decayed + dt * (params.match_rate * signed_match - params.crowd_rate * crowd);
    clamp(updated, -1.0, 1.0)
}

/// Update every directed affinity for pairs within sense radius.
///
/// `previous` is last frame's committed adjacency and only feeds the
/// mutual-friends term.
pub fn update_affinities(agents: &mut [Agent], previous: &dyn Topology, params: &SimParams, dt: f64) {
    let n = agents.len();
    let mut updates: Vec<(AgentId, f64)> = Vec::new();

    for i in 0..n {
        {
            let ai = &agents[i];
            for (j, aj) in agents.iter().enumerate() {
                if i == j {
                    continue;
                }
                let d = ai.position.distance_to(&aj.position);
                if d > params.sense_radius {
                    continue;
                }
                let score = match_score(ai, aj, params, mutual_count(previous, i, j));
                let crowd = crowding(d, params.personal_space);
                let value = next_affinity(ai.affinity_toward(&aj.id), score, crowd, params, dt);
                updates.push((aj.id.clone(), value));
            }
        }
        agents[i].affinity.extend(updates.drain(..));
    }
}
