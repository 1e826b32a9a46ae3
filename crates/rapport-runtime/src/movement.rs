//! Movement integrator: separation, friend attraction and wander.
//!
//! Each frame:
//! 1. Pairwise separation forces from start-of-frame positions
//! 2. Attraction toward every connected agent
//! 3. Wander acceleration along a piecewise-constant random direction
//! 4. Semi-implicit Euler with exponential drag and a speed cap
//! 5. Lossy reflection off the arena walls
//!
//! Accelerations are fully accumulated before any agent moves.

use rand::Rng;
use rapport_core::math::{clamp, exp_damp_factor, rand_range, rand_unit};
use rapport_core::params::{SimParams, DEGENERATE_DISTANCE, WANDER_TTL_RANGE};
use rapport_core::topology::Topology;
use rapport_core::types::*;

/// Advance kinematics of every agent by `dt` seconds.
///
/// `friends` is the adjacency committed at the end of the previous frame.
pub fn integrate<R: Rng + ?Sized>(
    agents: &mut [Agent],
    friends: &dyn Topology,
    params: &SimParams,
    arena: Arena,
    dt: f64,
    rng: &mut R,
) {
    let mut acc = vec![Vec2::ZERO; agents.len()];

    accumulate_separation(agents, params, &mut acc);
    accumulate_attraction(agents, friends, params, &mut acc);
    accumulate_wander(agents, params, dt, rng, &mut acc);

    let damp = exp_damp_factor(params.drag, dt);
    for (agent, a) in agents.iter_mut().zip(acc) {
        agent.velocity = agent.velocity + a * dt;
        agent.velocity = agent.velocity * damp;
        agent.velocity = agent.velocity.clamp_magnitude(params.v_max);
        agent.position += agent.velocity * dt;
        reflect(agent, arena, params.restitution);
    }
}

/// Linear soft repulsion for every unordered pair closer than `sep_range`.
pub fn accumulate_separation(agents: &[Agent], params: &SimParams, acc: &mut [Vec2]) {
    let n = agents.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let pi = agents[i].position;
            let pj = agents[j].position;
            let d = pi.distance_to(&pj);
            if d <= DEGENERATE_DISTANCE || d >= params.sep_range {
                continue;
            }
            // j -> i
            let dir = (pi - pj).normalize();
            let overlap = (params.sep_range - d) / params.sep_range;
            let push = dir * (params.sep_strength * overlap);
            acc[i] += push;
            acc[j] += -push;
        }
    }
}

/// Pull toward each connected agent, scaled by distance as a fraction of
/// the sense radius so it saturates far away and vanishes up close.
pub fn accumulate_attraction(
    agents: &[Agent],
    friends: &dyn Topology,
    params: &SimParams,
    acc: &mut [Vec2],
) {
    for (i, agent) in agents.iter().enumerate() {
        for &j in friends.neighbors(i) {
            let Some(friend) = agents.get(j) else {
                continue;
            };
            let d = agent.position.distance_to(&friend.position);
            if d < DEGENERATE_DISTANCE {
                continue;
            }
            let dir = (friend.position - agent.position).normalize();
            let strength = params.friend_attract * clamp(d / params.sense_radius, 0.0, 1.0);
            acc[i] += dir * strength;
        }
    }
}

/// Count down each wander timer, redraw expired directions, and add the
/// wander acceleration.
pub fn accumulate_wander<R: Rng + ?Sized>(
    agents: &mut [Agent],
    params: &SimParams,
    dt: f64,
    rng: &mut R,
    acc: &mut [Vec2],
) {
    for (agent, a) in agents.iter_mut().zip(acc.iter_mut()) {
        agent.wander.ttl -= dt;
        if agent.wander.ttl <= 0.0 {
            agent.wander.dir = rand_unit(rng);
            agent.wander.ttl = rand_range(rng, WANDER_TTL_RANGE.0, WANDER_TTL_RANGE.1);
        }
        *a += agent.wander.dir * params.wander_accel;
    }
}

/// Clamp a coordinate that left the arena back to the wall and bounce the
/// matching velocity component with `restitution`.
pub fn reflect(agent: &mut Agent, arena: Arena, restitution: f64) {
    if agent.position.x < 0.0 {
        agent.position.x = 0.0;
        agent.velocity.x = -agent.velocity.x * restitution;
    } else if agent.position.x > arena.width {
        agent.position.x = arena.width;
        agent.velocity.x = -agent.velocity.x * restitution;
    }

    if agent.position.y < 0.0 {
        agent.position.y = 0.0;
        agent.velocity.y = -agent.velocity.y * restitution;
    } else if agent.position.y > arena.height {
        agent.position.y = arena.height;
        agent.velocity.y = -agent.velocity.y * restitution;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::agent_at;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn still_params() -> SimParams {
        SimParams {
            wander_accel: 0.0,
            drag: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn separation_is_equal_and_opposite() {
        let agents = vec![agent_at("a", 100.0, 100.0), agent_at("b", 110.0, 100.0)];
        let mut acc = vec![Vec2::ZERO; 2];
        accumulate_separation(&agents, &SimParams::default(), &mut acc);

        // overlap = (25 - 10) / 25 = 0.6, force = 500 * 0.6 = 300
        assert!((acc[0].x + 300.0).abs() < 1e-9);
        assert!((acc[1].x - 300.0).abs() < 1e-9);
        assert_eq!(acc[0].y, 0.0);
    }

    #[test]
    fn separation_skips_coincident_and_distant_pairs() {
        let agents = vec![
            agent_at("a", 50.0, 50.0),
            agent_at("b", 50.0, 50.0),
            agent_at("c", 300.0, 300.0),
        ];
        let mut acc = vec![Vec2::ZERO; 3];
        accumulate_separation(&agents, &SimParams::default(), &mut acc);
        assert!(acc.iter().all(|a| *a == Vec2::ZERO));
    }

    #[test]
    fn attraction_saturates_at_sense_radius() {
        let agents = vec![agent_at("a", 0.0, 0.0), agent_at("b", 400.0, 0.0)];
        let friends = vec![vec![1], vec![0]];
        let mut acc = vec![Vec2::ZERO; 2];
        accumulate_attraction(&agents, &friends, &SimParams::default(), &mut acc);
        assert!((acc[0].x - 30.0).abs() < 1e-9);
        assert!((acc[1].x + 30.0).abs() < 1e-9);
    }

    #[test]
    fn attraction_sums_over_all_friends() {
        let agents = vec![
            agent_at("a", 100.0, 100.0),
            agent_at("b", 175.0, 100.0),
            agent_at("c", 100.0, 175.0),
        ];
        let friends = vec![vec![1, 2], vec![0], vec![0]];
        let mut acc = vec![Vec2::ZERO; 3];
        accumulate_attraction(&agents, &friends, &SimParams::default(), &mut acc);
        // 30 * 75/150 = 15 toward each friend
        assert!((acc[0].x - 15.0).abs() < 1e-9);
        assert!((acc[0].y - 15.0).abs() < 1e-9);
    }

    #[test]
    fn wander_redraws_only_when_expired() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut agents = vec![agent_at("a", 10.0, 10.0), agent_at("b", 20.0, 20.0)];
        agents[0].wander.ttl = 0.01;
        agents[1].wander.ttl = 1.0;
        let kept_dir = agents[1].wander.dir;
        let mut acc = vec![Vec2::ZERO; 2];

        accumulate_wander(&mut agents, &SimParams::default(), 0.02, &mut rng, &mut acc);

        assert!((0.5..1.2).contains(&agents[0].wander.ttl));
        assert!((agents[0].wander.dir.length() - 1.0).abs() < 1e-9);
        assert_eq!(agents[1].wander.dir, kept_dir);
        assert!((agents[1].wander.ttl - 0.98).abs() < 1e-12);
        assert!((acc[1].length() - 35.0).abs() < 1e-9);
    }

    #[test]
    fn speed_is_capped() {
        let mut rng = SmallRng::seed_from_u64(6);
        let mut agents = vec![agent_at("a", 400.0, 300.0)];
        agents[0].velocity = Vec2::new(1000.0, 0.0);
        let arena = Arena::new(800.0, 600.0);
        let empty: Vec<Vec<usize>> = vec![vec![]];

        integrate(&mut agents, &empty, &still_params(), arena, 0.01, &mut rng);

        assert!(agents[0].velocity.length() <= 120.0 + 1e-6);
        assert!((agents[0].position.x - (400.0 + agents[0].velocity.x * 0.01)).abs() < 1e-9);
    }

    #[test]
    fn drag_decays_velocity() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut agents = vec![agent_at("a", 400.0, 300.0)];
        agents[0].velocity = Vec2::new(50.0, 0.0);
        let params = SimParams {
            wander_accel: 0.0,
            ..Default::default()
        };
        let empty: Vec<Vec<usize>> = vec![vec![]];

        integrate(&mut agents, &empty, &params, Arena::new(800.0, 600.0), 0.05, &mut rng);

        let expected = 50.0 * (-3.0f64 * 0.05).exp();
        assert!((agents[0].velocity.x - expected).abs() < 1e-9);
    }

    #[test]
    fn walls_reflect_with_restitution() {
        let arena = Arena::new(100.0, 100.0);
        let mut a = agent_at("a", -5.0, 120.0);
        a.velocity = Vec2::new(-10.0, 20.0);
        reflect(&mut a, arena, 0.85);

        assert_eq!(a.position, Vec2::new(0.0, 100.0));
        assert!((a.velocity.x - 8.5).abs() < 1e-12);
        assert!((a.velocity.y + 17.0).abs() < 1e-12);
    }

    #[test]
    fn agents_stay_in_arena_over_many_frames() {
        let mut rng = SmallRng::seed_from_u64(8);
        let arena = Arena::new(200.0, 150.0);
        let mut agents = crate::population::spawn_population(&mut rng, arena, 30, 1);
        let empty: Vec<Vec<usize>> = vec![Vec::new(); 30];
        for _ in 0..500 {
            integrate(&mut agents, &empty, &SimParams::default(), arena, 0.05, &mut rng);
        }
        assert!(agents.iter().all(|a| arena.contains(&a.position)));
    }
}
