//! Shared types used across all rapport crates.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};
use uuid::Uuid;

/// Number of interest tags every agent carries.
pub const INTEREST_DIM: usize = 12;

/// Unique identifier for an agent within one population generation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(pub String);

impl AgentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate the id for the `index`-th agent of population `generation`.
    ///
    /// The random suffix comes from a v4 UUID built out of `rng` bytes, so a
    /// seeded source yields the same ids on every run.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, generation: u64, index: usize) -> Self {
        let uuid = uuid::Builder::from_random_bytes(rng.gen()).into_uuid();
        let suffix: String = uuid.simple().to_string().chars().take(8).collect();
        Self(format!("A-{}-{}-{}", generation, index, suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AgentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for AgentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<Uuid> for AgentId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid.to_string())
    }
}

/// A 2D vector: positions, velocities, accelerations and directions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn distance_to(&self, other: &Vec2) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Unit vector in the same direction; zero for near-zero input.
    pub fn normalize(&self) -> Vec2 {
        let len = self.length();
        if len < 1e-9 {
            return Vec2::ZERO;
        }
        Vec2::new(self.x / len, self.y / len)
    }

    /// Cap the magnitude at `max_len`, preserving direction.
    pub fn clamp_magnitude(&self, max_len: f64) -> Vec2 {
        let len = self.length();
        if len <= max_len {
            return *self;
        }
        let k = max_len / (len + 1e-9);
        Vec2::new(self.x * k, self.y * k)
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;
    fn mul(self, s: f64) -> Vec2 {
        Vec2::new(self.x * s, self.y * s)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

/// Rectangular arena `[0, width] x [0, height]` agents bounce inside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f64,
    pub height: f64,
}

impl Arena {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, p: &Vec2) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }
}

/// Binary gender category used by the match score's preference term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

/// The twelve interest tags, in vector index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InterestTag {
    Technology,
    Art,
    Sports,
    Politics,
    Finance,
    Music,
    Movies,
    Gaming,
    Fitness,
    Travel,
    Food,
    Reading,
}

impl InterestTag {
    pub const ALL: [InterestTag; INTEREST_DIM] = [
        InterestTag::Technology,
        InterestTag::Art,
        InterestTag::Sports,
        InterestTag::Politics,
        InterestTag::Finance,
        InterestTag::Music,
        InterestTag::Movies,
        InterestTag::Gaming,
        InterestTag::Fitness,
        InterestTag::Travel,
        InterestTag::Food,
        InterestTag::Reading,
    ];

    /// Position of this tag in an interest vector.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Fixed-length binary interest vector. Entries are always 0 or 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Interests([u8; INTEREST_DIM]);

impl Interests {
    /// Build from raw entries; any non-zero entry becomes 1.
    pub fn from_bits(bits: [u8; INTEREST_DIM]) -> Self {
        Self(bits.map(|b| u8::from(b != 0)))
    }

    pub fn from_tags(tags: &[InterestTag]) -> Self {
        let mut bits = [0u8; INTEREST_DIM];
        for tag in tags {
            bits[tag.index()] = 1;
        }
        Self(bits)
    }

    pub fn has(&self, tag: InterestTag) -> bool {
        self.0[tag.index()] == 1
    }

    pub fn bits(&self) -> &[u8; INTEREST_DIM] {
        &self.0
    }

    pub fn tags(&self) -> Vec<InterestTag> {
        InterestTag::ALL
            .iter()
            .copied()
            .filter(|t| self.has(*t))
            .collect()
    }

    /// Number of interests set.
    pub fn count(&self) -> usize {
        self.0.iter().filter(|b| **b == 1).count()
    }
}

/// Piecewise-constant random walk state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WanderState {
    /// Unit direction of the wander acceleration.
    pub dir: Vec2,
    /// Seconds of simulated time until the direction is redrawn.
    pub ttl: f64,
}

/// One simulated individual.
#[derive(Debug, Clone, Serialize)]
pub struct Agent {
    pub id: AgentId,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub interests: Interests,

    pub position: Vec2,
    pub velocity: Vec2,
    pub wander: WanderState,

    /// Directed affinity toward other agents, each value in [-1, 1].
    /// Only pairs that have ever been within sense radius have an entry.
    pub affinity: HashMap<AgentId, f64>,

    /// Undirected neighbor ids, rebuilt every frame by the connectivity pass.
    pub connections: Vec<AgentId>,
}

impl Agent {
    /// Current affinity toward `other`, zero when never sensed.
    pub fn affinity_toward(&self, other: &AgentId) -> f64 {
        self.affinity.get(other).copied().unwrap_or(0.0)
    }

    pub fn is_connected_to(&self, other: &AgentId) -> bool {
        self.connections.iter().any(|c| c == other)
    }
}

/// Monotonic frame counter.
pub type Frame = u64;

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn vector_ops_compose() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(3.0, -1.0);
        assert_eq!(a + b, Vec2::new(4.0, 1.0));
        assert_eq!(a - b, Vec2::new(-2.0, 3.0));
        assert_eq!(a * 2.0, Vec2::new(2.0, 4.0));
        assert_eq!(-a, Vec2::new(-1.0, -2.0));
    }

    #[test]
    fn normalize_zero_is_zero() {
        assert_eq!(Vec2::ZERO.normalize(), Vec2::ZERO);
        let n = Vec2::new(3.0, 4.0).normalize();
        assert!((n.length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn clamp_magnitude_preserves_direction() {
        let v = Vec2::new(30.0, 40.0).clamp_magnitude(10.0);
        assert!((v.length() - 10.0).abs() < 1e-6);
        assert!((v.x / v.y - 0.75).abs() < 1e-9);

        let short = Vec2::new(1.0, 1.0);
        assert_eq!(short.clamp_magnitude(10.0), short);
    }

    #[test]
    fn interests_are_binary() {
        let i = Interests::from_bits([0, 2, 1, 0, 0, 7, 0, 0, 0, 0, 0, 1]);
        assert!(i.bits().iter().all(|b| *b == 0 || *b == 1));
        assert_eq!(i.count(), 4);
        assert!(i.has(InterestTag::Art));
        assert!(i.has(InterestTag::Reading));
    }

    #[test]
    fn interests_from_tags_round_trip() {
        let tags = [InterestTag::Technology, InterestTag::Gaming, InterestTag::Travel];
        let i = Interests::from_tags(&tags);
        assert_eq!(i.tags(), tags.to_vec());
        assert_eq!(i.bits(), &[1, 0, 0, 0, 0, 0, 0, 1, 0, 1, 0, 0]);
    }

    #[test]
    fn generated_ids_are_deterministic_per_seed() {
        let mut a = SmallRng::seed_from_u64(7);
        let mut b = SmallRng::seed_from_u64(7);
        let id_a = AgentId::generate(&mut a, 1, 3);
        let id_b = AgentId::generate(&mut b, 1, 3);
        assert_eq!(id_a, id_b);
        assert!(id_a.as_str().starts_with("A-1-3-"));
        assert_eq!(id_a.as_str().len(), "A-1-3-".len() + 8);
    }

    #[test]
    fn agent_id_serializes_as_plain_string() {
        let id = AgentId::from("A-0-1-deadbeef");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"A-0-1-deadbeef\"");
    }
}
