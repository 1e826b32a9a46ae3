//! Stateless numeric helpers used by the movement and affinity passes.

use crate::types::{Interests, Vec2};
use rand::Rng;
use std::f64::consts::TAU;

/// Clamp `v` into `[lo, hi]`.
///
/// Unlike `f64::clamp` this never panics when `lo > hi`; the lower bound wins.
/// Parameters are accepted unvalidated, so inverted bounds can occur.
pub fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    lo.max(hi.min(v))
}

/// Velocity multiplier for exponential drag over `dt` seconds.
pub fn exp_damp_factor(drag: f64, dt: f64) -> f64 {
    (-drag * dt).exp()
}

/// Cosine similarity of two binary interest vectors.
///
/// Entries are non-negative so the result already lies in [0, 1]. An empty
/// vector on either side scores zero.
pub fn cosine01(a: &Interests, b: &Interests) -> f64 {
    let mut dot = 0.0;
    let mut na = 0.0;
    let mut nb = 0.0;
    for (x, y) in a.bits().iter().zip(b.bits().iter()) {
        let (x, y) = (f64::from(*x), f64::from(*y));
        dot += x * y;
        na += x * x;
        nb += y * y;
    }
    if na < 1e-9 || nb < 1e-9 {
        return 0.0;
    }
    clamp(dot / (na.sqrt() * nb.sqrt()), 0.0, 1.0)
}

/// Uniform draw in `[lo, hi)`. Returns `lo` for an empty or inverted range.
pub fn rand_range<R: Rng + ?Sized>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    if hi <= lo {
        return lo;
    }
    rng.gen_range(lo..hi)
}

/// Uniformly distributed direction on the unit circle.
pub fn rand_unit<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    let angle = rng.gen_range(0.0..TAU);
    Vec2::new(angle.cos(), angle.sin())
}
