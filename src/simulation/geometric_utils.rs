//! Geometric utility functions for distance calculations and tank bounds.

use geo::algorithm::Distance;
use geo::{Euclidean, Point};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Width and height of the tank, in simulation units.
///
/// Entity positions are top-left corners, so an entity of size `s` stays
/// inside when its position lies in `[0, width - s] x [0, height - s]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Horizontal extent of the tank.
    pub width: f32,
    /// Vertical extent of the tank.
    pub height: f32,
}

impl Bounds {
    /// Creates bounds of the given size.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Largest top-left coordinate an entity of `size` may take on each axis.
    ///
    /// Never negative, so a tank narrower than the entity pins it at zero.
    pub fn limits(&self, size: f32) -> [f32; 2] {
        [
            (self.width - size).max(0.0),
            (self.height - size).max(0.0),
        ]
    }

    /// Checks whether a point lies inside the tank (edges included).
    pub fn contains(&self, point: &Array1<f32>) -> bool {
        point[0] >= 0.0 && point[0] <= self.width && point[1] >= 0.0 && point[1] <= self.height
    }
}

/// Calculates the Euclidean distance between two 2D points.
pub fn distance(a: &Array1<f32>, b: &Array1<f32>) -> f32 {
    Euclidean.distance(Point::new(a[0], a[1]), Point::new(b[0], b[1]))
}

/// Returns the unit vector pointing from `from` to `to`, together with the distance.
///
/// # Returns
///
/// `None` when the points coincide or the distance is not finite.
pub fn direction(from: &Array1<f32>, to: &Array1<f32>) -> Option<(Array1<f32>, f32)> {
    let dist = distance(from, to);
    if dist <= 0.0 || !dist.is_finite() {
        return None;
    }
    Some(((to - from) / dist, dist))
}

/// Tank edge an entity was pushed back from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// The left or top wall.
    Low,
    /// The right or bottom wall.
    High,
}

/// Clamps a top-left position so an entity of `size` stays inside `bounds`.
///
/// Non-finite coordinates are reset to zero.
///
/// # Returns
///
/// Per axis, the edge the position touched or crossed, if any.
pub fn clamp_to_bounds(pos: &mut Array1<f32>, size: f32, bounds: &Bounds) -> [Option<Edge>; 2] {
    let limits = bounds.limits(size);
    let mut touched = [None; 2];

    for axis in 0..2 {
        if !pos[axis].is_finite() || pos[axis] <= 0.0 {
            pos[axis] = 0.0;
            touched[axis] = Some(Edge::Low);
        } else if pos[axis] >= limits[axis] {
            pos[axis] = limits[axis];
            touched[axis] = Some(Edge::High);
        }
    }

    touched
}
