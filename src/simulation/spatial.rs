//! Spatial indexing for efficient neighbor queries.
//!
//! Provides KD-trees over fish and food centers, rebuilt whenever positions change.

use kdtree::distance::squared_euclidean;
use kdtree::{ErrorKind as KdTreeError, KdTree};
use ndarray::Array1;

use super::fish::Fish;
use super::food::FoodItem;
use super::locatable::Locatable;

/// Type alias for 2D spatial KD-tree used for efficient neighbor queries.
pub type Tree2D = KdTree<f32, usize, Vec<f32>>;

/// Result of a spatial radius query: (`distance_squared`, index) pairs.
pub type SpatialQueryResult = Vec<(f32, usize)>;

/// Spatial index over the centers of fish and food.
pub struct SpatialIndex {
    fish: Tree2D,
    food: Tree2D,
    max_fish_radius: f32,
}

impl SpatialIndex {
    /// Builds a spatial index from the current fish and food.
    ///
    /// Entities whose center is not finite are left out of the index.
    pub fn build(fishes: &[Fish], food: &[FoodItem]) -> Self {
        let max_fish_radius = fishes
            .iter()
            .map(Locatable::radius)
            .filter(|r| r.is_finite())
            .fold(0.0f32, f32::max);

        Self {
            fish: build_tree(fishes),
            food: build_tree(food),
            max_fish_radius,
        }
    }

    /// Largest fish radius at build time.
    pub fn max_fish_radius(&self) -> f32 {
        self.max_fish_radius
    }

    /// Query fish whose center lies within `radius` of `pos`.
    pub fn query_fish(&self, pos: &Array1<f32>, radius: f32) -> SpatialQueryResult {
        query(&self.fish, pos, radius)
    }

    /// Query food whose center lies within `radius` of `pos`.
    pub fn query_food(&self, pos: &Array1<f32>, radius: f32) -> SpatialQueryResult {
        query(&self.food, pos, radius)
    }

    /// Index of the food item whose center is nearest to `pos`.
    pub fn nearest_food(&self, pos: &Array1<f32>) -> Option<usize> {
        self.food
            .nearest(&pos.to_vec(), 1, &squared_euclidean)
            .unwrap_or_default()
            .first()
            .map(|&(_, idx)| *idx)
    }
}

fn query(tree: &Tree2D, pos: &Array1<f32>, radius: f32) -> SpatialQueryResult {
    tree.within(&pos.to_vec(), radius.powi(2), &squared_euclidean)
        .unwrap_or_default()
        .into_iter()
        .map(|(dist, &idx)| (dist, idx))
        .collect()
}

/// Helper function to build a KD-tree from the centers of a collection of items.
fn build_tree<T: Locatable>(items: &[T]) -> Tree2D {
    let mut tree = KdTree::with_capacity(2, items.len().max(1));
    for (i, item) in items.iter().enumerate() {
        if let Err(e) = tree.add(item.center().to_vec(), i) {
            log_skipped(i, &e);
        }
    }
    tree
}

fn log_skipped(idx: usize, err: &KdTreeError) {
    tracing::warn!(index = idx, error = ?err, "entity left out of spatial index");
}
