//! Trait for entities that occupy a square footprint inside the tank.
//!
//! Fish and food are both stored by their top-left corner and a diameter.
//! Every collision and matching rule works on the derived center and radius,
//! so those live here once.

use ndarray::Array1;

/// Trait for entities with a position and a size.
///
/// Any type that implements this trait:
/// - Has a top-left position in 2D space
/// - Has a diameter (`size`)
/// - Gets `center` and `radius` for free
pub trait Locatable {
    /// Returns a reference to the entity's top-left position.
    fn pos(&self) -> &Array1<f32>;

    /// Returns a mutable reference to the entity's top-left position.
    fn pos_mut(&mut self) -> &mut Array1<f32>;

    /// Returns the entity's diameter.
    fn size(&self) -> f32;

    /// Half the diameter.
    fn radius(&self) -> f32 {
        self.size() / 2.0
    }

    /// Position offset by the radius on both axes.
    fn center(&self) -> Array1<f32> {
        self.pos() + self.radius()
    }
}
