// UI module - heads-up display and event panel drawn with egui

mod events;
mod hud;

// Re-export the public interface
pub use hud::{HudState, draw_hud};
