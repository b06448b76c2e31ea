use std::path::PathBuf;

use aquarium::simulation::geometric_utils::Bounds;
use aquarium::simulation::params::{Params, ParamsError};
use aquarium::simulation::tank::{Notification, Tank};
use clap::Parser;
use macroquad::prelude::*;
use ndarray::Array1;
use tracing_subscriber::EnvFilter;

mod graphics;
mod ui;

/// Ticks run per frame at most, so a stalled frame does not snowball.
const MAX_TICKS_PER_FRAME: u32 = 5;
/// How long the level-complete banner stays up, in simulation time.
const BANNER_DURATION: f32 = 2000.0;

#[derive(Parser, Debug)]
#[command(name = "aquarium", about = "Grow a fish population, one level at a time")]
struct Cli {
    /// JSON file with simulation parameters
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Aquarium".to_owned(),
        window_width: 1040,
        window_height: 600,
        ..Default::default()
    }
}

fn load_params(cli: &Cli) -> Result<Params, ParamsError> {
    match &cli.config {
        Some(path) => Params::load_from_file(path),
        None => Ok(Params::default()),
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("aquarium=info")),
        )
        .init();

    let cli = Cli::parse();
    let params = match load_params(&cli) {
        Ok(params) => params,
        Err(e) => {
            tracing::error!("could not load parameters: {}", e);
            return;
        }
    };

    tracing::info!(seed = ?cli.seed, "starting aquarium");

    let tick_interval = params.tick_interval;
    let food_size = params.food_size;
    let mut tank = match cli.seed {
        Some(seed) => Tank::with_seed(params, seed),
        None => Tank::new(params),
    };

    let mut hud = ui::HudState::new();
    let mut accumulator = 0.0f32;
    let mut dragging = false;
    let mut banner: Option<(String, f32)> = None;

    loop {
        clear_background(DARKBLUE);

        let tank_width = (screen_width() - hud.panel_width).max(1.0);
        let tank_height = screen_height().max(1.0);
        let bounds = Bounds::new(tank_width, tank_height);

        // pointer input is applied between ticks
        let (mx, my) = mouse_position();
        let point = Array1::from_vec(vec![mx, my]);
        if is_mouse_button_down(MouseButton::Left) && (dragging || !hud.pointer_over_ui) {
            dragging = true;
            tank.on_drag_move(point.clone());
        }
        if dragging && is_mouse_button_released(MouseButton::Left) {
            dragging = false;
            hud.last_drop = Some(tank.on_drag_release(point));
        }

        accumulator += get_frame_time() * 1000.0;
        let mut ticks = 0;
        while accumulator >= tick_interval && ticks < MAX_TICKS_PER_FRAME {
            tank.tick(tick_interval, bounds);
            accumulator -= tick_interval;
            ticks += 1;
        }
        if ticks == MAX_TICKS_PER_FRAME {
            accumulator = 0.0;
        }

        for notification in tank.drain_notifications() {
            match notification {
                Notification::LevelComplete { level } => {
                    banner = Some((format!("Level {} complete!", level), tank.time));
                    hud.clear_history();
                }
                Notification::Defeated { level } => {
                    banner = Some((format!("Defeated on level {}", level), f32::INFINITY));
                }
            }
        }

        if hud.restart_requested {
            hud.restart_requested = false;
            tank.restart();
            hud.clear_history();
            banner = None;
        }

        let snapshot = tank.snapshot();
        hud.update_history(&snapshot);

        graphics::draw_tank(tank_width, tank_height);
        graphics::draw_food(&snapshot);
        graphics::draw_fish(&snapshot);
        graphics::draw_lure(&snapshot, food_size);

        let expired = matches!(
            &banner,
            Some((_, shown_at)) if tank.time - *shown_at >= BANNER_DURATION
        );
        if expired {
            banner = None;
        }
        if let Some((text, _)) = &banner {
            graphics::draw_banner(text, tank_width, tank_height);
        }

        ui::draw_hud(&mut hud, &snapshot, &tank.stats, &tank.event_log);
        egui_macroquad::draw();

        next_frame().await
    }
}
