use aquarium::simulation::event_log::EventLog;
use aquarium::simulation::level::GameState;
use aquarium::simulation::reproduction::ReproductionStats;
use aquarium::simulation::snapshot::TankSnapshot;
use aquarium::simulation::tank::DropOutcome;
use egui_macroquad::egui;
use egui_plot::{Line, Plot, PlotPoints};
use std::collections::VecDeque;

use super::events::draw_events_panel;

const MAX_HISTORY_POINTS: usize = 500;

pub struct HudState {
    pub panel_width: f32,
    pub population_history: VecDeque<(f64, f64)>,
    pub target_history: VecDeque<(f64, f64)>,
    pub last_drop: Option<DropOutcome>,
    pub restart_requested: bool,
    pub pointer_over_ui: bool,
    last_update_time: f32,
    update_interval: f32,
}

impl HudState {
    pub fn new() -> Self {
        Self {
            panel_width: 240.0,
            population_history: VecDeque::new(),
            target_history: VecDeque::new(),
            last_drop: None,
            restart_requested: false,
            pointer_over_ui: false,
            last_update_time: 0.0,
            update_interval: 250.0,
        }
    }

    pub fn clear_history(&mut self) {
        self.population_history.clear();
        self.target_history.clear();
        self.last_update_time = 0.0;
    }

    pub fn update_history(&mut self, snapshot: &TankSnapshot) {
        if snapshot.time - self.last_update_time < self.update_interval {
            return;
        }
        self.last_update_time = snapshot.time;

        let t = f64::from(snapshot.time / 1000.0);
        self.population_history
            .push_back((t, snapshot.fish.len() as f64));
        self.target_history
            .push_back((t, snapshot.target_population as f64));

        if self.population_history.len() > MAX_HISTORY_POINTS {
            self.population_history.pop_front();
        }
        if self.target_history.len() > MAX_HISTORY_POINTS {
            self.target_history.pop_front();
        }
    }
}

pub fn draw_hud(
    state: &mut HudState,
    snapshot: &TankSnapshot,
    stats: &ReproductionStats,
    event_log: &EventLog,
) {
    egui_macroquad::ui(|egui_ctx| {
        egui::SidePanel::right("hud_panel")
            .exact_width(state.panel_width)
            .resizable(false)
            .show(egui_ctx, |ui| {
                ui.heading(format!("Level {}", snapshot.level));
                ui.separator();

                ui.label(format!(
                    "Fish: {}/{}",
                    snapshot.fish.len(),
                    snapshot.target_population
                ));
                ui.label(format!(
                    "Deaths: {}/{}",
                    snapshot.deaths, snapshot.casualty_limit
                ));
                ui.label(format!(
                    "Food: {}/{}",
                    snapshot.food_charges, snapshot.panel_capacity
                ));
                ui.add(
                    egui::ProgressBar::new(
                        snapshot.food_charges as f32 / snapshot.panel_capacity.max(1) as f32,
                    )
                    .show_percentage(),
                );
                ui.label("Drag onto the tank to lure, release to feed.");

                if let Some(outcome) = state.last_drop {
                    let text = match outcome {
                        DropOutcome::Fed(id) => format!("Fed fish #{}", id),
                        DropOutcome::Released => "Food released".to_string(),
                        DropOutcome::Missed => "No fish in reach".to_string(),
                        DropOutcome::NoCharge => "No food left".to_string(),
                        DropOutcome::Outside => "Dropped outside the tank".to_string(),
                        DropOutcome::Ignored => String::new(),
                    };
                    ui.label(text);
                }
                if let Some(event) = event_log.latest() {
                    ui.small(&event.description);
                }

                ui.separator();
                ui.label(format!("Births this level: {}", stats.level_births));
                ui.label(format!("Births total: {}", stats.total_births));
                ui.label(format!("Largest fish: {:.1}", stats.largest_size));

                ui.separator();
                ui.label("Population");
                draw_population_plot(ui, state);

                if snapshot.state == GameState::Defeated {
                    ui.separator();
                    ui.colored_label(egui::Color32::from_rgb(255, 100, 100), "Defeated");
                    if ui.button("🔄 Restart").clicked() {
                        state.restart_requested = true;
                    }
                }
            });

        draw_events_panel(egui_ctx, event_log);

        state.pointer_over_ui = egui_ctx.wants_pointer_input() || egui_ctx.is_pointer_over_area();
    });
}

fn draw_population_plot(ui: &mut egui::Ui, state: &HudState) {
    if state.population_history.is_empty() {
        ui.label("Collecting data...");
        return;
    }

    let population: PlotPoints = state
        .population_history
        .iter()
        .map(|&(x, y)| [x, y])
        .collect();
    let target: PlotPoints = state.target_history.iter().map(|&(x, y)| [x, y]).collect();

    Plot::new("population_plot")
        .height(150.0)
        .show_axes([true, true])
        .label_formatter(|name, value| {
            format!("{}: {:.1}s, {:.0} fish", name, value.x, value.y)
        })
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(population)
                    .color(egui::Color32::from_rgb(100, 200, 255))
                    .name("Fish"),
            );
            plot_ui.line(
                Line::new(target)
                    .color(egui::Color32::from_rgb(255, 200, 100))
                    .name("Target"),
            );
        });
}
