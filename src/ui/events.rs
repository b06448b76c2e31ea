use aquarium::simulation::event_log::{EventKind, EventLog};
use egui_macroquad::egui;

const PANEL_HEIGHT: f32 = 220.0;
const MUTED: egui::Color32 = egui::Color32::from_rgb(180, 180, 200);

fn kind_color(kind: EventKind) -> egui::Color32 {
    match kind {
        EventKind::Feeding => egui::Color32::from_rgb(255, 200, 100),
        EventKind::Reproduction => egui::Color32::from_rgb(100, 255, 100),
        EventKind::Predation => egui::Color32::from_rgb(255, 100, 100),
        EventKind::Level => egui::Color32::from_rgb(100, 200, 255),
        EventKind::Defeat => egui::Color32::from_rgb(150, 150, 150),
    }
}

/// Tank log in the bottom-left corner, newest entry last.
pub fn draw_events_panel(egui_ctx: &egui::Context, event_log: &EventLog) {
    let bottom = egui_ctx.screen_rect().height();

    egui::Window::new("Tank log")
        .fixed_pos(egui::pos2(10.0, bottom - PANEL_HEIGHT - 10.0))
        .fixed_size(egui::vec2(300.0, PANEL_HEIGHT))
        .collapsible(true)
        .frame(
            egui::Frame::window(&egui_ctx.style())
                .fill(egui::Color32::from_rgba_premultiplied(10, 30, 50, 180)),
        )
        .show(egui_ctx, |ui| {
            let events = event_log.events();
            if events.is_empty() {
                ui.label(egui::RichText::new("Quiet so far").color(MUTED).size(12.0));
                return;
            }

            egui::ScrollArea::vertical()
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    for event in events {
                        ui.horizontal(|ui| {
                            ui.label(
                                egui::RichText::new(format!("{:>6.1}s", event.time / 1000.0))
                                    .color(MUTED)
                                    .size(11.0)
                                    .monospace(),
                            );
                            ui.label(
                                egui::RichText::new(&event.description)
                                    .color(kind_color(event.kind))
                                    .size(11.0),
                            );
                        });
                    }
                });
        });
}
