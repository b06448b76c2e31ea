use aquarium::simulation::snapshot::TankSnapshot;
use macroquad::prelude::*;

const WATER: Color = Color::new(0.55, 0.78, 0.93, 1.0);
const SAND: Color = Color::new(0.93, 0.86, 0.65, 1.0);
const FOOD: Color = Color::new(0.55, 0.35, 0.15, 1.0);

/// Tank units map 1:1 to pixels, so drawing needs no scaling.
pub fn draw_tank(tank_width: f32, tank_height: f32) {
    draw_rectangle(0.0, 0.0, tank_width, tank_height, WATER);
    draw_rectangle(0.0, tank_height - 6.0, tank_width, 6.0, SAND);
}

pub fn draw_food(snapshot: &TankSnapshot) {
    for item in &snapshot.food {
        let r = item.size / 2.0;
        draw_circle(item.pos[0] + r, item.pos[1] + r, r, FOOD);
    }
}

pub fn draw_fish(snapshot: &TankSnapshot) {
    for fish in &snapshot.fish {
        let r = fish.size / 2.0;
        let (cx, cy) = (fish.pos[0] + r, fish.pos[1] + r);
        let [red, green, blue] = fish.rgb;
        let body = Color::from_rgba(red, green, blue, 255);

        draw_circle(cx, cy, r, body);
        draw_circle_lines(cx, cy, r, 1.5, DARKGRAY);
        // eye
        draw_circle(cx + r * 0.4, cy - r * 0.25, (r * 0.15).max(1.5), BLACK);
    }
}

pub fn draw_lure(snapshot: &TankSnapshot, food_size: f32) {
    if let Some([x, y]) = snapshot.lure {
        draw_circle(x, y, food_size / 2.0, Color::new(0.55, 0.35, 0.15, 0.6));
    }
}

pub fn draw_banner(text: &str, tank_width: f32, tank_height: f32) {
    let font_size = 40.0;
    let size = measure_text(text, None, font_size as _, 1.0);
    let x = tank_width / 2.0 - size.width / 2.0;
    let y = tank_height / 2.0 - size.height / 2.0;

    draw_rectangle(
        x - 20.0,
        y - size.height - 10.0,
        size.width + 40.0,
        size.height + 30.0,
        Color::new(0.0, 0.0, 0.0, 0.6),
    );
    draw_text(text, x, y, font_size, WHITE);
}
