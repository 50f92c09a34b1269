use macroquad::prelude::*;

use crate::simulation::SimState;

const BG_COLOR: Color = Color::new(0.92, 0.92, 0.90, 1.0);
const ARENA_COLOR: Color = Color::new(0.86, 0.86, 0.84, 1.0);
const HUD_COLOR: Color = Color::new(0.25, 0.25, 0.25, 1.0);

/// Draw the whole scene: arena backdrop, one circle per tree in its
/// species color, and a small text HUD. Reads the population only.
pub fn draw(sim: &SimState) {
    clear_background(BG_COLOR);
    draw_rectangle(0.0, 0.0, sim.arena.width, sim.arena.height, ARENA_COLOR);

    for tree in sim.trees() {
        let color = sim.species.get(tree.species).color;
        draw_circle(tree.pos.x, tree.pos.y, tree.radius, color);
    }

    draw_hud(sim);
}

fn draw_hud(sim: &SimState) {
    let status = if sim.paused { "paused" } else { "playing" };
    draw_text(
        &format!(
            "year {}   trees {}   {status}",
            sim.step_count,
            sim.trees().len()
        ),
        8.0,
        20.0,
        20.0,
        HUD_COLOR,
    );
}
