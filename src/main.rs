use macroquad::prelude::*;

mod arena;
mod config;
mod quadtree;
mod renderer;
mod simulation;
mod species;
mod stats;
mod tree;
mod ui;

use arena::Arena;
use simulation::SimState;
use stats::SimStats;
use ui::UiState;

fn window_conf() -> Conf {
    Conf {
        window_title: "CANOPY — Forest Competition Simulator".to_string(),
        window_width: (config::ARENA_WIDTH + config::PANEL_WIDTH) as i32,
        window_height: config::ARENA_HEIGHT as i32,
        window_resizable: false,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let species = match species::SpeciesTable::new(species::default_descriptors()) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("[CANOPY] Invalid species table: {e}");
            return;
        }
    };
    let arena = Arena::new(config::ARENA_WIDTH, config::ARENA_HEIGHT);

    let mut sim = match SimState::new(
        species,
        arena,
        config::INITIAL_TREE_COUNT,
        config::DEFAULT_SEED,
    ) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("[CANOPY] {e}");
            return;
        }
    };
    let mut stats = SimStats::new(sim.species.len(), config::STATS_CAPACITY);
    let mut ui_state = UiState::default();
    let mut accumulator = 0.0f64;

    loop {
        if is_key_pressed(KeyCode::Space) {
            sim.paused = !sim.paused;
        }

        // Run as many whole steps as the elapsed time covers.
        let step_interval = config::SECONDS_PER_STEP as f64 / sim.speed_multiplier as f64;
        if !sim.paused {
            accumulator += (get_frame_time() as f64).min(0.1);
            while accumulator >= step_interval {
                run_step(&mut sim, &mut stats);
                accumulator -= step_interval;
            }
        } else {
            accumulator = 0.0;
        }

        if ui_state.step_requested {
            ui_state.step_requested = false;
            run_step(&mut sim, &mut stats);
        }
        if ui_state.reset_requested {
            ui_state.reset_requested = false;
            sim.reset();
            stats = SimStats::new(sim.species.len(), config::STATS_CAPACITY);
            eprintln!("[CANOPY] Reset ({} trees)", sim.trees().len());
        }

        renderer::draw(&sim);
        ui::draw_ui(&mut sim, &mut ui_state, &stats);

        next_frame().await;
    }
}

fn run_step(sim: &mut SimState, stats: &mut SimStats) {
    let report = sim.step();
    stats.record(&sim.species_census(), sim.mean_radius(), &report);
}
