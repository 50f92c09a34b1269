use egui;

use crate::config;
use crate::simulation::SimState;
use crate::stats::{History, SimStats};

/// Requests raised by the panel for the driver loop to act on.
#[derive(Default)]
pub struct UiState {
    pub step_requested: bool,
    pub reset_requested: bool,
    pub show_graphs: bool,
}

/// Draw the control panel on the right edge of the window.
pub fn draw_ui(sim: &mut SimState, ui_state: &mut UiState, stats: &SimStats) {
    egui_macroquad::ui(|ctx| {
        draw_panel(ctx, sim, ui_state);
        if ui_state.show_graphs {
            draw_graphs(ctx, sim, stats);
        }
    });
    egui_macroquad::draw();
}

fn draw_panel(ctx: &egui::Context, sim: &mut SimState, ui_state: &mut UiState) {
    egui::SidePanel::right("panel")
        .exact_width(config::PANEL_WIDTH)
        .resizable(false)
        .show(ctx, |ui| {
            ui.add_space(6.0);
            ui.heading("CANOPY");
            ui.separator();

            ui.horizontal(|ui| {
                let play_label = if sim.paused { "Play" } else { "Pause" };
                if ui.button(play_label).clicked() {
                    sim.paused = !sim.paused;
                }
                if ui.button("Step").clicked() {
                    ui_state.step_requested = true;
                }
                if ui.button("Reset").clicked() {
                    ui_state.reset_requested = true;
                }
            });

            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("Speed").small());
                for speed in [1.0, 2.0, 5.0, 10.0] {
                    speed_button(ui, sim, speed);
                }
            });

            ui.separator();
            metric_row(ui, "Year", format!("{}", sim.step_count));
            metric_row(ui, "Trees", format!("{}", sim.trees().len()));
            metric_row(ui, "Mean radius", format!("{:.2}", sim.mean_radius()));

            ui.add_space(4.0);
            for ((_, desc), count) in sim.species.iter().zip(sim.species_census()) {
                let color = egui::Color32::from_rgb(
                    (desc.color.r * 255.0) as u8,
                    (desc.color.g * 255.0) as u8,
                    (desc.color.b * 255.0) as u8,
                );
                ui.horizontal(|ui| {
                    ui.colored_label(color, desc.name);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(format!("{count}"));
                    });
                });
            }

            ui.separator();
            ui.toggle_value(&mut ui_state.show_graphs, "Graphs");
        });
}

fn speed_button(ui: &mut egui::Ui, sim: &mut SimState, speed: f32) {
    let selected = (sim.speed_multiplier - speed).abs() < 0.01;
    if ui.selectable_label(selected, format!("{speed}x")).clicked() {
        sim.speed_multiplier = speed;
    }
}

fn metric_row(ui: &mut egui::Ui, key: &str, value: String) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(key).small());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(value);
        });
    });
}

fn draw_graphs(ctx: &egui::Context, sim: &SimState, stats: &SimStats) {
    egui::Window::new("Graphs")
        .default_pos(egui::pos2(20.0, 40.0))
        .default_size(egui::vec2(360.0, 280.0))
        .resizable(true)
        .show(ctx, |ui| {
            ui.collapsing("Population by species", |ui| {
                let size = egui::vec2(ui.available_width(), 90.0);
                let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
                painter.rect_filled(response.rect, 2.0, egui::Color32::from_gray(20));

                for ((_, desc), series) in sim.species.iter().zip(&stats.per_species) {
                    let color = egui::Color32::from_rgb(
                        (desc.color.r * 255.0) as u8,
                        (desc.color.g * 255.0) as u8,
                        (desc.color.b * 255.0) as u8,
                    );
                    draw_series(&painter, series, response.rect, color);
                }
            });

            ui.collapsing("Births / deaths", |ui| {
                let size = egui::vec2(ui.available_width(), 70.0);
                let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
                painter.rect_filled(response.rect, 2.0, egui::Color32::from_gray(20));

                draw_series(
                    &painter,
                    &stats.births,
                    response.rect,
                    egui::Color32::from_rgb(100, 180, 255),
                );
                draw_series(
                    &painter,
                    &stats.deaths,
                    response.rect,
                    egui::Color32::from_rgb(255, 100, 100),
                );
                ui.horizontal(|ui| {
                    ui.colored_label(egui::Color32::from_rgb(100, 180, 255), "Births");
                    ui.colored_label(egui::Color32::from_rgb(255, 100, 100), "Deaths");
                });
            });

            ui.collapsing("Mean radius", |ui| {
                let size = egui::vec2(ui.available_width(), 70.0);
                let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
                painter.rect_filled(response.rect, 2.0, egui::Color32::from_gray(20));
                draw_series(
                    &painter,
                    &stats.mean_radius,
                    response.rect,
                    egui::Color32::from_rgb(200, 200, 120),
                );
            });
        });
}

fn draw_series(painter: &egui::Painter, series: &History, rect: egui::Rect, color: egui::Color32) {
    let len = series.len();
    if len < 2 {
        return;
    }

    let samples: Vec<f32> = series.iter().collect();
    let max_val = samples.iter().cloned().fold(1.0f32, f32::max);
    let min_val = samples.iter().cloned().fold(max_val, f32::min);
    let range = (max_val - min_val).max(1.0);

    let points: Vec<egui::Pos2> = samples
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let x = rect.left() + (i as f32 / (len - 1) as f32) * rect.width();
            let y = rect.bottom() - ((v - min_val) / range) * rect.height();
            egui::pos2(x, y)
        })
        .collect();

    for pair in points.windows(2) {
        painter.line_segment([pair[0], pair[1]], egui::Stroke::new(1.5, color));
    }
}
