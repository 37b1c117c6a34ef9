use eframe::egui;

use crate::engine::protocol::EngineCommand;
use crate::model::grid_event::RunPass;
use crate::ui::app::PromptGridApp;
use crate::ui::session_io::TableKind;
use crate::ui::settings::CellState;

pub fn draw_toolbar(ctx: &egui::Context, app: &mut PromptGridApp) {
    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
        ui.add_space(4.0);
        ui.horizontal_wrapped(|ui| {
            let idle = app.grid.running().is_none();

            for kind in [TableKind::Variables, TableKind::Prompts, TableKind::Evaluators] {
                if ui.add_enabled(idle, egui::Button::new(kind.label())).clicked() {
                    app.load_table(kind);
                }
            }

            ui.separator();

            if ui.add_enabled(idle, egui::Button::new("▶ Execute Prompts")).clicked() {
                app.start_generation();
            }
            if ui.add_enabled(idle, egui::Button::new("⚖ Execute Evaluators")).clicked() {
                app.start_evaluation();
            }

            ui.separator();

            if ui.button("💾 Save Results").clicked() {
                app.save_results();
            }
            ui.toggle_value(&mut app.ui.show_settings, "⚙ Settings");
        });

        ui.horizontal(|ui| {
            match app.grid.running() {
                Some(RunPass::Generation) => {
                    ui.spinner();
                    ui.label("Generating…");
                }
                Some(RunPass::Evaluation) => {
                    ui.spinner();
                    ui.label("Evaluating…");
                }
                None => {}
            }
            if let Some(status) = &app.ui.status {
                ui.label(status);
            }
        });
        ui.add_space(4.0);
    });

    if app.ui.show_settings {
        draw_settings_window(ctx, app);
    }
}

fn draw_settings_window(ctx: &egui::Context, app: &mut PromptGridApp) {
    let mut open = true;
    let mut changed = false;

    egui::Window::new("Settings").open(&mut open).show(ctx, |ui| {
        ui.label("UI Scale");
        changed |= ui
            .add(egui::Slider::new(&mut app.settings.ui_scale, 0.75..=2.0))
            .drag_stopped();

        ui.separator();
        ui.label("Cell colors");
        for state in CellState::ALL {
            ui.horizontal(|ui| {
                let mut color = app.settings.cell_color(state);
                if color_button(ui, &mut color) {
                    app.settings.set_cell_color(state, color);
                    changed = true;
                }
                ui.label(state.label());
            });
        }
        ui.horizontal(|ui| {
            let mut color = app.settings.header_color();
            if color_button(ui, &mut color) {
                app.settings.set_header_color(color);
                changed = true;
            }
            ui.label("Headers");
        });

        ui.separator();
        if ui.button("Test connection").clicked() {
            app.ui.connection_status = None;
            if !app.send_command(EngineCommand::TestConnection) {
                app.ui.connection_status = Some(Err("Engine stopped".to_string()));
            }
        }
        match &app.ui.connection_status {
            Some(Ok(msg)) => {
                ui.label(msg);
            }
            Some(Err(err)) => {
                ui.colored_label(egui::Color32::LIGHT_RED, err);
            }
            None => {}
        }
    });

    if changed {
        app.save_settings();
    }
    if !open {
        app.ui.show_settings = false;
    }
}

fn color_button(ui: &mut egui::Ui, color: &mut egui::Color32) -> bool {
    egui::color_picker::color_edit_button_srgba(ui, color, egui::color_picker::Alpha::Opaque)
        .changed()
}
