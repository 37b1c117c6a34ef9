use eframe::egui;
use egui::{Color32, RichText};

use crate::model::cell::CellKey;
use crate::model::feedback::Vote;
use crate::ui::app::PromptGridApp;
use crate::ui::detail::DetailView;
use crate::ui::settings::CellState;

const CELL_WIDTH: f32 = 240.0;
const PREVIEW_CHARS: usize = 160;

/// Clicks collected while drawing, applied once the grid is drawn.
enum CellClick {
    Open(DetailView, Option<CellKey>),
    Vote(CellKey, Vote),
    Comment(CellKey),
}

pub fn draw_grid_panel(ctx: &egui::Context, app: &mut PromptGridApp) {
    let mut clicks: Vec<CellClick> = Vec::new();

    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::both().show(ui, |ui| {
            egui::Grid::new("prompt_grid")
                .spacing([6.0, 6.0])
                .show(ui, |ui| draw_grid(ui, app, &mut clicks));
        });
    });

    for click in clicks {
        match click {
            CellClick::Open(view, focus) => {
                if let Some(key) = focus {
                    app.ui.focus.row = key.row;
                    app.ui.focus.prompt = key.prompt;
                }
                app.ui.detail = Some(view);
            }
            CellClick::Vote(key, vote) => app.grid.vote(key, vote),
            CellClick::Comment(key) => app.open_comment(key),
        }
    }
}

fn draw_grid(ui: &mut egui::Ui, app: &PromptGridApp, clicks: &mut Vec<CellClick>) {
    let grid = &app.grid;
    let header = app.settings.header_color();
    let columns = grid.column_names();

    /* ---------- Header ---------- */

    for name in &columns {
        header_cell(ui, header, name, None);
    }
    for (index, prompt) in grid.prompts().iter().enumerate() {
        let title = format!("Prompt {}\n{}", index + 1, preview(&prompt.template));
        if header_cell(ui, header, &title, Some(prompt.comment.as_str())).clicked() {
            clicks.push(CellClick::Open(DetailView::PromptHeader(index), None));
        }
        header_cell(ui, header, &format!("Eval {}", index + 1), None);
    }
    ui.end_row();

    /* ---------- Rows ---------- */

    for (row_index, row) in grid.variables().iter().enumerate() {
        for (column, value) in row.values().enumerate() {
            let label = ui.add(
                egui::Label::new(preview(value))
                    .wrap()
                    .sense(egui::Sense::click()),
            );
            if label.clicked() {
                clicks.push(CellClick::Open(
                    DetailView::Variable { row: row_index, column },
                    None,
                ));
            }
        }
        // Rows shorter than the header still need their cells.
        for _ in row.len()..columns.len() {
            ui.label("");
        }

        for prompt_index in 0..grid.prompts().len() {
            let key = CellKey::new(row_index, prompt_index);
            result_cell(ui, app, key, clicks);
            evaluation_cell(ui, app, key, clicks);
        }
        ui.end_row();
    }
}

fn header_cell(ui: &mut egui::Ui, fill: Color32, title: &str, comment: Option<&str>) -> egui::Response {
    egui::Frame::new()
        .fill(fill)
        .inner_margin(6.0)
        .show(ui, |ui| {
            ui.set_max_width(CELL_WIDTH);
            let title = ui.add(
                egui::Label::new(RichText::new(title).strong().color(Color32::BLACK))
                    .wrap()
                    .sense(egui::Sense::click()),
            );
            if let Some(comment) = comment.filter(|c| !c.is_empty()) {
                ui.label(RichText::new(comment).small().color(Color32::DARK_GRAY));
            }
            title
        })
        .inner
}

fn result_cell(ui: &mut egui::Ui, app: &PromptGridApp, key: CellKey, clicks: &mut Vec<CellClick>) {
    let grid = &app.grid;
    let state = CellState::classify(
        app.ui.focus.key() == key,
        grid.active_cell() == Some(key),
        grid.is_processed(key),
    );
    let fill = app.settings.cell_color(state);

    egui::Frame::new().fill(fill).inner_margin(6.0).show(ui, |ui| {
        ui.set_width(CELL_WIDTH);
        ui.visuals_mut().override_text_color = Some(Color32::BLACK);

        let Some(cell) = grid.result(key) else {
            if ui.add(egui::Label::new("No result yet").sense(egui::Sense::click())).clicked() {
                clicks.push(CellClick::Open(DetailView::Cell(key), Some(key)));
            }
            if grid.active_cell() == Some(key) {
                ui.spinner();
            }
            return;
        };

        let text = RichText::new(preview(cell.output()));
        let text = if cell.is_failed() { text.color(Color32::DARK_RED) } else { text };
        let output = ui.add(
            egui::Label::new(text)
                .wrap()
                .sense(egui::Sense::click()),
        );
        if output.clicked() {
            clicks.push(CellClick::Open(DetailView::Cell(key), Some(key)));
        }

        let feedback = grid.feedback(key).cloned().unwrap_or_default();
        ui.horizontal(|ui| {
            let up = egui::Button::new("✅").selected(feedback.vote == Some(Vote::Up));
            if ui.add(up).clicked() {
                clicks.push(CellClick::Vote(key, Vote::Up));
            }
            let down = egui::Button::new("❌").selected(feedback.vote == Some(Vote::Down));
            if ui.add(down).clicked() {
                clicks.push(CellClick::Vote(key, Vote::Down));
            }
            if ui.button("💬").clicked() {
                clicks.push(CellClick::Comment(key));
            }
        });

        if let Some(comment) = &feedback.comment {
            ui.label(format!("Comment: {}", comment));
        }
    });
}

fn evaluation_cell(ui: &mut egui::Ui, app: &PromptGridApp, key: CellKey, clicks: &mut Vec<CellClick>) {
    let summary = match app.grid.result(key) {
        Some(cell) if !cell.evaluations.is_empty() => cell
            .evaluations
            .iter()
            .map(|j| j.summary())
            .collect::<Vec<_>>()
            .join("\n"),
        Some(_) => String::new(),
        None => "No evaluations".to_string(),
    };

    let label = ui.add(
        egui::Label::new(RichText::new(summary).monospace())
            .truncate()
            .sense(egui::Sense::click()),
    );
    if label.clicked() {
        clicks.push(CellClick::Open(DetailView::Evaluations(key), Some(key)));
    }
}

fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}…", &text[..cut]),
        None => text.to_string(),
    }
}
