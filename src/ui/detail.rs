use eframe::egui;

use crate::model::cell::CellKey;
use crate::model::feedback::Vote;
use crate::model::grid_state::GridState;

/// What the detail window is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailView {
    Cell(CellKey),
    Evaluations(CellKey),
    Variable { row: usize, column: usize },
    PromptHeader(usize),
}

pub enum DetailContent {
    Text(String),
    Json(String),
}

pub fn detail_content(state: &GridState, view: DetailView) -> DetailContent {
    match view {
        DetailView::Cell(key) => DetailContent::Text(cell_text(state, key)),

        DetailView::Evaluations(key) => {
            let evaluations = state.result(key).map(|c| c.evaluations.as_slice()).unwrap_or(&[]);
            DetailContent::Json(
                serde_json::to_string_pretty(evaluations).unwrap_or_else(|e| e.to_string()),
            )
        }

        DetailView::Variable { row, column } => DetailContent::Text(
            state
                .variables()
                .get(row)
                .and_then(|r| r.values().nth(column))
                .unwrap_or_default()
                .to_string(),
        ),

        DetailView::PromptHeader(index) => DetailContent::Text(match state.prompts().get(index) {
            Some(prompt) => format!(
                "Prompt:\n{}\n\nComment:\n{}",
                prompt.template,
                if prompt.comment.is_empty() { "No comment" } else { prompt.comment.as_str() }
            ),
            None => String::new(),
        }),
    }
}

fn cell_text(state: &GridState, key: CellKey) -> String {
    let cell = state.result(key);
    let feedback = state.feedback(key).cloned().unwrap_or_default();
    let yes_no = |v: Vote| if feedback.vote == Some(v) { "Yes" } else { "No" };

    let evaluations = match cell {
        Some(c) if !c.evaluations.is_empty() => c
            .evaluations
            .iter()
            .map(|j| j.summary())
            .collect::<Vec<_>>()
            .join("\n"),
        _ => "No evaluations".to_string(),
    };

    format!(
        "Output:\n{}\n\nDebug Info:\n{}\n\nUser Feedback:\n- 👍: {}\n- 👎: {}\n- 💬: {}\n\nEvaluations:\n{}",
        cell.map(|c| c.output()).unwrap_or("No result yet"),
        cell.map(|c| c.diagnostic()).unwrap_or_else(|| "No debug info available".into()),
        yes_no(Vote::Up),
        yes_no(Vote::Down),
        feedback.comment.as_deref().unwrap_or("No comment"),
        evaluations,
    )
}

pub fn draw_detail_window(ctx: &egui::Context, state: &GridState, view: &mut Option<DetailView>) {
    let Some(current) = *view else {
        return;
    };

    let mut open = true;
    egui::Window::new("Cell Content")
        .open(&mut open)
        .collapsible(false)
        .default_size([520.0, 420.0])
        .show(ctx, |ui| {
            egui::ScrollArea::both().show(ui, |ui| match detail_content(state, current) {
                DetailContent::Text(text) => {
                    ui.label(text);
                }
                DetailContent::Json(json) => {
                    ui.label(egui::RichText::new(json).monospace());
                }
            });
        });

    if !open {
        *view = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::cell::CellResult;
    use crate::model::grid_event::GridEvent;
    use crate::model::judgment::Judgment;

    fn text(content: DetailContent) -> String {
        match content {
            DetailContent::Text(t) | DetailContent::Json(t) => t,
        }
    }

    #[test]
    fn empty_cell_detail_has_placeholders() {
        let state = GridState::default();
        let body = text(detail_content(&state, DetailView::Cell(CellKey::new(0, 0))));

        assert!(body.contains("No result yet"));
        assert!(body.contains("No debug info available"));
        assert!(body.contains("No evaluations"));
    }

    #[test]
    fn cell_detail_lists_feedback_and_scores() {
        let mut state = GridState::default();
        let key = CellKey::new(0, 1);
        state.apply(GridEvent::CellCompleted {
            key,
            result: CellResult::generated(
                "hej",
                vec![Judgment::scored("fluency", 4.0, "ok"), Judgment::failed("tone", "timeout")],
            ),
        });
        state.vote(key, Vote::Up);
        state.comment(key, "nice");

        let body = text(detail_content(&state, DetailView::Cell(key)));
        assert!(body.contains("Output:\nhej"));
        assert!(body.contains("Debug Info:\nSuccess"));
        assert!(body.contains("- 👍: Yes"));
        assert!(body.contains("- 💬: nice"));
        assert!(body.contains("fluency: 4\ntone: null"));
    }

    #[test]
    fn variable_and_header_views() {
        let state = GridState::default();

        let value = text(detail_content(&state, DetailView::Variable { row: 1, column: 0 }));
        assert_eq!(value, "yoda2 jumped high");

        let header = text(detail_content(&state, DetailView::PromptHeader(1)));
        assert!(header.contains("Translate to swedish"));
        assert!(header.contains("another prompt"));
    }
}
