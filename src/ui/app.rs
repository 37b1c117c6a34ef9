use eframe::egui;
use std::path::Path;
use std::sync::mpsc;
use std::time::Duration;

use crate::config::AppConfig;
use crate::engine::engine::Engine;
use crate::engine::llm_client::HttpCompletionClient;
use crate::engine::protocol::{EngineCommand, EngineResponse};
use crate::model::cell::CellKey;
use crate::model::grid_event::RunPass;
use crate::model::grid_state::GridState;
use crate::ui::detail::{draw_detail_window, DetailView};
use crate::ui::grid_panel::draw_grid_panel;
use crate::ui::keyboard::{key_action, FocusCursor, GridAction, GRID_KEYS};
use crate::ui::session_io::{self, TableKind};
use crate::ui::settings::UiSettings;
use crate::ui::settings_io::{load_settings, save_settings};
use crate::ui::toolbar::draw_toolbar;

/* =========================
   UI State
   ========================= */

#[derive(Default)]
pub struct UiState {
    pub focus: FocusCursor,
    pub detail: Option<DetailView>,
    pub comment_draft: Option<(CellKey, String)>,
    pub status: Option<String>,
    pub connection_status: Option<Result<String, String>>,
    pub show_settings: bool,
}

/* =========================
   App
   ========================= */

pub struct PromptGridApp {
    pub grid: GridState,
    pub ui: UiState,
    pub settings: UiSettings,

    cmd_tx: mpsc::Sender<EngineCommand>,
    resp_rx: mpsc::Receiver<EngineResponse>,
}

impl PromptGridApp {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();

        let client = HttpCompletionClient::new(config)?;
        std::thread::spawn(move || {
            let mut engine = Engine::new(cmd_rx, resp_tx, Box::new(client));
            engine.run();
        });

        Ok(Self {
            grid: GridState::default(),
            ui: UiState::default(),
            settings: load_settings(),
            cmd_tx,
            resp_rx,
        })
    }

    /// Returns false when the engine thread has stopped.
    pub fn send_command(&self, cmd: EngineCommand) -> bool {
        let sent = self.cmd_tx.send(cmd).is_ok();
        if !sent {
            tracing::error!("engine thread is gone; command dropped");
        }
        sent
    }

    pub fn start_generation(&mut self) {
        if self.grid.running().is_some() {
            return;
        }
        let cmd = EngineCommand::RunGeneration {
            rows: self.grid.variables().to_vec(),
            prompts: self.grid.prompts().to_vec(),
            evaluators: self.grid.evaluators().to_vec(),
        };
        self.dispatch_run(RunPass::Generation, cmd);
    }

    pub fn start_evaluation(&mut self) {
        if self.grid.running().is_some() {
            return;
        }
        let cmd = EngineCommand::RunEvaluation {
            rows: self.grid.variables().to_vec(),
            prompts: self.grid.prompts().to_vec(),
            evaluators: self.grid.evaluators().to_vec(),
            outputs: self.grid.stored_outputs(),
        };
        self.dispatch_run(RunPass::Evaluation, cmd);
    }

    // Responses are only drained on this thread, so marking the run after
    // the send cannot miss its RunFinished.
    fn dispatch_run(&mut self, pass: RunPass, cmd: EngineCommand) {
        if self.send_command(cmd) {
            self.grid.begin_run(pass);
        } else {
            self.ui.status = Some("Engine stopped; run not started".to_string());
        }
    }

    pub fn load_table(&mut self, kind: TableKind) {
        let Some(path) = session_io::pick_tsv(kind) else {
            return;
        };
        self.load_table_from(kind, &path);
    }

    fn load_table_from(&mut self, kind: TableKind, path: &Path) {
        self.ui.status = Some(match session_io::load_table(&mut self.grid, kind, path) {
            Ok(count) => format!("Loaded {} rows from {}", count, path.display()),
            Err(err) => format!("Load failed: {:#}", err),
        });
        self.ui.focus = self
            .ui
            .focus
            .clamped(self.grid.variables().len(), self.grid.prompts().len());
    }

    pub fn save_results(&mut self) {
        let Some(path) = session_io::pick_export_path() else {
            return;
        };
        self.ui.status = Some(match session_io::write_export(&self.grid, &path) {
            Ok(()) => format!("Saved results to {}", path.display()),
            Err(err) => format!("Save failed: {:#}", err),
        });
    }

    pub fn save_settings(&self) {
        save_settings(&self.settings);
    }

    fn drain_responses(&mut self) {
        while let Ok(resp) = self.resp_rx.try_recv() {
            match resp {
                EngineResponse::Grid(event) => self.grid.apply(event),
                EngineResponse::ConnectionStatus(status) => {
                    self.ui.connection_status = Some(status);
                }
            }
        }
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        // Typing into a text field must not drive the grid.
        if ctx.memory(|m| m.focused().is_some()) {
            return;
        }

        let pressed: Vec<egui::Key> = ctx.input(|i| {
            GRID_KEYS.iter().copied().filter(|k| i.key_pressed(*k)).collect()
        });

        for action in pressed.into_iter().filter_map(key_action) {
            self.handle_action(action);
        }
    }

    pub fn handle_action(&mut self, action: GridAction) {
        let key = self.ui.focus.key();

        match action {
            GridAction::Move(direction) => {
                self.ui.focus = self.ui.focus.moved(
                    direction,
                    self.grid.variables().len(),
                    self.grid.prompts().len(),
                );
            }
            GridAction::OpenDetail => self.ui.detail = Some(DetailView::Cell(key)),
            GridAction::Vote(vote) => self.grid.vote(key, vote),
            GridAction::Comment => self.open_comment(key),
            GridAction::CloseDetail => self.ui.detail = None,
        }
    }

    pub fn open_comment(&mut self, key: CellKey) {
        if !self.grid.contains(key) {
            return;
        }
        let existing = self
            .grid
            .feedback(key)
            .and_then(|f| f.comment.clone())
            .unwrap_or_default();
        self.ui.comment_draft = Some((key, existing));
    }

    fn draw_comment_window(&mut self, ctx: &egui::Context) {
        let Some((key, draft)) = self.ui.comment_draft.as_mut() else {
            return;
        };

        let mut submit = false;
        let mut cancel = false;

        egui::Window::new("Enter your comment")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(format!("Row {}, prompt {}", key.row + 1, key.prompt + 1));
                ui.text_edit_multiline(&mut *draft).request_focus();

                ui.horizontal(|ui| {
                    if ui.button("OK").clicked() {
                        submit = true;
                    }
                    if ui.button("Cancel").clicked() {
                        cancel = true;
                    }
                });
            });

        if submit {
            let (key, draft) = (*key, draft.clone());
            self.grid.comment(key, &draft);
        }
        if submit || cancel {
            self.ui.comment_draft = None;
        }
    }
}

/* =========================
   egui App
   ========================= */

impl eframe::App for PromptGridApp {
    fn update(&mut self, ctx: &egui::Context, _: &mut eframe::Frame) {
        ctx.set_pixels_per_point(self.settings.ui_scale);

        self.drain_responses();
        if self.ui.comment_draft.is_none() {
            self.handle_keys(ctx);
        }

        draw_toolbar(ctx, self);
        draw_grid_panel(ctx, self);
        draw_detail_window(ctx, &self.grid, &mut self.ui.detail);
        self.draw_comment_window(ctx);

        // Engine events arrive between frames.
        let awaiting_connection = self.ui.show_settings && self.ui.connection_status.is_none();
        if self.grid.running().is_some() || awaiting_connection {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::feedback::Vote;
    use std::fs;

    fn app_with_engine(cmd_tx: mpsc::Sender<EngineCommand>) -> PromptGridApp {
        let (_resp_tx, resp_rx) = mpsc::channel();
        PromptGridApp {
            grid: GridState::default(),
            ui: UiState::default(),
            settings: UiSettings::default(),
            cmd_tx,
            resp_rx,
        }
    }

    #[test]
    fn run_is_marked_only_once_the_engine_has_it() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let mut app = app_with_engine(cmd_tx);

        app.start_generation();
        assert_eq!(app.grid.running(), Some(RunPass::Generation));
        assert!(matches!(cmd_rx.try_recv(), Ok(EngineCommand::RunGeneration { .. })));
    }

    #[test]
    fn stopped_engine_leaves_the_grid_idle() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        drop(cmd_rx);
        let mut app = app_with_engine(cmd_tx);

        app.start_generation();
        assert_eq!(app.grid.running(), None);

        app.start_evaluation();
        assert_eq!(app.grid.running(), None);
        assert_eq!(app.ui.status.as_deref(), Some("Engine stopped; run not started"));
    }

    #[test]
    fn loading_a_smaller_table_pulls_focus_back_inside() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prompts.tsv");
        fs::write(&path, "prompt\tcomment\nTranslate to german\t\n").unwrap();

        let (cmd_tx, _cmd_rx) = mpsc::channel();
        let mut app = app_with_engine(cmd_tx);
        app.ui.focus = FocusCursor { row: 2, prompt: 1 };

        app.load_table_from(TableKind::Prompts, &path);
        assert_eq!(app.ui.focus, FocusCursor { row: 2, prompt: 0 });

        app.handle_action(GridAction::Vote(Vote::Up));
        assert_eq!(app.grid.feedback(CellKey::new(2, 0)).unwrap().vote, Some(Vote::Up));
        assert!(app.grid.feedback(CellKey::new(2, 1)).is_none());
    }

    #[test]
    fn votes_with_no_prompts_loaded_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prompts.tsv");
        fs::write(&path, "prompt\tcomment\n").unwrap();

        let (cmd_tx, _cmd_rx) = mpsc::channel();
        let mut app = app_with_engine(cmd_tx);

        app.load_table_from(TableKind::Prompts, &path);
        app.handle_action(GridAction::Vote(Vote::Down));

        assert!(app.grid.feedback(CellKey::new(0, 0)).is_none());
        assert!(app.grid.export().user_feedback.is_empty());
    }
}
