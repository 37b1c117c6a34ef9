use std::collections::BTreeMap;

use egui::Color32;
use serde::{Deserialize, Serialize};

/// What a result cell is doing right now, as far as colouring goes.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CellState {
    Focused,
    Active,
    Processed,
    Idle,
}

impl CellState {
    pub const ALL: [CellState; 4] = [
        CellState::Focused,
        CellState::Active,
        CellState::Processed,
        CellState::Idle,
    ];

    /// Focus wins over the running marker, which wins over completion.
    pub fn classify(focused: bool, active: bool, processed: bool) -> Self {
        match (focused, active, processed) {
            (true, _, _) => CellState::Focused,
            (_, true, _) => CellState::Active,
            (_, _, true) => CellState::Processed,
            _ => CellState::Idle,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CellState::Focused => "Focused",
            CellState::Active => "Running",
            CellState::Processed => "Processed",
            CellState::Idle => "Not run",
        }
    }

    fn default_rgba(self) -> [u8; 4] {
        match self {
            CellState::Focused => [179, 229, 252, 255],
            CellState::Active => [255, 249, 196, 255],
            CellState::Processed => [232, 245, 233, 255],
            CellState::Idle => [255, 255, 255, 255],
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct UiSettings {
    pub ui_scale: f32,
    pub header_color: [u8; 4],
    pub cell_colors: BTreeMap<CellState, [u8; 4]>,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            ui_scale: 1.0,
            header_color: [227, 242, 253, 255],
            cell_colors: CellState::ALL
                .iter()
                .map(|state| (*state, state.default_rgba()))
                .collect(),
        }
    }
}

fn to_color(c: [u8; 4]) -> Color32 {
    Color32::from_rgba_unmultiplied(c[0], c[1], c[2], c[3])
}

fn to_rgba(color: Color32) -> [u8; 4] {
    color.to_srgba_unmultiplied()
}

impl UiSettings {
    pub fn cell_color(&self, state: CellState) -> Color32 {
        to_color(
            self.cell_colors
                .get(&state)
                .copied()
                .unwrap_or_else(|| state.default_rgba()),
        )
    }

    pub fn set_cell_color(&mut self, state: CellState, color: Color32) {
        self.cell_colors.insert(state, to_rgba(color));
    }

    pub fn header_color(&self) -> Color32 {
        to_color(self.header_color)
    }

    pub fn set_header_color(&mut self, color: Color32) {
        self.header_color = to_rgba(color);
    }
}
