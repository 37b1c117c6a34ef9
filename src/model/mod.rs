pub mod cell;
pub mod export;
pub mod feedback;
pub mod grid_event;
pub mod grid_state;
pub mod judgment;
pub mod prompt;
pub mod tsv;
pub mod variables;
