//! Interactive terminal console.
//!
//! `app` holds the state, `input` maps keys to state changes and actions,
//! `ui` draws the state, and `run` owns the terminal and performs actions.

pub mod app;
pub mod events;
pub mod input;
pub mod run;
pub mod ui;

pub use run::run_tui;
