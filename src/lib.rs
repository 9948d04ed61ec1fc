pub mod commands;
pub mod context;
pub mod display;
pub mod logging;
pub mod proto;
pub mod session;
pub mod task;
pub mod tui;
pub mod views;

#[cfg(test)]
pub mod test_utils;
