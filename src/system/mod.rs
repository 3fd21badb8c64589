//! Core system components for rover operation
pub mod config;
pub mod control_loop;
pub mod distance;
pub mod drivetrain;
pub mod error;
pub mod motion;
pub mod state;
pub mod timing;
pub mod toggle_switch;
