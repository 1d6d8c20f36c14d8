pub mod datetime;
pub mod filesystem;
pub mod state_helpers;
