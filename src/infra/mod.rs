//! Loading and evaluating the trained fare model.

pub mod artifacts;
pub mod forest;
