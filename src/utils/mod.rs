//! Small helpers shared by the selector and the size readers

pub mod filename;
pub mod units;
