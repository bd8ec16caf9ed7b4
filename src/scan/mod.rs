pub mod job;
pub mod manager;

pub use manager::{ScanManager, StartOutcome, StopOutcome};
