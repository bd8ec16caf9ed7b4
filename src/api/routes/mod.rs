pub mod health;
pub mod runs;
pub mod scans;
pub mod settings;
pub mod status;
