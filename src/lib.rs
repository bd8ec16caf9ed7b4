pub mod agents;
pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod history;
pub mod models;
pub mod scan;
pub mod trace;
