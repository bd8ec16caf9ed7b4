pub mod types;

pub use types::VigilError;
