pub mod artifacts;
pub mod tracer;

pub use tracer::{Tracer, MAX_STATUS_LOGS};
