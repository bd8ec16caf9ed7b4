pub mod probe;

use std::sync::Arc;
use async_trait::async_trait;

use crate::errors::VigilError;
use crate::models::ScanConfig;
use crate::trace::Tracer;

pub use probe::ProbeAgent;

/// Capability that performs the actual assessment work for one scan.
///
/// Implementations report progress through the supplied tracer and may run
/// for an unbounded time; the lifecycle manager handles cancellation around
/// them, so they only need to keep yielding at await points.
#[async_trait]
pub trait ScanAgent: Send + Sync {
    async fn execute_scan(&self, config: &ScanConfig, tracer: Arc<Tracer>) -> Result<(), VigilError>;
}
