pub mod run;
pub mod scan;
pub mod status;

pub use run::{RunSummary, VulnerabilityRecord};
pub use scan::{ScanConfig, ScanRequest, ScanTarget, TargetType};
pub use status::{AgentInfo, ChatMessage, ScanStatus, UsageStats};
