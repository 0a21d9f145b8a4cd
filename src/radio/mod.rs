pub mod engine;
pub mod metrics;
pub mod preset;

pub use engine::{
    CancelFlag, EngineConfig, ProgressSnapshot, TransmissionEngine, TransmissionEvent,
    TransmissionOutcome, TransmissionStatus, TransmissionSummary,
};
pub use metrics::{TransmissionPlan, compute_plan};
pub use preset::RadioPreset;
