/// 日志级别（可被 RUST_LOG 覆盖）
pub const LOG_LEVEL: &str = "info";

// ============================================================================
// Transmission Engine Parameters
// ============================================================================

/// Fixed pause between packets (milliseconds); scheduling slack, not airtime
pub const INTER_PACKET_PAUSE_MS: u64 = 50;

/// Sleep slice for cancellation polling (milliseconds)
pub const CANCEL_POLL_MS: u64 = 25;

/// Maximum delay ticks per packet
pub const MAX_DELAY_TICKS: u64 = 15;

/// Minimum packets between live-stat snapshots
pub const STATS_INTERVAL_FLOOR: u64 = 25;

// ============================================================================
// Confirmation Thresholds
// ============================================================================

/// Per-packet delay (seconds) above which a run is "very slow" and needs
/// explicit opt-in
pub const SLOW_CONFIRM_SECS: f64 = 10.0;

/// Per-packet delay (seconds) above which the estimated duration is shown
/// for confirmation
pub const MODERATE_CONFIRM_SECS: f64 = 3.0;
