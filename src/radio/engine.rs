/// Throttled packet-emission engine.
///
/// Replays a `TransmissionPlan` in real time: one packet in flight at a
/// time, each one held for its modeled airtime, with cooperative
/// cancellation at every sleep slice. The engine never talks to a
/// terminal; it emits `TransmissionEvent`s through a caller-supplied sink.
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, info};

use super::metrics::TransmissionPlan;
use crate::utils::consts::{
    CANCEL_POLL_MS, INTER_PACKET_PAUSE_MS, MAX_DELAY_TICKS, STATS_INTERVAL_FLOOR,
};

/// Cooperative cancellation handle, shared between the engine loop and
/// whatever sets it (the process Ctrl-C handler, or a test).
#[derive(Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Re-arm the flag before a new run; the process-wide Ctrl-C handler
    /// is registered once and shared across runs.
    pub fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Configuration for the transmission engine
#[derive(Clone)]
pub struct EngineConfig {
    /// Fixed pause after each delivered packet. Models scheduling slack,
    /// not airtime: it is never counted toward the rate statistics.
    pub inter_packet_pause: Duration,
    /// Sleep slice granularity; cancellation takes effect within one slice
    pub cancel_poll: Duration,
    pub live_stats: bool,
    /// Packets between live-stat snapshots; None picks
    /// `max(STATS_INTERVAL_FLOOR, total / 10)`
    pub stats_interval: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            inter_packet_pause: Duration::from_millis(INTER_PACKET_PAUSE_MS),
            cancel_poll: Duration::from_millis(CANCEL_POLL_MS),
            live_stats: true,
            stats_interval: None,
        }
    }
}

/// Events emitted while a transmission is in flight
#[derive(Clone, Debug)]
pub enum TransmissionEvent {
    PacketStarted { index: u64, total: u64 },
    /// One tick per ~1 second of modeled per-packet airtime
    DelayTick { index: u64 },
    PacketDelivered { index: u64, payload: Vec<u8> },
    LiveStats(ProgressSnapshot),
}

/// Immutable point-in-time view of a running transmission
#[derive(Clone, Debug, Serialize)]
pub struct ProgressSnapshot {
    /// 1-based index of the packet just delivered
    pub packet_index: u64,
    pub total_packets: u64,
    pub bytes_sent: u64,
    pub elapsed_secs: f64,
    pub rate_kbps: f64,
    pub eta_secs: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum TransmissionStatus {
    Completed,
    Cancelled,
}

#[derive(Clone, Debug, Serialize)]
pub struct TransmissionSummary {
    pub packets_sent: u64,
    pub total_packets: u64,
    pub bytes_sent: u64,
    pub elapsed_secs: f64,
    pub achieved_rate_kbps: f64,
}

/// Terminal outcome of a run. Cancellation is a normal outcome here,
/// not an error.
#[derive(Clone, Debug, Serialize)]
pub struct TransmissionOutcome {
    pub status: TransmissionStatus,
    pub summary: TransmissionSummary,
}

/// Per-run mutable state. Owned exclusively by the engine for the
/// lifetime of one `run` call; nothing leaks across runs.
struct TransmissionState {
    started: Instant,
    bytes_sent: u64,
    /// 1-based index of the packet currently in flight (or the next one,
    /// once the previous has been credited)
    packet_index: u64,
}

impl TransmissionState {
    fn begin() -> Self {
        Self {
            started: Instant::now(),
            bytes_sent: 0,
            packet_index: 1,
        }
    }

    /// Snapshot taken synchronously after `completed` packets; safe to
    /// hand to a concurrently rendering consumer.
    fn snapshot(&self, completed: u64, total: u64) -> ProgressSnapshot {
        let elapsed = self.started.elapsed().as_secs_f64();
        let rate_kbps = if elapsed > 0.0 {
            self.bytes_sent as f64 * 8.0 / (elapsed * 1000.0)
        } else {
            0.0
        };
        let eta_secs = if completed > 0 {
            (total - completed) as f64 * (elapsed / completed as f64)
        } else {
            0.0
        };

        ProgressSnapshot {
            packet_index: completed,
            total_packets: total,
            bytes_sent: self.bytes_sent,
            elapsed_secs: elapsed,
            rate_kbps,
            eta_secs,
        }
    }
}

/// Drives the timed, interruptible packet loop. One logical run at a
/// time; the engine does no prompting of its own — confirmation gating
/// on slow plans is the caller's job, using the plan's figures.
pub struct TransmissionEngine {
    config: EngineConfig,
    cancel: CancelFlag,
}

impl TransmissionEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            cancel: CancelFlag::new(),
        }
    }

    pub fn new_default() -> Self {
        Self::new(EngineConfig::default())
    }

    /// Share an existing flag, so several engine configurations can hang
    /// off the same Ctrl-C handler
    pub fn with_cancel_flag(config: EngineConfig, cancel: CancelFlag) -> Self {
        Self { config, cancel }
    }

    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Run the plan over `content`, emitting events into `sink`.
    ///
    /// Packets are `packet_size_bytes` windows of the content (the last
    /// may be short). A cancelled in-flight packet is never credited:
    /// the summary then counts only whole delivered chunks.
    pub fn run<F>(&self, content: &[u8], plan: &TransmissionPlan, mut sink: F) -> TransmissionOutcome
    where
        F: FnMut(TransmissionEvent),
    {
        let total = plan.total_packets;
        let delay = Duration::from_secs_f64(plan.delay_per_packet_secs);
        let stats_every = self
            .config
            .stats_interval
            .unwrap_or_else(|| (total / 10).max(STATS_INTERVAL_FLOOR))
            .max(1);

        let mut state = TransmissionState::begin();
        debug!(
            "run started: {} packets, {:.3}s per packet",
            total, plan.delay_per_packet_secs
        );

        for (i, chunk) in content.chunks(plan.packet_size_bytes).enumerate() {
            let index = i as u64 + 1;
            state.packet_index = index;
            sink(TransmissionEvent::PacketStarted { index, total });

            // Hold the packet for its modeled airtime
            if !self.transmit_delay(delay, index, &mut sink) {
                return self.cancelled(&state, total);
            }

            state.bytes_sent += chunk.len() as u64;
            sink(TransmissionEvent::PacketDelivered {
                index,
                payload: chunk.to_vec(),
            });
            state.packet_index = index + 1;

            if self.config.live_stats && index % stats_every == 0 && index < total {
                sink(TransmissionEvent::LiveStats(state.snapshot(index, total)));
            }

            // Scheduling slack between packets, outside the rate model
            if !self.sleep_cancellable(self.config.inter_packet_pause) {
                return self.cancelled(&state, total);
            }
        }

        let elapsed = state.started.elapsed().as_secs_f64();
        let achieved_rate_kbps = if elapsed > 0.0 {
            state.bytes_sent as f64 * 8.0 / (elapsed * 1000.0)
        } else {
            0.0
        };
        info!(
            "transmission complete: {} packets, {} bytes in {:.2}s ({:.2} kbps)",
            state.packet_index - 1,
            state.bytes_sent,
            elapsed,
            achieved_rate_kbps
        );

        TransmissionOutcome {
            status: TransmissionStatus::Completed,
            summary: TransmissionSummary {
                packets_sent: state.packet_index - 1,
                total_packets: total,
                bytes_sent: state.bytes_sent,
                elapsed_secs: elapsed,
                achieved_rate_kbps,
            },
        }
    }

    /// Sleep out one packet's airtime as up to `MAX_DELAY_TICKS` equal
    /// sub-delays (one `DelayTick` each), so the caller can render
    /// incremental progress on multi-second packets. Sub-second delays
    /// are a single sleep. Returns false on cancellation.
    fn transmit_delay<F>(&self, delay: Duration, index: u64, sink: &mut F) -> bool
    where
        F: FnMut(TransmissionEvent),
    {
        let secs = delay.as_secs_f64();
        let ticks = (secs as u64).min(MAX_DELAY_TICKS);

        if ticks > 0 {
            let tick_len = Duration::from_secs_f64(secs / ticks as f64);
            for _ in 0..ticks {
                if !self.sleep_cancellable(tick_len) {
                    return false;
                }
                sink(TransmissionEvent::DelayTick { index });
            }
            true
        } else {
            self.sleep_cancellable(delay)
        }
    }

    /// Sleep `dur` in `cancel_poll`-sized slices, checking the cancel
    /// flag before each slice. Returns false as soon as cancellation is
    /// observed.
    fn sleep_cancellable(&self, dur: Duration) -> bool {
        let poll = self.config.cancel_poll;
        let mut remaining = dur;
        while remaining > Duration::ZERO {
            if self.cancel.is_cancelled() {
                return false;
            }
            let slice = if poll.is_zero() { remaining } else { remaining.min(poll) };
            thread::sleep(slice);
            remaining -= slice;
        }
        !self.cancel.is_cancelled()
    }

    fn cancelled(&self, state: &TransmissionState, total: u64) -> TransmissionOutcome {
        let elapsed = state.started.elapsed().as_secs_f64();
        let packets_sent = state.packet_index - 1;
        let achieved_rate_kbps = if elapsed > 0.0 {
            state.bytes_sent as f64 * 8.0 / (elapsed * 1000.0)
        } else {
            0.0
        };
        info!(
            "transmission cancelled after {} of {} packets ({} bytes)",
            packets_sent, total, state.bytes_sent
        );

        TransmissionOutcome {
            status: TransmissionStatus::Cancelled,
            summary: TransmissionSummary {
                packets_sent,
                total_packets: total,
                bytes_sent: state.bytes_sent,
                elapsed_secs: elapsed,
                achieved_rate_kbps,
            },
        }
    }
}
