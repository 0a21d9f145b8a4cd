/// Transmission planning: turns a preset and a content length into the
/// timing and throughput figures the engine replays.
use serde::Serialize;

use super::preset::RadioPreset;

/// Precomputed figures for one (preset, content length) pair.
///
/// Invariant: `total_duration_secs == total_packets as f64 *
/// delay_per_packet_secs`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TransmissionPlan {
    pub bytes_per_second: f64,
    pub delay_per_packet_secs: f64,
    pub packet_size_bytes: usize,
    pub total_packets: u64,
    pub total_duration_secs: f64,
    pub effective_rate_bps: f64,
    pub effective_rate_kbps: f64,
    /// Padding cost of the fixed packet size: 0 exactly when the content
    /// length is a multiple of the packet size
    pub overhead_percent: f64,
}

/// Pure and deterministic; the catalog guarantees `data_rate_kbps > 0`,
/// so no division by zero is possible here.
pub fn compute_plan(preset: &RadioPreset, content_len_bytes: usize) -> TransmissionPlan {
    let packet_size = preset.packet_size_bytes;
    let bytes_per_second = preset.data_rate_kbps * 1000.0 / 8.0;
    let delay_per_packet_secs = packet_size as f64 / bytes_per_second;

    let total_packets = if content_len_bytes > 0 {
        content_len_bytes.div_ceil(packet_size) as u64
    } else {
        0
    };
    let total_duration_secs = total_packets as f64 * delay_per_packet_secs;

    let effective_rate_bps = if total_duration_secs > 0.0 {
        content_len_bytes as f64 / total_duration_secs
    } else {
        0.0
    };
    let overhead_percent = if content_len_bytes > 0 {
        (total_packets as f64 * packet_size as f64 - content_len_bytes as f64)
            / content_len_bytes as f64
            * 100.0
    } else {
        0.0
    };

    TransmissionPlan {
        bytes_per_second,
        delay_per_packet_secs,
        packet_size_bytes: packet_size,
        total_packets,
        total_duration_secs,
        effective_rate_bps,
        effective_rate_kbps: effective_rate_bps * 8.0 / 1000.0,
        overhead_percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::radio::preset;

    #[test]
    fn test_long_fast_scenario() {
        // LongFast: 1.07 kbps, 237-byte packets, 1000 bytes of content
        let plan = compute_plan(preset::lookup("6").unwrap(), 1000);

        assert_eq!(plan.total_packets, 5);
        assert_eq!(plan.bytes_per_second, 133.75);
        assert!((plan.delay_per_packet_secs - 237.0 / 133.75).abs() < 1e-12);
        assert!((plan.total_duration_secs - 5.0 * plan.delay_per_packet_secs).abs() < 1e-12);
        assert!((plan.overhead_percent - 18.5).abs() < 1e-9);
        assert!(plan.effective_rate_bps > 0.0);
    }

    #[test]
    fn test_packet_count_matches_ceiling_for_all_presets() {
        for p in preset::all() {
            for len in [0usize, 1, 236, 237, 238, 474, 1000, 50_000] {
                let plan = compute_plan(p, len);
                let expected = if len > 0 {
                    len.div_ceil(p.packet_size_bytes) as u64
                } else {
                    0
                };
                assert_eq!(plan.total_packets, expected, "preset {} len {}", p.id, len);
            }
        }
    }

    #[test]
    fn test_duration_invariant_is_exact() {
        for p in preset::all() {
            let plan = compute_plan(p, 12_345);
            assert_eq!(
                plan.total_duration_secs,
                plan.total_packets as f64 * plan.delay_per_packet_secs
            );
        }
    }

    #[test]
    fn test_overhead_zero_on_exact_multiple() {
        let p = preset::lookup("6").unwrap();

        let plan = compute_plan(p, p.packet_size_bytes * 3);
        assert_eq!(plan.overhead_percent, 0.0);

        let plan = compute_plan(p, p.packet_size_bytes * 3 + 1);
        assert!(plan.overhead_percent > 0.0);
    }

    #[test]
    fn test_zero_length_content() {
        let plan = compute_plan(preset::lookup("6").unwrap(), 0);

        assert_eq!(plan.total_packets, 0);
        assert_eq!(plan.total_duration_secs, 0.0);
        assert_eq!(plan.effective_rate_bps, 0.0);
        assert_eq!(plan.effective_rate_kbps, 0.0);
        assert_eq!(plan.overhead_percent, 0.0);
    }

    #[test]
    fn test_compute_plan_is_idempotent() {
        let p = preset::lookup("4").unwrap();
        assert_eq!(compute_plan(p, 9999), compute_plan(p, 9999));
    }
}
