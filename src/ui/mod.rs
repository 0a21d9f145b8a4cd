/// Presentation layer: banner, preset tables, the pre-flight analysis
/// block, confirmation gating on slow plans, and the live rendering loop
/// that consumes engine events off a channel.
pub mod progress;

use std::thread;

use dialoguer::Confirm;
use tracing::debug;

use crate::radio::engine::{
    TransmissionEngine, TransmissionEvent, TransmissionOutcome, TransmissionStatus,
};
use crate::radio::metrics::{TransmissionPlan, compute_plan};
use crate::radio::preset::{self, RadioPreset};
use crate::ui::progress::TransmissionDisplay;
use crate::utils::consts::{MODERATE_CONFIRM_SECS, SLOW_CONFIRM_SECS};

pub fn print_banner() {
    println!("MESHTASTIC TRANSMISSION SIMULATOR");
}

/// Preset table; the detailed view adds the modulation parameters and
/// typical range estimates
pub fn display_presets(detailed: bool) {
    println!("\n{}", "=".repeat(80));
    println!("  MESHTASTIC RADIO PRESETS");
    println!("{}", "=".repeat(80));

    if detailed {
        println!(
            "{:<2} {:<8} {:<8} {:<6} {:<4} {:<8} {:<30}",
            "#", "Speed", "SF/Sym", "BW", "CR", "Range", "Description"
        );
        println!("{}", "-".repeat(80));
        for p in preset::all() {
            let marker = if p.is_default() { " ★" } else { "  " };
            println!(
                "{:<2} {:<8.2} {:<8} {:<6} {:<4} {:<8} {}{}",
                p.id,
                p.data_rate_kbps,
                p.spreading_factor,
                format!("{}k", p.bandwidth_khz),
                p.coding_rate,
                p.range_estimate,
                p.name(),
                marker
            );
        }
        println!("{}", "=".repeat(80));
        println!("★ = Default preset  |  SF=Spreading Factor  |  BW=Bandwidth  |  CR=Coding Rate");
    } else {
        println!("{:<2} {:<8} {:<50}", "#", "Speed", "Description");
        println!("{}", "-".repeat(80));
        for p in preset::all() {
            let marker = if p.is_default() { " ★" } else { "" };
            println!("{:<2} {:<8.2} {}{}", p.id, p.data_rate_kbps, p.name(), marker);
        }
        println!("{}", "=".repeat(80));
        println!("★ = Default preset (LongFast)");
    }
}

/// Seconds to a human-readable duration
pub fn format_duration(secs: f64) -> String {
    if secs < 60.0 {
        format!("{:.1} seconds", secs)
    } else if secs < 3600.0 {
        format!("{:.1} minutes", secs / 60.0)
    } else {
        format!("{:.1} hours", secs / 3600.0)
    }
}

pub fn display_transmission_info(preset: &RadioPreset, plan: &TransmissionPlan, content_len: usize) {
    println!("\n{}", "=".repeat(70));
    println!("  TRANSMISSION ANALYSIS");
    println!("{}", "=".repeat(70));
    println!(
        "Preset:     {} ({:.2} kbps)",
        preset.name(),
        preset.data_rate_kbps
    );
    println!(
        "Technical:  SF {}, BW {}kHz, CR {}",
        preset.spreading_factor, preset.bandwidth_khz, preset.coding_rate
    );
    println!(
        "Content:    {} bytes ({} packets, {:.1}% overhead)",
        content_len, plan.total_packets, plan.overhead_percent
    );
    println!("Duration:   {}", format_duration(plan.total_duration_secs));
    println!("{}", "=".repeat(70));
}

/// Slow plans need explicit opt-in before airtime is burned. The engine
/// itself never prompts; the thresholds gate on the plan's figures.
fn confirm_start(plan: &TransmissionPlan) -> bool {
    let delay = plan.delay_per_packet_secs;
    let duration = format_duration(plan.total_duration_secs);

    if delay > SLOW_CONFIRM_SECS {
        Confirm::new()
            .with_prompt(format!("This will take {} - very slow! Continue?", duration))
            .default(false)
            .interact()
            .unwrap_or(false)
    } else if delay > MODERATE_CONFIRM_SECS {
        Confirm::new()
            .with_prompt(format!("Estimated time: {}. Continue?", duration))
            .default(true)
            .interact()
            .unwrap_or(false)
    } else {
        true
    }
}

/// Plan, confirm, and run one transmission, rendering live progress.
///
/// The engine loop runs on a worker thread; events cross a channel and
/// are rendered here until the channel closes. Returns None when the
/// user declines at the confirmation gate.
pub fn simulate_transmission(
    content: &str,
    preset: &RadioPreset,
    engine: &TransmissionEngine,
) -> Option<TransmissionOutcome> {
    let plan = compute_plan(preset, content.len());
    display_transmission_info(preset, &plan, content.len());

    if !confirm_start(&plan) {
        println!("Cancelled.");
        return None;
    }

    engine.cancel_flag().reset();
    println!("\nStarting transmission... (Press Ctrl+C to stop)");

    let (tx, rx) = crossbeam_channel::unbounded::<TransmissionEvent>();
    let outcome = thread::scope(|s| {
        let plan = &plan;
        let worker = s.spawn(move || {
            engine.run(content.as_bytes(), plan, move |event| {
                let _ = tx.send(event);
            })
        });

        let display = TransmissionDisplay::new(plan.total_packets);
        for event in rx.iter() {
            display.handle(&event);
        }
        display.finish();

        worker.join().expect("engine thread panicked")
    });
    debug!("engine thread joined");

    print_summary(&outcome);
    Some(outcome)
}

pub fn print_summary(outcome: &TransmissionOutcome) {
    let s = &outcome.summary;
    match outcome.status {
        TransmissionStatus::Completed => {
            println!("\nTransmission complete!");
            println!(
                "Time: {} | Packets: {} | Rate: {:.2} kbps",
                format_duration(s.elapsed_secs),
                s.packets_sent,
                s.achieved_rate_kbps
            );
        }
        TransmissionStatus::Cancelled => {
            println!("\nTransmission stopped after {}", format_duration(s.elapsed_secs));
            println!(
                "Sent {} of {} packets ({} bytes)",
                s.packets_sent, s.total_packets, s.bytes_sent
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration_boundaries() {
        assert_eq!(format_duration(0.0), "0.0 seconds");
        assert_eq!(format_duration(45.26), "45.3 seconds");
        assert_eq!(format_duration(59.9), "59.9 seconds");
        assert_eq!(format_duration(90.0), "1.5 minutes");
        assert_eq!(format_duration(3599.0), "60.0 minutes");
        assert_eq!(format_duration(7200.0), "2.0 hours");
    }
}
