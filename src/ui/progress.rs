use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::radio::engine::TransmissionEvent;
use crate::ui::format_duration;

/// Live view of one transmission: a packet progress bar with the
/// delivered payload printed above it and rate/ETA in the message slot.
pub struct TransmissionDisplay {
    bar: ProgressBar,
}

impl TransmissionDisplay {
    pub fn new(total_packets: u64) -> Self {
        // Payload and bar share stdout; diagnostics stay on stderr
        let bar = ProgressBar::with_draw_target(Some(total_packets), ProgressDrawTarget::stdout());
        bar.set_style(
            ProgressStyle::default_bar()
                .template(templates::TRANSMIT)
                .unwrap()
                .progress_chars("█▉▊▋▌▍▎▏ "),
        );
        Self { bar }
    }

    pub fn handle(&self, event: &TransmissionEvent) {
        match event {
            TransmissionEvent::PacketStarted { .. } => {}
            TransmissionEvent::DelayTick { .. } => self.bar.tick(),
            TransmissionEvent::PacketDelivered { payload, .. } => {
                // Chunking is byte-oriented, so a packet boundary may split
                // a multi-byte character
                self.bar.println(String::from_utf8_lossy(payload));
                self.bar.inc(1);
            }
            TransmissionEvent::LiveStats(snap) => {
                self.bar.set_message(format!(
                    "{:.2} kbps | ETA {}",
                    snap.rate_kbps,
                    format_duration(snap.eta_secs)
                ));
            }
        }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

pub mod templates {
    pub const TRANSMIT: &str =
        "\u{f048a} TX   [{bar:30.cyan}] {percent}% ({pos}/{len} packets) {msg}";
}
