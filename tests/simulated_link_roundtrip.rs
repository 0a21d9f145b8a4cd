use std::time::Duration;

use meshsim_rs::radio::engine::{EngineConfig, TransmissionEngine, TransmissionEvent, TransmissionStatus};
use meshsim_rs::radio::{metrics, preset};

#[test]
fn simulated_link_round_trip_without_radio() {
    let turbo = preset::lookup("1").expect("fastest preset registered");
    let message = "Rust makes packet radio fun! 你好，世界！".repeat(16);
    let plan = metrics::compute_plan(turbo, message.len());
    assert!(
        plan.total_packets >= 2,
        "message should span several packets"
    );

    let engine = TransmissionEngine::new(EngineConfig {
        inter_packet_pause: Duration::ZERO,
        ..EngineConfig::default()
    });

    let mut received = Vec::new();
    let outcome = engine.run(message.as_bytes(), &plan, |event| {
        if let TransmissionEvent::PacketDelivered { payload, .. } = event {
            received.extend_from_slice(&payload);
        }
    });

    assert_eq!(outcome.status, TransmissionStatus::Completed);
    assert_eq!(outcome.summary.packets_sent, plan.total_packets);
    assert_eq!(outcome.summary.bytes_sent, message.len() as u64);

    let received = String::from_utf8(received).expect("chunks reassemble to the original text");
    assert_eq!(received, message);
}

#[test]
fn cancelled_link_reports_partial_delivery() {
    // LongSlow holds each packet for over ten seconds; cancelling on the
    // first packet must return promptly with nothing credited.
    let slow = preset::lookup("8").expect("slowest preset registered");
    let message = "x".repeat(600);
    let plan = metrics::compute_plan(slow, message.len());
    assert!(plan.delay_per_packet_secs > 10.0);

    let engine = TransmissionEngine::new_default();
    let flag = engine.cancel_flag();

    let outcome = engine.run(message.as_bytes(), &plan, |event| {
        if let TransmissionEvent::PacketStarted { index: 1, .. } = event {
            flag.cancel();
        }
    });

    assert_eq!(outcome.status, TransmissionStatus::Cancelled);
    assert_eq!(outcome.summary.packets_sent, 0);
    assert_eq!(outcome.summary.bytes_sent, 0);
    assert_eq!(outcome.summary.total_packets, 3);
    assert!(outcome.summary.elapsed_secs < plan.delay_per_packet_secs);
}
