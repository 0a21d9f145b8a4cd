/// Content resolution for the simulator: built-in sample text, an HTTP
/// URL fetched with a blocking client, or a local file read as UTF-8.
use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::SimError;

/// Keywords that select the built-in sample text (case-insensitive)
pub const SAMPLE_KEYWORDS: [&str; 4] = ["sample", "demo", "test", "default"];

/// Built-in demonstration text
pub const SAMPLE_TEXT: &str = "\
Welcome to the Meshtastic Network!

This is a sample message to demonstrate transmission speeds across different radio presets. Meshtastic creates a long range, low power mesh network for communication when traditional infrastructure is unavailable.

Key features of Meshtastic:
- Long range LoRa radio communication (up to 254km record!)
- Low power consumption for battery operation
- Mesh networking with automatic message routing
- End-to-end encryption for secure communications
- GPS position sharing and tracking
- Open source hardware and software

Radio presets balance three key factors:
1. Speed - How fast data transmits
2. Range - How far signals reach
3. Reliability - How well signals penetrate obstacles

The LongFast preset is the default because it provides the best balance for most users. Faster presets like ShortTurbo are great for high-density networks, while slower presets like LongSlow maximize range for remote communications.

This simulation helps you understand how different presets affect real-world message delivery times. Try different presets to see the dramatic differences in transmission speeds!

73, and happy meshing!
";

/// Resolve `source` as a reserved keyword, an HTTP/HTTPS URL, or a file
/// path — in that order.
pub fn fetch(source: &str) -> Result<String, SimError> {
    if SAMPLE_KEYWORDS.contains(&source.to_lowercase().as_str()) {
        info!("using built-in sample text");
        return Ok(SAMPLE_TEXT.to_string());
    }

    if is_url(source) {
        return fetch_url(source);
    }

    fetch_file(source)
}

/// Zero or whitespace-only content is rejected before planning
pub fn ensure_not_blank(content: &str) -> Result<(), SimError> {
    if content.trim().is_empty() {
        Err(SimError::EmptyContent)
    } else {
        Ok(())
    }
}

fn is_url(source: &str) -> bool {
    match reqwest::Url::parse(source) {
        Ok(url) => matches!(url.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

fn fetch_url(url: &str) -> Result<String, SimError> {
    info!("fetching content from URL: {}", url);
    let network_err = |e: reqwest::Error| SimError::Network {
        url: url.to_string(),
        reason: e.to_string(),
    };

    reqwest::blocking::get(url)
        .and_then(|response| response.error_for_status())
        .map_err(network_err)?
        .text()
        .map_err(network_err)
}

fn fetch_file(path: &str) -> Result<String, SimError> {
    if !Path::new(path).exists() {
        return Err(SimError::SourceNotFound(path.to_string()));
    }

    info!("reading file: {}", path);
    fs::read_to_string(path).map_err(|e| SimError::Io {
        path: path.to_string(),
        source: e,
    })
}
