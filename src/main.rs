use clap::Parser;
use dialoguer::{Input, Select};
use tracing::{error, warn};

use meshsim_rs::content;
use meshsim_rs::radio::engine::{EngineConfig, TransmissionEngine, TransmissionOutcome};
use meshsim_rs::radio::preset;
use meshsim_rs::ui;
use meshsim_rs::utils::logging::init_logging;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// File path, URL, or 'sample' for the built-in demo text
    source: Option<String>,

    /// Radio preset id (1-8); defaults to LongFast
    preset: Option<String>,

    /// Print the final transmission summary as JSON
    #[arg(long)]
    json: bool,
}

fn main() {
    init_logging();
    ui::print_banner();
    let cli = Cli::parse();

    let engine = TransmissionEngine::new_default();

    // One process-wide handler; each run re-arms the shared flag
    let cancel = engine.cancel_flag();
    if let Err(e) = ctrlc::set_handler(move || cancel.cancel()) {
        warn!("could not install Ctrl-C handler: {}", e);
    }

    match cli.source {
        Some(source) => run_direct(&engine, &source, cli.preset.as_deref(), cli.json),
        None => run_interactive(&engine),
    }
}

/// Non-interactive mode: resolve everything up front, simulate once.
/// Content failures exit non-zero; completion and user cancellation both
/// exit 0.
fn run_direct(engine: &TransmissionEngine, source: &str, preset_id: Option<&str>, json: bool) {
    // Invalid or missing preset ids fall back to the default here — the
    // one documented substitution path
    let preset = match preset_id {
        Some(id) => preset::lookup(id).unwrap_or_else(|| {
            warn!(
                "unknown preset '{}', falling back to #{}",
                id,
                preset::DEFAULT_PRESET_ID
            );
            preset::default_preset()
        }),
        None => preset::default_preset(),
    };
    println!("Direct mode: {} with preset #{}", source, preset.id);

    let content = match content::fetch(source) {
        Ok(content) => content,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = content::ensure_not_blank(&content) {
        error!("{}", e);
        std::process::exit(1);
    }

    if let Some(outcome) = ui::simulate_transmission(&content, preset, engine) {
        print_json_summary(&outcome, json);
    }
}

fn run_interactive(engine: &TransmissionEngine) {
    println!(
        "Default: {} (#{})",
        preset::default_preset().name(),
        preset::DEFAULT_PRESET_ID
    );

    loop {
        let items = [
            "View radio presets",
            "View detailed specs",
            "Simulate transmission",
            "Quick demo",
            "Exit",
        ];
        let choice = match Select::new()
            .with_prompt("Option")
            .items(&items)
            .default(0)
            .interact()
        {
            Ok(choice) => choice,
            Err(_) => break,
        };

        match choice {
            0 => ui::display_presets(false),
            1 => ui::display_presets(true),
            2 => simulate_from_prompt(engine),
            3 => quick_demo(engine),
            _ => {
                println!("Goodbye!");
                break;
            }
        }
    }
}

fn simulate_from_prompt(engine: &TransmissionEngine) {
    println!("\nFile source:");
    println!("  File path: /path/to/file.txt");
    println!("  URL: https://example.com/text.txt");
    println!("  'sample' for demo text");

    let source: String = match Input::new()
        .with_prompt("Source")
        .allow_empty(true)
        .interact_text()
    {
        Ok(source) => source,
        Err(_) => return,
    };
    let source = source.trim();
    if source.is_empty() {
        println!("No source provided.");
        return;
    }

    let content = match content::fetch(source) {
        Ok(content) => content,
        Err(e) => {
            error!("{}", e);
            return;
        }
    };
    if content::ensure_not_blank(&content).is_err() {
        println!("File is empty.");
        return;
    }

    ui::display_presets(false);
    let preset_input: String = Input::new()
        .with_prompt(format!("Preset (1-8, Enter for #{})", preset::DEFAULT_PRESET_ID))
        .allow_empty(true)
        .interact_text()
        .unwrap_or_default();

    let preset = if preset_input.trim().is_empty() {
        preset::default_preset()
    } else {
        match preset::resolve(preset_input.trim()) {
            Ok(preset) => preset,
            Err(e) => {
                error!("{}", e);
                return;
            }
        }
    };

    let _ = ui::simulate_transmission(&content, preset, engine);
}

/// Sample text on the default preset, without live-stat interruptions
fn quick_demo(engine: &TransmissionEngine) {
    println!("\nQuick demo with {} preset...", preset::default_preset().name());
    let quiet = TransmissionEngine::with_cancel_flag(
        EngineConfig {
            live_stats: false,
            ..EngineConfig::default()
        },
        engine.cancel_flag(),
    );
    let _ = ui::simulate_transmission(content::SAMPLE_TEXT, preset::default_preset(), &quiet);
}

fn print_json_summary(outcome: &TransmissionOutcome, json: bool) {
    if !json {
        return;
    }
    match serde_json::to_string_pretty(outcome) {
        Ok(rendered) => println!("{}", rendered),
        Err(e) => error!("failed to render summary: {}", e),
    }
}
