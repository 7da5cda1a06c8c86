mod bridge;
mod config;
mod midi;
mod net;
mod types;

use std::net::TcpListener;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use bridge::TranslationEngine;
use bridge::resolve::MappingTable;
use config::MappingConfig;
use midi::MidiSender;
use types::intent::Intent;

/// Intent-to-MIDI control bridge for mixing surfaces
#[derive(Parser, Debug)]
#[command(name = "mixbridge")]
#[command(about = "Translates mixing intents into MIDI Control Change messages", long_about = None)]
struct Args {
    /// Mapping configuration file (YAML)
    #[arg(short = 'm', long = "mappings", required_unless_present = "list_devices")]
    mappings: Option<PathBuf>,

    /// Address to listen on for intent connections
    #[arg(short = 'l', long = "listen", default_value = "127.0.0.1:7077")]
    listen: String,

    /// MIDI output device for CC delivery (name or index); omit to skip delivery
    #[arg(short = 'o', long = "midi-out")]
    midi_out: Option<String>,

    /// List available MIDI output devices and exit
    #[arg(long = "list")]
    list_devices: bool,

    /// Translate a single intent given as JSON, print the result, and exit
    #[arg(long = "intent", value_name = "JSON")]
    intent: Option<String>,

    /// Verbose logging
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto)
        .expect("Failed to initialize logger");
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    // Handle --list flag
    if args.list_devices {
        println!("Available MIDI Output Devices:");
        for (i, device) in MidiSender::list_devices()?.iter().enumerate() {
            println!("  {}: {}", i, device);
        }
        return Ok(());
    }

    // Mappings are required when not listing (enforced by clap)
    let mappings_path = args.mappings.expect("--mappings is required");
    let config = MappingConfig::load(&mappings_path)?;
    let table = MappingTable::from_entries(config.mappings);
    log::info!(
        "loaded {} mapping entries from {}",
        table.len(),
        mappings_path.display()
    );

    let engine = TranslationEngine::new(table);

    // One-shot mode for scripting and smoke tests
    if let Some(json) = &args.intent {
        return translate_one(&engine, json);
    }

    let midi = match &args.midi_out {
        Some(search) => Some(MidiSender::connect(search)?),
        None => None,
    };

    let listener = TcpListener::bind(&args.listen)
        .with_context(|| format!("Failed to bind {}", args.listen))?;

    let (job_tx, job_rx) = crossbeam_channel::unbounded();
    std::thread::spawn(move || net::run_engine_worker(engine, job_rx, midi));

    net::serve(listener, job_tx)
}

/// Translate a single intent and print the bridge message as JSON
fn translate_one(engine: &TranslationEngine, json: &str) -> Result<()> {
    let intent: Intent = serde_json::from_str(json).context("Failed to parse intent JSON")?;
    let message = engine.translate(&intent)?;
    println!("{}", serde_json::to_string_pretty(&message)?);
    Ok(())
}
