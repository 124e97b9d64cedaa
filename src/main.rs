// SPDX-License-Identifier: GPL-3.0-only

//! Codeboard gesture script runner
//!
//! Loads a skin, plays a gesture script through the keyboard engine and
//! prints the resulting buffer. Scripts are replayed on a manual clock by
//! default; `--live` feeds them through the async driver in real time.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use codeboard::app_settings;
use codeboard::driver::KeyboardDriver;
use codeboard::engine::{BufferHost, GridGeometry, KeyboardEngine};
use codeboard::input::ManualClock;
use codeboard::layout::{builtin_skin_names, load_skin};
use codeboard::script::GestureScript;

/// Replay touch keyboard gestures and print the typed text
#[derive(Parser, Debug)]
#[command(name = "codeboard", version, about = "Replay touch keyboard gestures")]
struct CliArgs {
    /// Gesture script (JSON list of steps)
    #[arg(value_name = "SCRIPT", required_unless_present = "list_skins")]
    script: Option<PathBuf>,

    /// Built-in skin name or path to a skin JSON file
    #[arg(short, long, default_value = app_settings::DEFAULT_SKIN)]
    skin: String,

    /// Initial buffer contents
    #[arg(long, default_value = "")]
    initial: String,

    /// Feed the script through the driver in real time
    #[arg(long)]
    live: bool,

    /// List the built-in skins and exit
    #[arg(long)]
    list_skins: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging on stderr; stdout carries the buffer
    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    if let Ok(directive) = "codeboard=info".parse() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();

    if args.list_skins {
        for name in builtin_skin_names() {
            println!("{}", name);
        }
        return ExitCode::SUCCESS;
    }

    match run(args).await {
        Ok(value) => {
            print!("{}", value);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("codeboard: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: CliArgs) -> Result<String, Box<dyn std::error::Error>> {
    let Some(script_path) = args.script else {
        return Err("no script given".into());
    };

    let skin = load_skin(&args.skin)?;
    let script = GestureScript::from_file(&script_path)?;
    for warning in &script.warnings {
        tracing::warn!("Script '{}': {}", script_path.display(), warning);
    }
    let script = script.into_value();

    let grid = GridGeometry::with_default_size(&skin);
    let engine = KeyboardEngine::new(skin, BufferHost::new(args.initial)).with_geometry(grid);

    tracing::info!(
        "Running {} step(s) from '{}' ({})",
        script.steps.len(),
        script_path.display(),
        if args.live { "live" } else { "replay" }
    );

    let engine = if args.live {
        let (driver, mut handle) = KeyboardDriver::new(engine);
        let task = tokio::spawn(driver.run());
        script.feed(&mut handle).await?;
        handle.shutdown().await?;
        task.await?
    } else {
        let clock = ManualClock::default();
        let mut engine = engine.with_clock(clock.clone());
        script.replay(&mut engine, &clock);
        engine.reset();
        engine
    };

    Ok(engine.into_host().into_value())
}
