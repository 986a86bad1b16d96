//! party-runner: headless driver for the party randomizer.
//!
//! Usage:
//!   party-runner --seed 12345
//!   party-runner --seed 12345 --db party.db --config party.json
//!   party-runner --ipc-mode          (one JSON command per stdin line)

use anyhow::Result;
use spinparty_core::{
    command::PartyCommand,
    config::PartyConfig,
    event::PartyEvent,
    history::HistoryEntry,
    participants,
    render::FrameLog,
    rng::entropy_seed,
    store::AppStore,
    PartyApp,
};
use std::env;
use std::io::{self, BufRead, Write};

const DEMO_PARTICIPANTS: &str = "Alice\nBob\nCarol\nDave\nEve\nFrank";

#[derive(serde::Serialize)]
struct UiState<'a> {
    frame:        u64,
    participants: Vec<String>,
    player_count: String,
    angle:        f64,
    spinning:     bool,
    theme:        &'static str,
    accent:       &'a str,
    toast:        Option<String>,
    history:      Vec<HistoryEntry>,
    events:       &'a [PartyEvent],
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", entropy_seed());
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let db = flag_value(&args, "--db").unwrap_or(":memory:");
    let config = match flag_value(&args, "--config") {
        Some(path) => PartyConfig::load(path)?,
        None => PartyConfig::default(),
    };

    if !ipc_mode {
        println!("Spin Party: party-runner");
        println!("  seed:  {seed}");
        println!("  db:    {db}");
        println!();
    }

    let store = if db == ":memory:" { AppStore::in_memory()? } else { AppStore::open(db)? };
    let mut app = PartyApp::build(seed, config, store)?;

    if ipc_mode {
        run_ipc_loop(&mut app)?;
    } else {
        run_demo(&mut app)?;
    }
    Ok(())
}

fn run_ipc_loop(app: &mut PartyApp) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let command: PartyCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                writeln!(stdout, "{}", serde_json::json!({ "error": e.to_string() }))?;
                stdout.flush()?;
                continue;
            }
        };

        // Commands run to completion: a spin answers with its winner.
        let events = app
            .apply(command)
            .map(|mut events| {
                events.extend(app.run_until_idle());
                events
            });
        match events {
            Ok(events) => {
                writeln!(stdout, "{}", serde_json::to_string(&ui_state(app, &events))?)?;
            }
            Err(e) => {
                log::warn!("command rejected: {e}");
                writeln!(stdout, "{}", serde_json::json!({ "error": e.to_string() }))?;
            }
        }
        stdout.flush()?;
    }
    Ok(())
}

fn run_demo(app: &mut PartyApp) -> Result<()> {
    if app.participants().len() < 2 {
        app.set_participants(DEMO_PARTICIPANTS)?;
    }
    let frames = FrameLog::new();
    app.set_render_target(Box::new(frames.clone()));
    frames.clear();

    app.spin()?;
    let events = app.run_until_idle();
    let winner = events.iter().find_map(|e| match e {
        PartyEvent::WinnerSelected(w) => Some(w),
        _ => None,
    });

    println!("=== SPIN ===");
    println!("  players:   {}", participants::count_label(app.participants().len()));
    println!("  frames:    {}", frames.len());
    if let Some(w) = winner {
        println!("  winner:    {} (segment {})", w.name, w.index);
        println!("  angle:     {:.4} rad", w.final_angle);
    }

    println!();
    println!("=== HISTORY ===");
    if app.history().is_empty() {
        println!("  (empty)");
    }
    for entry in app.history().entries() {
        println!("  {}  {}", entry.date, entry.text);
    }
    Ok(())
}

fn ui_state<'a>(app: &'a PartyApp, events: &'a [PartyEvent]) -> UiState<'a> {
    let list = app.participants();
    UiState {
        frame:        app.clock.frame,
        player_count: participants::count_label(list.len()),
        participants: list,
        angle:        app.wheel().current_angle(),
        spinning:     app.wheel().is_spinning(),
        theme:        app.prefs().theme.css_class(),
        accent:       app.prefs().accent(),
        toast:        app.toast().map(|t| t.text.clone()),
        history:      app.history().to_vec(),
        events,
    }
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    flag_value(args, flag)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
