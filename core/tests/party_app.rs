//! The app shell: wheel wiring, the other tools, history, toasts.

use spinparty_core::{
    coin::CoinSide,
    command::PartyCommand,
    config::PartyConfig,
    event::{PartyEvent, WinnerEvent, WinnerSink},
    prefs::Theme,
    render::FrameLog,
    PartyApp, PartyError,
};
use std::{cell::RefCell, rc::Rc};

/// Spin and save logs show up under `cargo test -- --nocapture`.
fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn app_with(raw: &str) -> PartyApp {
    init_logging();
    let mut app = PartyApp::build_test(42).unwrap();
    app.set_participants(raw).unwrap();
    app
}

fn winners(events: &[PartyEvent]) -> Vec<&WinnerEvent> {
    events
        .iter()
        .filter_map(|e| match e {
            PartyEvent::WinnerSelected(w) => Some(w),
            _ => None,
        })
        .collect()
}

#[test]
fn spin_publishes_one_winner_to_history_toast_and_confetti() {
    let mut app = app_with("Alice\nBob\nCarol");
    let started = app.spin().unwrap();
    assert!(matches!(started[0], PartyEvent::SpinStarted { participants: 3, .. }));
    assert!(app.wheel().is_spinning());

    let events = app.run_until_idle();
    let found = winners(&events);
    assert_eq!(found.len(), 1);
    let name = found[0].name.clone();
    assert!(["Alice", "Bob", "Carol"].contains(&name.as_str()));

    assert_eq!(app.history().latest().unwrap().text, format!("Wheel: {name}"));
    assert_eq!(app.toast().unwrap().text, format!("🏆 Winner: {name}"));
    assert!(app.celebration().is_active());
    assert!(!app.wheel().is_spinning());
}

#[test]
fn eased_spin_takes_the_configured_duration() {
    let mut app = app_with("A\nB");
    app.spin().unwrap();
    let before = app.clock.frame;
    app.run_until_idle();
    // 4000 ms at 60 fps.
    let frames = app.clock.frame - before;
    assert!((240..=241).contains(&frames), "took {frames} frames");
}

#[test]
fn spin_with_too_few_names_is_rejected_with_a_toast() {
    let mut app = app_with("Solo");
    let err = app.spin().unwrap_err();
    assert!(matches!(err, PartyError::InsufficientParticipants { count: 1 }));
    assert_eq!(app.toast().unwrap().text, "Add at least 2 participants!");
    assert!(!app.wheel().is_spinning());
    assert_eq!(app.wheel().current_angle(), 0.0);
    assert!(app.history().is_empty());
}

#[test]
fn spinning_twice_does_not_queue_a_second_spin() {
    let mut app = app_with("A\nB\nC");
    app.spin().unwrap();
    app.frame();
    assert!(app.spin().unwrap().is_empty());
    let events = app.run_until_idle();
    assert_eq!(winners(&events).len(), 1);
    assert_eq!(app.history().len(), 1);
}

#[test]
fn editing_the_list_mid_spin_does_not_change_the_outcome() {
    let mut app = app_with("Alice\nBob");
    let frames = FrameLog::new();
    app.set_render_target(Box::new(frames.clone()));
    frames.clear();

    app.spin().unwrap();
    for _ in 0..10 {
        app.frame();
    }
    app.set_participants("Xavier\nYolanda\nZack").unwrap();
    let events = app.run_until_idle();

    let name = &winners(&events)[0].name;
    assert!(name == "Alice" || name == "Bob", "winner {name} not in the spun list");
    let original = vec!["Alice".to_string(), "Bob".to_string()];
    assert!(!app.wheel().is_spinning());
    let last = frames.last().unwrap();
    assert_eq!(last.participants, original);
    assert_eq!(app.participants().len(), 3);
}

#[test]
fn editing_the_list_while_idle_redraws() {
    let mut app = app_with("A\nB");
    let frames = FrameLog::new();
    app.set_render_target(Box::new(frames.clone()));
    app.set_participants("A\nB\nC\nD").unwrap();
    assert_eq!(frames.last().unwrap().participants.len(), 4);
}

#[test]
fn frames_follow_the_current_render_target() {
    let mut app = app_with("A\nB\nC");
    let main = FrameLog::new();
    let zoom = FrameLog::new();
    app.set_render_target(Box::new(main.clone()));

    app.spin().unwrap();
    app.frame();
    let main_frames = main.len();

    app.set_render_target(Box::new(zoom.clone()));
    app.run_until_idle();

    assert_eq!(main.len(), main_frames, "main surface drawn after swap");
    assert!(zoom.len() > 1);
    // Last frame is drawn unwrapped; the resting angle is wrapped.
    let drawn = zoom.last().unwrap().angle.rem_euclid(std::f64::consts::TAU);
    assert!((drawn - app.wheel().current_angle()).abs() < 1e-9);
}

#[test]
fn registered_sinks_see_every_winner() {
    struct Collect(Rc<RefCell<Vec<String>>>);
    impl WinnerSink for Collect {
        fn on_winner(&mut self, winner: &WinnerEvent) {
            self.0.borrow_mut().push(winner.name.clone());
        }
    }

    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut app = app_with("A\nB\nC\nD");
    app.register_winner_sink(Box::new(Collect(seen.clone())));
    for _ in 0..3 {
        app.spin().unwrap();
        app.run_until_idle();
    }
    assert_eq!(seen.borrow().len(), 3);
}

#[test]
fn teams_are_dealt_round_robin() {
    let mut app = app_with("A\nB\nC\nD\nE");
    let events = app.generate_teams(2).unwrap();
    let PartyEvent::TeamsGenerated { teams } = &events[0] else {
        panic!("expected teams");
    };
    assert_eq!(teams.iter().map(Vec::len).collect::<Vec<_>>(), vec![3, 2]);
    assert_eq!(app.last_teams(), teams.as_slice());
    assert!(app.history().is_empty(), "teams are not logged");
}

#[test]
fn too_many_teams_is_rejected_with_a_toast() {
    let mut app = app_with("A\nB");
    let err = app.generate_teams(3).unwrap_err();
    assert!(matches!(err, PartyError::NotEnoughPlayers { players: 2, teams: 3 }));
    assert_eq!(app.toast().unwrap().text, "Not enough players!");
}

#[test]
fn dice_roll_is_logged_and_clamped() {
    let mut app = app_with("");
    let events = app.roll_dice(3).unwrap();
    let PartyEvent::DiceRolled { faces, total } = &events[0] else {
        panic!("expected dice");
    };
    assert_eq!(faces.len(), 3);
    assert_eq!(app.history().latest().unwrap().text, format!("Dice (3): Total {total}"));
    assert!(app.celebration().is_active());

    app.roll_dice(500).unwrap();
    assert_eq!(app.last_roll().unwrap().quantity(), 25);
}

#[test]
fn coin_flip_is_logged_and_announced() {
    let mut app = app_with("");
    app.flip_coin().unwrap();
    let side = app.last_coin().unwrap();
    let label = match side {
        CoinSide::Heads => "Heads",
        CoinSide::Tails => "Tails",
    };
    assert_eq!(app.history().latest().unwrap().text, format!("Coin: {label}"));
    assert_eq!(app.toast().unwrap().text, format!("Result: {label}"));
}

#[test]
fn history_keeps_the_twenty_newest() {
    let mut app = app_with("");
    for _ in 0..25 {
        app.flip_coin().unwrap();
    }
    assert_eq!(app.history().len(), 20);
    app.clear_history().unwrap();
    assert!(app.history().is_empty());
}

#[test]
fn toast_disappears_after_its_lifetime() {
    let mut app = app_with("");
    app.flip_coin().unwrap();
    assert!(app.toast().is_some());
    // 3000 ms at 60 fps is 180 frames.
    for _ in 0..181 {
        app.frame();
    }
    assert!(app.toast().is_none());
}

#[test]
fn theme_and_accent() {
    let mut app = app_with("");
    app.set_theme(Theme::Dark).unwrap();
    assert_eq!(app.prefs().theme, Theme::Dark);
    app.set_accent("#34C759").unwrap();
    assert_eq!(app.prefs().accent(), "#34c759");
    assert!(matches!(
        app.set_accent("green"),
        Err(PartyError::InvalidArgument { .. })
    ));
    assert_eq!(app.prefs().accent(), "#34c759");
}

#[test]
fn commands_parse_from_json_and_apply() {
    let mut app = PartyApp::build_test(7).unwrap();
    let script = [
        r#"{"cmd":"set_participants","raw":"Ann\nBen\nCid"}"#,
        r#"{"cmd":"roll_dice","count":2}"#,
        r#"{"cmd":"set_theme","theme":"theme-light"}"#,
        r#"{"cmd":"set_frame_rate","rate":"performance"}"#,
        r#"{"cmd":"spin"}"#,
    ];
    for line in script {
        let command: PartyCommand = serde_json::from_str(line).unwrap();
        app.apply(command).unwrap();
    }
    assert_eq!(app.participants(), vec!["Ann", "Ben", "Cid"]);
    assert_eq!(app.prefs().theme, Theme::Light);
    assert!(app.wheel().is_spinning());
    let events = app.run_until_idle();
    assert_eq!(winners(&events).len(), 1);
    // 4000 ms at 30 fps.
    assert!(app.clock.frame <= 121);
}

#[test]
fn reset_returns_to_a_clean_slate() {
    let mut app = app_with("A\nB");
    app.flip_coin().unwrap();
    app.set_theme(Theme::Dark).unwrap();
    app.spin().unwrap();
    app.run_until_idle();

    let events = app.reset().unwrap();
    assert_eq!(events, vec![PartyEvent::StateReset]);
    assert!(app.participants().is_empty());
    assert!(app.history().is_empty());
    assert_eq!(app.prefs().theme, Theme::Auto);
    assert_eq!(app.wheel().current_angle(), 0.0);
}

#[test]
fn reset_replays_every_tool_from_the_seed() {
    let roster = "A\nB\nC\nD\nE";
    let play = |app: &mut PartyApp| {
        app.set_participants(roster).unwrap();
        app.roll_dice(3).unwrap();
        app.flip_coin().unwrap();
        app.generate_teams(2).unwrap();
        (
            app.last_roll().unwrap().faces.clone(),
            app.last_coin().unwrap(),
            app.last_teams().to_vec(),
        )
    };

    let mut app = app_with("");
    let first = play(&mut app);
    app.spin().unwrap();
    app.run_until_idle();
    app.reset().unwrap();
    let second = play(&mut app);
    assert_eq!(first, second);
}

#[test]
fn config_flows_into_the_app() {
    let config = PartyConfig { history_limit: 3, max_dice: 4, ..PartyConfig::default() };
    let mut app = PartyApp::new(1, config).unwrap();
    app.roll_dice(10).unwrap();
    assert_eq!(app.last_roll().unwrap().quantity(), 4);
    for _ in 0..5 {
        app.flip_coin().unwrap();
    }
    assert_eq!(app.history().len(), 3);
}
