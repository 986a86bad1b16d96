//! The party app: one owner for the wheel, the other tools and the
//! persisted state.
//!
//! RULES:
//!   - The wheel engine owns the wheel. The app only forwards frames,
//!     participant snapshots and winners.
//!   - Every tool draws from its own RngBank stream.
//!   - Any change to participants, history or preferences is saved. A
//!     failed save never undoes the change or swallows its events; it is
//!     logged and reported as a trailing SaveFailed event.
//!   - Winners fan out to history, toast, confetti, then registered sinks.

use crate::{
    animator::{SpinStart, WheelEngine},
    clock::{FrameClock, FrameRate},
    coin::{flip_coin, CoinSide},
    command::PartyCommand,
    config::PartyConfig,
    confetti::Celebration,
    dice::{roll_dice, DiceRoll},
    error::{PartyError, PartyResult},
    event::{PartyEvent, WinnerEvent, WinnerSink},
    history::History,
    notifier::{Notifier, Toast},
    participants,
    prefs::{Preferences, Theme},
    render::{NullSink, RenderSink},
    rng::{RngBank, SeededRandom, ToolSlot},
    snapshot::SavedState,
    store::AppStore,
    teams::generate_teams,
};
use chrono::Local;

pub struct PartyApp {
    pub clock:     FrameClock,
    config:        PartyConfig,
    bank:          RngBank,
    wheel:         WheelEngine<SeededRandom>,
    raw_text:      String,
    history:       History,
    prefs:         Preferences,
    notifier:      Notifier,
    celebration:   Celebration,
    teams_rng:     SeededRandom,
    dice_rng:      SeededRandom,
    coin_rng:      SeededRandom,
    store:         Option<AppStore>,
    render_target: Box<dyn RenderSink>,
    winner_sinks:  Vec<Box<dyn WinnerSink>>,
    last_teams:    Vec<Vec<String>>,
    last_roll:     Option<DiceRoll>,
    last_coin:     Option<CoinSide>,
}

impl PartyApp {
    pub fn new(seed: u64, config: PartyConfig) -> PartyResult<Self> {
        config.validate()?;
        let bank = RngBank::new(seed);
        Ok(Self {
            clock:         FrameClock::new(config.frame_rate),
            wheel:         WheelEngine::new(bank.for_tool(ToolSlot::Wheel), config.wheel.clone())?,
            raw_text:      String::new(),
            history:       History::new(config.history_limit),
            prefs:         Preferences::default(),
            notifier:      Notifier::new(config.toast_ms),
            celebration:   Celebration::new(config.confetti.clone(), bank.for_tool(ToolSlot::Confetti)),
            teams_rng:     bank.for_tool(ToolSlot::Teams),
            dice_rng:      bank.for_tool(ToolSlot::Dice),
            coin_rng:      bank.for_tool(ToolSlot::Coin),
            store:         None,
            render_target: Box::new(NullSink),
            winner_sinks:  Vec::new(),
            last_teams:    Vec::new(),
            last_roll:     None,
            last_coin:     None,
            bank,
            config,
        })
    }

    /// Build an app backed by `store`, restoring whatever it holds.
    pub fn build(seed: u64, config: PartyConfig, store: AppStore) -> PartyResult<Self> {
        store.migrate()?;
        let saved = store.load_state()?;
        let mut app = Self::new(seed, config)?;
        if let Some(saved) = saved {
            app.restore(saved);
        }
        app.store = Some(store);
        Ok(app)
    }

    /// Default config, no persistence.
    pub fn build_test(seed: u64) -> PartyResult<Self> {
        Self::new(seed, PartyConfig::default())
    }

    fn restore(&mut self, saved: SavedState) {
        self.raw_text = saved.participants;
        self.history = History::from_entries(saved.history, self.config.history_limit);
        self.prefs.theme = saved.theme;
        if let Some(accent) = saved.accent {
            if let Err(e) = self.prefs.set_accent(&accent) {
                log::warn!("ignoring saved accent: {e}");
            }
        }
        log::info!(
            "restored state: {} participants, {} history entries",
            self.participants().len(),
            self.history.len()
        );
    }

    // ── Accessors ──────────────────────────────────────────────

    pub fn config(&self) -> &PartyConfig { &self.config }
    pub fn seed(&self) -> u64 { self.bank.master_seed() }
    pub fn wheel(&self) -> &WheelEngine<SeededRandom> { &self.wheel }
    pub fn history(&self) -> &History { &self.history }
    pub fn prefs(&self) -> &Preferences { &self.prefs }
    pub fn celebration(&self) -> &Celebration { &self.celebration }
    pub fn last_teams(&self) -> &[Vec<String>] { &self.last_teams }
    pub fn last_roll(&self) -> Option<&DiceRoll> { self.last_roll.as_ref() }
    pub fn last_coin(&self) -> Option<CoinSide> { self.last_coin }

    pub fn raw_participants(&self) -> &str {
        &self.raw_text
    }

    pub fn participants(&self) -> Vec<String> {
        participants::parse(&self.raw_text)
    }

    pub fn store(&self) -> Option<&AppStore> {
        self.store.as_ref()
    }

    /// Hand the store back, e.g. to rebuild an app on top of it.
    pub fn into_store(self) -> Option<AppStore> {
        self.store
    }

    /// The toast visible right now, if any.
    pub fn toast(&self) -> Option<&Toast> {
        self.notifier.current(self.clock.now_ms)
    }

    pub fn saved_state(&self) -> SavedState {
        SavedState {
            participants: self.raw_text.clone(),
            history:      self.history.to_vec(),
            theme:        self.prefs.theme,
            accent:       Some(self.prefs.accent().to_string()),
        }
    }

    // ── Wiring ─────────────────────────────────────────────────

    /// Swap the surface the wheel draws on (e.g. opening the zoom view).
    /// The new target is drawn immediately. Returns the previous target.
    pub fn set_render_target(&mut self, target: Box<dyn RenderSink>) -> Box<dyn RenderSink> {
        let previous = std::mem::replace(&mut self.render_target, target);
        self.redraw();
        previous
    }

    /// Extra winner consumers, called after the built-in ones.
    pub fn register_winner_sink(&mut self, sink: Box<dyn WinnerSink>) {
        self.winner_sinks.push(sink);
    }

    fn redraw(&mut self) {
        let live = self.participants();
        self.wheel.redraw(&live, self.render_target.as_mut());
    }

    fn save(&self) -> PartyResult<()> {
        if let Some(store) = &self.store {
            store.save_state(&self.saved_state())?;
        }
        Ok(())
    }

    /// Save after a change that has already happened in memory.
    fn persist(&self, mut events: Vec<PartyEvent>) -> Vec<PartyEvent> {
        if let Err(e) = self.save() {
            log::warn!("save failed: {e}");
            events.push(PartyEvent::SaveFailed { reason: e.to_string() });
        }
        events
    }

    // ── Participants ───────────────────────────────────────────

    pub fn set_participants(&mut self, raw: &str) -> PartyResult<Vec<PartyEvent>> {
        self.raw_text = raw.to_string();
        let count = self.participants().len();
        if !self.wheel.is_spinning() {
            self.redraw();
        }
        Ok(self.persist(vec![PartyEvent::ParticipantsUpdated { count }]))
    }

    pub fn clear_participants(&mut self) -> PartyResult<Vec<PartyEvent>> {
        self.set_participants("")
    }

    // ── Wheel ──────────────────────────────────────────────────

    /// Start a spin with the current list. The winner arrives from frame().
    pub fn spin(&mut self) -> PartyResult<Vec<PartyEvent>> {
        let list = self.participants();
        let now = self.clock.now_ms;
        match self.wheel.spin(&list, now, &mut self.clock) {
            Ok(SpinStart::Started { spin_id, start_angle, target_angle }) => {
                Ok(vec![PartyEvent::SpinStarted {
                    spin_id,
                    participants: list.len(),
                    start_angle,
                    target_angle,
                }])
            }
            Ok(SpinStart::AlreadySpinning) => Ok(vec![]),
            Err(e) => {
                if matches!(e, PartyError::InsufficientParticipants { .. }) {
                    self.notifier.show("Add at least 2 participants!", now);
                }
                Err(e)
            }
        }
    }

    /// One host frame: serve a pending wheel tick, move confetti, age the toast.
    /// A resolved spin always yields its WinnerSelected event here.
    pub fn frame(&mut self) -> Vec<PartyEvent> {
        let now = self.clock.advance();
        let mut events = Vec::new();

        if self.clock.take_pending() {
            let winner = self.wheel.tick(now, &mut self.clock, self.render_target.as_mut());
            if let Some(winner) = winner {
                events.extend(self.publish_winner(winner));
            }
        }

        if self.celebration.is_active() {
            self.celebration.step();
        }
        self.notifier.expire(now);
        events
    }

    /// Drive frames until the wheel stops.
    pub fn run_until_idle(&mut self) -> Vec<PartyEvent> {
        let mut events = Vec::new();
        while self.wheel.is_spinning() || self.clock.has_pending() {
            events.extend(self.frame());
        }
        events
    }

    fn publish_winner(&mut self, winner: WinnerEvent) -> Vec<PartyEvent> {
        log::info!("winner: {} (spin {})", winner.name, winner.spin_id);
        let builtin: [&mut dyn WinnerSink; 3] =
            [&mut self.history, &mut self.notifier, &mut self.celebration];
        for sink in builtin {
            sink.on_winner(&winner);
        }
        for sink in &mut self.winner_sinks {
            sink.on_winner(&winner);
        }
        self.persist(vec![PartyEvent::WinnerSelected(winner)])
    }

    // ── Other tools ────────────────────────────────────────────

    pub fn generate_teams(&mut self, count: usize) -> PartyResult<Vec<PartyEvent>> {
        let list = self.participants();
        match generate_teams(&list, count, &mut self.teams_rng) {
            Ok(teams) => {
                self.last_teams = teams.clone();
                Ok(vec![PartyEvent::TeamsGenerated { teams }])
            }
            Err(e) => {
                if matches!(e, PartyError::NotEnoughPlayers { .. }) {
                    self.notifier.show("Not enough players!", self.clock.now_ms);
                }
                Err(e)
            }
        }
    }

    pub fn roll_dice(&mut self, count: u32) -> PartyResult<Vec<PartyEvent>> {
        let roll = roll_dice(count, self.config.max_dice, &mut self.dice_rng);
        self.history.record(roll.summary(), Local::now());
        self.celebration.fire();
        let event = PartyEvent::DiceRolled { faces: roll.faces.clone(), total: roll.total };
        self.last_roll = Some(roll);
        Ok(self.persist(vec![event]))
    }

    pub fn flip_coin(&mut self) -> PartyResult<Vec<PartyEvent>> {
        let side = flip_coin(&mut self.coin_rng);
        self.history.record(format!("Coin: {side}"), Local::now());
        self.celebration.fire();
        self.notifier.show(format!("Result: {side}"), self.clock.now_ms);
        self.last_coin = Some(side);
        Ok(self.persist(vec![PartyEvent::CoinFlipped { side }]))
    }

    // ── State ──────────────────────────────────────────────────

    pub fn clear_history(&mut self) -> PartyResult<Vec<PartyEvent>> {
        self.history.clear();
        Ok(self.persist(vec![PartyEvent::HistoryCleared]))
    }

    pub fn set_theme(&mut self, theme: Theme) -> PartyResult<Vec<PartyEvent>> {
        self.prefs.theme = theme;
        Ok(self.persist(vec![PartyEvent::ThemeChanged { theme }]))
    }

    /// Err only for a malformed colour, in which case nothing changes.
    pub fn set_accent(&mut self, accent: &str) -> PartyResult<Vec<PartyEvent>> {
        self.prefs.set_accent(accent)?;
        let event = PartyEvent::AccentChanged { accent: self.prefs.accent().to_string() };
        Ok(self.persist(vec![event]))
    }

    pub fn set_frame_rate(&mut self, rate: FrameRate) {
        self.clock.set_rate(rate);
    }

    /// Wipe the store and start over with fresh streams for every tool.
    /// Like a page reload, this drops a spin in flight. If the store cannot
    /// be cleared nothing in memory changes.
    pub fn reset(&mut self) -> PartyResult<Vec<PartyEvent>> {
        if let Some(store) = &self.store {
            store.clear()?;
        }
        self.wheel = WheelEngine::new(self.bank.for_tool(ToolSlot::Wheel), self.config.wheel.clone())?;
        self.celebration = Celebration::new(self.config.confetti.clone(), self.bank.for_tool(ToolSlot::Confetti));
        self.teams_rng = self.bank.for_tool(ToolSlot::Teams);
        self.dice_rng = self.bank.for_tool(ToolSlot::Dice);
        self.coin_rng = self.bank.for_tool(ToolSlot::Coin);
        self.clock = FrameClock::new(self.clock.rate);
        self.raw_text.clear();
        self.history.clear();
        self.prefs = Preferences::default();
        self.notifier = Notifier::new(self.config.toast_ms);
        self.last_teams.clear();
        self.last_roll = None;
        self.last_coin = None;
        self.redraw();
        log::info!("app reset");
        Ok(vec![PartyEvent::StateReset])
    }

    pub fn apply(&mut self, command: PartyCommand) -> PartyResult<Vec<PartyEvent>> {
        log::debug!("command: {command:?}");
        match command {
            PartyCommand::SetParticipants { raw } => self.set_participants(&raw),
            PartyCommand::ClearParticipants       => self.clear_participants(),
            PartyCommand::Spin                    => self.spin(),
            PartyCommand::GenerateTeams { count } => self.generate_teams(count),
            PartyCommand::RollDice { count }      => self.roll_dice(count),
            PartyCommand::FlipCoin                => self.flip_coin(),
            PartyCommand::ClearHistory            => self.clear_history(),
            PartyCommand::SetTheme { theme }      => self.set_theme(theme),
            PartyCommand::SetAccent { accent }    => self.set_accent(&accent),
            PartyCommand::SetFrameRate { rate }   => {
                self.set_frame_rate(rate);
                Ok(vec![])
            }
            PartyCommand::Reset                   => self.reset(),
        }
    }
}
