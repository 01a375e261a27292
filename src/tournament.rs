//! The tournament aggregate root.
//!
//! [`Tournament`] exclusively owns every player, table, and level, and
//! serializes all mutation through its command surface: the presenter
//! issues commands and renders the resulting state, nothing else holds a
//! mutable reference across command boundaries.

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};

use crate::clock::{ClockEvent, TournamentClock};
use crate::errors::{TournamentError, TournamentResult};
use crate::models::{
    Chips, IdSequence, Level, Player, PlayerId, SeatNumber, Table, TableId, TournamentSettings,
    TournamentStatus, Usd,
};
use crate::prizes::{Payout, distribute_prizes, payout_spots};
use crate::seating::{BalanceOutcome, SeatingAllocator, SeatingReport};

/// Read-only snapshot for the presenter's dashboards.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct TournamentStats {
    pub total_players: usize,
    pub active_players: usize,
    pub eliminated_players: usize,
    pub total_buy_ins: u32,
    pub total_rebuys: u32,
    pub total_addons: u32,
    pub total_prize_pool: Usd,
    pub total_chips: Chips,
    pub average_stack: f64,
    pub current_level: usize,
    /// Blind display string, e.g. "100/200", or "N/A" before the start.
    pub current_blinds: String,
    pub time_remaining_secs: u32,
    pub status: TournamentStatus,
    /// The active player with the smallest stack, if any.
    pub shortest_stack: Option<PlayerId>,
}

/// A multi-table elimination tournament.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Tournament {
    name: String,
    settings: TournamentSettings,
    players: Vec<Player>,
    tables: Vec<Table>,
    levels: Vec<Level>,
    clock: TournamentClock,
    seating: SeatingAllocator,
    total_buy_ins: u32,
    total_rebuys: u32,
    total_addons: u32,
    total_prize_pool: Usd,
    player_ids: IdSequence,
    table_ids: IdSequence,
    created_at: DateTime<Utc>,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
}

impl Tournament {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            settings: TournamentSettings::default(),
            players: Vec::new(),
            tables: Vec::new(),
            levels: Vec::new(),
            clock: TournamentClock::new(),
            seating: SeatingAllocator::default(),
            total_buy_ins: 0,
            total_rebuys: 0,
            total_addons: 0,
            total_prize_pool: 0,
            player_ids: IdSequence::default(),
            table_ids: IdSequence::default(),
            created_at: Utc::now(),
            started_at: None,
            finished_at: None,
        }
    }

    // Setup

    /// Sets buy-in, rebuy, add-on, and break parameters.
    pub fn configure(&mut self, settings: TournamentSettings) {
        self.settings = settings;
        self.update_prize_pool();
    }

    /// Appends a blind level with the next sequence number.
    pub fn add_level(
        &mut self,
        small_blind: Usd,
        big_blind: Usd,
        ante: Usd,
        duration_mins: u32,
    ) -> &Level {
        let number = self.levels.len() + 1;
        self.levels
            .push(Level::new(number, small_blind, big_blind, ante, duration_mins));
        &self.levels[number - 1]
    }

    // Player management

    /// Admits a player with the configured starting stack and books their
    /// buy-in into the prize pool.
    pub fn add_player(&mut self, name: impl Into<String>) -> &Player {
        let id = self.player_ids.next_id();
        self.players
            .push(Player::new(id, name, self.settings.starting_chips));
        self.total_buy_ins += 1;
        self.update_prize_pool();
        info!("admitted player {id}, prize pool now {}", self.total_prize_pool);
        &self.players[self.players.len() - 1]
    }

    /// Removes a player entirely, vacating any held seat first. Returns
    /// false if the id is unknown.
    pub fn remove_player(&mut self, player_id: PlayerId) -> bool {
        let Some(idx) = self.players.iter().position(|p| p.id == player_id) else {
            return false;
        };
        if let Some(held) = self.players[idx].seat
            && let Some(table) = self.tables.iter_mut().find(|t| t.id == held.table_id)
        {
            table.clear_seat(held.seat);
        }
        self.players.remove(idx);
        info!("removed player {player_id}");
        true
    }

    /// Marks a player as busted and zeroes their stack. Any held seat is
    /// kept until the next reseat or removal.
    pub fn eliminate_player(&mut self, player_id: PlayerId) -> TournamentResult<()> {
        let player = self
            .players
            .iter_mut()
            .find(|p| p.id == player_id)
            .ok_or(TournamentError::PlayerNotFound(player_id))?;
        player.eliminate();
        info!("eliminated player {player_id}");
        Ok(())
    }

    /// Sells a rebuy: configured chips for the configured amount.
    pub fn rebuy_player(&mut self, player_id: PlayerId) -> TournamentResult<()> {
        if self.clock.current_level() > self.settings.max_rebuy_level {
            return Err(TournamentError::RebuyClosed {
                max_rebuy_level: self.settings.max_rebuy_level,
            });
        }
        let rebuy_chips = self.settings.rebuy_chips;
        let player = self
            .players
            .iter_mut()
            .find(|p| p.id == player_id)
            .ok_or(TournamentError::PlayerNotFound(player_id))?;
        player.rebuy(rebuy_chips);
        self.total_rebuys += 1;
        self.update_prize_pool();
        Ok(())
    }

    /// Sells an add-on: configured chips for the configured amount.
    pub fn addon_player(&mut self, player_id: PlayerId) -> TournamentResult<()> {
        if self.clock.current_level() > self.settings.max_addon_level {
            return Err(TournamentError::AddonClosed {
                max_addon_level: self.settings.max_addon_level,
            });
        }
        let addon_chips = self.settings.addon_chips;
        let player = self
            .players
            .iter_mut()
            .find(|p| p.id == player_id)
            .ok_or(TournamentError::PlayerNotFound(player_id))?;
        player.addon(addon_chips);
        self.total_addons += 1;
        self.update_prize_pool();
        Ok(())
    }

    // Table management

    /// Appends an empty nine-seat table and returns its id.
    pub fn create_table(&mut self, name: impl Into<String>) -> TableId {
        let id = self.table_ids.next_id();
        self.tables.push(Table::new(id, name));
        info!("created table {id}");
        id
    }

    /// Drops a table, unseating anyone still at it.
    pub fn remove_table(&mut self, table_id: TableId) -> TournamentResult<()> {
        let idx = self
            .tables
            .iter()
            .position(|t| t.id == table_id)
            .ok_or(TournamentError::TableNotFound(table_id))?;
        let seated: Vec<PlayerId> = self.tables[idx].seats().iter().flatten().copied().collect();
        for player_id in seated {
            if let Some(player) = self.players.iter_mut().find(|p| p.id == player_id) {
                player.seat = None;
            }
        }
        self.tables.remove(idx);
        info!("removed table {table_id}");
        Ok(())
    }

    /// Seats a player, picking the lowest free seat when none is given.
    pub fn assign_player_to_table(
        &mut self,
        player_id: PlayerId,
        table_id: TableId,
        seat: Option<SeatNumber>,
    ) -> TournamentResult<SeatNumber> {
        self.seating
            .assign(&mut self.tables, &mut self.players, player_id, table_id, seat)
    }

    /// Vacates a seat, returning whoever sat there. An empty seat is a
    /// no-op, not an error.
    pub fn unseat(
        &mut self,
        table_id: TableId,
        seat: SeatNumber,
    ) -> TournamentResult<Option<PlayerId>> {
        self.seating
            .remove(&mut self.tables, &mut self.players, table_id, seat)
    }

    /// Reseats every active player at random, creating tables on demand.
    pub fn randomly_assign_players(&mut self) -> SeatingReport {
        self.seating.randomize_all(
            &mut rand::rng(),
            &mut self.tables,
            &mut self.players,
            &mut self.table_ids,
        )
    }

    /// Evens out per-table occupancy to within one seat.
    pub fn balance_tables(&mut self) -> TournamentResult<BalanceOutcome> {
        self.seating.balance(&mut self.tables, &mut self.players)
    }

    // Clock

    /// Starts the clock at level 1.
    pub fn start_tournament(&mut self) -> TournamentResult<()> {
        self.clock.start(&self.levels)?;
        self.started_at = Some(Utc::now());
        info!("tournament '{}' started", self.name);
        Ok(())
    }

    /// Freezes the countdown.
    pub fn pause_clock(&mut self) -> TournamentResult<()> {
        self.clock.pause()
    }

    /// Resumes the countdown in the pre-pause phase.
    pub fn resume_clock(&mut self) -> TournamentResult<()> {
        self.clock.resume()
    }

    /// Manually skips to the next level (or its scheduled break).
    pub fn next_level(&mut self) -> TournamentResult<ClockEvent> {
        self.clock.advance_level(&self.levels, &self.settings)
    }

    /// Drives the countdown by one second. The host calls this once per
    /// second while the tournament runs.
    pub fn tick(&mut self) -> ClockEvent {
        let event = self.clock.tick(&self.levels, &self.settings);
        if event == ClockEvent::Finished {
            self.finished_at = Some(Utc::now());
            info!("tournament '{}' finished", self.name);
        }
        event
    }

    // Prizes and statistics

    /// Computes the payout schedule for the current pool and field.
    /// Read-only; nothing is booked until the presenter says so.
    #[must_use]
    pub fn calculate_prizes(&self) -> Vec<Payout> {
        distribute_prizes(self.total_prize_pool, payout_spots(self.players.len()))
    }

    /// Read-only snapshot of the headline numbers.
    #[must_use]
    pub fn stats(&self) -> TournamentStats {
        let total_players = self.players.len();
        let active_players = self.players.iter().filter(|p| p.is_active()).count();
        let total_chips: Chips = self.players.iter().map(|p| p.chips).sum();
        let average_stack = if active_players > 0 {
            total_chips as f64 / active_players as f64
        } else {
            0.0
        };
        let current_blinds = self
            .current_blind_level()
            .map(|level| level.to_string())
            .unwrap_or_else(|| "N/A".to_string());

        TournamentStats {
            total_players,
            active_players,
            eliminated_players: total_players - active_players,
            total_buy_ins: self.total_buy_ins,
            total_rebuys: self.total_rebuys,
            total_addons: self.total_addons,
            total_prize_pool: self.total_prize_pool,
            total_chips,
            average_stack,
            current_level: self.clock.current_level(),
            current_blinds,
            time_remaining_secs: self.clock.time_remaining_secs(),
            status: self.clock.status(),
            shortest_stack: self.shortest_stack().map(|p| p.id),
        }
    }

    /// The active player with the smallest stack. Derived on demand,
    /// never stored.
    #[must_use]
    pub fn shortest_stack(&self) -> Option<&Player> {
        self.players
            .iter()
            .filter(|p| p.is_active())
            .min_by_key(|p| p.chips)
    }

    /// Time remaining as an `M:SS` clock string.
    #[must_use]
    pub fn formatted_time_remaining(&self) -> String {
        let secs = self.clock.time_remaining_secs();
        format!("{}:{:02}", secs / 60, secs % 60)
    }

    // Accessors

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn settings(&self) -> &TournamentSettings {
        &self.settings
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn player(&self, player_id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    #[must_use]
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    #[must_use]
    pub fn table(&self, table_id: TableId) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == table_id)
    }

    #[must_use]
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// 1-based current level number; zero before the start.
    #[must_use]
    pub fn current_level(&self) -> usize {
        self.clock.current_level()
    }

    /// The blind level currently in play, if the tournament has started.
    #[must_use]
    pub fn current_blind_level(&self) -> Option<&Level> {
        self.levels.get(self.clock.current_level().wrapping_sub(1))
    }

    #[must_use]
    pub fn status(&self) -> TournamentStatus {
        self.clock.status()
    }

    #[must_use]
    pub fn time_remaining_secs(&self) -> u32 {
        self.clock.time_remaining_secs()
    }

    #[must_use]
    pub fn total_prize_pool(&self) -> Usd {
        self.total_prize_pool
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    /// Recomputes the pool from the running contribution totals. Called
    /// after every contribution-changing event.
    fn update_prize_pool(&mut self) {
        self.total_prize_pool = i64::from(self.total_buy_ins) * self.settings.buy_in_amount
            + i64::from(self.total_rebuys) * self.settings.rebuy_amount
            + i64::from(self.total_addons) * self.settings.addon_amount;
    }
}
