//! Core tournament entities: players, tables, blind levels, and settings.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::SEATS_PER_TABLE;

/// Player ID type.
pub type PlayerId = u64;

/// Table ID type.
pub type TableId = u64;

/// 1-based seat position at a table.
pub type SeatNumber = usize;

/// Type alias for whole dollars. All buy-ins and prize amounts are
/// represented as whole dollars (there's no point arguing over pennies).
pub type Usd = i64;

/// Type alias for tournament chips.
pub type Chips = i64;

/// Monotonic id generator for players and tables.
///
/// Ids are issued by the owning tournament rather than derived from the
/// wall clock, so uniqueness never depends on timing.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct IdSequence {
    next: u64,
}

impl IdSequence {
    pub fn next_id(&mut self) -> u64 {
        self.next += 1;
        self.next
    }
}

/// Player lifecycle status.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum PlayerStatus {
    /// Still holding chips and in contention.
    Active,
    /// Busted out; chips are zeroed on elimination.
    Eliminated,
}

impl fmt::Display for PlayerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Active => "active",
            Self::Eliminated => "eliminated",
        };
        write!(f, "{repr}")
    }
}

/// Tournament lifecycle status.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum TournamentStatus {
    /// Accepting configuration, levels, and registrations.
    Setup,
    /// The level countdown is live.
    Running,
    /// A scheduled break; blinds do not advance while on break.
    Break,
    /// Frozen by the operator; resumable into the pre-pause phase.
    Paused,
    /// The last level expired. Terminal.
    Finished,
}

impl fmt::Display for TournamentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Setup => "setup",
            Self::Running => "running",
            Self::Break => "break",
            Self::Paused => "paused",
            Self::Finished => "finished",
        };
        write!(f, "{repr}")
    }
}

/// A table and seat, held together so a player is either fully seated or
/// fully unseated - never half of each.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SeatAssignment {
    pub table_id: TableId,
    pub seat: SeatNumber,
}

/// A tournament entrant.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Current chip count, never negative.
    pub chips: Chips,
    /// Where the player sits, if anywhere.
    pub seat: Option<SeatAssignment>,
    pub status: PlayerStatus,
    /// Number of rebuys taken.
    pub rebuys: u32,
    /// Number of add-ons taken.
    pub addons: u32,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, starting_chips: Chips) -> Self {
        Self {
            id,
            name: name.into(),
            chips: starting_chips,
            seat: None,
            status: PlayerStatus::Active,
            rebuys: 0,
            addons: 0,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == PlayerStatus::Active
    }

    pub fn rebuy(&mut self, chips: Chips) {
        self.chips += chips;
        self.rebuys += 1;
    }

    pub fn addon(&mut self, chips: Chips) {
        self.chips += chips;
        self.addons += 1;
    }

    /// Marks the player as busted and zeroes their stack. The player keeps
    /// any held seat until the next reseat or removal.
    pub fn eliminate(&mut self) {
        self.status = PlayerStatus::Eliminated;
        self.chips = 0;
    }
}

/// A fixed-capacity table of seats.
///
/// Seats are only mutated through the seating allocator, which maintains
/// the one-player-one-seat invariant across all tables.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Table {
    pub id: TableId,
    pub name: String,
    max_seats: usize,
    seats: Vec<Option<PlayerId>>,
}

impl Table {
    pub fn new(id: TableId, name: impl Into<String>) -> Self {
        Self::with_capacity(id, name, SEATS_PER_TABLE)
    }

    pub fn with_capacity(id: TableId, name: impl Into<String>, max_seats: usize) -> Self {
        Self {
            id,
            name: name.into(),
            max_seats,
            seats: vec![None; max_seats],
        }
    }

    #[must_use]
    pub fn max_seats(&self) -> usize {
        self.max_seats
    }

    /// Seat contents in seat order (index 0 is seat 1).
    #[must_use]
    pub fn seats(&self) -> &[Option<PlayerId>] {
        &self.seats
    }

    /// The occupant of a 1-based seat, if any.
    #[must_use]
    pub fn seat(&self, seat: SeatNumber) -> Option<PlayerId> {
        self.seats.get(seat.checked_sub(1)?).copied().flatten()
    }

    /// Free seats in ascending seat-number order.
    #[must_use]
    pub fn open_seats(&self) -> Vec<SeatNumber> {
        self.seats
            .iter()
            .enumerate()
            .filter(|(_, occupant)| occupant.is_none())
            .map(|(idx, _)| idx + 1)
            .collect()
    }

    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.seats.iter().filter(|seat| seat.is_some()).count()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.seats.iter().all(|seat| seat.is_some())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seats.iter().all(|seat| seat.is_none())
    }

    /// The lowest-numbered occupied seat and its occupant.
    #[must_use]
    pub fn first_occupied(&self) -> Option<(SeatNumber, PlayerId)> {
        self.seats
            .iter()
            .enumerate()
            .find_map(|(idx, occupant)| occupant.map(|id| (idx + 1, id)))
    }

    pub(crate) fn set_seat(&mut self, seat: SeatNumber, player_id: PlayerId) {
        debug_assert!((1..=self.max_seats).contains(&seat));
        self.seats[seat - 1] = Some(player_id);
    }

    pub(crate) fn clear_seat(&mut self, seat: SeatNumber) {
        debug_assert!((1..=self.max_seats).contains(&seat));
        self.seats[seat - 1] = None;
    }

    pub(crate) fn clear_all_seats(&mut self) {
        self.seats.fill(None);
    }
}

/// One blind level in the tournament's structure. Immutable once created;
/// the level list is append-only during setup.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Level {
    /// 1-based position in the level list.
    pub number: usize,
    pub small_blind: Usd,
    pub big_blind: Usd,
    /// Ante amount, zero if none.
    pub ante: Usd,
    /// Duration of this level in minutes.
    pub duration_mins: u32,
}

impl Level {
    pub fn new(number: usize, small_blind: Usd, big_blind: Usd, ante: Usd, duration_mins: u32) -> Self {
        Self {
            number,
            small_blind,
            big_blind,
            ante,
            duration_mins,
        }
    }

    #[must_use]
    pub fn duration_secs(&self) -> u32 {
        self.duration_mins * 60
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.small_blind, self.big_blind)
    }
}

/// Tournament configuration: buy-in, rebuy, add-on, and break parameters.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct TournamentSettings {
    /// Cost of the initial buy-in.
    pub buy_in_amount: Usd,
    /// Chips received for the initial buy-in.
    pub starting_chips: Chips,
    /// Cost of a rebuy.
    pub rebuy_amount: Usd,
    /// Chips received for a rebuy.
    pub rebuy_chips: Chips,
    /// Last level at which rebuys are allowed.
    pub max_rebuy_level: usize,
    /// Cost of an add-on.
    pub addon_amount: Usd,
    /// Chips received for an add-on.
    pub addon_chips: Chips,
    /// Last level at which add-ons are allowed.
    pub max_addon_level: usize,
    /// A break is taken every this-many levels; zero disables breaks.
    pub break_interval: usize,
    /// Break length in minutes.
    pub break_duration_mins: u32,
}
