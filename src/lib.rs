//! # Tournament Director
//!
//! A multi-table elimination tournament engine for live poker events.
//!
//! The engine is the domain core only: players holding chip stacks, seated
//! at tables, progressing through a sequence of blind levels on a countdown
//! clock, with periodic breaks and a final prize payout. Rendering, input
//! handling, persistence, and notifications belong to whatever presenter
//! drives it.
//!
//! ## Architecture
//!
//! Everything hangs off the [`Tournament`] aggregate root, which
//! exclusively owns the players, tables, and levels and serializes all
//! mutation through its command surface:
//!
//! - [`clock::TournamentClock`]: the level/break state machine, driven by
//!   an external one-second tick
//! - [`seating::SeatingAllocator`]: random initial seating and iterative
//!   table balancing
//! - [`prizes`]: exact-sum prize distribution over the paying positions
//!
//! ## Example
//!
//! ```
//! use tournament_director::{Tournament, TournamentSettings};
//!
//! let mut tournament = Tournament::new("Saturday Night Special");
//! tournament.configure(TournamentSettings {
//!     buy_in_amount: 100,
//!     starting_chips: 10_000,
//!     break_interval: 4,
//!     break_duration_mins: 15,
//!     ..Default::default()
//! });
//! tournament.add_level(25, 50, 0, 20);
//! tournament.add_level(50, 100, 0, 20);
//! tournament.add_player("John Doe");
//! tournament.add_player("Jane Smith");
//!
//! tournament.randomly_assign_players();
//! tournament.start_tournament().unwrap();
//!
//! // The host drives the countdown once per second.
//! tournament.tick();
//! println!("{:?}", tournament.stats());
//! ```

/// The level/break countdown state machine.
pub mod clock;
/// Engine-wide defaults.
pub mod constants;
/// Error taxonomy shared by every command.
pub mod errors;
/// Players, tables, blind levels, and settings.
pub mod models;
/// Prize-pool distribution.
pub mod prizes;
/// Seat allocation and table balancing.
pub mod seating;
/// The aggregate root and its command surface.
pub mod tournament;

pub use clock::{ClockEvent, TournamentClock};
pub use errors::{TournamentError, TournamentResult};
pub use models::{
    Chips, Level, Player, PlayerId, PlayerStatus, SeatAssignment, SeatNumber, Table, TableId,
    TournamentSettings, TournamentStatus, Usd,
};
pub use prizes::{Payout, distribute_prizes, payout_spots};
pub use seating::{BalanceOutcome, SeatingAllocator, SeatingReport};
pub use tournament::{Tournament, TournamentStats};
