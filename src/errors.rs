//! Tournament error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{PlayerId, SeatNumber, TableId, TournamentStatus};

/// Errors that can occur during tournament operations.
///
/// All of these are recoverable: a failed command leaves the tournament in
/// its pre-call state, and the presenter can surface the message to the
/// operator as-is.
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum TournamentError {
    #[error("add-ons are closed past level {max_addon_level}")]
    AddonClosed { max_addon_level: usize },
    #[error("need 2+ tables to balance")]
    InsufficientTables,
    #[error("seat {seat} is out of range (1..={capacity})")]
    InvalidSeat { seat: SeatNumber, capacity: usize },
    #[error("invalid status: expected {expected}, got {actual}")]
    InvalidTransition {
        expected: TournamentStatus,
        actual: TournamentStatus,
    },
    #[error("no free seats at table {0}")]
    NoAvailableSeats(TableId),
    #[error("no levels defined")]
    NoLevelsDefined,
    #[error("already at the last level")]
    NoMoreLevels,
    #[error("player {0} does not exist")]
    PlayerNotFound(PlayerId),
    #[error("rebuys are closed past level {max_rebuy_level}")]
    RebuyClosed { max_rebuy_level: usize },
    #[error("seat {seat} at table {table_id} is occupied")]
    SeatOccupied { table_id: TableId, seat: SeatNumber },
    #[error("table {0} does not exist")]
    TableNotFound(TableId),
}

/// Result type for tournament operations.
pub type TournamentResult<T> = Result<T, TournamentError>;
