//! Seat allocation and table balancing.
//!
//! All seat mutations in the engine run through [`SeatingAllocator`], which
//! maintains the bijection between active players and occupied seats and
//! keeps per-table occupancy within one seat of every other table.

use log::{info, warn};
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use serde::{Deserialize, Serialize};

use crate::constants::SEATS_PER_TABLE;
use crate::errors::{TournamentError, TournamentResult};
use crate::models::{IdSequence, Player, PlayerId, SeatAssignment, SeatNumber, Table, TableId};

/// Outcome of a balancing pass. Being unable to improve further is a
/// reported result, not an error.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum BalanceOutcome {
    /// Occupancy already differed by at most one seat.
    AlreadyBalanced,
    /// Players were moved until occupancy evened out.
    Balanced { moves: usize },
    /// Imbalance remains but no further move was possible.
    Stuck { moves: usize },
}

/// What a randomized seating pass accomplished. Players who could not be
/// seated are reported, never retried.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct SeatingReport {
    pub seated: usize,
    pub unseated: Vec<PlayerId>,
}

/// Assigns and reassigns players to table seats.
///
/// The allocator owns no entities; it operates on the tables and players
/// handed to it by the tournament aggregate.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SeatingAllocator {
    seats_per_table: usize,
}

impl Default for SeatingAllocator {
    fn default() -> Self {
        Self::new(SEATS_PER_TABLE)
    }
}

impl SeatingAllocator {
    #[must_use]
    pub fn new(seats_per_table: usize) -> Self {
        Self { seats_per_table }
    }

    /// Seats a player, vacating any seat they already hold (move
    /// semantics, never duplicate occupancy). With no explicit seat the
    /// lowest-numbered free seat is used. The destination is validated
    /// before anything is vacated, so a failed assign changes nothing.
    pub fn assign(
        &self,
        tables: &mut [Table],
        players: &mut [Player],
        player_id: PlayerId,
        table_id: TableId,
        seat: Option<SeatNumber>,
    ) -> TournamentResult<SeatNumber> {
        let player_idx = players
            .iter()
            .position(|p| p.id == player_id)
            .ok_or(TournamentError::PlayerNotFound(player_id))?;
        let table_idx = tables
            .iter()
            .position(|t| t.id == table_id)
            .ok_or(TournamentError::TableNotFound(table_id))?;

        let target = match seat {
            Some(requested) => {
                let capacity = tables[table_idx].max_seats();
                if requested < 1 || requested > capacity {
                    return Err(TournamentError::InvalidSeat {
                        seat: requested,
                        capacity,
                    });
                }
                match tables[table_idx].seat(requested) {
                    Some(occupant) if occupant == player_id => return Ok(requested),
                    Some(_) => {
                        return Err(TournamentError::SeatOccupied {
                            table_id,
                            seat: requested,
                        });
                    }
                    None => requested,
                }
            }
            None => tables[table_idx]
                .open_seats()
                .first()
                .copied()
                .ok_or(TournamentError::NoAvailableSeats(table_id))?,
        };

        if let Some(held) = players[player_idx].seat
            && let Some(old_table) = tables.iter_mut().find(|t| t.id == held.table_id)
        {
            old_table.clear_seat(held.seat);
        }
        tables[table_idx].set_seat(target, player_id);
        players[player_idx].seat = Some(SeatAssignment {
            table_id,
            seat: target,
        });
        Ok(target)
    }

    /// Vacates a seat and clears the occupant's assignment. An already
    /// empty seat is a no-op, not an error.
    pub fn remove(
        &self,
        tables: &mut [Table],
        players: &mut [Player],
        table_id: TableId,
        seat: SeatNumber,
    ) -> TournamentResult<Option<PlayerId>> {
        let table = tables
            .iter_mut()
            .find(|t| t.id == table_id)
            .ok_or(TournamentError::TableNotFound(table_id))?;
        if seat < 1 || seat > table.max_seats() {
            return Err(TournamentError::InvalidSeat {
                seat,
                capacity: table.max_seats(),
            });
        }
        let Some(player_id) = table.seat(seat) else {
            return Ok(None);
        };
        table.clear_seat(seat);
        if let Some(player) = players.iter_mut().find(|p| p.id == player_id) {
            player.seat = None;
        }
        Ok(Some(player_id))
    }

    /// Tears down every assignment and reseats all active players from
    /// scratch: a uniform shuffle dealt round-robin across as many tables
    /// as the field needs, with a random free seat at each destination.
    /// Missing tables are created on demand.
    pub fn randomize_all(
        &self,
        rng: &mut impl Rng,
        tables: &mut Vec<Table>,
        players: &mut [Player],
        table_ids: &mut IdSequence,
    ) -> SeatingReport {
        let mut active: Vec<PlayerId> = players
            .iter()
            .filter(|p| p.is_active())
            .map(|p| p.id)
            .collect();

        // Everyone starts over, including stale assignments held by
        // eliminated players.
        for table in tables.iter_mut() {
            table.clear_all_seats();
        }
        for player in players.iter_mut() {
            player.seat = None;
        }

        if active.is_empty() {
            return SeatingReport::default();
        }

        let tables_needed = active.len().div_ceil(self.seats_per_table);
        while tables.len() < tables_needed {
            let id = table_ids.next_id();
            let name = format!("Table {}", tables.len() + 1);
            info!("created {name} for randomized seating");
            tables.push(Table::with_capacity(id, name, self.seats_per_table));
        }

        active.shuffle(rng);

        let mut report = SeatingReport::default();
        for (idx, player_id) in active.iter().copied().enumerate() {
            let table = &mut tables[idx % tables_needed];
            let Some(seat) = table.open_seats().choose(rng).copied() else {
                report.unseated.push(player_id);
                continue;
            };
            table.set_seat(seat, player_id);
            let assignment = SeatAssignment {
                table_id: table.id,
                seat,
            };
            if let Some(player) = players.iter_mut().find(|p| p.id == player_id) {
                player.seat = Some(assignment);
            }
            report.seated += 1;
        }
        if report.unseated.is_empty() {
            info!("randomized seating for {} players", report.seated);
        } else {
            warn!(
                "randomized seating left {} players without a seat",
                report.unseated.len()
            );
        }
        report
    }

    /// Moves players from the fullest table to the emptiest until
    /// occupancy differs by at most one seat everywhere.
    pub fn balance(
        &self,
        tables: &mut [Table],
        players: &mut [Player],
    ) -> TournamentResult<BalanceOutcome> {
        if tables.len() < 2 {
            return Err(TournamentError::InsufficientTables);
        }

        let mut moves = 0;
        loop {
            let occupancies = tables.iter().map(Table::occupied_count);
            let Some((fullest, max_count)) = occupancies.clone().enumerate().max_by_key(|&(_, n)| n)
            else {
                break;
            };
            let Some((emptiest, min_count)) = occupancies.enumerate().min_by_key(|&(_, n)| n)
            else {
                break;
            };
            if max_count - min_count <= 1 {
                break;
            }

            let Some((source_seat, player_id)) = tables[fullest].first_occupied() else {
                return Ok(BalanceOutcome::Stuck { moves });
            };
            let Some(dest_seat) = tables[emptiest].open_seats().first().copied() else {
                return Ok(BalanceOutcome::Stuck { moves });
            };

            tables[fullest].clear_seat(source_seat);
            let dest_table_id = tables[emptiest].id;
            tables[emptiest].set_seat(dest_seat, player_id);
            if let Some(player) = players.iter_mut().find(|p| p.id == player_id) {
                player.seat = Some(SeatAssignment {
                    table_id: dest_table_id,
                    seat: dest_seat,
                });
            }
            moves += 1;
            info!("moved player {player_id} to table {dest_table_id} seat {dest_seat}");
        }

        Ok(if moves == 0 {
            BalanceOutcome::AlreadyBalanced
        } else {
            BalanceOutcome::Balanced { moves }
        })
    }
}
