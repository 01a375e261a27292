//! The tournament clock: countdown and level/break transitions.
//!
//! The clock never reads the wall clock. The host drives it with a
//! one-second [`TournamentClock::tick`]; each tick is one atomic
//! decrement-or-expire step. Break scheduling is a pure function of the
//! expiring level number modulo the configured break interval, so breaks
//! recur deterministically even across manual level skips.

use serde::{Deserialize, Serialize};

use crate::errors::{TournamentError, TournamentResult};
use crate::models::{Level, TournamentSettings, TournamentStatus};

/// What a single clock step did, so the presenter can render transitions
/// without diffing state.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ClockEvent {
    /// The clock is not counting (setup, paused, or finished).
    Idle,
    /// One second elapsed; nothing else changed.
    Ticked,
    /// The countdown expired and the next level's countdown loaded.
    LevelAdvanced,
    /// The countdown expired and a scheduled break started.
    BreakStarted,
    /// A break ended and the current level's countdown loaded.
    BreakEnded,
    /// The last level expired; the clock stopped for good.
    Finished,
}

/// Countdown and phase state for one tournament.
///
/// The level list and break settings live on the owning tournament and are
/// passed in per call; the clock itself only tracks where in the schedule
/// it is.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TournamentClock {
    /// 1-based current level; zero until the tournament starts.
    current_level: usize,
    time_remaining_secs: u32,
    status: TournamentStatus,
    /// Phase to restore on resume (running or break).
    paused_from: Option<TournamentStatus>,
}

impl Default for TournamentClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TournamentClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            current_level: 0,
            time_remaining_secs: 0,
            status: TournamentStatus::Setup,
            paused_from: None,
        }
    }

    #[must_use]
    pub fn current_level(&self) -> usize {
        self.current_level
    }

    #[must_use]
    pub fn time_remaining_secs(&self) -> u32 {
        self.time_remaining_secs
    }

    #[must_use]
    pub fn status(&self) -> TournamentStatus {
        self.status
    }

    /// Starts the countdown at level 1.
    pub fn start(&mut self, levels: &[Level]) -> TournamentResult<()> {
        if self.status != TournamentStatus::Setup {
            return Err(TournamentError::InvalidTransition {
                expected: TournamentStatus::Setup,
                actual: self.status,
            });
        }
        if levels.is_empty() {
            return Err(TournamentError::NoLevelsDefined);
        }
        self.current_level = 1;
        self.time_remaining_secs = levels[0].duration_secs();
        self.status = TournamentStatus::Running;
        Ok(())
    }

    /// Advances the countdown by one second, expiring the level or break
    /// when it reaches zero. No-op outside of running/break.
    pub fn tick(&mut self, levels: &[Level], settings: &TournamentSettings) -> ClockEvent {
        match self.status {
            TournamentStatus::Running => {
                self.time_remaining_secs = self.time_remaining_secs.saturating_sub(1);
                if self.time_remaining_secs > 0 {
                    return ClockEvent::Ticked;
                }
                self.advance(levels, settings)
            }
            TournamentStatus::Break => {
                self.time_remaining_secs = self.time_remaining_secs.saturating_sub(1);
                if self.time_remaining_secs > 0 {
                    return ClockEvent::Ticked;
                }
                // A break never advances the level; the level loaded when
                // the break began resumes now.
                self.status = TournamentStatus::Running;
                self.time_remaining_secs = self.level_duration_secs(levels);
                ClockEvent::BreakEnded
            }
            _ => ClockEvent::Idle,
        }
    }

    /// Freezes the countdown, remembering whether it was a level or a
    /// break so [`TournamentClock::resume`] restores the right phase.
    pub fn pause(&mut self) -> TournamentResult<()> {
        match self.status {
            TournamentStatus::Running | TournamentStatus::Break => {
                self.paused_from = Some(self.status);
                self.status = TournamentStatus::Paused;
                Ok(())
            }
            actual => Err(TournamentError::InvalidTransition {
                expected: TournamentStatus::Running,
                actual,
            }),
        }
    }

    /// Resumes the countdown from the frozen time in the pre-pause phase.
    pub fn resume(&mut self) -> TournamentResult<()> {
        if self.status != TournamentStatus::Paused {
            return Err(TournamentError::InvalidTransition {
                expected: TournamentStatus::Paused,
                actual: self.status,
            });
        }
        self.status = self.paused_from.take().unwrap_or(TournamentStatus::Running);
        Ok(())
    }

    /// Manual override: applies the same break-or-advance logic as a
    /// natural expiry without waiting for the countdown.
    pub fn advance_level(
        &mut self,
        levels: &[Level],
        settings: &TournamentSettings,
    ) -> TournamentResult<ClockEvent> {
        if self.status != TournamentStatus::Running {
            return Err(TournamentError::InvalidTransition {
                expected: TournamentStatus::Running,
                actual: self.status,
            });
        }
        if self.current_level >= levels.len() {
            return Err(TournamentError::NoMoreLevels);
        }
        Ok(self.advance(levels, settings))
    }

    /// Expiry logic shared by the automatic countdown and the manual
    /// override: finish after the last level, otherwise load the next
    /// level, detouring through a break when the expiring level number is
    /// a multiple of the break interval.
    fn advance(&mut self, levels: &[Level], settings: &TournamentSettings) -> ClockEvent {
        let expired_level = self.current_level;
        if expired_level >= levels.len() {
            self.status = TournamentStatus::Finished;
            self.time_remaining_secs = 0;
            return ClockEvent::Finished;
        }
        self.current_level += 1;
        if settings.break_interval > 0 && expired_level % settings.break_interval == 0 {
            self.status = TournamentStatus::Break;
            self.time_remaining_secs = settings.break_duration_mins * 60;
            ClockEvent::BreakStarted
        } else {
            self.status = TournamentStatus::Running;
            self.time_remaining_secs = self.level_duration_secs(levels);
            ClockEvent::LevelAdvanced
        }
    }

    fn level_duration_secs(&self, levels: &[Level]) -> u32 {
        levels
            .get(self.current_level.wrapping_sub(1))
            .map(|level| level.duration_secs())
            .unwrap_or(0)
    }
}
