//! Engine-wide defaults.

/// Number of seats at a freshly created table.
pub const SEATS_PER_TABLE: usize = 9;

/// Percentage of entrants that finish in the money (rounded up).
pub const PAID_FIELD_PERCENT: usize = 40;

/// Percentage of the pool awarded to first place when four or more
/// positions pay.
pub const FIRST_PLACE_PERCENT: i64 = 35;
