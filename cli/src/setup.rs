// Helpers for setting up a player's game box.
//
// The fleet table and arena defaults live here; board construction goes
// through `build_board`, which retries whole-board construction a bounded
// number of times when the randomized placement search runs dry.

use anyhow::{Context, Result};
use rand::Rng;
use submarines_core::{Board, Error, UnitClass, UnitRequest};

/// Default battle arena, rows x columns.
pub const DEFAULT_ARENA: (usize, usize) = (8, 8);

/// Whole-board construction attempts before giving up on placement.
pub const PLACEMENT_ATTEMPTS: u32 = 8;

/// The standard fleet: one General, two Jets, three Submarines, two
/// Destroyers.
pub fn standard_fleet() -> Vec<UnitRequest> {
    vec![
        UnitRequest::new(UnitClass::General.spec(), 1),
        UnitRequest::new(UnitClass::Jet.spec(), 2),
        UnitRequest::new(UnitClass::Submarine.spec(), 3),
        UnitRequest::new(UnitClass::Destroyer.spec(), 2),
    ]
}

/// Build a fully placed board for `owner`.
///
/// A placement-exhausted construction is retried from scratch with fresh
/// randomness; configuration errors are not retried.
pub fn build_board<R: Rng + ?Sized>(
    owner: &str,
    size: (usize, usize),
    fleet: &[UnitRequest],
    rng: &mut R,
) -> Result<Board> {
    let mut attempt = 0;
    loop {
        attempt += 1;
        match Board::create(owner, size, fleet, rng) {
            Ok(board) => {
                tracing::debug!(owner, attempt, "board placed");
                return Ok(board);
            }
            Err(err @ Error::PlacementExhausted { .. }) if attempt < PLACEMENT_ATTEMPTS => {
                tracing::debug!(owner, attempt, %err, "placement ran dry, retrying");
            }
            Err(err) => {
                return Err(err).with_context(|| format!("could not set up a board for {owner}"));
            }
        }
    }
}
