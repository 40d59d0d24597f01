//! Card piles.
//!
//! The reduced rule set only needs ordered piles of card identifiers
//! (deck, hand, discard), so zones are plain vectors owned by each
//! `Player`. This module holds the operations that move cards between
//! them.

pub mod pile;

pub use pile::{draw, opening_hand, shuffle};
