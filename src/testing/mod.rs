//! Headless testing harness.
//!
//! Use the [`Pilot`] to drive a page through repeated stateless round trips
//! and inspect the responses, markup and carried ledger.

pub mod pilot;

pub use pilot::{Pilot, PilotError, Step};
