//! Shared test harness modules for the uptodate CLI.
#![expect(
    clippy::panic,
    reason = "Tests assert panic branches to surface unexpected CLI outcomes"
)]

use super::*;

mod fetch_unit;
mod helpers;
