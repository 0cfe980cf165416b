//! Shared test harness modules for the `neo` CLI.
#![expect(
    clippy::panic,
    reason = "Tests assert panic branches to surface unexpected CLI outcomes"
)]

use super::*;

mod helpers;
mod inspect_unit;
mod query_unit;
