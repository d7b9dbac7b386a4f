//! Lead intake core for the agency website.
//!
//! `workflows::intake` validates booking/representation/production requests and
//! fans each accepted request out to two e-mail notifications. `workflows::selection`
//! holds the exclusive branch state behind the talent category view.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
