//! Auxiliary HTTP listener module.
//!
//! Serves the health-check routes on the stage-derived port for the
//! lifetime of the process.

mod server;

pub use server::{serve, router, HealthState, HttpServerError, HttpServerHandle};
