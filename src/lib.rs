#![cfg_attr(not(test), no_std)]

//! Control core for a road/rail level crossing.
//!
//! The crossing is an event-driven state machine fed by four kinds of
//! events: pedestrian/quit buttons, the maintenance and train switches, a
//! fixed-rate timer tick and bytes arriving from a remote peer. Every event is
//! turned into at most one [`Transition`] and handed to the dispatcher, which
//! drives the actuators through the [`CrossingIo`] trait.
//!
//! All entry points on [`Crossing`] must be called from one serialized
//! context. On target this is a single embassy task draining an event
//! channel; in tests it is the test body itself.

#[macro_use]
mod logging;

pub mod config;
pub mod crossing;
pub mod error;
pub mod io;
pub mod message;
pub mod remote;
pub mod state;
pub mod table;
pub mod timer;

pub use config::CrossingConfig;
pub use crossing::{Crossing, Event};
pub use error::LinkError;
pub use io::{CrossingIo, GatePosition, LightColor};
pub use state::{Regime, State, Transition};
