//! Pulse CLI
//!
//! Terminal front end for the Pulse player: a simulated stream stands in
//! for the media element, and typed commands stand in for button clicks.

pub mod config;
pub mod error;
pub mod session;
pub mod simulator;

pub use config::CliConfig;
pub use error::{CliError, Result};
pub use session::{Command, Outcome, Session};
pub use simulator::SimulatedStream;
