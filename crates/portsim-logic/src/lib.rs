//! Pure simulation logic for PortSim.
//!
//! This crate contains the whole logistics engine: ports holding containers,
//! and ships moving containers between ports under capacity and fuel limits.
//! It performs no file or console I/O, so it can be driven by the headless
//! harness, by tests, or by any future front end.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`command`] | Typed commands and the command-file parser |
//! | [`container`] | Container categories, fuel coefficients, classification |
//! | [`error`] | Parse errors and declined-operation reasons |
//! | [`ids`] | Stable integer identifiers for arena entities |
//! | [`port`] | Port geometry, waiting containers, docked ships |
//! | [`report`] | Fixed-format text report of ports and ships |
//! | [`rules`] | Numeric policy (heavy threshold, capacity-check mode) |
//! | [`ship`] | Ship capacity accounting, load check, voyage fuel cost |
//! | [`sim`] | Command processor and run statistics |
//! | [`world`] | Entity arena and the load/unload/sail/refuel transitions |

pub mod command;
pub mod container;
pub mod error;
pub mod ids;
pub mod port;
pub mod report;
pub mod rules;
pub mod ship;
pub mod sim;
pub mod world;

pub use command::{Command, Script, ScriptLine};
pub use container::{Category, Container};
pub use error::{Declined, LimitKind, ParseError, RulesError, ScriptError};
pub use ids::{ContainerId, PortId, ShipId};
pub use port::Port;
pub use rules::{CapacityMode, Rules};
pub use ship::{CategoryCounts, Ship, ShipSpec};
pub use sim::{Outcome, RunStats, Simulation};
pub use world::World;
