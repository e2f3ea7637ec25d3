//! Error and decline types.
//!
//! Nothing here is fatal to a run. [`ParseError`] marks a command line that
//! gets skipped, [`Declined`] marks a well-formed operation whose
//! precondition failed and which therefore left the world unchanged.

use thiserror::Error;

use crate::ids::{ContainerId, PortId, ShipId};

/// A command line that could not be turned into a [`crate::Command`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("empty command line")]
    Empty,
    #[error("unrecognized operation code `{0}`")]
    UnknownOpcode(String),
    #[error("operation {op}: missing field `{field}`")]
    MissingField { op: u8, field: &'static str },
    #[error("operation {op}: field `{field}` has invalid value `{value}`")]
    InvalidField {
        op: u8,
        field: &'static str,
        value: String,
    },
}

/// A command file that could not be read as a script at all.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScriptError {
    #[error("command file is empty")]
    MissingHeader,
    #[error("invalid command count `{0}` on the first line")]
    InvalidHeader(String),
}

/// Which capacity limit refused a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    All,
    Heavy,
    Refrigerated,
    Liquid,
}

impl std::fmt::Display for LimitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::All => "all",
            Self::Heavy => "heavy",
            Self::Refrigerated => "refrigerated",
            Self::Liquid => "liquid",
        };
        f.write_str(name)
    }
}

/// Why a domain operation was refused.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Declined {
    #[error("unknown port {0}")]
    UnknownPort(PortId),
    #[error("unknown ship {0}")]
    UnknownShip(ShipId),
    #[error("unknown container {0}")]
    UnknownContainer(ContainerId),
    #[error("container {container} is not waiting at port {port}")]
    NotAtPort { container: ContainerId, port: PortId },
    #[error("container {container} is not aboard ship {ship}")]
    NotAboard { container: ContainerId, ship: ShipId },
    #[error("loading would carry {would_carry:.2} over a capacity of {capacity:.2}")]
    Overweight { would_carry: f64, capacity: f64 },
    #[error("{kind} container limit of {max} reached")]
    LimitReached { kind: LimitKind, max: u32 },
    #[error("insufficient fuel: need {needed:.2}, have {available:.2}")]
    InsufficientFuel { needed: f64, available: f64 },
}

/// A rules file that could not be loaded.
#[derive(Debug, Error)]
pub enum RulesError {
    #[error("invalid rules document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("heavy weight threshold must be finite and non-negative, got {0}")]
    InvalidThreshold(f64),
}
