//! Command processor.
//!
//! Applies commands one at a time, in order, against a single [`World`].
//! A command either applies or is declined with the world unchanged; lines
//! that failed to parse are skipped. None of these stop the run.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::command::{Command, Script};
use crate::error::Declined;
use crate::report;
use crate::rules::Rules;
use crate::world::World;

/// Result of applying one command.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Applied,
    Declined(Declined),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

impl<T> From<Result<T, Declined>> for Outcome {
    fn from(result: Result<T, Declined>) -> Self {
        match result {
            Ok(_) => Self::Applied,
            Err(reason) => Self::Declined(reason),
        }
    }
}

/// Tally of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub applied: usize,
    pub declined: usize,
    /// Lines that did not parse.
    pub skipped: usize,
}

impl RunStats {
    pub fn total(&self) -> usize {
        self.applied + self.declined + self.skipped
    }
}

#[derive(Debug, Clone, Default)]
pub struct Simulation {
    world: World,
    stats: RunStats,
}

impl Simulation {
    pub fn new(rules: Rules) -> Self {
        Self {
            world: World::new(rules),
            stats: RunStats::default(),
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    /// Apply a single command and count its outcome.
    pub fn apply(&mut self, command: &Command) -> Outcome {
        let w = &mut self.world;
        let outcome: Outcome = match *command {
            Command::CreateContainer {
                port,
                weight,
                special,
            } => w.add_container(port, weight, special).into(),
            Command::CreateShip { port, spec } => w.add_ship(port, spec).into(),
            Command::CreatePort { x, y } => {
                w.add_port(x, y);
                Outcome::Applied
            }
            Command::Load { ship, container } => w.try_load(ship, container).into(),
            Command::Unload { ship, container } => w.try_unload(ship, container).into(),
            Command::SailTo { ship, port } => w.try_sail_to(ship, port).into(),
            Command::Refuel { ship, amount } => w.try_refuel(ship, amount).into(),
        };

        match &outcome {
            Outcome::Applied => self.stats.applied += 1,
            Outcome::Declined(reason) => {
                self.stats.declined += 1;
                debug!(op = command.opcode(), %reason, "operation declined");
            }
        }
        outcome
    }

    /// Apply every line of a script in order.
    pub fn run(&mut self, script: &Script) -> RunStats {
        for line in &script.lines {
            match &line.command {
                Ok(command) => {
                    self.apply(command);
                }
                Err(err) => {
                    self.stats.skipped += 1;
                    warn!(line = line.line_no, %err, "skipping command");
                }
            }
        }
        let stats = self.stats;
        info!(
            applied = stats.applied,
            declined = stats.declined,
            skipped = stats.skipped,
            "run complete"
        );
        stats
    }

    /// Text report of every port, in creation order.
    pub fn render(&self) -> String {
        report::render_world(&self.world)
    }
}
