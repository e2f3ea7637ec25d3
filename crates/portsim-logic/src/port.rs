//! Ports — fixed locations holding waiting containers and docked ships.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::ids::{ContainerId, PortId, ShipId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Port {
    pub id: PortId,
    pub x: f64,
    pub y: f64,
    /// Containers waiting here, ordered by id.
    containers: BTreeSet<ContainerId>,
    /// Ships currently docked, ordered by id.
    docked: BTreeSet<ShipId>,
    /// Every departure, oldest first.
    history: Vec<ShipId>,
}

impl Port {
    pub fn new(id: PortId, x: f64, y: f64) -> Self {
        Self {
            id,
            x,
            y,
            containers: BTreeSet::new(),
            docked: BTreeSet::new(),
            history: Vec::new(),
        }
    }

    /// Add a ship to the docked set.
    pub fn dock(&mut self, ship: ShipId) {
        self.docked.insert(ship);
    }

    /// Record a departure and remove the ship from the docked set.
    /// Removing a ship that is not docked is a no-op apart from the history.
    pub fn undock(&mut self, ship: ShipId) {
        self.history.push(ship);
        self.docked.remove(&ship);
    }

    /// Euclidean distance to another port.
    pub fn distance_to(&self, other: &Port) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn is_docked(&self, ship: ShipId) -> bool {
        self.docked.contains(&ship)
    }

    /// Docked ships in ascending id order.
    pub fn docked(&self) -> impl Iterator<Item = ShipId> + '_ {
        self.docked.iter().copied()
    }

    pub fn history(&self) -> &[ShipId] {
        &self.history
    }

    pub fn holds(&self, container: ContainerId) -> bool {
        self.containers.contains(&container)
    }

    /// Waiting containers in ascending id order.
    pub fn containers(&self) -> impl Iterator<Item = ContainerId> + Clone + '_ {
        self.containers.iter().copied()
    }

    pub fn container_count(&self) -> usize {
        self.containers.len()
    }

    pub(crate) fn receive(&mut self, container: ContainerId) {
        self.containers.insert(container);
    }

    /// Returns false when the container was not waiting here.
    pub(crate) fn release(&mut self, container: ContainerId) -> bool {
        self.containers.remove(&container)
    }
}
