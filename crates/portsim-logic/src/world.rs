//! The world — arenas of ports, ships and containers.
//!
//! Entities reference each other only by id. Every transition that spans
//! more than one entity (load, unload, sail) is a `World` method that first
//! checks all preconditions and only then mutates, so a declined call leaves
//! every arena untouched.
//!
//! Each transition comes in two forms: `try_*` returns the reason for a
//! decline, the plain form reduces it to a success flag.

use serde::Serialize;

use crate::container::{Category, Container};
use crate::error::Declined;
use crate::ids::{ContainerId, PortId, ShipId};
use crate::port::Port;
use crate::rules::Rules;
use crate::ship::{Ship, ShipSpec};

#[derive(Debug, Clone, Default, Serialize)]
pub struct World {
    rules: Rules,
    ports: Vec<Port>,
    ships: Vec<Ship>,
    containers: Vec<Container>,
}

impl World {
    pub fn new(rules: Rules) -> Self {
        Self {
            rules,
            ..Self::default()
        }
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    // ── Lookup ──────────────────────────────────────────────────────────

    pub fn port(&self, id: PortId) -> Option<&Port> {
        self.ports.get(id.index())
    }

    pub fn ship(&self, id: ShipId) -> Option<&Ship> {
        self.ships.get(id.index())
    }

    pub fn container(&self, id: ContainerId) -> Option<&Container> {
        self.containers.get(id.index())
    }

    /// Ports in creation order.
    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    fn port_index(&self, id: PortId) -> Result<usize, Declined> {
        self.port(id)
            .map(|_| id.index())
            .ok_or(Declined::UnknownPort(id))
    }

    fn ship_ref(&self, id: ShipId) -> Result<&Ship, Declined> {
        self.ship(id).ok_or(Declined::UnknownShip(id))
    }

    // ── Creation ────────────────────────────────────────────────────────

    pub fn add_port(&mut self, x: f64, y: f64) -> PortId {
        let id = PortId(self.ports.len());
        self.ports.push(Port::new(id, x, y));
        id
    }

    /// Create a ship docked at `home`.
    pub fn add_ship(&mut self, home: PortId, spec: ShipSpec) -> Result<ShipId, Declined> {
        let port = self.port_index(home)?;
        let id = ShipId(self.ships.len());
        self.ships.push(Ship::new(id, home, spec));
        self.ports[port].dock(id);
        Ok(id)
    }

    /// Create a container waiting at `port`, classified by the run's rules.
    pub fn add_container(
        &mut self,
        port: PortId,
        weight: f64,
        special: Option<char>,
    ) -> Result<ContainerId, Declined> {
        let category = Category::classify(weight, special, self.rules.heavy_weight_threshold);
        self.add_container_of(port, weight, category)
    }

    /// Create a container with an explicit category.
    pub fn add_container_of(
        &mut self,
        port: PortId,
        weight: f64,
        category: Category,
    ) -> Result<ContainerId, Declined> {
        let port = self.port_index(port)?;
        let id = ContainerId(self.containers.len());
        self.containers.push(Container::new(id, weight, category));
        self.ports[port].receive(id);
        Ok(id)
    }

    // ── Transitions ─────────────────────────────────────────────────────

    /// Move a container waiting at the ship's current port aboard.
    pub fn try_load(&mut self, ship: ShipId, container: ContainerId) -> Result<(), Declined> {
        let s = self.ship_ref(ship)?;
        let cargo = *self
            .container(container)
            .ok_or(Declined::UnknownContainer(container))?;
        let port = self.port_index(s.current_port())?;
        if !self.ports[port].holds(container) {
            return Err(Declined::NotAtPort {
                container,
                port: s.current_port(),
            });
        }
        s.can_load(&cargo, self.rules.capacity_mode)?;

        self.ports[port].release(container);
        self.ships[ship.index()].stow(&cargo);
        Ok(())
    }

    pub fn load(&mut self, ship: ShipId, container: ContainerId) -> bool {
        self.try_load(ship, container).is_ok()
    }

    /// Move a container from the ship to its current port.
    pub fn try_unload(&mut self, ship: ShipId, container: ContainerId) -> Result<(), Declined> {
        let s = self.ship_ref(ship)?;
        let cargo = *self
            .container(container)
            .ok_or(Declined::UnknownContainer(container))?;
        if !s.carries(container) {
            return Err(Declined::NotAboard { container, ship });
        }
        let port = self.port_index(s.current_port())?;

        self.ships[ship.index()].unstow(&cargo);
        self.ports[port].receive(container);
        Ok(())
    }

    pub fn unload(&mut self, ship: ShipId, container: ContainerId) -> bool {
        self.try_unload(ship, container).is_ok()
    }

    /// Sail to `destination` if the tank covers the whole voyage.
    ///
    /// Fuel needed is `(ship rate + Σ coefficient × weight) × distance`.
    /// The ship only undocks once the fuel check has passed.
    pub fn try_sail_to(&mut self, ship: ShipId, destination: PortId) -> Result<(), Declined> {
        let s = self.ship_ref(ship)?;
        let dest = self.port_index(destination)?;
        let origin = self.port_index(s.current_port())?;

        let distance = self.ports[origin].distance_to(&self.ports[dest]);
        let needed = s.fuel_needed(distance, &self.containers);
        let available = s.fuel();
        if available >= needed {
            self.ports[origin].undock(ship);
            self.ships[ship.index()].complete_voyage(needed, destination);
            self.ports[dest].dock(ship);
            Ok(())
        } else {
            Err(Declined::InsufficientFuel { needed, available })
        }
    }

    pub fn sail_to(&mut self, ship: ShipId, destination: PortId) -> bool {
        self.try_sail_to(ship, destination).is_ok()
    }

    pub fn try_refuel(&mut self, ship: ShipId, amount: f64) -> Result<(), Declined> {
        self.ship_ref(ship)?;
        self.ships[ship.index()].refuel(amount);
        Ok(())
    }

    pub fn refuel(&mut self, ship: ShipId, amount: f64) -> bool {
        self.try_refuel(ship, amount).is_ok()
    }

    /// Where a container currently is, if anywhere.
    pub fn locate(&self, container: ContainerId) -> Option<Location> {
        if let Some(port) = self.ports.iter().find(|p| p.holds(container)) {
            return Some(Location::Port(port.id));
        }
        self.ships
            .iter()
            .find(|s| s.carries(container))
            .map(|s| Location::Ship(s.id))
    }
}

/// Holder of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Port(PortId),
    Ship(ShipId),
}
