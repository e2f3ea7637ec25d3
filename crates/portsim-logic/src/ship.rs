//! Ships — capacity accounting, the load check, and voyage fuel cost.
//!
//! A ship only knows the ids and weights of what it carries and where it is
//! docked. Transitions that touch ports and containers as well live on
//! [`crate::world::World`], which owns all three arenas.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::container::{Category, Container};
use crate::error::{Declined, LimitKind};
use crate::ids::{ContainerId, PortId, ShipId};
use crate::rules::CapacityMode;

/// Fixed limits and consumption of a ship, set at creation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShipSpec {
    pub total_weight_capacity: f64,
    pub max_all: u32,
    pub max_heavy: u32,
    pub max_refrigerated: u32,
    pub max_liquid: u32,
    /// Fuel burnt per unit of distance by the empty ship.
    pub fuel_per_distance: f64,
}

/// Containers aboard, counted per exact category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts([u32; 4]);

impl CategoryCounts {
    pub fn get(&self, category: Category) -> u32 {
        self.0[category as usize]
    }

    /// Heavy, Refrigerated and Liquid together.
    pub fn heavy_classified(&self) -> u32 {
        Category::ALL
            .iter()
            .filter(|c| c.is_heavy_classified())
            .map(|c| self.get(*c))
            .sum()
    }

    fn add(&mut self, category: Category) {
        self.0[category as usize] += 1;
    }

    fn remove(&mut self, category: Category) {
        let slot = &mut self.0[category as usize];
        *slot = slot.saturating_sub(1);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub id: ShipId,
    pub spec: ShipSpec,
    current_port: PortId,
    fuel: f64,
    /// Weight of each container aboard, keyed by id.
    cargo: BTreeMap<ContainerId, f64>,
    counts: CategoryCounts,
}

impl Ship {
    /// A new, empty, unfuelled ship at `home`. Docking it at the port is
    /// the caller's job.
    pub fn new(id: ShipId, home: PortId, spec: ShipSpec) -> Self {
        Self {
            id,
            spec,
            current_port: home,
            fuel: 0.0,
            cargo: BTreeMap::new(),
            counts: CategoryCounts::default(),
        }
    }

    pub fn current_port(&self) -> PortId {
        self.current_port
    }

    pub fn fuel(&self) -> f64 {
        self.fuel
    }

    /// Total weight aboard, summed in ascending id order.
    pub fn aboard_weight(&self) -> f64 {
        self.cargo.values().sum()
    }

    pub fn cargo_count(&self) -> usize {
        self.cargo.len()
    }

    pub fn counts(&self) -> CategoryCounts {
        self.counts
    }

    pub fn carries(&self, container: ContainerId) -> bool {
        self.cargo.contains_key(&container)
    }

    /// Containers aboard in ascending id order.
    pub fn cargo(&self) -> impl Iterator<Item = ContainerId> + Clone + '_ {
        self.cargo.keys().copied()
    }

    /// Add fuel. There is no tank limit.
    pub fn refuel(&mut self, amount: f64) {
        self.fuel += amount;
    }

    /// Check every capacity limit against the state after a hypothetical
    /// load of `container`.
    pub fn can_load(&self, container: &Container, mode: CapacityMode) -> Result<(), Declined> {
        let spec = &self.spec;
        // Same summation order as `aboard_weight` after the stow
        let would_carry: f64 = self
            .cargo
            .range(..container.id)
            .map(|(_, w)| *w)
            .chain(std::iter::once(container.weight))
            .chain(self.cargo.range(container.id..).map(|(_, w)| *w))
            .sum();
        if would_carry > spec.total_weight_capacity {
            return Err(Declined::Overweight {
                would_carry,
                capacity: spec.total_weight_capacity,
            });
        }
        if self.cargo.len() as u64 + 1 > u64::from(spec.max_all) {
            return Err(Declined::LimitReached {
                kind: LimitKind::All,
                max: spec.max_all,
            });
        }

        let category = container.category;
        let is = |c: Category| u32::from(category == c);
        let (heavy, refrigerated) = match mode {
            CapacityMode::Standard => (
                self.counts.heavy_classified() + u32::from(category.is_heavy_classified()),
                self.counts.get(Category::Refrigerated) + is(Category::Refrigerated),
            ),
            CapacityMode::Legacy => (
                self.counts.get(Category::Heavy) + is(Category::Heavy),
                self.counts.get(Category::Liquid) + is(Category::Refrigerated),
            ),
        };
        let liquid = self.counts.get(Category::Liquid) + is(Category::Liquid);

        let limits = [
            (heavy, spec.max_heavy, LimitKind::Heavy),
            (refrigerated, spec.max_refrigerated, LimitKind::Refrigerated),
            (liquid, spec.max_liquid, LimitKind::Liquid),
        ];
        for (count, max, kind) in limits {
            if count > max {
                return Err(Declined::LimitReached { kind, max });
            }
        }
        Ok(())
    }

    /// Fuel burnt per unit of distance by the current cargo alone.
    pub fn cargo_fuel_cost(&self, containers: &[Container]) -> f64 {
        self.cargo
            .keys()
            .filter_map(|id| containers.get(id.index()))
            .map(Container::fuel_per_distance)
            .sum()
    }

    /// Fuel needed to sail `distance` with the current cargo.
    pub fn fuel_needed(&self, distance: f64, containers: &[Container]) -> f64 {
        (self.spec.fuel_per_distance + self.cargo_fuel_cost(containers)) * distance
    }

    pub(crate) fn stow(&mut self, container: &Container) {
        if self.cargo.insert(container.id, container.weight).is_none() {
            self.counts.add(container.category);
        }
    }

    pub(crate) fn unstow(&mut self, container: &Container) {
        if self.cargo.remove(&container.id).is_some() {
            self.counts.remove(container.category);
        }
    }

    pub(crate) fn complete_voyage(&mut self, burnt: f64, destination: PortId) {
        self.fuel -= burnt;
        self.current_port = destination;
    }
}
