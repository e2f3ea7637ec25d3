//! Fixed-format text report of the world.
//!
//! ```text
//! Port 0: (0.00, 0.00)
//!   BasicContainer: 1 4
//!   Ship 0: 12.50
//!     RefrigeratedContainer: 2
//! ```
//!
//! Category lines always come in the order Basic, Heavy, Refrigerated,
//! Liquid, and a line is only written when it lists at least one id. Ship
//! blocks follow the port's own lines in ascending ship id.

use std::fmt::{self, Write as _};

use crate::container::{Category, Container};
use crate::ids::ContainerId;
use crate::port::Port;
use crate::ship::Ship;
use crate::world::World;

const PORT_INDENT: &str = "  ";
const SHIP_INDENT: &str = "    ";

/// Render every port, in creation order.
pub fn render_world(world: &World) -> String {
    let mut out = String::new();
    for port in world.ports() {
        // Writing into a String cannot fail
        let _ = write!(out, "{}", PortReport { world, port });
    }
    out
}

/// Display adapter for one port block, docked ships included.
pub struct PortReport<'a> {
    pub world: &'a World,
    pub port: &'a Port,
}

impl fmt::Display for PortReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let port = self.port;
        writeln!(f, "Port {}: ({:.2}, {:.2})", port.id, port.x, port.y)?;
        write_categories(f, PORT_INDENT, port.containers(), self.world.containers())?;
        for ship in port.docked().filter_map(|id| self.world.ship(id)) {
            write!(
                f,
                "{}",
                ShipReport {
                    ship,
                    containers: self.world.containers(),
                }
            )?;
        }
        Ok(())
    }
}

/// Display adapter for one ship block.
pub struct ShipReport<'a> {
    pub ship: &'a Ship,
    pub containers: &'a [Container],
}

impl fmt::Display for ShipReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}Ship {}: {:.2}", PORT_INDENT, self.ship.id, self.ship.fuel())?;
        write_categories(f, SHIP_INDENT, self.ship.cargo(), self.containers)
    }
}

/// One line per non-empty exact category. `ids` must be ascending.
fn write_categories(
    f: &mut fmt::Formatter<'_>,
    indent: &str,
    ids: impl Iterator<Item = ContainerId> + Clone,
    containers: &[Container],
) -> fmt::Result {
    for category in Category::ALL {
        let mut matching = ids
            .clone()
            .filter(|id| containers.get(id.index()).map(|c| c.category) == Some(category))
            .peekable();
        if matching.peek().is_none() {
            continue;
        }
        write!(f, "{}{}:", indent, category.label())?;
        for id in matching {
            write!(f, " {}", id)?;
        }
        writeln!(f)?;
    }
    Ok(())
}
