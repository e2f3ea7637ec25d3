//! Integration tests for the full command pipeline.
//!
//! Exercises: command file → Script → Simulation → World → text report,
//! plus randomised sequences checking the world invariants after every
//! operation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use portsim_logic::world::Location;
use portsim_logic::{
    CapacityMode, Category, ContainerId, Declined, PortId, Rules, Script, ShipId, ShipSpec,
    Simulation, World,
};

// ── Helpers ────────────────────────────────────────────────────────────

const VOYAGE_SCRIPT: &str = "\
14
3 0 0
3 30 40
1 0 2000
1 0 4000
1 0 500 R
1 0 800 L
2 0 10000 3 2 1 1 0.5
4 0 0
4 0 2
4 0 3
4 0 1
7 0 600000
6 0 1
5 0 2
";

fn run(input: &str, rules: Rules) -> Simulation {
    let script = Script::parse(input).expect("valid script");
    let mut sim = Simulation::new(rules);
    sim.run(&script);
    sim
}

// ── End-to-end scenarios ───────────────────────────────────────────────

#[test]
fn voyage_report_matches_expected() {
    let sim = run(VOYAGE_SCRIPT, Rules::default());
    // cargo cost = 2000*2.5 + 500*5 + 800*4 = 10700, (0.5 + 10700) * 50 = 535025
    let expected = "\
Port 0: (0.00, 0.00)
  HeavyContainer: 1
Port 1: (30.00, 40.00)
  RefrigeratedContainer: 2
  Ship 0: 64975.00
    BasicContainer: 0
    LiquidContainer: 3
";
    assert_eq!(sim.render(), expected);
}

#[test]
fn voyage_stats() {
    let sim = run(VOYAGE_SCRIPT, Rules::default());
    let stats = sim.stats();
    assert_eq!(stats.applied, 13);
    // Fourth load exceeds max_all = 3
    assert_eq!(stats.declined, 1);
    assert_eq!(stats.skipped, 0);
}

#[test]
fn unknown_opcode_does_not_abort_run() {
    let input = "4\n3 0 0\n0 1 2 3\n1 0 10\nhello\n";
    let sim = run(input, Rules::default());
    assert_eq!(sim.stats().skipped, 2);
    assert_eq!(sim.render(), "Port 0: (0.00, 0.00)\n  BasicContainer: 0\n");
}

#[test]
fn custom_heavy_threshold() {
    let rules = Rules {
        heavy_weight_threshold: 1000.0,
        ..Rules::default()
    };
    let sim = run("2\n3 0 0\n1 0 2000\n", rules);
    assert_eq!(
        sim.world().container(ContainerId(0)).unwrap().category,
        Category::Heavy
    );
}

#[test]
fn legacy_mode_counts_exact_heavy_and_liquid() {
    // max_heavy = 0, max_refrigerated = 1, two reefers
    let input = "\
6
3 0 0
2 0 10000 5 0 1 1 1
1 0 100 R
1 0 100 R
4 0 0
4 0 1
";
    let standard = run(input, Rules::default());
    let ship = standard.world().ship(ShipId(0)).unwrap();
    assert_eq!(ship.cargo_count(), 0);

    let legacy = run(
        input,
        Rules {
            capacity_mode: CapacityMode::Legacy,
            ..Rules::default()
        },
    );
    let ship = legacy.world().ship(ShipId(0)).unwrap();
    assert_eq!(ship.cargo_count(), 2);
}

#[test]
fn failed_sail_leaves_ship_at_origin() {
    let input = "\
4
3 0 0
3 3 4
2 0 100 1 1 1 1 1.0
7 0 4.99
";
    let mut sim = run(input, Rules::default());
    let outcome = sim.apply(&portsim_logic::Command::SailTo {
        ship: ShipId(0),
        port: PortId(1),
    });
    assert!(matches!(
        outcome,
        portsim_logic::Outcome::Declined(Declined::InsufficientFuel { .. })
    ));
    assert_eq!(
        sim.render(),
        "Port 0: (0.00, 0.00)\n  Ship 0: 4.99\nPort 1: (3.00, 4.00)\n"
    );
}

#[test]
fn fractional_load_unload_restores_weight() {
    let input = "\
5
3 0 0
2 0 1000 5 5 5 5 1
1 0 0.1
1 0 0.2
4 0 0
";
    let mut sim = run(input, Rules::default());
    let before = sim.world().ship(ShipId(0)).unwrap().aboard_weight();
    let load = portsim_logic::Command::Load {
        ship: ShipId(0),
        container: ContainerId(1),
    };
    let unload = portsim_logic::Command::Unload {
        ship: ShipId(0),
        container: ContainerId(1),
    };
    for _ in 0..25 {
        assert!(sim.apply(&load).is_applied());
        assert!(sim.apply(&unload).is_applied());
    }
    assert_eq!(sim.world().ship(ShipId(0)).unwrap().aboard_weight(), before);
}

// ── Randomised invariants ──────────────────────────────────────────────

fn random_world(rng: &mut StdRng) -> World {
    let mut w = World::default();
    let ports = rng.gen_range(2..5);
    for _ in 0..ports {
        w.add_port(rng.gen_range(-50.0..50.0), rng.gen_range(-50.0..50.0));
    }
    for _ in 0..rng.gen_range(1..4) {
        let spec = ShipSpec {
            total_weight_capacity: f64::from(rng.gen_range(0..20_000u32)),
            max_all: rng.gen_range(0..8),
            max_heavy: rng.gen_range(0..5),
            max_refrigerated: rng.gen_range(0..3),
            max_liquid: rng.gen_range(0..3),
            fuel_per_distance: f64::from(rng.gen_range(1..10u32)),
        };
        let home = PortId(rng.gen_range(0..ports));
        w.add_ship(home, spec).unwrap();
    }
    for _ in 0..rng.gen_range(5..25) {
        let port = PortId(rng.gen_range(0..ports));
        // Fractional weights, so rounding in the aboard total would show
        let weight = rng.gen_range(0.0..6_000.0);
        let special = match rng.gen_range(0..4) {
            0 => Some('L'),
            1 => Some('R'),
            _ => None,
        };
        w.add_container(port, weight, special).unwrap();
    }
    w
}

fn assert_invariants(w: &World) {
    for ship in w.ships() {
        let spec = &ship.spec;
        let counts = ship.counts();
        assert!(ship.aboard_weight() <= spec.total_weight_capacity);
        assert!(ship.cargo_count() <= spec.max_all as usize);
        assert!(counts.heavy_classified() <= spec.max_heavy);
        assert!(counts.get(Category::Refrigerated) <= spec.max_refrigerated);
        assert!(counts.get(Category::Liquid) <= spec.max_liquid);

        let recomputed: f64 = ship
            .cargo()
            .map(|id| w.container(id).unwrap().weight)
            .sum();
        assert_eq!(recomputed, ship.aboard_weight());

        let docked_at: Vec<_> = w
            .ports()
            .iter()
            .filter(|p| p.is_docked(ship.id))
            .map(|p| p.id)
            .collect();
        assert_eq!(docked_at, vec![ship.current_port()]);
    }

    for c in w.containers() {
        let in_ports = w.ports().iter().filter(|p| p.holds(c.id)).count();
        let in_ships = w.ships().iter().filter(|s| s.carries(c.id)).count();
        assert_eq!(in_ports + in_ships, 1, "container {} location", c.id);
    }
}

#[test]
fn random_operations_preserve_invariants() {
    for seed in 0..200u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut w = random_world(&mut rng);
        assert_invariants(&w);

        let ships = w.ships().len();
        let ports = w.ports().len();
        let containers = w.containers().len();

        for _ in 0..60 {
            let ship = ShipId(rng.gen_range(0..ships));
            match rng.gen_range(0..4) {
                0 => {
                    w.load(ship, ContainerId(rng.gen_range(0..containers)));
                }
                1 => {
                    w.unload(ship, ContainerId(rng.gen_range(0..containers)));
                }
                2 => {
                    w.refuel(ship, f64::from(rng.gen_range(0..50_000u32)));
                }
                _ => {
                    let before = w.ship(ship).unwrap().clone();
                    let dest = PortId(rng.gen_range(0..ports));
                    if w.try_sail_to(ship, dest).is_err() {
                        let after = w.ship(ship).unwrap();
                        assert_eq!(after.current_port(), before.current_port());
                        assert_eq!(after.fuel(), before.fuel());
                        assert!(after.cargo().eq(before.cargo()));
                    }
                }
            }
            assert_invariants(&w);
        }
    }
}

#[test]
fn load_then_unload_is_identity() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..100 {
        let mut w = random_world(&mut rng);
        let ship = ShipId(0);
        let home = w.ship(ship).unwrap().current_port();
        let waiting: Vec<_> = w.port(home).unwrap().containers().collect();
        for id in waiting {
            let s = w.ship(ship).unwrap();
            let before = (s.aboard_weight(), s.cargo_count(), s.counts());
            if w.load(ship, id) {
                assert!(w.unload(ship, id));
                let s = w.ship(ship).unwrap();
                assert_eq!((s.aboard_weight(), s.cargo_count(), s.counts()), before);
                assert_eq!(w.locate(id), Some(Location::Port(home)));
            }
        }
    }
}
