//! Typed commands and the command-file parser.
//!
//! A command file starts with the number of commands `N`, followed by `N`
//! lines of whitespace-separated fields. The first field is the operation
//! code:
//!
//! | Code | Fields | Command |
//! |------|--------|---------|
//! | 1 | `port weight [special]` | create container |
//! | 2 | `port capacity max_all max_heavy max_refrigerated max_liquid fuel_rate` | create ship |
//! | 3 | `x y` | create port |
//! | 4 | `ship container` | load |
//! | 5 | `ship container` | unload |
//! | 6 | `ship port` | sail |
//! | 7 | `ship amount` | refuel |

use std::str::{FromStr, SplitWhitespace};

use tracing::warn;

use crate::error::{ParseError, ScriptError};
use crate::ids::{ContainerId, PortId, ShipId};
use crate::ship::ShipSpec;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    CreateContainer {
        port: PortId,
        weight: f64,
        special: Option<char>,
    },
    CreateShip {
        port: PortId,
        spec: ShipSpec,
    },
    CreatePort {
        x: f64,
        y: f64,
    },
    Load {
        ship: ShipId,
        container: ContainerId,
    },
    Unload {
        ship: ShipId,
        container: ContainerId,
    },
    SailTo {
        ship: ShipId,
        port: PortId,
    },
    Refuel {
        ship: ShipId,
        amount: f64,
    },
}

impl Command {
    /// Operation code as written in a command file.
    pub fn opcode(&self) -> u8 {
        match self {
            Self::CreateContainer { .. } => 1,
            Self::CreateShip { .. } => 2,
            Self::CreatePort { .. } => 3,
            Self::Load { .. } => 4,
            Self::Unload { .. } => 5,
            Self::SailTo { .. } => 6,
            Self::Refuel { .. } => 7,
        }
    }

    /// Parse a single command line.
    pub fn parse_line(line: &str) -> Result<Self, ParseError> {
        let mut tokens = line.split_whitespace();
        let code = tokens.next().ok_or(ParseError::Empty)?;
        let op = match code.parse::<u8>() {
            Ok(op @ 1..=7) => op,
            _ => return Err(ParseError::UnknownOpcode(code.to_string())),
        };
        let mut f = Fields { op, tokens };

        let cmd = match op {
            1 => {
                let port = PortId(f.number("port")?);
                let weight: f64 = f.real("weight")?;
                if weight < 0.0 {
                    return Err(f.invalid("weight", weight.to_string()));
                }
                let special = f.tokens.next().and_then(|t| t.chars().next());
                Self::CreateContainer {
                    port,
                    weight,
                    special,
                }
            }
            2 => Self::CreateShip {
                port: PortId(f.number("port")?),
                spec: ShipSpec {
                    total_weight_capacity: f.real("total_weight_capacity")?,
                    max_all: f.number("max_all")?,
                    max_heavy: f.number("max_heavy")?,
                    max_refrigerated: f.number("max_refrigerated")?,
                    max_liquid: f.number("max_liquid")?,
                    fuel_per_distance: f.real("fuel_per_distance")?,
                },
            },
            3 => Self::CreatePort {
                x: f.real("x")?,
                y: f.real("y")?,
            },
            4 => Self::Load {
                ship: ShipId(f.number("ship")?),
                container: ContainerId(f.number("container")?),
            },
            5 => Self::Unload {
                ship: ShipId(f.number("ship")?),
                container: ContainerId(f.number("container")?),
            },
            6 => Self::SailTo {
                ship: ShipId(f.number("ship")?),
                port: PortId(f.number("port")?),
            },
            _ => Self::Refuel {
                ship: ShipId(f.number("ship")?),
                amount: f.real("amount")?,
            },
        };
        Ok(cmd)
    }
}

/// Field reader bound to one command line.
struct Fields<'a> {
    op: u8,
    tokens: SplitWhitespace<'a>,
}

impl<'a> Fields<'a> {
    fn next(&mut self, field: &'static str) -> Result<&'a str, ParseError> {
        let op = self.op;
        self.tokens
            .next()
            .ok_or(ParseError::MissingField { op, field })
    }

    fn invalid(&self, field: &'static str, value: String) -> ParseError {
        ParseError::InvalidField {
            op: self.op,
            field,
            value,
        }
    }

    fn number<T: FromStr>(&mut self, field: &'static str) -> Result<T, ParseError> {
        let raw = self.next(field)?;
        raw.parse()
            .map_err(|_| self.invalid(field, raw.to_string()))
    }

    /// A finite real number.
    fn real(&mut self, field: &'static str) -> Result<f64, ParseError> {
        let raw = self.next(field)?;
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(self.invalid(field, raw.to_string())),
        }
    }
}

// ============================================================================
// SCRIPTS
// ============================================================================

/// One numbered line of a command file.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptLine {
    /// 1-based line number in the source file.
    pub line_no: usize,
    pub command: Result<Command, ParseError>,
}

/// A parsed command file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Script {
    /// Command count announced by the header.
    pub declared: usize,
    pub lines: Vec<ScriptLine>,
}

impl Script {
    /// Parse a command file: a count header, then that many command lines.
    ///
    /// Lines past the announced count are ignored. A file shorter than
    /// announced is accepted with a warning.
    pub fn parse(input: &str) -> Result<Self, ScriptError> {
        let mut lines = input
            .lines()
            .enumerate()
            .skip_while(|(_, l)| l.trim().is_empty());
        let (_, header) = lines.next().ok_or(ScriptError::MissingHeader)?;
        let header = header.trim();
        let declared: usize = header
            .parse()
            .map_err(|_| ScriptError::InvalidHeader(header.to_string()))?;

        let parsed: Vec<ScriptLine> = lines
            .take(declared)
            .map(|(idx, text)| ScriptLine {
                line_no: idx + 1,
                command: Command::parse_line(text),
            })
            .collect();

        if parsed.len() < declared {
            warn!(
                declared,
                found = parsed.len(),
                "command file is shorter than its header announces"
            );
        }

        Ok(Self {
            declared,
            lines: parsed,
        })
    }

    /// Build a script from already-typed commands, numbered as if the
    /// header were line 1.
    pub fn from_commands(commands: impl IntoIterator<Item = Command>) -> Self {
        let lines: Vec<ScriptLine> = commands
            .into_iter()
            .enumerate()
            .map(|(idx, cmd)| ScriptLine {
                line_no: idx + 2,
                command: Ok(cmd),
            })
            .collect();
        Self {
            declared: lines.len(),
            lines,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_container_without_marker() {
        let cmd = Command::parse_line("1 0 4000").unwrap();
        assert_eq!(
            cmd,
            Command::CreateContainer {
                port: PortId(0),
                weight: 4000.0,
                special: None
            }
        );
        assert_eq!(cmd.opcode(), 1);
    }

    #[test]
    fn test_parse_container_with_marker() {
        let cmd = Command::parse_line("1 2 150 L").unwrap();
        assert_eq!(
            cmd,
            Command::CreateContainer {
                port: PortId(2),
                weight: 150.0,
                special: Some('L')
            }
        );
        let cmd = Command::parse_line("1 2 150 R").unwrap();
        assert!(matches!(
            cmd,
            Command::CreateContainer {
                special: Some('R'),
                ..
            }
        ));
    }

    #[test]
    fn test_parse_ship() {
        let cmd = Command::parse_line("2 1 20000 10 4 2 1 1.5").unwrap();
        assert_eq!(
            cmd,
            Command::CreateShip {
                port: PortId(1),
                spec: ShipSpec {
                    total_weight_capacity: 20000.0,
                    max_all: 10,
                    max_heavy: 4,
                    max_refrigerated: 2,
                    max_liquid: 1,
                    fuel_per_distance: 1.5,
                },
            }
        );
    }

    #[test]
    fn test_parse_movement_commands() {
        assert_eq!(
            Command::parse_line("3 -1.5 20").unwrap(),
            Command::CreatePort { x: -1.5, y: 20.0 }
        );
        assert_eq!(
            Command::parse_line("4 0 3").unwrap(),
            Command::Load {
                ship: ShipId(0),
                container: ContainerId(3)
            }
        );
        assert_eq!(
            Command::parse_line("5 1 2").unwrap(),
            Command::Unload {
                ship: ShipId(1),
                container: ContainerId(2)
            }
        );
        assert_eq!(
            Command::parse_line("6 0 1").unwrap(),
            Command::SailTo {
                ship: ShipId(0),
                port: PortId(1)
            }
        );
        assert_eq!(
            Command::parse_line("7 0 12.25").unwrap(),
            Command::Refuel {
                ship: ShipId(0),
                amount: 12.25
            }
        );
    }

    #[test]
    fn test_unknown_opcode() {
        assert_eq!(
            Command::parse_line("9 1 2"),
            Err(ParseError::UnknownOpcode("9".into()))
        );
        assert_eq!(
            Command::parse_line("x 1 2"),
            Err(ParseError::UnknownOpcode("x".into()))
        );
        assert_eq!(Command::parse_line("   "), Err(ParseError::Empty));
    }

    #[test]
    fn test_missing_and_invalid_fields() {
        assert_eq!(
            Command::parse_line("4 0"),
            Err(ParseError::MissingField {
                op: 4,
                field: "container"
            })
        );
        assert_eq!(
            Command::parse_line("6 zero 1"),
            Err(ParseError::InvalidField {
                op: 6,
                field: "ship",
                value: "zero".into()
            })
        );
        assert!(matches!(
            Command::parse_line("7 0 NaN"),
            Err(ParseError::InvalidField { field: "amount", .. })
        ));
        assert!(matches!(
            Command::parse_line("1 0 -5"),
            Err(ParseError::InvalidField { field: "weight", .. })
        ));
    }

    #[test]
    fn test_script_header_and_numbering() {
        let input = "3\n3 0 0\n3 3 4\nbogus\n7 0 1\n";
        let script = Script::parse(input).unwrap();
        assert_eq!(script.declared, 3);
        assert_eq!(script.lines.len(), 3);
        assert_eq!(script.lines[0].line_no, 2);
        assert!(script.lines[1].command.is_ok());
        assert_eq!(script.lines[2].line_no, 4);
        assert!(script.lines[2].command.is_err());
    }

    #[test]
    fn test_script_shorter_than_header() {
        let script = Script::parse("5\n3 0 0\n").unwrap();
        assert_eq!(script.declared, 5);
        assert_eq!(script.lines.len(), 1);
    }

    #[test]
    fn test_script_bad_header() {
        assert_eq!(Script::parse(""), Err(ScriptError::MissingHeader));
        assert_eq!(
            Script::parse("three\n3 0 0"),
            Err(ScriptError::InvalidHeader("three".into()))
        );
    }

    #[test]
    fn test_from_commands() {
        let script = Script::from_commands([
            Command::CreatePort { x: 0.0, y: 0.0 },
            Command::Refuel {
                ship: ShipId(0),
                amount: 1.0,
            },
        ]);
        assert_eq!(script.declared, 2);
        assert_eq!(script.lines[1].line_no, 3);
    }
}
