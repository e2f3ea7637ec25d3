//! Running command files and checking reports against expected output.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use portsim_logic::{RunStats, Rules, Script, Simulation};
use tracing::{debug, info};

/// Report and tally of one command file.
pub struct RunOutput {
    pub report: String,
    pub stats: RunStats,
}

/// Load a rules file, or the defaults when no path is given.
pub fn load_rules(path: Option<&Path>) -> Result<Rules> {
    let Some(path) = path else {
        return Ok(Rules::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading rules file {}", path.display()))?;
    let rules = Rules::from_json(&json)
        .with_context(|| format!("loading rules from {}", path.display()))?;
    debug!(?rules, "rules loaded");
    Ok(rules)
}

pub fn run_source(source: &str, rules: &Rules) -> Result<RunOutput> {
    let script = Script::parse(source)?;
    let mut sim = Simulation::new(rules.clone());
    let stats = sim.run(&script);
    Ok(RunOutput {
        report: sim.render(),
        stats,
    })
}

pub fn run_file(input: &Path, rules: &Rules) -> Result<RunOutput> {
    let source = fs::read_to_string(input)
        .with_context(|| format!("reading command file {}", input.display()))?;
    run_source(&source, rules).with_context(|| format!("running {}", input.display()))
}

// ── Comparison ──────────────────────────────────────────────────────────

/// A difference between an actual and an expected report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mismatch {
    LineCount {
        actual: usize,
        expected: usize,
    },
    Line {
        /// 1-based.
        line_no: usize,
        expected: String,
        actual: String,
    },
}

/// Compare line by line. Differing line counts are reported alone, without
/// per-line differences.
pub fn compare_reports(actual: &str, expected: &str) -> Vec<Mismatch> {
    let actual: Vec<&str> = actual.lines().collect();
    let expected: Vec<&str> = expected.lines().collect();
    if actual.len() != expected.len() {
        return vec![Mismatch::LineCount {
            actual: actual.len(),
            expected: expected.len(),
        }];
    }
    actual
        .iter()
        .zip(&expected)
        .enumerate()
        .filter(|(_, (a, e))| a != e)
        .map(|(idx, (a, e))| Mismatch::Line {
            line_no: idx + 1,
            expected: e.to_string(),
            actual: a.to_string(),
        })
        .collect()
}

pub fn print_mismatches(actual: &Path, expected: &Path, mismatches: &[Mismatch]) {
    for m in mismatches {
        match m {
            Mismatch::LineCount {
                actual: a,
                expected: e,
            } => println!(
                "Difference found in {} and {}: Number of lines are different ({} vs {}).",
                actual.display(),
                expected.display(),
                a,
                e
            ),
            Mismatch::Line {
                line_no,
                expected: e,
                actual: a,
            } => {
                println!(
                    "Difference found in {} and {} at line {}:",
                    actual.display(),
                    expected.display(),
                    line_no
                );
                println!("Expected: {}", e);
                println!("Actual:   {}", a);
            }
        }
    }
}

// ── Fixture suite ───────────────────────────────────────────────────────

/// Outcome of one fixture case.
pub struct CaseResult {
    pub index: u32,
    pub passed: bool,
    pub detail: String,
}

/// Numbered `input_<i>.txt` files in `dir`, by ascending index.
pub fn discover_cases(dir: &Path) -> Result<Vec<(u32, PathBuf)>> {
    let mut cases = Vec::new();
    let entries =
        fs::read_dir(dir).with_context(|| format!("reading fixture dir {}", dir.display()))?;
    for entry in entries {
        let path = entry?.path();
        let index = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.strip_prefix("input_"))
            .and_then(|n| n.strip_suffix(".txt"))
            .and_then(|n| n.parse::<u32>().ok());
        if let Some(index) = index {
            cases.push((index, path));
        }
    }
    cases.sort_by_key(|(index, _)| *index);
    Ok(cases)
}

/// Rules for one case: `rules_<i>.json` when present, else `default`.
pub fn case_rules(dir: &Path, index: u32, default: &Rules) -> Result<Rules> {
    let path = dir.join(format!("rules_{index}.json"));
    if path.is_file() {
        load_rules(Some(path.as_path()))
    } else {
        Ok(default.clone())
    }
}

/// Run one case: write `output_<i>.txt` next to the input and compare it
/// with `expected_output_<i>.txt`.
pub fn run_case(dir: &Path, index: u32, input: &Path, rules: &Rules) -> Result<CaseResult> {
    let output_path = dir.join(format!("output_{index}.txt"));
    let expected_path = dir.join(format!("expected_output_{index}.txt"));

    let rules = case_rules(dir, index, rules)?;
    let run = run_file(input, &rules)?;
    fs::write(&output_path, &run.report)
        .with_context(|| format!("writing {}", output_path.display()))?;

    let expected = match fs::read_to_string(&expected_path) {
        Ok(text) => text,
        Err(e) => {
            return Ok(CaseResult {
                index,
                passed: false,
                detail: format!("cannot read {}: {}", expected_path.display(), e),
            })
        }
    };

    let mismatches = compare_reports(&run.report, &expected);
    print_mismatches(&output_path, &expected_path, &mismatches);
    info!(
        case = index,
        applied = run.stats.applied,
        declined = run.stats.declined,
        skipped = run.stats.skipped,
        "case finished"
    );
    Ok(CaseResult {
        index,
        passed: mismatches.is_empty(),
        detail: if mismatches.is_empty() {
            format!("{} commands", run.stats.total())
        } else {
            format!("{} difference(s)", mismatches.len())
        },
    })
}
