//! # Scenario Replay
//!
//! A scenario is an initial state plus a scripted list of actions, stored as
//! JSON. Replaying one runs every action through a `Navigator` and records
//! what happened at each step, which makes it easy to check how a sequence
//! of user actions plays out without a UI attached.
//!
//! ```json
//! {
//!   "name": "deep link",
//!   "initial": { "routes": [{"key": "A"}, {"key": "B"}], "index": 1 },
//!   "actions": [ {"type": "push", "route": {"key": "C"}}, {"type": "back"} ]
//! }
//! ```

use std::fmt;
use std::fs;
use std::path::Path;

use clap::ValueEnum;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::core::action::Action;
use crate::core::navigator::Navigator;
use crate::core::route::Route;
use crate::core::state::NavigationState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: Option<String>,
    pub initial: NavigationState,
    #[serde(default)]
    pub actions: Vec<Action>,
}

/// What to do when an action is rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Halt the replay at the first rejected action
    #[default]
    Stop,
    /// Record the rejection and keep going from the unchanged state
    Skip,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One line per step plus the final stack
    #[default]
    Pretty,
    /// The full report as JSON
    Json,
    /// Counts and the focused route
    Summary,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ScenarioError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioError::Io(e) => write!(f, "scenario I/O error: {e}"),
            ScenarioError::Parse(e) => write!(f, "scenario parse error: {e}"),
        }
    }
}

impl std::error::Error for ScenarioError {}

impl Scenario {
    pub fn from_json(json: &str) -> Result<Self, ScenarioError> {
        serde_json::from_str(json).map_err(ScenarioError::Parse)
    }
}

pub fn load_scenario(path: &Path) -> Result<Scenario, ScenarioError> {
    let contents = fs::read_to_string(path).map_err(ScenarioError::Io)?;
    let scenario = Scenario::from_json(&contents)?;
    info!(
        "Loaded scenario {} ({} actions) from {}",
        scenario.name.as_deref().unwrap_or("<unnamed>"),
        scenario.actions.len(),
        path.display()
    );
    Ok(scenario)
}

// ============================================================================
// Replay
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StepOutcome {
    Applied {
        index: usize,
        focused: String,
        depth: usize,
    },
    Rejected {
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step {
    /// 1-based position in the action list.
    pub number: usize,
    pub action: &'static str,
    #[serde(flatten)]
    pub outcome: StepOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayReport {
    pub name: Option<String>,
    pub steps: Vec<Step>,
    pub final_state: NavigationState,
    /// Step number that stopped the run under `ErrorPolicy::Stop`.
    pub halted_at: Option<usize>,
}

/// Runs every action of `scenario` against its initial state.
pub fn replay(scenario: &Scenario, policy: ErrorPolicy) -> ReplayReport {
    // Replays never undo, so no history is kept.
    let mut navigator: Navigator<Route> = Navigator::new(scenario.initial.clone(), 0);
    let mut steps = Vec::with_capacity(scenario.actions.len());
    let mut halted_at = None;

    for (i, action) in scenario.actions.iter().enumerate() {
        let number = i + 1;
        let name = action.name();
        let outcome = match navigator.dispatch(action.clone()) {
            Ok(state) => StepOutcome::Applied {
                index: state.index(),
                focused: state.focused().key.clone(),
                depth: state.len(),
            },
            Err(e) => StepOutcome::Rejected {
                reason: e.to_string(),
            },
        };
        let rejected = matches!(outcome, StepOutcome::Rejected { .. });
        steps.push(Step {
            number,
            action: name,
            outcome,
        });

        if rejected && policy == ErrorPolicy::Stop {
            debug!("Replay halted at step {}", number);
            halted_at = Some(number);
            break;
        }
    }

    ReplayReport {
        name: scenario.name.clone(),
        steps,
        final_state: navigator.current().clone(),
        halted_at,
    }
}

/// Loads a scenario file and replays it.
pub fn replay_file(path: &Path, policy: ErrorPolicy) -> Result<ReplayReport, ScenarioError> {
    let scenario = load_scenario(path)?;
    Ok(replay(&scenario, policy))
}

impl ReplayReport {
    /// True when every step ran or was skipped, i.e. nothing halted the run.
    pub fn completed(&self) -> bool {
        self.halted_at.is_none()
    }

    pub fn applied(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s.outcome, StepOutcome::Applied { .. }))
            .count()
    }

    pub fn rejected(&self) -> usize {
        self.steps.len() - self.applied()
    }

    pub fn render(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Pretty => self.render_pretty(),
            OutputFormat::Json => serde_json::to_string_pretty(self)
                .unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}")),
            OutputFormat::Summary => self.render_summary(),
        }
    }

    fn render_pretty(&self) -> String {
        let mut out = String::new();
        if let Some(name) = &self.name {
            out.push_str(&format!("Scenario: {name}\n"));
        }
        for step in &self.steps {
            let line = match &step.outcome {
                StepOutcome::Applied {
                    index,
                    focused,
                    depth,
                } => format!(
                    "{:>3}. {:<18} ok    index={} depth={} focused={}",
                    step.number, step.action, index, depth, focused
                ),
                StepOutcome::Rejected { reason } => format!(
                    "{:>3}. {:<18} error {}",
                    step.number, step.action, reason
                ),
            };
            out.push_str(&line);
            out.push('\n');
        }
        if let Some(step) = self.halted_at {
            out.push_str(&format!("Halted at step {step}\n"));
        }
        out.push_str("Final stack:\n");
        for (i, route) in self.final_state.routes().iter().enumerate() {
            let marker = if i == self.final_state.index() { '*' } else { ' ' };
            out.push_str(&format!(" {marker} [{i}] {}\n", route.key));
        }
        out
    }

    fn render_summary(&self) -> String {
        format!(
            "{} applied, {} rejected{}; focused '{}' at index {} of {}",
            self.applied(),
            self.rejected(),
            if self.halted_at.is_some() { " (halted)" } else { "" },
            self.final_state.focused().key,
            self.final_state.index(),
            self.final_state.len()
        )
    }
}
