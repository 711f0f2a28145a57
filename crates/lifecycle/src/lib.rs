//! Production stage state machine for projects.
//!
//! A project moves through four ordered stages and may only step to an
//! immediate neighbour. Progress, the status label and the stage-content
//! panel are all derived from the current stage.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Design,
    Production,
    FinalReview,
    Complete,
}

impl Stage {
    pub const ALL: [Stage; 4] = [
        Stage::Design,
        Stage::Production,
        Stage::FinalReview,
        Stage::Complete,
    ];

    pub fn index(self) -> usize {
        match self {
            Stage::Design => 0,
            Stage::Production => 1,
            Stage::FinalReview => 2,
            Stage::Complete => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Stages reachable in one step, in stage order.
    pub fn neighbors(self) -> &'static [Stage] {
        match self {
            Stage::Design => &[Stage::Production],
            Stage::Production => &[Stage::Design, Stage::FinalReview],
            Stage::FinalReview => &[Stage::Production, Stage::Complete],
            Stage::Complete => &[Stage::FinalReview],
        }
    }

    pub fn is_adjacent(self, other: Stage) -> bool {
        self.neighbors().contains(&other)
    }

    pub fn label(self) -> &'static str {
        match self {
            Stage::Design => "설계",
            Stage::Production => "제작",
            Stage::FinalReview => "최종 검토",
            Stage::Complete => "완료",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL.into_iter().find(|stage| {
            stage.label() == raw || stage.slug().eq_ignore_ascii_case(raw)
        })
    }

    fn slug(self) -> &'static str {
        match self {
            Stage::Design => "design",
            Stage::Production => "production",
            Stage::FinalReview => "final_review",
            Stage::Complete => "complete",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Content panel rendered for the current stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StagePanel {
    Design,
    Production,
    FinalReview,
    Completion,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("cannot move from {from} to {to}: stages are not adjacent")]
    NotAdjacent { from: Stage, to: Stage },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectLifecycle {
    stage: Stage,
}

impl Default for ProjectLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectLifecycle {
    pub fn new() -> Self {
        Self {
            stage: Stage::Design,
        }
    }

    /// Restores a lifecycle at a known stage, e.g. when seeding sample data.
    pub fn at(stage: Stage) -> Self {
        Self { stage }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn enabled_transitions(&self) -> &'static [Stage] {
        self.stage.neighbors()
    }

    pub fn can_transition(&self, to: Stage) -> bool {
        self.stage.is_adjacent(to)
    }

    /// Moves to `to` and returns the previous stage.
    pub fn transition(&mut self, to: Stage) -> Result<Stage, TransitionError> {
        if !self.can_transition(to) {
            tracing::warn!(from = %self.stage, to = %to, "rejected non-adjacent stage transition");
            return Err(TransitionError::NotAdjacent {
                from: self.stage,
                to,
            });
        }

        let previous = self.stage;
        self.stage = to;
        tracing::debug!(from = %previous, to = %to, "project stage changed");
        Ok(previous)
    }

    pub fn progress_percent(&self) -> u8 {
        progress_percent(self.stage)
    }

    pub fn status_label(&self) -> &'static str {
        status_label(self.stage)
    }

    pub fn panel(&self) -> StagePanel {
        panel_for(self.stage)
    }
}

pub fn progress_percent(stage: Stage) -> u8 {
    let done = stage.index() + 1;
    (done * 100 / Stage::ALL.len()) as u8
}

pub fn status_label(stage: Stage) -> &'static str {
    match stage {
        Stage::Design => "진행중 - 설계",
        Stage::Production => "진행중 - 제작",
        Stage::FinalReview => "진행중 - 최종 검토",
        Stage::Complete => "완료",
    }
}

pub fn panel_for(stage: Stage) -> StagePanel {
    match stage {
        Stage::Design => StagePanel::Design,
        Stage::Production => StagePanel::Production,
        Stage::FinalReview => StagePanel::FinalReview,
        Stage::Complete => StagePanel::Completion,
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
