//! Stage progress projection
//!
//! Turns the flat stage list of one application into what the applicant
//! sees: which stages are shown, how each is styled, and which announcement
//! is current. The boundary between evaluated and pending stages is inferred
//! from the data; no external cursor is needed.

use serde::Serialize;
use crate::models::{Outcome, Stage};

/// Message shown in place of any stage-supplied announcement once the
/// applicant fails a stage
pub const REJECTION_MESSAGE: &str = "Mohon maaf, Anda dinyatakan tidak lolos pada tahap seleksi ini. \
Terima kasih atas partisipasi Anda dalam proses rekrutmen.";

pub const PASSED_LABEL: &str = "Lolos";
pub const FAILED_LABEL: &str = "Tidak Lolos";

/// Visual treatment of a shown stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualState {
    Neutral,
    Success,
    Failure,
}

impl VisualState {
    fn for_outcome(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Pending => VisualState::Neutral,
            Outcome::Passed => VisualState::Success,
            Outcome::Failed => VisualState::Failure,
        }
    }
}

fn badge_for(outcome: Outcome) -> Option<&'static str> {
    match outcome {
        Outcome::Pending => None,
        Outcome::Passed => Some(PASSED_LABEL),
        Outcome::Failed => Some(FAILED_LABEL),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisibleStage {
    pub id: String,
    pub name: String,
    pub description: String,
    pub visual_state: VisualState,
    pub badge_label: Option<&'static str>,
    /// 1-based position in the displayed list
    pub ordinal: usize,
}

/// The announcement attached to the most recently evaluated stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Announcement {
    /// Stage passed: the stage's own announcement text
    Stage {
        stage_id: String,
        title: Option<String>,
        body: Option<String>,
    },
    /// Stage failed: fixed rejection text
    Rejected {
        stage_id: String,
        message: &'static str,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectedView {
    pub visible_stages: Vec<VisibleStage>,
    pub announcement: Option<Announcement>,
}

impl ProjectedView {
    pub fn is_empty(&self) -> bool {
        self.visible_stages.is_empty() && self.announcement.is_none()
    }
}

/// Order stages by `sort_order` without touching the caller's slice.
/// Ties keep their input order.
pub fn ordered(stages: &[Stage]) -> Vec<&Stage> {
    let mut ordered: Vec<&Stage> = stages.iter().collect();
    ordered.sort_by_key(|s| s.sort_order);
    ordered
}

/// Project a stage list into the applicant's view
///
/// A stage is shown when it has been evaluated, when it is the first stage
/// after the last evaluated one, or when the stage right before it passed.
/// Non-contiguous evaluations can therefore show stages past the boundary.
pub fn project(stages: &[Stage]) -> ProjectedView {
    let ordered = ordered(stages);

    let last_evaluated = ordered.iter().rposition(|s| s.outcome.is_evaluated());
    let up_next = last_evaluated.map_or(0, |i| i + 1);

    let visible_stages = ordered
        .iter()
        .enumerate()
        .filter(|&(i, stage)| {
            stage.outcome.is_evaluated()
                || i == up_next
                || (i > 0 && ordered[i - 1].outcome == Outcome::Passed)
        })
        .enumerate()
        .map(|(shown, (_, stage))| VisibleStage {
            id: stage.id.clone(),
            name: stage.name.clone(),
            description: stage.description.clone(),
            visual_state: VisualState::for_outcome(stage.outcome),
            badge_label: badge_for(stage.outcome),
            ordinal: shown + 1,
        })
        .collect();

    let announcement = last_evaluated.and_then(|i| {
        let stage = ordered[i];
        match stage.outcome {
            Outcome::Passed => Some(Announcement::Stage {
                stage_id: stage.id.clone(),
                title: stage.announcement_title.clone(),
                body: stage.announcement_body.clone(),
            }),
            Outcome::Failed => Some(Announcement::Rejected {
                stage_id: stage.id.clone(),
                message: REJECTION_MESSAGE,
            }),
            Outcome::Pending => None,
        }
    });

    ProjectedView {
        visible_stages,
        announcement,
    }
}
