use chrono::NaiveDate;

use crate::domain::identifier::DocumentId;

/// Lifecycle of a sprint: `planned -> active -> done`. The transition into
/// `Done` is the only trigger for badge clearing; assignment changes are the
/// only trigger for badge setting and task synthesis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SprintStatus {
    #[default]
    Planned,
    Active,
    Done,
}

impl SprintStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SprintStatus::Planned => "planned",
            SprintStatus::Active => "active",
            SprintStatus::Done => "done",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "planned" => Some(SprintStatus::Planned),
            "active" => Some(SprintStatus::Active),
            "done" => Some(SprintStatus::Done),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sprint {
    pub id: Option<DocumentId>,
    pub title: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Ordered list of user stories currently assigned to this sprint.
    /// Uniqueness across sprints is not guaranteed by the store; the
    /// reconciliation pass repairs drift.
    pub user_story_ids: Vec<DocumentId>,
    pub status: SprintStatus,
    /// Advisory only. Computed by the report service, never written back.
    pub velocity: Option<f32>,
}

impl Sprint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.status == SprintStatus::Active
    }

    pub fn is_done(&self) -> bool {
        self.status == SprintStatus::Done
    }
}
