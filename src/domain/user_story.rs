use crate::domain::badge::Badge;
use crate::domain::identifier::DocumentId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "high" => Some(Priority::High),
            "medium" => Some(Priority::Medium),
            "low" => Some(Priority::Low),
            _ => None,
        }
    }
}

/// MoSCoW prioritization bucket. A story with no bucket is unprioritized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Moscow {
    MustHave,
    ShouldHave,
    CouldHave,
    WontHave,
}

impl Moscow {
    pub fn as_str(&self) -> &'static str {
        match self {
            Moscow::MustHave => "mustHave",
            Moscow::ShouldHave => "shouldHave",
            Moscow::CouldHave => "couldHave",
            Moscow::WontHave => "wontHave",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "mustHave" => Some(Moscow::MustHave),
            "shouldHave" => Some(Moscow::ShouldHave),
            "couldHave" => Some(Moscow::CouldHave),
            "wontHave" => Some(Moscow::WontHave),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserStory {
    pub id: Option<DocumentId>,
    /// Human-readable label such as `US-014`. Not guaranteed unique.
    pub code: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub acceptance_criteria: Option<String>,
    pub priority: Option<Priority>,
    pub moscow: Option<Moscow>,
    pub story_points: Option<u32>,
    /// Back-reference to the owning sprint. A story with `sprint_id = S`
    /// should appear in `Sprint(S).user_story_ids`; callers edit both sides
    /// and the reconciliation pass repairs disagreements.
    pub sprint_id: Option<DocumentId>,
    pub badge: Option<Badge>,
}

impl UserStory {
    pub fn new() -> Self {
        Self::default()
    }
}
