use crate::domain::badge::Badge;
use crate::domain::identifier::DocumentId;
use crate::domain::user_story::Priority;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    InTesting,
    Done,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::InTesting => "in-testing",
            TaskStatus::Done => "done",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "todo" => Some(TaskStatus::Todo),
            "in-progress" => Some(TaskStatus::InProgress),
            "in-testing" => Some(TaskStatus::InTesting),
            "done" => Some(TaskStatus::Done),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BacklogTask {
    pub id: Option<DocumentId>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub story_points: Option<u32>,
    pub status: TaskStatus,
    /// A task may implement more than one user story.
    pub user_story_ids: Vec<DocumentId>,
    pub badge: Option<Badge>,
}

impl BacklogTask {
    pub fn new() -> Self {
        Self::default()
    }
}
