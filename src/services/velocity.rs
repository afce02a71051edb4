use std::collections::HashSet;

use crate::domain::backlog_task::{BacklogTask, TaskStatus};
use crate::domain::sprint::Sprint;

/// Sprint velocity: the sum of story points of tasks marked done that are
/// attached to one of the sprint's stories. Advisory only; a task shared by
/// two of the sprint's stories is counted once.
pub fn calculate_sprint_velocity(sprint: &Sprint, tasks: &[BacklogTask]) -> u32 {
    let listed: HashSet<&str> = sprint
        .user_story_ids
        .iter()
        .map(|id| id.as_str())
        .collect();

    tasks
        .iter()
        .filter(|task| task.status == TaskStatus::Done)
        .filter(|task| {
            task.user_story_ids
                .iter()
                .any(|id| listed.contains(id.as_str()))
        })
        .filter_map(|task| task.story_points)
        .sum()
}
