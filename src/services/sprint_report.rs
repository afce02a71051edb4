use std::collections::HashSet;

use crate::domain::backlog_task::{BacklogTask, TaskStatus};
use crate::domain::identifier::DocumentId;
use crate::domain::user_story::Moscow;
use crate::services::backlog_task_repository::BacklogTaskRepository;
use crate::services::entity_store::StoreError;
use crate::services::sprint_repository::SprintRepository;
use crate::services::user_story_repository::UserStoryRepository;
use crate::services::velocity::calculate_sprint_velocity;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoscowBreakdown {
    pub must_have: usize,
    pub should_have: usize,
    pub could_have: usize,
    pub wont_have: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SprintReport {
    pub sprint_id: String,
    pub title: Option<String>,
    pub status: String,
    /// Stories the sprint lists in `user_story_ids`.
    pub stories_listed: usize,
    /// Stories whose `sprint_id` back-reference points at the sprint. A
    /// mismatch with `stories_listed` is drift the sync pass repairs.
    pub stories_linked: usize,
    pub stories_badged: usize,
    pub tasks_total: usize,
    pub tasks_done: usize,
    pub velocity: u32,
    pub moscow: MoscowBreakdown,
}

pub async fn build_sprint_report(
    sprints: &SprintRepository<'_>,
    stories: &UserStoryRepository<'_>,
    tasks: &BacklogTaskRepository<'_>,
    sprint_id: &DocumentId,
) -> Result<SprintReport, StoreError> {
    let sprint = sprints.get(sprint_id).await?;

    let mut stories_badged = 0usize;
    let mut sprint_tasks: Vec<BacklogTask> = Vec::new();
    let mut seen_tasks: HashSet<String> = HashSet::new();
    for story_id in &sprint.user_story_ids {
        match stories.get(story_id).await {
            Ok(story) => {
                if story.badge.is_some() {
                    stories_badged += 1;
                }
            }
            Err(StoreError::NotFound) => continue,
            Err(err) => return Err(err),
        }

        for task in tasks.query_by_user_story_id(story_id).await? {
            let Some(task_id) = task.id.as_ref() else {
                continue;
            };
            if seen_tasks.insert(task_id.as_str().to_string()) {
                sprint_tasks.push(task);
            }
        }
    }

    let stories_linked = stories.query_by_sprint_id(sprint_id).await?.len();
    let tasks_done = sprint_tasks
        .iter()
        .filter(|task| task.status == TaskStatus::Done)
        .count();
    let velocity = calculate_sprint_velocity(&sprint, &sprint_tasks);

    let moscow = MoscowBreakdown {
        must_have: stories.query_by_moscow(Moscow::MustHave).await?.len(),
        should_have: stories.query_by_moscow(Moscow::ShouldHave).await?.len(),
        could_have: stories.query_by_moscow(Moscow::CouldHave).await?.len(),
        wont_have: stories.query_by_moscow(Moscow::WontHave).await?.len(),
    };

    Ok(SprintReport {
        sprint_id: sprint_id.as_str().to_string(),
        title: sprint.title.clone(),
        status: sprint.status.as_str().to_string(),
        stories_listed: sprint.user_story_ids.len(),
        stories_linked,
        stories_badged,
        tasks_total: sprint_tasks.len(),
        tasks_done,
        velocity,
        moscow,
    })
}
