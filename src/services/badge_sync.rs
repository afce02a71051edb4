use futures::future::join_all;
use thiserror::Error;

use crate::domain::backlog_task::{BacklogTask, TaskStatus};
use crate::domain::badge::Badge;
use crate::domain::identifier::DocumentId;
use crate::domain::user_story::{Priority, UserStory};
use crate::services::access::WriteToken;
use crate::services::backlog_task_repository::BacklogTaskRepository;
use crate::services::entity_store::StoreError;
use crate::services::user_story_repository::UserStoryRepository;

/// Story points given to a synthesized task when its story has no estimate.
pub const DEFAULT_TASK_POINTS: u32 = 3;

#[derive(Error, Debug)]
pub enum BadgeSyncError {
    /// One or more per-story pipelines failed. Writes that already landed
    /// are not rolled back; the data model may be left partially updated.
    #[error("{failed} of {total} story updates failed: {first}")]
    Partial {
        failed: usize,
        total: usize,
        first: StoreError,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssignmentOutcome {
    pub stories_badged: usize,
    pub tasks_badged: usize,
    pub tasks_created: usize,
}

/// Stamps the sprint badge on every given user story and on every task
/// referencing one of them, synthesizing a default task for stories that
/// have none. Invoked right after a sprint is created or edited with a new
/// story set.
///
/// Per-story pipelines run concurrently with no ordering between story ids;
/// within one story the badge write, the task query and the task writes are
/// sequenced. Story ids operate on disjoint task queries, so two stories in
/// the same call never observe each other's synthesized task.
pub async fn apply_sprint_assignment(
    _token: &WriteToken,
    stories: &UserStoryRepository<'_>,
    tasks: &BacklogTaskRepository<'_>,
    story_ids: &[DocumentId],
) -> Result<AssignmentOutcome, BadgeSyncError> {
    let pipelines = story_ids
        .iter()
        .map(|story_id| badge_single_story(stories, tasks, story_id));
    let results = join_all(pipelines).await;

    let total = results.len();
    let mut outcome = AssignmentOutcome::default();
    let mut failed = 0usize;
    let mut first_error: Option<StoreError> = None;
    for result in results {
        match result {
            Ok(delta) => {
                outcome.stories_badged += delta.stories_badged;
                outcome.tasks_badged += delta.tasks_badged;
                outcome.tasks_created += delta.tasks_created;
            }
            Err(err) => {
                failed += 1;
                if first_error.is_none() {
                    first_error = Some(err);
                }
            }
        }
    }

    match first_error {
        Some(first) => Err(BadgeSyncError::Partial {
            failed,
            total,
            first,
        }),
        None => Ok(outcome),
    }
}

async fn badge_single_story(
    stories: &UserStoryRepository<'_>,
    tasks: &BacklogTaskRepository<'_>,
    story_id: &DocumentId,
) -> Result<AssignmentOutcome, StoreError> {
    let story = stories.get(story_id).await?;

    // Always issued, even when the badge is already set.
    stories.set_badge(story_id, Some(Badge::Sprint)).await?;

    // The existence check uses the task list fetched before any synthesis
    // in this pass.
    let existing = tasks.query_by_user_story_id(story_id).await?;

    let mut delta = AssignmentOutcome {
        stories_badged: 1,
        ..AssignmentOutcome::default()
    };
    if existing.is_empty() {
        tasks.create(&default_task_for(&story, story_id)).await?;
        delta.tasks_created = 1;
    } else {
        for task in &existing {
            let task_id = task.id.as_ref().ok_or(StoreError::Parse)?;
            tasks.set_badge(task_id, Some(Badge::Sprint)).await?;
            delta.tasks_badged += 1;
        }
    }
    Ok(delta)
}

pub(crate) fn default_task_for(story: &UserStory, story_id: &DocumentId) -> BacklogTask {
    let story_title = story
        .title
        .clone()
        .unwrap_or_else(|| story_id.to_string());

    let mut task = BacklogTask::new();
    task.title = Some(format!("Implement: {story_title}"));
    task.description = Some(format!(
        "Auto-created task for user story \"{story_title}\"."
    ));
    task.priority = Some(story.priority.unwrap_or(Priority::Medium));
    task.story_points = Some(story.story_points.unwrap_or(DEFAULT_TASK_POINTS));
    task.status = TaskStatus::Todo;
    task.user_story_ids = vec![story_id.clone()];
    task.badge = Some(Badge::Sprint);
    task
}

/// Clears the sprint badge from every task referencing one of the given
/// stories. Invoked when the owning sprint transitions to done.
///
/// Clearing is per-story: a task also linked to a story in a still-open
/// sprint loses its badge too, and a task linked to two of the given
/// stories is written (and counted) once per story.
pub async fn clear_badges_for_completed_sprint(
    _token: &WriteToken,
    tasks: &BacklogTaskRepository<'_>,
    story_ids: &[DocumentId],
) -> Result<usize, BadgeSyncError> {
    let passes = story_ids
        .iter()
        .map(|story_id| clear_tasks_for_story(tasks, story_id));
    let results = join_all(passes).await;

    let total = results.len();
    let mut cleared = 0usize;
    let mut failed = 0usize;
    let mut first_error: Option<StoreError> = None;
    for result in results {
        match result {
            Ok(count) => cleared += count,
            Err(err) => {
                failed += 1;
                if first_error.is_none() {
                    first_error = Some(err);
                }
            }
        }
    }

    match first_error {
        Some(first) => Err(BadgeSyncError::Partial {
            failed,
            total,
            first,
        }),
        None => Ok(cleared),
    }
}

async fn clear_tasks_for_story(
    tasks: &BacklogTaskRepository<'_>,
    story_id: &DocumentId,
) -> Result<usize, StoreError> {
    let linked = tasks.query_by_user_story_id(story_id).await?;
    let mut cleared = 0usize;
    for task in &linked {
        let task_id = task.id.as_ref().ok_or(StoreError::Parse)?;
        tasks.set_badge(task_id, None).await?;
        cleared += 1;
    }
    Ok(cleared)
}
