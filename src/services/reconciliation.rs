use std::collections::HashMap;

use crate::domain::identifier::DocumentId;
use crate::services::access::WriteToken;
use crate::services::backlog_task_repository::BacklogTaskRepository;
use crate::services::entity_store::StoreError;
use crate::services::sprint_repository::SprintRepository;
use crate::services::user_story_repository::UserStoryRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    pub synced: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanupReport {
    pub cleaned: usize,
}

/// Full reconciliation pass repairing drift between each sprint's story list
/// and the stories' back-references. The sprint list is authoritative: every
/// listed story whose `sprint_id` disagrees is overwritten to point at the
/// listing sprint and removed from the previously-referenced sprint's list.
///
/// Sprints are processed in `get_all` order, so a story listed by two
/// sprints ends up owned by the later one. Stories a sprint lists that no
/// longer exist are skipped. O(sprints x stories); completes fully or
/// returns the first store error.
pub async fn sync_sprint_user_stories(
    _token: &WriteToken,
    sprints: &SprintRepository<'_>,
    stories: &UserStoryRepository<'_>,
) -> Result<SyncReport, StoreError> {
    let all_sprints = sprints.get_all().await?;

    let order: Vec<DocumentId> = all_sprints
        .iter()
        .filter_map(|sprint| sprint.id.clone())
        .collect();
    let mut lists: HashMap<DocumentId, Vec<DocumentId>> = all_sprints
        .into_iter()
        .filter_map(|sprint| sprint.id.clone().map(|id| (id, sprint.user_story_ids)))
        .collect();

    let mut synced = 0usize;
    for sprint_id in &order {
        let listed = lists.get(sprint_id).cloned().unwrap_or_default();
        for story_id in listed {
            let story = match stories.get(&story_id).await {
                Ok(story) => story,
                Err(StoreError::NotFound) => continue,
                Err(err) => return Err(err),
            };

            if story.sprint_id.as_ref() == Some(sprint_id) {
                continue;
            }

            if let Some(previous_id) = story.sprint_id {
                if let Some(previous_list) = lists.get_mut(&previous_id) {
                    previous_list.retain(|id| id != &story_id);
                    let updated = previous_list.clone();
                    sprints.set_user_story_ids(&previous_id, &updated).await?;
                }
            }

            stories.set_sprint_id(&story_id, Some(sprint_id)).await?;
            synced += 1;
        }
    }

    Ok(SyncReport { synced })
}

/// Administrative sweep clearing stale sprint badges left on the stories of
/// done sprints and on every task referencing those stories. Only documents
/// whose badge is currently set are written and counted.
pub async fn cleanup_done_sprint_badges(
    _token: &WriteToken,
    sprints: &SprintRepository<'_>,
    stories: &UserStoryRepository<'_>,
    tasks: &BacklogTaskRepository<'_>,
) -> Result<CleanupReport, StoreError> {
    let all_sprints = sprints.get_all().await?;

    let mut cleaned = 0usize;
    for sprint in all_sprints.iter().filter(|sprint| sprint.is_done()) {
        for story_id in &sprint.user_story_ids {
            let story = match stories.get(story_id).await {
                Ok(story) => story,
                Err(StoreError::NotFound) => continue,
                Err(err) => return Err(err),
            };
            if story.badge.is_some() {
                stories.set_badge(story_id, None).await?;
                cleaned += 1;
            }

            for task in tasks.query_by_user_story_id(story_id).await? {
                if task.badge.is_some() {
                    let task_id = task.id.as_ref().ok_or(StoreError::Parse)?;
                    tasks.set_badge(task_id, None).await?;
                    cleaned += 1;
                }
            }
        }
    }

    Ok(CleanupReport { cleaned })
}
