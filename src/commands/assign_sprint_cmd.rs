use crate::commands::open_store;
use crate::domain::identifier::DocumentId;
use crate::services::access::WriteToken;
use crate::services::backlog_task_repository::BacklogTaskRepository;
use crate::services::badge_sync::apply_sprint_assignment;
use crate::services::sprint_repository::SprintRepository;
use crate::services::user_story_repository::UserStoryRepository;

pub async fn run(config_path: &str, sprint: &str, story_ids: &[String]) {
    let (store, role) = match open_store(config_path) {
        Ok(opened) => opened,
        Err(e) => {
            eprintln!("Failed to open store: {e:?}");
            return;
        }
    };
    let token = match WriteToken::for_role(role) {
        Ok(token) => token,
        Err(e) => {
            eprintln!("Assignment not permitted: {e:?}");
            return;
        }
    };

    let sprints = SprintRepository::new(&store);
    let stories = UserStoryRepository::new(&store);
    let tasks = BacklogTaskRepository::new(&store);

    let sprint_id = DocumentId::new(sprint);
    let previous = match sprints.get(&sprint_id).await {
        Ok(sprint) => sprint,
        Err(e) => {
            eprintln!("Failed to load sprint: {e:?}");
            return;
        }
    };
    let assigned: Vec<DocumentId> = story_ids.iter().map(DocumentId::new).collect();

    if let Err(e) = sprints.set_user_story_ids(&sprint_id, &assigned).await {
        eprintln!("Failed to update sprint story list: {e:?}");
        return;
    }

    // Both sides of the reference are edited here; the store offers no
    // cross-document transaction, so sync-stories repairs any drift.
    for story_id in &previous.user_story_ids {
        if assigned.contains(story_id) {
            continue;
        }
        if let Err(e) = stories.set_sprint_id(story_id, None).await {
            eprintln!("Failed to detach user story {story_id}: {e:?}");
            return;
        }
    }
    for story_id in &assigned {
        if let Err(e) = stories.set_sprint_id(story_id, Some(&sprint_id)).await {
            eprintln!("Failed to attach user story {story_id}: {e:?}");
            return;
        }
    }

    let outcome = match apply_sprint_assignment(&token, &stories, &tasks, &assigned).await {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("Failed to refresh sprint badges: {e:?}");
            return;
        }
    };

    println!(
        "Assigned {} user stories to sprint {sprint_id}",
        assigned.len()
    );
    println!(
        "{} stories badged, {} tasks badged, {} tasks created",
        outcome.stories_badged, outcome.tasks_badged, outcome.tasks_created
    );
}
