use crate::commands::open_store;
use crate::domain::identifier::DocumentId;
use crate::domain::sprint::SprintStatus;
use crate::services::access::WriteToken;
use crate::services::backlog_task_repository::BacklogTaskRepository;
use crate::services::badge_sync::clear_badges_for_completed_sprint;
use crate::services::sprint_repository::SprintRepository;

pub async fn run(config_path: &str, sprint: &str) {
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
            eprintln!("Completion not permitted: {e:?}");
            return;
        }
    };

    let sprints = SprintRepository::new(&store);
    let tasks = BacklogTaskRepository::new(&store);

    let sprint_id = DocumentId::new(sprint);
    let sprint = match sprints.get(&sprint_id).await {
        Ok(sprint) => sprint,
        Err(e) => {
            eprintln!("Failed to load sprint: {e:?}");
            return;
        }
    };

    if let Err(e) = sprints.set_status(&sprint_id, SprintStatus::Done).await {
        eprintln!("Failed to mark sprint done: {e:?}");
        return;
    }

    let cleared =
        match clear_badges_for_completed_sprint(&token, &tasks, &sprint.user_story_ids).await {
            Ok(cleared) => cleared,
            Err(e) => {
                eprintln!("Failed to clear sprint badges: {e:?}");
                return;
            }
        };

    println!("Sprint {sprint_id} completed; {cleared} task badges cleared");
}
