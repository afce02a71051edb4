use crate::commands::open_store;
use crate::services::access::WriteToken;
use crate::services::backlog_task_repository::BacklogTaskRepository;
use crate::services::reconciliation::cleanup_done_sprint_badges;
use crate::services::sprint_repository::SprintRepository;
use crate::services::user_story_repository::UserStoryRepository;

pub async fn run(config_path: &str) {
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
            eprintln!("Cleanup not permitted: {e:?}");
            return;
        }
    };

    let sprints = SprintRepository::new(&store);
    let stories = UserStoryRepository::new(&store);
    let tasks = BacklogTaskRepository::new(&store);

    match cleanup_done_sprint_badges(&token, &sprints, &stories, &tasks).await {
        Ok(report) => println!("{} badges cleaned", report.cleaned),
        Err(e) => eprintln!("Failed to clean badges: {e:?}"),
    }
}
