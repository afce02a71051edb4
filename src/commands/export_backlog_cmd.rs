use crate::commands::open_store;
use crate::services::backlog_task_repository::BacklogTaskRepository;
use crate::services::backlog_yaml::serialize_backlog_to_yaml;
use crate::services::sprint_repository::SprintRepository;
use crate::services::user_story_repository::UserStoryRepository;

pub async fn run(config_path: &str, output: &str) {
    let (store, _role) = match open_store(config_path) {
        Ok(opened) => opened,
        Err(e) => {
            eprintln!("Failed to open store: {e:?}");
            return;
        }
    };

    let sprint_repo = SprintRepository::new(&store);
    let story_repo = UserStoryRepository::new(&store);
    let task_repo = BacklogTaskRepository::new(&store);

    let sprints = match sprint_repo.get_all().await {
        Ok(sprints) => sprints,
        Err(e) => {
            eprintln!("Failed to fetch sprints: {e:?}");
            return;
        }
    };
    let stories = match story_repo.get_all().await {
        Ok(stories) => stories,
        Err(e) => {
            eprintln!("Failed to fetch user stories: {e:?}");
            return;
        }
    };
    let tasks = match task_repo.get_all().await {
        Ok(tasks) => tasks,
        Err(e) => {
            eprintln!("Failed to fetch backlog tasks: {e:?}");
            return;
        }
    };

    let mut buffer = Vec::new();
    if let Err(e) = serialize_backlog_to_yaml(&mut buffer, &sprints, &stories, &tasks) {
        eprintln!("Failed to serialize backlog to YAML: {e:?}");
        return;
    }
    if let Err(e) = tokio::fs::write(&output, buffer).await {
        eprintln!("Failed to write output file: {e:?}");
    } else {
        println!("Backlog exported to {output}");
    }
}
