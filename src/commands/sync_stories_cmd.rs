use crate::commands::open_store;
use crate::services::access::WriteToken;
use crate::services::reconciliation::sync_sprint_user_stories;
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
            eprintln!("Sync not permitted: {e:?}");
            return;
        }
    };

    let sprints = SprintRepository::new(&store);
    let stories = UserStoryRepository::new(&store);

    match sync_sprint_user_stories(&token, &sprints, &stories).await {
        Ok(report) => println!("{} user stories synced", report.synced),
        Err(e) => eprintln!("Failed to sync user stories: {e:?}"),
    }
}
