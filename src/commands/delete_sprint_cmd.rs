use crate::commands::open_store;
use crate::domain::identifier::DocumentId;
use crate::services::access::WriteToken;
use crate::services::sprint_repository::SprintRepository;
use crate::services::user_story_repository::UserStoryRepository;

pub async fn run(config_path: &str, sprint: &str) {
    let (store, role) = match open_store(config_path) {
        Ok(opened) => opened,
        Err(e) => {
            eprintln!("Failed to open store: {e:?}");
            return;
        }
    };
    if let Err(e) = WriteToken::for_role(role) {
        eprintln!("Deletion not permitted: {e:?}");
        return;
    }

    let sprints = SprintRepository::new(&store);
    let stories = UserStoryRepository::new(&store);

    let sprint_id = DocumentId::new(sprint);
    // Every story referencing the sprint loses its back-reference before
    // the sprint document goes away.
    let referencing = match stories.query_by_sprint_id(&sprint_id).await {
        Ok(referencing) => referencing,
        Err(e) => {
            eprintln!("Failed to query sprint stories: {e:?}");
            return;
        }
    };
    let mut detached = 0usize;
    for story in &referencing {
        let Some(story_id) = story.id.as_ref() else {
            continue;
        };
        if let Err(e) = stories.set_sprint_id(story_id, None).await {
            eprintln!("Failed to detach user story {story_id}: {e:?}");
            return;
        }
        detached += 1;
    }

    if let Err(e) = sprints.delete(&sprint_id).await {
        eprintln!("Failed to delete sprint: {e:?}");
        return;
    }

    println!("Sprint {sprint_id} deleted; {detached} user stories detached");
}
