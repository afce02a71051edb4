use chrono::NaiveDate;

use crate::commands::open_store;
use crate::domain::identifier::DocumentId;
use crate::domain::sprint::Sprint;
use crate::services::access::WriteToken;
use crate::services::backlog_task_repository::BacklogTaskRepository;
use crate::services::badge_sync::apply_sprint_assignment;
use crate::services::sprint_repository::SprintRepository;
use crate::services::user_story_repository::UserStoryRepository;

pub async fn run(config_path: &str, title: &str, start: &str, end: &str, story_ids: &[String]) {
    // Form-level validation happens here at the edge, before anything
    // reaches the repositories.
    let title = title.trim();
    if title.len() < 3 || title.len() > 100 {
        eprintln!("Sprint title must be between 3 and 100 characters");
        return;
    }
    let start_date = match NaiveDate::parse_from_str(start, "%Y-%m-%d") {
        Ok(date) => date,
        Err(_) => {
            eprintln!("Invalid start date: {start}");
            return;
        }
    };
    let end_date = match NaiveDate::parse_from_str(end, "%Y-%m-%d") {
        Ok(date) => date,
        Err(_) => {
            eprintln!("Invalid end date: {end}");
            return;
        }
    };
    if end_date < start_date {
        eprintln!("Sprint end date must not be before its start date");
        return;
    }

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
            eprintln!("Sprint creation not permitted: {e:?}");
            return;
        }
    };

    let sprints = SprintRepository::new(&store);
    let stories = UserStoryRepository::new(&store);
    let tasks = BacklogTaskRepository::new(&store);

    let assigned: Vec<DocumentId> = story_ids.iter().map(DocumentId::new).collect();
    let mut sprint = Sprint::new();
    sprint.title = Some(title.to_string());
    sprint.start_date = Some(start_date);
    sprint.end_date = Some(end_date);
    sprint.user_story_ids = assigned.clone();

    let sprint_id = match sprints.create(&sprint).await {
        Ok(id) => id,
        Err(e) => {
            eprintln!("Failed to create sprint: {e:?}");
            return;
        }
    };

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

    println!("Sprint {sprint_id} created with {} user stories", assigned.len());
    println!(
        "{} stories badged, {} tasks badged, {} tasks created",
        outcome.stories_badged, outcome.tasks_badged, outcome.tasks_created
    );
}
