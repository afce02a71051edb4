use crate::commands::open_store;
use crate::commands::report_format::format_sprint_report;
use crate::domain::identifier::DocumentId;
use crate::services::backlog_task_repository::BacklogTaskRepository;
use crate::services::sprint_report::build_sprint_report;
use crate::services::sprint_repository::SprintRepository;
use crate::services::user_story_repository::UserStoryRepository;

pub async fn run(config_path: &str, sprint: &str) {
    let (store, _role) = match open_store(config_path) {
        Ok(opened) => opened,
        Err(e) => {
            eprintln!("Failed to open store: {e:?}");
            return;
        }
    };

    let sprints = SprintRepository::new(&store);
    let stories = UserStoryRepository::new(&store);
    let tasks = BacklogTaskRepository::new(&store);

    let sprint_id = DocumentId::new(sprint);
    match build_sprint_report(&sprints, &stories, &tasks, &sprint_id).await {
        Ok(report) => println!("{}", format_sprint_report(&report)),
        Err(e) => eprintln!("Failed to build sprint report: {e:?}"),
    }
}
