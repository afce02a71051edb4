pub mod backlog_task;
pub mod badge;
pub mod identifier;
pub mod sprint;
pub mod user_story;
