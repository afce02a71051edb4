use std::io::{self, Write};

use serde::Serialize;
use thiserror::Error;

use crate::domain::backlog_task::BacklogTask;
use crate::domain::sprint::Sprint;
use crate::domain::user_story::UserStory;

#[derive(Error, Debug)]
pub enum BacklogYamlError {
    #[error("failed to write backlog yaml: {0}")]
    Io(#[from] io::Error),
    #[error("failed to serialize backlog yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Serialize)]
struct BacklogRecord {
    sprints: Vec<SprintRecord>,
    user_stories: Vec<UserStoryRecord>,
    backlog_tasks: Vec<TaskRecord>,
}

#[derive(Serialize)]
struct SprintRecord {
    id: Option<String>,
    title: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
    status: String,
    user_story_ids: Vec<String>,
    velocity: Option<f32>,
}

#[derive(Serialize)]
struct UserStoryRecord {
    id: Option<String>,
    code: Option<String>,
    title: Option<String>,
    description: Option<String>,
    acceptance_criteria: Option<String>,
    priority: Option<String>,
    moscow: Option<String>,
    story_points: Option<u32>,
    sprint_id: Option<String>,
    badge: Option<String>,
}

#[derive(Serialize)]
struct TaskRecord {
    id: Option<String>,
    title: Option<String>,
    description: Option<String>,
    priority: Option<String>,
    story_points: Option<u32>,
    status: String,
    user_story_ids: Vec<String>,
    badge: Option<String>,
}

pub fn serialize_backlog_to_yaml<W: Write>(
    writer: &mut W,
    sprints: &[Sprint],
    stories: &[UserStory],
    tasks: &[BacklogTask],
) -> Result<(), BacklogYamlError> {
    let record = BacklogRecord {
        sprints: sprints.iter().map(sprint_to_record).collect(),
        user_stories: stories.iter().map(story_to_record).collect(),
        backlog_tasks: tasks.iter().map(task_to_record).collect(),
    };

    let yaml = serde_yaml::to_string(&record)?;
    writer.write_all(yaml.as_bytes())?;
    Ok(())
}

fn sprint_to_record(sprint: &Sprint) -> SprintRecord {
    SprintRecord {
        id: sprint.id.as_ref().map(|id| id.as_str().to_string()),
        title: sprint.title.clone(),
        start_date: sprint
            .start_date
            .map(|date| date.format("%Y-%m-%d").to_string()),
        end_date: sprint
            .end_date
            .map(|date| date.format("%Y-%m-%d").to_string()),
        status: sprint.status.as_str().to_string(),
        user_story_ids: sprint
            .user_story_ids
            .iter()
            .map(|id| id.as_str().to_string())
            .collect(),
        velocity: sprint.velocity,
    }
}

fn story_to_record(story: &UserStory) -> UserStoryRecord {
    UserStoryRecord {
        id: story.id.as_ref().map(|id| id.as_str().to_string()),
        code: story.code.clone(),
        title: story.title.clone(),
        description: story.description.clone(),
        acceptance_criteria: story.acceptance_criteria.clone(),
        priority: story.priority.map(|value| value.as_str().to_string()),
        moscow: story.moscow.map(|value| value.as_str().to_string()),
        story_points: story.story_points,
        sprint_id: story.sprint_id.as_ref().map(|id| id.as_str().to_string()),
        badge: story.badge.map(|value| value.as_str().to_string()),
    }
}

fn task_to_record(task: &BacklogTask) -> TaskRecord {
    TaskRecord {
        id: task.id.as_ref().map(|id| id.as_str().to_string()),
        title: task.title.clone(),
        description: task.description.clone(),
        priority: task.priority.map(|value| value.as_str().to_string()),
        story_points: task.story_points,
        status: task.status.as_str().to_string(),
        user_story_ids: task
            .user_story_ids
            .iter()
            .map(|id| id.as_str().to_string())
            .collect(),
        badge: task.badge.map(|value| value.as_str().to_string()),
    }
}
