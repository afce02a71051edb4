use crate::services::sprint_report::SprintReport;

pub fn format_sprint_report(report: &SprintReport) -> String {
    let title = match &report.title {
        Some(value) => value.clone(),
        None => "n/a".to_string(),
    };

    let mut lines = Vec::new();
    lines.push("Sprint Report".to_string());
    lines.push(format!("Sprint: {} ({})", title, report.sprint_id));
    lines.push(format!("Status: {}", report.status));
    lines.push(format!("Stories listed: {}", report.stories_listed));
    lines.push(format!("Stories linked: {}", report.stories_linked));
    lines.push(format!("Stories badged: {}", report.stories_badged));
    lines.push(format!(
        "Tasks: {} ({} done)",
        report.tasks_total, report.tasks_done
    ));
    lines.push(format!("Velocity: {}", report.velocity));
    lines.push(String::new());
    lines.push("MoSCoW backlog:".to_string());
    lines.push("Bucket | Stories".to_string());
    lines.push("-------|--------".to_string());
    lines.push(format!("Must have | {}", report.moscow.must_have));
    lines.push(format!("Should have | {}", report.moscow.should_have));
    lines.push(format!("Could have | {}", report.moscow.could_have));
    lines.push(format!("Won't have | {}", report.moscow.wont_have));

    lines.join("\n")
}
