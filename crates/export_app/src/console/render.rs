use std::fmt::Write;

use chrono::Local;
use export_core::{AppViewModel, FormField, NoticeLevel, Notification, OperationKind};

const TAGS_WIDTH: usize = 30;

pub fn help() -> &'static str {
    "Commands: division <1-4> | index <letter> | days <n> | preview | download | \
     confirm | cancel | dismiss | show | help | quit"
}

pub fn render(view: &AppViewModel) -> String {
    let status = match view.operation {
        OperationKind::Idle => "Idle",
        OperationKind::Previewing => "Loading preview...",
        OperationKind::AwaitingConfirmation => "Awaiting confirmation",
        OperationKind::Downloading => "Preparing your CSV file. Please wait...",
    };

    let mut out = String::new();
    let _ = writeln!(
        out,
        "Division: {} | Index: {}{} | Days: {}{} | File: {}",
        view.division,
        view.index_input,
        field_marker(view, FormField::Index),
        view.days_input,
        field_marker(view, FormField::Days),
        view.file_name_hint
    );
    let _ = writeln!(out, "Status: {status}");

    if let Some(error) = &view.error_text {
        let _ = writeln!(out, "Error: {error}");
    }
    if view.long_running_warning {
        let _ = writeln!(
            out,
            "This is taking longer than usual; the service may be waking up."
        );
    }
    if let Some(pending) = &view.pending_confirmation {
        let _ = writeln!(
            out,
            "Download {} ({} days back)? Type confirm or cancel.",
            pending.file_name,
            pending.params.lookback_days()
        );
    }
    if view.success_notice {
        let _ = writeln!(out, "Your CSV file has been downloaded. Type dismiss to hide.");
    }

    if view.operation == OperationKind::Idle && view.error_text.is_none() {
        if view.preview_rows.is_empty() {
            let _ = writeln!(out, "No preview rows.");
        } else {
            let _ = writeln!(out, "Preview ({} rows):", view.preview_rows.len());
            for row in &view.preview_rows {
                let _ = writeln!(
                    out,
                    "  {} | {} | {} | {} | {}",
                    row.contest_name,
                    row.problem_name,
                    row.rating,
                    truncate(&row.tags, TAGS_WIDTH),
                    row.link
                );
            }
        }
    }
    out.trim_end().to_string()
}

pub fn notification(notification: &Notification) -> String {
    let level = match notification.level {
        NoticeLevel::Info => "info",
        NoticeLevel::Success => "ok",
        NoticeLevel::Error => "error",
    };
    format!(
        "[{} {}] {}",
        Local::now().format("%H:%M:%S"),
        level,
        notification.text
    )
}

fn field_marker(view: &AppViewModel, field: FormField) -> &'static str {
    if view.error_field == Some(field) {
        " (!)"
    } else {
        ""
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let cut: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use export_core::{update, AppState, Msg, PreviewRow};

    #[test]
    fn validation_error_marks_the_field() {
        let (state, _) = update(AppState::new(), Msg::IndexEdited("AB".to_string()));
        let (state, _) = update(state, Msg::PreviewClicked);
        let text = render(&state.view());
        assert!(text.contains("Index: AB (!)"));
        assert!(text.contains("Error: Index must be a single letter like A, B, C"));
    }

    #[test]
    fn idle_view_lists_rows() {
        let view = AppViewModel {
            preview_rows: vec![PreviewRow {
                contest_name: "Round 1".to_string(),
                problem_name: "Sum".to_string(),
                rating: "800".to_string(),
                tags: "brute force, constructive algorithms, math".to_string(),
                link: "https://codeforces.com/contest/1/problem/A".to_string(),
            }],
            ..AppViewModel::default()
        };
        let text = render(&view);
        assert!(text.contains("Preview (1 rows):"));
        assert!(text.contains("brute force, constructive a..."));
    }

    #[test]
    fn notification_shows_level_and_text() {
        let line = notification(&Notification::error("boom"));
        assert!(line.ends_with("error] boom"));
    }
}
