// Output formatting utilities

use chrono::NaiveDate;
use serde_json::{Map, Value};
use std::io::IsTerminal;
use crate::models::{ApplicantContext, ApplicationSummary, JobPosting, ProfileStep};
use crate::progress::{Announcement, ProjectedView, VisualState};
use crate::utils::date::{deadline_status, format_date, parse_backend_date, DeadlineStatus};
use crate::utils::text::{strip_html, truncate};

// ANSI escape codes for terminal formatting
const ANSI_BOLD: &str = "\x1b[1m";
const ANSI_DIM: &str = "\x1b[2m";
const ANSI_RESET: &str = "\x1b[0m";
const ANSI_FG_RED: &str = "\x1b[31m";
const ANSI_FG_GREEN: &str = "\x1b[32m";
const ANSI_FG_YELLOW: &str = "\x1b[33m";

pub const NOT_FOUND_MESSAGE: &str = "Data tidak ditemukan.";

/// Check if stdout is a terminal (TTY)
pub fn is_tty() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width dynamically
///
/// Uses the `terminal_size` crate, falling back to the COLUMNS environment
/// variable and then a fixed default.
pub fn get_terminal_width() -> usize {
    if let Some((terminal_size::Width(w), _)) = terminal_size::terminal_size() {
        if w > 0 {
            return w as usize;
        }
    }

    if let Ok(cols) = std::env::var("COLUMNS") {
        if let Ok(width) = cols.parse::<usize>() {
            if width > 0 && width < 10000 {
                return width;
            }
        }
    }

    100
}

fn paint(text: &str, code: &str, is_tty: bool) -> String {
    if is_tty {
        format!("{}{}{}", code, text, ANSI_RESET)
    } else {
        text.to_string()
    }
}

fn bold_if_tty(text: &str, is_tty: bool) -> String {
    paint(text, ANSI_BOLD, is_tty)
}

fn state_color(state: VisualState) -> &'static str {
    match state {
        VisualState::Neutral => ANSI_DIM,
        VisualState::Success => ANSI_FG_GREEN,
        VisualState::Failure => ANSI_FG_RED,
    }
}

/// Plain table with a header row and a dashed rule
///
/// The last column absorbs whatever width is left and is truncated to fit.
pub fn render_table(headers: &[&str], rows: &[Vec<String>], width: usize) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }
    if let Some(last) = widths.len().checked_sub(1) {
        let fixed: usize = widths[..last].iter().map(|w| w + 2).sum();
        let remaining = width.saturating_sub(fixed).max(headers[last].chars().count()).max(10);
        widths[last] = widths[last].min(remaining);
    }

    let format_row = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{:<w$}", truncate(cell, *w), w = *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let header: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    let mut out = String::new();
    out.push_str(&format_row(&header));
    out.push('\n');
    out.push_str(&widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("  "));
    out.push('\n');
    for row in rows {
        out.push_str(&format_row(row));
        out.push('\n');
    }
    out
}

fn deadline_cell(deadline: Option<&str>, today: &NaiveDate) -> String {
    let Some(raw) = deadline else {
        return "-".to_string();
    };
    match parse_backend_date(raw) {
        Some(date) => match deadline_status(&date, today) {
            DeadlineStatus::Closed => format!("{} (closed)", format_date(raw)),
            DeadlineStatus::Open { days_left: 0 } => format!("{} (today)", format_date(raw)),
            DeadlineStatus::Open { days_left } => format!("{} ({}d)", format_date(raw), days_left),
        },
        None => raw.to_string(),
    }
}

/// Job posting table
pub fn format_jobs_table(jobs: &[JobPosting], today: &NaiveDate, width: usize) -> String {
    if jobs.is_empty() {
        return "No job postings.\n".to_string();
    }
    let rows: Vec<Vec<String>> = jobs
        .iter()
        .map(|job| {
            vec![
                job.id.clone(),
                deadline_cell(job.deadline.as_deref(), today),
                job.location.clone().unwrap_or_else(|| "-".to_string()),
                job.title.clone(),
            ]
        })
        .collect();
    render_table(&["ID", "Deadline", "Location", "Position"], &rows, width)
}

/// Detail view of one job posting
pub fn format_job_detail(job: &JobPosting, today: &NaiveDate, is_tty: bool) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", bold_if_tty(&job.title, is_tty)));
    out.push_str(&format!("  ID:       {}\n", job.id));
    if let Some(unit) = &job.unit {
        out.push_str(&format!("  Unit:     {}\n", unit));
    }
    if let Some(location) = &job.location {
        out.push_str(&format!("  Location: {}\n", location));
    }
    if let Some(quota) = job.quota {
        out.push_str(&format!("  Quota:    {}\n", quota));
    }
    out.push_str(&format!("  Deadline: {}\n", deadline_cell(job.deadline.as_deref(), today)));
    let description = strip_html(&job.description);
    if !description.is_empty() {
        out.push('\n');
        for line in description.lines() {
            out.push_str(&format!("  {}\n", line));
        }
    }
    out
}

/// Application history table
pub fn format_applications_table(apps: &[ApplicationSummary], width: usize) -> String {
    if apps.is_empty() {
        return "No applications yet.\n".to_string();
    }
    let rows: Vec<Vec<String>> = apps
        .iter()
        .map(|app| {
            vec![
                app.id.clone(),
                app.submitted_at.as_deref().map(format_date).unwrap_or_else(|| "-".to_string()),
                app.status.clone().unwrap_or_else(|| "-".to_string()),
                app.job_title.clone(),
            ]
        })
        .collect();
    render_table(&["ID", "Submitted", "Status", "Position"], &rows, width)
}

/// Status view: applicant header, visible stages, current announcement
pub fn format_projected_view(context: Option<&ApplicantContext>, view: &ProjectedView, is_tty: bool) -> String {
    let mut out = String::new();

    if let Some(ctx) = context {
        out.push_str(&format!("{}\n", bold_if_tty(&ctx.display_name, is_tty)));
        out.push_str(&format!("  Position:    {}\n", ctx.position));
        out.push_str(&format!("  Participant: {}\n\n", ctx.participant_number));
    }

    if view.is_empty() {
        out.push_str(NOT_FOUND_MESSAGE);
        out.push('\n');
        return out;
    }

    let name_width = view
        .visible_stages
        .iter()
        .map(|s| s.name.chars().count())
        .max()
        .unwrap_or(0);
    for stage in &view.visible_stages {
        let marker = format!("{:>2}.", stage.ordinal);
        let mut line = format!("{} {:<w$}", marker, stage.name, w = name_width);
        if let Some(badge) = stage.badge_label {
            line.push_str("  ");
            line.push_str(&paint(&format!("[{}]", badge), state_color(stage.visual_state), is_tty));
        }
        let line = if stage.visual_state == VisualState::Neutral {
            paint(&line, state_color(stage.visual_state), is_tty)
        } else {
            line
        };
        out.push_str(line.trim_end());
        out.push('\n');
        let description = strip_html(&stage.description);
        for desc_line in description.lines() {
            out.push_str(&format!("    {}\n", desc_line));
        }
    }

    match &view.announcement {
        Some(Announcement::Stage { title, body, .. }) => {
            out.push('\n');
            let heading = title.as_deref().map(strip_html).unwrap_or_else(|| "Pengumuman".to_string());
            out.push_str(&format!("{}\n", paint(&heading, ANSI_FG_YELLOW, is_tty)));
            if let Some(body) = body {
                for line in strip_html(body).lines() {
                    out.push_str(&format!("  {}\n", line));
                }
            }
        }
        Some(Announcement::Rejected { message, .. }) => {
            out.push('\n');
            out.push_str(&format!("{}\n", paint("Pengumuman", ANSI_FG_YELLOW, is_tty)));
            out.push_str(&format!("  {}\n", message));
        }
        None => {}
    }

    out
}

fn value_text(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) if s.is_empty() => "-".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Profile grouped by editing step
///
/// Top-level keys that belong to no step are listed under "other".
pub fn format_profile(profile: &Map<String, Value>, is_tty: bool) -> String {
    let mut out = String::new();
    let mut known: Vec<&str> = Vec::new();

    for step in ProfileStep::ALL {
        out.push_str(&format!("{}\n", bold_if_tty(step.as_str(), is_tty)));
        let section = profile.get(step.as_str()).and_then(Value::as_object);
        for field in step.fields() {
            known.push(*field);
            let value = section
                .and_then(|s| s.get(*field))
                .or_else(|| profile.get(*field))
                .map(value_text)
                .unwrap_or_else(|| "-".to_string());
            out.push_str(&format!("  {:<14} {}\n", field, value));
        }
    }

    let others: Vec<(&String, &Value)> = profile
        .iter()
        .filter(|(k, _)| !known.contains(&k.as_str()) && ProfileStep::from_str(k).is_none())
        .collect();
    if !others.is_empty() {
        out.push_str(&format!("{}\n", bold_if_tty("other", is_tty)));
        for (key, value) in others {
            out.push_str(&format!("  {:<14} {}\n", key, value_text(value)));
        }
    }
    out
}
