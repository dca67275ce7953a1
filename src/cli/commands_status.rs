// Stage tracking commands: status view, participant card, offline preview

use std::path::PathBuf;
use anyhow::{Context, Result};
use serde_json::json;
use crate::api::ApiError;
use crate::card::render_card;
use crate::cli::commands::View;
use crate::cli::error::{user_error, validate_id};
use crate::cli::output::{format_projected_view, is_tty};
use crate::models::{parse_stage_rows, ApplicantContext};
use crate::progress::{project, ProjectedView};

fn check_application_id(id: &str) {
    if let Err(e) = validate_id(id, "Application") {
        user_error(&e);
    }
}

fn print_view(context: Option<&ApplicantContext>, view: &ProjectedView, json: bool) -> Result<()> {
    if json {
        let out = json!({ "applicant": context, "view": view });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print!("{}", format_projected_view(context, view, is_tty()));
    }
    Ok(())
}

/// Show the progress view of one application
///
/// The applicant record and the stage list are fetched concurrently. A
/// failed stage fetch renders the empty view; a failed record fetch only
/// drops the header. Either way the command succeeds.
pub fn handle_status(application_id: String, json: bool) -> Result<()> {
    let id = application_id.trim().to_string();
    check_application_id(&id);

    let view = View::open()?;
    let (record, stages) = view.block_on(async {
        tokio::join!(view.client.application(&id), view.client.stages(&id))
    });

    if view.is_cancelled()
        || matches!(record, Err(ApiError::Cancelled))
        || matches!(stages, Err(ApiError::Cancelled))
    {
        log::info!("Status view for application {} cancelled", id);
        return Err(ApiError::Cancelled.into());
    }

    let context = match record {
        Ok(record) => Some(ApplicantContext::join(view.session_name(), record)),
        Err(e) => {
            log::warn!("Could not load application {}: {}", id, e);
            None
        }
    };
    let stages = stages.unwrap_or_else(|e| {
        log::warn!("Could not load stages for application {}: {}", id, e);
        Vec::new()
    });

    print_view(context.as_ref(), &project(&stages), json)
}

/// Download the participant card for an application as PDF
pub fn handle_card(application_id: String, out: Option<PathBuf>) -> Result<()> {
    let id = application_id.trim().to_string();
    check_application_id(&id);

    let view = View::open()?;
    view.require_session();
    let (record, stages) = view.block_on(async {
        tokio::join!(view.client.application(&id), view.client.stages(&id))
    });

    let record = match record {
        Ok(r) => r,
        Err(ApiError::NotFound) => user_error(&format!("Application {} not found", id)),
        Err(e) => return Err(e.into()),
    };
    let stages = stages?;
    let context = ApplicantContext::join(view.session_name(), record);

    let bytes = render_card(&context, &stages)?;
    let path = out.unwrap_or_else(|| PathBuf::from(format!("kartu-peserta-{}.pdf", id)));
    std::fs::write(&path, bytes)
        .with_context(|| format!("Failed to write card to {}", path.display()))?;

    log::info!("Card for {} has {} stage cells", context.participant_number, stages.len());
    println!("Saved participant card to {}", path.display());
    Ok(())
}

/// Project a stage payload read from a file, without contacting the portal
pub fn handle_preview(file: PathBuf, json: bool) -> Result<()> {
    let content = match std::fs::read_to_string(&file) {
        Ok(c) => c,
        Err(e) => user_error(&format!("Cannot read {}: {}", file.display(), e)),
    };
    let stages = match parse_stage_rows(&content) {
        Ok(s) => s,
        Err(e) => user_error(&format!("Invalid stage data in {}: {}", file.display(), e)),
    };
    print_view(None, &project(&stages), json)
}
