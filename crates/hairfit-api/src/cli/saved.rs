//! Saved-analysis CLI subcommands: list, show, favorite, delete.

use anyhow::{Context, Result};
use clap::Subcommand;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use uuid::Uuid;

use hairfit_core::storage::saved_store::SavedAnalysisRepository;
use hairfit_types::error::RepositoryError;
use hairfit_types::saved::SavedAnalysis;

use crate::state::AppState;

/// Saved-analysis subcommands.
#[derive(Subcommand)]
pub enum SavedCommand {
    /// List saved analyses, newest first.
    #[command(alias = "ls")]
    List,

    /// Show one saved analysis with its suggestions.
    Show {
        /// Analysis id.
        id: Uuid,
    },

    /// Toggle the favorite flag of a suggestion.
    Favorite {
        /// Analysis id.
        id: Uuid,

        /// Suggestion id (see `hairfit saved show`).
        suggestion_id: Uuid,
    },

    /// Delete a saved analysis.
    #[command(alias = "rm")]
    Delete {
        /// Analysis id.
        id: Uuid,
    },
}

/// Handle a saved-analysis subcommand.
pub async fn handle_saved_command(cmd: SavedCommand, state: &AppState, json: bool) -> Result<()> {
    match cmd {
        SavedCommand::List => list(state, json).await,
        SavedCommand::Show { id } => show(state, &id, json).await,
        SavedCommand::Favorite { id, suggestion_id } => {
            favorite(state, &id, &suggestion_id, json).await
        }
        SavedCommand::Delete { id } => delete(state, &id, json).await,
    }
}

async fn list(state: &AppState, json: bool) -> Result<()> {
    let analyses = state.saved_repo.list().await?;

    if json {
        let result = serde_json::json!({
            "analyses": analyses,
            "count": analyses.len(),
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if analyses.is_empty() {
        println!();
        println!("  {} No saved analyses.", style("i").blue().bold());
        println!("     Save one with: hairfit suggest <photo> --save");
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Id").fg(Color::White),
        Cell::new("Face shape").fg(Color::White),
        Cell::new("Favorites").fg(Color::White),
        Cell::new("Saved").fg(Color::White),
    ]);
    for analysis in &analyses {
        table.add_row(vec![
            Cell::new(analysis.id).fg(Color::Cyan),
            Cell::new(&analysis.face_shape),
            Cell::new(format!("{}/{}", analysis.favorites().count(), analysis.suggestions.len())),
            Cell::new(analysis.created_at.format("%Y-%m-%d %H:%M")).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("  Saved analyses ({})", analyses.len());
    println!();
    println!("{table}");
    println!();
    Ok(())
}

async fn show(state: &AppState, id: &Uuid, json: bool) -> Result<()> {
    let analysis = state
        .saved_repo
        .get(id)
        .await?
        .with_context(|| format!("Saved analysis '{id}' not found"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    print_analysis(&analysis);
    Ok(())
}

fn print_analysis(analysis: &SavedAnalysis) {
    println!();
    println!(
        "  {} {}",
        style("Analysis").bold(),
        style(analysis.id).cyan(),
    );
    println!("  Photo:      {}", analysis.photo_uri);
    println!("  Face shape: {}", style(&analysis.face_shape).cyan());
    println!("  Saved:      {}", analysis.created_at.format("%Y-%m-%d %H:%M:%S UTC"));
    println!();
    println!("  {}", analysis.summary);
    println!();

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("").fg(Color::White),
        Cell::new("Suggestion id").fg(Color::White),
        Cell::new("Hairstyle").fg(Color::White),
        Cell::new("Description").fg(Color::White),
    ]);
    for suggestion in &analysis.suggestions {
        let marker = if suggestion.record.is_favorite {
            Cell::new("*").fg(Color::Yellow)
        } else {
            Cell::new("")
        };
        table.add_row(vec![
            marker,
            Cell::new(suggestion.id).fg(Color::DarkGrey),
            Cell::new(&suggestion.record.name).fg(Color::Cyan),
            Cell::new(&suggestion.record.description),
        ]);
    }
    println!("{table}");
    println!();
}

async fn favorite(state: &AppState, id: &Uuid, suggestion_id: &Uuid, json: bool) -> Result<()> {
    let is_favorite = match state.saved_repo.toggle_favorite(id, suggestion_id).await {
        Ok(value) => value,
        Err(RepositoryError::NotFound) => {
            anyhow::bail!("Suggestion '{suggestion_id}' not found in analysis '{id}'")
        }
        Err(e) => return Err(e.into()),
    };

    if json {
        let result = serde_json::json!({
            "analysis_id": id,
            "suggestion_id": suggestion_id,
            "is_favorite": is_favorite,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        let verb = if is_favorite { "Added to" } else { "Removed from" };
        println!();
        println!("  {} {verb} favorites", style("ok").green());
        println!();
    }
    Ok(())
}

async fn delete(state: &AppState, id: &Uuid, json: bool) -> Result<()> {
    match state.saved_repo.delete(id).await {
        Ok(()) => {}
        Err(RepositoryError::NotFound) => anyhow::bail!("Saved analysis '{id}' not found"),
        Err(e) => return Err(e.into()),
    }

    if json {
        let result = serde_json::json!({ "deleted": id });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!();
        println!("  {} Deleted {}", style("ok").green(), style(id).cyan());
        println!();
    }
    Ok(())
}
