//! `hairfit suggest` -- run the pipeline for one photo and print the result.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use tokio_util::sync::CancellationToken;

use hairfit_core::storage::saved_store::{SavedAnalysisRepository, analysis_from_result};
use hairfit_core::suggest::AnalysisMode;
use hairfit_types::face::{Classification, FaceShape};
use hairfit_types::suggestion::{RecommendationRecord, SuggestionOrigin, SuggestionResult};

use crate::state::AppState;

/// Options for one `suggest` invocation.
pub struct SuggestArgs {
    pub photo: PathBuf,
    pub face_shape: Option<FaceShape>,
    pub direct: bool,
    pub save: bool,
}

/// Handle `hairfit suggest`.
pub async fn suggest(
    state: &AppState,
    args: SuggestArgs,
    cancel: &CancellationToken,
    json: bool,
) -> Result<()> {
    let photo = tokio::fs::read(&args.photo)
        .await
        .with_context(|| format!("failed to read photo {}", args.photo.display()))?;
    if photo.is_empty() {
        anyhow::bail!("photo {} is empty", args.photo.display());
    }

    let mode = match (args.face_shape, args.direct) {
        (Some(shape), _) => AnalysisMode::Guided(Classification::certain(shape)),
        (None, true) => AnalysisMode::Direct,
        (None, false) => state.orchestrator.classify(&photo),
    };

    if !json {
        println!();
        println!(
            "  {} Analyzing {} ({})",
            style("~").cyan().bold(),
            style(args.photo.display()).cyan(),
            mode_label(&mode),
        );
        if !state.orchestrator.is_online() {
            println!(
                "  {}",
                style("Offline: set OPENAI_API_KEY for live suggestions").dim()
            );
        }
    }

    let result = state.orchestrator.run(mode, &photo, cancel).await;

    let saved_id = if args.save {
        let analysis = analysis_from_result(photo_uri(&args.photo), &result);
        state.saved_repo.save(&analysis).await?;
        Some(analysis.id)
    } else {
        None
    };

    if json {
        let mut value = serde_json::to_value(&result)?;
        if let (Some(id), Some(obj)) = (saved_id, value.as_object_mut()) {
            obj.insert("saved_id".to_string(), serde_json::Value::String(id.to_string()));
        }
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    print_result(&result);
    if let Some(id) = saved_id {
        println!(
            "  {} Saved as {}",
            style("ok").green(),
            style(id).cyan(),
        );
        println!();
    }
    Ok(())
}

fn mode_label(mode: &AnalysisMode) -> String {
    match mode {
        AnalysisMode::Guided(c) => format!(
            "face shape {}, confidence {:.0}%",
            c.face_shape.label(),
            c.confidence * 100.0
        ),
        AnalysisMode::Direct => "direct analysis".to_string(),
    }
}

/// `file://` URI for the photo, absolute when the path can be resolved.
pub fn photo_uri(path: &Path) -> String {
    let resolved = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    format!("file://{}", resolved.display())
}

fn print_result(result: &SuggestionResult) {
    println!();
    println!(
        "  Face shape: {}   Gender: {}",
        style(&result.face_shape).cyan().bold(),
        style(result.gender).cyan(),
    );
    println!();
    println!("  {}", result.summary);
    println!();
    println!("{}", records_table(&result.records));
    println!();

    let origin = match result.origin {
        SuggestionOrigin::Live => style("live").green(),
        SuggestionOrigin::MockFallback => style("mock fallback").yellow(),
    };
    println!(
        "  Source: {}   AI images: {}/{}",
        origin,
        result.ai_generated_count(),
        result.records.len(),
    );
    println!();
}

/// Render records in display order.
pub fn records_table(records: &[RecommendationRecord]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("#").fg(Color::White),
        Cell::new("Hairstyle").fg(Color::White),
        Cell::new("Description").fg(Color::White),
        Cell::new("Image").fg(Color::White),
    ]);

    for (i, record) in records.iter().enumerate() {
        let image = record.image_url.as_deref().unwrap_or("-");
        let image_cell = if record.is_ai_generated {
            Cell::new(image).fg(Color::Green)
        } else {
            Cell::new(image).fg(Color::DarkGrey)
        };
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&record.name).fg(Color::Cyan),
            Cell::new(&record.description),
            image_cell,
        ]);
    }

    table
}
