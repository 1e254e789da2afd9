//! CLI command definitions for the `hairfit` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod saved;
pub mod suggest;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use hairfit_types::face::FaceShape;

/// Hairstyle suggestions from a face photo.
#[derive(Parser)]
#[command(name = "hairfit", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Read configuration from this file instead of `{data_dir}/config.toml`.
    #[arg(long, global = true, env = "HAIRFIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Export spans to stdout through OpenTelemetry.
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Suggest five hairstyles for a photo.
    Suggest {
        /// Path to a JPEG photo of a face.
        photo: PathBuf,

        /// Known face shape (oval, round, square, heart, diamond, rectangular, oblong).
        #[arg(long, value_parser = parse_face_shape, conflicts_with = "direct")]
        face_shape: Option<FaceShape>,

        /// Let the model infer the face shape from the photo.
        #[arg(long)]
        direct: bool,

        /// Keep the result in the saved analyses.
        #[arg(long)]
        save: bool,
    },

    /// Browse and manage saved analyses.
    Saved {
        #[command(subcommand)]
        action: saved::SavedCommand,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

fn parse_face_shape(s: &str) -> Result<FaceShape, String> {
    s.parse()
}
