//! Command-line parsing for the percentile predictor.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! fitting code and from dispatch (which lives in `app`).

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{DEFAULT_CURVE_RESOLUTION, DEFAULT_SCORE};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "pctl",
    version,
    about = "Score-to-percentile predictor (cubic fit over historical tables)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the web form and JSON API (the default).
    Serve(ServeArgs),
    /// Predict one score for one category and print a report.
    Predict(PredictArgs),
    /// Predict one score against every category.
    Compare(CompareArgs),
    /// List the known categories.
    Categories(CommonArgs),
}

/// Options shared by every subcommand.
#[derive(Debug, Args, Clone)]
pub struct CommonArgs {
    /// JSON dataset to use instead of the built-in reference table.
    #[arg(long, env = "PCTL_DATASET", value_name = "JSON")]
    pub dataset: Option<PathBuf>,

    /// Lowest accepted score.
    #[arg(long, env = "PCTL_SCORE_MIN", default_value_t = 0.0)]
    pub score_min: f64,

    /// Highest accepted score.
    #[arg(long, env = "PCTL_SCORE_MAX", default_value_t = 300.0)]
    pub score_max: f64,

    /// Number of samples in the predicted curve.
    #[arg(long, env = "PCTL_RESOLUTION", default_value_t = DEFAULT_CURVE_RESOLUTION)]
    pub resolution: usize,
}

#[derive(Debug, Args, Clone)]
pub struct ServeArgs {
    /// Address to listen on.
    #[arg(long, env = "PCTL_BIND", default_value = "127.0.0.1:5000")]
    pub bind: String,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args, Clone)]
pub struct PredictArgs {
    /// Category identifier (defaults to the first category).
    #[arg(short = 'c', long)]
    pub category: Option<String>,

    /// Score to predict for.
    #[arg(short = 's', long, default_value_t = DEFAULT_SCORE, allow_negative_numbers = true)]
    pub score: f64,

    /// Render an ASCII plot in the terminal (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Write the prediction (model, curve, diagnostics) to JSON.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args, Clone)]
pub struct CompareArgs {
    /// Score to predict for.
    #[arg(short = 's', long, default_value_t = DEFAULT_SCORE, allow_negative_numbers = true)]
    pub score: f64,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predict_defaults() {
        let cli = Cli::try_parse_from(["pctl", "predict"]).unwrap();
        let Command::Predict(args) = cli.command else {
            panic!("expected predict");
        };
        assert_eq!(args.category, None);
        assert_eq!(args.score, DEFAULT_SCORE);
        assert!(args.plot && !args.no_plot);
        assert_eq!((args.width, args.height), (72, 20));
    }

    #[test]
    fn predict_flags_parse() {
        let cli = Cli::try_parse_from([
            "pctl",
            "predict",
            "-c",
            "Apr_4_Shift_1",
            "--score",
            "171.5",
            "--no-plot",
            "--resolution",
            "25",
        ])
        .unwrap();
        let Command::Predict(args) = cli.command else {
            panic!("expected predict");
        };
        assert_eq!(args.category.as_deref(), Some("Apr_4_Shift_1"));
        assert_eq!(args.score, 171.5);
        assert!(args.no_plot);
        assert_eq!(args.common.resolution, 25);
    }

    #[test]
    fn compare_and_categories_parse() {
        let cli = Cli::try_parse_from(["pctl", "compare", "-s", "120"]).unwrap();
        assert!(matches!(cli.command, Command::Compare(ref a) if a.score == 120.0));

        let cli = Cli::try_parse_from(["pctl", "categories", "--dataset", "d.json"]).unwrap();
        let Command::Categories(common) = cli.command else {
            panic!("expected categories");
        };
        assert_eq!(common.dataset, Some(PathBuf::from("d.json")));
    }
}
