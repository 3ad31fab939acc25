//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and installs logging
//! - parses CLI arguments
//! - loads and validates the dataset
//! - serves the web UI, or prints reports/plots for the one-shot commands
//! - writes optional exports

use clap::Parser;

use crate::cli::{Cli, Command, CommonArgs, CompareArgs, PredictArgs, ServeArgs};
use crate::domain::{AppConfig, MAX_CURVE_RESOLUTION, ScoreBounds};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `pctl` binary.
pub fn run() -> Result<(), AppError> {
    // A missing `.env` is the normal case.
    let _ = dotenvy::dotenv();
    crate::logging::init();

    // `pctl` and `pctl --bind ...` behave like `pctl serve ...`. Clap requires
    // a subcommand name, so argv is rewritten before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = Cli::parse_from(argv);

    match cli.command {
        Command::Serve(args) => handle_serve(args),
        Command::Predict(args) => handle_predict(args),
        Command::Compare(args) => handle_compare(args),
        Command::Categories(common) => handle_categories(common),
    }
}

fn handle_serve(args: ServeArgs) -> Result<(), AppError> {
    let config = config_from_args(&args.common)?;
    let dataset = pipeline::load_dataset(&config)?;
    crate::web::serve(dataset, &config, &args.bind)
}

fn handle_predict(args: PredictArgs) -> Result<(), AppError> {
    let config = config_from_args(&args.common)?;
    let dataset = pipeline::load_dataset(&config)?;

    let category = match &args.category {
        Some(c) => c.clone(),
        None => dataset.default_category().name().to_string(),
    };
    let request = pipeline::build_request(&dataset, &config.bounds, &category, args.score)?;
    let prediction = pipeline::run_prediction(&dataset, &request, config.curve_resolution)?;
    let table = dataset.get(&request.category)?;

    println!("{}", crate::report::format_prediction(table, &prediction));

    if args.plot && !args.no_plot {
        let chart = crate::plot::ChartData::new(table, &prediction.result);
        println!(
            "{}",
            crate::plot::render_ascii_plot(&chart, args.width, args.height)
        );
    }

    if let Some(path) = &args.export {
        crate::io::write_prediction_json(path, table, &prediction)?;
    }
    Ok(())
}

fn handle_compare(args: CompareArgs) -> Result<(), AppError> {
    let config = config_from_args(&args.common)?;
    let dataset = pipeline::load_dataset(&config)?;
    let results =
        pipeline::run_compare(&dataset, &config.bounds, args.score, config.curve_resolution)?;
    println!("{}", crate::report::format_comparison(&dataset, &results));
    Ok(())
}

fn handle_categories(common: CommonArgs) -> Result<(), AppError> {
    let config = config_from_args(&common)?;
    let dataset = pipeline::load_dataset(&config)?;
    print!("{}", crate::report::format_categories(&dataset));
    Ok(())
}

/// Validate shared flags into an [`AppConfig`].
pub fn config_from_args(args: &CommonArgs) -> Result<AppConfig, AppError> {
    let bounds = ScoreBounds {
        min: args.score_min,
        max: args.score_max,
    };
    if !(bounds.min.is_finite() && bounds.max.is_finite()) || bounds.min > bounds.max {
        return Err(AppError::new(
            2,
            format!(
                "Invalid score bounds: min={} max={}.",
                bounds.min, bounds.max
            ),
        ));
    }
    if !(2..=MAX_CURVE_RESOLUTION).contains(&args.resolution) {
        return Err(AppError::new(
            2,
            format!(
                "Curve resolution must be between 2 and {MAX_CURVE_RESOLUTION}, got {}.",
                args.resolution
            ),
        ));
    }
    Ok(AppConfig {
        dataset: args.dataset.clone(),
        bounds,
        curve_resolution: args.resolution,
    })
}

/// Rewrite argv so `pctl` defaults to `pctl serve`.
///
/// Rules:
/// - `pctl`                       -> `pctl serve`
/// - `pctl --bind 0.0.0.0:80 ...` -> `pctl serve --bind 0.0.0.0:80 ...`
/// - `pctl --help/--version/-h`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("serve".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "serve" | "predict" | "compare" | "categories");
    if is_subcommand {
        return argv;
    }

    // A leading flag is read as a serve flag.
    if arg1.starts_with('-') {
        argv.insert(1, "serve".to_string());
        return argv;
    }

    argv
}
