mod app;
mod chart;
mod color;
mod data;
mod error;
mod graphs;
mod state;
mod ui;

use std::path::PathBuf;
use std::process::ExitCode;

use app::MotorVizApp;
use eframe::egui;
use state::AppState;

const USAGE: &str = "usage: motor-viz [RAW_CSV SHAPING_CSV]";

/// Positional arguments: either none, or the raw and shaping files.
fn parse_args<I: IntoIterator<Item = String>>(args: I) -> anyhow::Result<Option<(PathBuf, PathBuf)>> {
    let args: Vec<String> = args.into_iter().collect();
    match args.as_slice() {
        [] => Ok(None),
        [raw, shaping] => Ok(Some((PathBuf::from(raw), PathBuf::from(shaping)))),
        _ => anyhow::bail!("expected zero or two file arguments, got {}", args.len()),
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let state = match parse_args(std::env::args().skip(1)) {
        Ok(Some((raw, shaping))) => AppState::with_files(raw, shaping),
        Ok(None) => AppState::default(),
        Err(e) => {
            eprintln!("{e}\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        "Motor Data Visualization",
        options,
        Box::new(|_cc| Ok(Box::new(MotorVizApp::new(state)))),
    );

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Window closed with error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_args_starts_empty() {
        assert!(parse_args(args(&[])).unwrap().is_none());
    }

    #[test]
    fn two_args_are_raw_then_shaping() {
        let (raw, shaping) = parse_args(args(&["raw.csv", "shape.csv"])).unwrap().unwrap();
        assert_eq!(raw, PathBuf::from("raw.csv"));
        assert_eq!(shaping, PathBuf::from("shape.csv"));
    }

    #[test]
    fn one_or_three_args_are_rejected() {
        assert!(parse_args(args(&["raw.csv"])).is_err());
        assert!(parse_args(args(&["a", "b", "c"])).is_err());
    }
}
