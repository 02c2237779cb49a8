//! CLI logic for the Arrange layout tool.
//!
//! Reads a workflow document, arranges its nodes and writes it back.

pub mod error_adapter;

mod args;
mod config;
mod state;

pub use args::Args;
pub use state::ModeStore;

use std::fs;

use log::{info, warn};

use arrange::{ArrangeError, Arranger, LayoutMode, workflow::Workflow};

/// Run the Arrange CLI application
///
/// The layout mode is taken from `--mode` if given, then from the mode
/// remembered by an earlier run, then from the configuration. A mode given
/// on the command line is remembered for later runs.
///
/// # Errors
///
/// Returns `ArrangeError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed workflow documents
pub fn run(args: &Args) -> Result<(), ArrangeError> {
    info!(
        input_path = args.input,
        output_path = args.output_path();
        "Arranging workflow"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let store = ModeStore::new(args.state.as_ref());
    let mode = resolve_mode(args.mode, &store, app_config.layout().mode());

    let source = fs::read_to_string(&args.input)?;
    let mut workflow: Workflow = source.parse()?;

    let report = Arranger::new(app_config).arrange(&mut workflow, mode);
    if report.dropped_edges() > 0 {
        warn!(count = report.dropped_edges(); "Ignored links to unknown nodes");
    }

    fs::write(args.output_path(), workflow.to_string_pretty()?)?;

    if let Some(mode) = args.mode {
        store.save(mode)?;
    }

    info!(output_file = args.output_path(), nodes = report.nodes(); "Workflow arranged");

    Ok(())
}

fn resolve_mode(flag: Option<LayoutMode>, store: &ModeStore, default: LayoutMode) -> LayoutMode {
    if let Some(mode) = flag {
        return mode;
    }
    match store.load() {
        Ok(Some(mode)) => mode,
        Ok(None) => default,
        Err(err) => {
            warn!(err:%; "Ignoring saved layout mode");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_flag_beats_saved_mode() {
        let dir = tempdir().unwrap();
        let store = ModeStore::new(Some(dir.path().join("state.toml")));
        store.save(LayoutMode::Compact).unwrap();

        assert_eq!(
            resolve_mode(Some(LayoutMode::Align), &store, LayoutMode::Align),
            LayoutMode::Align
        );
        assert_eq!(
            resolve_mode(None, &store, LayoutMode::Align),
            LayoutMode::Compact
        );
    }

    #[test]
    fn test_corrupt_state_falls_back_to_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.toml");
        fs::write(&path, "not toml at all [").unwrap();
        let store = ModeStore::new(Some(&path));

        assert_eq!(
            resolve_mode(None, &store, LayoutMode::Compact),
            LayoutMode::Compact
        );
    }
}
