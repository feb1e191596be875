use std::path::PathBuf;

use crate::color::ChannelColors;
use crate::data::model::Table;
use crate::data::pipeline::process_files;
use crate::graphs::SessionConfig;

// ---------------------------------------------------------------------------
// Session – one successful raw + shaping submission
// ---------------------------------------------------------------------------

/// The processed table and everything configured on top of it.
pub struct Session {
    /// Read-only once built; every graph plots from it.
    pub processed: Table,
    pub config: SessionConfig,
    pub colors: ChannelColors,
}

impl Session {
    pub fn new(processed: Table) -> Self {
        Self {
            config: SessionConfig::new(&processed),
            colors: ChannelColors::new(processed.channel_names()),
            processed,
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    pub raw_path: Option<PathBuf>,
    pub shaping_path: Option<PathBuf>,

    /// Present after the last submission succeeded.
    pub session: Option<Session>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// State with both files pre-selected and processed.
    pub fn with_files(raw: PathBuf, shaping: PathBuf) -> Self {
        let mut state = Self {
            raw_path: Some(raw),
            shaping_path: Some(shaping),
            ..Default::default()
        };
        state.submit();
        state
    }

    pub fn set_raw_path(&mut self, path: PathBuf) {
        self.raw_path = Some(path);
        self.submit();
    }

    pub fn set_shaping_path(&mut self, path: PathBuf) {
        self.shaping_path = Some(path);
        self.submit();
    }

    /// Run the pipeline from scratch if both files are chosen. Any previous
    /// session is discarded.
    pub fn submit(&mut self) {
        let (Some(raw), Some(shaping)) = (&self.raw_path, &self.shaping_path) else {
            return;
        };

        self.session = None;
        match process_files(raw, shaping) {
            Ok(processed) => {
                self.session = Some(Session::new(processed));
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to process files: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Forget both files and the session.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
