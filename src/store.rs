use crate::score::HighScoreRecord;
use directories::ProjectDirs;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};

/// External home of the single best-score row.
///
/// Delivery is push-based: `subscribe` hands back a receiver on which zero,
/// one, or many records may arrive at any point in the session lifecycle.
/// Each delivered record fully replaces the caller's cached best. A store
/// that never delivers is not an error; the caller treats "no record yet"
/// as absent.
pub trait HighScoreStore {
    fn subscribe(&self) -> Receiver<HighScoreRecord>;

    /// Replaces the stored row. No history is kept.
    fn write(&self, record: &HighScoreRecord) -> io::Result<()>;
}

/// JSON-file-backed store. `subscribe` delivers the stored record once, if
/// one exists and parses; a missing or unreadable file delivers nothing.
#[derive(Clone, Debug)]
pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "keydash") {
            pd.data_dir().join("highscore.json")
        } else {
            PathBuf::from("keydash_highscore.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    fn read_record(&self) -> Option<HighScoreRecord> {
        let bytes = fs::read(&self.path).ok()?;
        serde_json::from_slice(&bytes).ok()
    }
}

impl Default for FileHighScoreStore {
    fn default() -> Self {
        Self::new()
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn subscribe(&self) -> Receiver<HighScoreRecord> {
        let (tx, rx) = mpsc::channel();
        if let Some(record) = self.read_record() {
            // Buffered by the channel; the receiver may attach to the event
            // loop after this returns.
            let _ = tx.send(record);
        }
        rx
    }

    fn write(&self, record: &HighScoreRecord) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(record).unwrap_or_default();
        fs::write(&self.path, data)
    }
}
