use std::{io::ErrorKind, path::PathBuf};

use anyhow::Result;
use fs4::tokio::AsyncFileExt;
use tokio::{
    fs::File,
    io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt},
};
use tracing::{debug, warn};

use super::view_state::HistoryViewState;

const VIEW_STATE_FILE: &str = "history_view.json";

/// Keeps [HistoryViewState] between runs so that months opened with `toggle` stay open for the
/// next `history`. Only the expansion map is stored, entries always come from the service.
pub struct ViewStateStorage {
    path: PathBuf,
}

impl ViewStateStorage {
    pub fn new(application_dir: PathBuf) -> Self {
        Self {
            path: application_dir.join(VIEW_STATE_FILE),
        }
    }

    /// A missing file is the default state. A file that can't be understood is reported and also
    /// treated as the default, it gets replaced on the next save.
    pub async fn load(&self) -> Result<HistoryViewState> {
        let mut file = match File::open(&self.path).await {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No saved view state at {:?}", self.path);
                return Ok(HistoryViewState::default());
            }
            Err(e) => Err(e)?,
        };

        file.lock_shared()?;
        let mut content = String::new();
        let read = file.read_to_string(&mut content).await;
        file.unlock_async().await?;
        read?;

        match serde_json::from_str::<HistoryViewState>(&content) {
            Ok(state) => Ok(state),
            Err(e) => {
                warn!(
                    "View state in {:?} is corrupted, starting collapsed: {e}",
                    self.path
                );
                Ok(HistoryViewState::default())
            }
        }
    }

    pub async fn save(&self, state: &HistoryViewState) -> Result<()> {
        let buffer = serde_json::to_vec_pretty(state)?;

        let mut file = File::options()
            .write(true)
            .create(true)
            .read(true)
            .truncate(false)
            .open(&self.path)
            .await?;

        // Truncate only once the lock is held so a concurrent reader never sees a half written file
        file.lock_exclusive()?;
        let result = async {
            file.set_len(0).await?;
            file.rewind().await?;
            file.write_all(&buffer).await?;
            file.flush().await?;
            Ok::<_, std::io::Error>(())
        }
        .await;
        file.unlock_async().await?;
        result?;

        debug!("Saved view state to {:?}", self.path);
        Ok(())
    }
}
