/*!
 * Editing session document.
 *
 * A `TimelineProject` wraps a [`Timeline`] with a name, settings and
 * timestamps, and persists as JSON. The [`Autosaver`] writes the project
 * once edits have been quiet for the configured delay.
 */

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::{debug, error, info};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::app_config::EditorConfig;
use crate::export::ExportFormat;
use crate::file_utils::FileManager;
use crate::timeline::Timeline;

/// Project shared between the editor and the autosave task
pub type SharedProject = Arc<Mutex<TimelineProject>>;

/// Project format version written to disk
pub const PROJECT_VERSION: &str = "1.0.0";

/// Name used for exports of an unnamed project
const DEFAULT_EXPORT_NAME: &str = "lyrics";

/// Per-project settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSettings {
    /// Save automatically after edits
    pub auto_save: bool,
    /// Quiet period before an automatic save, in seconds
    pub auto_save_delay_secs: u64,
}

impl ProjectSettings {
    /// Settings seeded from the editor configuration
    pub fn from_editor(config: &EditorConfig) -> Self {
        Self {
            auto_save: config.auto_save,
            auto_save_delay_secs: config.auto_save_delay_secs,
        }
    }

    /// Autosave delay as a duration
    pub fn auto_save_delay(&self) -> Duration {
        Duration::from_secs(self.auto_save_delay_secs)
    }
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self::from_editor(&EditorConfig::default())
    }
}

/// Project bookkeeping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Default for ProjectMetadata {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            created_at: now,
            updated_at: now,
            version: PROJECT_VERSION.to_string(),
            author: None,
            description: None,
        }
    }
}

/// A lyric timeline being edited
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineProject {
    /// Project id
    pub id: String,

    /// Display name, also used for export file names
    pub name: String,

    /// Audio the lyrics are timed against
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_file: Option<PathBuf>,

    /// The timeline
    pub lyrics: Timeline,

    /// Settings
    #[serde(default)]
    pub settings: ProjectSettings,

    /// Timestamps and version
    pub metadata: ProjectMetadata,

    #[serde(skip)]
    dirty: bool,
}

impl TimelineProject {
    /// New empty project
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: format!("project_{}", Uuid::new_v4().simple()),
            name: name.into(),
            audio_file: None,
            lyrics: Timeline::new(),
            settings: ProjectSettings::default(),
            metadata: ProjectMetadata::default(),
            dirty: false,
        }
    }

    /// New project seeded from a lyric document
    pub fn from_document(name: impl Into<String>, content: &str) -> Self {
        let mut project = Self::new(name);
        project.lyrics = Timeline::parse(content);
        project
    }

    /// Wrap in a lock for sharing with an [`Autosaver`]
    pub fn into_shared(self) -> SharedProject {
        Arc::new(Mutex::new(self))
    }

    /// Apply an edit to the timeline and mark the project dirty
    pub fn edit<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut Timeline) -> R,
    {
        let result = f(&mut self.lyrics);
        self.touch();
        result
    }

    /// Record a modification
    pub fn touch(&mut self) {
        self.metadata.updated_at = Utc::now();
        self.dirty = true;
    }

    /// Unsaved changes exist
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// File name for an export of this project, e.g. `My Song.srt`
    pub fn export_file_name(&self, format: ExportFormat) -> String {
        let name = self.name.trim();
        let name = if name.is_empty() { DEFAULT_EXPORT_NAME } else { name };
        format!("{}.{}", name, format.extension())
    }

    /// Per-user location for this project's save file
    pub fn default_save_path(&self) -> Option<PathBuf> {
        dirs::data_dir().map(|dir| {
            dir.join("lyricline")
                .join("projects")
                .join(format!("{}.json", self.id))
        })
    }

    /// Save as pretty JSON and clear the dirty flag
    pub fn save_to<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize project to JSON")?;
        FileManager::write_to_file(path, &json)?;
        self.dirty = false;
        info!("Project '{}' saved to {}", self.name, path.display());
        Ok(())
    }

    /// Load a project saved with [`save_to`](Self::save_to)
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = FileManager::read_to_string(path)?;
        let project: TimelineProject = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse project file: {}", path.display()))?;
        debug!("Loaded project '{}' with {} line(s)", project.name, project.lyrics.len());
        Ok(project)
    }
}

/// Debounced background saver.
///
/// Each [`notify`](Self::notify) restarts the quiet period; the project is
/// written once no notification arrived for the whole delay. Dropping the
/// last sender via [`shutdown`](Self::shutdown) flushes a pending save.
pub struct Autosaver {
    tx: mpsc::UnboundedSender<()>,
    handle: JoinHandle<()>,
}

impl Autosaver {
    /// Start an autosaver if the project has autosave enabled.
    ///
    /// Must be called from within a tokio runtime.
    pub fn for_project(project: SharedProject, path: PathBuf) -> Option<Self> {
        let settings = project.lock().settings.clone();
        if !settings.auto_save {
            debug!("Autosave disabled for this project");
            return None;
        }
        Some(Self::spawn(project, path, settings.auto_save_delay()))
    }

    /// Start the background task with an explicit delay
    pub fn spawn(project: SharedProject, path: PathBuf, delay: Duration) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<()>();

        let handle = tokio::spawn(async move {
            while rx.recv().await.is_some() {
                loop {
                    tokio::select! {
                        msg = rx.recv() => match msg {
                            Some(()) => continue,
                            None => {
                                Self::save_now(&project, &path);
                                return;
                            }
                        },
                        _ = tokio::time::sleep(delay) => {
                            Self::save_now(&project, &path);
                            break;
                        }
                    }
                }
            }
        });

        Self { tx, handle }
    }

    /// Signal that the project changed
    pub fn notify(&self) {
        if self.tx.send(()).is_err() {
            debug!("Autosave task already stopped");
        }
    }

    /// Stop the task, saving any pending change first
    pub async fn shutdown(self) {
        drop(self.tx);
        if let Err(e) = self.handle.await {
            error!("Autosave task failed: {}", e);
        }
    }

    fn save_now(project: &SharedProject, path: &Path) {
        let mut project = project.lock();
        if !project.is_dirty() {
            return;
        }
        if let Err(e) = project.save_to(path) {
            error!("Autosave failed: {:#}", e);
        }
    }
}
