//! In-crate fakes for the driven ports.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::application::ApplicationError;
use crate::application::ports::{Filesystem, Indicator, SettingsCodec, TemplateRenderer};
use crate::domain::{JotlSettings, RenderContext, TemplateKind};
use crate::error::JotlResult;

#[derive(Debug, Default)]
struct FsState {
    files: BTreeMap<PathBuf, String>,
    dirs: BTreeSet<PathBuf>,
    writes: usize,
}

/// Shared-state filesystem; clones observe the same tree.
#[derive(Debug, Clone, Default)]
pub struct FakeFilesystem {
    state: Arc<Mutex<FsState>>,
    fail_dirs: Arc<Mutex<BTreeSet<PathBuf>>>,
}

impl FakeFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: impl Into<PathBuf>, content: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .files
            .insert(path.into(), content.to_string());
        self
    }

    pub fn with_dir(self, path: impl Into<PathBuf>) -> Self {
        self.state.lock().unwrap().dirs.insert(path.into());
        self
    }

    /// Make `create_dir_all` fail for this exact path.
    pub fn failing_dir(self, path: impl Into<PathBuf>) -> Self {
        self.fail_dirs.lock().unwrap().insert(path.into());
        self
    }

    pub fn file(&self, path: impl AsRef<Path>) -> Option<String> {
        self.state.lock().unwrap().files.get(path.as_ref()).cloned()
    }

    pub fn has_dir(&self, path: impl AsRef<Path>) -> bool {
        self.state.lock().unwrap().dirs.contains(path.as_ref())
    }

    /// Number of mutating calls observed.
    pub fn writes(&self) -> usize {
        self.state.lock().unwrap().writes
    }
}

impl Filesystem for FakeFilesystem {
    fn create_dir_all(&self, path: &Path) -> JotlResult<()> {
        if self.fail_dirs.lock().unwrap().contains(path) {
            return Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "permission denied".into(),
            }
            .into());
        }
        let mut state = self.state.lock().unwrap();
        state.writes += 1;
        for ancestor in path.ancestors() {
            state.dirs.insert(ancestor.to_path_buf());
        }
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> JotlResult<()> {
        let mut state = self.state.lock().unwrap();
        state.writes += 1;
        state.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn append_file(&self, path: &Path, content: &str) -> JotlResult<()> {
        let mut state = self.state.lock().unwrap();
        state.writes += 1;
        state
            .files
            .entry(path.to_path_buf())
            .or_default()
            .push_str(content);
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> JotlResult<String> {
        self.file(path).ok_or_else(|| {
            ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "not found".into(),
            }
            .into()
        })
    }

    fn create_file_if_missing(&self, path: &Path) -> JotlResult<bool> {
        let mut state = self.state.lock().unwrap();
        if state.files.contains_key(path) || state.dirs.contains(path) {
            return Ok(false);
        }
        state.writes += 1;
        state.files.insert(path.to_path_buf(), String::new());
        Ok(true)
    }

    fn exists(&self, path: &Path) -> bool {
        let state = self.state.lock().unwrap();
        state.files.contains_key(path) || state.dirs.contains(path)
    }
}

/// Renders `KEY=value` lines in sorted key order, enough to assert substitution.
#[derive(Debug, Default)]
pub struct LineRenderer;

impl TemplateRenderer for LineRenderer {
    fn render(&self, kind: TemplateKind, context: &RenderContext) -> JotlResult<String> {
        let mut out = format!("# {}\n", kind.as_str());
        for (key, value) in context.variables() {
            out.push_str(&format!("{key}={value}\n"));
        }
        Ok(out)
    }
}

#[derive(Debug, Default)]
pub struct YamlCodec;

impl SettingsCodec for YamlCodec {
    fn encode(&self, settings: &JotlSettings) -> JotlResult<String> {
        serde_yaml_ng::to_string(settings).map_err(|e| {
            ApplicationError::CodecFailed {
                reason: e.to_string(),
            }
            .into()
        })
    }

    fn decode(&self, text: &str) -> JotlResult<JotlSettings> {
        serde_yaml_ng::from_str(text).map_err(|e| {
            ApplicationError::CodecFailed {
                reason: e.to_string(),
            }
            .into()
        })
    }
}

/// Indicator that only counts calls.
#[derive(Debug, Clone, Default)]
pub struct CountingIndicator {
    pub ticks: Arc<AtomicUsize>,
    pub releases: Arc<AtomicUsize>,
    pub panic_on_tick: bool,
}

impl CountingIndicator {
    pub fn releases(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }

    pub fn ticks(&self) -> usize {
        self.ticks.load(Ordering::SeqCst)
    }
}

impl Indicator for CountingIndicator {
    fn tick(&mut self) {
        self.ticks.fetch_add(1, Ordering::SeqCst);
        if self.panic_on_tick {
            panic!("indicator exploded");
        }
    }

    fn release(&mut self) {
        self.releases.fetch_add(1, Ordering::SeqCst);
    }
}
