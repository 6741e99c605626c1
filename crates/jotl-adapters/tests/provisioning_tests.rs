//! End-to-end provisioning against the real adapters.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use jotl_adapters::{BuiltinRenderer, LocalFilesystem, MemoryFilesystem, YamlSettingsCodec};
use jotl_core::prelude::*;
use tempfile::TempDir;

/// Records every command and reports success.
#[derive(Clone, Default)]
struct RecordingRunner {
    calls: Arc<Mutex<Vec<String>>>,
}

impl RecordingRunner {
    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, program: &str, args: &[String], _dir: &Path) -> JotlResult<CommandOutput> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{program} {}", args.join(" ")));
        Ok(CommandOutput::with_exit_code(0))
    }
}

struct NoopIndicator;

impl Indicator for NoopIndicator {
    fn tick(&mut self) {}
    fn release(&mut self) {}
}

struct NoPrompts;

impl Prompter for NoPrompts {
    fn input(&self, _: &str) -> io::Result<PromptAnswer<String>> {
        panic!("unexpected prompt");
    }

    fn select(&self, _: &SelectionStep) -> io::Result<PromptAnswer<usize>> {
        panic!("unexpected prompt");
    }
}

fn service(fs: Box<dyn Filesystem>, runner: &RecordingRunner) -> InitService {
    InitService::new(ProvisioningPipeline::new(
        fs,
        Box::new(runner.clone()),
        Box::new(BuiltinRenderer::new()),
        Box::new(YamlSettingsCodec::new()),
    ))
}

fn draft(driver: StorageDriver, git: bool) -> ProjectDraft {
    ProjectDraft::new()
        .with_name("demo")
        .with_storage_driver(driver)
        .with_log_level(LogLevel::Debug)
        .with_version_control(git)
}

fn init(svc: &InitService, draft: ProjectDraft, root: &Path) -> JotlResult<InitReport> {
    let root = root.to_path_buf();
    svc.execute(
        draft,
        &StepCatalog::new(None, None),
        &NoPrompts,
        move || Ok(root),
        || NoopIndicator,
    )
}

#[test]
fn sqlite_project_layout_on_disk() {
    let dir = TempDir::new().unwrap();
    let runner = RecordingRunner::default();
    let svc = service(Box::new(LocalFilesystem::new()), &runner);

    init(&svc, draft(StorageDriver::Sqlite, false), dir.path()).unwrap();

    let root = dir.path();
    assert!(root.join("jotl/config.yaml").is_file());
    assert!(root.join("jotl/db/jotl.db").is_file());
    assert!(!root.join("jotl/docker-compose.yml").exists());

    let env = std::fs::read_to_string(root.join("jotl/.env")).unwrap();
    assert!(env.contains("DB_CONNECTION_STRING=jotl/db/jotl.db"));
    assert!(env.contains("APP_NAME=demo"));

    assert_eq!(
        std::fs::read_to_string(root.join(".gitignore")).unwrap(),
        "/jotl\n"
    );
    assert_eq!(runner.calls(), ["go get -u github.com/mattn/go-sqlite3"]);
}

#[test]
fn postgres_project_layout_on_disk() {
    let dir = TempDir::new().unwrap();
    let runner = RecordingRunner::default();
    let svc = service(Box::new(LocalFilesystem::new()), &runner);

    init(&svc, draft(StorageDriver::Postgres, false), dir.path()).unwrap();

    let root = dir.path();
    let compose = std::fs::read_to_string(root.join("jotl/docker-compose.yml")).unwrap();
    assert!(!compose.contains("{{"));
    assert!(compose.contains("POSTGRES_DB: jotl"));
    assert!(!root.join("jotl/db").exists());
}

#[test]
fn git_enabled_runs_preflight_then_init() {
    let dir = TempDir::new().unwrap();
    let runner = RecordingRunner::default();
    let svc = service(Box::new(LocalFilesystem::new()), &runner);

    init(&svc, draft(StorageDriver::Sqlite, true), dir.path()).unwrap();

    assert_eq!(
        runner.calls(),
        [
            "git config --get user.email",
            "git init",
            "go get -u github.com/mattn/go-sqlite3",
        ]
    );
}

#[test]
fn rerun_converges() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(".gitignore"), "target/\n").unwrap();
    let runner = RecordingRunner::default();
    let svc = service(Box::new(LocalFilesystem::new()), &runner);

    let first = init(&svc, draft(StorageDriver::Sqlite, false), dir.path()).unwrap();
    let second = init(&svc, draft(StorageDriver::Sqlite, false), dir.path()).unwrap();

    assert!(!first.already_initialized);
    assert!(second.already_initialized);
    assert_eq!(
        std::fs::read_to_string(dir.path().join(".gitignore")).unwrap(),
        "target/\n/jotl\n"
    );
}

#[test]
fn persisted_config_decodes_to_resolved_values() {
    let dir = TempDir::new().unwrap();
    let runner = RecordingRunner::default();
    let svc = service(Box::new(LocalFilesystem::new()), &runner);

    let report = init(&svc, draft(StorageDriver::Postgres, false), dir.path()).unwrap();

    let text = std::fs::read_to_string(dir.path().join("jotl/config.yaml")).unwrap();
    let decoded = YamlSettingsCodec::new().decode(&text).unwrap();
    assert_eq!(decoded, JotlSettings::from_config(&report.config));
}

#[test]
fn invalid_name_touches_nothing() {
    let fs = MemoryFilesystem::new();
    let runner = RecordingRunner::default();
    let svc = service(Box::new(fs.clone()), &runner);

    let err = init(
        &svc,
        ProjectDraft::new().with_name("no spaces allowed"),
        Path::new("/work"),
    )
    .unwrap_err();

    assert!(matches!(err, JotlError::Domain(_)));
    assert_eq!(fs.write_count(), 0);
    assert!(fs.list_files().is_empty());
    assert!(runner.calls().is_empty());
}

#[test]
fn memory_filesystem_sees_full_layout() {
    let fs = MemoryFilesystem::new();
    fs.create_dir_all(Path::new("/work")).unwrap();
    let runner = RecordingRunner::default();
    let svc = service(Box::new(fs.clone()), &runner);

    init(&svc, draft(StorageDriver::Sqlite, false), Path::new("/work")).unwrap();

    let files: Vec<PathBuf> = fs.list_files();
    assert_eq!(
        files,
        [
            PathBuf::from("/work/.gitignore"),
            PathBuf::from("/work/jotl/.env"),
            PathBuf::from("/work/jotl/config.yaml"),
            PathBuf::from("/work/jotl/db/jotl.db"),
        ]
    );
}
