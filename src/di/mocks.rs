//! Mock implementations of service traits for testing

use super::traits::{ConfigProvider, PackageFetcher, ProcessRunner, RemoteHost};
use crate::core::{HelperError, HelperResult};
use crate::http::{FetchedBody, ResponseKind};
use crate::process::ProcessOutput;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Mock configuration provider for testing
///
/// # Example
///
/// ```
/// use vsplugin_helper::di::mocks::MockConfigProvider;
/// use vsplugin_helper::di::ConfigProvider;
/// use std::path::PathBuf;
///
/// let mut config = MockConfigProvider::default();
/// config.editor_path = Some(PathBuf::from("/opt/trae"));
///
/// assert_eq!(config.editor_binary(), "trae");
/// ```
#[derive(Clone)]
pub struct MockConfigProvider {
    pub editor_path: Option<PathBuf>,
    pub remote_editor_path: Option<String>,
    pub editor_binary: String,
    pub marketplace_url: String,
    pub staging_dir: PathBuf,
    pub remote_staging_dir: String,
}

impl Default for MockConfigProvider {
    fn default() -> Self {
        Self {
            editor_path: None,
            remote_editor_path: None,
            editor_binary: "trae".to_string(),
            marketplace_url: "https://marketplace.test".to_string(),
            staging_dir: std::env::temp_dir().join("vsplugin-helper-test"),
            remote_staging_dir: "/tmp/vsplugin-helper".to_string(),
        }
    }
}

impl ConfigProvider for MockConfigProvider {
    fn editor_path(&self) -> Option<PathBuf> {
        self.editor_path.clone()
    }

    fn remote_editor_path(&self) -> Option<&str> {
        self.remote_editor_path.as_deref()
    }

    fn editor_binary(&self) -> &str {
        &self.editor_binary
    }

    fn marketplace_url(&self) -> &str {
        &self.marketplace_url
    }

    fn staging_dir(&self) -> PathBuf {
        self.staging_dir.clone()
    }

    fn remote_staging_dir(&self) -> &str {
        &self.remote_staging_dir
    }
}

/// A canned response for [`MockPackageFetcher`]
#[derive(Debug, Clone)]
pub enum MockResponse {
    Text(String),
    Binary(Vec<u8>),
    NotFound,
    NetworkError(String),
}

/// Mock HTTP fetcher for testing
///
/// Responses are queued per URL; the last queued response repeats. Every
/// request is recorded.
///
/// # Example
///
/// ```
/// use vsplugin_helper::di::mocks::MockPackageFetcher;
///
/// let fetcher = MockPackageFetcher::new();
/// fetcher.add_text("https://marketplace.test/items?itemName=a.b", "<html/>");
/// assert!(fetcher.requests().is_empty());
/// ```
#[derive(Clone, Default)]
pub struct MockPackageFetcher {
    responses: Arc<Mutex<HashMap<String, Vec<MockResponse>>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockPackageFetcher {
    /// Create a new mock fetcher with no responses
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for `url`
    pub fn add_response(&self, url: &str, response: MockResponse) {
        self.responses
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_default()
            .push(response);
    }

    pub fn add_text(&self, url: &str, body: &str) {
        self.add_response(url, MockResponse::Text(body.to_string()));
    }

    pub fn add_binary(&self, url: &str, body: &[u8]) {
        self.add_response(url, MockResponse::Binary(body.to_vec()));
    }

    /// URLs requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PackageFetcher for MockPackageFetcher {
    async fn fetch(&self, url: &str, kind: ResponseKind) -> HelperResult<FetchedBody> {
        self.requests.lock().unwrap().push(url.to_string());

        let response = {
            let mut responses = self.responses.lock().unwrap();
            match responses.get_mut(url) {
                Some(queue) if queue.len() > 1 => Some(queue.remove(0)),
                Some(queue) => queue.first().cloned(),
                None => None,
            }
        };

        match response {
            Some(MockResponse::Text(text)) => Ok(match kind {
                ResponseKind::Text => FetchedBody::Text(text),
                ResponseKind::Binary => FetchedBody::Binary(text.into_bytes()),
            }),
            Some(MockResponse::Binary(bytes)) => Ok(FetchedBody::Binary(bytes)),
            Some(MockResponse::NotFound) | None => Err(HelperError::NotFound(url.to_string())),
            Some(MockResponse::NetworkError(msg)) => Err(HelperError::NetworkError(msg)),
        }
    }
}

/// One recorded call to [`MockProcessRunner`]
#[derive(Debug, Clone)]
pub struct RecordedProcess {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
    /// Whether every path-like argument existed when the process ran
    pub paths_existed: bool,
}

/// Mock process runner for testing
///
/// Returns a fixed output (or spawn error) and records each invocation.
#[derive(Clone)]
pub struct MockProcessRunner {
    output: Arc<Mutex<Option<ProcessOutput>>>,
    calls: Arc<Mutex<Vec<RecordedProcess>>>,
}

impl MockProcessRunner {
    /// A runner whose processes succeed silently
    pub fn new() -> Self {
        Self::with_output(ProcessOutput::success(""))
    }

    pub fn with_output(output: ProcessOutput) -> Self {
        Self {
            output: Arc::new(Mutex::new(Some(output))),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A runner whose processes fail to spawn
    pub fn failing_to_spawn() -> Self {
        Self {
            output: Arc::new(Mutex::new(None)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Vec<RecordedProcess> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockProcessRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProcessRunner for MockProcessRunner {
    async fn run(
        &self,
        program: &Path,
        args: &[String],
        working_dir: Option<&Path>,
    ) -> HelperResult<ProcessOutput> {
        let paths_existed = args
            .iter()
            .filter(|a| !a.starts_with("--"))
            .all(|a| Path::new(a).exists());

        self.calls.lock().unwrap().push(RecordedProcess {
            program: program.to_path_buf(),
            args: args.to_vec(),
            working_dir: working_dir.map(Path::to_path_buf),
            paths_existed,
        });

        self.output.lock().unwrap().clone().ok_or_else(|| {
            HelperError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} not found", program.display()),
            ))
        })
    }
}

/// Mock remote host for testing
///
/// Keeps remote files in memory and records every command.
#[derive(Clone)]
pub struct MockRemoteHost {
    name: String,
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    dirs: Arc<Mutex<Vec<String>>>,
    commands: Arc<Mutex<Vec<String>>>,
    exec_output: Arc<Mutex<ProcessOutput>>,
    drop_writes: bool,
}

impl MockRemoteHost {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            files: Arc::new(Mutex::new(HashMap::new())),
            dirs: Arc::new(Mutex::new(Vec::new())),
            commands: Arc::new(Mutex::new(Vec::new())),
            exec_output: Arc::new(Mutex::new(ProcessOutput::success(""))),
            drop_writes: false,
        }
    }

    /// Accept writes without storing them, so transfers never confirm
    pub fn dropping_writes(mut self) -> Self {
        self.drop_writes = true;
        self
    }

    /// Set the output returned by `exec`
    pub fn with_exec_output(self, output: ProcessOutput) -> Self {
        *self.exec_output.lock().unwrap() = output;
        self
    }

    pub fn add_file(&self, path: &str, data: &[u8]) {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_string(), data.to_vec());
    }

    pub fn has_file(&self, path: &str) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }

    pub fn dirs(&self) -> Vec<String> {
        self.dirs.lock().unwrap().clone()
    }

    /// Commands passed to `exec`, in order
    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteHost for MockRemoteHost {
    fn name(&self) -> &str {
        &self.name
    }

    async fn ensure_dir(&self, dir: &str) -> HelperResult<()> {
        self.dirs.lock().unwrap().push(dir.to_string());
        Ok(())
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> HelperResult<()> {
        if !self.drop_writes {
            self.add_file(path, data);
        }
        Ok(())
    }

    async fn file_size(&self, path: &str) -> HelperResult<Option<u64>> {
        Ok(self
            .files
            .lock()
            .unwrap()
            .get(path)
            .map(|data| data.len() as u64))
    }

    async fn exec(&self, command: &str) -> HelperResult<ProcessOutput> {
        self.commands.lock().unwrap().push(command.to_string());
        Ok(self.exec_output.lock().unwrap().clone())
    }

    async fn remove_file(&self, path: &str) -> HelperResult<()> {
        self.files.lock().unwrap().remove(path);
        Ok(())
    }
}
