#![allow(dead_code)]

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use apk_factory::assets::AssetLoader;
use apk_factory::config::FactoryConfig;
use apk_factory::error::{Error, Result};
use apk_factory::process::{CommandRunner, Invocation, ProcessOutput};
use async_trait::async_trait;

pub fn crate_path(relative: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(relative)
}

/// Configuration using the bundled demo template and utility templates.
pub fn demo_config(key_dir: &Path) -> FactoryConfig {
    FactoryConfig {
        template_dir: crate_path("demos/apk-template"),
        util_template_dir: crate_path("util-templates"),
        key_dir: key_dir.to_path_buf(),
        ..FactoryConfig::default()
    }
}

/// Asset loader that records every copy, writes a placeholder file and
/// finishes in reverse order of issue.
#[derive(Default)]
pub struct RecordingLoader {
    pub calls: Mutex<Vec<(String, PathBuf)>>,
    pub completed: AtomicUsize,
    pub failing: HashSet<String>,
}

impl RecordingLoader {
    pub fn failing<I: IntoIterator<Item = &'static str>>(sources: I) -> Self {
        Self { failing: sources.into_iter().map(String::from).collect(), ..Self::default() }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl AssetLoader for RecordingLoader {
    async fn copy(&self, source: &str, destination: &Path) -> Result<()> {
        let issued = {
            let mut calls = self.calls.lock().unwrap();
            calls.push((source.to_string(), destination.to_path_buf()));
            calls.len()
        };
        // Later requests finish first.
        tokio::time::sleep(Duration::from_millis(40u64.saturating_sub(issued as u64 * 10))).await;
        self.completed.fetch_add(1, Ordering::SeqCst);

        if self.failing.contains(source) {
            return Err(Error::AssetError {
                source_ref: source.to_string(),
                reason: "404 Not Found".to_string(),
            });
        }
        std::fs::create_dir_all(destination.parent().unwrap())?;
        std::fs::write(destination, b"png")?;
        Ok(())
    }
}

/// Command runner that records invocations instead of running them.
pub struct RecordingRunner {
    pub invocations: Mutex<Vec<Invocation>>,
    pub keygen_succeeds: bool,
    pub build_succeeds: bool,
    /// The build tool cannot be spawned at all.
    pub build_missing: bool,
    /// Key file written by a successful keygen, after `keygen_delay`.
    pub writes_key: Option<PathBuf>,
    pub keygen_delay: Duration,
}

impl Default for RecordingRunner {
    fn default() -> Self {
        Self {
            invocations: Mutex::default(),
            keygen_succeeds: true,
            build_succeeds: true,
            build_missing: false,
            writes_key: None,
            keygen_delay: Duration::ZERO,
        }
    }
}

impl RecordingRunner {
    pub fn programs(&self) -> Vec<String> {
        self.invocations.lock().unwrap().iter().map(|i| i.program.clone()).collect()
    }
}

#[async_trait]
impl CommandRunner for RecordingRunner {
    async fn run(&self, invocation: &Invocation) -> Result<ProcessOutput> {
        self.invocations.lock().unwrap().push(invocation.clone());
        let keygen = invocation.program == "sh";
        if !keygen && self.build_missing {
            return Err(Error::ProcessError {
                command: invocation.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "program not found"),
            });
        }
        let success = if keygen { self.keygen_succeeds } else { self.build_succeeds };
        if keygen && success {
            tokio::time::sleep(self.keygen_delay).await;
            if let Some(key) = &self.writes_key {
                std::fs::write(key, b"key")?;
            }
        }
        Ok(ProcessOutput {
            success,
            code: Some(if success { 0 } else { 1 }),
            stdout: String::new(),
            stderr: if success { String::new() } else { "BUILD FAILED".to_string() },
        })
    }
}
