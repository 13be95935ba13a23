//! Running external tools (key generation, the build tool).

use crate::error::{Error, Result};
use async_trait::async_trait;
use log::debug;
use std::fmt;
use std::path::PathBuf;
use std::process::Stdio;

/// An external command to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub current_dir: Option<PathBuf>,
}

impl Invocation {
    /// Builds an invocation from a command vector such as `["ant", "release"]`.
    pub fn from_command(command: &[String]) -> Result<Self> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| Error::ConfigError("build command is empty".to_string()))?;
        Ok(Self { program: program.clone(), args: args.to_vec(), current_dir: None })
    }

    /// Runs a rendered script through `sh -c`.
    pub fn shell<S: Into<String>>(script: S) -> Self {
        Self {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), script.into()],
            current_dir: None,
        }
    }

    pub fn in_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.current_dir = Some(dir.into());
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Captured result of a finished process.
#[derive(Debug, Clone, Default)]
pub struct ProcessOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    /// Human readable exit status.
    pub fn status(&self) -> String {
        match self.code {
            Some(code) => format!("exit status {code}"),
            None => "terminated by signal".to_string(),
        }
    }
}

/// Runs external commands. A non-zero exit is reported in [`ProcessOutput`],
/// only failing to start the process is an error.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, invocation: &Invocation) -> Result<ProcessOutput>;
}

/// Runs commands as real child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, invocation: &Invocation) -> Result<ProcessOutput> {
        debug!("Running '{invocation}'");
        let mut command = tokio::process::Command::new(&invocation.program);
        command.args(&invocation.args).stdin(Stdio::null());
        if let Some(dir) = &invocation.current_dir {
            command.current_dir(dir);
        }

        let output = command.output().await.map_err(|source| Error::ProcessError {
            command: invocation.to_string(),
            source,
        })?;

        Ok(ProcessOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_command() {
        let invocation =
            Invocation::from_command(&["ant".to_string(), "release".to_string()]).unwrap();
        assert_eq!(invocation.program, "ant");
        assert_eq!(invocation.args, vec!["release"]);
        assert_eq!(invocation.to_string(), "ant release");
        assert!(Invocation::from_command(&[]).is_err());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_system_runner_captures_output() {
        let output = SystemRunner
            .run(&Invocation::shell("echo out; echo err >&2; exit 3"))
            .await
            .unwrap();
        assert!(!output.success);
        assert_eq!(output.code, Some(3));
        assert_eq!(output.stdout.trim(), "out");
        assert_eq!(output.stderr.trim(), "err");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_system_runner_uses_current_dir() {
        let temp = tempfile::TempDir::new().unwrap();
        let output = SystemRunner
            .run(&Invocation::shell("pwd").in_dir(temp.path()))
            .await
            .unwrap();
        assert!(output.success);
        assert_eq!(
            std::fs::canonicalize(output.stdout.trim()).unwrap(),
            std::fs::canonicalize(temp.path()).unwrap()
        );
    }

    #[tokio::test]
    async fn test_missing_program_is_process_error() {
        let err = SystemRunner
            .run(&Invocation::from_command(&["definitely-not-a-real-tool-xyz".to_string()]).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ProcessError { .. }));
    }
}
