//! [`Auditor`] backed by the Lighthouse command line tool.

use super::lhr::parse_lighthouse_json;
use super::Auditor;
use crate::config::AuditorConfig;
use crate::core::{AuditFailure, RawAuditReport};
use crossbeam::channel::{self, Receiver};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use url::Url;

const POLL_INTERVAL: Duration = Duration::from_millis(100);
const STDERR_TAIL_CHARS: usize = 500;

/// Runs `lighthouse <url> --output=json --output-path=stdout` per page.
pub struct LighthouseAuditor {
    config: AuditorConfig,
    binary: Option<PathBuf>,
}

impl LighthouseAuditor {
    pub fn new(config: AuditorConfig) -> Self {
        Self {
            config,
            binary: None,
        }
    }

    fn resolve_binary(&self) -> Result<PathBuf, AuditFailure> {
        match &self.config.lighthouse_path {
            Some(path) if path.is_file() => Ok(path.clone()),
            Some(path) => Err(AuditFailure::Launch(format!(
                "configured lighthouse_path {} does not exist",
                path.display()
            ))),
            None => which::which("lighthouse")
                .map_err(|e| AuditFailure::Launch(format!("lighthouse not found in PATH: {}", e))),
        }
    }

    fn command(&self, binary: &Path, url: &Url) -> Command {
        let mut cmd = Command::new(binary);
        cmd.arg(url.as_str())
            .args(lighthouse_args(&self.config.chrome_flags))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(chrome) = &self.config.chrome_path {
            cmd.env("CHROME_PATH", chrome);
        }
        cmd
    }
}

/// Arguments following the URL on the Lighthouse command line.
pub fn lighthouse_args(chrome_flags: &[String]) -> Vec<String> {
    let mut args = vec![
        "--output=json".to_string(),
        "--output-path=stdout".to_string(),
        "--only-categories=performance".to_string(),
        "--preset=desktop".to_string(),
        "--quiet".to_string(),
    ];
    if !chrome_flags.is_empty() {
        args.push(format!("--chrome-flags={}", chrome_flags.join(" ")));
    }
    args
}

impl Auditor for LighthouseAuditor {
    fn acquire(&mut self) -> Result<(), AuditFailure> {
        let binary = self.resolve_binary()?;
        tracing::debug!("Using lighthouse at {}", binary.display());
        self.binary = Some(binary);
        Ok(())
    }

    fn audit(&mut self, url: &Url) -> Result<RawAuditReport, AuditFailure> {
        if self.binary.is_none() {
            self.acquire()?;
        }
        let binary = self
            .binary
            .clone()
            .ok_or_else(|| AuditFailure::Launch("lighthouse binary not resolved".to_string()))?;

        tracing::info!("Auditing {}", url);
        let started = Instant::now();
        let child = self
            .command(&binary, url)
            .spawn()
            .map_err(|e| AuditFailure::Launch(format!("{}: {}", binary.display(), e)))?;

        let output = run_with_timeout(child, self.config.timeout())?;
        tracing::debug!(
            "Lighthouse finished for {} in {:.1}s",
            url,
            started.elapsed().as_secs_f64()
        );

        if !output.status.success() {
            return Err(AuditFailure::Process {
                status: output.status.to_string(),
                stderr: tail(&output.stderr, STDERR_TAIL_CHARS),
            });
        }

        parse_lighthouse_json(&output.stdout)
    }

    fn release(&mut self) {
        self.binary = None;
    }
}

struct ProcessOutput {
    status: ExitStatus,
    stdout: String,
    stderr: String,
}

/// Drain a pipe on its own thread so a chatty child never blocks on a full
/// pipe buffer while we poll for exit.
fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Receiver<String> {
    let (tx, rx) = channel::bounded(1);
    thread::spawn(move || {
        let mut buf = String::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_string(&mut buf);
        }
        let _ = tx.send(buf);
    });
    rx
}

fn run_with_timeout(mut child: Child, timeout: Duration) -> Result<ProcessOutput, AuditFailure> {
    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());
    let deadline = Instant::now() + timeout;

    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) if Instant::now() >= deadline => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(AuditFailure::Timeout(timeout));
            }
            Ok(None) => thread::sleep(POLL_INTERVAL),
            Err(e) => {
                let _ = child.kill();
                return Err(AuditFailure::Launch(format!("failed to wait on lighthouse: {}", e)));
            }
        }
    };

    Ok(ProcessOutput {
        status,
        stdout: stdout.recv().unwrap_or_default(),
        stderr: stderr.recv().unwrap_or_default(),
    })
}

fn tail(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim();
    let count = trimmed.chars().count();
    trimmed.chars().skip(count.saturating_sub(max_chars)).collect()
}
