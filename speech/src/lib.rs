//! Local speech synthesis behind a swappable interface.
//!
//! The dashboard announces resolved landmarks out loud. Synthesis is an
//! external collaborator: the [`Announcer`] trait is the seam, with
//! [`CommandAnnouncer`] driving whatever local synthesis command the host
//! offers and [`NullAnnouncer`] standing in for tests and muted sessions.
//!
//! Announcements are synchronous: `announce` returns once playback has
//! finished, matching the one-interaction-at-a-time model of the rest of
//! the app.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use thiserror::Error;

/// Synthesis commands probed in order. Each takes the text as its final
/// argument and blocks until playback completes.
const CANDIDATES: &[(&str, &[&str])] = &[
    ("say", &[]),
    ("espeak", &[]),
    ("spd-say", &["--wait"]),
];

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("failed to launch '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' exited with {status}")]
    Failed {
        program: String,
        status: std::process::ExitStatus,
    },
}

/// Something that can speak a line of text.
pub trait Announcer: Send + Sync {
    fn announce(&self, text: &str) -> Result<(), SpeechError>;
}

/// Discards every announcement. Used by tests and when speech is disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAnnouncer;

impl Announcer for NullAnnouncer {
    fn announce(&self, _text: &str) -> Result<(), SpeechError> {
        Ok(())
    }
}

/// Speaks through a local synthesis command, one child process per
/// announcement.
#[derive(Debug, Clone)]
pub struct CommandAnnouncer {
    program: String,
    args: Vec<String>,
}

impl CommandAnnouncer {
    /// Probe the host for a synthesis command, or honor an explicit
    /// override (program plus fixed arguments, whitespace-separated).
    ///
    /// Returns `None` when the host has no usable command; callers fall
    /// back to [`NullAnnouncer`].
    #[must_use]
    pub fn detect(override_command: Option<&str>) -> Option<Self> {
        if let Some(raw) = override_command {
            let mut parts = raw.split_whitespace().map(str::to_string);
            let program = parts.next()?;
            return Some(Self {
                program,
                args: parts.collect(),
            });
        }

        for (program, args) in CANDIDATES {
            if find_in_path(program).is_some() {
                tracing::debug!(program, "Selected speech synthesis command");
                return Some(Self {
                    program: (*program).to_string(),
                    args: args.iter().map(ToString::to_string).collect(),
                });
            }
        }
        tracing::warn!("No speech synthesis command found on PATH");
        None
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Announcer for CommandAnnouncer {
    fn announce(&self, text: &str) -> Result<(), SpeechError> {
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|source| SpeechError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(SpeechError::Failed {
                program: self.program.clone(),
                status,
            })
        }
    }
}

/// Locate an executable on PATH.
fn find_in_path(program: &str) -> Option<PathBuf> {
    let path_var = env::var_os("PATH")?;
    for dir in env::split_paths(&path_var) {
        let mut candidate = dir.join(program);
        if is_executable(&candidate) {
            return Some(candidate);
        }
        // Windows needs the extension appended.
        if cfg!(windows) {
            let mut with_ext = OsString::from(candidate.as_os_str());
            with_ext.push(".exe");
            candidate = PathBuf::from(with_ext);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }
    None
}

#[cfg(unix)]
fn is_executable(path: &std::path::Path) -> bool {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &std::path::Path) -> bool {
    path.is_file()
}
