//! The external programs doing the actual media work.
//!
//! Everything that touches `ffprobe` or `ffmpeg` goes through [`MediaTool`], so
//! the extractor and the splitter can be driven by a fake in tests.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use log::debug;
use thiserror::Error;

use crate::chapters::{ProbeChapter, parse_probe_output};
use crate::config::{FFMPEG_ENV, FFPROBE_ENV};
use crate::utils::get_third_party_binary;

#[derive(Debug, Error)]
pub enum ToolError {
    /// The executable does not exist (or is not on `PATH`).
    #[error("'{program}' executable not found. Ensure it's installed and accessible")]
    NotFound { program: String },

    #[error("Failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("'{program}' failed with status {status}: {stderr}")]
    Failed {
        program: String,
        /// Exit status as printed by the OS, e.g. `exit status: 1`.
        status: String,
        stderr: String,
    },

    #[error("Could not read output of '{program}': {source}")]
    Parse {
        program: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ToolError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ToolError::NotFound { .. })
    }
}

/// Narrow interface over the probe and trim capabilities.
pub trait MediaTool {
    /// Raw chapter records of `path`, in file order.
    fn probe_chapters(&self, path: &Path) -> Result<Vec<ProbeChapter>, ToolError>;

    /// Stream-copy `[start, end)` of `input` into `output`, overwriting it.
    /// `start` and `end` are in seconds.
    fn trim(&self, input: &Path, start: f64, end: f64, output: &Path) -> Result<(), ToolError>;
}

/// [`MediaTool`] backed by the `ffmpeg` and `ffprobe` executables.
#[derive(Debug, Clone)]
pub struct Ffmpeg {
    ffmpeg: PathBuf,
    ffprobe: PathBuf,
}

impl Default for Ffmpeg {
    fn default() -> Self {
        Self::new(None, None)
    }
}

impl Ffmpeg {
    /// Explicit paths win, then the environment overrides, then `PATH`.
    pub fn new(ffmpeg: Option<PathBuf>, ffprobe: Option<PathBuf>) -> Self {
        Self {
            ffmpeg: ffmpeg.unwrap_or_else(|| get_third_party_binary("ffmpeg", FFMPEG_ENV)),
            ffprobe: ffprobe.unwrap_or_else(|| get_third_party_binary("ffprobe", FFPROBE_ENV)),
        }
    }

    pub fn ffmpeg_path(&self) -> &Path {
        &self.ffmpeg
    }

    pub fn ffprobe_path(&self) -> &Path {
        &self.ffprobe
    }
}

impl MediaTool for Ffmpeg {
    fn probe_chapters(&self, path: &Path) -> Result<Vec<ProbeChapter>, ToolError> {
        let mut command = Command::new(&self.ffprobe);
        command
            .args(["-v", "error", "-print_format", "json", "-show_chapters"])
            .arg(path);

        let output = run(&mut command, &self.ffprobe)?;
        let json = String::from_utf8_lossy(&output.stdout);
        let probe = parse_probe_output(&json).map_err(|source| ToolError::Parse {
            program: program_name(&self.ffprobe),
            source,
        })?;

        Ok(probe.chapters)
    }

    fn trim(&self, input: &Path, start: f64, end: f64, output: &Path) -> Result<(), ToolError> {
        let mut command = Command::new(&self.ffmpeg);
        command
            .args(trim_args(input, start, end, output))
            .stdin(std::process::Stdio::null());

        run(&mut command, &self.ffmpeg)?;
        Ok(())
    }
}

/// Arguments for a stream copy of `[start, end)` with all streams mapped and
/// negative timestamps shifted to zero. Times are passed as plain seconds so
/// the cut lands exactly on the chapter boundary.
pub fn trim_args(input: &Path, start: f64, end: f64, output: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = ["-hide_banner", "-y", "-ss"]
        .into_iter()
        .map(OsString::from)
        .collect();
    args.push(start.to_string().into());
    args.push("-to".into());
    args.push(end.to_string().into());
    args.push("-i".into());
    args.push(input.into());
    args.extend(
        ["-map", "0", "-c", "copy", "-avoid_negative_ts", "make_zero"]
            .into_iter()
            .map(OsString::from),
    );
    args.push(output.into());
    args
}

fn program_name(program: &Path) -> String {
    program.display().to_string()
}

/// Runs `command` to completion with captured output.
fn run(command: &mut Command, program: &Path) -> Result<Output, ToolError> {
    debug!("Running {:?}", command);

    let output = command.output().map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ToolError::NotFound {
                program: program_name(program),
            }
        } else {
            ToolError::Spawn {
                program: program_name(program),
                source,
            }
        }
    })?;

    if !output.status.success() {
        return Err(ToolError::Failed {
            program: program_name(program),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(output)
}
