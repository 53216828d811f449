#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use chapter_split::chapters::{ProbeChapter, ProbeTags, ProbeTime};
use chapter_split::{MediaTool, ToolError};

#[derive(Clone)]
pub enum Probe {
    Chapters(Vec<ProbeChapter>),
    Fails,
    Missing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrimCall {
    pub input: PathBuf,
    pub start: f64,
    pub end: f64,
    pub output: PathBuf,
}

/// Records every call and answers from canned data instead of running ffmpeg.
#[derive(Default)]
pub struct FakeTool {
    pub probes: HashMap<String, Probe>,
    /// Output file names (e.g. `ep_02.mp4`) whose trim fails.
    pub failing_trims: Vec<String>,
    pub ffmpeg_missing: bool,
    pub probed: RefCell<Vec<PathBuf>>,
    pub trims: RefCell<Vec<TrimCall>>,
}

impl FakeTool {
    pub fn with_probe(mut self, file_name: &str, probe: Probe) -> Self {
        self.probes.insert(file_name.to_string(), probe);
        self
    }

    pub fn calls(&self) -> usize {
        self.probed.borrow().len() + self.trims.borrow().len()
    }
}

impl MediaTool for FakeTool {
    fn probe_chapters(&self, path: &Path) -> Result<Vec<ProbeChapter>, ToolError> {
        self.probed.borrow_mut().push(path.to_path_buf());
        let name = path.file_name().unwrap().to_str().unwrap();

        match self.probes.get(name) {
            Some(Probe::Chapters(chapters)) => Ok(chapters.clone()),
            Some(Probe::Missing) => Err(ToolError::NotFound {
                program: "ffprobe".into(),
            }),
            Some(Probe::Fails) | None => Err(ToolError::Failed {
                program: "ffprobe".into(),
                status: "exit status: 1".into(),
                stderr: "Invalid data found when processing input".into(),
            }),
        }
    }

    fn trim(&self, input: &Path, start: f64, end: f64, output: &Path) -> Result<(), ToolError> {
        self.trims.borrow_mut().push(TrimCall {
            input: input.to_path_buf(),
            start,
            end,
            output: output.to_path_buf(),
        });

        if self.ffmpeg_missing {
            return Err(ToolError::NotFound {
                program: "ffmpeg".into(),
            });
        }
        let name = output.file_name().unwrap().to_str().unwrap();
        if self.failing_trims.iter().any(|f| f == name) {
            return Err(ToolError::Failed {
                program: "ffmpeg".into(),
                status: "exit status: 1".into(),
                stderr: "Conversion failed!".into(),
            });
        }

        fs::write(output, b"").unwrap();
        Ok(())
    }
}

pub fn probe_chapter(title: Option<&str>, start: &str, end: &str) -> ProbeChapter {
    ProbeChapter {
        start_time: Some(ProbeTime::Text(start.to_string())),
        end_time: Some(ProbeTime::Text(end.to_string())),
        tags: ProbeTags {
            title: title.map(str::to_string),
        },
    }
}
