use std::path::{Path, PathBuf};

/// Extension of the media files the extractor looks at.
pub const DEFAULT_EXTENSION: &str = "m4v";

/// Name of the file written by the extractor and read by the splitter.
pub const CHAPTERS_FILE_NAME: &str = "chapters.json";

/// Overrides the `ffmpeg` executable when no path is given on the command line.
pub const FFMPEG_ENV: &str = "CHAPTER_SPLIT_FFMPEG";

/// Overrides the `ffprobe` executable when no path is given on the command line.
pub const FFPROBE_ENV: &str = "CHAPTER_SPLIT_FFPROBE";

pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone)]
pub struct ExtractConfig {
    pub directory: PathBuf,
    pub extension: String,
    pub output_name: String,
}

impl ExtractConfig {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            extension: DEFAULT_EXTENSION.to_string(),
            output_name: CHAPTERS_FILE_NAME.to_string(),
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.directory.join(&self.output_name)
    }
}

#[derive(Debug, Clone)]
pub struct SplitConfig {
    /// Where source files are looked up and episode folders are created.
    pub work_dir: PathBuf,
    pub chapters_path: PathBuf,
}

impl SplitConfig {
    pub fn new(work_dir: impl Into<PathBuf>, chapters_path: Option<PathBuf>) -> Self {
        let work_dir = work_dir.into();
        let chapters_path = chapters_path.unwrap_or_else(|| default_chapters_path(&work_dir));
        Self {
            work_dir,
            chapters_path,
        }
    }
}

pub fn default_chapters_path(dir: &Path) -> PathBuf {
    dir.join(CHAPTERS_FILE_NAME)
}
