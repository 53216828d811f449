//! Episode splitting: group chapters into episodes and cut each source file
//! with a stream copy per episode.

use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use anyhow::Result;
use log::{error, info, warn};

use crate::chapters::{Chapter, ChapterSet};
use crate::file::strip_extension;
use crate::tool::{MediaTool, ToolError};

/// `HH:MM:SS.mmm`. Milliseconds are truncated, never rounded, and the hour
/// field grows past two digits instead of wrapping.
pub fn format_time(seconds: f64) -> String {
    // NaN and negatives become zero.
    let seconds = seconds.max(0.0);

    let whole = seconds.trunc();
    let milliseconds = ((seconds - whole) * 1000.0) as u64;
    let whole = whole as u64;

    let hours = whole / 3600;
    let minutes = (whole % 3600) / 60;
    let seconds = whole % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}.{milliseconds:03}")
}

/// A run of consecutive chapters written to one output file.
#[derive(Debug, Clone, PartialEq)]
pub struct Episode {
    /// 1-based.
    pub number: usize,
    /// 1-based index of the first chapter.
    pub first_chapter: usize,
    /// 1-based index of the last chapter, inclusive.
    pub last_chapter: usize,
    pub start_time: f64,
    pub end_time: f64,
}

impl Episode {
    pub fn file_name(&self) -> String {
        format!("ep_{:02}.mp4", self.number)
    }

    pub fn num_chapters(&self) -> usize {
        self.last_chapter - self.first_chapter + 1
    }
}

/// Groups `chapters` into `ceil(len / chapters_per_episode)` episodes; the last
/// one takes whatever is left.
pub fn plan_episodes(chapters: &[Chapter], chapters_per_episode: NonZeroUsize) -> Vec<Episode> {
    let per_episode = chapters_per_episode.get();

    chapters
        .chunks(per_episode)
        .enumerate()
        .filter_map(|(i, group)| {
            let first = group.first()?;
            let last = group.last()?;
            let first_chapter = i * per_episode + 1;
            Some(Episode {
                number: i + 1,
                first_chapter,
                last_chapter: first_chapter + group.len() - 1,
                start_time: first.start_time,
                end_time: last.end_time,
            })
        })
        .collect()
}

/// What a splitting run produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplitReport {
    pub created: Vec<PathBuf>,
    pub failed: Vec<PathBuf>,
    /// Entries of the chapters file that were not processed at all.
    pub skipped: Vec<String>,
}

/// Splits every file listed in `chapters_path` into episodes of
/// `chapters_per_episode` chapters. Sources are looked up in `work_dir` and each
/// gets an output folder named after it there.
///
/// Fails before running anything if the chapters file is missing or not valid
/// JSON, and stops at once if the `ffmpeg` executable is missing. Any other
/// failure only skips the file or segment concerned.
pub fn split_videos(
    tool: &impl MediaTool,
    chapters_path: impl AsRef<Path>,
    chapters_per_episode: NonZeroUsize,
    work_dir: impl AsRef<Path>,
) -> Result<SplitReport> {
    let chapter_set = ChapterSet::load(chapters_path)?;
    split_chapter_set(tool, &chapter_set, chapters_per_episode, work_dir)
}

pub fn split_chapter_set(
    tool: &impl MediaTool,
    chapter_set: &ChapterSet,
    chapters_per_episode: NonZeroUsize,
    work_dir: impl AsRef<Path>,
) -> Result<SplitReport> {
    let work_dir = work_dir.as_ref();
    let mut report = SplitReport::default();

    for (file_name, chapters) in chapter_set {
        let input_path = work_dir.join(file_name);
        if !input_path.exists() {
            warn!(
                "Warning: Input file not found: {}. Skipping.",
                input_path.display()
            );
            report.skipped.push(file_name.clone());
            continue;
        }
        if chapters.is_empty() {
            warn!("No chapters listed for {file_name}. Skipping.");
            report.skipped.push(file_name.clone());
            continue;
        }

        let output_dir = work_dir.join(strip_extension(file_name));
        if let Err(e) = fs::create_dir_all(&output_dir) {
            error!(
                "Could not create output directory {}: {e}",
                output_dir.display()
            );
            report.skipped.push(file_name.clone());
            continue;
        }
        info!("Processing: {file_name}");
        info!("Outputting episodes to: {}", output_dir.display());

        for episode in plan_episodes(chapters, chapters_per_episode) {
            let output_name = episode.file_name();
            let output_path = output_dir.join(&output_name);
            let start = format_time(episode.start_time);
            let end = format_time(episode.end_time);

            info!(
                "  Creating {output_name} (Chapters {}-{}) - Start: {start}, End: {end}",
                episode.first_chapter, episode.last_chapter
            );

            match tool.trim(&input_path, episode.start_time, episode.end_time, &output_path) {
                Ok(()) => {
                    info!("  Successfully created {output_name}");
                    report.created.push(output_path);
                }
                Err(e @ ToolError::NotFound { .. }) => {
                    error!("Error: {e}");
                    return Err(e.into());
                }
                Err(ToolError::Failed { stderr, status, .. }) => {
                    error!("  Error creating {output_name} ({status}):");
                    error!("  Stderr: {stderr}");
                    report.failed.push(output_path);
                }
                Err(e) => {
                    error!("  Error creating {output_name}: {e}");
                    report.failed.push(output_path);
                }
            }
        }
    }

    Ok(report)
}
