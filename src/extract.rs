//! Chapter extraction: probe every matching file of a directory and collect the
//! chapters into a [`ChapterSet`].

use std::io;
use std::path::Path;

use log::{error, info, warn};

use crate::chapters::{Chapter, ChapterSet};
use crate::config::ExtractConfig;
use crate::file::{EntryKind, has_extension, list_dir};
use crate::tool::MediaTool;

/// Normalized chapters of `path`. Any probe failure is logged and yields an
/// empty list.
pub fn extract_chapters(tool: &impl MediaTool, path: impl AsRef<Path>) -> Vec<Chapter> {
    let path = path.as_ref();

    let probe_chapters = match tool.probe_chapters(path) {
        Ok(chapters) => chapters,
        Err(e) => {
            error!("Error probing file {}: {e}", path.display());
            return Vec::new();
        }
    };

    let chapters = probe_chapters
        .into_iter()
        .map(Chapter::try_from)
        .collect::<anyhow::Result<Vec<_>>>();

    match chapters {
        Ok(chapters) => chapters,
        Err(e) => {
            error!(
                "An unexpected error occurred with file {}: {e:#}",
                path.display()
            );
            Vec::new()
        }
    }
}

/// Probes every file in `directory` whose extension matches `extension`.
/// Files without chapters are left out. A missing or unreadable directory is
/// logged and gives an empty set.
pub fn scan_and_extract(
    tool: &impl MediaTool,
    directory: impl AsRef<Path>,
    extension: &str,
) -> ChapterSet {
    let directory = directory.as_ref();
    let mut chapter_set = ChapterSet::new();

    let entries = match list_dir(directory) {
        Ok(entries) => entries,
        Err(e) => {
            let kind = e
                .root_cause()
                .downcast_ref::<io::Error>()
                .map(io::Error::kind);
            match kind {
                Some(io::ErrorKind::NotFound) => {
                    error!("Error: Directory not found: {}", directory.display())
                }
                Some(io::ErrorKind::PermissionDenied) => error!(
                    "Error: Permission denied to access directory: {}",
                    directory.display()
                ),
                _ => error!("{e:#}"),
            }
            return chapter_set;
        }
    };

    for entry in entries {
        let EntryKind::File(path) = entry else {
            continue;
        };
        if !has_extension(&path, extension) {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
            warn!("Skipping file with non UTF-8 name: {}", path.display());
            continue;
        };

        info!("Processing file: {file_name}");
        let chapters = extract_chapters(tool, &path);
        if chapters.is_empty() {
            info!("No chapters found or error processing: {file_name}");
        } else {
            chapter_set.insert(file_name, chapters);
        }
    }

    chapter_set
}

/// Scans `config.directory` and writes the chapters file next to the media.
/// Returns the extracted set; writing failures are logged, not returned.
pub fn run_extractor(tool: &impl MediaTool, config: &ExtractConfig) -> ChapterSet {
    info!("Scanning directory: {}", config.directory.display());
    let chapter_set = scan_and_extract(tool, &config.directory, &config.extension);

    if chapter_set.is_empty() {
        info!("No chapter data extracted.");
        return chapter_set;
    }

    let output_path = config.output_path();
    match chapter_set.save(&output_path) {
        Ok(()) => info!(
            "Chapter data successfully written to {}",
            output_path.display()
        ),
        Err(e) => error!("{e:#}"),
    }

    chapter_set
}
