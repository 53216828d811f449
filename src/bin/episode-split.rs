use std::io;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use chapter_split::Ffmpeg;
use chapter_split::config::{DEFAULT_LOG_FILTER, SplitConfig};
use chapter_split::prompt::prompt_chapters_per_episode;
use chapter_split::split::split_videos;
use clap::Parser;
use env_logger::Env;
use log::{error, info};

#[derive(Parser)]
/// Cut media files into episodes at the chapter boundaries listed in chapters.json
pub struct Args {
    #[arg(short, long)]
    /// Directory holding the media files and receiving the episode folders, current directory by default
    dir: Option<PathBuf>,
    #[arg(short, long)]
    /// Chapters file, <dir>/chapters.json by default
    chapters: Option<PathBuf>,
    #[arg(short = 'n', long)]
    /// Chapters per episode, asked interactively when missing
    chapters_per_episode: Option<NonZeroUsize>,
    #[arg(long)]
    /// Path to the ffmpeg executable
    ffmpeg: Option<PathBuf>,
}

fn main() {
    let env = Env::new().default_filter_or(DEFAULT_LOG_FILTER);
    env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_target(false)
        .init();
    let args = Args::parse();

    let work_dir = args
        .dir
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));
    let config = SplitConfig::new(work_dir, args.chapters);

    let chapters_per_episode = match args.chapters_per_episode {
        Some(n) => n,
        None => match prompt_chapters_per_episode(io::stdin().lock(), io::stdout()) {
            Ok(n) => n,
            Err(e) => {
                error!("{e:#}");
                return;
            }
        },
    };

    let tool = Ffmpeg::new(args.ffmpeg, None);
    match split_videos(
        &tool,
        &config.chapters_path,
        chapters_per_episode,
        &config.work_dir,
    ) {
        Ok(report) => info!(
            "{} episode(s) created, {} failed, {} file(s) skipped",
            report.created.len(),
            report.failed.len(),
            report.skipped.len()
        ),
        Err(e) => error!("{e:#}"),
    }

    info!("Splitting process finished.");
}
