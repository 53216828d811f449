use std::path::PathBuf;

use chapter_split::Ffmpeg;
use chapter_split::config::{CHAPTERS_FILE_NAME, DEFAULT_EXTENSION, DEFAULT_LOG_FILTER, ExtractConfig};
use chapter_split::extract::run_extractor;
use clap::Parser;
use env_logger::Env;

#[derive(Parser)]
/// Probe the media files of a directory for chapters and write them to a JSON file
pub struct Args {
    #[arg(short, long)]
    /// Directory to scan, current directory by default
    dir: Option<PathBuf>,
    #[arg(short, long, default_value = DEFAULT_EXTENSION)]
    /// Extension of the files to probe (case-insensitive)
    extension: String,
    #[arg(short, long, default_value = CHAPTERS_FILE_NAME)]
    /// Name of the JSON file written into the scanned directory
    output: String,
    #[arg(long)]
    /// Path to the ffprobe executable
    ffprobe: Option<PathBuf>,
}

fn main() {
    let env = Env::new().default_filter_or(DEFAULT_LOG_FILTER);
    env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_target(false)
        .init();
    let args = Args::parse();

    let directory = args
        .dir
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));
    let config = ExtractConfig {
        directory,
        extension: args.extension,
        output_name: args.output,
    };

    let tool = Ffmpeg::new(None, args.ffprobe);
    run_extractor(&tool, &config);
}
