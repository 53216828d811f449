/*

chapters.json

{
    "Show S01.m4v": [
        {
            "title": "Opening",
            "start_time": 0.0,
            "end_time": 92.312
        },
        {
            "title": "Part A",
            "start_time": 92.312,
            "end_time": 701.5
        }
    ]
}

*/

pub mod chapters;
pub mod config;
pub mod extract;
pub mod file;
pub mod prompt;
pub mod split;
pub mod tool;
pub mod utils;

pub use chapters::{Chapter, ChapterSet};
pub use split::{Episode, SplitReport, format_time, plan_episodes};
pub use tool::{Ffmpeg, MediaTool, ToolError};
