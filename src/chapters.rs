use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;

pub const UNTITLED_CHAPTER: &str = "Untitled Chapter";

/// A chapter as written to `chapters.json`, times in seconds.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Chapter {
    #[serde(default = "untitled")]
    pub title: String,
    pub start_time: f64,
    pub end_time: f64,
}

fn untitled() -> String {
    UNTITLED_CHAPTER.to_string()
}

/// Chapters of every probed file, keyed by file name.
#[derive(Clone, Debug, Deserialize, Serialize, Default, PartialEq)]
#[serde(transparent)]
pub struct ChapterSet {
    files: BTreeMap<String, Vec<Chapter>>,
}

impl ChapterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, file_name: impl Into<String>, chapters: Vec<Chapter>) {
        self.files.insert(file_name.into(), chapters);
    }

    pub fn get(&self, file_name: &str) -> Option<&[Chapter]> {
        self.files.get(file_name).map(Vec::as_slice)
    }

    pub fn num_files(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<Chapter>)> {
        self.files.iter()
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let set: ChapterSet = serde_json::from_str(json)?;
        Ok(set)
    }

    /// Pretty JSON with four space indentation. Non-ASCII titles are kept as is.
    pub fn to_json_pretty(&self) -> anyhow::Result<String> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        Ok(String::from_utf8(buf)?)
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("Chapters file not found at {}", path.display()))?;
        Self::from_json(&json)
            .with_context(|| format!("Could not decode JSON from {}", path.display()))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let json = self.to_json_pretty()?;
        let mut file = fs::File::create(path)
            .with_context(|| format!("Error writing JSON file {}", path.display()))?;
        file.write_all(json.as_bytes())
            .with_context(|| format!("Error writing JSON file {}", path.display()))?;
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ChapterSet {
    type Item = (&'a String, &'a Vec<Chapter>);
    type IntoIter = std::collections::btree_map::Iter<'a, String, Vec<Chapter>>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}

/// `ffprobe -print_format json -show_chapters` output.
#[derive(Clone, Debug, Deserialize, Default)]
pub struct ProbeOutput {
    #[serde(default)]
    pub chapters: Vec<ProbeChapter>,
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct ProbeChapter {
    #[serde(default)]
    pub start_time: Option<ProbeTime>,
    #[serde(default)]
    pub end_time: Option<ProbeTime>,
    #[serde(default)]
    pub tags: ProbeTags,
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct ProbeTags {
    #[serde(alias = "TITLE")]
    pub title: Option<String>,
}

/// ffprobe writes times as strings ("12.345000"), but numbers are accepted too.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ProbeTime {
    Seconds(f64),
    Text(String),
}

impl ProbeTime {
    pub fn seconds(&self) -> anyhow::Result<f64> {
        match self {
            ProbeTime::Seconds(s) => Ok(*s),
            ProbeTime::Text(text) => text
                .trim()
                .parse::<f64>()
                .with_context(|| format!("Invalid chapter time \"{text}\"")),
        }
    }
}

fn probe_seconds(time: Option<&ProbeTime>) -> anyhow::Result<f64> {
    let seconds = time.map(ProbeTime::seconds).transpose()?.unwrap_or(0.0);
    if !seconds.is_finite() {
        anyhow::bail!("Chapter time is not finite: {seconds}");
    }
    Ok(seconds)
}

impl TryFrom<ProbeChapter> for Chapter {
    type Error = anyhow::Error;

    fn try_from(probe: ProbeChapter) -> anyhow::Result<Self> {
        let start_time = probe_seconds(probe.start_time.as_ref())?.max(0.0);
        let end_time = probe_seconds(probe.end_time.as_ref())?.max(start_time);
        let title = probe
            .tags
            .title
            .unwrap_or_else(|| UNTITLED_CHAPTER.to_string());

        Ok(Chapter {
            title,
            start_time,
            end_time,
        })
    }
}

pub fn parse_probe_output(json: &str) -> serde_json::Result<ProbeOutput> {
    serde_json::from_str(json)
}
