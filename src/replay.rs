// src/replay.rs
//
// Recorded detector output, one JSON object per line:
//   {"width":640,"height":480,"candidates":[{"bbox":[x1,y1,x2,y2],"confidence":0.8}]}
//
// Stands in for the live camera + detector pair. A line that fails to parse
// surfaces as a per-frame error so the session can degrade it to NO_TARGET.

use crate::detection::DetectorFrame;
use crate::types::ReplayConfig;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::{Path, PathBuf};
use tracing::info;
use walkdir::WalkDir;

pub struct ReplaySource<R: BufRead> {
    reader: R,
    line_no: usize,
    buf: String,
    finished: bool,
}

impl ReplaySource<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self> {
        info!("Opening replay: {}", path.display());
        let file = File::open(path)
            .with_context(|| format!("Failed to open replay file {}", path.display()))?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> ReplaySource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_no: 0,
            buf: String::new(),
            finished: false,
        }
    }
}

impl<R: BufRead> Iterator for ReplaySource<R> {
    type Item = Result<DetectorFrame>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        loop {
            self.buf.clear();
            self.line_no += 1;
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => {
                    self.finished = true;
                    return None;
                }
                Ok(_) => {
                    let line = self.buf.trim();
                    if line.is_empty() {
                        continue;
                    }
                    let line_no = self.line_no;
                    return Some(
                        serde_json::from_str::<DetectorFrame>(line)
                            .with_context(|| format!("Malformed replay line {}", line_no)),
                    );
                }
                Err(e) => {
                    // Non-UTF-8 lines are consumed; anything else ends the stream
                    if e.kind() != ErrorKind::InvalidData {
                        self.finished = true;
                    }
                    return Some(Err(anyhow::Error::new(e)
                        .context(format!("Failed to read replay line {}", self.line_no))));
                }
            }
        }
    }
}

pub fn find_replay_files(config: &ReplayConfig) -> Result<Vec<PathBuf>> {
    let input_dir = Path::new(&config.input_dir);
    if !input_dir.is_dir() {
        anyhow::bail!("Replay directory not found: {}", input_dir.display());
    }

    let mut files: Vec<PathBuf> = WalkDir::new(input_dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| {
            p.extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case(&config.extension))
                .unwrap_or(false)
        })
        .collect();
    files.sort();

    info!("Found {} replay files", files.len());
    Ok(files)
}
