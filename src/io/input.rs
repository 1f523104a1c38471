use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::models::{Section, Speaker};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to list sessions directory {path:?}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read session file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse session file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("unexpected session layout in {path:?}: {source}")]
    Schema {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Counters collected while reading a sessions directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Session files whose sections were read
    pub files_read: usize,
    /// Session files skipped because they have no sections
    pub files_skipped: usize,
    pub sections_seen: usize,
    /// Sections skipped because nothing was said in them
    pub empty_sections: usize,
    /// Sections skipped because no speaker was attributed
    pub null_speakers: usize,
    pub speakers_emitted: usize,
}

/// Lazy, single-pass sequence of the speakers of every session in a directory.
///
/// The directory is listed once when the reader is created. A read or parse
/// failure is yielded as an error and ends the sequence.
#[derive(Debug)]
pub struct SpeakerReader {
    files: std::vec::IntoIter<PathBuf>,
    sections: std::vec::IntoIter<Section>,
    stats: SessionStats,
    finished: bool,
}

impl SpeakerReader {
    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Number of listed session files not yet visited
    pub fn remaining_files(&self) -> usize {
        self.files.len()
    }

    /// Hand the remaining speakers to `consume` as a plain sequence
    ///
    /// The sequence stops at the first read failure, which is then returned
    /// in place of the output of `consume`.
    pub fn consume_with<T>(
        &mut self,
        consume: impl FnOnce(&mut dyn Iterator<Item = Speaker>) -> T,
    ) -> Result<T, SessionError> {
        let mut failure = None;
        let output = {
            let mut speakers = self.by_ref().map_while(|item| match item {
                Ok(speaker) => Some(speaker),
                Err(e) => {
                    failure = Some(e);
                    None
                }
            });
            consume(&mut speakers)
        };

        match failure {
            Some(e) => Err(e),
            None => Ok(output),
        }
    }
}

impl Iterator for SpeakerReader {
    type Item = Result<Speaker, SessionError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            if let Some(section) = self.sections.next() {
                self.stats.sections_seen += 1;

                if !section.has_contents() {
                    self.stats.empty_sections += 1;
                    continue;
                }
                if let Some(speaker) = section.speaker {
                    self.stats.speakers_emitted += 1;
                    return Some(Ok(speaker));
                }

                warn!("Found null speaker in section with contents {:?}", section.contents);
                self.stats.null_speakers += 1;
                continue;
            }

            let Some(path) = self.files.next() else {
                self.finished = true;
                debug!("Finished reading sessions: {:?}", self.stats);
                return None;
            };

            info!("Reading speakers from {}", path.display());
            match read_sections(&path) {
                Ok(Some(sections)) => {
                    self.stats.files_read += 1;
                    self.sections = sections.into_iter();
                }
                Ok(None) => {
                    error!("Could not find session sections in {}", path.display());
                    self.stats.files_skipped += 1;
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

/// Start reading speakers from every `*.json` session file in `dir`
///
/// Files are visited in path order. Directories are ignored, whatever their name.
pub fn read_speakers(dir: &Path) -> Result<SpeakerReader, SessionError> {
    let files = list_session_files(dir)?;
    debug!("Found {} session files in {}", files.len(), dir.display());

    Ok(SpeakerReader {
        files: files.into_iter(),
        sections: Vec::new().into_iter(),
        stats: SessionStats::default(),
        finished: false,
    })
}

fn list_session_files(dir: &Path) -> Result<Vec<PathBuf>, SessionError> {
    let read_dir_error = |source| SessionError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_dir_error)? {
        let path = entry.map_err(read_dir_error)?.path();
        let is_json = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(".json"));

        if is_json && path.is_file() {
            files.push(path);
        }
    }
    files.sort();

    Ok(files)
}

/// Parse a session file and return its sections
///
/// Returns `Ok(None)` when the document has no `sections` (or it is null).
fn read_sections(path: &Path) -> Result<Option<Vec<Section>>, SessionError> {
    let content = fs::read_to_string(path).map_err(|source| SessionError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_sections(&content).map_err(|e| e.with_path(path))
}

/// Failure while decoding a session document, before a path is attached
enum DecodeError {
    Syntax(serde_json::Error),
    Layout(serde_json::Error),
}

impl DecodeError {
    fn with_path(self, path: &Path) -> SessionError {
        let path = path.to_path_buf();
        match self {
            Self::Syntax(source) => SessionError::Parse { path, source },
            Self::Layout(source) => SessionError::Schema { path, source },
        }
    }
}

fn parse_sections(json: &str) -> Result<Option<Vec<Section>>, DecodeError> {
    let document: Value = serde_json::from_str(json).map_err(DecodeError::Syntax)?;

    match document.get("sections") {
        None | Some(Value::Null) => Ok(None),
        Some(sections) => Vec::<Section>::deserialize(sections)
            .map(Some)
            .map_err(DecodeError::Layout),
    }
}
