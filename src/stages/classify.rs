use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::io::{SessionStats, read_speakers, save_table};
use crate::models::{Roster, Speaker, ToTable};
use crate::stages::names_list::DEFAULT_SESSIONS_DIR;

pub const DEFAULT_MEMBERS_FILE: &str = "./data/speakers/parliament-members.csv";
pub const DEFAULT_GUESTS_FILE: &str = "./data/speakers/guest-speakers.csv";

/// Configuration for splitting speakers into members and guests
#[derive(Debug, Clone)]
pub struct ClassifyConfig {
    /// Directory containing the crawled session files
    pub sessions_dir: PathBuf,
    /// CSV file receiving the Parliament members
    pub members_file: PathBuf,
    /// CSV file receiving the guest speakers
    pub guests_file: PathBuf,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            sessions_dir: PathBuf::from(DEFAULT_SESSIONS_DIR),
            members_file: PathBuf::from(DEFAULT_MEMBERS_FILE),
            guests_file: PathBuf::from(DEFAULT_GUESTS_FILE),
        }
    }
}

/// Result of classifying the speakers of a sessions directory
#[derive(Debug)]
pub struct ClassifyResult {
    pub guests: usize,
    pub members: usize,
    /// Names recorded both as guest and as member
    pub cross_class_names: Vec<String>,
    pub stats: SessionStats,
}

/// A speaker without a profile URL is a guest rather than a member
pub fn is_guest(speaker: &Speaker) -> bool {
    !speaker.has_profile()
}

/// Speakers split into guests and members, first record per name in each
#[derive(Debug, Clone, Default)]
pub struct Classification {
    pub guests: Vec<Speaker>,
    pub members: Vec<Speaker>,
}

impl Classification {
    /// Names present in both lists, in guest order
    ///
    /// A name is looked up in each class independently, so a speaker seen
    /// once with a profile URL and once without ends up in both lists.
    pub fn cross_class_names(&self) -> Vec<&str> {
        self.guests
            .iter()
            .filter(|g| self.members.iter().any(|m| m.full_name == g.full_name))
            .map(|g| g.full_name.as_str())
            .collect()
    }
}

/// Incremental guest/member split over a stream of speakers
#[derive(Debug, Default)]
pub struct Classifier {
    guests: Roster,
    members: Roster,
}

impl Classifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a speaker in its class unless the name is already there
    pub fn push(&mut self, speaker: Speaker) {
        if is_guest(&speaker) {
            self.guests.insert(speaker);
        } else {
            self.members.insert(speaker);
        }
    }

    pub fn finish(self) -> Classification {
        Classification {
            guests: self.guests.into_speakers(),
            members: self.members.into_speakers(),
        }
    }
}

/// Classify speakers in arrival order
pub fn classify<I>(speakers: I) -> Classification
where
    I: IntoIterator<Item = Speaker>,
{
    let mut classifier = Classifier::new();
    for speaker in speakers {
        classifier.push(speaker);
    }
    classifier.finish()
}

/// Read every session, split its speakers and save both tables
pub fn classify_speakers(config: &ClassifyConfig) -> Result<ClassifyResult> {
    let mut reader = read_speakers(&config.sessions_dir)?;
    let classification = reader.consume_with(|speakers| classify(speakers))?;
    let stats = reader.stats().clone();

    info!(
        "Found {} guests and {} members",
        classification.guests.len(),
        classification.members.len()
    );

    let cross_class_names: Vec<String> = classification
        .cross_class_names()
        .into_iter()
        .map(String::from)
        .collect();
    for name in &cross_class_names {
        warn!("Speaker {} appears both as guest and as member", name);
    }

    save_table(&classification.guests.to_table(), &config.guests_file)
        .with_context(|| format!("Failed to save guests to {:?}", config.guests_file))?;
    info!("Guests written to {:?}", config.guests_file);

    save_table(&classification.members.to_table(), &config.members_file)
        .with_context(|| format!("Failed to save members to {:?}", config.members_file))?;
    info!("Members written to {:?}", config.members_file);

    Ok(ClassifyResult {
        guests: classification.guests.len(),
        members: classification.members.len(),
        cross_class_names,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use super::*;

    fn write_session(dir: &Path, name: &str, json: &str) {
        fs::write(dir.join(name), json).unwrap();
    }

    fn names(speakers: &[Speaker]) -> Vec<&str> {
        speakers.iter().map(|s| s.full_name.as_str()).collect()
    }

    fn config_for(sessions: &Path, output: &Path) -> ClassifyConfig {
        ClassifyConfig {
            sessions_dir: sessions.to_path_buf(),
            members_file: output.join("parliament-members.csv"),
            guests_file: output.join("guest-speakers.csv"),
        }
    }

    #[test]
    fn test_is_guest() {
        assert!(is_guest(&Speaker::new("Ana")));
        assert!(is_guest(&Speaker::with_profile("Ana", "")));
        assert!(!is_guest(&Speaker::with_profile("Ana", "http://x")));
    }

    #[test]
    fn test_classify_first_seen_wins() {
        let classification = classify(vec![
            Speaker::with_profile("Ana", "http://a/1"),
            Speaker::new("Dan"),
            Speaker::with_profile("Ana", "http://a/2"),
            Speaker::with_profile("Elena", "http://e"),
            Speaker::new("Dan"),
        ]);

        assert_eq!(names(&classification.guests), vec!["Dan"]);
        assert_eq!(names(&classification.members), vec!["Ana", "Elena"]);
        assert_eq!(
            classification.members[0].profile_url.as_deref(),
            Some("http://a/1")
        );
        assert!(classification.cross_class_names().is_empty());
    }

    #[test]
    fn test_classify_keeps_cross_class_duplicates() {
        let classification = classify(vec![
            Speaker::new("Victor"),
            Speaker::with_profile("Victor", "http://v"),
            Speaker::with_profile("Victor", ""),
        ]);

        assert_eq!(names(&classification.guests), vec!["Victor"]);
        assert_eq!(names(&classification.members), vec!["Victor"]);
        assert_eq!(classification.cross_class_names(), vec!["Victor"]);
    }

    #[test]
    fn test_classify_speakers_scenario() {
        let sessions = tempfile::tempdir().unwrap();
        write_session(
            sessions.path(),
            "session.json",
            r#"{"sections": [
                {"speaker": {"full_name": "A", "profile_url": null}, "contents": "Prima intervenție."},
                {"speaker": {"full_name": "B", "profile_url": "http://x"}, "contents": "A doua."}
            ]}"#,
        );
        let output = tempfile::tempdir().unwrap();
        let config = config_for(sessions.path(), output.path());

        let result = classify_speakers(&config).unwrap();

        assert_eq!(result.guests, 1);
        assert_eq!(result.members, 1);
        assert!(result.cross_class_names.is_empty());
        assert_eq!(
            fs::read_to_string(&config.guests_file).unwrap(),
            "\"\",\"full_name\",\"profile_url\"\n0,\"A\",\"\"\n"
        );
        assert_eq!(
            fs::read_to_string(&config.members_file).unwrap(),
            "\"\",\"full_name\",\"profile_url\"\n0,\"B\",\"http://x\"\n"
        );
    }

    #[test]
    fn test_classify_speakers_same_name_across_files() {
        let sessions = tempfile::tempdir().unwrap();
        write_session(
            sessions.path(),
            "01.json",
            r#"{"sections": [{"speaker": {"full_name": "C", "profile_url": "http://c", "party": "USR"}, "contents": "x"}]}"#,
        );
        write_session(
            sessions.path(),
            "02.json",
            r#"{"sections": [{"speaker": {"full_name": "C", "profile_url": "http://c/2", "party": "PNL"}, "contents": "y"}]}"#,
        );
        let output = tempfile::tempdir().unwrap();
        let config = config_for(sessions.path(), &output.path().join("speakers"));

        let result = classify_speakers(&config).unwrap();

        assert_eq!(result.members, 1);
        assert_eq!(result.guests, 0);
        assert_eq!(
            fs::read_to_string(&config.members_file).unwrap(),
            "\"\",\"full_name\",\"profile_url\",\"party\"\n0,\"C\",\"http://c\",\"USR\"\n"
        );
        assert_eq!(fs::read_to_string(&config.guests_file).unwrap(), "\"\"\n");
    }

    #[test]
    fn test_classify_speakers_reports_cross_class_names() {
        let sessions = tempfile::tempdir().unwrap();
        write_session(
            sessions.path(),
            "session.json",
            r#"{"sections": [
                {"speaker": {"full_name": "Victor", "profile_url": ""}, "contents": "x"},
                {"speaker": {"full_name": "Victor", "profile_url": "http://v"}, "contents": "y"}
            ]}"#,
        );
        let output = tempfile::tempdir().unwrap();
        let config = config_for(sessions.path(), output.path());

        let result = classify_speakers(&config).unwrap();

        assert_eq!(result.cross_class_names, vec!["Victor".to_string()]);
        assert_eq!(result.guests, 1);
        assert_eq!(result.members, 1);
    }

    #[test]
    fn test_classify_speakers_missing_sessions_dir() {
        let output = tempfile::tempdir().unwrap();
        let config = config_for(&output.path().join("missing"), output.path());

        assert!(classify_speakers(&config).is_err());
        assert!(!config.guests_file.exists());
        assert!(!config.members_file.exists());
    }

    #[test]
    fn test_classify_config_default() {
        let config = ClassifyConfig::default();
        assert_eq!(
            config.members_file,
            PathBuf::from("./data/speakers/parliament-members.csv")
        );
        assert_eq!(
            config.guests_file,
            PathBuf::from("./data/speakers/guest-speakers.csv")
        );
    }
}
