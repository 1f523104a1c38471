use std::collections::HashSet;

use super::Speaker;

/// Speakers keyed by name, keeping the first record seen for each name
/// and the order in which names were first seen.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    speakers: Vec<Speaker>,
    names: HashSet<String>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a speaker unless its name is already present.
    ///
    /// Returns false when the speaker was dropped as a duplicate.
    pub fn insert(&mut self, speaker: Speaker) -> bool {
        if self.names.contains(&speaker.full_name) {
            return false;
        }
        self.names.insert(speaker.full_name.clone());
        self.speakers.push(speaker);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.speakers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.speakers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Speaker> {
        self.speakers.iter()
    }

    pub fn into_speakers(self) -> Vec<Speaker> {
        self.speakers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_occurrence_wins() {
        let mut roster = Roster::new();

        assert!(roster.insert(Speaker::with_profile("Ana", "http://a/1")));
        assert!(roster.insert(Speaker::new("Bogdan")));
        assert!(!roster.insert(Speaker::with_profile("Ana", "http://a/2")));

        assert_eq!(roster.len(), 2);
        assert!(roster.contains("Ana"));
        assert!(!roster.contains("ana"));

        let speakers = roster.into_speakers();
        assert_eq!(speakers[0].full_name, "Ana");
        assert_eq!(speakers[0].profile_url.as_deref(), Some("http://a/1"));
        assert_eq!(speakers[1].full_name, "Bogdan");
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut roster = Roster::new();
        for name in ["Zoe", "Adam", "Mihai", "Adam", "Zoe"] {
            roster.insert(Speaker::new(name));
        }

        let names: Vec<&str> = roster.iter().map(|s| s.full_name.as_str()).collect();
        assert_eq!(names, vec!["Zoe", "Adam", "Mihai"]);
    }
}
