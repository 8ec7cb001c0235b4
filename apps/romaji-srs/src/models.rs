//! Data models for the romaji quiz.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::ops::{Index, IndexMut};

/// Seconds since the Unix epoch.
pub type Timestamp = f64;

/// Current wall-clock time as a [`Timestamp`].
pub fn now() -> Timestamp {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

/// A word and its example sentences, as found in the source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordGroup {
    /// Root word the examples illustrate.
    pub word: String,
    /// Example sentences, in source order.
    pub examples: Vec<Example>,
}

/// One example sentence from the source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    /// Sentence in Japanese script. Unique across the whole dataset.
    pub sentence: String,
    /// Romanised sentence, shown as the question.
    #[serde(default)]
    pub romaji: String,
    /// English translation.
    #[serde(default)]
    pub english: String,
    /// Word-by-word breakdown of the romaji.
    #[serde(default)]
    pub romaji_meaning: String,
    /// Any other keys in the source entry, carried into the card untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A tracked example with its scheduling state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub sentence: String,
    #[serde(default)]
    pub romaji: String,
    #[serde(default)]
    pub english: String,
    #[serde(default)]
    pub romaji_meaning: String,
    /// Word group this example was imported from.
    #[serde(default)]
    pub root_word: String,
    /// When the card is next due.
    pub next_review: Timestamp,
    /// Keys this tool does not interpret; written back as read.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Card {
    /// Flatten an example into a card that is due at `due`.
    pub fn from_example(example: &Example, root_word: impl Into<String>, due: Timestamp) -> Self {
        Self {
            sentence: example.sentence.clone(),
            romaji: example.romaji.clone(),
            english: example.english.clone(),
            romaji_meaning: example.romaji_meaning.clone(),
            root_word: root_word.into(),
            next_review: due,
            extra: example.extra.clone(),
        }
    }

    /// Check if due at `now`.
    pub fn is_due(&self, now: Timestamp) -> bool {
        now >= self.next_review
    }
}

/// Review bucket a card lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    Hard,
    Difficult,
    Easy,
    Unknown,
}

impl Bucket {
    /// Order in which buckets are scanned for due cards.
    pub const PRIORITY: [Bucket; 4] = [Self::Hard, Self::Difficult, Self::Easy, Self::Unknown];

    /// Order of the judgment actions on the answer screen.
    pub const JUDGMENTS: [Bucket; 4] = [Self::Difficult, Self::Hard, Self::Easy, Self::Unknown];

    /// Name used for the list file.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Hard => "hard",
            Self::Difficult => "difficult",
            Self::Easy => "easy",
            Self::Unknown => "unknown",
        }
    }

    /// Display name.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Hard => "Hard",
            Self::Difficult => "Difficult",
            Self::Easy => "Easy",
            Self::Unknown => "Unknown",
        }
    }

    /// Minutes until a card moved into this bucket is due again.
    pub fn interval_minutes(&self) -> i64 {
        match self {
            Self::Hard => 1,
            Self::Difficult => 5,
            Self::Easy => 120,
            // Commented as 30 seconds where it originated; the shipped value is a minute.
            Self::Unknown => 1,
        }
    }

    /// Interval in seconds.
    pub fn interval_secs(&self) -> Timestamp {
        (self.interval_minutes() * 60) as Timestamp
    }

    /// Label on the judgment action.
    pub fn button_label(&self) -> &'static str {
        match self {
            Self::Hard => "Hard (1m)",
            Self::Difficult => "Difficult (5m)",
            // Says 1h, schedules 120 minutes. Both kept as shipped.
            Self::Easy => "Easy (1h)",
            Self::Unknown => "Unknown (1m)",
        }
    }

    /// Key that selects this judgment.
    pub fn key(&self) -> char {
        match self {
            Self::Difficult => '1',
            Self::Hard => '2',
            Self::Easy => '3',
            Self::Unknown => '4',
        }
    }

    /// Judgment for a key press.
    pub fn from_key(c: char) -> Option<Self> {
        Self::JUDGMENTS.into_iter().find(|b| b.key() == c)
    }
}

/// The four buckets, each an ordered list of cards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lists {
    hard: Vec<Card>,
    difficult: Vec<Card>,
    easy: Vec<Card>,
    unknown: Vec<Card>,
}

impl Lists {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every sentence currently tracked in any bucket.
    pub fn tracked_sentences(&self) -> HashSet<String> {
        Bucket::PRIORITY
            .iter()
            .flat_map(|b| self[*b].iter().map(|c| c.sentence.clone()))
            .collect()
    }

    /// Card count per bucket, in priority order.
    pub fn counts(&self) -> [(Bucket, usize); 4] {
        Bucket::PRIORITY.map(|b| (b, self[b].len()))
    }

    /// Total cards across all buckets.
    pub fn total(&self) -> usize {
        Bucket::PRIORITY.iter().map(|b| self[*b].len()).sum()
    }

    /// Remove every card in `bucket` with the given sentence.
    /// Returns how many were removed; zero is not an error.
    pub fn remove(&mut self, bucket: Bucket, sentence: &str) -> usize {
        let list = &mut self[bucket];
        let before = list.len();
        list.retain(|c| c.sentence != sentence);
        before - list.len()
    }
}

impl Index<Bucket> for Lists {
    type Output = Vec<Card>;

    fn index(&self, bucket: Bucket) -> &Vec<Card> {
        match bucket {
            Bucket::Hard => &self.hard,
            Bucket::Difficult => &self.difficult,
            Bucket::Easy => &self.easy,
            Bucket::Unknown => &self.unknown,
        }
    }
}

impl IndexMut<Bucket> for Lists {
    fn index_mut(&mut self, bucket: Bucket) -> &mut Vec<Card> {
        match bucket {
            Bucket::Hard => &mut self.hard,
            Bucket::Difficult => &mut self.difficult,
            Bucket::Easy => &mut self.easy,
            Bucket::Unknown => &mut self.unknown,
        }
    }
}
