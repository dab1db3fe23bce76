use std::collections::HashSet;

lazy_static::lazy_static! {
    pub static ref DEFAULT_POSITIVE_WORDS: Vec<&'static str> = vec![
        "best", "perfect", "amazing", "flawless", "fantastic", "incredible", "excellent", "love",
        "awesome",
    ];

    pub static ref DEFAULT_NEGATIVE_WORDS: Vec<&'static str> = vec![
        "worst", "terrible", "awful", "horrible", "useless", "poor", "waste", "broken", "scam",
        "fake",
    ];
}

/// A fixed set of marker words. Entries are stored lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Lexicon {
    words: HashSet<String>,
}

impl Lexicon {
    pub fn new<I, W>(words: I) -> Self
    where
        I: IntoIterator<Item = W>,
        W: AsRef<str>,
    {
        Self {
            words: words.into_iter().map(|w| w.as_ref().to_lowercase()).collect(),
        }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Counts whitespace-separated tokens of already lower-cased text that are
    /// in the lexicon. No punctuation stripping: "amazing!" is not "amazing".
    pub fn count_matches(&self, lowered_text: &str) -> usize {
        lowered_text
            .split(is_separator)
            .filter(|token| !token.is_empty() && self.contains(token))
            .count()
    }
}

// Unicode whitespace plus the ASCII file, group, record and unit separators.
fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    /// `repetitive_user` when a user has strictly more reviews than this.
    pub repetitive_user_above: usize,
    pub too_positive_at_least: usize,
    pub too_negative_at_least: usize,
    /// `mostly_fake` when the score reaches this.
    pub fake_score_at_least: u8,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            repetitive_user_above: 5,
            too_positive_at_least: 3,
            too_negative_at_least: 3,
            fake_score_at_least: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringConfig {
    pub positive_words: Lexicon,
    pub negative_words: Lexicon,
    pub thresholds: Thresholds,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            positive_words: Lexicon::new(DEFAULT_POSITIVE_WORDS.iter()),
            negative_words: Lexicon::new(DEFAULT_NEGATIVE_WORDS.iter()),
            thresholds: Thresholds::default(),
        }
    }
}
