//! Emotion vocabulary and emotion state snapshots.
//!
//! The ten tracked emotions form a fixed enumeration. Six of them are
//! primary (scored directly by the classifier) and four are derived from the
//! primaries during aggregation. Any operation that walks "all emotions"
//! (dominant-emotion selection, topic association) iterates in the order of
//! [`Emotion::ALL`], which is also the tie-break order.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One of the ten tracked emotions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    Happiness,
    Sadness,
    Anger,
    Fear,
    Surprise,
    Disgust,
    Confusion,
    Pride,
    Loneliness,
    Pain,
}

impl Emotion {
    /// All emotions in enumeration (and tie-break) order.
    pub const ALL: [Emotion; 10] = [
        Emotion::Happiness,
        Emotion::Sadness,
        Emotion::Anger,
        Emotion::Fear,
        Emotion::Surprise,
        Emotion::Disgust,
        Emotion::Confusion,
        Emotion::Pride,
        Emotion::Loneliness,
        Emotion::Pain,
    ];

    /// The six classifier-scored emotions.
    pub const PRIMARY: [Emotion; 6] = [
        Emotion::Happiness,
        Emotion::Sadness,
        Emotion::Anger,
        Emotion::Fear,
        Emotion::Surprise,
        Emotion::Disgust,
    ];

    /// Lowercase name used on the wire and in snapshots.
    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Happiness => "happiness",
            Emotion::Sadness => "sadness",
            Emotion::Anger => "anger",
            Emotion::Fear => "fear",
            Emotion::Surprise => "surprise",
            Emotion::Disgust => "disgust",
            Emotion::Confusion => "confusion",
            Emotion::Pride => "pride",
            Emotion::Loneliness => "loneliness",
            Emotion::Pain => "pain",
        }
    }

    /// Parse from the lowercase name.
    pub fn from_name(name: &str) -> Option<Self> {
        Emotion::ALL.into_iter().find(|e| e.as_str() == name)
    }

    /// Whether the classifier scores this emotion directly.
    pub fn is_primary(&self) -> bool {
        Emotion::PRIMARY.contains(self)
    }
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-item scores for the six primary emotions, each in [0, 1].
///
/// Missing fields deserialize as 0.0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrimaryEmotions {
    pub happiness: f64,
    pub sadness: f64,
    pub anger: f64,
    pub fear: f64,
    pub surprise: f64,
    pub disgust: f64,
}

impl PrimaryEmotions {
    /// Value for `emotion`; derived emotions read as 0.0.
    pub fn get(&self, emotion: Emotion) -> f64 {
        match emotion {
            Emotion::Happiness => self.happiness,
            Emotion::Sadness => self.sadness,
            Emotion::Anger => self.anger,
            Emotion::Fear => self.fear,
            Emotion::Surprise => self.surprise,
            Emotion::Disgust => self.disgust,
            _ => 0.0,
        }
    }

    /// Set the value for a primary emotion. Derived emotions are ignored.
    pub fn set(&mut self, emotion: Emotion, value: f64) {
        match emotion {
            Emotion::Happiness => self.happiness = value,
            Emotion::Sadness => self.sadness = value,
            Emotion::Anger => self.anger = value,
            Emotion::Fear => self.fear = value,
            Emotion::Surprise => self.surprise = value,
            Emotion::Disgust => self.disgust = value,
            _ => {}
        }
    }

    /// Values in [`Emotion::PRIMARY`] order.
    pub fn values(&self) -> [f64; 6] {
        [
            self.happiness,
            self.sadness,
            self.anger,
            self.fear,
            self.surprise,
            self.disgust,
        ]
    }
}

/// The full ten-field emotion vector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Emotions {
    pub happiness: f64,
    pub sadness: f64,
    pub anger: f64,
    pub fear: f64,
    pub surprise: f64,
    pub disgust: f64,
    pub confusion: f64,
    pub pride: f64,
    pub loneliness: f64,
    pub pain: f64,
}

impl Emotions {
    /// Build from primaries with all derived fields zero.
    pub fn from_primary(primary: &PrimaryEmotions) -> Self {
        Self {
            happiness: primary.happiness,
            sadness: primary.sadness,
            anger: primary.anger,
            fear: primary.fear,
            surprise: primary.surprise,
            disgust: primary.disgust,
            ..Self::default()
        }
    }

    /// Value for `emotion`.
    pub fn get(&self, emotion: Emotion) -> f64 {
        match emotion {
            Emotion::Happiness => self.happiness,
            Emotion::Sadness => self.sadness,
            Emotion::Anger => self.anger,
            Emotion::Fear => self.fear,
            Emotion::Surprise => self.surprise,
            Emotion::Disgust => self.disgust,
            Emotion::Confusion => self.confusion,
            Emotion::Pride => self.pride,
            Emotion::Loneliness => self.loneliness,
            Emotion::Pain => self.pain,
        }
    }

    /// Set the value for `emotion`.
    pub fn set(&mut self, emotion: Emotion, value: f64) {
        match emotion {
            Emotion::Happiness => self.happiness = value,
            Emotion::Sadness => self.sadness = value,
            Emotion::Anger => self.anger = value,
            Emotion::Fear => self.fear = value,
            Emotion::Surprise => self.surprise = value,
            Emotion::Disgust => self.disgust = value,
            Emotion::Confusion => self.confusion = value,
            Emotion::Pride => self.pride = value,
            Emotion::Loneliness => self.loneliness = value,
            Emotion::Pain => self.pain = value,
        }
    }

    /// `(emotion, value)` pairs in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (Emotion, f64)> + '_ {
        Emotion::ALL.into_iter().map(move |e| (e, self.get(e)))
    }

    /// The maximum-valued emotion; the first maximal field in
    /// [`Emotion::ALL`] order wins ties.
    pub fn dominant(&self) -> Emotion {
        let mut best = Emotion::Happiness;
        let mut best_value = self.happiness;
        for (emotion, value) in self.iter().skip(1) {
            if value > best_value {
                best = emotion;
                best_value = value;
            }
        }
        best
    }

    /// Value of the dominant emotion.
    pub fn max_value(&self) -> f64 {
        self.get(self.dominant())
    }
}

/// Intensity reported when no data contributed to a state.
pub const DEFAULT_INTENSITY: f64 = 0.5;

/// One aggregated emotion snapshot.
///
/// Built once per aggregation pass and never mutated afterwards; the next
/// pass produces a new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionState {
    #[serde(flatten)]
    pub emotions: Emotions,

    /// Weighted mean sentiment in [-1, 1]
    pub overall_sentiment: f64,

    /// Expression intensity in [0, 1]
    pub intensity: f64,

    pub timestamp: DateTime<Utc>,

    /// Source name -> share of items; sums to 1.0 when non-empty
    #[serde(default)]
    pub source_contributions: BTreeMap<String, f64>,
}

impl EmotionState {
    /// The neutral state: all emotions zero, sentiment zero, intensity 0.5.
    pub fn neutral(timestamp: DateTime<Utc>) -> Self {
        Self {
            emotions: Emotions::default(),
            overall_sentiment: 0.0,
            intensity: DEFAULT_INTENSITY,
            timestamp,
            source_contributions: BTreeMap::new(),
        }
    }

    /// Whether this is the neutral state (ignoring the timestamp).
    pub fn is_neutral(&self) -> bool {
        self.emotions == Emotions::default()
            && self.overall_sentiment == 0.0
            && self.intensity == DEFAULT_INTENSITY
            && self.source_contributions.is_empty()
    }

    pub fn dominant_emotion(&self) -> Emotion {
        self.emotions.dominant()
    }

    /// Value of the dominant emotion.
    pub fn dominant_intensity(&self) -> f64 {
        self.emotions.max_value()
    }
}

impl Default for EmotionState {
    fn default() -> Self {
        Self::neutral(Utc::now())
    }
}
