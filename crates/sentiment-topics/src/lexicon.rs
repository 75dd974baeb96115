//! Word lists used by the topic extractor.
//!
//! Three curated tables drive topic filtering:
//! - stop words: functional and very common English words
//! - generic words: vague nouns, verbs and adjectives that say nothing about
//!   what a headline is about ("data", "news", "update")
//! - stems: an explicit irregular-form table mapping surface variants to a
//!   canonical token. This is a lookup, not a stemmer.
//!
//! Filtering happens on the raw token, before stem normalization.

use std::collections::{HashMap, HashSet};

const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "as", "is", "was", "are", "were", "been", "be", "have", "has", "had", "do", "does",
    "did", "will", "would", "could", "should", "may", "might", "must", "shall", "can", "need",
    "this", "that", "these", "those", "i", "you", "he", "she", "it", "we", "they", "what",
    "which", "who", "whom", "when", "where", "why", "how", "all", "each", "every", "both",
    "few", "more", "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same",
    "so", "than", "too", "very", "s", "t", "just", "don", "now", "new", "says", "said", "get",
    "got", "like", "also", "one", "two", "first", "after", "over", "into", "its", "about", "up",
    "out", "if", "then", "their", "there", "here", "his", "her", "my", "your", "our", "us",
    "me", "him", "them", "being", "between", "through", "during", "before", "above", "below",
    "while", "because", "against", "without", "within", "along", "following", "across",
    "behind", "beyond", "plus", "except", "per", "via", "amp", "vs", "etc", "ie", "eg", "ask",
    "hn", "show", "tell", "year", "years", "day", "days", "time", "way", "make", "made",
    "people", "world", "back", "much", "even",
];

const GENERIC_WORDS: &[&str] = &[
    "low", "high", "big", "small", "good", "bad", "best", "worst", "team", "teams", "event",
    "events", "thing", "things", "stuff", "part", "parts", "place", "places", "point", "points",
    "case", "fact", "facts", "issue", "issues", "item", "items", "kind", "lot", "lots",
    "number", "numbers", "group", "groups", "area", "areas", "end", "start", "begin", "side",
    "sides", "top", "bottom", "left", "right", "front", "back", "line", "lines", "level",
    "levels", "type", "types", "form", "forms", "state", "states", "action", "change",
    "changes", "result", "results", "work", "works", "name", "use", "uses", "user", "users",
    "data", "info", "information", "system", "systems", "service", "services", "program",
    "process", "today", "week", "month", "title", "post", "posts", "comment", "comments",
    "update", "updates", "report", "reports", "news", "story", "stories", "article",
    "articles", "video", "videos", "image", "images", "photo", "photos", "link", "links",
    "source", "sources", "page", "pages", "site", "sites", "web", "online", "app", "apps",
    "company", "companies", "business", "market", "price", "prices", "cost", "costs", "value",
    "money", "pay", "deal", "deals", "offer", "offers", "sale", "sales", "buy", "sell", "sold",
    "free", "available", "support", "help", "need", "want", "look", "looks", "looking", "find",
    "found", "search", "read", "write", "written", "call", "called", "calling", "run",
    "running", "goes", "going", "come", "coming", "came", "take", "takes", "taken", "give",
    "gives", "given", "see", "seen", "saw", "know", "known", "think", "thought", "feel", "felt",
    "seem", "seems", "try", "tried", "keep", "keeps", "let", "put", "set", "turn", "turned",
    "move", "moved", "open", "close", "closed", "play", "played", "watch", "watched", "live",
    "lives", "living", "real", "actually", "really", "probably", "maybe", "likely", "possible",
    "sure", "true", "false", "wrong", "long", "short", "full", "empty", "old", "young",
    "early", "late", "hard", "easy", "fast", "slow", "different", "similar", "same", "last",
    "next", "many", "several", "couple", "ago", "still", "yet", "already", "ever", "never",
    "always", "often", "sometimes", "usually", "however", "though", "although", "despite",
    "instead", "rather", "quite", "pretty", "almost", "nearly", "exactly", "simply", "finally",
    "basically", "essentially", "apparently", "obviously", "clearly", "certainly",
    "definitely", "biggest", "largest", "smallest", "latest", "newest", "oldest", "electric",
    "global", "local", "national", "international", "public", "private", "official", "major",
    "minor", "main", "total", "average", "general", "specific", "special", "recent", "current",
    "former", "future", "past", "present", "original", "million", "billion", "thousand",
    "hundred", "percent", "half", "third", "quarter", "double", "single", "multiple",
    "various", "loses", "lost", "wins", "won", "shows", "shown", "says", "gets", "getting",
    "makes", "making", "takes", "taking", "becomes", "capture", "captured", "captures",
    "capturing", "launch", "launched", "launches", "launching", "release", "released",
    "announce", "announced", "reveals", "revealed", "claims", "claimed",
];

const STEMS: &[(&str, &str)] = &[
    ("captured", "capture"),
    ("captures", "capture"),
    ("capturing", "capture"),
    ("launched", "launch"),
    ("launches", "launch"),
    ("launching", "launch"),
    ("released", "release"),
    ("releases", "release"),
    ("releasing", "release"),
    ("announced", "announce"),
    ("announces", "announce"),
    ("announcing", "announce"),
    ("revealed", "reveal"),
    ("reveals", "reveal"),
    ("revealing", "reveal"),
    ("claimed", "claim"),
    ("claims", "claim"),
    ("claiming", "claim"),
    ("reported", "report"),
    ("reports", "report"),
    ("reporting", "report"),
    ("showed", "show"),
    ("shows", "show"),
    ("showing", "show"),
    ("started", "start"),
    ("starts", "start"),
    ("starting", "start"),
    ("ended", "end"),
    ("ends", "end"),
    ("ending", "end"),
    ("killed", "kill"),
    ("kills", "kill"),
    ("killing", "kill"),
    ("died", "die"),
    ("dies", "die"),
    ("dying", "die"),
    ("death", "die"),
    ("tested", "test"),
    ("tests", "test"),
    ("testing", "test"),
    ("built", "build"),
    ("builds", "build"),
    ("building", "build"),
    ("created", "create"),
    ("creates", "create"),
    ("creating", "create"),
];

/// Stop-word, generic-word and stem tables.
#[derive(Debug, Clone)]
pub struct Lexicon {
    stop_words: HashSet<String>,
    generic_words: HashSet<String>,
    stems: HashMap<String, String>,
}

impl Lexicon {
    /// Build a lexicon from custom tables.
    pub fn new<S, G, M>(stop_words: S, generic_words: G, stems: M) -> Self
    where
        S: IntoIterator,
        S::Item: Into<String>,
        G: IntoIterator,
        G::Item: Into<String>,
        M: IntoIterator<Item = (String, String)>,
    {
        Self {
            stop_words: stop_words.into_iter().map(Into::into).collect(),
            generic_words: generic_words.into_iter().map(Into::into).collect(),
            stems: stems.into_iter().collect(),
        }
    }

    /// The built-in English tables.
    pub fn builtin() -> Self {
        Self::new(
            STOP_WORDS.iter().copied(),
            GENERIC_WORDS.iter().copied(),
            STEMS
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string())),
        )
    }

    /// Add words to the stop-word table.
    pub fn with_stop_words<I>(mut self, words: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.stop_words.extend(words.into_iter().map(Into::into));
        self
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    pub fn is_generic(&self, word: &str) -> bool {
        self.generic_words.contains(word)
    }

    /// Whether the raw token is dropped before normalization.
    pub fn is_filtered(&self, word: &str) -> bool {
        self.is_stop_word(word) || self.is_generic(word)
    }

    /// Canonical form of `word`; unlisted words map to themselves.
    pub fn normalize<'a>(&'a self, word: &'a str) -> &'a str {
        self.stems.get(word).map(String::as_str).unwrap_or(word)
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_stop_words() {
        let lexicon = Lexicon::builtin();
        assert!(lexicon.is_stop_word("the"));
        assert!(lexicon.is_stop_word("new"));
        assert!(!lexicon.is_stop_word("openai"));
    }

    #[test]
    fn test_builtin_generic_words() {
        let lexicon = Lexicon::builtin();
        assert!(lexicon.is_generic("data"));
        assert!(lexicon.is_generic("news"));
        assert!(lexicon.is_generic("update"));
        assert!(lexicon.is_generic("launches"));
        assert!(!lexicon.is_generic("rust"));
    }

    #[test]
    fn test_normalize_uses_table_only() {
        let lexicon = Lexicon::builtin();
        assert_eq!(lexicon.normalize("killed"), "kill");
        assert_eq!(lexicon.normalize("death"), "die");
        assert_eq!(lexicon.normalize("walked"), "walked");
    }

    #[test]
    fn test_custom_lexicon() {
        let lexicon = Lexicon::new(
            ["foo"],
            ["bar"],
            vec![("cats".to_string(), "cat".to_string())],
        );
        assert!(lexicon.is_filtered("foo"));
        assert!(lexicon.is_filtered("bar"));
        assert!(!lexicon.is_filtered("the"));
        assert_eq!(lexicon.normalize("cats"), "cat");
    }

    #[test]
    fn test_with_stop_words() {
        let lexicon = Lexicon::builtin().with_stop_words(["reddit"]);
        assert!(lexicon.is_stop_word("reddit"));
        assert!(lexicon.is_stop_word("the"));
    }
}
