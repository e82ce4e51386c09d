use rand::seq::SliceRandom;

/// Source of the words a session's prompt is generated from. Injected so the
/// session core never depends on where text comes from.
pub trait TextSource {
    fn generate(&self, count: usize) -> Vec<String>;
}

/// Pool for random prompts. Short, common words keep sessions typeable
/// without punctuation or capitalization.
const WORDS: &[&str] = &[
    "the", "of", "and", "have", "that", "for", "you", "with", "say", "this",
    "they", "but", "his", "from", "not", "she", "as", "what", "their", "can",
    "who", "get", "would", "her", "all", "make", "about", "know", "will",
    "one", "time", "there", "year", "think", "when", "which", "them", "some",
    "people", "take", "out", "into", "just", "see", "him", "your", "come",
    "could", "now", "than", "like", "other", "how", "then", "its", "our",
    "two", "more", "these", "want", "way", "look", "first", "also", "new",
    "because", "day", "use", "man", "find", "here", "thing", "give", "many",
    "well", "only", "those", "tell", "very", "even", "back", "any", "good",
    "woman", "through", "life", "child", "work", "down", "may", "after",
    "should", "call", "world", "over", "school", "still", "try", "last",
    "ask", "need", "too", "feel", "three", "state", "never", "become",
    "between", "high", "really", "something", "most", "another", "much",
    "family", "own", "leave", "put", "old", "while", "mean", "keep",
    "student", "great", "same", "group", "begin", "seem", "country", "help",
    "talk", "where", "turn", "problem", "every", "start", "hand", "might",
    "show", "part", "against", "place", "such", "again", "few", "case",
];

/// Uniform random selection from the embedded pool, with replacement.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomWords;

impl TextSource for RandomWords {
    fn generate(&self, count: usize) -> Vec<String> {
        let mut rng = rand::thread_rng();
        (0..count)
            .map(|_| {
                WORDS
                    .choose(&mut rng)
                    .map(|w| (*w).to_owned())
                    .unwrap_or_default()
            })
            .collect()
    }
}

/// Deterministic source for tests and scripted runs: cycles the given words
/// until `count` is reached.
#[derive(Clone, Debug)]
pub struct FixedWords(pub Vec<String>);

impl FixedWords {
    pub fn of(words: &[&str]) -> Self {
        Self(words.iter().map(|w| w.to_string()).collect())
    }
}

impl TextSource for FixedWords {
    fn generate(&self, count: usize) -> Vec<String> {
        self.0.iter().cloned().cycle().take(count).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_words_honors_count() {
        let words = RandomWords.generate(25);
        assert_eq!(words.len(), 25);
        assert!(words.iter().all(|w| !w.is_empty()));
    }

    #[test]
    fn test_random_words_draw_from_pool() {
        for word in RandomWords.generate(50) {
            assert!(WORDS.contains(&word.as_str()));
        }
    }

    #[test]
    fn test_fixed_words_cycles() {
        let source = FixedWords::of(&["hot", "cocoa"]);
        assert_eq!(source.generate(3), vec!["hot", "cocoa", "hot"]);
    }

    #[test]
    fn test_fixed_words_empty_pool_yields_nothing() {
        let source = FixedWords(Vec::new());
        assert!(source.generate(5).is_empty());
    }
}
