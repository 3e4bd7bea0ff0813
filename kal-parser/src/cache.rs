//! Recently parsed sentences, most recent first.

use std::collections::VecDeque;

use kal_parser_lib::SentenceParse;

/// Default number of sentences kept.
pub const DEFAULT_CAPACITY: usize = 5;

/// A small result cache keyed on the normalized sentence. The entry order
/// doubles as the history: a hit or an insert moves the sentence to the
/// front, and the oldest sentence falls off once the cache is full.
#[derive(Debug, Clone)]
pub struct SentenceCache {
    entries: VecDeque<(String, SentenceParse)>,
    capacity: usize,
}

impl SentenceCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Look up a sentence, marking it as the most recent on a hit.
    pub fn get(&mut self, sentence: &str) -> Option<&SentenceParse> {
        let index = self.entries.iter().position(|(key, _)| key == sentence)?;
        let entry = self.entries.remove(index)?;
        self.entries.push_front(entry);
        self.entries.front().map(|(_, parse)| parse)
    }

    pub fn insert(&mut self, sentence: impl Into<String>, parse: SentenceParse) {
        if self.capacity == 0 {
            return;
        }
        let sentence = sentence.into();
        self.entries.retain(|(key, _)| *key != sentence);
        self.entries.push_front((sentence, parse));
        self.entries.truncate(self.capacity);
    }

    /// Sentences in most-recent-first order.
    pub fn history(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SentenceCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> SentenceParse {
        SentenceParse {
            input: input.to_string(),
            words: Vec::new(),
        }
    }

    #[test]
    fn test_hit_moves_to_front() {
        let mut cache = SentenceCache::new(3);
        cache.insert("a", parse("a"));
        cache.insert("b", parse("b"));
        assert_eq!(cache.get("a").map(|p| p.input.as_str()), Some("a"));
        assert_eq!(cache.history().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_oldest_evicted() {
        let mut cache = SentenceCache::new(2);
        cache.insert("a", parse("a"));
        cache.insert("b", parse("b"));
        cache.insert("c", parse("c"));
        assert_eq!(cache.len(), 2);
        assert!(cache.get("a").is_none());
        assert_eq!(cache.history().collect::<Vec<_>>(), vec!["c", "b"]);
    }

    #[test]
    fn test_reinsert_does_not_duplicate() {
        let mut cache = SentenceCache::default();
        cache.insert("a", parse("a"));
        cache.insert("b", parse("b"));
        cache.insert("a", parse("a"));
        assert_eq!(cache.history().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let mut cache = SentenceCache::new(0);
        cache.insert("a", parse("a"));
        assert!(cache.is_empty());
        assert!(cache.get("a").is_none());
    }
}
