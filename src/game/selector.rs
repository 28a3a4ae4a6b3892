//! Middle word and subword selection
//!
//! Lexicon words are grouped by their sorted letters ("signature"). The
//! subwords of a candidate middle word are then found by walking every
//! sub-multiset of its letters and looking the signature up, which stays
//! cheap even for ten-letter middle words.

use super::dictionary::Lexicon;
use super::Difficulty;
use rand::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

/// A middle word together with the subwords that can be built from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub middle_word: String,
    /// Randomly ordered, never contains `middle_word`.
    pub subwords: Vec<String>,
}

/// Sorted letters of a word, used as the anagram bucket key.
pub fn signature(word: &str) -> String {
    let mut letters: Vec<char> = word.chars().collect();
    letters.sort_unstable();
    letters.into_iter().collect()
}

/// Lexicon index for one difficulty.
pub struct WordSelector {
    /// Candidate middle words, sorted
    candidates: Vec<String>,
    /// Signature -> words with that signature, for every eligible word
    buckets: BTreeMap<String, Vec<String>>,
    min_words: usize,
    min_subword_length: usize,
}

impl WordSelector {
    /// Index the words of `lexicon` usable under `difficulty`.
    ///
    /// Only lowercase ASCII alphabetic words are indexed, since those are the
    /// only ones a player can type and a board can display.
    pub fn new(lexicon: &Lexicon, difficulty: &Difficulty) -> Self {
        let max_len = difficulty.max_word_length;
        let mut candidates = Vec::new();
        let mut buckets: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for word in lexicon.iter() {
            if word.is_empty() || word.len() > max_len || !word.bytes().all(|b| b.is_ascii_lowercase()) {
                continue;
            }
            if word.len() == max_len {
                candidates.push(word.to_string());
            }
            buckets.entry(signature(word)).or_default().push(word.to_string());
        }

        Self {
            candidates,
            buckets,
            min_words: difficulty.min_words,
            min_subword_length: difficulty.min_subword_length,
        }
    }

    /// Number of words that could serve as the middle word.
    #[cfg(test)]
    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    /// All distinct subwords of `middle` in the index, excluding `middle`.
    pub fn subwords_of(&self, middle: &str) -> BTreeSet<String> {
        let mut counts: BTreeMap<char, usize> = BTreeMap::new();
        for c in middle.chars() {
            *counts.entry(c).or_insert(0) += 1;
        }
        let counts: Vec<(char, usize)> = counts.into_iter().collect();

        let mut found = BTreeSet::new();
        let mut chosen = String::with_capacity(middle.len());
        self.walk_submultisets(&counts, 0, &mut chosen, middle, &mut found);
        found
    }

    fn walk_submultisets(
        &self,
        counts: &[(char, usize)],
        index: usize,
        chosen: &mut String,
        middle: &str,
        found: &mut BTreeSet<String>,
    ) {
        if index == counts.len() {
            if chosen.len() < self.min_subword_length.max(1) {
                return;
            }
            // `chosen` is built in sorted letter order, so it is already a signature
            if let Some(words) = self.buckets.get(chosen.as_str()) {
                found.extend(words.iter().filter(|w| w.as_str() != middle).cloned());
            }
            return;
        }

        let (letter, available) = counts[index];
        let base = chosen.len();
        for take in 0..=available {
            if take > 0 {
                chosen.push(letter);
            }
            self.walk_submultisets(counts, index + 1, chosen, middle, found);
        }
        chosen.truncate(base);
    }

    /// Pick a middle word with at least `min_words - 1` subwords.
    ///
    /// Candidates are tried in random order; returns `None` when none
    /// qualifies.
    pub fn select<R: Rng>(&self, rng: &mut R) -> Option<Selection> {
        let needed = self.min_words.saturating_sub(1);
        let mut order: Vec<&String> = self.candidates.iter().collect();
        order.shuffle(rng);

        for middle in order {
            let subwords = self.subwords_of(middle);
            if subwords.len() >= needed {
                let mut subwords: Vec<String> = subwords.into_iter().collect();
                subwords.shuffle(rng);
                log::debug!("selected middle word {:?} with {} subwords", middle, subwords.len());
                return Some(Selection {
                    middle_word: middle.clone(),
                    subwords,
                });
            }
        }
        None
    }
}
