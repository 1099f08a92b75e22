/*
    This module decides, within a word length bound, whether a grammar is
    ambiguous
*/

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

use crate::derivation::*;
use crate::grammar::*;
use crate::vocabulary::Vocabulary;

// Concrete, seedable PRNG so a seed reproduces a run on any platform
type SearchRng = Xoshiro256StarStar;

#[derive(Debug, PartialEq)]
pub enum Verdict {
    // No terminals and no epsilon body: the grammar derives nothing, which
    // counts as ambiguous since no word can tell its derivations apart
    EmptyVocabularyAmbiguous,
    Ambiguous {
        word: Word,
        witnesses: [DerivationTrace; 2],
    },
    // Only a statement about words up to `max_length`, not a proof
    NotAmbiguous {
        max_length: usize,
        words_tested: usize,
    },
    Inconclusive {
        word: Word,
        reason: SearchAborted,
    },
}

/// Tests the words of a grammar's vocabulary in shortlex order until one
/// has two leftmost derivations or the length bound is passed.
pub struct AmbiguityTester<'g> {
    grammar: &'g Grammar,
    max_length: usize,
    seed: u64,
    depth_limit: usize,
}

impl<'g> AmbiguityTester<'g> {
    pub fn new(grammar: &'g Grammar, max_length: usize) -> Self {
        AmbiguityTester {
            grammar,
            max_length,
            seed: 0,
            depth_limit: DEFAULT_DEPTH_LIMIT,
        }
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn depth_limit(mut self, depth_limit: usize) -> Self {
        self.depth_limit = depth_limit;
        self
    }

    pub fn run(&self) -> Verdict {
        self.run_observed(|_, _| {})
    }

    /// Like `run`, but hands every tested word and what the search found
    /// for it to `observe` before acting on it.
    pub fn run_observed<F>(&self, mut observe: F) -> Verdict
    where
        F: FnMut(&[Symbol], &Result<Derivations, SearchAborted>),
    {
        if self.grammar.is_vocabulary_empty() {
            return Verdict::EmptyVocabularyAmbiguous;
        }

        let mut counter = DerivationCounter::new(self.grammar, SearchRng::seed_from_u64(self.seed))
            .with_depth_limit(self.depth_limit);
        let mut words_tested = 0;

        // Without terminals the vocabulary stops after epsilon
        let words = Vocabulary::of(self.grammar).take_while(|word| word.len() <= self.max_length);

        for word in words {
            let result = counter.count(&word);
            observe(&word[..], &result);
            words_tested += 1;

            match result {
                Err(reason) => return Verdict::Inconclusive { word, reason },
                Ok(found) => {
                    if let Ok(witnesses) = <[DerivationTrace; 2]>::try_from(found.witnesses) {
                        return Verdict::Ambiguous { word, witnesses };
                    }
                }
            }
        }

        Verdict::NotAmbiguous {
            max_length: self.max_length,
            words_tested,
        }
    }
}
