/*
    This module enumerates every word over a grammar's terminals
*/

use crate::grammar::*;

/// Produces all words over an alphabet in shortlex order: epsilon, then
/// every word of length 1, then length 2, and so on, lexicographically
/// (by alphabet position) within each length.
///
/// The sequence is infinite unless the alphabet is empty, in which case
/// epsilon is the only word.
pub struct Vocabulary {
    alphabet: Vec<Symbol>,
    // Alphabet positions of the last word produced
    current: Option<Vec<usize>>,
}

impl Vocabulary {
    pub fn new(alphabet: Vec<Symbol>) -> Self {
        Vocabulary {
            alphabet,
            current: None,
        }
    }

    pub fn of(grammar: &Grammar) -> Self {
        Vocabulary::new(grammar.alphabet())
    }
}

impl Iterator for Vocabulary {
    type Item = Word;

    fn next(&mut self) -> Option<Word> {
        if self.current.is_some() && self.alphabet.is_empty() {
            return None;
        }

        let digits = match self.current.take() {
            None => Vec::new(),
            Some(mut digits) => {
                advance(&mut digits, self.alphabet.len() - 1);
                digits
            }
        };

        let word = digits.iter().map(|&digit| self.alphabet[digit]).collect();
        self.current = Some(digits);
        Some(word)
    }
}

// Odometer step: the trailing run of maximal digits rolls over to the
// minimal digit and carries into the digit before it, or into a new
// leading digit when the whole word rolled over
fn advance(digits: &mut Vec<usize>, max: usize) {
    let carry_at = digits.iter().rposition(|&digit| digit != max);

    let suffix_start = carry_at.map_or(0, |i| i + 1);
    digits[suffix_start..].fill(0);

    match carry_at {
        Some(i) => digits[i] += 1,
        None => digits.insert(0, 0),
    }
}
