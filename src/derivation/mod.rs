/*
    This module counts the leftmost derivations of a word
*/

use std::fmt::Display;

use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::grammar::*;

// Leftmost steps a single search may stack up before giving up
pub const DEFAULT_DEPTH_LIMIT: usize = 2000;

// Searching stops as soon as this many derivations are known
const ENOUGH_DERIVATIONS: usize = 2;

/// One rewrite of a leftmost derivation: the rule applied and the form it
/// produced.
#[derive(Clone, Debug, PartialEq)]
pub struct Step {
    pub nonterminal: usize,
    pub body: SententialForm,
    pub form: SententialForm,
}

/// A leftmost derivation from the start symbol to a word.
#[derive(Clone, Debug, PartialEq)]
pub struct DerivationTrace {
    pub start: SententialForm,
    pub steps: Vec<Step>,
}

impl DerivationTrace {
    /// The form the derivation ends at.
    pub fn result(&self) -> &[Symbol] {
        self.steps.last().map_or(&self.start, |step| &step.form)
    }
}

/// What a search found for one word. `count` saturates at 2, which already
/// proves the word ambiguous; `witnesses` holds one trace per counted
/// derivation in the order they were found.
#[derive(Debug, PartialEq)]
pub struct Derivations {
    pub count: usize,
    pub witnesses: Vec<DerivationTrace>,
    // Sentential forms visited, including dead ends
    pub explored: usize,
}

impl Derivations {
    pub fn is_ambiguous(&self) -> bool {
        self.count >= ENOUGH_DERIVATIONS
    }
}

// The search went deeper than its budget allows
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchAborted {
    pub depth_limit: usize,
}

impl Display for SearchAborted {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "search aborted after {} derivation steps", self.depth_limit)
    }
}

/// Counts leftmost derivations by depth-first backtracking over the
/// grammar's rules. The backtracking stack lives on the heap, so a search
/// that runs out of depth budget ends in `SearchAborted` rather than a
/// stack overflow.
///
/// The rules of a nonterminal are tried in a fresh random order at every
/// expansion. The order only decides which derivations are found first,
/// never how many exist, so the same seed always reproduces the same
/// witnesses.
pub struct DerivationCounter<'g, R> {
    grammar: &'g Grammar,
    rng: R,
    depth_limit: usize,
}

impl<'g, R: Rng> DerivationCounter<'g, R> {
    pub fn new(grammar: &'g Grammar, rng: R) -> Self {
        DerivationCounter {
            grammar,
            rng,
            depth_limit: DEFAULT_DEPTH_LIMIT,
        }
    }

    pub fn with_depth_limit(mut self, depth_limit: usize) -> Self {
        self.depth_limit = depth_limit;
        self
    }

    pub fn count(&mut self, word: &[Symbol]) -> Result<Derivations, SearchAborted> {
        let start = vec![self.grammar.start()];
        let mut search = Search {
            grammar: self.grammar,
            rng: &mut self.rng,
            word,
            depth_limit: self.depth_limit,
            form: start.clone(),
            start,
            steps: Vec::new(),
            witnesses: Vec::new(),
            explored: 0,
        };

        search.derive()?;

        Ok(Derivations {
            count: search.witnesses.len(),
            witnesses: search.witnesses,
            explored: search.explored,
        })
    }
}

// State of one word's search, dropped when the word is done
struct Search<'a, R> {
    grammar: &'a Grammar,
    rng: &'a mut R,
    word: &'a [Symbol],
    depth_limit: usize,
    start: SententialForm,
    form: SententialForm,
    steps: Vec<Step>,
    witnesses: Vec<DerivationTrace>,
    explored: usize,
}

// A form whose leftmost nonterminal is being expanded. The search keeps
// these on its own stack, so the depth budget is the only bound on how
// deep a derivation can go.
struct Frame {
    index: usize,
    nonterminal: usize,
    // Rule bodies in the order they are tried
    order: Vec<usize>,
    next: usize,
    // Length of the body spliced in at `index`, until it is undone
    applied: Option<usize>,
}

impl<'a, R: Rng> Search<'a, R> {
    fn derive(&mut self) -> Result<(), SearchAborted> {
        let grammar = self.grammar;
        let mut frames: Vec<Frame> = Vec::new();
        frames.extend(self.visit()?);

        while let Some(frame) = frames.last_mut() {
            if let Some(length) = frame.applied.take() {
                self.steps.pop();
                self.form.splice(frame.index..frame.index + length, [Symbol::Nonterminal(frame.nonterminal)]);
            }

            if self.witnesses.len() >= ENOUGH_DERIVATIONS || frame.next == frame.order.len() {
                frames.pop();
                continue;
            }

            let body = &grammar.rules(frame.nonterminal)[frame.order[frame.next]];
            frame.next += 1;
            frame.applied = Some(body.len());

            self.form.splice(frame.index..=frame.index, body.iter().copied());
            self.steps.push(Step {
                nonterminal: frame.nonterminal,
                body: body.clone(),
                form: self.form.clone(),
            });

            frames.extend(self.visit()?);
        }

        Ok(())
    }

    // Looks at the current form. Returns the frame to expand it with, or
    // None when it is a derivation of the word or a dead end.
    fn visit(&mut self) -> Result<Option<Frame>, SearchAborted> {
        self.explored += 1;

        if self.witnesses.len() >= ENOUGH_DERIVATIONS {
            return Ok(None);
        }

        if self.form == self.word {
            self.witnesses.push(DerivationTrace {
                start: self.start.clone(),
                steps: self.steps.clone(),
            });
            return Ok(None);
        }

        // Only nullable symbols can vanish into epsilon
        if self.word.is_empty() && !self.form.iter().all(|&symbol| self.grammar.is_nullable(symbol)) {
            return Ok(None);
        }

        let first_nonterminal = self.form.iter()
            .enumerate()
            .find_map(|(index, symbol)| match symbol {
                Symbol::Nonterminal(id) => Some((index, *id)),
                Symbol::Terminal(_) => None,
            });

        // An empty or all-terminal form that is not the word cannot change
        let Some((index, nonterminal)) = first_nonterminal else {
            return Ok(None);
        };

        if self.cannot_reach_word(index) {
            return Ok(None);
        }

        if self.steps.len() >= self.depth_limit {
            return Err(SearchAborted { depth_limit: self.depth_limit });
        }

        let mut order = (0..self.grammar.rules(nonterminal).len()).collect_vec();
        order.shuffle(&mut *self.rng);

        Ok(Some(Frame {
            index,
            nonterminal,
            order,
            next: 0,
            applied: None,
        }))
    }

    // The terminals before the first nonterminal are final, so they must
    // already match the word. Every terminal and every non-nullable
    // nonterminal yields at least one letter, which bounds the shortest
    // word the form can still reach.
    fn cannot_reach_word(&self, first_nonterminal: usize) -> bool {
        if first_nonterminal > self.word.len() {
            return true;
        }

        if self.form[..first_nonterminal] != self.word[..first_nonterminal] {
            return true;
        }

        let shortest = self.form.iter()
            .filter(|&&symbol| !self.grammar.is_nullable(symbol))
            .count();

        shortest > self.word.len()
    }
}
