/*
    This module is for storing grammars and the facts derived from them
*/

use std::collections::HashMap;

use itertools::Itertools;

// The literal that spells the empty body in grammar files
pub const EPSILON: &str = "epsilon";

// The base unit in a grammar rule. The index names the symbol in the
// grammar's terminal or nonterminal table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    Terminal(usize),
    Nonterminal(usize),
}

// An ordered sequence of symbols, the empty one being epsilon
pub type SententialForm = Vec<Symbol>;

// A sentential form made only of terminals
pub type Word = Vec<Symbol>;

// The alternatives of a nonterminal
pub type Rewrite = Vec<SententialForm>;

// One definition as the reader hands it over: a left-hand side and its
// bodies, still spelled out as names
pub type Definition = (String, Vec<Vec<String>>);

#[derive(Debug, PartialEq)]
pub struct Grammar {
    terminals: Vec<String>,
    nonterminals: Vec<String>,
    // Indexed by nonterminal
    rules: Vec<Rewrite>,
    nullable: Vec<bool>,
    vocabulary_empty: bool,
    start: usize,
}

impl Grammar {
    /// Builds the rule table from definitions in file order.
    ///
    /// Definitions sharing a left-hand side are unioned, every symbol that
    /// is never defined becomes a terminal and `epsilon` tokens are dropped
    /// from bodies. The first left-hand side is the start symbol.
    pub fn from_definitions<I>(definitions: I) -> Grammar
    where
        I: IntoIterator<Item = Definition>,
    {
        let definitions = definitions.into_iter().collect_vec();

        let nonterminals = definitions.iter()
            .map(|(symbol, _)| symbol.clone())
            .unique()
            .collect_vec();
        let nonterminal_ids: HashMap<&str, usize> = nonterminals.iter()
            .enumerate()
            .map(|(id, name)| (name.as_str(), id))
            .collect();

        let mut terminals = Vec::new();
        let mut terminal_ids = HashMap::new();
        let mut rules = vec![Rewrite::new(); nonterminals.len()];

        for (symbol, alternatives) in &definitions {
            let rewrite = &mut rules[nonterminal_ids[symbol.as_str()]];

            for alternative in alternatives {
                let mut form = SententialForm::with_capacity(alternative.len());
                for token in alternative.iter().filter(|token| *token != EPSILON) {
                    let resolved = match nonterminal_ids.get(token.as_str()) {
                        Some(&id) => Symbol::Nonterminal(id),
                        None => Symbol::Terminal(*terminal_ids.entry(token.clone()).or_insert_with(|| {
                            terminals.push(token.clone());
                            terminals.len() - 1
                        })),
                    };
                    form.push(resolved);
                }

                // Bodies form a set, the first occurrence keeps its place
                if !rewrite.contains(&form) {
                    rewrite.push(form);
                }
            }
        }

        let has_epsilon_body = rules.iter().flatten().any(Vec::is_empty);
        let nullable = compute_nullables(&rules);

        Grammar {
            vocabulary_empty: terminals.is_empty() && !has_epsilon_body,
            terminals,
            nonterminals,
            rules,
            nullable,
            start: 0,
        }
    }

    /// The terminal alphabet in enumeration order.
    pub fn alphabet(&self) -> Vec<Symbol> {
        (0..self.terminals.len()).map(Symbol::Terminal).collect()
    }

    pub fn nonterminal_count(&self) -> usize {
        self.nonterminals.len()
    }

    pub fn rules(&self, nonterminal: usize) -> &[SententialForm] {
        &self.rules[nonterminal]
    }

    pub fn is_nullable(&self, symbol: Symbol) -> bool {
        match symbol {
            Symbol::Nonterminal(id) => self.nullable[id],
            Symbol::Terminal(_) => false,
        }
    }

    /// True when the grammar has no terminals and no epsilon body, so it
    /// derives no word at all.
    pub fn is_vocabulary_empty(&self) -> bool {
        self.vocabulary_empty
    }

    pub fn start(&self) -> Symbol {
        Symbol::Nonterminal(self.start)
    }

    /// Moves the start symbol to the nonterminal called `name`. Returns
    /// false and changes nothing if no such nonterminal exists.
    pub fn set_start(&mut self, name: &str) -> bool {
        match self.nonterminals.iter().position(|nonterminal| nonterminal == name) {
            Some(id) => {
                self.start = id;
                true
            }
            None => false,
        }
    }

    pub fn name(&self, symbol: Symbol) -> &str {
        match symbol {
            Symbol::Terminal(id) => &self.terminals[id],
            Symbol::Nonterminal(id) => &self.nonterminals[id],
        }
    }

    pub fn form_to_string(&self, form: &[Symbol]) -> String {
        if form.is_empty() {
            EPSILON.to_string()
        } else {
            form.iter().map(|&symbol| self.name(symbol)).join(" ")
        }
    }

    pub fn rule_to_string(&self, nonterminal: usize, body: &[Symbol]) -> String {
        format!("{} -> {}", self.nonterminals[nonterminal], self.form_to_string(body))
    }

    // Resolves a whitespace separated list of names, for building words in tests
    #[cfg(test)]
    pub fn form(&self, text: &str) -> SententialForm {
        text.split_whitespace()
            .map(|name| {
                if let Some(id) = self.nonterminals.iter().position(|n| n == name) {
                    Symbol::Nonterminal(id)
                } else {
                    let id = self.terminals.iter().position(|t| t == name)
                        .unwrap_or_else(|| panic!("unknown symbol `{}`", name));
                    Symbol::Terminal(id)
                }
            })
            .collect()
    }
}

// Least fixpoint: a nonterminal is nullable if one of its bodies is made
// only of nullable nonterminals (the empty body trivially qualifies)
fn compute_nullables(rules: &[Rewrite]) -> Vec<bool> {
    let mut nullable = rules.iter()
        .map(|rewrite| rewrite.iter().any(Vec::is_empty))
        .collect_vec();

    let mut updated = true;
    while updated {
        updated = false;
        for (nonterminal, rewrite) in rules.iter().enumerate() {
            if nullable[nonterminal] {
                continue;
            }

            let derives_epsilon = rewrite.iter().any(|form| {
                form.iter().all(|symbol| match symbol {
                    Symbol::Nonterminal(id) => nullable[*id],
                    Symbol::Terminal(_) => false,
                })
            });

            if derives_epsilon {
                nullable[nonterminal] = true;
                updated = true;
            }
        }
    }

    nullable
}
