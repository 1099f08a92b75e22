/*
    This module renders test results for the terminal
*/

use std::fmt::{Display, Formatter, Result};

use itertools::Itertools;

use crate::derivation::*;
use crate::grammar::*;
use crate::tester::Verdict;

const FORM_HEADER: &str = "Derived String";
const RULE_HEADER: &str = "Applied Rule";
const LAST_RULE: &str = "Done";

/// A derivation as a two column table. Each row holds a sentential form
/// and the rule rewritten in it; the last row holds the word itself.
pub struct TraceTable<'a> {
    pub grammar: &'a Grammar,
    pub trace: &'a DerivationTrace,
}

impl<'a> TraceTable<'a> {
    fn rows(&self) -> Vec<(String, String)> {
        let before = std::iter::once(&self.trace.start)
            .chain(self.trace.steps.iter().map(|step| &step.form));

        let mut rows = before.zip(&self.trace.steps)
            .map(|(form, step)| (
                self.grammar.form_to_string(form),
                self.grammar.rule_to_string(step.nonterminal, &step.body)
            ))
            .collect_vec();
        rows.push((self.grammar.form_to_string(self.trace.result()), LAST_RULE.to_string()));

        rows
    }
}

fn separator(f: &mut Formatter<'_>, left: usize, right: usize) -> Result {
    writeln!(f, "|{}|{}|", "_".repeat(left), "_".repeat(right))
}

impl Display for TraceTable<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let rows = self.rows();

        // One space of padding on either side of the widest cell, counted
        // in chars since that is what `{:<w$}` pads by
        let width = |cell: &str| cell.chars().count();
        let left = rows.iter().map(|(form, _)| width(form.as_str())).chain([width(FORM_HEADER)]).max().unwrap_or(0) + 2;
        let right = rows.iter().map(|(_, rule)| width(rule.as_str())).chain([width(RULE_HEADER)]).max().unwrap_or(0) + 2;

        writeln!(f, " {} ", "_".repeat(left + right + 1))?;
        writeln!(f, "| {:<l$} | {:<r$} |", FORM_HEADER, RULE_HEADER, l = left - 2, r = right - 2)?;
        separator(f, left, right)?;
        for (form, rule) in rows {
            writeln!(f, "| {:<l$} | {:<r$} |", form, rule, l = left - 2, r = right - 2)?;
        }
        separator(f, left, right)
    }
}

/// What a single word's search found, for verbose output.
pub struct WordReport<'a> {
    pub grammar: &'a Grammar,
    pub word: &'a [Symbol],
    pub result: &'a std::result::Result<Derivations, SearchAborted>,
}

impl Display for WordReport<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let word = self.grammar.form_to_string(self.word);

        match self.result {
            Err(reason) => writeln!(f, "[{}] {}", word, reason),
            Ok(found) => {
                let count = if found.is_ambiguous() {
                    "at least 2 leftmost derivations".to_string()
                } else if found.count == 1 {
                    "1 leftmost derivation".to_string()
                } else {
                    format!("{} leftmost derivations", found.count)
                };
                writeln!(f, "[{}] {} ({} forms explored)", word, count, found.explored)?;

                // A unique derivation is shown in full; two are left to the verdict
                match &found.witnesses[..] {
                    [only] => write!(f, "{}", TraceTable { grammar: self.grammar, trace: only }),
                    _ => Ok(()),
                }
            }
        }
    }
}

/// The final result of a run.
pub struct VerdictReport<'a> {
    pub grammar: &'a Grammar,
    pub verdict: &'a Verdict,
}

impl Display for VerdictReport<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self.verdict {
            Verdict::EmptyVocabularyAmbiguous => writeln!(
                f,
                "This grammar is trivially ambiguous: it has no terminal vocabulary (no terminals and no `{}` rule).",
                EPSILON
            ),
            Verdict::Ambiguous { word, witnesses: [first, second] } => {
                writeln!(f, "Found two leftmost derivations of the word: {}", self.grammar.form_to_string(word))?;
                writeln!(f, "The first leftmost derivation is:")?;
                write!(f, "{}", TraceTable { grammar: self.grammar, trace: first })?;
                writeln!(f, "The second leftmost derivation is:")?;
                write!(f, "{}", TraceTable { grammar: self.grammar, trace: second })?;
                writeln!(f, "This grammar is ambiguous.")
            }
            Verdict::NotAmbiguous { max_length, words_tested } => writeln!(
                f,
                "No ambiguity found in {} words up to length {}. Longer words were not tested, so this is not a proof.",
                words_tested, max_length
            ),
            Verdict::Inconclusive { word, reason } => writeln!(
                f,
                "Inconclusive: the {} while testing the word: {}\nThe recursion depth limit was reached; no ambiguity claim is made.",
                reason, self.grammar.form_to_string(word)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::parser::parse_source;

    fn grammar(source: &str) -> Grammar {
        parse_source(source.as_bytes(), &PathBuf::from("inline.cfg"), None).unwrap()
    }

    // S => a S b => a b
    fn balanced_trace(grammar: &Grammar) -> DerivationTrace {
        DerivationTrace {
            start: grammar.form("S"),
            steps: vec![
                Step { nonterminal: 0, body: grammar.form("a S b"), form: grammar.form("a S b") },
                Step { nonterminal: 0, body: vec![], form: grammar.form("a b") },
            ],
        }
    }

    #[test]
    fn trace_table_layout() {
        let grammar = grammar("S -> a S b | epsilon");
        let table = TraceTable { grammar: &grammar, trace: &balanced_trace(&grammar) }.to_string();

        let expected = [
            " _______________________________ ",
            "| Derived String | Applied Rule |",
            "|________________|______________|",
            "| S              | S -> a S b   |",
            "| a S b          | S -> epsilon |",
            "| a b            | Done         |",
            "|________________|______________|",
        ];
        assert_eq!(table.lines().collect_vec(), expected);
    }

    #[test]
    fn trace_table_grows_with_content() {
        let grammar = grammar("statement_list -> statement_list statement | statement\nstatement -> x");
        let trace = DerivationTrace {
            start: grammar.form("statement_list"),
            steps: vec![Step { nonterminal: 0, body: grammar.form("statement"), form: grammar.form("statement") }],
        };

        let table = TraceTable { grammar: &grammar, trace: &trace }.to_string();
        let widths = table.lines().map(str::len).unique().collect_vec();

        assert_eq!(widths.len(), 1, "ragged table:\n{}", table);
        assert!(table.contains("| statement_list | statement_list -> statement |"));
    }

    #[test]
    fn trace_table_measures_chars_not_bytes() {
        let grammar = grammar("ausdruck -> ααααααααααααα | ß");
        let trace = DerivationTrace {
            start: grammar.form("ausdruck"),
            steps: vec![Step { nonterminal: 0, body: grammar.form("ααααααααααααα"), form: grammar.form("ααααααααααααα") }],
        };

        let table = TraceTable { grammar: &grammar, trace: &trace }.to_string();
        let widths = table.lines().map(|line| line.chars().count()).unique().collect_vec();

        assert_eq!(widths, vec![46], "ragged table:\n{}", table);
        assert!(table.contains("| ααααααααααααα  | Done                      |"));
    }

    #[test]
    fn word_report_shows_unique_derivation() {
        let grammar = grammar("S -> a S b | epsilon");
        let word = grammar.form("a b");
        let result = Ok(Derivations { count: 1, witnesses: vec![balanced_trace(&grammar)], explored: 5 });

        let text = WordReport { grammar: &grammar, word: &word, result: &result }.to_string();

        assert!(text.starts_with("[a b] 1 leftmost derivation (5 forms explored)\n"));
        assert!(text.contains("| a b            | Done         |"));
    }

    #[test]
    fn word_report_abort() {
        let grammar = grammar("S -> S | S a");
        let word = grammar.form("a");
        let result = Err(SearchAborted { depth_limit: 10 });

        let text = WordReport { grammar: &grammar, word: &word, result: &result }.to_string();
        assert_eq!(text, "[a] search aborted after 10 derivation steps\n");
    }

    #[test]
    fn verdict_messages() {
        let grammar = grammar("S -> a S b | epsilon");

        let empty = VerdictReport { grammar: &grammar, verdict: &Verdict::EmptyVocabularyAmbiguous }.to_string();
        assert!(empty.contains("trivially ambiguous"));

        let bounded = VerdictReport {
            grammar: &grammar,
            verdict: &Verdict::NotAmbiguous { max_length: 4, words_tested: 31 },
        }.to_string();
        assert!(bounded.starts_with("No ambiguity found in 31 words up to length 4."));

        let aborted = VerdictReport {
            grammar: &grammar,
            verdict: &Verdict::Inconclusive { word: grammar.form("a b"), reason: SearchAborted { depth_limit: 3 } },
        }.to_string();
        assert!(aborted.starts_with("Inconclusive: the search aborted after 3 derivation steps while testing the word: a b"));
        assert!(!aborted.contains("is ambiguous"));
    }

    #[test]
    fn ambiguous_verdict_shows_both_tables() {
        let grammar = grammar("S -> a S b | epsilon");
        let trace = balanced_trace(&grammar);
        let verdict = Verdict::Ambiguous { word: grammar.form("a b"), witnesses: [trace.clone(), trace] };

        let text = VerdictReport { grammar: &grammar, verdict: &verdict }.to_string();

        assert!(text.starts_with("Found two leftmost derivations of the word: a b\n"));
        assert_eq!(text.matches("| Derived String |").count(), 2);
        assert!(text.ends_with("This grammar is ambiguous.\n"));
    }
}
