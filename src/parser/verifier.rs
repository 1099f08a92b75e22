use std::path::PathBuf;

use crate::grammar::EPSILON;
use super::CompileErrorType::{EmptyGrammar, EpsilonDefined};
use super::{CompileError, CompileErrors, FileResult, Location, Rule};

fn get_epsilon_definitions(rules: &[Rule]) -> CompileErrors {
    // `epsilon` on a left-hand side would make it both a nonterminal and
    // the empty body
    rules.iter()
        .filter(|rule| rule.symbol == EPSILON)
        .map(|rule| CompileError {
            location: rule.location.to_owned(),
            error: EpsilonDefined
        })
        .collect()
}

// Checks that only make sense once every line of the file has been read
pub fn verify_rules(rules: &[Rule], path: &PathBuf) -> FileResult<()> {
    let mut errors = Vec::new();

    if rules.is_empty() {
        errors.push(CompileError {
            location: Location::whole_file(path.clone()),
            error: EmptyGrammar
        });
    }

    errors.extend(get_epsilon_definitions(rules).into_iter());

    if errors.len() > 0 {
        Err(errors)
    } else {
        Ok(())
    }
}
