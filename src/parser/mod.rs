/*
    This module parses grammar files of the form `A -> body | body`
*/

mod lexer;
mod verifier;

use std::fmt::Display;
use std::fs::File;
use std::io::{BufRead, Read};
use std::path::PathBuf;

use crate::grammar::*;
use crate::error_handling::*;
use itertools::Itertools;
use lexer::*;
use verifier::verify_rules;

#[derive(Debug)]
pub enum CompileErrorType {
    // A line which should contain a rule has no `->`
    MissingArrow,
    // A rule has more than one `->`
    UnexpectedArrow,
    // The user starts a rule line with something other than a symbol
    MissingNonterminal,
    // Nothing between two separators, or nothing after the arrow
    EmptyAlternative,
    // `epsilon` was given rules of its own
    EpsilonDefined,
    // The file holds no rules at all
    EmptyGrammar,
    // The requested start symbol has no rules
    UndefinedStart(String),
    // A blank line got too deep into the parser
    // This is a problem with the reader, not the grammar
    UnexpectedBlankLine,
    // There was an issue with reading a file
    FileError(std::io::Error),
}

impl ErrorType for CompileErrorType {}

impl PartialEq for CompileErrorType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CompileErrorType::FileError(a), CompileErrorType::FileError(b)) => a.kind() == b.kind(),
            (CompileErrorType::UndefinedStart(a), CompileErrorType::UndefinedStart(b)) => a == b,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other)
        }
    }
}

impl Display for CompileErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileErrorType::MissingArrow => write!(f, "Expected `->` after nonterminal"),
            CompileErrorType::UnexpectedArrow => write!(f, "Unexpected second `->` encountered"),
            CompileErrorType::MissingNonterminal => write!(f, "Tried to define something other than a nonterminal"),
            CompileErrorType::EmptyAlternative => write!(f, "Empty alternative (write `{}` for the empty body)", EPSILON),
            CompileErrorType::EpsilonDefined => write!(f, "`{}` cannot be defined, it denotes the empty body", EPSILON),
            CompileErrorType::EmptyGrammar => write!(f, "No rules found"),
            CompileErrorType::UndefinedStart(symbol) => write!(f, "Could not find definition for start symbol `{}`", symbol),
            CompileErrorType::UnexpectedBlankLine => write!(f, "Blank line encountered in rule parser (this is a problem with the reader, not the grammar)"),
            CompileErrorType::FileError(e) => write!(f, "File error: {}", e),
        }
    }
}

pub type CompileError = Error<CompileErrorType>;
pub type CompileErrors = Errors<CompileErrorType>;

fn io_error(error: std::io::Error, file: PathBuf) -> CompileError {
    CompileError {
        location: Location::whole_file(file),
        error: CompileErrorType::FileError(error)
    }
}

pub type Result<T> = std::result::Result<T, CompileErrorType>;
pub type LineResult<T> = std::result::Result<T, CompileError>;
pub type FileResult<T> = std::result::Result<T, CompileErrors>;

#[derive(PartialEq, Debug)]
struct Rule {
    symbol: String,
    rewrite: Vec<Vec<String>>,
    location: Location
}

fn parse_alternative(tokens: &[Token]) -> Result<Vec<String>> {
    if tokens.is_empty() {
        return Err(CompileErrorType::EmptyAlternative);
    }

    tokens.iter().map(|t| match t {
        Token::Arrow => Err(CompileErrorType::UnexpectedArrow),
        Token::Or => Err(CompileErrorType::EmptyAlternative),
        Token::Symbol(s) => Ok(s.clone())
    }).collect()
}

fn parse_rewrite(tokens: &[Token]) -> Result<Vec<Vec<String>>> {
    tokens.split(|t| *t == Token::Or).map(parse_alternative).collect()
}

fn parse_line(tokens: &[Token], location: Location) -> Result<Rule> {
    let symbol = match tokens.get(0) {
        Some(Token::Symbol(s)) => Ok(s.clone()),
        Some(_) => Err(CompileErrorType::MissingNonterminal),
        None => Err(CompileErrorType::UnexpectedBlankLine)
    }?;

    if tokens.get(1) != Some(&Token::Arrow) {
        return Err(CompileErrorType::MissingArrow)
    }

    let rewrite = parse_rewrite(&tokens[2..])?;

    return Ok(Rule {
        symbol,
        rewrite,
        location
    });
}

fn parse_lex_line(line: &str, location: Location) -> LineResult<Rule> {
    parse_line(&lexer::lex_line(line), location.clone())
        .map_err(|error| CompileError { location, error })
}

// Blank lines and `;` comments carry no rules
fn is_rule_line(line: &String) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && !trimmed.starts_with(';')
}

// Returns an iterator over the rule lines of a source, with the io errors
// wrapped in CompileError and numbered from 1
fn line_nums<'a>(source: impl BufRead + 'a, path: &'a PathBuf) -> impl Iterator<Item = (usize, LineResult<String>)> + 'a {
    source
        .lines()
        .map(move |line| line.map_err(|e| io_error(e, path.clone())))
        .enumerate()
        .filter(|(_, line)| line.as_ref().is_ok_and(is_rule_line) || line.is_err())
        .map(|(num, line)| (num + 1, line))
}

fn grammar_from_rules(rules: Vec<Rule>, path: &PathBuf, start: Option<&str>) -> FileResult<Grammar> {
    verify_rules(&rules, path)?;

    let mut grammar = Grammar::from_definitions(
        rules.into_iter().map(|rule| (rule.symbol, rule.rewrite))
    );

    if let Some(start) = start {
        if !grammar.set_start(start) {
            return Err(vec![CompileError {
                location: Location::whole_file(path.clone()),
                error: CompileErrorType::UndefinedStart(start.to_string())
            }]);
        }
    }

    return Ok(grammar);
}

/// Parses a whole grammar source. Every malformed line is reported, and no
/// grammar is built unless all of them parse.
pub fn parse_source(source: impl BufRead, path: &PathBuf, start: Option<&str>) -> FileResult<Grammar> {
    let parsed_lines = line_nums(source, path).map(|(num, line_res)| {
        line_res.and_then(|line| parse_lex_line(&line, Location {
            file: path.clone(),
            line: num
        }))
    });

    let (rules, errors): (Vec<_>, Vec<_>) = parsed_lines.partition_result();
    if errors.len() > 0 {
        return Err(errors);
    }

    return grammar_from_rules(rules, path, start);
}

pub fn parse_file(path: &PathBuf, start: Option<&str>) -> FileResult<Grammar> {
    let mut file = File::open(path).map_err(|e| vec![io_error(e, path.clone())])?;

    // Read up front so an unreadable file is a single error, not one per line
    let mut text = String::new();
    file.read_to_string(&mut text).map_err(|e| vec![io_error(e, path.clone())])?;

    parse_source(text.as_bytes(), path, start)
}
