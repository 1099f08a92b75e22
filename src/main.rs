mod cli;
mod derivation;
mod error_handling;
mod grammar;
mod parser;
mod report;
mod tester;
mod vocabulary;

use std::process::ExitCode;

use clap::{CommandFactory, Parser};

use cli::Cli;
use parser::CompileErrorType;
use report::{VerdictReport, WordReport};
use tester::{AmbiguityTester, Verdict};

fn exit_status(verdict: &Verdict) -> u8 {
    match verdict {
        Verdict::NotAmbiguous { .. } => 0,
        Verdict::Ambiguous { .. } | Verdict::EmptyVocabularyAmbiguous => 1,
        Verdict::Inconclusive { .. } => 3,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let grammar = match parser::parse_file(&cli.file, cli.start.as_deref()) {
        Ok(grammar) => grammar,
        Err(errors) => {
            error_handling::report_errors(&errors);
            if errors.iter().any(|e| matches!(e.error, CompileErrorType::FileError(_))) {
                eprintln!("{}", Cli::command().render_usage());
            }
            return ExitCode::from(2);
        }
    };

    let seed = cli.seed.unwrap_or_else(rand::random);
    if cli.verbose {
        eprintln!(
            "Loaded {} nonterminals and {} terminals, testing words up to length {} (seed {})",
            grammar.nonterminal_count(), grammar.alphabet().len(), cli.max_length, seed
        );
    }

    let tester = AmbiguityTester::new(&grammar, cli.max_length)
        .seed(seed)
        .depth_limit(cli.depth_limit);

    let verdict = if cli.verbose {
        tester.run_observed(|word, result| eprint!("{}", WordReport { grammar: &grammar, word, result }))
    } else {
        tester.run()
    };

    print!("{}", VerdictReport { grammar: &grammar, verdict: &verdict });

    ExitCode::from(exit_status(&verdict))
}
