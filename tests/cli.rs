// Runs the binary on the grammars in example_data and checks what a user
// would see: stdout verdicts, stderr diagnostics and exit codes

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

fn ambiguity() -> Command {
    Command::cargo_bin("ambiguity").unwrap()
}

#[test]
fn reports_ambiguous_grammar() {
    ambiguity()
        .args(["example_data/concat.cfg", "4", "--seed", "3"])
        .assert()
        .code(1)
        .stdout(
            contains("Found two leftmost derivations of the word: a a a")
                .and(contains("| Derived String |"))
                .and(contains("S -> S S"))
                .and(contains("This grammar is ambiguous.")),
        );
}

#[test]
fn reports_bounded_unambiguity() {
    ambiguity()
        .args(["example_data/balanced.cfg", "4"])
        .assert()
        .success()
        .stdout(contains("No ambiguity found in 31 words up to length 4."));
}

#[test]
fn reports_empty_vocabulary() {
    ambiguity()
        .args(["example_data/self_loop.cfg", "3"])
        .assert()
        .code(1)
        .stdout(contains("trivially ambiguous"));
}

#[test]
fn reports_exhausted_search() {
    ambiguity()
        .args(["example_data/unit_cycle.cfg", "2", "--depth-limit", "50"])
        .assert()
        .code(3)
        .stdout(contains("Inconclusive").and(contains("is ambiguous").not()));
}

#[test]
fn large_depth_limit_is_inconclusive_not_a_crash() {
    ambiguity()
        .args(["example_data/unit_cycle.cfg", "2", "--depth-limit", "200000"])
        .assert()
        .code(3)
        .stdout(contains("search aborted after 200000 derivation steps"));
}

#[test]
fn verbose_lists_tested_words() {
    ambiguity()
        .args(["example_data/balanced.cfg", "2", "--verbose", "--seed", "5"])
        .assert()
        .success()
        .stderr(
            contains("seed 5")
                .and(contains("[epsilon] 1 leftmost derivation"))
                .and(contains("[a b] 1 leftmost derivation"))
                .and(contains("[b a] 0 leftmost derivations")),
        );
}

#[test]
fn start_override() {
    // Starting from `A` only `a` and epsilon are derivable, once each
    ambiguity()
        .args(["example_data/optional.cfg", "3", "--start", "A"])
        .assert()
        .success();

    ambiguity()
        .args(["example_data/optional.cfg", "3", "--start", "B"])
        .assert()
        .code(2)
        .stderr(contains("Could not find definition for start symbol `B`"));
}

#[test]
fn missing_file_is_a_usage_error() {
    ambiguity()
        .args(["example_data/does_not_exist.cfg", "3"])
        .assert()
        .code(2)
        .stdout("")
        .stderr(contains("File error").and(contains("Usage")));
}

#[test]
fn malformed_file_lists_every_error() {
    ambiguity()
        .args(["example_data/malformed.cfg", "3"])
        .assert()
        .code(2)
        .stdout("")
        .stderr(
            contains("malformed.cfg:3")
                .and(contains("Expected `->` after nonterminal"))
                .and(contains("malformed.cfg:5")),
        );
}
