use itertools::{Itertools, PeekingNext};

#[derive(PartialEq, Debug)]
pub enum Token {
    Arrow,
    Or,
    Symbol(String)
}

// Reads one whitespace delimited word. The separators are only separators
// when they stand alone, so `a|b` is a single symbol.
pub fn lex_word(line: &mut impl PeekingNext<Item = char>) -> Token {
    let word: String = line.peeking_take_while(|c| !c.is_whitespace()).collect();

    match word.as_str() {
        "->" => Token::Arrow,
        "|" => Token::Or,
        _ => Token::Symbol(word)
    }
}

pub fn lex_line(line: &str) -> Vec<Token> {
    let mut tokens = Vec::new();

    let mut line_chars = line.chars().peekable();

    while let Some(c) = line_chars.peek() {
        if c.is_whitespace() {
            line_chars.next();
        } else {
            tokens.push(lex_word(&mut line_chars));
        }
    }

    return tokens;
}

#[cfg(test)]
mod tests {
    use std::iter::zip;

    use super::*;

    fn symbol(text: &str) -> Token {
        Token::Symbol(text.to_string())
    }

    #[test]
    fn lex_single_word() {
        let lines = vec![
            "alpha bravo charlie",
            "->",
            "| x",
            "a|b c"
        ];
        // (result from the function, rest of the iterator)
        let answers = vec![
            (symbol("alpha"), " bravo charlie"),
            (Token::Arrow, ""),
            (Token::Or, " x"),
            (symbol("a|b"), " c")
        ];

        for (line, (answer_token, answer_rest)) in zip(lines, answers) {
            let mut chars = line.chars().peekable();
            assert_eq!(lex_word(&mut chars), answer_token);
            assert_eq!(chars.collect::<String>(), answer_rest);
        }
    }

    #[test]
    fn lex_normal_line() {
        let lines = vec![
            "S -> a S b | epsilon",
            "  expr\t->   expr + term|term  "
        ];
        let answers = vec![
            vec![
                symbol("S"),
                Token::Arrow,
                symbol("a"),
                symbol("S"),
                symbol("b"),
                Token::Or,
                symbol("epsilon")
            ],
            vec![
                symbol("expr"),
                Token::Arrow,
                symbol("expr"),
                symbol("+"),
                symbol("term|term")
            ]
        ];

        for (line, answer) in zip(lines, answers) {
            assert_eq!(lex_line(line), answer)
        }
    }

    #[test]
    fn lex_blank_line() {
        assert_eq!(lex_line(""), Vec::<Token>::new());
        assert_eq!(lex_line(" \t "), Vec::<Token>::new());
    }
}
