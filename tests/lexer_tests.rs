// Scanner behaviour over whole inputs

use minic::parser::ast::SourceLocation;
use minic::parser::lexer::{scan, LexErrorKind, UNTERMINATED_COMMENT_LEXEME};
use minic::parser::token::{Literal, TokenKind, KEYWORDS};
use std::fs;
use std::path::Path;

fn demo(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos").join(name);
    fs::read_to_string(path).expect("Failed to read demo file")
}

const ASSORTED_INPUTS: &[&str] = &[
    "",
    "   \n\t\n",
    "int main(void) { return 0; }",
    "\"unterminated\nstring\" 'x",
    "3,14 123abc 1.2.3 ... -> @ $ `",
    "#include <stdio.h>\n  # define X 1\nx # y",
    "/* open comment\n int y;",
    "a/**/b//c\nd",
    "'\\'' '\\n' ''",
    "ç = 1; _under = ünï;",
];

#[test]
fn test_stream_always_ends_with_eof() {
    for input in ASSORTED_INPUTS {
        let result = scan(input);
        let last = result.tokens.last().expect("token stream is never empty");
        assert!(last.is(TokenKind::Eof), "input {:?}", input);
        assert_eq!(
            result.tokens.iter().filter(|t| t.is(TokenKind::Eof)).count(),
            1,
            "input {:?}",
            input
        );
    }
}

#[test]
fn test_lines_never_decrease() {
    for input in ASSORTED_INPUTS {
        let result = scan(input);
        for pair in result.tokens.windows(2) {
            assert!(
                pair[0].location.line <= pair[1].location.line,
                "input {:?}: {:?} then {:?}",
                input,
                pair[0],
                pair[1]
            );
        }
    }
}

#[test]
fn test_one_diagnostic_per_error_token() {
    for input in ASSORTED_INPUTS {
        let result = scan(input);
        let error_tokens: Vec<(&str, SourceLocation)> = result
            .tokens
            .iter()
            .filter(|t| t.is(TokenKind::Error))
            .map(|t| (t.lexeme.as_str(), t.location))
            .collect();
        let diagnostics: Vec<(&str, SourceLocation)> = result
            .diagnostics
            .iter()
            .map(|d| (d.lexeme.as_str(), d.location))
            .collect();
        assert_eq!(error_tokens, diagnostics, "input {:?}", input);
    }
}

#[test]
fn test_keywords_are_never_identifiers() {
    let source: Vec<&str> = KEYWORDS.iter().map(|(spelling, _)| *spelling).collect();
    let result = scan(&source.join(" "));

    for ((spelling, kind), token) in KEYWORDS.iter().zip(&result.tokens) {
        assert_eq!(token.kind, *kind, "keyword {}", spelling);
        assert_eq!(token.lexeme, *spelling);
    }
    assert!(result.identifiers.is_empty());

    // Case matters
    let result = scan("Int WHILE Return");
    assert!(result.tokens[..3].iter().all(|t| t.is(TokenKind::Ident)));
    assert_eq!(result.identifiers.len(), 3);
}

#[test]
fn test_malformed_numbers_are_single_tokens() {
    let result = scan("3,14");
    assert_eq!(result.tokens.len(), 2);
    assert!(result.tokens[0].is(TokenKind::Error));
    assert_eq!(result.tokens[0].lexeme, "3,14");

    let result = scan("123abc");
    assert_eq!(result.tokens.len(), 2);
    assert!(result.tokens[0].is(TokenKind::Error));
    assert_eq!(result.tokens[0].lexeme, "123abc");
    assert_eq!(result.diagnostics[0].kind, LexErrorKind::DigitLeadingIdentifier);
}

#[test]
fn test_unterminated_block_comment_is_fail_fast() {
    let result = scan("/* unterminated");
    assert_eq!(result.tokens.len(), 2);
    assert!(result.tokens[0].is(TokenKind::Error));
    assert!(result.tokens[1].is(TokenKind::Eof));
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].kind, LexErrorKind::UnterminatedBlockComment);

    // The lexeme stays short however much text the comment swallows
    let source = format!("int x;\n/* {}", "filler text\n".repeat(5_000));
    let result = scan(&source);
    assert_eq!(result.tokens.len(), 5);
    assert_eq!(result.tokens[3].lexeme, UNTERMINATED_COMMENT_LEXEME);
    assert_eq!(result.tokens[3].location, SourceLocation::new(2, 1));
    assert_eq!(result.diagnostics[0].lexeme, UNTERMINATED_COMMENT_LEXEME);

    // Other errors before the comment are still reported
    let result = scan("@ /* open\n 'x");
    assert_eq!(result.diagnostics.len(), 2);
    assert_eq!(result.diagnostics[0].kind, LexErrorKind::InvalidCharacter('@'));
}

#[test]
fn test_demo_program_scans_cleanly() {
    let result = scan(&demo("sum_squares.c"));
    assert!(!result.has_errors(), "{:?}", result.diagnostics);

    assert!(result.tokens[0].is(TokenKind::Directive));
    assert_eq!(result.tokens[0].lexeme, "#include <stdio.h>");
    assert_eq!(result.tokens[0].location, SourceLocation::new(2, 1));

    assert_eq!(result.identifiers.get("sum_squares"), Some(&3));
    assert_eq!(result.identifiers.get("total"), Some(&4));
    assert_eq!(result.identifiers.get("printf"), Some(&2));

    let floats: Vec<Literal> = result
        .tokens
        .iter()
        .filter_map(|t| t.literal)
        .filter(|v| matches!(v, Literal::Float(_)))
        .collect();
    assert_eq!(floats, vec![Literal::Float(2.5), Literal::Float(1.0)]);
}

#[test]
fn test_demo_with_lexical_errors() {
    let result = scan(&demo("decimal_comma.c"));
    let kinds: Vec<LexErrorKind> = result.diagnostics.iter().map(|d| d.kind).collect();
    assert_eq!(
        kinds,
        vec![LexErrorKind::DecimalComma, LexErrorKind::DigitLeadingIdentifier]
    );
    assert_eq!(result.diagnostics[0].location, SourceLocation::new(2, 16));
    assert_eq!(result.diagnostics[1].lexeme, "2x");
}
