//! Tests for token classification helpers.

use crate::*;

#[test]
fn test_token_is_keyword() {
    assert!(token_is_keyword(SyntaxKind::BreakKeyword));
    assert!(token_is_keyword(SyntaxKind::ThisKeyword));
    assert!(token_is_keyword(SyntaxKind::LetKeyword));
    assert!(!token_is_keyword(SyntaxKind::Identifier));
    assert!(!token_is_keyword(SyntaxKind::OpenBraceToken));
}

#[test]
fn test_token_is_identifier_or_keyword() {
    assert!(token_is_identifier_or_keyword(SyntaxKind::Identifier));
    assert!(token_is_identifier_or_keyword(SyntaxKind::FunctionKeyword));
    assert!(!token_is_identifier_or_keyword(SyntaxKind::DotToken));
}

#[test]
fn test_token_is_assignment_operator() {
    assert!(token_is_assignment_operator(SyntaxKind::EqualsToken));
    assert!(token_is_assignment_operator(SyntaxKind::PlusEqualsToken));
    assert!(token_is_assignment_operator(
        SyntaxKind::QuestionQuestionEqualsToken
    ));
    assert!(!token_is_assignment_operator(SyntaxKind::PlusToken));
    assert!(!token_is_assignment_operator(SyntaxKind::EqualsEqualsToken));
}

#[test]
fn test_text_to_keyword() {
    assert_eq!(text_to_keyword("this"), Some(SyntaxKind::ThisKeyword));
    assert_eq!(text_to_keyword("function"), Some(SyntaxKind::FunctionKeyword));
    assert_eq!(text_to_keyword("prototype"), None);
    assert_eq!(text_to_keyword("undefined"), None);
}

#[test]
fn test_keyword_round_trip() {
    for kind in [
        SyntaxKind::ReturnKeyword,
        SyntaxKind::NewKeyword,
        SyntaxKind::TypeOfKeyword,
    ] {
        let text = keyword_to_text(kind).unwrap();
        assert_eq!(text_to_keyword(text), Some(kind));
    }
}

#[test]
fn test_punctuation_to_text() {
    assert_eq!(punctuation_to_text(SyntaxKind::OpenBraceToken), Some("{"));
    assert_eq!(
        punctuation_to_text(SyntaxKind::EqualsEqualsEqualsToken),
        Some("===")
    );
    assert_eq!(
        punctuation_to_text(SyntaxKind::EqualsGreaterThanToken),
        Some("=>")
    );
    assert_eq!(punctuation_to_text(SyntaxKind::Identifier), None);
}

#[test]
fn test_token_description() {
    assert_eq!(token_description(SyntaxKind::CloseParenToken), ")");
    assert_eq!(token_description(SyntaxKind::EndOfFileToken), "end of input");
    assert_eq!(token_description(SyntaxKind::Identifier), "identifier");
    assert_eq!(token_description(SyntaxKind::WhileKeyword), "while");
}

#[test]
fn test_default_is_keyword() {
    assert_eq!(text_to_keyword("default"), Some(SyntaxKind::DefaultKeyword));
    assert!(token_is_keyword(SyntaxKind::DefaultKeyword));
    assert!(token_is_literal(SyntaxKind::RegularExpressionLiteral));
    assert_eq!(
        token_description(SyntaxKind::RegularExpressionLiteral),
        "regular expression"
    );
}
