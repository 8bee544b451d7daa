//! Tests for the scanner state machine.

use crate::{ScanError, ScannerState, SyntaxKind};

fn scan_all(source: &str) -> Vec<SyntaxKind> {
    let mut scanner = ScannerState::new(source);
    let mut kinds = Vec::new();
    loop {
        let kind = scanner.scan();
        if kind == SyntaxKind::EndOfFileToken || kind == SyntaxKind::Unknown {
            kinds.push(kind);
            break;
        }
        kinds.push(kind);
    }
    kinds
}

#[test]
fn test_scan_member_call() {
    assert_eq!(
        scan_all("dep.run(1);"),
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::DotToken,
            SyntaxKind::Identifier,
            SyntaxKind::OpenParenToken,
            SyntaxKind::NumericLiteral,
            SyntaxKind::CloseParenToken,
            SyntaxKind::SemicolonToken,
            SyntaxKind::EndOfFileToken,
        ]
    );
}

#[test]
fn test_scan_this_assignment() {
    assert_eq!(
        scan_all("this.x = function () {}"),
        vec![
            SyntaxKind::ThisKeyword,
            SyntaxKind::DotToken,
            SyntaxKind::Identifier,
            SyntaxKind::EqualsToken,
            SyntaxKind::FunctionKeyword,
            SyntaxKind::OpenParenToken,
            SyntaxKind::CloseParenToken,
            SyntaxKind::OpenBraceToken,
            SyntaxKind::CloseBraceToken,
            SyntaxKind::EndOfFileToken,
        ]
    );
}

#[test]
fn test_scan_identifier_value() {
    let mut scanner = ScannerState::new("  $el_1 ");
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.token_value(), "$el_1");
    assert_eq!(scanner.token_pos(), 2);
    assert_eq!(scanner.token_end(), 7);
    assert_eq!(scanner.full_start(), 0);
}

#[test]
fn test_scan_unicode_escaped_identifier_is_not_keyword() {
    let mut scanner = ScannerState::new("th\\u0069s");
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.token_value(), "this");
}

#[test]
fn test_scan_string_escapes() {
    let mut scanner = ScannerState::new(r#""a\n\"b\x41B\u{43}""#);
    assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
    assert_eq!(scanner.token_value(), "a\n\"bABC");
}

#[test]
fn test_scan_single_quoted_string() {
    let mut scanner = ScannerState::new("'some.message.key'");
    assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
    assert_eq!(scanner.token_value(), "some.message.key");
}

#[test]
fn test_scan_unterminated_string() {
    let mut scanner = ScannerState::new("\"abc\nx");
    assert_eq!(scanner.scan(), SyntaxKind::Unknown);
    assert_eq!(
        scanner.error(),
        Some(&ScanError::UnterminatedString { pos: 0 })
    );
}

#[test]
fn test_scan_numbers() {
    let mut scanner = ScannerState::new("1_000 0xFF .5 3e-2 10n");
    let mut values = Vec::new();
    while scanner.scan() == SyntaxKind::NumericLiteral {
        values.push(scanner.token_value().to_string());
    }
    assert_eq!(values, vec!["1000", "0xFF", ".5", "3e-2", "10n"]);
}

#[test]
fn test_scan_skips_comments_and_tracks_line_breaks() {
    let mut scanner = ScannerState::new("a // trailing\n/* block\n */ b /* inline */ c");
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert!(!scanner.has_preceding_line_break());
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.token_value(), "b");
    assert!(scanner.has_preceding_line_break());
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.token_value(), "c");
    assert!(!scanner.has_preceding_line_break());
}

#[test]
fn test_scan_unterminated_comment() {
    let mut scanner = ScannerState::new("a /* never closed");
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.scan(), SyntaxKind::Unknown);
    assert_eq!(
        scanner.error(),
        Some(&ScanError::UnterminatedComment { pos: 2 })
    );
}

#[test]
fn test_scan_multi_char_operators() {
    assert_eq!(
        scan_all("=== !== => ... ?. ?? >>>= **="),
        vec![
            SyntaxKind::EqualsEqualsEqualsToken,
            SyntaxKind::ExclamationEqualsEqualsToken,
            SyntaxKind::EqualsGreaterThanToken,
            SyntaxKind::DotDotDotToken,
            SyntaxKind::QuestionDotToken,
            SyntaxKind::QuestionQuestionToken,
            SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken,
            SyntaxKind::AsteriskAsteriskEqualsToken,
            SyntaxKind::EndOfFileToken,
        ]
    );
}

#[test]
fn test_scan_invalid_character() {
    let mut scanner = ScannerState::new("a # b");
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.scan(), SyntaxKind::Unknown);
    assert_eq!(
        scanner.error(),
        Some(&ScanError::InvalidCharacter { ch: '#', pos: 2 })
    );
}

#[test]
fn test_scan_template_with_substitution() {
    let mut scanner = ScannerState::new("`a${x}b${y}c`");
    assert_eq!(scanner.scan(), SyntaxKind::TemplateHead);
    assert_eq!(scanner.token_value(), "a");
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.scan(), SyntaxKind::CloseBraceToken);
    assert_eq!(scanner.rescan_template_continuation(), SyntaxKind::TemplateMiddle);
    assert_eq!(scanner.token_value(), "b");
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.scan(), SyntaxKind::CloseBraceToken);
    assert_eq!(scanner.rescan_template_continuation(), SyntaxKind::TemplateTail);
    assert_eq!(scanner.token_value(), "c");
    assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
}

#[test]
fn test_save_and_restore_state() {
    let mut scanner = ScannerState::new("(a, b) => a");
    assert_eq!(scanner.scan(), SyntaxKind::OpenParenToken);
    let snapshot = scanner.save_state();
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.scan(), SyntaxKind::CommaToken);
    scanner.restore_state(snapshot);
    assert_eq!(scanner.token(), SyntaxKind::OpenParenToken);
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.token_value(), "a");
}

#[test]
fn test_re_scan_slash_as_regular_expression() {
    let mut scanner = ScannerState::new("/[/\\]]+\\//gi.test(s)");
    assert_eq!(scanner.scan(), SyntaxKind::SlashToken);
    assert_eq!(
        scanner.re_scan_slash_token(),
        SyntaxKind::RegularExpressionLiteral
    );
    assert_eq!(scanner.token_value(), "/[/\\]]+\\//gi");
    assert_eq!(scanner.scan(), SyntaxKind::DotToken);
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
}

#[test]
fn test_re_scan_slash_equals() {
    let mut scanner = ScannerState::new("/=a/");
    assert_eq!(scanner.scan(), SyntaxKind::SlashEqualsToken);
    assert_eq!(
        scanner.re_scan_slash_token(),
        SyntaxKind::RegularExpressionLiteral
    );
    assert_eq!(scanner.token_value(), "/=a/");
    assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
}

#[test]
fn test_re_scan_unterminated_regular_expression() {
    let mut scanner = ScannerState::new("x = /ab\n/");
    scanner.scan();
    scanner.scan();
    assert_eq!(scanner.scan(), SyntaxKind::SlashToken);
    assert_eq!(scanner.re_scan_slash_token(), SyntaxKind::Unknown);
    assert_eq!(
        scanner.error(),
        Some(&ScanError::UnterminatedRegularExpression { pos: 4 })
    );
}

#[test]
fn test_re_scan_ignores_other_tokens() {
    let mut scanner = ScannerState::new("a / b");
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.re_scan_slash_token(), SyntaxKind::Identifier);
    assert_eq!(scanner.token_value(), "a");
}
