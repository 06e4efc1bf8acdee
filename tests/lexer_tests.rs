// Lexer tests: token streams for representative sources, driven as
// (token type, lexeme) tables.

use monkey::lexer::{Lexer, TokenType};

fn assert_tokens(input: &str, expected: &[(TokenType, &str)]) {
    let mut lexer = Lexer::new(input);
    for (i, (token_type, lexeme)) in expected.iter().enumerate() {
        let token = lexer.next_token();
        assert_eq!(
            token.token_type, *token_type,
            "tests[{}] - token type wrong for {:?}: got {:?}",
            i, input, token
        );
        assert_eq!(
            token.lexeme, *lexeme,
            "tests[{}] - lexeme wrong for {:?}: got {:?}",
            i, input, token
        );
    }
}

#[test]
fn punctuation() {
    assert_tokens(
        "=+(){},;",
        &[
            (TokenType::Equal, "="),
            (TokenType::Plus, "+"),
            (TokenType::LeftParen, "("),
            (TokenType::RightParen, ")"),
            (TokenType::LeftBrace, "{"),
            (TokenType::RightBrace, "}"),
            (TokenType::Comma, ","),
            (TokenType::Semicolon, ";"),
            (TokenType::Eof, ""),
        ],
    );
}

#[test]
fn full_program() {
    let input = r#"let five = 5;
let ten = 10;
let add = fn(x, y) {
    x + y;
};
let result = add(five, ten);
!-/*5;
5 < 10 > 5;
if (5 < 10) {
    return true;
} else {
    return false;
}

10 == 10;
10 != 9;
"foobar"
"foo bar"
[1, 2];
{"foo": "bar"}
"#;

    assert_tokens(
        input,
        &[
            (TokenType::Let, "let"),
            (TokenType::Identifier, "five"),
            (TokenType::Equal, "="),
            (TokenType::Integer, "5"),
            (TokenType::Semicolon, ";"),
            (TokenType::Let, "let"),
            (TokenType::Identifier, "ten"),
            (TokenType::Equal, "="),
            (TokenType::Integer, "10"),
            (TokenType::Semicolon, ";"),
            (TokenType::Let, "let"),
            (TokenType::Identifier, "add"),
            (TokenType::Equal, "="),
            (TokenType::Function, "fn"),
            (TokenType::LeftParen, "("),
            (TokenType::Identifier, "x"),
            (TokenType::Comma, ","),
            (TokenType::Identifier, "y"),
            (TokenType::RightParen, ")"),
            (TokenType::LeftBrace, "{"),
            (TokenType::Identifier, "x"),
            (TokenType::Plus, "+"),
            (TokenType::Identifier, "y"),
            (TokenType::Semicolon, ";"),
            (TokenType::RightBrace, "}"),
            (TokenType::Semicolon, ";"),
            (TokenType::Let, "let"),
            (TokenType::Identifier, "result"),
            (TokenType::Equal, "="),
            (TokenType::Identifier, "add"),
            (TokenType::LeftParen, "("),
            (TokenType::Identifier, "five"),
            (TokenType::Comma, ","),
            (TokenType::Identifier, "ten"),
            (TokenType::RightParen, ")"),
            (TokenType::Semicolon, ";"),
            (TokenType::Bang, "!"),
            (TokenType::Minus, "-"),
            (TokenType::Slash, "/"),
            (TokenType::Star, "*"),
            (TokenType::Integer, "5"),
            (TokenType::Semicolon, ";"),
            (TokenType::Integer, "5"),
            (TokenType::Less, "<"),
            (TokenType::Integer, "10"),
            (TokenType::Greater, ">"),
            (TokenType::Integer, "5"),
            (TokenType::Semicolon, ";"),
            (TokenType::If, "if"),
            (TokenType::LeftParen, "("),
            (TokenType::Integer, "5"),
            (TokenType::Less, "<"),
            (TokenType::Integer, "10"),
            (TokenType::RightParen, ")"),
            (TokenType::LeftBrace, "{"),
            (TokenType::Return, "return"),
            (TokenType::True, "true"),
            (TokenType::Semicolon, ";"),
            (TokenType::RightBrace, "}"),
            (TokenType::Else, "else"),
            (TokenType::LeftBrace, "{"),
            (TokenType::Return, "return"),
            (TokenType::False, "false"),
            (TokenType::Semicolon, ";"),
            (TokenType::RightBrace, "}"),
            (TokenType::Integer, "10"),
            (TokenType::EqualEqual, "=="),
            (TokenType::Integer, "10"),
            (TokenType::Semicolon, ";"),
            (TokenType::Integer, "10"),
            (TokenType::BangEqual, "!="),
            (TokenType::Integer, "9"),
            (TokenType::Semicolon, ";"),
            (TokenType::String, "foobar"),
            (TokenType::String, "foo bar"),
            (TokenType::LeftBracket, "["),
            (TokenType::Integer, "1"),
            (TokenType::Comma, ","),
            (TokenType::Integer, "2"),
            (TokenType::RightBracket, "]"),
            (TokenType::Semicolon, ";"),
            (TokenType::LeftBrace, "{"),
            (TokenType::String, "foo"),
            (TokenType::Colon, ":"),
            (TokenType::String, "bar"),
            (TokenType::RightBrace, "}"),
            (TokenType::Eof, ""),
        ],
    );
}

#[test]
fn one_and_two_character_operators() {
    assert_tokens(
        "= == ! != < >",
        &[
            (TokenType::Equal, "="),
            (TokenType::EqualEqual, "=="),
            (TokenType::Bang, "!"),
            (TokenType::BangEqual, "!="),
            (TokenType::Less, "<"),
            (TokenType::Greater, ">"),
            (TokenType::Eof, ""),
        ],
    );
}

#[test]
fn identifiers_and_keywords() {
    assert_tokens(
        "fnord lets fn let true false if else return _under",
        &[
            (TokenType::Identifier, "fnord"),
            (TokenType::Identifier, "lets"),
            (TokenType::Function, "fn"),
            (TokenType::Let, "let"),
            (TokenType::True, "true"),
            (TokenType::False, "false"),
            (TokenType::If, "if"),
            (TokenType::Else, "else"),
            (TokenType::Return, "return"),
            (TokenType::Identifier, "_under"),
        ],
    );
}

#[test]
fn illegal_characters() {
    assert_tokens(
        "5 @ 6",
        &[
            (TokenType::Integer, "5"),
            (TokenType::Illegal, "@"),
            (TokenType::Integer, "6"),
            (TokenType::Eof, ""),
        ],
    );
}

#[test]
fn unterminated_string_runs_to_end_of_input() {
    assert_tokens(
        "\"hello",
        &[(TokenType::String, "hello"), (TokenType::Eof, "")],
    );
}

#[test]
fn empty_string_literal() {
    assert_tokens(
        "\"\";",
        &[
            (TokenType::String, ""),
            (TokenType::Semicolon, ";"),
            (TokenType::Eof, ""),
        ],
    );
}

#[test]
fn eof_is_idempotent() {
    let mut lexer = Lexer::new("1");
    assert_eq!(lexer.next_token().token_type, TokenType::Integer);
    for _ in 0..5 {
        let token = lexer.next_token();
        assert_eq!(token.token_type, TokenType::Eof);
        assert_eq!(token.lexeme, "");
    }
}

#[test]
fn empty_input() {
    assert_tokens("", &[(TokenType::Eof, "")]);
    assert_tokens("   \t\r\n  ", &[(TokenType::Eof, "")]);
}
