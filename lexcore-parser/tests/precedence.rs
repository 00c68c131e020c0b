//! Operator precedence and associativity across the built-in tables
//!
//! Trees are compared as s-expressions: operators as `(name args...)`,
//! groups as `Kind[field; field]`, leaves as their source text.

use lexcore_parser::lexcore::testing::run_stage;
use lexcore_parser::lexcore::transforms::standard::Stage;
use lexcore_parser::lexcore::{Language, Token};
use rstest::rstest;

fn sexpr(token: &Token) -> String {
    match token {
        Token::Operator(op) => {
            let args: Vec<String> = op.args().iter().map(sexpr).collect();
            format!("({} {})", op.name(), args.join(" "))
        }
        Token::Group(group) => {
            let fields: Vec<String> = group
                .fields()
                .iter()
                .map(|field| join(field))
                .collect();
            format!("{}[{}]", group.kind(), fields.join("; "))
        }
        leaf => leaf.span().content(),
    }
}

fn join(tokens: &[Token]) -> String {
    tokens
        .iter()
        .filter(|t| !t.is_whitespace())
        .map(sexpr)
        .collect::<Vec<_>>()
        .join(" ")
}

fn parse(language: Language, text: &str) -> String {
    match run_stage(language, Stage::Resolved, text) {
        Ok(tokens) => join(&tokens),
        Err(err) => panic!("{} failed on {:?}: {}", language, text, err),
    }
}

#[rstest(text, expected,
    case("a * b + c", "(bin+ (bin* a b) c)"),
    case("a + b * c", "(bin+ a (bin* b c))"),
    case("a - b - c", "(bin- (bin- a b) c)"),
    case("a + b * c - d", "(bin- (bin+ a (bin* b c)) d)"),
    case("a ** b ** c", "(bin** a (bin** b c))"),
    case("a = b += c", "(bin= a (bin+= b c))"),
    case("a || b && c", "(bin|| a (bin&& b c))"),
    case("a & b | c ^ d", "(bin| (bin& a b) (bin^ c d))"),
    case("!a == b", "(bin== (pre! a) b)"),
    case("-a ** 2", "(bin** (pre- a) 2)"),
    case("a - -b", "(bin- a (pre- b))"),
    case("i++ + ++j", "(bin+ (post++ i) (pre++ j))"),
    case("typeof x === 'y'", "(bin=== (pretypeof x) 'y')"),
    case("new Foo", "(prenew Foo)"),
    case("a in b && c", "(bin&& (binin a b) c)"),
    case("a < b", "(bin< a b)"),
    case("a < (b > c)", "(bin< a Parens[b > c])"),
    case("if (i < f(x > 0)) {}", "Tmp[if Parens[i < f Parens[x > 0]] Braces[]]"),
    case("x = c ? a : b", "(bin= x (ter? : c a b))"),
    case("(1 + 2) * 3", "(bin* Parens[1 + 2] 3)"),
    case("a.b(1) * 2", "(bin* Tmp[a . b Parens[1]] 2)")
)]
fn js_precedence(text: &str, expected: &str) {
    assert_eq!(parse(Language::Js, text), expected);
}

#[rstest(text, expected,
    case("(a + b) * c", "(bin* Parens[(bin+ a b)] c)"),
    case("x_i ^ 2", "(bin^ (bin_ x i) 2)"),
    case("a = b + c", "(bin= a (bin+ b c))"),
    case("a < b -> c", "(bin-> (bin< a b) c)"),
    case("-a * b", "(bin* (pre- a) b)")
)]
fn math_precedence(text: &str, expected: &str) {
    assert_eq!(parse(Language::Math, text), expected);
}

#[rstest(text, expected,
    case("$a * 2", "(bin* (pre$ a) 2)"),
    case("a ?? b || c", "(bin?? a (bin|| b c))"),
    case("x := !y", "(bin:= x (pre! y))"),
    case("f(a + 1)", "Tmp[f Parens[(bin+ a 1)]]")
)]
fn template_precedence(text: &str, expected: &str) {
    assert_eq!(parse(Language::Template, text), expected);
}
