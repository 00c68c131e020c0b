//! Property-based tests for the flat tokenizer and the resolver
//!
//! Inputs are generated as space-separated elements, so each element must
//! come back as exactly one token whose span covers it.

use lexcore_parser::lexcore::lexing::RuneMask;
use lexcore_parser::lexcore::settings::OperatorKinds;
use lexcore_parser::lexcore::token::dump_tokens;
use lexcore_parser::lexcore::{parse_expression, Language, LanguageSettings, Parser, Source};
use proptest::prelude::*;

/// Single JS elements that tokenize to exactly one leaf
fn js_element_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        // Words (keywords and literal names included)
        "[a-z_][a-z0-9_]{0,6}",
        // Integers and floats
        "[1-9][0-9]{0,5}",
        "[1-9][0-9]{0,2}\\.[0-9]{1,3}",
        // Quoted strings
        "'[a-z ]{0,6}'",
        "\"[a-z ]{0,6}\"",
        // Operators and punctuation
        prop::sample::select(vec![
            "+", "-", "*", "/", "%", "**", "==", "!=", "===", "<=", ">=", "&&", "||", "!", "?",
            ":", ".", ",", ";", "=", "+=", "=>", "(", ")", "[", "]", "{", "}",
        ])
        .prop_map(str::to_string),
    ]
}

fn js_line_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(js_element_strategy(), 1..12)
}

/// Atoms that never need an operator to bind them
fn atom_strategy() -> impl Strategy<Value = String> + Clone {
    prop_oneof!["[a-z][a-z0-9]{0,4}", "[1-9][0-9]{0,3}"].prop_filter("keywords bind as operators", |atom| {
        !matches!(atom.as_str(), "in" | "new" | "await" | "typeof" | "instanceof")
    })
}

fn binary_operator_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "+", "-", "*", "/", "%", "**", "<<", ">>", "<=", ">=", "==", "!==", "&", "^", "|", "&&", "||",
    ])
}

/// `a op b op c ...`, optionally with prefix operators on the atoms
fn expression_strategy() -> impl Strategy<Value = String> {
    let operand = (prop::sample::select(vec!["", "-", "!", "~"]), atom_strategy())
        .prop_map(|(prefix, atom)| format!("{}{}", prefix, atom));
    (
        operand.clone(),
        prop::collection::vec((binary_operator_strategy(), operand), 0..6),
    )
        .prop_map(|(first, rest)| {
            let mut text = first;
            for (op, operand) in rest {
                text.push_str(&format!(" {} {}", op, operand));
            }
            text
        })
}

fn two_level(first: u32, second: u32) -> LanguageSettings {
    LanguageSettings::builder("two-level")
        .symbols(r"[+*]")
        .operator(first, "*", OperatorKinds::BIN | OperatorKinds::L2R)
        .operator(second, "+", OperatorKinds::BIN | OperatorKinds::L2R)
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn flat_tokens_cover_each_element(elements in js_line_strategy()) {
        let text = elements.join(" ");
        let mut parser = Parser::new(Source::anonymous(&text), Language::Js.settings()).unwrap();
        let flat = parser.tokenize_flat().unwrap();

        let texts: Vec<String> = flat.iter().map(|t| t.span().content()).collect();
        prop_assert_eq!(texts, elements);
    }

    #[test]
    fn every_visible_character_is_claimed(elements in js_line_strategy()) {
        let text = elements.join(" ");
        let mut parser = Parser::new(Source::anonymous(&text), Language::Js.settings()).unwrap();
        parser.tokenize_flat().unwrap();

        for (c, tag) in text.chars().zip(parser.mask()) {
            if !c.is_whitespace() {
                prop_assert_ne!(*tag, RuneMask::None, "unclaimed {:?} in {:?}", c, text);
            }
        }
    }

    #[test]
    fn flat_spans_are_sorted_and_disjoint(elements in js_line_strategy()) {
        let text = elements.join(" ");
        let mut parser = Parser::new(Source::anonymous(&text), Language::Js.settings()).unwrap();
        let flat = parser.tokenize_flat().unwrap();

        for pair in flat.windows(2) {
            prop_assert!(pair[0].span().stop() <= pair[1].span().start());
        }
    }

    #[test]
    fn expressions_resolve_to_one_tree(text in expression_strategy()) {
        let trees = parse_expression(&text, Language::Js.settings()).unwrap();
        prop_assert_eq!(trees.len(), 1, "{}", dump_tokens(&trees));

        let span = trees[0].span();
        prop_assert_eq!((span.start(), span.stop()), (0, text.chars().count()));
    }

    #[test]
    fn resolution_is_deterministic(text in expression_strategy()) {
        let first = dump_tokens(&parse_expression(&text, Language::Js.settings()).unwrap());
        let second = dump_tokens(&parse_expression(&text, Language::Js.settings()).unwrap());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn higher_precedence_binds_tighter(first in 1u32..20, second in 1u32..20) {
        prop_assume!(first != second);
        let settings = two_level(first, second);
        let trees = parse_expression("a * b + c", &settings).unwrap();
        let root = trees[0].as_operator().unwrap();

        let expected = if first > second { "+" } else { "*" };
        prop_assert_eq!(root.symbol(), expected);
    }
}
