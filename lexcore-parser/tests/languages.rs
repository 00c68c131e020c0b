//! The built-in languages on the sample files in `fixtures/`

use lexcore_parser::lexcore::loader::SourceLoader;
use lexcore_parser::lexcore::testing::{dump, dump_stage, fixture, flat_texts, run_stage, workspace_path};
use lexcore_parser::lexcore::token::dump_tokens;
use lexcore_parser::lexcore::transforms::standard::Stage;
use lexcore_parser::lexcore::{Group, GroupKind, Language, Token};

/// Every group of `kind`, depth first.
fn groups_of(tokens: &[Token], kind: GroupKind) -> Vec<Group> {
    let mut found = Vec::new();
    for token in tokens {
        match token {
            Token::Group(group) => {
                if group.kind() == kind {
                    found.push(group.clone());
                }
                for field in group.fields() {
                    found.extend(groups_of(field, kind));
                }
            }
            Token::Operator(op) => found.extend(groups_of(op.args(), kind)),
            _ => {}
        }
    }
    found
}

fn operator_names(tokens: &[Token]) -> Vec<String> {
    tokens
        .iter()
        .filter_map(Token::as_operator)
        .map(|op| op.name())
        .collect()
}

fn stage(language: Language, stage: Stage, name: &str) -> Vec<Token> {
    run_stage(language, stage, &fixture(name)).unwrap_or_else(|err| panic!("{}: {}", name, err))
}

#[test]
fn fixtures_detect_their_language() {
    for (name, language) in [
        ("sample.js", Language::Js),
        ("sample.wtt", Language::Template),
        ("shader.glsl", Language::Glsl),
        ("formula.math", Language::Math),
        ("selector.css", Language::Css),
    ] {
        let loader = SourceLoader::from_path(workspace_path(&format!("fixtures/{}", name))).unwrap();
        assert_eq!(loader.detect_language(), Some(language), "{}", name);
    }
}

#[test]
fn js_sample_keeps_template_interior() {
    let texts = flat_texts(Language::Js, &fixture("sample.js"));
    assert!(texts.contains(&"hello ${name}!".to_string()));
    assert!(texts.contains(&"=>".to_string()));
    assert!(!texts.iter().any(|t| t.contains("greeting")));
}

#[test]
fn js_sample_nests_generic_arguments() {
    let nested = stage(Language::Js, Stage::Nested, "sample.js");
    let angled = groups_of(&nested, GroupKind::Angled);
    assert_eq!(angled.len(), 1);
    assert_eq!(angled[0].fields().len(), 2);

    let templates = groups_of(&nested, GroupKind::Template);
    assert_eq!(templates.len(), 1);
    assert_eq!(templates[0].fields()[1][0].span().content(), "name");
}

#[test]
fn js_sample_resolves_each_statement() {
    let resolved = stage(Language::Js, Stage::Resolved, "sample.js");
    assert_eq!(operator_names(&resolved), vec!["bin=", "bin=", "bin="]);

    let statements = resolved.iter().filter(|t| t.is_symbol(";")).count();
    assert_eq!(statements, 3);
}

#[test]
fn expanded_stage_splices_top_level_temporaries() {
    let resolved = run_stage(Language::Js, Stage::Resolved, "items.length").unwrap();
    assert!(resolved[0].is_group_of(GroupKind::Temporary));

    let expanded = run_stage(Language::Js, Stage::Expanded, "items.length").unwrap();
    let texts: Vec<String> = expanded.iter().map(|t| t.span().content()).collect();
    assert_eq!(texts, vec!["items", ".", "length"]);
}

#[test]
fn template_sample() {
    insta::assert_snapshot!(dump(Language::Template, &fixture("sample.wtt")), @r#"
    Indent(0)
    TmpGroup tmp
      Word(div)
      ParensGroup comma
        Operator bin=
          Word(class)
          LiteralString("card")
        Operator bin=
          Word(id)
          Word(main)
    NewLine
    Indent(2)
    Operator bin+
      Operator bin+
        TmpGroup tmp
          Word(h1)
          Word(title)
        LiteralString(" ")
      Word(subtitle)
    NewLine
    Indent(2)
    Operator bin=
      TmpGroup tmp
        Word(p)
        ParensGroup single
          Operator bin=
            Word(hidden)
            Operator pre!
              Word(visible)
      Operator bin*
        Operator pre$
          Word(count)
        LiteralInt(2)
    NewLine
    "#);
}

#[test]
fn math_sample() {
    insta::assert_snapshot!(dump(Language::Math, &fixture("formula.math")), @r"
    Operator bin=
      TmpGroup tmp
        Word(f)
        ParensGroup single
          Word(x)
      Operator bin+
        Operator bin+
          Operator bin^
            TmpGroup tmp
              Word(a)
              Word(x)
            LiteralInt(2)
          TmpGroup tmp
            Word(b)
            Word(x)
        Word(c)
    ");
}

#[test]
fn glsl_sample_leaves_assignment_symbols() {
    let resolved = stage(Language::Glsl, Stage::Resolved, "shader.glsl");
    assert!(resolved[0].is_symbol("#"));
    assert_eq!(operator_names(&resolved), vec!["bin+", "bin&&"]);
    assert_eq!(resolved.iter().filter(|t| t.is_symbol("=")).count(), 2);
}

#[test]
fn css_sample() {
    let texts = flat_texts(Language::Css, &fixture("selector.css"));
    assert_eq!(
        texts,
        vec![
            "nav", ">", "ul", "li.active", "a", "[", "href", "$=", "\".pdf\"", "]", "::", "before", ",",
            ".btn", ":", "hover",
        ]
    );

    let nested = stage(Language::Css, Stage::Nested, "selector.css");
    let resolved = stage(Language::Css, Stage::Resolved, "selector.css");
    assert_eq!(dump_tokens(&nested), dump_tokens(&resolved));
}

#[test]
fn angle_heuristic_leaves_comparisons_alone() {
    insta::assert_snapshot!(dump(Language::Js, "a < b"), @r"
    Operator bin<
      Word(a)
      Word(b)
    ");
}

#[test]
fn escaped_quotes_stay_in_one_string() {
    let texts = flat_texts(Language::Js, r#""it's \"quoted\"""#);
    assert_eq!(texts, vec![r#""it's \"quoted\"""#]);
}

#[test]
fn product_binds_before_sum() {
    insta::assert_snapshot!(dump(Language::Js, "1+2*3"), @r"
    Operator bin+
      LiteralInt(1)
      Operator bin*
        LiteralInt(2)
        LiteralInt(3)
    ");
}

#[test]
fn template_comment_counts_toward_indentation() {
    insta::assert_snapshot!(dump(Language::Template, "a\n  /* c */ b"), @r"
    Indent(0)
    Word(a)
    NewLine
    Indent(10)
    Word(b)
    ");
}

#[test]
fn template_comment_newline_restarts_indentation() {
    insta::assert_snapshot!(dump_stage(Language::Template, Stage::Flat, "a\n/* x\n   */  b"), @r"
    Indent(0)
    Word(a)
    NewLine
    Indent(7)
    Word(b)
    ");
}

#[test]
fn template_comment_spanning_lines_is_not_a_line_break() {
    insta::assert_snapshot!(dump_stage(Language::Template, Stage::Flat, "a /* one\ntwo */ b\nc"), @r"
    Indent(0)
    Word(a)
    Word(b)
    NewLine
    Indent(0)
    Word(c)
    ");
}

#[test]
fn deep_nesting_stays_linear() {
    let depth = 64;
    let text = format!("{}x{}", "(".repeat(depth), ")".repeat(depth));
    let tokens = run_stage(Language::Js, Stage::Resolved, &text).unwrap();
    let lines = dump_tokens(&tokens).lines().count();
    assert_eq!(lines, depth + 1);
}
