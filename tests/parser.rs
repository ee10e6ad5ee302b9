//! Parser tests using rstest for parameterization.

use rstest::rstest;
use stackcalc::{
    ast::{Entity, EntityKind},
    error::{ErrorKind, ParseError},
    interpreter::{
        lexer::{Word, classify},
        parser::{
            core::{MAX_GROUP_DEPTH, MAX_OPERATORS, parse_expression},
            statement::{Line, classify_line},
        },
    },
};

fn postfix(input: &str) -> String {
    parse_expression(input).unwrap_or_else(|e| panic!("{input:?} failed to parse: {e}"))
                           .postfix()
}

// =============================================================================
// TREE SHAPE
// =============================================================================

#[rstest]
#[case::mul_binds_tighter("1+2*3", "123*+")]
#[case::mul_first("1*2+3", "12*3+")]
#[case::sub_left("1-2-3", "12-3-")]
#[case::div_left("8/4/2", "84/2/")]
#[case::mixed_left("1-2+3", "12-3+")]
#[case::pow_right("2^3^2", "232^^")]
#[case::pow_under_mul("2*3^2", "232^*")]
#[case::pow_after_add("1+2^3*4", "123^4*+")]
#[case::assign_right("a=b=3", "ab3==")]
#[case::assign_loosest("a=1+2", "a12+=")]
#[case::long_chain("1+2*3^2-4", "1232^*+4-")]
#[case::group("(1+2)*3", "(1+2)3*")]
#[case::whitespace(" 1 +\t2 ", "12+")]
fn tree_shape(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(postfix(input), expected);
}

#[rstest]
#[case::negative_literal("-3", "(-3)")]
#[case::negative_symbol("-x", "(-x)")]
#[case::negative_group("-(a+1)", "-(a+1)")]
#[case::subtract_negative("3--4", "3-(-4)")]
#[case::subtract_negative_group("3-(-4)", "3-((-4))")]
#[case::call("f(1;2)", "f(1;2)")]
#[case::negative_call("-f(x)", "(-f(x))")]
#[case::empty_call("f()", "f()")]
#[case::nested_call("f(g(1;2);3)", "f(g(1;2);3)")]
#[case::non_finite("-inf*nan", "(-inf)*nan")]
fn canonical_form(#[case] input: &str, #[case] expected: &str) {
    let tree = parse_expression(input).unwrap();
    assert_eq!(tree.to_string(), expected);
}

#[test]
fn call_arguments_are_separate_trees() {
    let Ok(Entity::Call(call)) = parse_expression("max(1 + 2; (3 * 4); -x)") else {
        panic!("Expected a call");
    };

    assert_eq!(call.name, "max");
    assert!(!call.negative);
    let kinds: Vec<EntityKind> = call.arguments.iter().map(Entity::kind).collect();
    assert_eq!(kinds,
               vec![EntityKind::BinaryOp, EntityKind::Parenthesis, EntityKind::Symbol]);
}

// =============================================================================
// PARSE ERRORS
// =============================================================================

#[rstest]
#[case::empty("", ErrorKind::SyntaxError)]
#[case::lone_sign("-", ErrorKind::SyntaxError)]
#[case::trailing_operator("1+", ErrorKind::SyntaxError)]
#[case::leading_operator("*1", ErrorKind::SyntaxError)]
#[case::double_operator("1*/2", ErrorKind::SyntaxError)]
#[case::double_sign("--1", ErrorKind::SyntaxError)]
#[case::unbalanced_open("(1+2", ErrorKind::SyntaxError)]
#[case::unbalanced_close("1+2)", ErrorKind::SyntaxError)]
#[case::empty_group("()", ErrorKind::SyntaxError)]
#[case::group_then_word("(1)x", ErrorKind::SyntaxError)]
#[case::group_then_group("(1)(2)", ErrorKind::SyntaxError)]
#[case::number_call("2(3)", ErrorKind::SyntaxError)]
#[case::empty_argument("f(1;)", ErrorKind::SyntaxError)]
#[case::bad_inner("(1+)", ErrorKind::SyntaxError)]
#[case::digit_then_letter("3x", ErrorKind::ValueError)]
#[case::two_dots("1.2.3", ErrorKind::ValueError)]
#[case::trailing_dot("1.", ErrorKind::ValueError)]
#[case::stray_character("a$b", ErrorKind::ValueError)]
fn parse_errors(#[case] input: &str, #[case] kind: ErrorKind) {
    let error = parse_expression(input).expect_err(input);
    assert_eq!(error.kind(), kind, "{input:?}: {error}");
}

#[test]
fn closing_paren_position_is_reported() {
    assert_eq!(parse_expression("1+2)").unwrap_err(),
               ParseError::UnexpectedClosingParen { position: 3 });
    assert_eq!(parse_expression("1+(2").unwrap_err(),
               ParseError::UnbalancedParen { position: 2 });
}

// =============================================================================
// LIMITS
// =============================================================================

#[rstest]
#[case::groups("(", ")")]
#[case::negated_groups("-(", ")")]
#[case::calls("f(", ")")]
fn deep_nesting_is_rejected(#[case] open: &str, #[case] close: &str) {
    let input = format!("{}1{}", open.repeat(10_000), close.repeat(10_000));

    let error = parse_expression(&input).unwrap_err();
    assert_eq!(error, ParseError::GroupsTooDeep { limit: MAX_GROUP_DEPTH });
    assert_eq!(error.kind(), ErrorKind::SyntaxError);
}

#[rstest]
#[case::left_chain("1+")]
#[case::right_chain("2^")]
#[case::mixed_chain("1*2-")]
fn long_operator_chains_are_rejected(#[case] link: &str) {
    let input = format!("{}1", link.repeat(10_000));

    let error = parse_expression(&input).unwrap_err();
    assert_eq!(error, ParseError::TooManyOperators { limit: MAX_OPERATORS });
    assert_eq!(error.kind(), ErrorKind::SyntaxError);
}

#[test]
fn operators_are_counted_across_groups() {
    let half = "1+".repeat(MAX_OPERATORS / 2);
    let input = format!("({half}1)+({half}1)");

    assert_eq!(parse_expression(&input).unwrap_err(),
               ParseError::TooManyOperators { limit: MAX_OPERATORS });
}

#[test]
fn limits_are_inclusive() {
    let nested = format!("{}1{}", "(".repeat(MAX_GROUP_DEPTH), ")".repeat(MAX_GROUP_DEPTH));
    assert!(parse_expression(&nested).is_ok());

    let chain = format!("{}1", "1+".repeat(MAX_OPERATORS));
    assert!(parse_expression(&chain).is_ok());

    // Signs are not operators.
    let signs = format!("{}1", "1- -".repeat(MAX_OPERATORS));
    assert!(parse_expression(&signs).is_ok());
}

// =============================================================================
// WORDS
// =============================================================================

#[rstest]
#[case::integer("42", Some(Word::Number))]
#[case::fraction("0.25", Some(Word::Number))]
#[case::inf("inf", Some(Word::NonFinite))]
#[case::nan("nan", Some(Word::NonFinite))]
#[case::name("x1", Some(Word::Name))]
#[case::underscore("_", Some(Word::Name))]
#[case::inf_prefix("infinity", Some(Word::Name))]
#[case::leading_dot(".5", None)]
#[case::exponent("1e5", None)]
#[case::sign("-1", None)]
fn word_classification(#[case] word: &str, #[case] expected: Option<Word>) {
    assert_eq!(classify(word), expected);
}

// =============================================================================
// LINES
// =============================================================================

#[rstest]
#[case::blank("   ", Line::Blank)]
#[case::comment("# 1 + 1", Line::Comment)]
#[case::indented_comment("  #", Line::Comment)]
#[case::define("@[$f$ 1 + 2]", Line::DefineDirective { name: "f", body: Some("1 + 2") })]
#[case::define_spaced("@[ $f$ x ] ", Line::DefineDirective { name: "f", body: Some("x") })]
#[case::define_empty("@[$f$]", Line::DefineDirective { name: "f", body: None })]
#[case::invoke("@[ f ]", Line::InvokeDirective { name: "f" })]
#[case::set("@x=1", Line::SetSymbol { name: "x", expression: "1" })]
#[case::include("@[!lib/defs.calc]", Line::Include { path: "lib/defs.calc" })]
#[case::expression("x = 1", Line::Expression("x = 1"))]
fn line_classification(#[case] line: &str, #[case] expected: Line<'static>) {
    assert_eq!(classify_line(line).unwrap(), expected);
}

#[rstest]
#[case::bare_at("@")]
#[case::bad_name("@[$1f$ 2]")]
#[case::unclosed("@[f")]
#[case::empty_include("@[!]")]
#[case::two_names("@[f g]")]
fn invalid_directive_lines(#[case] line: &str) {
    let error = classify_line(line).expect_err(line);
    assert!(matches!(error, ParseError::InvalidDirective { .. }), "{line:?}: {error}");
}
