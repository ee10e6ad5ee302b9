use std::fs;

use stackcalc::{
    error::{Error, ErrorKind},
    evaluate,
    interpreter::{
        evaluator::core::{Context, MAX_DIRECTIVE_DEPTH},
        parser::core::{MAX_GROUP_DEPTH, MAX_OPERATORS},
    },
    suite::run_suite,
};
use walkdir::WalkDir;

#[test]
fn suite_files_pass() {
    let mut count = 0;

    for entry in WalkDir::new("tests/suites").into_iter()
                                             .filter_map(Result::ok)
                                             .filter(|e| {
                                                 e.path().extension().is_some_and(|ext| ext == "suite")
                                             })
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        count += 1;
        let report = run_suite(&mut Context::new(), &content);
        assert!(report.passed(), "Suite {path:?} failed:\n{report}");
        assert!(report.ok > 0, "Suite {path:?} has no cases");
    }

    assert!(count > 0, "No suites found in tests/suites");
}

fn value_of(src: &str) -> f64 {
    match evaluate(src) {
        Ok(Some(value)) => value,
        Ok(None) => panic!("Script left nothing on the stack: {src}"),
        Err(e) => panic!("Script failed: {e}"),
    }
}

fn error_kind(src: &str) -> ErrorKind {
    match evaluate(src) {
        Ok(value) => panic!("Script succeeded with {value:?} but was expected to fail"),
        Err(e) => e.kind(),
    }
}

#[test]
fn precedence_and_grouping() {
    assert_eq!(value_of("2+3*4"), 14.0);
    assert_eq!(value_of("(2+3)*4"), 20.0);
    assert_eq!(value_of("10 - 4 / 2"), 8.0);
    assert_eq!(value_of("2 * 3 ^ 2"), 18.0);
    assert_eq!(value_of("7 % 4 + 1"), 4.0);
}

#[test]
fn associativity() {
    assert_eq!(value_of("2^3^2"), 512.0);
    assert_eq!(value_of("10-4-3"), 3.0);
    assert_eq!(value_of("64/8/2"), 4.0);
    assert_eq!(value_of("17 % 10 % 4"), 3.0);
}

#[test]
fn negation_is_distinct_from_subtraction() {
    assert_eq!(value_of("-(3+4)"), -7.0);
    assert_eq!(value_of("3-(-4)"), 7.0);
    assert_eq!(value_of("3 - -4"), 7.0);
    assert_eq!(value_of("-2 ^ 2"), 4.0);
    assert_eq!(value_of("-(2 ^ 2)"), -4.0);
}

#[test]
fn assignment_is_right_associative_and_valued() {
    let mut ctx = Context::new();
    ctx.run("a=b=5").unwrap();

    assert_eq!(ctx.pop_from_stack(), Some(5.0));
    assert!(ctx.is_stack_empty());
    assert_eq!(ctx.symbol("a").unwrap(), 5.0);
    assert_eq!(ctx.symbol("b").unwrap(), 5.0);
}

#[test]
fn set_symbol_line_leaves_nothing_on_the_stack() {
    let mut ctx = Context::new();
    ctx.run("@x = 2 * 21").unwrap();

    assert!(ctx.is_stack_empty());
    assert_eq!(ctx.symbol("x").unwrap(), 42.0);
}

#[test]
fn unknown_symbol_is_not_found() {
    assert_eq!(error_kind("x+1"), ErrorKind::NotFound);

    let ctx = Context::new();
    assert_eq!(ctx.symbol_or_zero("x"), 0.0);
}

#[test]
fn directive_round_trip() {
    let mut ctx = Context::new();
    ctx.run("@[$sq$ _*_]").unwrap();

    ctx.push_to_stack(4.0);
    ctx.push_to_stack(4.0);
    ctx.run("@[sq]").unwrap();
    assert_eq!(ctx.pop_from_stack(), Some(16.0));
    assert!(ctx.is_stack_empty());

    ctx.run("sq(7; 7)").unwrap();
    assert_eq!(ctx.pop_from_stack(), Some(49.0));
}

#[test]
fn directive_binding_its_argument() {
    assert_eq!(value_of("@[$sq$ (x=_)*x]\nsq(5)"), 25.0);
    assert_eq!(value_of("@[$sq$ (x=_)*x]\nsq(sq(2)) + 1"), 17.0);
}

#[test]
fn first_argument_is_on_top() {
    assert_eq!(value_of("@[$first$ _]\nfirst(1; 2; 3)"), 1.0);
    assert_eq!(value_of("@[$sub$ _-_]\nsub(10; 3)"), 7.0);
    assert_eq!(value_of("@[$sub$ _-_]\n-sub(10; 3)"), -7.0);
}

#[test]
fn pow_resolves_its_exponent_first() {
    let mut ctx = Context::new();
    ctx.push_to_stack(3.0);
    ctx.push_to_stack(2.0);

    // The exponent takes 2 from the top, the base takes 3 below it.
    ctx.run("_ ^ _").unwrap();
    assert_eq!(ctx.pop_from_stack(), Some(9.0));

    ctx.push_to_stack(3.0);
    ctx.push_to_stack(2.0);

    // Subtraction reads left to right: 2 - 3.
    ctx.run("_ - _").unwrap();
    assert_eq!(ctx.pop_from_stack(), Some(-1.0));
}

#[test]
fn division_and_remainder_read_left_to_right() {
    let mut ctx = Context::new();
    ctx.push_to_stack(3.0);
    ctx.push_to_stack(12.0);

    // The dividend takes 12 from the top, the divisor takes 3 below it.
    ctx.run("_ / _").unwrap();
    assert_eq!(ctx.pop_from_stack(), Some(4.0));
    assert!(ctx.is_stack_empty());

    ctx.push_to_stack(5.0);
    ctx.push_to_stack(17.0);

    ctx.run("_ % _").unwrap();
    assert_eq!(ctx.pop_from_stack(), Some(2.0));
    assert!(ctx.is_stack_empty());
}

#[test]
fn stack_depth_symbol() {
    let mut ctx = Context::new();
    ctx.push_to_stack(1.0);
    ctx.push_to_stack(1.0);

    ctx.run("__").unwrap();
    assert_eq!(ctx.pop_from_stack(), Some(2.0));
    assert_eq!(ctx.stack_depth(), 2);

    ctx.clear_stack();
    assert!(ctx.is_stack_empty());
}

#[test]
fn reserved_symbols_cannot_be_assigned() {
    assert_eq!(error_kind("_ = 1"), ErrorKind::InvalidOperation);
    assert_eq!(error_kind("@__ = 1"), ErrorKind::InvalidOperation);
    assert_eq!(error_kind("1 = 2"), ErrorKind::InvalidOperation);
    assert_eq!(error_kind("-a = 2"), ErrorKind::InvalidOperation);
    assert_eq!(error_kind("(a) = 2"), ErrorKind::InvalidOperation);
}

#[test]
fn popping_an_empty_stack_fails() {
    assert_eq!(error_kind("_ + 1"), ErrorKind::InvalidOperation);
}

#[test]
fn unbalanced_input_fails_cleanly() {
    let mut ctx = Context::new();

    let error = ctx.run("(2+3").unwrap_err();
    assert_eq!(error.kind(), ErrorKind::SyntaxError);
    assert!(ctx.is_stack_empty());

    assert_eq!(ctx.run("2+3)").unwrap_err().kind(), ErrorKind::SyntaxError);

    ctx.run("(2+3)").unwrap();
    assert_eq!(ctx.pop_from_stack(), Some(5.0));
}

#[test]
fn malformed_expressions() {
    assert_eq!(error_kind("1 +"), ErrorKind::SyntaxError);
    assert_eq!(error_kind("* 2"), ErrorKind::SyntaxError);
    assert_eq!(error_kind("1 + * 2"), ErrorKind::SyntaxError);
    assert_eq!(error_kind("()"), ErrorKind::SyntaxError);
    assert_eq!(error_kind("(1)2"), ErrorKind::SyntaxError);
    assert_eq!(error_kind("2(3)"), ErrorKind::SyntaxError);
    assert_eq!(error_kind("3x + 1"), ErrorKind::ValueError);
    assert_eq!(error_kind("1.2.3"), ErrorKind::ValueError);
    assert_eq!(error_kind("@ nonsense"), ErrorKind::SyntaxError);
}

#[test]
fn oversized_expressions_fail_without_ending_the_session() {
    let mut ctx = Context::new();

    let sum = format!("{}1", "1+".repeat(10_000));
    assert_eq!(ctx.run(&sum).unwrap_err().kind(), ErrorKind::SyntaxError);

    let power = format!("{}1", "1^".repeat(10_000));
    assert_eq!(ctx.run(&power).unwrap_err().kind(), ErrorKind::SyntaxError);

    let groups = format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000));
    assert_eq!(ctx.run(&groups).unwrap_err().kind(), ErrorKind::SyntaxError);

    let body = format!("@[$deep$ {groups}]");
    assert_eq!(ctx.run(&body).unwrap_err().kind(), ErrorKind::SyntaxError);
    assert!(ctx.is_stack_empty());

    ctx.run("1 + 1").unwrap();
    assert_eq!(ctx.pop_from_stack(), Some(2.0));
}

#[test]
fn expressions_within_the_limits_evaluate() {
    let sum = format!("{}1", "1+".repeat(MAX_OPERATORS));
    assert_eq!(value_of(&sum), f64::from(u32::try_from(MAX_OPERATORS).unwrap() + 1));

    let groups = format!("{}7{}", "-(".repeat(MAX_GROUP_DEPTH), ")".repeat(MAX_GROUP_DEPTH));
    assert_eq!(value_of(&groups), 7.0);
}

#[test]
fn prompt_prints_only_expression_values() {
    let mut ctx = Context::new();
    ctx.run("@[$sq$ _*_]").unwrap();
    ctx.push_to_stack(3.0);
    ctx.push_to_stack(3.0);

    // The invoked directive's result stays on the stack for the next line.
    let echo = ctx.run_interactive("@[sq]").unwrap();
    assert_eq!(echo.value, None);
    assert!(echo.tree.is_none());
    assert_eq!(ctx.stack_depth(), 1);

    let echo = ctx.run_interactive("_ + 1").unwrap();
    assert_eq!(echo.value, Some(10.0));
    assert_eq!(echo.tree.map(|tree| tree.postfix()), Some("_1+".to_string()));
    assert!(ctx.is_stack_empty());

    assert_eq!(ctx.run_interactive("@x = 4").unwrap().value, None);
    assert_eq!(ctx.run_interactive("# note").unwrap().value, None);
    assert!(ctx.is_stack_empty());
}

#[test]
fn redefinition_replaces_the_body() {
    let mut ctx = Context::new();
    ctx.run("@[$f$ 1]").unwrap();
    ctx.run("@[$f$ 2]").unwrap();

    ctx.run("f()").unwrap();
    assert_eq!(ctx.pop_from_stack(), Some(2.0));
    assert!(ctx.is_stack_empty());
}

#[test]
fn failed_redefinition_keeps_the_old_body() {
    let mut ctx = Context::new();
    ctx.run("@[$f$ 1]").unwrap();
    assert!(ctx.run("@[$f$ 1 +]").is_err());

    ctx.run("f()").unwrap();
    assert_eq!(ctx.pop_from_stack(), Some(1.0));
}

#[test]
fn directive_errors() {
    assert_eq!(error_kind("@[missing]"), ErrorKind::NotFound);
    assert_eq!(error_kind("missing(1)"), ErrorKind::NotFound);
    assert_eq!(error_kind("@[$empty$]\n@[empty]"), ErrorKind::InvalidOperation);
    assert_eq!(error_kind("@[$loop$ loop()]\nloop()"), ErrorKind::InvalidOperation);

    let mut ctx = Context::new();
    assert!(ctx.call_directive("missing", true).is_ok());
    assert!(ctx.is_stack_empty());
}

#[test]
fn runaway_recursion_reports_the_limit() {
    let mut ctx = Context::new();
    ctx.run("@[$loop$ 1 + loop()]").unwrap();

    match ctx.run("loop()") {
        Err(Error::Runtime(e)) => {
            assert!(e.to_string().contains(&MAX_DIRECTIVE_DEPTH.to_string()), "{e}");
        },
        other => panic!("Expected a nesting error, got {other:?}"),
    }

    // The depth budget is released after the failure.
    ctx.run("@[$one$ 1]").unwrap();
    ctx.run("one()").unwrap();
    assert_eq!(ctx.pop_from_stack(), Some(1.0));
}

#[test]
fn comparison_builtins_with_arguments() {
    assert_eq!(value_of("__cmp_lt__(1; 2; 10; 20)"), 10.0);
    assert_eq!(value_of("__cmp_gt__(1; 2; 10; 20)"), 20.0);
    assert_eq!(value_of("__cmp_eq__(3; 3; 1; 0)"), 1.0);
    assert_eq!(value_of("__cmp_ne__(3; 3; 1; 0)"), 0.0);
    assert_eq!(value_of("__cmp_le__(3; 3; 1; 0)"), 1.0);
    assert_eq!(value_of("__cmp_ge__(2; 3; 1; 0)"), 0.0);
}

#[test]
fn comparison_builtins_with_convention_symbols() {
    let mut ctx = Context::new();
    ctx.run_source("@_a = 5\n@_b = 3\n@_c = 1\n@_d = -1").unwrap();

    ctx.run("@[__cmp_gt__]").unwrap();
    assert_eq!(ctx.pop_from_stack(), Some(1.0));
    assert_eq!(ctx.symbol("_a").unwrap(), 1.0);

    // `_a` is now 1, which is less than `_b`.
    ctx.run("__cmp_gt__()").unwrap();
    assert_eq!(ctx.pop_from_stack(), Some(-1.0));
}

#[test]
fn comparison_builtin_errors() {
    assert_eq!(error_kind("__cmp_eq__()"), ErrorKind::InvalidOperation);
    assert_eq!(error_kind("__cmp_eq__(1; 2)"), ErrorKind::InvalidOperation);
}

#[test]
fn conditional_directive() {
    let src = "@[$pick$ (a=_)*0 + (b=_)*0 + __cmp_gt__(a; b; a; b)]\n\
               pick(3; 9) + pick(12; 4)";
    assert_eq!(value_of(src), 21.0);
}

#[test]
fn non_finite_literals_and_ieee_division() {
    assert!(value_of("1/0").is_infinite());
    assert!(value_of("0/0").is_nan());
    assert!(value_of("inf - inf").is_nan());
    assert_eq!(value_of("-inf"), f64::NEG_INFINITY);
    assert!(value_of("nan").is_nan());
}

#[test]
fn comments_blank_lines_and_continuations() {
    let src = "# a comment\n\n@x = 1 + \\\n 2\nx * \\\n10";
    assert_eq!(value_of(src), 30.0);
}

#[test]
fn include_runs_every_line_of_a_file() {
    let mut ctx = Context::new();
    ctx.run("@[!tests/scripts/helpers.calc]").unwrap();

    assert_eq!(ctx.symbol("ten").unwrap(), 10.0);
    ctx.run("double(ten)").unwrap();
    assert_eq!(ctx.pop_from_stack(), Some(20.0));
}

#[test]
fn include_of_a_missing_file_is_not_found() {
    assert_eq!(error_kind("@[!tests/scripts/does-not-exist.calc]"), ErrorKind::NotFound);
}

#[test]
fn include_stops_at_the_first_failing_line() {
    let mut ctx = Context::new();
    let error = ctx.run("@[!tests/scripts/broken.calc]").unwrap_err();

    assert_eq!(error.kind(), ErrorKind::NotFound);
    assert_eq!(ctx.symbol("before").unwrap(), 1.0);
    assert!(ctx.symbol("after").is_err());
}

#[test]
fn self_include_hits_the_nesting_limit() {
    assert_eq!(error_kind("@[!tests/scripts/recursive.calc]"), ErrorKind::InvalidOperation);
}

#[test]
fn state_survives_a_failed_line() {
    let mut ctx = Context::new();
    ctx.run("@x = 3").unwrap();
    assert!(ctx.run("x + y").is_err());

    // Operands are popped as soon as they are resolved.
    assert!(ctx.is_stack_empty());
    ctx.run("x * 2").unwrap();
    assert_eq!(ctx.pop_from_stack(), Some(6.0));
}
