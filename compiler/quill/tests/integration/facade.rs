use pretty_assertions::assert_eq;
use quill::{
    CompiledScript, Context, Engine, EvalConfig, EvalErrorKind, Expression, MapContext, Node,
    ParseError, ParsedScript, Script, SharedContext, Span, UnaryOp, Value,
};

use crate::fixture::FixtureParser;

fn parse(source: &str) -> CompiledScript {
    Engine::default()
        .parse(&FixtureParser::default(), source)
        .unwrap()
}

fn parse_with(parameters: &[&str], source: &str) -> CompiledScript {
    Engine::default()
        .parse(&FixtureParser::with_parameters(parameters), source)
        .unwrap()
}

// =============================================================================
// Evaluation
// =============================================================================

#[test]
fn empty_script_evaluates_to_void() {
    let engine = Engine::default();
    for source in ["", "   "] {
        let script = parse(source);
        let mut ctx = MapContext::new();
        assert_eq!(script.evaluate(&engine, &mut ctx), Ok(Value::Void));
        assert_eq!(script.execute(&engine, &mut ctx), Ok(Value::Void));
        assert_eq!(script.dump(), "/*?:?*/ ");
        assert_eq!(script.expression(), "");
    }
}

#[test]
fn evaluate_stops_after_first_statement() {
    let script = parse("a = 1; b = 2");
    let mut ctx = MapContext::new();
    assert_eq!(script.evaluate(&Engine::default(), &mut ctx), Ok(Value::int(1)));
    assert!(ctx.has("a"));
    assert!(!ctx.has("b"));

    assert_eq!(script.execute(&Engine::default(), &mut ctx), Ok(Value::int(2)));
    assert!(ctx.has("b"));
}

#[test]
fn undefined_variable_is_reported_with_span() {
    let script = parse("1 + missing");
    let err = script
        .execute(&Engine::default(), &mut MapContext::new())
        .unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::UndefinedVariable {
            name: "missing".into()
        }
    );
    assert_eq!(err.span, Some(Span::new(4, 11)));
}

#[test]
fn lenient_engine_yields_null_for_undefined() {
    let engine = Engine::new(EvalConfig::new().strict(false));
    let script = engine
        .parse(&FixtureParser::default(), "missing")
        .unwrap();
    assert_eq!(
        script.execute(&engine, &mut MapContext::new()),
        Ok(Value::Null)
    );
}

#[test]
fn assignment_to_free_variable_writes_context() {
    let script = parse("total = 2 * 3");
    let mut ctx = MapContext::new();
    script.execute(&Engine::default(), &mut ctx).unwrap();
    assert_eq!(ctx.get("total"), Some(Value::int(6)));
}

#[test]
fn shared_context_sees_assignments() {
    let shared = SharedContext::new(MapContext::new().with("base", 40_i64));
    let script = parse("result = base + 2");
    let mut handle = shared.clone();
    script.execute(&Engine::default(), &mut handle).unwrap();
    assert_eq!(shared.snapshot().get("result"), Some(Value::int(42)));
}

#[test]
fn long_operator_chain_evaluates_with_default_config() {
    let source = vec!["1"; 300].join(" + ");
    let script = parse(&source);
    assert_eq!(
        script.execute(&Engine::default(), &mut MapContext::new()),
        Ok(Value::int(300))
    );
}

#[test]
fn depth_limit_applies_when_configured() {
    let engine = Engine::new(EvalConfig::new().max_depth(Some(16)));
    let script = engine
        .parse(&FixtureParser::default(), &vec!["1"; 300].join(" + "))
        .unwrap();
    let err = script.execute(&engine, &mut MapContext::new()).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::RecursionLimitExceeded { depth: 16 });
}

#[test]
fn million_level_script_dumps_and_drops() {
    let mut node = Node::bool(true);
    for _ in 0..1_000_000 {
        node = Node::unary(UnaryOp::Not, node);
    }
    let parsed = ParsedScript::from_root(Node::script(vec![node])).unwrap();
    let script = Engine::default().create_script(parsed);
    let dump = script.dump();
    assert!(dump.starts_with("!!!!"));
    assert!(dump.ends_with("!true/*?:?*/ "));
    drop(script);
}

// =============================================================================
// Argument binding
// =============================================================================

#[test]
fn missing_argument_falls_back_to_context() {
    let script = parse_with(&["x"], "x");
    let engine = Engine::default();
    let mut ctx = MapContext::new().with("x", 5_i64);
    assert_eq!(script.execute_with(&engine, &mut ctx, &[]), Ok(Value::int(5)));
    assert_eq!(script.execute(&engine, &mut ctx), Ok(Value::int(5)));
}

#[test]
fn bound_argument_wins_over_context() {
    let script = parse_with(&["x"], "x");
    let mut ctx = MapContext::new().with("x", 5_i64);
    assert_eq!(
        script.execute_with(&Engine::default(), &mut ctx, &[Value::int(7)]),
        Ok(Value::int(7))
    );
}

#[test]
fn surplus_arguments_are_ignored() {
    let script = parse_with(&["x"], "x * 10");
    let engine = Engine::default();
    let mut ctx = MapContext::new();
    let all = script.execute_with(
        &engine,
        &mut ctx,
        &[Value::int(1), Value::int(2), Value::int(3)],
    );
    let one = script.execute_with(&engine, &mut ctx, &[Value::int(1)]);
    assert_eq!(all, Ok(Value::int(10)));
    assert_eq!(all, one);
}

#[test]
fn partial_arguments_bind_in_order() {
    let script = parse_with(&["a", "b"], "a - b");
    let mut ctx = MapContext::new().with("b", 2_i64).with("a", 100_i64);
    assert_eq!(
        script.execute_with(&Engine::default(), &mut ctx, &[Value::int(10)]),
        Ok(Value::int(8))
    );
}

#[test]
fn locals_live_in_registers() {
    let script = parse_with(&["x"], "var y = x + 1; y * 2");
    assert_eq!(script.parameters(), ["x"]);
    assert_eq!(script.local_variables(), ["y"]);

    let mut ctx = MapContext::new();
    assert_eq!(
        script.execute_with(&Engine::default(), &mut ctx, &[Value::int(4)]),
        Ok(Value::int(10))
    );
    assert!(!ctx.has("y"));
}

#[test]
fn no_declarations_means_empty_name_lists() {
    let script = parse("1");
    assert!(script.parameters().is_empty());
    assert!(script.local_variables().is_empty());
}

// =============================================================================
// Source text and dump()
// =============================================================================

#[test]
fn expression_text_is_trimmed() {
    let script = parse("  1 + 2  ");
    assert_eq!(script.expression(), "1 + 2");
    assert_eq!(script.text(), "1 + 2");
    assert_eq!(script.to_string(), "1 + 2");
}

#[test]
fn dump_appends_covered_range() {
    let script = parse("  1 + 2  ");
    assert_eq!(script.dump(), "1 + 2 /*2:7*/");
}

#[test]
fn dump_is_parse_equivalent() {
    let script = parse("a+(b*c);(a+b)*c");
    assert_eq!(script.dump(), "a + b * c; (a + b) * c /*0:15*/");
}

#[test]
fn dump_copies_literal_text_from_source() {
    let script = parse(r#"greeting = "hi there""#);
    assert_eq!(script.dump(), r#"greeting = "hi there" /*0:21*/"#);
}

#[test]
fn dump_is_repeatable() {
    let script = parse_with(&["x"], "var y = -x; y < 3");
    let first = script.dump();
    assert_eq!(first, "var y = -x; y < 3 /*0:17*/");
    assert_eq!(script.dump(), first);
}

#[test]
fn dump_round_trips_through_parser() {
    let cases: [(&[&str], &str, Vec<Value>, &[(&str, i64)]); 6] = [
        (&[], "1 + 2 * 3", vec![], &[]),
        (&[], "(1 + 2) * 3", vec![], &[]),
        (&[], "a - (b - c)", vec![], &[("a", 10), ("b", 4), ("c", 3)]),
        (&["x"], "var y = x * 2; y - -x", vec![Value::int(5)], &[]),
        (&["x"], "10 / (2 - 4) < x", vec![Value::int(-4)], &[]),
        (&[], r#"greeting = "hi"; greeting"#, vec![], &[]),
    ];
    let engine = Engine::default();
    let context = |vars: &[(&str, i64)]| {
        vars.iter()
            .fold(MapContext::new(), |ctx, (name, value)| ctx.with(*name, *value))
    };

    for (parameters, source, args, vars) in cases {
        let original = parse_with(parameters, source);
        let dump = original.dump();
        let text = dump.rsplit_once(" /*").map_or(dump.as_str(), |(text, _)| text);
        let reparsed = parse_with(parameters, text);

        let reparsed_dump = reparsed.dump();
        let retext = reparsed_dump
            .rsplit_once(" /*")
            .map_or(reparsed_dump.as_str(), |(text, _)| text);
        assert_eq!(retext, text, "{source}");
        assert_eq!(
            reparsed.execute_with(&engine, &mut context(vars), &args),
            original.execute_with(&engine, &mut context(vars), &args),
            "{source}"
        );
    }
}

// =============================================================================
// Parse errors
// =============================================================================

#[test]
fn parse_errors_surface_from_engine() {
    let engine = Engine::default();
    let err = engine.parse(&FixtureParser::default(), "1 $").unwrap_err();
    assert_eq!(err.span(), Some(Span::new(2, 3)));

    let err = engine.parse(&FixtureParser::default(), "1 +").unwrap_err();
    assert!(matches!(err, ParseError::Syntax { span: None, .. }));
}
