//! Tests for the execution engine

use super::*;
use crate::value::Bit;
use std::thread;

fn run(source: &str) -> Result<Vec<String>, ExecutionError> {
    run_with(source, EngineConfig::default())
}

fn run_with(source: &str, config: EngineConfig) -> Result<Vec<String>, ExecutionError> {
    let program = Program::parse(source).unwrap();
    Executor::new(config).run(&program)
}

fn output(source: &str) -> Vec<String> {
    match run(source) {
        Ok(output) => output,
        Err(err) => panic!("program failed: {}\n{}", err, source),
    }
}

fn error(source: &str) -> RuntimeError {
    match run(source) {
        Ok(output) => panic!("program should fail but printed {:?}", output),
        Err(err) => err.error,
    }
}

// ========== Operators ==========

#[test]
fn test_operator_truth_tables() {
    let cases = [
        ("and", "0001"),
        ("or", "0111"),
        ("xor", "0110"),
        ("nand", "1110"),
        ("nor", "1000"),
        ("xnor", "1001"),
        ("imply", "1101"),
        ("nimply", "0010"),
    ];
    for (op, expected) in cases {
        let source = format!(
            "PRINT(0 {op} 0, 0 {op} 1, 1 {op} 0, 1 {op} 1);",
            op = op
        );
        let printed = output(&source).join("");
        assert_eq!(printed.replace(' ', ""), expected, "operator {}", op);
    }
}

#[test]
fn test_not_and_precedence() {
    assert_eq!(output("PRINT(not 0 and 0, not (0 and 0));"), vec!["0 1"]);
    assert_eq!(output("PRINT(1 or 1 and 0, 0 imply 0 or 0);"), vec!["1 1"]);
}

// ========== Scoping ==========

#[test]
fn test_reference_reads_global() {
    let source = "B = 1; F(A) = A and B*; PRINT(F(0), F(1));";
    assert_eq!(output(source), vec!["0 1"]);
}

#[test]
fn test_plain_name_in_body_must_be_parameter() {
    let err = error("B = 1; F(A) = A and B; PRINT(F(1));");
    assert!(matches!(err, RuntimeError::ParameterNotDefined { ref name, .. } if &**name == "B"));
    assert!(err.to_string().contains("parameter not defined"));
}

#[test]
fn test_reference_to_missing_global() {
    let err = error("F(A) = A and C*; PRINT(F(1));");
    assert!(matches!(err, RuntimeError::ReferenceNotDefined { .. }));
}

#[test]
fn test_reference_at_top_level() {
    let err = error("A = 1; B = A*;");
    assert!(matches!(err, RuntimeError::ReferenceAtTopLevel { .. }));
    assert_eq!(err.class(), ErrorClass::Resolution);
}

#[test]
fn test_parameter_shadows_global() {
    assert_eq!(output("A = 1; F(A) = A; PRINT(F(0), A);"), vec!["0 1"]);
}

#[test]
fn test_zero_parameter_function_reads_globals() {
    assert_eq!(output("G = 1; K() = G; PRINT(K());"), vec!["1"]);
    assert_eq!(output("G = 0; K() = not G; F(A) = A and K(); PRINT(F(1));"), vec!["1"]);
    let err = error("G = 1; K() = G*; PRINT(K());");
    assert!(matches!(err, RuntimeError::ReferenceAtTopLevel { ref name, .. } if &**name == "G"));
}

#[test]
fn test_arguments_evaluated_in_caller_scope() {
    let source = "
        INNER(X) = not X;
        OUTER(Y) = INNER(Y and 1);
        PRINT(OUTER(0), OUTER(1));
    ";
    assert_eq!(output(source), vec!["1 0"]);
}

#[test]
fn test_undefined_variable() {
    let err = error("PRINT(Q);");
    assert!(matches!(err, RuntimeError::UndefinedVariable { .. }));
}

// ========== Declarations ==========

#[test]
fn test_redeclaration_rejected_both_ways() {
    let err = error("A = 1; A = 0;");
    assert_eq!(err.class(), ErrorClass::DeclarationConflict);

    let err = error("F(X) = X; F = 1;");
    assert!(matches!(
        err,
        RuntimeError::AlreadyDeclared {
            existing: DeclKind::Function,
            ..
        }
    ));

    let err = error("F = 1; F(X) = X;");
    assert!(matches!(
        err,
        RuntimeError::AlreadyDeclared {
            existing: DeclKind::Variable,
            ..
        }
    ));
}

#[test]
fn test_failed_initializer_does_not_declare() {
    let program = Program::parse("A = B; A = 1;").unwrap();
    let mut executor = Executor::new(EngineConfig::default());
    assert!(executor.run(&program).is_err());
    assert!(executor.environment().variable("A").is_none());
}

#[test]
fn test_duplicate_parameter() {
    let err = error("F(A, A) = A;");
    assert!(matches!(err, RuntimeError::DuplicateParameter { .. }));
}

#[test]
fn test_arity_mismatch() {
    let err = error("F(A, B) = A or B; PRINT(F(1));");
    assert!(matches!(
        err,
        RuntimeError::ArityMismatch {
            expected: 2,
            found: 1,
            ..
        }
    ));
}

#[test]
fn test_undefined_function() {
    let err = error("PRINT(NOPE(1));");
    assert!(matches!(err, RuntimeError::UndefinedFunction { .. }));
}

#[test]
fn test_recursion_limit() {
    let config = EngineConfig {
        max_call_depth: 8,
        ..EngineConfig::default()
    };
    let err = run_with("F(A) = F(A); PRINT(F(1));", config)
        .unwrap_err()
        .error;
    assert!(matches!(err, RuntimeError::RecursionLimit { limit: 8, .. }));
}

#[test]
fn test_nesting_within_limit() {
    let config = EngineConfig {
        max_call_depth: 3,
        ..EngineConfig::default()
    };
    let source = "F1(A) = A; F2(A) = F1(A); F3(A) = F2(A); PRINT(F3(1));";
    assert_eq!(run_with(source, config).unwrap(), vec!["1"]);
}

// ========== Function Tables ==========

#[test]
fn test_table_function_xor() {
    let source = "
        X(A, B) = table { 01: 1; 10: 1; }
        PRINT(X(0, 0), X(0, 1), X(1, 0), X(1, 1));
    ";
    assert_eq!(output(source), vec!["0 1 1 0"]);
}

#[test]
fn test_table_with_subparameters() {
    let source = "
        MUX(S : A, B) = table { 0: A; 1: B; };
        PRINT(MUX(0, 1, 0), MUX(1, 1, 0));
    ";
    assert_eq!(output(source), vec!["1 0"]);
}

#[test]
fn test_table_rows_over_subparameters() {
    let source = "
        T(A : S) = table { 11: 1; 10: 0; }
        PRINT(T(1, 1), T(1, 0), T(0, 1));
    ";
    assert_eq!(output(source), vec!["1 0 0"]);
}

#[test]
fn test_invalid_table_rejected() {
    let err = error("T(A, B) = table { 1: 1; }");
    assert_eq!(err.class(), ErrorClass::ContractViolation);
}

#[test]
fn test_table_name_conflict() {
    let err = error("T = 1; T(A) = table { 1: 1; }");
    assert!(matches!(err, RuntimeError::AlreadyDeclared { .. }));
}

// ========== Builtins ==========

#[test]
fn test_print_strings_verbatim() {
    assert_eq!(output("A = 1; PRINT(\"A is\", A);"), vec!["A is 1"]);
}

#[test]
fn test_print_separator() {
    let config = EngineConfig {
        print_separator: ", ".to_string(),
        ..EngineConfig::default()
    };
    assert_eq!(run_with("PRINT(1, 0, 1);", config).unwrap(), vec!["1, 0, 1"]);
}

#[test]
fn test_each_builtin_is_one_unit() {
    let out = output("PRINT(1); SHOW(A and B, not C); PRINT(0);");
    assert_eq!(out, vec!["1", "A and B\nnot C", "0"]);
}

#[test]
fn test_show_gate_forms() {
    let out = output("SHOW(TO_NAND(not A), TO_NOR(A or B));");
    assert_eq!(out, vec!["A nand A\nA nor B nor (A nor B)"]);
}

#[test]
fn test_show_solvers() {
    let out = output("SHOW(SOLVE_SOP(not A and not B or not A and B or A and B));");
    assert_eq!(out, vec!["not A or B"]);
    let out = output("SHOW(SOLVE_POS(A xor B));");
    assert_eq!(out, vec!["(A or B) and (not A or not B)"]);
}

#[test]
fn test_show_keeps_calls_unless_inlining() {
    let source = "F(X, Y) = X and not Y; SHOW(F(A, B or C));";
    assert_eq!(output(source), vec!["F(A, B or C)"]);

    let config = EngineConfig {
        inline_calls: true,
        ..EngineConfig::default()
    };
    assert_eq!(
        run_with(source, config).unwrap(),
        vec!["A and not (B or C)"]
    );
}

#[test]
fn test_inlining_stops_at_recursion() {
    let config = EngineConfig {
        inline_calls: true,
        ..EngineConfig::default()
    };
    let source = "R(X) = X or R(X); SHOW(R(A));";
    assert_eq!(run_with(source, config).unwrap(), vec!["A or R(A)"]);
}

#[test]
fn test_table_output() {
    let out = output("TABLE(A nor B);");
    let expected = "\
A | B | A nor B
--+---+--------
0 | 0 | 1
0 | 1 | 0
1 | 0 | 0
1 | 1 | 0";
    assert_eq!(out, vec![expected]);
}

#[test]
fn test_table_columns_with_references_in_called_body() {
    let source = "G = 1; F(A) = A and G*; TABLE(F(X));";
    let out = output(source);
    let last_rows: Vec<&str> = out[0].lines().skip(2).collect();
    assert_eq!(last_rows, vec!["0 | 0", "1 | 1"]);
}

#[test]
fn test_table_rejects_top_level_reference() {
    for source in ["B = 1; TABLE(B*);", "B = 1; TABLE(A and B*);"] {
        let err = error(source);
        assert!(matches!(err, RuntimeError::ReferenceAtTopLevel { .. }), "{}", source);
    }
}

#[test]
fn test_solve_rejects_top_level_reference() {
    for source in [
        "B = 1; SHOW(SOLVE_SOP(B*));",
        "B = 1; SHOW(SOLVE_POS(A or B*));",
    ] {
        let err = error(source);
        assert!(matches!(err, RuntimeError::ReferenceAtTopLevel { .. }), "{}", source);
    }
}

#[test]
fn test_multiple_tables_separated_by_blank_line() {
    let out = output("TABLE(A, not A);");
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].split("\n\n").count(), 2);
}

#[test]
fn test_unsupported_builtins() {
    for source in ["GRAPH(A);", "EXPORT(A);", "IMPORT(\"f\");"] {
        let err = error(source);
        assert!(err.is_not_supported(), "{}", source);
        assert_eq!(err.class(), ErrorClass::Unsupported);
    }
}

#[test]
fn test_builtins_out_of_place() {
    let err = error("A = PRINT(1);");
    assert!(matches!(err, RuntimeError::InvalidBuiltinInExpression { .. }));
    assert!(!err.is_not_supported());

    let err = error("TO_NAND(A);");
    assert!(matches!(err, RuntimeError::InvalidBuiltinInStatement { .. }));
}

#[test]
fn test_gate_builtins_evaluate_operand() {
    assert_eq!(output("PRINT(TO_NAND(1 and 0), SOLVE_POS(1 or 0));"), vec!["0 1"]);
    let err = error("PRINT(TO_NOR(1, 0));");
    assert!(matches!(err, RuntimeError::InvalidArgument { .. }));
}

#[test]
fn test_string_is_not_a_bit() {
    let err = error("A = \"x\";");
    assert!(matches!(err, RuntimeError::StringNotBinary { .. }));
}

// ========== Error Placeholders ==========

#[test]
fn test_error_placeholders_fail() {
    let err = error("A = 10;");
    assert!(matches!(err, RuntimeError::ErrorNode { .. }));
    assert_eq!(err.class(), ErrorClass::ContractViolation);

    let err = error("F(A : S) = A;");
    assert!(matches!(err, RuntimeError::ErrorNode { .. }));
}

#[test]
fn test_execution_stops_at_first_failure() {
    let err = run("PRINT(1); PRINT(Q); PRINT(0);").unwrap_err();
    assert_eq!(err.index, 1);
    assert_eq!(err.output, vec!["1"]);
    assert_eq!(err.statement, "PRINT(Q);");
}

// ========== Input ==========

#[test]
fn test_input_without_source() {
    let err = error("A = INPUT();");
    assert!(matches!(err, RuntimeError::InputUnavailable { ref prompt, .. } if &**prompt == "INPUT"));
    assert_eq!(err.class(), ErrorClass::Input);
}

#[test]
fn test_input_from_closure() {
    let mut prompts = Vec::new();
    let result = {
        let input = FnInput::new(|prompt: &str| {
            prompts.push(prompt.to_string());
            Some(Bit::One)
        });
        let program = Program::parse("A = INPUT(\"first\"); B = INPUT(); PRINT(A and B);").unwrap();
        Executor::with_input(EngineConfig::default(), input).run(&program)
    };
    assert_eq!(result.unwrap(), vec!["1"]);
    assert_eq!(prompts, vec!["first", "INPUT"]);
}

#[test]
fn test_input_cancel_aborts_run() {
    let input = FnInput::new(|_: &str| None);
    let program = Program::parse("PRINT(1); A = INPUT(\"x\"); PRINT(A);").unwrap();
    let err = Executor::with_input(EngineConfig::default(), input)
        .run(&program)
        .unwrap_err();
    assert!(matches!(err.error, RuntimeError::InputCancelled { .. }));
    assert_eq!(err.output, vec!["1"]);
}

#[test]
fn test_input_prompt_must_be_string() {
    let err = error("A = INPUT(1);");
    assert!(matches!(err, RuntimeError::InvalidArgument { .. }));
}

#[test]
fn test_input_over_channel() {
    let (input, requests) = ChannelInput::channel();
    let answerer = thread::spawn(move || {
        let mut prompts = Vec::new();
        while let Ok(request) = requests.recv() {
            prompts.push(request.prompt().to_string());
            request.respond(Bit::One);
        }
        prompts
    });

    let program = Program::parse("A = INPUT(\"a\"); B = not INPUT(\"b\"); PRINT(A, B);").unwrap();
    let result = {
        let mut executor = Executor::with_input(EngineConfig::default(), input);
        executor.run(&program)
    };
    assert_eq!(result.unwrap(), vec!["1 0"]);
    assert_eq!(answerer.join().unwrap(), vec!["a", "b"]);
}
