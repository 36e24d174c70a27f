// Integration tests for scanning, parsing and evaluating expressions

use ntlang::parser::ast::{Node, NodeRef, Operator};
use ntlang::parser::limits::{Limits, Pool, PoolExhausted, DEFAULT_MAX_INPUT_LEN};
use ntlang::parser::parse::{parse, ParseError};
use ntlang::parser::parse_table::ParseTree;
use ntlang::parser::scanner::{scan, ScanError};
use ntlang::parser::token::TokenKind;
use ntlang::program::{Error, Program};
use ntlang::snapshot::Recorder;
use ntlang::trace::{NullTracer, Step};
use pretty_assertions::assert_eq;

fn parse_str(input: &str) -> Result<ParseTree, Error> {
    Ok(Program::compile(input, &Limits::default(), &mut NullTracer)?.tree)
}

/// Rebuild a tree as nested text, e.g. `(PLUS 1 2)`
fn shape(tree: &ParseTree, node: NodeRef) -> String {
    match tree.table.get(node) {
        Some(Node::IntLiteral { value }) => value.to_string(),
        Some(Node::BinaryOp {
            operator,
            left,
            right: Some(right),
        }) => format!(
            "({} {} {})",
            operator.name(),
            shape(tree, *left),
            shape(tree, *right)
        ),
        other => panic!("unexpected node {:?}", other),
    }
}

#[test]
fn test_single_addition() {
    let tree = parse_str("1 + 2").expect("parse failed");
    assert_eq!(shape(&tree, tree.root), "(PLUS 1 2)");
    assert_eq!(
        tree.table.nodes(),
        &[
            Node::IntLiteral { value: 1 },
            Node::BinaryOp {
                operator: Operator::Plus,
                left: NodeRef::new(0),
                right: Some(NodeRef::new(2)),
            },
            Node::IntLiteral { value: 2 },
        ]
    );
}

#[test]
fn test_left_associative_chains() {
    let tree = parse_str("1 + 2 + 3").expect("parse failed");
    assert_eq!(shape(&tree, tree.root), "(PLUS (PLUS 1 2) 3)");

    let tree = parse_str("10 + 20 - 30").expect("parse failed");
    assert_eq!(shape(&tree, tree.root), "(MINUS (PLUS 10 20) 30)");
    assert_eq!(tree.root, NodeRef::new(3));
}

#[test]
fn test_printed_output() {
    let program = Program::compile("12 - 3", &Limits::default(), &mut NullTracer).unwrap();
    assert_eq!(
        program.scan_table.to_string(),
        "TK_INTLIT(\"12\")\nTK_MINUS(\"-\")\nTK_INTLIT(\"3\")\nTK_EOT(\"\")\n"
    );
    assert_eq!(
        program.tree.to_string(),
        "EXPR OPER2 MINUS\n..EXPR INTVAL 12\n..EXPR INTVAL 3\n"
    );
    assert_eq!(program.evaluate(), Ok(9));
}

#[test]
fn test_evaluation() {
    let cases = [
        ("7", 7),
        ("1 + 2", 3),
        ("10 + 20 - 30", 0),
        ("5 - 10", -5),
        ("\t100-1-1 ", 98),
    ];
    for (input, expected) in cases {
        let program = Program::compile(input, &Limits::default(), &mut NullTracer).unwrap();
        assert_eq!(program.evaluate(), Ok(expected), "input {:?}", input);
    }
}

#[test]
fn test_parse_failures() {
    assert_eq!(
        parse_str("+ 1"),
        Err(Error::Parse(ParseError::BadOperand {
            found: TokenKind::Plus,
            position: 0,
        }))
    );
    assert_eq!(
        parse_str("1 2"),
        Err(Error::Parse(ParseError::ExpectedEndOfText {
            found: TokenKind::IntLiteral,
            position: 2,
        }))
    );
    assert_eq!(
        parse_str("1 +"),
        Err(Error::Parse(ParseError::BadOperand {
            found: TokenKind::EndOfText,
            position: 3,
        }))
    );
    assert!(matches!(
        parse_str(""),
        Err(Error::Parse(ParseError::BadOperand {
            found: TokenKind::EndOfText,
            ..
        }))
    ));
}

#[test]
fn test_scan_failures() {
    assert_eq!(
        parse_str("1 * 2"),
        Err(Error::Scan(ScanError::InvalidCharacter {
            ch: '*',
            position: 2,
        }))
    );

    let limits = Limits::default().with_max_input_len(4);
    assert_eq!(
        scan("1 + 23", &limits, &mut NullTracer),
        Err(ScanError::InputTooLong { len: 6, limit: 4 })
    );
}

#[test]
fn test_pool_exhaustion() {
    let limits = Limits::default().with_scan_capacity(3);
    assert_eq!(
        scan("1 + 2", &limits, &mut NullTracer),
        Err(ScanError::PoolExhausted(PoolExhausted {
            pool: Pool::ScanTable,
            capacity: 3,
        }))
    );

    let limits = Limits::default().with_parse_capacity(4);
    let mut tokens = scan("1 + 2 + 3", &limits, &mut NullTracer).unwrap();
    assert_eq!(
        parse(&mut tokens, &limits, &mut NullTracer),
        Err(ParseError::PoolExhausted(PoolExhausted {
            pool: Pool::ParseTable,
            capacity: 4,
        }))
    );
}

#[test]
fn test_error_messages() {
    let err = parse_str("1 2").unwrap_err();
    assert_eq!(
        err.to_string(),
        "parse error: expecting TK_EOT at position 2, found TK_INTLIT"
    );
}

#[test]
fn test_recorder_matches_null_tracer() {
    for input in ["1", "1 + 2", "10 + 20 - 30", "4 - 4 - 4 + 9"] {
        let mut recorder = Recorder::new(usize::MAX);
        let recorded = Program::compile(input, &Limits::default(), &mut recorder).unwrap();
        let silent = Program::compile(input, &Limits::default(), &mut NullTracer).unwrap();

        assert_eq!(recorded, silent);
        assert_eq!(recorder.depth(), 0);
    }
}

#[test]
fn test_recorded_history_ends_with_failure() {
    let mut recorder = Recorder::new(usize::MAX);
    let result = Program::compile("1 + +", &Limits::default(), &mut recorder);
    assert!(result.is_err());

    let history = recorder.history();
    let last = history.get(history.len() - 1).unwrap();
    assert!(matches!(last.step, Step::Failed { .. }));
    assert_eq!(
        last.label(),
        "error: bad operand at position 4: expected TK_INTLIT, found TK_PLUS"
    );
}

#[test]
fn test_inputs_at_the_length_limit() {
    let operators = "+".repeat(DEFAULT_MAX_INPUT_LEN);
    let table = scan(&operators, &Limits::default(), &mut NullTracer).unwrap();
    assert_eq!(table.len(), DEFAULT_MAX_INPUT_LEN + 1);

    // Dangling operator at the very end reports the missing operand
    let dangling = "1+".repeat(DEFAULT_MAX_INPUT_LEN / 2);
    assert_eq!(
        parse_str(&dangling),
        Err(Error::Parse(ParseError::BadOperand {
            found: TokenKind::EndOfText,
            position: DEFAULT_MAX_INPUT_LEN,
        }))
    );

    let longest = format!("{}1", "1+".repeat(DEFAULT_MAX_INPUT_LEN / 2 - 1));
    let program = Program::compile(&longest, &Limits::default(), &mut NullTracer).unwrap();
    assert_eq!(program.evaluate(), Ok(DEFAULT_MAX_INPUT_LEN as i32 / 2));
}

#[test]
fn test_recorded_history_ends_with_scan_failure() {
    let mut recorder = Recorder::new(usize::MAX);
    let result = Program::compile("1 * 2", &Limits::default(), &mut recorder);
    assert!(matches!(result, Err(Error::Scan(_))));

    let history = recorder.history();
    let last = history.get(history.len() - 1).unwrap();
    assert_eq!(last.label(), "error: invalid character '*' at position 2");
}
