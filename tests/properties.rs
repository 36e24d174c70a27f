// Property tests over generated expressions

use ntlang::parser::limits::{Limits, DEFAULT_MAX_INPUT_LEN};
use ntlang::parser::scanner::scan;
use ntlang::parser::token::TokenKind;
use ntlang::program::Program;
use ntlang::snapshot::Recorder;
use ntlang::trace::NullTracer;
use proptest::prelude::*;

/// Inputs built only from characters the scanner accepts
fn scannable() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            Just('0'),
            Just('1'),
            Just('7'),
            Just('9'),
            Just(' '),
            Just('\t'),
            Just('+'),
            Just('-'),
        ],
        0..=DEFAULT_MAX_INPUT_LEN,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

/// Well-formed expressions: operands joined by `+`/`-` with random spacing
fn expression() -> impl Strategy<Value = (String, Vec<u16>)> {
    proptest::collection::vec((any::<u16>(), any::<bool>(), 0usize..3), 1..16).prop_map(
        |parts| {
            let mut text = String::new();
            let mut operands = Vec::new();
            for (i, (value, plus, spaces)) in parts.into_iter().enumerate() {
                if i > 0 {
                    text.push_str(&" ".repeat(spaces));
                    text.push(if plus { '+' } else { '-' });
                    text.push_str(&" ".repeat(spaces));
                }
                text.push_str(&value.to_string());
                operands.push(value);
            }
            (text, operands)
        },
    )
}

proptest! {
    #[test]
    fn scan_ends_with_single_eot(input in scannable()) {
        let table = scan(&input, &Limits::default(), &mut NullTracer).unwrap();
        let kinds: Vec<TokenKind> = table.tokens().iter().map(|t| t.kind).collect();

        prop_assert_eq!(kinds.last(), Some(&TokenKind::EndOfText));
        prop_assert_eq!(kinds.iter().filter(|k| **k == TokenKind::EndOfText).count(), 1);

        // Spans are in source order and never overlap
        for pair in table.tokens().windows(2) {
            prop_assert!(pair[0].span.end <= pair[1].span.start);
        }
        for token in table.tokens() {
            prop_assert_eq!(&input[token.span.start..token.span.end], token.text.as_str());
        }
    }

    #[test]
    fn scan_is_deterministic(input in scannable()) {
        let first = scan(&input, &Limits::default(), &mut NullTracer).unwrap();
        let second = scan(&input, &Limits::default(), &mut NullTracer).unwrap();
        prop_assert_eq!(first.tokens(), second.tokens());
    }

    #[test]
    fn reachable_refs_stay_in_pool((input, operands) in expression()) {
        let program = Program::compile(&input, &Limits::default(), &mut NullTracer).unwrap();
        let len = program.tree.table.len();
        let reachable = program.tree.reachable();

        prop_assert_eq!(len, operands.len() * 2 - 1);
        prop_assert_eq!(reachable.len(), len);
        for node in reachable {
            prop_assert!(node.index() < len);
        }
    }

    #[test]
    fn chains_evaluate_left_to_right((input, operands) in expression()) {
        let program = Program::compile(&input, &Limits::default(), &mut NullTracer).unwrap();

        // Re-derive the operators from the input to compute the expected value
        let ops: Vec<char> = input.chars().filter(|c| *c == '+' || *c == '-').collect();
        let mut expected = i64::from(operands[0]);
        for (op, value) in ops.iter().zip(&operands[1..]) {
            match op {
                '+' => expected += i64::from(*value),
                _ => expected -= i64::from(*value),
            }
        }

        prop_assert_eq!(program.evaluate().map(i64::from), Ok(expected));
    }

    #[test]
    fn tracing_never_changes_the_tree((input, _) in expression()) {
        let mut recorder = Recorder::new(usize::MAX);
        let recorded = Program::compile(&input, &Limits::default(), &mut recorder).unwrap();
        let silent = Program::compile(&input, &Limits::default(), &mut NullTracer).unwrap();

        prop_assert_eq!(recorded, silent);
        prop_assert_eq!(recorder.depth(), 0);
    }
}
