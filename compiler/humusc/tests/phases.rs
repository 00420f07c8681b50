//! End-to-end tests for each pipeline phase, driven through the CLI's
//! phase functions.

#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use humus_diagnostic::ErrorCode;
use humusc::commands::{ir, parse, parse_command_args, tokens, CommandOptions, Emit};
use serde_json::{json, Value};

const HELLO: &str = "SEND (#Hello, \"World\") TO println\n";

fn json_of(output: &str) -> Value {
    serde_json::from_str(output).unwrap()
}

fn debug_options() -> CommandOptions {
    CommandOptions {
        emit: Emit::Debug,
        ..CommandOptions::default()
    }
}

mod tokens_phase {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn positions_are_one_based() {
        let output = json_of(&tokens(HELLO, &CommandOptions::default()).unwrap());
        let tokens = output.as_array().unwrap();
        assert_eq!(tokens.len(), 8);
        assert_eq!(
            tokens[0],
            json!({ "line": 1, "column": 1, "type": "keyword", "value": "SEND" })
        );
        assert_eq!(
            tokens[2],
            json!({ "line": 1, "column": 7, "type": "symbol", "value": "Hello" })
        );
        assert_eq!(tokens[7]["value"], "println");
    }

    #[test]
    fn debug_lists_one_token_per_line() {
        let output = tokens("LET x = 'a'", &debug_options()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines,
            vec![
                "1:1 keyword LET",
                "1:5 identifier x",
                "1:7 punctuation '='",
                "1:9 char 'a'",
            ]
        );
    }

    #[test]
    fn unreadable_text_is_a_lexical_error() {
        let diag = tokens("SEND \"open", &CommandOptions::default()).unwrap_err();
        assert_eq!(diag.code, ErrorCode::E0001);
    }
}

mod parse_phase {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn program_renders_as_statement_list() {
        let output = json_of(&parse(HELLO, &CommandOptions::default()).unwrap());
        assert_eq!(
            output,
            json!([{
                "type": "send",
                "msg": {
                    "type": "pair",
                    "head": { "type": "literal", "value": { "type": "symbol", "value": "Hello" } },
                    "tail": { "type": "literal", "value": { "type": "string", "value": "World" } },
                },
                "to": { "type": "ident", "ident": "println" },
            }])
        );
    }

    #[test]
    fn syntax_errors_carry_positions() {
        let diag = parse("SEND x TO", &CommandOptions::default()).unwrap_err();
        assert_eq!(diag.code, ErrorCode::E1002);
        let label = diag.primary_label().unwrap();
        assert_eq!((label.position.row, label.position.col), (0, 9));

        let diag = parse("BECOME ]\n", &CommandOptions::default()).unwrap_err();
        assert_eq!(diag.code, ErrorCode::E1001);
    }

    #[test]
    fn dispatch_limit_applies() {
        let (options, _) = parse_command_args(&["--limit=5".to_owned()]).unwrap();
        let diag = parse(HELLO, &options).unwrap_err();
        assert_eq!(diag.code, ErrorCode::E9002);
    }
}

mod ir_phase {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn program_lowers_to_a_block() {
        let source = "CREATE sink WITH \\_.[]\nSEND 1 TO sink\n";
        let output = json_of(&ir(source, &CommandOptions::default()).unwrap());
        assert_eq!(output["beh"], "block_expr");
        assert_eq!(output["vars"], json!(["sink"]));
        assert_eq!(output["stmt"]["head"]["beh"], "create_stmt");
        assert_eq!(output["stmt"]["tail"]["head"]["beh"], "send_stmt");
        assert_eq!(output["stmt"]["tail"]["tail"], json!({ "beh": "empty_stmt" }));
    }

    #[test]
    fn lowering_errors_are_reported() {
        let diag = ir("SEND 8#9 TO x\n", &CommandOptions::default()).unwrap_err();
        assert_eq!(diag.code, ErrorCode::E2001);
    }

    #[test]
    fn debug_rendering_names_the_nodes() {
        let output = ir("BECOME SELF\n", &debug_options()).unwrap();
        assert!(output.contains("Become"), "{output}");
        assert!(output.contains("SelfRef"), "{output}");
    }
}
