use pipeline_dsl::{parse, tokenize, Statement, TokenKind};
use proptest::prelude::*;

fn bare_name() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,8}".prop_filter("keywords lex differently", |name| {
        pipeline_dsl::lexer::keywords::lookup(name).is_none()
    })
}

fn backquoted_path() -> impl Strategy<Value = String> {
    "/[a-z0-9_./ -]{1,16}".prop_map(|path| format!("`{path}`"))
}

fn load_statement() -> impl Strategy<Value = String> {
    (bare_name(), backquoted_path(), bare_name())
        .prop_map(|(format, path, table)| format!("load {format}.{path} as {table}"))
}

fn set_statement() -> impl Strategy<Value = String> {
    (bare_name(), bare_name(), "[a-zA-Z0-9 ]{0,10}")
        .prop_map(|(ns, key, value)| format!("set {ns}.{key} = \"{value}\""))
}

fn save_statement() -> impl Strategy<Value = String> {
    (
        prop::collection::vec(prop::sample::select(vec!["overwrite", "append", "ignore"]), 0..3),
        bare_name(),
        bare_name(),
        backquoted_path(),
    )
        .prop_map(|(modes, table, format, path)| {
            let mut stmt = "save".to_string();
            for mode in modes {
                stmt.push(' ');
                stmt.push_str(mode);
            }
            format!("{stmt} {table} as {format}.{path}")
        })
}

fn statement() -> impl Strategy<Value = String> {
    prop_oneof![load_statement(), set_statement(), save_statement()]
}

proptest! {
    #[test]
    fn lexing_never_panics_and_ends_in_eof(source in "\\PC{0,64}") {
        let tokens = tokenize(&source);
        prop_assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
        prop_assert_eq!(tokens.iter().filter(|t| t.kind == TokenKind::Eof).count(), 1);
    }

    #[test]
    fn lexemes_reproduce_the_input(source in "\\PC{0,64}") {
        let joined: String = tokenize(&source).iter().map(|t| t.lexeme.as_str()).collect();
        prop_assert_eq!(joined, source);
    }

    #[test]
    fn lexing_is_idempotent(source in "\\PC{0,64}") {
        prop_assert_eq!(tokenize(&source), tokenize(&source));
    }

    #[test]
    fn spans_are_contiguous(source in "\\PC{0,64}") {
        let tokens = tokenize(&source);
        let mut offset = 0;
        for token in &tokens {
            prop_assert_eq!(token.span.offset, offset);
            offset += token.lexeme.len();
        }
        prop_assert_eq!(offset, source.len());
    }

    #[test]
    fn parsing_never_panics(source in "[ -~\\n]{0,80}") {
        let out = parse(&source);
        for diagnostic in &out.diagnostics {
            prop_assert!(diagnostic.span.offset <= source.len());
        }
    }

    #[test]
    fn well_formed_scripts_parse_cleanly(stmts in prop::collection::vec(statement(), 1..6)) {
        let source: String = stmts.iter().map(|s| format!("{s};\n")).collect();
        let out = parse(&source);

        prop_assert!(out.diagnostics.is_empty(), "{:?}", out.diagnostics);
        prop_assert_eq!(out.script.len(), stmts.len());

        for stmt in out.script.iter() {
            if let Some(target) = stmt.format_path() {
                prop_assert!(!target.format.as_str().is_empty());
                prop_assert!(!target.path.as_str().is_empty());
            }
        }
    }

    #[test]
    fn rendering_round_trips(stmts in prop::collection::vec(statement(), 1..6)) {
        let source: String = stmts.iter().map(|s| format!("{s};")).collect();
        let first = parse(&source).script;
        let second = parse(&first.to_string()).script;
        prop_assert_eq!(first.statements(), second.statements());
    }

    #[test]
    fn save_modes_are_recorded_in_order(
        modes in prop::collection::vec(prop::sample::select(vec!["overwrite", "append", "errorIfExists", "ignore"]), 0..4)
    ) {
        let source = format!("save {} t as csv.`/o`;", modes.join(" "));
        let out = parse(&source);
        prop_assert!(out.diagnostics.is_empty());

        let Some(Statement::Save { modes: parsed, .. }) = out.script.get(0) else {
            return Err(TestCaseError::fail("expected a save statement"));
        };
        let rendered: Vec<String> = parsed.iter().map(|m| m.to_string()).collect();
        prop_assert_eq!(rendered, modes);
    }
}
