// tests/script_tests.rs

use sqlexpr::error::ScriptError;
use sqlexpr::script::parse_statements;

fn split(script: &str, keep_comments: bool) -> Vec<String> {
    parse_statements(script, keep_comments).unwrap()
}

// ============================================================================
// Basic Splitting
// ============================================================================

#[test]
fn test_three_statements() {
    for keep in [true, false] {
        assert_eq!(
            split("statement1; statement2; statement3;", keep),
            vec!["statement1", "statement2", "statement3"]
        );
    }
}

#[test]
fn test_missing_final_delimiter() {
    assert_eq!(split("select 1;\nselect 2", false), vec!["select 1", "select 2"]);
}

#[test]
fn test_empty_statements_are_dropped() {
    assert_eq!(split(";; ;\n select 1 ;;;", false), vec!["select 1"]);
    assert!(split("", true).is_empty());
    assert!(split("  \n\t ", true).is_empty());
}

#[test]
fn test_statement_keeps_inner_whitespace() {
    assert_eq!(
        split("  insert into t\n  values (1);  ", false),
        vec!["insert into t\n  values (1)"]
    );
}

#[test]
fn test_separate_calls_share_no_state() {
    split("delimiter $$\nselect 1 $$", false);
    assert_eq!(split("select 1; select 2;", false), vec!["select 1", "select 2"]);
}

// ============================================================================
// Quoted Literals
// ============================================================================

#[test]
fn test_delimiter_inside_literals_is_ignored() {
    assert_eq!(
        split("insert into t values ('a;b', \"c;d\"); select 2;", false),
        vec!["insert into t values ('a;b', \"c;d\")", "select 2"]
    );
}

#[test]
fn test_backslash_escapes_quote() {
    assert_eq!(
        split(r"select 'it\'s; fine'; select 2;", false),
        vec![r"select 'it\'s; fine'", "select 2"]
    );
    assert_eq!(
        split(r#"select "say \"hi;\""; select 3"#, false),
        vec![r#"select "say \"hi;\"""#, "select 3"]
    );
}

#[test]
fn test_doubled_quotes() {
    assert_eq!(
        split("select 'O''Brien;'; select 2;", false),
        vec!["select 'O''Brien;'", "select 2"]
    );
}

#[test]
fn test_comment_markers_inside_literals() {
    assert_eq!(
        split("select '-- not a comment', '/* nor this */'; select 2;", false),
        vec!["select '-- not a comment', '/* nor this */'", "select 2"]
    );
}

#[test]
fn test_unterminated_quote_fails() {
    for keep in [true, false] {
        assert!(matches!(
            parse_statements("select 1; select 'abc", keep),
            Err(ScriptError::UnterminatedQuote { quote: '\'', .. })
        ));
        assert!(matches!(
            parse_statements("select \"abc\\\"", keep),
            Err(ScriptError::UnterminatedQuote { quote: '"', .. })
        ));
    }
}

// ============================================================================
// Comments
// ============================================================================

#[test]
fn test_comments_stripped() {
    let script = "-- header\nselect 1 /* inline */ from t; -- trailing\nselect 2;";
    assert_eq!(split(script, false), vec!["select 1 from t", "select 2"]);
}

#[test]
fn test_line_comment_between_lines_collapses() {
    assert_eq!(
        split("select a, -- first column\n       b\nfrom t;", false),
        vec!["select a, b\nfrom t"]
    );
}

#[test]
fn test_comments_kept() {
    let script = "-- header\nselect 1 /* inline */ from t;\nselect 2;";
    assert_eq!(
        split(script, true),
        vec!["-- header\nselect 1 /* inline */ from t", "select 2"]
    );
}

#[test]
fn test_comment_only_statements_kept() {
    let script = "select 1; /* lonely */; select 2; -- bye";
    assert_eq!(
        split(script, true),
        vec!["select 1", "/* lonely */", "select 2", "-- bye"]
    );
    assert_eq!(split(script, false), vec!["select 1", "select 2"]);
}

#[test]
fn test_delimiter_inside_comments_is_ignored() {
    assert_eq!(
        split("select 1 /* a; b */ + 1; -- c; d\nselect 2;", true),
        vec!["select 1 /* a; b */ + 1", "-- c; d\nselect 2"]
    );
}

#[test]
fn test_quotes_inside_comments_are_ignored() {
    assert_eq!(
        split("-- don't\nselect 1;", false),
        vec!["select 1"]
    );
}

#[test]
fn test_unterminated_block_comment_fails() {
    for keep in [true, false] {
        match parse_statements("select 1;\n/* never closed", keep) {
            Err(ScriptError::UnterminatedComment { position }) => {
                assert_eq!(position.line, 2);
                assert_eq!(position.column, 1);
            }
            other => panic!("Expected UnterminatedComment, got {:?}", other),
        }
    }
}

// ============================================================================
// Delimiter Directive
// ============================================================================

#[test]
fn test_delimiter_switch_and_reset() {
    let script = "\
select 1;
delimiter $$
create procedure p()
begin
  select 2;
  select 3;
end $$
delimiter ;
select 4;
select 5;";

    assert_eq!(
        split(script, false),
        vec![
            "select 1",
            "create procedure p()\nbegin\n  select 2;\n  select 3;\nend",
            "select 4",
            "select 5",
        ]
    );
}

#[test]
fn test_delimiter_directive_is_case_insensitive() {
    assert_eq!(
        split("DELIMITER //\nselect 1; select 2 //\nDELIMITER ;\nselect 3;", false),
        vec!["select 1; select 2", "select 3"]
    );
}

#[test]
fn test_delimiter_directive_with_repetition() {
    assert_eq!(
        split("delimiter $$ $$ select 1; $$ select 2 $$", false),
        vec!["select 1;", "select 2"]
    );
}

#[test]
fn test_delimiter_stays_active_to_end_of_input() {
    assert_eq!(
        split("delimiter ||\nselect 1; select 2 || select 3", false),
        vec!["select 1; select 2", "select 3"]
    );
}

#[test]
fn test_delimiter_word_inside_statement_is_not_a_directive() {
    assert_eq!(
        split("select delimiter from t; select 2;", false),
        vec!["select delimiter from t", "select 2"]
    );
}

#[test]
fn test_comment_before_directive_is_its_own_statement() {
    assert_eq!(
        split("-- switch\ndelimiter $$\nselect 1 $$", true),
        vec!["-- switch", "select 1"]
    );
    assert_eq!(
        split("-- switch\ndelimiter $$\nselect 1 $$", false),
        vec!["select 1"]
    );
}
