use crate::{RewriteError, RewriterConfig, TokenStreamRewriter};
use splice_tokens::{CommonTokenStream, TokenSource};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn abcd() -> CommonTokenStream {
    CommonTokenStream::from_texts(["a", "b", "c", "d"])
}

#[test]
fn test_no_operations_renders_source() {
    let tokens = abcd();
    let rewriter = TokenStreamRewriter::new(&tokens);
    assert_eq!(rewriter.text().unwrap(), "abcd");
}

#[test]
fn test_delete_range() {
    let tokens = abcd();
    let mut rewriter = TokenStreamRewriter::new(&tokens);
    rewriter.delete(1, 2).unwrap();
    assert_eq!(rewriter.text().unwrap(), "ad");
}

#[test]
fn test_replace_range() {
    let tokens = abcd();
    let mut rewriter = TokenStreamRewriter::new(&tokens);
    rewriter.replace(1, 2, "X").unwrap();
    assert_eq!(rewriter.text().unwrap(), "aXd");
}

#[test]
fn test_inserts_at_same_index_latest_first() {
    init_tracing();
    let tokens = abcd();
    let mut rewriter = TokenStreamRewriter::new(&tokens);
    rewriter.insert_before(1, "P").unwrap();
    rewriter.insert_before(1, "Q").unwrap();
    assert_eq!(rewriter.text().unwrap(), "aQPbcd");
}

#[test]
fn test_outer_replace_discards_nested_later_replace() {
    let tokens = abcd();
    let mut rewriter = TokenStreamRewriter::new(&tokens);
    rewriter.replace(0, 3, "OUTER").unwrap();
    rewriter.replace(1, 2, "inner").unwrap();
    assert_eq!(rewriter.text().unwrap(), "OUTER");
}

#[test]
fn test_double_delete_same_range() {
    let tokens = abcd();
    let mut rewriter = TokenStreamRewriter::new(&tokens);
    rewriter.delete(1, 2).unwrap();
    rewriter.delete(1, 2).unwrap();
    assert_eq!(rewriter.text().unwrap(), "ad");
}

#[test]
fn test_partial_overlap_fails_and_keeps_log() {
    init_tracing();
    let tokens = abcd();
    let mut rewriter = TokenStreamRewriter::new(&tokens);
    rewriter.replace(0, 1, "X").unwrap();
    rewriter.replace(1, 2, "Y").unwrap();

    let err = rewriter.text().unwrap_err();
    assert!(err.is_conflict());
    assert!(err.to_string().contains("0..1"));
    assert!(err.to_string().contains("1..2"));
    assert_eq!(rewriter.program("default").unwrap().len(), 2);

    // Rolling back the offending replace makes the program renderable again
    rewriter.rollback(1);
    assert_eq!(rewriter.text().unwrap(), "Xcd");
}

#[test]
fn test_programs_are_isolated() {
    let tokens = abcd();
    let mut rewriter = TokenStreamRewriter::new(&tokens);
    rewriter.replace_in("p1", 0, 0, "Z").unwrap();
    assert_eq!(rewriter.text_in("p1", 0..=4).unwrap(), "Zbcd");
    assert_eq!(rewriter.text_in("p2", 0..=4).unwrap(), "abcd");
    assert_eq!(rewriter.text().unwrap(), "abcd");
}

#[test]
fn test_conflict_in_one_program_does_not_affect_another() {
    let tokens = abcd();
    let mut rewriter = TokenStreamRewriter::new(&tokens);
    rewriter.replace_in("broken", 0, 1, "X").unwrap();
    rewriter.replace_in("broken", 1, 2, "Y").unwrap();
    rewriter.replace_in("fine", 1, 2, "Y").unwrap();

    let err = rewriter.text_in("broken", 0..=4).unwrap_err();
    assert_eq!(err.program(), "broken");
    assert_eq!(rewriter.text_in("fine", 0..=4).unwrap(), "aYd");
}

#[test]
fn test_rollback_matches_never_registered() {
    let tokens = abcd();
    let mut rewriter = TokenStreamRewriter::new(&tokens);
    rewriter.insert_before(0, "<").unwrap();
    rewriter.replace(2, 3, "Z").unwrap();
    let expected = rewriter.text().unwrap();

    rewriter.delete(0, 1).unwrap();
    rewriter.insert_after(3, ">").unwrap();
    assert_ne!(rewriter.text().unwrap(), expected);

    rewriter.rollback(2);
    assert_eq!(rewriter.text().unwrap(), expected);
    assert_eq!(expected, "<abZ");
}

#[test]
fn test_delete_program_empties_log() {
    let tokens = abcd();
    let mut rewriter = TokenStreamRewriter::new(&tokens);
    rewriter.replace_in("p", 0, 3, "gone").unwrap();
    rewriter.delete_program_in("p");
    assert!(rewriter.program("p").unwrap().is_empty());
    assert_eq!(rewriter.text_in("p", 0..=4).unwrap(), "abcd");
}

#[test]
fn test_text_is_repeatable() {
    let tokens = abcd();
    let mut rewriter = TokenStreamRewriter::new(&tokens);
    rewriter.insert_before(1, "P").unwrap();
    rewriter.replace(1, 2, "X").unwrap();
    rewriter.insert_after(3, "!").unwrap();

    let first = rewriter.text().unwrap();
    let second = rewriter.text().unwrap();
    assert_eq!(first, second);
    assert_eq!(first, "aPXd!");
}

#[test]
fn test_insert_after_last_token() {
    let tokens = abcd();
    let mut rewriter = TokenStreamRewriter::new(&tokens);
    let last = tokens.token_count() - 1;
    rewriter.insert_after(last, ";").unwrap();
    assert_eq!(rewriter.text().unwrap(), "abcd;");
}

#[test]
fn test_token_references_resolve_to_index() {
    let tokens = abcd();
    let mut rewriter = TokenStreamRewriter::new(&tokens);
    let b = tokens.token_at(1).unwrap();
    let c = tokens.token_at(2).unwrap();
    rewriter.insert_before(b, "(").unwrap();
    rewriter.insert_after(c, ")").unwrap();
    assert_eq!(rewriter.text().unwrap(), "a(bc)d");
}

#[test]
fn test_single_token_helpers() {
    let tokens = abcd();
    let mut rewriter = TokenStreamRewriter::new(&tokens);
    rewriter.replace_token(0, "A").unwrap();
    rewriter.delete_token(3).unwrap();
    assert_eq!(rewriter.text().unwrap(), "Abc");
}

#[test]
fn test_invalid_ranges_rejected_at_registration() {
    let tokens = abcd();
    let mut rewriter = TokenStreamRewriter::new(&tokens);

    let err = rewriter.replace(2, 1, "X").unwrap_err();
    assert_eq!(
        err,
        RewriteError::InvalidRange {
            program: "default".into(),
            from: 2,
            to: 1,
            size: 5,
        }
    );
    assert!(matches!(rewriter.delete(0, 5), Err(RewriteError::InvalidRange { .. })));
    assert!(matches!(rewriter.insert_before(6, "X"), Err(RewriteError::InvalidIndex { .. })));
    assert!(rewriter.program("default").unwrap().is_empty());
}

#[test]
fn test_insert_after_max_index_is_range_error() {
    let tokens = abcd();
    let mut rewriter = TokenStreamRewriter::new(&tokens);
    let err = rewriter.insert_after(usize::MAX, "x").unwrap_err();
    assert_eq!(
        err,
        RewriteError::InvalidIndex {
            program: "default".into(),
            index: usize::MAX,
            size: 5,
        }
    );
    assert!(rewriter.program("default").unwrap().is_empty());
    assert_eq!(rewriter.text().unwrap(), "abcd");
}

#[test]
fn test_insert_inside_earlier_replace_fails_at_render() {
    let tokens = abcd();
    let mut rewriter = TokenStreamRewriter::new(&tokens);
    rewriter.replace(0, 2, "X").unwrap();
    rewriter.insert_before(1, "P").unwrap();
    assert!(matches!(rewriter.text(), Err(RewriteError::InsertWithinReplace { .. })));
}

#[test]
fn test_text_range_is_clamped() {
    let tokens = abcd();
    let mut rewriter = TokenStreamRewriter::new(&tokens);
    assert_eq!(rewriter.text_range(1..=100).unwrap(), "bcd");
    rewriter.insert_before(2, "-").unwrap();
    assert_eq!(rewriter.text_range(1..=100).unwrap(), "b-cd");
    assert_eq!(rewriter.text_range(1..=1).unwrap(), "b");
}

#[test]
fn test_last_rewrite_token_index_is_advisory() {
    let tokens = abcd();
    let mut rewriter = TokenStreamRewriter::new(&tokens);
    assert_eq!(rewriter.last_rewrite_token_index(), None);
    rewriter.set_last_rewrite_token_index(2);
    rewriter.set_last_rewrite_token_index_in("other", 3);
    assert_eq!(rewriter.last_rewrite_token_index(), Some(2));
    assert_eq!(rewriter.last_rewrite_token_index_in("other"), Some(3));
    assert_eq!(rewriter.text().unwrap(), "abcd");
}

#[test]
fn test_custom_default_program() {
    let tokens = abcd();
    let config = RewriterConfig::default()
        .with_default_program("main")
        .with_program_capacity(8);
    let mut rewriter = TokenStreamRewriter::with_config(&tokens, config);
    rewriter.delete(0, 0).unwrap();
    assert_eq!(rewriter.default_program(), "main");
    assert_eq!(rewriter.program("main").unwrap().len(), 1);
    assert!(rewriter.program("default").is_none());
    assert_eq!(rewriter.text().unwrap(), "bcd");
}

#[test]
fn test_eof_only_stream_renders_insert() {
    let tokens = CommonTokenStream::from_texts(Vec::<String>::new());
    let mut rewriter = TokenStreamRewriter::new(&tokens);
    assert_eq!(rewriter.text().unwrap(), "");
    rewriter.insert_before(0, "only").unwrap();
    assert_eq!(rewriter.text().unwrap(), "only");
}
