use super::*;

fn texts(node: &Sexp) -> Vec<&str> {
    node.children().iter().filter_map(Sexp::text).collect()
}

fn spans(node: &Sexp) -> Vec<(usize, usize)> {
    node.children()
        .iter()
        .map(|child| (child.span().start(), child.span().end()))
        .collect()
}

#[test]
fn test_symbols() {
    let parsed = from_str("foo-symbol :keyword 100 -42 4.5 a\"b #");
    assert!(parsed.is_ok());
    assert_eq!(
        texts(&parsed.tree),
        ["foo-symbol", ":keyword", "100", "-42", "4.5", "a\"b", "#"]
    );
    assert!(parsed
        .tree
        .children()
        .iter()
        .all(|c| c.atom_kind() == Some(AtomKind::Symbol)));
}

#[test]
fn test_whitespace() {
    let parsed = from_str(" \t\x0b\x0ca\r\n b ");
    assert_eq!(texts(&parsed.tree), ["a", "b"]);
    assert_eq!(spans(&parsed.tree), [(4, 5), (8, 9)]);
}

#[test]
fn test_strings_keep_escapes() {
    let parsed = from_str(r#""hey I said \"hey\" yo.\n" "" "multi
line""#);
    assert!(parsed.is_ok());
    assert_eq!(
        texts(&parsed.tree),
        [r#"hey I said \"hey\" yo.\n"#, "", "multi\nline"]
    );
    assert!(parsed.tree.children().iter().all(Sexp::is_string));
    assert_eq!(parsed.tree.children()[1].span(), Span::new(27, 29));
}

#[test]
fn test_atom_markers() {
    let parsed = from_str(r#"#\a #\( #\  #\λx #b101 #O17 #xFF #p"/tmp" #P"C:\\""#);
    assert!(parsed.is_ok());
    let kinds: Vec<_> = parsed
        .tree
        .children()
        .iter()
        .map(|c| c.atom_kind().unwrap())
        .collect();
    assert_eq!(
        kinds,
        [
            AtomKind::Char,
            AtomKind::Char,
            AtomKind::Char,
            AtomKind::Char,
            AtomKind::Binary,
            AtomKind::Octal,
            AtomKind::Hex,
            AtomKind::Pathname,
            AtomKind::Pathname,
        ]
    );
    assert_eq!(
        texts(&parsed.tree),
        ["a", "(", " ", "λx", "101", "17", "FF", "/tmp", r"C:\\"]
    );
    assert_eq!(parsed.tree.children()[7].span(), Span::new(34, 42));
}

#[test]
fn test_hash_without_marker_is_symbol() {
    let parsed = from_str("#foo #b #c #p #x) ");
    // The stray parenthesis closes nothing.
    assert!(parsed.error.is_some());
    let parsed = from_str("#foo #b #cat #path #x #");
    assert!(parsed.is_ok());
    assert_eq!(texts(&parsed.tree), ["#foo", "#b", "#cat", "#path", "#x", "#"]);
}

#[test]
fn test_list_markers() {
    let parsed = from_str("#(1 2) #c(3 4) #C(5 6) (7)");
    assert!(parsed.is_ok());
    let kinds: Vec<_> = parsed
        .tree
        .children()
        .iter()
        .map(|c| c.list_kind().unwrap())
        .collect();
    assert_eq!(
        kinds,
        [ListKind::Vector, ListKind::Complex, ListKind::Complex, ListKind::None]
    );
    assert_eq!(spans(&parsed.tree), [(0, 6), (7, 14), (15, 22), (23, 26)]);
}

#[test]
fn test_prefixes() {
    let parsed = from_str("'a `b #'c ,d ,@e ,.f `,g ''(h)");
    assert!(parsed.is_ok());
    let attributes: Vec<_> = parsed
        .tree
        .children()
        .iter()
        .map(|c| c.attributes().to_vec())
        .collect();
    assert_eq!(
        attributes,
        [
            vec![Attribute::Quote],
            vec![Attribute::Backquote],
            vec![Attribute::FuncQuote],
            vec![Attribute::CommaSplice],
            vec![Attribute::AtSplice],
            vec![Attribute::DotSplice],
            vec![Attribute::Backquote, Attribute::CommaSplice],
            vec![Attribute::Quote, Attribute::Quote],
        ]
    );
    let last = &parsed.tree.children()[7];
    assert_eq!(last.span(), Span::new(25, 30));
}

#[test]
fn test_prefix_attaches_to_next_node_only() {
    let parsed = from_str("('(1 2) 3)");
    let list = &parsed.tree.children()[0];
    assert!(list.attributes().is_empty());
    assert_eq!(list.children()[0].attributes(), [Attribute::Quote]);
    assert!(list.children()[1].attributes().is_empty());
    assert_eq!(list.children()[0].span(), Span::new(1, 7));
}

#[test]
fn test_quoted_list_span() {
    let source = "'(1 2 3 4)";
    let parsed = from_str(source);
    let quoted = &parsed.tree.children()[0];
    assert_eq!(quoted.span().slice(source), Some(source));
}

#[test]
fn test_comments() {
    let parsed = from_str("a ; comment (b\n c #| d #| e |# f |# g");
    assert!(parsed.is_ok());
    assert_eq!(texts(&parsed.tree), ["a", "c", "g"]);
}

#[test]
fn test_root_span() {
    let source = "  (a) ";
    let parsed = from_str(source);
    assert_eq!(parsed.tree.span(), Span::new(0, source.len()));
    assert_eq!(parsed.tree.children()[0].span(), Span::new(2, 5));
    assert!(parsed.tree.attributes().is_empty());
}

#[test]
fn test_empty_input() {
    let parsed = from_str("");
    assert!(parsed.is_ok());
    assert!(parsed.tree.is_nil());
    assert_eq!(parsed.diagnostic(), "");
}

#[test]
fn test_unterminated_string() {
    let parsed = from_str("(a \"bc");
    let error = parsed.error.as_ref().unwrap();
    assert_eq!(error.to_string(), "Unterminated string literal");
    assert_eq!(error.offset(), 3);
    assert!(error.is_eof());
    let list = &parsed.tree.children()[0];
    assert_eq!(texts(list), ["a", "bc", DEFAULT_SENTINEL]);
    assert_eq!(list.children()[1].span(), Span::new(3, 6));
    assert_eq!(list.children()[2].span(), Span::new(6, 6 + DEFAULT_SENTINEL.len()));
    assert_eq!(list.span(), Span::new(0, 6 + DEFAULT_SENTINEL.len()));
}

#[test]
fn test_unfinished_escape() {
    let parsed = from_str("'\"abc\\");
    let error = parsed.error.as_ref().unwrap();
    assert_eq!(
        error.to_string(),
        "Unfinished escape sequence at the end of the string"
    );
    assert_eq!(error.offset(), 5);
    let partial = &parsed.tree.children()[0];
    assert_eq!(partial.text(), Some("abc"));
    assert_eq!(partial.attributes(), [Attribute::Quote]);
    assert_eq!(partial.span(), Span::new(0, 6));
}

#[test]
fn test_escaped_quote_at_end_is_unterminated() {
    let parsed = from_str("\"abc\\\"");
    assert_eq!(parsed.diagnostic(), "Unterminated string literal");
    assert_eq!(texts(&parsed.tree), ["abc\\\"", DEFAULT_SENTINEL]);
}

#[test]
fn test_unclosed_block_comment() {
    let parsed = from_str("(a) #| x #| y |#");
    let error = parsed.error.as_ref().unwrap();
    assert_eq!(error.to_string(), "Unclosed block comment");
    assert_eq!(error.offset(), 4);
    assert_eq!(parsed.tree.child_count(), 2);
    assert_eq!(parsed.tree.children()[1].text(), Some(DEFAULT_SENTINEL));
}

#[test]
fn test_too_few_closing_parens() {
    let parsed = from_str("(a (b");
    let error = parsed.error.as_ref().unwrap();
    assert_eq!(error.offset(), 5);
    assert_eq!(error.location().line(), 1);
    assert_eq!(error.location().column(), 6);
    let outer = &parsed.tree.children()[0];
    let inner = &outer.children()[1];
    assert_eq!(texts(inner), ["b", DEFAULT_SENTINEL]);
    assert_eq!(inner.span().end(), 5 + DEFAULT_SENTINEL.len());
    assert_eq!(outer.span().end(), inner.span().end());
    assert_eq!(parsed.tree.span(), Span::new(0, 5));
}

#[test]
fn test_too_many_closing_parens() {
    let parsed = from_str("(defun foo (x) (print)))");
    let error = parsed.error.as_ref().unwrap();
    assert_eq!(
        error.to_string(),
        "too many ')' characters detected, closing sexprs that don't exist, no good."
    );
    assert_eq!(error.offset(), 23);
    assert!(error.is_syntax());
    assert_eq!(texts(&parsed.tree), ["print"]);
    assert_eq!(parsed.tree.span(), Span::new(15, 22));
}

#[test]
fn test_stray_paren_after_atom() {
    let parsed = from_str("(a) b )");
    assert!(parsed.error.as_ref().unwrap().is_syntax());
    assert_eq!(parsed.tree.to_string(), "(a) b");
    assert_eq!(parsed.tree.span(), Span::new(0, 6));
}

#[test]
fn test_stray_paren_keeps_parsed_forms() {
    let parsed = from_str("(keep me) tail ) (dropped)");
    assert_eq!(parsed.error.as_ref().unwrap().offset(), 15);
    assert_eq!(parsed.tree.child_count(), 2);
    assert_eq!(parsed.tree.to_string(), "(keep me) tail");
    let parsed = from_str(")");
    assert!(parsed.tree.is_nil());
    assert_eq!(parsed.tree.span(), Span::new(0, 0));
}

#[test]
fn test_prefix_before_close_is_dropped() {
    let source = "(a ') b";
    let parsed = from_str(source);
    assert!(parsed.is_ok());
    assert_eq!(parsed.tree.to_string(), "(a) b");
    let b = &parsed.tree.children()[1];
    assert!(b.attributes().is_empty());
    assert_eq!(b.span(), Span::new(6, 7));
    assert_eq!(b.span().slice(source), Some("b"));
    assert_eq!(parsed.tree.children()[0].span().slice(source), Some("(a ')"));
}

#[test]
fn test_stray_paren_run_ignores_comments() {
    let parsed = from_str("((a)) ; done\n)");
    assert!(parsed.error.is_some());
    assert_eq!(texts(&parsed.tree), ["a"]);
}

#[test]
fn test_custom_sentinel() {
    let parsed = from_str_custom("(a", Options::new().with_sentinel("<eof>"));
    assert_eq!(texts(&parsed.tree.children()[0]), ["a", "<eof>"]);
    assert_eq!(parsed.tree.children()[0].children()[1].span(), Span::new(2, 7));
}

#[test]
fn test_recovery_disabled() {
    let options = Options::new().with_recovery(false);
    assert!(!options.recovery());
    let parsed = from_str_custom("(a \"b", options);
    assert_eq!(parsed.diagnostic(), "Unterminated string literal");
    assert_eq!(texts(&parsed.tree.children()[0]), ["a", "b"]);

    let parsed = from_str_custom("(", Options::new().with_recovery(false));
    assert!(parsed.tree.children()[0].is_nil());
    assert_eq!(parsed.tree.children()[0].span(), Span::new(0, 1));
}

#[test]
fn test_options_default() {
    let options = Options::default();
    assert_eq!(options.sentinel(), ":sexpresso-error");
    assert!(options.recovery());
}

#[test]
fn test_parsed_conversions() {
    let (tree, diagnostic) = from_str("(a").into_parts();
    assert_eq!(
        diagnostic,
        "not enough s-expressions were closed by the end of parsing"
    );
    assert_eq!(tree.child_count(), 1);
    assert!(from_str("(a").into_result().is_err());
    assert!(from_str("(a)").into_result().is_ok());
}

#[test]
fn test_error_location_multiline() {
    let parsed = from_str("(a\n  \"b");
    let location = parsed.error.unwrap().location();
    assert_eq!((location.line(), location.column()), (2, 3));
}

#[test]
fn test_error_debug() {
    let error = from_str("\n)").error.unwrap();
    assert_eq!(
        format!("{:?}", error),
        "Error(\"too many ')' characters detected, closing sexprs that don't exist, no good.\", \
         offset: 1, line: 2, column: 1)"
    );
}

#[test]
fn test_error_into_io() {
    use std::io;
    let error = from_str(")").error.unwrap();
    assert_eq!(io::Error::from(error).kind(), io::ErrorKind::InvalidData);
}

#[test]
fn test_deep_nesting() {
    let depth = 300_000;
    let source = format!("{}{}", "(".repeat(depth), ")".repeat(depth));
    let parsed = from_str(&source);
    assert!(parsed.is_ok());
    assert_eq!(parsed.tree.child_count(), 1);
    drop(parsed);
}

#[test]
fn test_deep_nesting_after_recovery() {
    let source = format!("{}x", "(".repeat(300_000));
    let parsed = from_str(&source);
    assert!(parsed.error.unwrap().is_eof());
    drop(parsed.tree);
}
