use sexptree::{AtomKind, Sexp};
use sexptree_macros::sexp;

#[test]
fn test_symbols() {
    assert_eq!(sexp!(foo), Sexp::symbol("foo"));
    assert_eq!(sexp!(#"a-symbol"), Sexp::symbol("a-symbol"));
    assert_eq!(sexp!(:keyword), Sexp::symbol(":keyword"));
    assert_eq!(sexp!(+), Sexp::symbol("+"));
    assert_eq!(sexp!(123), Sexp::symbol("123"));
    assert_eq!(sexp!(-64.5), Sexp::symbol("-64.5"));
}

#[test]
fn test_literal_kinds() {
    let string = sexp!("some text");
    assert_eq!(string.atom_kind(), Some(AtomKind::String));
    assert_eq!(string.text(), Some("some text"));

    let escaped = sexp!("with \"quotes\"");
    assert_eq!(escaped.text(), Some(r#"with \"quotes\""#));

    let ch = sexp!('x');
    assert_eq!(ch.atom_kind(), Some(AtomKind::Char));
    assert_eq!(ch.to_string(), r"#\x");

    assert_eq!(sexp!(#b101).atom_kind(), Some(AtomKind::Binary));
    assert_eq!(sexp!(#o17).atom_kind(), Some(AtomKind::Octal));
    assert_eq!(sexp!(#xff).to_string(), "#xff");
}

#[test]
fn test_lists() {
    assert_eq!(sexp!(()), Sexp::new());
    assert_eq!(
        sexp!((a (b c) "d")),
        Sexp::list(vec![
            Sexp::symbol("a"),
            Sexp::list(vec![Sexp::symbol("b"), Sexp::symbol("c")]),
            Sexp::string("d"),
        ])
    );
    let nested = sexp!((config (window (width 800))));
    assert_eq!(format!("{:#}", nested), "(config (window (width 800)))");
}

#[test]
fn test_vectors_and_complex() {
    let vector = sexp!(#(1 2 3));
    assert_eq!(vector.list_kind(), Some(sexptree::ListKind::Vector));
    assert_eq!(format!("{:#}", vector), "#(1 2 3)");
    assert_eq!(format!("{:#}", sexp!(#c(0 1))), "#c(0 1)");
}

#[test]
fn test_unquote() {
    let name = "width";
    let value = String::from("800");
    assert_eq!(format!("{:#}", sexp!((,name ,value))), "(width 800)");
    let inner = sexp!((b c));
    assert_eq!(format!("{:#}", sexp!((a ,inner))), "(a (b c))");
}

#[test]
fn test_matches_parsed_text() {
    let source = r#"(defun greet (name) (format t "Hello" name))"#;
    let built = sexp!((defun greet (name) (format t "Hello" name)));
    assert_eq!(sexptree::parse(source).tree.children()[0], built);
}
