use super::*;

fn sym(text: &str) -> Sexp {
    Sexp::symbol(text)
}

#[test]
fn test_new_is_nil() {
    let root = Sexp::new();
    assert!(root.is_nil());
    assert!(root.is_list());
    assert_eq!(root.child_count(), 0);
    assert_eq!(Sexp::default(), root);
    assert!(!sym("nil").is_nil());
}

#[test]
fn test_drop_deep_tree() {
    let mut tree = Sexp::new();
    for _ in 0..300_000 {
        tree = Sexp::vector(vec![sym("x"), tree]);
    }
    assert_eq!(tree.child_count(), 2);
    drop(tree);
}

#[test]
fn test_add_child_to_list() {
    let mut root = Sexp::new();
    root.add_child_text("hi");
    root.add_child_unescaped("there");
    root.add_child(Sexp::list(vec![sym("little"), sym("list")]));
    assert_eq!(root.child_count(), 3);
    assert_eq!(root.to_string(), "hi there (little list)");
    assert_eq!(root.child(1).and_then(Sexp::atom_kind), Some(AtomKind::None));
}

#[test]
fn test_add_child_to_atom() {
    let mut node = Sexp::atom("head", AtomKind::Hex).with_span(Span::new(3, 7));
    assert_eq!(node.child_count(), 1);
    node.add_child(sym("tail"));
    assert!(node.is_list());
    assert_eq!(node.list_kind(), Some(ListKind::None));
    assert_eq!(node.child_count(), 2);
    let head = &node.children()[0];
    assert_eq!(head.text(), Some("head"));
    assert_eq!(head.atom_kind(), Some(AtomKind::Hex));
    assert_eq!(node.span(), Span::new(3, 7));
}

#[test]
fn test_add_child_text_escapes() {
    let mut root = Sexp::new();
    root.add_child_text("tab\there");
    root.add_child_unescaped("tab\there");
    assert_eq!(root.children()[0].text(), Some("tab\\there"));
    assert_eq!(root.children()[1].text(), Some("tab\there"));
}

#[test]
fn test_add_child_unescaped_at() {
    let mut root = Sexp::new();
    root.add_child_unescaped_at("x", AtomKind::String, Span::new(4, 7));
    let child = &root.children()[0];
    assert!(child.is_string());
    assert_eq!(child.span(), Span::new(4, 7));
}

#[test]
fn test_add_expression() {
    let mut root = Sexp::new();
    root.create_path("oh/my/god").add_expression("(r 0) (g 0) (b 23)");
    assert_eq!(root.to_string(), "(oh (my (god (r 0) (g 0) (b 23))))");
    let blue = root.get_child_by_path("oh/my/god/b").unwrap();
    assert_eq!(blue.to_string(), "b 23");
}

#[test]
fn test_add_expression_discards_malformed_input() {
    let mut root = Sexp::new();
    root.add_expression("(ok)");
    root.add_expression("(unbalanced");
    root.add_expression("\"unterminated");
    root.add_expression("");
    assert_eq!(root.to_string(), "(ok)");
}

#[test]
fn test_get_child_by_path() {
    let tree = crate::parse("(config (window (width 800) (height 600)) title)").tree;
    let width = tree.get_child_by_path("config/window/width").unwrap();
    assert_eq!(width.child(1).and_then(Sexp::text), Some("800"));
    // Atoms only match as the final segment.
    let title = tree.get_child_by_path("config/title").unwrap();
    assert_eq!(title.text(), Some("title"));
    assert!(tree.get_child_by_path("config/title/x").is_none());
    // A List is matched by its head, never by its position.
    assert!(tree.get_child_by_path("config/800").is_none());
    assert!(tree.get_child_by_path("config/window/depth").is_none());
    assert!(tree.get_child_by_path("").is_none());
    assert!(sym("config").get_child_by_path("config").is_none());
}

#[test]
fn test_get_child_by_path_first_match_wins() {
    let tree = crate::parse("(a (b 1) (b 2))").tree;
    let b = tree.get_child_by_path("a/b").unwrap();
    assert_eq!(b.to_string(), "b 1");
}

#[test]
fn test_get_child_by_path_mut() {
    let mut tree = crate::parse("(server (port 80))").tree;
    let port = tree.get_child_by_path_mut("server/port").unwrap();
    *port.child_mut(1).and_then(Sexp::text_mut).unwrap() = "8080".into();
    assert_eq!(tree.to_string(), "(server (port 8080))");
    assert!(tree.get_child_by_path_mut("server/host").is_none());
}

#[test]
fn test_create_path() {
    let mut root = Sexp::new();
    root.create_path("wow/this/is/cool");
    assert_eq!(root.to_string(), "(wow (this (is (cool))))");
    // Existing segments are reused.
    root.create_path("wow/this/rocks");
    assert_eq!(root.to_string(), "(wow (this (is (cool)) (rocks)))");
    root.create_path_segments(&["wow", "also"]).add_child_text("here");
    assert_eq!(root.to_string(), "(wow (this (is (cool)) (rocks)) (also here))");
}

#[test]
fn test_create_path_returns_existing_node() {
    let mut root = crate::parse("(a (b 1))").tree;
    let node = root.create_path("a/b");
    assert_eq!(node.to_string(), "b 1");
    let node = root.create_path("");
    assert_eq!(node.child_count(), 1);
}

#[test]
fn test_create_path_through_atom() {
    let mut root = crate::parse("(a leaf)").tree;
    root.create_path("a/leaf/grown");
    assert_eq!(root.to_string(), "(a (leaf (grown)))");
}

#[test]
fn test_arguments() {
    let mut tree = crate::parse("(add 1 2)").tree;
    let add = tree.child_mut(0).unwrap();
    assert_eq!(add.arguments().count(), 2);
    for argument in add.arguments_mut() {
        argument.text_mut().unwrap().push('0');
    }
    assert_eq!(tree.to_string(), "(add 10 20)");
    assert_eq!(Sexp::new().arguments().count(), 0);
    assert_eq!(sym("x").arguments().count(), 0);
    assert_eq!(Sexp::new().arguments_mut().count(), 0);
}

#[test]
fn test_accessors() {
    let atom = Sexp::string("hello").with_attribute(Attribute::Quote);
    assert!(atom.is_atom());
    assert_eq!(atom.as_str(), Some("hello"));
    assert_eq!(atom.list_kind(), None);
    assert!(atom.children().is_empty());
    assert!(atom.child(0).is_none());
    assert!(matches!(atom.node(), Node::Atom { .. }));

    let mut list = Sexp::vector(vec![sym("a")]);
    assert_eq!(list.text(), None);
    assert_eq!(list.atom_kind(), None);
    list.attributes_mut().push(Attribute::Backquote);
    list.set_span(Span::new(1, 2));
    assert_eq!(list.attributes(), [Attribute::Backquote]);
    assert_eq!(list.span().len(), 1);
}

#[test]
fn test_span() {
    let span = Span::new(2, 5);
    assert_eq!((span.start(), span.end(), span.len()), (2, 5, 3));
    assert!(!span.is_empty());
    assert!(Span::new(4, 4).is_empty());
    assert_eq!(span.slice("a (bc) d"), Some("(bc"));
    assert_eq!(Span::new(6, 20).slice("short"), None);
}

#[test]
fn test_markers() {
    assert_eq!(AtomKind::Char.marker(), "#\\");
    assert_eq!(AtomKind::String.marker(), "");
    assert_eq!(ListKind::Complex.marker(), "#c");
    assert_eq!(Attribute::AtSplice.prefix(), ",@");
}

#[test]
fn test_from_impls() {
    assert_eq!(Sexp::from("a\tb").text(), Some("a\\tb"));
    assert_eq!(Sexp::from(String::from("s")).atom_kind(), Some(AtomKind::Symbol));
    assert_eq!(Sexp::from(std::borrow::Cow::Borrowed("c")), sym("c"));
    assert_eq!(Sexp::from('λ').atom_kind(), Some(AtomKind::Char));
    assert_eq!(Sexp::from(vec![sym("x")]).child_count(), 1);

    let mut list: Sexp = vec!["a", "b"].into_iter().collect();
    list.extend(vec!["c"]);
    assert_eq!(list.to_string(), "a b c");
}

#[test]
fn test_equality() {
    let parsed = crate::parse("(a #(b) \"c\")").tree;
    let built = Sexp::list(vec![Sexp::list(vec![
        sym("a"),
        Sexp::list(vec![sym("b")]),
        sym("c"),
    ])]);
    assert_eq!(parsed, built);
    assert_ne!(parsed, crate::parse("(a (b) d)").tree);
    assert_ne!(sym("a"), Sexp::list(vec![sym("a")]));
}
