use crate::Compilation;
use indoc::indoc;

#[test]
fn missing_paren_in_vector() {
    let input = indoc! {r#"
    v = vector (1 2 3
    "#};

    let res = Compilation::expect_invalid(input);

    insta::assert_snapshot!(res, @r"
    error: missing closing `)`
      |
    1 | v = vector (1 2 3
      |            -^^^^^
      |            |
      |            vector started here
    ");
}

#[test]
fn missing_brace_in_set() {
    let input = indoc! {r#"
    mesh = set { n = int 1
    "#};

    let res = Compilation::expect_invalid(input);

    insta::assert_snapshot!(res, @r"
    error: missing closing `}`
      |
    1 | mesh = set { n = int 1
      |            -^^^^^^^^^^
      |            |
      |            set started here
    ");
}

#[test]
fn missing_double_brace() {
    let input = indoc! {r#"
    mode = selectablesubset {{ a set { x = int 1 }
    "#};

    let res = Compilation::expect_invalid(input);

    insta::assert_snapshot!(res, @r"
    error: missing closing `}}`
      |
    1 | mode = selectablesubset {{ a set { x = int 1 }
      |                         -^^^^^^^^^^^^^^^^^^^^^
      |                         |
      |                         alternatives started here
      |
    help: alternatives are closed with `}}`
    ");
}

#[test]
fn unclosed_set_keeps_parsed_entries() {
    let input = indoc! {r#"
    mesh = set {
        n = int 1
        m = int 2
    "#};

    let compilation = Compilation::expect(input);

    assert!(!compilation.is_valid());
    assert_eq!(compilation.diagnostics().len(), 1);
    let block = compilation
        .root()
        .entries()
        .next()
        .unwrap()
        .data()
        .unwrap()
        .block()
        .unwrap();
    assert_eq!(block.entries().count(), 2);
}

#[test]
fn unclosed_selection_items() {
    let input = "s = selection (a b";

    let compilation = Compilation::expect(input);

    assert!(!compilation.is_valid());
    let kinds: Vec<_> = compilation.diagnostics().kinds().collect();
    assert_eq!(
        kinds,
        [crate::diagnostics::DiagnosticKind::UnclosedParen]
    );
}
