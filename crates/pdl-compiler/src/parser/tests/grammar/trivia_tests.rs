use crate::Compilation;
use indoc::indoc;

#[test]
fn whitespace_preserved() {
    let input = indoc! {r#"
    n = int  3
    "#};

    let res = Compilation::expect_valid_cst_full(input);

    insta::assert_snapshot!(res, @r#"
    Root
      Entry
        Id "n"
        Whitespace " "
        Equals "="
        Whitespace " "
        IntType
          Id "int"
          Whitespace "  "
          Number "3"
      Newline "\n"
    "#);
}

#[test]
fn comment_preserved() {
    let input = indoc! {r#"
    // solver settings
    n = int 3
    "#};

    let res = Compilation::expect_valid_cst_full(input);

    insta::assert_snapshot!(res, @r#"
    Root
      LineComment "// solver settings"
      Newline "\n"
      Entry
        Id "n"
        Whitespace " "
        Equals "="
        Whitespace " "
        IntType
          Id "int"
          Whitespace " "
          Number "3"
      Newline "\n"
    "#);
}

#[test]
fn comment_inside_block() {
    let input = indoc! {r#"
    mesh = set {
        # cells
        n = int 1
    }
    "#};

    let res = Compilation::expect_valid_cst_full(input);

    insta::assert_snapshot!(res, @r##"
    Root
      Entry
        Id "mesh"
        Whitespace " "
        Equals "="
        Whitespace " "
        SetType
          Id "set"
          Whitespace " "
          Block
            BraceOpen "{"
            Newline "\n"
            Whitespace "    "
            LineComment "# cells"
            Newline "\n"
            Whitespace "    "
            Entry
              Id "n"
              Whitespace " "
              Equals "="
              Whitespace " "
              IntType
                Id "int"
                Whitespace " "
                Number "1"
            Newline "\n"
            BraceClose "}"
      Newline "\n"
    "##);
}

#[test]
fn comments_hidden_by_default() {
    let input = indoc! {r#"
    n = int 3 // three
    "#};

    let res = Compilation::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r#"
    Root
      Entry
        Id "n"
        Equals "="
        IntType
          Id "int"
          Number "3"
    "#);
}

#[test]
fn multiline_string() {
    let input = "s = string \"line one\nline two\"";

    let res = Compilation::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r#"
    Root
      Entry
        Id "s"
        Equals "="
        StringType
          Id "string"
          Str
            DoubleQuote "\""
            StrVal "line one\nline two"
            DoubleQuote "\""
    "#);
}
