use crate::Compilation;
use indoc::indoc;

#[test]
fn selection() {
    let input = indoc! {r#"
    solver = selection (simple piso) simple "pressure coupling"
    "#};

    let res = Compilation::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r#"
    Root
      Entry
        Id "solver"
        Equals "="
        SelectionType
          Id "selection"
          SelectionItems
            ParenOpen "("
            Id "simple"
            Id "piso"
            ParenClose ")"
          Id "simple"
          Description
            DoubleQuote "\""
            StrVal "pressure coupling"
            DoubleQuote "\""
    "#);
}

#[test]
fn set_block() {
    let input = indoc! {r#"
    mesh = set {
        n = int 1
        refine = bool false
    } "mesh settings"
    "#};

    let res = Compilation::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r#"
    Root
      Entry
        Id "mesh"
        Equals "="
        SetType
          Id "set"
          Block
            BraceOpen "{"
            Entry
              Id "n"
              Equals "="
              IntType
                Id "int"
                Number "1"
            Entry
              Id "refine"
              Equals "="
              BoolType
                Id "bool"
                Id "false"
            BraceClose "}"
          Description
            DoubleQuote "\""
            StrVal "mesh settings"
            DoubleQuote "\""
    "#);
}

#[test]
fn empty_set() {
    let input = indoc! {r#"
    extra = set { }
    "#};

    let res = Compilation::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r#"
    Root
      Entry
        Id "extra"
        Equals "="
        SetType
          Id "set"
          Block
            BraceOpen "{"
            BraceClose "}"
    "#);
}

#[test]
fn nested_sets() {
    let input = indoc! {r#"
    outer = set { inner = set { x = double 0.5 } }
    "#};

    let res = Compilation::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r#"
    Root
      Entry
        Id "outer"
        Equals "="
        SetType
          Id "set"
          Block
            BraceOpen "{"
            Entry
              Id "inner"
              Equals "="
              SetType
                Id "set"
                Block
                  BraceOpen "{"
                  Entry
                    Id "x"
                    Equals "="
                    DoubleType
                      Id "double"
                      Number "0.5"
                  BraceClose "}"
            BraceClose "}"
    "#);
}

#[test]
fn selectable_subset() {
    let input = indoc! {r#"
    mode = selectablesubset {{
        a set { } "first"
        b set { y = int 2 }
    }} a
    "#};

    let res = Compilation::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r#"
    Root
      Entry
        Id "mode"
        Equals "="
        SelectableType
          Id "selectablesubset"
          BraceOpen "{"
          BraceOpen "{"
          Alternative
            Id "a"
            Id "set"
            Block
              BraceOpen "{"
              BraceClose "}"
            Description
              DoubleQuote "\""
              StrVal "first"
              DoubleQuote "\""
          Alternative
            Id "b"
            Id "set"
            Block
              BraceOpen "{"
              Entry
                Id "y"
                Equals "="
                IntType
                  Id "int"
                  Number "2"
              BraceClose "}"
          BraceClose "}"
          BraceClose "}"
          Id "a"
    "#);
}

#[test]
fn selectable_closing_right_after_block() {
    let input = indoc! {r#"
    mode = selectablesubset {{ only set { x = int 1 }}} only
    "#};

    let res = Compilation::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r#"
    Root
      Entry
        Id "mode"
        Equals "="
        SelectableType
          Id "selectablesubset"
          BraceOpen "{"
          BraceOpen "{"
          Alternative
            Id "only"
            Id "set"
            Block
              BraceOpen "{"
              Entry
                Id "x"
                Equals "="
                IntType
                  Id "int"
                  Number "1"
              BraceClose "}"
          BraceClose "}"
          BraceClose "}"
          Id "only"
    "#);
}

#[test]
fn array_of_scalars() {
    let input = indoc! {r#"
    numbers = array [ double 0.0 "" ] * 3 "samples"
    "#};

    let res = Compilation::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r#"
    Root
      Entry
        Id "numbers"
        Equals "="
        ArrayType
          Id "array"
          BracketOpen "["
          DoubleType
            Id "double"
            Number "0.0"
            Description
              DoubleQuote "\""
              DoubleQuote "\""
          BracketClose "]"
          Star "*"
          Number "3"
          Description
            DoubleQuote "\""
            StrVal "samples"
            DoubleQuote "\""
    "#);
}

#[test]
fn array_of_sets() {
    let input = indoc! {r#"
    points = array [ set { x = double 0 } ] * 2
    "#};

    let res = Compilation::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r#"
    Root
      Entry
        Id "points"
        Equals "="
        ArrayType
          Id "array"
          BracketOpen "["
          SetType
            Id "set"
            Block
              BraceOpen "{"
              Entry
                Id "x"
                Equals "="
                DoubleType
                  Id "double"
                  Number "0"
              BraceClose "}"
          BracketClose "]"
          Star "*"
          Number "2"
    "#);
}

#[test]
fn array_count_then_flag() {
    let input = indoc! {r#"
    xs = array [ int 0 ] * 2 *hidden
    "#};

    let res = Compilation::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r#"
    Root
      Entry
        Id "xs"
        Equals "="
        ArrayType
          Id "array"
          BracketOpen "["
          IntType
            Id "int"
            Number "0"
          BracketClose "]"
          Star "*"
          Number "2"
          Flag
            Star "*"
            Id "hidden"
    "#);
}
