use crate::Compilation;
use indoc::indoc;

#[test]
fn bool_entry() {
    let input = indoc! {r#"
    flag = bool false
    "#};

    let res = Compilation::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r#"
    Root
      Entry
        Id "flag"
        Equals "="
        BoolType
          Id "bool"
          Id "false"
    "#);
}

#[test]
fn description_and_flags() {
    let input = indoc! {r#"
    flag = bool false "Enable" *expert *hidden
    "#};

    let res = Compilation::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r#"
    Root
      Entry
        Id "flag"
        Equals "="
        BoolType
          Id "bool"
          Id "false"
          Description
            DoubleQuote "\""
            StrVal "Enable"
            DoubleQuote "\""
          Flag
            Star "*"
            Id "expert"
          Flag
            Star "*"
            Id "hidden"
    "#);
}

#[test]
fn flags_without_description() {
    let input = indoc! {r#"
    n = int 3 *necessary
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
          Flag
            Star "*"
            Id "necessary"
    "#);
}

#[test]
fn numeric_entries() {
    let input = indoc! {r#"
    n = int -3
    tol = double 1e-6
    "#};

    let res = Compilation::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r#"
    Root
      Entry
        Id "n"
        Equals "="
        IntType
          Id "int"
          Number "-3"
      Entry
        Id "tol"
        Equals "="
        DoubleType
          Id "double"
          Number "1e-6"
    "#);
}

#[test]
fn vector_entry() {
    let input = indoc! {r#"
    origin = vector (0 0 1.5)
    "#};

    let res = Compilation::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r#"
    Root
      Entry
        Id "origin"
        Equals "="
        VectorType
          Id "vector"
          ParenOpen "("
          Number "0"
          Number "0"
          Number "1.5"
          ParenClose ")"
    "#);
}

#[test]
fn string_and_path_entries() {
    let input = indoc! {r#"
    name = string "case1"
    mesh = path "" "mesh file"
    "#};

    let res = Compilation::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r#"
    Root
      Entry
        Id "name"
        Equals "="
        StringType
          Id "string"
          Str
            DoubleQuote "\""
            StrVal "case1"
            DoubleQuote "\""
      Entry
        Id "mesh"
        Equals "="
        PathType
          Id "path"
          Str
            DoubleQuote "\""
            DoubleQuote "\""
          Description
            DoubleQuote "\""
            StrVal "mesh file"
            DoubleQuote "\""
    "#);
}

#[test]
fn matrix_entry() {
    let input = indoc! {r#"
    m = matrix 3x3
    "#};

    let res = Compilation::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r#"
    Root
      Entry
        Id "m"
        Equals "="
        MatrixType
          Id "matrix"
          Dims "3x3"
    "#);
}

#[test]
fn inherits_clause() {
    let input = indoc! {r#"
    inherits base::Common
    x = int 1
    "#};

    let res = Compilation::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r#"
    Root
      Inherits
        Id "inherits"
        TypePath
          Id "base"
          DoubleColon "::"
          Id "Common"
      Entry
        Id "x"
        Equals "="
        IntType
          Id "int"
          Number "1"
    "#);
}

#[test]
fn keyword_as_entry_name() {
    let input = indoc! {r#"
    int = int 1
    set = bool true
    "#};

    let res = Compilation::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r#"
    Root
      Entry
        Id "int"
        Equals "="
        IntType
          Id "int"
          Number "1"
      Entry
        Id "set"
        Equals "="
        BoolType
          Id "bool"
          Id "true"
    "#);
}

#[test]
fn entries_on_one_line() {
    let input = "a = int 1 b = int 2";

    let res = Compilation::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r#"
    Root
      Entry
        Id "a"
        Equals "="
        IntType
          Id "int"
          Number "1"
      Entry
        Id "b"
        Equals "="
        IntType
          Id "int"
          Number "2"
    "#);
}

#[test]
fn empty_source() {
    let res = Compilation::expect_valid_cst("");

    insta::assert_snapshot!(res, @"Root");
}
