use indoc::indoc;

use crate::Compilation;
use crate::schema::{Colors, Schema, SchemaPrinter};

#[test]
fn every_kind() {
    let input = indoc! {r#"
    inherits base::Common
    flag = bool false "Enable" *expert *hidden
    n = int -3
    tol = double 2.5
    origin = vector (0 0 1.5)
    name = string "case1"
    mesh = path "" "mesh file"
    solver = selection (simple piso) simple
    opts = set {
        k = int 1
    }
    mode = selectablesubset {{
        a set { } "first"
        b set { y = int 2 }
    }} a
    xs = array [ double 0.0 ] * 3
    m = matrix 3x3 *necessary
    "#};

    let res = Compilation::expect_valid_outline(input);

    insta::assert_snapshot!(res, @r#"
    inherits base::Common
    flag bool false "Enable" *expert *hidden
    n int -3
    tol double 2.5
    origin vector (0.0 0.0 1.5)
    name string "case1"
    mesh path "" "mesh file"
    solver selection (simple piso) = simple
    opts subset
      k int 1
    mode selectableSubset = a
      a "first"
      b
        y int 2
    xs array * 3
      xs_item double 0.0
    m matrix 3x3 *necessary
    "#);
}

#[test]
fn included_set_and_double_range() {
    let input = indoc! {r#"
    time = includedset "solvers::Time" "time stepping"
    samples = doubleRange (4 5.5 6) "sample times" *expert
    "#};

    let res = Compilation::expect_valid_outline(input);

    insta::assert_snapshot!(res, @r#"
    time subset solvers::Time "time stepping"
    samples doubleRange (4.0 5.5 6.0) "sample times" *expert
    "#);
}

#[test]
fn nested_indentation() {
    let input = indoc! {r#"
    a = set {
        b = set {
            c = bool true
        } "inner"
    }
    "#};

    let res = Compilation::expect_valid_outline(input);

    insta::assert_snapshot!(res, @r#"
    a subset
      b subset "inner"
        c bool true
    "#);
}

#[test]
fn empty_schema() {
    assert_eq!(SchemaPrinter::new(&Schema::default()).dump(), "");
}

#[test]
fn colors() {
    let compilation = Compilation::expect_valid(r#"n = int 3 "count""#);

    let res = SchemaPrinter::new(compilation.schema())
        .colors(Colors::ON)
        .dump();

    assert_eq!(
        res,
        "\x1b[34mn\x1b[0m \x1b[32mint\x1b[0m 3 \x1b[2m\"count\"\x1b[0m\n"
    );
}

#[test]
fn colors_toggle() {
    assert!(Colors::new(true).is_enabled());
    assert!(!Colors::new(false).is_enabled());
    assert_eq!(Colors::default(), Colors::OFF);
}
