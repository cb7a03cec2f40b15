use crate::Compilation;
use indoc::indoc;

#[test]
fn invalid_bool() {
    let input = indoc! {r#"
    x = bool maybe
    "#};

    let res = Compilation::expect_invalid(input);

    insta::assert_snapshot!(res, @r"
    error: expected `true` or `false`
      |
    1 | x = bool maybe
      |          ^^^^^
    ");
}

#[test]
fn unknown_keyword() {
    let input = indoc! {r#"
    x = integer
    "#};

    let res = Compilation::expect_invalid(input);

    insta::assert_snapshot!(res, @r"
    error: `integer` is not a parameter type
      |
    1 | x = integer
      |     ^^^^^^^
    ");
}

#[test]
fn unknown_flag() {
    let input = indoc! {r#"
    x = int 1 *secret
    "#};

    let res = Compilation::expect_invalid(input);

    insta::assert_snapshot!(res, @r"
    error: `secret` is not a flag
      |
    1 | x = int 1 *secret
      |            ^^^^^^
    ");
}

#[test]
fn missing_equals() {
    let input = indoc! {r#"
    x int 1
    "#};

    let res = Compilation::expect_invalid(input);

    insta::assert_snapshot!(res, @r"
    error: expected `=`
      |
    1 | x int 1
      |   ^^^
    ");
}

#[test]
fn missing_value_resumes_at_next_entry() {
    let input = indoc! {r#"
    x = int
    y = int 2
    "#};

    let compilation = Compilation::expect(input);

    insta::assert_snapshot!(compilation.dump_diagnostics(), @r"
    error: expected value
      |
    2 | y = int 2
      | ^
    ");
    insta::assert_snapshot!(compilation.dump_outline(), @"y int 2");
}

#[test]
fn missing_type_resumes_at_next_entry() {
    let input = indoc! {r#"
    x =
    y = int 2
    "#};

    let res = Compilation::expect_invalid(input);

    insta::assert_snapshot!(res, @r"
    error: expected parameter type
      |
    2 | y = int 2
      | ^
    ");
}

#[test]
fn missing_default_option() {
    let input = indoc! {r#"
    s = selection (a b)
    t = int 1
    "#};

    let res = Compilation::expect_invalid(input);

    insta::assert_snapshot!(res, @r"
    error: expected identifier: default option
      |
    2 | t = int 1
      | ^
    ");
}

#[test]
fn missing_array_star() {
    let input = indoc! {r#"
    a = array [ int 1 ] 3
    "#};

    let res = Compilation::expect_invalid(input);

    insta::assert_snapshot!(res, @r"
    error: expected element count
      |
    1 | a = array [ int 1 ] 3
      |                     ^
    ");
}

#[test]
fn missing_matrix_dims() {
    let input = indoc! {r#"
    m = matrix 3
    "#};

    let res = Compilation::expect_invalid(input);

    insta::assert_snapshot!(res, @r"
    error: expected matrix dimensions
      |
    1 | m = matrix 3
      |            ^
      |
    help: e.g., `matrix 3x3`
    ");
}

#[test]
fn garbage_between_entries() {
    let input = indoc! {r#"
    x = int 1 @@ y = int 2
    "#};

    let compilation = Compilation::expect(input);

    insta::assert_snapshot!(compilation.dump_diagnostics(), @r"
    error: expected identifier
      |
    1 | x = int 1 @@ y = int 2
      |           ^^
    ");
    insta::assert_snapshot!(compilation.dump_outline(), @r"
    x int 1
    y int 2
    ");
}

#[test]
fn inherits_after_entries() {
    let input = indoc! {r#"
    x = int 1
    inherits base
    "#};

    let res = Compilation::expect_invalid(input);

    insta::assert_snapshot!(res, @r"
    error: `inherits` must come before all entries
      |
    2 | inherits base
      | ^^^^^^^^
    ");
}

#[test]
fn flag_without_name() {
    let input = indoc! {r#"
    x = int 1 *
    y = int 2
    "#};

    let res = Compilation::expect_invalid(input);

    insta::assert_snapshot!(res, @r"
    error: expected flag name
      |
    2 | y = int 2
      | ^
      |
    help: one of `*necessary`, `*expert`, `*hidden`
    ");
}

#[test]
fn stray_token_inside_block() {
    let input = indoc! {r#"
    mesh = set {
        3
        n = int 1
    }
    "#};

    let compilation = Compilation::expect(input);

    insta::assert_snapshot!(compilation.dump_diagnostics(), @r"
    error: expected identifier
      |
    2 |     3
      |     ^
    ");
    insta::assert_snapshot!(compilation.dump_outline(), @r"
    mesh subset
      n int 1
    ");
}
