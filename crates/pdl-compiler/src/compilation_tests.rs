use indoc::indoc;

use crate::parser::KeywordTable;
use crate::{Compilation, Error};
use crate::Keyword;

impl<'a> Compilation<'a> {
    #[track_caller]
    pub fn expect(src: &'a str) -> Self {
        Compilation::new(src).unwrap()
    }

    #[track_caller]
    pub fn expect_valid(src: &'a str) -> Self {
        let compilation = Compilation::expect(src);
        if !compilation.is_valid() {
            panic!(
                "Expected valid schema, got error:\n{}",
                compilation.dump_diagnostics()
            );
        }
        compilation
    }

    #[track_caller]
    pub fn expect_valid_cst(src: &'a str) -> String {
        Compilation::expect_valid(src).dump_cst()
    }

    #[track_caller]
    pub fn expect_valid_cst_full(src: &'a str) -> String {
        Compilation::expect_valid(src).dump_cst_full()
    }

    #[track_caller]
    pub fn expect_valid_outline(src: &'a str) -> String {
        Compilation::expect_valid(src).dump_outline()
    }

    #[track_caller]
    pub fn expect_invalid(src: &'a str) -> String {
        let compilation = Compilation::expect(src);
        if compilation.is_valid() {
            panic!(
                "Expected invalid schema, got valid:\n{}",
                compilation.dump_cst()
            );
        }
        compilation.dump_diagnostics()
    }
}

#[test]
fn valid_schema() {
    let input = indoc! {r#"
    flag = bool false "enable the thing"
    mesh = set {
        cells = int 10
    }
    "#};

    let compilation = Compilation::expect_valid(input);
    assert_eq!(compilation.source(), input);
    assert!(compilation.diagnostics().is_empty());
    assert_eq!(compilation.schema().entries.len(), 2);
    assert_eq!(compilation.root().entries().count(), 2);
}

#[test]
fn invalid_schema_keeps_complete_entries() {
    let input = indoc! {r#"
    a = int 1
    b = bool maybe
    c = double 2.5
    "#};

    let compilation = Compilation::expect(input);
    assert!(!compilation.is_valid());
    let names: Vec<_> = compilation
        .schema()
        .entries
        .iter()
        .map(|d| d.name.as_str())
        .collect();
    assert_eq!(names, ["a", "c"]);
}

#[test]
fn into_schema_fails_with_errors() {
    let result = Compilation::expect("x = int").into_schema();
    let Err(Error::ParseFailed(diagnostics)) = result else {
        panic!("expected ParseFailed, got {result:?}");
    };
    assert_eq!(diagnostics.error_count(), 1);
}

#[test]
fn into_schema_allows_warnings() {
    let compilation = Compilation::expect("x = int 1 *hidden *hidden");
    assert!(compilation.is_valid());
    assert!(compilation.diagnostics().has_warnings());

    let schema = compilation.into_schema().unwrap();
    assert!(schema.entries[0].flags.hidden);
}

#[test]
fn custom_keywords() {
    let mut keywords = KeywordTable::standard();
    keywords.register("integer", Keyword::Int);

    let compilation = Compilation::builder("n = integer 3")
        .with_keywords(keywords)
        .compile()
        .unwrap();

    assert!(compilation.is_valid());
    insta::assert_snapshot!(compilation.dump_outline(), @"n int 3");
}

#[test]
fn empty_keyword_table_rejects_every_type() {
    let compilation = Compilation::builder("n = int 3")
        .with_keywords(KeywordTable::empty())
        .compile()
        .unwrap();

    insta::assert_snapshot!(compilation.dump_diagnostics(), @r"
    error: `int` is not a parameter type
      |
    1 | n = int 3
      |     ^^^
    ");
}

#[test]
fn cst_full_keeps_trivia() {
    let input = "a = int 1 # one\n";

    let res = Compilation::expect_valid_cst_full(input);

    insta::assert_snapshot!(res, @r##"
    Root
      Entry
        Id "a"
        Whitespace " "
        Equals "="
        Whitespace " "
        IntType
          Id "int"
          Whitespace " "
          Number "1"
      Whitespace " "
      LineComment "# one"
      Newline "\n"
    "##);
}

#[test]
fn raw_diagnostics_include_suppressed() {
    let input = "v = vector (1 2";

    let compilation = Compilation::expect(input);

    assert_eq!(compilation.diagnostics().len(), 1);
    assert!(!compilation.dump_diagnostics_raw().is_empty());
    assert_eq!(
        compilation.dump_diagnostics(),
        compilation.dump_diagnostics_raw()
    );
}

#[test]
fn colored_outline() {
    let compilation = Compilation::expect_valid("n = int 3");

    let plain = compilation.dump_outline();
    let colored = compilation.dump_outline_colored(crate::schema::Colors::ON);

    assert_eq!(plain, "n int 3\n");
    assert!(colored.contains("\x1b[34mn\x1b[0m"));
}
