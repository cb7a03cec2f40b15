use indoc::indoc;
use pdl_core::{Parameter, ParameterKind, ParameterSet};

use crate::Compilation;
use crate::schema::{SchemaPath, instantiate, instantiate_with};

fn defaults(src: &str) -> ParameterSet {
    let compilation = Compilation::expect_valid(src);
    instantiate(compilation.schema(), None)
}

#[test]
fn scalars() {
    let tree = defaults(indoc! {r#"
    flag = bool true "Enable" *expert
    n = int 7
    tol = double 0.25
    origin = vector (1 2 3)
    name = string "case"
    mesh = path "grid.msh"
    "#});

    assert!(tree.get_bool("flag").unwrap());
    assert_eq!(tree.get_int("n").unwrap(), 7);
    assert_eq!(tree.get_double("tol").unwrap(), 0.25);
    assert_eq!(tree.get_vector("origin").unwrap(), [1.0, 2.0, 3.0]);
    assert_eq!(tree.get_string("name").unwrap(), "case");
    assert_eq!(
        tree.get_path("mesh").unwrap().path(),
        std::path::Path::new("grid.msh")
    );

    let flag = tree.entry("flag").unwrap();
    assert_eq!(flag.description(), "Enable");
    assert!(flag.flags().expert);
}

#[test]
fn entry_order_follows_declarations() {
    let tree = defaults(indoc! {r#"
    z = int 1
    a = int 2
    m = int 3
    "#});

    assert_eq!(tree.names().collect::<Vec<_>>(), ["z", "a", "m"]);
}

#[test]
fn composites() {
    let tree = defaults(indoc! {r#"
    solver = selection (simple piso) piso
    mesh = set {
        cells = int 10
    }
    mode = selectablesubset {{
        a set { x = int 1 }
        b set { y = int 2 }
    }} b
    xs = array [ double 0.5 ] * 3
    m = matrix 2x2
    "#});

    assert_eq!(tree.get_selection("solver").unwrap().selected(), "piso");
    assert_eq!(tree.get_int("mesh/cells").unwrap(), 10);

    let mode = tree.get_selectable_subset("mode").unwrap();
    assert_eq!(mode.selected(), "b");
    assert_eq!(tree.get_int("mode/y").unwrap(), 2);
    assert_eq!(mode.alternative("a").unwrap().get_int("x").unwrap(), 1);

    let xs = tree.get_array("xs").unwrap();
    assert_eq!(xs.len(), 3);
    assert_eq!(tree.get_double("xs/2").unwrap(), 0.5);

    let m = tree.get_matrix("m").unwrap();
    assert_eq!((m.rows(), m.cols()), (2, 2));
    assert!(m.values().iter().all(|v| *v == 0.0));
}

#[test]
fn array_of_sets() {
    let tree = defaults("points = array [ set { x = double 1 } ] * 2");

    assert_eq!(tree.get_double("points/0/x").unwrap(), 1.0);
    assert_eq!(tree.get_double("points/1/x").unwrap(), 1.0);
    assert_eq!(
        tree.get_array("points").unwrap().default_element().kind(),
        ParameterKind::Subset
    );
}

#[test]
fn layered_over_base() {
    let base = defaults(indoc! {r#"
    n = int 1
    shared = set {
        a = int 1
        b = int 2
    }
    "#});
    let compilation = Compilation::expect_valid(indoc! {r#"
    inherits base::Base
    n = int 5
    shared = set {
        b = int 20
        c = int 30
    }
    extra = bool true
    "#});

    let tree = instantiate(compilation.schema(), Some(base));

    assert_eq!(tree.names().collect::<Vec<_>>(), ["n", "shared", "extra"]);
    assert_eq!(tree.get_int("n").unwrap(), 5);
    assert_eq!(tree.get_int("shared/a").unwrap(), 1);
    assert_eq!(tree.get_int("shared/b").unwrap(), 20);
    assert_eq!(tree.get_int("shared/c").unwrap(), 30);
}

#[test]
fn base_entry_of_other_kind_is_replaced() {
    let mut base = ParameterSet::new();
    base.insert("shared", Parameter::int(1, ""));
    let compilation = Compilation::expect_valid("shared = set { a = int 1 }");

    let tree = instantiate(compilation.schema(), Some(base));

    assert_eq!(tree.get_int("shared/a").unwrap(), 1);
}

#[test]
fn document_of_defaults() {
    let tree = defaults(indoc! {r#"
    n = int 3 "count"
    mesh = set {
        fine = bool false
    }
    "#});

    let document = serde_json::to_string(&tree.to_document(Some("Example"))).unwrap();

    insta::assert_snapshot!(document, @r#"{"schema":"Example","root":{"type":"subset","children":[{"name":"n","type":"int","value":3},{"name":"mesh","type":"subset","children":[{"name":"fine","type":"bool","value":false}]}]}}"#);
}

#[test]
fn double_range_default_is_sorted() {
    let tree = defaults(r#"times = doubleRange (7 4 5 4) "sample times""#);

    let times = tree.get_double_range("times").unwrap();
    assert_eq!(times.values(), [4.0, 5.0, 7.0]);
    assert_eq!(tree.entry("times").unwrap().kind(), ParameterKind::DoubleRange);
}

#[test]
fn included_set_is_filled_by_resolver() {
    let compilation = Compilation::expect_valid(indoc! {r#"
    time = includedset "solvers::Time" "time stepping"
    other = includedset "solvers::Missing"
    "#});
    let mut requested: Vec<String> = Vec::new();

    let tree = instantiate_with(compilation.schema(), None, &mut |path: &SchemaPath| {
        requested.push(path.to_string());
        (path.name() == "Time").then(|| {
            let mut set = ParameterSet::new();
            set.insert("dt", Parameter::double(0.1, ""));
            set
        })
    });

    assert_eq!(requested, ["solvers::Time", "solvers::Missing"]);
    assert_eq!(tree.get_double("time/dt").unwrap(), 0.1);
    assert_eq!(tree.entry("time").unwrap().description(), "time stepping");
    assert_eq!(tree.entry("other").unwrap().kind(), ParameterKind::Subset);
    assert!(tree.get_double("other/dt").is_err());
}

#[test]
fn included_set_without_resolver_is_empty() {
    let tree = defaults(r#"time = includedset "solvers::Time""#);

    assert_eq!(tree.entry("time").unwrap().kind(), ParameterKind::Subset);
    assert!(tree.get_int("time/anything").is_err());
}
