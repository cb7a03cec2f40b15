use std::fs;

use indoc::indoc;

use crate::{
    Array, DoubleRange, Matrix, Parameter, ParameterSet, SchemaRegistry, SelectableSubset,
    Selection, TreeError, read_schema_name,
};

fn defaults() -> ParameterSet {
    let mut a = ParameterSet::new();
    a.insert("x", Parameter::int(1, ""));
    let mut b = ParameterSet::new();
    b.insert("y", Parameter::int(2, ""));

    let mut tree = ParameterSet::new();
    tree.insert("flag", Parameter::bool(false, "desc"));
    tree.insert("ratio", Parameter::double(0.5, ""));
    tree.insert("origin", Parameter::vector([0.0, 0.0, 0.0], ""));
    tree.insert("label", Parameter::string("none", ""));
    tree.insert("input", Parameter::path("", ""));
    tree.insert(
        "scheme",
        Parameter::selection(Selection::new(["upwind", "linear"], 0), ""),
    );
    tree.insert(
        "mode",
        Parameter::selectable_subset(SelectableSubset::new([("a", a), ("b", b)], 0), ""),
    );
    tree.insert(
        "numbers",
        Parameter::array(Array::new(Parameter::double(0.0, ""), 3), ""),
    );
    tree.insert("transform", Parameter::matrix(Matrix::zeros(2, 2), ""));
    tree.insert("times", Parameter::double_range(DoubleRange::default(), ""));
    tree
}

#[test]
fn document_layout() {
    let mut tree = ParameterSet::new();
    tree.insert("flag", Parameter::bool(false, "desc"));
    tree.insert(
        "numbers",
        Parameter::array(Array::new(Parameter::double(0.0, ""), 2), ""),
    );

    let json = serde_json::to_string_pretty(&tree.to_document(Some("Case"))).unwrap();

    insta::assert_snapshot!(json, @r#"
    {
      "schema": "Case",
      "root": {
        "type": "subset",
        "children": [
          {
            "name": "flag",
            "type": "bool",
            "value": false
          },
          {
            "name": "numbers",
            "type": "array",
            "elements": [
              {
                "type": "double",
                "value": 0.0
              },
              {
                "type": "double",
                "value": 0.0
              }
            ]
          }
        ]
      }
    }
    "#);
}

#[test]
fn save_and_reload_reproduces_tree() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("case.json");

    let mut tree = defaults();
    tree.set_bool("flag", true).unwrap();
    tree.set_vector("origin", [1.0, -2.0, 3.5]).unwrap();
    tree.set_string("label", "tank").unwrap();
    tree.select("scheme", "linear").unwrap();
    tree.select("mode", "b").unwrap();
    tree.set_int("mode/y", 9).unwrap();
    tree.get_array_mut("numbers").unwrap().resize(5);
    tree.set_double("numbers/4", 4.5).unwrap();
    tree.get_matrix_mut("transform").unwrap().set(1, 0, 2.0);
    *tree.get_double_range_mut("times").unwrap() = DoubleRange::new([4.0, 5.0, 6.0, 7.0]);
    tree.save_to_file(&file, Some("Case")).unwrap();

    let mut reloaded = defaults();
    let schema = reloaded.read_from_file(&file).unwrap();

    assert_eq!(schema.as_deref(), Some("Case"));
    assert_eq!(reloaded, tree);
}

#[test]
fn non_finite_doubles_survive_reload() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("case.json");

    let mut tree = defaults();
    tree.set_double("ratio", f64::INFINITY).unwrap();
    tree.set_vector("origin", [f64::NEG_INFINITY, 1.0, f64::NAN]).unwrap();
    tree.get_matrix_mut("transform").unwrap().set(0, 1, f64::NAN);
    tree.get_double_range_mut("times").unwrap().insert(f64::INFINITY);
    tree.save_to_file(&file, None).unwrap();

    let saved = fs::read_to_string(&file).unwrap();
    assert!(saved.contains(r#""value": "inf""#));
    assert!(!saved.contains("null"));

    let mut reloaded = defaults();
    reloaded.read_from_file(&file).unwrap();

    assert_eq!(reloaded.get_double("ratio").unwrap(), f64::INFINITY);
    let [x, y, z] = reloaded.get_vector("origin").unwrap();
    assert_eq!((x, y), (f64::NEG_INFINITY, 1.0));
    assert!(z.is_nan());
    assert!(reloaded.get_matrix("transform").unwrap().get(0, 1).unwrap().is_nan());
    assert_eq!(reloaded.get_double_range("times").unwrap().values(), &[f64::INFINITY]);
}

#[test]
fn oversized_matrix_is_invalid() {
    let mut tree = defaults();
    let source = r#"{ "root": { "type": "subset", "children": [
        { "name": "transform", "type": "matrix",
          "rows": 4294967296, "cols": 4294967296, "values": [] } ] } }"#;

    let err = tree.read_from_reader(source.as_bytes(), None).unwrap_err();

    assert!(matches!(
        err,
        TreeError::InvalidAttribute { path, attribute: "rows", .. } if path == "transform"
    ));
    assert_eq!(tree.get_matrix("transform").unwrap(), &Matrix::zeros(2, 2));
}

#[test]
fn absent_nodes_keep_defaults() {
    let mut tree = defaults();
    let source = indoc! {r#"
        { "root": { "type": "subset", "children": [
            { "name": "ratio", "type": "double", "value": 0.25 },
            { "name": "unknown", "type": "int", "value": 3 }
        ] } }
    "#};

    let schema = tree.read_from_reader(source.as_bytes(), None).unwrap();

    assert_eq!(schema, None);
    assert_eq!(tree.get_double("ratio").unwrap(), 0.25);
    assert_eq!(tree.get_string("label").unwrap(), "none");
    assert!(!tree.contains("unknown"));
}

#[test]
fn missing_attribute_reports_node_path() {
    let mut tree = defaults();
    let source = indoc! {r#"
        { "root": { "type": "subset", "children": [
            { "name": "mode", "type": "selectableSubset", "value": "a", "children": [
                { "name": "x", "type": "int" }
            ] }
        ] } }
    "#};

    let err = tree.read_from_reader(source.as_bytes(), None).unwrap_err();

    insta::assert_snapshot!(err, @"node `mode/x` is missing attribute `value`");
}

#[test]
fn mismatched_type_tag_is_invalid() {
    let mut tree = defaults();
    let source = r#"{ "root": { "type": "subset", "children": [
        { "name": "flag", "type": "int", "value": 1 } ] } }"#;

    let err = tree.read_from_reader(source.as_bytes(), None).unwrap_err();

    insta::assert_snapshot!(err, @"node `flag` has an invalid `type` attribute: expected `bool`, found `int`");
}

#[test]
fn unknown_selection_key_reports_path() {
    let mut tree = defaults();
    let source = r#"{ "root": { "type": "subset", "children": [
        { "name": "scheme", "type": "selection", "value": "cubic" } ] } }"#;

    let err = tree.read_from_reader(source.as_bytes(), None).unwrap_err();

    insta::assert_snapshot!(err, @"`cubic` is not a valid selection for `scheme` (one of: upwind, linear)");
}

#[test]
fn relative_paths_resolve_against_document_dir() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("case.json");
    fs::write(
        &file,
        r#"{ "root": { "type": "subset", "children": [
            { "name": "input", "type": "path", "value": "geometry/part.stl" } ] } }"#,
    )
    .unwrap();

    let mut tree = defaults();
    tree.read_from_file(&file).unwrap();

    assert_eq!(
        tree.get_path("input").unwrap().path(),
        dir.path().join("geometry/part.stl")
    );
}

#[test]
fn relative_path_survives_saving_into_another_directory() {
    let cwd = std::env::current_dir().unwrap();
    let inputs = tempfile::tempdir_in(&cwd).unwrap();
    fs::write(inputs.path().join("part.stl"), "solid part").unwrap();
    let relative = inputs.path().strip_prefix(&cwd).unwrap().join("part.stl");
    assert!(relative.is_relative());

    let out = tempfile::tempdir().unwrap();
    let file = out.path().join("case.json");
    let mut tree = defaults();
    tree.set_path("input", &relative).unwrap();
    tree.save_to_file(&file, None).unwrap();

    let mut reloaded = defaults();
    reloaded.read_from_file(&file).unwrap();
    reloaded.remove_packed_data();

    let loaded = reloaded.get_path("input").unwrap();
    assert!(loaded.path().is_absolute());
    assert!(!loaded.is_packed());
    assert_eq!(fs::read_to_string(loaded.path()).unwrap(), "solid part");
}

#[test]
fn packed_files_survive_reload_and_unpack() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("part.stl");
    fs::write(&input, "solid part").unwrap();
    let file = dir.path().join("case.json");

    let mut tree = defaults();
    tree.set_path("input", &input).unwrap();
    tree.pack_external_files().unwrap();
    tree.save_to_file(&file, None).unwrap();

    let mut reloaded = defaults();
    reloaded.read_from_file(&file).unwrap();
    assert!(reloaded.get_path("input").unwrap().is_packed());

    reloaded.remove_packed_data();
    let path = reloaded.get_path("input").unwrap();
    assert_eq!(path.path(), input);
    assert!(!path.is_packed());
    assert!(!reloaded.has_packed_data());

    reloaded.save_to_file(&file, None).unwrap();
    let saved = fs::read_to_string(&file).unwrap();
    assert!(!saved.contains("content"));
    assert!(saved.contains(r#""value": "part.stl""#));
}

#[test]
fn corrupt_embedded_content_is_rejected() {
    let mut tree = defaults();
    let source = r#"{ "root": { "type": "subset", "children": [
        { "name": "input", "type": "path", "value": "a.stl", "content": "***" } ] } }"#;

    let err = tree.read_from_reader(source.as_bytes(), None).unwrap_err();

    assert!(matches!(err, TreeError::EmbeddedContent { path, .. } if path == "input"));
}

#[test]
fn registry_picks_factory_by_schema_name() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("case.json");
    let mut tree = defaults();
    tree.set_string("label", "registry").unwrap();
    tree.save_to_file(&file, Some("Case")).unwrap();

    let mut registry = SchemaRegistry::new();
    registry.register("Case", defaults);

    assert_eq!(read_schema_name(&file).unwrap().as_deref(), Some("Case"));
    let (name, loaded) = registry.load(&file).unwrap();
    assert_eq!(name, "Case");
    assert_eq!(loaded.get_string("label").unwrap(), "registry");
}

#[test]
fn registry_rejects_unknown_schema() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("case.json");
    defaults().save_to_file(&file, Some("Other")).unwrap();

    let registry = SchemaRegistry::new();
    let err = registry.load(&file).unwrap_err();

    insta::assert_snapshot!(err, @"no schema registered as `Other`");
}
