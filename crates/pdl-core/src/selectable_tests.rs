use crate::{Parameter, ParameterSet, SelectableSubset, TreeError};

fn mode() -> SelectableSubset {
    let mut a = ParameterSet::new();
    a.insert("x", Parameter::int(1, ""));
    let mut b = ParameterSet::new();
    b.insert("y", Parameter::int(2, ""));
    SelectableSubset::new([("a", a), ("b", b)], 0)
}

fn tree() -> ParameterSet {
    let mut tree = ParameterSet::new();
    tree.insert("mode", Parameter::selectable_subset(mode(), ""));
    tree
}

#[test]
fn defaults_to_given_alternative() {
    let tree = tree();

    assert_eq!(tree.get_selectable_subset("mode").unwrap().selected(), "a");
    assert_eq!(tree.get_int("mode/x").unwrap(), 1);
}

#[test]
fn switching_discards_edits() {
    let mut tree = tree();
    tree.set_int("mode/x", 42).unwrap();

    tree.select("mode", "b").unwrap();
    assert_eq!(tree.get_int("mode/y").unwrap(), 2);
    assert!(matches!(
        tree.get_int("mode/x"),
        Err(TreeError::NotFound { .. })
    ));

    tree.select("mode", "a").unwrap();
    assert_eq!(tree.get_int("mode/x").unwrap(), 1);
}

#[test]
fn unknown_alternative_leaves_state_unchanged() {
    let mut tree = tree();
    tree.set_int("mode/x", 42).unwrap();
    let before = tree.clone();

    let err = tree.select("mode", "c").unwrap_err();

    insta::assert_snapshot!(err, @"`c` is not a valid selection for `mode` (one of: a, b)");
    assert_eq!(tree, before);
}

#[test]
fn alternatives_keep_their_defaults() {
    let mut sel = mode();
    sel.active_mut().set_int("x", 7).unwrap();

    assert_eq!(sel.alternative("a").unwrap().get_int("x").unwrap(), 1);
    assert_eq!(sel.keys().collect::<Vec<_>>(), ["a", "b"]);
}
