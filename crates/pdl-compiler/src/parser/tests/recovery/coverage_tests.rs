use crate::{Compilation, Error};

fn nested_sets(depth: usize) -> String {
    let mut input = String::new();
    for _ in 0..depth {
        input.push_str("a = set { ");
    }
    input.push_str("x = int 1 ");
    for _ in 0..depth {
        input.push('}');
    }
    input
}

#[test]
fn deeply_nested_sets_hit_recursion_limit() {
    let depth = 128;
    let input = nested_sets(depth);

    let result = Compilation::builder(&input)
        .with_recursion_fuel(Some(depth as u32))
        .compile();

    assert!(
        matches!(result, Err(Error::RecursionLimitExceeded)),
        "expected RecursionLimitExceeded error, got {:?}",
        result
    );
}

#[test]
fn nesting_within_limit_is_fine() {
    let depth = 16;
    let input = nested_sets(depth);

    let compilation = Compilation::builder(&input)
        .with_recursion_fuel(Some(depth as u32 + 1))
        .compile()
        .unwrap();

    assert!(compilation.is_valid(), "{}", compilation.dump_diagnostics());
}

#[test]
fn default_recursion_limit_applies() {
    let input = nested_sets(300);

    let result = Compilation::new(&input);

    assert!(matches!(result, Err(Error::RecursionLimitExceeded)));
}

#[test]
fn recursion_limit_can_be_disabled() {
    let input = nested_sets(300);

    let result = Compilation::builder(&input)
        .with_recursion_fuel(None)
        .compile();

    assert!(result.is_ok());
}

#[test]
fn deeply_nested_alternatives_hit_recursion_limit() {
    let depth = 64;
    let mut input = String::new();
    for _ in 0..depth {
        input.push_str("m = selectablesubset {{ a set { ");
    }
    for _ in 0..depth {
        input.push_str("}}} a ");
    }

    let result = Compilation::builder(&input)
        .with_recursion_fuel(Some(depth as u32))
        .compile();

    assert!(
        matches!(result, Err(Error::RecursionLimitExceeded)),
        "expected RecursionLimitExceeded error, got {:?}",
        result
    );
}

#[test]
fn many_entries_exhaust_exec_fuel() {
    let mut input = String::new();
    for i in 0..500 {
        input.push_str(&format!("p{i} = int {i}\n"));
    }

    let result = Compilation::builder(&input)
        .with_exec_fuel(Some(100))
        .compile();

    assert!(
        matches!(result, Err(Error::ExecFuelExhausted)),
        "expected ExecFuelExhausted error, got {:?}",
        result
    );
}

#[test]
fn exec_fuel_can_be_disabled() {
    let mut input = String::new();
    for i in 0..500 {
        input.push_str(&format!("p{i} = int {i}\n"));
    }

    let compilation = Compilation::builder(&input)
        .with_exec_fuel(None)
        .compile()
        .unwrap();

    assert_eq!(compilation.schema().entries.len(), 500);
}

#[test]
fn garbage_only_source() {
    let compilation = Compilation::expect("@@@ $$$");

    assert!(!compilation.is_valid());
    assert_eq!(compilation.diagnostics().len(), 1);
    assert!(compilation.schema().entries.is_empty());
}
