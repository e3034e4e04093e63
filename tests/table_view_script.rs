mod common;

use finance_tracker::ledger::{Store, Transaction};
use predicates::str::contains;

fn stdout_of(env: &common::TestEnv, input: &str) -> String {
    let output = env
        .script_command()
        .write_stdin(input.to_string())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    String::from_utf8(output).expect("utf8 stdout")
}

fn seeded_env() -> common::TestEnv {
    let env = common::setup_test_env();
    let mut store = Store::new();
    store.add("Food", Transaction::new(300, "2024-01-01")).unwrap();
    store.add("Food", Transaction::new(50, "2024-02-01")).unwrap();
    store
        .add("Transport", Transaction::new(20, "2024-03-01"))
        .unwrap();
    env.seed(&store);
    env
}

#[test]
fn sorting_by_amount_ascending_orders_rows() {
    let env = seeded_env();
    let stdout = stdout_of(&env, "7\nsort amount\nyes\nclose\n8\n");

    let sorted = &stdout[stdout.find("Amount (asc)").expect("sorted header")..];
    let small = sorted.find("2024-03-01").expect("20 row");
    let middle = sorted.find("2024-02-01").expect("50 row");
    let large = sorted.find("2024-01-01").expect("300 row");
    assert!(small < middle && middle < large, "unexpected order:\n{sorted}");
}

#[test]
fn sorting_descending_on_no_answer() {
    let env = seeded_env();
    let stdout = stdout_of(&env, "7\nsort amount\nno\nclose\n8\n");

    let sorted = &stdout[stdout.find("Amount (desc)").expect("sorted header")..];
    let large = sorted.find("2024-01-01").expect("300 row");
    let small = sorted.find("2024-03-01").expect("20 row");
    assert!(large < small, "unexpected order:\n{sorted}");
}

#[test]
fn search_filters_and_reset_restores() {
    let env = seeded_env();
    let stdout = stdout_of(&env, "7\nsearch foo\nreset\nclose\n8\n");

    let filtered_start = stdout.find("Search: Foo").expect("search applied");
    let before_search = &stdout[..filtered_start];
    let last_table = before_search.rfind("Category").expect("table header");
    let filtered = &before_search[last_table..];
    assert!(filtered.contains("Food"));
    assert!(!filtered.contains("Transport"));

    let after = &stdout[filtered_start..];
    assert!(after.contains("Transport"), "reset should restore every row");
}

#[test]
fn unknown_table_command_is_reported() {
    let env = seeded_env();
    env.script_command()
        .write_stdin("7\nfly away\nclose\n8\n")
        .assert()
        .success()
        .stdout(contains("Unknown table command `fly`"));
}
