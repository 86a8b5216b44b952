//! Integration tests for the adapter: parameter binding, result rows,
//! error translation and nested transactions.

use records_store::db::scalar_integer;
use records_store::{Adapter, DatabaseTarget, ErrorCode, Value};

fn adapter() -> Adapter {
    let mut adapter = Adapter::new();
    adapter.connect(DatabaseTarget::memory()).unwrap();
    adapter
        .execute_update(
            "CREATE TABLE items (id TEXT PRIMARY KEY, qty INTEGER, price REAL, note TEXT, data BLOB)",
            &[],
        )
        .unwrap();
    adapter
}

fn ids(adapter: &mut Adapter) -> Vec<String> {
    adapter
        .execute_query("SELECT id FROM items ORDER BY id", &[])
        .unwrap()
        .iter()
        .map(|row| match row.get("id") {
            Some(Value::Text(id)) => id.clone(),
            other => panic!("unexpected id {:?}", other),
        })
        .collect()
}

#[test]
fn test_query_returns_typed_values() {
    let mut adapter = adapter();
    let affected = adapter
        .execute_update(
            "INSERT INTO items (id, qty, price, note, data) VALUES (?, ?, ?, ?, ?)",
            &[
                Value::from("A"),
                Value::from(7),
                Value::from(2.5),
                Value::Null,
                Value::from(vec![1u8, 2, 3]),
            ],
        )
        .unwrap();
    assert_eq!(affected, 1);

    let rows = adapter
        .execute_query("SELECT * FROM items WHERE id = ?", &[Value::from("A")])
        .unwrap();
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.get("qty"), Some(&Value::Integer(7)));
    assert_eq!(row.get("price"), Some(&Value::Real(2.5)));
    assert_eq!(row.get("note"), Some(&Value::Null));
    assert_eq!(row.get("data"), Some(&Value::Blob(vec![1, 2, 3])));
}

#[test]
fn test_empty_result_is_not_an_error() {
    let mut adapter = adapter();
    let rows = adapter
        .execute_query("SELECT * FROM items WHERE id = ?", &[Value::from("missing")])
        .unwrap();
    assert!(rows.is_empty());

    let affected = adapter
        .execute_update("UPDATE items SET qty = 1 WHERE id = ?", &[Value::from("NOPE")])
        .unwrap();
    assert_eq!(affected, 0);
}

#[test]
fn test_duplicate_key_is_already_exists() {
    let mut adapter = adapter();
    let insert = "INSERT INTO items (id) VALUES (?)";
    adapter.execute_update(insert, &[Value::from("A")]).unwrap();
    let err = adapter.execute_update(insert, &[Value::from("A")]).unwrap_err();
    assert_eq!(err.code(), ErrorCode::AlreadyExists);
}

#[test]
fn test_syntax_error_is_data_access_with_native_code() {
    let mut adapter = adapter();
    let err = adapter.execute_query("SELEC nothing", &[]).unwrap_err();
    assert_eq!(err.code(), ErrorCode::DataAccessError);
    assert!(err.native_code().is_some());
}

#[test]
fn test_nested_rollback_keeps_outer_work() {
    let mut adapter = adapter();
    let insert = "INSERT INTO items (id) VALUES (?)";

    adapter.begin_transaction().unwrap();
    adapter.execute_update(insert, &[Value::from("A")]).unwrap();

    adapter.begin_transaction().unwrap();
    adapter.execute_update(insert, &[Value::from("B")]).unwrap();
    adapter.rollback_transaction().unwrap();
    assert_eq!(adapter.transaction_depth(), 1);

    adapter.commit_transaction().unwrap();
    assert!(!adapter.is_in_transaction());
    assert_eq!(ids(&mut adapter), vec!["A".to_string()]);
}

#[test]
fn test_outer_rollback_discards_committed_inner_level() {
    let mut adapter = adapter();
    let insert = "INSERT INTO items (id) VALUES (?)";

    adapter.begin_transaction().unwrap();
    adapter.begin_transaction().unwrap();
    adapter.execute_update(insert, &[Value::from("A")]).unwrap();
    adapter.commit_transaction().unwrap();
    adapter.rollback_transaction().unwrap();

    assert!(ids(&mut adapter).is_empty());
}

#[test]
fn test_three_levels_of_nesting() {
    let mut adapter = adapter();
    let insert = "INSERT INTO items (id) VALUES (?)";

    for (level, id) in ["A", "B", "C"].into_iter().enumerate() {
        adapter.begin_transaction().unwrap();
        assert_eq!(adapter.transaction_depth(), level + 1);
        adapter.execute_update(insert, &[Value::from(id)]).unwrap();
    }
    adapter.rollback_transaction().unwrap();
    adapter.commit_transaction().unwrap();
    adapter.commit_transaction().unwrap();

    assert_eq!(ids(&mut adapter), vec!["A".to_string(), "B".to_string()]);
}

#[test]
fn test_transaction_helper_commits() {
    let mut adapter = adapter();
    let insert = "INSERT INTO items (id, qty) VALUES (?, ?)";
    let total = adapter
        .transaction(|db| {
            db.execute_update(insert, &[Value::from("A"), Value::from(2)])?;
            db.execute_update(insert, &[Value::from("B"), Value::from(3)])?;
            let rows = db.execute_query("SELECT SUM(qty) AS total FROM items", &[])?;
            scalar_integer(&rows, "total")
        })
        .unwrap();
    assert_eq!(total, 5);
    assert_eq!(adapter.transaction_depth(), 0);
    assert_eq!(ids(&mut adapter).len(), 2);
}

#[test]
fn test_failed_statement_inside_helper_rolls_back_everything() {
    let mut adapter = adapter();
    let insert = "INSERT INTO items (id) VALUES (?)";
    let err = adapter
        .transaction(|db| {
            db.execute_update(insert, &[Value::from("A")])?;
            db.execute_update(insert, &[Value::from("A")])
        })
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::AlreadyExists);
    assert!(ids(&mut adapter).is_empty());
}
