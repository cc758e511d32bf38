//! materialize_all against the sled backend

#![cfg(feature = "sled-backend")]

#[path = "testutils/mod.rs"]
mod testutils;

use scanall::storage::{SledStore, StoreConfig};
use scanall::{collect_all, materialize_all, params, Error, Select, Value};
use testutils::records::Label;

fn open_temp_store() -> SledStore {
    SledStore::open(StoreConfig::temporary()).expect("open temporary store")
}

#[test]
fn test_materialize_from_sled_table() {
    testutils::init_logging();
    let store = open_temp_store();
    let table = store.table("labels").expect("table");
    table
        .insert_all(vec![
            params![1, "bug", "open"],
            params![2, "feature", "closed"],
            params![3, "docs", "open"],
        ])
        .expect("insert");

    let stmt = table.prepare(Select::all().columns([0, 1]).filter_eq(2));
    let mut labels: Vec<Label> = Vec::new();
    materialize_all(&stmt, &mut labels, &params!["open"]).expect("materialize");

    assert_eq!(labels, vec![Label::new(1, "bug"), Label::new(3, "docs")]);
}

#[test]
fn test_rows_survive_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = StoreConfig {
        flush_every_ms: None,
        ..StoreConfig::new(dir.path().join("labels.db"))
    };

    {
        let store = SledStore::open(config.clone()).expect("open");
        let table = store.table("labels").expect("table");
        table.insert(&params![10, "persisted"]).expect("insert");
        store.flush().expect("flush");
    }

    let store = SledStore::open(config).expect("reopen");
    let table = store.table("labels").expect("table");
    let labels: Vec<Label> = collect_all(&table.prepare(Select::all()), &[]).expect("collect");

    assert_eq!(labels, vec![Label::new(10, "persisted")]);
}

#[test]
fn test_corrupt_row_is_a_terminal_error() {
    let store = open_temp_store();
    let table = store.table("labels").expect("table");
    table.insert(&params![1, "first"]).expect("insert");
    table.insert(&params![2, "second"]).expect("insert");

    // sorts after every generated id; claims five values but holds one byte
    store
        .db()
        .open_tree("labels")
        .expect("tree")
        .insert(u64::MAX.to_be_bytes(), vec![5u8, 0, 0, 0, 0, 0, 0, 0, 9])
        .expect("raw insert");

    let mut labels: Vec<Label> = Vec::new();
    let err = materialize_all(&table.prepare(Select::all()), &mut labels, &[]).unwrap_err();

    match err {
        Error::Terminal(message) => assert!(message.contains("corrupt row"), "{}", message),
        other => panic!("expected terminal error, got {:?}", other),
    }
    assert_eq!(labels, vec![Label::new(1, "first"), Label::new(2, "second")]);
}

#[test]
fn test_scan_error_on_type_mismatch() {
    let store = open_temp_store();
    let table = store.table("labels").expect("table");
    table.insert(&params![1, "ok"]).expect("insert");
    table
        .insert(&[Value::Integer(2), Value::Bytes(vec![0xff])])
        .expect("insert");
    table.insert(&params![3, "unreached"]).expect("insert");

    let mut labels: Vec<Label> = Vec::new();
    let err = materialize_all(&table.prepare(Select::all()), &mut labels, &[]).unwrap_err();

    assert!(err.is_scan(), "got {:?}", err);
    assert_eq!(labels.len(), 2);
    assert_eq!(labels[0], Label::new(1, "ok"));
    assert_eq!(labels[1].id, 2, "columns before the failing one are written");
}

#[test]
fn test_wrong_argument_count() {
    let store = open_temp_store();
    let table = store.table("labels").expect("table");
    let stmt = table.prepare(Select::all().filter_eq(0).filter_eq(1));

    let err = collect_all::<Label, _>(&stmt, &params![1]).unwrap_err();
    assert!(matches!(err, Error::Execution(_)));
}

#[test]
fn test_config_from_json_opens_store() {
    let dir = tempfile::tempdir().expect("tempdir");
    let json = format!(
        r#"{{"path": {:?}, "cache_capacity_bytes": 1048576}}"#,
        dir.path().join("json.db")
    );

    let config = StoreConfig::from_json(&json).expect("config");
    let store = SledStore::open(config).expect("open");
    assert_eq!(store.config().cache_capacity_bytes, 1_048_576);
}
