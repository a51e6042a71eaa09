//! Independent sessions across threads.

use std::fs;
use std::sync::Arc;
use std::thread;

use flatcat_connector::{Connector, ConnectorConfig, TableDescriptor, TableMatcher};
use flatcat_io::memory::MemoryTransport;
use serde_json::json;

#[test]
fn test_parallel_cursors_each_own_a_session() {
    let root = MemoryTransport::new();
    let mut body = String::from("id,amount\n");
    for i in 0..500 {
        body.push_str(&format!("{i},{}.5\n", i * 2));
    }
    root.insert("sales", "orders.csv", body);
    let baseline = root.live_sessions();

    let descriptor = TableDescriptor::new("sales", TableMatcher::literal("orders.csv").unwrap())
        .with_header(true);
    let connector = Arc::new(
        Connector::with_factory(ConnectorConfig::default(), root.factory())
            .with_descriptors(vec![descriptor]),
    );
    let catalog = Arc::new(connector.catalog().unwrap());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let connector = Arc::clone(&connector);
            let catalog = Arc::clone(&catalog);
            thread::spawn(move || {
                let mut cursor = connector
                    .get_row_cursor_in(&catalog, "sales", "orders.csv", &["id"])
                    .unwrap();
                let mut sum = 0i64;
                while cursor.advance().unwrap() {
                    sum += cursor.get_integer(0).unwrap();
                }
                sum
            })
        })
        .collect();

    for h in handles {
        assert_eq!(h.join().unwrap(), (0..500).sum::<i64>());
    }
    assert_eq!(root.live_sessions(), baseline);
    assert_eq!(root.sessions_opened(), baseline + 9);
}

#[test]
fn test_cursor_can_move_to_a_worker() {
    let tmp = tempfile::tempdir().unwrap();
    let data = tmp.path().join("data");
    let descriptors = tmp.path().join("descriptors");
    fs::create_dir_all(data.join("hr")).unwrap();
    fs::create_dir_all(&descriptors).unwrap();
    fs::write(data.join("hr/staff.tsv"), "ann\ttrue\nbob\tfalse\n").unwrap();

    let doc = json!({
        "schemaName": "hr",
        "tableName": "staff.tsv",
        "delimiter": "\t",
        "columns": [
            {"name": "name", "type": "varchar"},
            {"name": "active", "type": "boolean"}
        ]
    });
    fs::write(
        descriptors.join("staff.json"),
        serde_json::to_vec_pretty(&doc).unwrap(),
    )
    .unwrap();

    let mut cfg = ConnectorConfig::local(data.to_str().unwrap());
    cfg.table_description_dir = Some(descriptors.to_str().unwrap().to_string());
    let connector = Connector::new(cfg).unwrap();
    let mut cursor = connector.get_row_cursor("hr", "staff.tsv", &[]).unwrap();

    let active = thread::spawn(move || {
        let mut names = Vec::new();
        while cursor.advance().unwrap() {
            if cursor.get_boolean(1).unwrap() {
                names.push(cursor.get_text(0).unwrap().to_string());
            }
        }
        names
    })
    .join()
    .unwrap();
    assert_eq!(active, vec!["ann"]);
}
