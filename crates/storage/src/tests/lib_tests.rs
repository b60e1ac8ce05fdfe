use super::*;

fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|cell| cell.to_string()).collect()
}

fn seeded_store() -> MemorySheetStore {
    MemorySheetStore::new(vec![
        row(&["Name", "Allowed", "Reserved", "Guests", "Phone", "Message"]),
        row(&["Jane Doe", "4", "", "", "", ""]),
        row(&["John Roe", "2", "Yes", "2", "555-0000", ""]),
    ])
}

fn cells() -> ResponseCells {
    ResponseCells {
        reserved: "Yes".into(),
        guest_count: "3".into(),
        phone_number: "555-1234".into(),
        message: "Can't wait!".into(),
    }
}

#[tokio::test]
async fn key_column_lists_every_row_including_header() {
    let store = seeded_store();
    let keys = store.read_key_column().await.expect("keys");
    assert_eq!(keys, vec!["Name", "Jane Doe", "John Roe"]);
}

#[tokio::test]
async fn empty_store_reads_no_keys() {
    let store = MemorySheetStore::empty();
    assert!(store.read_key_column().await.expect("keys").is_empty());
}

#[tokio::test]
async fn write_fills_response_columns_and_acks_range() {
    let store = seeded_store();
    let ack = store
        .write_response_cells(2, cells())
        .await
        .expect("write");

    assert_eq!(ack.updated_range, "Sheet1!C2:G2");
    assert_eq!(ack.updated_cells, 4);

    let rows = store.rows().await;
    assert_eq!(
        rows[1],
        row(&["Jane Doe", "4", "Yes", "3", "555-1234", "Can't wait!"])
    );
    assert_eq!(store.writes().await.len(), 1);
}

#[tokio::test]
async fn repeated_write_leaves_same_final_row() {
    let store = seeded_store();
    store.write_response_cells(2, cells()).await.expect("write");
    let once = store.rows().await;
    store.write_response_cells(2, cells()).await.expect("write");
    assert_eq!(store.rows().await, once);
}

#[tokio::test]
async fn write_outside_sheet_fails() {
    let store = seeded_store();
    assert!(store.write_response_cells(0, cells()).await.is_err());
    assert!(store.write_response_cells(9, cells()).await.is_err());
    assert!(store.writes().await.is_empty());
}

#[tokio::test]
async fn failing_store_errors_on_every_access() {
    let store = MemorySheetStore::failing("auth expired");
    let err = store.read_key_column().await.expect_err("read should fail");
    assert!(err.to_string().contains("auth expired"));
    assert!(store.write_response_cells(1, cells()).await.is_err());
}

#[tokio::test]
async fn write_pads_short_rows_before_updating() {
    let store = MemorySheetStore::new(vec![row(&["Jane Doe"])]);
    store.write_response_cells(1, cells()).await.expect("write");
    let rows = store.rows().await;
    assert_eq!(rows[0].len(), 6);
    assert_eq!(rows[0][2], "Yes");
    assert_eq!(rows[0][5], "Can't wait!");
}
