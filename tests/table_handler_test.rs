mod common;

use common::{inventory_records, record};
use serde_json::{Value, json};
use std::io::Cursor;
use xfilios::{ExcelHandler, TableHandler, TableHandlerError};

fn mapping(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(old, new)| (old.to_string(), new.to_string()))
        .collect()
}

#[cfg(test)]
mod from_records_tests {
    use super::*;

    #[test]
    fn test_from_records_without_headers() {
        let handler = TableHandler::from_records(&inventory_records(), None, "inventory").unwrap();
        assert_eq!(handler.label(), "inventory");
        assert_eq!(handler.schema(), ["qty", "id", "desc"]);
        assert_eq!(handler.len(), 3);
        assert_eq!(handler.records(), inventory_records());
    }

    #[test]
    fn test_from_records_renames_and_selects() {
        let headers = mapping(&[("desc", "Description"), ("qty", "Quantity")]);
        let handler =
            TableHandler::from_records(&inventory_records(), Some(&headers), "inventory").unwrap();

        assert_eq!(handler.schema(), ["Description", "Quantity"]);
        assert_eq!(
            handler.records()[1],
            record(json!({"Description": "Eggs", "Quantity": 7}))
        );
    }

    #[test]
    fn test_from_records_empty_mapping_is_ignored() {
        let handler = TableHandler::from_records(&inventory_records(), Some(&[]), "t").unwrap();
        assert_eq!(handler.schema(), ["qty", "id", "desc"]);
    }

    #[test]
    fn test_from_records_unknown_column_fails() {
        let headers = mapping(&[("price", "Price")]);
        let err = TableHandler::from_records(&inventory_records(), Some(&headers), "t").unwrap_err();
        assert!(matches!(err, TableHandlerError::MissingColumn(name) if name == "Price"));
    }

    #[test]
    fn test_from_records_fills_missing_keys() {
        let records = vec![record(json!({"a": 1})), record(json!({"b": "x"}))];
        let handler = TableHandler::from_records(&records, None, "sparse").unwrap();
        assert_eq!(handler.schema(), ["a", "b"]);
        assert_eq!(handler.data().rows()[0], vec![json!(1), Value::Null]);
    }
}

#[cfg(test)]
mod from_list_tests {
    use super::*;

    fn rows() -> Vec<Vec<Value>> {
        vec![
            vec![json!(3), json!("101"), json!("Spam")],
            vec![json!(7), json!("422"), json!("Eggs")],
        ]
    }

    #[test]
    fn test_from_list_with_headers() {
        let headers = vec!["Qty".to_string(), "Id".to_string(), "Desc".to_string()];
        let handler = TableHandler::from_list(rows(), Some(headers), "orders").unwrap();
        assert_eq!(handler.schema(), ["Qty", "Id", "Desc"]);
        assert_eq!(handler.records()[0]["Id"], "101");
    }

    #[test]
    fn test_from_list_default_headers() {
        let handler = TableHandler::from_list(rows(), None, "orders").unwrap();
        assert_eq!(handler.schema(), ["0", "1", "2"]);
    }

    #[test]
    fn test_from_list_header_mismatch() {
        let headers = vec!["Qty".to_string()];
        let err = TableHandler::from_list(rows(), Some(headers), "orders").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Length of col_headers does not match with the length of DataFrame columns"
        );
    }

    #[test]
    fn test_str() {
        let handler = TableHandler::from_list(rows(), None, "orders").unwrap();
        assert_eq!(
            handler.to_string(),
            "TableHandler(df=((2, 3)), ['0', '1', '2'], orders)"
        );
    }
}

#[cfg(test)]
mod workbook_tests {
    use super::*;

    fn workbook_bytes() -> Vec<u8> {
        let table = TableHandler::from_records(&inventory_records(), None, "Inventory").unwrap();
        ExcelHandler::new(vec![table]).to_bytes().unwrap()
    }

    #[test]
    fn test_from_bytes_reads_first_sheet() {
        let handler = TableHandler::from_bytes(workbook_bytes()).unwrap();
        assert_eq!(handler.label(), "Inventory");
        assert_eq!(handler.schema(), ["qty", "id", "desc"]);
        assert_eq!(handler.records(), inventory_records());
    }

    #[test]
    fn test_from_reader() {
        let handler = TableHandler::from_reader(Cursor::new(workbook_bytes())).unwrap();
        assert_eq!(handler.len(), 3);
    }

    #[test]
    fn test_mixed_values_survive_workbook() {
        let rows = vec![
            vec![json!(2.5), json!(true), json!("plain text")],
            vec![json!(-4), Value::Null, json!("<tag> & \"quotes\"")],
        ];
        let headers = vec!["f".to_string(), "b".to_string(), "s".to_string()];
        let table = TableHandler::from_list(rows, Some(headers), "Mixed").unwrap();
        let bytes = ExcelHandler::new(vec![table.clone()]).to_bytes().unwrap();

        let reloaded = TableHandler::from_bytes(bytes).unwrap();
        assert_eq!(reloaded.data(), table.data());
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        assert!(TableHandler::from_bytes(b"definitely not xlsx".to_vec()).is_err());
    }

    #[tokio::test]
    async fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.xlsx");
        tokio::fs::write(&path, workbook_bytes()).await.unwrap();

        let handler = TableHandler::from_path(&path).await.unwrap();
        assert_eq!(handler.label(), "Inventory");
        assert_eq!(handler.len(), 3);
    }
}
