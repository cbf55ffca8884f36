//! Projection of records onto the column order.

use super::labels::LabelTable;
use super::payload::Record;
use crate::ooxml::xlsx::CellValue;
use serde_json::Value;

/// Convert a JSON value into a cell.
///
/// `null` and absent fields become empty cells. Numbers outside the 64-bit
/// integer range and non-integers keep their source text. Nested arrays and
/// objects are kept as compact JSON text.
pub fn cell_value(value: Option<&Value>) -> CellValue {
    match value {
        None | Some(Value::Null) => CellValue::Empty,
        Some(Value::Bool(b)) => CellValue::Bool(*b),
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                CellValue::Int(i)
            } else if let Some(u) = n.as_u64() {
                CellValue::UInt(u)
            } else {
                CellValue::Number(n.to_string())
            }
        },
        Some(Value::String(s)) => CellValue::String(s.clone()),
        Some(nested @ (Value::Array(_) | Value::Object(_))) => {
            CellValue::String(nested.to_string())
        },
    }
}

/// One cell per field, in field order.
pub fn project_record(record: &Record, fields: &[String]) -> Vec<CellValue> {
    fields
        .iter()
        .map(|field| cell_value(record.get(field)))
        .collect()
}

/// The two header rows: field names, then their labels.
pub fn header_rows(fields: &[String], labels: &LabelTable) -> [Vec<CellValue>; 2] {
    [
        fields.iter().map(|f| CellValue::from(f.as_str())).collect(),
        fields
            .iter()
            .map(|f| CellValue::from(labels.label(f)))
            .collect(),
    ]
}

/// Full grid: both header rows followed by one row per record.
pub fn project_rows(
    records: &[Record],
    fields: &[String],
    labels: &LabelTable,
) -> Vec<Vec<CellValue>> {
    let mut rows = Vec::with_capacity(records.len() + 2);
    rows.extend(header_rows(fields, labels));
    rows.extend(records.iter().map(|record| project_record(record, fields)));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_cell_value_conversion() {
        assert_eq!(cell_value(None), CellValue::Empty);
        assert_eq!(cell_value(Some(&json!(null))), CellValue::Empty);
        assert_eq!(cell_value(Some(&json!(5))), CellValue::Int(5));
        assert_eq!(cell_value(Some(&json!(-5))), CellValue::Int(-5));
        assert_eq!(
            cell_value(Some(&json!(u64::MAX))),
            CellValue::UInt(u64::MAX)
        );
        assert_eq!(
            cell_value(Some(&json!(2.5))),
            CellValue::Number("2.5".to_string())
        );
        assert_eq!(cell_value(Some(&json!(false))), CellValue::Bool(false));
        assert_eq!(
            cell_value(Some(&json!({"a": [1, 2]}))),
            CellValue::String(r#"{"a":[1,2]}"#.to_string())
        );
    }

    #[test]
    fn test_numbers_keep_source_text() {
        let record: Record = serde_json::from_str(
            r#"{"big": 100000000000000000000, "huge": 1e21, "tiny": 1.5e-7, "one": 1.0}"#,
        )
        .unwrap();
        let row = project_record(&record, &fields(&["big", "huge", "tiny", "one"]));
        let texts: Vec<_> = row.iter().map(|cell| cell.to_text().unwrap()).collect();
        assert_eq!(texts, ["100000000000000000000", "1e21", "1.5e-7", "1.0"]);
    }

    #[test]
    fn test_missing_fields_are_empty() {
        let record = json!({"b": "x", "extra": 1}).as_object().cloned().unwrap();
        let row = project_record(&record, &fields(&["a", "b", "keyEvent"]));
        assert_eq!(
            row,
            vec![CellValue::Empty, CellValue::from("x"), CellValue::Empty]
        );
    }

    #[test]
    fn test_project_rows() {
        let records = vec![
            json!({"timeMinute": "00:00", "likeCnt": 3}).as_object().cloned().unwrap(),
        ];
        let fields = fields(&["timeMinute", "likeCnt", "custom"]);
        let rows = project_rows(&records, &fields, &LabelTable::analytics());

        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows[0],
            vec![
                CellValue::from("timeMinute"),
                CellValue::from("likeCnt"),
                CellValue::from("custom")
            ]
        );
        assert_eq!(
            rows[1],
            vec![
                CellValue::from("时刻"),
                CellValue::from("点赞数"),
                CellValue::from("custom")
            ]
        );
        assert_eq!(
            rows[2],
            vec![CellValue::from("00:00"), CellValue::Int(3), CellValue::Empty]
        );
    }
}
