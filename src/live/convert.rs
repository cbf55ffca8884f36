//! End-to-end conversion of an analytics payload into a workbook file.

use super::fields::order_fields;
use super::labels::LabelTable;
use super::payload::{Record, load_series};
use super::rows::project_rows;
use crate::common::{Error, Result};
use crate::ooxml::common::{AppProperties, DocumentProperties};
use crate::ooxml::xlsx::{MutableWorksheet, WorkbookWriter};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Package extension of the written file.
pub const OUTPUT_EXTENSION: &str = "xlsx";

const DEFAULT_SHEET_NAME: &str = "data";
const DEFAULT_AUTHOR: &str = "json_to_xlsx";

/// Longest worksheet name Excel accepts, in characters.
pub const SHEET_NAME_MAX_CHARS: usize = 31;
const SHEET_NAME_ILLEGAL: [char; 7] = ['*', ':', '?', '/', '\\', '[', ']'];

/// Check a worksheet name against Excel's naming rules.
///
/// Names must be 1 to 31 characters, must not contain `* : ? / \ [ ]` and
/// must not start or end with an apostrophe.
pub fn validate_sheet_name(name: &str) -> Result<()> {
    let reject = |reason: &str| -> Result<()> {
        Err(Error::InvalidOption(format!(
            "sheet name {:?} {}",
            name, reason
        )))
    };
    if name.is_empty() {
        return reject("is empty");
    }
    if name.chars().count() > SHEET_NAME_MAX_CHARS {
        return reject("is longer than 31 characters");
    }
    if let Some(c) = name.chars().find(|c| SHEET_NAME_ILLEGAL.contains(c)) {
        return reject(&format!("contains {:?}", c));
    }
    if name.starts_with('\'') || name.ends_with('\'') {
        return reject("starts or ends with an apostrophe");
    }
    Ok(())
}

/// Options controlling a conversion run.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    sheet_name: String,
    creator: String,
    application: String,
    labels: LabelTable,
    timestamp: Option<DateTime<Utc>>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            creator: DEFAULT_AUTHOR.to_string(),
            application: DEFAULT_AUTHOR.to_string(),
            labels: LabelTable::analytics(),
            timestamp: None,
        }
    }
}

impl ConvertOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the single worksheet.
    ///
    /// Fails with [`Error::InvalidOption`] if Excel would refuse the name.
    pub fn sheet_name(mut self, name: &str) -> Result<Self> {
        validate_sheet_name(name)?;
        self.sheet_name = name.to_string();
        Ok(self)
    }

    /// Author recorded as both creator and last modifier.
    pub fn creator(mut self, creator: &str) -> Self {
        self.creator = creator.to_string();
        self
    }

    /// Application name recorded in `docProps/app.xml`.
    pub fn application(mut self, application: &str) -> Self {
        self.application = application.to_string();
        self
    }

    pub fn labels(mut self, labels: LabelTable) -> Self {
        self.labels = labels;
        self
    }

    /// Fix the document timestamp instead of using the current time.
    pub fn timestamp(mut self, at: DateTime<Utc>) -> Self {
        self.timestamp = Some(at);
        self
    }
}

/// Build the workbook for a set of records.
pub fn build_workbook(records: &[Record], options: &ConvertOptions) -> WorkbookWriter {
    let fields = order_fields(records);
    debug!(columns = fields.len(), records = records.len(), "ordered fields");

    let mut sheet = MutableWorksheet::new(options.sheet_name.clone(), 1);
    for row in project_rows(records, &fields, &options.labels) {
        sheet.push_row(row);
    }

    let now = options.timestamp.unwrap_or_else(Utc::now);
    WorkbookWriter::new(sheet)
        .with_core_properties(
            DocumentProperties::new()
                .creator(&options.creator)
                .last_modified_by(&options.creator)
                .timestamp(now),
        )
        .with_app_properties(AppProperties::new().application(&options.application))
}

/// Default output file name: the input stem with the package extension.
pub fn default_output_name(input: &Path) -> String {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_else(|| DEFAULT_SHEET_NAME.into());
    format!("{}.{}", stem, OUTPUT_EXTENSION)
}

/// Convert the JSON file at `input` into `<output_dir>/<name>`.
///
/// `output_name` defaults to [`default_output_name`]. The output directory is
/// created if needed. Nothing is written unless the whole conversion
/// succeeds. Returns the written path.
pub fn convert_file(
    input: &Path,
    output_dir: &Path,
    output_name: Option<&str>,
    options: &ConvertOptions,
) -> Result<PathBuf> {
    let records = load_series(input)?;
    let workbook = build_workbook(&records, options);

    let name = output_name
        .map(str::to_string)
        .unwrap_or_else(|| default_output_name(input));
    let output = output_dir.join(name);

    let size = workbook.save(&output)?;
    info!(
        input = %input.display(),
        output = %output.display(),
        bytes = size,
        "converted payload"
    );
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ErrorKind;
    use crate::ooxml::PackURI;
    use crate::ooxml::opc::phys_pkg::PhysPkgReader;
    use chrono::TimeZone;
    use std::fs;

    const SCENARIO: &str = r#"{"data": {"data_string": "{\"data\":{\"series\":[{\"timeMinute\":\"00:00\",\"pcuTotal\":10,\"watchUcnt\":5,\"keyEvent\":\"start\"}]}}"}}"#;

    fn read_sheet(path: &Path) -> String {
        let bytes = fs::read(path).unwrap();
        let mut reader = PhysPkgReader::new(&bytes).unwrap();
        let blob = reader
            .blob_for(&PackURI::new("/xl/worksheets/sheet1.xml").unwrap())
            .unwrap();
        String::from_utf8(blob).unwrap()
    }

    fn cell(reference: &str, text: &str) -> String {
        format!(
            r#"<c r="{}" t="inlineStr"><is><t xml:space="preserve">{}</t></is></c>"#,
            reference, text
        )
    }

    #[test]
    fn test_end_to_end_scenario() {
        crate::logging::init_test();
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("room.json");
        fs::write(&input, SCENARIO).unwrap();

        let output = convert_file(
            &input,
            &dir.path().join("out"),
            None,
            &ConvertOptions::default(),
        )
        .unwrap();
        assert_eq!(output, dir.path().join("out").join("room.xlsx"));

        let sheet = read_sheet(&output);
        let expected_rows = [
            ("1", ["timeMinute", "watchUcnt", "pcuTotal", "keyEvent"]),
            ("2", ["时刻", "进入直播间人数", "在线人数", "关键事件"]),
            ("3", ["00:00", "5", "10", "start"]),
        ];
        for (row, values) in expected_rows {
            for (col, value) in ["A", "B", "C", "D"].iter().zip(values) {
                let reference = format!("{}{}", col, row);
                assert!(
                    sheet.contains(&cell(&reference, value)),
                    "missing {} = {}",
                    reference,
                    value
                );
            }
        }
        assert!(!sheet.contains(r#"r="E"#));
    }

    #[test]
    fn test_missing_data_string_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bad.json");
        fs::write(&input, r#"{"data": {}}"#).unwrap();
        let out_dir = dir.path().join("out");

        let err = convert_file(&input, &out_dir, None, &ConvertOptions::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingField);
        assert!(!out_dir.join("bad.xlsx").exists());
    }

    #[test]
    fn test_empty_series_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("empty.json");
        fs::write(
            &input,
            r#"{"data": {"data_string": "{\"data\":{\"series\":[]}}"}}"#,
        )
        .unwrap();

        let err =
            convert_file(&input, dir.path(), None, &ConvertOptions::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptySeries);
        assert!(!dir.path().join("empty.xlsx").exists());
    }

    #[test]
    fn test_sparse_emission() {
        let records = vec![
            serde_json::json!({"timeMinute": "00:00", "x": "", "likeCnt": 1})
                .as_object()
                .cloned()
                .unwrap(),
        ];
        let sheet = build_workbook(&records, &ConvertOptions::default())
            .worksheet()
            .to_xml();

        // Columns: timeMinute, x, likeCnt, keyEvent
        assert!(sheet.contains(&cell("A3", "00:00")));
        assert!(!sheet.contains(r#"r="B3""#));
        assert!(sheet.contains(&cell("C3", "1")));
        assert!(!sheet.contains(r#"r="D3""#));
        // keyEvent header is still present
        assert!(sheet.contains(&cell("D1", "keyEvent")));
    }

    #[test]
    fn test_options_are_applied() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.json");
        fs::write(&input, SCENARIO).unwrap();

        let options = ConvertOptions::new()
            .sheet_name("minutes")
            .unwrap()
            .creator("tester")
            .labels(LabelTable::from_pairs([("timeMinute", "Minute")]))
            .timestamp(Utc.with_ymd_and_hms(2025, 3, 4, 5, 6, 7).unwrap());
        let output = convert_file(&input, dir.path(), Some("named.xlsx"), &options).unwrap();
        assert_eq!(output.file_name(), Some(std::ffi::OsStr::new("named.xlsx")));

        let bytes = fs::read(&output).unwrap();
        let mut reader = PhysPkgReader::new(&bytes).unwrap();
        let workbook = String::from_utf8(
            reader
                .blob_for(&PackURI::new("/xl/workbook.xml").unwrap())
                .unwrap(),
        )
        .unwrap();
        assert!(workbook.contains(r#"<sheet name="minutes" sheetId="1" r:id="rId1"/>"#));

        let core = String::from_utf8(
            reader
                .blob_for(&PackURI::new("/docProps/core.xml").unwrap())
                .unwrap(),
        )
        .unwrap();
        assert!(core.contains("<dc:creator>tester</dc:creator>"));
        assert!(core.contains("2025-03-04T05:06:07Z"));

        let sheet = read_sheet(&output);
        assert!(sheet.contains(&cell("A2", "Minute")));
        assert!(sheet.contains(&cell("B2", "watchUcnt")));
    }

    #[test]
    fn test_sheet_name_rules() {
        let (longest, too_long) = ("x".repeat(31), "x".repeat(32));
        for name in ["data", "分钟数据", "a'b", longest.as_str()] {
            assert!(validate_sheet_name(name).is_ok(), "{:?}", name);
        }
        let rejected = [
            "",
            "a/b",
            "q?",
            "[x]",
            "c:d",
            "s*",
            "back\\slash",
            "'quoted'",
            too_long.as_str(),
        ];
        for name in rejected {
            let err = validate_sheet_name(name).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidOption, "{:?}", name);
        }
    }

    #[test]
    fn test_invalid_sheet_name_is_rejected_before_writing() {
        let err = ConvertOptions::new()
            .sheet_name("a very long worksheet name over 31")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOption);
        assert!(err.to_string().contains("longer than 31"));

        let options = ConvertOptions::new().sheet_name("bad/name");
        assert!(matches!(options, Err(Error::InvalidOption(_))));
    }

    #[test]
    fn test_large_numbers_are_written_exactly() {
        let records = vec![
            serde_json::from_str::<Record>(
                r#"{"timeMinute": "00:00", "likeCnt": 100000000000000000000, "pcuTotal": 1.5e-7}"#,
            )
            .unwrap(),
        ];
        let sheet = build_workbook(&records, &ConvertOptions::default())
            .worksheet()
            .to_xml();

        // Columns: timeMinute, likeCnt, pcuTotal, keyEvent
        assert!(sheet.contains(&cell("B3", "100000000000000000000")));
        assert!(sheet.contains(&cell("C3", "1.5e-7")));
        assert!(!sheet.contains("1e20"));
    }

    #[test]
    fn test_default_output_name() {
        assert_eq!(default_output_name(Path::new("dir/room.v2.json")), "room.v2.xlsx");
        assert_eq!(default_output_name(Path::new("payload")), "payload.xlsx");
    }
}
