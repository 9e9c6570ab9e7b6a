//! Minimal xlsx package writer
//!
//! Produces a valid workbook with one worksheet per table:
//! - row 1 holds the column names
//! - data rows start at row 2
//! - strings are written inline, so no shared string table is needed

use std::fmt::Write as FmtWrite;
use std::io::{Cursor, Write};

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::error::ExcelHandlerError;
use crate::table::DataTable;

/// Excel's limit on worksheet name length
pub const MAX_SHEET_NAME_LEN: usize = 31;

static INVALID_SHEET_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\[\]:*?/\\]").unwrap());

/// A worksheet to be written
pub(crate) struct Sheet<'a> {
    pub name: &'a str,
    pub data: &'a DataTable,
}

/// Check that every sheet name is one Excel will open
pub(crate) fn validate_sheet_names(sheets: &[Sheet<'_>]) -> Result<(), ExcelHandlerError> {
    if sheets.is_empty() {
        return Err(ExcelHandlerError::EmptyWorkbook);
    }

    let mut seen: Vec<String> = Vec::with_capacity(sheets.len());
    for sheet in sheets {
        let name = sheet.name;
        let invalid = |reason| ExcelHandlerError::InvalidSheetName {
            name: name.to_string(),
            reason,
        };

        if name.trim().is_empty() {
            return Err(invalid("name is empty"));
        }
        if name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(invalid("name is longer than 31 characters"));
        }
        if INVALID_SHEET_CHARS.is_match(name) {
            return Err(invalid("name contains one of [ ] : * ? / \\"));
        }
        if name.starts_with('\'') || name.ends_with('\'') {
            return Err(invalid("name starts or ends with an apostrophe"));
        }

        // Excel compares sheet names case-insensitively
        let folded = name.to_lowercase();
        if seen.contains(&folded) {
            return Err(ExcelHandlerError::DuplicateSheetName(name.to_string()));
        }
        seen.push(folded);
    }

    Ok(())
}

/// Write the workbook package into memory
pub(crate) fn write_workbook(sheets: &[Sheet<'_>]) -> Result<Vec<u8>, ExcelHandlerError> {
    validate_sheet_names(sheets)?;

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let mut write_part = |path: &str, content: &str| -> Result<(), ExcelHandlerError> {
        zip.start_file(path, options)?;
        zip.write_all(content.as_bytes())?;
        Ok(())
    };

    write_part("[Content_Types].xml", &content_types_xml(sheets.len()))?;
    write_part("_rels/.rels", ROOT_RELS_XML)?;
    write_part("xl/workbook.xml", &workbook_xml(sheets))?;
    write_part("xl/_rels/workbook.xml.rels", &workbook_rels_xml(sheets.len()))?;
    write_part("xl/styles.xml", STYLES_XML)?;
    for (index, sheet) in sheets.iter().enumerate() {
        let path = format!("xl/worksheets/sheet{}.xml", index + 1);
        write_part(&path, &worksheet_xml(sheet.data))?;
    }

    let bytes = zip.finish()?.into_inner();
    tracing::debug!(sheets = sheets.len(), size = bytes.len(), "wrote workbook");
    Ok(bytes)
}

const ROOT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
<fonts count="2"><font><sz val="11"/><name val="Calibri"/></font><font><b/><sz val="11"/><name val="Calibri"/></font></fonts>
<fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills>
<borders count="1"><border/></borders>
<cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>
<cellXfs count="2"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/><xf numFmtId="0" fontId="1" fillId="0" borderId="0" xfId="0" applyFont="1"/></cellXfs>
</styleSheet>"#;

/// Style index of the bold header format in [`STYLES_XML`]
const HEADER_STYLE: usize = 1;

fn content_types_xml(sheet_count: usize) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
<Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>
"#,
    );
    for index in 1..=sheet_count {
        let _ = writeln!(
            xml,
            r#"<Override PartName="/xl/worksheets/sheet{index}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#
        );
    }
    xml.push_str("</Types>");
    xml
}

fn workbook_xml(sheets: &[Sheet<'_>]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
<sheets>
"#,
    );
    for (index, sheet) in sheets.iter().enumerate() {
        let _ = writeln!(
            xml,
            r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
            escape_xml(sheet.name),
            index + 1,
            index + 1
        );
    }
    xml.push_str("</sheets>\n</workbook>");
    xml
}

fn workbook_rels_xml(sheet_count: usize) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
"#,
    );
    for index in 1..=sheet_count {
        let _ = writeln!(
            xml,
            r#"<Relationship Id="rId{index}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{index}.xml"/>"#
        );
    }
    let _ = writeln!(
        xml,
        r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#,
        sheet_count + 1
    );
    xml.push_str("</Relationships>");
    xml
}

fn worksheet_xml(data: &DataTable) -> String {
    let mut xml = String::with_capacity(4096);

    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(
        r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
    );
    xml.push_str("<sheetData>");

    // Row 1: column names
    if !data.columns().is_empty() {
        xml.push_str(r#"<row r="1">"#);
        for (col_idx, column) in data.columns().iter().enumerate() {
            let cell_ref = format!("{}1", column_letter(col_idx));
            write_string_cell(&mut xml, &cell_ref, column, Some(HEADER_STYLE));
        }
        xml.push_str("</row>");
    }

    // Data rows (row 2 onwards)
    for (row_idx, row) in data.rows().iter().enumerate() {
        let row_num = row_idx + 2;
        let _ = write!(xml, r#"<row r="{row_num}">"#);
        for (col_idx, value) in row.iter().enumerate() {
            let cell_ref = format!("{}{}", column_letter(col_idx), row_num);
            write_value_cell(&mut xml, &cell_ref, value);
        }
        xml.push_str("</row>");
    }

    xml.push_str("</sheetData>");
    xml.push_str("</worksheet>");

    xml
}

fn write_value_cell(xml: &mut String, cell_ref: &str, value: &Value) {
    match value {
        Value::Null => {}
        Value::Bool(b) => {
            let _ = write!(xml, r#"<c r="{cell_ref}" t="b"><v>{}</v></c>"#, u8::from(*b));
        }
        Value::Number(n) => {
            let _ = write!(xml, r#"<c r="{cell_ref}"><v>{n}</v></c>"#);
        }
        Value::String(s) => write_string_cell(xml, cell_ref, s, None),
        nested => write_string_cell(xml, cell_ref, &nested.to_string(), None),
    }
}

fn write_string_cell(xml: &mut String, cell_ref: &str, text: &str, style: Option<usize>) {
    let style_attr = style.map(|s| format!(r#" s="{s}""#)).unwrap_or_default();
    let space_attr = if text.starts_with(char::is_whitespace) || text.ends_with(char::is_whitespace)
    {
        r#" xml:space="preserve""#
    } else {
        ""
    };
    let _ = write!(
        xml,
        r#"<c r="{cell_ref}"{style_attr} t="inlineStr"><is><t{space_attr}>{}</t></is></c>"#,
        escape_xml(text)
    );
}

/// Convert a 0-based column index to Excel column letters (0=A, 25=Z, 26=AA)
pub(crate) fn column_letter(col: usize) -> String {
    let mut result = String::new();
    let mut n = col;

    loop {
        let remainder = n % 26;
        result.insert(0, (b'A' + remainder as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }

    result
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
