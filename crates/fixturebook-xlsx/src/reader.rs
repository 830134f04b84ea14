//! XLSX reader
//!
//! A deliberately small reader: it resolves the first worksheet of a
//! workbook and extracts cell text (inline and shared strings). It exists to
//! verify exported fixture workbooks and to inspect existing ones, not to be
//! a general spreadsheet loader.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::error::{XlsxError, XlsxResult};
use fixturebook_core::{FixtureTable, TestCaseRecord, FIELD_COUNT, FIELD_NAMES};

/// XLSX file reader
pub struct XlsxReader;

impl XlsxReader {
    /// Read a fixture table from a file path
    pub fn read_file<P: AsRef<Path>>(path: P) -> XlsxResult<FixtureTable> {
        let file = File::open(path)?;
        Self::read(file)
    }

    /// Read a fixture table from a reader.
    ///
    /// The first worksheet must carry the fixed header row; every following
    /// row becomes one record. Trailing cells a writer omitted are treated
    /// as empty strings.
    pub fn read<R: Read + Seek>(reader: R) -> XlsxResult<FixtureTable> {
        let rows = Self::read_rows(reader)?;

        let mut rows = rows.into_iter();
        let header = rows
            .next()
            .ok_or_else(|| XlsxError::InvalidFormat("missing header row".into()))?;
        let header = pad_row(header)?;
        if header.iter().map(String::as_str).ne(FIELD_NAMES) {
            return Err(XlsxError::InvalidFormat(format!(
                "unexpected header row: {:?}",
                header
            )));
        }

        let mut records = Vec::new();
        for row in rows {
            records.push(TestCaseRecord::from_fields(pad_row(row)?));
        }

        Ok(FixtureTable::from_records(records))
    }

    /// Read the first worksheet as raw rows of cell text
    pub fn read_rows<R: Read + Seek>(reader: R) -> XlsxResult<Vec<Vec<String>>> {
        let mut archive = zip::ZipArchive::new(reader)?;

        // Verify this is an XLSX file
        if archive.by_name("[Content_Types].xml").is_err() {
            return Err(XlsxError::InvalidFormat(
                "Missing [Content_Types].xml".into(),
            ));
        }

        let shared_strings = Self::read_shared_strings(&mut archive)?;
        let sheet_info = Self::read_workbook_xml(&mut archive)?;
        let sheet_paths = Self::read_workbook_rels(&mut archive)?;

        let (name, r_id) = sheet_info
            .first()
            .ok_or_else(|| XlsxError::InvalidFormat("workbook has no sheets".into()))?;
        let path = sheet_paths
            .get(r_id)
            .ok_or_else(|| XlsxError::MissingPart(format!("worksheet part for sheet '{name}'")))?;

        Self::read_worksheet(&mut archive, path, &shared_strings)
    }

    /// Read the shared strings table (absent in files we write ourselves)
    fn read_shared_strings<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<Vec<String>> {
        let mut strings = Vec::new();

        let file = match archive.by_name("xl/sharedStrings.xml") {
            Ok(f) => f,
            Err(_) => return Ok(strings), // No shared strings is valid
        };

        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.trim_text(false);

        let mut buf = Vec::new();
        let mut current_string = String::new();
        let mut in_si = false;
        let mut in_t = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"si" => {
                        in_si = true;
                        current_string.clear();
                    }
                    b"t" if in_si => {
                        in_t = true;
                    }
                    _ => {}
                },
                Ok(Event::End(e)) => match e.name().as_ref() {
                    b"si" => {
                        strings.push(std::mem::take(&mut current_string));
                        in_si = false;
                    }
                    b"t" => {
                        in_t = false;
                    }
                    _ => {}
                },
                Ok(Event::Text(e)) if in_t => {
                    if let Ok(text) = e.unescape() {
                        current_string.push_str(&text);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(strings)
    }

    /// Read workbook.xml to get sheet names and rIds
    fn read_workbook_xml<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<Vec<(String, String)>> {
        let file = archive
            .by_name("xl/workbook.xml")
            .map_err(|_| XlsxError::MissingPart("xl/workbook.xml".into()))?;

        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut sheets = Vec::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e)) if e.name().as_ref() == b"sheet" => {
                    let mut name = None;
                    let mut r_id = None;

                    for attr in e.attributes().flatten() {
                        match attr.key.as_ref() {
                            b"name" => {
                                name = attr.unescape_value().ok().map(|s| s.to_string());
                            }
                            b"r:id" => {
                                r_id = attr.unescape_value().ok().map(|s| s.to_string());
                            }
                            _ => {}
                        }
                    }

                    if let (Some(name), Some(r_id)) = (name, r_id) {
                        sheets.push((name, r_id));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(sheets)
    }

    /// Read workbook.xml.rels to get worksheet part paths
    fn read_workbook_rels<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<HashMap<String, String>> {
        let file = archive
            .by_name("xl/_rels/workbook.xml.rels")
            .map_err(|_| XlsxError::MissingPart("xl/_rels/workbook.xml.rels".into()))?;

        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut rels = HashMap::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e))
                    if e.name().as_ref() == b"Relationship" =>
                {
                    let mut id = None;
                    let mut target = None;
                    let mut rel_type = None;

                    for attr in e.attributes().flatten() {
                        match attr.key.as_ref() {
                            b"Id" => {
                                id = attr.unescape_value().ok().map(|s| s.to_string());
                            }
                            b"Target" => {
                                target = attr.unescape_value().ok().map(|s| s.to_string());
                            }
                            b"Type" => {
                                rel_type = attr.unescape_value().ok().map(|s| s.to_string());
                            }
                            _ => {}
                        }
                    }

                    // Only include worksheet relationships
                    if let (Some(id), Some(target), Some(rel_type)) = (id, target, rel_type) {
                        if rel_type.ends_with("/worksheet") {
                            // Target is relative to xl/ folder
                            let full_path = if let Some(stripped) = target.strip_prefix('/') {
                                stripped.to_string()
                            } else {
                                format!("xl/{}", target)
                            };
                            rels.insert(id, full_path);
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(rels)
    }

    /// Read a worksheet's cells as dense rows of text
    fn read_worksheet<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
        path: &str,
        shared_strings: &[String],
    ) -> XlsxResult<Vec<Vec<String>>> {
        let file = archive
            .by_name(path)
            .map_err(|_| XlsxError::MissingPart(path.to_string()))?;

        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.trim_text(false);

        let mut buf = Vec::new();
        let mut rows: Vec<Vec<String>> = Vec::new();

        // Current cell state
        let mut current_cell: Option<(u32, u32)> = None;
        let mut current_type: Option<String> = None;
        let mut current_text = String::new();
        let mut in_value = false;
        let mut in_inline_text = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) if e.name().as_ref() == b"c" => {
                    let (pos, cell_type) = parse_cell_start(&e)?;
                    current_cell = Some(pos);
                    current_type = cell_type;
                    current_text.clear();
                }
                // Self-closing cells carry no value
                Ok(Event::Empty(e)) if e.name().as_ref() == b"c" => {
                    let (pos, _) = parse_cell_start(&e)?;
                    place_cell(&mut rows, pos.0, pos.1, String::new());
                }
                Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"v" if current_cell.is_some() => in_value = true,
                    b"t" if current_cell.is_some() => in_inline_text = true,
                    _ => {}
                },
                Ok(Event::End(e)) => match e.name().as_ref() {
                    b"v" => in_value = false,
                    b"t" => in_inline_text = false,
                    b"c" => {
                        if let Some((row, col)) = current_cell.take() {
                            let value = Self::resolve_cell_text(
                                current_type.take().as_deref(),
                                std::mem::take(&mut current_text),
                                shared_strings,
                            );
                            place_cell(&mut rows, row, col, value);
                        }
                    }
                    _ => {}
                },
                Ok(Event::Text(e)) if in_value || in_inline_text => {
                    if let Ok(text) = e.unescape() {
                        current_text.push_str(&text);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(rows)
    }

    fn resolve_cell_text(
        cell_type: Option<&str>,
        raw: String,
        shared_strings: &[String],
    ) -> String {
        match cell_type {
            Some("s") => match raw.trim().parse::<usize>().ok().and_then(|i| shared_strings.get(i))
            {
                Some(s) => s.clone(),
                None => {
                    log::warn!("shared string index '{raw}' out of range");
                    String::new()
                }
            },
            // inlineStr text, plain strings, numbers and booleans all pass
            // through as their literal text
            _ => raw,
        }
    }
}

/// Pull the (row, col) position and optional type attribute off a `<c>` tag
fn parse_cell_start(
    e: &quick_xml::events::BytesStart<'_>,
) -> XlsxResult<((u32, u32), Option<String>)> {
    let mut cell_ref = None;
    let mut cell_type = None;
    for attr in e.attributes().flatten() {
        match attr.key.as_ref() {
            b"r" => {
                cell_ref = attr.unescape_value().ok().map(|s| s.to_string());
            }
            b"t" => {
                cell_type = attr.unescape_value().ok().map(|s| s.to_string());
            }
            _ => {}
        }
    }
    let cell_ref =
        cell_ref.ok_or_else(|| XlsxError::Parse("cell without 'r' attribute".into()))?;
    Ok((parse_cell_ref(&cell_ref)?, cell_type))
}

/// Pad a row out to the nine-field width; reject wider rows
fn pad_row(mut row: Vec<String>) -> XlsxResult<[String; 9]> {
    if row.len() > FIELD_COUNT {
        return Err(XlsxError::InvalidFormat(format!(
            "row has {} cells, expected at most {}",
            row.len(),
            FIELD_COUNT
        )));
    }
    row.resize(FIELD_COUNT, String::new());
    let mut fields: [String; 9] = Default::default();
    for (slot, value) in fields.iter_mut().zip(row) {
        *slot = value;
    }
    Ok(fields)
}

fn place_cell(rows: &mut Vec<Vec<String>>, row: u32, col: u32, value: String) {
    let row = row as usize;
    let col = col as usize;
    if rows.len() <= row {
        rows.resize_with(row + 1, Vec::new);
    }
    let cells = &mut rows[row];
    if cells.len() <= col {
        cells.resize_with(col + 1, String::new);
    }
    cells[col] = value;
}

/// Parse an A1-style cell reference into 0-based (row, col)
fn parse_cell_ref(cell_ref: &str) -> XlsxResult<(u32, u32)> {
    let split = cell_ref
        .find(|c: char| c.is_ascii_digit())
        .ok_or_else(|| XlsxError::Parse(format!("invalid cell reference: {cell_ref}")))?;
    let (letters, digits) = cell_ref.split_at(split);
    if letters.is_empty() {
        return Err(XlsxError::Parse(format!(
            "invalid cell reference: {cell_ref}"
        )));
    }

    let mut col: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_uppercase() {
            return Err(XlsxError::Parse(format!(
                "invalid cell reference: {cell_ref}"
            )));
        }
        col = col
            .checked_mul(26)
            .and_then(|n| n.checked_add(c as u32 - 'A' as u32 + 1))
            .ok_or_else(|| XlsxError::Parse(format!("invalid cell reference: {cell_ref}")))?;
    }

    let row: u32 = digits
        .parse()
        .map_err(|_| XlsxError::Parse(format!("invalid cell reference: {cell_ref}")))?;
    if row == 0 {
        return Err(XlsxError::Parse(format!(
            "invalid cell reference: {cell_ref}"
        )));
    }

    Ok((row - 1, col - 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cell_refs() {
        assert_eq!(parse_cell_ref("A1").unwrap(), (0, 0));
        assert_eq!(parse_cell_ref("I2").unwrap(), (1, 8));
        assert_eq!(parse_cell_ref("AA10").unwrap(), (9, 26));
    }

    #[test]
    fn rejects_malformed_cell_refs() {
        assert!(parse_cell_ref("12").is_err());
        assert!(parse_cell_ref("ABC").is_err());
        assert!(parse_cell_ref("a1").is_err());
        assert!(parse_cell_ref("A0").is_err());
    }

    #[test]
    fn rejects_oversized_column_runs() {
        // A letter run this long exceeds u32 and must error, not wrap
        assert!(parse_cell_ref("ZZZZZZZZZZ1").is_err());
    }

    #[test]
    fn pads_short_rows() {
        let fields = pad_row(vec!["TC1-1".into(), "login".into()]).unwrap();
        assert_eq!(fields[0], "TC1-1");
        assert_eq!(fields[1], "login");
        assert_eq!(fields[8], "");
    }

    #[test]
    fn rejects_wide_rows() {
        let row: Vec<String> = (0..10).map(|i| i.to_string()).collect();
        assert!(pad_row(row).is_err());
    }
}
