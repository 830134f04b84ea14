//! XLSX writer

use std::fs::File;
use std::io::{Seek, Write};
use std::path::Path;

use crate::error::{XlsxError, XlsxResult};
use crate::SHEET_NAME;
use fixturebook_core::{FixtureTable, FIELD_NAMES};

/// XLSX file writer
pub struct XlsxWriter;

impl XlsxWriter {
    /// Write a fixture table to a file path.
    ///
    /// The parent directory must already exist; an existing file at the path
    /// is replaced in full. On success nothing is returned, the file on disk
    /// is the result.
    pub fn write_file<P: AsRef<Path>>(table: &FixtureTable, path: P) -> XlsxResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.is_dir() {
                return Err(XlsxError::DestinationUnavailable(parent.to_path_buf()));
            }
        }
        let file = File::create(path)?;
        Self::write(table, file)
    }

    /// Write a fixture table to a writer.
    ///
    /// Output is deterministic: zip entries carry a fixed timestamp, so the
    /// same table always serializes to the same bytes.
    pub fn write<W: Write + Seek>(table: &FixtureTable, writer: W) -> XlsxResult<()> {
        let mut zip = zip::ZipWriter::new(writer);

        Self::write_content_types(&mut zip)?;
        Self::write_root_rels(&mut zip)?;
        Self::write_workbook_xml(&mut zip)?;
        Self::write_workbook_rels(&mut zip)?;
        Self::write_styles_xml(&mut zip)?;
        Self::write_worksheet(&mut zip, table)?;

        zip.finish()?;
        Ok(())
    }

    fn zip_options() -> zip::write::SimpleFileOptions {
        // Fixed timestamp keeps the archive byte-for-byte reproducible
        zip::write::SimpleFileOptions::default().last_modified_time(zip::DateTime::default())
    }

    fn write_content_types<W: Write + Seek>(zip: &mut zip::ZipWriter<W>) -> XlsxResult<()> {
        zip.start_file("[Content_Types].xml", Self::zip_options())?;

        let content = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
    <Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>
    <Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
</Types>"#;

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_root_rels<W: Write + Seek>(zip: &mut zip::ZipWriter<W>) -> XlsxResult<()> {
        zip.start_file("_rels/.rels", Self::zip_options())?;

        let content = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_workbook_xml<W: Write + Seek>(zip: &mut zip::ZipWriter<W>) -> XlsxResult<()> {
        zip.start_file("xl/workbook.xml", Self::zip_options())?;

        let content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
    <sheets>
        <sheet name="{}" sheetId="1" r:id="rId1"/>
    </sheets>
</workbook>"#,
            SHEET_NAME
        );

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_workbook_rels<W: Write + Seek>(zip: &mut zip::ZipWriter<W>) -> XlsxResult<()> {
        zip.start_file("xl/_rels/workbook.xml.rels", Self::zip_options())?;

        let content = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
    <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
</Relationships>"#;

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_styles_xml<W: Write + Seek>(zip: &mut zip::ZipWriter<W>) -> XlsxResult<()> {
        zip.start_file("xl/styles.xml", Self::zip_options())?;

        // Two cell formats: 0 = plain data cells, 1 = bold header row
        let content = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
    <fonts count="2">
        <font><sz val="11"/><name val="Calibri"/></font>
        <font><b/><sz val="11"/><name val="Calibri"/></font>
    </fonts>
    <fills count="2">
        <fill><patternFill patternType="none"/></fill>
        <fill><patternFill patternType="gray125"/></fill>
    </fills>
    <borders count="1">
        <border><left/><right/><top/><bottom/><diagonal/></border>
    </borders>
    <cellStyleXfs count="1">
        <xf numFmtId="0" fontId="0" fillId="0" borderId="0"/>
    </cellStyleXfs>
    <cellXfs count="2">
        <xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/>
        <xf numFmtId="0" fontId="1" fillId="0" borderId="0" xfId="0" applyFont="1"/>
    </cellXfs>
</styleSheet>"#;

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_worksheet<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        table: &FixtureTable,
    ) -> XlsxResult<()> {
        zip.start_file("xl/worksheets/sheet1.xml", Self::zip_options())?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
    <sheetData>"#,
        );

        // Header row (bold), then one row per record. Empty fields are
        // written as empty inline strings so read-back reproduces the table
        // cell for cell.
        Self::push_row(&mut content, 0, &FIELD_NAMES, 1);
        for (i, record) in table.iter().enumerate() {
            Self::push_row(&mut content, (i + 1) as u32, &record.fields(), 0);
        }

        content.push_str("\n    </sheetData>\n</worksheet>");

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn push_row(content: &mut String, row: u32, fields: &[&str; 9], xf_id: u32) {
        content.push_str(&format!("\n        <row r=\"{}\">", row + 1));
        for (col, value) in fields.iter().enumerate() {
            let cell_ref = format!("{}{}", column_letter(col as u32), row + 1);
            let style_attr = if xf_id != 0 {
                format!(" s=\"{}\"", xf_id)
            } else {
                String::new()
            };
            content.push_str(&format!(
                "\n            <c r=\"{}\"{} t=\"inlineStr\"><is><t>{}</t></is></c>",
                cell_ref,
                style_attr,
                escape_xml(value)
            ));
        }
        content.push_str("\n        </row>");
    }
}

/// Convert a 0-based column index to its A1-style letter part
pub(crate) fn column_letter(col: u32) -> String {
    let mut letters = String::new();
    let mut n = col + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.insert(0, (b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    letters
}

pub(crate) fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_letters() {
        assert_eq!(column_letter(0), "A");
        assert_eq!(column_letter(8), "I");
        assert_eq!(column_letter(25), "Z");
        assert_eq!(column_letter(26), "AA");
        assert_eq!(column_letter(27), "AB");
    }

    #[test]
    fn escapes_xml_entities() {
        assert_eq!(escape_xml("a<b>&\"'"), "a&lt;b&gt;&amp;&quot;&apos;");
    }
}
