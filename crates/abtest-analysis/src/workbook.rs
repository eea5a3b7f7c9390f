//! Worksheet loading from Office Open XML workbooks (`.xlsx`).
//!
//! An `.xlsx` file is a zip archive of XML parts. Loading a sheet touches four
//! of them:
//!
//! - `xl/workbook.xml`: sheet names and their relationship ids
//! - `xl/_rels/workbook.xml.rels`: relationship id to worksheet part path
//! - `xl/sharedStrings.xml`: the string table referenced by `t="s"` cells (optional)
//! - `xl/worksheets/sheetN.xml`: the cells themselves
//!
//! The first non-empty row of a sheet becomes the header; every following row
//! is data. Cells keep their stored type.

use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    fs::File,
    io::{self, BufReader, Read, Seek},
    path::{Path, PathBuf},
};

use quick_xml::{Reader, events::Event};
use zip::{ZipArchive, result::ZipError};

use crate::table::{CellValue, Column, GroupTable};

const WORKBOOK_PART: &str = "xl/workbook.xml";
const WORKBOOK_RELS_PART: &str = "xl/_rels/workbook.xml.rels";
const SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum LoadError {
    #[display("failed to open workbook {}", path.display())]
    Open { path: PathBuf, source: io::Error },
    #[display("invalid workbook archive")]
    Archive { source: ZipError },
    #[display("workbook part '{part}' is missing")]
    MissingPart { part: String },
    #[display("failed to read workbook part '{part}'")]
    ReadPart { part: String, source: io::Error },
    #[display("malformed XML in workbook part '{part}'")]
    Xml {
        part: String,
        source: quick_xml::Error,
    },
    #[display("sheet '{sheet}' not found (available: {})", available.join(", "))]
    SheetNotFound {
        sheet: String,
        available: Vec<String>,
    },
    #[display("invalid cell {reference} in '{part}': {reason}")]
    InvalidCell {
        part: String,
        reference: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
struct SheetEntry {
    name: String,
    part: String,
}

/// An opened workbook with its sheet directory and shared string table.
pub struct Workbook<R> {
    archive: ZipArchive<R>,
    sheets: Vec<SheetEntry>,
    shared_strings: Vec<String>,
}

impl Workbook<BufReader<File>> {
    /// Opens the workbook at `path`.
    pub fn open<P>(path: P) -> Result<Self, LoadError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LoadError::Open {
            path: path.to_owned(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "opened workbook");
        Self::from_reader(BufReader::new(file))
    }
}

impl<R> Workbook<R>
where
    R: Read + Seek,
{
    /// Reads the sheet directory and shared strings from an archive.
    pub fn from_reader(reader: R) -> Result<Self, LoadError> {
        let mut archive = ZipArchive::new(reader).map_err(|source| LoadError::Archive { source })?;

        let workbook_xml = read_required_part(&mut archive, WORKBOOK_PART)?;
        let sheet_refs =
            parse_sheet_list(&workbook_xml).map_err(|source| xml_error(WORKBOOK_PART, source))?;

        let rels_xml = read_required_part(&mut archive, WORKBOOK_RELS_PART)?;
        let targets = parse_relationships(&rels_xml)
            .map_err(|source| xml_error(WORKBOOK_RELS_PART, source))?;

        let sheets = sheet_refs
            .into_iter()
            .map(|(name, rel_id)| {
                let target = targets.get(&rel_id).ok_or_else(|| LoadError::MissingPart {
                    part: format!("relationship {rel_id} for sheet '{name}'"),
                })?;
                Ok(SheetEntry {
                    name,
                    part: resolve_target(target),
                })
            })
            .collect::<Result<Vec<_>, LoadError>>()?;

        let shared_strings = match read_part(&mut archive, SHARED_STRINGS_PART)? {
            Some(xml) => parse_shared_strings(&xml)
                .map_err(|source| xml_error(SHARED_STRINGS_PART, source))?,
            None => vec![],
        };

        tracing::debug!(
            sheets = sheets.len(),
            shared_strings = shared_strings.len(),
            "read workbook directory"
        );

        Ok(Self {
            archive,
            sheets,
            shared_strings,
        })
    }

    /// Sheet names in workbook order.
    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.iter().map(|s| s.name.as_str())
    }

    /// Loads the sheet called `name` as a [`GroupTable`] of the same name.
    pub fn read_sheet(&mut self, name: &str) -> Result<GroupTable, LoadError> {
        let entry = self
            .sheets
            .iter()
            .find(|s| s.name == name)
            .cloned()
            .ok_or_else(|| LoadError::SheetNotFound {
                sheet: name.to_owned(),
                available: self.sheet_names().map(str::to_owned).collect(),
            })?;

        let xml = read_required_part(&mut self.archive, &entry.part)?;
        let cells = parse_worksheet(&xml, &self.shared_strings, &entry.part)?;
        let table = build_table(name, cells);
        tracing::info!(
            sheet = name,
            rows = table.row_count(),
            columns = table.column_count(),
            "loaded sheet"
        );
        Ok(table)
    }
}

/// Loads the control and test group tables from one workbook.
pub fn load_groups<P>(
    path: P,
    control_sheet: &str,
    test_sheet: &str,
) -> Result<(GroupTable, GroupTable), LoadError>
where
    P: AsRef<Path>,
{
    let mut workbook = Workbook::open(path)?;
    let control = workbook.read_sheet(control_sheet)?;
    let test = workbook.read_sheet(test_sheet)?;
    Ok((control, test))
}

fn xml_error(part: &str, source: quick_xml::Error) -> LoadError {
    LoadError::Xml {
        part: part.to_owned(),
        source,
    }
}

fn read_part<R>(archive: &mut ZipArchive<R>, part: &str) -> Result<Option<Vec<u8>>, LoadError>
where
    R: Read + Seek,
{
    let mut file = match archive.by_name(part) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(source) => return Err(LoadError::Archive { source }),
    };
    let mut bytes = Vec::with_capacity(usize::try_from(file.size()).unwrap_or_default());
    file.read_to_end(&mut bytes)
        .map_err(|source| LoadError::ReadPart {
            part: part.to_owned(),
            source,
        })?;
    Ok(Some(bytes))
}

fn read_required_part<R>(archive: &mut ZipArchive<R>, part: &str) -> Result<Vec<u8>, LoadError>
where
    R: Read + Seek,
{
    read_part(archive, part)?.ok_or_else(|| LoadError::MissingPart {
        part: part.to_owned(),
    })
}

/// Relationship targets are relative to `xl/` unless absolute within the package.
fn resolve_target(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_owned(),
        None => format!("xl/{target}"),
    }
}

/// `(sheet name, relationship id)` pairs from `xl/workbook.xml`.
fn parse_sheet_list(xml: &[u8]) -> quick_xml::Result<Vec<(String, String)>> {
    let mut reader = Reader::from_reader(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();
    let mut sheets = vec![];
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"sheet" => {
                let mut name = None;
                let mut rel_id = None;
                for attr in e.attributes() {
                    let attr = attr?;
                    match attr.key.local_name().as_ref() {
                        b"name" => name = Some(attr.unescape_value()?.into_owned()),
                        b"id" => rel_id = Some(attr.unescape_value()?.into_owned()),
                        _ => {}
                    }
                }
                if let (Some(name), Some(rel_id)) = (name, rel_id) {
                    sheets.push((name, rel_id));
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(sheets)
}

/// Relationship id to target path from `xl/_rels/workbook.xml.rels`.
fn parse_relationships(xml: &[u8]) -> quick_xml::Result<HashMap<String, String>> {
    let mut reader = Reader::from_reader(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();
    let mut targets = HashMap::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Relationship" => {
                let mut id = None;
                let mut target = None;
                for attr in e.attributes() {
                    let attr = attr?;
                    match attr.key.as_ref() {
                        b"Id" => id = Some(attr.unescape_value()?.into_owned()),
                        b"Target" => target = Some(attr.unescape_value()?.into_owned()),
                        _ => {}
                    }
                }
                if let (Some(id), Some(target)) = (id, target) {
                    targets.insert(id, target);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(targets)
}

/// The shared string table. Rich-text runs are concatenated; phonetic hints are dropped.
fn parse_shared_strings(xml: &[u8]) -> quick_xml::Result<Vec<String>> {
    let mut reader = Reader::from_reader(xml);
    reader.trim_text(false);
    let mut buf = Vec::new();
    let mut strings = vec![];
    let mut current: Option<String> = None;
    let mut in_text = false;
    let mut in_phonetic = false;
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"si" => current = Some(String::new()),
                b"rPh" => in_phonetic = true,
                b"t" if !in_phonetic => in_text = true,
                _ => {}
            },
            Event::Empty(e) if e.local_name().as_ref() == b"si" => strings.push(String::new()),
            Event::Text(t) if in_text => {
                if let Some(current) = &mut current {
                    current.push_str(&t.unescape()?);
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"si" => strings.push(current.take().unwrap_or_default()),
                b"rPh" => in_phonetic = false,
                b"t" => in_text = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(strings)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellKind {
    Number,
    SharedString,
    InlineString,
    Text,
    Bool,
}

impl CellKind {
    fn from_type_attr(t: Option<&str>) -> Self {
        match t {
            None | Some("n") => CellKind::Number,
            Some("s") => CellKind::SharedString,
            Some("inlineStr") => CellKind::InlineString,
            Some("b") => CellKind::Bool,
            // "str" (formula result), "e" (error), "d" (ISO date) are kept as text
            Some(_) => CellKind::Text,
        }
    }
}

#[derive(Debug)]
struct PendingCell {
    reference: String,
    row: usize,
    col: usize,
    kind: CellKind,
    text: String,
    has_value: bool,
}

/// A located cell, zero-based.
#[derive(Debug, Clone, PartialEq)]
struct RawCell {
    row: usize,
    col: usize,
    value: CellValue,
}

/// Zero-based `(row, column)` of an A1-style reference such as `AB12`.
fn parse_reference(reference: &str) -> Option<(usize, usize)> {
    let split = reference.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = reference.split_at(split);
    if letters.is_empty() || !letters.bytes().all(|b| b.is_ascii_alphabetic()) {
        return None;
    }
    let col = letters.bytes().try_fold(0usize, |acc, b| {
        acc.checked_mul(26)?
            .checked_add(usize::from(b.to_ascii_uppercase() - b'A') + 1)
    })?;
    let row = digits.parse::<usize>().ok()?;
    Some((row.checked_sub(1)?, col - 1))
}

fn parse_worksheet(
    xml: &[u8],
    shared_strings: &[String],
    part: &str,
) -> Result<Vec<RawCell>, LoadError> {
    let mut reader = Reader::from_reader(xml);
    reader.trim_text(false);
    let mut buf = Vec::new();
    let mut cells = vec![];

    // next row/column used when a row or cell omits its reference
    let mut next_row = 0;
    let mut current_row = 0;
    let mut next_col = 0;
    let mut pending: Option<PendingCell> = None;
    let mut capture = false;

    loop {
        match reader
            .read_event_into(&mut buf)
            .map_err(|source| xml_error(part, source))?
        {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"row" => {
                let reference = attribute(&e, b"r").map_err(|source| xml_error(part, source))?;
                current_row = reference
                    .and_then(|r| r.parse::<usize>().ok())
                    .and_then(|r| r.checked_sub(1))
                    .unwrap_or(next_row);
                next_row = current_row + 1;
                next_col = 0;
            }
            Event::Start(e) if e.local_name().as_ref() == b"c" => {
                let reference = attribute(&e, b"r").map_err(|source| xml_error(part, source))?;
                let kind = attribute(&e, b"t").map_err(|source| xml_error(part, source))?;
                let (row, col) = reference
                    .as_deref()
                    .and_then(parse_reference)
                    .unwrap_or((current_row, next_col));
                next_col = col + 1;
                pending = Some(PendingCell {
                    reference: reference.unwrap_or_else(|| format!("R{}C{}", row + 1, col + 1)),
                    row,
                    col,
                    kind: CellKind::from_type_attr(kind.as_deref()),
                    text: String::new(),
                    has_value: false,
                });
            }
            Event::Empty(e) if e.local_name().as_ref() == b"c" => {
                let reference = attribute(&e, b"r").map_err(|source| xml_error(part, source))?;
                let (_, col) = reference
                    .as_deref()
                    .and_then(parse_reference)
                    .unwrap_or((current_row, next_col));
                next_col = col + 1;
            }
            Event::Start(e) if pending.is_some() => match e.local_name().as_ref() {
                b"v" | b"t" => capture = true,
                _ => {}
            },
            Event::Text(t) if capture => {
                if let Some(cell) = &mut pending {
                    let text = t.unescape().map_err(|source| xml_error(part, source))?;
                    cell.text.push_str(&text);
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"v" | b"t" => {
                    capture = false;
                    if let Some(cell) = &mut pending {
                        cell.has_value = true;
                    }
                }
                b"c" => {
                    capture = false;
                    if let Some(cell) = pending.take().filter(|c| c.has_value) {
                        let value = convert_cell(&cell, shared_strings, part)?;
                        cells.push(RawCell {
                            row: cell.row,
                            col: cell.col,
                            value,
                        });
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(cells)
}

fn attribute(
    e: &quick_xml::events::BytesStart<'_>,
    name: &[u8],
) -> quick_xml::Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == name {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

fn convert_cell(
    cell: &PendingCell,
    shared_strings: &[String],
    part: &str,
) -> Result<CellValue, LoadError> {
    let invalid = |reason: String| LoadError::InvalidCell {
        part: part.to_owned(),
        reference: cell.reference.clone(),
        reason,
    };
    let text = cell.text.as_str();
    let value = match cell.kind {
        CellKind::Number if text.trim().is_empty() => CellValue::Empty,
        CellKind::Number => text
            .trim()
            .parse::<f64>()
            .map(CellValue::Number)
            .map_err(|_| invalid(format!("'{text}' is not a number")))?,
        CellKind::SharedString => {
            let index = text
                .trim()
                .parse::<usize>()
                .map_err(|_| invalid(format!("'{text}' is not a shared string index")))?;
            let s = shared_strings.get(index).ok_or_else(|| {
                invalid(format!(
                    "shared string index {index} out of range ({} strings)",
                    shared_strings.len()
                ))
            })?;
            CellValue::Text(s.clone())
        }
        CellKind::InlineString | CellKind::Text => CellValue::Text(text.to_owned()),
        CellKind::Bool => match text.trim() {
            "1" | "true" => CellValue::Bool(true),
            "0" | "false" => CellValue::Bool(false),
            other => return Err(invalid(format!("'{other}' is not a boolean"))),
        },
    };
    Ok(value)
}

fn header_name(value: &CellValue, col: usize) -> String {
    match value {
        CellValue::Text(s) => s.clone(),
        CellValue::Number(v) => v.to_string(),
        CellValue::Bool(b) => b.to_string(),
        CellValue::Empty => format!("Unnamed: {col}"),
    }
}

/// Lays located cells out as a table: first non-empty row is the header.
fn build_table(name: &str, cells: Vec<RawCell>) -> GroupTable {
    let mut grid = BTreeMap::<usize, BTreeMap<usize, CellValue>>::new();
    for cell in cells {
        if !cell.value.is_empty() {
            grid.entry(cell.row).or_default().insert(cell.col, cell.value);
        }
    }

    let Some((&header_row, header)) = grid.first_key_value() else {
        return GroupTable::new(name, vec![]);
    };
    let last_row = grid.keys().next_back().copied().unwrap_or(header_row);
    let col_indices = grid.values().flat_map(BTreeMap::keys).copied().collect::<BTreeSet<_>>();

    let columns = col_indices
        .into_iter()
        .map(|col| {
            let name = header.get(&col).map_or_else(
                || header_name(&CellValue::Empty, col),
                |v| header_name(v, col),
            );
            let cells = (header_row + 1..=last_row)
                .map(|row| {
                    grid.get(&row)
                        .and_then(|r| r.get(&col))
                        .cloned()
                        .unwrap_or(CellValue::Empty)
                })
                .collect();
            Column::new(name, cells)
        })
        .collect();
    GroupTable::new(name, columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORKBOOK_XML: &[u8] = br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <sheets>
    <sheet name="Control Group" sheetId="1" r:id="rId1"/>
    <sheet name="Test &amp; Learn" sheetId="2" r:id="rId2"/>
  </sheets>
</workbook>"#;

    const RELS_XML: &[u8] = br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="/xl/worksheets/sheet2.xml"/>
</Relationships>"#;

    const SHARED_XML: &[u8] = br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="4" uniqueCount="4">
  <si><t>Impression</t></si>
  <si><r><t>Cl</t></r><r><t>ick</t></r></si>
  <si><t>Purchase</t><rPh sb="0" eb="1"><t>ignored</t></rPh></si>
  <si/>
</sst>"#;

    #[test]
    fn test_parse_sheet_list() {
        let sheets = parse_sheet_list(WORKBOOK_XML).unwrap();
        assert_eq!(
            sheets,
            vec![
                ("Control Group".to_owned(), "rId1".to_owned()),
                ("Test & Learn".to_owned(), "rId2".to_owned()),
            ]
        );
    }

    #[test]
    fn test_parse_relationships_and_targets() {
        let targets = parse_relationships(RELS_XML).unwrap();
        assert_eq!(resolve_target(&targets["rId1"]), "xl/worksheets/sheet1.xml");
        assert_eq!(resolve_target(&targets["rId2"]), "xl/worksheets/sheet2.xml");
    }

    #[test]
    fn test_parse_shared_strings() {
        let strings = parse_shared_strings(SHARED_XML).unwrap();
        assert_eq!(strings, vec!["Impression", "Click", "Purchase", ""]);
    }

    #[test]
    fn test_parse_reference() {
        assert_eq!(parse_reference("A1"), Some((0, 0)));
        assert_eq!(parse_reference("D12"), Some((11, 3)));
        assert_eq!(parse_reference("AB3"), Some((2, 27)));
        assert_eq!(parse_reference("ab3"), Some((2, 27)));
        assert_eq!(parse_reference("12"), None);
        assert_eq!(parse_reference("A0"), None);
        assert_eq!(parse_reference("A"), None);
    }

    #[test]
    fn test_parse_worksheet_cell_types() {
        let xml = br#"<worksheet><sheetData>
  <row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1" t="s"><v>1</v></c><c r="C1" t="inlineStr"><is><t>Flag</t></is></c></row>
  <row r="2"><c r="A2"><v>82529.0</v></c><c r="B2"><f>A2/20</f><v>4126.45</v></c><c r="C2" t="b"><v>1</v></c></row>
  <row r="4"><c r="A4" t="n"><v>1e3</v></c><c r="C4" t="str"><f>"x"</f><v>x</v></c><c r="D4" s="1"/></row>
</sheetData></worksheet>"#;
        let shared = vec!["Impression".to_owned(), "Click".to_owned()];
        let cells = parse_worksheet(xml, &shared, "sheet1").unwrap();
        let table = build_table("Control Group", cells);

        assert_eq!(
            table.column_names().collect::<Vec<_>>(),
            vec!["Impression", "Click", "Flag"]
        );
        assert_eq!(table.shape(), (3, 3));
        let impression = &table.column("Impression").unwrap().cells;
        assert_eq!(
            impression,
            &vec![
                CellValue::Number(82529.0),
                CellValue::Empty,
                CellValue::Number(1000.0)
            ]
        );
        assert_eq!(
            table.column("Click").unwrap().cells[0],
            CellValue::Number(4126.45)
        );
        assert_eq!(table.column("Flag").unwrap().cells[0], CellValue::Bool(true));
        assert_eq!(
            table.column("Flag").unwrap().cells[2],
            CellValue::Text("x".to_owned())
        );
    }

    #[test]
    fn test_parse_worksheet_without_references() {
        let xml = br#"<worksheet><sheetData>
  <row><c t="inlineStr"><is><t>Purchase</t></is></c><c t="inlineStr"><is><t>Earning</t></is></c></row>
  <row><c><v>1</v></c><c><v>2</v></c></row>
  <row><c/><c><v>4</v></c></row>
</sheetData></worksheet>"#;
        let cells = parse_worksheet(xml, &[], "sheet1").unwrap();
        let table = build_table("Test Group", cells);
        assert_eq!(table.numeric_column("Earning").unwrap(), vec![2.0, 4.0]);
        assert_eq!(table.column("Purchase").unwrap().null_count(), 1);
    }

    #[test]
    fn test_header_after_blank_rows_and_unnamed_columns() {
        let xml = br#"<worksheet><sheetData>
  <row r="3"><c r="B3" t="inlineStr"><is><t>Click</t></is></c></row>
  <row r="4"><c r="B4"><v>10</v></c><c r="C4"><v>7</v></c></row>
</sheetData></worksheet>"#;
        let cells = parse_worksheet(xml, &[], "sheet1").unwrap();
        let table = build_table("Control Group", cells);
        assert_eq!(
            table.column_names().collect::<Vec<_>>(),
            vec!["Click", "Unnamed: 2"]
        );
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_invalid_cells() {
        let bad_number = br#"<worksheet><sheetData><row r="1"><c r="A1"><v>abc</v></c></row></sheetData></worksheet>"#;
        let err = parse_worksheet(bad_number, &[], "xl/worksheets/sheet1.xml").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid cell A1 in 'xl/worksheets/sheet1.xml': 'abc' is not a number"
        );

        let bad_index = br#"<worksheet><sheetData><row r="1"><c r="A1" t="s"><v>3</v></c></row></sheetData></worksheet>"#;
        assert!(matches!(
            parse_worksheet(bad_index, &[], "sheet1"),
            Err(LoadError::InvalidCell { .. })
        ));
    }

    #[test]
    fn test_empty_sheet() {
        let xml = br"<worksheet><sheetData/></worksheet>";
        let cells = parse_worksheet(xml, &[], "sheet1").unwrap();
        let table = build_table("Empty", cells);
        assert_eq!(table.shape(), (0, 0));
    }

    #[test]
    fn test_open_missing_file() {
        let err = Workbook::open("does/not/exist.xlsx").err().unwrap();
        assert!(matches!(err, LoadError::Open { .. }));
        assert_eq!(
            err.to_string(),
            "failed to open workbook does/not/exist.xlsx"
        );
    }

    #[test]
    fn test_not_a_zip_archive() {
        let err = Workbook::from_reader(io::Cursor::new(b"not a workbook".to_vec()))
            .err()
            .unwrap();
        assert!(matches!(err, LoadError::Archive { .. }));
    }
}
