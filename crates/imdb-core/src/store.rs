//! Spreadsheet persistence for series records
//!
//! The store owns an `.xlsx` file whose first sheet has a fixed header row and
//! one row per unique series URL. Every save reads the existing workbook,
//! appends the new record when its URL is not present yet, and rewrites the
//! whole file. Cells already in the workbook are written back with their
//! original type and position, other sheets included.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet};
use serde::Serialize;

use crate::error::{ImdbError, Result};
use crate::types::SeriesRecord;

/// File used when no output path is given
pub const DEFAULT_FILE_NAME: &str = "imdb_series.xlsx";

/// Header row, in column order
pub const HEADERS: [&str; 4] = ["Title", "Rating", "Genres", "URL"];

const SHEET_NAME: &str = "Series";

const URL_COLUMN: usize = 3;

const DATE_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// Upper bound for a column's display width
pub const MAX_COLUMN_WIDTH: usize = 50;

/// Result of a [`SeriesStore::save`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SaveOutcome {
    /// A new row was appended and the file rewritten
    Saved,
    /// A row with the same URL already exists; the file was not touched
    AlreadyExists,
}

/// Append-only spreadsheet of series records, keyed by URL
#[derive(Debug, Clone)]
pub struct SeriesStore {
    path: PathBuf,
}

/// One worksheet as read from disk
struct Sheet {
    name: String,
    range: Range<Data>,
    has_formulas: bool,
}

impl Sheet {
    /// Used cells with absolute positions.
    fn cells(&self) -> impl Iterator<Item = (u32, u16, &Data)> + '_ {
        let (first_row, first_col) = self.range.start().unwrap_or((0, 0));
        self.range.used_cells().map(move |(row, col, cell)| {
            (first_row + row as u32, (first_col + col as u32) as u16, cell)
        })
    }

    /// First row below everything in the sheet.
    fn next_row(&self) -> u32 {
        match self.range.end() {
            Some((row, _)) if !self.range.is_empty() => row + 1,
            _ => 0,
        }
    }

    fn records(&self) -> Vec<SeriesRecord> {
        (1..self.next_row())
            .filter_map(|row| {
                let cells: Vec<Data> = (0..HEADERS.len() as u32)
                    .map(|col| self.range.get_value((row, col)).cloned().unwrap_or(Data::Empty))
                    .collect();
                record_from_row(&cells)
            })
            .collect()
    }
}

impl SeriesStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the data rows of the first sheet, below the header.
    ///
    /// A missing file reads as an empty store. Blank rows are skipped.
    ///
    /// # Errors
    /// Returns `ImdbError::SpreadsheetRead` if the file is not a readable workbook.
    pub fn load(&self) -> Result<Vec<SeriesRecord>> {
        Ok(self
            .read_sheets()?
            .first()
            .map(Sheet::records)
            .unwrap_or_default())
    }

    /// Append a record unless its URL is already stored.
    ///
    /// Creates the file with a styled header when it does not exist yet. The
    /// workbook is rendered in memory, written to a temporary file next to
    /// the target and renamed over it, keeping the target's permissions.
    ///
    /// # Errors
    /// * `ImdbError::SpreadsheetRead` - the existing file cannot be read
    /// * `ImdbError::Unpreservable` - the file holds formulas or error values,
    ///   which a rewrite would lose; the file is left untouched
    /// * `ImdbError::SpreadsheetWrite` - the workbook cannot be rendered
    /// * `ImdbError::Io` - the file cannot be replaced
    pub fn save(&self, record: &SeriesRecord) -> Result<SaveOutcome> {
        let sheets = self.read_sheets()?;

        if let Some(series) = sheets.first() {
            if series.records().iter().any(|existing| existing.url == record.url) {
                tracing::info!(url = %record.url, "already in spreadsheet");
                return Ok(SaveOutcome::AlreadyExists);
            }
        }

        if let Some(sheet) = sheets.iter().find(|sheet| sheet.has_formulas) {
            return Err(ImdbError::Unpreservable(format!(
                "formulas in sheet '{}'",
                sheet.name
            )));
        }

        let buffer = render(&sheets, record)?;
        self.replace_with(&buffer)?;

        tracing::info!(path = %self.path.display(), sheets = sheets.len().max(1), "spreadsheet saved");
        Ok(SaveOutcome::Saved)
    }

    fn read_sheets(&self) -> Result<Vec<Sheet>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut workbook: Xlsx<_> = open_workbook(&self.path)?;
        let mut sheets = Vec::new();

        for name in workbook.sheet_names() {
            let range = workbook.worksheet_range(&name)?;
            let has_formulas = workbook
                .worksheet_formula(&name)?
                .used_cells()
                .any(|(_, _, formula)| !formula.is_empty());
            sheets.push(Sheet {
                name,
                range,
                has_formulas,
            });
        }

        Ok(sheets)
    }

    fn replace_with(&self, bytes: &[u8]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(bytes)?;
        if let Ok(metadata) = fs::metadata(&self.path) {
            tmp.as_file().set_permissions(metadata.permissions())?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        Ok(())
    }
}

fn record_from_row(row: &[Data]) -> Option<SeriesRecord> {
    let cell = |i: usize| {
        row.get(i)
            .map(|c| c.to_string().trim().to_string())
            .unwrap_or_default()
    };

    let record = SeriesRecord {
        title: cell(0),
        rating: cell(1),
        genres: cell(2),
        url: cell(URL_COLUMN),
    };

    if record.cells().iter().all(|c| c.is_empty()) {
        None
    } else {
        Some(record)
    }
}

/// Display width for a column whose longest cell has `longest` characters:
/// padded by two, capped at [`MAX_COLUMN_WIDTH`].
pub fn column_width(longest: usize) -> usize {
    (longest + 2).min(MAX_COLUMN_WIDTH)
}

#[derive(Default)]
struct ColumnWidths(Vec<usize>);

impl ColumnWidths {
    fn widen(&mut self, col: u16, text: &str) {
        let col = col as usize;
        if self.0.len() <= col {
            self.0.resize(col + 1, 0);
        }
        self.0[col] = self.0[col].max(text.chars().count());
    }

    fn apply(&self, worksheet: &mut Worksheet) -> Result<()> {
        for (col, longest) in self.0.iter().enumerate() {
            if *longest > 0 {
                worksheet.set_column_width(col as u16, column_width(*longest) as f64)?;
            }
        }
        Ok(())
    }
}

fn write_cell(worksheet: &mut Worksheet, row: u32, col: u16, cell: &Data, format: &Format) -> Result<()> {
    match cell {
        Data::Empty => {}
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
            worksheet.write_string_with_format(row, col, s, format)?;
        }
        Data::Float(f) => {
            worksheet.write_number_with_format(row, col, *f, format)?;
        }
        Data::Int(i) => {
            worksheet.write_number_with_format(row, col, *i as f64, format)?;
        }
        Data::Bool(b) => {
            worksheet.write_boolean_with_format(row, col, *b, format)?;
        }
        Data::DateTime(dt) => {
            let date_format = format.clone().set_num_format(DATE_FORMAT);
            worksheet.write_number_with_format(row, col, dt.as_f64(), &date_format)?;
        }
        Data::Error(e) => {
            return Err(ImdbError::Unpreservable(format!(
                "error value {:?} at row {}, column {}",
                e,
                row + 1,
                col + 1
            )));
        }
    }
    Ok(())
}

fn render(sheets: &[Sheet], record: &SeriesRecord) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();

    match sheets.split_first() {
        Some((series, others)) => {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(&series.name)?;
            write_series_sheet(worksheet, Some(series), record)?;

            let plain = Format::new();
            for sheet in others {
                let worksheet = workbook.add_worksheet();
                worksheet.set_name(&sheet.name)?;
                for (row, col, cell) in sheet.cells() {
                    write_cell(worksheet, row, col, cell, &plain)?;
                }
            }
        }
        None => {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(SHEET_NAME)?;
            write_series_sheet(worksheet, None, record)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn write_series_sheet(
    worksheet: &mut Worksheet,
    existing: Option<&Sheet>,
    record: &SeriesRecord,
) -> Result<()> {
    let header_format = Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_background_color(Color::RGB(0xD9E1F2))
        .set_border(FormatBorder::Thin);
    let cell_format = Format::new().set_border(FormatBorder::Thin);

    let mut widths = ColumnWidths::default();

    let next_row = match existing.filter(|sheet| !sheet.range.is_empty()) {
        Some(sheet) => {
            for (row, col, cell) in sheet.cells() {
                let format = if row == 0 { &header_format } else { &cell_format };
                write_cell(worksheet, row, col, cell, format)?;
                widths.widen(col, &cell.to_string());
            }
            sheet.next_row().max(1)
        }
        None => {
            for (col, header) in HEADERS.iter().enumerate() {
                worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
                widths.widen(col as u16, header);
            }
            1
        }
    };

    for (col, value) in record.cells().iter().enumerate() {
        worksheet.write_string_with_format(next_row, col as u16, *value, &cell_format)?;
        widths.widen(col as u16, value);
    }

    widths.apply(worksheet)?;
    worksheet.set_freeze_panes(1, 0)?;

    Ok(())
}
