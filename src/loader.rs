// Table ingestion: fetch a table from a `TableSource`, check its header row
// against the static schema, then turn every raw text row into a typed record.
//
// Numeric cells go through `parse_f64_safe`; a cell that is present but does
// not parse becomes `None` and is counted in `LoadReport::coerced_nulls`.
use crate::error::ProviderError;
use crate::schema::TableId;
use crate::types::{
    FamousPlace, GenderDistribution, GenderShare, RawGenderRow, RawPlaceRow, RawVisitorsRow,
    TopPlace, YearlyVisitors,
};
use crate::util::{clean_text, parse_f64_safe};
use csv::{ReaderBuilder, Trim};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Anything that can hand out the rows of a table as CSV text.
///
/// The source is passed explicitly to every analysis pass; nothing keeps a
/// connection around between passes.
pub trait TableSource {
    fn open(&self, table: TableId) -> Result<Box<dyn Read + '_>, ProviderError>;
}

/// Reads `<dir>/<WAREHOUSE_NAME>.csv`, one export per table.
#[derive(Debug, Clone)]
pub struct CsvDirSource {
    dir: PathBuf,
}

impl CsvDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, table: TableId) -> PathBuf {
        self.dir.join(format!("{}.csv", table.warehouse_name()))
    }
}

impl TableSource for CsvDirSource {
    fn open(&self, table: TableId) -> Result<Box<dyn Read + '_>, ProviderError> {
        let path = self.path_for(table);
        debug!(path = %path.display(), "opening table export");
        let file = File::open(&path).map_err(|source| ProviderError::Unavailable { table, source })?;
        Ok(Box::new(file))
    }
}

/// CSV text held in memory, keyed by table.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    tables: HashMap<TableId, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, table: TableId, csv_text: impl Into<String>) -> Self {
        self.tables.insert(table, csv_text.into());
        self
    }
}

impl TableSource for MemorySource {
    fn open(&self, table: TableId) -> Result<Box<dyn Read + '_>, ProviderError> {
        match self.tables.get(&table) {
            Some(text) => Ok(Box::new(Cursor::new(text.as_bytes()))),
            None => Err(ProviderError::Unavailable {
                table,
                source: io::Error::new(io::ErrorKind::NotFound, "table not registered"),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Data rows read from the source, including undecodable ones.
    pub total_rows: usize,
    /// Rows that became typed records.
    pub loaded_rows: usize,
    /// Rows dropped because they could not be decoded or lacked their key.
    pub skipped_rows: usize,
    /// Numeric cells that were present but coerced to missing.
    pub coerced_nulls: usize,
}

#[derive(Default)]
struct Coercer {
    coerced: usize,
}

impl Coercer {
    fn number(&mut self, cell: Option<&str>) -> Option<f64> {
        let value = parse_f64_safe(cell);
        if value.is_none() && cell.is_some_and(|c| !c.trim().is_empty()) {
            self.coerced += 1;
        }
        value
    }

    fn non_negative(&mut self, cell: Option<&str>) -> Option<f64> {
        match self.number(cell) {
            Some(v) if v < 0.0 => {
                self.coerced += 1;
                None
            }
            other => other,
        }
    }
}

fn read_rows<T: DeserializeOwned>(
    source: &dyn TableSource,
    table: TableId,
) -> Result<(Vec<T>, LoadReport), ProviderError> {
    let reader = source.open(table)?;
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|source| ProviderError::Read { table, source })?
        .clone();
    let present: HashSet<&str> = headers.iter().collect();
    let missing: Vec<String> = table
        .required_columns()
        .into_iter()
        .filter(|c| !present.contains(c.as_str()))
        .collect();
    if !missing.is_empty() {
        return Err(ProviderError::Malformed { table, missing });
    }

    let mut report = LoadReport::default();
    let mut rows = Vec::new();
    for (line, result) in rdr.deserialize::<T>().enumerate() {
        report.total_rows += 1;
        match result {
            Ok(row) => rows.push(row),
            Err(e) => {
                debug!(%table, line = line + 1, error = %e, "skipping undecodable row");
                report.skipped_rows += 1;
            }
        }
    }
    Ok((rows, report))
}

fn finish<T>(
    table: TableId,
    records: Vec<T>,
    mut report: LoadReport,
    coercer: Coercer,
) -> Result<(Vec<T>, LoadReport), ProviderError> {
    if records.is_empty() {
        return Err(ProviderError::Empty { table });
    }
    report.loaded_rows = records.len();
    report.coerced_nulls = coercer.coerced;
    if report.skipped_rows > 0 || report.coerced_nulls > 0 {
        warn!(
            %table,
            skipped = report.skipped_rows,
            coerced = report.coerced_nulls,
            "table contained unusable values"
        );
    }
    info!(%table, rows = report.loaded_rows, "table loaded");
    Ok((records, report))
}

pub fn load_visitors(
    source: &dyn TableSource,
) -> Result<(Vec<YearlyVisitors>, LoadReport), ProviderError> {
    let table = TableId::YearlyVisitors;
    let (raw, mut report) = read_rows::<RawVisitorsRow>(source, table)?;
    let mut coercer = Coercer::default();
    let mut records = Vec::with_capacity(raw.len());

    for mut row in raw {
        let Some(country) = clean_text(row.country.take()) else {
            report.skipped_rows += 1;
            continue;
        };
        let visitors = row.year_cells().map(|cell| coercer.non_negative(cell));
        records.push(YearlyVisitors { country, visitors });
    }
    finish(table, records, report, coercer)
}

pub fn load_gender(
    source: &dyn TableSource,
) -> Result<(Vec<GenderDistribution>, LoadReport), ProviderError> {
    let table = TableId::GenderDistribution;
    let (raw, mut report) = read_rows::<RawGenderRow>(source, table)?;
    let mut coercer = Coercer::default();
    let mut records = Vec::with_capacity(raw.len());
    let mut out_of_range = 0usize;

    for mut row in raw {
        let Some(country) = clean_text(row.country.take()) else {
            report.skipped_rows += 1;
            continue;
        };
        let shares = row.year_cells().map(|(male, female)| GenderShare {
            male_pct: coercer.number(male),
            female_pct: coercer.number(female),
        });
        // Shares are kept as given; only flag values outside a percentage range.
        out_of_range += shares
            .iter()
            .flat_map(|s| [s.male_pct, s.female_pct])
            .flatten()
            .filter(|v| !(0.0..=100.0).contains(v))
            .count();
        records.push(GenderDistribution { country, shares });
    }
    if out_of_range > 0 {
        warn!(%table, values = out_of_range, "gender shares outside 0..=100 kept as-is");
    }
    finish(table, records, report, coercer)
}

pub fn load_famous_places(
    source: &dyn TableSource,
) -> Result<(Vec<FamousPlace>, LoadReport), ProviderError> {
    let table = TableId::FamousPlaces;
    let (raw, mut report) = read_rows::<RawPlaceRow>(source, table)?;
    let mut coercer = Coercer::default();
    let mut records = Vec::with_capacity(raw.len());

    for row in raw {
        let Some(name) = clean_text(row.name) else {
            report.skipped_rows += 1;
            continue;
        };
        records.push(FamousPlace {
            name,
            zone: clean_text(row.zone).unwrap_or_else(|| "Unknown".to_string()),
            state: clean_text(row.state).unwrap_or_else(|| "Unknown".to_string()),
            city: clean_text(row.city).unwrap_or_else(|| "Unknown".to_string()),
            place_type: clean_text(row.place_type).unwrap_or_else(|| "Unspecified".to_string()),
            time_needed_hours: coercer.number(row.time_needed.as_deref()),
            entrance_fee_inr: coercer.number(row.entrance_fee.as_deref()),
            rating: coercer.number(row.rating.as_deref()),
            review_count_lakhs: coercer.number(row.reviews.as_deref()),
            dslr_allowed: clean_text(row.dslr_allowed).unwrap_or_else(|| "Unknown".to_string()),
            best_time_to_visit: clean_text(row.best_time).unwrap_or_else(|| "Unknown".to_string()),
            image_url: clean_text(row.image_url),
        });
    }
    finish(table, records, report, coercer)
}

pub fn load_top_places(
    source: &dyn TableSource,
) -> Result<(Vec<TopPlace>, LoadReport), ProviderError> {
    let table = TableId::TopPlaces;
    let (raw, mut report) = read_rows::<RawPlaceRow>(source, table)?;
    let mut coercer = Coercer::default();
    let mut records = Vec::with_capacity(raw.len());

    for row in raw {
        let Some(name) = clean_text(row.name) else {
            report.skipped_rows += 1;
            continue;
        };
        records.push(TopPlace {
            name,
            city: clean_text(row.city),
            place_type: clean_text(row.place_type).unwrap_or_else(|| "Unspecified".to_string()),
            time_needed_hours: coercer.number(row.time_needed.as_deref()),
            entrance_fee_inr: coercer.number(row.entrance_fee.as_deref()),
            rating: coercer.number(row.rating.as_deref()),
            review_count_lakhs: coercer.number(row.reviews.as_deref()),
        });
    }
    finish(table, records, report, coercer)
}
