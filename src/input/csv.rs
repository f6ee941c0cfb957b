use crate::core::{Catalog, QuakeEvent};
use crate::input::CatalogError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use csv::StringRecord;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// Date-time layouts carrying an explicit offset
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// Date-time layouts without an offset; read as UTC
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Load an event catalog from a CSV file
pub fn load_csv(path: &Path, globe_radius: f64) -> Result<Catalog, CatalogError> {
    let text = std::fs::read_to_string(path)?;
    debug!("Reading catalog from {}", path.display());
    parse_catalog(&text, globe_radius)
}

/// Parse an event catalog from CSV text
///
/// The header row must name `time`, `latitude`, `longitude`, `depth`, `mag`
/// and `place`, in any order. Extra columns are ignored.
///
/// Rows whose time does not parse are dropped; a bad number in any of the
/// numeric columns fails the whole load.
pub fn parse_catalog(text: &str, globe_radius: f64) -> Result<Catalog, CatalogError> {
    let mut lines = text
        .lines()
        .enumerate()
        .flat_map(|(idx, line)| line.split('\r').map(move |part| (idx as u64 + 1, part)))
        .filter(|(_, part)| !part.trim().is_empty());

    let Some((_, header_line)) = lines.next() else {
        return Err(CatalogError::Schema("time"));
    };
    let columns = Columns::resolve(&read_header(header_line)?)?;

    let mut events = Vec::new();
    let mut skipped = 0usize;

    for (line, raw) in lines {
        let record = split_row(raw);

        let raw_time = field(&record, columns.time, "time", line)?;
        let Some(time) = parse_timestamp(raw_time) else {
            debug!(line, value = raw_time, "Skipping row with malformed timestamp");
            skipped += 1;
            continue;
        };

        let latitude: f64 = parse_number(&record, columns.latitude, "latitude", line)?;
        let longitude: f64 = parse_number(&record, columns.longitude, "longitude", line)?;
        let depth_km: f32 = parse_number(&record, columns.depth, "depth", line)?;
        let magnitude: f32 = parse_number(&record, columns.mag, "mag", line)?;
        let place = field(&record, columns.place, "place", line)?;

        events.push(QuakeEvent::new(time, latitude, longitude, depth_km, magnitude, place, globe_radius));
    }

    info!("Catalog loaded: {} events, {} rows skipped for bad timestamps", events.len(), skipped);

    Ok(Catalog::from_events(events))
}

fn read_header(line: &str) -> Result<StringRecord, CatalogError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .double_quote(false)
        .from_reader(line.as_bytes());
    let mut headers = StringRecord::new();
    rdr.read_record(&mut headers)?;
    Ok(headers)
}

/// Split a data row on commas outside quotes.
///
/// Every `"` flips the in-quotes state wherever it appears and is dropped;
/// there is no escaped quote.
fn split_row(line: &str) -> StringRecord {
    let mut record = StringRecord::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                record.push_field(&current);
                current.clear();
            }
            _ => current.push(c),
        }
    }
    record.push_field(&current);
    record
}

/// Parse an ISO-8601-like timestamp, assuming UTC when no offset is given
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Some(dt) = OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(dt.with_timezone(&Utc));
    }

    if let Some(naive) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(naive.and_utc());
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Positions of the required columns in the header row
#[derive(Debug, Clone, Copy)]
struct Columns {
    time: usize,
    latitude: usize,
    longitude: usize,
    depth: usize,
    mag: usize,
    place: usize,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Self, CatalogError> {
        Ok(Self {
            time: find_column(headers, "time")?,
            latitude: find_column(headers, "latitude")?,
            longitude: find_column(headers, "longitude")?,
            depth: find_column(headers, "depth")?,
            mag: find_column(headers, "mag")?,
            place: find_column(headers, "place")?,
        })
    }
}

/// Find a column by name, ignoring surrounding whitespace and ASCII case
fn find_column(headers: &StringRecord, name: &'static str) -> Result<usize, CatalogError> {
    headers
        .iter()
        .position(|header| header.trim().eq_ignore_ascii_case(name))
        .ok_or(CatalogError::Schema(name))
}

fn field<'r>(record: &'r StringRecord, idx: usize, column: &'static str, line: u64) -> Result<&'r str, CatalogError> {
    record.get(idx).ok_or(CatalogError::MissingField { line, column })
}

fn parse_number<T: FromStr>(record: &StringRecord, idx: usize, column: &'static str, line: u64) -> Result<T, CatalogError> {
    let raw = field(record, idx, column, line)?;
    raw.trim().parse::<T>().map_err(|_| CatalogError::FieldParse {
        line,
        column,
        value: raw.to_string(),
    })
}
