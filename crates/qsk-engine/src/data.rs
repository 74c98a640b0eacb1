//! Daily bar input set + CSV loader (deterministic).
//!
//! CSV format
//!
//! Required columns:
//! - `symbol`
//! - `date` (YYYY-MM-DD)
//! - `open_micros`
//! - `high_micros`
//! - `low_micros`
//! - `close_micros`
//! - `volume`
//!
//! Optional columns:
//! - `is_complete` (bool; default: true)
//!
//! Blank lines and lines starting with `#` are skipped. Rows are ordered
//! (date ASC, symbol ASC) regardless of input order.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;

use qsk_algorithm::DailyBar;

/// Loader errors are small, explicit, and test-friendly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    EmptyInput,
    MissingHeader(&'static str),
    ParseInt { column: String, value: String },
    ParseBool { column: String, value: String },
    ParseDate { value: String },
    BadRow { line: usize, reason: String },
    Io(String),
}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        LoadError::Io(e.to_string())
    }
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::EmptyInput => write!(f, "empty input"),
            LoadError::MissingHeader(h) => write!(f, "missing header: {}", h),
            LoadError::ParseInt { column, value } => {
                write!(f, "failed to parse int in column {}: {}", column, value)
            }
            LoadError::ParseBool { column, value } => {
                write!(f, "failed to parse bool in column {}: {}", column, value)
            }
            LoadError::ParseDate { value } => {
                write!(f, "failed to parse date (expected YYYY-MM-DD): {}", value)
            }
            LoadError::BadRow { line, reason } => write!(f, "bad row at line {}: {}", line, reason),
            LoadError::Io(e) => write!(f, "io error: {}", e),
        }
    }
}

impl std::error::Error for LoadError {}

/// All input bars, keyed by date then symbol.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BarSet {
    by_date: BTreeMap<NaiveDate, BTreeMap<String, DailyBar>>,
}

impl BarSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bars(bars: Vec<DailyBar>) -> Self {
        let mut set = Self::new();
        for bar in bars {
            set.insert(bar);
        }
        set
    }

    /// Insert a bar; a bar for the same (date, symbol) is overwritten.
    pub fn insert(&mut self, bar: DailyBar) {
        self.by_date
            .entry(bar.date)
            .or_default()
            .insert(bar.symbol.clone(), bar);
    }

    /// Bars delivered on a date, if any.
    pub fn bars_on(&self, date: NaiveDate) -> Option<&BTreeMap<String, DailyBar>> {
        self.by_date.get(&date)
    }

    /// Date -> close_micros series for one symbol (default-benchmark input).
    pub fn closes_for(&self, symbol: &str) -> BTreeMap<NaiveDate, i64> {
        let mut out = BTreeMap::new();
        for (date, bars) in &self.by_date {
            if let Some(bar) = bars.get(symbol) {
                out.insert(*date, bar.close_micros);
            }
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }
}

/// Load a bar set from a CSV file on disk.
///
/// IO is explicit; parsing and ordering are deterministic.
pub fn load_csv_file(path: impl AsRef<Path>) -> Result<BarSet, LoadError> {
    let s = fs::read_to_string(path)?;
    Ok(BarSet::from_bars(parse_csv_bars(&s)?))
}

/// Parse bars from CSV content (pure, deterministic).
pub fn parse_csv_bars(csv: &str) -> Result<Vec<DailyBar>, LoadError> {
    let mut lines = csv.lines();

    let header_line = lines.next().ok_or(LoadError::EmptyInput)?;
    // Normalize header: trim whitespace and strip UTF-8 BOM if present.
    let header_line = header_line.trim().trim_start_matches('\u{feff}');
    if header_line.is_empty() {
        return Err(LoadError::EmptyInput);
    }

    let headers: Vec<String> = split_csv_line(header_line);

    let mut idx: BTreeMap<String, usize> = BTreeMap::new();
    for (i, h) in headers.iter().enumerate() {
        idx.insert(h.clone(), i);
    }

    let col_symbol = find_required(&idx, "symbol")?;
    let col_date = find_required(&idx, "date")?;
    let col_open = find_required(&idx, "open_micros")?;
    let col_high = find_required(&idx, "high_micros")?;
    let col_low = find_required(&idx, "low_micros")?;
    let col_close = find_required(&idx, "close_micros")?;
    let col_volume = find_required(&idx, "volume")?;

    let col_is_complete = idx.get("is_complete").copied();

    let mut out: Vec<DailyBar> = Vec::new();

    for (line_idx0, raw) in lines.enumerate() {
        let line_no = line_idx0 + 2; // 1-based, counting header as line 1

        let raw = raw.trim();
        if raw.is_empty() || raw.starts_with('#') {
            continue;
        }

        let fields = split_csv_line(raw);
        let get = |col: usize| -> Result<&str, LoadError> {
            fields
                .get(col)
                .map(|s| s.as_str())
                .ok_or_else(|| LoadError::BadRow {
                    line: line_no,
                    reason: format!("missing column index {col}"),
                })
        };

        let symbol = get(col_symbol)?.trim().to_string();
        if symbol.is_empty() {
            return Err(LoadError::BadRow {
                line: line_no,
                reason: "symbol is empty".to_string(),
            });
        }

        let date = parse_date(get(col_date)?)?;
        let open_micros = parse_i64(get(col_open)?, "open_micros")?;
        let high_micros = parse_i64(get(col_high)?, "high_micros")?;
        let low_micros = parse_i64(get(col_low)?, "low_micros")?;
        let close_micros = parse_i64(get(col_close)?, "close_micros")?;
        let volume = parse_i64(get(col_volume)?, "volume")?;

        let is_complete = match col_is_complete {
            Some(c) => parse_bool(get(c)?, "is_complete")?,
            None => true,
        };

        let mut bar = DailyBar::new(
            symbol,
            date,
            open_micros,
            high_micros,
            low_micros,
            close_micros,
            volume,
        );
        bar.is_complete = is_complete;
        out.push(bar);
    }

    // Deterministic ordering: (date ASC, symbol ASC)
    out.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.symbol.cmp(&b.symbol)));
    Ok(out)
}

fn find_required(idx: &BTreeMap<String, usize>, name: &'static str) -> Result<usize, LoadError> {
    idx.get(name).copied().ok_or(LoadError::MissingHeader(name))
}

fn parse_date(s: &str) -> Result<NaiveDate, LoadError> {
    let t = s.trim();
    NaiveDate::parse_from_str(t, "%Y-%m-%d").map_err(|_| LoadError::ParseDate {
        value: t.to_string(),
    })
}

fn parse_i64(s: &str, col: &str) -> Result<i64, LoadError> {
    let t = s.trim();
    t.parse::<i64>().map_err(|_| LoadError::ParseInt {
        column: col.to_string(),
        value: t.to_string(),
    })
}

fn parse_bool(s: &str, col: &str) -> Result<bool, LoadError> {
    let t = s.trim();
    match t {
        "1" | "true" | "TRUE" | "True" => Ok(true),
        "0" | "false" | "FALSE" | "False" => Ok(false),
        _ => Err(LoadError::ParseBool {
            column: col.to_string(),
            value: t.to_string(),
        }),
    }
}

/// Minimal CSV splitting (no quoting support).
fn split_csv_line(line: &str) -> Vec<String> {
    line.split(',').map(|s| s.trim().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_csv_sorts_deterministically() {
        let csv = r#"symbol,date,open_micros,high_micros,low_micros,close_micros,volume
B,2013-10-08,10,12,9,11,100
A,2013-10-08,20,22,19,21,200
A,2013-10-07,1,1,1,1,1
"#;

        let bars = parse_csv_bars(csv).expect("parse");
        assert_eq!(bars.len(), 3);

        // Sorted by date ASC, then symbol ASC
        assert_eq!(bars[0].symbol, "A");
        assert_eq!(bars[0].date, NaiveDate::from_ymd_opt(2013, 10, 7).unwrap());
        assert_eq!(bars[1].symbol, "A");
        assert_eq!(bars[2].symbol, "B");
    }

    #[test]
    fn comments_and_blank_lines_skipped() {
        let csv = "symbol,date,open_micros,high_micros,low_micros,close_micros,volume\n\
                   # fixture header comment\n\
                   \n\
                   SPY,2013-10-07,1,2,1,2,10\n";
        let bars = parse_csv_bars(csv).expect("parse");
        assert_eq!(bars.len(), 1);
        assert!(bars[0].is_complete);
    }

    #[test]
    fn missing_header_is_an_error() {
        let csv = "symbol,open_micros,high_micros,low_micros,close_micros,volume\n";
        assert_eq!(parse_csv_bars(csv), Err(LoadError::MissingHeader("date")));
    }

    #[test]
    fn bad_date_is_an_error() {
        let csv = "symbol,date,open_micros,high_micros,low_micros,close_micros,volume\n\
                   SPY,10/07/2013,1,2,1,2,10\n";
        assert_eq!(
            parse_csv_bars(csv),
            Err(LoadError::ParseDate {
                value: "10/07/2013".to_string()
            })
        );
    }

    #[test]
    fn is_complete_column_parsed() {
        let csv = "symbol,date,open_micros,high_micros,low_micros,close_micros,volume,is_complete\n\
                   SPY,2013-10-07,1,2,1,2,10,false\n";
        let bars = parse_csv_bars(csv).expect("parse");
        assert!(!bars[0].is_complete);
    }

    #[test]
    fn closes_for_extracts_one_symbol() {
        let csv = "symbol,date,open_micros,high_micros,low_micros,close_micros,volume\n\
                   SPY,2013-10-07,1,2,1,7,10\n\
                   QQQ,2013-10-07,1,2,1,9,10\n\
                   SPY,2013-10-08,1,2,1,8,10\n";
        let set = BarSet::from_bars(parse_csv_bars(csv).unwrap());
        let closes = set.closes_for("SPY");
        assert_eq!(closes.len(), 2);
        assert_eq!(
            closes[&NaiveDate::from_ymd_opt(2013, 10, 7).unwrap()],
            7
        );
    }
}
