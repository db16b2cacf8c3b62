//! SQLite record table.
//!
//! RULE: Only this file talks to the database.
//! The table is an input source; the engine never writes computed results back.

use crate::{
    error::{EngineError, EngineResult},
    record::YearRecord,
    types::Year,
};
use rusqlite::{params, types::Value, Connection, Row};

pub struct RecordTable {
    conn: Connection,
}

impl RecordTable {
    /// Open (or create) the record database at `path`.
    pub fn open(path: &str) -> EngineResult<Self> {
        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> EngineResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> EngineResult<()> {
        self.conn
            .execute_batch(include_str!("../../../migrations/001_year_record.sql"))?;
        Ok(())
    }

    /// Seed one year.
    pub fn insert_record(&self, r: &YearRecord) -> EngineResult<()> {
        insert_row(&self.conn, r)
    }

    /// Seed many years in one transaction: every row lands or none does.
    /// Used by tooling that converts a JSON dataset into a table.
    pub fn insert_records(&mut self, records: &[YearRecord]) -> EngineResult<()> {
        let tx = self.conn.transaction()?;
        for record in records {
            insert_row(&tx, record)?;
        }
        tx.commit()?;
        log::info!("inserted {} records into sqlite", records.len());
        Ok(())
    }

    /// Every row, ordered by year. A NULL, mistyped or out-of-range cell fails
    /// the whole load with a validation error naming the year and column.
    pub fn load_records(&self) -> EngineResult<Vec<YearRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT year, usa, china, india, emnc_total, ofdi, ifdi, greenfield, m_and_a,
                    gdp_share, gdp_growth, d_esg, billionaire_count
             FROM year_record ORDER BY year ASC",
        )?;
        let rows = stmt
            .query_map([], |row| RawRow::from_row(row))?
            .collect::<Result<Vec<_>, _>>()?;

        let records = rows
            .into_iter()
            .map(RawRow::into_record)
            .collect::<EngineResult<Vec<_>>>()?;
        log::info!("loaded {} records from sqlite", records.len());
        Ok(records)
    }

    pub fn record_count(&self) -> EngineResult<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM year_record", [], |row| row.get(0))?;
        Ok(count)
    }
}

fn insert_row(conn: &Connection, r: &YearRecord) -> EngineResult<()> {
    conn.execute(
        "INSERT INTO year_record (year, usa, china, india, emnc_total, ofdi, ifdi,
                                  greenfield, m_and_a, gdp_share, gdp_growth, d_esg,
                                  billionaire_count)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        params![
            r.year,
            r.usa,
            r.china,
            r.india,
            r.emnc_total,
            r.ofdi,
            r.ifdi,
            r.greenfield,
            r.m_and_a,
            r.gdp_share,
            r.gdp_growth,
            r.d_esg,
            r.billionaire_count,
        ],
    )?;
    Ok(())
}

/// Table columns after `year`, in SELECT order.
const COLUMNS: [&str; 12] = [
    "usa",
    "china",
    "india",
    "emnc_total",
    "ofdi",
    "ifdi",
    "greenfield",
    "m_and_a",
    "gdp_share",
    "gdp_growth",
    "d_esg",
    "billionaire_count",
];

/// One table row as stored, before type, range and NULL checks.
struct RawRow {
    year:  i64,
    cells: Vec<Value>,
}

impl RawRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let cells = (1..=COLUMNS.len())
            .map(|idx| row.get::<_, Value>(idx))
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(Self { year: row.get(0)?, cells })
    }

    fn into_record(self) -> EngineResult<YearRecord> {
        let year = Year::try_from(self.year).map_err(|_| {
            EngineError::validation(format!("year {} is out of range", self.year))
        })?;
        let c = &self.cells;
        Ok(YearRecord {
            year,
            usa:               count(year, 0, &c[0])?,
            china:             count(year, 1, &c[1])?,
            india:             count(year, 2, &c[2])?,
            emnc_total:        count(year, 3, &c[3])?,
            ofdi:              amount(year, 4, &c[4])?,
            ifdi:              amount(year, 5, &c[5])?,
            greenfield:        amount(year, 6, &c[6])?,
            m_and_a:           amount(year, 7, &c[7])?,
            gdp_share:         amount(year, 8, &c[8])?,
            gdp_growth:        amount(year, 9, &c[9])?,
            d_esg:             amount(year, 10, &c[10])?,
            billionaire_count: count(year, 11, &c[11])?,
        })
    }
}

/// Non-negative integer cell that fits a u32.
fn count(year: Year, idx: usize, cell: &Value) -> EngineResult<u32> {
    let column = COLUMNS[idx];
    match cell {
        Value::Integer(i) => u32::try_from(*i).map_err(|_| {
            EngineError::validation(format!("year {year}: column {column} is out of range ({i})"))
        }),
        other => Err(bad_cell(year, column, other, "an integer")),
    }
}

/// Numeric cell. Integers widen to f64.
fn amount(year: Year, idx: usize, cell: &Value) -> EngineResult<f64> {
    match cell {
        Value::Real(f) => Ok(*f),
        Value::Integer(i) => Ok(*i as f64),
        other => Err(bad_cell(year, COLUMNS[idx], other, "a number")),
    }
}

fn bad_cell(year: Year, column: &str, cell: &Value, expected: &str) -> EngineError {
    let found = match cell {
        Value::Null => return EngineError::validation(format!("year {year}: column {column} is NULL")),
        Value::Integer(_) => "integer",
        Value::Real(_) => "real",
        Value::Text(_) => "text",
        Value::Blob(_) => "blob",
    };
    EngineError::validation(format!("year {year}: column {column} holds {found}, expected {expected}"))
}
