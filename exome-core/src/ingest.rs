use std::io::{Read, BufRead, Cursor};
use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::{ExomeError, Result, Variant};

/// Strips the preamble off a tab-separated annotation table.
///
/// Blank lines and lines starting with `#` before the first data row are
/// collected into the preamble; everything from the first data row on is
/// passed through untouched.
pub struct PreambleReader<B> {
    reader: B,
    preamble: String,
    preamble_finished: bool,
    pending: Cursor<Vec<u8>>,
}

impl<B: BufRead> PreambleReader<B> {
    pub fn new(reader: B) -> PreambleReader<B> {
        PreambleReader {
            reader,
            preamble: String::new(),
            preamble_finished: false,
            pending: Cursor::new(Vec::new()),
        }
    }

    pub fn preamble(&self) -> Option<&str> {
        if !self.preamble_finished { return None; }
        Some(&self.preamble)
    }
}

impl<B: BufRead> Read for PreambleReader<B> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let len = self.pending.read(buf)?;
        if len != 0 { return Ok(len); }

        if self.preamble_finished {
            return self.reader.read(buf);
        }

        loop {
            let mut line = String::new();
            let len = self.reader.read_line(&mut line)?;
            if len == 0 {
                self.preamble_finished = true;
                return Ok(0);
            }

            let trimmed = line.trim_start();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                self.preamble.push_str(&line);
            } else {
                // First data row: hand it out before reading further
                self.preamble_finished = true;
                self.pending = Cursor::new(line.into_bytes());
                return self.pending.read(buf);
            }
        }
    }
}

/// One row of a UCSC `refGene` table, in column order.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct GeneRecord {
    pub bin: i64,
    pub name: String,
    pub chrom: String,
    pub strand: String,
    pub txstart: i64,
    pub txend: i64,
    pub cdsstart: i64,
    pub cdsend: i64,
    pub exoncount: i64,
    pub exonstarts: String,
    pub exonends: String,
    pub score: i64,
    pub name2: String,
    pub cdsstartstat: String,
    pub cdsendstat: String,
    pub exonframes: String,
}

impl GeneRecord {
    pub fn parse_from<R: Read>(reader: R) -> Result<Vec<Self>> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .delimiter(b'\t')
            .quoting(false)
            .from_reader(reader);

        let mut records = Vec::new();
        let mut row = csv::StringRecord::new();
        while csv_reader.read_record(&mut row).map_err(ingest_error)? {
            let record: GeneRecord = row.deserialize(None).map_err(ingest_error)?;
            records.push(record);
        }

        debug!(rows = records.len(), "parsed gene records");
        Ok(records)
    }
}

/// Reads a variant export for the gene `symbol`.
///
/// Columns are matched by header name, so extra columns and column order
/// do not matter. The export never names the gene, so every row gets `symbol`.
pub fn parse_variants<R: Read>(reader: R, symbol: &str) -> Result<Vec<Variant>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let mut variants = Vec::new();
    let mut row = csv::StringRecord::new();
    while csv_reader.read_record(&mut row).map_err(ingest_error)? {
        let mut variant: Variant = row.deserialize(Some(&headers)).map_err(ingest_error)?;
        variant.name = symbol.to_string();
        variants.push(variant);
    }

    debug!(symbol, rows = variants.len(), "parsed variant records");
    Ok(variants)
}

/// Errors tied to a record (short rows, bad fields) name its line; the
/// rest stay plain csv errors.
fn ingest_error(error: csv::Error) -> ExomeError {
    match error.position().map(|position| position.line()) {
        Some(line) => ExomeError::Ingest { line, message: error.to_string() },
        None => ExomeError::Csv(error),
    }
}

#[cfg(test)]
const POPULATIONS: &[&str] = &[
    "African",
    "East Asian",
    "European (Non-Finnish)",
    "Finnish",
    "Latino",
    "Other",
    "South Asian",
];

#[cfg(test)]
fn variant_header() -> String {
    let mut columns: Vec<String> = [
        "Chrom", "Position", "RSID", "Reference", "Alternate", "Consequence",
        "Protein Consequence", "Transcript Consequence", "Filter", "Annotation",
        "Flags", "Allele Count", "Allele Number", "Homozygote Count", "Allele Frequency",
    ].iter().map(|column| column.to_string()).collect();
    for population in POPULATIONS {
        columns.push(format!("Allele Count {}", population));
        columns.push(format!("Allele Number {}", population));
        columns.push(format!("Homozygote Count {}", population));
        columns.push(format!("Allele Frequency {}", population));
    }
    columns.join(",")
}
