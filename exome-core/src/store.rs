use std::path::Path;
use rusqlite::{Connection, OpenFlags, Row, ToSql};
use serde::Serialize;
use tracing::info;
use crate::{Gene, GeneRecord, Result, Variant};

const GENE_COLUMNS: &[(&str, &str)] = &[
    ("name", "TEXT NOT NULL"),
    ("chrom", "TEXT NOT NULL"),
    ("strand", "TEXT NOT NULL"),
    ("txstart", "INTEGER NOT NULL"),
    ("txend", "INTEGER NOT NULL"),
    ("cdsstart", "INTEGER NOT NULL"),
    ("cdsend", "INTEGER NOT NULL"),
    ("exoncount", "INTEGER NOT NULL"),
    ("exonstarts", "TEXT NOT NULL"),
    ("exonends", "TEXT NOT NULL"),
    ("score", "INTEGER NOT NULL"),
    ("name2", "TEXT NOT NULL"),
    ("cdsstartstat", "TEXT NOT NULL"),
    ("cdsendstat", "TEXT NOT NULL"),
    ("exonframes", "TEXT NOT NULL"),
];

const VARIANT_COLUMNS: &[(&str, &str)] = &[
    ("name", "TEXT NOT NULL"),
    ("chrom", "TEXT NOT NULL"),
    ("position", "INTEGER NOT NULL"),
    ("rsid", "TEXT NOT NULL"),
    ("reference", "TEXT NOT NULL"),
    ("alternate", "TEXT NOT NULL"),
    ("consequence", "TEXT NOT NULL"),
    ("protein_consequence", "TEXT NOT NULL"),
    ("transcript_consequence", "TEXT NOT NULL"),
    ("filter", "TEXT NOT NULL"),
    ("annotation", "TEXT NOT NULL"),
    ("flags", "TEXT NOT NULL"),
    ("allele_count", "INTEGER NOT NULL"),
    ("allele_number", "INTEGER NOT NULL"),
    ("homozygote_count", "INTEGER NOT NULL"),
    ("allele_frequency", "REAL NOT NULL"),
    ("allele_count_african", "INTEGER NOT NULL"),
    ("allele_number_african", "INTEGER NOT NULL"),
    ("homozygote_count_african", "INTEGER NOT NULL"),
    ("allele_frequency_african", "REAL NOT NULL"),
    ("allele_count_east_asian", "INTEGER NOT NULL"),
    ("allele_number_east_asian", "INTEGER NOT NULL"),
    ("homozygote_count_east_asian", "INTEGER NOT NULL"),
    ("allele_frequency_east_asian", "REAL NOT NULL"),
    ("allele_count_european_non_finnish", "INTEGER NOT NULL"),
    ("allele_number_european_non_finnish", "INTEGER NOT NULL"),
    ("homozygote_count_european_non_finnish", "INTEGER NOT NULL"),
    ("allele_frequency_european_non_finnish", "REAL NOT NULL"),
    ("allele_count_finnish", "INTEGER NOT NULL"),
    ("allele_number_finnish", "INTEGER NOT NULL"),
    ("homozygote_count_finnish", "INTEGER NOT NULL"),
    ("allele_frequency_finnish", "REAL NOT NULL"),
    ("allele_count_latino", "INTEGER NOT NULL"),
    ("allele_number_latino", "INTEGER NOT NULL"),
    ("homozygote_count_latino", "INTEGER NOT NULL"),
    ("allele_frequency_latino", "REAL NOT NULL"),
    ("allele_count_other", "INTEGER NOT NULL"),
    ("allele_number_other", "INTEGER NOT NULL"),
    ("homozygote_count_other", "INTEGER NOT NULL"),
    ("allele_frequency_other", "REAL NOT NULL"),
    ("allele_count_south_asian", "INTEGER NOT NULL"),
    ("allele_number_south_asian", "INTEGER NOT NULL"),
    ("homozygote_count_south_asian", "INTEGER NOT NULL"),
    ("allele_frequency_south_asian", "REAL NOT NULL"),
];

/// Row counts of both tables.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub struct Counts {
    pub genes: i64,
    pub variants: i64,
}

/// A handle on the SQLite file holding the gene and variant tables.
///
/// Handles are cheap to open; the web server opens one per request and
/// drops it when the request is answered.
pub struct Store {
    conn: Connection,
}

impl Store {

    /// Opens an existing database for reading only.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Store> {
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(path, flags)?;
        Ok(Store { conn })
    }

    /// Opens or creates a database for loading, creating the tables if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Store> {
        let conn = Connection::open(path)?;
        Store::bootstrap(conn)
    }

    pub fn in_memory() -> Result<Store> {
        Store::bootstrap(Connection::open_in_memory()?)
    }

    fn bootstrap(conn: Connection) -> Result<Store> {
        let schema = format!(
            "CREATE TABLE IF NOT EXISTS gene (id INTEGER PRIMARY KEY, {});
             CREATE INDEX IF NOT EXISTS gene_name2 ON gene (name2);
             CREATE TABLE IF NOT EXISTS variant (id INTEGER PRIMARY KEY, {});
             CREATE INDEX IF NOT EXISTS variant_name ON variant (name);",
            column_definitions(GENE_COLUMNS),
            column_definitions(VARIANT_COLUMNS),
        );
        conn.execute_batch(&schema)?;
        Ok(Store { conn })
    }

    /// Every transcript row whose `name2` is exactly `symbol`.
    pub fn genes_with_symbol(&self, symbol: &str) -> Result<Vec<Gene>> {
        let sql = format!("SELECT {} FROM gene WHERE name2 = ?1", select_list(GENE_COLUMNS));
        let mut stmt = self.conn.prepare_cached(&sql)?;
        let genes = stmt.query_map([symbol], gene_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(genes)
    }

    /// Every variant row annotated against `symbol`, in no particular order.
    pub fn variants_with_symbol(&self, symbol: &str) -> Result<Vec<Variant>> {
        let sql = format!("SELECT {} FROM variant WHERE name = ?1", select_list(VARIANT_COLUMNS));
        let mut stmt = self.conn.prepare_cached(&sql)?;
        let variants = stmt.query_map([symbol], variant_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(variants)
    }

    /// The first `limit` gene rows ordered by `name2` descending, newest
    /// row first within a symbol.
    pub fn genes_by_symbol_desc(&self, limit: usize) -> Result<Vec<Gene>> {
        let sql = format!(
            "SELECT {} FROM gene ORDER BY name2 DESC, id DESC LIMIT ?1",
            select_list(GENE_COLUMNS),
        );
        let mut stmt = self.conn.prepare_cached(&sql)?;
        let genes = stmt.query_map([limit as i64], gene_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(genes)
    }

    /// Inserts all records in a single transaction.
    pub fn insert_genes(&mut self, records: &[GeneRecord]) -> Result<usize> {
        let sql = insert_statement("gene", GENE_COLUMNS);
        let tx = self.conn.transaction()?;
        {
            let mut insert = tx.prepare(&sql)?;
            for record in records {
                let values: [&dyn ToSql; 15] = [
                    &record.name,
                    &record.chrom,
                    &record.strand,
                    &record.txstart,
                    &record.txend,
                    &record.cdsstart,
                    &record.cdsend,
                    &record.exoncount,
                    &record.exonstarts,
                    &record.exonends,
                    &record.score,
                    &record.name2,
                    &record.cdsstartstat,
                    &record.cdsendstat,
                    &record.exonframes,
                ];
                insert.execute(&values[..])?;
            }
        }
        tx.commit()?;

        info!(rows = records.len(), "inserted gene rows");
        Ok(records.len())
    }

    /// Inserts all variants under `symbol` in a single transaction,
    /// whatever `name` the variants carried before.
    pub fn insert_variants(&mut self, symbol: &str, variants: &[Variant]) -> Result<usize> {
        let sql = insert_statement("variant", VARIANT_COLUMNS);
        let tx = self.conn.transaction()?;
        {
            let mut insert = tx.prepare(&sql)?;
            for v in variants {
                let values: [&dyn ToSql; 44] = [
                    &symbol,
                    &v.chrom,
                    &v.position,
                    &v.rsid,
                    &v.reference,
                    &v.alternate,
                    &v.consequence,
                    &v.protein_consequence,
                    &v.transcript_consequence,
                    &v.filter,
                    &v.annotation,
                    &v.flags,
                    &v.allele_count,
                    &v.allele_number,
                    &v.homozygote_count,
                    &v.allele_frequency,
                    &v.allele_count_african,
                    &v.allele_number_african,
                    &v.homozygote_count_african,
                    &v.allele_frequency_african,
                    &v.allele_count_east_asian,
                    &v.allele_number_east_asian,
                    &v.homozygote_count_east_asian,
                    &v.allele_frequency_east_asian,
                    &v.allele_count_european_non_finnish,
                    &v.allele_number_european_non_finnish,
                    &v.homozygote_count_european_non_finnish,
                    &v.allele_frequency_european_non_finnish,
                    &v.allele_count_finnish,
                    &v.allele_number_finnish,
                    &v.homozygote_count_finnish,
                    &v.allele_frequency_finnish,
                    &v.allele_count_latino,
                    &v.allele_number_latino,
                    &v.homozygote_count_latino,
                    &v.allele_frequency_latino,
                    &v.allele_count_other,
                    &v.allele_number_other,
                    &v.homozygote_count_other,
                    &v.allele_frequency_other,
                    &v.allele_count_south_asian,
                    &v.allele_number_south_asian,
                    &v.homozygote_count_south_asian,
                    &v.allele_frequency_south_asian,
                ];
                insert.execute(&values[..])?;
            }
        }
        tx.commit()?;

        info!(symbol, rows = variants.len(), "inserted variant rows");
        Ok(variants.len())
    }

    pub fn counts(&self) -> Result<Counts> {
        let genes = self.conn.query_row("SELECT COUNT(*) FROM gene", [], |row| row.get(0))?;
        let variants = self.conn.query_row("SELECT COUNT(*) FROM variant", [], |row| row.get(0))?;
        Ok(Counts { genes, variants })
    }
}

fn column_definitions(columns: &[(&str, &str)]) -> String {
    columns.iter()
        .map(|(name, kind)| format!("{} {}", name, kind))
        .collect::<Vec<_>>()
        .join(", ")
}

fn select_list(columns: &[(&str, &str)]) -> String {
    std::iter::once("id")
        .chain(columns.iter().map(|(name, _)| *name))
        .collect::<Vec<_>>()
        .join(", ")
}

fn insert_statement(table: &str, columns: &[(&str, &str)]) -> String {
    let names = columns.iter().map(|(name, _)| *name).collect::<Vec<_>>().join(", ");
    let placeholders = (1..=columns.len()).map(|i| format!("?{}", i)).collect::<Vec<_>>().join(", ");
    format!("INSERT INTO {} ({}) VALUES ({})", table, names, placeholders)
}

fn gene_from_row(row: &Row<'_>) -> rusqlite::Result<Gene> {
    Ok(Gene {
        id: row.get("id")?,
        name: row.get("name")?,
        chrom: row.get("chrom")?,
        strand: row.get("strand")?,
        txstart: row.get("txstart")?,
        txend: row.get("txend")?,
        cdsstart: row.get("cdsstart")?,
        cdsend: row.get("cdsend")?,
        exoncount: row.get("exoncount")?,
        exonstarts: row.get("exonstarts")?,
        exonends: row.get("exonends")?,
        score: row.get("score")?,
        name2: row.get("name2")?,
        cdsstartstat: row.get("cdsstartstat")?,
        cdsendstat: row.get("cdsendstat")?,
        exonframes: row.get("exonframes")?,
    })
}

fn variant_from_row(row: &Row<'_>) -> rusqlite::Result<Variant> {
    Ok(Variant {
        id: row.get("id")?,
        name: row.get("name")?,
        chrom: row.get("chrom")?,
        position: row.get("position")?,
        rsid: row.get("rsid")?,
        reference: row.get("reference")?,
        alternate: row.get("alternate")?,
        consequence: row.get("consequence")?,
        protein_consequence: row.get("protein_consequence")?,
        transcript_consequence: row.get("transcript_consequence")?,
        filter: row.get("filter")?,
        annotation: row.get("annotation")?,
        flags: row.get("flags")?,
        allele_count: row.get("allele_count")?,
        allele_number: row.get("allele_number")?,
        homozygote_count: row.get("homozygote_count")?,
        allele_frequency: row.get("allele_frequency")?,
        allele_count_african: row.get("allele_count_african")?,
        allele_number_african: row.get("allele_number_african")?,
        homozygote_count_african: row.get("homozygote_count_african")?,
        allele_frequency_african: row.get("allele_frequency_african")?,
        allele_count_east_asian: row.get("allele_count_east_asian")?,
        allele_number_east_asian: row.get("allele_number_east_asian")?,
        homozygote_count_east_asian: row.get("homozygote_count_east_asian")?,
        allele_frequency_east_asian: row.get("allele_frequency_east_asian")?,
        allele_count_european_non_finnish: row.get("allele_count_european_non_finnish")?,
        allele_number_european_non_finnish: row.get("allele_number_european_non_finnish")?,
        homozygote_count_european_non_finnish: row.get("homozygote_count_european_non_finnish")?,
        allele_frequency_european_non_finnish: row.get("allele_frequency_european_non_finnish")?,
        allele_count_finnish: row.get("allele_count_finnish")?,
        allele_number_finnish: row.get("allele_number_finnish")?,
        homozygote_count_finnish: row.get("homozygote_count_finnish")?,
        allele_frequency_finnish: row.get("allele_frequency_finnish")?,
        allele_count_latino: row.get("allele_count_latino")?,
        allele_number_latino: row.get("allele_number_latino")?,
        homozygote_count_latino: row.get("homozygote_count_latino")?,
        allele_frequency_latino: row.get("allele_frequency_latino")?,
        allele_count_other: row.get("allele_count_other")?,
        allele_number_other: row.get("allele_number_other")?,
        homozygote_count_other: row.get("homozygote_count_other")?,
        allele_frequency_other: row.get("allele_frequency_other")?,
        allele_count_south_asian: row.get("allele_count_south_asian")?,
        allele_number_south_asian: row.get("allele_number_south_asian")?,
        homozygote_count_south_asian: row.get("homozygote_count_south_asian")?,
        allele_frequency_south_asian: row.get("allele_frequency_south_asian")?,
    })
}

#[cfg(test)]
pub(crate) fn record_from_gene(gene: &Gene) -> GeneRecord {
    GeneRecord {
        bin: 0,
        name: gene.name.clone(),
        chrom: gene.chrom.clone(),
        strand: gene.strand.clone(),
        txstart: gene.txstart,
        txend: gene.txend,
        cdsstart: gene.cdsstart,
        cdsend: gene.cdsend,
        exoncount: gene.exoncount,
        exonstarts: gene.exonstarts.clone(),
        exonends: gene.exonends.clone(),
        score: gene.score,
        name2: gene.name2.clone(),
        cdsstartstat: gene.cdsstartstat.clone(),
        cdsendstat: gene.cdsendstat.clone(),
        exonframes: gene.exonframes.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_gene;

    #[test]
    fn test_schema_matches_models() {
        let gene = serde_json::to_value(test_gene(1, "NM_1", "ABC", 1)).unwrap();
        let gene_fields = gene.as_object().unwrap().len();
        assert_eq!(GENE_COLUMNS.len() + 1, gene_fields);

        let variant = serde_json::to_value(Variant::default()).unwrap();
        let variant_fields = variant.as_object().unwrap();
        assert_eq!(VARIANT_COLUMNS.len() + 1, variant_fields.len());
        assert!(VARIANT_COLUMNS.iter().all(|(name, _)| variant_fields.contains_key(*name)));
    }

    #[test]
    fn test_round_trip_genes() {
        let mut store = Store::in_memory().unwrap();
        let expected = test_gene(1, "NM_174936", "PCSK9", 12);
        let inserted = store.insert_genes(&[record_from_gene(&expected)]).unwrap();
        assert_eq!(inserted, 1);

        let genes = store.genes_with_symbol("PCSK9").unwrap();
        assert_eq!(genes, vec![expected]);
        assert!(store.genes_with_symbol("pcsk9").unwrap().is_empty());
    }

    #[test]
    fn test_variants_with_symbol_uses_insert_symbol() {
        let mut store = Store::in_memory().unwrap();
        let variant = Variant {
            name: "WRONG".to_string(),
            chrom: "1".to_string(),
            position: 55505510,
            allele_frequency_finnish: 0.25,
            ..Variant::default()
        };
        store.insert_variants("PCSK9", &[variant.clone(), variant]).unwrap();

        let variants = store.variants_with_symbol("PCSK9").unwrap();
        assert_eq!(variants.len(), 2);
        assert!(variants.iter().all(|v| v.name == "PCSK9"));
        assert_eq!(variants[0].allele_frequency_finnish, 0.25);
        assert!(store.variants_with_symbol("WRONG").unwrap().is_empty());
    }

    #[test]
    fn test_genes_by_symbol_desc() {
        let mut store = Store::in_memory().unwrap();
        let records: Vec<_> = [("NM_1", "AAA"), ("NM_2", "CCC"), ("NM_3", "BBB"), ("NM_4", "CCC")]
            .iter()
            .map(|(name, name2)| record_from_gene(&test_gene(0, name, name2, 1)))
            .collect();
        store.insert_genes(&records).unwrap();

        let names: Vec<_> = store.genes_by_symbol_desc(3).unwrap()
            .into_iter().map(|gene| gene.name).collect();
        assert_eq!(names, vec!["NM_4", "NM_2", "NM_3"]);
    }

    #[test]
    fn test_counts() {
        let mut store = Store::in_memory().unwrap();
        assert_eq!(store.counts().unwrap(), Counts { genes: 0, variants: 0 });
        store.insert_genes(&[record_from_gene(&test_gene(0, "NM_1", "ABC", 2))]).unwrap();
        store.insert_variants("ABC", &[Variant::default()]).unwrap();
        assert_eq!(store.counts().unwrap(), Counts { genes: 1, variants: 1 });
    }

    #[test]
    fn test_open_missing_file_fails() {
        assert!(Store::open("/nonexistent/dir/exome.db").is_err());
    }
}
