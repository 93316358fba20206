use exome::{GeneRecord, Store, Variant};
use exome_api::app::AppData;
use tempfile::TempDir;

pub struct Fixture {
    // Keeps the database directory alive for the length of the test
    _dir: TempDir,
    pub data: AppData,
}

pub fn gene_record(name: &str, name2: &str, exoncount: i64) -> GeneRecord {
    let starts: String = (0..exoncount).map(|i| format!("{},", 1000 + i * 100)).collect();
    let ends: String = (0..exoncount).map(|i| format!("{},", 1050 + i * 100)).collect();
    GeneRecord {
        name: name.to_string(),
        chrom: "chr1".to_string(),
        strand: "+".to_string(),
        txstart: 1000,
        txend: 1050 + (exoncount - 1) * 100,
        cdsstart: 1010,
        cdsend: 1040 + (exoncount - 1) * 100,
        exoncount,
        exonstarts: starts,
        exonends: ends,
        name2: name2.to_string(),
        cdsstartstat: "cmpl".to_string(),
        cdsendstat: "cmpl".to_string(),
        ..GeneRecord::default()
    }
}

pub fn variant(position: i64, annotation: &str) -> Variant {
    Variant {
        chrom: "1".to_string(),
        position,
        rsid: format!("rs{}", position),
        reference: "A".to_string(),
        alternate: "G".to_string(),
        annotation: annotation.to_string(),
        allele_count: 3,
        allele_number: 1000,
        allele_frequency: 0.003,
        ..Variant::default()
    }
}

/// PCSK9 with two transcripts and two variants, LDLR with no variants.
pub fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("exome.db");

    let mut store = Store::create(&path).unwrap();
    store.insert_genes(&[
        gene_record("NM_PCSK9_SHORT", "PCSK9", 12),
        gene_record("NM_PCSK9_LONG", "PCSK9", 14),
        gene_record("NM_000527", "LDLR", 18),
    ]).unwrap();
    store.insert_variants("PCSK9", &[
        variant(1010, "missense"),
        variant(1120, "synonymous"),
    ]).unwrap();
    drop(store);

    Fixture { _dir: dir, data: AppData::new(path) }
}
