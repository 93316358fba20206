use std::fmt;
use serde::{Deserialize, Serialize};
use crate::{ExomeError, Result};

/// One transcript row of the gene table.
///
/// Several rows share a `name2` when a gene has alternate transcripts;
/// `name` is the transcript accession that tells them apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gene {
    pub id: i64,
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

/// A half-open `[start, end)` exon interval.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct Exon {
    pub start: i64,
    pub end: i64,
}

impl Exon {
    pub fn len(&self) -> i64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.len() <= 0
    }
}

impl Gene {
    pub fn exons(&self) -> Result<Vec<Exon>> {
        let starts = parse_coordinates("exonstarts", &self.exonstarts)?;
        let ends = parse_coordinates("exonends", &self.exonends)?;
        if starts.len() != ends.len() {
            return Err(ExomeError::MalformedExons(format!(
                "{} has {} exon starts but {} exon ends",
                self, starts.len(), ends.len(),
            )));
        }
        if starts.len() as i64 != self.exoncount {
            return Err(ExomeError::MalformedExons(format!(
                "{} lists {} exons but exoncount is {}",
                self, starts.len(), self.exoncount,
            )));
        }

        Ok(starts.into_iter().zip(ends)
            .map(|(start, end)| Exon { start, end })
            .collect())
    }

    /// Number of bases of the exons that fall inside `[cdsstart, cdsend)`.
    pub fn coding_len(&self) -> Result<i64> {
        let coding = self.exons()?.iter()
            .map(|exon| {
                let start = exon.start.max(self.cdsstart);
                let end = exon.end.min(self.cdsend);
                (end - start).max(0)
            })
            .sum();
        Ok(coding)
    }
}

impl fmt::Display for Gene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name2, self.name)
    }
}

// Lists are stored as "100,200,300," so the trailing item is empty.
fn parse_coordinates(field: &str, list: &str) -> Result<Vec<i64>> {
    list.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| item.parse::<i64>().map_err(|e| {
            ExomeError::MalformedExons(format!("{} item {:?}: {}", field, item, e))
        }))
        .collect()
}

/// A variant row annotated against a gene symbol.
///
/// Field names are the stored column names and are what the JSON views
/// expose. The aliases are the column headers of the population-frequency
/// browser export the rows are loaded from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(alias = "Chrom")]
    pub chrom: String,
    #[serde(alias = "Position")]
    pub position: i64,
    #[serde(alias = "RSID")]
    pub rsid: String,
    #[serde(alias = "Reference")]
    pub reference: String,
    #[serde(alias = "Alternate")]
    pub alternate: String,
    #[serde(alias = "Consequence")]
    pub consequence: String,
    #[serde(alias = "Protein Consequence")]
    pub protein_consequence: String,
    #[serde(alias = "Transcript Consequence")]
    pub transcript_consequence: String,
    #[serde(alias = "Filter")]
    pub filter: String,
    #[serde(alias = "Annotation")]
    pub annotation: String,
    #[serde(alias = "Flags")]
    pub flags: String,

    #[serde(alias = "Allele Count")]
    pub allele_count: i64,
    #[serde(alias = "Allele Number")]
    pub allele_number: i64,
    #[serde(alias = "Homozygote Count")]
    pub homozygote_count: i64,
    #[serde(alias = "Allele Frequency")]
    pub allele_frequency: f64,

    #[serde(alias = "Allele Count African")]
    pub allele_count_african: i64,
    #[serde(alias = "Allele Number African")]
    pub allele_number_african: i64,
    #[serde(alias = "Homozygote Count African")]
    pub homozygote_count_african: i64,
    #[serde(alias = "Allele Frequency African")]
    pub allele_frequency_african: f64,

    #[serde(alias = "Allele Count East Asian")]
    pub allele_count_east_asian: i64,
    #[serde(alias = "Allele Number East Asian")]
    pub allele_number_east_asian: i64,
    #[serde(alias = "Homozygote Count East Asian")]
    pub homozygote_count_east_asian: i64,
    #[serde(alias = "Allele Frequency East Asian")]
    pub allele_frequency_east_asian: f64,

    #[serde(alias = "Allele Count European (Non-Finnish)")]
    pub allele_count_european_non_finnish: i64,
    #[serde(alias = "Allele Number European (Non-Finnish)")]
    pub allele_number_european_non_finnish: i64,
    #[serde(alias = "Homozygote Count European (Non-Finnish)")]
    pub homozygote_count_european_non_finnish: i64,
    #[serde(alias = "Allele Frequency European (Non-Finnish)")]
    pub allele_frequency_european_non_finnish: f64,

    #[serde(alias = "Allele Count Finnish")]
    pub allele_count_finnish: i64,
    #[serde(alias = "Allele Number Finnish")]
    pub allele_number_finnish: i64,
    #[serde(alias = "Homozygote Count Finnish")]
    pub homozygote_count_finnish: i64,
    #[serde(alias = "Allele Frequency Finnish")]
    pub allele_frequency_finnish: f64,

    #[serde(alias = "Allele Count Latino")]
    pub allele_count_latino: i64,
    #[serde(alias = "Allele Number Latino")]
    pub allele_number_latino: i64,
    #[serde(alias = "Homozygote Count Latino")]
    pub homozygote_count_latino: i64,
    #[serde(alias = "Allele Frequency Latino")]
    pub allele_frequency_latino: f64,

    #[serde(alias = "Allele Count Other")]
    pub allele_count_other: i64,
    #[serde(alias = "Allele Number Other")]
    pub allele_number_other: i64,
    #[serde(alias = "Homozygote Count Other")]
    pub homozygote_count_other: i64,
    #[serde(alias = "Allele Frequency Other")]
    pub allele_frequency_other: f64,

    #[serde(alias = "Allele Count South Asian")]
    pub allele_count_south_asian: i64,
    #[serde(alias = "Allele Number South Asian")]
    pub allele_number_south_asian: i64,
    #[serde(alias = "Homozygote Count South Asian")]
    pub homozygote_count_south_asian: i64,
    #[serde(alias = "Allele Frequency South Asian")]
    pub allele_frequency_south_asian: f64,
}

#[cfg(test)]
pub(crate) fn test_gene(id: i64, name: &str, name2: &str, exoncount: i64) -> Gene {
    let starts: String = (0..exoncount).map(|i| format!("{},", 1000 + i * 100)).collect();
    let ends: String = (0..exoncount).map(|i| format!("{},", 1050 + i * 100)).collect();
    Gene {
        id,
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
        score: 0,
        name2: name2.to_string(),
        cdsstartstat: "cmpl".to_string(),
        cdsendstat: "cmpl".to_string(),
        exonframes: String::new(),
    }
}
