use std::cmp::Reverse;
use itertools::Itertools;
use serde::Serialize;
use tracing::debug;
use url::form_urlencoded;
use crate::{ExomeError, Gene, Result, Store, Variant};

/// How many rows the homepage sample is drawn from.
pub const SAMPLE_SIZE: usize = 10;

pub const EMPTY_SEARCH_MESSAGE: &str = "please enter a gene name";

/// Symbols whose gene path would not reach the gene page: dot segments
/// are resolved away by clients, and `search` is the POST-only form target.
const UNROUTABLE_SYMBOLS: &[&str] = &[".", "..", "search"];

/// A gene's canonical transcript together with every variant annotated
/// against its symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneDetail {
    pub gene: Gene,
    pub variants: Vec<Variant>,
}

/// Resolves `symbol` to the transcript with the most exons.
///
/// Rows sharing the highest `exoncount` are broken by lowest `id`, so the
/// first-loaded transcript wins.
pub fn resolve_gene_by_symbol(store: &Store, symbol: &str) -> Result<Gene> {
    let transcripts = store.genes_with_symbol(symbol)?;
    let count = transcripts.len();
    match canonical_transcript(transcripts) {
        Some(gene) => {
            debug!(symbol, transcripts = count, chosen = %gene.name, "resolved gene");
            Ok(gene)
        }
        None => {
            debug!(symbol, "gene not found");
            Err(ExomeError::NotFound { symbol: symbol.to_string() })
        }
    }
}

pub fn canonical_transcript<I>(transcripts: I) -> Option<Gene>
    where I: IntoIterator<Item=Gene>
{
    transcripts.into_iter()
        .min_by_key(|gene| (Reverse(gene.exoncount), gene.id))
}

/// Variants for `symbol`. No rows is an empty list, not an error.
pub fn list_variants_for_gene(store: &Store, symbol: &str) -> Result<Vec<Variant>> {
    let variants = store.variants_with_symbol(symbol)?;
    debug!(symbol, variants = variants.len(), "listed variants");
    Ok(variants)
}

pub fn gene_detail(store: &Store, symbol: &str) -> Result<GeneDetail> {
    let gene = resolve_gene_by_symbol(store, symbol)?;
    let variants = list_variants_for_gene(store, symbol)?;
    Ok(GeneDetail { gene, variants })
}

/// Up to `limit` genes with distinct symbols.
///
/// The `limit` rows are fetched first and deduplicated afterwards, so
/// alternate transcripts among them shrink the result.
pub fn sample_genes(store: &Store, limit: usize) -> Result<Vec<Gene>> {
    let genes = store.genes_by_symbol_desc(limit)?;
    Ok(dedup_by_symbol(genes))
}

/// Keeps the first row seen for each `name2`, preserving order.
pub fn dedup_by_symbol<I>(genes: I) -> Vec<Gene>
    where I: IntoIterator<Item=Gene>
{
    genes.into_iter()
        .unique_by(|gene| gene.name2.clone())
        .collect()
}

/// Turns the search box contents into the path of a gene page.
///
/// A symbol that has no reachable gene page comes back as `NotFound`, the
/// same way a lookup miss does.
pub fn handle_search_input(raw: &str) -> Result<String> {
    let symbol = raw.trim();
    if symbol.is_empty() {
        return Err(ExomeError::Validation(EMPTY_SEARCH_MESSAGE.to_string()));
    }
    if UNROUTABLE_SYMBOLS.contains(&symbol) {
        debug!(symbol, "search for unroutable symbol");
        return Err(ExomeError::NotFound { symbol: symbol.to_string() });
    }
    Ok(gene_path(symbol))
}

/// `/{symbol}` with the symbol encoded as a single path segment.
pub fn gene_path(symbol: &str) -> String {
    let segment: String = form_urlencoded::byte_serialize(symbol.as_bytes())
        // Spaces come out as their own `+` chunk; a literal `+` is `%2B`.
        .map(|chunk| if chunk == "+" { "%20" } else { chunk })
        .collect();
    format!("/{}", segment)
}

/// The homepage path carrying a message to show inline.
pub fn home_path_with_message(message: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("error", message)
        .finish();
    format!("/?{}", query)
}
