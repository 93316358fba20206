//! Minimal HTML for the browsing pages.
//!
//! The detail page only carries the data; charts are drawn client side from
//! the embedded `variant-data` JSON.

use exome::lookup::gene_path;
use exome::Gene;

pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            c => escaped.push(c),
        }
    }
    escaped
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}</body>\n</html>\n",
        escape(title),
        body,
    )
}

fn search_form() -> &'static str {
    "<form action=\"/search\" method=\"post\">\n\
     <input type=\"text\" name=\"query_gene\" placeholder=\"Gene name, e.g. PCSK9\">\n\
     <button type=\"submit\">Search</button>\n\
     </form>\n"
}

pub fn home(genes: &[Gene], error: Option<&str>) -> String {
    let mut body = String::from("<h1>Exome variants</h1>\n");
    body.push_str(search_form());

    if let Some(error) = error {
        body.push_str(&format!("<p class=\"error\">{}</p>\n", escape(error)));
    }

    body.push_str("<h2>Sample genes</h2>\n<ul>\n");
    for gene in genes {
        body.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>\n",
            escape(&gene_path(&gene.name2)),
            escape(&gene.to_string()),
        ));
    }
    body.push_str("</ul>\n");

    layout("Exome variants", &body)
}

/// `variants_json` is the serialized variant array; it is embedded as-is
/// apart from `</` so it cannot close the script element.
pub fn gene(gene: &Gene, variants_json: &str) -> String {
    let mut body = format!("<h1>{}</h1>\n", escape(&gene.to_string()));
    body.push_str(search_form());

    let fields: [(&str, String); 13] = [
        ("Transcript", gene.name.clone()),
        ("Chromosome", gene.chrom.clone()),
        ("Strand", gene.strand.clone()),
        ("Transcription start", gene.txstart.to_string()),
        ("Transcription end", gene.txend.to_string()),
        ("Coding start", gene.cdsstart.to_string()),
        ("Coding end", gene.cdsend.to_string()),
        ("Exon count", gene.exoncount.to_string()),
        ("Exon starts", gene.exonstarts.clone()),
        ("Exon ends", gene.exonends.clone()),
        ("Exon frames", gene.exonframes.clone()),
        ("Coding start status", gene.cdsstartstat.clone()),
        ("Coding end status", gene.cdsendstat.clone()),
    ];
    body.push_str("<table class=\"gene\">\n");
    for (label, value) in fields.iter() {
        body.push_str(&format!("<tr><th>{}</th><td>{}</td></tr>\n", label, escape(value)));
    }
    body.push_str("</table>\n");

    match (gene.exons(), gene.coding_len()) {
        (Ok(exons), Ok(coding_len)) => {
            body.push_str(&format!("<p>Coding length: {} bp</p>\n", coding_len));
            body.push_str("<table class=\"exons\">\n<tr><th>Exon</th><th>Start</th><th>End</th><th>Length</th></tr>\n");
            for (i, exon) in exons.iter().enumerate() {
                body.push_str(&format!(
                    "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                    i + 1, exon.start, exon.end, exon.len(),
                ));
            }
            body.push_str("</table>\n");
        }
        (Err(e), _) | (_, Err(e)) => {
            body.push_str(&format!("<p class=\"error\">{}</p>\n", escape(&e.to_string())));
        }
    }

    body.push_str(&format!(
        "<script type=\"application/json\" id=\"variant-data\">{}</script>\n",
        variants_json.replace("</", "<\\/"),
    ));

    layout(&gene.to_string(), &body)
}
