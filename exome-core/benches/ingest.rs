use criterion::{Criterion, criterion_group, criterion_main};
use exome::{GeneRecord, PreambleReader, Store};
use std::io::{Cursor, Read};

fn refgene_rows(count: usize) -> String {
    let mut data = String::from("#bin\tname\tchrom\tstrand\ttxStart\ttxEnd\tcdsStart\tcdsEnd\texonCount\texonStarts\texonEnds\tscore\tname2\tcdsStartStat\tcdsEndStat\texonFrames\n");
    for i in 0..count {
        let start = 10_000 + i * 5_000;
        let starts: String = (0..8).map(|e| format!("{},", start + e * 400)).collect();
        let ends: String = (0..8).map(|e| format!("{},", start + e * 400 + 150)).collect();
        data.push_str(&format!(
            "585\tNM_{:06}\tchr1\t+\t{}\t{}\t{}\t{}\t8\t{}\t{}\t0\tGENE{}\tcmpl\tcmpl\t0,1,2,0,1,2,0,1,\n",
            i, start, start + 2_950, start + 20, start + 2_900, starts, ends, i / 3,
        ));
    }
    data
}

fn run_preamble(data: &str) {
    let mut reader = PreambleReader::new(Cursor::new(data));
    let mut output = String::new();
    reader.read_to_string(&mut output).unwrap();
    let _preamble = reader.preamble().unwrap();
}

fn preamble_benchmark(c: &mut Criterion) {
    let data = refgene_rows(1000);
    c.bench_function("preamble 1000 lines", |b| b.iter(|| run_preamble(&data)));
}

fn parse_genes_benchmark(c: &mut Criterion) {
    let data = refgene_rows(1000);
    c.bench_function("parse refGene 1000 lines", |b| b.iter(|| {
        GeneRecord::parse_from(PreambleReader::new(Cursor::new(&data))).unwrap()
    }));
}

fn insert_genes_benchmark(c: &mut Criterion) {
    let records = GeneRecord::parse_from(PreambleReader::new(Cursor::new(refgene_rows(1000)))).unwrap();
    c.bench_function("insert 1000 genes", |b| b.iter(|| {
        let mut store = Store::in_memory().unwrap();
        store.insert_genes(&records).unwrap()
    }));
}

criterion_group!(benches,
    preamble_benchmark,
    parse_genes_benchmark,
    insert_genes_benchmark);
criterion_main!(benches);
