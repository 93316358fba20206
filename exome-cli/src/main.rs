use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use std::fs::File;
use std::io::{BufReader, Write};
use tracing::info;
use exome::{lookup, GeneRecord, PreambleReader, Store, TsvExporter};

fn database_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("database")
        .long("database")
        .short("d")
        .required(true)
        .takes_value(true)
}

fn input_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("input")
        .long("input")
        .short("i")
        .required(true)
        .takes_value(true)
}

fn app<'a, 'b>() -> clap::App<'a, 'b> {
    App::new("exome")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(SubCommand::with_name("load-genes")
            .about("Loads a UCSC refGene table into the database")
            .arg(database_arg())
            .arg(input_arg()))
        .subcommand(SubCommand::with_name("load-variants")
            .about("Loads a variant frequency export for one gene")
            .arg(database_arg())
            .arg(input_arg())
            .arg(Arg::with_name("gene")
                .long("gene")
                .short("g")
                .required(true)
                .takes_value(true)))
        .subcommand(SubCommand::with_name("lookup")
            .about("Prints a gene's canonical transcript and its variants")
            .arg(database_arg())
            .arg(Arg::with_name("format")
                .long("format")
                .short("f")
                .possible_values(&["json", "tsv"])
                .default_value("json")
                .takes_value(true))
            .arg(Arg::with_name("output")
                .long("output")
                .short("o")
                .takes_value(true))
            .arg(Arg::with_name("symbol")
                .required(true)
                .index(1)))
        .subcommand(SubCommand::with_name("stats")
            .about("Prints the number of gene and variant rows")
            .arg(database_arg()))
}

fn main() {
    let matches = app().get_matches();
    init_logging();

    match run(&matches) {
        Ok(()) => (),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &ArgMatches) -> Result<(), String> {
    match args.subcommand() {
        ("load-genes", Some(sub)) => load_genes(sub),
        ("load-variants", Some(sub)) => load_variants(sub),
        ("lookup", Some(sub)) => lookup_gene(sub),
        ("stats", Some(sub)) => stats(sub),
        (other, _) => Err(format!("unknown subcommand {:?}", other)),
    }
}

fn open_input(args: &ArgMatches) -> Result<BufReader<File>, String> {
    let path = args.value_of("input").ok_or("missing --input")?;
    let file = File::open(path)
        .map_err(|e| format!("failed to open {}: {}", path, e))?;
    Ok(BufReader::new(file))
}

fn create_store(args: &ArgMatches) -> Result<Store, String> {
    let path = args.value_of("database").ok_or("missing --database")?;
    Store::create(path).map_err(|e| format!("failed to open database {}: {}", path, e))
}

fn open_store(args: &ArgMatches) -> Result<Store, String> {
    let path = args.value_of("database").ok_or("missing --database")?;
    Store::open(path).map_err(|e| format!("failed to open database {}: {}", path, e))
}

fn load_genes(args: &ArgMatches) -> Result<(), String> {
    let mut reader = PreambleReader::new(open_input(args)?);
    let records = GeneRecord::parse_from(&mut reader)
        .map_err(|e| format!("failed to parse gene records: {}", e))?;

    let mut store = create_store(args)?;
    let inserted = store.insert_genes(&records)
        .map_err(|e| format!("failed to insert gene records: {}", e))?;
    info!(rows = inserted, "loaded genes");
    Ok(())
}

fn load_variants(args: &ArgMatches) -> Result<(), String> {
    let symbol = args.value_of("gene").ok_or("missing --gene")?;
    let variants = exome::parse_variants(open_input(args)?, symbol)
        .map_err(|e| format!("failed to parse variant records: {}", e))?;

    let mut store = create_store(args)?;
    let inserted = store.insert_variants(symbol, &variants)
        .map_err(|e| format!("failed to insert variant records: {}", e))?;
    info!(symbol, rows = inserted, "loaded variants");
    Ok(())
}

fn lookup_gene(args: &ArgMatches) -> Result<(), String> {
    let symbol = args.value_of("symbol").ok_or("missing symbol")?;
    let store = open_store(args)?;
    let detail = lookup::gene_detail(&store, symbol).map_err(|e| e.to_string())?;

    let mut out: Box<dyn Write> = match args.value_of("output") {
        Some(path) => Box::new(File::create(path)
            .map_err(|e| format!("failed to create {}: {}", path, e))?),
        None => Box::new(std::io::stdout()),
    };

    match args.value_of("format") {
        Some("tsv") => {
            let preamble = format!("# {}\n", detail.gene);
            TsvExporter::new(preamble, detail.variants.iter())
                .write_all(&mut out)
                .map_err(|e| format!("failed to write variants: {}", e))?;
        }
        _ => {
            serde_json::to_writer_pretty(&mut out, &detail)
                .map_err(|e| format!("failed to write gene: {}", e))?;
            writeln!(&mut out).map_err(|e| format!("failed to write gene: {}", e))?;
        }
    }
    Ok(())
}

fn stats(args: &ArgMatches) -> Result<(), String> {
    let store = open_store(args)?;
    let counts = store.counts().map_err(|e| e.to_string())?;
    println!("genes\t{}", counts.genes);
    println!("variants\t{}", counts.variants);
    Ok(())
}
