use anyhow::{bail, Context, Result};
use clap::Parser;
use csv::{ReaderBuilder, StringRecord, Writer};
use nomenclatura::*;
use std::{io, path::PathBuf};
use tracing::{info, warn};

/// Name molecules written as SMILES in Spanish IUPAC nomenclature.
#[derive(Parser, Debug)]
#[command(name = "nomenclatura", version, about)]
struct Args {
    /// SMILES strings to name.
    smiles: Vec<String>,

    /// Name every row of a CSV file and write `smiles,name` rows to stdout.
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Column of the CSV file holding the SMILES.
    #[arg(long, default_value_t = 0)]
    column: usize,

    /// Print the full analysis as JSON instead of the bare name.
    #[arg(long)]
    json: bool,

    #[arg(long, env = "NOMENCLATURA_LOG", default_value = "warn")]
    log_level: String,

    #[arg(long)]
    max_atoms: Option<usize>,

    #[arg(long)]
    max_backbone: Option<usize>,
}

impl Args {
    fn config(&self) -> NamingConfig {
        let mut config = NamingConfig::from_env();
        if let Some(max) = self.max_atoms {
            config.max_atoms = max;
        }
        if let Some(max) = self.max_backbone {
            config.max_backbone = max.min(MAX_STEM);
        }
        config
    }
}

fn analyse(namer: &Namer, smiles: &str) -> Result<DetailedAnalysis> {
    let (atoms, bonds) = parse_smiles(smiles).with_context(|| format!("While parsing {smiles}"))?;
    Ok(namer.detailed_analysis(&atoms, &bonds))
}

fn name_one(namer: &Namer, smiles: &str, json: bool) -> Result<()> {
    if json {
        let analysis = analyse(namer, smiles)?;
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }
    let (atoms, bonds) = parse_smiles(smiles).with_context(|| format!("While parsing {smiles}"))?;
    let name = namer
        .try_name(&atoms, &bonds)
        .with_context(|| format!("Cannot name {smiles}"))?;
    println!("{name}");
    Ok(())
}

fn name_csv(namer: &Namer, path: &PathBuf, column: usize) -> Result<()> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Opening {}", path.display()))?;
    let mut writer = Writer::from_writer(io::stdout());
    writer.write_record(["smiles", "name"])?;

    let (mut named, mut total) = (0, 0);
    for result in reader.records() {
        let record: StringRecord = result.with_context(|| format!("Reading {}", path.display()))?;
        let Some(smiles) = record.get(column).map(str::trim).filter(|s| !s.is_empty()) else {
            warn!("Skipping record without SMILES: {:?}", record);
            continue;
        };
        total += 1;
        let name = match analyse(namer, smiles) {
            Ok(analysis) => analysis.name.unwrap_or_default(),
            Err(err) => {
                warn!("{err:#}");
                String::new()
            }
        };
        if !name.is_empty() {
            named += 1;
        }
        writer.write_record([smiles, name.as_str()])?;
    }
    writer.flush()?;
    info!("named {named} of {total} molecules from {}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let namer = Namer::with_config(args.config());
    if let Some(path) = &args.csv {
        name_csv(&namer, path, args.column)?;
    }
    for smiles in &args.smiles {
        name_one(&namer, smiles, args.json)?;
    }
    if args.csv.is_none() && args.smiles.is_empty() {
        bail!("nothing to name: pass SMILES strings or --csv");
    }
    Ok(())
}
