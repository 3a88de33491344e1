// fix_matrix.rs - Distance matrix to distance/nearness tables

use clap::{value_parser, Arg, Command};
use metamatrix::normalizer::{
    default_out_dir, normalize_matrix, DEFAULT_PRECISION, DISTANCE_FILE, NEARNESS_FILE,
};
use metamatrix::{AliasTable, MatrixError, Result};
use std::path::{Path, PathBuf};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run_main() {
        eprintln!("❌ ERROR: {}", e);
        std::process::exit(1);
    }
}

fn run_main() -> Result<()> {
    let matches = Command::new("fix_matrix")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Converts a distance matrix into distance.tab and nearness.tab")
        .arg(Arg::new("matrix")
            .short('m')
            .long("matrix")
            .value_name("FILE")
            .help("Tab-separated distance matrix")
            .required(true))
        .arg(Arg::new("precision")
            .short('p')
            .long("precision")
            .value_name("N")
            .help("Digits after the decimal point in nearness values (1-10)")
            .value_parser(value_parser!(usize))
            .default_value("4"))
        .arg(Arg::new("out-dir")
            .short('o')
            .long("out-dir")
            .value_name("DIR")
            .help("Output directory (default: the matrix's directory)"))
        .arg(Arg::new("alias")
            .short('a')
            .long("alias")
            .value_name("FILE")
            .help("Tab-separated alias file with `name` and `alias` columns"))
        .get_matches();

    let matrix = matches
        .get_one::<String>("matrix")
        .map(PathBuf::from)
        .ok_or_else(|| MatrixError::config("--matrix is required"))?;
    let precision = matches
        .get_one::<usize>("precision")
        .copied()
        .unwrap_or(DEFAULT_PRECISION);
    let out_dir = matches
        .get_one::<String>("out-dir")
        .map(PathBuf::from)
        .unwrap_or_else(|| default_out_dir(&matrix));

    let aliases = match matches.get_one::<String>("alias") {
        Some(alias_file) => AliasTable::from_file(Path::new(alias_file))?,
        None => AliasTable::new(),
    };

    println!("🔧 fix_matrix v{}", env!("CARGO_PKG_VERSION"));
    println!("📈 Distance matrix: {}", matrix.display());

    let summary = normalize_matrix(&matrix, &out_dir, precision, &aliases)?;

    println!("✅ Converted {} rows × {} samples", summary.rows, summary.samples);
    println!("📄 Distance: {}", out_dir.join(DISTANCE_FILE).display());
    println!("📄 Nearness: {}", out_dir.join(NEARNESS_FILE).display());
    println!("🎉 Done, see output in \"{}\"", out_dir.display());
    Ok(())
}
