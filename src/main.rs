// main.rs - CLI entry point

use metamatrix::cli::Config;
use metamatrix::output::{write_summary, RunSummary, SUMMARY_FILE};
use metamatrix::prelude::*;
use std::time::Instant;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run_main() {
        eprintln!("❌ ERROR: {}", e);
        std::process::exit(1);
    }
}

fn run_main() -> Result<()> {
    let mut args: Args = argh::from_env();
    let command_line = std::env::args().collect::<Vec<String>>().join(" ");

    // Handle generate config first
    if args.generate_config {
        let sample_config = Config::generate_sample();
        println!("{}", sample_config);
        println!("\n💡 Save this content to a .toml file and use --config /path/to/config.toml");
        return Ok(());
    }

    // Load configuration file if specified
    if let Some(config_path) = args.config.clone() {
        args = args.with_config_file(&config_path)?;
    }

    println!("🚀 {}", metamatrix::get_info());

    let validation = validate_args(&args)?;
    let params = validation.params;
    println!("📂 Metadata: {}", validation.metadata_file.display());
    println!(
        "📏 Thresholds: euclidean fraction {}, geo distance {} km ({})",
        params.euclidean_fraction,
        params.max_km,
        params.geo_method.description()
    );

    let total_start = Instant::now();
    let table = MetadataTable::from_tsv(&validation.metadata_file)?;
    let builder = MetadataMatrixBuilder::new(&table, validation.restriction.as_deref(), params)?;

    match &validation.restriction {
        Some(_) => println!("🔍 Restricted to {} of {} samples", builder.samples().len(), table.len()),
        None => println!("👥 Samples: {}", builder.samples().len()),
    }

    if args.dry_run {
        println!("\n🧪 DRY RUN: {} columns", table.columns.len());
        for (col_num, column) in table.columns.iter().enumerate() {
            println!("{:3}: {} ({})", col_num + 1, column.name, column.kind.description());
        }
        println!("✅ Inputs are valid, nothing written");
        return Ok(());
    }

    prepare_out_dir(&validation.out_dir)?;
    let report = builder.write_all(&validation.out_dir)?;

    if args.summary {
        let summary = RunSummary {
            version: metamatrix::VERSION.to_string(),
            generated: RunSummary::generated_now(),
            command_line,
            input: validation.metadata_file.display().to_string(),
            out_dir: validation.out_dir.display().to_string(),
            euclidean_fraction: params.euclidean_fraction,
            max_km: params.max_km,
            geo_method: params.geo_method.to_string(),
            samples: builder.samples().to_vec(),
            columns: report.written.clone(),
            skipped: report.skipped.clone(),
        };
        write_summary(&validation.out_dir.join(SUMMARY_FILE), &summary)?;
    }

    log::info!(
        "{} matrices written, {} columns skipped in {:.2}s",
        report.written.len(),
        report.skipped.len(),
        total_start.elapsed().as_secs_f64()
    );
    println!("🎉 Done, see output in \"{}\"", validation.out_dir.display());
    Ok(())
}
