use anyhow::Result;
use dupvert::{clean_features, read_features_from_path, write_features_to_path, write_json_to_path, ScanOptions};

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::CleanArgs) -> Result<()> {
    let options = ScanOptions::from(&args.matching);
    options.validate()?;

    tracing::info!(input = %args.input.display(), "reading features");
    let features = read_features_from_path(&args.input)?;

    let report = clean_features(&features, &options)?;

    tracing::info!(output = %args.output.display(), "writing cleaned features");
    write_features_to_path(&args.output, &report.features)?;

    println!("Removed {} repeated vertices from {} feature(s)", report.removed_vertices, report.features.len());
    println!("Summary After Removing Duplicates");
    println!("{}", report.summary);
    if !report.skipped.is_empty() {
        println!("Skipped {} feature(s) that could not be cleaned", report.skipped.len());
    }

    if let Some(path) = &args.report {
        write_json_to_path(path, &report)?;
    }

    Ok(())
}
