use anyhow::Result;
use dupvert::{read_features_from_path, scan_features, write_json_to_path, ScanOptions};

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::ScanArgs) -> Result<()> {
    let options = ScanOptions::from(&args.matching);
    options.validate()?;

    tracing::info!(input = %args.input.display(), "reading features");
    let features = read_features_from_path(&args.input)?;

    let report = scan_features(&features, &options)?;

    if report.features.is_empty() {
        println!("No duplicate vertices found in {}", args.input.display());
    } else {
        println!("Duplicate Vertices Analysis ({})", report.metric);
        println!("{}", report.summary);
    }
    if !report.skipped.is_empty() {
        println!("Skipped {} feature(s); see warnings above", report.skipped.len());
    }

    if let Some(output) = &args.output {
        tracing::info!(output = %output.display(), "writing report");
        write_json_to_path(output, &report)?;
    }

    Ok(())
}
