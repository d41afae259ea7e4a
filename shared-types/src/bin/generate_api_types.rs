use shared_types::*;
use std::fs;
use std::path::PathBuf;
use ts_rs::TS;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Everything lands in one file, so cross-file imports are dropped
    let types = vec![
        clean_type(ArchiveFormat::export_to_string()?),
        clean_type(DocumentFormat::export_to_string()?),
        clean_type(ExtractionError::export_to_string()?),
        clean_type(LeafFailure::export_to_string()?),
        clean_type(ExtractionReport::export_to_string()?),
    ];

    let output_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("../ui/src/api-types"));
    fs::create_dir_all(&output_dir)?;

    let output_path = output_dir.join("types.ts");
    fs::write(&output_path, types.join("\n"))?;
    println!("Generated TypeScript types in {}", output_path.display());

    Ok(())
}

fn clean_type(mut type_def: String) -> String {
    type_def.retain(|c| c != '\r');

    let result = type_def
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("import type")
                && !trimmed.starts_with("// This file was generated")
                && !trimmed.starts_with("/* This file was generated")
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string();

    if result.is_empty() {
        result
    } else {
        format!("{}\n", result)
    }
}
