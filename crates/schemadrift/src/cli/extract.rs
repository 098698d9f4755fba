//! Extract command - declared schema dump without touching any store.

use crate::cli::error::HelpfulError;
use crate::cli::output::print_table;
use crate::cli::CommandStatus;
use schemadrift::reconcile::DeclarationExtractor;
use std::path::PathBuf;

/// Arguments for the extract command
#[derive(Debug)]
pub struct ExtractArgs {
    /// Root of the declaration source tree
    pub types: PathBuf,
    /// Dump the declared schema as JSON instead of a table
    pub json: bool,
}

/// Execute the extract command
pub fn run(args: ExtractArgs) -> anyhow::Result<CommandStatus> {
    if args.types.exists() && !args.types.is_dir() {
        return Err(HelpfulError::not_a_directory(&args.types).into());
    }

    let result = match DeclarationExtractor::new(&args.types).extract() {
        Ok(result) => result,
        Err(e) => {
            eprintln!("WARNING: {}", e);
            return Ok(CommandStatus::NoDeclarations);
        }
    };

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&result.schema.to_kind_map())?
        );
    } else {
        let rows: Vec<Vec<String>> = result
            .schema
            .iter()
            .flat_map(|declared| {
                declared.fields.iter().map(move |field| {
                    vec![
                        declared.name.clone(),
                        field.name.clone(),
                        field.kind.to_string(),
                        field.raw_type.clone(),
                    ]
                })
            })
            .collect();
        print_table(&["Type", "Field", "Kind", "Raw"], rows);
        println!(
            "{} declarations from {} files ({} skipped)",
            result.schema.len(),
            result.files_scanned,
            result.files_skipped
        );
    }

    if result.schema.is_empty() {
        eprintln!(
            "WARNING: no exported type declarations found under {}",
            args.types.display()
        );
        return Ok(CommandStatus::NoDeclarations);
    }
    Ok(CommandStatus::Success)
}
