//! Sample command - observed store schema dump without any declarations.

use crate::cli::error::HelpfulError;
use crate::cli::output::print_table;
use crate::cli::CommandStatus;
use schemadrift::reconcile::{InferConfig, SchemaInferrer};
use schemadrift_store::ExportStore;
use std::path::PathBuf;

/// Arguments for the sample command
#[derive(Debug)]
pub struct SampleArgs {
    /// Store export directory
    pub store: PathBuf,
    /// Documents sampled per collection
    pub samples: usize,
    /// Dump the observed schema as JSON instead of a table
    pub json: bool,
}

/// Execute the sample command
pub fn run(args: SampleArgs) -> anyhow::Result<CommandStatus> {
    if args.samples == 0 {
        return Err(HelpfulError::invalid_sample_bound(args.samples).into());
    }
    // Unlike `check`, sampling is the whole point here: an unreadable
    // export directory is a configuration error, not offline mode.
    let store = ExportStore::open(&args.store)
        .map_err(|e| HelpfulError::store_not_available(&args.store, &e.to_string()))?;

    let config = InferConfig {
        sample_limit: args.samples,
    };
    let result = SchemaInferrer::with_config(&store, config).infer();

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&result.schema.to_kind_map())?
        );
    } else {
        let rows: Vec<Vec<String>> = result
            .schema
            .iter()
            .flat_map(|collection| {
                collection.fields().iter().map(move |field| {
                    vec![
                        collection.name.clone(),
                        field.path.clone(),
                        field.kind.to_string(),
                    ]
                })
            })
            .collect();
        print_table(&["Collection", "Field path", "Kind"], rows);
        println!(
            "{} collections ({} failed to sample)",
            result.schema.len(),
            result.collections_failed
        );
    }

    Ok(CommandStatus::Success)
}
