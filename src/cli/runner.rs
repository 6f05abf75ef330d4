use std::fs;

use tracing::info;
use tracing_subscriber::EnvFilter;

use palsarcog::ConversionParams;
use palsarcog::api;

use super::args::CliArgs;
use super::errors::AppError;

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.log {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .init();
    }

    let output_dir = args.output_dir.ok_or(AppError::MissingArgument {
        arg: "--output-dir".to_string(),
    })?;
    fs::create_dir_all(&output_dir)?;

    if let Some(product) = args.create_collection {
        let collection = api::create_collection(product);
        let path = api::write_collection_json(&collection, &output_dir)
            .map_err(AppError::Core)?;
        info!("Wrote collection {} to {}", collection.id, path.display());
        return Ok(());
    }

    let input = args.input.ok_or(AppError::MissingArgument {
        arg: "--input".to_string(),
    })?;

    let params = ConversionParams {
        nodata_cutover: args.nodata_cutover,
        base_url: args.base_url,
        ..Default::default()
    };

    if args.skip_item {
        let converted = api::cogify_tile(&input, &output_dir, &params).map_err(AppError::Core)?;
        info!(
            "Converted {} bands of {} into {}",
            converted.cogs.len(),
            converted.tokens.item_id(),
            output_dir.display()
        );
        return Ok(());
    }

    let processed = api::process_tile(&input, &output_dir, &params, None).map_err(AppError::Core)?;
    let item_path = api::write_item_json(&processed.item, &output_dir).map_err(AppError::Core)?;
    info!(
        "Converted {} bands and wrote item to {}",
        processed.converted.cogs.len(),
        item_path.display()
    );

    Ok(())
}
