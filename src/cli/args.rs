use clap::Parser;
use std::path::PathBuf;

use palsarcog::core::policy::DEFAULT_NODATA_CUTOVER;
use palsarcog::types::Product;

#[derive(Parser)]
#[command(name = "palsarcog", version, about = "PALSARCOG CLI")]
pub struct CliArgs {
    /// Input tile archive (.tar.gz), tile XML, or raster reference
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output directory for COGs and the item JSON
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Write the collection JSON for a product instead of converting a tile
    #[arg(long, value_enum)]
    pub create_collection: Option<Product>,

    /// Root URL for asset hrefs in the item (local output paths when omitted)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Two-digit revision year at which band nodata switches from 0 to 1
    #[arg(long, default_value_t = DEFAULT_NODATA_CUTOVER)]
    pub nodata_cutover: u8,

    /// Skip the item JSON, produce COGs only
    #[arg(long, default_value_t = false)]
    pub skip_item: bool,

    /// Enable logging
    #[arg(long, default_value_t = false)]
    pub log: bool,
}
