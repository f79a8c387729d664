// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use tracing::Level;

use dds_bc4::blocktexture::TileOrder;
use dds_bc4::format::DecodeOptions;

/// Decode a BC4U-compressed DDS texture into a grayscale image
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Path to the DDS file
    #[arg(short, long)]
    input: PathBuf,

    /// Where to write the image; the extension picks the format
    #[arg(short, long)]
    output: PathBuf,

    /// Layout of consecutive blocks over the image
    #[arg(long, value_enum, default_value_t = TileOrder::ColumnMajor)]
    tile_order: TileOrder,

    /// Reject files whose header magic or size is wrong
    #[arg(long)]
    strict: bool,

    /// Decode blocks on all cores
    #[arg(long)]
    parallel: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let options = DecodeOptions {
        tile_order: cli.tile_order,
        strict: cli.strict,
        parallel: cli.parallel,
    };
    let texture = dds_bc4::read_texture_file(&cli.input, &options)?;

    match texture.save(&cli.output) {
        Ok(()) => {
            println!("[SUCCESS] File was saved at {}", cli.output.display());
            Ok(())
        }
        Err(err) => {
            println!("[FAILED] Output failed");
            Err(err.into())
        }
    }
}
