use anyhow::Result;
use clap::Parser;
use std::path::Path;

use ext_icon_gen::icon_gen;

#[derive(Debug, Parser)]
#[clap(
    name = "ext-icon-gen",
    version,
    about = "Generate the 16, 48 and 128 px toolbar icons into grammar-checker/icons"
)]
struct Args {}

fn main() -> Result<()> {
    Args::parse();

    icon_gen::generate_icons(Path::new(icon_gen::ICON_DIR))
}
