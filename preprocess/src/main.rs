use bevy_terrain_mesh_preprocess::prelude::*;
use clap::Parser;

fn main() -> PreprocessResult<()> {
    let args = Cli::parse();
    let context = PreprocessContext::from_cli(args)?;

    for manifest in preprocess(&context)? {
        println!(
            "{}: {} mesh(es) for {}x{} samples",
            manifest.source.display(),
            manifest.tiles.len(),
            manifest.width,
            manifest.height
        );
    }

    Ok(())
}
