use crate::progress::ProgressCallback;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

const BAR_SIZE: u64 = 10000;

#[derive(Parser, Debug)]
#[command(name = "btmp", author, version, about)]
pub struct Cli {
    /// Terrain-RGB heightmaps to convert.
    #[arg(required = true)]
    pub src_path: Vec<PathBuf>,
    /// Directory the meshes are written to, one subdirectory per heightmap.
    #[arg(required = true)]
    pub out_path: PathBuf,

    /// Imagery used to tint the meshes, one per heightmap and of the same size.
    #[arg(short, long)]
    pub imagery: Vec<PathBuf>,
    /// RON file with a `TerrainMeshConfig`, overridden by the options below.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    #[arg(short, long)]
    pub step: Option<usize>,
    #[arg(short, long = "ts")]
    pub tile_size: Option<usize>,
    #[arg(short, long, default_value_t = false)]
    pub overwrite: bool,
}

pub(crate) struct PreprocessBar<'a> {
    name: String,
    bar: ProgressBar,
    callback: Box<ProgressCallback<'a>>,
}

impl PreprocessBar<'_> {
    pub(crate) fn new(name: String) -> Self {
        let style = ProgressStyle::with_template(
            &(name.clone() + ": {wide_bar} {percent} % [{elapsed}/{duration}]"),
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar());

        let bar = ProgressBar::new(BAR_SIZE).with_style(style);

        let callback = Box::new({
            let progress_bar = bar.clone();
            move |completion: f64| {
                progress_bar.set_position((completion * BAR_SIZE as f64) as u64);
                true
            }
        });

        Self {
            name,
            bar,
            callback,
        }
    }

    pub(crate) fn callback(&self) -> &ProgressCallback {
        self.callback.as_ref()
    }

    pub(crate) fn finish(&self) {
        self.bar.finish_and_clear();
        println!("{} took: {:?}", self.name, self.bar.elapsed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_arguments() {
        let cli = Cli::parse_from([
            "btmp", "a.png", "b.png", "out", "-i", "a_rgb.png", "-i", "b_rgb.png", "--ts", "129",
            "-o",
        ]);

        assert_eq!(cli.src_path, vec![PathBuf::from("a.png"), PathBuf::from("b.png")]);
        assert_eq!(cli.out_path, PathBuf::from("out"));
        assert_eq!(cli.imagery.len(), 2);
        assert_eq!(cli.tile_size, Some(129));
        assert_eq!(cli.step, None);
        assert!(cli.overwrite);
    }
}
