use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use log::{info, LevelFilter};

use rastertint::core::{
    downsample, init_with_level, upsample, HueTint, PaletteTable, ScalarTint, VectorTint,
};
use rastertint::io::{decode, encode};

#[derive(Parser)]
#[command(name = "rastertint", about = "Resample and palette-tint raster images", version)]
struct Cli {
    /// Log at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON palette table to use instead of the builtin team palettes.
    #[arg(long, global = true, value_name = "PATH")]
    palette_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Halve the resolution on both axes.
    Shrink {
        input: PathBuf,
        /// Output path; defaults to output/small_<input name>.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Double the resolution on both axes.
    Enlarge {
        input: PathBuf,
        /// Output path; defaults to output/large_<input name>.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Tint toward a named palette.
    Tint {
        input: PathBuf,
        /// Palette name, e.g. Warriors.
        #[arg(short, long)]
        palette: String,
        #[arg(short, long, value_enum, default_value_t = TintMode::Scalar)]
        mode: TintMode,
        /// Blend strength in [0, 1]; scalar mode only.
        #[arg(long, default_value_t = 1.0)]
        percent: f64,
        /// Output path; defaults to output/<palette>_..._<input name>.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// List the available palette names.
    Palettes,
}

#[derive(Clone, Copy, ValueEnum)]
enum TintMode {
    /// Blend each pixel toward its nearest palette color.
    Scalar,
    /// Substitute each pixel's hue with the nearest palette hue.
    Hue,
    /// Project each pixel onto the plane of the two primary palette colors.
    Vector,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    init_with_level(level)?;

    let table = match &cli.palette_file {
        Some(path) => PaletteTable::load_json(path)?,
        None => PaletteTable::builtin(),
    };

    match cli.command {
        Command::Shrink { input, out } => {
            let grid = decode(&input)?;
            info!("shrinking image");
            let small = downsample(&grid);
            encode(&small, out.unwrap_or_else(|| default_out(&input, "small_")))?;
        }
        Command::Enlarge { input, out } => {
            let grid = decode(&input)?;
            info!("enlarging image");
            let large = upsample(&grid);
            encode(&large, out.unwrap_or_else(|| default_out(&input, "large_")))?;
        }
        Command::Tint {
            input,
            palette,
            mode,
            percent,
            out,
        } => {
            if !(0.0..=1.0).contains(&percent) {
                return Err(format!("percent must be in [0, 1], got {percent}").into());
            }
            let colors = table.get(&palette)?;
            let mut grid = decode(&input)?;
            info!("tinting image with palette {palette}");

            let on_row = |row: usize| {
                if (row + 1) % 100 == 0 {
                    info!("finished row {}", row + 1);
                }
            };

            let prefix = match mode {
                TintMode::Scalar => {
                    ScalarTint::new(&colors.with_anchors(), percent)
                        .apply_with_progress(&mut grid, on_row)?;
                    format!("{palette}_tinted_")
                }
                TintMode::Hue => {
                    HueTint::new(&colors.with_anchors()).apply_with_progress(&mut grid, on_row)?;
                    format!("{palette}_hue_tinted_")
                }
                TintMode::Vector => {
                    let (a, b) = colors
                        .primary_pair()
                        .ok_or("vector tint needs a palette with at least two colors")?;
                    VectorTint::new(a, b)?.apply_with_progress(&mut grid, on_row);
                    format!("{palette}_vector_tinted_")
                }
            };
            encode(&grid, out.unwrap_or_else(|| default_out(&input, &prefix)))?;
        }
        Command::Palettes => {
            for name in table.names() {
                println!("{name}");
            }
        }
    }

    Ok(())
}

/// Default output path: `output/<prefix><input file name>`.
fn default_out(input: &Path, prefix: &str) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    PathBuf::from("output").join(format!("{prefix}{name}"))
}
