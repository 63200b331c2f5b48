use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context as _;
use clap::Parser;

use instaframe::config::{ParamOverrides, Preset};
use instaframe::export::{self, ExportFormat};
use instaframe::rng::{Rng, entropy_seed};

#[derive(Parser, Debug)]
#[command(name = "instaframe", version, about = "Put a procedural instant-print frame around a photo")]
struct Cli {
    /// Input image.
    input: PathBuf,

    /// Output path. Defaults to kodak-frame-<millis>.<format> in the current directory.
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Starting preset; individual flags override its fields.
    #[arg(long, default_value_t = Preset::Classic)]
    preset: Preset,

    #[arg(long)]
    thickness: Option<f32>,
    #[arg(long)]
    roughness: Option<f32>,
    #[arg(long)]
    scratches: Option<f32>,
    #[arg(long)]
    texture: Option<f32>,
    #[arg(long)]
    variations: Option<f32>,
    #[arg(long)]
    imperfections: Option<f32>,
    #[arg(long)]
    asymmetry: Option<f32>,

    /// Fix the random stream for a reproducible frame.
    #[arg(long)]
    seed: Option<u64>,

    /// png or jpg. Inferred from --out when omitted.
    #[arg(long)]
    format: Option<ExportFormat>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::INFO)
        .init();

    let cli = Cli::parse();

    let overrides = ParamOverrides {
        thickness: cli.thickness,
        roughness: cli.roughness,
        scratches: cli.scratches,
        texture: cli.texture,
        variations: cli.variations,
        imperfections: cli.imperfections,
        asymmetry: cli.asymmetry,
    };
    let params = cli.preset.params().with_overrides(&overrides).sanitized();

    let format = cli
        .format
        .or_else(|| {
            cli.out
                .as_ref()
                .and_then(|p| p.extension())
                .and_then(|e| e.to_str())
                .and_then(|e| e.parse().ok())
        })
        .unwrap_or_default();

    let bytes = std::fs::read(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    let source = export::decode(&bytes).with_context(|| format!("failed to load {}", cli.input.display()))?;

    let seed = cli.seed.unwrap_or_else(entropy_seed);
    tracing::info!(
        preset = %cli.preset,
        seed,
        w = source.width(),
        h = source.height(),
        "framing {}",
        cli.input.display()
    );

    let (framed, timings) = instaframe::render(&source, &params, &mut Rng::new(seed))?;

    eprintln!("\nTimings:");
    for t in &timings {
        eprintln!("  {:20} {:8.1} ms", t.name, t.ms);
    }

    let out = cli.out.unwrap_or_else(|| {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        PathBuf::from(export::file_name(format, millis))
    });

    let encoded = export::encode(&framed.surface, format)?;
    std::fs::write(&out, encoded).with_context(|| format!("failed to write {}", out.display()))?;
    tracing::info!(
        width = framed.layout.width,
        height = framed.layout.height,
        "saved {}",
        out.display()
    );

    Ok(())
}
