use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;

use cardraster::output::{archive_existing_dir, default_outdir};
use cardraster::{batch, Color, RenderConfig};

/// Render multiple markdown-like sections to individual images
#[derive(Parser, Debug)]
#[command(name = "cardraster", version)]
struct Cli {
    /// Text file with sections, each starting with a line beginning '= '
    #[arg(value_name = "INPUT")]
    input_pos: Option<PathBuf>,

    /// Same as the positional INPUT
    #[arg(short, long = "input", value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Output directory (default: input file name without extension)
    #[arg(short, long)]
    outdir: Option<PathBuf>,

    /// JSON file with render settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Image width (portrait)
    #[arg(long)]
    width: Option<u32>,

    /// Initial image height (extends if content exceeds)
    #[arg(long)]
    height: Option<u32>,

    /// Margin in pixels
    #[arg(long)]
    margin: Option<u32>,

    /// Background color (e.g. #111111)
    #[arg(long)]
    bg: Option<Color>,

    /// Text color (e.g. #ffffff)
    #[arg(long)]
    fg: Option<Color>,

    /// Bullet marker color (default: text color)
    #[arg(long)]
    bullet: Option<Color>,

    /// Path to a TTF/OTF font file
    #[arg(long)]
    font: Option<PathBuf>,
}

impl Cli {
    fn render_config(&self) -> anyhow::Result<RenderConfig> {
        let mut cfg = match &self.config {
            Some(path) => RenderConfig::from_json_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => RenderConfig::default(),
        };
        if let Some(w) = self.width {
            cfg.width = w;
        }
        if let Some(h) = self.height {
            cfg.height = h;
        }
        if let Some(m) = self.margin {
            cfg.margin = m;
        }
        if let Some(bg) = self.bg {
            cfg.background = bg;
        }
        if let Some(fg) = self.fg {
            cfg.foreground = fg;
            cfg.bullet_color = fg;
        }
        if let Some(bullet) = self.bullet {
            cfg.bullet_color = bullet;
        }
        if let Some(font) = &self.font {
            cfg.font_path = Some(font.clone());
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let Some(input) = cli.input.clone().or_else(|| cli.input_pos.clone()) else {
        bail!("the following argument is required: INPUT (positional) or --input/-i");
    };
    let config = cli.render_config()?;
    let outdir = cli.outdir.clone().unwrap_or_else(|| default_outdir(&input));

    let text = std::fs::read_to_string(&input)
        .with_context(|| format!("reading {}", input.display()))?;
    if cardraster::source::split_sections(&text).is_empty() {
        bail!("No sections found. Ensure lines starting with '= ' mark each section.");
    }

    if let Some(archived) = archive_existing_dir(&outdir)
        .with_context(|| format!("archiving {}", outdir.display()))?
    {
        println!("Archived existing output directory to {}", archived.display());
    }

    for path in batch::render_document(&text, &outdir, &config)? {
        println!("Wrote {}", path.display());
    }
    Ok(())
}
