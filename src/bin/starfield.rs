use std::{
    io::{IsTerminal as _, Read as _, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use image::ImageEncoder as _;

use starfield::{Canvas, StarfieldParams, generate_stars, render_frame};

/// Inputs below this size leave no room for a starfield worth animating.
const MIN_INPUT_DIM: u32 = 10;

#[derive(Parser, Debug)]
#[command(name = "starfield", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Place stars on the input image and render one animation frame as PNG.
    Frame(FrameArgs),
    /// Place stars and print the accepted positions as JSON.
    Stars(StarsArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input PNG; transparent pixels mark where stars may be placed (`-` for stdin).
    #[arg(long = "in")]
    in_path: String,

    /// Animation frame to render (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path (`-` for stdout).
    #[arg(long, default_value = "-")]
    out: String,

    /// Minimum distance between a star and any opaque pixel.
    #[arg(long, default_value_t = starfield::DEFAULT_RADIUS)]
    radius: u32,

    /// Shuffle seed.
    #[arg(long, default_value_t = starfield::DEFAULT_SEED)]
    seed: u64,
}

#[derive(Parser, Debug)]
struct StarsArgs {
    /// Input PNG; transparent pixels mark where stars may be placed (`-` for stdin).
    #[arg(long = "in")]
    in_path: String,

    /// Minimum distance between a star and any opaque pixel.
    #[arg(long, default_value_t = starfield::DEFAULT_RADIUS)]
    radius: u32,

    /// Shuffle seed.
    #[arg(long, default_value_t = starfield::DEFAULT_SEED)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Stars(args) => cmd_stars(args),
    }
}

fn read_canvas(in_path: &str) -> anyhow::Result<Canvas> {
    let img = if in_path == "-" {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .with_context(|| "read image from stdin")?;
        image::load_from_memory(&buf).with_context(|| "decode image from stdin")?
    } else {
        image::ImageReader::open(in_path)
            .with_context(|| format!("open input '{in_path}'"))?
            .decode()
            .with_context(|| format!("decode input '{in_path}'"))?
    };

    let img = img.to_luma_alpha8();
    if img.width() < MIN_INPUT_DIM || img.height() < MIN_INPUT_DIM {
        anyhow::bail!(
            "input too small ({}x{}), need at least {MIN_INPUT_DIM}x{MIN_INPUT_DIM}",
            img.width(),
            img.height()
        );
    }

    Ok(Canvas::from_image(&img)?)
}

fn write_png(canvas: &Canvas, out: &str) -> anyhow::Result<()> {
    if out == "-" {
        let stdout = std::io::stdout();
        if stdout.is_terminal() {
            anyhow::bail!("not writing PNG to a terminal; pipe the output or pass --out");
        }
        let mut w = std::io::BufWriter::new(stdout.lock());
        image::codecs::png::PngEncoder::new(&mut w)
            .write_image(
                canvas.as_raw(),
                canvas.width(),
                canvas.height(),
                image::ExtendedColorType::La8,
            )
            .with_context(|| "encode png to stdout")?;
        w.flush().with_context(|| "flush stdout")?;
        return Ok(());
    }

    let out_path = PathBuf::from(out);
    if let Some(parent) = out_path.parent().filter(|p| *p != Path::new("")) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        &out_path,
        canvas.as_raw(),
        canvas.width(),
        canvas.height(),
        image::ColorType::La8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", out_path.display()))?;

    eprintln!("wrote {}", out_path.display());
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut canvas = read_canvas(&args.in_path)?;
    let params = StarfieldParams {
        radius: args.radius,
        seed: args.seed,
    };

    let registry = generate_stars(&mut canvas, &params)?;
    render_frame(&mut canvas, &registry, args.frame);

    write_png(&canvas, &args.out)
}

fn cmd_stars(args: StarsArgs) -> anyhow::Result<()> {
    let mut canvas = read_canvas(&args.in_path)?;
    let params = StarfieldParams {
        radius: args.radius,
        seed: args.seed,
    };

    let registry = generate_stars(&mut canvas, &params)?;

    let stdout = std::io::stdout();
    let mut w = stdout.lock();
    serde_json::to_writer_pretty(&mut w, &registry).with_context(|| "write registry JSON")?;
    writeln!(w)?;
    Ok(())
}
