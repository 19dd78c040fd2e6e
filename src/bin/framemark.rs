use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use framemark::{AnnotationDocument, AnnotationIndex, AnnotationStore, BaseRaster, JsonDirStore};

#[derive(Parser, Debug)]
#[command(name = "framemark", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Composite an annotation document over a frame and write a PNG.
    Render(RenderArgs),
    /// List the annotations stored for a video.
    List(ListArgs),
    /// Print one stored annotation as JSON.
    Show(IdArgs),
    /// Delete one stored annotation.
    Delete(IdArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Annotation document JSON.
    #[arg(long)]
    doc: PathBuf,

    /// Frozen frame image (PNG, JPEG, ...).
    #[arg(long)]
    frame: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ListArgs {
    /// Video name the annotations belong to.
    #[arg(long)]
    video: String,

    /// Store directory (defaults to `FRAMEMARK_STORE_DIR`, then `annotations`).
    #[arg(long)]
    store: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct IdArgs {
    /// Annotation id.
    #[arg(long)]
    id: Uuid,

    /// Store directory (defaults to `FRAMEMARK_STORE_DIR`, then `annotations`).
    #[arg(long)]
    store: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::List(args) => cmd_list(args),
        Command::Show(args) => cmd_show(args),
        Command::Delete(args) => cmd_delete(args),
    }
}

fn open_store(dir: Option<PathBuf>) -> anyhow::Result<JsonDirStore> {
    let dir = dir.unwrap_or_else(|| framemark::Settings::from_env().store_dir);
    JsonDirStore::open(&dir).with_context(|| format!("open store '{}'", dir.display()))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let doc = AnnotationDocument::from_path(&args.doc)?;
    let bytes = std::fs::read(&args.frame)
        .with_context(|| format!("read frame '{}'", args.frame.display()))?;
    let base = BaseRaster::decode(&bytes)?;
    let frame = framemark::render_full(&base, &doc.drawings)?;

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    save_png(&args.out, &frame)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn save_png(path: &Path, frame: &framemark::FrameRGBA) -> anyhow::Result<()> {
    image::save_buffer_with_format(
        path,
        &frame.to_rgba8_straight(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}

fn cmd_list(args: ListArgs) -> anyhow::Result<()> {
    let store = open_store(args.store)?;
    let index = AnnotationIndex::load(&store, &args.video)?;
    for doc in index.docs() {
        println!(
            "{}  {:>6}  {:<9}  {} drawing(s)",
            doc.id,
            framemark::format_time(doc.timestamp),
            doc.primary_type,
            doc.drawings.len()
        );
    }
    Ok(())
}

fn cmd_show(args: IdArgs) -> anyhow::Result<()> {
    let store = open_store(args.store)?;
    let doc = store
        .get(args.id)?
        .with_context(|| format!("no annotation with id {}", args.id))?;
    println!("{}", doc.to_json_pretty()?);
    Ok(())
}

fn cmd_delete(args: IdArgs) -> anyhow::Result<()> {
    let mut store = open_store(args.store)?;
    store.delete(args.id)?;
    eprintln!("deleted {}", args.id);
    Ok(())
}
