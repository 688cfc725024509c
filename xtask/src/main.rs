//! Build automation tasks for the platformer
//!
//! Usage:
//!   cargo xtask build-web       # Build WASM and stage dist/web
//!   cargo xtask package-itch    # Zip dist/web for itch.io upload

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::Command;

const CRATE_NAME: &str = "pixle-platformer";

/// Web shell files staged next to the wasm
const WEB_FILES: [&str; 1] = ["index.html"];

/// JS glue matching the macroquad version in Cargo.toml
const MQ_JS_URL: &str = "https://raw.githubusercontent.com/not-fl3/macroquad/v0.4.14/js/mq_js_bundle.js";

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation for pixle-platformer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build WASM and stage a playable web build in dist/web
    BuildWeb {
        /// Mark as dev build (tags the page title)
        #[arg(long)]
        dev: bool,
    },
    /// Create zip file ready for itch.io upload
    PackageItch,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::BuildWeb { dev } => build_web(dev),
        Commands::PackageItch => package_itch(),
    }
}

/// Workspace root (parent of the xtask crate)
fn project_root() -> Result<PathBuf> {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .context("xtask has no parent directory")
}

/// Run `program` with `args`, failing on a non-zero exit
fn run(program: &str, args: &[&str], dir: &Path) -> Result<()> {
    let status = Command::new(program)
        .args(args)
        .current_dir(dir)
        .status()
        .with_context(|| format!("could not start {}", program))?;
    anyhow::ensure!(status.success(), "{} exited with {}", program, status);
    Ok(())
}

/// Copy every file under `src` into `dst`, keeping relative paths
fn stage_tree(src: &Path, dst: &Path) -> Result<usize> {
    let mut pending = vec![src.to_path_buf()];
    let mut copied = 0;
    while let Some(dir) = pending.pop() {
        for entry in std::fs::read_dir(&dir).with_context(|| format!("reading {}", dir.display()))? {
            let path = entry?.path();
            if path.is_dir() {
                pending.push(path);
                continue;
            }
            let rel = path.strip_prefix(src)?;
            let out = dst.join(rel);
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::copy(&path, &out).with_context(|| format!("copying {}", path.display()))?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Build WASM for web deployment
fn build_web(dev: bool) -> Result<()> {
    let root = project_root()?;
    let dist = root.join("dist/web");

    println!("Building WASM...");
    run(
        "cargo",
        &["build", "--release", "--target", "wasm32-unknown-unknown", "-p", CRATE_NAME],
        &root,
    )?;

    if dist.exists() {
        std::fs::remove_dir_all(&dist)?;
    }
    std::fs::create_dir_all(&dist)?;

    println!("Copying files to dist/web...");
    let wasm = format!("{}.wasm", CRATE_NAME);
    std::fs::copy(
        root.join("target/wasm32-unknown-unknown/release").join(&wasm),
        dist.join(&wasm),
    )
    .context("wasm build output not found")?;

    let web = root.join("web");
    for file in WEB_FILES {
        std::fs::copy(web.join(file), dist.join(file))
            .with_context(|| format!("missing web shell file {}", file))?;
    }

    println!("Fetching macroquad JS loader...");
    run("curl", &["-L", "-o", "mq_js_bundle.js", MQ_JS_URL], &dist)?;

    let assets = stage_tree(&root.join("assets"), &dist.join("assets"))?;
    println!("Staged {} asset files", assets);

    if dev {
        println!("Applying DEV build modifications...");
        let index_path = dist.join("index.html");
        let index = std::fs::read_to_string(&index_path)?;
        let index = index.replace("<title>", "<title>[DEV] ");
        std::fs::write(&index_path, index)?;
    }

    println!("Web build complete: dist/web/");
    Ok(())
}

/// Create zip for itch.io
fn package_itch() -> Result<()> {
    build_web(false)?;

    let root = project_root()?;
    let dist = root.join("dist");
    let zip_name = format!("{}-itch.zip", CRATE_NAME);
    let zip_path = dist.join(&zip_name);

    if zip_path.exists() {
        std::fs::remove_file(&zip_path)?;
    }

    println!("Creating itch.io zip...");
    run("zip", &["-r", &format!("../{}", zip_name), "."], &dist.join("web"))?;

    println!("itch.io package ready: dist/{}", zip_name);
    Ok(())
}
