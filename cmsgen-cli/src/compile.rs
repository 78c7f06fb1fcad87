//! The `compile` command.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cmsgen_compiler::Compiler;
use cmsgen_config::{load_layouts, ConfigProvider};
use tracing::{debug, info};
use ulid::Ulid;

use crate::cli::CompileArgs;

/// Where a compile run put its document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    File(PathBuf),
    Stdout,
}

/// Result of a compile run.
#[derive(Debug, Clone)]
pub struct CompileReport {
    pub destination: Destination,
    pub yaml: String,
    pub entries: usize,
}

/// Load configuration under `project`, compile, and write the output.
///
/// With `stdout` set nothing is written; the caller prints
/// [`CompileReport::yaml`].
pub fn run_compile(project: &Path, args: &CompileArgs) -> Result<CompileReport> {
    let mut provider = ConfigProvider::new(project);
    if let Some(path) = &args.config {
        provider = provider.with_file(path);
    }
    let mut config = provider.load().context("loading site configuration")?;
    if args.dedupe {
        config.dedupe = true;
    }

    let layouts_dir = config.layouts_path(project);
    let layouts = load_layouts(&layouts_dir)
        .with_context(|| format!("loading layouts from {}", layouts_dir.display()))?;
    let registry = config.build_registry()?;

    let compiler = Compiler::new(&registry, config.compile_options());
    let input = config.compile_input(layouts);
    let document = compiler.document(&input);
    let entries = document.content.len();
    let yaml = compiler
        .render_assembled(&document)
        .context("rendering document")?;

    if args.stdout {
        return Ok(CompileReport {
            destination: Destination::Stdout,
            yaml,
            entries,
        });
    }

    let output = match &args.output {
        Some(path) => path.clone(),
        None => config.output_path(project),
    };
    atomic_write(&output, yaml.as_bytes())
        .with_context(|| format!("writing {}", output.display()))?;
    info!(path = %output.display(), entries, "wrote content model");

    Ok(CompileReport {
        destination: Destination::File(output),
        yaml,
        entries,
    })
}

/// Write a file atomically via temp file + rename.
fn atomic_write(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;
    let tmp = dir.join(format!(".tmp_{}", Ulid::new()));
    debug!(tmp = %tmp.display(), "writing temp file");
    fs::write(&tmp, data)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    Ok(())
}
