use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use gotags::{Settings, TagIndexer, logging};

/// Generate Exuberant Ctags compatible tags for Go source
#[derive(Parser)]
#[command(name = "gotags", version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Go source files, or directories with --recurse
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// Recurse into the given directories
    #[arg(short, long)]
    recurse: bool,

    /// Write the tag file here instead of standard output
    #[arg(short = 'f', long = "output", value_name = "FILE")]
    output: Option<PathBuf>,

    /// Path to a custom gotags.toml
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref()).unwrap_or_else(|e| {
        eprintln!("configuration error: {e}");
        eprintln!("continuing with default settings");
        Settings::default()
    });
    if cli.recurse {
        settings.indexing.recurse = true;
    }
    logging::init_with_config(&settings.logging);

    let mut indexer =
        TagIndexer::new(Arc::new(settings)).context("failed to initialize the Go parser")?;
    indexer.index_paths(&cli.paths);
    let (index, diagnostic) = indexer.finish();

    match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            index.write_to(&mut writer).context("failed to write tags")?;
            writer.flush().context("failed to write tags")?;
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            index.write_to(&mut writer).context("failed to write tags")?;
            writer.flush().context("failed to write tags")?;
        }
    }

    // Parse failures are non-fatal; the first one is surfaced after the
    // tag file is complete.
    if let Some(diag) = diagnostic {
        eprintln!("gotags: warning: {}: {}", diag.path.display(), diag.error);
    }

    Ok(())
}
