//! notefeed - Entry Point

use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

use notefeed::integration::{run_session, Driver, ScrollSession};
use notefeed::model::{AppError, PropertyId};
use notefeed::ordering::{SortDirection, SortSpec};
use notefeed::source::ManifestSource;

/// notefeed - replay a scroll session over a virtualized feed of notes
#[derive(Parser, Debug)]
#[command(name = "notefeed")]
#[command(version)]
#[command(about = "Render a virtualized feed of markdown notes listed in a JSONL manifest")]
pub struct Args {
    /// Path to the JSONL manifest; note paths resolve against its directory
    pub manifest: PathBuf,

    /// Container width in pixels
    #[arg(long, default_value = "1280", value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Viewport height in pixels
    #[arg(long, default_value = "800", value_parser = clap::value_parser!(u32).range(1..))]
    pub viewport: u32,

    /// Scroll offsets to visit after the first frame, comma separated
    #[arg(short, long, value_delimiter = ',')]
    pub scroll: Vec<u64>,

    /// Lay cards out in masonry columns
    #[arg(long)]
    pub columns: bool,

    /// Show each note's properties inside its card
    #[arg(long)]
    pub show_properties: bool,

    /// Max card width in masonry mode (clamped to 200..=800)
    #[arg(long)]
    pub max_card_width: Option<u32>,

    /// Property to sort by; title order when omitted
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    pub desc: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    fn sort_spec(&self) -> SortSpec {
        let Some(raw) = self.sort.as_deref() else {
            return SortSpec::none();
        };
        match PropertyId::new(raw) {
            Ok(property) => {
                let direction = if self.desc {
                    SortDirection::Descending
                } else {
                    SortDirection::Ascending
                };
                SortSpec::by(property, direction)
            }
            Err(err) => {
                tracing::warn!(property = raw, error = %err, "Ignoring invalid sort property");
                SortSpec::none()
            }
        }
    }
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = notefeed::config::load_config_with_precedence(args.config.clone())?;
        let merged = notefeed::config::merge_config(config_file);
        let with_env = notefeed::config::apply_env_overrides(merged);

        // Boolean flags only override when explicitly set
        let show_override = args.show_properties.then_some(true);
        let columns_override = args.columns.then_some(true);

        notefeed::config::apply_cli_overrides(
            with_env,
            show_override,
            columns_override,
            args.max_card_width,
        )
    };

    notefeed::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let source = ManifestSource::load(&args.manifest)?.with_sort(args.sort_spec());
    let session = ScrollSession {
        container_width: args.width,
        viewport_height: args.viewport,
        offsets: args.scroll.clone(),
    };

    let mut driver = Driver::new(source.root().to_path_buf(), config.feed_options());
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_session(&mut driver, &source, &session, &mut out)?;
    out.flush()?;

    let leaked = driver.shutdown();
    info!(leaked, "Feed torn down");

    Ok(())
}
