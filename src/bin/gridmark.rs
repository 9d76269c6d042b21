//! Gridmark CLI - Render grid blocks and edit image embeds in markdown notes

#[cfg(feature = "cli")]
use clap::{ArgGroup, Args, Parser, Subcommand};
#[cfg(feature = "cli")]
use gridmark::{
    diagnostics::{check_grid, format_diagnostics},
    document::{check_document, render_document},
    render_block_html,
    templates::{generate_grid_id, grid_template},
    GridError, ImageAction, PulldownRenderer, RenderContext, RenderOptions,
};
#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::io::{self, Read, Write};
#[cfg(feature = "cli")]
use tracing::debug;
#[cfg(feature = "cli")]
use tracing_subscriber::EnvFilter;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "gridmark")]
#[command(version)]
#[command(about = "Gridmark - grid layouts and image embeds for markdown notes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log debug output to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Rendering flags shared by `render` and `block`
#[cfg(feature = "cli")]
#[derive(Args)]
struct RenderArgs {
    /// Info string that marks a fenced block as a grid
    #[arg(long, default_value = "grid")]
    fence: String,

    /// Track height for blocks that set no cell-height
    #[arg(long, default_value = "200px")]
    cell_height: String,

    /// Leave ![[file]] embeds as text
    #[arg(long)]
    no_embeds: bool,

    /// Render every grid as invisible
    #[arg(long)]
    invisible: bool,
}

#[cfg(feature = "cli")]
impl RenderArgs {
    fn options(&self) -> RenderOptions {
        RenderOptions {
            fence_language: self.fence.clone(),
            default_cell_height: self.cell_height.clone(),
            expand_embeds: !self.no_embeds,
            ..RenderOptions::default()
        }
    }

    fn context(&self) -> RenderContext {
        RenderContext {
            invisible_mode: self.invisible,
        }
    }
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Render a markdown document to HTML, grid blocks included
    Render {
        /// Input file path (reads from stdin if not provided)
        input: Option<String>,

        /// Output file path (writes to stdout if not provided)
        #[arg(short, long)]
        output: Option<String>,

        /// Embed the grid stylesheet in the output
        #[arg(long)]
        standalone: bool,

        /// Suppress warning output to stderr
        #[arg(short, long)]
        quiet: bool,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Render a single grid block (the text inside the fence) to HTML
    Block {
        /// Input file path (reads from stdin if not provided)
        input: Option<String>,

        /// Path of the note the block belongs to, for resolving images
        #[arg(long)]
        source: Option<String>,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Print an empty grid block of the given size
    Template {
        #[arg(short, long, default_value_t = 2)]
        columns: usize,

        #[arg(short, long, default_value_t = 2)]
        rows: usize,

        /// Block id (time-based if not provided)
        #[arg(long)]
        id: Option<String>,

        /// Info string for the fence
        #[arg(long, default_value = "grid")]
        fence: String,
    },

    /// Set or clear the position and size of the image embed near a line
    #[command(group(ArgGroup::new("action").required(true).args(["position", "size", "clear"])))]
    Image {
        /// Markdown file to edit
        input: String,

        /// Cursor line (1-based)
        #[arg(short, long)]
        line: usize,

        /// New position modifier, or "clear"
        #[arg(long)]
        position: Option<String>,

        /// New size modifier, or "clear"
        #[arg(long)]
        size: Option<String>,

        /// Remove position and size modifiers
        #[arg(long)]
        clear: bool,

        /// Write the result back to the input file instead of stdout
        #[arg(short, long)]
        in_place: bool,
    },

    /// Check grid blocks for settings and cells that will not render as written
    Check {
        /// Input file to check
        input: Option<String>,

        /// Treat the input as a bare grid block instead of a document
        #[arg(long)]
        block: bool,

        /// Info string that marks a fenced block as a grid
        #[arg(long, default_value = "grid")]
        fence: String,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Show version and feature info
    Info,
}

#[cfg(feature = "cli")]
fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Render {
            input,
            output,
            standalone,
            quiet,
            render,
        } => {
            let content = read_input(input.as_deref())?;
            let options = RenderOptions {
                include_stylesheet: standalone,
                ..render.options()
            };
            let source = input.as_deref().unwrap_or("");
            let result = render_document(&content, source, &options, &render.context());

            if !quiet {
                for warning in &result.warnings {
                    eprintln!("{}", warning);
                }
            }
            write_output(output.as_deref(), &result.content)?;
        }

        Commands::Block {
            input,
            source,
            render,
        } => {
            let content = read_input(input.as_deref())?;
            let options = render.options();
            let renderer = PulldownRenderer::from_options(&options);
            let source = source.or(input).unwrap_or_default();
            let html =
                render_block_html(&content, &source, &options, &render.context(), &renderer);
            println!("{}", html);
        }

        Commands::Template {
            columns,
            rows,
            id,
            fence,
        } => {
            let id = id.unwrap_or_else(generate_grid_id);
            match grid_template(columns, rows, &id, &fence) {
                Ok(block) => print!("{}", block),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(2);
                }
            }
        }

        Commands::Image {
            input,
            line,
            position,
            size,
            clear,
            in_place,
        } => {
            let action = match (position, size) {
                _ if clear => ImageAction::Clear,
                (Some(p), _) => ImageAction::Position(p),
                (None, Some(s)) => ImageAction::Size(s),
                (None, None) => ImageAction::Clear,
            };
            let content = fs::read_to_string(&input)?;
            let cursor = line.saturating_sub(1);

            match gridmark::rewrite_image_line(&content, cursor, &action) {
                Ok(updated) => {
                    if in_place {
                        fs::write(&input, updated)?;
                        eprintln!("✓ {} applied in: {}", action, input);
                    } else {
                        print!("{}", updated);
                    }
                }
                Err(e @ GridError::ImageNotFound { .. }) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
                Err(e) => return Err(io::Error::new(io::ErrorKind::Other, e)),
            }
        }

        Commands::Check {
            input,
            block,
            fence,
            no_color,
        } => {
            let content = read_input(input.as_deref())?;
            let result = if block {
                check_grid(&content)
            } else {
                let options = RenderOptions::default().with_fence_language(fence);
                check_document(&content, &options)
            };
            println!("{}", format_diagnostics(&result, !no_color));

            if result.has_errors() {
                std::process::exit(1);
            }
        }

        Commands::Info => {
            println!("Gridmark - grid layouts and image embeds for markdown notes");
            println!("Version: {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Features:");
            println!("  ✓ Grid blocks rendered to CSS grid containers");
            println!("  ✓ Whole-document rendering (CommonMark + tables, footnotes, tasks)");
            println!("  ✓ ![[image|modifiers]] embed expansion");
            println!("  ✓ Image position/size rewriting near a cursor line");
            println!("  ✓ Grid block templates and diagnostics");
            println!();
            println!("Settings keys:");
            println!("  columns, rows, show-borders, cell-height, dynamic-height,");
            println!("  invisible-mode, col-widths, row-heights");
            println!();
            println!("Image modifiers:");
            println!("  position: {}", gridmark::constants::POSITION_KEYWORDS.join(", "));
            println!("  size: {}", gridmark::constants::SIZE_KEYWORDS.join(", "));
            println!();
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn init_logging(verbose: bool) {
    let default = if verbose { "gridmark=debug" } else { "gridmark=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[cfg(feature = "cli")]
fn read_input(path: Option<&str>) -> io::Result<String> {
    match path {
        Some(path) => {
            debug!(path, "reading input");
            fs::read_to_string(path)
        }
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

#[cfg(feature = "cli")]
fn write_output(path: Option<&str>, content: &str) -> io::Result<()> {
    match path {
        Some(path) => {
            let mut file = fs::File::create(path)?;
            write!(file, "{}", content)?;
            eprintln!("✓ Output written to: {}", path);
        }
        None => print!("{}", content),
    }
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    std::process::exit(1);
}
