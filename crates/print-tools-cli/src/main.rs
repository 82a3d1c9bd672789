mod logger;

use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use logger::AppLogger;
use print_async_runtime::{PrintCommand, PrintUpdate, worker_task};
use print_bridge::{
    BridgeConfig, Capabilities, ColorMode, DuplexMode, PrintBridge, PrintSettings, Printer,
    ProductCatalog,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Log entries shown after a failed print
const DIAGNOSTIC_ENTRIES: usize = 20;

#[derive(Parser)]
#[command(name = "prt", about = "Printer discovery and geometry-corrected printing", version)]
struct Cli {
    /// Bridge configuration file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Paper product catalog (JSON)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    /// Log every command and decision to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available printers
    Printers,

    /// Show the system default printer
    DefaultPrinter,

    /// Show trays, duplex, color and paper sizes of a printer
    Caps {
        /// Printer name
        printer: String,
    },

    /// Recommend an input tray for a paper size
    RecommendTray {
        /// Paper width in mm
        #[arg(long)]
        width: f32,

        /// Paper height in mm
        #[arg(long)]
        height: f32,
    },

    /// Crop a PDF to the product margins and print it
    Print {
        /// Input PDF file
        file: PathBuf,

        #[command(flatten)]
        job: JobArgs,
    },

    /// Show the command that would print a file, without printing
    Plan {
        /// Input PDF file
        file: PathBuf,

        #[command(flatten)]
        job: JobArgs,
    },

    /// List paper products in the catalog
    Products,
}

#[derive(Args)]
struct JobArgs {
    /// Printer name (system default when omitted)
    #[arg(short, long)]
    printer: Option<String>,

    /// Input tray ("Auto-Select" lets the printer choose)
    #[arg(long)]
    tray: Option<String>,

    /// Number of copies
    #[arg(short = 'n', long)]
    copies: Option<u32>,

    /// Rotation in degrees (0, 90, 180, 270)
    #[arg(long)]
    rotation: Option<i32>,

    /// Two-sided printing
    #[arg(long, value_enum)]
    duplex: Option<DuplexArg>,

    /// Color mode
    #[arg(long, value_enum)]
    color: Option<ColorArg>,

    /// Media type passed to the driver
    #[arg(long)]
    media_type: Option<String>,

    /// Horizontal edge compensation in mm
    #[arg(long, allow_negative_numbers = true)]
    offset_x: Option<f32>,

    /// Vertical edge compensation in mm
    #[arg(long, allow_negative_numbers = true)]
    offset_y: Option<f32>,

    /// Paper product key from the catalog
    #[arg(long)]
    product: Option<String>,

    /// Page range, e.g. "1-3,5"
    #[arg(long)]
    pages: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum DuplexArg {
    None,
    Long,
    Short,
}

#[derive(Clone, Copy, ValueEnum)]
enum ColorArg {
    Color,
    Gray,
}

impl From<DuplexArg> for DuplexMode {
    fn from(arg: DuplexArg) -> Self {
        match arg {
            DuplexArg::None => Self::None,
            DuplexArg::Long => Self::LongEdge,
            DuplexArg::Short => Self::ShortEdge,
        }
    }
}

impl From<ColorArg> for ColorMode {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Color => Self::Color,
            ColorArg::Gray => Self::Grayscale,
        }
    }
}

impl From<JobArgs> for PrintSettings {
    fn from(args: JobArgs) -> Self {
        Self {
            printer_name: args.printer,
            tray: args.tray,
            copies: args.copies,
            rotation: args.rotation,
            duplex: args.duplex.map(Into::into),
            color: args.color.map(Into::into),
            media_type: args.media_type,
            offset_x: args.offset_x,
            offset_y: args.offset_y,
            product_key: args.product,
            pages: args.pages,
        }
    }
}

/// Request/response channel pair to the print worker
struct Session {
    command_tx: mpsc::UnboundedSender<PrintCommand>,
    update_rx: mpsc::UnboundedReceiver<PrintUpdate>,
}

impl Session {
    fn start(bridge: Arc<PrintBridge>) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        tokio::spawn(worker_task(bridge, command_rx, update_tx));
        Self {
            command_tx,
            update_rx,
        }
    }

    async fn request(&mut self, command: PrintCommand) -> Result<PrintUpdate> {
        self.command_tx
            .send(command)
            .map_err(|_| anyhow!("print worker stopped"))?;
        self.update_rx
            .recv()
            .await
            .ok_or_else(|| anyhow!("print worker stopped"))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let logger = AppLogger::new(200, cli.verbose);
    logger.clone().init()?;

    let config = match &cli.config {
        Some(path) => BridgeConfig::load(path)
            .await
            .with_context(|| format!("loading config {}", path.display()))?,
        None => BridgeConfig::default(),
    };
    let catalog = match &cli.catalog {
        Some(path) => ProductCatalog::load(path)
            .await
            .with_context(|| format!("loading catalog {}", path.display()))?,
        None => ProductCatalog::default(),
    };

    let bridge = Arc::new(PrintBridge::from_config(&config, catalog));
    log::debug!("Using the {:?} printing backend", bridge.platform());
    let mut session = Session::start(bridge.clone());
    let json = cli.json;

    match cli.command {
        Commands::Printers => {
            if let PrintUpdate::PrintersListed { printers } =
                session.request(PrintCommand::ListPrinters).await?
            {
                if json {
                    println!("{}", serde_json::to_string_pretty(&printers)?);
                } else {
                    print_printers(&printers);
                }
            }
        }

        Commands::DefaultPrinter => {
            if let PrintUpdate::DefaultPrinter { printer } =
                session.request(PrintCommand::DefaultPrinter).await?
            {
                if json {
                    println!("{}", serde_json::to_string_pretty(&printer)?);
                } else {
                    println!("{}", printer.as_deref().unwrap_or("(no default printer)"));
                }
            }
        }

        Commands::Caps { printer } => {
            if let PrintUpdate::CapabilitiesFetched {
                printer,
                capabilities,
            } = session
                .request(PrintCommand::Capabilities { printer })
                .await?
            {
                if json {
                    println!("{}", serde_json::to_string_pretty(&capabilities)?);
                } else {
                    print_capabilities(&printer, &capabilities);
                }
            }
        }

        Commands::RecommendTray { width, height } => {
            if let PrintUpdate::TrayRecommended { tray, .. } = session
                .request(PrintCommand::RecommendTray {
                    width_mm: width,
                    height_mm: height,
                })
                .await?
            {
                if json {
                    println!("{}", serde_json::to_string_pretty(&tray)?);
                } else {
                    println!("{}", tray.as_deref().unwrap_or("(no recommendation)"));
                }
            }
        }

        Commands::Print { file, job } => {
            if !file.exists() {
                bail!("Input file not found: {}", file.display());
            }

            if let PrintUpdate::PrintFinished { path, outcome } = session
                .request(PrintCommand::Print {
                    path: file,
                    settings: job.into(),
                })
                .await?
            {
                if json {
                    println!("{}", serde_json::to_string_pretty(&outcome)?);
                }
                if !outcome.success {
                    eprintln!("Recent log:");
                    for entry in logger.recent(DIAGNOSTIC_ENTRIES) {
                        eprintln!("  {}", entry);
                    }
                    bail!(
                        "Printing {} failed: {}",
                        path.display(),
                        outcome.error.as_deref().unwrap_or("unknown error")
                    );
                }
                if !json {
                    println!("Sent {} to the printer", path.display());
                }
            }
        }

        Commands::Plan { file, job } => {
            let command = bridge.plan(&file, job.into());
            if json {
                let mut argv = vec![command.program.clone()];
                argv.extend(command.args.iter().cloned());
                println!("{}", serde_json::to_string_pretty(&argv)?);
            } else {
                println!("{}", command);
            }
        }

        Commands::Products => {
            let products: Vec<_> = bridge.catalog().products().collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&products)?);
            } else if products.is_empty() {
                println!("No paper products configured");
            } else {
                for product in products {
                    let tray = bridge
                        .recommend_tray(product.width, product.height)
                        .unwrap_or_else(|| "-".to_string());
                    println!(
                        "{:<20} {:<28} {:>6.1} x {:<6.1} mm  tray: {}",
                        product.id,
                        product.label(),
                        product.width,
                        product.height,
                        tray
                    );
                }
            }
        }
    }

    Ok(())
}

fn print_printers(printers: &[Printer]) {
    if printers.is_empty() {
        println!("No printers available");
        return;
    }
    for printer in printers {
        println!(
            "{:<32} {:<12} duplex: {}",
            printer.name,
            printer.status_detail,
            if printer.duplex_supported { "yes" } else { "no" }
        );
    }
}

fn print_capabilities(printer: &str, caps: &Capabilities) {
    let join = |items: &[String]| {
        if items.is_empty() {
            "-".to_string()
        } else {
            items.join(", ")
        }
    };
    let modes: Vec<String> = caps
        .duplex_modes
        .iter()
        .map(|mode| mode.as_str().to_string())
        .collect();

    println!("Printer: {}", printer);
    println!("  Trays: {}", join(&caps.trays));
    println!(
        "  Duplex: {} ({})",
        if caps.can_duplex { "yes" } else { "no" },
        join(&modes)
    );
    println!("  Color: {}", if caps.supports_color { "yes" } else { "no" });
    println!("  Paper sizes: {}", join(&caps.paper_sizes));
}
