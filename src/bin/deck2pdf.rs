//! deck2pdf CLI
//!
//! Opens a slide presentation in Chrome/Chromium (or attaches to a running
//! instance), traverses the deck, and writes a paginated PDF.

use anyhow::{Context, bail};
use clap::Parser;
use deck2pdf::{
    BrowserSession, CdpCapture, CdpViewer, ConnectionOptions, LaunchOptions, PdfAssembler,
    TraversalController,
    viewer::HostUi,
};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "deck2pdf", version, about = "Export a web-hosted slide presentation to PDF")]
struct Args {
    /// URL of the presentation viewer
    url: Option<String>,

    /// Output PDF path (default: derived from the page title)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Start the export immediately instead of waiting for the injected
    /// export button to be clicked
    #[arg(long)]
    now: bool,

    /// Launch the browser with a visible window
    #[arg(long)]
    headed: bool,

    /// Path to the Chrome/Chromium binary
    #[arg(long)]
    chrome_path: Option<PathBuf>,

    /// Browser window size, e.g. 1920x1080
    #[arg(long, value_name = "WxH")]
    window_size: Option<String>,

    /// Attach to a running browser via its WebSocket debugger URL instead of
    /// launching one
    #[arg(long, value_name = "WS_URL")]
    connect: Option<String>,

    /// Print the export report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if !args.now && !args.headed && args.connect.is_none() {
        bail!("trigger mode needs a visible browser; pass --headed, or --now for an immediate export");
    }

    let session = match &args.connect {
        Some(ws_url) => BrowserSession::connect(ConnectionOptions::new(ws_url))
            .context("failed to connect to browser")?,
        None => {
            let mut options = LaunchOptions::new().headless(!args.headed);
            if let Some(path) = &args.chrome_path {
                options = options.chrome_path(path);
            }
            if let Some(size) = &args.window_size {
                let (width, height) = parse_window_size(size)
                    .with_context(|| format!("invalid window size '{}'", size))?;
                options = options.window_size(width, height);
            }
            BrowserSession::launch(options).context("failed to launch browser")?
        }
    };

    match &args.url {
        Some(url) => {
            session.navigate(url).context("failed to open presentation")?;
            session.wait_for_navigation()?;
        }
        None if args.connect.is_some() => {
            // Attached to a running browser: export whatever deck its active
            // tab is showing
        }
        None => bail!("a presentation URL is required unless --connect is given"),
    }

    let viewer = CdpViewer::new(&session);

    if !args.now {
        viewer.insert_trigger().context("failed to place export button")?;
        eprintln!("Waiting for the export button to be clicked...");
        while !viewer.trigger_clicked()? {
            std::thread::sleep(Duration::from_millis(200));
        }
    }

    let capture = CdpCapture::new(&session);
    let assembler = PdfAssembler::new();

    let mut controller = TraversalController::new(&viewer, &capture, &assembler);
    if let Some(output) = &args.output {
        controller = controller.with_output(output);
    }

    let report = controller.export_all()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        match &report.output {
            Some(path) => eprintln!(
                "Captured {} of {} slides -> {}",
                report.captured,
                report.total_slides,
                path.display()
            ),
            None => eprintln!("No slides captured; nothing written"),
        }
    }

    Ok(())
}

fn parse_window_size(value: &str) -> Option<(u32, u32)> {
    let (width, height) = value.split_once(['x', 'X'])?;
    Some((width.trim().parse().ok()?, height.trim().parse().ok()?))
}
