// src/cli.rs
use std::{path::PathBuf, thread, time::Duration};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{eyre, Result};

use crate::{
    config::{consts::CONFIG_FILE, options::AppOptions},
    core::clock::SystemClock,
    document::HtmlFile,
    report::{render_summary, signed},
    store::{FileStore, SnapshotStore},
    Evaluator,
};

#[derive(Debug, Parser)]
#[command(name = "metricas-cli", version, about = "Evaluate an academic landing page against the SNII/VIEP rubric")]
pub struct Cli {
    /// Options file (TOML)
    #[arg(long, default_value = CONFIG_FILE)]
    pub config: PathBuf,

    /// Store directory (overrides the options file)
    #[arg(long)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the evaluation summary
    Evaluate {
        /// Landing page HTML file
        page: Option<PathBuf>,
    },
    /// Write the JSON report
    Export {
        page: Option<PathBuf>,
        /// Output directory
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Re-extract periodically and print detected changes
    Watch {
        page: Option<PathBuf>,
        /// Stop after this many ticks (runs forever otherwise)
        #[arg(long)]
        ticks: Option<u32>,
        /// Seconds between ticks
        #[arg(long)]
        interval: Option<u64>,
    },
    /// Print the persisted change history
    History,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let (mut options, loaded) = AppOptions::load(&cli.config);
    if let Some(dir) = cli.store {
        options.store_dir = dir;
    }
    crate::log::init(&options.store_dir, true);
    loaded.report(&cli.config);

    match cli.command {
        Command::Evaluate { page } => {
            let ev = open(&options, page)?;
            print!("{}", render_summary(&ev.report()));
        }
        Command::Export { page, out } => {
            let ev = open(&options, page)?;
            let dir = out.unwrap_or_else(|| options.export_dir.clone());
            let path = ev.export(&dir)?;
            println!("Wrote {}", path.display());
        }
        Command::Watch { page, ticks, interval } => {
            if let Some(secs) = interval {
                options.tick_secs = secs;
            }
            let mut ev = open(&options, page)?;
            watch(&mut ev, options.tick_interval(), ticks);
            print!("{}", render_summary(&ev.report()));
        }
        Command::History => {
            let mut store = SnapshotStore::new(Box::new(FileStore::under(&options.store_dir)));
            let history = store.load_history();
            if history.is_empty() {
                println!("No changes recorded yet.");
            }
            for c in history {
                println!("{}  {:<22} impact {}%", c.timestamp.to_rfc3339(), c.kind.label(), signed(c.impact));
            }
        }
    }
    Ok(())
}

fn open(options: &AppOptions, page: Option<PathBuf>) -> Result<Evaluator> {
    let page = page
        .or_else(|| options.page.clone())
        .ok_or_else(|| eyre!("no page given: pass a path or set `page` in {}", CONFIG_FILE))?;
    if !page.is_file() {
        return Err(eyre!("page not found: {}", page.display()));
    }
    Ok(Evaluator::from_options(
        Box::new(HtmlFile::new(page)),
        Box::new(FileStore::under(&options.store_dir)),
        Box::new(SystemClock),
        options,
    ))
}

fn watch(ev: &mut Evaluator, every: Duration, ticks: Option<u32>) {
    eprintln!("Watching {} every {}s", ev.source_label(), every.as_secs());
    let mut done = 0u32;
    while ticks.is_none_or(|n| done < n) {
        thread::sleep(every);
        done += 1;
        if let Some(c) = ev.tick() {
            let score = ev.evaluate().score;
            println!(
                "{}  {:<22} impact {}%  score {}%",
                c.timestamp.format("%H:%M:%S"),
                c.kind.label(),
                signed(c.impact),
                score
            );
        }
    }
}
