use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::api::{self, Components};
use crate::config::{self, Config};
use crate::ApiResponse;

#[derive(Parser)]
#[command(name = "reviewcrawl", version, about = "Save review pages, then extract them to CSV tables")]
pub struct Cli {
    /// Config file (JSON). Defaults to the platform config dir, then built-ins.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch listing pages and save every linked review page
    Collect(PagesArgs),
    /// Parse saved review pages and write the five CSV tables
    Extract,
    /// Collect, then extract
    Run(PagesArgs),
    /// Print the review links on one listing page
    Links { page: u32 },
    /// Show the activity journal, newest first
    Log {
        #[arg(long)]
        errors: bool,
    },
    #[command(subcommand)]
    Config(ConfigCmd),
}

#[derive(Args)]
struct PagesArgs {
    /// Listing pages, e.g. `155,156` or `150-152`. Overrides the config.
    #[arg(long, value_parser = parse_pages)]
    pages: Option<PageList>,
}

impl PagesArgs {
    fn pages(&self) -> Option<&[u32]> {
        self.pages.as_ref().map(|p| p.0.as_slice())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PageList(Vec<u32>);

#[derive(Subcommand)]
enum ConfigCmd {
    /// Print the effective config
    Show,
    /// Write the default config to the config path
    Init {
        #[arg(long)]
        force: bool,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let path = cli.config;

    match cli.cmd {
        Command::Config(ConfigCmd::Init { force }) => finish(config_init(path, force)),
        Command::Config(ConfigCmd::Show) => finish(load(&path)),
        Command::Collect(args) => finish(load(&path).and_then(|cfg| {
            with_components(&cfg, |c| api::collect(&cfg, c, args.pages()))
        })),
        Command::Extract => finish(
            load(&path).and_then(|cfg| with_components(&cfg, |c| api::extract(&cfg, c))),
        ),
        Command::Run(args) => finish(load(&path).and_then(|cfg| {
            with_components(&cfg, |c| api::run(&cfg, c, args.pages()))
        })),
        Command::Links { page } => finish(load(&path).and_then(|cfg| {
            with_components(&cfg, |c| api::listing_links(&cfg, c, page))
        })),
        Command::Log { errors } => {
            finish(load(&path).and_then(|cfg| Ok(api::activity(&cfg, errors)?)))
        }
    }
}

fn load(path: &Option<PathBuf>) -> anyhow::Result<Config> {
    config::load_config(path.as_deref()).context("loading config")
}

fn with_components<T>(
    cfg: &Config,
    f: impl FnOnce(&Components) -> crate::Result<T>,
) -> anyhow::Result<T> {
    let components = Components::from_config(cfg)?;
    Ok(f(&components)?)
}

fn config_init(explicit: Option<PathBuf>, force: bool) -> anyhow::Result<PathBuf> {
    let path = match explicit {
        Some(p) => p,
        None => config::default_config_path()?,
    };
    config::save_config(&path, &Config::default(), force)?;
    Ok(path)
}

/// `155,156` and `150-152` style lists; input order kept, repeats dropped, all > 0.
fn parse_pages(s: &str) -> Result<PageList, String> {
    let mut out = Vec::new();
    for part in s.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        if let Some((a, b)) = part.split_once('-') {
            let a: u32 = a.trim().parse().map_err(|_| format!("bad page: {part}"))?;
            let b: u32 = b.trim().parse().map_err(|_| format!("bad page: {part}"))?;
            if a > b {
                return Err(format!("invalid range: {part}"));
            }
            out.extend(a..=b);
        } else {
            out.push(part.parse().map_err(|_| format!("bad page: {part}"))?);
        }
    }
    if out.contains(&0) {
        return Err("listing pages start at 1".into());
    }
    if out.is_empty() {
        return Err("no pages given".into());
    }
    Ok(PageList(crate::dedupe!(out)))
}

fn finish<T: serde::Serialize>(res: anyhow::Result<T>) -> ExitCode {
    match res {
        Ok(v) => {
            print_json(ApiResponse::ok(v));
            ExitCode::SUCCESS
        }
        Err(e) => {
            print_json(ApiResponse::<()>::err(format!("{e:#}")));
            ExitCode::FAILURE
        }
    }
}

fn print_json<T: serde::Serialize>(val: T) {
    match serde_json::to_string_pretty(&val) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("Error serializing to JSON: {e}"),
    }
}
