//! `timebro` — find meeting times across time zones from the command line.
//!
//! # Usage
//!
//! ```text
//! timebro best --zone America/New_York --zone Europe/London --date 2026-01-15
//! timebro clock --zone Asia/Tokyo --zone UTC+5 --at 2026-01-15T14:00:00Z
//! timebro zones delhi
//! timebro prefs --24h
//! ```

mod config;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use slot_engine::catalog::{self, CatalogEntry};
use slot_engine::display::{self, ClockStyle};
use slot_engine::{
    find_best_slots_with_options, headline, parse_reference, JsonFileStore, Preferences,
    RankedSlot, SlotLabel, TzdbOracle, UsageTracker, WorkingHoursWindow, ZoneList,
};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Environment variable holding the log filter (e.g. `TIMEBRO_LOG=debug`).
const LOG_ENV: &str = "TIMEBRO_LOG";

#[derive(Parser)]
#[command(name = "timebro", version, about = "Time zone conversion and meeting-time finder")]
struct Cli {
    /// TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// JSON file for usage counts and preferences
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Suggest the best meeting times for a set of zones
    Best(BestArgs),
    /// Show the local time in each zone
    Clock(ClockArgs),
    /// List or search the zone catalog
    Zones(ZonesArgs),
    /// Show or change display preferences
    Prefs(FormatArgs),
}

#[derive(Args)]
struct BestArgs {
    /// Zone as ID or ID=LABEL (e.g. Europe/London, "Asia/Kolkata=Delhi office", UTC+5)
    #[arg(short, long = "zone", required = true)]
    zones: Vec<String>,

    /// Day to search (YYYY-MM-DD or RFC 3339). Defaults to today in UTC.
    #[arg(short, long, alias = "at")]
    date: Option<String>,

    /// First working hour
    #[arg(long)]
    start: Option<u32>,

    /// End of working hours (exclusive)
    #[arg(long)]
    end: Option<u32>,

    /// Minutes between candidate times
    #[arg(long)]
    granularity: Option<u32>,

    /// Number of suggestions
    #[arg(short = 'n', long)]
    limit: Option<usize>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    format: FormatArgs,
}

#[derive(Args)]
struct ClockArgs {
    /// Zone as ID or ID=LABEL
    #[arg(short, long = "zone", required = true)]
    zones: Vec<String>,

    /// Instant to show (RFC 3339 or YYYY-MM-DD). Defaults to now.
    #[arg(short, long)]
    at: Option<String>,

    /// Include seconds
    #[arg(long)]
    seconds: bool,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    format: FormatArgs,
}

#[derive(Args)]
struct ZonesArgs {
    /// Filter by label or identifier (case-insensitive)
    term: Option<String>,

    /// List UTC offset pseudo-zones
    #[arg(long, conflicts_with_all = ["all", "regions"])]
    utc: bool,

    /// List every zone in the tz database
    #[arg(long, conflicts_with = "regions")]
    all: bool,

    /// List one zone per region
    #[arg(long)]
    regions: bool,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct FormatArgs {
    /// Use a 24-hour clock
    #[arg(long = "24h", conflicts_with = "twelve_hour")]
    twenty_four_hour: bool,

    /// Use a 12-hour clock
    #[arg(long = "12h")]
    twelve_hour: bool,
}

impl FormatArgs {
    fn requested(&self) -> Option<bool> {
        match (self.twenty_four_hour, self.twelve_hour) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    let store = JsonFileStore::new(config.store_path(cli.store.as_deref()));
    tracing::debug!(store = %store.path().display(), "using store");

    match cli.command {
        Commands::Best(args) => cmd_best(args, &config, store),
        Commands::Clock(args) => cmd_clock(args, &config, store),
        Commands::Zones(args) => cmd_zones(args, store),
        Commands::Prefs(args) => cmd_prefs(args, store),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

// ── best ────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct BestOutput<'a> {
    reference: DateTime<Utc>,
    window: WorkingHoursWindow,
    headline: Option<SlotLabel>,
    slots: &'a [RankedSlot],
}

fn cmd_best(args: BestArgs, config: &Config, store: JsonFileStore) -> Result<()> {
    let zones = parse_zones(&args.zones)?;
    let reference = reference_or_now(args.date.as_deref())?;

    let mut options = config.search.clone();
    if args.start.is_some() || args.end.is_some() {
        let start = args.start.unwrap_or(options.window.start());
        let end = args.end.unwrap_or(options.window.end());
        options.window = WorkingHoursWindow::new(start, end)?;
    }
    if let Some(g) = args.granularity {
        options.granularity_minutes = g;
    }
    if let Some(n) = args.limit {
        options.max_results = n;
    }

    let slots = find_best_slots_with_options(&TzdbOracle, zones.as_slice(), reference, &options)
        .context("searching for meeting times")?;
    let use_24_hour = resolve_24_hour(&args.format, config, &store);
    record_usage(store, &zones);

    if args.json {
        let output = BestOutput {
            reference,
            window: options.window,
            headline: headline(&slots),
            slots: &slots,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if zones.len() < 2 {
        println!("Add at least two zones to find a meeting time.");
        return Ok(());
    }
    if slots.is_empty() {
        println!("No suitable meeting times found.");
        return Ok(());
    }

    println!(
        "Best meeting times on {} (working hours {})",
        reference.format("%Y-%m-%d"),
        options.window
    );
    print_slots(&slots, &zones, &options.window, use_24_hour)
}

fn print_slots(
    slots: &[RankedSlot],
    zones: &ZoneList,
    window: &WorkingHoursWindow,
    use_24_hour: bool,
) -> Result<()> {
    let style = ClockStyle {
        use_24_hour,
        show_seconds: false,
    };
    let total = zones.len();
    let top = headline(slots);
    let width = zones.iter().map(|z| z.label.chars().count()).max().unwrap_or(0);
    let lead = &zones.as_slice()[0];

    for (i, slot) in slots.iter().enumerate() {
        let badge = match (i, top) {
            (0, Some(SlotLabel::BestMatch)) => "  [Best Match]",
            (0, Some(SlotLabel::ClosestMatch)) => "  [Closest Match]",
            _ => "",
        };
        let coverage = if slot.is_qualified {
            format!("{}/{} zones in working hours", slot.match_count, total)
        } else {
            format!("{}/{} zones close to working hours", slot.match_count, total)
        };
        println!();
        println!(
            "{}. {} ({}){}  {}",
            i + 1,
            display::format_clock(slot.instant, &lead.zone_id, style)?,
            lead.label,
            badge,
            coverage
        );
        for zh in &slot.zones {
            println!(
                "   {:<width$}  {}  {}",
                zh.label,
                display::format_clock(slot.instant, &zh.zone_id, style)?,
                display::describe_hour(zh.hour, window),
            );
        }
    }
    Ok(())
}

// ── clock ───────────────────────────────────────────────────────────────────

fn cmd_clock(args: ClockArgs, config: &Config, store: JsonFileStore) -> Result<()> {
    let zones = parse_zones(&args.zones)?;
    let instant = reference_or_now(args.at.as_deref())?;
    let style = ClockStyle {
        use_24_hour: resolve_24_hour(&args.format, config, &store),
        show_seconds: args.seconds,
    };

    let cards = zones
        .iter()
        .map(|zone| display::zone_clock(instant, zone, style))
        .collect::<Result<Vec<_>, _>>()?;
    record_usage(store, &zones);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&cards)?);
        return Ok(());
    }

    let width = cards.iter().map(|c| c.label.chars().count()).max().unwrap_or(0);
    for card in &cards {
        println!(
            "{:<width$}  {}  {}  {} ({})",
            card.label, card.time, card.date, card.abbreviation, card.utc_offset
        );
    }
    Ok(())
}

// ── zones ───────────────────────────────────────────────────────────────────

fn cmd_zones(args: ZonesArgs, store: JsonFileStore) -> Result<()> {
    let mut entries = if args.utc {
        catalog::utc_offsets()
    } else if args.all {
        catalog::all_zones()
    } else if args.regions {
        catalog::region_zones()
    } else {
        let mut popular = catalog::popular();
        catalog::sort_by_usage(&mut popular, &UsageTracker::new(store).counts());
        popular
    };
    if let Some(term) = &args.term {
        entries = catalog::filter(&entries, term);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }
    if entries.is_empty() {
        match &args.term {
            Some(term) => println!("No time zones found matching \"{term}\""),
            None => println!("No time zones found"),
        }
        return Ok(());
    }
    print_entries(&entries);
    Ok(())
}

fn print_entries(entries: &[CatalogEntry]) {
    let width = entries.iter().map(|e| e.label.chars().count()).max().unwrap_or(0);
    for entry in entries {
        println!("{:<width$}  {}", entry.label, entry.zone_id);
    }
}

// ── prefs ───────────────────────────────────────────────────────────────────

fn cmd_prefs(args: FormatArgs, store: JsonFileStore) -> Result<()> {
    let mut prefs = Preferences::new(store);
    if let Some(value) = args.requested() {
        prefs
            .set_use_24_hour(value)
            .context("saving time format preference")?;
    }
    let format = if prefs.use_24_hour() { "24-hour" } else { "12-hour" };
    println!("Clock format: {format}");
    Ok(())
}

// ── helpers ─────────────────────────────────────────────────────────────────

/// Parse `ID[=LABEL]` arguments into a duplicate-free zone list.
fn parse_zones(args: &[String]) -> Result<ZoneList> {
    let mut list = ZoneList::new();
    for arg in args {
        let (id, label) = match arg.split_once('=') {
            Some((id, label)) => (id.trim(), Some(label.trim())),
            None => (arg.trim(), None),
        };
        if id.is_empty() {
            bail!("empty zone in '{arg}'");
        }

        let (zone_id, default_label) = if id.to_ascii_lowercase().starts_with("utc") && id.len() > 3 {
            let entry = catalog::parse_utc_offset(id)?;
            (entry.zone_id, entry.label)
        } else {
            slot_engine::oracle::parse_timezone(id)?;
            (id.to_string(), catalog::label_for(id))
        };
        let label = label
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .unwrap_or(default_label);

        if list.add(zone_id.clone(), label).is_none() {
            tracing::warn!(zone_id = %zone_id, "ignoring duplicate zone");
        }
    }
    Ok(list)
}

fn reference_or_now(arg: Option<&str>) -> Result<DateTime<Utc>> {
    match arg {
        Some(s) => Ok(parse_reference(s)?),
        None => Ok(Utc::now()),
    }
}

/// Flag, then config file, then the stored preference.
fn resolve_24_hour(flags: &FormatArgs, config: &Config, store: &JsonFileStore) -> bool {
    flags
        .requested()
        .or(config.use_24_hour)
        .unwrap_or_else(|| Preferences::new(store.clone()).use_24_hour())
}

fn record_usage(store: JsonFileStore, zones: &ZoneList) {
    let mut usage = UsageTracker::new(store);
    for zone in zones {
        if let Err(e) = usage.record(&zone.zone_id) {
            tracing::warn!(zone_id = %zone.zone_id, error = %e, "could not record zone usage");
        }
    }
}
