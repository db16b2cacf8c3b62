//! emnc-report: headless host for the eMNC indicators engine.
//!
//! Usage:
//!   emnc-report --year 2024 --top 5
//!   emnc-report --data-dir ./data --json
//!   emnc-report --db records.db --ipc-mode
//!   emnc-report --export-db records.db

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use emnc_core::{
    config::EngineConfig,
    dataset,
    facade::{CorrelationSnapshot, QueryFacade},
    loader::{self, sqlite::RecordTable},
    narrative::NarrativeCatalog,
    record::YearRecord,
    summary::YearSummary,
    types::{MetricValue, Year},
};
use std::env;
use std::io::{self, BufRead, Write};
use std::path::Path;

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    YearSummary {
        year: Year,
    },
    Correlations {
        #[serde(default)]
        columns: Option<Vec<String>>,
        #[serde(default)]
        top_n: Option<usize>,
    },
    Series {
        metric: String,
    },
    Distribution {
        year: Year,
    },
    Narrative {
        year: Year,
    },
    Quit,
}

#[derive(serde::Serialize)]
struct Report<'a> {
    generated_at: DateTime<Utc>,
    years:        Vec<Year>,
    summary:      YearSummary,
    correlations: CorrelationSnapshot,
    narrative:    &'a NarrativeCatalog,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let json_mode = args.iter().any(|a| a == "--json");
    let data_dir = flag_value(&args, "--data-dir").unwrap_or("./data");
    let db = flag_value(&args, "--db");
    let export_db = flag_value(&args, "--export-db");

    let config = load_config(data_dir)?;
    let top_n = parse_arg(&args, "--top", config.top_n);
    let records = load_records(&config, data_dir, db)?;

    if let Some(path) = export_db {
        export_records(path, &records)?;
        println!("exported {} records to {path}", records.len());
        return Ok(());
    }

    let facade = QueryFacade::new(loader::into_store(records)?);
    let narrative = load_narrative(&config, data_dir)?;
    let latest = *facade.store().years().last().context("record store is empty")?;
    let year = parse_arg(&args, "--year", latest);

    if ipc_mode {
        run_ipc_loop(&facade, &narrative, &config)?;
    } else if json_mode {
        let report = Report {
            generated_at: Utc::now(),
            years:        facade.store().years(),
            summary:      facade.year_summary(year)?,
            correlations: facade.correlation_snapshot_for(&config.correlation_columns, top_n)?,
            narrative:    &narrative,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&facade, &narrative, &config, year, top_n)?;
    }

    Ok(())
}

fn load_config(data_dir: &str) -> Result<EngineConfig> {
    if Path::new(data_dir).join("engine.json").exists() {
        Ok(EngineConfig::load(data_dir)?)
    } else {
        log::warn!("no engine.json under {data_dir}; using built-in settings");
        Ok(EngineConfig::default())
    }
}

fn load_records(config: &EngineConfig, data_dir: &str, db: Option<&str>) -> Result<Vec<YearRecord>> {
    if let Some(db) = db {
        let table = RecordTable::open(db)?;
        return Ok(table.load_records()?);
    }
    let path = config.records_path(data_dir);
    if path.exists() {
        Ok(loader::json::load_records(&path)?)
    } else {
        log::warn!("{} not found; using built-in dataset", path.display());
        Ok(dataset::builtin_records()?)
    }
}

fn load_narrative(config: &EngineConfig, data_dir: &str) -> Result<NarrativeCatalog> {
    let path = config.narrative_path(data_dir);
    if path.exists() {
        Ok(NarrativeCatalog::load(&path)?)
    } else {
        Ok(NarrativeCatalog::builtin()?)
    }
}

fn export_records(path: &str, records: &[YearRecord]) -> Result<()> {
    // Validate before writing anything.
    loader::into_store(records.to_vec())?;
    let mut table = RecordTable::open(path)?;
    table.migrate()?;
    table.insert_records(records)?;
    Ok(())
}

fn run_ipc_loop(facade: &QueryFacade, narrative: &NarrativeCatalog, config: &EngineConfig) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("unparseable command: {e}");
                write_error(&mut stdout, &e.to_string())?;
                continue;
            }
        };

        let response = match cmd {
            IpcCommand::Quit => break,
            IpcCommand::YearSummary { year } => facade
                .year_summary(year)
                .map(|s| serde_json::to_value(s)),
            IpcCommand::Correlations { columns, top_n } => {
                let top_n = top_n.unwrap_or(config.top_n);
                let snapshot = match columns {
                    Some(names) => facade.correlation_snapshot(&names, top_n),
                    None => facade.correlation_snapshot_for(&config.correlation_columns, top_n),
                };
                snapshot.map(|s| serde_json::to_value(s))
            }
            IpcCommand::Series { metric } => facade.series(&metric).map(|s| serde_json::to_value(s)),
            IpcCommand::Distribution { year } => {
                facade.distribution(year).map(|d| serde_json::to_value(d))
            }
            IpcCommand::Narrative { year } => {
                narrative.summary_for(year).map(|n| serde_json::to_value(n))
            }
        };

        match response {
            Ok(value) => writeln!(stdout, "{}", value?)?,
            Err(e) => write_error(&mut stdout, &e.to_string())?,
        }
        stdout.flush()?;
    }
    Ok(())
}

fn write_error(out: &mut impl Write, message: &str) -> Result<()> {
    let err_json = serde_json::json!({ "error": message });
    writeln!(out, "{err_json}")?;
    out.flush()?;
    Ok(())
}

fn print_summary(
    facade: &QueryFacade,
    narrative: &NarrativeCatalog,
    config: &EngineConfig,
    year: Year,
    top_n: usize,
) -> Result<()> {
    let summary = facade.year_summary(year)?;

    println!("=== KEY METRICS {year} ===");
    for card in &summary.key_metrics {
        println!("  {:<20} {}", format!("{}:", card.label), card.display);
    }
    if let Ok(story) = narrative.summary_for(year) {
        println!();
        println!("  Theme:     {}", story.theme);
        for finding in &story.key_findings {
            println!("    - {finding}");
        }
        println!("  Take-away: {}", story.takeaway);
    }

    let distribution = facade.distribution(year)?;
    println!();
    println!("=== eMNC DISTRIBUTION {year} ===");
    for slice in &distribution.countries {
        println!("  {:<8} {:>5.0}", slice.label, slice.value);
    }

    let snapshot = facade.correlation_snapshot_for(&config.correlation_columns, top_n)?;
    println!();
    println!("=== STRONGEST CORRELATIONS (top {top_n}) ===");
    for pair in &snapshot.ranked {
        println!(
            "  {:<26} {:<26} r = {:+.3} ({:?})",
            pair.metric_a.name(),
            pair.metric_b.name(),
            pair.correlation,
            pair.strength()
        );
    }
    let undefined = snapshot.matrix.undefined_columns();
    if !undefined.is_empty() {
        println!("  undefined columns: {undefined:?}");
    }

    println!();
    println!("=== 2025-2026 PROJECTIONS ===");
    for projection in &narrative.projections {
        let points: Vec<String> = projection
            .points
            .iter()
            .map(|p| format!("{}: {}", p.year, p.value))
            .collect();
        println!("  {}: {} ({})", projection.label, projection.headline, points.join(" → "));
    }

    println!();
    println!("=== TRENDS ===");
    for point in facade.series("FDI_ratio")? {
        let value = match point.value {
            MetricValue::Value(v) => format!("{v:.3}"),
            MetricValue::Undefined => "n/a".into(),
        };
        println!("  {} FDI_ratio {value}", point.year);
    }
    Ok(())
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2).find(|w| w[0] == flag).map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
