//! DFC Table - Demo Entry Point
//!
//! Prints one page of a JSON record file as a text table.
//!
//! ```text
//! dfc-table [records.json] [column=value ...]
//! ```
//!
//! `value` may be a `min..max` range (either end optional) or `true`/`false`.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use dfc_table::constants::LOG_FILE_PREFIX;
use dfc_table::helpers::{get_or_create_data_dir, is_development};
use dfc_table::{
    CellValue, ColumnDef, ColumnFilter, Columns, DataTable, FilterValue, TableSettings,
    render_text,
};
use serde_json::Value;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::LocalTime;

const SAMPLE_RECORDS: &str = r#"[
    {"device": "WTG-001", "site": "North", "power_mw": 2.5, "online": true},
    {"device": "WTG-002", "site": "North", "power_mw": 1.8, "online": true},
    {"device": "WTG-003", "site": "South", "power_mw": 0.0, "online": false},
    {"device": "WTG-004", "site": "South", "power_mw": 3.1, "online": true},
    {"device": "WTG-005", "site": "East", "power_mw": 2.2, "online": true}
]"#;

fn init_logging() -> Result<WorkerGuard> {
    let log_dir = get_or_create_data_dir().context("Failed to create data directory")?;
    let appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let level = if is_development() {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_timer(LocalTime::rfc_3339())
        .with_ansi(false)
        .with_writer(writer)
        .init();

    Ok(guard)
}

struct Args {
    records: Option<PathBuf>,
    filters: Vec<ColumnFilter>,
}

fn parse_args(args: impl Iterator<Item = String>) -> Result<Args> {
    let mut records = None;
    let mut filters = Vec::new();

    for arg in args {
        if let Some((id, value)) = arg.split_once('=') {
            filters.push(ColumnFilter::new(id, parse_filter_value(value)));
        } else if records.is_none() {
            records = Some(PathBuf::from(arg));
        } else {
            bail!("Unexpected argument: {arg}");
        }
    }

    Ok(Args { records, filters })
}

fn parse_filter_value(value: &str) -> FilterValue {
    if let Some((min, max)) = value.split_once("..") {
        let parse = |s: &str| s.trim().parse::<f64>().ok();
        return FilterValue::Range {
            min: parse(min),
            max: parse(max),
        };
    }
    match value {
        "true" => FilterValue::Bool(true),
        "false" => FilterValue::Bool(false),
        _ => FilterValue::Text(value.to_string()),
    }
}

fn cell_value(value: Option<&Value>) -> CellValue {
    match value {
        None | Some(Value::Null) => CellValue::Empty,
        Some(Value::Bool(b)) => CellValue::Bool(*b),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(i) => CellValue::Integer(i),
            None => n.as_f64().map_or(CellValue::Empty, CellValue::Float),
        },
        Some(Value::String(s)) => CellValue::Text(s.clone()),
        Some(other) => CellValue::Text(other.to_string()),
    }
}

fn load_records(path: Option<&PathBuf>) -> Result<Vec<Value>> {
    let content = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => SAMPLE_RECORDS.to_string(),
    };
    let records: Vec<Value> = serde_json::from_str(&content).context("Records must be a JSON array")?;
    Ok(records)
}

/// One text column per key of the first record
fn json_columns(records: &[Value]) -> Result<Columns<Value>> {
    let keys: Vec<String> = records
        .first()
        .and_then(Value::as_object)
        .map(|object| object.keys().cloned().collect())
        .unwrap_or_default();

    let defs = keys
        .into_iter()
        .map(|key| {
            let accessor_key = key.clone();
            ColumnDef::text(key.clone(), key, move |record: &Value| {
                cell_value(record.get(&accessor_key))
            })
        })
        .collect();
    Ok(Columns::new(defs)?)
}

fn main() -> Result<()> {
    let _guard = init_logging()?;
    info!("Starting DFC Table demo...");

    let args = parse_args(std::env::args().skip(1))?;
    let settings = TableSettings::load();
    let locale = settings.locale().to_string();

    let records = load_records(args.records.as_ref())?;
    let columns = json_columns(&records)?;
    for filter in &args.filters {
        if !columns.contains(&filter.id) {
            warn!(column = %filter.id, "Filter names an unknown column");
        }
    }

    let options = settings.into_options().title("Records");
    let mut table = DataTable::new(columns, options)?.with_rows(records);
    for filter in args.filters {
        table.set_filter(filter.id, filter.value);
    }

    info!(
        rows = table.rows().len(),
        filtered = table.filtered_row_count(),
        "Rendering table"
    );
    print!("{}", render_text(&table.render(), &locale));
    Ok(())
}
