//! Command-line surface and the work behind each command.
//!
//! Each command fetches through [`ApiClient`], then shapes the result with the
//! [`view`](crate::view) and [`export`](crate::export) modules. Printing is left to the
//! binary.

use anyhow::Context;
use api_shared::{PatientDto, PatientVisitDto};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::client::{ApiClient, VisitsOutcome};
use crate::export::{export_to_path, DateRange, DEFAULT_EXPORT_FILE};
use crate::state::LoadState;
use crate::view::{newest_first, PatientTable, SortColumn};

#[derive(Debug, Parser)]
#[command(name = "pas")]
#[command(about = "Patient administration client")]
pub struct Cli {
    /// API base URL, including the /api prefix
    #[arg(long, env = "PAS_API_URL", default_value = "http://localhost:3000/api")]
    pub base_url: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List patients, one page at a time
    List(ListArgs),
    /// Show one patient
    Show {
        /// Patient UUID
        id: Uuid,
    },
    /// Show a patient's visit history, newest first
    Visits {
        /// Patient UUID
        id: Uuid,
    },
    /// Export patients created within a date range to a spreadsheet
    Export {
        /// First created day to include (YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Last created day to include (YYYY-MM-DD)
        #[arg(long)]
        end: Option<NaiveDate>,
        /// Output file
        #[arg(long, default_value = DEFAULT_EXPORT_FILE)]
        out: PathBuf,
    },
}

#[derive(Debug, Default, clap::Args)]
pub struct ListArgs {
    /// Case-insensitive filter on "first last"
    #[arg(long)]
    pub search: Option<String>,
    /// Column to sort by
    #[arg(long, value_enum)]
    pub sort: Option<SortColumn>,
    /// Sort descending (needs --sort)
    #[arg(long, requires = "sort")]
    pub desc: bool,
    /// 1-based page number
    #[arg(long, default_value_t = 1)]
    pub page: usize,
}

/// One rendered page of the patient list.
#[derive(Debug)]
pub struct ListPage {
    pub rows: Vec<PatientDto>,
    pub page: usize,
    pub total_pages: usize,
    pub total_records: usize,
}

pub async fn fetch_patients(client: &ApiClient) -> anyhow::Result<Vec<PatientDto>> {
    let mut patients = LoadState::Idle;
    patients.load(client.fetch_patients()).await;
    patients
        .into_result()
        .map_err(|message| anyhow::anyhow!("Failed to load patients: {}", message))
}

/// Fetches the list and applies search, sort and paging.
///
/// `--desc` selects the sort column a second time, the same as clicking a header twice.
pub async fn list(client: &ApiClient, args: &ListArgs) -> anyhow::Result<ListPage> {
    let mut table = PatientTable::new(fetch_patients(client).await?);
    if let Some(term) = &args.search {
        table.set_search(term);
    }
    if let Some(column) = args.sort {
        table.sort_by(column);
        if args.desc {
            table.sort_by(column);
        }
    }

    Ok(ListPage {
        rows: table.page(args.page).into_iter().cloned().collect(),
        page: args.page,
        total_pages: table.total_pages(),
        total_records: table.total_records(),
    })
}

/// A patient's visits, newest first. `None` when the patient has none.
pub async fn visits(
    client: &ApiClient,
    id: Uuid,
) -> anyhow::Result<Option<Vec<PatientVisitDto>>> {
    let mut state = LoadState::Idle;
    state.load(client.fetch_patient_visits(id)).await;

    match state.into_result() {
        Ok(VisitsOutcome::Found(mut visits)) => {
            newest_first(&mut visits);
            Ok(Some(visits))
        }
        Ok(VisitsOutcome::NoVisits) => Ok(None),
        Err(message) => anyhow::bail!("Failed to load visits: {}", message),
    }
}

/// Validates the range, then fetches and writes the workbook. Returns the row count.
pub async fn export(
    client: &ApiClient,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    out: &Path,
) -> anyhow::Result<usize> {
    let range = DateRange::new(start, end)?;
    let patients = fetch_patients(client).await?;
    export_to_path(&patients, &range, out)
        .with_context(|| format!("exporting to {}", out.display()))
}
