use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{error, info, instrument, warn};

use crate::api::DashboardClient;
use crate::classify::classify;
use crate::enrich::{enrich_access_points, enrich_switches};
use crate::error::{ReportError, Result};
use crate::io::excel_write;
use crate::layout::{build_report, report_file_name};
use crate::merge::{MergeSummary, merge_reports};
use crate::model::Organization;

pub const DEFAULT_REPORTS_DIR: &str = "Reports";
pub const DEFAULT_COMBINED_REPORT: &str = "Full-Report.xlsx";

/// Output locations for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub reports_dir: PathBuf,
    /// Combined workbook path; `None` skips the merge.
    pub combined_report: Option<PathBuf>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            reports_dir: PathBuf::from(DEFAULT_REPORTS_DIR),
            combined_report: Some(PathBuf::from(DEFAULT_COMBINED_REPORT)),
        }
    }
}

/// Step of the per-organization pipeline that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    FetchDevices,
    SwitchPorts,
    Wireless,
    WriteReport,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::FetchDevices => write!(f, "fetching devices"),
            Stage::SwitchPorts => write!(f, "switch port enrichment"),
            Stage::Wireless => write!(f, "wireless enrichment"),
            Stage::WriteReport => write!(f, "writing report"),
        }
    }
}

#[derive(Debug)]
pub enum OrganizationOutcome {
    Written(PathBuf),
    Failed { stage: Stage, error: ReportError },
}

impl OrganizationOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, OrganizationOutcome::Written(_))
    }
}

#[derive(Debug)]
pub struct OrganizationResult {
    pub organization: Organization,
    pub outcome: OrganizationOutcome,
}

/// What a run produced.
#[derive(Debug)]
pub struct RunSummary {
    pub organizations: Vec<OrganizationResult>,
    /// `None` when the merge was skipped.
    pub merge: Option<std::result::Result<MergeSummary, ReportError>>,
}

impl RunSummary {
    pub fn written(&self) -> usize {
        self.organizations
            .iter()
            .filter(|result| result.outcome.is_written())
            .count()
    }

    pub fn failed(&self) -> usize {
        self.organizations.len() - self.written()
    }
}

/// Fetches every organization, writes one report each, then merges them.
///
/// Only a failure to list organizations is returned as an error; failures of
/// individual organizations and of the merge are recorded in the summary.
#[instrument(level = "info", skip_all, fields(reports_dir = %options.reports_dir.display()))]
pub fn run(client: &DashboardClient, options: &RunOptions) -> Result<RunSummary> {
    let organizations = client.organizations()?;
    info!(org_count = organizations.len(), "listed organizations");

    let mut results = Vec::with_capacity(organizations.len());
    for organization in organizations {
        let outcome = process_organization(client, &organization, &options.reports_dir);
        match &outcome {
            OrganizationOutcome::Written(path) => {
                info!(org = %organization.name, path = %path.display(), "report written");
            }
            OrganizationOutcome::Failed { stage, error } => {
                error!(org = %organization.name, %stage, %error, "organization skipped");
            }
        }
        results.push(OrganizationResult {
            organization,
            outcome,
        });
    }

    let merge = options.combined_report.as_deref().map(|output| {
        let merged = merge_reports(&options.reports_dir, output);
        if let Err(error) = &merged {
            warn!(%error, "combined report failed");
        }
        merged
    });

    Ok(RunSummary {
        organizations: results,
        merge,
    })
}

/// Builds and writes the report for one organization. Nothing is written if
/// any stage fails.
#[instrument(level = "info", skip_all, fields(org_id = %organization.id, org = %organization.name))]
pub fn process_organization(
    client: &DashboardClient,
    organization: &Organization,
    reports_dir: &Path,
) -> OrganizationOutcome {
    match build_and_write(client, organization, reports_dir) {
        Ok(path) => OrganizationOutcome::Written(path),
        Err((stage, error)) => OrganizationOutcome::Failed { stage, error },
    }
}

fn build_and_write(
    client: &DashboardClient,
    organization: &Organization,
    reports_dir: &Path,
) -> std::result::Result<PathBuf, (Stage, ReportError)> {
    let at = |stage: Stage| move |error: ReportError| (stage, error);

    let devices = client
        .device_statuses(&organization.id)
        .map_err(at(Stage::FetchDevices))?;
    let inventory = classify(devices);
    info!(
        switches = inventory.switches.len(),
        access_points = inventory.access_points.len(),
        cameras = inventory.cameras.len(),
        "classified devices"
    );

    let switches = enrich_switches(client, inventory.switches).map_err(at(Stage::SwitchPorts))?;
    let access_points = enrich_access_points(client, &organization.id, inventory.access_points)
        .map_err(at(Stage::Wireless))?;

    let report = build_report(
        &organization.name,
        &switches,
        &inventory.cameras,
        &access_points,
    );
    let path = reports_dir.join(report_file_name(&organization.name));
    excel_write::write_report(&path, &report).map_err(at(Stage::WriteReport))?;

    Ok(path)
}
