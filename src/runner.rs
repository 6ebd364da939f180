use crate::api::{GrafanaApi, GrafanaError, HealthInfo};
use crate::config::Settings;
use crate::error::{ProvisionError, EXIT_OK, EXIT_PARTIAL_FAILURE, EXIT_UNHEALTHY};
use crate::models::ProvisionReport;
use crate::services::{load_users_from_file, provision};

/// Load the users file, then reconcile it against Grafana.
/// The file is fully parsed before the first request is sent.
pub async fn run<A: GrafanaApi + ?Sized>(
    settings: &Settings,
    api: &A,
) -> Result<ProvisionReport, ProvisionError> {
    let users = load_users_from_file(&settings.users_file)?;
    tracing::info!(
        count = users.len(),
        org = %settings.org_name,
        url = %settings.grafana_url,
        "Provisioning users"
    );

    let report = provision(api, &settings.org_name, &users)
        .await
        .map_err(|source| ProvisionError::OrgResolution {
            org: settings.org_name.clone(),
            source,
        })?;

    tracing::info!(
        created = report.created(),
        skipped = report.skipped(),
        failed = report.failed(),
        "Provisioning finished"
    );
    Ok(report)
}

/// Process exit code for a finished run.
pub fn exit_code(report: &ProvisionReport) -> i32 {
    if report.has_failures() {
        EXIT_PARTIAL_FAILURE
    } else {
        EXIT_OK
    }
}

/// Process exit code for a run that may have aborted.
pub fn run_exit_code(result: &Result<ProvisionReport, ProvisionError>) -> i32 {
    match result {
        Ok(report) => exit_code(report),
        Err(e) => e.exit_code(),
    }
}

/// Process exit code for `check-config`, once the settings are valid.
pub fn health_exit_code(result: &Result<HealthInfo, GrafanaError>) -> i32 {
    match result {
        Ok(info) if info.is_ok() => EXIT_OK,
        _ => EXIT_UNHEALTHY,
    }
}
