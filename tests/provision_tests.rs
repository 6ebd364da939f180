use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use grafprov::api::{AdminCredentials, GrafanaApi, GrafanaError, HealthInfo};
use grafprov::config::Settings;
use grafprov::models::{OrgId, Organization, Role, Stage, UserRecord, UserStatus};
use grafprov::services::{provision, resolve_organization};
use grafprov::{exit_code, health_exit_code, run, run_exit_code, ProvisionError};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    FindOrg(String),
    CreateOrg(String),
    UserExists(String),
    CreateUser(String),
    AssignRole(String, Role, u64),
}

/// In-memory Grafana that records every call it receives.
#[derive(Default)]
struct FakeGrafana {
    existing_org: Option<i64>,
    new_org_id: i64,
    org_lookup_status: Option<u16>,
    create_org_status: Option<u16>,
    existing_users: HashSet<String>,
    lookup_failures: HashSet<String>,
    create_failures: HashMap<String, u16>,
    assign_failures: HashSet<String>,
    calls: Mutex<Vec<Call>>,
}

impl FakeGrafana {
    fn new() -> Self {
        Self {
            new_org_id: 42,
            ..Default::default()
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl GrafanaApi for FakeGrafana {
    async fn find_organization(&self, name: &str) -> Result<Option<Organization>, GrafanaError> {
        self.record(Call::FindOrg(name.to_string()));
        if let Some(status) = self.org_lookup_status {
            return Err(GrafanaError::UnexpectedStatus {
                operation: "organization lookup",
                status,
            });
        }
        Ok(self.existing_org.map(|id| Organization {
            id: OrgId::new(id).unwrap(),
            name: name.to_string(),
        }))
    }

    async fn create_organization(&self, name: &str) -> Result<OrgId, GrafanaError> {
        self.record(Call::CreateOrg(name.to_string()));
        if let Some(status) = self.create_org_status {
            return Err(GrafanaError::CreateOrg { status });
        }
        Ok(OrgId::new(self.new_org_id).unwrap())
    }

    async fn user_exists(&self, login: &str) -> Result<bool, GrafanaError> {
        self.record(Call::UserExists(login.to_string()));
        if self.lookup_failures.contains(login) {
            return Err(GrafanaError::Network("connection refused".into()));
        }
        Ok(self.existing_users.contains(login))
    }

    async fn create_user(&self, user: &UserRecord) -> Result<(), GrafanaError> {
        self.record(Call::CreateUser(user.login.clone()));
        match self.create_failures.get(&user.login) {
            Some(status) => Err(GrafanaError::CreateUser {
                login: user.login.clone(),
                status: *status,
            }),
            None => Ok(()),
        }
    }

    async fn assign_role(&self, email: &str, role: Role, org_id: OrgId) -> Result<(), GrafanaError> {
        let known = role.is_known();
        self.record(Call::AssignRole(email.to_string(), role, org_id.get()));
        if !known {
            return Err(GrafanaError::AssignRole {
                login: email.to_string(),
                status: 400,
            });
        }
        if self.assign_failures.contains(email) {
            return Err(GrafanaError::AssignRole {
                login: email.to_string(),
                status: 500,
            });
        }
        Ok(())
    }
}

fn user(login: &str, role: Role) -> UserRecord {
    UserRecord {
        login: login.to_string(),
        role,
        email: format!("{}@x.com", login),
        password: "p".to_string(),
    }
}

fn alice() -> UserRecord {
    UserRecord {
        login: "alice".into(),
        role: Role::Admin,
        email: "a@x.com".into(),
        password: "p".into(),
    }
}

#[tokio::test]
async fn test_new_org_and_new_user() {
    let api = FakeGrafana::new();
    let report = provision(&api, "Para", &[alice()]).await.unwrap();

    assert_eq!(
        api.calls(),
        vec![
            Call::FindOrg("Para".into()),
            Call::CreateOrg("Para".into()),
            Call::UserExists("alice".into()),
            Call::CreateUser("alice".into()),
            Call::AssignRole("a@x.com".into(), Role::Admin, 42),
        ]
    );
    assert!(report.org_created);
    assert_eq!(report.organization.id.get(), 42);
    assert_eq!(report.outcomes[0].status, UserStatus::Created { role: Role::Admin });
    assert_eq!(exit_code(&report), 0);
}

#[tokio::test]
async fn test_existing_user_is_skipped() {
    let mut api = FakeGrafana::new();
    api.existing_users.insert("alice".into());
    let report = provision(&api, "Para", &[alice()]).await.unwrap();

    let calls = api.calls();
    assert!(!calls.iter().any(|c| matches!(c, Call::CreateUser(_) | Call::AssignRole(..))));
    assert_eq!(report.outcomes[0].status, UserStatus::Skipped);
    assert_eq!(exit_code(&report), 0);
}

#[tokio::test]
async fn test_existing_org_is_never_created() {
    let mut api = FakeGrafana::new();
    api.existing_org = Some(9);
    let report = provision(&api, "Para", &[user("bob", Role::Editor)]).await.unwrap();

    let calls = api.calls();
    assert!(!calls.iter().any(|c| matches!(c, Call::CreateOrg(_))));
    assert!(!report.org_created);
    assert!(calls.contains(&Call::AssignRole("bob@x.com".into(), Role::Editor, 9)));
}

#[tokio::test]
async fn test_org_is_created_once_before_any_user() {
    let api = FakeGrafana::new();
    let users = vec![user("a", Role::Viewer), user("b", Role::Viewer), user("c", Role::Editor)];
    provision(&api, "Para", &users).await.unwrap();

    let calls = api.calls();
    let creates: Vec<usize> = calls
        .iter()
        .enumerate()
        .filter(|(_, c)| matches!(c, Call::CreateOrg(_)))
        .map(|(i, _)| i)
        .collect();
    assert_eq!(creates, vec![1]);
    let first_user_call = calls
        .iter()
        .position(|c| matches!(c, Call::UserExists(_)))
        .unwrap();
    assert!(first_user_call > creates[0]);
}

#[tokio::test]
async fn test_create_failure_skips_assignment_and_continues() {
    let mut api = FakeGrafana::new();
    api.create_failures.insert("a".into(), 412);
    let users = vec![user("a", Role::Admin), user("b", Role::Viewer)];
    let report = provision(&api, "Para", &users).await.unwrap();

    let calls = api.calls();
    assert!(!calls.iter().any(|c| matches!(c, Call::AssignRole(email, _, _) if email == "a@x.com")));
    assert!(calls.contains(&Call::AssignRole("b@x.com".into(), Role::Viewer, 42)));

    assert_eq!(
        report.outcomes[0].status,
        UserStatus::Failed {
            stage: Stage::CreateUser,
            error: GrafanaError::CreateUser { login: "a".into(), status: 412 },
        }
    );
    assert_eq!(report.outcomes[1].status, UserStatus::Created { role: Role::Viewer });
    assert_eq!(exit_code(&report), 1);
}

#[tokio::test]
async fn test_lookup_failure_is_isolated() {
    let mut api = FakeGrafana::new();
    api.lookup_failures.insert("a".into());
    let users = vec![user("a", Role::Admin), user("b", Role::Viewer)];
    let report = provision(&api, "Para", &users).await.unwrap();

    let calls = api.calls();
    assert!(!calls.contains(&Call::CreateUser("a".into())));
    assert!(calls.contains(&Call::CreateUser("b".into())));
    assert!(matches!(
        report.outcomes[0].status,
        UserStatus::Failed { stage: Stage::Lookup, .. }
    ));
    assert_eq!(report.failed(), 1);
}

#[tokio::test]
async fn test_assign_failure_is_reported() {
    let mut api = FakeGrafana::new();
    api.assign_failures.insert("a@x.com".into());
    let report = provision(&api, "Para", &[user("a", Role::Admin)]).await.unwrap();

    assert!(matches!(
        report.outcomes[0].status,
        UserStatus::Failed { stage: Stage::AssignRole, .. }
    ));
    assert_eq!(exit_code(&report), 1);
}

#[tokio::test]
async fn test_created_users_match_absent_users() {
    let mut api = FakeGrafana::new();
    api.existing_users.insert("b".into());
    api.existing_users.insert("d".into());
    let users: Vec<UserRecord> = ["a", "b", "c", "d"].iter().map(|l| user(l, Role::Viewer)).collect();
    let report = provision(&api, "Para", &users).await.unwrap();

    let created: Vec<String> = api
        .calls()
        .into_iter()
        .filter_map(|c| match c {
            Call::CreateUser(l) => Some(l),
            _ => None,
        })
        .collect();
    assert_eq!(created, vec!["a".to_string(), "c".to_string()]);
    assert_eq!(report.created(), 2);
    assert_eq!(report.skipped(), 2);
    let order: Vec<&str> = report.outcomes.iter().map(|o| o.login.as_str()).collect();
    assert_eq!(order, vec!["a", "b", "c", "d"]);
}

#[tokio::test]
async fn test_org_lookup_failure_aborts_before_users() {
    let mut api = FakeGrafana::new();
    api.org_lookup_status = Some(500);
    let err = provision(&api, "Para", &[alice()]).await.unwrap_err();

    assert_eq!(
        err,
        GrafanaError::UnexpectedStatus {
            operation: "organization lookup",
            status: 500
        }
    );
    assert_eq!(api.calls(), vec![Call::FindOrg("Para".into())]);
}

#[tokio::test]
async fn test_org_create_failure_aborts_before_users() {
    let mut api = FakeGrafana::new();
    api.create_org_status = Some(409);
    let err = resolve_organization(&api, "Para").await.unwrap_err();

    assert_eq!(err, GrafanaError::CreateOrg { status: 409 });
    assert!(!api.calls().iter().any(|c| matches!(c, Call::UserExists(_))));
}

fn settings_for(path: PathBuf) -> Settings {
    Settings {
        grafana_url: "http://unused:3000".into(),
        credentials: AdminCredentials {
            user: "admin".into(),
            password: secrecy::Secret::new("pw".into()),
        },
        org_name: "Para".into(),
        users_file: path,
        timeout: Duration::from_secs(1),
    }
}

#[tokio::test]
async fn test_malformed_file_issues_no_calls() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    f.write_all(br#"[{"login":"alice","role":"Admin"}]"#).unwrap();

    let api = FakeGrafana::new();
    let err = run(&settings_for(f.path().to_path_buf()), &api).await.unwrap_err();

    assert!(matches!(err, ProvisionError::Config(_)));
    assert_eq!(err.exit_code(), 2);
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_missing_file_issues_no_calls() {
    let api = FakeGrafana::new();
    let err = run(&settings_for(PathBuf::from("/nonexistent/users.json")), &api)
        .await
        .unwrap_err();

    assert!(matches!(err, ProvisionError::Config(_)));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_run_wraps_org_failure() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    f.write_all(br#"[{"login":"alice","role":"Admin","email":"a@x.com","password":"p"}]"#)
        .unwrap();

    let mut api = FakeGrafana::new();
    api.org_lookup_status = Some(403);
    let err = run(&settings_for(f.path().to_path_buf()), &api).await.unwrap_err();

    assert!(matches!(err, ProvisionError::OrgResolution { ref org, .. } if org == "Para"));
    assert_eq!(err.exit_code(), 2);
}

#[tokio::test]
async fn test_unknown_role_fails_only_that_user() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    f.write_all(
        br#"[{"login":"alice","role":"Admin","email":"a@x.com","password":"p"},
             {"login":"bob","role":"admin","email":"b@x.com","password":"q"}]"#,
    )
    .unwrap();

    let api = FakeGrafana::new();
    let report = run(&settings_for(f.path().to_path_buf()), &api).await.unwrap();

    assert_eq!(report.outcomes[0].status, UserStatus::Created { role: Role::Admin });
    assert_eq!(
        report.outcomes[1].status,
        UserStatus::Failed {
            stage: Stage::AssignRole,
            error: GrafanaError::AssignRole { login: "b@x.com".into(), status: 400 },
        }
    );
    assert!(api
        .calls()
        .contains(&Call::AssignRole("b@x.com".into(), Role::Other("admin".into()), 42)));
    assert_eq!(exit_code(&report), 1);
}

#[tokio::test]
async fn test_run_exit_status_covers_every_outcome() {
    let api = FakeGrafana::new();
    let missing = run(&settings_for(PathBuf::from("/nonexistent/users.json")), &api).await;
    assert_eq!(run_exit_code(&missing), 2);

    let mut f = tempfile::NamedTempFile::new().unwrap();
    f.write_all(br#"[{"login":"alice","role":"Admin","email":"a@x.com","password":"p"}]"#)
        .unwrap();
    let settings = settings_for(f.path().to_path_buf());

    let ok = run(&settings, &FakeGrafana::new()).await;
    assert_eq!(run_exit_code(&ok), 0);

    let mut failing = FakeGrafana::new();
    failing.create_failures.insert("alice".into(), 412);
    let partial = run(&settings, &failing).await;
    assert_eq!(run_exit_code(&partial), 1);

    let mut no_org = FakeGrafana::new();
    no_org.create_org_status = Some(500);
    let aborted = run(&settings, &no_org).await;
    assert_eq!(run_exit_code(&aborted), 2);
}

#[test]
fn test_health_exit_status() {
    let healthy = HealthInfo {
        database: "ok".into(),
        version: "10.4.2".into(),
    };
    let unhealthy = HealthInfo {
        database: "failing".into(),
        version: String::new(),
    };

    assert_eq!(health_exit_code(&Ok(healthy)), 0);
    assert_eq!(health_exit_code(&Ok(unhealthy)), 1);
    assert_eq!(
        health_exit_code(&Err(GrafanaError::Network("connection refused".into()))),
        1
    );
    assert_eq!(
        health_exit_code(&Err(GrafanaError::UnexpectedStatus {
            operation: "health check",
            status: 503,
        })),
        1
    );
}
