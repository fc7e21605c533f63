/// `space-quota` command: resolve a space quota by name and display its limits.
///
/// Sequence (no step is retried or revisited):
///
/// 1. target check (logged in + organization targeted; space not required)
/// 2. current user lookup, for the progress line
/// 3. progress line: `Getting space quota <name> for org <org> as <user>...`
/// 4. space quota lookup in the targeted organization
/// 5. every warning from the lookup, success or not, to stderr
/// 6. on success, the limits as aligned `label: value` rows (or JSON)
use std::io::Write;

use tracing::{debug, warn};

use super::errors::CommandError;
use crate::actor::Actor;
use crate::cli::{OutputCtx, OutputFormat, Ui};
use crate::quota::format_quota;
use crate::session::{Config, SharedActor, TargetError};
use crate::types::SpaceQuotaOutput;

/// The `space-quota` command with its collaborators.
pub struct SpaceQuotaCommand<'a, C, S, A> {
    pub config: &'a C,
    pub shared_actor: &'a S,
    pub actor: &'a A,
}

impl<C: Config, S: SharedActor, A: Actor> SpaceQuotaCommand<'_, C, S, A> {
    /// Run the command for the quota `name`.
    ///
    /// # Errors
    ///
    /// - `CommandError::Target` if not logged in or no organization is targeted;
    ///   nothing is written in that case.
    /// - `CommandError::Identity` if the current user cannot be determined.
    /// - `CommandError::Resolve` if the lookup fails; warnings are written first.
    /// - `CommandError::Io` if writing the progress line or the result fails.
    ///   A failure writing warnings is logged and does not replace the outcome.
    pub fn execute<O: Write, E: Write>(
        &self,
        name: &str,
        ui: &mut Ui<O, E>,
        ctx: &OutputCtx,
    ) -> Result<(), CommandError> {
        self.shared_actor.check_target(true, false)?;
        debug!("target check passed");

        let user = self.actor.current_user()?;
        let org = self
            .config
            .targeted_organization()
            .ok_or_else(|| TargetError::NoOrganizationTargeted {
                binary_name: self.config.binary_name().to_owned(),
            })?;

        let progress = format!(
            "Getting space quota {name} for org {} as {}...",
            self.config.targeted_organization_name(),
            user.name
        );
        // JSON modes keep stdout parseable.
        if ctx.is_json() {
            ui.display_diagnostic(&progress)?;
        } else {
            ui.display_text(&progress)?;
        }

        let t_resolve = ctx.timer("get_space_quota_by_name");
        let (result, warnings) = self.actor.get_space_quota_by_name(name, &org.guid);
        drop(t_resolve);
        debug!(warnings = warnings.len(), ok = result.is_ok(), "space quota resolved");

        // A failed warnings write must not hide the lookup error.
        if let Err(err) = ui.display_warnings(&warnings) {
            warn!(error = %err, "failed to write warnings");
        }
        let quota = result?;

        let rows = format_quota(&quota);
        if ctx.is_json() {
            let output = SpaceQuotaOutput::new(&quota, &rows);
            ui.display_json(&output, ctx.format == OutputFormat::Compact)?;
        } else {
            ui.display_newline()?;
            ui.display_key_value_table(&rows)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::actor::{IdentityError, ResolveError, User, Warnings};
    use crate::quota::model::{AppLimits, RouteLimits, ServiceLimits};
    use crate::quota::{OptionalQuantity, SpaceQuota};
    use crate::session::{Organization, Space};

    struct FakeConfig {
        org: Option<Organization>,
    }

    impl Config for FakeConfig {
        fn targeted_organization(&self) -> Option<Organization> {
            self.org.clone()
        }

        fn targeted_space(&self) -> Option<Space> {
            None
        }

        fn access_token(&self) -> Option<&str> {
            Some("bearer token")
        }

        fn binary_name(&self) -> &str {
            "binaryName"
        }
    }

    #[derive(Default)]
    struct FakeSharedActor {
        error: Option<TargetError>,
        calls: RefCell<Vec<(bool, bool)>>,
    }

    impl SharedActor for FakeSharedActor {
        fn check_target(&self, require_org: bool, require_space: bool) -> Result<(), TargetError> {
            self.calls.borrow_mut().push((require_org, require_space));
            self.error.clone().map_or(Ok(()), Err)
        }
    }

    struct FakeActor {
        user: Result<User, IdentityError>,
        current_user_calls: Cell<usize>,
        quota: RefCell<Option<(Result<SpaceQuota, ResolveError>, Warnings)>>,
        quota_calls: RefCell<Vec<(String, String)>>,
    }

    impl FakeActor {
        fn new(result: Result<SpaceQuota, ResolveError>, warnings: &[&str]) -> Self {
            Self {
                user: Ok(User {
                    name: "some-user".to_owned(),
                }),
                current_user_calls: Cell::new(0),
                quota: RefCell::new(Some((
                    result,
                    warnings.iter().map(|w| (*w).to_owned()).collect(),
                ))),
                quota_calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl Actor for FakeActor {
        fn current_user(&self) -> Result<User, IdentityError> {
            self.current_user_calls.set(self.current_user_calls.get() + 1);
            self.user.clone()
        }

        fn get_space_quota_by_name(
            &self,
            name: &str,
            org_guid: &str,
        ) -> (Result<SpaceQuota, ResolveError>, Warnings) {
            self.quota_calls
                .borrow_mut()
                .push((name.to_owned(), org_guid.to_owned()));
            self.quota
                .borrow_mut()
                .take()
                .expect("get_space_quota_by_name called more than once")
        }
    }

    struct Run {
        result: Result<(), CommandError>,
        out: String,
        err: String,
    }

    fn config() -> FakeConfig {
        FakeConfig {
            org: Some(Organization {
                name: "some-org".to_owned(),
                guid: "some-org-guid".to_owned(),
            }),
        }
    }

    fn execute_command(
        config: &FakeConfig,
        shared_actor: &FakeSharedActor,
        actor: &FakeActor,
        format: OutputFormat,
    ) -> Run {
        let command = SpaceQuotaCommand {
            config,
            shared_actor,
            actor,
        };
        let mut ui = Ui::new(Vec::<u8>::new(), Vec::<u8>::new());
        let ctx = OutputCtx::new(format, false, false);
        let result = command.execute("some-space-quota", &mut ui, &ctx);
        let (out, err) = ui.into_parts();
        Run {
            result,
            out: String::from_utf8(out).unwrap(),
            err: String::from_utf8(err).unwrap(),
        }
    }

    /// Non-empty lines with runs of whitespace collapsed to one space.
    fn normalized(text: &str) -> Vec<String> {
        text.lines()
            .map(|l| l.split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|l| !l.is_empty())
            .collect()
    }

    fn scenario_quota() -> SpaceQuota {
        SpaceQuota {
            name: "some-space-quota".to_owned(),
            guid: "quota-guid".to_owned(),
            apps: AppLimits {
                total_memory: OptionalQuantity::Bounded(2048),
                instance_memory: OptionalQuantity::Bounded(1024),
                total_app_instances: OptionalQuantity::Bounded(2),
            },
            services: ServiceLimits {
                total_service_instances: OptionalQuantity::Unset,
                paid_service_plans: false,
            },
            routes: RouteLimits {
                total_routes: OptionalQuantity::Bounded(4),
                total_reserved_ports: OptionalQuantity::Unset,
            },
        }
    }

    const PROGRESS: &str = "Getting space quota some-space-quota for org some-org as some-user...";

    #[test]
    fn test_target_check_failure_stops_everything() {
        let shared_actor = FakeSharedActor {
            error: Some(TargetError::NotLoggedIn {
                binary_name: "binaryName".to_owned(),
            }),
            ..FakeSharedActor::default()
        };
        let actor = FakeActor::new(Ok(scenario_quota()), &["warning-1"]);

        let run = execute_command(&config(), &shared_actor, &actor, OutputFormat::Table);

        assert!(matches!(
            run.result,
            Err(CommandError::Target(TargetError::NotLoggedIn { ref binary_name }))
                if binary_name == "binaryName"
        ));
        assert_eq!(*shared_actor.calls.borrow(), [(true, false)]);
        assert_eq!(actor.current_user_calls.get(), 0);
        assert!(actor.quota_calls.borrow().is_empty());
        assert_eq!(run.out, "");
        assert_eq!(run.err, "");
    }

    #[test]
    fn test_identity_failure_is_fatal() {
        let mut actor = FakeActor::new(Ok(scenario_quota()), &[]);
        actor.user = Err(IdentityError::MissingUser);

        let run = execute_command(&config(), &FakeSharedActor::default(), &actor, OutputFormat::Table);

        assert!(matches!(
            run.result,
            Err(CommandError::Identity(IdentityError::MissingUser))
        ));
        assert!(actor.quota_calls.borrow().is_empty());
        assert_eq!(run.out, "");
    }

    #[test]
    fn test_not_found_flushes_warnings_and_fails() {
        let actor = FakeActor::new(
            Err(ResolveError::NotFound {
                name: "some-space-quota".to_owned(),
            }),
            &["warning-1", "warning-2"],
        );

        let run = execute_command(&config(), &FakeSharedActor::default(), &actor, OutputFormat::Table);

        assert!(matches!(
            run.result,
            Err(CommandError::Resolve(ResolveError::NotFound { .. }))
        ));
        assert_eq!(
            *actor.quota_calls.borrow(),
            [("some-space-quota".to_owned(), "some-org-guid".to_owned())]
        );
        assert_eq!(run.out, format!("{PROGRESS}\n"));
        assert_eq!(run.err, "warning-1\nwarning-2\n");
    }

    #[test]
    fn test_success_displays_quota_and_warnings() {
        let actor = FakeActor::new(Ok(scenario_quota()), &["warning-1", "warning-2"]);

        let run = execute_command(&config(), &FakeSharedActor::default(), &actor, OutputFormat::Table);

        assert!(run.result.is_ok());
        assert_eq!(
            *actor.quota_calls.borrow(),
            [("some-space-quota".to_owned(), "some-org-guid".to_owned())]
        );
        assert_eq!(run.err, "warning-1\nwarning-2\n");
        assert_eq!(
            normalized(&run.out),
            [
                PROGRESS,
                "total memory: 2G",
                "instance memory: 1G",
                "routes: 4",
                "service instances: unlimited",
                "paid service plans: disallowed",
                "app instances: 2",
                "route ports: unlimited",
            ]
        );
    }

    #[test]
    fn test_progress_line_precedes_table() {
        let actor = FakeActor::new(Ok(scenario_quota()), &[]);

        let run = execute_command(&config(), &FakeSharedActor::default(), &actor, OutputFormat::Table);

        let mut lines = run.out.lines();
        assert_eq!(lines.next(), Some(PROGRESS));
        assert_eq!(lines.next(), Some(""));
        assert_eq!(run.err, "");
    }

    #[test]
    fn test_remote_error_still_flushes_warnings() {
        let actor = FakeActor::new(
            Err(ResolveError::Remote {
                status: 500,
                detail: "boom".to_owned(),
            }),
            &["only-warning"],
        );

        let run = execute_command(&config(), &FakeSharedActor::default(), &actor, OutputFormat::Table);

        assert!(matches!(
            run.result,
            Err(CommandError::Resolve(ResolveError::Remote { status: 500, .. }))
        ));
        assert_eq!(run.err, "only-warning\n");
        assert_eq!(normalized(&run.out), [PROGRESS]);
    }

    #[test]
    fn test_auto_format_writes_progress_and_rows_to_primary_stream() {
        let actor = FakeActor::new(Ok(scenario_quota()), &["warning-1"]);

        let run = execute_command(&config(), &FakeSharedActor::default(), &actor, OutputFormat::Auto);

        assert!(run.result.is_ok());
        assert_eq!(run.err, "warning-1\n");
        let out = normalized(&run.out);
        assert_eq!(out[0], PROGRESS);
        assert_eq!(out[1], "total memory: 2G");
        assert_eq!(out.len(), 8);
    }

    /// A diagnostic stream whose writes always fail.
    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::from(std::io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::from(std::io::ErrorKind::BrokenPipe))
        }
    }

    #[test]
    fn test_warning_write_failure_keeps_lookup_error() {
        let actor = FakeActor::new(
            Err(ResolveError::NotFound {
                name: "some-space-quota".to_owned(),
            }),
            &["warning-1"],
        );
        let config = config();
        let shared_actor = FakeSharedActor::default();
        let command = SpaceQuotaCommand {
            config: &config,
            shared_actor: &shared_actor,
            actor: &actor,
        };
        let mut ui = Ui::new(Vec::<u8>::new(), BrokenPipe);
        let ctx = OutputCtx::new(OutputFormat::Table, false, false);

        let result = command.execute("some-space-quota", &mut ui, &ctx);

        assert!(matches!(
            result,
            Err(CommandError::Resolve(ResolveError::NotFound { ref name })) if name == "some-space-quota"
        ));
        let (out, _) = ui.into_parts();
        assert_eq!(String::from_utf8(out).unwrap(), format!("{PROGRESS}\n"));
    }

    #[test]
    fn test_warning_write_failure_does_not_fail_success() {
        let actor = FakeActor::new(Ok(scenario_quota()), &["warning-1"]);
        let config = config();
        let shared_actor = FakeSharedActor::default();
        let command = SpaceQuotaCommand {
            config: &config,
            shared_actor: &shared_actor,
            actor: &actor,
        };
        let mut ui = Ui::new(Vec::<u8>::new(), BrokenPipe);
        let ctx = OutputCtx::new(OutputFormat::Table, false, false);

        assert!(command.execute("some-space-quota", &mut ui, &ctx).is_ok());
        let (out, _) = ui.into_parts();
        assert!(String::from_utf8(out).unwrap().contains("route ports:"));
    }

    #[test]
    fn test_json_output_keeps_stdout_parseable() {
        let actor = FakeActor::new(Ok(scenario_quota()), &["warning-1"]);

        let run = execute_command(&config(), &FakeSharedActor::default(), &actor, OutputFormat::Json);

        assert!(run.result.is_ok());
        assert_eq!(run.err, format!("{PROGRESS}\nwarning-1\n"));
        let value: serde_json::Value = serde_json::from_str(&run.out).unwrap();
        assert_eq!(value["name"], "some-space-quota");
        assert_eq!(value["total_memory_in_mb"], 2048);
        assert!(value["total_service_instances"].is_null());
        assert_eq!(value["paid_service_plans"], false);
        assert_eq!(value["display"][3]["text"], "unlimited");
    }
}
