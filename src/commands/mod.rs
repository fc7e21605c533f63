/// Command dispatch: routes `Command` enum variants to their implementations.
pub mod errors;
pub mod space_quota;

pub use errors::CommandError;
pub use space_quota::SpaceQuotaCommand;

use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::actor::PlatformActor;
use crate::cli::args::Command;
use crate::cli::{OutputCtx, Ui};
use crate::session::{SessionConfig, SessionGate};

/// Dispatch a parsed `Command` to its handler, wiring the production
/// session, platform client, and stdio streams.
///
/// # Errors
///
/// Returns `CommandError` on any command failure.
pub fn dispatch(
    command: &Command,
    config_path: Option<&Path>,
    ctx: &OutputCtx,
) -> Result<(), CommandError> {
    run(command, config_path, ctx, &mut Ui::stdio())
}

/// Load the session from `config_path`, build the gate and platform client
/// from it, and run `command` against `ui`.
fn run<O: Write, E: Write>(
    command: &Command,
    config_path: Option<&Path>,
    ctx: &OutputCtx,
    ui: &mut Ui<O, E>,
) -> Result<(), CommandError> {
    let t_config = ctx.timer("load_config");
    let config = SessionConfig::load(config_path)?;
    drop(t_config);
    debug!(path = ?config.source(), "session loaded");

    let shared_actor = SessionGate::new(&config);
    let actor = PlatformActor::new(&config)?;

    match command {
        Command::SpaceQuota(args) => SpaceQuotaCommand {
            config: &config,
            shared_actor: &shared_actor,
            actor: &actor,
        }
        .execute(&args.name, ui, ctx),
    }
}
