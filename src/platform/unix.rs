use crate::cli::{Cli, EnvAssignment, parse_id};
use anyhow::{Context, Result, anyhow, bail};
use nix::{
    errno::Errno,
    unistd::{Gid, Uid, execv, setgid, setuid},
};
use std::ffi::CString;
use tracing::{debug, warn};

pub(super) fn run_impl(cli: Cli) -> Result<()> {
    apply_env(&cli.env)?;

    let uid = Uid::from_raw(resolve_id("uid", &cli.uid));
    let gid = Gid::from_raw(resolve_id("gid", &cli.gid));
    drop_privileges(gid, uid)?;

    let (cmd_c, argv_c) =
        prepare_command(&cli.cmd, &cli.args).with_context(|| format!("prepare {:?}", cli.cmd))?;
    debug!(cmd = %cli.cmd, argv = ?cli.args, "replacing process image");
    // execv keeps the current environment and the current PID; it only
    // returns on failure.
    match execv(&cmd_c, &argv_c) {
        Ok(never) => match never {},
        Err(err) => Err(err).with_context(|| format!("execv {}", cli.cmd)),
    }
}

fn apply_env(assignments: &[EnvAssignment]) -> Result<()> {
    for assignment in assignments {
        let name = CString::new(assignment.name.as_str())
            .map_err(|_| anyhow!("environment name contains embedded NUL byte"))?;
        let value = CString::new(assignment.value.as_str())
            .map_err(|_| anyhow!("environment value contains embedded NUL byte"))?;
        // SAFETY: the process is still single-threaded; nothing reads the
        // environment concurrently before the exec.
        let rc = unsafe { libc::setenv(name.as_ptr(), value.as_ptr(), 1) };
        if rc == -1 {
            bail!("setenv {}: {}", assignment.name, Errno::last());
        }
        debug!(name = %assignment.name, "environment variable set");
    }
    Ok(())
}

fn resolve_id(kind: &'static str, raw: &str) -> u32 {
    let parsed = parse_id(raw);
    if raw.trim() != parsed.to_string() {
        warn!(kind, value = %raw, parsed, "id is not a plain decimal number; using fallback");
    }
    parsed
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum IdentityStep {
    Group,
    User,
}

/// Lowers group identity, then user identity. The order is load-bearing:
/// once the user id is unprivileged the group id can no longer be changed.
fn lower_identity<G, U>(
    set_group: G,
    set_user: U,
) -> std::result::Result<(), (IdentityStep, Errno)>
where
    G: FnOnce() -> nix::Result<()>,
    U: FnOnce() -> nix::Result<()>,
{
    set_group().map_err(|e| (IdentityStep::Group, e))?;
    set_user().map_err(|e| (IdentityStep::User, e))
}

fn drop_privileges(gid: Gid, uid: Uid) -> Result<()> {
    lower_identity(|| setgid(gid), || setuid(uid)).map_err(|(step, errno)| match step {
        IdentityStep::Group => anyhow!("setgid {gid}: {errno}"),
        IdentityStep::User => anyhow!("setuid {uid}: {errno}"),
    })?;
    debug!(%gid, %uid, "process identity lowered");
    Ok(())
}

fn prepare_command(cmd: &str, args: &[String]) -> Result<(CString, Vec<CString>)> {
    let program =
        CString::new(cmd).map_err(|_| anyhow!("command path contains embedded NUL byte"))?;
    let argv = args
        .iter()
        .map(|s| {
            CString::new(s.as_str())
                .map_err(|_| anyhow!("command argument contains embedded NUL byte"))
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok((program, argv))
}
