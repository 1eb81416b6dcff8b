use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Set/change environment variable; may be specified multiple times.
    #[arg(short = 'e', value_name = "NAME=VALUE", value_parser = parse_assignment)]
    pub env: Vec<EnvAssignment>,
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    pub verbosity: u8,
    #[arg(value_name = "UID")]
    pub uid: String,
    #[arg(value_name = "GID")]
    pub gid: String,
    /// Path of the program to become; never searched on PATH.
    #[arg(value_name = "CMD")]
    pub cmd: String,
    /// Argument vector for CMD; the first token is its argv[0].
    #[arg(
        value_name = "ARG0",
        required = true,
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub args: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnvAssignment {
    pub name: String,
    pub value: String,
}

fn parse_assignment(raw: &str) -> Result<EnvAssignment, String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("'{raw}' is not of the form NAME=VALUE"))?;
    if name.is_empty() {
        return Err(format!("'{raw}' has an empty NAME"));
    }
    Ok(EnvAssignment {
        name: name.to_string(),
        value: value.to_string(),
    })
}

/// atoi-style id parsing: leading decimal digits, anything else falls back
/// to zero. Preserved from the original grammar; callers are expected to
/// supply valid numeric ids.
pub(crate) fn parse_id(raw: &str) -> u32 {
    let trimmed = raw.trim();
    let end = trimmed
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..end].parse().unwrap_or(0)
}
