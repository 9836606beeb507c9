use anyhow::{anyhow, Context, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

fn default_directive(to_file: bool) -> &'static str {
    if to_file {
        "cnapp_dash=info"
    } else {
        "cnapp_dash=warn"
    }
}

fn env_filter(to_file: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(to_file)))
}

/// Install the global subscriber.
///
/// The interactive dashboard owns the terminal, so without a log file it
/// installs nothing rather than writing over the alternate screen.
pub fn init(log_file: Option<&str>, interactive: bool) -> Result<()> {
    let result = match log_file {
        Some(path) => {
            let path = shellexpand::tilde(path).into_owned();
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("failed to open log file {}", path))?;

            tracing_subscriber::fmt()
                .with_env_filter(env_filter(true))
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init()
        }
        None if interactive => return Ok(()),
        None => tracing_subscriber::fmt()
            .with_env_filter(env_filter(false))
            .with_writer(std::io::stderr)
            .try_init(),
    };

    result.map_err(|e| anyhow!("tracing init failed: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_logging_is_more_verbose() {
        assert_eq!(default_directive(true), "cnapp_dash=info");
        assert_eq!(default_directive(false), "cnapp_dash=warn");
    }

    #[test]
    fn test_interactive_without_file_installs_nothing() {
        assert!(init(None, true).is_ok());
    }

    #[test]
    fn test_unwritable_log_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no-such-dir").join("dash.log");
        let err = init(missing.to_str(), true).unwrap_err();
        assert!(err.to_string().contains("failed to open log file"));
    }
}
