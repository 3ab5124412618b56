use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static SUBSCRIBER: OnceCell<Result<(), String>> = OnceCell::new();

/// Install the global tracing subscriber.
///
/// Logs go to stderr so stdout stays reserved for the report previews. The
/// level defaults to `info` and can be overridden through `RUST_LOG`.
/// Calling this more than once is safe; only the first call installs anything.
pub fn init_logging() -> anyhow::Result<()> {
    let result = SUBSCRIBER.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init()
            .map_err(|e| e.to_string())
    });

    match result {
        Ok(()) => Ok(()),
        Err(message) => Err(anyhow::anyhow!(message.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialization_is_idempotent() {
        let first = init_logging().is_ok();
        let second = init_logging().is_ok();
        assert_eq!(first, second);
    }
}
