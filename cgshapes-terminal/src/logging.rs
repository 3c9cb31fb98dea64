use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "cgshapes_core=debug"). The terminal is in the alternate screen while
/// running, so output only becomes visible when sent to `log_file`.
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub log_file: Option<PathBuf>,
}

static INIT: Once = Once::new();

/// Initializes the global logger once; later calls are ignored.
///
/// Fails only when `log_file` cannot be created.
pub fn init_logging(config: LoggingConfig) -> io::Result<()> {
    let target = match &config.log_file {
        Some(path) => Some(File::create(path)?),
        None => None,
    };

    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = &config.env_filter {
            builder.parse_filters(filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Warn);
        }

        if let Some(file) = target {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
            builder.write_style(env_logger::WriteStyle::Never);
        }

        // A logger installed elsewhere (tests) wins
        if builder.try_init().is_ok() {
            log::debug!("logging initialized");
        }
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        assert!(init_logging(LoggingConfig::default()).is_ok());
        assert!(init_logging(LoggingConfig {
            env_filter: Some("debug".into()),
            log_file: None,
        })
        .is_ok());
    }

    #[test]
    fn test_unwritable_log_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoggingConfig {
            env_filter: None,
            log_file: Some(dir.path().join("missing").join("out.log")),
        };
        assert!(init_logging(config).is_err());
    }
}
