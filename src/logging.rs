//! Tracing subscriber setup shared by the binaries

use tracing::Subscriber;
use tracing_subscriber::{
    fmt::MakeWriter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

use crate::config::LoggingConfig;

/// Build a subscriber writing events to `writer`
///
/// `RUST_LOG` takes precedence over the configured level. Format `json`
/// emits one JSON object per event, anything else the pretty formatter.
pub fn subscriber<W>(
    config: &LoggingConfig,
    writer: W,
) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "scatterboard={},tower_http={}",
            config.level, config.level
        ))
    });

    let fmt_layer = if config.format.eq_ignore_ascii_case("json") {
        tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .json()
            .boxed()
    } else {
        tracing_subscriber::fmt::layer().with_writer(writer).boxed()
    };

    tracing_subscriber::registry().with(filter).with(fmt_layer)
}

/// Install the global subscriber on stdout
pub fn init(config: &LoggingConfig) {
    init_with_writer(config, std::io::stdout);
}

/// Install the global subscriber on a chosen writer
///
/// The CLI passes `std::io::stderr` so stdout carries only command output.
pub fn init_with_writer<W>(config: &LoggingConfig, writer: W)
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    subscriber(config, writer).init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn config(format: &str) -> LoggingConfig {
        LoggingConfig {
            level: "info".to_string(),
            format: format.to_string(),
        }
    }

    #[test]
    fn test_events_go_to_given_writer() {
        let sink = Captured::default();
        let writer = sink.clone();
        let subscriber = subscriber(&config("pretty"), move || writer.clone());

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(target: "scatterboard::test", "to the sink");
        });

        assert!(sink.text().contains("to the sink"));
    }

    #[test]
    fn test_json_format() {
        let sink = Captured::default();
        let writer = sink.clone();
        let subscriber = subscriber(&config("json"), move || writer.clone());

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(target: "scatterboard::test", rows = 3, "json event");
        });

        let line = sink.text();
        let event: serde_json::Value = serde_json::from_str(line.trim()).unwrap();
        assert_eq!(event["fields"]["message"], "json event");
        assert_eq!(event["fields"]["rows"], 3);
    }
}
