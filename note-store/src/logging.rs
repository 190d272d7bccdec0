use tracing_subscriber::prelude::*;

/// Installs the global subscriber. Output goes to stderr; stdout is left to
/// the command being run.
pub fn setup_tracing(json: bool) {
    let tracing = tracing_subscriber::registry().with(
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "note_store=info,notes=info".into()),
    );

    let installed = if json {
        tracing
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        tracing
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setup_tracing_tolerates_repeat_calls() {
        setup_tracing(false);
        setup_tracing(true);

        tracing::info!("still logging");
    }
}
