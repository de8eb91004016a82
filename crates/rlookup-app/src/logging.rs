use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `format` is `json` or `text`; anything else picks JSON when stdout is not a terminal.
pub fn init(format: Option<&str>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let json = match format {
        Some("json") => true,
        Some("text") => false,
        _ => !atty::is(atty::Stream::Stdout),
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
