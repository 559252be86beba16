// Demo server: GET /example returns a small page, everything else is 404.
// Stop it with SIGTERM or Ctrl+C.

use httpdrone::config::{Settings, DEFAULT_CONFIG_PATH};
use httpdrone::{logger, Error, Handlers, Reply, Request};

fn handle_get(request: &Request) -> Reply {
    if request.path() != "/example" {
        return Reply::Status(404);
    }

    Reply::from("<html><body>Here you go!</body></html>")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let settings = Settings::load_from(&config_path).map_err(Error::Config)?;

    logger::init(
        settings.logging.access_log_file.as_deref(),
        settings.logging.error_log_file.as_deref(),
    )
    .map_err(Error::Logger)?;

    httpdrone::serve_with(
        settings.bind_addr(),
        Handlers::new().get(handle_get),
        settings.server_options(),
    )?;

    Ok(())
}
