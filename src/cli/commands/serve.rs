//! Preview server command.

use console::style;

use crate::config::Settings;

const DEFAULT_PORT: u16 = 8080;

/// Start the preview server.
pub async fn cmd_serve(settings: &Settings) -> anyhow::Result<()> {
    println!(
        "{} Serving {} at http://{}",
        style("→").cyan(),
        settings.site_root.display(),
        settings.bind
    );
    println!("  Press Ctrl+C to stop");

    crate::server::serve(settings).await
}

/// Normalize a bind address that can be:
/// - Just a port: "3030" -> 127.0.0.1:3030
/// - Just a host: "0.0.0.0" -> 0.0.0.0:8080
/// - Host and port: "0.0.0.0:3030" -> 0.0.0.0:3030
pub fn parse_bind_address(bind: &str) -> anyhow::Result<String> {
    if let Ok(port) = bind.parse::<u16>() {
        return Ok(format!("127.0.0.1:{}", port));
    }

    if let Some((host, port_str)) = bind.rsplit_once(':') {
        if port_str.parse::<u16>().is_ok() {
            if host.is_empty() {
                anyhow::bail!("Missing host in bind address: {}", bind);
            }
            return Ok(bind.to_string());
        }
    }

    if bind.is_empty() {
        anyhow::bail!("Empty bind address");
    }
    Ok(format!("{}:{}", bind, DEFAULT_PORT))
}
