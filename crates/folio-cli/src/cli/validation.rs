/// Parse a TCP port for the dev server.
///
/// Port 0 would bind a random port, which the browser could never be pointed
/// at, so it is rejected.
pub fn parse_port(s: &str) -> Result<u16, String> {
    let port: u16 = s
        .parse()
        .map_err(|_| format!("'{}' is not a port number (1-65535)", s))?;

    if port == 0 {
        return Err("Port must be between 1 and 65535".to_string());
    }

    Ok(port)
}
