//! Shared HTTP agent and bounded body readers for dataset and audio fetches.

use std::io::{self, Read};
use std::sync::OnceLock;
use std::time::Duration;

use url::Url;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const READ_TIMEOUT: Duration = Duration::from_secs(30);

/// Return a shared HTTP agent with consistent timeouts.
pub(crate) fn agent() -> &'static ureq::Agent {
    static AGENT: OnceLock<ureq::Agent> = OnceLock::new();
    AGENT.get_or_init(|| {
        ureq::AgentBuilder::new()
            .timeout_connect(CONNECT_TIMEOUT)
            .timeout_read(READ_TIMEOUT)
            .user_agent(concat!("evalview/", env!("CARGO_PKG_VERSION")))
            .build()
    })
}

/// Read a response into memory, enforcing a maximum byte size.
pub(crate) fn read_response_bytes(
    response: ureq::Response,
    max_bytes: usize,
) -> Result<Vec<u8>, io::Error> {
    check_content_length(&response, max_bytes)?;
    let reader = response.into_reader();
    let mut limited = reader.take(max_bytes as u64 + 1);
    let mut bytes = Vec::new();
    limited.read_to_end(&mut bytes)?;
    if bytes.len() > max_bytes {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Response exceeded {max_bytes} bytes"),
        ));
    }
    Ok(bytes)
}

/// Fetch a `http(s)://` or `file://` URL into memory.
///
/// Non-success statuses surface as `io::ErrorKind::NotFound` for 404 and
/// `io::ErrorKind::Other` otherwise, so callers can try the next candidate.
pub(crate) fn fetch_bytes(url: &Url, timeout: Duration, max_bytes: usize) -> io::Result<Vec<u8>> {
    if url.scheme() == "file" {
        let path = url.to_file_path().map_err(|()| {
            io::Error::new(io::ErrorKind::InvalidInput, format!("{url} is not a file path"))
        })?;
        let bytes = std::fs::read(path)?;
        if bytes.len() > max_bytes {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("File exceeded {max_bytes} bytes"),
            ));
        }
        return Ok(bytes);
    }
    match agent().get(url.as_str()).timeout(timeout).call() {
        Ok(response) => read_response_bytes(response, max_bytes),
        Err(ureq::Error::Status(404, _)) => Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{url} returned HTTP 404"),
        )),
        Err(ureq::Error::Status(code, _)) => Err(io::Error::other(format!(
            "{url} returned HTTP {code}"
        ))),
        Err(ureq::Error::Transport(err)) => Err(io::Error::other(err.to_string())),
    }
}

fn check_content_length(response: &ureq::Response, max_bytes: usize) -> Result<(), io::Error> {
    let Some(length) = response.header("Content-Length") else {
        return Ok(());
    };
    let Ok(length) = length.parse::<u64>() else {
        return Ok(());
    };
    if length > max_bytes as u64 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Response too large: {length} bytes"),
        ));
    }
    Ok(())
}
