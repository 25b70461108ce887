//! Background reachability probe standing in for browser online/offline events.

use std::net::{SocketAddr, TcpStream};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

use tracing::debug;
use url::Url;

const PROBE_INTERVAL: Duration = Duration::from_secs(5);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

/// Reports connectivity changes for the dataset host.
///
/// Only transitions are sent; the first report is always delivered.
pub struct ConnectivityProbe {
    rx: Receiver<bool>,
}

impl ConnectivityProbe {
    /// Start probing the host of `url`. Returns `None` for non-network URLs.
    pub fn spawn(url: &Url) -> Option<Self> {
        if !matches!(url.scheme(), "http" | "https") {
            return None;
        }
        let url = url.clone();
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let mut last = None;
            loop {
                let online = host_reachable(&url);
                if last != Some(online) {
                    debug!("Connectivity probe for {}: online={online}", url);
                    if tx.send(online).is_err() {
                        return;
                    }
                    last = Some(online);
                }
                thread::sleep(PROBE_INTERVAL);
            }
        });
        Some(Self { rx })
    }

    /// Most recent state change since the last poll, if any.
    pub fn poll(&self) -> Option<bool> {
        self.rx.try_iter().last()
    }
}

fn host_reachable(url: &Url) -> bool {
    let addrs: Vec<SocketAddr> = match url.socket_addrs(|| None) {
        Ok(addrs) => addrs,
        Err(_) => return false,
    };
    addrs
        .iter()
        .any(|addr| TcpStream::connect_timeout(addr, CONNECT_TIMEOUT).is_ok())
}
