use tracing::info;

use super::*;

const OFFLINE_NOTICE: &str = "You are offline. Some features may not work.";

impl ViewerController {
    pub fn is_online(&self) -> bool {
        self.online
    }

    /// Apply a connectivity change reported by the host.
    ///
    /// Coming back online reloads only when nothing is loaded and no request
    /// is pending.
    pub fn set_online(&mut self, online: bool) {
        if online == self.online {
            return;
        }
        self.online = online;
        if !online {
            info!("Connection lost");
            self.ui.notice = Some(OFFLINE_NOTICE.to_string());
            self.set_status("Offline", StatusTone::Warning);
            return;
        }
        info!("Connection restored");
        self.ui.notice = None;
        if !self.load.loaded && self.load.in_flight.is_none() {
            self.start_load();
        } else {
            self.set_status("Back online", StatusTone::Info);
        }
    }
}
