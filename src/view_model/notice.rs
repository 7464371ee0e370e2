use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use tokio::time::sleep;

use crate::view_model::{Flight, lock};

pub const NOTICE_LIFETIME: Duration = Duration::from_secs(3);

/// Transient message which clears itself.
#[derive(Default)]
pub struct Notice {
    text: Arc<Mutex<Option<String>>>,
    timer: Flight,
}

impl Notice {
    /// Show the text, replacing the current one along with its pending clear.
    pub fn show(&mut self, text: String) {
        *lock(&self.text) = Some(text);
        let shown = Arc::clone(&self.text);
        self.timer.launch(sleep(NOTICE_LIFETIME), move |()| *lock(&shown) = None);
    }

    #[must_use]
    pub fn text(&self) -> Option<String> {
        lock(&self.text).clone()
    }

    /// Drop the text and its pending clear.
    pub fn cancel(&mut self) {
        self.timer.cancel();
        *lock(&self.text) = None;
    }

    /// Wait until the text clears itself.
    #[cfg(test)]
    pub async fn settle(&mut self) {
        self.timer.settle().await;
    }
}
