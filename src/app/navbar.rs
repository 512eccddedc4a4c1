//! Navbar scroll observer, owned by the mounted page

use crate::constants::NAVBAR_SCROLL_THRESHOLD;

/// Tracks whether the page has scrolled far enough to compact the navbar.
///
/// Scroll offsets only count between `mount` and `unmount`.
#[derive(Clone, Debug, Default)]
pub struct NavbarObserver {
    subscribed: bool,
    scrolled: bool,
}

impl NavbarObserver {
    pub fn mount(&mut self) {
        self.subscribed = true;
        self.scrolled = false;
    }

    pub fn unmount(&mut self) {
        self.subscribed = false;
        self.scrolled = false;
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    pub fn on_scroll(&mut self, offset: u16) {
        if self.subscribed {
            self.scrolled = offset > NAVBAR_SCROLL_THRESHOLD;
        }
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }
}
