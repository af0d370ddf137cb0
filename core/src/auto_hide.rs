//! Visibility of the fullscreen control.
//!
//! Leaving the player arms a single pending hide; entering again cancels it.
//! The caller owns the actual clock and reports expiry with the token it was
//! handed when the hide was armed, so a late timer from an earlier leave can
//! never hide the control.

pub const HIDE_DELAY_MS: u32 = 3_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HideToken(u64);

#[derive(Debug, Clone, Default)]
pub struct AutoHide {
    visible: bool,
    pending: Option<HideToken>,
    next_token: u64,
}

impl AutoHide {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pointer_enter(&mut self) {
        self.pending = None;
        self.visible = true;
    }

    /// Arms a hide and returns its token. Any earlier pending hide is superseded.
    pub fn pointer_leave(&mut self) -> HideToken {
        let token = HideToken(self.next_token);
        self.next_token = self.next_token.wrapping_add(1);
        self.pending = Some(token);
        token
    }

    /// Returns whether the control was hidden by this expiry.
    pub fn expire(&mut self, token: HideToken) -> bool {
        if self.pending != Some(token) {
            return false;
        }
        self.pending = None;
        let was_visible = self.visible;
        self.visible = false;
        was_visible
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
