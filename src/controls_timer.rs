use gloo::timers::callback::Timeout;

/// One pending fire-once timer; arming again or cancelling drops the previous one.
#[derive(Default)]
pub(crate) struct ControlsTimer {
    pending: Option<Timeout>,
}

impl ControlsTimer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn arm<F>(&mut self, delay_ms: u32, on_expire: F)
    where
        F: FnOnce() + 'static,
    {
        self.pending = Some(Timeout::new(delay_ms, on_expire));
    }

    pub(crate) fn cancel(&mut self) {
        // Dropping a gloo timeout clears it.
        self.pending = None;
    }
}
