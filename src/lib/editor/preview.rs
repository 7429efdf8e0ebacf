//! Module implementing the debounced live preview.

use std::time::{Duration, Instant};

use crate::model::Config;
use crate::render::{Engine, RenderError, RenderOptions, RenderOutput};


/// Delay between the last change and the rendering of the preview.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);


/// What the preview currently shows.
#[derive(Clone, Debug, PartialEq)]
pub enum PreviewState {
    /// Nothing has been rendered yet.
    Idle,
    /// The most recent rendering.
    Ready(RenderOutput),
    /// Message of the error from the most recent rendering.
    Failed(String),
}

/// Request to render a preview, issued by `Preview::poll`.
#[derive(Clone, Debug, PartialEq)]
#[must_use = "unused render request which must be completed"]
pub struct RenderRequest {
    seq: u64,
    config: Config,
}

impl RenderRequest {
    /// Sequence number of the request. Later requests have higher numbers.
    #[inline]
    pub fn seq(&self) -> u64 {
        self.seq
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }
}


/// Debounced preview of the stamp being edited.
///
/// Changes are collected until the config stays unchanged for the debounce delay,
/// and only the result of the latest request ever gets shown.
/// The caller drives the time, so the preview can be rendered on any thread.
#[derive(Debug)]
pub struct Preview {
    delay: Duration,
    pending: Option<(Config, Instant)>,
    /// Sequence number of the last issued request.
    issued: u64,
    /// Sequence number of the last applied result.
    applied: u64,
    /// Requests up to this number were issued before a later change.
    superseded: u64,
    state: PreviewState,
}

impl Default for Preview {
    fn default() -> Self {
        Preview::with_delay(DEFAULT_DEBOUNCE)
    }
}

impl Preview {
    #[inline]
    pub fn new() -> Self {
        Preview::default()
    }

    #[inline]
    pub fn with_delay(delay: Duration) -> Self {
        Preview{delay, pending: None, issued: 0, applied: 0, superseded: 0,
                state: PreviewState::Idle}
    }
}

impl Preview {
    #[inline]
    pub fn state(&self) -> &PreviewState {
        &self.state
    }

    #[inline]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Whether a change is waiting for the debounce delay to pass.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Whether the result of the latest request hasn't arrived yet
    /// and no change has been made since it was issued.
    #[inline]
    pub fn is_generating(&self) -> bool {
        self.applied < self.issued && self.superseded < self.issued
    }
}

impl Preview {
    /// Note a change of the config, restarting the debounce delay.
    ///
    /// Any request issued so far is superseded and its result will be discarded.
    pub fn schedule(&mut self, config: Config, now: Instant) {
        trace!("Scheduling preview of {:?}", config.text);
        self.superseded = self.issued;
        self.pending = Some((config, now + self.delay));
    }

    /// Issue the render request for the pending config once its delay has passed.
    pub fn poll(&mut self, now: Instant) -> Option<RenderRequest> {
        match self.pending {
            Some((_, deadline)) if now >= deadline => {}
            _ => return None,
        }
        let (config, _) = self.pending.take()?;
        self.issued += 1;
        debug!("Issuing preview request #{}", self.issued);
        Some(RenderRequest{seq: self.issued, config})
    }

    /// Apply the result of a render request.
    ///
    /// Results of requests that have since been superseded are discarded.
    /// Returns whether the result was applied.
    pub fn complete(&mut self, seq: u64, result: Result<RenderOutput, RenderError>) -> bool {
        if seq != self.issued || seq <= self.applied || seq <= self.superseded {
            debug!("Discarding stale preview #{} (latest is #{})", seq, self.issued);
            return false;
        }
        self.applied = seq;
        self.state = match result {
            Ok(output) => PreviewState::Ready(output),
            Err(e) => {
                warn!("Preview #{} failed: {}", seq, e);
                PreviewState::Failed(e.to_string())
            }
        };
        true
    }

    /// Render the pending config if it's due, on the current thread.
    /// Returns whether the preview has changed.
    pub fn render_pending(&mut self, engine: &Engine, options: &RenderOptions,
                          now: Instant) -> bool {
        match self.poll(now) {
            Some(request) => {
                let result = engine.render(request.config(), options);
                self.complete(request.seq(), result)
            }
            None => false,
        }
    }
}


#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use spectral::prelude::*;
    use crate::model::Config;
    use crate::render::{Engine, RenderError, RenderOptions};
    use super::{Preview, PreviewState, DEFAULT_DEBOUNCE};

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn debounce() {
        let start = Instant::now();
        let mut preview = Preview::new();
        assert_that!(preview.delay()).is_equal_to(DEFAULT_DEBOUNCE);

        preview.schedule(Config::with_text("A"), start);
        preview.schedule(Config::with_text("AB"), start + ms(200));
        assert_that!(preview.poll(start + ms(300))).is_none();
        assert_that!(preview.is_pending()).is_true();

        let request = preview.poll(start + ms(500)).unwrap();
        assert_that!(request.config().text.as_str()).is_equal_to("AB");
        assert_that!(request.seq()).is_equal_to(1);
        assert_that!(preview.is_pending()).is_false();
        assert_that!(preview.is_generating()).is_true();
        assert_that!(preview.poll(start + ms(1000))).is_none();
    }

    #[test]
    fn stale_result_is_discarded() {
        let start = Instant::now();
        let mut preview = Preview::with_delay(ms(0));

        preview.schedule(Config::with_text("old"), start);
        let old = preview.poll(start).unwrap();
        preview.schedule(Config::with_text("new"), start);
        let new = preview.poll(start).unwrap();

        let failure = || Err(RenderError::Surface("boom".into()));
        assert_that!(preview.complete(new.seq(), failure())).is_true();
        assert_that!(preview.complete(old.seq(), failure())).is_false();
        match preview.state() {
            PreviewState::Failed(msg) => assert_that!(msg.contains("boom")).is_true(),
            s => panic!("expected failed preview, got {:?}", s),
        }
        assert_that!(preview.is_generating()).is_false();
    }

    #[test]
    fn change_discards_render_in_flight() {
        let start = Instant::now();
        let mut preview = Preview::new();

        preview.schedule(Config::with_text("old"), start);
        let old = preview.poll(start + DEFAULT_DEBOUNCE).unwrap();
        assert_that!(preview.is_generating()).is_true();

        // The newer config is still waiting out its delay.
        preview.schedule(Config::with_text("new"), start + DEFAULT_DEBOUNCE);
        assert_that!(preview.is_generating()).is_false();
        let applied = preview.complete(old.seq(), Err(RenderError::Surface("old result".into())));
        assert_that!(applied).is_false();
        assert_that!(preview.state()).is_equal_to(&PreviewState::Idle);

        let new = preview.poll(start + DEFAULT_DEBOUNCE * 2).unwrap();
        assert_that!(new.config().text.as_str()).is_equal_to("new");
        assert_that!(preview.is_generating()).is_true();
        assert_that!(preview.complete(new.seq(), Err(RenderError::Surface("new".into()))))
            .is_true();
        assert_that!(preview.is_generating()).is_false();
    }

    #[test]
    fn renders_when_due() {
        let engine = Engine::new().unwrap();
        let options = RenderOptions::new().size(64, 48).scale(1.0);
        let start = Instant::now();
        let mut preview = Preview::new();
        assert_that!(preview.state()).is_equal_to(&PreviewState::Idle);

        preview.schedule(Config::default(), start);
        assert_that!(preview.render_pending(&engine, &options, start)).is_false();
        assert_that!(preview.render_pending(&engine, &options, start + DEFAULT_DEBOUNCE)).is_true();
        match preview.state() {
            PreviewState::Ready(output) => assert_that!(output.dimensions()).is_equal_to((64, 48)),
            s => panic!("expected ready preview, got {:?}", s),
        }
    }
}
