//! Full-screen carousel preview.
//!
//! The preview steps through a snapshot of the ordered banners and never
//! writes to the editing state. [`CarouselState::apply`] is the pure
//! transition function; [`CarouselPreviewController`] owns the state for one
//! open preview and carries out the [`TimerEffect`]s it returns.
//!
//! # Autoplay
//!
//! While playing, an [`AutoplayTimer`] task sends an [`AutoplayTick`] to the
//! host event loop every interval; the loop hands it back through
//! [`CarouselPreviewController::on_tick`]. At most one timer exists per
//! controller: starting a timer aborts the previous one first, and every
//! start bumps a generation counter so ticks already queued by an aborted
//! timer are ignored.

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::debug;

use crate::config::CarouselConfig;
use crate::models::BannerItem;

/// Preview position and playback flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselState {
    current_index: usize,
    is_playing: bool,
    len: usize,
}

/// Preview input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselEvent {
    /// The autoplay interval elapsed.
    Tick,
    /// Step forward, wrapping past the last slide.
    Next,
    /// Step back, wrapping before the first slide.
    Previous,
    /// Jump to a slide (indicator click). Out-of-range values wrap.
    GoTo(i64),
    /// Flip between playing and paused.
    ToggleAutoplay,
}

/// What the timer owner must do after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEffect {
    /// Leave the timer as it is.
    Keep,
    /// Schedule a timer (none is running).
    Start,
    /// Cancel the running timer and schedule a fresh one.
    Restart,
    /// Cancel the running timer.
    Cancel,
}

impl CarouselState {
    /// State for a freshly opened preview of `len` slides.
    ///
    /// Autoplay only starts when requested and there is more than one slide.
    #[must_use]
    pub const fn open(len: usize, autoplay: bool) -> (Self, TimerEffect) {
        let is_playing = autoplay && len > 1;
        let state = Self {
            current_index: 0,
            is_playing,
            len,
        };
        let effect = if is_playing {
            TimerEffect::Start
        } else {
            TimerEffect::Keep
        };
        (state, effect)
    }

    /// Index of the visible slide. Always `< len` when `len > 0`.
    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.current_index
    }

    /// Whether autoplay is running.
    #[must_use]
    pub const fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Number of slides.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether there are no slides.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Apply an event.
    #[must_use]
    pub fn apply(self, event: CarouselEvent) -> (Self, TimerEffect) {
        if self.len == 0 {
            return (self, TimerEffect::Keep);
        }

        let navigated = |index: usize| {
            let effect = if self.is_playing {
                TimerEffect::Restart
            } else {
                TimerEffect::Keep
            };
            (
                Self {
                    current_index: index,
                    ..self
                },
                effect,
            )
        };

        match event {
            CarouselEvent::Tick if self.is_playing => (
                Self {
                    current_index: (self.current_index + 1) % self.len,
                    ..self
                },
                TimerEffect::Keep,
            ),
            CarouselEvent::Tick => (self, TimerEffect::Keep),
            CarouselEvent::Next => navigated((self.current_index + 1) % self.len),
            CarouselEvent::Previous => navigated((self.current_index + self.len - 1) % self.len),
            CarouselEvent::GoTo(index) => navigated(wrap_index(index, self.len)),
            CarouselEvent::ToggleAutoplay if self.len <= 1 => (self, TimerEffect::Keep),
            CarouselEvent::ToggleAutoplay => {
                let effect = if self.is_playing {
                    TimerEffect::Cancel
                } else {
                    TimerEffect::Start
                };
                (
                    Self {
                        is_playing: !self.is_playing,
                        ..self
                    },
                    effect,
                )
            }
        }
    }
}

fn wrap_index(index: i64, len: usize) -> usize {
    let Ok(len_i64) = i64::try_from(len) else {
        return usize::try_from(index).unwrap_or(0) % len;
    };
    usize::try_from(index.rem_euclid(len_i64)).unwrap_or(0)
}

/// Message sent to the host event loop each autoplay interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoplayTick {
    /// Generation of the timer that produced the tick.
    pub generation: u64,
}

/// Handle to a running autoplay task. Dropping it aborts the task.
#[derive(Debug)]
pub struct AutoplayTimer {
    task: JoinHandle<()>,
    generation: u64,
}

impl AutoplayTimer {
    /// Spawn a task on `runtime` that sends a tick every `period`, starting
    /// one `period` from now.
    #[must_use]
    pub fn start(
        runtime: &Handle,
        period: Duration,
        generation: u64,
        ticks: UnboundedSender<AutoplayTick>,
    ) -> Self {
        let first = Instant::now() + period;
        let task = runtime.spawn(async move {
            let mut interval = tokio::time::interval_at(first, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if ticks.send(AutoplayTick { generation }).is_err() {
                    break;
                }
            }
        });
        Self { task, generation }
    }

    /// Generation this timer tags its ticks with.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Stop the task.
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for AutoplayTimer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Owns one carousel preview and its autoplay timer.
#[derive(Debug)]
pub struct CarouselPreviewController {
    config: CarouselConfig,
    runtime: Handle,
    ticks: UnboundedSender<AutoplayTick>,
    slides: Vec<BannerItem>,
    state: Option<CarouselState>,
    timer: Option<AutoplayTimer>,
    generation: u64,
}

impl CarouselPreviewController {
    /// Create a closed preview. Timers are spawned on `runtime` and deliver
    /// ticks through `ticks`.
    #[must_use]
    pub fn new(
        config: CarouselConfig,
        runtime: Handle,
        ticks: UnboundedSender<AutoplayTick>,
    ) -> Self {
        Self {
            config,
            runtime,
            ticks,
            slides: Vec::new(),
            state: None,
            timer: None,
            generation: 0,
        }
    }

    /// Open the preview over `banners`, closing any preview already open.
    pub fn open(&mut self, banners: &[BannerItem]) {
        self.close();
        self.slides = banners.to_vec();
        let (state, effect) = CarouselState::open(self.slides.len(), self.config.autoplay_on_open);
        debug!(slides = state.len(), playing = state.is_playing(), "Carousel opened");
        self.state = Some(state);
        self.run_effect(effect);
    }

    /// Close the preview, cancelling any pending timer.
    pub fn close(&mut self) {
        self.cancel_timer();
        if self.state.take().is_some() {
            debug!("Carousel closed");
        }
        self.slides.clear();
    }

    /// Handle a tick delivered by the host event loop.
    ///
    /// Ticks from a cancelled timer, or arriving after close, are ignored.
    pub fn on_tick(&mut self, tick: AutoplayTick) {
        let current = self.timer.as_ref().map(AutoplayTimer::generation);
        if current != Some(tick.generation) {
            debug!(
                tick_generation = tick.generation,
                current_generation = ?current,
                "Ignoring stale autoplay tick"
            );
            return;
        }
        self.dispatch(CarouselEvent::Tick);
    }

    /// Show the next slide.
    pub fn next(&mut self) {
        self.dispatch(CarouselEvent::Next);
    }

    /// Show the previous slide.
    pub fn previous(&mut self) {
        self.dispatch(CarouselEvent::Previous);
    }

    /// Jump to slide `index`, wrapping out-of-range values.
    pub fn go_to(&mut self, index: i64) {
        self.dispatch(CarouselEvent::GoTo(index));
    }

    /// Flip between playing and paused. No effect with fewer than two slides.
    pub fn toggle_autoplay(&mut self) {
        self.dispatch(CarouselEvent::ToggleAutoplay);
    }

    /// Current state, `None` while closed.
    #[must_use]
    pub const fn state(&self) -> Option<&CarouselState> {
        self.state.as_ref()
    }

    /// Whether the preview is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.state.is_some()
    }

    /// Index of the visible slide.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.state.as_ref().map(CarouselState::current_index)
    }

    /// Whether autoplay is running.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.state.as_ref().is_some_and(CarouselState::is_playing)
    }

    /// The visible banner.
    #[must_use]
    pub fn current_banner(&self) -> Option<&BannerItem> {
        self.current_index().and_then(|index| self.slides.get(index))
    }

    /// Whether an autoplay timer is scheduled.
    #[must_use]
    pub const fn has_active_timer(&self) -> bool {
        self.timer.is_some()
    }

    fn dispatch(&mut self, event: CarouselEvent) {
        let Some(state) = self.state else {
            debug!(?event, "Carousel event ignored while closed");
            return;
        };
        let (next, effect) = state.apply(event);
        if next != state {
            debug!(
                ?event,
                index = next.current_index(),
                playing = next.is_playing(),
                "Carousel transition"
            );
        }
        self.state = Some(next);
        self.run_effect(effect);
    }

    fn run_effect(&mut self, effect: TimerEffect) {
        match effect {
            TimerEffect::Keep => {}
            TimerEffect::Start | TimerEffect::Restart => {
                self.cancel_timer();
                self.generation += 1;
                self.timer = Some(AutoplayTimer::start(
                    &self.runtime,
                    self.config.interval,
                    self.generation,
                    self.ticks.clone(),
                ));
            }
            TimerEffect::Cancel => self.cancel_timer(),
        }
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
    }
}

impl Drop for CarouselPreviewController {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shopdeck_core::BannerId;
    use tokio::sync::mpsc::{self, UnboundedReceiver};

    use super::*;
    use crate::banners::SequenceModel;
    use crate::models::BannerRecord;

    const INTERVAL: Duration = Duration::from_millis(3000);

    fn slides(n: i32) -> Vec<BannerItem> {
        SequenceModel::initialize(
            (1..=n)
                .map(|id| BannerRecord::new(BannerId::new(id), format!("banner-{id}")))
                .collect(),
        )
        .as_ordered_list()
        .to_vec()
    }

    fn controller() -> (CarouselPreviewController, UnboundedReceiver<AutoplayTick>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let config = CarouselConfig {
            interval: INTERVAL,
            autoplay_on_open: true,
        };
        (
            CarouselPreviewController::new(config, Handle::current(), tx),
            rx,
        )
    }

    fn drain(rx: &mut UnboundedReceiver<AutoplayTick>) -> Vec<AutoplayTick> {
        let mut ticks = Vec::new();
        while let Ok(tick) = rx.try_recv() {
            ticks.push(tick);
        }
        ticks
    }

    #[test]
    fn test_state_index_stays_in_bounds() {
        let events = [
            CarouselEvent::Previous,
            CarouselEvent::Previous,
            CarouselEvent::GoTo(-7),
            CarouselEvent::Next,
            CarouselEvent::GoTo(100),
            CarouselEvent::ToggleAutoplay,
            CarouselEvent::Tick,
            CarouselEvent::Tick,
            CarouselEvent::GoTo(i64::MIN),
            CarouselEvent::Next,
            CarouselEvent::GoTo(i64::MAX),
        ];
        for len in 1..6 {
            let (mut state, _) = CarouselState::open(len, true);
            for event in events {
                state = state.apply(event).0;
                assert!(state.current_index() < len, "{event:?} with {len} slides");
            }
        }
    }

    #[test]
    fn test_state_wraparound() {
        let (state, _) = CarouselState::open(3, false);
        let (state, _) = state.apply(CarouselEvent::Previous);
        assert_eq!(state.current_index(), 2);
        let (state, _) = state.apply(CarouselEvent::Next);
        assert_eq!(state.current_index(), 0);
        let (state, _) = state.apply(CarouselEvent::GoTo(-1));
        assert_eq!(state.current_index(), 2);
        let (state, _) = state.apply(CarouselEvent::GoTo(4));
        assert_eq!(state.current_index(), 1);
    }

    #[test]
    fn test_state_effects() {
        let (playing, effect) = CarouselState::open(3, true);
        assert_eq!(effect, TimerEffect::Start);
        assert_eq!(playing.apply(CarouselEvent::Tick).1, TimerEffect::Keep);
        assert_eq!(playing.apply(CarouselEvent::Next).1, TimerEffect::Restart);
        assert_eq!(playing.apply(CarouselEvent::GoTo(2)).1, TimerEffect::Restart);

        let (paused, effect) = playing.apply(CarouselEvent::ToggleAutoplay);
        assert_eq!(effect, TimerEffect::Cancel);
        assert!(!paused.is_playing());
        assert_eq!(paused.apply(CarouselEvent::Next).1, TimerEffect::Keep);
        assert_eq!(paused.apply(CarouselEvent::Tick).0, paused);

        let (resumed, effect) = paused.apply(CarouselEvent::ToggleAutoplay);
        assert_eq!(effect, TimerEffect::Start);
        assert!(resumed.is_playing());
    }

    #[test]
    fn test_state_single_and_empty() {
        for len in [0, 1] {
            let (state, effect) = CarouselState::open(len, true);
            assert!(!state.is_playing());
            assert_eq!(effect, TimerEffect::Keep);
            let (toggled, effect) = state.apply(CarouselEvent::ToggleAutoplay);
            assert_eq!(toggled, state);
            assert_eq!(effect, TimerEffect::Keep);
            assert_eq!(state.apply(CarouselEvent::Next).0.current_index(), 0);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_autoplay_advances_on_tick() {
        let (mut carousel, mut rx) = controller();
        carousel.open(&slides(3));
        assert!(carousel.is_playing());
        assert!(carousel.has_active_timer());

        for expected in [1, 2, 0] {
            let tick = rx.recv().await.unwrap();
            carousel.on_tick(tick);
            assert_eq!(carousel.current_index(), Some(expected));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_slide_never_plays() {
        let (mut carousel, mut rx) = controller();
        carousel.open(&slides(1));
        assert!(!carousel.is_playing());
        assert!(!carousel.has_active_timer());

        carousel.toggle_autoplay();
        carousel.next();
        assert!(!carousel.is_playing());
        assert_eq!(carousel.current_index(), Some(0));

        tokio::time::sleep(INTERVAL * 3).await;
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_navigation_while_playing_leaves_one_timer() {
        let (mut carousel, mut rx) = controller();
        carousel.open(&slides(4));
        for _ in 0..5 {
            carousel.next();
        }
        carousel.go_to(0);
        carousel.previous();
        assert_eq!(carousel.current_index(), Some(3));

        tokio::time::sleep(INTERVAL + Duration::from_millis(1)).await;
        let ticks = drain(&mut rx);
        assert_eq!(ticks.len(), 1);

        carousel.on_tick(ticks[0]);
        assert_eq!(carousel.current_index(), Some(0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_navigation_resets_interval() {
        let (mut carousel, mut rx) = controller();
        carousel.open(&slides(3));

        tokio::time::sleep(INTERVAL - Duration::from_millis(10)).await;
        carousel.next();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(drain(&mut rx).is_empty());

        tokio::time::sleep(INTERVAL).await;
        assert_eq!(drain(&mut rx).len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_cancels_timer() {
        let (mut carousel, mut rx) = controller();
        carousel.open(&slides(3));
        carousel.toggle_autoplay();
        assert!(!carousel.is_playing());
        assert!(!carousel.has_active_timer());

        tokio::time::sleep(INTERVAL * 5).await;
        assert!(drain(&mut rx).is_empty());
        assert_eq!(carousel.current_index(), Some(0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_tick_is_ignored() {
        let (mut carousel, mut rx) = controller();
        carousel.open(&slides(3));
        let stale = rx.recv().await.unwrap();

        carousel.next();
        assert_eq!(carousel.current_index(), Some(1));
        carousel.on_tick(stale);
        assert_eq!(carousel.current_index(), Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_discards_state_and_timer() {
        let (mut carousel, mut rx) = controller();
        carousel.open(&slides(3));
        let tick = rx.recv().await.unwrap();
        carousel.close();

        assert!(!carousel.is_open());
        assert!(!carousel.has_active_timer());
        assert!(carousel.current_banner().is_none());
        carousel.on_tick(tick);
        carousel.next();
        assert_eq!(carousel.current_index(), None);

        tokio::time::sleep(INTERVAL * 3).await;
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reopen_starts_from_first_slide() {
        let (mut carousel, _rx) = controller();
        carousel.open(&slides(3));
        carousel.go_to(2);
        carousel.open(&slides(2));
        assert_eq!(carousel.current_index(), Some(0));
        assert_eq!(
            carousel.current_banner().map(|banner| banner.id),
            Some(BannerId::new(1))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_timer() {
        let (mut carousel, mut rx) = controller();
        carousel.open(&slides(3));
        drop(carousel);

        tokio::time::sleep(INTERVAL * 3).await;
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_open_paused_when_autoplay_disabled() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let config = CarouselConfig {
            interval: INTERVAL,
            autoplay_on_open: false,
        };
        let mut carousel = CarouselPreviewController::new(config, Handle::current(), tx);
        carousel.open(&slides(3));
        assert!(!carousel.is_playing());
        carousel.toggle_autoplay();
        assert!(carousel.is_playing());
        assert!(carousel.has_active_timer());
    }
}
