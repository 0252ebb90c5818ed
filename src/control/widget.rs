// SPDX-License-Identifier: GPL-3.0-only

//! The capture control widget
//!
//! Owns the layout, the progress ticker, the interaction state and a weak
//! reference to its listener. Hosts feed it gestures, button clicks and
//! timer polls; it answers with listener notifications.

use super::animation::Transforms;
use super::geometry::{Layout, Point, Rect};
use super::interpreter::{
    self, Button, Effect, Gesture, Input, Snapshot, Transition, end_recording_effects,
};
use super::listener::{CaptureControlListener, ControlEvent, dispatch};
use super::state::{ControlState, RecordTime, Visibility};
use super::ticker::{Clock, RepeatingTask, TickOutcome, tick_outcome};
use crate::config::{ControlConfig, max_video_length};
use crate::constants::timing;
use std::rc::{Rc, Weak};
use std::time::Duration;
use tracing::{debug, info, trace, warn};

pub struct CaptureControl<C: Clock> {
    clock: C,
    layout: Layout,
    video_length: Duration,
    state: ControlState,
    visibility: Visibility,
    record_time: RecordTime,
    ring_fraction: f64,
    transforms: Transforms,
    ticker: Option<RepeatingTask>,
    listener: Option<Weak<dyn CaptureControlListener>>,
}

impl<C: Clock> CaptureControl<C> {
    /// Build the control inside `frame`
    ///
    /// # Panics
    ///
    /// Panics if the frame is empty, the video length is not a positive
    /// number below [`max_video_length`], or the shutter does not fit the
    /// frame. These are
    /// construction bugs; load configuration through
    /// [`ControlConfig::validate`] to reject bad values earlier.
    pub fn new(frame: Rect, config: &ControlConfig, clock: C) -> Self {
        assert!(
            frame.width() > 0.0 && frame.height() > 0.0,
            "capture control frame must not be empty: {frame:?}"
        );
        assert!(
            config.video_length > 0.0
                && config.video_length < max_video_length().as_secs_f64(),
            "video length must be positive and below the tick limit, got {}",
            config.video_length
        );
        assert!(
            config.camera_button_width > 0.0
                && config.camera_button_width <= frame.width()
                && config.camera_button_width <= frame.height(),
            "shutter width {} does not fit frame {frame:?}",
            config.camera_button_width
        );

        let layout = Layout::new(frame, config.camera_button_width);
        debug!(
            video_length = config.video_length,
            button_width = config.camera_button_width,
            "Capture control created"
        );

        Self {
            clock,
            transforms: Transforms::new(&layout),
            layout,
            video_length: Duration::from_secs_f64(config.video_length),
            state: ControlState::Idle,
            visibility: Visibility::primary(),
            record_time: RecordTime::ZERO,
            ring_fraction: 0.0,
            ticker: None,
            listener: None,
        }
    }

    /// Attach the listener without taking ownership of it
    pub fn set_listener<L>(&mut self, listener: &Rc<L>)
    where
        L: CaptureControlListener + 'static,
    {
        let listener: Rc<dyn CaptureControlListener> = listener.clone();
        self.listener = Some(Rc::downgrade(&listener));
    }

    pub fn clear_listener(&mut self) {
        self.listener = None;
    }

    pub fn handle_gesture(&mut self, gesture: Gesture) {
        self.handle(Input::Gesture(gesture));
    }

    pub fn click(&mut self, button: Button) {
        self.handle(Input::Click(button));
    }

    /// Reveal retake and confirm once the capture output is ready
    pub fn show_complete_animation(&mut self) {
        if self.state != ControlState::Captured {
            warn!(state = ?self.state, "Complete animation requested outside of a capture");
            return;
        }
        self.visibility.set_post_capture(true);
        let now = self.clock.now();
        self.transforms.play_complete(&self.layout, now);
        debug!("Post-capture controls revealed");
    }

    /// Run every ticker tick that is due
    ///
    /// Returns the number of ticks that fired. Stops early when a tick ends
    /// the recording, so overdue ticks never touch state after the stop.
    pub fn poll_timers(&mut self) -> u32 {
        let now = self.clock.now();
        let mut fired = 0;
        while let Some(ticker) = self.ticker.as_mut() {
            if !ticker.poll(now) {
                break;
            }
            fired += 1;
            self.tick();
        }
        fired
    }

    fn tick(&mut self) {
        self.record_time.advance();
        match tick_outcome(self.record_time, self.video_length) {
            TickOutcome::Progress(progress) => {
                trace!(ticks = self.record_time.ticks(), progress, "Recording tick");
                self.ring_fraction = progress;
            }
            TickOutcome::LimitExceeded => {
                info!(
                    elapsed = self.record_time.as_secs_f64(),
                    "Recording reached the length limit"
                );
                self.apply(Transition {
                    next: ControlState::Captured,
                    effects: end_recording_effects(),
                });
            }
        }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state,
            ticker_active: self.ticker.is_some(),
            retake_visible: self.visibility.retake,
            confirm_visible: self.visibility.confirm,
            switch_camera_visible: self.visibility.switch_camera,
            exit_visible: self.visibility.exit,
        }
    }

    fn handle(&mut self, input: Input) {
        let transition = interpreter::interpret(&self.snapshot(), input);
        if transition.is_noop(self.state) {
            trace!(?input, state = ?self.state, "Input ignored");
            return;
        }
        self.apply(transition);
    }

    fn apply(&mut self, transition: Transition) {
        if transition.next != self.state {
            debug!(from = ?self.state, to = ?transition.next, "Capture control transition");
        }
        self.state = transition.next;

        for effect in transition.effects {
            match effect {
                Effect::Notify(event) => self.notify(event),
                Effect::StartTicker => {
                    // Replacing a live task would double-schedule; the
                    // interpreter never asks for that
                    if self.ticker.is_none() {
                        self.ticker =
                            Some(RepeatingTask::start(timing::TICK_INTERVAL, self.clock.now()));
                        info!("Recording started");
                    }
                }
                Effect::StopTicker => {
                    if self.ticker.take().is_some() {
                        info!(
                            elapsed = self.record_time.as_secs_f64(),
                            "Recording stopped"
                        );
                    }
                }
                Effect::HidePrimaryControls => self.visibility.set_primary(false),
                Effect::ShowPrimaryControls => self.visibility.set_primary(true),
                Effect::HidePostCaptureControls => self.visibility.set_post_capture(false),
                Effect::ResetPostCaptureFrames => self.transforms.reset_post_capture(&self.layout),
                Effect::PlayRecordingScale => {
                    let now = self.clock.now();
                    self.transforms.play_recording_scale(now);
                }
                Effect::ResetTransforms => self.transforms.reset_scale(),
                Effect::ResetProgress => self.ring_fraction = 0.0,
                Effect::ResetRecordTime => self.record_time.reset(),
            }
        }
    }

    fn notify(&self, event: ControlEvent) {
        match self.listener.as_ref().and_then(Weak::upgrade) {
            Some(listener) => {
                debug!(?event, "Notifying listener");
                dispatch(listener.as_ref(), event);
            }
            None => trace!(?event, "No listener attached, event dropped"),
        }
    }

    pub fn state(&self) -> ControlState {
        self.state
    }

    pub fn is_recording(&self) -> bool {
        self.ticker.is_some()
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn record_time(&self) -> RecordTime {
        self.record_time
    }

    pub fn video_length(&self) -> Duration {
        self.video_length
    }

    /// Elapsed fraction of the length limit
    pub fn progress(&self) -> f64 {
        self.record_time.progress(self.video_length)
    }

    /// Filled fraction currently drawn on the ring
    pub fn ring_fraction(&self) -> f64 {
        self.ring_fraction
    }

    pub fn transforms(&self) -> &Transforms {
        &self.transforms
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Current frame of the retake button, following its slide animation
    pub fn retake_frame(&self) -> Rect {
        let x = self.transforms.retake_x.value_at(self.clock.now());
        self.layout.post_capture_rest().with_x(x)
    }

    /// Current frame of the confirm button, following its slide animation
    pub fn confirm_frame(&self) -> Rect {
        let x = self.transforms.confirm_x.value_at(self.clock.now());
        self.layout.post_capture_rest().with_x(x)
    }

    /// Visible auxiliary button under `point`, if any
    pub fn hit_test(&self, point: Point) -> Option<Button> {
        let candidates = [
            (self.visibility.retake, self.retake_frame(), Button::Retake),
            (self.visibility.confirm, self.confirm_frame(), Button::Confirm),
            (
                self.visibility.switch_camera,
                self.layout.switch_camera,
                Button::SwitchCamera,
            ),
            (self.visibility.exit, self.layout.exit, Button::Exit),
        ];
        candidates
            .into_iter()
            .find(|(visible, frame, _)| *visible && frame.contains(point))
            .map(|(_, _, button)| button)
    }
}

impl<C: Clock> Drop for CaptureControl<C> {
    fn drop(&mut self) {
        if self.ticker.take().is_some() {
            debug!("Capture control dropped while recording, ticker cancelled");
        }
    }
}
