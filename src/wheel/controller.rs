//! Spin controller
//!
//! Owns the wheel state and is the only thing that mutates it. State changes
//! happen at exactly two points: synchronously when a spin starts, and when
//! the settle timer fires inside `advance`.

use serde::{Deserialize, Serialize};

use super::spin::{SpinPlan, WinningValue, plan_spin};
use super::state::{SpinEvent, SpinPhase, SpinState};
use super::timer::{TimerHandle, TimerQueue};
use super::trigger::{ForcedValue, choose_winning_value};
use crate::consts::*;
use crate::easing::CubicBezier;
use crate::error::{SettingsError, SpinError};
use crate::rng::{EntropySource, RandomSelector};

/// Tunables for a spin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpinConfig {
    /// Pointer position, degrees clockwise from 12 o'clock, in [0, 360]
    pub pointer_angle: f64,
    pub min_turns: u32,
    pub max_turns: u32,
    pub animation_ms: u32,
    /// Result is published this long after the spin starts
    pub settle_ms: u32,
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            pointer_angle: DEFAULT_POINTER_ANGLE,
            min_turns: MIN_TURNS,
            max_turns: MAX_TURNS,
            animation_ms: SPIN_ANIMATION_MS,
            settle_ms: SETTLE_DELAY_MS,
        }
    }
}

impl SpinConfig {
    /// Check the ranges that keep every spin turning forwards
    pub fn validate(&self) -> Result<(), SettingsError> {
        let invalid = |field, reason: &str| {
            Err(SettingsError::Invalid {
                field,
                reason: reason.to_string(),
            })
        };

        if !(0.0..=360.0).contains(&self.pointer_angle) {
            return invalid("pointer_angle", "must be within 0..=360 degrees");
        }
        // The offset term can reach -720 degrees
        if self.min_turns < 2 {
            return invalid("min_turns", "must be at least 2");
        }
        if self.min_turns > self.max_turns {
            return invalid("max_turns", "must not be below min_turns");
        }
        if self.animation_ms == 0 {
            return invalid("animation_ms", "must be positive");
        }
        if self.settle_ms < self.animation_ms {
            return invalid("settle_ms", "must not be shorter than animation_ms");
        }
        Ok(())
    }
}

/// What a spin request did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpinOutcome {
    Started(SpinPlan),
    /// A spin was already running; nothing changed
    Busy,
}

#[derive(Debug, Clone, Copy)]
struct ActiveSpin {
    plan: SpinPlan,
    timer: TimerHandle,
    started_ms: u64,
}

type SettledCallback = Box<dyn FnMut(WinningValue)>;

pub struct SpinController<S> {
    config: SpinConfig,
    selector: RandomSelector<S>,
    state: SpinState,
    timers: TimerQueue,
    active: Option<ActiveSpin>,
    events: Vec<SpinEvent>,
    on_settled: Option<SettledCallback>,
}

impl<S: EntropySource> SpinController<S> {
    /// Fails if `config` could let a spin turn backwards
    pub fn new(config: SpinConfig, source: S) -> Result<Self, SettingsError> {
        config.validate()?;
        Ok(Self {
            config,
            selector: RandomSelector::new(source),
            state: SpinState::default(),
            timers: TimerQueue::new(),
            active: None,
            events: Vec::new(),
            on_settled: None,
        })
    }

    /// Spin so the wheel comes to rest on `value`.
    ///
    /// Ignored (returns `Busy`) while another spin is running. Fails only if
    /// the entropy source cannot supply the turn count.
    pub fn spin_to(&mut self, value: WinningValue) -> Result<SpinOutcome, SpinError> {
        if self.state.is_spinning() {
            log::debug!("Spin to {} ignored: wheel already spinning", value);
            return Ok(SpinOutcome::Busy);
        }

        let turns = self
            .selector
            .draw_uniform(self.config.min_turns, self.config.max_turns)?;
        let plan = plan_spin(value, turns, self.config.pointer_angle, self.state.rotation);

        self.state.begin(&plan);
        let timer = self.timers.schedule(self.config.settle_ms);
        self.active = Some(ActiveSpin {
            plan,
            timer,
            started_ms: self.timers.now_ms(),
        });
        self.events.push(SpinEvent::Started {
            plan,
            animation_ms: self.config.animation_ms,
        });

        log::info!(
            "Spin started: value={} turns={} rotation {:.3} -> {:.3}",
            value,
            turns,
            plan.from,
            plan.to
        );
        Ok(SpinOutcome::Started(plan))
    }

    /// Pick the winning value (forced or drawn) and spin to it.
    ///
    /// The busy check comes first, so a re-trigger during a spin is silent
    /// even with a bad forced value.
    pub fn trigger(&mut self, forced: Option<&ForcedValue>) -> Result<SpinOutcome, SpinError> {
        if self.state.is_spinning() {
            log::debug!("Trigger ignored: wheel already spinning");
            return Ok(SpinOutcome::Busy);
        }

        let value = choose_winning_value(forced, &mut self.selector).inspect_err(|e| match e {
            SpinError::InvalidForcedValue { .. } => log::warn!("{}", e),
            _ => log::error!("Cannot pick winning value: {}", e),
        })?;
        self.spin_to(value)
    }

    /// Advance virtual time. Returns the value if a spin settled.
    pub fn advance(&mut self, dt_ms: u64) -> Option<WinningValue> {
        let mut settled = None;
        for handle in self.timers.advance(dt_ms) {
            if let Some(value) = self.fire(handle) {
                settled = Some(value);
            }
        }
        settled
    }

    fn fire(&mut self, handle: TimerHandle) -> Option<WinningValue> {
        let active = self.active.filter(|a| a.timer == handle)?;
        self.active = None;

        let value = active.plan.value;
        self.state.settle(value);
        self.events.push(SpinEvent::Settled {
            value,
            rotation: self.state.rotation,
        });
        log::info!("Spin settled on {}", value);

        if let Some(callback) = self.on_settled.as_mut() {
            callback(value);
        }
        Some(value)
    }

    /// Register a callback run each time a spin settles
    pub fn on_settled(&mut self, callback: impl FnMut(WinningValue) + 'static) {
        self.on_settled = Some(Box::new(callback));
    }

    /// Take queued events
    pub fn drain_events(&mut self) -> Vec<SpinEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn state(&self) -> &SpinState {
        &self.state
    }

    pub fn rotation(&self) -> f64 {
        self.state.rotation
    }

    pub fn phase(&self) -> SpinPhase {
        self.state.phase
    }

    pub fn is_spinning(&self) -> bool {
        self.state.is_spinning()
    }

    pub fn result(&self) -> Option<WinningValue> {
        self.state.result
    }

    pub fn config(&self) -> &SpinConfig {
        &self.config
    }

    /// Settle timer of the running spin, if any
    pub fn pending_timer(&self) -> Option<TimerHandle> {
        self.active.map(|a| a.timer)
    }

    /// Milliseconds until the running spin settles
    pub fn time_until_settled(&self) -> Option<u64> {
        self.active.and_then(|a| self.timers.time_until(a.timer))
    }

    /// Animation progress of the running spin in [0, 1]
    pub fn animation_progress(&self) -> Option<f64> {
        self.active.map(|a| {
            let elapsed = self.timers.now_ms().saturating_sub(a.started_ms) as f64;
            (elapsed / f64::from(self.config.animation_ms.max(1))).min(1.0)
        })
    }

    /// Rotation to draw right now, for hosts that animate the wheel themselves
    pub fn displayed_rotation(&self, easing: &CubicBezier) -> f64 {
        match (self.active, self.animation_progress()) {
            (Some(a), Some(t)) => a.plan.from + a.plan.delta * easing.ease(t),
            _ => self.state.rotation,
        }
    }

    /// Selector shared with the controller (session nonce, etc.)
    pub fn selector_mut(&mut self) -> &mut RandomSelector<S> {
        &mut self.selector
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EntropyError, SelectorError};
    use crate::rng::SeededEntropy;
    use crate::wheel::wedge_under_pointer;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn controller() -> SpinController<SeededEntropy> {
        SpinController::new(SpinConfig::default(), SeededEntropy::new(12345)).unwrap()
    }

    fn value(v: u32) -> WinningValue {
        WinningValue::new(v).unwrap()
    }

    /// Returns a fixed word forever
    struct Constant(u32);

    impl EntropySource for Constant {
        fn next_u32(&mut self) -> Result<u32, EntropyError> {
            Ok(self.0)
        }
    }

    #[test]
    fn test_rejects_config_that_could_spin_backwards() {
        let bad = [
            SpinConfig { min_turns: 0, max_turns: 0, ..SpinConfig::default() },
            SpinConfig { min_turns: 1, max_turns: 1, ..SpinConfig::default() },
            SpinConfig { pointer_angle: -500.0, min_turns: 2, max_turns: 2, ..SpinConfig::default() },
            SpinConfig { pointer_angle: f64::NAN, ..SpinConfig::default() },
            SpinConfig { min_turns: 8, max_turns: 6, ..SpinConfig::default() },
            SpinConfig { settle_ms: 10, ..SpinConfig::default() },
        ];
        for config in bad {
            assert!(
                matches!(
                    SpinController::new(config, SeededEntropy::new(1)),
                    Err(SettingsError::Invalid { .. })
                ),
                "accepted {:?}",
                config
            );
        }
    }

    #[test]
    fn test_minimal_valid_config_still_turns_forwards() {
        // Worst case: pointer at 0, two turns, wedge 100, wheel resting just under 360
        let config = SpinConfig {
            pointer_angle: 0.0,
            min_turns: 2,
            max_turns: 2,
            ..SpinConfig::default()
        };
        let mut c = SpinController::new(config, SeededEntropy::new(4)).unwrap();
        let mut last = c.rotation();
        for v in [1, 100, 100, 1, 50] {
            c.spin_to(value(v)).unwrap();
            assert!(c.rotation() > last);
            last = c.rotation();
            c.advance(u64::from(SETTLE_DELAY_MS));
            assert_eq!(wedge_under_pointer(c.rotation(), 0.0).label(), v);
        }
    }

    #[test]
    fn test_time_until_settled_ignores_other_timers() {
        let mut c = controller();
        // Another timer on the same queue that fires sooner
        let other = c.timers.schedule(100);
        c.spin_to(value(8)).unwrap();
        assert_eq!(c.time_until_settled(), Some(u64::from(SETTLE_DELAY_MS)));

        c.advance(100);
        assert!(!c.timers.is_pending(other));
        assert_eq!(c.time_until_settled(), Some(u64::from(SETTLE_DELAY_MS) - 100));
    }

    #[test]
    fn test_initial_state() {
        let c = controller();
        assert_eq!(c.rotation(), 0.0);
        assert_eq!(c.phase(), SpinPhase::Idle);
        assert_eq!(c.result(), None);
        assert_eq!(c.pending_timer(), None);
    }

    #[test]
    fn test_spin_settles_after_fixed_delay() {
        let mut c = controller();
        let outcome = c.spin_to(value(42)).unwrap();
        assert!(matches!(outcome, SpinOutcome::Started(_)));
        assert!(c.is_spinning());
        assert_eq!(c.result(), None);
        assert_eq!(c.time_until_settled(), Some(u64::from(SETTLE_DELAY_MS)));

        assert_eq!(c.advance(u64::from(SETTLE_DELAY_MS) - 1), None);
        assert!(c.is_spinning());

        assert_eq!(c.advance(1), Some(value(42)));
        assert!(!c.is_spinning());
        assert_eq!(c.result(), Some(value(42)));
        assert_eq!(c.state().spins, 1);
    }

    #[test]
    fn test_worked_example_with_forced_turns() {
        // Word 0 -> turns = min_turns = 6
        let mut c = SpinController::new(SpinConfig::default(), Constant(0)).unwrap();
        let SpinOutcome::Started(plan) = c.spin_to(value(1)).unwrap() else {
            panic!("spin did not start");
        };
        assert_eq!(plan.turns, 6);
        assert!((c.rotation() - 2428.2).abs() < 1e-9);

        c.advance(u64::from(SETTLE_DELAY_MS));
        assert_eq!(c.result(), Some(value(1)));
    }

    #[test]
    fn test_every_value_settles_on_itself() {
        let mut c = controller();
        for v in 1..=100 {
            c.spin_to(value(v)).unwrap();
            c.advance(u64::from(SETTLE_DELAY_MS));
            assert_eq!(c.result(), Some(value(v)));
            assert_eq!(
                wedge_under_pointer(c.rotation(), DEFAULT_POINTER_ANGLE).label(),
                v
            );
        }
    }

    #[test]
    fn test_spin_while_spinning_is_noop() {
        let mut c = controller();
        c.spin_to(value(10)).unwrap();
        c.drain_events();
        let rotation = c.rotation();

        c.advance(1000);
        assert_eq!(c.spin_to(value(90)).unwrap(), SpinOutcome::Busy);
        assert_eq!(c.trigger(None).unwrap(), SpinOutcome::Busy);
        assert_eq!(c.rotation(), rotation);
        assert_eq!(c.result(), None);
        assert!(c.drain_events().is_empty());

        c.advance(u64::from(SETTLE_DELAY_MS));
        assert_eq!(c.result(), Some(value(10)));
    }

    #[test]
    fn test_rotation_strictly_increasing() {
        let mut c = controller();
        let mut last = c.rotation();
        for v in [100, 1, 50, 50, 99, 2] {
            c.spin_to(value(v)).unwrap();
            assert!(c.rotation() > last);
            last = c.rotation();
            c.advance(u64::from(SETTLE_DELAY_MS));
            assert_eq!(c.rotation(), last);
        }
    }

    #[test]
    fn test_turns_within_configured_range() {
        let mut c = controller();
        for _ in 0..50 {
            let SpinOutcome::Started(plan) = c.spin_to(value(7)).unwrap() else {
                panic!("spin did not start");
            };
            assert!((MIN_TURNS..=MAX_TURNS).contains(&plan.turns));
            c.advance(u64::from(SETTLE_DELAY_MS));
        }
    }

    #[test]
    fn test_events_and_callback() {
        let mut c = controller();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        c.on_settled(move |v| sink.borrow_mut().push(v.get()));

        c.spin_to(value(5)).unwrap();
        c.advance(u64::from(SETTLE_DELAY_MS));

        let events = c.drain_events();
        assert_eq!(events.len(), 2);
        assert!(matches!(
            events[0],
            SpinEvent::Started { animation_ms: SPIN_ANIMATION_MS, .. }
        ));
        assert!(matches!(events[1], SpinEvent::Settled { value: v, .. } if v.get() == 5));
        assert_eq!(*seen.borrow(), vec![5]);
    }

    #[test]
    fn test_invalid_forced_value_leaves_state_untouched() {
        let mut c = controller();
        for input in ["0", "101", "abc", ""] {
            let forced = ForcedValue::new(input);
            let err = c.trigger(Some(&forced)).unwrap_err();
            assert!(matches!(err, SpinError::InvalidForcedValue { .. }));
            assert!(!c.is_spinning());
            assert_eq!(c.rotation(), 0.0);
            assert_eq!(c.result(), None);
        }
        assert!(c.drain_events().is_empty());
    }

    #[test]
    fn test_forced_trigger_lands_on_forced_value() {
        let mut c = controller();
        let forced = ForcedValue::new("77");
        c.trigger(Some(&forced)).unwrap();
        c.advance(u64::from(SETTLE_DELAY_MS));
        assert_eq!(c.result(), Some(value(77)));
    }

    #[test]
    fn test_random_trigger_settles_in_range() {
        let mut c = controller();
        for _ in 0..20 {
            c.trigger(None).unwrap();
            let v = c.advance(u64::from(SETTLE_DELAY_MS)).unwrap();
            assert!((1..=100).contains(&v.get()));
        }
    }

    #[test]
    fn test_stuck_entropy_is_fatal_and_stateless() {
        let mut c = SpinController::new(SpinConfig::default(), Constant(u32::MAX)).unwrap();
        let err = c.spin_to(value(3)).unwrap_err();
        assert!(err.is_fatal());
        assert!(matches!(
            err,
            SpinError::Selector(SelectorError::Entropy(EntropyError::Exhausted { .. }))
        ));
        assert!(!c.is_spinning());
        assert_eq!(c.rotation(), 0.0);
    }

    #[test]
    fn test_displayed_rotation_tracks_animation() {
        let mut c = controller();
        let ease = CubicBezier::linear();
        c.spin_to(value(20)).unwrap();
        let target = c.rotation();

        assert_eq!(c.displayed_rotation(&ease), 0.0);
        c.advance(u64::from(SPIN_ANIMATION_MS) / 2);
        let mid = c.displayed_rotation(&ease);
        assert!((mid - target / 2.0).abs() < 1e-6);

        c.advance(u64::from(SPIN_ANIMATION_MS));
        assert_eq!(c.animation_progress(), None);
        assert_eq!(c.displayed_rotation(&ease), target);
    }
}
