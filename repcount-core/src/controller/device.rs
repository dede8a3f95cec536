//! The control loop
//!
//! Each [`DeviceController::step`] samples the button once, redraws the
//! count (and the sprite when its frame is due), flushes, and checks the
//! idle timer. The only blocking point is the suspend call made when the
//! idle timer fires in [`SleepMode::Suspend`].

use core::fmt::Write;

use heapless::String;
use repcount_hal::{elapsed_ms, InputPin, MonotonicClock, PowerControl, Timestamp, WakeEdge};

use crate::animation::{FrameKind, FrameScheduler};
use crate::config::{DeviceConfig, SleepMode};
use crate::input::{Debouncer, Edge};
use crate::layout::{
    ANIMATION_REGION, COUNTER_MAX_SHOWN, COUNTER_ORIGIN, COUNTER_REGION, SCREEN_REGION,
    SPRITE_ORIGIN, SPRITE_SIZE,
};
use crate::power::IdleTimer;
use crate::state::{DeviceState, Event};
use crate::traits::display::{Color, DisplayCanvas, DisplayError};

use super::counter::Counter;
use super::report::StepReport;

/// Digits in `u32::MAX`
const COUNT_TEXT_LEN: usize = 10;

/// Text drawn in the counter column, capped at what the column holds
fn count_text(count: u32) -> String<COUNT_TEXT_LEN> {
    let mut text = String::new();
    // Cannot overflow: a u32 has at most ten digits
    let _ = write!(text, "{}", count.min(COUNTER_MAX_SHOWN));
    text
}

/// Device controller
///
/// Generic over the board capabilities so the same loop runs on the RP2040
/// and against mocks on the host.
pub struct DeviceController<C, B, D, P> {
    config: DeviceConfig,
    clock: C,
    button: B,
    display: D,
    power: P,
    state: DeviceState,
    counter: Counter,
    debouncer: Debouncer,
    frames: FrameScheduler,
    idle: IdleTimer,
    /// Start of the window in which a press is taken to be the wake press
    wake_guard_from: Option<Timestamp>,
}

impl<C, B, D, P> DeviceController<C, B, D, P>
where
    C: MonotonicClock,
    B: InputPin,
    D: DisplayCanvas,
    P: PowerControl,
{
    /// Create a controller in the `Booting` state
    pub fn new(config: DeviceConfig, clock: C, button: B, display: D, power: P) -> Self {
        let now = clock.now_ms();
        let timing = config.timing;

        Self {
            debouncer: Debouncer::new(config.initial_level, now, timing.debounce_ms),
            frames: FrameScheduler::new(now, timing.frame_interval_ms),
            idle: IdleTimer::new(now, timing.sleep_interval_ms),
            state: DeviceState::Booting,
            counter: Counter::new(),
            wake_guard_from: None,
            config,
            clock,
            button,
            display,
            power,
        }
    }

    /// Initialize the display and draw the first screen
    ///
    /// A failure here is fatal: the controller halts and every later
    /// [`step`](Self::step) does nothing.
    pub fn boot(&mut self) -> Result<(), DisplayError> {
        if self.state.is_halted() {
            return Err(DisplayError::NotInitialized);
        }
        if self.state != DeviceState::Booting {
            return Ok(());
        }

        if let Err(e) = self.display.init() {
            self.transition(Event::DisplayInitFailed);
            return Err(e);
        }

        let now = self.clock.now_ms();
        self.idle.touch(now);
        self.frames.restart(now);
        self.transition(Event::BootComplete);
        self.redraw();

        Ok(())
    }

    /// Run one control-loop iteration
    pub fn step(&mut self) -> StepReport {
        let mut report = StepReport::default();

        match self.state {
            DeviceState::Awake => self.step_awake(&mut report),
            DeviceState::Sleeping => self.step_display_off(&mut report),
            DeviceState::Booting | DeviceState::Halted => {}
        }

        report
    }

    fn step_awake(&mut self, report: &mut StepReport) {
        let now = self.clock.now_ms();
        let raw = self.button.is_high();

        if let Some(edge) = self.debouncer.sample(raw, now) {
            report.edge = Some(edge);
            self.idle.touch(now);

            if edge == Edge::Rose {
                if self.in_wake_guard(now) {
                    self.wake_guard_from = None;
                    report.wake_press_ignored = true;
                } else if self.state.counts_presses() && !self.idle.is_asleep() {
                    self.counter.increment();
                    report.counted = true;
                }
            }
        }
        if !self.in_wake_guard(now) {
            self.wake_guard_from = None;
        }

        if let Some(frame) = self.frames.tick(now) {
            self.draw_frame(frame);
            report.frame = Some(frame);
        }
        self.draw_count();
        self.display.flush().ok();

        if self.idle.check_timeout(now) {
            self.sleep(report);
        }
    }

    /// Sleeping with the processor still running (`SleepMode::DisplayOff`)
    ///
    /// Nothing is drawn. The first confirmed edge wakes the panel and is
    /// not counted.
    fn step_display_off(&mut self, report: &mut StepReport) {
        let now = self.clock.now_ms();
        let raw = self.button.is_high();

        if let Some(edge) = self.debouncer.sample(raw, now) {
            report.edge = Some(edge);
            report.wake_press_ignored = edge == Edge::Rose;
            self.wake(now, report);
        }
    }

    fn sleep(&mut self, report: &mut StepReport) {
        report.slept = true;
        self.display.set_power(false).ok();
        self.transition(Event::IdleTimeout);

        if self.config.sleep_mode == SleepMode::Suspend {
            let wake = self.config.wake;
            self.power
                .suspend_until_wake_edge(wake.pin, WakeEdge::for_press(wake.inverted));
            self.resume_from_suspend(report);
        }
    }

    fn resume_from_suspend(&mut self, report: &mut StepReport) {
        let now = self.clock.now_ms();
        let raw = self.button.is_high();

        // A press still held is absorbed here. One that is bouncing or
        // already released can still commit a Rose, which the guard eats.
        self.debouncer.resync(raw, now);
        self.wake_guard_from = (self.config.shares_wake_pin() && !raw).then_some(now);

        self.wake(now, report);
    }

    fn wake(&mut self, now: Timestamp, report: &mut StepReport) {
        self.idle.wake(now);
        self.frames.restart(now);
        self.display.set_power(true).ok();
        self.transition(Event::Woken);
        self.redraw();
        report.woke = true;
    }

    fn in_wake_guard(&self, now: Timestamp) -> bool {
        self.wake_guard_from
            .is_some_and(|from| elapsed_ms(now, from) < self.config.timing.wake_guard_ms)
    }

    /// Full screen: current frame and count
    fn redraw(&mut self) {
        self.display.clear_region(SCREEN_REGION).ok();
        self.display
            .draw_bitmap(SPRITE_ORIGIN, self.frames.current(), SPRITE_SIZE, Color::On)
            .ok();
        self.draw_count();
        self.display.flush().ok();
    }

    fn draw_frame(&mut self, frame: FrameKind) {
        self.display.clear_region(ANIMATION_REGION).ok();
        self.display
            .draw_bitmap(SPRITE_ORIGIN, frame, SPRITE_SIZE, Color::On)
            .ok();
    }

    fn draw_count(&mut self) {
        let text = count_text(self.counter.get());

        self.display.clear_region(COUNTER_REGION).ok();
        self.display
            .draw_text(COUNTER_ORIGIN, text.as_str(), Color::On)
            .ok();
    }

    fn transition(&mut self, event: Event) {
        self.state = self.state.transition(event);
    }

    /// Presses counted since power-on
    pub fn count(&self) -> u32 {
        self.counter.get()
    }

    /// Current lifecycle state
    pub fn state(&self) -> DeviceState {
        self.state
    }

    /// Frame currently on screen
    pub fn frame(&self) -> FrameKind {
        self.frames.current()
    }

    /// Between an idle timeout and the following wake
    pub fn is_asleep(&self) -> bool {
        self.idle.is_asleep()
    }

    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn power(&self) -> &P {
        &self.power
    }

    /// Give the capabilities back
    pub fn release(self) -> (C, B, D, P) {
        (self.clock, self.button, self.display, self.power)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::config::PinConfig;
    use crate::traits::display::{Point, Region, Size};
    use core::cell::Cell;
    use std::vec::Vec;

    #[derive(Debug, Clone, PartialEq)]
    enum Cmd {
        Init,
        Clear(Region),
        Bitmap(FrameKind),
        Text(heapless::String<16>),
        Power(bool),
        Flush,
    }

    #[derive(Default)]
    struct Recorder {
        cmds: Vec<Cmd>,
        fail_init: bool,
    }

    impl Recorder {
        fn texts(&self) -> Vec<&str> {
            self.cmds
                .iter()
                .filter_map(|c| match c {
                    Cmd::Text(t) => Some(t.as_str()),
                    _ => None,
                })
                .collect()
        }
    }

    impl DisplayCanvas for Recorder {
        fn init(&mut self) -> Result<(), DisplayError> {
            self.cmds.push(Cmd::Init);
            if self.fail_init {
                Err(DisplayError::InitFailed)
            } else {
                Ok(())
            }
        }

        fn clear_region(&mut self, region: Region) -> Result<(), DisplayError> {
            self.cmds.push(Cmd::Clear(region));
            Ok(())
        }

        fn draw_bitmap(
            &mut self,
            _origin: Point,
            frame: FrameKind,
            _size: Size,
            _color: Color,
        ) -> Result<(), DisplayError> {
            self.cmds.push(Cmd::Bitmap(frame));
            Ok(())
        }

        fn draw_text(&mut self, _origin: Point, text: &str, _color: Color) -> Result<(), DisplayError> {
            let mut owned = heapless::String::new();
            owned.push_str(text).ok();
            self.cmds.push(Cmd::Text(owned));
            Ok(())
        }

        fn set_power(&mut self, on: bool) -> Result<(), DisplayError> {
            self.cmds.push(Cmd::Power(on));
            Ok(())
        }

        fn flush(&mut self) -> Result<(), DisplayError> {
            self.cmds.push(Cmd::Flush);
            Ok(())
        }
    }

    fn text(s: &str) -> Cmd {
        let mut owned = heapless::String::new();
        owned.push_str(s).unwrap();
        Cmd::Text(owned)
    }

    /// Shared world the mocks read and write
    struct Rig {
        now: Cell<u32>,
        level: Cell<bool>,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                now: Cell::new(0),
                level: Cell::new(false),
            }
        }
    }

    struct TestClock<'a>(&'a Cell<u32>);

    impl MonotonicClock for TestClock<'_> {
        fn now_ms(&self) -> Timestamp {
            self.0.get()
        }
    }

    struct TestPin<'a>(&'a Cell<bool>);

    impl InputPin for TestPin<'_> {
        fn is_high(&self) -> bool {
            self.0.get()
        }
    }

    /// Suspend that "sleeps" by jumping the clock
    struct TestPower<'a> {
        rig: &'a Rig,
        sleep_for_ms: u32,
        /// Button level when the core resumes (None: leave it alone)
        level_on_wake: Option<bool>,
        suspends: Vec<(u8, WakeEdge)>,
    }

    impl PowerControl for TestPower<'_> {
        fn suspend_until_wake_edge(&mut self, pin: u8, edge: WakeEdge) {
            self.suspends.push((pin, edge));
            self.rig.now.set(self.rig.now.get() + self.sleep_for_ms);
            if let Some(level) = self.level_on_wake {
                self.rig.level.set(level);
            }
        }
    }

    type TestController<'a> = DeviceController<TestClock<'a>, TestPin<'a>, Recorder, TestPower<'a>>;

    const STEP_MS: u32 = 5;
    const SLEEP_FOR_MS: u32 = 60_000;

    fn controller(rig: &Rig, config: DeviceConfig, level_on_wake: Option<bool>) -> TestController<'_> {
        DeviceController::new(
            config,
            TestClock(&rig.now),
            TestPin(&rig.level),
            Recorder::default(),
            TestPower {
                rig,
                sleep_for_ms: SLEEP_FOR_MS,
                level_on_wake,
                suspends: Vec::new(),
            },
        )
    }

    fn booted(rig: &Rig, config: DeviceConfig, level_on_wake: Option<bool>) -> TestController<'_> {
        let mut ctl = controller(rig, config, level_on_wake);
        ctl.boot().unwrap();
        ctl.display_mut().cmds.clear();
        ctl
    }

    /// Step every `STEP_MS` until the clock reaches `to`
    fn advance(ctl: &mut TestController<'_>, rig: &Rig, to: u32) -> Vec<StepReport> {
        let mut reports = Vec::new();
        while rig.now.get() + STEP_MS <= to {
            rig.now.set(rig.now.get() + STEP_MS);
            reports.push(ctl.step());
        }
        reports
    }

    /// Hold the button for `hold_ms`, then release for `gap_ms`
    fn press(ctl: &mut TestController<'_>, rig: &Rig, hold_ms: u32, gap_ms: u32) -> Vec<StepReport> {
        rig.level.set(true);
        let mut reports = advance(ctl, rig, rig.now.get() + hold_ms);
        rig.level.set(false);
        reports.extend(advance(ctl, rig, rig.now.get() + gap_ms));
        reports
    }

    #[test]
    fn test_boot_draws_first_screen() {
        let rig = Rig::new();
        let mut ctl = controller(&rig, DeviceConfig::default(), None);
        assert_eq!(ctl.state(), DeviceState::Booting);

        ctl.boot().unwrap();
        assert_eq!(ctl.state(), DeviceState::Awake);

        assert_eq!(
            ctl.display().cmds,
            [
                Cmd::Init,
                Cmd::Clear(SCREEN_REGION),
                Cmd::Bitmap(FrameKind::Up),
                Cmd::Clear(COUNTER_REGION),
                text("0"),
                Cmd::Flush,
            ]
        );
    }

    #[test]
    fn test_display_failure_halts() {
        let rig = Rig::new();
        let mut ctl = DeviceController::new(
            DeviceConfig::default(),
            TestClock(&rig.now),
            TestPin(&rig.level),
            Recorder {
                fail_init: true,
                ..Recorder::default()
            },
            TestPower {
                rig: &rig,
                sleep_for_ms: SLEEP_FOR_MS,
                level_on_wake: None,
                suspends: Vec::new(),
            },
        );

        assert_eq!(ctl.boot(), Err(DisplayError::InitFailed));
        assert_eq!(ctl.state(), DeviceState::Halted);
        assert_eq!(ctl.boot(), Err(DisplayError::NotInitialized));

        let reports = press(&mut ctl, &rig, 200, 200);
        assert!(reports.iter().all(|r| *r == StepReport::default()));

        // Well past the idle timeout: no sleep either
        advance(&mut ctl, &rig, 20_000);
        assert_eq!(ctl.count(), 0);
        assert_eq!(ctl.display().cmds, [Cmd::Init]);
        assert!(ctl.power().suspends.is_empty());
    }

    #[test]
    fn test_step_before_boot_does_nothing() {
        let rig = Rig::new();
        let mut ctl = controller(&rig, DeviceConfig::default(), None);
        rig.now.set(100);
        assert_eq!(ctl.step(), StepReport::default());
        assert!(ctl.display().cmds.is_empty());
    }

    #[test]
    fn test_count_text_capped_to_column() {
        assert_eq!(count_text(0).as_str(), "0");
        assert_eq!(count_text(9999).as_str(), "9999");
        assert_eq!(count_text(10_000).as_str(), "9999");
        assert_eq!(count_text(u32::MAX).as_str(), "9999");
    }

    #[test]
    fn test_press_counts_once() {
        let rig = Rig::new();
        let mut ctl = booted(&rig, DeviceConfig::default(), None);
        advance(&mut ctl, &rig, 100);

        let reports = press(&mut ctl, &rig, 200, 200);

        let edges: Vec<Edge> = reports.iter().filter_map(|r| r.edge).collect();
        assert_eq!(edges, [Edge::Rose, Edge::Fell]);
        assert_eq!(reports.iter().filter(|r| r.counted).count(), 1);
        assert_eq!(ctl.count(), 1);
        assert_eq!(ctl.display().texts().last(), Some(&"1"));
    }

    #[test]
    fn test_bouncy_press_counts_once() {
        let rig = Rig::new();
        let mut ctl = booted(&rig, DeviceConfig::default(), None);

        // Contact bounce: flip every step for 40ms
        for _ in 0..8 {
            rig.level.set(!rig.level.get());
            advance(&mut ctl, &rig, rig.now.get() + STEP_MS);
        }
        press(&mut ctl, &rig, 150, 150);

        assert_eq!(ctl.count(), 1);
    }

    #[test]
    fn test_short_glitch_not_counted() {
        let rig = Rig::new();
        let mut ctl = booted(&rig, DeviceConfig::default(), None);

        press(&mut ctl, &rig, 30, 200);
        assert_eq!(ctl.count(), 0);
    }

    #[test]
    fn test_counter_redrawn_every_step() {
        let rig = Rig::new();
        let mut ctl = booted(&rig, DeviceConfig::default(), None);

        let reports = advance(&mut ctl, &rig, 1000);
        let cmds = &ctl.display().cmds;

        assert_eq!(cmds.iter().filter(|c| **c == Cmd::Flush).count(), reports.len());
        assert_eq!(ctl.display().texts().len(), reports.len());
    }

    #[test]
    fn test_frames_alternate_on_cadence() {
        let rig = Rig::new();
        let mut ctl = booted(&rig, DeviceConfig::default(), None);

        let reports = advance(&mut ctl, &rig, 1000);
        let frames: Vec<FrameKind> = reports.iter().filter_map(|r| r.frame).collect();
        assert_eq!(frames, [FrameKind::Down, FrameKind::Up, FrameKind::Down]);

        let bitmaps: Vec<&Cmd> = ctl
            .display()
            .cmds
            .iter()
            .filter(|c| matches!(c, Cmd::Bitmap(_)))
            .collect();
        assert_eq!(bitmaps.len(), 3);
        assert!(ctl.display().cmds.contains(&Cmd::Clear(ANIMATION_REGION)));
    }

    #[test]
    fn test_idle_timeout_suspends_and_wake_press_not_counted() {
        let rig = Rig::new();
        let mut ctl = booted(&rig, DeviceConfig::default(), Some(true));

        let reports = advance(&mut ctl, &rig, 5000);
        let last = reports.last().unwrap();
        assert!(last.slept);
        assert!(last.woke);
        assert_eq!(reports.iter().filter(|r| r.slept).count(), 1);

        assert_eq!(ctl.power().suspends, [(10, WakeEdge::Rising)]);
        assert_eq!(ctl.state(), DeviceState::Awake);
        assert!(!ctl.is_asleep());
        assert_eq!(rig.now.get(), 5000 + SLEEP_FOR_MS);

        let cmds = &ctl.display().cmds;
        let off = cmds.iter().position(|c| *c == Cmd::Power(false)).unwrap();
        let on = cmds.iter().position(|c| *c == Cmd::Power(true)).unwrap();
        assert!(off < on);
        assert_eq!(cmds[on + 1], Cmd::Clear(SCREEN_REGION));

        // The waking press is still held; releasing it counts nothing
        rig.level.set(true);
        advance(&mut ctl, &rig, rig.now.get() + 200);
        rig.level.set(false);
        advance(&mut ctl, &rig, rig.now.get() + 200);
        assert_eq!(ctl.count(), 0);

        // The next press counts
        press(&mut ctl, &rig, 200, 200);
        assert_eq!(ctl.count(), 1);
    }

    #[test]
    fn test_wake_press_still_bouncing_is_swallowed() {
        let rig = Rig::new();
        let mut ctl = booted(&rig, DeviceConfig::default(), Some(false));

        advance(&mut ctl, &rig, 5000);
        assert_eq!(ctl.power().suspends.len(), 1);

        // Contact closes just after resume
        let reports = press(&mut ctl, &rig, 100, 200);
        assert!(reports.iter().any(|r| r.wake_press_ignored));
        assert_eq!(ctl.count(), 0);

        press(&mut ctl, &rig, 200, 200);
        assert_eq!(ctl.count(), 1);
    }

    #[test]
    fn test_separate_wake_pin_has_no_guard() {
        let rig = Rig::new();
        let config = DeviceConfig {
            wake: PinConfig::new(11),
            ..DeviceConfig::default()
        };
        let mut ctl = booted(&rig, config, None);

        advance(&mut ctl, &rig, 5000);
        assert_eq!(ctl.power().suspends, [(11, WakeEdge::Rising)]);

        press(&mut ctl, &rig, 100, 200);
        assert_eq!(ctl.count(), 1);
    }

    #[test]
    fn test_active_low_wake_pin_waits_for_falling_edge() {
        let rig = Rig::new();
        let config = DeviceConfig {
            wake: PinConfig::active_low(12),
            ..DeviceConfig::default()
        };
        let mut ctl = booted(&rig, config, None);

        advance(&mut ctl, &rig, 5000);
        assert_eq!(ctl.power().suspends, [(12, WakeEdge::Falling)]);
    }

    #[test]
    fn test_immediate_check_after_wake_does_not_sleep_again() {
        let rig = Rig::new();
        let mut ctl = booted(&rig, DeviceConfig::default(), Some(false));

        advance(&mut ctl, &rig, 5000);
        let reports = advance(&mut ctl, &rig, rig.now.get() + 4990);
        assert!(reports.iter().all(|r| !r.slept));

        let reports = advance(&mut ctl, &rig, rig.now.get() + 10);
        assert_eq!(reports.iter().filter(|r| r.slept).count(), 1);
        assert_eq!(ctl.power().suspends.len(), 2);
    }

    #[test]
    fn test_activity_defers_sleep() {
        let rig = Rig::new();
        let mut ctl = booted(&rig, DeviceConfig::default(), Some(false));

        advance(&mut ctl, &rig, 4000);
        press(&mut ctl, &rig, 100, 100);

        let reports = advance(&mut ctl, &rig, 6000);
        assert!(reports.iter().all(|r| !r.slept));
        assert!(ctl.power().suspends.is_empty());
        assert_eq!(ctl.count(), 1);

        // Release at 4155 was the last activity
        let reports = advance(&mut ctl, &rig, 9200);
        assert_eq!(reports.iter().filter(|r| r.slept).count(), 1);
    }

    #[test]
    fn test_display_off_mode_wakes_on_press_without_counting() {
        let rig = Rig::new();
        let config = DeviceConfig {
            sleep_mode: SleepMode::DisplayOff,
            ..DeviceConfig::default()
        };
        let mut ctl = booted(&rig, config, None);

        let reports = advance(&mut ctl, &rig, 5000);
        assert!(reports.last().unwrap().slept);
        assert!(!reports.last().unwrap().woke);
        assert_eq!(ctl.state(), DeviceState::Sleeping);
        assert!(ctl.is_asleep());
        assert!(ctl.power().suspends.is_empty());
        assert_eq!(ctl.display().cmds.last(), Some(&Cmd::Power(false)));

        // Dark panel: nothing drawn while asleep
        ctl.display_mut().cmds.clear();
        advance(&mut ctl, &rig, 8000);
        assert!(ctl.display().cmds.is_empty());

        let reports = press(&mut ctl, &rig, 100, 200);
        assert!(reports.iter().any(|r| r.woke && r.wake_press_ignored));
        assert_eq!(ctl.state(), DeviceState::Awake);
        assert_eq!(ctl.count(), 0);
        assert_eq!(ctl.display().cmds[0], Cmd::Power(true));

        press(&mut ctl, &rig, 100, 200);
        assert_eq!(ctl.count(), 1);
    }

    #[test]
    fn test_release_while_display_off_wakes() {
        let rig = Rig::new();
        let config = DeviceConfig {
            sleep_mode: SleepMode::DisplayOff,
            ..DeviceConfig::default()
        };
        let mut ctl = booted(&rig, config, None);

        // Held through the whole idle interval
        rig.level.set(true);
        let reports = advance(&mut ctl, &rig, 6000);
        assert_eq!(ctl.count(), 1);
        assert!(reports.iter().any(|r| r.slept));

        rig.level.set(false);
        let reports = advance(&mut ctl, &rig, 6200);
        let wake = reports.iter().find(|r| r.woke).unwrap();
        assert_eq!(wake.edge, Some(Edge::Fell));
        assert!(!wake.wake_press_ignored);
        assert_eq!(ctl.count(), 1);
        assert_eq!(ctl.state(), DeviceState::Awake);
    }
}
