//! End-to-end navigation scenarios.
//!
//! # Invariants
//!
//! 1. **Bounds**: the index is always a valid panel index.
//! 2. **Single current**: exactly one panel is marked current after every step.
//! 3. **Drop, not queue**: requests during a transition never take effect later.
//! 4. **One-shot redirect**: fires XOR cancelled, never re-armed.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use scrolly_core::event::{
    ButtonEvent, ButtonRole, InputEvent, KeyCode, KeyEvent, TouchEvent, TouchPhase, WheelEvent,
};
use scrolly_core::timer::OneShotState;
use scrolly_nav::{
    AutoRedirect, ControlState, NavConfig, NavController, PanelPlacement, PanelSurface, Progress,
    StaticMotion, Trigger,
};

// ============================================================================
// Test Utilities
// ============================================================================

/// What a page would show, captured from the surface calls.
#[derive(Debug, Clone, Default, PartialEq)]
struct PageSnapshot {
    transforms: Vec<String>,
    aria_hidden: Vec<bool>,
    inert: Vec<bool>,
    progress_text: String,
    controls: Option<ControlState>,
}

#[derive(Debug, Default)]
struct FakePage {
    snapshot: PageSnapshot,
    focused: Vec<&'static str>,
    tabindex_set: Vec<&'static str>,
}

impl PanelSurface<&'static str> for FakePage {
    fn place(&mut self, _panel: &&'static str, placement: &PanelPlacement) {
        let i = placement.index;
        if self.snapshot.transforms.len() <= i {
            self.snapshot.transforms.resize(i + 1, String::new());
            self.snapshot.aria_hidden.resize(i + 1, false);
            self.snapshot.inert.resize(i + 1, false);
        }
        self.snapshot.transforms[i] = placement.transform();
        self.snapshot.aria_hidden[i] = placement.aria_hidden();
        self.snapshot.inert[i] = placement.inert();
    }

    fn show_progress(&mut self, progress: &Progress) {
        self.snapshot.progress_text = progress.to_string();
    }

    fn set_controls(&mut self, controls: ControlState) {
        self.snapshot.controls = Some(controls);
    }

    fn focus(&mut self, panel: &&'static str) {
        self.focused.push(*panel);
    }

    fn make_focusable(&mut self, panel: &&'static str) {
        self.tabindex_set.push(*panel);
    }
}

const PANELS: [&str; 4] = ["cover", "story", "details", "rsvp"];

type Nav = NavController<&'static str, FakePage, StaticMotion>;

fn nav(config: NavConfig, reduced_motion: bool) -> Nav {
    NavController::new(
        PANELS.to_vec(),
        FakePage::default(),
        StaticMotion(reduced_motion),
        config,
    )
    .expect("four panels")
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn current_count(page: &FakePage) -> usize {
    page.snapshot.aria_hidden.iter().filter(|hidden| !**hidden).count()
}

// ============================================================================
// 1. Construction
// ============================================================================

#[test]
fn construction_prepares_every_panel() {
    let nav = nav(NavConfig::default(), false);
    assert_eq!(nav.surface().tabindex_set, PANELS.to_vec());
    assert_eq!(nav.surface().focused, vec!["cover"]);
    assert_eq!(
        nav.surface().snapshot.transforms,
        vec![
            "translate3d(0, 0%, 0)",
            "translate3d(0, 100%, 0)",
            "translate3d(0, 200%, 0)",
            "translate3d(0, 300%, 0)",
        ]
    );
    assert_eq!(nav.surface().snapshot.progress_text, "1 / 4");
}

// ============================================================================
// 2. goTo semantics
// ============================================================================

#[test]
fn go_to_each_valid_index_from_idle() {
    for target in 0..PANELS.len() {
        let mut nav = nav(NavConfig::default().with_initial_index(1), false);
        nav.go_to(target);
        assert_eq!(nav.index(), target);
        assert_eq!(current_count(nav.surface()), 1);
        assert!(!nav.surface().snapshot.aria_hidden[target]);
    }
}

#[test]
fn next_and_prev_do_not_wrap() {
    let mut nav = nav(NavConfig::default().with_initial_index(3), true);
    nav.next();
    assert_eq!(nav.index(), 3);
    assert!(!nav.is_transitioning());

    nav.go_to(0);
    nav.fire_due_timers();
    nav.prev();
    assert_eq!(nav.index(), 0);
    assert!(!nav.is_transitioning());
}

#[test]
fn wheel_flick_advances_one_panel_per_settle() {
    let mut nav = nav(NavConfig::default(), false);
    let flick = InputEvent::Wheel(WheelEvent::vertical(80.0));
    // Five wheel events 100ms apart: one passes the cool-down and the guard.
    for _ in 0..5 {
        nav.handle_input(&flick);
        nav.advance(ms(100));
    }
    assert_eq!(nav.index(), 1);

    nav.advance(ms(400));
    nav.handle_input(&flick);
    assert_eq!(nav.index(), 2);
}

#[test]
fn dropped_requests_never_replay() {
    let mut nav = nav(NavConfig::default(), false);
    nav.next();
    nav.go_to(3);
    nav.handle_input(&InputEvent::Key(KeyEvent::new(KeyCode::End)));
    nav.advance(ms(5_000));
    assert_eq!(nav.index(), 1);
    assert!(!nav.is_transitioning());
}

#[test]
fn reduced_motion_sequence_has_no_accumulation() {
    let mut nav = nav(NavConfig::default(), true);
    let down = InputEvent::Key(KeyEvent::new(KeyCode::Down));
    let up = InputEvent::Key(KeyEvent::new(KeyCode::Up));
    nav.handle_input(&down);
    nav.handle_input(&down);
    nav.handle_input(&up);
    assert_eq!(nav.index(), 1);
    assert_eq!(nav.surface().snapshot.progress_text, "2 / 4");
}

#[test]
fn touch_swipe_navigates() {
    let mut nav = nav(NavConfig::default(), false);
    nav.handle_input(&InputEvent::Touch(TouchEvent::new(TouchPhase::Start, 10.0, 600.0)));
    let prevented =
        nav.handle_input(&InputEvent::Touch(TouchEvent::new(TouchPhase::Move, 10.0, 520.0)));
    assert!(prevented);
    assert_eq!(nav.index(), 1);
    assert_eq!(nav.in_flight().map(|t| t.trigger), Some(Trigger::Touch));
}

#[test]
fn buttons_navigate_and_track_disabled_state() {
    let mut nav = nav(NavConfig::default(), true);
    assert_eq!(
        nav.surface().snapshot.controls,
        Some(ControlState {
            prev_disabled: true,
            next_disabled: false
        })
    );
    nav.handle_input(&InputEvent::Button(ButtonEvent::new(ButtonRole::Goto(3))));
    assert_eq!(nav.index(), 3);
    assert_eq!(
        nav.surface().snapshot.controls,
        Some(ControlState {
            prev_disabled: false,
            next_disabled: true
        })
    );
}

// ============================================================================
// 3. Auto-redirect
// ============================================================================

fn redirect_config() -> NavConfig {
    NavConfig::default()
        .with_initial_index(PANELS.len() - 1)
        .with_auto_redirect(AutoRedirect::new(0).with_delay(ms(3000)))
}

#[test]
fn auto_redirect_fires_without_interaction() {
    let mut nav = nav(redirect_config(), false);
    nav.advance(ms(2999));
    assert_eq!(nav.index(), 3);
    nav.advance(ms(1));
    assert_eq!(nav.index(), 0);
    assert_eq!(nav.in_flight().map(|t| t.trigger), Some(Trigger::Auto));
    assert_eq!(nav.surface().snapshot.progress_text, "1 / 4");
    assert_eq!(nav.auto_redirect().state(), OneShotState::Fired);
}

#[test]
fn user_transition_cancels_auto_redirect_forever() {
    let mut nav = nav(redirect_config(), false);
    nav.advance(ms(1000));
    nav.prev();
    assert_eq!(nav.index(), 2);
    assert_eq!(nav.auto_redirect().state(), OneShotState::Cancelled);

    nav.advance(ms(10_000));
    assert_eq!(nav.index(), 2);
}

#[test]
fn dropped_user_request_does_not_cancel_redirect() {
    let mut nav = nav(redirect_config(), false);
    nav.next(); // already on the last panel
    assert!(nav.auto_redirect_pending());
    nav.set_time(ms(3000));
    assert_eq!(nav.index(), 0);
}

#[test]
fn visibility_does_not_cancel_redirect() {
    let config = NavConfig::default()
        .with_initial_index(2)
        .with_auto_redirect(AutoRedirect::new(0).with_delay(ms(3000)));
    let mut nav = nav(config, false);
    nav.handle_input(&InputEvent::Visibility(true));
    assert!(nav.auto_redirect_pending());
    assert_eq!(nav.index(), 2);
}

// ============================================================================
// 4. Idempotence
// ============================================================================

#[test]
fn refresh_reproduces_identical_page_state() {
    let mut nav = nav(NavConfig::default().with_initial_index(2), false);
    let first = nav.surface().snapshot.clone();
    nav.refresh();
    assert_eq!(nav.surface().snapshot, first);
    nav.refresh();
    assert_eq!(nav.surface().snapshot, first);
}

#[test]
fn shared_surface_observes_language_refresh() {
    #[derive(Default)]
    struct Labels {
        log: Rc<RefCell<Vec<String>>>,
    }
    impl PanelSurface<u8> for Labels {
        fn place(&mut self, _: &u8, _: &PanelPlacement) {}
        fn show_progress(&mut self, progress: &Progress) {
            self.log.borrow_mut().push(progress.to_string());
        }
        fn set_controls(&mut self, _: ControlState) {}
        fn focus(&mut self, _: &u8) {}
    }

    let log = Rc::new(RefCell::new(Vec::new()));
    let mut nav = NavController::new(
        vec![1u8, 2],
        Labels { log: Rc::clone(&log) },
        StaticMotion(false),
        NavConfig::default(),
    )
    .unwrap();
    nav.refresh();
    assert_eq!(*log.borrow(), vec!["1 / 2", "1 / 2"]);
}

// ============================================================================
// 5. Property tests
// ============================================================================

#[derive(Debug, Clone)]
enum Step {
    GoTo(usize),
    Next,
    Prev,
    Advance(u64),
    Wheel(i8),
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0usize..8).prop_map(Step::GoTo),
        Just(Step::Next),
        Just(Step::Prev),
        (0u64..1000).prop_map(Step::Advance),
        any::<i8>().prop_map(Step::Wheel),
    ]
}

proptest! {
    #[test]
    fn index_stays_in_bounds_with_one_current(
        initial in 0usize..8,
        reduced in any::<bool>(),
        steps in proptest::collection::vec(step_strategy(), 0..64),
    ) {
        let mut nav = nav(
            NavConfig::default()
                .with_initial_index(initial)
                .with_auto_redirect(AutoRedirect::new(0).with_delay(ms(1500))),
            reduced,
        );
        let mut left_armed = !nav.auto_redirect_pending();
        for step in steps {
            let before = nav.index();
            let was_busy = nav.is_transitioning();
            match step {
                Step::GoTo(i) => nav.go_to(i),
                Step::Next => nav.next(),
                Step::Prev => nav.prev(),
                Step::Advance(dt) => nav.advance(ms(dt)),
                Step::Wheel(d) => {
                    nav.handle_input(&InputEvent::Wheel(WheelEvent::vertical(f32::from(d))));
                }
            }
            prop_assert!(nav.index() < PANELS.len());
            prop_assert_eq!(current_count(nav.surface()), 1);
            if was_busy && !reduced && matches!(step, Step::GoTo(_) | Step::Next | Step::Prev) {
                // Still inside a 450ms settle: nothing may move.
                prop_assert_eq!(nav.index(), before);
            }
            if left_armed {
                prop_assert!(!nav.auto_redirect_pending(), "auto-redirect re-armed");
            }
            left_armed |= !nav.auto_redirect_pending();
        }
    }
}
