#![forbid(unsafe_code)]

//! Wraparound slide carousel with lazy media loading.
//!
//! # Invariants
//!
//! 1. The index is always `0..len` and every move wraps around.
//! 2. After any move, the current slide and both wraparound neighbours have
//!    been loaded.
//! 3. A slide's media is handed to the surface at most once.
//!
//! # Failure Modes
//!
//! | Scenario                      | Behavior                            |
//! |-------------------------------|-------------------------------------|
//! | No slides                     | [`Carousel::new`] returns `None`    |
//! | Slide without a source        | Never loaded, never marked loaded   |
//! | Slide with an unknown kind    | Marked loaded, nothing handed over  |
//! | Multi-touch start             | Gesture not tracked                 |

use std::time::Duration;

use serde::{Deserialize, Serialize};

use scrolly_core::event::{KeyCode, KeyEvent, TouchEvent, TouchPhase};

/// Media a slide lazily loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// `<img>` source.
    Image,
    /// `<video>` source; the host reloads the element.
    Video,
    /// Embedded YouTube iframe.
    #[serde(rename = "youtube")]
    YouTube,
}

impl MediaKind {
    /// Parse a `data-type` attribute value.
    #[must_use]
    pub fn from_attr(value: &str) -> Option<Self> {
        match value {
            "image" => Some(Self::Image),
            "video" => Some(Self::Video),
            "youtube" => Some(Self::YouTube),
            _ => None,
        }
    }
}

/// One slide's lazy-load description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    /// Media kind, if recognised.
    pub kind: Option<MediaKind>,
    /// Deferred source URL.
    pub src: Option<String>,
    /// Caption; used as alt text for images.
    pub caption: Option<String>,
}

impl Slide {
    /// Slide with deferred media.
    #[must_use]
    pub fn new(kind: MediaKind, src: impl Into<String>) -> Self {
        Self {
            kind: Some(kind),
            src: Some(src.into()),
            caption: None,
        }
    }

    /// Set the caption.
    #[must_use]
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Alt text for image media.
    #[must_use]
    pub fn alt_text(&self) -> &str {
        self.caption.as_deref().unwrap_or("")
    }
}

/// Tunables for [`Carousel`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselConfig {
    /// Horizontal travel (px) a touch must exceed to change slide.
    pub swipe_threshold: f32,
    /// Minimum time between two handled keydowns.
    pub key_throttle: Duration,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            swipe_threshold: 40.0,
            key_throttle: Duration::from_millis(250),
        }
    }
}

impl CarouselConfig {
    /// Set the swipe threshold.
    #[must_use]
    pub fn with_swipe_threshold(mut self, px: f32) -> Self {
        self.swipe_threshold = px;
        self
    }

    /// Set the arrow-key throttle window.
    #[must_use]
    pub fn with_key_throttle(mut self, window: Duration) -> Self {
        self.key_throttle = window;
        self
    }
}

/// Page elements a carousel drives.
pub trait CarouselSurface {
    /// Translate the track so slide `index` is visible.
    fn show_slide(&mut self, index: usize, track_offset_percent: i64);

    /// Mark a slide inert (every slide except the current one).
    fn set_slide_inert(&mut self, index: usize, inert: bool);

    /// Set a dot's `aria-current`.
    fn set_dot_current(&mut self, index: usize, current: bool);

    /// Assign deferred media to a slide.
    fn load_media(&mut self, index: usize, kind: MediaKind, src: &str, alt: &str);

    /// Label a slide and its dot. Called once per slide at construction.
    fn label_slide(&mut self, index: usize, slide_label: &str, dot_label: &str) {
        let _ = (index, slide_label, dot_label);
    }
}

/// Carousel state.
#[derive(Debug)]
pub struct Carousel<S> {
    slides: Vec<Slide>,
    loaded: Vec<bool>,
    index: usize,
    surface: S,
    config: CarouselConfig,
    last_key: Option<Duration>,
    touch_start_x: Option<f32>,
}

impl<S: CarouselSurface> Carousel<S> {
    /// Build a carousel on slide 0. Returns `None` without slides.
    pub fn new(slides: Vec<Slide>, mut surface: S, config: CarouselConfig) -> Option<Self> {
        if slides.is_empty() {
            return None;
        }
        let count = slides.len();
        for index in 0..count {
            surface.label_slide(index, &slide_label(index, count), &dot_label(index));
        }
        let mut carousel = Self {
            loaded: vec![false; count],
            slides,
            index: 0,
            surface,
            config,
            last_key: None,
            touch_start_x: None,
        };
        carousel.update();
        Some(carousel)
    }

    /// Current slide.
    #[inline]
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of slides.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Always `false`; a carousel has at least one slide.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// True once a slide's media has been handed to the surface.
    #[must_use]
    pub fn is_loaded(&self, index: usize) -> bool {
        self.loaded.get(index).copied().unwrap_or(false)
    }

    /// The surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Move to `target`, wrapping in both directions.
    pub fn go_to(&mut self, target: isize) {
        let count = self.slides.len() as isize;
        self.index = target.rem_euclid(count) as usize;
        scrolly_core::debug!(index = self.index, "carousel moved");
        self.update();
    }

    /// Next slide, wrapping to the first.
    pub fn next(&mut self) {
        self.go_to(self.index as isize + 1);
    }

    /// Previous slide, wrapping to the last.
    pub fn prev(&mut self) {
        self.go_to(self.index as isize - 1);
    }

    /// The carousel scrolled into view.
    pub fn on_visible(&mut self) {
        self.load(self.index);
    }

    /// Keydown on the carousel. Any key opens the throttle window; only
    /// ArrowLeft/ArrowRight move. Returns `true` when the slide moved.
    pub fn handle_key(&mut self, key: &KeyEvent, now: Duration) -> bool {
        if !key.is_down() {
            return false;
        }
        if let Some(last) = self.last_key
            && now.saturating_sub(last) < self.config.key_throttle
        {
            scrolly_core::trace!(?now, "carousel key throttled");
            return false;
        }
        self.last_key = Some(now);
        match key.code {
            KeyCode::Left => self.prev(),
            KeyCode::Right => self.next(),
            _ => return false,
        }
        true
    }

    /// Horizontal swipe recognition. Returns `true` when the slide moved.
    pub fn handle_touch(&mut self, touch: &TouchEvent) -> bool {
        match touch.phase {
            TouchPhase::Start => {
                if touch.touches == 1 {
                    self.touch_start_x = Some(touch.x);
                }
                false
            }
            TouchPhase::Move => false,
            TouchPhase::End => {
                let Some(start) = self.touch_start_x.take() else {
                    return false;
                };
                let diff = start - touch.x;
                if diff.abs() <= self.config.swipe_threshold {
                    return false;
                }
                if diff > 0.0 {
                    self.next();
                } else {
                    self.prev();
                }
                true
            }
            TouchPhase::Cancel => {
                self.touch_start_x = None;
                false
            }
        }
    }

    fn update(&mut self) {
        let current = self.index;
        self.surface.show_slide(current, current as i64 * -100);
        for i in 0..self.slides.len() {
            self.surface.set_slide_inert(i, i != current);
            self.surface.set_dot_current(i, i == current);
        }
        let count = self.slides.len();
        self.load(current);
        self.load((current + 1) % count);
        self.load((current + count - 1) % count);
    }

    fn load(&mut self, index: usize) {
        let Some(slide) = self.slides.get(index) else {
            return;
        };
        if self.loaded[index] {
            return;
        }
        let Some(src) = slide.src.as_deref() else {
            return;
        };
        if let Some(kind) = slide.kind {
            self.surface.load_media(index, kind, src, slide.alt_text());
        }
        self.loaded[index] = true;
    }
}

/// Accessible slide label, `"i / n"` (1-based).
#[must_use]
pub fn slide_label(index: usize, count: usize) -> String {
    format!("{} / {}", index + 1, count)
}

/// Accessible dot label.
#[must_use]
pub fn dot_label(index: usize) -> String {
    format!("Ir a la diapositiva {}", index + 1)
}
