//! Scroll-driven effects: header shrink, parallax, back-to-top, anchors.

/// Scroll offset past which the header gets the `scrolled` class.
pub const HEADER_SHRINK_OFFSET: f64 = 50.0;

/// Scroll offset past which the back-to-top button is shown.
pub const BACK_TO_TOP_OFFSET: f64 = 300.0;

/// Parallax only runs on viewports wider than this.
pub const PARALLAX_MIN_WIDTH: f64 = 768.0;

/// Parallax speed when a background has no usable `data-speed`.
pub const DEFAULT_PARALLAX_SPEED: f64 = 0.5;

/// Result of one animation frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameUpdate {
    /// Whether the header carries the `scrolled` class.
    pub header_scrolled: bool,
    /// `transform` for each parallax background, or `None` when parallax is
    /// skipped on narrow viewports.
    pub parallax: Option<Vec<String>>,
}

/// Frame-throttled scroll handling.
///
/// Scroll events only request a frame when none is pending, so a burst of
/// events costs one update.
#[derive(Debug, Clone, Default)]
pub struct ScrollEffects {
    speeds: Vec<f64>,
    ticking: bool,
}

impl ScrollEffects {
    /// Set up effects for parallax backgrounds with the given `data-speed` values.
    pub fn new<'a>(speed_attrs: impl IntoIterator<Item = Option<&'a str>>) -> Self {
        Self {
            speeds: speed_attrs.into_iter().map(parse_speed).collect(),
            ticking: false,
        }
    }

    pub fn is_ticking(&self) -> bool {
        self.ticking
    }

    /// Scroll event. Returns true when a frame should be requested.
    pub fn on_scroll(&mut self) -> bool {
        if self.ticking {
            return false;
        }
        self.ticking = true;
        true
    }

    /// Animation frame for the current scroll position and viewport width.
    pub fn on_frame(&mut self, scroll_y: f64, viewport_width: f64) -> FrameUpdate {
        let parallax = (viewport_width > PARALLAX_MIN_WIDTH).then(|| {
            self.speeds
                .iter()
                .map(|speed| format!("translateY({}px)", scroll_y * speed))
                .collect()
        });

        self.ticking = false;
        FrameUpdate {
            header_scrolled: scroll_y > HEADER_SHRINK_OFFSET,
            parallax,
        }
    }
}

fn parse_speed(attr: Option<&str>) -> f64 {
    attr.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|speed| speed.is_finite())
        .unwrap_or(DEFAULT_PARALLAX_SPEED)
}

/// Whether the back-to-top button is visible at `scroll_y`.
pub fn back_to_top_visible(scroll_y: f64) -> bool {
    scroll_y > BACK_TO_TOP_OFFSET
}

/// Inline transform of a card for its hover state.
pub fn card_transform(hovered: bool) -> &'static str {
    if hovered {
        "translateY(-8px)"
    } else {
        "translateY(0)"
    }
}

/// Selector to smooth-scroll to for an in-page anchor, if it names one.
pub fn anchor_scroll_target(href: &str) -> Option<&str> {
    (href.starts_with('#') && href != "#").then_some(href)
}
