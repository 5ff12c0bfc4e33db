//! Mobile navigation toggle.

/// What the page shows for the current menu state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuState {
    /// Whether the nav carries the `active` class.
    pub nav_active: bool,
    /// Value of the toggle's `aria-expanded` attribute.
    pub aria_expanded: &'static str,
    /// Inline `overflow` style of the body; open menus lock page scrolling.
    pub body_overflow: &'static str,
}

/// Open/closed state of the mobile nav.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn state(&self) -> MenuState {
        MenuState {
            nav_active: self.open,
            aria_expanded: if self.open { "true" } else { "false" },
            body_overflow: if self.open { "hidden" } else { "" },
        }
    }

    /// Toggle button clicked.
    pub fn toggle(&mut self) -> MenuState {
        self.open = !self.open;
        self.state()
    }

    /// Click anywhere on the document. Clicks outside both the nav and the
    /// toggle close the menu; returns the new state when that happens.
    pub fn click(&mut self, inside_nav: bool, inside_toggle: bool) -> Option<MenuState> {
        if inside_nav || inside_toggle {
            return None;
        }
        self.open = false;
        Some(self.state())
    }

    /// Key pressed. `Escape` closes an open menu; the returned state means
    /// focus should move back to the toggle.
    pub fn key(&mut self, key: &str) -> Option<MenuState> {
        if key != "Escape" || !self.open {
            return None;
        }
        self.open = false;
        Some(self.state())
    }
}
