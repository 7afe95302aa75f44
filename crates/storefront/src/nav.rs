//! Mobile navigation menu state.
//!
//! The menu is either open or closed. While open, body scrolling is locked.
//! It closes on a second toggle, on a click outside the menu, on Escape
//! (returning focus to the toggle button), on a nav link click at mobile
//! widths, and when the viewport grows to desktop width.

/// Viewport width (px) at and above which the desktop navigation is shown.
pub const MOBILE_BREAKPOINT_PX: u32 = 768;

/// Something the user did that may affect the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    /// The hamburger button was pressed.
    Toggle,
    /// A nav link was clicked at the given viewport width.
    LinkClicked { width: u32 },
    /// A click landed outside both the menu and its toggle.
    OutsideClick,
    /// The Escape key was pressed.
    Escape,
    /// The viewport was resized to the given width.
    Resized { width: u32 },
}

/// What the page should look like after an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavEffects {
    pub open: bool,
    pub scroll_locked: bool,
    /// Move keyboard focus back to the toggle button.
    pub focus_toggle: bool,
}

impl NavEffects {
    /// Value for the toggle button's `aria-expanded` attribute.
    #[must_use]
    pub const fn aria_expanded(&self) -> &'static str {
        if self.open { "true" } else { "false" }
    }
}

/// Mobile menu state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavMenu {
    open: bool,
}

impl NavMenu {
    #[must_use]
    pub const fn new(open: bool) -> Self {
        Self { open }
    }

    /// Apply `event` and report the resulting page state.
    pub const fn apply(&mut self, event: NavEvent) -> NavEffects {
        let mut focus_toggle = false;

        match event {
            NavEvent::Toggle => self.open = !self.open,
            NavEvent::LinkClicked { width } => {
                if width < MOBILE_BREAKPOINT_PX {
                    self.open = false;
                }
            }
            NavEvent::OutsideClick => self.open = false,
            NavEvent::Escape => {
                focus_toggle = self.open;
                self.open = false;
            }
            NavEvent::Resized { width } => {
                if width >= MOBILE_BREAKPOINT_PX {
                    self.open = false;
                }
            }
        }

        NavEffects {
            open: self.open,
            scroll_locked: self.open,
            focus_toggle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_opens_and_closes() {
        let mut menu = NavMenu::default();

        let opened = menu.apply(NavEvent::Toggle);
        assert!(opened.open);
        assert!(opened.scroll_locked);
        assert_eq!(opened.aria_expanded(), "true");

        let closed = menu.apply(NavEvent::Toggle);
        assert!(!closed.open);
        assert!(!closed.scroll_locked);
        assert_eq!(closed.aria_expanded(), "false");
    }

    #[test]
    fn test_link_click_closes_only_on_mobile() {
        let mut menu = NavMenu::new(true);
        assert!(menu.apply(NavEvent::LinkClicked { width: 1024 }).open);
        assert!(!menu.apply(NavEvent::LinkClicked { width: 767 }).open);
    }

    #[test]
    fn test_outside_click_closes() {
        let mut menu = NavMenu::new(true);
        assert!(!menu.apply(NavEvent::OutsideClick).open);
        assert!(!menu.apply(NavEvent::OutsideClick).open);
    }

    #[test]
    fn test_escape_closes_and_refocuses_when_open() {
        let mut menu = NavMenu::new(true);
        let effects = menu.apply(NavEvent::Escape);
        assert!(!effects.open);
        assert!(effects.focus_toggle);

        let again = menu.apply(NavEvent::Escape);
        assert!(!again.focus_toggle);
    }

    #[test]
    fn test_resize_past_breakpoint_closes() {
        let mut menu = NavMenu::new(true);
        assert!(menu.apply(NavEvent::Resized { width: 500 }).open);
        assert!(!menu.apply(NavEvent::Resized { width: 768 }).open);
    }
}
