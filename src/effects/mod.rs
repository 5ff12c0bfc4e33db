//! Page effect state.
//!
//! The interactive bits of the site (mobile menu, scroll-driven header and
//! parallax, reveal-on-scroll, lazy images, card hover, newsletter form) as
//! plain state machines. Each one takes the event's inputs and returns what
//! the page should show, so the rules can be exercised without a browser.

pub mod menu;
pub mod newsletter;
pub mod reveal;
pub mod scroll;

pub use menu::{MenuState, MobileMenu};
pub use newsletter::{ButtonState, NewsletterForm, NewsletterTiming, SimulatedSubscriber, Subscriber};
pub use reveal::{LazyImage, ObserverOptions, RevealObserver, REVEAL_OPTIONS};
pub use scroll::{anchor_scroll_target, back_to_top_visible, card_transform, FrameUpdate, ScrollEffects};
