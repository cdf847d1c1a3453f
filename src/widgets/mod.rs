//! Page widgets without persisted state. Each binds to its markup at load and
//! is absent from the page when that markup is missing.

pub(crate) mod back_to_top;
pub(crate) mod filters;
pub(crate) mod navigation;
pub(crate) mod reveal;
pub(crate) mod testimonials;

pub(crate) use back_to_top::BackToTop;
pub(crate) use filters::FilterBar;
pub(crate) use navigation::NavMenu;
pub(crate) use reveal::RevealObserver;
pub(crate) use testimonials::TestimonialCarousel;
