//! Domain logic shared by the folio front ends: GitHub activity events, their
//! classification into timeline items, relative ages, the contribution
//! calendar model and the portfolio configuration.
//!
//! Nothing here performs I/O; fetching lives behind [`timeline::EventSource`]
//! so the browser and the terminal can each bring their own HTTP client.

pub mod calendar;
pub mod config;
pub mod describe;
pub mod error;
pub mod event;
pub mod generation;
pub mod relative_time;
pub mod timeline;

pub use config::PortfolioConfig;
pub use describe::{
  DisplayItem,
  EventDescription,
  build_display_items,
  describe_event
};
pub use error::FetchError;
pub use event::ActivityEvent;
pub use generation::{
  GenerationCounter,
  RequestTicket
};
pub use relative_time::format_relative_age;
pub use timeline::{
  EventSource,
  TimelineQuery,
  TimelineState,
  TimelineView
};
