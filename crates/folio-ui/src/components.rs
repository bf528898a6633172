mod activity_timeline;
mod contribution_calendar;
mod contribution_heatmap;

pub use activity_timeline::ActivityTimeline;
pub use contribution_calendar::ContributionCalendar;
