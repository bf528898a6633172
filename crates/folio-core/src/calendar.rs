use chrono::{
  Datelike,
  Duration,
  Months,
  NaiveDate
};
use serde::{
  Deserialize,
  Serialize
};

use crate::error::FetchError;

pub const LEVELS: usize = 5;
pub const LOADING_MESSAGE: &str =
  "Loading...";

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
  Light,
  #[default]
  Dark
}

impl ColorScheme {
  pub fn as_class(self) -> &'static str {
    match self {
      | Self::Light => "theme-light",
      | Self::Dark => "theme-dark"
    }
  }
}

/// Five-step colour ramps, lowest activity first.
#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
pub struct CalendarTheme {
  #[serde(default = "default_light_ramp")]
  pub light: Vec<String>,
  #[serde(default = "default_dark_ramp")]
  pub dark:  Vec<String>
}

impl Default for CalendarTheme {
  fn default() -> Self {
    Self {
      light: default_light_ramp(),
      dark:  default_dark_ramp()
    }
  }
}

impl CalendarTheme {
  pub fn ramp(
    &self,
    scheme: ColorScheme
  ) -> &[String] {
    match scheme {
      | ColorScheme::Light => &self.light,
      | ColorScheme::Dark => &self.dark
    }
  }

  pub fn color(
    &self,
    scheme: ColorScheme,
    level: u8
  ) -> &str {
    let ramp = self.ramp(scheme);
    let idx = usize::from(level)
      .min(ramp.len().saturating_sub(1));
    ramp
      .get(idx)
      .map(String::as_str)
      .unwrap_or("transparent")
  }
}

pub fn default_light_ramp() -> Vec<String> {
  [
    "#ebedf0", "#9be9a8", "#40c463",
    "#30a14e", "#216e39"
  ]
  .map(str::to_string)
  .to_vec()
}

pub fn default_dark_ramp() -> Vec<String> {
  [
    "#161b22", "#0e4429", "#006d32",
    "#26a641", "#39d353"
  ]
  .map(str::to_string)
  .to_vec()
}

/// One day of contribution data.
#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
pub struct Contribution {
  pub date:  NaiveDate,
  #[serde(default)]
  pub count: u32,
  #[serde(default)]
  pub level: Option<u8>
}

#[derive(Debug, Deserialize)]
struct ContributionsResponse {
  #[serde(default)]
  contributions: Vec<Contribution>
}

pub fn contributions_url(
  api_base: &str,
  username: &str
) -> String {
  format!(
    "{}/{}?y=last",
    api_base.trim_end_matches('/'),
    username.trim()
  )
}

pub fn parse_contributions(
  body: &str
) -> Result<Vec<Contribution>, FetchError>
{
  let response = serde_json::from_str::<
    ContributionsResponse
  >(body)?;
  Ok(response.contributions)
}

pub fn profile_url(
  username: &str
) -> String {
  format!(
    "https://github.com/{}",
    username.trim()
  )
}

/// First day still shown: one year back from `today`, plus one day.
///
/// Feb 29 clamps to Feb 28 before the day is added.
pub fn last_year_cutoff(
  today: NaiveDate
) -> NaiveDate {
  let year_ago = today
    .checked_sub_months(Months::new(12))
    .unwrap_or(NaiveDate::MIN);
  year_ago
    .checked_add_signed(Duration::days(1))
    .unwrap_or(year_ago)
}

/// Data transform handed to the renderer: keeps entries on or after
/// [`last_year_cutoff`].
pub fn select_last_year(
  contributions: Vec<Contribution>,
  today: NaiveDate
) -> Vec<Contribution> {
  let cutoff = last_year_cutoff(today);
  contributions
    .into_iter()
    .filter(|entry| entry.date >= cutoff)
    .collect()
}

pub fn total_count(
  contributions: &[Contribution]
) -> u64 {
  contributions
    .iter()
    .map(|entry| u64::from(entry.count))
    .sum()
}

pub fn total_count_label(
  total: u64
) -> String {
  let noun = if total == 1 {
    "contribution"
  } else {
    "contributions"
  };
  format!("{total} {noun} in the last year")
}

/// Quartile level used when the data source leaves `level` out.
pub fn level_for(count: u32, max: u32) -> u8 {
  if count == 0 || max == 0 {
    return 0;
  }
  let ratio = f64::from(count) / f64::from(max);
  if ratio <= 0.25 {
    1
  } else if ratio <= 0.5 {
    2
  } else if ratio <= 0.75 {
    3
  } else {
    4
  }
}

/// Row label for a Sunday-first week column.
pub fn weekday_label(
  row: usize
) -> Option<&'static str> {
  match row {
    | 1 => Some("Mon"),
    | 3 => Some("Wed"),
    | 5 => Some("Fri"),
    | _ => None
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarCell {
  pub date:  NaiveDate,
  pub count: u32,
  pub level: u8
}

impl CalendarCell {
  pub fn tooltip(&self) -> String {
    let noun = if self.count == 1 {
      "contribution"
    } else {
      "contributions"
    };
    format!(
      "{} {noun} on {}",
      self.count,
      self.date.format("%B %-d, %Y")
    )
  }
}

pub type CalendarWeek = [Option<CalendarCell>; 7];

/// Week columns ready to draw.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CalendarLayout {
  pub weeks:        Vec<CalendarWeek>,
  /// `(week index, "Jan")` for each week that starts a month.
  pub month_labels: Vec<(usize, String)>,
  pub total:        u64
}

impl CalendarLayout {
  pub fn build(
    contributions: &[Contribution]
  ) -> Self {
    let mut days = contributions.to_vec();
    days.sort_by_key(|entry| entry.date);
    days.dedup_by_key(|entry| entry.date);

    let (Some(first), Some(last)) =
      (days.first(), days.last())
    else {
      return Self::default();
    };
    let (first, last) = (first.date, last.date);

    let max = days
      .iter()
      .map(|entry| entry.count)
      .max()
      .unwrap_or(0);

    let mut weeks: Vec<CalendarWeek> =
      Vec::new();
    let mut week: CalendarWeek =
      Default::default();
    let mut month_labels = Vec::new();
    let mut last_month = None;
    let mut source = days.iter().peekable();

    let mut date = first;
    while date <= last {
      let row = date
        .weekday()
        .num_days_from_sunday()
        as usize;
      if row == 0 && date != first {
        weeks.push(std::mem::take(&mut week));
      }

      let entry = source
        .next_if(|entry| entry.date == date);
      let count =
        entry.map(|entry| entry.count).unwrap_or(0);
      let level = entry
        .and_then(|entry| entry.level)
        .map(|level| {
          level.min((LEVELS - 1) as u8)
        })
        .unwrap_or_else(|| level_for(count, max));

      if last_month != Some(date.month())
        && (row == 0 || date == first)
      {
        month_labels.push((
          weeks.len(),
          date.format("%b").to_string()
        ));
        last_month = Some(date.month());
      }

      week[row] = Some(CalendarCell {
        date,
        count,
        level
      });

      let Some(next) = date.succ_opt() else {
        break;
      };
      date = next;
    }
    weeks.push(week);

    Self {
      weeks,
      month_labels,
      total: total_count(&days)
    }
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d)
      .expect("valid date")
  }

  fn day(
    y: i32,
    m: u32,
    d: u32,
    count: u32
  ) -> Contribution {
    Contribution {
      date: date(y, m, d),
      count,
      level: None
    }
  }

  #[test]
  fn cutoff_is_one_year_back_plus_one_day() {
    assert_eq!(
      last_year_cutoff(date(2026, 10, 17)),
      date(2025, 10, 18)
    );
    assert_eq!(
      last_year_cutoff(date(2028, 2, 29)),
      date(2027, 3, 1)
    );
  }

  #[test]
  fn select_last_year_drops_older_entries() {
    let today = date(2026, 10, 17);
    let kept = select_last_year(
      vec![
        day(2025, 10, 17, 4),
        day(2025, 10, 18, 2),
        day(2026, 10, 17, 1),
      ],
      today
    );
    let dates = kept
      .iter()
      .map(|entry| entry.date)
      .collect::<Vec<_>>();
    assert_eq!(
      dates,
      vec![date(2025, 10, 18), date(2026, 10, 17)]
    );
    assert_eq!(total_count(&kept), 3);
  }

  #[test]
  fn parses_contribution_service_response() {
    let body = json!({
      "total": { "lastYear": 3 },
      "contributions": [
        { "date": "2026-10-15", "count": 1, "level": 1 },
        { "date": "2026-10-16", "count": 2, "level": 4 }
      ]
    })
    .to_string();
    let contributions =
      parse_contributions(&body).expect("parse");
    assert_eq!(contributions.len(), 2);
    assert_eq!(contributions[1].level, Some(4));
  }

  #[test]
  fn layout_pads_first_week_to_sunday() {
    // 2026-10-14 is a Wednesday
    let layout = CalendarLayout::build(&[
      day(2026, 10, 14, 1),
      day(2026, 10, 15, 0),
      day(2026, 10, 18, 8),
    ]);
    assert_eq!(layout.weeks.len(), 2);
    assert!(layout.weeks[0][..3]
      .iter()
      .all(Option::is_none));
    assert_eq!(
      layout.weeks[0][3]
        .as_ref()
        .map(|cell| cell.count),
      Some(1)
    );
    // gap days are filled with zero cells
    assert_eq!(
      layout.weeks[0][5]
        .as_ref()
        .map(|cell| (cell.count, cell.level)),
      Some((0, 0))
    );
    let sunday = layout.weeks[1][0]
      .as_ref()
      .expect("sunday cell");
    assert_eq!(sunday.level, 4);
    assert_eq!(layout.total, 9);
    assert_eq!(
      layout.month_labels,
      vec![(0, "Oct".to_string())]
    );
  }

  #[test]
  fn explicit_levels_win_over_derived() {
    let layout = CalendarLayout::build(&[
      Contribution {
        date:  date(2026, 10, 18),
        count: 100,
        level: Some(2)
      },
    ]);
    assert_eq!(
      layout.weeks[0][0]
        .as_ref()
        .map(|cell| cell.level),
      Some(2)
    );
  }

  #[test]
  fn theme_lookup_clamps_level() {
    let theme = CalendarTheme::default();
    assert_eq!(
      theme.color(ColorScheme::Dark, 0),
      "#161b22"
    );
    assert_eq!(
      theme.color(ColorScheme::Light, 9),
      "#216e39"
    );
  }

  #[test]
  fn empty_data_has_empty_layout() {
    assert_eq!(
      CalendarLayout::build(&[]),
      CalendarLayout::default()
    );
    assert_eq!(
      total_count_label(1),
      "1 contribution in the last year"
    );
  }
}
