use folio_core::calendar::{
  CalendarLayout,
  Contribution,
  LEVELS,
  total_count_label,
  weekday_label
};
use folio_core::config::CalendarSettings;
use yew::{
  Html,
  html
};

use super::contribution_calendar::CalendarRenderer;

/// GitHub-style grid: one column per week, Sunday on top.
pub struct ContributionHeatmap {
  layout: CalendarLayout
}

impl ContributionHeatmap {
  pub fn new(
    contributions: &[Contribution]
  ) -> Self {
    Self {
      layout: CalendarLayout::build(
        contributions
      )
    }
  }

  fn render_block(
    settings: &CalendarSettings,
    color: &str,
    title: Option<String>
  ) -> Html {
    let style = format!(
      "width:{size}px;height:{size}px;\
       margin:{margin}px;\
       background-color:{color};\
       border-radius:2px;",
      size = settings.block_size,
      margin = settings.block_margin / 2
    );
    html! {
        <div class="calendar-block" style={style} title={title}></div>
    }
  }
}

impl CalendarRenderer for ContributionHeatmap {
  fn render(
    &self,
    settings: &CalendarSettings
  ) -> Html {
    let scheme = settings.color_scheme;
    let step =
      settings.block_size + settings.block_margin;
    let empty_color = "transparent";

    let weekday_column = if settings
      .show_weekday_labels
    {
      html! {
          <div class="calendar-weekdays">
              {
                  for (0..7).map(|row| {
                      let style = format!("height:{step}px;line-height:{step}px;");
                      html! {
                          <div class="calendar-weekday" style={style}>
                              { weekday_label(row).unwrap_or("") }
                          </div>
                      }
                  })
              }
          </div>
      }
    } else {
      html! {}
    };

    let month_row = html! {
        <div class="calendar-months" style="position:relative;height:1.4em;">
            {
                for self.layout.month_labels.iter().map(|(week, label)| {
                    let style = format!("position:absolute;left:{}px;", week * step as usize);
                    html! { <span style={style}>{ label.clone() }</span> }
                })
            }
        </div>
    };

    let weeks = html! {
        <div class="calendar-weeks" style="display:flex;">
            {
                for self.layout.weeks.iter().map(|week| html! {
                    <div class="calendar-week">
                        {
                            for week.iter().map(|cell| match cell {
                                Some(cell) => Self::render_block(
                                    settings,
                                    settings.theme.color(scheme, cell.level),
                                    Some(cell.tooltip()),
                                ),
                                None => Self::render_block(settings, empty_color, None),
                            })
                        }
                    </div>
                })
            }
        </div>
    };

    let footer_total = if settings.hide_total_count {
      html! {}
    } else {
      html! {
          <span class="calendar-total">{ total_count_label(self.layout.total) }</span>
      }
    };

    let footer_legend = if settings
      .hide_color_legend
    {
      html! {}
    } else {
      html! {
          <span class="calendar-legend" style="display:inline-flex;align-items:center;">
              { "Less" }
              {
                  for (0..LEVELS as u8).map(|level| {
                      Self::render_block(settings, settings.theme.color(scheme, level), None)
                  })
              }
              { "More" }
          </span>
      }
    };

    let style = format!(
      "font-size:{}px;",
      settings.font_size
    );
    html! {
        <div class="calendar-heatmap" style={style}>
            <div class="calendar-body" style="display:flex;">
                { weekday_column }
                <div>
                    { month_row }
                    { weeks }
                </div>
            </div>
            <div class="calendar-footer">
                { footer_total }
                { footer_legend }
            </div>
        </div>
    }
  }
}
