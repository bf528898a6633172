use std::io::{self, IsTerminal, Write};

use chrono::{DateTime, Utc};
use folio_core::calendar::{
    CalendarLayout, ColorScheme, LEVELS, profile_url, total_count_label, weekday_label,
};
use folio_core::config::CalendarSettings;
use folio_core::format_relative_age;
use folio_core::timeline::{EMPTY_MESSAGE, LOADING_MESSAGE};
use folio_core::TimelineView;
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    /// Colours only when stdout is a terminal.
    pub fn for_stdout() -> Self {
        Self {
            color: io::stdout().is_terminal(),
        }
    }

    pub fn plain() -> Self {
        Self { color: false }
    }

    #[tracing::instrument(skip_all)]
    pub fn write_timeline<W: Write>(
        &self,
        mut out: W,
        view: &TimelineView,
        now: DateTime<Utc>,
    ) -> anyhow::Result<()> {
        let items = match view {
            TimelineView::Loading => {
                writeln!(out, "{LOADING_MESSAGE}")?;
                return Ok(());
            }
            TimelineView::Error(message) => {
                writeln!(out, "{}", self.paint(message, "31"))?;
                return Ok(());
            }
            TimelineView::Empty => {
                writeln!(out, "{EMPTY_MESSAGE}")?;
                return Ok(());
            }
            TimelineView::Items(items) => items,
        };

        let rows = items
            .iter()
            .map(|item| {
                (
                    format!("{} {}", item.icon().glyph(), item.sentence()),
                    format_relative_age(item.timestamp, now),
                )
            })
            .collect::<Vec<_>>();
        let width = rows
            .iter()
            .map(|(text, _)| UnicodeWidthStr::width(text.as_str()))
            .max()
            .unwrap_or(0);

        for (idx, (text, age)) in rows.iter().enumerate() {
            let connector = if idx + 1 == rows.len() { "└" } else { "├" };
            let padding = width.saturating_sub(UnicodeWidthStr::width(text.as_str()));
            writeln!(
                out,
                "{connector} {text}{}  {}",
                " ".repeat(padding),
                self.paint(&age, "2")
            )?;
        }
        Ok(())
    }

    #[tracing::instrument(skip_all, fields(weeks = layout.weeks.len()))]
    pub fn write_calendar<W: Write>(
        &self,
        mut out: W,
        layout: &CalendarLayout,
        settings: &CalendarSettings,
        scheme: ColorScheme,
        username: &str,
    ) -> anyhow::Result<()> {
        writeln!(out, "{}", profile_url(username))?;

        let label_width = if settings.show_weekday_labels { 4 } else { 0 };
        let mut month_line = " ".repeat(label_width);
        let mut cursor = 0;
        for (week, label) in &layout.month_labels {
            let column = week * 2;
            if column < cursor {
                continue;
            }
            month_line.push_str(&" ".repeat(column - cursor));
            month_line.push_str(label);
            cursor = column + label.len();
        }
        writeln!(out, "{}", month_line.trim_end())?;

        for row in 0..7 {
            let mut line = String::new();
            if settings.show_weekday_labels {
                line.push_str(&format!("{:<4}", weekday_label(row).unwrap_or("")));
            }
            for week in &layout.weeks {
                match &week[row] {
                    Some(cell) => {
                        let color = settings.theme.color(scheme, cell.level);
                        line.push_str(&self.block(color, cell.level));
                    }
                    None => line.push_str("  "),
                }
            }
            writeln!(out, "{}", line.trim_end())?;
        }

        if !settings.hide_total_count {
            writeln!(out, "{}", total_count_label(layout.total))?;
        }
        if !settings.hide_color_legend {
            let mut legend = String::from("Less ");
            for level in 0..LEVELS as u8 {
                legend.push_str(&self.block(settings.theme.color(scheme, level), level));
            }
            legend.push_str("More");
            writeln!(out, "{legend}")?;
        }
        Ok(())
    }

    fn block(&self, hex: &str, level: u8) -> String {
        match (self.color, parse_hex(hex)) {
            (true, Some((r, g, b))) => format!("\x1b[38;2;{r};{g};{b}m■\x1b[0m "),
            _ => format!("{} ", level_glyph(level)),
        }
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

fn level_glyph(level: u8) -> char {
    match level {
        0 => '·',
        1 => '░',
        2 => '▒',
        3 => '▓',
        _ => '█',
    }
}

fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    let expanded = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect::<String>(),
        6 => digits.to_string(),
        _ => return None,
    };
    let channel = |idx: usize| u8::from_str_radix(expanded.get(idx..idx + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
