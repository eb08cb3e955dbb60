//! Style constants and clap help styling configuration.

use anstyle::{AnsiColor, Color, Effects, Style};

/// Green: up-to-date files, successful writes.
pub(crate) const SUCCESS: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green)));

/// Red: stale files, failed runs.
pub(crate) const ERROR: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red)));

/// Yellow: undocumented entries that do not fail the run.
pub(crate) const WARNING: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow)));

/// Bold: section headers.
pub(crate) const HEADER: Style = Style::new().effects(Effects::BOLD);

/// Dimmed: hints and guidance text.
pub(crate) const HINT: Style = Style::new().effects(Effects::DIMMED);

/// Custom clap styles for help output, matching the CLI palette.
pub(crate) fn clap_styles() -> clap::builder::Styles {
    let accent = Style::new()
        .fg_color(Some(Color::Ansi(AnsiColor::Green)))
        .effects(Effects::BOLD);

    clap::builder::Styles::styled()
        .header(accent)
        .usage(accent)
        .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
        .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
        .error(
            Style::new()
                .fg_color(Some(Color::Ansi(AnsiColor::Red)))
                .effects(Effects::BOLD),
        )
        .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
        .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))))
}
