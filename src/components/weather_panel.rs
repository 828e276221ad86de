use artbox::{
    fonts, integrations::ratatui::ArtBox, Alignment as ArtAlignment, Color as ArtColor, Fill,
    LinearGradient, Renderer,
};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
    Frame,
};

use super::Component;
use crate::action::Action;
use crate::condition::Background;
use crate::format::{capitalize_words, format_local_time, format_temp};
use crate::sprites::{self, SpriteSize};
use crate::state::WeatherSnapshot;

pub const MAP_PIN: &str = "\u{1f4cd}";

/// Results card for one snapshot
pub struct WeatherPanel;

pub struct WeatherPanelProps<'a> {
    pub snapshot: &'a WeatherSnapshot,
    pub background: Background,
}

/// Fixed rows: description, feels-like, blank, 2x2 detail grid, blank, sun times.
const LAYOUT_FIXED: u16 = 1 + 1 + 1 + 4 + 1 + 2;

/// Temperature caps to try, largest first: terminus(6), miniwi(4), plain(1).
const TEMP_TIERS: [u16; 3] = [6, 4, 1];

fn font_stack() -> Vec<artbox::Font> {
    fonts::stack(&["terminus", "miniwi"])
}

struct LayoutSizing {
    sprite: Option<SpriteSize>,
    sprite_h: u16,
    temp_cap: u16,
}

/// Fit the largest sprite by shrinking the temperature first; emoji only
/// when no sprite fits even with plain text.
fn compute_layout(area_height: u16) -> LayoutSizing {
    for &tcap in &TEMP_TIERS {
        let budget = area_height.saturating_sub(tcap + LAYOUT_FIXED);
        if let Some(size) = SpriteSize::for_height(budget) {
            return LayoutSizing {
                sprite: Some(size),
                sprite_h: size.height(),
                temp_cap: tcap,
            };
        }
    }
    LayoutSizing {
        sprite: None,
        sprite_h: 1,
        temp_cap: TEMP_TIERS[0],
    }
}

fn art_color(color: Color) -> ArtColor {
    match color {
        Color::Rgb(r, g, b) => ArtColor::rgb(r, g, b),
        _ => ArtColor::rgb(240, 240, 250),
    }
}

fn temperature_fill(background: Background) -> Fill {
    Fill::Linear(LinearGradient::horizontal(
        art_color(background.accent()),
        ArtColor::rgb(240, 240, 250),
    ))
}

impl Component<Action> for WeatherPanel {
    type Props<'a> = WeatherPanelProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let WeatherPanelProps {
            snapshot,
            background,
        } = props;
        let accent = background.accent();

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(accent))
            .title(
                Line::from(vec![
                    Span::raw(format!(" {MAP_PIN} ")),
                    Span::styled(snapshot.display_name(), Style::default().fg(Color::White).bold()),
                    Span::raw(" "),
                ])
                .centered(),
            );
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let sizing = compute_layout(inner.height);
        let chunks = Layout::vertical([
            Constraint::Length(sizing.sprite_h),
            Constraint::Max(sizing.temp_cap),
            Constraint::Length(1), // description
            Constraint::Length(1), // feels like
            Constraint::Length(1),
            Constraint::Length(4), // details
            Constraint::Length(1),
            Constraint::Length(2), // sunrise / sunset
        ])
        .flex(Flex::Center)
        .split(inner);

        // Icon
        let icon = snapshot.condition.icon();
        match sizing.sprite {
            Some(size) => {
                frame.render_widget(
                    Paragraph::new(sprites::get_sprite(icon, size)).alignment(Alignment::Center),
                    chunks[0],
                );
            }
            None => {
                frame.render_widget(Paragraph::new(Line::from(icon.emoji()).centered()), chunks[0]);
            }
        }

        // Temperature
        let temp_text = format_temp(snapshot.temperature);
        let renderer = Renderer::new(font_stack())
            .with_plain_fallback()
            .with_alignment(ArtAlignment::Center)
            .with_fill(temperature_fill(background));
        frame.render_widget(ArtBox::new(&renderer, &temp_text), chunks[1]);

        frame.render_widget(
            Paragraph::new(
                Line::from(Span::styled(
                    capitalize_words(&snapshot.description),
                    Style::default().fg(Color::White),
                ))
                .centered(),
            ),
            chunks[2],
        );
        frame.render_widget(
            Paragraph::new(
                Line::from(Span::styled(
                    format!("Feels like {}", format_temp(snapshot.feels_like)),
                    Style::default().fg(Color::Gray),
                ))
                .centered(),
            ),
            chunks[3],
        );

        render_details(frame, chunks[5], snapshot, accent);
        render_sun_times(frame, chunks[7], snapshot);
    }
}

fn detail_cell(frame: &mut Frame, area: Rect, label: &str, value: String, accent: Color) {
    let rows = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).split(area);
    let label = Line::from(Span::styled(
        label.to_string(),
        Style::default().fg(Color::Gray),
    ));
    let value = Line::from(Span::styled(value, Style::default().fg(accent).bold()));
    frame.render_widget(Paragraph::new(label.centered()), rows[0]);
    frame.render_widget(Paragraph::new(value.centered()), rows[1]);
}

fn render_details(frame: &mut Frame, area: Rect, snapshot: &WeatherSnapshot, accent: Color) {
    let rows = Layout::vertical([Constraint::Length(2), Constraint::Length(2)]).split(area);
    let top = Layout::horizontal([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)]).split(rows[0]);
    let bottom =
        Layout::horizontal([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)]).split(rows[1]);

    detail_cell(frame, top[0], "Humidity", format!("{}%", snapshot.humidity), accent);
    detail_cell(frame, top[1], "Wind Speed", format!("{} m/s", snapshot.wind_speed), accent);
    detail_cell(
        frame,
        bottom[0],
        "Visibility",
        format!("{:.1} km", snapshot.visibility_km()),
        accent,
    );
    detail_cell(frame, bottom[1], "Pressure", format!("{} hPa", snapshot.pressure), accent);
}

fn render_sun_times(frame: &mut Frame, area: Rect, snapshot: &WeatherSnapshot) {
    let cols = Layout::horizontal([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .horizontal_margin(2)
        .split(area);
    let dim = Style::default().fg(Color::DarkGray);
    let bold = Style::default().fg(Color::White).bold();

    frame.render_widget(
        Paragraph::new(vec![
            Line::from(Span::styled("Sunrise", dim)),
            Line::from(Span::styled(format_local_time(snapshot.sunrise), bold)),
        ]),
        cols[0],
    );
    frame.render_widget(
        Paragraph::new(vec![
            Line::from(Span::styled("Sunset", dim)),
            Line::from(Span::styled(format_local_time(snapshot.sunset), bold)),
        ])
        .alignment(Alignment::Right),
        cols[1],
    );
}
