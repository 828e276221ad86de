use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::layout::{Constraint, Flex, Layout};
use ratatui::prelude::{Frame, Rect};
use ratatui::style::{Color, Modifier, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{
    Component, ErrorBanner, ErrorBannerProps, SearchBar, SearchBarProps, WeatherPanel,
    WeatherPanelProps,
};
use crate::action::Action;
use crate::condition::Background;
use crate::state::AppState;

/// Props for WeatherDisplay - read-only view of state
pub struct WeatherDisplayProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// The whole screen: header, search, error banner, results, help bar
pub struct WeatherDisplay {
    search: SearchBar,
}

impl Default for WeatherDisplay {
    fn default() -> Self {
        Self {
            search: SearchBar::new(),
        }
    }
}

impl WeatherDisplay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for WeatherDisplay {
    type Props<'a> = WeatherDisplayProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        if let EventKind::Key(key) = event {
            match key.code {
                KeyCode::Esc => return vec![Action::Quit],
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return vec![Action::Quit];
                }
                KeyCode::F(5) => return vec![Action::WeatherRefresh],
                _ => {}
            }
        }

        let state = props.state;
        self.search
            .handle_event(
                event,
                SearchBarProps {
                    value: &state.city,
                    loading: state.loading,
                    spinner: state.spinner_frame(),
                    accent: state.background().accent(),
                    is_focused: true,
                },
            )
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: WeatherDisplayProps<'_>) {
        let state = props.state;
        let background = state.background();
        let error_height = ErrorBanner::height(state.error.as_deref());

        let chunks = Layout::vertical([
            Constraint::Length(3),            // Header
            Constraint::Length(3),            // Search
            Constraint::Length(error_height), // Error banner
            Constraint::Min(1),               // Results
            Constraint::Length(1),            // Help bar
        ])
        .split(area);

        render_header(frame, chunks[0], background);

        self.search.render(
            frame,
            chunks[1],
            SearchBarProps {
                value: &state.city,
                loading: state.loading,
                spinner: state.spinner_frame(),
                accent: background.accent(),
                is_focused: props.is_focused,
            },
        );

        ErrorBanner.render(
            frame,
            chunks[2],
            ErrorBannerProps {
                message: state.error.as_deref(),
            },
        );

        match &state.weather {
            Some(snapshot) => {
                let mut panel = WeatherPanel;
                panel.render(
                    frame,
                    chunks[3],
                    WeatherPanelProps {
                        snapshot,
                        background,
                    },
                );
            }
            None if state.is_busy() => {
                render_placeholder(
                    frame,
                    chunks[3],
                    Line::from(vec![
                        Span::styled(
                            state.spinner_frame(),
                            Style::default().fg(background.accent()),
                        ),
                        Span::styled(
                            " Loading weather data...",
                            Style::default().fg(Color::Gray),
                        ),
                    ]),
                );
            }
            None => {
                render_placeholder(
                    frame,
                    chunks[3],
                    Line::from(vec![
                        Span::styled(
                            "Type a city and press ",
                            Style::default().fg(Color::DarkGray),
                        ),
                        Span::styled("Enter", Style::default().fg(Color::Cyan).bold()),
                    ]),
                );
            }
        }

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[4],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("enter", "search"),
                    StatusBarHint::new("f5", "refresh"),
                    StatusBarHint::new("esc", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

/// Title strip painted with the background treatment's three gradient stops.
fn render_header(frame: &mut Frame, area: Rect, background: Background) {
    let stops = background.gradient();
    let bands = Layout::horizontal([
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ])
    .split(area);
    for (band, color) in bands.iter().zip(stops) {
        frame.render_widget(Block::new().style(Style::default().bg(color)), *band);
    }

    let title = Paragraph::new(vec![
        Line::from(Span::styled(
            "Weather App",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ))
        .centered(),
        Line::from(Span::styled(
            "Check weather conditions worldwide",
            Style::default().fg(Color::Rgb(230, 230, 240)),
        ))
        .centered(),
    ]);
    let [text_area] = Layout::vertical([Constraint::Length(2)])
        .flex(Flex::Center)
        .areas(area);
    frame.render_widget(title, text_area);
}

fn render_placeholder(frame: &mut Frame, area: Rect, message: Line<'_>) {
    let [row] = Layout::vertical([Constraint::Length(1)])
        .flex(Flex::Center)
        .areas(area);
    frame.render_widget(Paragraph::new(message.centered()), row);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Condition;
    use crate::state::WeatherSnapshot;
    use crossterm::event::KeyEvent;
    use tui_dispatch::testing::*;

    fn snapshot() -> WeatherSnapshot {
        WeatherSnapshot {
            name: "Reykjavik".into(),
            country: "IS".into(),
            condition: Condition::Snow,
            condition_id: 600,
            description: "light snow".into(),
            temperature: -1.6,
            feels_like: -6.2,
            humidity: 93,
            wind_speed: 7.2,
            visibility: 4000,
            pressure: 998,
            sunrise: 1_700_000_000,
            sunset: 1_700_020_000,
        }
    }

    fn render(state: &AppState, width: u16, height: u16) -> String {
        let mut render = RenderHarness::new(width, height);
        let mut component = WeatherDisplay::new();
        render.render_to_string_plain(|frame| {
            let props = WeatherDisplayProps {
                state,
                is_focused: true,
            };
            component.render(frame, frame.area(), props);
        })
    }

    #[test]
    fn test_handle_event_refresh_and_quit() {
        let mut component = WeatherDisplay::new();
        let state = AppState::default();

        let refresh: Vec<_> = component
            .handle_event(
                &EventKind::Key(KeyEvent::new(KeyCode::F(5), KeyModifiers::NONE)),
                WeatherDisplayProps {
                    state: &state,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect();
        refresh.assert_first(Action::WeatherRefresh);

        let quit: Vec<_> = component
            .handle_event(
                &EventKind::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)),
                WeatherDisplayProps {
                    state: &state,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect();
        quit.assert_first(Action::Quit);
    }

    #[test]
    fn test_letters_go_to_search() {
        let mut component = WeatherDisplay::new();
        let state = AppState::default();

        let actions: Vec<_> = component
            .handle_event(
                &EventKind::Key(key("q")),
                WeatherDisplayProps {
                    state: &state,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect();

        assert!(!actions.contains(&Action::Quit));
    }

    #[test]
    fn test_render_snapshot_fields() {
        let state = AppState {
            weather: Some(snapshot()),
            ..Default::default()
        };

        let output = render(&state, 70, 40);

        assert!(output.contains("Reykjavik, IS"));
        assert!(output.contains("Light Snow"));
        assert!(output.contains("Feels like -6°C"));
        assert!(output.contains("93%"));
        assert!(output.contains("7.2 m/s"));
        assert!(output.contains("4.0 km"));
        assert!(output.contains("998 hPa"));
        assert!(output.contains("Sunrise"));
        assert!(output.contains("Sunset"));
    }

    #[test]
    fn test_render_error_banner_with_snapshot() {
        let state = AppState {
            weather: Some(snapshot()),
            error: Some("Failed to fetch weather data".into()),
            ..Default::default()
        };

        let output = render(&state, 70, 40);

        assert!(output.contains("Failed to fetch weather data"));
        assert!(output.contains("Reykjavik, IS"));
    }

    #[test]
    fn test_render_loading_placeholder() {
        let state = AppState {
            loading: true,
            ..Default::default()
        };

        let output = render(&state, 60, 20);
        assert!(output.contains("Loading weather data..."));
        assert!(output.contains("Searching..."));
    }
}
