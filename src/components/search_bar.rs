use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Borders, Paragraph},
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, BorderStyle, Padding, TextInput, TextInputProps, TextInputStyle,
};

use super::Component;
use crate::action::Action;

pub const PLACEHOLDER: &str = "Enter city name...";

/// City search field with a submit affordance
pub struct SearchBar {
    input: TextInput,
}

impl Default for SearchBar {
    fn default() -> Self {
        Self {
            input: TextInput::new(),
        }
    }
}

pub struct SearchBarProps<'a> {
    pub value: &'a str,
    pub loading: bool,
    pub spinner: &'a str,
    pub accent: Color,
    pub is_focused: bool,
}

fn submit_city(_: String) -> Action {
    Action::CitySubmit
}

fn render_cursor(_: usize) -> Action {
    Action::Render
}

fn input_style(accent: Color) -> TextInputStyle {
    TextInputStyle {
        base: BaseStyle {
            border: Some(BorderStyle {
                borders: Borders::ALL,
                style: Style::default().fg(Color::DarkGray),
                focused_style: Some(Style::default().fg(accent)),
            }),
            padding: Padding::xy(1, 0),
            bg: None,
            fg: None,
        },
        placeholder_style: Some(Style::default().fg(Color::DarkGray)),
        cursor_style: None,
    }
}

impl SearchBar {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for SearchBar {
    type Props<'a> = SearchBarProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }
        let EventKind::Key(key) = event else {
            return Vec::new();
        };

        // Enter submits through the callback; the input never sees it
        if key.code == KeyCode::Enter {
            return vec![submit_city(props.value.to_string())];
        }

        let input_props = TextInputProps {
            value: props.value,
            placeholder: PLACEHOLDER,
            is_focused: props.is_focused,
            style: input_style(props.accent),
            on_change: Action::CityChange,
            on_submit: submit_city,
            on_cursor_move: Some(render_cursor),
        };
        self.input
            .handle_event(event, input_props)
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks =
            Layout::horizontal([Constraint::Min(10), Constraint::Length(16)]).split(area);

        let input_props = TextInputProps {
            value: props.value,
            placeholder: PLACEHOLDER,
            is_focused: props.is_focused,
            style: input_style(props.accent),
            on_change: Action::CityChange,
            on_submit: submit_city,
            on_cursor_move: Some(render_cursor),
        };
        self.input.render(frame, chunks[0], input_props);

        let button = if props.loading {
            Line::from(vec![
                Span::styled(props.spinner, Style::default().fg(props.accent)),
                Span::styled(" Searching...", Style::default().fg(Color::Gray)),
            ])
        } else {
            Line::from(vec![
                Span::styled(
                    "⏎ ",
                    Style::default()
                        .fg(props.accent)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled("Search", Style::default().fg(Color::White)),
            ])
        };
        // vertically centre in the 3-row bar
        let button_area = Rect {
            y: chunks[1].y + chunks[1].height / 2,
            height: 1.min(chunks[1].height),
            ..chunks[1]
        };
        frame.render_widget(Paragraph::new(button.centered()), button_area);
    }
}
