use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
    Frame,
};

use super::Component;
use crate::action::Action;

pub const ERROR_ICON: &str = "\u{26a0}\u{fe0f}";

/// Height the banner takes when there is something to show
pub const BANNER_HEIGHT: u16 = 3;

/// Red banner for the current failure message
pub struct ErrorBanner;

pub struct ErrorBannerProps<'a> {
    pub message: Option<&'a str>,
}

impl ErrorBanner {
    pub fn height(message: Option<&str>) -> u16 {
        if message.is_some() {
            BANNER_HEIGHT
        } else {
            0
        }
    }
}

impl Component<Action> for ErrorBanner {
    type Props<'a> = ErrorBannerProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let Some(message) = props.message else {
            return;
        };
        let red = Color::Rgb(239, 68, 68);
        let banner = Paragraph::new(
            Line::from(vec![
                Span::raw(format!("{ERROR_ICON} ")),
                Span::styled(message.to_string(), Style::default().fg(Color::Rgb(254, 202, 202))),
            ])
            .centered(),
        )
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(red)),
        );
        frame.render_widget(banner, area);
    }
}
