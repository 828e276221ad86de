//! Icon sprites with auto-sizing and multi-color layer support
//!
//! Each icon has a Small and a Large variant. Cloud-based icons composite a
//! cloud layer with a foreground layer (drops, flakes, bolt).

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span, Text};

use crate::condition::Icon;

// ============================================================================
// Sprite data
// Spaces are transparent; leading blank lines position foreground layers.
// ============================================================================

mod sprite_data {
    pub mod sun {
        pub const SMALL: &str = r"   \   /
    .-.
-- (   ) --
    `-'
   /   \";
        pub const LARGE: &str = r"        \   |   /
     .   \  |  /   .
          .---.
  ----   (     )   ----
          `---'
     '   /  |  \   '
        /   |   \";
    }

    pub mod cloud {
        pub const SMALL: &str = r"     .--.
  .-(    ).
 (___.__)__)";
        pub const LARGE: &str = r"          .--.
       .-(    ).
    .-(         ).
   (___.__)___.__)";
    }

    pub mod rain {
        pub const SMALL: &str = "\n\n\n   ' ' ' '\n  ' ' ' '";
        pub const LARGE: &str =
            "\n\n\n\n     ' ' ' ' ' '\n    ' ' ' ' ' '\n   ' ' ' ' ' '";
    }

    pub mod snow {
        pub const SMALL: &str = "\n\n\n   * * * *\n  * * * *";
        pub const LARGE: &str =
            "\n\n\n\n     * * * * * *\n    * * * * * *\n   * * * * * *";
    }

    pub mod bolt {
        pub const SMALL: &str = "\n\n\n     _/\n     /";
        pub const LARGE: &str = "\n\n\n\n        /_\n         /\n        /";
    }
}

// ============================================================================
// Layer compositing
// ============================================================================

/// A single sprite layer with its content and color
struct SpriteLayer {
    content: &'static str,
    color: Color,
}

/// Composite multiple layers into Text, treating spaces as transparent
fn composite_layers(layers: &[SpriteLayer]) -> Text<'static> {
    if layers.is_empty() {
        return Text::default();
    }

    let layer_lines: Vec<Vec<Vec<char>>> = layers
        .iter()
        .map(|l| l.content.lines().map(|line| line.chars().collect()).collect())
        .collect();

    let max_lines = layer_lines.iter().map(Vec::len).max().unwrap_or(0);
    let max_width = layer_lines
        .iter()
        .flat_map(|lines| lines.iter())
        .map(Vec::len)
        .max()
        .unwrap_or(0);

    let mut result_lines = Vec::with_capacity(max_lines);

    for line_idx in 0..max_lines {
        let mut spans = Vec::with_capacity(max_width);

        for col_idx in 0..max_width {
            // Last layer is the foreground
            let mut found_char = ' ';
            let mut found_color = Color::Reset;

            for (layer_idx, layer) in layers.iter().enumerate().rev() {
                let ch = layer_lines[layer_idx]
                    .get(line_idx)
                    .and_then(|line| line.get(col_idx));
                if let Some(&ch) = ch {
                    if ch != ' ' {
                        found_char = ch;
                        found_color = layer.color;
                        break;
                    }
                }
            }

            spans.push(Span::styled(
                found_char.to_string(),
                Style::default().fg(found_color),
            ));
        }

        result_lines.push(Line::from(spans));
    }

    Text::from(result_lines)
}

// ============================================================================
// Types
// ============================================================================

/// Sprite size categories
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteSize {
    /// 5 lines
    Small,
    /// 7 lines
    Large,
}

impl SpriteSize {
    /// Largest sprite that fits the available height, or `None` for the emoji fallback.
    pub fn for_height(available: u16) -> Option<Self> {
        match available {
            0..=4 => None,
            5..=6 => Some(SpriteSize::Small),
            _ => Some(SpriteSize::Large),
        }
    }

    pub fn height(self) -> u16 {
        match self {
            SpriteSize::Small => 5,
            SpriteSize::Large => 7,
        }
    }
}

const CLOUD_GRAY: Color = Color::Rgb(200, 200, 210);
const STORM_GRAY: Color = Color::Rgb(140, 140, 155);

fn pick(size: SpriteSize, small: &'static str, large: &'static str) -> &'static str {
    match size {
        SpriteSize::Small => small,
        SpriteSize::Large => large,
    }
}

/// Get icon art for the given size
pub fn get_sprite(icon: Icon, size: SpriteSize) -> Text<'static> {
    use sprite_data::{bolt, cloud, rain, snow, sun};

    let cloud_layer = |color| SpriteLayer {
        content: pick(size, cloud::SMALL, cloud::LARGE),
        color,
    };

    let layers = match icon {
        Icon::Sun => vec![SpriteLayer {
            content: pick(size, sun::SMALL, sun::LARGE),
            color: Color::Yellow,
        }],
        Icon::Cloud => vec![cloud_layer(CLOUD_GRAY)],
        Icon::RainCloud => vec![
            cloud_layer(STORM_GRAY),
            SpriteLayer {
                content: pick(size, rain::SMALL, rain::LARGE),
                color: Color::Rgb(80, 140, 200),
            },
        ],
        Icon::SnowCloud => vec![
            cloud_layer(CLOUD_GRAY),
            SpriteLayer {
                content: pick(size, snow::SMALL, snow::LARGE),
                color: Color::Rgb(200, 220, 255),
            },
        ],
        Icon::Lightning => vec![
            cloud_layer(STORM_GRAY),
            SpriteLayer {
                content: pick(size, bolt::SMALL, bolt::LARGE),
                color: Color::Rgb(250, 204, 21),
            },
        ],
    };

    composite_layers(&layers)
}

/// Sprite for the available height, or `None` if too small.
pub fn icon_sprite(icon: Icon, available_height: u16) -> Option<Text<'static>> {
    let size = SpriteSize::for_height(available_height)?;
    Some(get_sprite(icon, size))
}
