pub mod error_banner;
pub mod search_bar;
pub mod weather_display;
pub mod weather_panel;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use error_banner::{ErrorBanner, ErrorBannerProps, ERROR_ICON};
pub use search_bar::{SearchBar, SearchBarProps, PLACEHOLDER};
pub use weather_display::{WeatherDisplay, WeatherDisplayProps};
pub use weather_panel::{WeatherPanel, WeatherPanelProps};
