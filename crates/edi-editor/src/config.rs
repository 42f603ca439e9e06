//! Session configuration.
//!
//! Everything the session loop and the renderer need to know that is not
//! derived from the terminal itself. The defaults reproduce the stock edi
//! screen: a `~` down the left margin, a centred welcome banner, and
//! Ctrl-Q to quit.

use edi_term::input::ctrl;

/// Welcome banner shown when no override is given.
pub const DEFAULT_BANNER: &str = concat!("Edi-The Editor v", env!("CARGO_PKG_VERSION"));

/// Glyph drawn at the start of every row without content.
pub const DEFAULT_MARKER: char = '~';

/// Editor configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Text centred on the banner row. Clipped to the window width.
    pub banner: String,
    /// Left-margin glyph for empty rows.
    pub marker: char,
    /// The raw byte that ends the session (Ctrl-Q by default).
    pub quit_key: u8,
}

impl Config {
    /// Replace the banner text.
    #[must_use]
    pub fn with_banner(mut self, banner: impl Into<String>) -> Self {
        self.banner = banner.into();
        self
    }

    /// Replace the margin glyph.
    #[must_use]
    pub fn with_marker(mut self, marker: char) -> Self {
        self.marker = marker;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            banner: DEFAULT_BANNER.to_owned(),
            marker: DEFAULT_MARKER,
            quit_key: ctrl(b'q'),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_banner_carries_version() {
        let config = Config::default();
        assert!(config.banner.starts_with("Edi-The Editor v"));
        assert!(config.banner.ends_with(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn default_quit_is_ctrl_q() {
        assert_eq!(Config::default().quit_key, 0x11);
    }

    #[test]
    fn builders_replace_fields() {
        let config = Config::default().with_banner("hello").with_marker('|');
        assert_eq!(config.banner, "hello");
        assert_eq!(config.marker, '|');
        assert_eq!(config.quit_key, 0x11);
    }
}
