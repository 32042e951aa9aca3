use supports_color::{Stream, on};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Rgb,        // True color (16M colors)
    Indexed256, // 256-color palette
}

#[derive(Debug)]
pub struct TerminalCapabilities {
    pub supports_rgb: bool,
    pub is_terminal_app: bool,
    pub recommended_color_mode: ColorMode,
}

impl TerminalCapabilities {
    /// Detect terminal capabilities and recommend a color mode
    pub fn detect() -> Self {
        let is_terminal_app = std::env::var("TERM_PROGRAM")
            .map(|v| v == "Apple_Terminal")
            .unwrap_or(false);

        let supports_rgb = on(Stream::Stdout)
            .map(|level| level.has_16m)
            .unwrap_or(false);

        Self {
            supports_rgb,
            is_terminal_app,
            recommended_color_mode: Self::recommend(supports_rgb, is_terminal_app),
        }
    }

    /// Terminal.app misrenders truecolor escapes, so it always gets the palette
    fn recommend(supports_rgb: bool, is_terminal_app: bool) -> ColorMode {
        if supports_rgb && !is_terminal_app {
            ColorMode::Rgb
        } else {
            ColorMode::Indexed256
        }
    }

    /// Resolve an explicit choice, falling back to detection.
    pub fn resolve(choice: Option<ColorMode>) -> ColorMode {
        choice.unwrap_or_else(|| Self::detect().recommended_color_mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capabilities_detection() {
        let caps = TerminalCapabilities::detect();
        if !caps.supports_rgb {
            assert_eq!(caps.recommended_color_mode, ColorMode::Indexed256);
        }
    }

    #[test]
    fn test_recommendation() {
        assert_eq!(TerminalCapabilities::recommend(true, false), ColorMode::Rgb);
        assert_eq!(
            TerminalCapabilities::recommend(true, true),
            ColorMode::Indexed256
        );
        assert_eq!(
            TerminalCapabilities::recommend(false, false),
            ColorMode::Indexed256
        );
    }

    #[test]
    fn test_explicit_choice_wins() {
        assert_eq!(
            TerminalCapabilities::resolve(Some(ColorMode::Rgb)),
            ColorMode::Rgb
        );
    }
}
