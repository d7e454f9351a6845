pub use colored::{Color, Colorize};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ColorScheme {
    pub foreground: Option<Color>,
    pub bold: bool,
    pub underline: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub command: ColorScheme,
    pub prompt: ColorScheme,
    pub success: ColorScheme,
    pub warning: ColorScheme,
    pub error: ColorScheme,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            command: ColorScheme {
                foreground: Some(Color::Green),
                bold: false,
                underline: false,
            },
            prompt: ColorScheme {
                foreground: Some(Color::Cyan),
                bold: true,
                underline: false,
            },
            success: ColorScheme {
                foreground: Some(Color::Green),
                bold: true,
                underline: false,
            },
            warning: ColorScheme {
                foreground: Some(Color::Yellow),
                bold: false,
                underline: false,
            },
            error: ColorScheme {
                foreground: Some(Color::Red),
                bold: true,
                underline: false,
            },
        }
    }
}

impl Theme {
    pub fn for_color_output(enabled: bool) -> Self {
        if enabled {
            Self::default()
        } else {
            Self::monochrome()
        }
    }

    /// No styling at all, so output can be piped or compared byte for byte.
    pub fn monochrome() -> Self {
        Self {
            command: ColorScheme::default(),
            prompt: ColorScheme::default(),
            success: ColorScheme::default(),
            warning: ColorScheme::default(),
            error: ColorScheme::default(),
        }
    }
}

impl ColorScheme {
    pub fn apply(&self, text: &str) -> colored::ColoredString {
        let mut colored_text: colored::ColoredString = text.into();

        if let Some(fg) = self.foreground {
            colored_text = colored_text.color(fg);
        }
        if self.bold {
            colored_text = colored_text.bold();
        }
        if self.underline {
            colored_text = colored_text.underline();
        }

        colored_text
    }
}
