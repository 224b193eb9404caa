//! Colors and glyphs for status lines.

use console::Style;

use super::Tone;

/// Styles for each kind of line.
#[derive(Debug, Clone)]
pub struct Palette {
    success: Style,
    warning: Style,
    error: Style,
    header: Style,
    hint: Style,
}

impl Palette {
    pub fn colored() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().yellow(),
            error: Style::new().red().bold(),
            header: Style::new().cyan().bold(),
            hint: Style::new().cyan().dim(),
        }
    }

    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            header: Style::new(),
            hint: Style::new(),
        }
    }

    /// Colored only when allowed, `NO_COLOR` is unset and stdout is a TTY.
    pub fn for_terminal(colors: bool) -> Self {
        let tty = console::Term::stdout().is_term();
        if colors && tty && std::env::var_os("NO_COLOR").is_none() {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    /// `✓ msg`, `⚠ msg`, `✗ msg`, or the bare message for information.
    pub fn line(&self, tone: Tone, msg: &str) -> String {
        let style = match tone {
            Tone::Info => return msg.to_string(),
            Tone::Success => &self.success,
            Tone::Warning => &self.warning,
            Tone::Error => &self.error,
        };
        match tone.icon() {
            Some(icon) => style.apply_to(format!("{} {}", icon, msg)).to_string(),
            None => style.apply_to(msg).to_string(),
        }
    }

    pub fn header(&self, title: &str) -> String {
        self.header.apply_to(title).to_string()
    }

    pub fn hint(&self, hint: &str) -> String {
        format!("  {}", self.hint.apply_to(hint))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_lines_carry_icons() {
        let palette = Palette::plain();
        assert_eq!(palette.line(Tone::Success, "Cloned"), "✓ Cloned");
        assert_eq!(palette.line(Tone::Warning, "Mirror selected"), "⚠ Mirror selected");
        assert_eq!(palette.line(Tone::Error, "Clone failed"), "✗ Clone failed");
        assert_eq!(palette.line(Tone::Info, "Using mirror"), "Using mirror");
    }

    #[test]
    fn hints_are_indented() {
        assert_eq!(Palette::plain().hint("https://nodejs.org/"), "  https://nodejs.org/");
    }

    #[test]
    fn colors_can_be_refused() {
        let palette = Palette::for_terminal(false);
        assert_eq!(palette.header("ricsi installer"), "ricsi installer");
    }
}
