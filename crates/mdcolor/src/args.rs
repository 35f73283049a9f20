//! Command-line arguments.

use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use mdcolor_render::DEFAULT_THEME;

/// When to emit ANSI escape sequences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Only when standard output is a color-capable terminal
    Auto,
    /// Always, even into pipes and files
    #[default]
    Always,
    /// Never; output plain text
    Never,
}

#[derive(Debug, Parser)]
#[command(
    name = "mdcolor",
    version,
    about = "Processes Markdown from a file or stdin and outputs colorized text.",
    long_about = "Processes Markdown from a file or stdin and outputs colorized text.\n\n\
If a file is given and output is to a terminal, the output is paged \
(`less -R` unless --pager says otherwise)."
)]
pub struct Args {
    /// Markdown file to render; omit it or pass `-` to read standard input
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// When to color the output
    #[arg(long, value_enum, value_name = "WHEN", default_value_t = ColorChoice::Always)]
    pub color: ColorChoice,

    /// YAML stylesheet overriding the default styles
    #[arg(long, value_name = "FILE", env = "MDCOLOR_THEME")]
    pub theme: Option<PathBuf>,

    /// Syntax theme for code blocks
    #[arg(
        long,
        value_name = "NAME",
        env = "MDCOLOR_HIGHLIGHT_THEME",
        default_value = DEFAULT_THEME
    )]
    pub highlight_theme: String,

    /// Width used for rules and code block frames [default: terminal width]
    #[arg(long, value_name = "COLS")]
    pub width: Option<usize>,

    /// Pager command, run through the shell
    #[arg(long, value_name = "CMD", env = "MDCOLOR_PAGER", default_value = "less -R")]
    pub pager: String,

    /// Never page, even when writing a file to a terminal
    #[arg(long)]
    pub no_pager: bool,

    /// Log debug information to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// The file to read, or `None` for standard input.
    pub fn input_file(&self) -> Option<&Path> {
        self.file
            .as_deref()
            .filter(|path| path.as_os_str() != "-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use serial_test::serial;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("mdcolor").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    #[serial]
    fn test_defaults() {
        std::env::remove_var("MDCOLOR_PAGER");
        std::env::remove_var("MDCOLOR_THEME");
        std::env::remove_var("MDCOLOR_HIGHLIGHT_THEME");
        let args = parse(&[]);
        assert_eq!(args.input_file(), None);
        assert_eq!(args.color, ColorChoice::Always);
        assert_eq!(args.pager, "less -R");
        assert_eq!(args.highlight_theme, DEFAULT_THEME);
        assert_eq!(args.theme, None);
        assert!(!args.no_pager);
    }

    #[test]
    fn test_dash_means_stdin() {
        assert_eq!(parse(&["-"]).input_file(), None);
        assert_eq!(
            parse(&["notes.md"]).input_file(),
            Some(Path::new("notes.md"))
        );
    }

    #[test]
    fn test_flags() {
        let args = parse(&["--color", "never", "--width", "60", "--no-pager", "-v", "a.md"]);
        assert_eq!(args.color, ColorChoice::Never);
        assert_eq!(args.width, Some(60));
        assert!(args.no_pager);
        assert!(args.verbose);
    }

    #[test]
    fn test_rejects_unknown_color_choice() {
        let result = Args::try_parse_from(["mdcolor", "--color", "sometimes"]);
        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn test_pager_from_environment() {
        std::env::set_var("MDCOLOR_PAGER", "more");
        let args = parse(&[]);
        std::env::remove_var("MDCOLOR_PAGER");
        assert_eq!(args.pager, "more");
    }

    #[test]
    #[serial]
    fn test_flag_beats_environment() {
        std::env::set_var("MDCOLOR_HIGHLIGHT_THEME", "InspiredGitHub");
        let args = parse(&["--highlight-theme", "Solarized (dark)"]);
        std::env::remove_var("MDCOLOR_HIGHLIGHT_THEME");
        assert_eq!(args.highlight_theme, "Solarized (dark)");
    }
}
