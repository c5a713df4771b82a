use std::io::Write;

use owo_colors::OwoColorize;
use pdftext_ingest::Strategy;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Write extracted text followed by a newline.
pub fn print_text(w: &mut dyn Write, text: &str) -> std::io::Result<()> {
    writeln!(w, "{}", text)?;
    w.flush()
}

/// Print the strategy chain in priority order with availability.
pub fn print_backends(
    w: &mut dyn Write,
    strategies: impl Iterator<Item = (Strategy, bool)>,
    color: ColorMode,
) -> std::io::Result<()> {
    for (i, (strategy, available)) in strategies.enumerate() {
        let status = if available { "available" } else { "not compiled in" };
        let label = format!("{:<12} {:<12}", strategy.name(), strategy.library());
        if color.enabled() {
            if available {
                writeln!(w, "{}. {} {}", i + 1, label.bold(), status.green())?;
            } else {
                writeln!(w, "{}. {} {}", i + 1, label.dimmed(), status.yellow())?;
            }
        } else {
            writeln!(w, "{}. {} {}", i + 1, label, status)?;
        }
    }
    Ok(())
}
