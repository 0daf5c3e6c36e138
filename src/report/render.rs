//! Console rendering of step reports.

use std::io::{self, Write};

use colored::Colorize;

use super::StepReport;

/// Writes the opening banner of a run.
pub fn render_banner<W: Write>(out: &mut W, title: &str, width: usize) -> io::Result<()> {
    let rule = "=".repeat(width);
    writeln!(out, "{rule}")?;
    writeln!(out, "{}", title.bold())?;
    writeln!(out, "{rule}")?;
    writeln!(out)
}

/// Writes one step: heading, a dashed rule, its lines and two blank lines.
pub fn render_step<W: Write>(out: &mut W, step: &StepReport, width: usize) -> io::Result<()> {
    writeln!(out, "{}", step.heading.bold())?;
    writeln!(out, "{}", "-".repeat(width))?;
    for line in &step.lines {
        writeln!(
            out,
            "{:indent$}{}{}",
            "",
            line.marker.prefix(),
            line.text,
            indent = line.indent
        )?;
    }
    writeln!(out)?;
    writeln!(out)
}

/// Writes the closing banner of a run.
pub fn render_closing<W: Write>(out: &mut W, title: &str, width: usize) -> io::Result<()> {
    let rule = "=".repeat(width);
    writeln!(out, "{rule}")?;
    writeln!(out, "{}", title.bold())?;
    writeln!(out, "{rule}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{Line, Marker};

    fn rendered(step: &StepReport) -> String {
        colored::control::set_override(false);
        let mut out = Vec::new();
        render_step(&mut out, step, 10).expect("write to Vec cannot fail");
        String::from_utf8(out).expect("report is UTF-8")
    }

    #[test]
    fn test_render_step_layout() {
        let mut step = StepReport::new("TEST 9: Example");
        step.pass("Status Code: 200");
        step.push(Line::new(Marker::Fail, "Root div: NOT FOUND").indented(3));
        step.warn("No API URL pattern found in bundle");
        step.plain("raw text");

        let text = rendered(&step);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "TEST 9: Example");
        assert_eq!(lines[1], "----------");
        assert_eq!(lines[2], "✅ Status Code: 200");
        assert_eq!(lines[3], "   ❌ Root div: NOT FOUND");
        assert_eq!(lines[4], "⚠️  No API URL pattern found in bundle");
        assert_eq!(lines[5], "raw text");
        assert!(text.ends_with("raw text\n\n\n"));
    }

    #[test]
    fn test_render_banner_and_closing() {
        colored::control::set_override(false);
        let mut out = Vec::new();
        render_banner(&mut out, "DEBUGGING", 5).unwrap();
        render_closing(&mut out, "DONE", 5).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "=====\nDEBUGGING\n=====\n\n=====\nDONE\n=====\n");
    }
}
