//! Terminal rendering module for rich markdown output
//!
//! This module provides terminal rendering capabilities using termimad
//! for rich markdown display with optional fallback to plain text.

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

/// A run of markdown lines rendered the same way.
#[derive(Debug, PartialEq, Eq)]
enum Chunk<'a> {
    Header(&'a str),
    Table(Vec<&'a str>),
    Line(&'a str),
}

/// Splits markdown into headers, tables (consecutive `|` lines) and plain
/// lines.
fn chunks(markdown: &str) -> Vec<Chunk<'_>> {
    let mut chunks = Vec::new();
    for line in markdown.lines() {
        if line.starts_with('|') {
            if let Some(Chunk::Table(rows)) = chunks.last_mut() {
                rows.push(line);
            } else {
                chunks.push(Chunk::Table(vec![line]));
            }
        } else if line.starts_with('#') {
            chunks.push(Chunk::Header(line));
        } else {
            chunks.push(Chunk::Line(line));
        }
    }
    chunks
}

impl TerminalRenderer {
    /// Create a new terminal renderer
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();

        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.code_block.set_bg(Color::AnsiValue(238));
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Render markdown text to terminal
    pub fn render(&self, markdown: &str) -> Result<()> {
        if !self.rich_enabled {
            print!("{markdown}");
            return Ok(());
        }

        // Headers keep their hash marks so plan and task levels stay visible
        for chunk in chunks(markdown) {
            match chunk {
                Chunk::Header(line) => println!("\x1b[34m{line}\x1b[0m"),
                Chunk::Table(rows) => self.skin.print_text(&rows.join("\n")),
                Chunk::Line(line) => {
                    self.skin.print_inline(line);
                    println!();
                }
            }
        }
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_renderer() {
        let renderer = TerminalRenderer::new(false);
        assert!(!renderer.rich_enabled);
    }

    #[test]
    fn test_default_is_rich() {
        let renderer = TerminalRenderer::default();
        assert!(renderer.rich_enabled);
    }

    #[test]
    fn test_chunks_group_table_rows() {
        let markdown = "## Completion\n\n| Day | Rate |\n|---|---|\n| Mon | 50% |\nDone";
        assert_eq!(
            chunks(markdown),
            vec![
                Chunk::Header("## Completion"),
                Chunk::Line(""),
                Chunk::Table(vec!["| Day | Rate |", "|---|---|", "| Mon | 50% |"]),
                Chunk::Line("Done"),
            ]
        );
    }
}
