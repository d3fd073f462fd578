use crate::formatting::terminal_columns;
use std::error::Error;

mod content;

#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum Section {
    Command,
    Environment,
}

impl Section {
    fn label(self) -> &'static str {
        match self {
            Section::Command => "Commands",
            Section::Environment => "Environment",
        }
    }
}

#[derive(Clone, Copy)]
pub(crate) struct HelpFlag<'a> {
    pub name: &'a str,
    pub desc: &'a str,
}

#[derive(Clone, Copy)]
pub(crate) struct HelpTopic<'a> {
    pub name: &'a str,
    pub summary: &'a str,
    pub usage: &'a str,
    pub details: &'a [&'a str],
    pub flags: &'a [HelpFlag<'a>],
    pub section: Section,
    pub examples: &'a [&'a str],
}

#[derive(Clone, Copy)]
pub(crate) struct HelpBook<'a> {
    pub title: &'a str,
    pub usage: &'a str,
    pub topics: &'a [HelpTopic<'a>],
    pub footer: &'a [&'a str],
}

impl<'a> HelpBook<'a> {
    fn find(&self, name: &str) -> Option<&HelpTopic<'a>> {
        self.topics.iter().find(|topic| topic.name.eq_ignore_ascii_case(name))
    }

    fn in_section(&self, section: Section) -> impl Iterator<Item = &HelpTopic<'a>> {
        self.topics.iter().filter(move |t| t.section == section)
    }
}

pub(crate) fn run(args: Vec<String>) -> Result<(), Box<dyn Error>> {
    println!("{}", render(args.first().map(String::as_str), terminal_columns()));
    Ok(())
}

/// Overview when `topic` is `None` or unknown, otherwise the topic page.
pub(crate) fn render(topic: Option<&str>, width: usize) -> String {
    let book = content::book();
    let printer = HelpPrinter::new(width.clamp(64, 120));
    let lines = match topic.map(|t| (t, book.find(t))) {
        Some((_, Some(entry))) => printer.render_topic(&book, entry),
        Some((name, None)) => {
            eprintln!("Unknown help topic: {name}");
            printer.render_overview(&book)
        }
        None => printer.render_overview(&book),
    };
    lines.join("\n")
}

struct HelpPrinter {
    width: usize,
}

impl HelpPrinter {
    fn new(width: usize) -> Self {
        Self { width }
    }

    fn render_overview(&self, book: &HelpBook<'_>) -> Vec<String> {
        let mut out = vec![book.title.to_string(), format!("usage: {}", book.usage), String::new()];
        for section in [Section::Command, Section::Environment] {
            let rows: Vec<(String, String)> = book
                .in_section(section)
                .map(|t| (t.usage.to_string(), t.summary.to_string()))
                .collect();
            out.extend(self.render_block(section.label(), &rows));
        }
        self.push_footer(book, &mut out);
        out
    }

    fn render_topic(&self, book: &HelpBook<'_>, topic: &HelpTopic<'_>) -> Vec<String> {
        let mut out = vec![
            format!("{} - {}", topic.name, topic.summary),
            format!("usage: {}", topic.usage),
            String::new(),
        ];
        for line in topic.details {
            out.extend(self.wrap(line, self.width));
        }
        if !topic.details.is_empty() {
            out.push(String::new());
        }
        let flags: Vec<(String, String)> =
            topic.flags.iter().map(|f| (f.name.to_string(), f.desc.to_string())).collect();
        out.extend(self.render_block("Options", &flags));

        if !topic.examples.is_empty() {
            out.push("Examples:".to_string());
            for ex in topic.examples {
                out.push(format!("  {ex}"));
            }
            out.push(String::new());
        }
        self.push_footer(book, &mut out);
        out
    }

    fn push_footer(&self, book: &HelpBook<'_>, out: &mut Vec<String>) {
        for line in book.footer {
            out.extend(self.wrap(line, self.width));
        }
    }

    fn render_block(&self, title: &str, rows: &[(String, String)]) -> Vec<String> {
        if rows.is_empty() {
            return Vec::new();
        }
        let min_desc = self.width / 2;
        let mut label_width = rows.iter().map(|r| r.0.len()).max().unwrap_or(0).min(38);
        if label_width + 4 + min_desc > self.width {
            label_width = self.width.saturating_sub(min_desc + 4);
        }
        let desc_width = self.width.saturating_sub(label_width + 4).max(min_desc);

        let mut out = vec![format!("{title}:")];
        for (label, desc) in rows {
            let label_lines = self.wrap(label, label_width);
            let desc_lines = self.wrap(desc, desc_width);
            for idx in 0..label_lines.len().max(desc_lines.len()) {
                let l = label_lines.get(idx).map(String::as_str).unwrap_or("");
                let d = desc_lines.get(idx).map(String::as_str).unwrap_or("");
                out.push(format!("  {l:label_width$}  {d}").trim_end().to_string());
            }
        }
        out.push(String::new());
        out
    }

    fn wrap(&self, text: &str, width: usize) -> Vec<String> {
        let mut out = Vec::new();
        let mut line = String::new();
        for word in text.split_whitespace() {
            if line.is_empty() {
                line.push_str(word);
            } else if line.len() + 1 + word.len() <= width {
                line.push(' ');
                line.push_str(word);
            } else {
                out.push(std::mem::replace(&mut line, word.to_string()));
            }
        }
        if !line.is_empty() || out.is_empty() {
            out.push(line);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overview_lists_every_command() {
        let text = render(None, 100);
        for name in ["add", "list", "edit", "pin", "delete", "browse", "theme", "doctor"] {
            assert!(text.contains(&format!("pn {name}")), "missing {name}");
        }
        assert!(text.contains("POCKET_NOTES_DIR"));
    }

    #[test]
    fn topic_page_shows_options() {
        let text = render(Some("list"), 100);
        assert!(text.starts_with("list - "));
        assert!(text.contains("--sort <mode>"));
    }

    #[test]
    fn wrap_respects_width() {
        let printer = HelpPrinter::new(64);
        let lines = printer.wrap("one two three four five six", 9);
        assert!(lines.iter().all(|l| l.len() <= 9));
        assert_eq!(lines.join(" "), "one two three four five six");
    }
}
