use crate::note::parse_timestamp;
use crate::theme::Palette;
use chrono::Local;
use yansi::Paint;

/// Formatting context passed through the rendering code.
pub struct FormatContext {
    pub use_color: bool,
    pub palette: Palette,
}

impl FormatContext {
    pub fn new(use_color: bool, palette: Palette) -> Self {
        Self { use_color, palette }
    }

    pub fn plain() -> Self {
        Self::new(false, Palette::LIGHT)
    }

    fn paint(&self, text: &str, (r, g, b): (u8, u8, u8)) -> String {
        if self.use_color {
            Paint::rgb(text, r, g, b).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn format_id(&self, id: &str) -> String {
        self.paint(id, self.palette.muted)
    }

    pub fn format_header(&self, text: &str) -> String {
        if self.use_color {
            let (r, g, b) = self.palette.header;
            Paint::rgb(text, r, g, b).bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn format_timestamp(&self, ts: &str) -> String {
        self.paint(&format_date(ts), self.palette.timestamp)
    }

    pub fn format_pin(&self, pinned: bool) -> String {
        if pinned { self.paint("*", self.palette.pin) } else { " ".to_string() }
    }

    /// Paint every case-insensitive occurrence of `query` in `text`.
    pub fn highlight_match(&self, text: &str, query: Option<&str>) -> String {
        let Some(q) = query else { return text.to_string() };
        if q.is_empty() || !self.use_color {
            return text.to_string();
        }
        let needle: Vec<char> = q.chars().flat_map(char::to_lowercase).collect();
        let (r, g, b) = self.palette.highlight;

        let mut out = String::new();
        let mut rest = text;
        while !rest.is_empty() {
            if let Some(len) = match_len(rest, &needle) {
                let (matched, after) = rest.split_at(len);
                out.push_str(&Paint::rgb(matched, r, g, b).bold().to_string());
                rest = after;
            } else {
                let mut chars = rest.chars();
                if let Some(c) = chars.next() {
                    out.push(c);
                }
                rest = chars.as_str();
            }
        }
        out
    }
}

/// Byte length of the prefix of `text` whose lowercase form equals `needle`.
fn match_len(text: &str, needle: &[char]) -> Option<usize> {
    let mut want = needle.iter();
    let mut pending = want.len();
    for (idx, c) in text.char_indices() {
        for lc in c.to_lowercase() {
            if want.next() != Some(&lc) {
                return None;
            }
            pending -= 1;
        }
        if pending == 0 {
            return Some(idx + c.len_utf8());
        }
    }
    None
}

/// `Dec 9, 2025 • 09:05 AM` in local time, or an empty string when the input
/// is missing or not a timestamp.
pub fn format_date(iso: &str) -> String {
    match parse_timestamp(iso) {
        Some(dt) => dt.with_timezone(&Local).format("%b %-d, %Y • %I:%M %p").to_string(),
        None => String::new(),
    }
}

/// First non-empty body line, or `[empty]`.
pub fn preview_line(body: &str) -> &str {
    body.lines().map(str::trim).find(|l| !l.is_empty()).unwrap_or("[empty]")
}

/// Truncate text to a width, appending an ellipsis when needed.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if text.chars().count() <= max_width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_width - 1).collect();
    out.push('…');
    out
}

pub fn terminal_columns() -> usize {
    terminal_size::terminal_size()
        .map(|(terminal_size::Width(w), _)| w as usize)
        .filter(|w| *w > 0)
        .unwrap_or(100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_context_leaves_text_alone() {
        let ctx = FormatContext::plain();
        assert_eq!(ctx.format_id("abc123"), "abc123");
        assert_eq!(ctx.format_header("Header"), "Header");
        assert_eq!(ctx.format_pin(true), "*");
        assert_eq!(ctx.highlight_match("hello world", Some("world")), "hello world");
    }

    #[test]
    fn color_context_adds_escapes() {
        let ctx = FormatContext::new(true, Palette::DARK);
        let id = ctx.format_id("abc123");
        assert!(id.contains("abc123"));
        assert!(id.len() > "abc123".len());
    }

    #[test]
    fn highlight_keeps_original_case() {
        let ctx = FormatContext::new(true, Palette::LIGHT);
        let out = ctx.highlight_match("Buy MILK and milk", Some("milk"));
        assert!(out.starts_with("Buy "));
        assert!(out.contains("MILK"));
        assert!(out.matches("\u{1b}[").count() >= 2);
        let none = ctx.highlight_match("bread", Some("milk"));
        assert_eq!(none, "bread");
    }

    #[test]
    fn match_len_handles_multibyte() {
        assert_eq!(match_len("Ébc", &['é', 'b']), Some(3));
        assert_eq!(match_len("ab", &['a', 'b', 'c']), None);
    }

    #[test]
    fn format_date_shapes_valid_and_rejects_invalid() {
        let out = format_date("2025-12-09T09:05:00.000Z");
        assert!(out.contains("2025"));
        assert!(out.contains('•'));
        assert_eq!(format_date("invalid-date"), "");
        assert_eq!(format_date(""), "");
    }

    #[test]
    fn preview_and_truncate() {
        assert_eq!(preview_line("\n  first line \nsecond"), "first line");
        assert_eq!(preview_line("   "), "[empty]");
        assert_eq!(truncate_with_ellipsis("abcdef", 4), "abc…");
        assert_eq!(truncate_with_ellipsis("abc", 4), "abc");
        assert_eq!(truncate_with_ellipsis("abc", 0), "");
    }
}
