//! Text output for lists of notes and single notes.

use crate::formatting::{FormatContext, preview_line, truncate_with_ellipsis};
use crate::note::Note;

/// One line per note: pin marker, id, updated date, title, and a body preview
/// clipped to `width` columns.
pub fn render_list(notes: &[Note], query: &str, ctx: &FormatContext, width: usize) -> String {
    let query = (!query.is_empty()).then_some(query);
    let mut lines = Vec::with_capacity(notes.len());
    for note in notes {
        let date = crate::formatting::format_date(&note.updated_at);
        let fixed = note.id.chars().count() + date.chars().count() + 6;
        let text = format!("{}  {}", note.title, preview_line(&note.body));
        let text = truncate_with_ellipsis(&text, width.saturating_sub(fixed).max(20));
        lines.push(format!(
            "{} {} {} {}",
            ctx.format_pin(note.pinned),
            ctx.format_id(&note.id),
            ctx.format_timestamp(&note.updated_at),
            ctx.highlight_match(&text, query)
        ));
    }
    lines.join("\n")
}

pub fn render_note(note: &Note, ctx: &FormatContext) -> String {
    let pin = if note.pinned { " [pinned]" } else { "" };
    format!(
        "{}{}\nId: {}\nCreated: {}\nUpdated: {}\n\n{}",
        ctx.format_header(&format!("# {}", note.title)),
        pin,
        ctx.format_id(&note.id),
        ctx.format_timestamp(&note.created_at),
        ctx.format_timestamp(&note.updated_at),
        note.body
    )
}
