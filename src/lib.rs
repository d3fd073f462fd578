pub mod args;
pub mod browse;
pub mod config;
pub mod debounce;
pub mod formatting;
pub mod gateway;
mod help;
pub mod list;
pub mod logging;
pub mod note;
pub mod render;
pub mod session;
pub mod store;
pub mod theme;

use args::{ArgParser, ListFlags};
use config::Config;
use formatting::{FormatContext, terminal_columns};
use gateway::{Gateway, LoadOutcome};
use note::NoteDraft;
use session::NotesSession;
use std::env;
use std::error::Error;
use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};
use store::FileStore;
use theme::{ThemeContext, ThemeOverride};
use tracing::debug;

/// Everything a command needs, built once per process.
pub struct App {
    pub config: Config,
    pub session: NotesSession<FileStore>,
    pub theme: ThemeContext,
}

impl App {
    pub fn start(config: Config) -> Result<Self, Box<dyn Error>> {
        let gateway = Gateway::new(open_store(&config)?);
        let theme = ThemeContext::init(&gateway, config.system_scheme);
        let session = NotesSession::open(gateway, config.seed_samples)?;
        debug!(dir = %config.data_dir.display(), dark = theme.is_dark(), "app started");
        Ok(Self { config, session, theme })
    }

    pub fn stop(self) {
        debug!(notes = self.session.notes().len(), "app stopped");
    }

    pub fn format_context(&self, plain: bool) -> FormatContext {
        FormatContext::new(self.config.use_color && !plain, self.theme.palette())
    }
}

fn open_store(config: &Config) -> std::io::Result<FileStore> {
    Ok(FileStore::open(&config.data_dir)?.with_quota(config.quota_bytes))
}

pub fn entry() -> Result<(), Box<dyn Error>> {
    logging::init();
    let mut args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        return help::run(Vec::new());
    }

    let cmd = args.remove(0);
    match cmd.as_str() {
        "help" | "-h" | "--help" => return help::run(args),
        "path" => {
            println!("{}", Config::from_env()?.data_dir.display());
            return Ok(());
        }
        "doctor" => return doctor(Config::from_env()?),
        _ => {}
    }

    let config = Config::from_env()?;
    match cmd.as_str() {
        "add" => add_note(args, config),
        "list" => with_app(config, |app| list_notes(args, app)),
        "view" => with_app(config, |app| view_note(args, app)),
        "edit" => with_app(config, |app| edit_note(args, app)),
        "pin" => with_app(config, |app| pin_note(args, app)),
        "delete" => with_app(config, |app| delete_notes(args, app)),
        "clear" => with_app(config, clear_notes),
        "theme" => with_app(config, |app| theme_command(args, app)),
        "browse" => with_app(config, |app| browse::run(args, app)),
        other => Err(format!("Unknown command: {other}. Try `pn help`.").into()),
    }
}

fn with_app(
    config: Config,
    run: impl FnOnce(&mut App) -> Result<(), Box<dyn Error>>,
) -> Result<(), Box<dyn Error>> {
    let mut app = App::start(config)?;
    let result = run(&mut app);
    app.stop();
    result
}

fn add_note(args: Vec<String>, config: Config) -> Result<(), Box<dyn Error>> {
    let mut parser = ArgParser::new(args, "add");
    let title = parser.next().ok_or("Usage: pn add <title> [body...]")?;
    let draft = NoteDraft::new(title, parser.collect_remaining().join(" "));
    // Reject bad input before anything is written, first-run seeding included.
    draft.validate()?;
    with_app(config, |app| {
        let note = app.session.add(draft)?;
        println!("Added note {} ({})", note.id, note.title);
        Ok(())
    })
}

fn list_notes(args: Vec<String>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let flags = ListFlags::parse(args, "list")?;
    let notes = app.session.visible(&flags.search, flags.sort);
    if notes.is_empty() {
        if flags.search.is_empty() {
            println!("No notes yet. Try `pn add <title>`.");
        } else {
            println!("No notes match \"{}\".", flags.search);
        }
        return Ok(());
    }
    let ctx = app.format_context(flags.plain);
    println!("{}", render::render_list(&notes, &flags.search, &ctx, terminal_columns()));
    Ok(())
}

fn view_note(args: Vec<String>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let mut parser = ArgParser::new(args, "view");
    let mut id: Option<String> = None;
    let mut plain = false;
    while let Some(arg) = parser.next() {
        match arg.as_str() {
            "--plain" => plain = true,
            other if other.starts_with('-') => return Err(parser.unknown(other)),
            other => {
                if id.is_none() {
                    id = Some(other.to_string());
                }
            }
        }
    }
    let id = id.ok_or("Usage: pn view <id> [--plain]")?;
    let note = app.session.find(&id).ok_or_else(|| format!("Note {id} not found"))?;
    println!("{}", render::render_note(note, &app.format_context(plain)));
    Ok(())
}

fn edit_note(args: Vec<String>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let mut parser = ArgParser::new(args, "edit");
    let mut id: Option<String> = None;
    let mut title: Option<String> = None;
    let mut body: Option<String> = None;
    while let Some(arg) = parser.next() {
        match arg.as_str() {
            "--title" => title = Some(parser.extract_value(&arg)?),
            "--body" => body = Some(parser.extract_value(&arg)?),
            other if other.starts_with('-') => return Err(parser.unknown(other)),
            other => {
                if id.is_none() {
                    id = Some(other.to_string());
                }
            }
        }
    }
    let id = id.ok_or("Usage: pn edit <id> [--title <text>] [--body <text>]")?;
    let current = app.session.find(&id).ok_or_else(|| format!("Note {id} not found"))?;

    let draft = if title.is_none() && body.is_none() {
        edit_in_editor(&app.config.data_dir, &id, &current.title, &current.body)?
    } else {
        NoteDraft::new(
            title.unwrap_or_else(|| current.title.clone()),
            body.unwrap_or_else(|| current.body.clone()),
        )
    };
    let note = app.session.edit(&id, draft)?;
    println!("Updated {}", note.id);
    Ok(())
}

/// Round-trip a note through `$EDITOR` as `Title: ...`, `---`, body.
fn edit_in_editor(
    dir: &Path,
    id: &str,
    title: &str,
    body: &str,
) -> Result<NoteDraft, Box<dyn Error>> {
    let path = dir.join(format!(".edit-{id}.txt"));
    fs::write(&path, format!("Title: {title}\n---\n{body}"))?;

    let editor = env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
    let status = Command::new(&editor)
        .arg(&path)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status();
    let raw = fs::read_to_string(&path);
    let _ = fs::remove_file(&path);
    if !status?.success() {
        return Err("Editor exited with non-zero status".into());
    }
    Ok(parse_edit_buffer(&raw?))
}

fn parse_edit_buffer(raw: &str) -> NoteDraft {
    let (header, body) = match raw.split_once("\n---\n") {
        Some((h, b)) => (h, b),
        None => match raw.strip_suffix("\n---") {
            Some(h) => (h, ""),
            None => ("", raw),
        },
    };
    let title = header
        .lines()
        .find_map(|l| l.strip_prefix("Title:"))
        .map(str::trim)
        .unwrap_or_default();
    NoteDraft::new(title, body)
}

fn pin_note(args: Vec<String>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let id = args.first().ok_or("Usage: pn pin <id>")?;
    let note = app.session.toggle_pin(id)?;
    let verb = if note.pinned { "Pinned" } else { "Unpinned" };
    println!("{verb} {}", note.id);
    Ok(())
}

fn delete_notes(args: Vec<String>, app: &mut App) -> Result<(), Box<dyn Error>> {
    if args.is_empty() {
        return Err("Usage: pn delete <id>...".into());
    }
    let mut deleted = 0;
    for id in args {
        if app.session.find(&id).is_none() {
            println!("Note {id} not found");
            continue;
        }
        app.session.delete(&id)?;
        println!("Deleted {id}");
        deleted += 1;
    }
    if deleted == 0 {
        println!("No notes deleted.");
    }
    Ok(())
}

fn clear_notes(app: &mut App) -> Result<(), Box<dyn Error>> {
    app.session.clear_all()?;
    println!("Deleted all notes.");
    Ok(())
}

fn theme_command(args: Vec<String>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let Some(choice) = args.first() else {
        println!("Theme: {}", app.theme.describe());
        return Ok(());
    };
    let value = match choice.to_ascii_lowercase().as_str() {
        "system" | "none" => None,
        other => Some(other.parse::<ThemeOverride>()?),
    };
    app.theme.set_override(app.session.gateway_mut(), value)?;
    println!("Theme: {}", app.theme.describe());
    Ok(())
}

fn doctor(config: Config) -> Result<(), Box<dyn Error>> {
    let gateway = Gateway::new(open_store(&config)?);
    match gateway.load_checked()? {
        LoadOutcome::Missing => println!("No stored notes."),
        LoadOutcome::Loaded(notes) => println!("OK: {} notes readable.", notes.len()),
        LoadOutcome::Corrupt { reason } => {
            return Err(format!("Stored notes are corrupt: {reason}").into());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_buffer_parses_title_and_body() {
        let draft = parse_edit_buffer("Title:  Groceries \n---\nmilk\neggs\n");
        assert_eq!(draft, NoteDraft::new("Groceries", "milk\neggs\n"));
    }

    #[test]
    fn edit_buffer_without_separator_is_all_body() {
        let draft = parse_edit_buffer("just text");
        assert_eq!(draft.title, "");
        assert_eq!(draft.body, "just text");
        assert_eq!(parse_edit_buffer("Title: T\n---").title, "T");
    }
}
