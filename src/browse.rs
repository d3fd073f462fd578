//! Line-driven notes screen. Plain lines are search queries and only the
//! last one typed before a pause is applied; `:`-prefixed lines act on notes.

use crate::App;
use crate::args::ArgParser;
use crate::debounce::Debouncer;
use crate::formatting::terminal_columns;
use crate::list::SortMode;
use crate::render::render_list;
use std::error::Error;
use std::io::{self, BufRead};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Instant;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Query(String),
    Sort(SortMode),
    Pin(String),
    Delete(String),
    Undo,
    Refresh,
    Quit,
    Invalid(String),
}

impl Input {
    pub fn parse(line: &str) -> Self {
        let Some(command) = line.trim().strip_prefix(':') else {
            return Input::Query(line.trim().to_string());
        };
        let mut parts = command.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let arg = parts.next().map(str::to_string);
        match (name, arg) {
            ("sort", Some(mode)) => match mode.parse() {
                Ok(mode) => Input::Sort(mode),
                Err(msg) => Input::Invalid(msg),
            },
            ("pin", Some(id)) => Input::Pin(id),
            ("delete", Some(id)) => Input::Delete(id),
            ("undo", None) => Input::Undo,
            ("refresh", None) => Input::Refresh,
            ("quit" | "q", None) => Input::Quit,
            _ => Input::Invalid(format!("Unknown browse command: :{command}")),
        }
    }
}

struct Screen {
    query: String,
    sort: SortMode,
}

pub fn run(args: Vec<String>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let mut parser = ArgParser::new(args, "browse");
    let mut screen = Screen { query: String::new(), sort: SortMode::default() };
    while let Some(arg) = parser.next() {
        match arg.as_str() {
            "--sort" => screen.sort = parser.extract_sort(&arg)?,
            other => return Err(parser.unknown(other)),
        }
    }

    let (tx, rx) = mpsc::channel::<String>();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    let mut debouncer: Debouncer<String> = Debouncer::new(app.config.debounce);
    show(app, &screen);
    loop {
        let received = match debouncer.deadline() {
            Some(due) => rx.recv_timeout(due.saturating_duration_since(Instant::now())),
            None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };
        match received {
            Ok(line) => match Input::parse(&line) {
                Input::Query(q) => debouncer.push(q, Instant::now()),
                Input::Quit => break,
                action => {
                    if let Some(q) = debouncer.flush() {
                        screen.query = q;
                    }
                    apply(app, &mut screen, action);
                    show(app, &screen);
                }
            },
            Err(RecvTimeoutError::Timeout) => {
                if let Some(q) = debouncer.poll(Instant::now()) {
                    apply_query(app, &mut screen, q);
                }
            }
            Err(RecvTimeoutError::Disconnected) => {
                if let Some(q) = debouncer.flush() {
                    apply_query(app, &mut screen, q);
                }
                break;
            }
        }
    }
    Ok(())
}

fn apply_query(app: &App, screen: &mut Screen, query: String) {
    if query != screen.query {
        debug!(%query, "search settled");
        screen.query = query;
        show(app, screen);
    }
}

/// Failures are reported and the screen stays usable.
fn apply(app: &mut App, screen: &mut Screen, input: Input) {
    let session = &mut app.session;
    let outcome = match input {
        Input::Sort(mode) => {
            screen.sort = mode;
            Ok(format!("Sorted by {mode}"))
        }
        Input::Pin(id) => session.toggle_pin(&id).map(|n| {
            if n.pinned { format!("Pinned {}", n.id) } else { format!("Unpinned {}", n.id) }
        }),
        Input::Delete(id) => {
            session.delete(&id).map(|n| format!("Deleted {} (:undo to restore)", n.id))
        }
        Input::Undo => session.undo_delete().map(|restored| match restored {
            Some(n) => format!("Restored {}", n.id),
            None => "Nothing to undo.".to_string(),
        }),
        Input::Refresh => session.refresh().map(|()| "Reloaded notes".to_string()),
        Input::Invalid(msg) => {
            eprintln!("{msg}");
            return;
        }
        Input::Query(_) | Input::Quit => return,
    };
    match outcome {
        Ok(msg) => println!("{msg}"),
        Err(err) => eprintln!("{err}"),
    }
}

fn show(app: &App, screen: &Screen) {
    let notes = app.session.visible(&screen.query, screen.sort);
    let ctx = app.format_context(false);
    println!(
        "{}",
        ctx.format_header(&format!(
            "-- {} notes (query: \"{}\", sort: {}) --",
            notes.len(),
            screen.query,
            screen.sort
        ))
    );
    if notes.is_empty() {
        println!("No matching notes.");
    } else {
        println!("{}", render_list(&notes, &screen.query, &ctx, terminal_columns()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_queries_and_commands() {
        assert_eq!(Input::parse("  milk "), Input::Query("milk".to_string()));
        assert_eq!(Input::parse(""), Input::Query(String::new()));
        assert_eq!(Input::parse(":sort za"), Input::Sort(SortMode::Za));
        assert_eq!(Input::parse(":pin abc"), Input::Pin("abc".to_string()));
        assert_eq!(Input::parse(":delete abc"), Input::Delete("abc".to_string()));
        assert_eq!(Input::parse(":undo"), Input::Undo);
        assert_eq!(Input::parse(":refresh"), Input::Refresh);
        assert_eq!(Input::parse(":q"), Input::Quit);
    }

    #[test]
    fn rejects_malformed_commands() {
        assert!(matches!(Input::parse(":sort size"), Input::Invalid(_)));
        assert!(matches!(Input::parse(":pin"), Input::Invalid(_)));
        assert!(matches!(Input::parse(":launch"), Input::Invalid(_)));
    }
}
