//! Short binary name (`pn`) that forwards to the `pocket_notes` library.

fn main() {
    if let Err(err) = pocket_notes::entry() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
