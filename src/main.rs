fn main() {
    if let Err(err) = pocket_notes::entry() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
