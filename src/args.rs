use crate::list::SortMode;
use std::error::Error;

pub struct ArgParser {
    iter: std::vec::IntoIter<String>,
    command_name: String,
}

impl ArgParser {
    pub fn new(args: Vec<String>, command_name: &str) -> Self {
        Self { iter: args.into_iter(), command_name: command_name.to_string() }
    }

    /// Extract a string value for a flag
    pub fn extract_value(&mut self, flag: &str) -> Result<String, Box<dyn Error>> {
        self.iter.next().ok_or_else(|| {
            format!("Provide a value after {} for {}", flag, self.command_name).into()
        })
    }

    pub fn extract_sort(&mut self, flag: &str) -> Result<SortMode, Box<dyn Error>> {
        Ok(self.extract_value(flag)?.parse::<SortMode>()?)
    }

    /// Error for a flag this command does not know
    pub fn unknown(&self, flag: &str) -> Box<dyn Error> {
        format!("Unknown flag for {}: {}", self.command_name, flag).into()
    }

    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<String> {
        self.iter.next()
    }

    pub fn collect_remaining(self) -> Vec<String> {
        self.iter.collect()
    }
}

/// Flags shared by the listing commands
#[derive(Debug, Default)]
pub struct ListFlags {
    pub search: String,
    pub sort: SortMode,
    pub plain: bool,
}

impl ListFlags {
    pub fn parse(args: Vec<String>, command_name: &str) -> Result<Self, Box<dyn Error>> {
        let mut flags = Self::default();
        let mut parser = ArgParser::new(args, command_name);
        while let Some(arg) = parser.next() {
            match arg.as_str() {
                "-s" | "--search" => flags.search = parser.extract_value(&arg)?,
                "--sort" => flags.sort = parser.extract_sort(&arg)?,
                "--plain" => flags.plain = true,
                other => return Err(parser.unknown(other)),
            }
        }
        Ok(flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn extract_value_reports_missing() {
        let mut parser = ArgParser::new(strings(&["--title"]), "edit");
        let flag = parser.next().unwrap();
        let err = parser.extract_value(&flag).unwrap_err();
        assert_eq!(err.to_string(), "Provide a value after --title for edit");
    }

    #[test]
    fn collect_remaining_keeps_order() {
        let parser = ArgParser::new(strings(&["id1", "id2", "id3"]), "delete");
        assert_eq!(parser.collect_remaining(), vec!["id1", "id2", "id3"]);
    }

    #[test]
    fn list_flags_parse() {
        let flags =
            ListFlags::parse(strings(&["-s", "milk", "--sort", "az", "--plain"]), "list").unwrap();
        assert_eq!(flags.search, "milk");
        assert_eq!(flags.sort, SortMode::Az);
        assert!(flags.plain);

        let defaults = ListFlags::parse(Vec::new(), "list").unwrap();
        assert_eq!(defaults.sort, SortMode::Pinned);
        assert!(defaults.search.is_empty());

        assert!(ListFlags::parse(strings(&["--sort", "size"]), "list").is_err());
        assert!(ListFlags::parse(strings(&["--bogus"]), "list").is_err());
    }
}
