//! Line commands accepted on stdin.

use anyhow::bail;

pub const HELP: &str = "\
commands:
  locality <text>   type into the locality field (empty text clears it)
  plz <text>        type into the postal code field
  toggle            open or close the postal code dropdown
  select <code>     pick a postal code from the dropdown
  click <target>    pointer-down on a target (plz, toggle, dropdown, or anything else)
  show              print the current form
  help              print this message
  quit              shut down and exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Locality(String),
    PostalCode(String),
    Toggle,
    Select(String),
    Click(String),
    Show,
    Help,
    Quit,
}

impl Command {
    /// Parses one input line. Blank lines yield `None`.
    ///
    /// The argument of `locality` and `plz` is taken verbatim, inner spaces
    /// included, so `locality Frankfurt am Main` works as expected.
    pub fn parse(line: &str) -> anyhow::Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(verb, rest)| (verb, rest.trim()));

        let command = match verb {
            "locality" | "l" => Self::Locality(rest.to_owned()),
            "plz" | "p" => Self::PostalCode(rest.to_owned()),
            "toggle" | "t" => Self::Toggle,
            "select" | "s" if !rest.is_empty() => Self::Select(rest.to_owned()),
            "click" | "c" if !rest.is_empty() => Self::Click(rest.to_owned()),
            "select" | "s" | "click" | "c" => bail!("`{verb}` needs an argument"),
            "show" => Self::Show,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => bail!("unknown command `{other}`, try `help`"),
        };
        Ok(Some(command))
    }
}

/// Targets that belong to the postal code input and its dropdown.
pub fn in_postal_code_region(target: &str) -> bool {
    matches!(target, "plz" | "toggle" | "dropdown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_field_edits_verbatim() {
        assert_eq!(
            Command::parse("locality Frankfurt am Main").unwrap(),
            Some(Command::Locality("Frankfurt am Main".into()))
        );
        assert_eq!(
            Command::parse("  plz 80 331 ").unwrap(),
            Some(Command::PostalCode("80 331".into()))
        );
        assert_eq!(
            Command::parse("locality").unwrap(),
            Some(Command::Locality(String::new()))
        );
    }

    #[test]
    fn parses_dropdown_commands() {
        assert_eq!(Command::parse("toggle").unwrap(), Some(Command::Toggle));
        assert_eq!(
            Command::parse("select 10115").unwrap(),
            Some(Command::Select("10115".into()))
        );
        assert_eq!(
            Command::parse("click locality").unwrap(),
            Some(Command::Click("locality".into()))
        );
    }

    #[test]
    fn blank_lines_are_ignored() {
        assert_eq!(Command::parse("   ").unwrap(), None);
    }

    #[test]
    fn rejects_unknown_and_incomplete_commands() {
        assert!(Command::parse("frobnicate").is_err());
        assert!(Command::parse("select").is_err());
        assert!(Command::parse("click ").is_err());
    }

    #[test]
    fn region_covers_the_postal_code_widgets() {
        assert!(in_postal_code_region("plz"));
        assert!(in_postal_code_region("dropdown"));
        assert!(!in_postal_code_region("locality"));
        assert!(!in_postal_code_region("footer"));
    }
}
