//! Property tests for command lines taken from the environment.

use proptest::prelude::*;
use std::path::Path;

use texrun::{Config, ToolCommand};

fn word() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9._=/-]{1,12}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Parsing never panics on arbitrary input.
    #[test]
    fn property_parse_never_panics(s in "(?s).{0,128}") {
        let _ = ToolCommand::parse(&s);
    }

    /// PROPERTY: Words separated by any run of whitespace parse back to the
    /// same program and arguments.
    #[test]
    fn property_parse_splits_on_whitespace(
        words in proptest::collection::vec(word(), 1..6),
        sep in "[ \t]{1,3}",
    ) {
        let line = format!(" {} ", words.join(&sep));
        let cmd = ToolCommand::parse(&line).unwrap();

        prop_assert_eq!(cmd.program(), words[0].as_str());
        prop_assert_eq!(cmd.args(), &words[1..]);
    }

    /// PROPERTY: Arguments without placeholders survive expansion unchanged.
    #[test]
    fn property_expand_keeps_plain_arguments(
        words in proptest::collection::vec(word(), 1..6),
    ) {
        let cmd = ToolCommand::new(words[0].clone(), words[1..].iter().cloned());
        let paths = Config::default().artifact_paths(Path::new("/job"));

        prop_assert_eq!(cmd.expand(&paths), cmd);
    }
}
