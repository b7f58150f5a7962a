//! Input line parsing and argument splitting.
//!
//! A raw line becomes a command-name fragment plus an argument tail; the
//! tail is later split into positional fields where the last field keeps the
//! rest of the line verbatim.

/// A raw input line split into command fragment and argument tail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine<'a> {
    /// Uppercased command token, or the empty string for a plain chat line.
    pub name: String,
    /// Everything after the command token, leading spaces stripped.
    pub rest: &'a str,
}

/// Split a raw input line into its command fragment and argument tail.
///
/// Lines not starting with `/` (including the empty line) are plain chat:
/// the whole line is the tail and the fragment is empty, which resolves to
/// the default command.
pub fn parse_command(line: &str) -> ParsedLine<'_> {
    if !line.starts_with('/') {
        return ParsedLine {
            name: String::new(),
            rest: line,
        };
    }
    let (token, rest) = match line.find(' ') {
        Some(space) => (&line[1..space], &line[space..]),
        None => (&line[1..], ""),
    };
    ParsedLine {
        name: token.to_uppercase(),
        rest: rest.trim_start_matches(' '),
    }
}

/// Split an argument tail into at most `max_args` fields.
///
/// Only the first `max_args - 1` space boundaries split; the final field
/// keeps all remaining text verbatim, embedded spaces included. When
/// `max_args` is zero the tail is discarded entirely, even if non-empty.
pub fn split_args(rest: &str, max_args: usize) -> Vec<String> {
    if rest.is_empty() || max_args == 0 {
        return Vec::new();
    }
    rest.splitn(max_args, ' ').map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::{parse_command, split_args};

    #[test]
    fn empty_line_is_the_default_command() {
        let parsed = parse_command("");
        assert_eq!(parsed.name, "");
        assert_eq!(parsed.rest, "");
    }

    #[test]
    fn plain_text_is_the_argument_tail() {
        let parsed = parse_command("hello there");
        assert_eq!(parsed.name, "");
        assert_eq!(parsed.rest, "hello there");
    }

    #[test]
    fn command_token_is_uppercased() {
        let parsed = parse_command("/JoIn #rust");
        assert_eq!(parsed.name, "JOIN");
        assert_eq!(parsed.rest, "#rust");
    }

    #[test]
    fn leading_spaces_before_the_tail_are_stripped() {
        let parsed = parse_command("/msg   alice hi");
        assert_eq!(parsed.name, "MSG");
        assert_eq!(parsed.rest, "alice hi");
    }

    #[test]
    fn bare_marker_resolves_to_the_default_command() {
        let parsed = parse_command("/");
        assert_eq!(parsed.name, "");
        assert_eq!(parsed.rest, "");
    }

    #[test]
    fn marker_then_space_keeps_the_tail() {
        let parsed = parse_command("/ hello");
        assert_eq!(parsed.name, "");
        assert_eq!(parsed.rest, "hello");
    }

    #[test]
    fn command_without_arguments_has_empty_tail() {
        let parsed = parse_command("/names");
        assert_eq!(parsed.name, "NAMES");
        assert_eq!(parsed.rest, "");
    }

    #[test]
    fn last_field_swallows_the_rest() {
        assert_eq!(
            split_args("#a,#b key1,key2", 2),
            vec!["#a,#b".to_string(), "key1,key2".to_string()]
        );
        assert_eq!(
            split_args("bob this has spaces", 2),
            vec!["bob".to_string(), "this has spaces".to_string()]
        );
    }

    #[test]
    fn zero_max_args_discards_the_tail() {
        assert!(split_args("extra text", 0).is_empty());
    }

    #[test]
    fn empty_tail_yields_no_arguments() {
        assert!(split_args("", 3).is_empty());
    }

    #[test]
    fn fewer_fields_than_max_are_kept_as_is() {
        assert_eq!(split_args("one", 3), vec!["one".to_string()]);
    }

    #[test]
    fn consecutive_spaces_stay_in_the_last_field() {
        assert_eq!(
            split_args("a  b", 2),
            vec!["a".to_string(), " b".to_string()]
        );
    }
}
