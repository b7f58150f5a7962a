//! Command registry and metadata.
//!
//! An immutable table of command descriptors, built once at startup. The
//! dispatcher consults it for prefix resolution and arity bounds; HELP uses
//! it for listing. Nothing mutates it after construction.

use std::collections::BTreeMap;

/// Which handler a descriptor dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// The default command: a plain chat line sent to the current buffer.
    Chat,
    Help,
    Join,
    Me,
    Msg,
    Names,
    Part,
    Quit,
    Quote,
    Reply,
    Topic,
    Buffer,
}

/// Static metadata for a single command.
#[derive(Debug, Clone)]
pub struct CommandDescriptor {
    /// Canonical uppercase name; the empty string is the default command.
    pub name: &'static str,
    /// Whether the command may run while the home buffer is active.
    pub allow_home: bool,
    /// Minimum number of split arguments.
    pub min_args: usize,
    /// Maximum number of split arguments; `0` means the command takes none
    /// and any trailing text on the line is discarded.
    pub max_args: usize,
    pub usage: &'static str,
    pub description: &'static str,
    pub kind: CommandKind,
}

const BUILTIN: &[CommandDescriptor] = &[
    CommandDescriptor {
        name: "",
        allow_home: true,
        min_args: 1,
        max_args: 1,
        usage: "",
        description: "",
        kind: CommandKind::Chat,
    },
    CommandDescriptor {
        name: "HELP",
        allow_home: true,
        min_args: 0,
        max_args: 1,
        usage: "[command]",
        description: "show the list of commands, or how to use the given one",
        kind: CommandKind::Help,
    },
    CommandDescriptor {
        name: "JOIN",
        allow_home: true,
        min_args: 1,
        max_args: 2,
        usage: "<channels> [keys]",
        description: "join a channel",
        kind: CommandKind::Join,
    },
    CommandDescriptor {
        name: "ME",
        allow_home: true,
        min_args: 1,
        max_args: 1,
        usage: "<message>",
        description: "send an action (reply to last query if sent from home)",
        kind: CommandKind::Me,
    },
    CommandDescriptor {
        name: "MSG",
        allow_home: true,
        min_args: 2,
        max_args: 2,
        usage: "<target> <message>",
        description: "send a message to the given target",
        kind: CommandKind::Msg,
    },
    CommandDescriptor {
        name: "NAMES",
        allow_home: false,
        min_args: 0,
        max_args: 0,
        usage: "",
        description: "show the member list of the current channel",
        kind: CommandKind::Names,
    },
    CommandDescriptor {
        name: "PART",
        allow_home: true,
        min_args: 0,
        max_args: 2,
        usage: "[channel] [reason]",
        description: "part a channel",
        kind: CommandKind::Part,
    },
    CommandDescriptor {
        name: "QUIT",
        allow_home: true,
        min_args: 0,
        max_args: 1,
        usage: "[reason]",
        description: "quit minnow",
        kind: CommandKind::Quit,
    },
    CommandDescriptor {
        name: "QUOTE",
        allow_home: true,
        min_args: 1,
        max_args: 1,
        usage: "<raw message>",
        description: "send raw protocol data",
        kind: CommandKind::Quote,
    },
    CommandDescriptor {
        name: "REPLY",
        allow_home: true,
        min_args: 1,
        max_args: 1,
        usage: "<message>",
        description: "reply to the last query",
        kind: CommandKind::Reply,
    },
    CommandDescriptor {
        name: "TOPIC",
        allow_home: false,
        min_args: 0,
        max_args: 1,
        usage: "[topic]",
        description: "show or set the topic of the current channel",
        kind: CommandKind::Topic,
    },
    CommandDescriptor {
        name: "BUFFER",
        allow_home: true,
        min_args: 1,
        max_args: 1,
        usage: "<name>",
        description: "switch to the buffer containing a substring",
        kind: CommandKind::Buffer,
    },
];

/// Immutable name-to-descriptor table.
#[derive(Debug, Clone)]
pub struct Registry {
    by_name: BTreeMap<&'static str, CommandDescriptor>,
}

impl Registry {
    /// The standard minnow command set.
    pub fn builtin() -> Self {
        Self::from_descriptors(BUILTIN.iter().cloned())
    }

    /// Build a registry from descriptors.
    ///
    /// Panics on a duplicate name and on a default (empty-name) entry that is
    /// not allowed from home; both are startup programming errors, not
    /// runtime failures.
    pub fn from_descriptors(descriptors: impl IntoIterator<Item = CommandDescriptor>) -> Self {
        let mut by_name = BTreeMap::new();
        for descriptor in descriptors {
            if descriptor.name.is_empty() {
                assert!(
                    descriptor.allow_home,
                    "default command must be allowed from home"
                );
            }
            let name = descriptor.name;
            let previous = by_name.insert(name, descriptor);
            assert!(previous.is_none(), "duplicate command name {name:?}");
        }
        Self { by_name }
    }

    /// Exact-name lookup.
    #[allow(dead_code)]
    pub fn lookup(&self, name: &str) -> Option<&CommandDescriptor> {
        self.by_name.get(name)
    }

    /// All descriptors, in lexicographic name order.
    pub fn all(&self) -> impl Iterator<Item = &CommandDescriptor> + '_ {
        self.by_name.values()
    }

    /// Help text for every command with a description: a `NAME usage` line,
    /// an indented description line, and a blank separator per command.
    pub fn help_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for descriptor in self.all() {
            if descriptor.description.is_empty() {
                continue;
            }
            lines.push(format!("  {} {}", descriptor.name, descriptor.usage));
            lines.push(format!("    {}", descriptor.description));
            lines.push(String::new());
        }
        lines
    }

    /// Help text for the commands whose name contains `search` (expected
    /// uppercase). Empty when nothing matches.
    pub fn help_lines_matching(&self, search: &str) -> Vec<String> {
        let mut lines = Vec::new();
        for descriptor in self.all() {
            if !descriptor.name.contains(search) {
                continue;
            }
            lines.push(format!("{} {}", descriptor.name, descriptor.usage));
            lines.push(format!("  {}", descriptor.description));
            lines.push(String::new());
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::{CommandDescriptor, CommandKind, Registry};

    #[test]
    fn builtin_reproduces_canonical_arities() {
        let registry = Registry::builtin();

        let default = registry.lookup("").expect("default command");
        assert!(default.allow_home);
        assert_eq!((default.min_args, default.max_args), (1, 1));

        let msg = registry.lookup("MSG").expect("MSG");
        assert_eq!((msg.min_args, msg.max_args), (2, 2));

        let names = registry.lookup("NAMES").expect("NAMES");
        assert!(!names.allow_home);
        assert_eq!(names.max_args, 0);

        let part = registry.lookup("PART").expect("PART");
        assert_eq!((part.min_args, part.max_args), (0, 2));

        assert_eq!(registry.all().count(), 12);
    }

    #[test]
    fn all_iterates_in_name_order() {
        let registry = Registry::builtin();
        let names: Vec<&str> = registry.all().map(|descriptor| descriptor.name).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
        assert_eq!(names.first(), Some(&""));
    }

    #[test]
    #[should_panic(expected = "duplicate command name")]
    fn duplicate_name_panics_at_construction() {
        let descriptor = CommandDescriptor {
            name: "JOIN",
            allow_home: true,
            min_args: 1,
            max_args: 2,
            usage: "<channels> [keys]",
            description: "join a channel",
            kind: CommandKind::Join,
        };
        Registry::from_descriptors([descriptor.clone(), descriptor]);
    }

    #[test]
    #[should_panic(expected = "allowed from home")]
    fn default_command_must_allow_home() {
        Registry::from_descriptors([CommandDescriptor {
            name: "",
            allow_home: false,
            min_args: 1,
            max_args: 1,
            usage: "",
            description: "",
            kind: CommandKind::Chat,
        }]);
    }

    #[test]
    fn help_lines_skip_the_default_command() {
        let registry = Registry::builtin();
        let lines = registry.help_lines();
        assert!(lines
            .iter()
            .any(|line| line.contains("JOIN <channels> [keys]")));
        // 11 described commands, three lines each.
        assert_eq!(lines.len(), 33);
    }

    #[test]
    fn help_lines_matching_is_substring_based() {
        let registry = Registry::builtin();
        let lines = registry.help_lines_matching("UI");
        assert!(lines.iter().any(|line| line.starts_with("QUIT")));
        assert!(registry.help_lines_matching("ZZZ").is_empty());
    }
}
