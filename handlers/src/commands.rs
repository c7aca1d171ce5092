//! Menu entries and the `/help` text built from them.

use dbot_core::Command;

/// One menu entry shown by `/help`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub command: Command,
    pub description: &'static str,
}

/// Menu in display order.
pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        command: Command::Start,
        description: "Start using this bot",
    },
    CommandSpec {
        command: Command::Country,
        description: "Please, write a country name",
    },
    CommandSpec {
        command: Command::Statistics,
        description: "Statistics by users queries",
    },
    CommandSpec {
        command: Command::Help,
        description: "Useful information about this bot",
    },
    CommandSpec {
        command: Command::Contacts,
        description: "Developer contacts",
    },
];

pub const HELP_HEADER: &str = "The following commands are available \n";
pub const HELP_FOOTER: &str = "COVID_22_BOT speaks english, be careful and take care";

/// Help text listing every entry of `commands` once, in order.
pub fn render_help(commands: &[CommandSpec]) -> String {
    let mut text = String::from(HELP_HEADER);
    for spec in commands {
        text.push_str(&format!("/{}: {}\n", spec.command.name(), spec.description));
    }
    text.push_str(HELP_FOOTER);
    text
}
