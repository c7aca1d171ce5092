//! Unit tests for the command menu and help text.

use crate::{render_help, COMMANDS, HELP_FOOTER, HELP_HEADER};

/// **Test: Help lists every menu entry exactly once, in menu order, between header and footer.**
#[test]
fn test_help_lists_each_command_once_in_order() {
    let help = render_help(COMMANDS);

    assert_eq!(
        help,
        "The following commands are available \n\
         /start: Start using this bot\n\
         /country: Please, write a country name\n\
         /statistics: Statistics by users queries\n\
         /help: Useful information about this bot\n\
         /contacts: Developer contacts\n\
         COVID_22_BOT speaks english, be careful and take care"
    );

    let mut last = 0;
    for spec in COMMANDS {
        let line = format!("/{}: ", spec.command.name());
        assert_eq!(help.matches(&line).count(), 1, "{} listed once", line);
        let pos = help.find(&line).unwrap();
        assert!(pos >= last, "{} out of order", line);
        last = pos;
    }
    assert!(help.starts_with(HELP_HEADER));
    assert!(help.ends_with(HELP_FOOTER));
}

/// **Test: `/location` is routed but not advertised in the menu.**
#[test]
fn test_location_not_in_menu() {
    assert!(COMMANDS
        .iter()
        .all(|spec| spec.command != dbot_core::Command::Location));
    assert!(!render_help(COMMANDS).contains("/location"));
}

#[test]
fn test_empty_menu_is_header_and_footer() {
    assert_eq!(render_help(&[]), format!("{}{}", HELP_HEADER, HELP_FOOTER));
}
