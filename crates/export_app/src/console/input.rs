use export_core::{Division, Msg};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Msg(Msg),
    Show,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "division" | "div" => match Division::from_label(rest) {
            Some(division) => Command::Msg(Msg::DivisionSelected(division)),
            None => return Err(format!("Unknown division {rest:?}; use 1, 2, 3 or 4")),
        },
        "index" => Command::Msg(Msg::IndexEdited(rest.to_string())),
        "days" => Command::Msg(Msg::DaysEdited(rest.to_string())),
        "preview" => Command::Msg(Msg::PreviewClicked),
        "download" => Command::Msg(Msg::DownloadClicked),
        "confirm" | "yes" => Command::Msg(Msg::ConfirmClicked),
        "cancel" | "no" => Command::Msg(Msg::CancelClicked),
        "dismiss" => Command::Msg(Msg::SuccessNoticeDismissed),
        "show" | "" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("Unknown command {other:?}; type help")),
    };
    Ok(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_edits_keep_raw_text() {
        assert_eq!(
            parse_command("index ab"),
            Ok(Command::Msg(Msg::IndexEdited("ab".to_string())))
        );
        assert_eq!(
            parse_command("days   -5"),
            Ok(Command::Msg(Msg::DaysEdited("-5".to_string())))
        );
        assert_eq!(
            parse_command("index"),
            Ok(Command::Msg(Msg::IndexEdited(String::new())))
        );
    }

    #[test]
    fn division_accepts_short_and_long_forms() {
        assert_eq!(
            parse_command("division div. 1"),
            Ok(Command::Msg(Msg::DivisionSelected(Division::Div1)))
        );
        assert_eq!(
            parse_command("div 4"),
            Ok(Command::Msg(Msg::DivisionSelected(Division::Div4)))
        );
        assert!(parse_command("division 7").is_err());
    }

    #[test]
    fn triggers_map_to_messages() {
        assert_eq!(parse_command("preview"), Ok(Command::Msg(Msg::PreviewClicked)));
        assert_eq!(parse_command("YES"), Ok(Command::Msg(Msg::ConfirmClicked)));
        assert_eq!(parse_command("no"), Ok(Command::Msg(Msg::CancelClicked)));
        assert_eq!(parse_command(""), Ok(Command::Show));
        assert_eq!(parse_command("exit"), Ok(Command::Quit));
        assert!(parse_command("launch").is_err());
    }
}
