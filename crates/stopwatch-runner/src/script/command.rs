use stopwatch_core::error::{Result, StopwatchError};

/// Parsed script command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start { names: Vec<String>, force: bool },
    /// Empty `names` means every timer.
    Get { names: Vec<String> },
    Stop { names: Vec<String> },
    Reset { names: Vec<String> },
    Remove { names: Vec<String>, force: bool },
    Sleep { millis: u64 },
    List,
}

impl Command {
    /// Verb as written in scripts.
    pub fn verb(&self) -> &'static str {
        match self {
            Command::Start { .. } => "start",
            Command::Get { .. } => "get",
            Command::Stop { .. } => "stop",
            Command::Reset { .. } => "reset",
            Command::Remove { .. } => "remove",
            Command::Sleep { .. } => "sleep",
            Command::List => "list",
        }
    }
}

/// Parse one script line. Returns `Ok(None)` for blank and comment lines.
pub fn parse_line(line: &str, max_names: usize) -> Result<Option<Command>> {
    let mut tokens = line
        .split_whitespace()
        .take_while(|t| !t.starts_with('#'));

    let Some(verb) = tokens.next() else {
        return Ok(None);
    };

    let mut names = Vec::new();
    let mut force = false;
    for t in tokens {
        match t {
            "--force" | "-f" => force = true,
            flag if flag.starts_with('-') => {
                return Err(StopwatchError::BadRequest(format!("unknown flag: {flag}")));
            }
            name => names.push(name.to_string()),
        }
    }

    if names.len() > max_names {
        return Err(StopwatchError::BadRequest(format!(
            "{verb}: too many names ({} > {max_names})",
            names.len()
        )));
    }

    let cmd = match verb {
        "start" => Command::Start {
            names: required(verb, names)?,
            force,
        },
        "remove" => Command::Remove {
            names: required(verb, names)?,
            force,
        },
        "get" => Command::Get { names },
        "stop" => Command::Stop {
            names: required(verb, names)?,
        },
        "reset" => Command::Reset {
            names: required(verb, names)?,
        },
        "sleep" => {
            let [millis] = names.as_slice() else {
                return Err(StopwatchError::BadRequest(
                    "sleep: expected exactly one MILLIS argument".into(),
                ));
            };
            let millis = millis
                .parse::<u64>()
                .map_err(|_| StopwatchError::BadRequest(format!("sleep: invalid millis: {millis}")))?;
            Command::Sleep { millis }
        }
        "list" => {
            if !names.is_empty() {
                return Err(StopwatchError::BadRequest("list: takes no arguments".into()));
            }
            Command::List
        }
        other => {
            return Err(StopwatchError::BadRequest(format!("unknown command: {other}")));
        }
    };

    if force && !matches!(cmd, Command::Start { .. } | Command::Remove { .. }) {
        return Err(StopwatchError::BadRequest(format!(
            "{verb}: --force is not supported"
        )));
    }

    Ok(Some(cmd))
}

fn required(verb: &str, names: Vec<String>) -> Result<Vec<String>> {
    if names.is_empty() {
        return Err(StopwatchError::BadRequest(format!(
            "{verb}: at least one timer name is required"
        )));
    }
    Ok(names)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<Option<Command>> {
        parse_line(line, 8)
    }

    fn names(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn blank_and_comment_lines() {
        assert_eq!(parse("").unwrap(), None);
        assert_eq!(parse("   ").unwrap(), None);
        assert_eq!(parse("# setup").unwrap(), None);
    }

    #[test]
    fn start_with_force_anywhere() {
        assert_eq!(
            parse("start --force A B").unwrap(),
            Some(Command::Start { names: names(&["A", "B"]), force: true })
        );
        assert_eq!(
            parse("start A -f").unwrap(),
            Some(Command::Start { names: names(&["A"]), force: true })
        );
    }

    #[test]
    fn trailing_comment_is_dropped() {
        assert_eq!(
            parse("stop A # done").unwrap(),
            Some(Command::Stop { names: names(&["A"]) })
        );
    }

    #[test]
    fn get_without_names_means_all() {
        assert_eq!(parse("get").unwrap(), Some(Command::Get { names: vec![] }));
    }

    #[test]
    fn duplicates_are_kept() {
        assert_eq!(
            parse("reset A A").unwrap(),
            Some(Command::Reset { names: names(&["A", "A"]) })
        );
    }

    #[test]
    fn sleep_and_list() {
        assert_eq!(parse("sleep 250").unwrap(), Some(Command::Sleep { millis: 250 }));
        assert_eq!(parse("list").unwrap(), Some(Command::List));
    }

    #[test]
    fn rejects_malformed_lines() {
        for line in [
            "stop",
            "remove --force",
            "stop A --force",
            "get A --verbose",
            "sleep",
            "sleep soon",
            "sleep 1 2",
            "list A",
            "launch A",
            "start A B C D E F G H I",
        ] {
            let e = parse(line).expect_err(line);
            assert_eq!(e.code().as_str(), "BAD_REQUEST", "{line}");
        }
    }
}
