// Command abbreviation matching for the rekrut CLI

/// All commands that start with the given prefix (case-insensitive)
pub fn find_matching_commands<'a>(prefix: &str, commands: &'a [&str]) -> Vec<&'a str> {
    let prefix_lower = prefix.to_lowercase();
    commands.iter()
        .filter(|cmd| cmd.to_lowercase().starts_with(&prefix_lower))
        .copied()
        .collect()
}

/// Resolve a prefix to exactly one command
/// An exact match wins over longer commands sharing the prefix ("apply" vs "applications").
/// Err(empty) means no match, Err(list) means ambiguous.
pub fn find_unique_command<'a>(prefix: &str, commands: &'a [&str]) -> Result<&'a str, Vec<&'a str>> {
    if let Some(exact) = commands.iter().find(|cmd| cmd.eq_ignore_ascii_case(prefix)) {
        return Ok(*exact);
    }
    let matches = find_matching_commands(prefix, commands);
    match matches.len() {
        1 => Ok(matches[0]),
        _ => Err(matches),
    }
}

pub const TOP_LEVEL_COMMANDS: &[&str] = &[
    "login", "logout", "register", "verify", "resend-otp", "jobs", "apply",
    "applications", "status", "card", "profile", "preview",
];

pub const JOBS_COMMANDS: &[&str] = &["list", "show"];

pub const APPLICATIONS_COMMANDS: &[&str] = &["list"];

pub const PROFILE_COMMANDS: &[&str] = &["show", "update"];

pub fn get_subcommands(command: &str) -> Option<&'static [&'static str]> {
    match command {
        "jobs" => Some(JOBS_COMMANDS),
        "applications" => Some(APPLICATIONS_COMMANDS),
        "profile" => Some(PROFILE_COMMANDS),
        _ => None,
    }
}

fn is_word(arg: &str) -> bool {
    !arg.starts_with('-') && arg.parse::<i64>().is_err()
}

/// Expand the command (and subcommand) abbreviations at the head of `args`
/// Everything after them passes through untouched.
pub fn expand_command_abbreviations(mut args: Vec<String>) -> Result<Vec<String>, String> {
    let Some(first) = args.first() else {
        return Ok(args);
    };
    if !is_word(first) {
        return Ok(args);
    }

    let command = match find_unique_command(first, TOP_LEVEL_COMMANDS) {
        Ok(cmd) => cmd,
        Err(matches) if matches.is_empty() => return Ok(args),
        Err(matches) => {
            return Err(format!(
                "Ambiguous command '{}'. Did you mean one of: {}?",
                first, matches.join(", ")
            ));
        }
    };
    args[0] = command.to_string();

    if let (Some(subcommands), Some(next)) = (get_subcommands(command), args.get(1)) {
        if is_word(next) {
            match find_unique_command(next, subcommands) {
                Ok(sub) => args[1] = sub.to_string(),
                Err(matches) if matches.is_empty() => {}
                Err(matches) => {
                    return Err(format!(
                        "Ambiguous subcommand '{}'. Did you mean one of: {}?",
                        next, matches.join(", ")
                    ));
                }
            }
        }
    }

    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_find_unique_command() {
        assert_eq!(find_unique_command("st", TOP_LEVEL_COMMANDS), Ok("status"));
        assert_eq!(find_unique_command("apply", TOP_LEVEL_COMMANDS), Ok("apply"));
        assert_eq!(find_unique_command("appli", TOP_LEVEL_COMMANDS), Ok("applications"));
        assert_eq!(find_unique_command("l", TOP_LEVEL_COMMANDS), Err(vec!["login", "logout"]));
        assert_eq!(find_unique_command("zzz", TOP_LEVEL_COMMANDS), Err(vec![]));
    }

    #[test]
    fn test_expand_top_level_and_subcommand() {
        assert_eq!(
            expand_command_abbreviations(strings(&["j", "l", "--json"])),
            Ok(strings(&["jobs", "list", "--json"]))
        );
        assert_eq!(
            expand_command_abbreviations(strings(&["prof", "up", "address", "kota=Bandung"])),
            Ok(strings(&["profile", "update", "address", "kota=Bandung"]))
        );
        assert_eq!(
            expand_command_abbreviations(strings(&["st", "42"])),
            Ok(strings(&["status", "42"]))
        );
    }

    #[test]
    fn test_expand_ambiguous() {
        let err = expand_command_abbreviations(strings(&["lo"])).unwrap_err();
        assert!(err.contains("Ambiguous command 'lo'"));
        assert!(err.contains("login, logout"));

        let err = expand_command_abbreviations(strings(&["re", "x@y.id"])).unwrap_err();
        assert!(err.contains("register, resend-otp"));
    }

    #[test]
    fn test_pass_through() {
        assert_eq!(expand_command_abbreviations(vec![]), Ok(vec![]));
        assert_eq!(expand_command_abbreviations(strings(&["--help"])), Ok(strings(&["--help"])));
        assert_eq!(expand_command_abbreviations(strings(&["42"])), Ok(strings(&["42"])));
        assert_eq!(
            expand_command_abbreviations(strings(&["jobs", "17"])),
            Ok(strings(&["jobs", "17"]))
        );
    }
}
