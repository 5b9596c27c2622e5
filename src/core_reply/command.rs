/// Serializes a command line. The argument is omitted entirely when absent.
pub fn encode_command(command: &str, arg: Option<&str>) -> String {
    match arg {
        Some(arg) => format!("{} {}\r\n", command, arg),
        None => format!("{}\r\n", command),
    }
}

/// Splits a received command line into an upper-cased verb and its argument.
///
/// Only the first space separates; the argument is kept verbatim so file
/// names containing spaces survive.
pub fn parse_command_line(line: &str) -> (String, String) {
    let line = line.trim_end_matches(['\r', '\n']);
    match line.split_once(' ') {
        Some((verb, arg)) => (verb.to_ascii_uppercase(), arg.to_string()),
        None => (line.to_ascii_uppercase(), String::new()),
    }
}
