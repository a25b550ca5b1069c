//! Client command parsing.
//!
//! Lines are split on single spaces (empty tokens preserved, matching how
//! the historical server tokenized) and turned into one tagged variant per
//! command the legacy client is known to send. Anything else - unknown
//! commands, commands missing required arguments - parses to `None` and is
//! silently ignored by the caller.

/// A parsed client command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `PASS <token>` - stores the credential verbatim; a bare `PASS`
    /// clears it.
    Pass(Option<String>),
    /// `NICK <nick>` - legality is checked by the registration logic, not
    /// here.
    Nick(String),
    /// `USER <username> <hostname> <servername> :<realname>` - hostname and
    /// servername are accepted and ignored. The realname is everything
    /// after the first colon in the raw line, preserved byte for byte: the
    /// client packs locale/version flags into it.
    User {
        username: String,
        realname: Option<String>,
    },
    /// `JOIN <#chan>[,<#chan>...]`
    Join(Vec<String>),
    /// `PART <#chan>`
    Part(String),
    /// `PRIVMSG <target> :<text>`
    Privmsg { target: String, text: String },
    /// `WHO [<target>]` - `None` means "everyone".
    Who(Option<String>),
    /// `NAMES <#chan>`
    Names(String),
    /// `LIST`
    List,
    /// `MODE <target>`
    Mode(String),
    /// `MOTD`
    Motd,
    /// `PING [<token>]` - the token is ignored; the reply always carries
    /// the server's host identity.
    Ping,
    /// `QUIT`
    Quit,
}

impl Command {
    /// Parse one complete line. The command word is case-insensitive.
    pub fn parse(line: &str) -> Option<Command> {
        let parts: Vec<&str> = line.split(' ').collect();
        let cmd = parts[0].to_ascii_uppercase();

        match cmd.as_str() {
            "PASS" => Some(Command::Pass(parts.get(1).map(|s| s.to_string()))),
            "NICK" => parts.get(1).map(|s| Command::Nick(s.to_string())),
            "USER" => {
                if parts.len() < 4 {
                    return None;
                }
                let realname = line.split_once(':').map(|(_, rest)| rest.to_string());
                Some(Command::User {
                    username: parts[1].to_string(),
                    realname,
                })
            }
            "JOIN" => parts
                .get(1)
                .map(|s| Command::Join(s.split(',').map(str::to_string).collect())),
            "PART" => parts.get(1).map(|s| Command::Part(s.to_string())),
            "PRIVMSG" => {
                if parts.len() < 3 {
                    return None;
                }
                let rest = parts[2..].join(" ");
                // The first character of the payload (the expected colon) is
                // dropped unconditionally.
                let mut chars = rest.chars();
                chars.next();
                Some(Command::Privmsg {
                    target: parts[1].to_string(),
                    text: chars.as_str().to_string(),
                })
            }
            "WHO" => {
                let target = parts
                    .get(1)
                    .map(|s| s.trim())
                    .filter(|s| !s.is_empty())
                    .map(str::to_string);
                Some(Command::Who(target))
            }
            "NAMES" => parts.get(1).map(|s| Command::Names(s.to_string())),
            "LIST" => Some(Command::List),
            "MODE" => parts.get(1).map(|s| Command::Mode(s.to_string())),
            "MOTD" => Some(Command::Motd),
            "PING" => Some(Command::Ping),
            "QUIT" => Some(Command::Quit),
            _ => None,
        }
    }
}
