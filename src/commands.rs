//! This module defines the command line options and the registry of ghorg commands.
use clap::Parser;
use clap_verbosity_flag::Verbosity;
use log::LevelFilter;

use crate::error::{Error, Result};

/// The top level clap parser and CLI arguments
#[derive(Parser, Debug)]
#[command(name = "ghorg")]
#[command(version = clap::crate_version!())]
#[command(about = "A tool for administering a GitHub course organisation")]
#[command(after_help = Command::help_text())]
pub struct Opts {
    #[command(flatten)]
    pub verbose: Verbosity,

    #[arg(
        long = "access-token",
        help = "GitHub access token, overrides GITHUB_TOKEN"
    )]
    pub access_token: Option<String>,

    #[arg(long = "org", help = "GitHub organisation, overrides GITHUB_ORG")]
    pub org: Option<String>,

    /// The command to run followed by its arguments. Everything after the
    /// command name is passed to it as-is, including values starting with `-`.
    #[arg(value_name = "COMMAND", trailing_var_arg = true, num_args = 0..)]
    pub invocation: Vec<String>,
}

/// The registered commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Invite,
    Members,
    Membership,
    Pages,
    Repo,
    User,
    Expire,
}

impl Command {
    pub const ALL: [Command; 7] = [
        Command::Invite,
        Command::Members,
        Command::Membership,
        Command::Pages,
        Command::Repo,
        Command::User,
        Command::Expire,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Command::Invite => "invite",
            Command::Members => "members",
            Command::Membership => "membership",
            Command::Pages => "pages",
            Command::Repo => "repo",
            Command::User => "user",
            Command::Expire => "expire",
        }
    }

    pub fn from_name(name: &str) -> Option<Command> {
        Command::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Minimum and maximum number of positional arguments
    pub fn arity(self) -> (usize, usize) {
        match self {
            Command::Invite | Command::Membership | Command::Pages | Command::Repo => (1, 1),
            Command::Members => (0, 1),
            Command::User => (0, 0),
            Command::Expire => (2, 2),
        }
    }

    pub fn usage(self) -> &'static str {
        match self {
            Command::Invite => "invite <email|login>      Invite a user to the organisation",
            Command::Members => "members [team]            List organisation or team members",
            Command::Membership => "membership <acronym>      Show a user's organisation membership",
            Command::Pages => "pages <repo>              Show a repository's GitHub Pages URL",
            Command::Repo => "repo <repo>               Show a repository's URL",
            Command::User => "user                      Show the authenticated user, with headers",
            Command::Expire => "expire <id> <expireAt>    Set the expiry date of an entry on the private API",
        }
    }

    pub fn check_arity(self, actual: usize) -> Result<()> {
        let (min, max) = self.arity();
        if (min..=max).contains(&actual) {
            return Ok(());
        }
        let expected = if min == max {
            format!("exactly {min}")
        } else {
            format!("{min} to {max}")
        };
        Err(Error::Arity {
            command: self.name(),
            expected,
            actual,
        })
    }

    pub fn help_text() -> String {
        let lines: Vec<String> = Command::ALL
            .iter()
            .map(|c| format!("  {}", c.usage()))
            .collect();
        format!("Commands:\n{}", lines.join("\n"))
    }
}

/// A fully resolved command line: which command to run, with what, and how loudly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedInvocation {
    pub command: Command,
    pub args: Vec<String>,
    pub verbose: bool,
}

impl ParsedInvocation {
    pub fn from_opts(opts: &Opts) -> Result<ParsedInvocation> {
        let verbose = opts.verbose.log_level_filter() > LevelFilter::Error;
        let (name, args) = opts.invocation.split_first().ok_or(Error::NoCommand)?;
        let command = Command::from_name(name).ok_or_else(|| Error::UnknownCommand(name.clone()))?;
        command.check_arity(args.len())?;
        Ok(ParsedInvocation {
            command,
            args: args.to_vec(),
            verbose,
        })
    }
}
