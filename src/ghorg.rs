//! This module defines actual code that executes the ghorg commands.
pub mod expire;
pub mod invite;
pub mod members;
pub mod membership;
pub mod pages;
pub mod repo;
pub mod user;

use anyhow::Context as _;
use clap::CommandFactory;
use log::debug;

use crate::commands::{Command, Opts, ParsedInvocation};
use crate::config::Config;
use crate::error::{Error, Result, EXIT_FAILURE};
use crate::github::{Gateway, OctocrabTransport, Transport};

/// A context object that holds state for the ghorg commands
#[derive(Debug)]
pub struct Context {
    pub config: Config,
    pub invocation: ParsedInvocation,
}

impl Context {
    /// The positional arguments, after checking them against the command's arity
    pub fn args(&self) -> Result<&[String]> {
        self.invocation
            .command
            .check_arity(self.invocation.args.len())?;
        Ok(&self.invocation.args)
    }

    pub fn verbose(&self) -> bool {
        self.invocation.verbose
    }
}

/// Run the matched command and return what it wants printed on stdout
pub async fn dispatch<T: Transport>(context: &Context, gateway: &Gateway<T>) -> Result<String> {
    debug!("Running {:?}", context.invocation);
    match context.invocation.command {
        Command::Invite => invite::invite(context, gateway).await,
        Command::Members => members::members(context, gateway).await,
        Command::Membership => membership::membership(context, gateway).await,
        Command::Pages => pages::pages(context, gateway).await,
        Command::Repo => repo::repo(context, gateway).await,
        Command::User => user::user(context, gateway).await,
        Command::Expire => expire::expire(context, gateway).await,
    }
}

/// Run the ghorg CLI, returning the process exit code
pub async fn cli(opts: Opts) -> i32 {
    env_logger::builder()
        .filter_level(opts.verbose.log_level_filter())
        .target(env_logger::Target::Stderr)
        .init();

    let invocation = match ParsedInvocation::from_opts(&opts) {
        Ok(invocation) => invocation,
        Err(e) => return report(e),
    };

    let config = Config::from_env().with_overrides(opts.access_token.as_ref(), opts.org.as_ref());
    let context = Context { config, invocation };
    let gateway = Gateway::new(OctocrabTransport);

    let name = context.invocation.command.name();
    match dispatch(&context, &gateway)
        .await
        .with_context(|| format!("`ghorg {name}` failed"))
    {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
            0
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            debug!("{:?}", e);
            e.downcast_ref::<Error>()
                .map_or(EXIT_FAILURE, Error::exit_code)
        }
    }
}

/// Failures always reach stderr, whatever the log level
fn report(e: Error) -> i32 {
    eprintln!("Error: {}", e);
    debug!("{:?}", e);
    if let Error::NoCommand = e {
        eprintln!("{}", Opts::command().render_help());
    }
    e.exit_code()
}
