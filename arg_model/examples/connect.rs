//! Connect example: derive flags from a schema and print the session plan.

use std::io::{self, Write};
use std::path::PathBuf;

use arg_model::{ArgModel, ArgModelError, ArgParser, ProgramInfo, is_display_request};
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Deserialize, Serialize, ArgModel)]
struct Connection {
    /// The user to connect as.
    user: String,
    /// The host to connect to.
    #[arg_model(default = "localhost".into())]
    host: String,
    /// Port the server listens on.
    #[arg_model(default = 22)]
    port: u16,
}

#[derive(Debug, PartialEq, Deserialize, Serialize, ArgModel)]
struct Session {
    #[arg_model(nested)]
    connection: Connection,
    /// Private key to authenticate with.
    identity: Option<PathBuf>,
    /// Ask for confirmation before connecting.
    interactive: bool,
}

fn parser() -> ArgParser {
    ArgParser::new(
        ProgramInfo::new("connect")
            .description("Open a session on a remote host.")
            .epilog("Flags are generated from the Session schema."),
    )
}

fn plan(session: &Session) -> String {
    let Connection { user, host, port } = &session.connection;
    let identity = session
        .identity
        .as_ref()
        .map_or_else(|| String::from("default identity"), |path| path.display().to_string());
    let mode = if session.interactive { "interactive" } else { "batch" };
    format!("{user}@{host}:{port} using {identity} ({mode})")
}

fn run() -> anyhow::Result<()> {
    let session = match Session::try_parse_with(parser(), std::env::args_os().skip(1)) {
        Ok(session) => session,
        Err(ArgModelError::CliParsing(err)) if is_display_request(&err) => err.exit(),
        Err(err) => return Err(err.into()),
    };
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", plan(&session))?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    run()
}
