//! Program metadata used to build a fresh parser.

use std::path::Path;

use clap::Command;

/// Name, usage, description and epilogue shown in help output.
///
/// # Examples
///
/// ```
/// use arg_model::{ArgParser, ProgramInfo};
///
/// let info = ProgramInfo::new("connect")
///     .description("Open a session.")
///     .epilog("Report bugs to the issue tracker.");
/// let parser = ArgParser::new(info);
/// assert_eq!(parser.command().get_name(), "connect");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProgramInfo {
    name: Option<String>,
    usage: Option<String>,
    description: Option<String>,
    epilog: Option<String>,
}

impl ProgramInfo {
    /// Metadata for a program with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Replaces the generated usage line.
    #[must_use]
    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    /// Text shown above the flag list.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Text shown after the flag list.
    #[must_use]
    pub fn epilog(mut self, epilog: impl Into<String>) -> Self {
        self.epilog = Some(epilog.into());
        self
    }

    /// Program name, falling back to the running executable's file stem.
    #[must_use]
    pub fn program_name(&self) -> String {
        self.name.clone().unwrap_or_else(default_program_name)
    }

    pub(crate) fn into_command(self) -> Command {
        let name = self.program_name();
        let mut command = Command::new(name.clone()).bin_name(name);
        if let Some(usage) = self.usage {
            command = command.override_usage(usage);
        }
        if let Some(description) = self.description {
            command = command.about(description);
        }
        if let Some(epilog) = self.epilog {
            command = command.after_help(epilog);
        }
        command
    }
}

fn default_program_name() -> String {
    std::env::args_os()
        .next()
        .and_then(|arg0| {
            Path::new(&arg0)
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| String::from("program"))
}
