use super::{cli_manager, command::Command};
use anyhow::{anyhow, Result};
use clap::{App, AppSettings, ArgMatches};
use log::{error, info};
use std::time::Instant;
use sysinfo::{Pid, System};

/// The entry point of the application, dispatching the command line to the registered commands.
pub(crate) struct AppHelper<'a> {
    app_name: &'a str,
    app_version: &'a str,
    authors: &'a str,
    about: &'a str,
    commands: Vec<Box<dyn Command<'a>>>,
}

impl<'a> AppHelper<'a> {
    pub fn new(app_name: &'a str, app_version: &'a str, authors: &'a str, about: &'a str) -> Self {
        Self {
            app_name,
            app_version,
            authors,
            about,
            commands: vec![],
        }
    }

    pub fn add_command(&mut self, command: Box<dyn Command<'a>>) {
        self.commands.push(command);
    }

    fn clap_app(&self) -> App<'a, 'a> {
        let mut app = App::new(self.app_name)
            .version(self.app_version)
            .author(self.authors)
            .about(self.about)
            .setting(AppSettings::SubcommandRequiredElseHelp)
            .setting(AppSettings::VersionlessSubcommands);
        for command in &self.commands {
            app = app.subcommand(command.clap_subcommand());
        }
        app
    }

    /// Parses the command line and runs the selected command, exiting with status 1 on failure.
    pub fn launch_app(&self) {
        let arg_matches = self.clap_app().get_matches();
        if let Err(e) = self.launch_command(&arg_matches) {
            error!("{e}");
            e.chain().skip(1).for_each(|cause| error!("caused by: {cause}"));
            std::process::exit(1);
        }
    }

    fn launch_command(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        let (command_name, command_matches) = arg_matches.subcommand();
        let command_matches =
            command_matches.ok_or_else(|| anyhow!("no command given on the command line"))?;
        let command = self
            .commands
            .iter()
            .find(|c| c.name() == command_name)
            .ok_or_else(|| anyhow!(r#"unknown command "{command_name}""#))?;
        cli_manager::init_logger(command_matches)?;
        info!("{} {}", self.app_name, self.app_version);
        let start = Instant::now();
        let result = command.execute(command_matches);
        info!(
            "command {command_name} ran in {:.3} seconds",
            start.elapsed().as_secs_f64()
        );
        log_memory_usage();
        result
    }
}

#[allow(clippy::cast_precision_loss)]
fn log_memory_usage() {
    let mut system = System::new();
    let pid = Pid::from_u32(std::process::id());
    system.refresh_process(pid);
    if let Some(process) = system.process(pid) {
        info!(
            "memory usage: {:.1} MiB",
            process.memory() as f64 / (1024. * 1024.)
        );
    }
}
