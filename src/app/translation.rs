use super::{cli_manager, common};
use clap::{App, AppSettings, ArgMatches, SubCommand};

#[derive(Default)]
pub struct Command;

const CMD_NAME: &str = "translation";

impl<'a> super::command::Command<'a> for Command {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("translates a formula into its canonical form, made of negations and conjunctions")
            .setting(AppSettings::DisableVersion)
            .args(&common::args_input())
            .arg(cli_manager::logging_level_cli_arg())
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> anyhow::Result<()> {
        let canonical = common::translate_input_formula(arg_matches)?;
        println!("{canonical}");
        Ok(())
    }
}
