use super::{cli_manager, common};
use anyhow::Context;
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use propsat_rs::Evaluator;

#[derive(Default)]
pub struct Command;

const CMD_NAME: &str = "evaluation";

const ARG_ASSIGNMENT: &str = "ARG_ASSIGNMENT";

impl<'a> super::command::Command<'a> for Command {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("computes the truth value of the formula under an assignment")
            .setting(AppSettings::DisableVersion)
            .args(&common::args_input())
            .arg(cli_manager::logging_level_cli_arg())
            .arg(
                Arg::with_name(ARG_ASSIGNMENT)
                    .short("a")
                    .long("assignment")
                    .empty_values(true)
                    .multiple(false)
                    .required(true)
                    .help("the values of the variables, as a comma-separated list of name=0 or name=1"),
            )
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> anyhow::Result<()> {
        let graph = common::read_input_graph(arg_matches)?;
        let assignment = arg_matches.value_of(ARG_ASSIGNMENT).unwrap_or_default();
        let valuation = common::read_assignment(assignment)
            .context("while parsing the assignment provided on the command line")?;
        let value = Evaluator::new(&graph)
            .evaluate(&valuation)
            .context("while evaluating the formula")?;
        println!("{}", u8::from(value));
        Ok(())
    }
}
