use super::{cli_manager, common, model_writer::ModelWriter};
use clap::{App, AppSettings, ArgMatches, SubCommand};
use propsat_rs::Enumerator;

#[derive(Default)]
pub struct Command;

const CMD_NAME: &str = "tautology";

impl<'a> super::command::Command<'a> for Command {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("decides if the formula is a tautology, and prints a counterexample if it is not")
            .setting(AppSettings::DisableVersion)
            .args(&common::args_input())
            .arg(cli_manager::logging_level_cli_arg())
            .arg(common::arg_max_vars())
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> anyhow::Result<()> {
        let graph = common::read_input_graph(arg_matches)?;
        common::check_max_vars(arg_matches, &graph)?;
        let enumerator = Enumerator::new(&graph);
        let counterexample = common::log_time_for_step("tautology check", || {
            enumerator.find_falsifying_valuation()
        });
        let mut model_writer = ModelWriter::new_locked(graph.variables(), false);
        if let Some(valuation) = counterexample {
            model_writer.write_line("s NOT A TAUTOLOGY")?;
            model_writer.write_model(&valuation)?;
        } else {
            model_writer.write_line("s TAUTOLOGY")?;
        }
        model_writer.finalize()
    }
}
