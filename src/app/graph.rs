use super::{cli_manager, common};
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use propsat_rs::{DotWriter, FormulaGraphWriter, TreeWriter};
use std::io::{BufWriter, StdoutLock};

#[derive(Default)]
pub struct Command;

const CMD_NAME: &str = "graph";

const ARG_DOT: &str = "ARG_DOT";

impl<'a> super::command::Command<'a> for Command {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("prints the graph of the formula, in which identical subformulas are shared")
            .setting(AppSettings::DisableVersion)
            .args(&common::args_input())
            .arg(cli_manager::logging_level_cli_arg())
            .arg(
                Arg::with_name(ARG_DOT)
                    .long("dot")
                    .takes_value(false)
                    .help("prints the graph in the DOT format instead of an indented tree"),
            )
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> anyhow::Result<()> {
        let graph = common::read_input_graph(arg_matches)?;
        let formula_writer: Box<dyn FormulaGraphWriter<BufWriter<StdoutLock<'static>>>> =
            if arg_matches.is_present(ARG_DOT) {
                Box::new(DotWriter)
            } else {
                Box::new(TreeWriter)
            };
        let out = BufWriter::new(std::io::stdout().lock());
        formula_writer.write(out, &graph)
    }
}
