use super::{cli_manager, common, model_writer::ModelWriter};
use anyhow::Context;
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use log::info;
use propsat_rs::{Enumerator, Valuation};

#[derive(Default)]
pub struct Command;

const CMD_NAME: &str = "satisfiability";

const ARG_DO_NOT_PRINT: &str = "ARG_DO_NOT_PRINT";
const ARG_THREADS: &str = "ARG_THREADS";

impl<'a> super::command::Command<'a> for Command {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("decides if the formula is satisfiable and prints all its models")
            .setting(AppSettings::DisableVersion)
            .args(&common::args_input())
            .arg(cli_manager::logging_level_cli_arg())
            .arg(common::arg_max_vars())
            .arg(
                Arg::with_name(ARG_DO_NOT_PRINT)
                    .long("do-not-print")
                    .takes_value(false)
                    .help("do not print the models (for testing purpose)"),
            )
            .arg(
                Arg::with_name(ARG_THREADS)
                    .short("t")
                    .long("threads")
                    .empty_values(false)
                    .multiple(false)
                    .help("sets the maximal number of threads to use"),
            )
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> anyhow::Result<()> {
        let graph = common::read_input_graph(arg_matches)?;
        common::check_max_vars(arg_matches, &graph)?;
        let enumerator = Enumerator::new(&graph);
        let models = if let Some(str_n_threads) = arg_matches.value_of(ARG_THREADS) {
            let n_threads = str::parse::<usize>(str_n_threads)
                .context("while parsing the number of threads provided on the command line")?;
            info!("parallel enumeration using {n_threads} threads");
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n_threads)
                .build()
                .context("while building the thread pool")?;
            common::log_time_for_step("model enumeration", || {
                pool.install(|| enumerator.satisfying_valuations_parallel())
            })
        } else {
            common::log_time_for_step("model enumeration", || {
                enumerator.satisfying_valuations()
            })
        };
        write_models(
            graph.variables(),
            &models,
            arg_matches.is_present(ARG_DO_NOT_PRINT),
        )
    }
}

fn write_models(
    variables: &[String],
    models: &[Valuation],
    do_not_print: bool,
) -> anyhow::Result<()> {
    let mut model_writer = ModelWriter::new_locked(variables, do_not_print);
    if models.is_empty() {
        model_writer.write_line("s UNSATISFIABLE")?;
    } else {
        model_writer.write_line("s SATISFIABLE")?;
    }
    for model in models {
        model_writer.write_model(model)?;
    }
    model_writer.finalize()?;
    info!("enumerated {} models", model_writer.n_models());
    Ok(())
}
