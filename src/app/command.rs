use clap::{App, ArgMatches};

/// A subcommand of the application.
pub(crate) trait Command<'a> {
    /// The name of the subcommand, as given on the command line.
    fn name(&self) -> &str;

    /// The definition of the subcommand and its arguments.
    fn clap_subcommand(&self) -> App<'a, 'a>;

    /// Runs the subcommand once the logger is set up.
    fn execute(&self, arg_matches: &ArgMatches<'_>) -> anyhow::Result<()>;
}
