use anyhow::{anyhow, Context, Result};
use clap::{Arg, ArgMatches};
use log::info;
use propsat_rs::{FormulaGraph, GraphBuilder, Parser, Translator, TreeSizeVisitor, Valuation};
use std::{
    fs::{self, File},
    io::{BufReader, Read},
    path::PathBuf,
    time::Instant,
};

const ARG_FORMULA: &str = "ARG_FORMULA";
const ARG_INPUT: &str = "ARG_INPUT";
const ARG_KEEP_DOUBLE_NEGATIONS: &str = "ARG_KEEP_DOUBLE_NEGATIONS";
const ARG_MAX_VARS: &str = "ARG_MAX_VARS";

const DEFAULT_MAX_VARS: &str = "24";

pub(crate) fn args_input<'a>() -> Vec<Arg<'a, 'a>> {
    vec![
        Arg::with_name(ARG_FORMULA)
            .short("f")
            .long("formula")
            .empty_values(false)
            .multiple(false)
            .allow_hyphen_values(true)
            .help("the formula given on the command line")
            .required_unless(ARG_INPUT)
            .conflicts_with(ARG_INPUT),
        Arg::with_name(ARG_INPUT)
            .short("i")
            .long("input")
            .empty_values(false)
            .multiple(false)
            .help("the input file that contains the formula")
            .required_unless(ARG_FORMULA),
        Arg::with_name(ARG_KEEP_DOUBLE_NEGATIONS)
            .long("keep-double-negations")
            .takes_value(false)
            .help("do not remove the double negations when translating the formula"),
    ]
}

pub(crate) fn arg_max_vars<'a>() -> Arg<'a, 'a> {
    Arg::with_name(ARG_MAX_VARS)
        .long("max-vars")
        .empty_values(false)
        .multiple(false)
        .default_value(DEFAULT_MAX_VARS)
        .help("sets the maximal number of distinct variables allowed in the formula")
}

pub(crate) fn read_input_formula(arg_matches: &ArgMatches<'_>) -> Result<String> {
    if let Some(formula) = arg_matches.value_of(ARG_FORMULA) {
        return Ok(formula.to_string());
    }
    let mut reader = create_input_file_reader(arg_matches)?;
    let mut formula = String::new();
    reader
        .read_to_string(&mut formula)
        .context("while reading the input formula")?;
    Ok(formula)
}

fn create_input_file_reader(arg_matches: &ArgMatches<'_>) -> Result<BufReader<File>> {
    let input_file_canonicalized = realpath_from_arg(arg_matches, ARG_INPUT)?;
    info!("reading input file {:?}", input_file_canonicalized);
    Ok(BufReader::new(File::open(input_file_canonicalized)?))
}

fn realpath_from_arg(arg_matches: &ArgMatches<'_>, arg: &str) -> Result<PathBuf> {
    let file_path = arg_matches
        .value_of(arg)
        .ok_or_else(|| anyhow!("missing input file"))?;
    fs::canonicalize(PathBuf::from(file_path))
        .with_context(|| format!(r#"while opening file "{file_path}""#))
}

pub(crate) fn translate_input_formula(arg_matches: &ArgMatches<'_>) -> Result<String> {
    let formula = read_input_formula(arg_matches)?;
    let mut translator = Translator::default();
    translator.set_collapse_double_negations(!arg_matches.is_present(ARG_KEEP_DOUBLE_NEGATIONS));
    log_time_for_step("translation", || translator.translate_formula(formula.trim()))
        .context("while translating the formula")
}

pub(crate) fn read_input_graph(arg_matches: &ArgMatches<'_>) -> Result<FormulaGraph> {
    let canonical = translate_input_formula(arg_matches)?;
    let tree = log_time_for_step("parsing", || Parser::parse(&canonical))
        .context("while parsing the translated formula")?;
    let graph = log_time_for_step("graph building", || GraphBuilder::default().build(&tree));
    info!(
        "the formula has {} variables and {} distinct subformulas (unfolded size: {})",
        graph.n_vars(),
        graph.n_nodes(),
        TreeSizeVisitor::tree_size(&graph)
    );
    Ok(graph)
}

pub(crate) fn check_max_vars(arg_matches: &ArgMatches<'_>, graph: &FormulaGraph) -> Result<()> {
    let max_vars = arg_matches
        .value_of(ARG_MAX_VARS)
        .unwrap_or(DEFAULT_MAX_VARS)
        .parse::<usize>()
        .context("while parsing the maximal number of variables provided on the command line")?;
    if graph.n_vars() > max_vars {
        return Err(anyhow!(
            "the formula has {} variables, which is more than the maximum allowed ({max_vars}); use --max-vars to raise it",
            graph.n_vars()
        ));
    }
    Ok(())
}

pub(crate) fn read_assignment(assignment: &str) -> Result<Valuation> {
    let mut valuation = Valuation::new();
    for item in assignment.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let (name, value) = item
            .split_once('=')
            .ok_or_else(|| anyhow!(r#"expected "name=0" or "name=1", got "{item}""#))?;
        let value = match value.trim() {
            "0" | "false" => false,
            "1" | "true" => true,
            v => return Err(anyhow!(r#"invalid value "{v}" for variable "{}""#, name.trim())),
        };
        valuation.set(name.trim(), value);
    }
    Ok(valuation)
}

pub(crate) fn log_time_for_step<F, T>(step: &str, f: F) -> T
where
    F: FnOnce() -> T,
{
    let start = Instant::now();
    info!("starting step: {step}");
    let result = f();
    info!(
        "step {step} done in {:.3} seconds",
        start.elapsed().as_secs_f64()
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_assignment() {
        let valuation = read_assignment("p=1, q=0,r=true").unwrap();
        assert_eq!("p=1 q=0 r=1", format!("{valuation}"));
    }

    #[test]
    fn test_read_assignment_empty() {
        assert!(read_assignment("").unwrap().is_empty());
    }

    #[test]
    fn test_read_assignment_errors() {
        assert_eq!(
            r#"expected "name=0" or "name=1", got "p""#,
            format!("{}", read_assignment("p").unwrap_err().root_cause())
        );
        assert_eq!(
            r#"invalid value "2" for variable "q""#,
            format!("{}", read_assignment("q=2").unwrap_err().root_cause())
        );
    }
}
