pub(crate) mod app_helper;

pub(crate) mod cli_manager;

pub(crate) mod command;

mod common;

mod evaluation;
pub(crate) use evaluation::Command as EvaluationCommand;

mod graph;
pub(crate) use graph::Command as GraphCommand;

mod model_writer;

mod satisfiability;
pub(crate) use satisfiability::Command as SatisfiabilityCommand;

mod tautology;
pub(crate) use tautology::Command as TautologyCommand;

mod translation;
pub(crate) use translation::Command as TranslationCommand;
