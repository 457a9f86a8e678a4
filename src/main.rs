//! See the library documentation for more information.

mod app;

use app::{
    app_helper::AppHelper, command::Command, EvaluationCommand, GraphCommand,
    SatisfiabilityCommand, TautologyCommand, TranslationCommand,
};

pub(crate) fn create_app_helper() -> AppHelper<'static> {
    let app_name = option_env!("CARGO_PKG_NAME").unwrap_or("unknown app name");
    let app_version = option_env!("CARGO_PKG_VERSION").unwrap_or("unknown version");
    let authors = option_env!("CARGO_PKG_AUTHORS").unwrap_or("unknown authors");
    let mut app = AppHelper::new(
        app_name,
        app_version,
        authors,
        "propsat-rs, satisfiability and tautology checking of small propositional formulas.",
    );
    let commands: Vec<Box<dyn Command>> = vec![
        Box::<EvaluationCommand>::default(),
        Box::<GraphCommand>::default(),
        Box::<SatisfiabilityCommand>::default(),
        Box::<TautologyCommand>::default(),
        Box::<TranslationCommand>::default(),
    ];
    for c in commands {
        app.add_command(c);
    }
    app
}

fn main() {
    let app = create_app_helper();
    app.launch_app();
}
