use clap::Parser;

mod app;
mod args;
mod view;

use app::App;
use args::Args;
use view::ViewConfig;

fn main() {
    let args = Args::parse();

    let view = ViewConfig::from(&args);

    let app = match App::new(&args, view) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    app.run();
}
