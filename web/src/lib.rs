use clap::Parser;
use wasm_bindgen::prelude::*;

mod game;
mod settings;
mod utils;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    #[command(flatten)]
    game: game::GameProps,
}

/// Options are read from the location hash, e.g. `#-vv&--difficulty=hard&--seed=42`.
fn parse_args(location_hash: &str) -> Result<Args, clap::Error> {
    let args = std::iter::once(env!("CARGO_PKG_NAME"))
        .chain(location_hash.split(['#', '&']).filter(|arg| !arg.is_empty()));
    Args::try_parse_from(args)
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window().location().hash().unwrap_or_default();

    let args = parse_args(&location_hash).unwrap_or_else(|err| {
        gloo::console::warn!(format!("ignoring location hash: {}", err));
        Args::parse_from([env!("CARGO_PKG_NAME")])
    });
    if let Some(log_level) = args.verbose.log_level() {
        if let Err(err) = console_log::init_with_level(log_level) {
            gloo::console::error!(format!("Error initializing logger: {}", err));
        }
    }
    log::debug!("args: {:?}", args);

    let root = document()
        .get_element_by_id("game")
        .expect("Could not find id=\"game\" element");

    log::debug!("App started");
    yew::Renderer::<game::GameView>::with_root_and_props(root, args.game).render();
}
