//! dcstack CLI application entry point
//!
//! This is the minimal main entry point that delegates to the library.

use clap::Parser;
use dcstack::error::CommandError;

fn main() {
    // Configure miette for error reporting
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(false)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))
    .ok();

    let cli = dcstack::Cli::parse();

    if let Err(e) = dcstack::run(cli) {
        let miette_error = miette::Report::msg(format!("{e:#}"));
        eprintln!("{miette_error:?}");

        // A failed Drupal Console command passes its exit code through
        let code = e
            .downcast_ref::<CommandError>()
            .and_then(CommandError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}
