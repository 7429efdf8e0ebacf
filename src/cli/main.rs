//!
//! lgtm -- LGTM stamps in the shell
//!

extern crate clap;
#[macro_use] extern crate lazy_static;
#[macro_use] extern crate log;


mod args;
mod logging;


use std::env;
use std::fs;
use std::io::{self, Write};
use std::process::exit;

use lgtm::{share, EngineBuilder, RenderError, RenderOutput};
use lgtm::actions::{generate_filename, Downloader, FileDownloader};
use lgtm::storage::{ConfigStore, FileStore};
use time::OffsetDateTime;

use crate::args::{ArgsError, Options, Output};


lazy_static! {
    /// Application / package name, as filled out by Cargo.
    static ref NAME: &'static str = option_env!("CARGO_PKG_NAME").unwrap_or("lgtmsh");

    /// Application version, as filled out by Cargo and the build script.
    static ref VERSION: Option<String> = option_env!("CARGO_PKG_VERSION").map(|v| {
        match REVISION.trim() {
            "" => v.to_owned(),
            rev => format!("{} (rev {})", v, rev),
        }
    });
}

/// Git revision the binary has been built from, if known.
const REVISION: &'static str = include_str!(concat!(env!("OUT_DIR"), "/revision"));


fn main() {
    let opts = args::parse().unwrap_or_else(|e| {
        let code = exit_code(&e);
        print_args_error(e).unwrap_or(());
        exit(code);
    });

    let _guard = logging::init(opts.verbosity).unwrap_or_else(|e| {
        eprintln!("Failed to initialize logging: {}", e);
        exit(exitcode::SOFTWARE);
    });
    if cfg!(debug_assertions) {
        warn!("Debug mode! The program will likely be much slower.");
    }
    for (i, arg) in env::args().enumerate() {
        debug!("argv[{}] = {:?}", i, arg);
    }
    trace!("Options parsed from argv:\n{:#?}", opts);

    let output = render(&opts).unwrap_or_else(|e| {
        error!("Error while rendering the stamp: {}", e);
        exit(match e {
            RenderError::InvalidConfig(_) => exitcode::DATAERR,
            _ => exitcode::UNAVAILABLE,
        });
    });
    write_output(&opts, &output);

    if let Some(ref base) = opts.link_base {
        print_link(&opts, base);
    }
    if let Some(ref dir) = opts.save_directory {
        let mut store = FileStore::new(dir);
        match store.save(&opts.config) {
            Ok(saved) => info!("Stamp saved in {} as {}",
                store.path().display(), saved.id.unwrap_or_default()),
            Err(e) => {
                error!("Failed to save the stamp: {}", e);
                exit(exitcode::CANTCREAT);
            }
        }
    }
}

/// Print an error that may occur while parsing arguments.
fn print_args_error(e: ArgsError) -> io::Result<()> {
    match e {
        // Help and version are "errors" too, but they belong on standard output.
        ArgsError::Parse(ref e) if !e.use_stderr() =>
            writeln!(&mut io::stdout(), "{}", e.message),
        ArgsError::Parse(ref e) =>
            // In case of generic parse error,
            // message provided by the clap library will be the usage string.
            writeln!(&mut io::stderr(), "{}", e.message),
        e => {
            writeln!(&mut io::stderr(), "Failed to parse arguments: {}", e)
        },
    }
}

/// Exit code for an error that may occur while parsing arguments.
fn exit_code(e: &ArgsError) -> i32 {
    match *e {
        ArgsError::Parse(ref e) => match e.kind {
            clap::ErrorKind::HelpDisplayed | clap::ErrorKind::VersionDisplayed => exitcode::OK,
            _ => exitcode::USAGE,
        },
        ArgsError::JsonIo{..} => exitcode::NOINPUT,
        ArgsError::Link(_) | ArgsError::Json{..} | ArgsError::Config(_) => exitcode::DATAERR,
        _ => exitcode::USAGE,
    }
}


/// Render the stamp described by the options.
fn render(opts: &Options) -> Result<RenderOutput, RenderError> {
    let mut builder = EngineBuilder::new();
    if let Some(ref dir) = opts.font_directory {
        builder = builder.font_directory(dir);
    }
    let engine = builder.build().unwrap_or_else(|e| {
        error!("Failed to set up the rendering engine: {}", e);
        exit(exitcode::UNAVAILABLE);
    });
    engine.render(&opts.config, &opts.render)
}

/// Write the rendered image where the options say.
fn write_output(opts: &Options, output: &RenderOutput) {
    match opts.output {
        Output::Stdout => {
            trace!("Writing the image to standard output");
            if isatty::stdout_isatty() {
                warn!("Standard output is a terminal.");
            }
            let mut stdout = io::stdout();
            stdout.write_all(output.bytes()).and_then(|_| stdout.flush()).unwrap_or_else(|e| {
                error!("Failed to write the image to standard output: {}", e);
                exit(exitcode::IOERR);
            });
        }
        Output::File(ref path) => {
            trace!("Writing the image to {}...", path.display());
            fs::write(path, output.bytes()).unwrap_or_else(|e| {
                error!("Failed to write output file {}: {}", path.display(), e);
                exit(exitcode::CANTCREAT);
            });
            debug!("Image written to {}", path.display());
        }
        Output::Generated => {
            let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
            let filename = generate_filename(&opts.config.text, now, output.format());
            let path = FileDownloader::new(".").download(output, &filename).unwrap_or_else(|e| {
                error!("Failed to save the image: {}", e);
                exit(exitcode::CANTCREAT);
            });
            if !opts.quiet() {
                eprintln!("{}", path.display());
            }
        }
    }
}

/// Print the share link of the stamp.
///
/// The link goes to standard output unless the image itself is written there.
fn print_link(opts: &Options, base: &str) {
    let link = share::encode(&opts.config, Some(base)).unwrap_or_else(|e| {
        error!("Failed to create the share link: {}", e);
        exit(exitcode::USAGE);
    });
    if opts.output == Output::Stdout {
        eprintln!("{}", link);
    } else {
        println!("{}", link);
    }
}
