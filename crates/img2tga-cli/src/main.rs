//! img2tga - convert images to Truevision TGA.
//!
//! Two modes, picked from the arguments and the shape of stdin:
//! file-to-file (`img2tga [-r] in.png out.tga`) and stream-to-stream
//! (`cat in.png | img2tga [-r] > out.tga`). In stream mode stdout carries
//! only TGA bytes; every diagnostic goes to stderr through the logger.

use std::io::IsTerminal;
use std::path::Path;
use std::process::exit;

use clap::{Arg, ArgAction, ArgMatches, Command};
use log::{error, Level};

use img2tga_core::convert::{convert_file_to_file, convert_stream_to_stream};
use img2tga_core::decode::SniffingDecoder;

fn create_cmd_args() -> Command {
    // clap's own help flag prints to stdout; it is disabled so usage can be
    // routed to stderr, keeping stdout clean for image bytes.
    Command::new("img2tga")
        .about("Convert images to Truevision TGA")
        .disable_help_flag(true)
        .after_help(
            "Examples:\n  \
             img2tga -r photo.png photo.tga\n  \
             cat photo.png | img2tga -r > photo.tga",
        )
        .arg(
            Arg::new("rle")
                .short('r')
                .long("rle")
                .action(ArgAction::SetTrue)
                .help("Compress the image data with run-length encoding"),
        )
        .arg(
            Arg::new("help")
                .short('h')
                .long("help")
                .action(ArgAction::SetTrue)
                .help("Show this help message"),
        )
        .arg(
            Arg::new("input")
                .value_name("INPUT")
                .help("Source image file; omit to read from stdin"),
        )
        .arg(
            Arg::new("output")
                .value_name("OUTPUT")
                .help("Destination TGA file; omit to write to stdout"),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .action(ArgAction::SetTrue)
                .help_heading("LOGGING")
                .help("Display debug information and higher"),
        )
        .arg(
            Arg::new("trace")
                .long("trace")
                .action(ArgAction::SetTrue)
                .help_heading("LOGGING")
                .help("Display very verbose information"),
        )
        .arg(
            Arg::new("warn")
                .long("warn")
                .action(ArgAction::SetTrue)
                .help_heading("LOGGING")
                .help("Display warnings and errors only"),
        )
}

/// Set up logging options
fn setup_logger(options: &ArgMatches) {
    let log_level = if *options.get_one::<bool>("debug").unwrap() {
        Level::Debug
    } else if *options.get_one::<bool>("trace").unwrap() {
        Level::Trace
    } else if *options.get_one::<bool>("warn").unwrap() {
        Level::Warn
    } else {
        Level::Info
    };

    simple_logger::init_with_level(log_level).unwrap();
}

fn show_usage(cmd: &mut Command) {
    eprintln!("{}", cmd.render_help());
}

fn main() {
    let mut cmd = create_cmd_args();
    let options = match cmd.clone().try_get_matches() {
        Ok(options) => options,
        Err(err) => {
            // clap reports unknown flags and surplus positionals on stderr,
            // usage included.
            let _ = err.print();
            exit(1);
        }
    };

    if options.get_flag("help") {
        show_usage(&mut cmd);
        exit(0);
    }

    setup_logger(&options);

    let rle = options.get_flag("rle");
    let decoder = SniffingDecoder::new();

    let input = options.get_one::<String>("input");
    let output = options.get_one::<String>("output");

    let result = match (input, output) {
        (Some(input), Some(output)) => {
            convert_file_to_file(&decoder, Path::new(input), Path::new(output), rle)
        }
        (None, None) => {
            if std::io::stdin().is_terminal() {
                // Invoked bare from a terminal: show help instead of
                // waiting forever on stdin.
                show_usage(&mut cmd);
                exit(0);
            }
            convert_stream_to_stream(&decoder, rle)
        }
        _ => {
            error!("expected both an input and an output path");
            show_usage(&mut cmd);
            exit(1);
        }
    };

    if let Err(err) = result {
        error!("{err}");
        exit(1);
    }
}
