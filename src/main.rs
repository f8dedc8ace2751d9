//! `graybmp <input.bmp>`: convert the palette of an 8-bit BMP to grayscale
//! and write the result to `salida.bmp` in the current directory.

use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use graybmp::{BitmapError, DecodeRequest, EncodeRequest, Unstoppable};
use log::{Level, debug, info, warn};

/// Output is always written here, relative to the working directory.
const OUTPUT_FILE_NAME: &str = "salida.bmp";
const PARTIAL_SUFFIX: &str = ".partial";

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}\nThis program requires a 256 color BMP file as input.\nExample: graybmp image.bmp")]
    Arguments(String),

    #[error("could not open input file '{}': {source}", path.display())]
    OpenInput { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Bitmap(#[from] BitmapError),

    #[error("could not write output file '{}': {source}", path.display())]
    WriteOutput { path: PathBuf, source: io::Error },
}

#[rustfmt::skip]
fn create_cmd_args() -> Command {
    Command::new("graybmp")
        .about("Convert the palette of an 8-bit BMP to grayscale, writing salida.bmp")
        .arg(Arg::new("input")
            .help("8-bit (256 color) BMP file to convert")
            .value_parser(value_parser!(PathBuf))
            .required(true))
        .arg(Arg::new("debug")
            .long("debug")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display debug information and higher"))
        .arg(Arg::new("trace")
            .long("trace")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display very verbose information"))
}

fn setup_logger(options: &ArgMatches) {
    let log_level = if options.get_flag("trace") {
        Level::Trace
    } else if options.get_flag("debug") {
        Level::Debug
    } else {
        Level::Warn
    };

    if let Err(e) = simple_logger::init_with_level(log_level) {
        println!("could not initialize logger: {e}");
        return;
    }
    info!("Log level :{log_level}");
}

/// Decode `input`, gray its palette and write the result to `output`.
///
/// Nothing is left at `output` unless every section was written.
fn convert(input: &Path, output: &Path) -> Result<(), CliError> {
    let data = fs::read(input).map_err(|source| CliError::OpenInput {
        path: input.to_path_buf(),
        source,
    })?;
    debug!("read {} bytes from {}", data.len(), input.display());

    let mut bitmap = DecodeRequest::new(&data).decode(Unstoppable)?;
    drop(data);
    bitmap.to_grayscale();

    write_atomically(output, |sink| {
        EncodeRequest::new(&bitmap).write_to(sink, Unstoppable)
    })
}

/// Write through `encode` into a sibling temp file, then move it into place.
fn write_atomically<F>(output: &Path, encode: F) -> Result<(), CliError>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<(), BitmapError>,
{
    let mut partial = output.as_os_str().to_owned();
    partial.push(PARTIAL_SUFFIX);
    let partial = PathBuf::from(partial);

    let write_err = |source: io::Error| CliError::WriteOutput {
        path: output.to_path_buf(),
        source,
    };

    let file = File::create(&partial).map_err(write_err)?;
    let mut sink = BufWriter::new(file);
    let result = encode(&mut sink)
        .map_err(|e| match e {
            BitmapError::Io(source) => write_err(source),
            other => CliError::Bitmap(other),
        })
        .and_then(|()| {
            let file = sink.into_inner().map_err(|e| write_err(e.into_error()))?;
            file.sync_all().map_err(write_err)?;
            drop(file);
            fs::rename(&partial, output).map_err(write_err)
        });

    if result.is_err() {
        if let Err(e) = fs::remove_file(&partial) {
            warn!("could not remove partial output {}: {e}", partial.display());
        }
    }
    result
}

fn main() -> ExitCode {
    let options = match create_cmd_args().try_get_matches() {
        Ok(options) => options,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{e}");
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            println!("{}", CliError::Arguments(e.to_string()));
            return ExitCode::from(1);
        }
    };

    setup_logger(&options);

    let Some(input) = options.get_one::<PathBuf>("input") else {
        println!("{}", CliError::Arguments("missing input file".into()));
        return ExitCode::from(1);
    };

    match convert(input, Path::new(OUTPUT_FILE_NAME)) {
        Ok(()) => {
            println!("Image converted to grayscale and saved as '{OUTPUT_FILE_NAME}'");
            ExitCode::SUCCESS
        }
        Err(e) => {
            debug!("{e:?}");
            println!("{e}");
            ExitCode::from(1)
        }
    }
}
