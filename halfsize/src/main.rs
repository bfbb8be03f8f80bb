mod logger;

use argh::FromArgs;
use halfsize::transform::target_size;
use halfsize::{Image, PipelineError, ResizeOptions, ScaleMethod};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(FromArgs, Debug)]
/// Downsample an uncompressed true-color TGA image
struct Cli {
    /// input TGA file
    #[argh(positional)]
    input: PathBuf,

    /// output TGA file
    #[argh(positional)]
    output: PathBuf,

    /// scale factor; values above 1 shrink [default: 2]
    #[argh(option, default = "2.0")]
    scale: f32,

    /// resampling method: nearest, bilinear [default: nearest]
    #[argh(option, default = "ScaleMethod::NearestNeighbor")]
    method: ScaleMethod,

    /// log progress to stderr
    #[argh(switch, short = 'v')]
    verbose: bool,
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    let Some((cmd, rest)) = args.split_first() else {
        return ExitCode::SUCCESS;
    };
    let rest: Vec<&str> = rest.iter().map(String::as_str).collect();

    // Usage errors and --help both end the run normally
    let cli = match parse_cli(cmd, &rest) {
        Ok(cli) => cli,
        Err(text) => {
            println!("{text}");
            return ExitCode::SUCCESS;
        }
    };

    logger::init(cli.verbose);
    run(&cli)
}

/// Parse the command line, or return the text to print instead.
///
/// Parse errors are followed by the full usage text.
fn parse_cli(cmd: &str, args: &[&str]) -> Result<Cli, String> {
    Cli::from_args(&[cmd], args).map_err(|early| match early.status {
        Ok(()) => early.output,
        Err(()) => {
            let usage = Cli::from_args(&[cmd], &["--help"])
                .err()
                .map(|help| help.output)
                .unwrap_or_default();
            format!("{}\n\n{}", early.output.trim_end(), usage)
        }
    })
}

fn run(cli: &Cli) -> ExitCode {
    println!("Reading \"{}\"...", cli.input.display());
    let mut image = match Image::load(&cli.input) {
        Ok(image) => image,
        Err(e) => {
            println!("Image reading error.");
            println!("{e}");
            return ExitCode::SUCCESS;
        }
    };
    println!("Done");
    println!("Original size: {}x{}", image.width(), image.height());

    let options = ResizeOptions::default()
        .with_scale_factor(cli.scale)
        .with_method(cli.method);
    let resized = target_size(image.width(), image.height(), options.scale_factor)
        .map_err(PipelineError::from)
        .and_then(|(w, h)| {
            println!("Resizing to: {w}x{h}");
            image.resize(&options)
        });
    if let Err(e) = resized {
        println!("Image resizing error.");
        println!("{e}");
        return ExitCode::FAILURE;
    }
    println!("Done.");

    println!("Saving {}...", cli.output.display());
    if let Err(e) = image.save(&cli.output) {
        println!("Image writing error.");
        println!("{e}");
        return ExitCode::FAILURE;
    }
    println!("Done.");
    ExitCode::SUCCESS
}
