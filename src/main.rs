//! QR Illustrator CLI
//!
//! Usage:
//!   qr-illustrator [OPTIONS] [DATA]
//!
//! Options:
//!   -c, --config <FILE>      TOML job file; flags override its values
//!       --version <VERSION>  Symbol version: `-` (auto), 1-40 or M1-M4
//!   -s, --scale <SCALE>      Uniform scale factor
//!   -e, --error <LEVEL>      Error correction level: L, M, Q, H or none
//!   -n, --symbol-count <N>   Number of structured-append symbols
//!   -b, --background[=BOOL]  Draw a white background behind each symbol
//!       --allow-micro[=BOOL] Let automatic version selection pick Micro QR
//!       --boost-error[=BOOL] Raise the error level while the version stays the same
//!       --anchor-x/-y <N>    Reference point of the top-level group
//!       --fragment           Write only the `<g>` element
//!   -o, --output <FILE>      Write SVG to a file instead of stdout
//!   -v, --verbose            Log pipeline details to stderr
//!   -h, --help               Print help
//!
//! Boolean flags accept an explicit value (`--background=false`) so a job
//! file setting can be switched off from the command line.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::Parser;

use qr_illustrator::logging::init_cli_logger;
use qr_illustrator::options::parse_error_level;
use qr_illustrator::{
    render_with_config, ConfigError, QrOptions, QrcodeSource, RenderConfig, SvgConfig,
    VersionSelector,
};

#[derive(Parser)]
#[command(name = "qr-illustrator")]
#[command(about = "Render QR Codes and Micro QR Codes as compact SVG paths")]
struct Cli {
    /// Data to encode (reads stdin if neither this nor --config provides it)
    data: Option<String>,

    /// TOML job file; command-line flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Symbol version: `-` for automatic, 1-40, or M1-M4 for Micro QR
    #[arg(long)]
    version: Option<VersionSelector>,

    /// Uniform scale factor
    #[arg(short, long)]
    scale: Option<f64>,

    /// Error correction level: L, M, Q, H, or none
    #[arg(short, long)]
    error: Option<String>,

    /// Number of symbols for structured append
    #[arg(short = 'n', long)]
    symbol_count: Option<usize>,

    /// Draw a white background behind each symbol
    #[arg(short, long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    background: Option<bool>,

    /// Allow Micro QR versions when choosing the version automatically
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    allow_micro: Option<bool>,

    /// Raise the error correction level if the version stays the same
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    boost_error: Option<bool>,

    /// X coordinate of the reference point
    #[arg(long, allow_negative_numbers = true)]
    anchor_x: Option<f64>,

    /// Y coordinate of the reference point
    #[arg(long, allow_negative_numbers = true)]
    anchor_y: Option<f64>,

    /// Write only the group element, for insertion into another document
    #[arg(long)]
    fragment: bool,

    /// Output file (stdout if not provided)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log pipeline details to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Apply command-line flags on top of options loaded from a file
    fn apply(&self, mut options: QrOptions) -> Result<QrOptions, ConfigError> {
        if let Some(data) = &self.data {
            options.data = data.clone();
        }
        if let Some(version) = self.version {
            options.version = version;
        }
        if let Some(scale) = self.scale {
            options.scale = scale;
        }
        if let Some(error) = &self.error {
            options.error = parse_error_level(error)?;
        }
        if let Some(count) = self.symbol_count {
            options.symbol_count = count;
        }
        if let Some(background) = self.background {
            options.background = background;
        }
        if let Some(allow_micro) = self.allow_micro {
            options.allow_micro = allow_micro;
        }
        if let Some(boost_error) = self.boost_error {
            options.boost_error = boost_error;
        }
        if let Some(x) = self.anchor_x {
            options.anchor.x = x;
        }
        if let Some(y) = self.anchor_y {
            options.anchor.y = y;
        }
        Ok(options)
    }
}

fn main() {
    let cli = Cli::parse();
    init_cli_logger(cli.verbose);

    // Load job file
    let base = match &cli.config {
        Some(path) => match QrOptions::from_file(path) {
            Ok(options) => options,
            Err(e) => {
                eprintln!("Error loading job file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => QrOptions::default(),
    };
    let mut options = match cli.apply(base) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    // Fall back to stdin for the data
    if cli.data.is_none() && options.data.is_empty() {
        let mut buffer = String::new();
        if let Err(e) = io::stdin().read_to_string(&mut buffer) {
            eprintln!("Error reading from stdin: {}", e);
            std::process::exit(1);
        }
        options.data = buffer.trim_end_matches(['\r', '\n']).to_string();
    }

    let svg_config = if cli.fragment {
        SvgConfig::fragment()
    } else {
        SvgConfig::new()
    };
    let config = RenderConfig::new().with_svg(svg_config);
    let svg = match render_with_config(&QrcodeSource, &options, config) {
        Ok(svg) => svg,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    match &cli.output {
        Some(path) => {
            if let Err(e) = fs::write(path, svg + "\n") {
                eprintln!("Error writing file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        }
        None => println!("{}", svg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use qr_illustrator::layout::Point;
    use qr_illustrator::{ErrorLevel, SymbolVersion};

    const JOB: &str = r#"
data = "FROM FILE"
version = "5"
error = "q"
background = true
allow_micro = true
boost_error = true

[anchor]
x = 1.0
y = 2.0
"#;

    fn job() -> QrOptions {
        QrOptions::from_str(JOB).unwrap()
    }

    fn apply(args: &[&str]) -> QrOptions {
        let cli = Cli::try_parse_from(std::iter::once("qr-illustrator").chain(args.iter().copied()))
            .unwrap();
        cli.apply(job()).unwrap()
    }

    #[test]
    fn test_no_flags_keep_job_file() {
        assert_eq!(apply(&[]), job());
    }

    #[test]
    fn test_data_argument_beats_job_file() {
        assert_eq!(apply(&["FROM ARGS"]).data, "FROM ARGS");
    }

    #[test]
    fn test_version_replaces_job_file() {
        let options = apply(&["--version", "M2"]);
        assert_eq!(
            options.version,
            VersionSelector::Fixed(SymbolVersion::Micro(2))
        );
    }

    #[test]
    fn test_error_none_clears_level() {
        assert_eq!(apply(&["--error", "none"]).error, None);
        assert_eq!(apply(&["-e", "h"]).error, Some(ErrorLevel::H));
    }

    #[test]
    fn test_invalid_error_level() {
        let cli = Cli::try_parse_from(["qr-illustrator", "--error", "X"]).unwrap();
        assert!(cli.apply(job()).is_err());
    }

    #[test]
    fn test_negative_anchor() {
        let options = apply(&["--anchor-x", "-5", "--anchor-y=-2.5"]);
        assert_eq!(options.anchor, Point::new(-5.0, -2.5));
    }

    #[test]
    fn test_boolean_flags_switch_off_job_file() {
        let options = apply(&[
            "--background=false",
            "--allow-micro=false",
            "--boost-error=false",
        ]);
        assert!(!options.background);
        assert!(!options.allow_micro);
        assert!(!options.boost_error);
    }

    #[test]
    fn test_bare_boolean_flag_switches_on() {
        let cli = Cli::try_parse_from(["qr-illustrator", "--background", "HELLO"]).unwrap();
        let options = cli.apply(QrOptions::default()).unwrap();
        assert!(options.background);
        assert_eq!(options.data, "HELLO");
    }
}
