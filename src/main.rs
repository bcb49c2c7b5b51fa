//! taylor-atan CLI
//!
//! Evaluates the arctangent series, dumps error samples and renders the
//! error chart.

use clap::{CommandFactory, Parser as ClapParser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use tracing::{debug, error};

use taylor_atan::chart::{self, ChartConfig, DEFAULT_TERMS};
use taylor_atan::{
    generate_data_points, relative_error, remainder_bound, taylor_atan, ErrorSeries, Sample,
};

#[derive(ClapParser)]
#[command(name = "taylor-atan")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Taylor series arctangent approximation and its relative error", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the series at a single point and compare it with atan
    Eval {
        /// Evaluation point, expected in [-1, 1]
        #[arg(allow_negative_numbers = true)]
        x: f64,

        /// Number of series terms
        #[arg(short, long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..))]
        terms: u32,
    },

    /// Print the 200 relative error samples on [-1, 1]
    Samples {
        /// Number of series terms
        #[arg(short, long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..))]
        terms: u32,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Csv)]
        format: Format,
    },

    /// Print the error of each series at the sample nearest to x
    Hover {
        /// Point to look up, expected in [-1, 1]
        #[arg(allow_negative_numbers = true)]
        x: f64,

        /// Term counts to compare (defaults to 3 5 7 9 11)
        #[arg(short, long, num_args = 1.., value_parser = clap::value_parser!(u32).range(1..))]
        terms: Vec<u32>,
    },

    /// Render the relative error chart as SVG
    Plot {
        /// Output SVG path
        #[arg(short, long, default_value = "atan_error.svg")]
        output: PathBuf,

        /// Chart configuration (TOML)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Term counts to plot, overriding the configuration
        #[arg(short, long, num_args = 1.., value_parser = clap::value_parser!(u32).range(1..))]
        terms: Vec<u32>,

        /// Canvas width in pixels
        #[arg(long)]
        width: Option<u32>,

        /// Canvas height in pixels
        #[arg(long)]
        height: Option<u32>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Csv,
    Json,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("taylor_atan=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Eval { x, terms } => run_eval(x, terms as usize),
        Commands::Samples { terms, format } => run_samples(terms as usize, format),
        Commands::Hover { x, terms } => run_hover(x, &terms),
        Commands::Plot {
            output,
            config,
            terms,
            width,
            height,
        } => run_plot(output, config, &terms, width, height),
        Commands::Completions { shell } => {
            run_completions(shell);
            Ok(())
        }
    };

    if let Err(e) = result {
        error!("{e}");
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run_eval(x: f64, terms: usize) -> Result<(), Box<dyn std::error::Error>> {
    if !(-1.0..=1.0).contains(&x) {
        debug!(x, "outside the convergence interval");
    }
    write_eval(&mut io::stdout().lock(), x, terms)?;
    Ok(())
}

fn write_eval<W: Write>(out: &mut W, x: f64, terms: usize) -> io::Result<()> {
    let approx = taylor_atan(x, terms);
    let exact = x.atan();
    writeln!(out, "x:              {x}")?;
    writeln!(out, "terms:          {terms}")?;
    writeln!(out, "approximation:  {approx}")?;
    writeln!(out, "atan:           {exact}")?;
    writeln!(out, "absolute error: {}", (approx - exact).abs())?;
    writeln!(out, "relative error: {}%", relative_error(approx, exact))?;
    writeln!(out, "bound:          {}", remainder_bound(x, terms))?;
    Ok(())
}

fn run_samples(terms: usize, format: Format) -> Result<(), Box<dyn std::error::Error>> {
    let samples = generate_data_points(terms);
    let mut out = io::stdout().lock();
    match format {
        Format::Csv => write_csv(&mut out, &samples)?,
        Format::Json => {
            serde_json::to_writer_pretty(&mut out, &samples)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn write_csv<W: Write>(out: &mut W, samples: &[Sample]) -> io::Result<()> {
    writeln!(out, "x,error")?;
    for s in samples {
        writeln!(out, "{s}")?;
    }
    Ok(())
}

fn run_hover(x: f64, terms: &[u32]) -> Result<(), Box<dyn std::error::Error>> {
    let terms: Vec<usize> = if terms.is_empty() {
        DEFAULT_TERMS.to_vec()
    } else {
        terms.iter().map(|&t| t as usize).collect()
    };
    write_hover(&mut io::stdout().lock(), x, &terms)?;
    Ok(())
}

fn write_hover<W: Write>(out: &mut W, x: f64, terms: &[usize]) -> io::Result<()> {
    writeln!(out, "x: {x:.3}")?;
    for &t in terms {
        let series = ErrorSeries::new(t);
        if let Some(s) = series.nearest(x) {
            writeln!(out, "{t} terms: {:.3}%", s.error)?;
        }
    }
    Ok(())
}

fn run_plot(
    output: PathBuf,
    config_path: Option<PathBuf>,
    terms: &[u32],
    width: Option<u32>,
    height: Option<u32>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match config_path {
        Some(path) => ChartConfig::from_file(&path)?,
        None => ChartConfig::default(),
    };
    if !terms.is_empty() {
        config.terms = terms.iter().map(|&t| t as usize).collect();
    }
    if let Some(width) = width {
        config.width = width;
    }
    if let Some(height) = height {
        config.height = height;
    }
    debug!(?config, "chart configuration");

    chart::render_svg(&config, &output)?;
    println!("Wrote {}", output.display());
    Ok(())
}

fn run_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "taylor-atan", &mut io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_terms_must_be_positive() {
        assert!(Cli::try_parse_from(["taylor-atan", "eval", "0.5", "--terms", "0"]).is_err());
        assert!(Cli::try_parse_from(["taylor-atan", "eval", "-0.5", "--terms", "3"]).is_ok());
    }

    #[test]
    fn test_plot_terms_list() {
        let cli = Cli::try_parse_from(["taylor-atan", "plot", "--terms", "3", "7", "15"]).unwrap();
        match cli.command {
            Commands::Plot { terms, output, .. } => {
                assert!(terms == vec![3, 7, 15]);
                assert!(output == PathBuf::from("atan_error.svg"));
            }
            _ => panic!("expected plot command"),
        }
    }

    #[test]
    fn test_write_csv() {
        let mut buf = Vec::new();
        let samples = generate_data_points(3);
        write_csv(&mut buf, &samples).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines.len() == 201);
        assert!(lines[0] == "x,error");
        assert!(lines[1].starts_with("-1,"));
        assert!(lines[200].starts_with("1,"));
    }

    #[test]
    fn test_write_hover() {
        let mut buf = Vec::new();
        write_hover(&mut buf, -0.25, &[3, 11]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines.len() == 3);
        assert!(lines[0] == "x: -0.250");

        let series = ErrorSeries::new(3);
        let s = series.nearest(-0.25).unwrap();
        assert!(s.x >= -0.25);
        assert!(lines[1] == format!("3 terms: {:.3}%", s.error));
        assert!(lines[2].starts_with("11 terms: "));
        assert!(lines[2].ends_with('%'));
    }

    #[test]
    fn test_write_eval() {
        let mut buf = Vec::new();
        write_eval(&mut buf, 1.0, 3).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines.len() == 7);
        assert!(lines[0] == "x:              1");
        assert!(lines[1] == "terms:          3");
        let approx = 1.0 - 1.0 / 3.0 + 1.0 / 5.0;
        assert!(lines[2] == format!("approximation:  {approx}"));
        assert!(lines[3] == format!("atan:           {}", 1.0_f64.atan()));
        assert!(lines[5].starts_with("relative error: "));
        assert!(lines[5].ends_with('%'));
        assert!(lines[6] == format!("bound:          {}", 1.0 / 7.0));
    }
}
