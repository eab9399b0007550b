use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Instant;

use electre_rank::config::{self, Config};
use electre_rank::outranking::{summarize, DecisionMatrix, Electre, ElectreReport};
use electre_rank::output::{self, format_table};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 2;
const EXIT_COMPUTE: i32 = 3;
const EXIT_CONFIG: i32 = 4;
const EXIT_OUTPUT: i32 = 5;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    Normalized,
    Weighted,
    Concordance,
    Discordance,
    Concordant,
    Discordant,
    Outranking,
    All,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rank alternatives by how many others they outrank
    Rank {
        /// Decision matrix (.csv or tab-separated)
        matrix: PathBuf,
        /// Print tab-separated values instead of a table
        #[arg(long)]
        tsv: bool,
    },
    /// Print intermediate matrices
    Matrices {
        /// Decision matrix (.csv or tab-separated)
        matrix: PathBuf,
        /// Which stage to print
        #[arg(long, value_enum, default_value_t = Stage::All)]
        stage: Stage,
        /// Decimal places for real-valued cells
        #[arg(long, default_value_t = 3)]
        precision: usize,
    },
    /// Compare criterion distributions before and after normalization
    Describe {
        /// Decision matrix (.csv or tab-separated)
        matrix: PathBuf,
    },
    /// Write every matrix of a run to a JSON file
    Export {
        /// Decision matrix (.csv or tab-separated)
        matrix: PathBuf,
        /// Destination JSON file
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Write a starter config file
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "electre-rank")]
#[command(about = "ELECTRE outranking of alternatives on weighted criteria", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/electre-rank/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Normalization rule id (1-4), overrides the config file
    #[arg(long, global = true)]
    rule: Option<u8>,

    /// Concordance threshold, overrides the config file
    #[arg(long, global = true)]
    concordance_threshold: Option<f64>,

    /// Discordance threshold, overrides the config file (default: matrix mean)
    #[arg(long, global = true)]
    discordance_threshold: Option<f64>,

    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();
    electre_rank::logging::init_logging(cli.verbose);
    let start_time = Instant::now();

    if let Commands::Init { force } = cli.command {
        let path = match cli.config.clone().map(Ok).unwrap_or_else(config::get_config_path) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Config error: {}", e);
                std::process::exit(EXIT_CONFIG);
            }
        };
        if let Err(e) = config::write_template(&path, force) {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
        println!("Wrote starter config to {}", path.display());
        std::process::exit(EXIT_SUCCESS);
    }

    // Load config and apply command-line overrides
    let mut config = match config::load_config(cli.config.clone()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };
    apply_overrides(&mut config, &cli);

    if let Err(errors) = config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let electre = match (config.criteria(), config.settings()) {
        (Ok(criteria), Ok(settings)) => Electre::new(criteria, settings),
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if cli.verbose {
        eprintln!(
            "Loaded {} criteria, {}",
            electre.criteria().len(),
            electre.settings().rule
        );
    }

    let matrix_path = match &cli.command {
        Commands::Rank { matrix, .. }
        | Commands::Matrices { matrix, .. }
        | Commands::Describe { matrix }
        | Commands::Export { matrix, .. } => matrix.clone(),
        Commands::Init { .. } => unreachable!("init handled above"),
    };

    let matrix = match electre_rank::input::load_matrix(&matrix_path) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Input error: {:#}", e);
            std::process::exit(EXIT_INPUT);
        }
    };

    if cli.verbose {
        eprintln!(
            "Read {} alternatives x {} criteria from {}",
            matrix.n_rows(),
            matrix.n_columns(),
            matrix_path.display()
        );
    }

    let report = match electre.run(&matrix) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Computation error: {}", e);
            std::process::exit(EXIT_COMPUTE);
        }
    };

    let use_colors = output::should_use_colors();

    match cli.command {
        Commands::Rank { tsv, .. } => {
            let ranked = report.ranking();
            if tsv {
                println!("{}", output::format_tsv(&ranked));
            } else {
                println!("{}", output::format_ranking(&ranked, &report.kernel(), use_colors));
            }
        }
        Commands::Matrices { stage, precision, .. } => {
            print_matrices(&report, stage, precision, use_colors);
        }
        Commands::Describe { .. } => {
            println!("{}", describe(&matrix, &report, use_colors));
        }
        Commands::Export { output: path, .. } => {
            let code = export(&path, &report);
            if code != EXIT_SUCCESS {
                std::process::exit(code);
            }
        }
        Commands::Init { .. } => unreachable!("init handled above"),
    }

    if cli.verbose {
        eprintln!();
        eprintln!("Total: {} alternatives in {:?}", matrix.n_rows(), start_time.elapsed());
    }

    std::process::exit(EXIT_SUCCESS);
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(rule) = cli.rule {
        config.normalization = rule;
    }
    if let Some(t) = cli.concordance_threshold {
        config.concordance_threshold = Some(t);
    }
    if let Some(t) = cli.discordance_threshold {
        config.discordance_threshold = Some(t);
    }
}

/// Write the report and return the exit code for the outcome.
fn export(path: &Path, report: &ElectreReport) -> i32 {
    match output::write_report(path, report) {
        Ok(()) => {
            println!("Wrote report to {}", path.display());
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Export error: {:#}", e);
            EXIT_OUTPUT
        }
    }
}

fn print_matrices(report: &ElectreReport, stage: Stage, precision: usize, use_colors: bool) {
    let show = |s: Stage| stage == Stage::All || stage == s;
    let mut sections = Vec::new();

    if show(Stage::Normalized) {
        let title = format!("Normalized matrix ({})", report.normalized.rule());
        sections.push((title, format_table(&*report.normalized, precision, use_colors)));
    }
    if show(Stage::Weighted) {
        sections.push((
            "Weighted normalized matrix".to_string(),
            format_table(&*report.weighted, precision, use_colors),
        ));
    }
    if show(Stage::Concordance) {
        sections.push((
            "Concordance matrix".to_string(),
            format_table(&*report.concordance, precision, use_colors),
        ));
    }
    if show(Stage::Discordance) {
        sections.push((
            "Discordance matrix".to_string(),
            format_table(&*report.discordance, precision, use_colors),
        ));
    }
    if show(Stage::Concordant) {
        sections.push((
            format!("Concordant dominance (C > {})", report.concordance_threshold),
            format_table(&*report.concordant_dominance, precision, use_colors),
        ));
    }
    if show(Stage::Discordant) {
        sections.push((
            format!("Discordant dominance (D < {:.4})", report.discordance_threshold),
            format_table(&*report.discordant_dominance, precision, use_colors),
        ));
    }
    if show(Stage::Outranking) {
        sections.push((
            "Aggregated dominance (outranking)".to_string(),
            format_table(&*report.outranking, precision, use_colors),
        ));
    }

    let rendered: Vec<String> = sections
        .into_iter()
        .map(|(title, body)| format!("{}\n{}", title, body))
        .collect();
    println!("{}", rendered.join("\n\n"));
}

fn describe(matrix: &DecisionMatrix, report: &ElectreReport, use_colors: bool) -> String {
    let before = summarize(matrix);
    let after = summarize(&report.normalized);
    output::format_summaries(&before, &after, use_colors)
}
