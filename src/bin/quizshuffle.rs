//! Command-line interface for quizshuffle
//! This binary parses a LaTeX exam source file and writes shuffled versions
//! of it alongside the input.
//!
//! Usage:
//!   quizshuffle generate `<path>` [options]   - Write shuffled exam versions
//!   quizshuffle inspect `<path>` [--format]   - Print the parsed structure

use clap::{Arg, ArgAction, ArgMatches, Command};
use quizshuffle::quiz::config::{suggested_suffix, Config};
use quizshuffle::quiz::error::{Error, Result};
use quizshuffle::quiz::extraction::ExtractionResult;
use quizshuffle::quiz::processor::{generate_version, load_exam, ExamSummary};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

fn main() {
    let matches = Command::new("quizshuffle")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for generating shuffled versions of LaTeX exam files")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("generate")
                .about("Parse an exam file and write shuffled versions of it")
                .arg(
                    Arg::new("path")
                        .help("Path to the exam source file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("versions")
                        .long("versions")
                        .short('n')
                        .help("Number of versions to generate")
                        .default_value("2"),
                )
                .arg(
                    Arg::new("suffix")
                        .long("suffix")
                        .short('s')
                        .help("Suffix character of the first version (default: the letter after the stem's last character)"),
                )
                .arg(
                    Arg::new("keep-question-order")
                        .long("keep-question-order")
                        .help("Do not reorder questions")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("keep-alternative-order")
                        .long("keep-alternative-order")
                        .help("Do not permute multiple-choice alternatives")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("max-consecutive")
                        .long("max-consecutive")
                        .help("Maximum consecutive questions sharing a correct-answer position")
                        .default_value("3"),
                )
                .arg(
                    Arg::new("interactive")
                        .long("interactive")
                        .short('i')
                        .help("Prompt for every configuration value")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Parse an exam file and print its structure")
                .arg(
                    Arg::new("path")
                        .help("Path to the exam source file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format ('text' or 'json')")
                        .default_value("text"),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("generate", generate_matches)) => handle_generate_command(generate_matches),
        Some(("inspect", inspect_matches)) => handle_inspect_command(inspect_matches),
        _ => unreachable!(),
    }
}

/// Handle the generate command
fn handle_generate_command(matches: &ArgMatches) {
    let config = build_config(matches).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let extraction = load_and_report(&config.filepath);
    let document = extraction.document;

    let mut rng = rand::thread_rng();
    for index in 0..config.num_versions {
        match generate_version(&config, &document, index, &mut rng) {
            Ok(output) => {
                for diagnostic in &output.diagnostics {
                    eprintln!("{}", diagnostic);
                }
                println!(
                    "[{}/{}] wrote {}",
                    index + 1,
                    config.num_versions,
                    output.path.display()
                );
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }
}

/// Handle the inspect command
fn handle_inspect_command(matches: &ArgMatches) {
    let path = PathBuf::from(matches.get_one::<String>("path").unwrap());
    let format = matches.get_one::<String>("format").unwrap();

    let extraction = load_and_report(&path);
    let summary = ExamSummary::from_document(&extraction.document);

    match format.as_str() {
        "json" => {
            let output = serde_json::to_string_pretty(&summary).unwrap_or_else(|e| {
                eprintln!("Serialization error: {}", e);
                std::process::exit(1);
            });
            println!("{}", output);
        }
        _ => {
            println!(
                "{} questions ({} multiple choice, {} true/false)",
                summary.question_count, summary.multiple_choice, summary.true_false
            );
            println!(
                "header: {} bytes, footer: {} bytes",
                summary.header_bytes, summary.footer_bytes
            );
            for question in &summary.questions {
                match question.correct_answer_position {
                    Some(position) => println!(
                        "  {:>3}. {} (correct at {})  {}",
                        question.index + 1,
                        question.kind,
                        position,
                        question.opening_line
                    ),
                    None => println!(
                        "  {:>3}. {}  {}",
                        question.index + 1,
                        question.kind,
                        question.opening_line
                    ),
                }
            }
        }
    }
}

/// Parse the exam file, report its diagnostics and summary, exit on fatal errors.
fn load_and_report(path: &Path) -> ExtractionResult {
    let extraction = load_exam(path).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    for diagnostic in &extraction.diagnostics {
        eprintln!("{}", diagnostic);
    }
    println!(
        "parsed {} questions ({} multiple choice, {} true/false) from {}",
        extraction.document.questions.len(),
        extraction.document.multiple_choice_count(),
        extraction.document.true_false_count(),
        path.display()
    );
    extraction
}

/// Assemble the run configuration from flags, or from prompts with
/// flag-derived defaults when --interactive is given.
fn build_config(matches: &ArgMatches) -> Result<Config> {
    let filepath = PathBuf::from(matches.get_one::<String>("path").unwrap());

    let num_versions = parse_count(matches.get_one::<String>("versions").unwrap())?;
    let suffix_char = match matches.get_one::<String>("suffix") {
        Some(value) => parse_suffix(value)?,
        None => suggested_suffix(&filepath).unwrap_or('B'),
    };
    let shuffle_questions = !matches.get_flag("keep-question-order");
    let shuffle_alternatives = !matches.get_flag("keep-alternative-order");
    let max_consecutive = parse_count(matches.get_one::<String>("max-consecutive").unwrap())?;

    let config = if matches.get_flag("interactive") {
        collect_interactively(
            filepath,
            num_versions,
            suffix_char,
            shuffle_questions,
            shuffle_alternatives,
            max_consecutive,
        )?
    } else {
        Config {
            filepath,
            num_versions,
            suffix_char,
            shuffle_questions,
            shuffle_alternatives,
            max_consecutive_same_answer: max_consecutive,
        }
    };

    config.validate()?;
    Ok(config)
}

/// Prompt for each configuration value, pre-filling the given defaults.
fn collect_interactively(
    filepath: PathBuf,
    default_versions: usize,
    default_suffix: char,
    default_shuffle_questions: bool,
    default_shuffle_alternatives: bool,
    default_max_consecutive: usize,
) -> Result<Config> {
    let num_versions = parse_count(&prompt(
        "Number of versions to generate",
        &default_versions.to_string(),
    ))?;
    let suffix_char = parse_suffix(&prompt(
        "Suffix character of the first version",
        &default_suffix.to_string(),
    ))?;
    let shuffle_questions = prompt_bool("Shuffle question order", default_shuffle_questions);
    let shuffle_alternatives = prompt_bool(
        "Shuffle multiple-choice alternatives",
        default_shuffle_alternatives,
    );
    let max_consecutive_same_answer = parse_count(&prompt(
        "Maximum consecutive answers in the same position",
        &default_max_consecutive.to_string(),
    ))?;

    Ok(Config {
        filepath,
        num_versions,
        suffix_char,
        shuffle_questions,
        shuffle_alternatives,
        max_consecutive_same_answer,
    })
}

/// Ask for one value, returning the default on empty input.
///
/// End of input (Ctrl-D) during a prompt exits cleanly.
fn prompt(label: &str, default: &str) -> String {
    print!("{} [default: {}]: ", label, default);
    let _ = std::io::stdout().flush();

    let mut line = String::new();
    match std::io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => {
            println!();
            std::process::exit(0);
        }
        Ok(_) => {}
    }

    let value = line.trim();
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

/// Ask a yes/no question; the default option is shown uppercased.
fn prompt_bool(label: &str, default: bool) -> bool {
    let options = if default { "Y/n" } else { "y/N" };
    let default_str = if default { "y" } else { "n" };
    let answer = prompt(&format!("{} ({})", label, options), default_str).to_lowercase();
    match answer.as_str() {
        "y" => true,
        "n" => false,
        _ => default,
    }
}

fn parse_count(value: &str) -> Result<usize> {
    value
        .trim()
        .parse::<usize>()
        .map_err(|_| Error::InvalidCount(value.trim().to_string()))
}

fn parse_suffix(value: &str) -> Result<char> {
    let mut chars = value.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c.to_ascii_uppercase()),
        _ => Err(Error::InvalidSuffix(value.trim().to_string())),
    }
}
