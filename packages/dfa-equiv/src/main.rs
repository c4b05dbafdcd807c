use anyhow::Context;
use clap::{Parser, Subcommand};
use dfa_equiv_lib::{
    automaton::{Automaton, draft::AutomatonDraft, validity::AutomatonValidity},
    checker,
};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "DFA Equivalence Tool")]
#[command(version = "0.1")]
#[command(about = "Validate finite automata and check DFA language equivalence", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a JSON automaton description for validity.
    Validate {
        file: String,

        /// Also require the transition relation to be a total function.
        #[arg(short, long)]
        dfa: bool,
    },
    /// Generate the accepted and rejected words of an automaton over a
    /// length range.
    Words {
        file: String,

        #[arg(long, default_value_t = 0)]
        min: usize,

        #[arg(long, default_value_t = 4)]
        max: usize,
    },
    /// Classify a word, given as one argument per input symbol.
    Classify {
        file: String,

        symbols: Vec<String>,
    },
    /// Check language equivalence of a solution and an attempt.
    Check {
        solution: String,
        attempt: String,

        /// Report counter-example words when the automata differ.
        #[arg(short, long)]
        witnesses: bool,
    },
}

/// Validity with the reasons rendered for terminal output.
#[derive(Debug, Serialize)]
struct ValidityOutput {
    valid_automaton: bool,
    valid_dfa: Option<bool>,
    reasons: Vec<String>,
}

impl From<AutomatonValidity> for ValidityOutput {
    fn from(validity: AutomatonValidity) -> Self {
        ValidityOutput {
            valid_automaton: validity.valid_automaton,
            valid_dfa: validity.valid_dfa,
            reasons: validity.rendered_reasons(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ClassifyOutput {
    word: String,
    accepted: Option<bool>,
    error: Option<String>,
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let args = Args::parse();

    match args.command {
        Command::Validate { file, dfa } => {
            let draft = AutomatonDraft::from_file(&file)?;
            let validity = if dfa { draft.check_dfa() } else { draft.check() };
            print_json(&ValidityOutput::from(validity))?;
        }
        Command::Words { file, min, max } => {
            let automaton = load_automaton(&file)?;
            let report = automaton.generate_words(min, max)?;
            print_json(&report)?;
        }
        Command::Classify { file, symbols } => {
            let automaton = load_automaton(&file)?;
            let word = symbols.concat();

            let output = match automaton.classify_word(symbols.iter().map(String::as_str)) {
                Ok(accepted) => ClassifyOutput {
                    word,
                    accepted: Some(accepted),
                    error: None,
                },
                Err(error) => ClassifyOutput {
                    word,
                    accepted: None,
                    error: Some(error.to_string()),
                },
            };

            print_json(&output)?;
        }
        Command::Check {
            solution,
            attempt,
            witnesses,
        } => {
            let solution = load_automaton(&solution)?;
            let attempt = load_automaton(&attempt)?;

            let report = checker::check_equivalence(&solution, &attempt, witnesses)?;
            print_json(&report)?;
        }
    }

    Ok(())
}

fn load_automaton(file: &str) -> anyhow::Result<Automaton> {
    let draft = AutomatonDraft::from_file(file)
        .with_context(|| format!("failed to read automaton from '{}'", file))?;

    draft.build().map_err(|validity| {
        anyhow::anyhow!(
            "automaton '{}' is not valid: {}",
            draft.name,
            validity.rendered_reasons().join("; ")
        )
    })
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn init_logging() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
