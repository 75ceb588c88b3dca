mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use solrq::{Factor, Operator, Proximity, Q, QueryDoc, Range, Value};
use std::io;
use std::path::{Path, PathBuf};
use termcolor::ColorChoice;

const ENV_LOG: &str = "SOLRQ_LOG";

#[derive(Parser)]
#[command(name = "solrq")]
#[command(about = "Build correctly escaped Solr query strings", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Print the result as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Also print the debug representation
    #[arg(long, global = true)]
    debug: bool,

    /// When to color the output
    #[arg(long, value_enum, default_value_t = ColorMode::Auto, global = true)]
    color: ColorMode,
}

#[derive(Subcommand)]
enum Commands {
    /// Escape reserved characters in a single value
    Escape {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Build a query from FIELD=VALUE terms
    Term {
        /// Terms as FIELD=VALUE, joined with AND unless --or is given
        #[arg(required = true, value_parser = parse_term)]
        terms: Vec<(String, String)>,

        /// Join terms with OR
        #[arg(long)]
        or: bool,

        /// Do not escape values
        #[arg(long)]
        safe: bool,

        /// Negate the whole query
        #[arg(long)]
        not: bool,

        /// Boost the query by a factor
        #[arg(long, allow_hyphen_values = true)]
        boost: Option<Factor>,

        /// Give the query a constant score
        #[arg(long, conflicts_with = "boost", allow_hyphen_values = true)]
        constant_score: Option<Factor>,
    },
    /// Build a range query
    Range {
        field: String,

        #[arg(allow_hyphen_values = true)]
        from: String,

        #[arg(allow_hyphen_values = true)]
        to: String,

        /// inclusive, exclusive, ii, ee, ei, ie, [], {}, {], [}
        #[arg(short, long, default_value = "inclusive")]
        boundaries: String,

        /// Force escaping off (`--safe`, `--safe=true`) or on (`--safe=false`)
        /// for both endpoints
        #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
        safe: Option<bool>,
    },
    /// Build a proximity query
    Proximity {
        field: String,

        /// Words that must appear near each other
        words: String,

        /// Maximum distance between the words
        #[arg(allow_hyphen_values = true)]
        distance: i64,

        /// Do not escape the words
        #[arg(long)]
        safe: bool,
    },
    /// Compile a JSON query document
    Compile {
        /// Path to the document, `-` reads stdin
        #[arg(default_value = "-")]
        path: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn choice(self) -> ColorChoice {
        match self {
            ColorMode::Auto => ColorChoice::Auto,
            ColorMode::Always => ColorChoice::Always,
            ColorMode::Never => ColorChoice::Never,
        }
    }
}

fn parse_term(arg: &str) -> std::result::Result<(String, String), String> {
    match arg.split_once('=') {
        Some((field, value)) if !field.is_empty() => Ok((field.to_string(), value.to_string())),
        _ => Err(format!("expected FIELD=VALUE, got {:?}", arg)),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let (query, repr) = match cli.command {
        Commands::Escape { value } => {
            let value = Value::new(value);
            (value.to_string(), value.repr())
        }
        Commands::Term {
            terms,
            or,
            safe,
            not,
            boost,
            constant_score,
        } => {
            let query = build_term_query(terms, or, safe, not, boost, constant_score)?;
            (query.to_string(), query.repr())
        }
        Commands::Range {
            field,
            from,
            to,
            boundaries,
            safe,
        } => {
            let range = Range::with_boundaries(from, to, safe, &boundaries)?;
            let query = Q::term(field, range);
            (query.to_string(), query.repr())
        }
        Commands::Proximity {
            field,
            words,
            distance,
            safe,
        } => {
            let query = Q::term(field, Proximity::with_safety(words, distance, safe));
            (query.to_string(), query.repr())
        }
        Commands::Compile { path } => {
            let text = read_document(&path)?;
            let query = QueryDoc::from_json(&text)
                .and_then(QueryDoc::into_query)
                .with_context(|| format!("Failed to compile query document: {}", path.display()))?;
            (query.to_string(), query.repr())
        }
    };

    let repr = cli.debug.then_some(repr);
    output::print_query(&query, repr.as_deref(), cli.json, cli.color.choice())?;

    Ok(())
}

fn build_term_query(
    terms: Vec<(String, String)>,
    or: bool,
    safe: bool,
    not: bool,
    boost: Option<Factor>,
    constant_score: Option<Factor>,
) -> Result<Q> {
    let op = if or { Operator::Or } else { Operator::And };
    let terms = terms
        .into_iter()
        .map(|(field, value)| (field, Value::with_safety(value, safe)));

    let mut query = Q::terms_with_op(terms, op)?;
    if let Some(factor) = boost {
        query = query.boost(factor);
    }
    if let Some(factor) = constant_score {
        query = query.constant_score(factor);
    }
    if not {
        query = query.invert();
    }
    Ok(query)
}

fn read_document(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        return io::read_to_string(io::stdin()).context("Failed to read query document from stdin");
    }
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read query document: {}", path.display()))
}

fn init_logging() {
    let filter = std::env::var(ENV_LOG)
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "warn".to_string());

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .with_env_filter(filter)
        .init();
}
