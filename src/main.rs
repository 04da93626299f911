//! Polish CLI - refactoring advice for Ruby source
//!
//! Takes one argument, either a file path or literal Ruby text, and prints
//! the matching recommendations.

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use polish::advisor::{AdvisorConfig, OpenAiAdvisor};
use polish::catalog::Catalog;
use polish::engine::Engine;
use polish::input;
use polish::output::{JsonFormatter, OutputFormatter, TextFormatter};

#[derive(Parser)]
#[command(
    name = "polish",
    version,
    about = "Refactoring advice for Ruby source",
    long_about = "Analyzes Ruby code against a fixed catalog of refactoring rules \
and prints every matching recommendation. The argument is a file path or the code itself."
)]
struct Cli {
    /// File path or literal Ruby code to analyze
    input: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: Format,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Append evaluation statistics to text output
    #[arg(long)]
    stats: bool,

    /// List available rules and exit
    #[arg(long)]
    list_rules: bool,

    /// Skip the external AI advisor even if a credential is configured
    #[arg(long)]
    no_ai: bool,

    /// Model for the external AI advisor
    #[arg(long, default_value = "gpt-4o-mini")]
    ai_model: String,

    /// Subcommands
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show detailed information about a rule
    Explain {
        /// Rule ID to explain
        rule_id: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// Print one rule in the listing format
fn print_rule(rule: &polish::Rule) {
    println!("    {} ({})", rule.id.cyan(), rule.category);
    println!("      {}", rule.advice);
}

/// Print detailed rule explanation
fn explain_rule(rule: &polish::Rule) {
    println!("{}", "Rule Details".bold());
    println!();
    println!("  {}: {}", "ID".bold(), rule.id.cyan());
    println!("  {}: {}", "Category".bold(), rule.category);
    println!("  {}: {}", "Pattern".bold(), rule.pattern);
    println!();
    println!("  {}", "Advice".bold());
    println!("  {}", rule.advice);

    if let Some(rationale) = &rule.rationale {
        println!();
        println!("  {}", "Rationale".bold());
        println!("  {}", rationale);
    }

    if let Some(bad) = &rule.example_bad {
        println!();
        println!("  {} {}", "Example".bold(), "(flagged)".red());
        for line in bad.lines() {
            println!("    {}", line);
        }
    }

    if let Some(good) = &rule.example_good {
        println!();
        println!("  {} {}", "Example".bold(), "(preferred)".green());
        for line in good.lines() {
            println!("    {}", line);
        }
    }
}

/// Handle the explain subcommand
fn handle_explain(catalog: &Catalog, rule_id: &str) {
    match catalog.find(rule_id) {
        Some(rule) => explain_rule(rule),
        None => {
            eprintln!("{}: Rule '{}' not found", "error".red().bold(), rule_id);
            eprintln!();
            eprintln!("Use {} to see all available rules", "--list-rules".cyan());
            std::process::exit(1);
        }
    }
}

/// Print the full catalog listing
fn handle_list_rules(catalog: &Catalog) {
    println!("{} ({} rules)", "Available rules".bold(), catalog.len());
    println!();
    for compiled in catalog.rules() {
        print_rule(&compiled.rule);
    }
}

fn main() {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    // Handle --no-color
    if cli.no_color {
        colored::control::set_override(false);
    }

    // A malformed pattern in the table is a startup defect: fail fast.
    let catalog = match Catalog::builtin() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            std::process::exit(1);
        }
    };

    if let Some(Commands::Explain { rule_id }) = &cli.command {
        handle_explain(&catalog, rule_id);
        return;
    }

    if cli.list_rules {
        handle_list_rules(&catalog);
        return;
    }

    let arg = match &cli.input {
        Some(arg) => arg,
        None => {
            eprintln!("{}: No input provided", "error".red().bold());
            eprintln!();
            eprintln!("Usage: {} or {}", "polish <FILE>".cyan(), "polish '<CODE>'".cyan());
            std::process::exit(1);
        }
    };

    let text = match input::resolve(arg) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            std::process::exit(1);
        }
    };

    let engine = Engine::new(catalog);

    // Credential presence enables the advisor; the key is read once here and
    // passed in explicitly.
    let advisor = if cli.no_ai {
        None
    } else {
        std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.is_empty())
            .map(|key| OpenAiAdvisor::new(AdvisorConfig::new(&key).with_model(&cli.ai_model)))
    };

    let report = match &advisor {
        Some(advisor) => engine.analyze_with_advisor(&text, advisor),
        None => engine.analyze(&text),
    };

    let formatter: Box<dyn OutputFormatter> = match cli.format {
        Format::Text => {
            let mut f = TextFormatter::new();
            f.show_stats = cli.stats;
            Box::new(f)
        }
        Format::Json => Box::new(JsonFormatter::new()),
    };

    println!("{}", formatter.format(&report));
}
