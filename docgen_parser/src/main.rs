use docgen_parser::config::runtime::{OutputFormat, RuntimeConfig};
use docgen_parser::{logging, pipeline};
use std::env;
use std::path::{Path, PathBuf};

struct CliOptions {
    input: PathBuf,
    json: bool,
    config: Option<PathBuf>,
    quiet: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <document.json> [options]", args[0]);
        eprintln!("       {} --help", args[0]);
        std::process::exit(1);
    }

    if args[1] == "--help" {
        print_help(&args[0]);
        return Ok(());
    }

    let options = parse_options(&args[1..]);

    let mut config = match &options.config {
        Some(path) => match RuntimeConfig::from_toml_file(path) {
            Ok(config) => config,
            Err(error) => {
                eprintln!("error[{}]: {}", error.error_code(), error);
                std::process::exit(1);
            }
        },
        None => RuntimeConfig::default(),
    };
    if options.quiet {
        config.logging.enable_console_logging = false;
    }
    if options.json {
        config.output.format = OutputFormat::Json;
    }

    logging::config::init_runtime_preferences(config.logging.clone())?;
    logging::init_global_logging()?;

    process_document(&options.input, &config)
}

fn print_help(program_name: &str) {
    println!("Template body parser v{}", env!("CARGO_PKG_VERSION"));
    println!("Parses the tags of a document body into a template tree");
    println!();
    println!("USAGE:");
    println!("    {} <document.json> [options]", program_name);
    println!();
    println!("ARGUMENTS:");
    println!("    <document.json>    JSON export of a document body");
    println!();
    println!("OPTIONS:");
    println!("    --help              Show this help message");
    println!("    --json              Print the template tree as JSON");
    println!("    --config FILE       Runtime configuration (logging, output, providers)");
    println!("    --quiet             Suppress console logging");
    println!();
    println!("EXIT STATUS:");
    println!("    0    Template parsed, possibly with recoverable diagnostics");
    println!("    1    Document could not be read or a fatal parse error occurred");
    println!();
    println!("BUILD CONFIGURATION:");
    println!("    {}", docgen_parser::config::build_info::source_info());
}

fn parse_options(args: &[String]) -> CliOptions {
    let mut options = CliOptions {
        input: PathBuf::from(&args[0]),
        json: false,
        config: None,
        quiet: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--json" => options.json = true,
            "--quiet" => options.quiet = true,
            "--config" => {
                if i + 1 < args.len() {
                    options.config = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                } else {
                    eprintln!("Warning: --config requires a file path");
                }
            }
            _ => {
                eprintln!("Warning: Unknown option '{}'", args[i]);
            }
        }
        i += 1;
    }

    options
}

fn process_document(path: &Path, config: &RuntimeConfig) -> Result<(), Box<dyn std::error::Error>> {
    match pipeline::process_file(path, config) {
        Ok(result) => {
            match config.output.format {
                OutputFormat::Json => println!("{}", result.to_json()?),
                OutputFormat::Summary => print_summary(path, &result, config.output.max_reported_errors),
            }
            Ok(())
        }
        Err(error) => {
            eprintln!("error[{}]: {}", error.error_code(), error);
            match error.run() {
                Some(run) => eprintln!("  --> {}, {}", path.display(), run),
                None => eprintln!("  --> {}", path.display()),
            }
            let action = logging::codes::get_action(error.error_code().as_str());
            eprintln!("  = help: {}", action);
            std::process::exit(1);
        }
    }
}

fn print_summary(path: &Path, result: &pipeline::PipelineResult, max_reported: usize) {
    let errors = result.template.errors();
    let limit = if max_reported == 0 { errors.len() } else { max_reported };

    for error in errors.iter().take(limit) {
        println!("warning[{}]: {}", error.code, error.message);
        match error.run {
            Some(run) => println!("  --> {}, {}", path.display(), run),
            None => println!("  --> {}, end of body", path.display()),
        }
        println!();
    }
    if errors.len() > limit {
        println!("... and {} more", errors.len() - limit);
        println!();
    }

    println!(
        "Parsed {} constructs from {} runs in {:.2} ms",
        result.stats.total_constructs(),
        result.run_count,
        result.duration.as_secs_f64() * 1000.0
    );
    for (kind, count) in &result.stats.constructs {
        println!("  {:<15} {}", kind, count);
    }
    if result.stats.table_cells > 0 {
        println!("  {:<15} {}", "table cells", result.stats.table_cells);
    }

    if result.is_valid() {
        println!("\nSUCCESS: Template is valid");
    } else {
        println!("\nTemplate has {} diagnostic(s)", result.stats.errors);
    }
}
