use clap::{Parser, Subcommand};
use log::{debug, warn};
use miette::{IntoDiagnostic, MietteHandlerOpts, Result};
use minijs_interpreter::{InterpreterConfig, InterpreterSession, PipelineError};
use minijs_parser::{parse_with_source, tokenize_with, LexerConfig, Program};
use report::SourceFile;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

mod logger;
mod repl;
mod report;
mod runner;
mod sexpr;

#[derive(Parser)]
#[command(
    name = "minijs",
    version,
    about = "Workbench for a small JavaScript subset",
    long_about = "Tokenize, parse, scope-check and interpret programs written in a \
                  small subset of JavaScript, or hand them to an external engine."
)]
struct Cli {
    /// Render diagnostics as graphical reports with highlighted source
    #[arg(long, global = true)]
    fancy: bool,

    /// Raise the log level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the token stream of a source file
    Tokens {
        /// Source file to read (use '-' to read from stdin)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Emit `//` comments as tokens
        #[arg(short, long)]
        comments: bool,
    },

    /// Parse a source file and display its AST
    Parse {
        /// Source file to read (use '-' to read from stdin)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Show the full AST with span information
        #[arg(short, long)]
        spans: bool,
    },

    /// Report every scope violation in a source file
    Check {
        /// Source file to read (use '-' to read from stdin)
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Run a source file through the whole pipeline
    Exec {
        /// Source file to read (use '-' to read from stdin)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Bind catch parameters to the thrown value instead of its message
        #[arg(long)]
        preserve_thrown: bool,

        /// Maximum call depth before a stack overflow error
        #[arg(long, value_name = "N")]
        max_depth: Option<usize>,
    },

    /// Hand a source file to an external JavaScript engine
    Run {
        /// Source file to read (use '-' to read from stdin)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Engine executable; the source is piped to its stdin
        #[arg(long, default_value = "node")]
        engine: String,

        /// Wall-clock limit in milliseconds
        #[arg(long, value_name = "MS", default_value_t = 5000)]
        timeout: u64,
    },

    /// Start an interactive session
    Repl {
        /// Do not read or write the history file
        #[arg(long)]
        no_history: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = logger::init(logger::level_for(cli.verbose)) {
        eprintln!("Warning: logging disabled: {err}");
    }
    if cli.fancy {
        setup_miette_handler();
    }

    let outcome = match cli.command {
        Some(Commands::Tokens { file, comments }) => handle_tokens_command(&file, comments),
        Some(Commands::Parse { file, spans }) => handle_parse_command(&file, spans, cli.fancy),
        Some(Commands::Check { file }) => handle_check_command(&file, cli.fancy),
        Some(Commands::Exec {
            file,
            preserve_thrown,
            max_depth,
        }) => {
            let mut config = InterpreterConfig {
                preserve_thrown_values: preserve_thrown,
                ..InterpreterConfig::default()
            };
            if let Some(depth) = max_depth {
                config.max_call_depth = depth;
            }
            handle_exec_command(&file, config, cli.fancy)
        }
        Some(Commands::Run {
            file,
            engine,
            timeout,
        }) => handle_run_command(
            &file,
            runner::RunnerConfig {
                program: engine,
                timeout: Duration::from_millis(timeout),
            },
        ),
        Some(Commands::Repl { no_history }) => {
            let config = repl::ReplConfig {
                persist_history: !no_history,
                fancy_errors: cli.fancy,
                ..repl::ReplConfig::default()
            };
            repl::ReplSession::new(config)
                .and_then(|mut session| session.run())
                .map(|()| true)
                .map_err(miette::Report::new)
        }
        None => {
            // No subcommand provided, show help
            Cli::parse_from(["minijs", "--help"]);
            Ok(true)
        }
    };

    match outcome {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(err) => {
            eprintln!("{:?}", err);
            process::exit(1);
        }
    }
}

/// Configure miette for graphical reports with JavaScript highlighting
fn setup_miette_handler() {
    use miette::highlighters::SyntectHighlighter;
    use syntect::highlighting::ThemeSet;
    use syntect::parsing::SyntaxSet;

    let syntax_set = SyntaxSet::load_defaults_newlines();
    let theme_set = ThemeSet::load_defaults();
    let Some(theme) = theme_set.themes.get("base16-ocean.dark") else {
        warn!("highlighting theme missing, reports will be uncoloured");
        return;
    };
    let highlighter = SyntectHighlighter::new(syntax_set, theme.clone(), true);

    miette::set_hook(Box::new(move |_| {
        Box::new(
            MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .color(true)
                .tab_width(4)
                .with_cause_chain()
                .with_syntax_highlighting(highlighter.clone())
                .build(),
        )
    }))
    .ok();
}

fn read_source(path: &Path) -> Result<SourceFile> {
    if path.to_str() == Some("-") {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer).into_diagnostic()?;
        return Ok(SourceFile::new("<stdin>", buffer));
    }

    if !path.exists() {
        return Err(miette::miette!("File not found: {}", path.display()));
    }
    if path.extension().and_then(|s| s.to_str()) != Some("js") {
        warn!("{} does not have a .js extension", path.display());
    }

    let text = fs::read_to_string(path).into_diagnostic()?;
    debug!("read {} bytes from {}", text.len(), path.display());
    Ok(SourceFile::new(path.display().to_string(), text))
}

fn print_failure(error: PipelineError, source: &SourceFile, fancy: bool) {
    for block in report::render(error, source, fancy) {
        eprintln!("{block}");
    }
}

fn parse_source(source: &SourceFile) -> std::result::Result<Program, PipelineError> {
    let tokens = tokenize_with(&source.text, LexerConfig::default())?;
    Ok(parse_with_source(&tokens, &source.text)?)
}

fn handle_tokens_command(file: &Path, comments: bool) -> Result<bool> {
    let source = read_source(file)?;
    let config = LexerConfig {
        emit_comments: comments,
    };

    match tokenize_with(&source.text, config) {
        Ok(tokens) => {
            for token in tokens {
                println!("{:>4}:{:<4} {}", token.line, token.column, token);
            }
            Ok(true)
        }
        Err(err) => {
            print_failure(err.into(), &source, false);
            Ok(false)
        }
    }
}

fn handle_parse_command(file: &Path, spans: bool, fancy: bool) -> Result<bool> {
    let source = read_source(file)?;

    match parse_source(&source) {
        Ok(program) if spans => {
            println!("{:#?}", program);
            Ok(true)
        }
        Ok(program) => {
            println!("{}", sexpr::format_program_as_sexpr(&program));
            Ok(true)
        }
        Err(err) => {
            print_failure(err, &source, fancy);
            Ok(false)
        }
    }
}

fn handle_check_command(file: &Path, fancy: bool) -> Result<bool> {
    let source = read_source(file)?;

    let program = match parse_source(&source) {
        Ok(program) => program,
        Err(err) => {
            print_failure(err, &source, fancy);
            return Ok(false);
        }
    };

    let errors = minijs_checker::analyze(&program);
    if errors.is_empty() {
        println!("{}: no scope errors", source.name);
        return Ok(true);
    }

    let count = errors.len();
    print_failure(PipelineError::Semantic { errors }, &source, fancy);
    eprintln!("{count} scope error(s) found");
    Ok(false)
}

fn handle_exec_command(file: &Path, config: InterpreterConfig, fancy: bool) -> Result<bool> {
    let source = read_source(file)?;
    let mut session = InterpreterSession::with_config(config);

    match session.evaluate(&source.text) {
        Ok(_) => Ok(true),
        Err(err) => {
            debug!("{} stage rejected {}", err.stage(), source.name);
            print_failure(err, &source, fancy);
            Ok(false)
        }
    }
}

fn handle_run_command(file: &Path, config: runner::RunnerConfig) -> Result<bool> {
    let source = read_source(file)?;
    let output = runner::run(&source.text, &config)?;

    print!("{}", output.stdout);
    eprint!("{}", output.stderr);

    if !output.success {
        match output.code {
            Some(code) => warn!("{} exited with status {}", config.program, code),
            None => warn!("{} was terminated by a signal", config.program),
        }
    }
    Ok(output.success)
}
