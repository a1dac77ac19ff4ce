use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use miette::{Context as _, IntoDiagnostic as _, Result};
use strata_compiler::{CompilationConfig, Compiler, ComposeReporter, Reporter as _};
use strata_model::Model;
use strata_scaffold::{Artifact, DefaultStack, StackRenderer as _, write_tree};
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt as tracing_fmt, prelude::*};

const MANIFEST_FILE: &str = "docker-compose.yml";

#[derive(Parser)]
#[command(name = "strata")]
#[command(version)]
#[command(about = "Compile an application model into a runnable deployment")]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv, -vvvv).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile a model into service stubs and an orchestration manifest.
    Compile(CompileArgs),
    /// Validate a model without writing any output.
    Check(CheckArgs),
}

#[derive(Args)]
struct CompileArgs {
    /// Directory the generated deployment is written to; `-` prints the
    /// compose manifest to stdout instead.
    #[arg(long = "out", value_name = "DIR", default_value = "skeleton")]
    out: PathBuf,

    /// Select the emitted output.
    #[arg(long = "emit", value_enum, default_value_t = EmitKind::All)]
    emit: EmitKind,

    /// First host port handed to non-infrastructure services.
    #[arg(long = "base-port", value_name = "PORT")]
    base_port: Option<u16>,

    /// Model document to compile.
    #[arg(value_name = "MODEL")]
    model: PathBuf,
}

#[derive(Args)]
struct CheckArgs {
    /// Model document to check.
    #[arg(value_name = "MODEL")]
    model: PathBuf,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum EmitKind {
    /// Write service stubs and the compose manifest under --out.
    All,
    /// Print the compose manifest to stdout; write nothing.
    Compose,
    /// Write only the service stubs under --out, no manifest.
    Stubs,
}

fn main() -> Result<()> {
    miette::set_panic_hook();
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    match cli.command {
        Command::Compile(args) => compile(args),
        Command::Check(args) => check(args),
    }
}

fn init_tracing(verbose: u8) -> Result<()> {
    let filter = if std::env::var_os("RUST_LOG").is_some() {
        EnvFilter::try_from_default_env().into_diagnostic()?
    } else {
        let level = match verbose {
            0 => "error",
            1 => "warn",
            2 => "info",
            3 => "debug",
            _ => "trace",
        };
        EnvFilter::new(format!("error,strata={level},strata_={level}"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_fmt::layer())
        .with(ErrorLayer::default())
        .init();

    Ok(())
}

fn compile(args: CompileArgs) -> Result<()> {
    let model = Model::from_path(&args.model)
        .wrap_err_with(|| format!("failed to load model `{}`", args.model.display()))?;

    let config = CompilationConfig::builder().maybe_base_port(args.base_port);
    let compiler = Compiler::new(config.build());

    let output = compiler.compile(&model).wrap_err("compile failed")?;
    let manifest = ComposeReporter.emit(&output).into_diagnostic()?;

    if args.emit == EmitKind::Compose || args.out.as_os_str() == "-" {
        print!("{manifest}");
        return Ok(());
    }

    let mut artifacts = DefaultStack.render_all(&output.stubs).into_diagnostic()?;
    if args.emit == EmitKind::All {
        artifacts.push(Artifact::new(MANIFEST_FILE, manifest));
    }
    write_tree(&args.out, &artifacts)
        .wrap_err_with(|| format!("failed to write deployment to `{}`", args.out.display()))?;
    Ok(())
}

fn check(args: CheckArgs) -> Result<()> {
    let model = Model::from_path(&args.model)
        .wrap_err_with(|| format!("failed to load model `{}`", args.model.display()))?;

    Compiler::default().check(&model).wrap_err("check failed")?;
    Ok(())
}
