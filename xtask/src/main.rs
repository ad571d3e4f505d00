use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "x")]
#[command(about = "Development automation for psx-gpu")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all CI checks (fmt, clippy, build, test)
    Ci {
        #[arg(long)]
        verbose: bool,
    },
    /// Format code
    Fmt {
        #[arg(long)]
        check: bool,
    },
    /// Run clippy
    Clippy {
        #[arg(long)]
        fix: bool,
    },
    /// Build the project
    Build {
        #[arg(long)]
        release: bool,
    },
    /// Run tests
    Test {
        #[arg(long)]
        doc: bool,
        /// Run only GPU module tests
        #[arg(long)]
        gpu: bool,
        /// Run only MDEC module tests
        #[arg(long)]
        mdec: bool,
        /// Run only the integration tests
        #[arg(long)]
        integration: bool,
    },
    /// Run benchmarks
    Bench,
    /// Replay a trace file through gpu-trace
    Replay {
        /// Path to the trace file
        trace: String,
        /// Print the render list
        #[arg(short = 'd', long)]
        dump_primitives: bool,
        /// Build in release mode
        #[arg(long)]
        release: bool,
    },
    /// Pre-commit hook (fmt, clippy, test)
    PreCommit,
    /// Install git hooks
    InstallHooks,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ci { verbose } => run_ci(verbose),
        Commands::Fmt { check } => run_fmt(check),
        Commands::Clippy { fix } => run_clippy(fix),
        Commands::Build { release } => run_build(release),
        Commands::Test {
            doc,
            gpu,
            mdec,
            integration,
        } => run_test(TestSelection {
            doc,
            gpu,
            mdec,
            integration,
        }),
        Commands::Bench => cargo(&["bench"]),
        Commands::Replay {
            trace,
            dump_primitives,
            release,
        } => run_replay(&trace, dump_primitives, release),
        Commands::PreCommit => run_pre_commit(),
        Commands::InstallHooks => install_hooks(),
    }
}

/// Which test groups to run; all false means everything
#[derive(Default, Clone, Copy)]
struct TestSelection {
    doc: bool,
    gpu: bool,
    mdec: bool,
    integration: bool,
}

fn run_ci(verbose: bool) -> Result<()> {
    println!("{}", "=== Running CI Pipeline ===".bold().blue());

    let start = Instant::now();

    run_task("Format Check", || run_fmt(true), verbose)?;
    run_task("Clippy", || run_clippy(false), verbose)?;
    run_task("Build", || run_build(false), verbose)?;
    run_task("Test", || run_test(TestSelection::default()), verbose)?;

    println!(
        "\n{} {}",
        "✓ CI passed in".green().bold(),
        format!("{:.2}s", start.elapsed().as_secs_f64()).bold()
    );

    Ok(())
}

fn run_fmt(check: bool) -> Result<()> {
    if check {
        cargo(&["fmt", "--all", "--", "--check"])
    } else {
        cargo(&["fmt", "--all"])
    }
}

fn run_clippy(fix: bool) -> Result<()> {
    if fix {
        cargo(&["clippy", "--all-targets", "--fix"])
    } else {
        cargo(&["clippy", "--all-targets", "--", "-D", "warnings"])
    }
}

fn run_build(release: bool) -> Result<()> {
    if release {
        cargo(&["build", "--release"])
    } else {
        cargo(&["build"])
    }
}

fn run_test(selection: TestSelection) -> Result<()> {
    let groups = [
        (selection.doc, "Doc", vec!["test", "--doc"]),
        (selection.gpu, "GPU", vec!["test", "--lib", "core::gpu"]),
        (selection.mdec, "MDEC", vec!["test", "--lib", "core::mdec"]),
        (
            selection.integration,
            "Integration",
            vec!["test", "--test", "integration_test"],
        ),
    ];

    if groups.iter().all(|(enabled, _, _)| !enabled) {
        return cargo(&["test"]);
    }

    let mut failed = Vec::new();

    for (enabled, name, args) in groups {
        if !enabled {
            continue;
        }

        println!("{} Running {} tests...", "→".blue(), name.bold());

        match cargo(&args) {
            Ok(_) => println!("{} {} tests passed\n", "✓".green(), name),
            Err(_) => {
                println!("{} {} tests failed\n", "✗".red(), name);
                failed.push(name);
            }
        }
    }

    if failed.is_empty() {
        Ok(())
    } else {
        anyhow::bail!("Failed test groups: {}", failed.join(", "))
    }
}

fn run_replay(trace: &str, dump_primitives: bool, release: bool) -> Result<()> {
    println!("{}", "=== Trace Replay ===".bold().blue());

    if !Path::new(trace).exists() {
        println!("{} Trace file not found: {}", "✗".red().bold(), trace.yellow());
        anyhow::bail!("Trace file not found");
    }

    println!("{} Trace: {}", "✓".green(), trace.cyan());

    let mut args = vec!["run", "--bin", "gpu-trace"];
    if release {
        args.push("--release");
    }
    args.extend(["--", trace]);
    if dump_primitives {
        args.push("--dump-primitives");
    }

    let start = Instant::now();
    cargo(&args)?;

    println!(
        "\n{} Replay completed in {}",
        "✓".green().bold(),
        format!("{:.2}s", start.elapsed().as_secs_f64()).bold()
    );

    Ok(())
}

fn run_pre_commit() -> Result<()> {
    println!("{}", "=== Pre-commit Checks ===".bold().blue());

    let start = Instant::now();

    run_task("Format Check", || run_fmt(true), false)?;
    run_task("Clippy", || run_clippy(false), false)?;
    run_task("Test", || run_test(TestSelection::default()), false)?;

    println!(
        "\n{} {}",
        "✓ Pre-commit checks passed in".green().bold(),
        format!("{:.2}s", start.elapsed().as_secs_f64()).bold()
    );

    Ok(())
}

fn install_hooks() -> Result<()> {
    use std::fs;

    println!("{}", "Installing git hooks...".bold());

    let hook_content = "#!/bin/sh\nset -e\ncargo x pre-commit\n";
    let hook_path = ".git/hooks/pre-commit";
    fs::write(hook_path, hook_content)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        let mut perms = fs::metadata(hook_path)?.permissions();
        perms.set_mode(0o755);
        fs::set_permissions(hook_path, perms)?;
    }

    println!("{}", "✓ Git hooks installed".green());

    Ok(())
}

fn run_task<F>(name: &str, task: F, verbose: bool) -> Result<()>
where
    F: FnOnce() -> Result<()>,
{
    print!("{} {} ... ", "→".blue(), name);

    let start = Instant::now();

    match task() {
        Ok(_) => {
            if verbose {
                println!(
                    "{} ({:.2}s)",
                    "✓".green().bold(),
                    start.elapsed().as_secs_f64()
                );
            } else {
                println!("{}", "✓".green().bold());
            }
            Ok(())
        }
        Err(e) => {
            println!("{}", "✗".red().bold());
            Err(e)
        }
    }
}

fn cargo(args: &[&str]) -> Result<()> {
    let status = Command::new("cargo")
        .args(args)
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()?;

    if !status.success() {
        anyhow::bail!("cargo {} failed with exit code: {}", args.join(" "), status);
    }

    Ok(())
}
