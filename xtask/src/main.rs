use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{exit, Command};

use clap::{Parser, Subcommand, ValueEnum};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

const LAMBDA_PACKAGE: &str = "iam_role_lister_lambda";
const LAMBDA_BINARY: &str = "list_roles";
const WORKSPACE_PACKAGES: [&str; 2] = ["iam_role_lister_core", LAMBDA_PACKAGE];

type TaskResult = Result<(), String>;

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the IAM role lister workspace",
    long_about = "A unified CLI for CI checks and Lambda packaging in the\n\
                  IAM role lister workspace."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run CI checks (fmt, clippy, tests)
    Ci {
        /// Job to run
        #[arg(value_enum, default_value_t = CiJob::Check)]
        job: CiJob,
    },
    /// Build the list_roles binary and zip it as a Lambda `bootstrap` artifact
    LambdaPackage {
        /// Compilation target triple for the Lambda binary
        #[arg(long, default_value = "x86_64-unknown-linux-gnu")]
        target: String,
        /// Build profile used for the binary
        #[arg(value_enum, long, default_value_t = BuildProfile::Release)]
        profile: BuildProfile,
        /// Directory the zip artifact is written to
        #[arg(long, default_value = "dist")]
        out_dir: PathBuf,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
enum CiJob {
    /// Formatting and clippy
    Lint,
    /// Workspace tests
    Test,
    /// Lint + test
    Check,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum BuildProfile {
    Debug,
    Release,
}

impl BuildProfile {
    fn dir_name(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Release => "release",
        }
    }
}

// ── cargo invocation ───────────────────────────────────────────────

fn cargo(label: &str, args: &[&str]) -> TaskResult {
    eprintln!("\n=== {label} ===\n+ cargo {}", args.join(" "));
    let status = Command::new("cargo")
        .args(args)
        .status()
        .map_err(|error| format!("failed to execute cargo: {error}"))?;

    if status.success() {
        Ok(())
    } else {
        Err(format!("`cargo {}` exited with {status}", args.join(" ")))
    }
}

fn lambda_build_args(target: &str, profile: BuildProfile) -> Vec<&str> {
    let mut args = vec![
        "build",
        "-p",
        LAMBDA_PACKAGE,
        "--bin",
        LAMBDA_BINARY,
        "--target",
        target,
    ];
    if profile == BuildProfile::Release {
        args.push("--release");
    }
    args
}

// ── packaging ──────────────────────────────────────────────────────

fn package_lambda(target: &str, profile: BuildProfile, out_dir: &Path) -> TaskResult {
    check_target_installed(target)?;
    cargo("Build lambda binary", &lambda_build_args(target, profile))?;

    let binary_path = Path::new("target")
        .join(target)
        .join(profile.dir_name())
        .join(LAMBDA_BINARY);
    let zip_path = out_dir.join(format!("{LAMBDA_BINARY}.zip"));
    write_bootstrap_zip(&binary_path, &zip_path)?;

    eprintln!("\nPackaged artifact:\n- {}", zip_path.display());
    Ok(())
}

/// Fails only when rustup answers and the target is missing; hosts without
/// rustup go straight to the build.
fn check_target_installed(target: &str) -> TaskResult {
    let Ok(output) = Command::new("rustup")
        .args(["target", "list", "--installed"])
        .output()
    else {
        eprintln!("warning: rustup not available; skipping target check for `{target}`");
        return Ok(());
    };

    let installed = String::from_utf8_lossy(&output.stdout);
    if output.status.success() && !installed.lines().any(|line| line.trim() == target) {
        return Err(format!(
            "rust target `{target}` is not installed; run `rustup target add {target}`"
        ));
    }
    Ok(())
}

/// Lambda's `provided.al2023` runtime executes an entry named `bootstrap`.
fn write_bootstrap_zip(binary_path: &Path, zip_path: &Path) -> TaskResult {
    let binary = fs::read(binary_path).map_err(|error| {
        format!(
            "cannot read lambda binary '{}': {error}",
            binary_path.display()
        )
    })?;
    if let Some(parent) = zip_path.parent() {
        fs::create_dir_all(parent)
            .map_err(|error| format!("cannot create '{}': {error}", parent.display()))?;
    }

    let file = fs::File::create(zip_path)
        .map_err(|error| format!("cannot create '{}': {error}", zip_path.display()))?;
    let mut zip = ZipWriter::new(file);
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o755);

    zip.start_file("bootstrap", options)
        .map_err(|error| format!("cannot start bootstrap entry: {error}"))?;
    zip.write_all(&binary)
        .map_err(|error| format!("cannot write bootstrap entry: {error}"))?;
    zip.finish()
        .map_err(|error| format!("cannot finish lambda zip: {error}"))?;
    Ok(())
}

// ── CI jobs ────────────────────────────────────────────────────────

fn ci(job: &CiJob) -> TaskResult {
    if matches!(job, CiJob::Lint | CiJob::Check) {
        cargo("Check formatting", &["fmt", "--all", "--", "--check"])?;
        cargo(
            "Clippy",
            &["clippy", "--all-targets", "--all-features", "--", "-D", "warnings"],
        )?;
    }
    if matches!(job, CiJob::Test | CiJob::Check) {
        for package in WORKSPACE_PACKAGES {
            cargo(&format!("Test {package}"), &["test", "-p", package])?;
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Ci { job } => ci(&job).map(|()| eprintln!("\nCI job passed.")),
        Commands::LambdaPackage {
            target,
            profile,
            out_dir,
        } => package_lambda(&target, profile, &out_dir),
    };

    if let Err(message) = result {
        eprintln!("error: {message}");
        exit(1);
    }
}
