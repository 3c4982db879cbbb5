use clap::{Parser, Subcommand};
use osc_app::{
    AppError, AppResult, RunOptions, RunRequest, Variable, problem_service, query, run_service,
};
use osc_compare::Method;
use osc_project::schema::ProblemDef;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "osc-cli")]
#[command(about = "Forced damped oscillator - analytical, RK5 and Adams-Moulton solutions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the bridge-deck example problem
    Init {
        /// Path of the problem YAML file to create
        problem_path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Validate problem file syntax and parameters
    Validate {
        /// Path to the problem file (YAML or JSON)
        problem_path: PathBuf,
    },
    /// Print the normalized equation and damping regime
    Equation {
        /// Path to the problem file (YAML or JSON)
        problem_path: PathBuf,
    },
    /// Solve with every applicable method and compare
    Solve {
        /// Path to the problem file (YAML or JSON)
        problem_path: PathBuf,
        /// Skip cache and force re-run
        #[arg(long)]
        no_cache: bool,
    },
    /// List cached runs for a problem
    Runs {
        /// Path to the problem file (YAML or JSON)
        problem_path: PathBuf,
    },
    /// Show details of a cached run
    ShowRun {
        /// Path to the problem file (YAML or JSON)
        problem_path: PathBuf,
        /// Run ID to display
        run_id: String,
    },
    /// Export a decimated time series from a run
    ExportSeries {
        /// Path to the problem file (YAML or JSON)
        problem_path: PathBuf,
        /// Run ID
        run_id: String,
        /// Method (analytical, rk5, am4)
        method: String,
        /// Variable (x or v)
        variable: String,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init {
            problem_path,
            force,
        } => cmd_init(&problem_path, force),
        Commands::Validate { problem_path } => cmd_validate(&problem_path),
        Commands::Equation { problem_path } => cmd_equation(&problem_path),
        Commands::Solve {
            problem_path,
            no_cache,
        } => cmd_solve(&problem_path, !no_cache),
        Commands::Runs { problem_path } => cmd_runs(&problem_path),
        Commands::ShowRun {
            problem_path,
            run_id,
        } => cmd_show_run(&problem_path, &run_id),
        Commands::ExportSeries {
            problem_path,
            run_id,
            method,
            variable,
            output,
        } => cmd_export_series(&problem_path, &run_id, &method, &variable, output.as_deref()),
    }
}

fn cmd_init(problem_path: &Path, force: bool) -> AppResult<()> {
    if problem_path.exists() && !force {
        return Err(AppError::InvalidInput(format!(
            "{} already exists (use --force to overwrite)",
            problem_path.display()
        )));
    }
    problem_service::save_problem(problem_path, &ProblemDef::bridge_example())?;
    println!("✓ Wrote example problem to {}", problem_path.display());
    Ok(())
}

fn cmd_validate(problem_path: &Path) -> AppResult<()> {
    println!("Validating problem: {}", problem_path.display());
    let problem = problem_service::load_problem(problem_path)?;
    problem_service::validate_problem(&problem)?;
    println!("✓ Problem is valid");
    Ok(())
}

fn cmd_equation(problem_path: &Path) -> AppResult<()> {
    let problem = problem_service::load_problem(problem_path)?;
    let summary = problem_service::summarize_problem(&problem)?;

    println!("{}", summary.name);
    println!("  {}", summary.equation);
    println!("  Damping coefficient b = {:.3} N*s/m", summary.damping_n_s_per_m);
    println!(
        "  Discriminant (b/m)^2 - 4k/m = {:.5e} ({})",
        summary.discriminant,
        if summary.underdamped {
            "underdamped"
        } else {
            "not underdamped"
        }
    );
    println!("  Steps: {}", summary.steps);
    Ok(())
}

fn cmd_solve(problem_path: &Path, use_cache: bool) -> AppResult<()> {
    println!("Solving problem: {}", problem_path.display());

    let request = RunRequest {
        problem_path,
        options: RunOptions {
            use_cache,
            ..RunOptions::default()
        },
    };
    let response = run_service::ensure_run(&request)?;

    if response.loaded_from_cache {
        println!("✓ Loaded from cache: {}", response.run_id);
    } else {
        println!("✓ Simulation completed: {}", response.run_id);
    }
    println!();
    print!("{}", query::describe_manifest(&response.manifest));
    Ok(())
}

fn cmd_runs(problem_path: &Path) -> AppResult<()> {
    let runs = run_service::list_runs(problem_path)?;

    if runs.is_empty() {
        println!("No cached runs found for: {}", problem_path.display());
    } else {
        println!("Cached runs for '{}':", problem_path.display());
        for manifest in runs {
            println!(
                "  {} ({}, {})",
                manifest.run_id, manifest.timestamp, manifest.problem_name
            );
        }
    }
    Ok(())
}

fn cmd_show_run(problem_path: &Path, run_id: &str) -> AppResult<()> {
    println!("Loading run: {}", run_id);

    let manifest = run_service::load_run(problem_path, run_id)?;
    print!("{}", query::describe_manifest(&manifest));

    println!("\nTrajectories:");
    for method in &manifest.methods {
        let records = run_service::load_trajectory(problem_path, run_id, *method)?;
        let summary = query::get_run_summary(&records)?;
        println!(
            "  {:<26} {} points, {:.3} - {:.3} s, peak |x| = {:.4} m",
            method.label(),
            summary.record_count,
            summary.time_range.0,
            summary.time_range.1,
            summary.peak_abs_displacement
        );
    }
    Ok(())
}

fn cmd_export_series(
    problem_path: &Path,
    run_id: &str,
    method: &str,
    variable: &str,
    output: Option<&Path>,
) -> AppResult<()> {
    let method = Method::from_slug(method).ok_or_else(|| {
        AppError::InvalidInput(format!(
            "Unknown method: {} (expected analytical, rk5 or am4)",
            method
        ))
    })?;
    let variable: Variable = variable.parse()?;

    let records = run_service::load_trajectory(problem_path, run_id, method)?;
    let series = query::extract_series(&records, variable);
    let csv = query::series_csv(&series, variable);

    if let Some(path) = output {
        std::fs::write(path, csv)?;
        println!(
            "✓ Exported {} data points to {}",
            series.len(),
            path.display()
        );
    } else {
        print!("{}", csv);
    }

    Ok(())
}
