use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use degree_planner::config::SolverConfig;
use degree_planner::parser::{load_catalog_from_file, load_program_map, load_sections_from_file};
use degree_planner::reporter::{
    generate_plan_reports, generate_timetable_reports, generate_violations_reports, print_plan_summary,
    print_violations_summary, OutputFormat,
};
use degree_planner::solver::{diagnose, enumerate_timetables, plan, solve_timetable, PlanOutcome};
use degree_planner::types::{PlanRequest, TimetableRequest};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "degree-planner")]
#[command(about = "Constraint-based undergraduate degree planner")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the bundled demo catalog and program map end to end
    Demo,

    /// Solve for a graduation plan
    Plan {
        /// Course catalog JSON fixture
        #[arg(long, default_value = "demos/cs/catalog.json")]
        catalog: PathBuf,

        /// Program map JSON fixture
        #[arg(long, default_value = "demos/cs/program_maps.json")]
        program_map: PathBuf,

        /// Program name within the program map fixture
        #[arg(long, default_value = "computer-science")]
        program: String,

        /// `PlanRequest` JSON file (completed courses, overrides, semester horizon)
        #[arg(long)]
        request: PathBuf,

        /// Output directory for plan/violations reports
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        /// Output format(s): json, markdown, text, or all
        #[arg(short, long, default_value = "all")]
        format: String,

        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Explain why a `PlanRequest` has no feasible graduation plan
    Diagnose {
        #[arg(long, default_value = "demos/cs/catalog.json")]
        catalog: PathBuf,

        #[arg(long, default_value = "demos/cs/program_maps.json")]
        program_map: PathBuf,

        #[arg(long, default_value = "computer-science")]
        program: String,

        #[arg(long)]
        request: PathBuf,

        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        #[arg(short, long, default_value = "all")]
        format: String,

        #[arg(short, long)]
        quiet: bool,
    },

    /// Solve for a non-overlapping weekly timetable
    Timetable {
        /// Section-offering JSON fixture
        #[arg(long, default_value = "demos/cs/sections.json")]
        sections: PathBuf,

        /// `TimetableRequest` JSON file (forced conflicts, filters, optimization target)
        #[arg(long)]
        request: Option<PathBuf>,

        /// Enumerate up to `max_timetables` distinct options instead of one
        #[arg(long)]
        all: bool,

        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        #[arg(short, long, default_value = "all")]
        format: String,

        #[arg(short, long)]
        quiet: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Demo => run_demo(),
        Commands::Plan {
            catalog,
            program_map,
            program,
            request,
            output,
            format,
            quiet,
        } => run_plan(&catalog, &program_map, &program, &request, &output, &format, quiet),
        Commands::Diagnose {
            catalog,
            program_map,
            program,
            request,
            output,
            format,
            quiet,
        } => run_diagnose(&catalog, &program_map, &program, &request, &output, &format, quiet),
        Commands::Timetable {
            sections,
            request,
            all,
            output,
            format,
            quiet,
        } => run_timetable(&sections, request.as_deref(), all, &output, &format, quiet),
    }
}

fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

fn run_demo() -> Result<()> {
    println!("{}", "Degree Planner Demo".bold().cyan());
    println!("{}", "─".repeat(40));

    let catalog_path = PathBuf::from("demos/cs/catalog.json");
    let program_map_path = PathBuf::from("demos/cs/program_maps.json");
    let request = PlanRequest {
        total_semesters: 8,
        ..Default::default()
    };

    run_plan_with_request(
        &catalog_path,
        &program_map_path,
        "computer-science",
        request,
        &PathBuf::from("output"),
        "all",
        false,
    )
}

fn run_plan(
    catalog: &PathBuf,
    program_map: &PathBuf,
    program: &str,
    request_path: &PathBuf,
    output: &PathBuf,
    format: &str,
    quiet: bool,
) -> Result<()> {
    let request = load_request(request_path)?;
    run_plan_with_request(catalog, program_map, program, request, output, format, quiet)
}

fn run_plan_with_request(
    catalog_path: &PathBuf,
    program_map_path: &PathBuf,
    program: &str,
    request: PlanRequest,
    output: &PathBuf,
    format: &str,
    quiet: bool,
) -> Result<()> {
    let catalog = load_catalog_from_file(catalog_path).context("failed to load course catalog")?;
    let program_map = load_program_map(program_map_path, program).context("failed to load program map")?;
    let config = SolverConfig::default();

    let bar = (!quiet).then(|| spinner("solving graduation requirements model..."));
    let outcome = plan(&catalog, &program_map, &request, &config)?;
    if let Some(bar) = &bar {
        bar.finish_and_clear();
    }

    let formats = parse_formats(format);
    match outcome {
        PlanOutcome::Plan(plan) => {
            if !quiet {
                print_plan_summary(&plan);
            }
            generate_plan_reports(&plan, output, &formats)?;
            if !quiet {
                println!("Reports written to: {}", output.display().to_string().green());
            }
        }
        PlanOutcome::Infeasible(violations) => {
            if !quiet {
                print_violations_summary(&violations);
            }
            generate_violations_reports(&violations, output, &formats)?;
            if !quiet {
                println!("Reports written to: {}", output.display().to_string().green());
            }
        }
    }

    Ok(())
}

fn run_diagnose(
    catalog_path: &PathBuf,
    program_map_path: &PathBuf,
    program: &str,
    request_path: &PathBuf,
    output: &PathBuf,
    format: &str,
    quiet: bool,
) -> Result<()> {
    let catalog = load_catalog_from_file(catalog_path).context("failed to load course catalog")?;
    let program_map = load_program_map(program_map_path, program).context("failed to load program map")?;
    let request = load_request(request_path)?;
    let config = SolverConfig::default();

    let bar = (!quiet).then(|| spinner("solving feasibility/diagnosis model..."));
    let violations = diagnose(&catalog, &program_map, &request, &config)?;
    if let Some(bar) = &bar {
        bar.finish_and_clear();
    }

    if !quiet {
        print_violations_summary(&violations);
    }
    generate_violations_reports(&violations, output, &parse_formats(format))?;
    if !quiet {
        println!("Reports written to: {}", output.display().to_string().green());
    }

    Ok(())
}

fn run_timetable(
    sections_path: &PathBuf,
    request_path: Option<&std::path::Path>,
    all: bool,
    output: &PathBuf,
    format: &str,
    quiet: bool,
) -> Result<()> {
    let sections = load_sections_from_file(sections_path).context("failed to load section offerings")?;
    let request: TimetableRequest = match request_path {
        Some(p) => {
            let content = std::fs::read_to_string(p).with_context(|| format!("failed to read {}", p.display()))?;
            serde_json::from_str(&content).with_context(|| format!("failed to parse {}", p.display()))?
        }
        None => TimetableRequest::default(),
    };
    let config = SolverConfig::default();
    let formats = parse_formats(format);

    if all {
        let bar = (!quiet).then(|| spinner("enumerating distinct timetables..."));
        let schedules = enumerate_timetables(&sections, &request, &config)?;
        if let Some(bar) = &bar {
            bar.finish_and_clear();
        }
        if !quiet {
            println!("Found {} distinct timetable(s).", schedules.len());
        }
        for (i, schedule) in schedules.iter().enumerate() {
            let dir = output.join(format!("option-{}", i + 1));
            generate_timetable_reports(schedule, &dir, &formats)?;
        }
        if !quiet && !schedules.is_empty() {
            println!("Reports written to: {}", output.display().to_string().green());
        }
    } else {
        let bar = (!quiet).then(|| spinner("solving timetable model..."));
        let schedule = solve_timetable(&sections, &request, &config)?;
        if let Some(bar) = &bar {
            bar.finish_and_clear();
        }
        match schedule {
            Some(schedule) => {
                if !quiet {
                    println!(
                        "{}",
                        format!("✓ Timetable with {} section(s) found", schedule.sections_taken.len())
                            .green()
                            .bold()
                    );
                }
                generate_timetable_reports(&schedule, output, &formats)?;
                if !quiet {
                    println!("Reports written to: {}", output.display().to_string().green());
                }
            }
            None => {
                println!("{}", "✗ No non-overlapping timetable exists for this request".red().bold());
            }
        }
    }

    Ok(())
}

fn load_request(path: &PathBuf) -> Result<PlanRequest> {
    let content = std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}

fn parse_formats(format: &str) -> Vec<OutputFormat> {
    if format == "all" {
        return vec![OutputFormat::Json, OutputFormat::Markdown, OutputFormat::Text];
    }

    format
        .split(',')
        .filter_map(|f| match f.trim().to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "markdown" | "md" => Some(OutputFormat::Markdown),
            "text" | "txt" => Some(OutputFormat::Text),
            _ => None,
        })
        .collect()
}
