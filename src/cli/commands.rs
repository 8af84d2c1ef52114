use std::time::Instant;

use tracing::{info, warn};

use crate::cli::config::AppConfig;
use crate::fixture::Fixture;
use crate::report::console::format_console_report;
use crate::report::html::generate_html_report;
use crate::report::junit::generate_junit_xml;
use crate::report::report_model::TestSuiteReport;
use crate::scenario::builtin::builtin_scenarios;
use crate::scenario::loader::{filter_scenarios, load_scenarios};
use crate::scenario::runner::ScenarioRunner;
use crate::scenario::scenario_model::{Scenario, TestResult};
use crate::trace::logger::TraceLogger;

const SUITE_NAME: &str = "Tray menu";

// ============================================================================
// run subcommand
// ============================================================================

/// Run scenarios and return whether all passed and the fixture shut down cleanly.
pub fn cmd_run(
    config: &AppConfig,
    scenarios_path: Option<&str>,
    only: &[String],
    format: Option<&str>,
    output: Option<&str>,
) -> Result<bool, Box<dyn std::error::Error>> {
    let scenarios = filter_scenarios(scenario_source(scenarios_path)?, only);

    if scenarios.is_empty() {
        eprintln!("No scenarios to run");
        return Ok(true);
    }

    info!(count = scenarios.len(), "running scenarios");

    let tracer = match &config.run.trace_file {
        Some(path) => TraceLogger::new(path),
        None => TraceLogger::disabled(),
    };

    let start = Instant::now();
    let fixture = Fixture::start(config)?;
    let results = run_all(&scenarios, &fixture, &tracer);
    let duration = start.elapsed().as_millis();
    // Teardown errors fail the run but never suppress the report
    let teardown = fixture.shutdown();

    let report = TestSuiteReport::from_results(SUITE_NAME, results).with_duration(duration);

    let format = format.unwrap_or(&config.run.format);
    let output_content = render_report(&report, format);

    match output.or(config.run.output.as_deref()) {
        Some(path) => std::fs::write(path, &output_content)?,
        None => print!("{}", output_content),
    }

    if let Err(e) = &teardown {
        warn!(error = %e, "teardown failed after the report was written");
    }
    Ok(report.all_passed() && teardown.is_ok())
}

/// Run scenarios in order against one fixture.
pub fn run_all(scenarios: &[Scenario], fixture: &Fixture, tracer: &TraceLogger) -> Vec<TestResult> {
    scenarios
        .iter()
        .map(|scenario| ScenarioRunner::run_traced(scenario, &fixture.harness, tracer))
        .collect()
}

/// Render a report as `console`, `html` or `junit`.
pub fn render_report(report: &TestSuiteReport, format: &str) -> String {
    match format {
        "html" => generate_html_report(report),
        "junit" => generate_junit_xml(report),
        _ => format_console_report(report),
    }
}

// ============================================================================
// list subcommand
// ============================================================================

pub fn cmd_list(scenarios_path: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    for scenario in scenario_source(scenarios_path)? {
        println!("{}", scenario.name);
        for (i, step) in scenario.steps.iter().enumerate() {
            println!("  {}. {}", i + 1, step.label());
        }
    }
    Ok(())
}

// ============================================================================
// export subcommand
// ============================================================================

/// Write each built-in scenario to `<output_dir>/NNN_<name>.yaml`.
pub fn cmd_export(output_dir: &str) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    std::fs::create_dir_all(output_dir)?;

    let mut written = Vec::new();
    for (i, scenario) in builtin_scenarios().iter().enumerate() {
        let filename = format!("{:03}_{}.yaml", i + 1, sanitize_filename(&scenario.name));
        let path = std::path::Path::new(output_dir).join(&filename);
        let yaml = serde_yaml::to_string(scenario)?;
        std::fs::write(&path, &yaml)?;
        info!(path = %path.display(), "wrote scenario");
        written.push(path.display().to_string());
    }

    println!("Exported {} scenarios to {}/", written.len(), output_dir);
    Ok(written)
}

// ============================================================================
// Helpers
// ============================================================================

fn scenario_source(path: Option<&str>) -> Result<Vec<Scenario>, Box<dyn std::error::Error>> {
    Ok(match path {
        Some(p) => load_scenarios(p)?,
        None => builtin_scenarios(),
    })
}

/// Sanitize a scenario name into a safe filename.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .to_lowercase()
}
