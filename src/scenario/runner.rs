use std::thread;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::desktop::helpers::{
    cancel_element, context_click, open_tray_icon, wait_for_context_menu, wait_for_dialog,
    wait_for_dialog_class, wait_until_gone,
};
use crate::error::Result;
use crate::fixture::Harness;
use crate::scenario::context::TestContext;
use crate::scenario::scenario_model::{
    Check, CheckResult, DialogMatch, Scenario, Step, TestResult,
};
use crate::trace::logger::TraceLogger;
use crate::trace::trace::{StepOutcome, TraceEvent};

/// Whether the scenario may go on after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

/// Executes a Scenario step-by-step against a Harness.
pub struct ScenarioRunner;

impl ScenarioRunner {
    pub fn run(scenario: &Scenario, harness: &Harness) -> TestResult {
        Self::run_inner(scenario, harness, None)
    }

    /// Like [`ScenarioRunner::run`], appending one trace event per step.
    pub fn run_traced(scenario: &Scenario, harness: &Harness, tracer: &TraceLogger) -> TestResult {
        Self::run_inner(scenario, harness, Some(tracer))
    }

    fn run_inner(
        scenario: &Scenario,
        harness: &Harness,
        tracer: Option<&TraceLogger>,
    ) -> TestResult {
        let mut ctx = TestContext::new();
        let started = Instant::now();
        info!(scenario = %scenario.name, steps = scenario.steps.len(), "running scenario");

        for (i, step) in scenario.steps.iter().enumerate() {
            ctx.current_step = i;
            let step_started = Instant::now();
            let checks_before = ctx.check_results.len();

            let outcome = Self::execute_step(step, i, harness, &mut ctx);
            let elapsed = step_started.elapsed().as_millis();

            let (trace_outcome, detail) = match &outcome {
                Ok(Flow::Continue) => (StepOutcome::Passed, None),
                Ok(Flow::Stop) => (
                    StepOutcome::Failed,
                    ctx.check_results[checks_before..]
                        .iter()
                        .find(|r| !r.passed)
                        .and_then(|r| r.message.clone()),
                ),
                Err(e) => (StepOutcome::Error, Some(e.to_string())),
            };
            if let Some(tracer) = tracer {
                let mut event = TraceEvent::now(&scenario.name, i, &step.label())
                    .with_outcome(trace_outcome)
                    .with_duration(elapsed);
                if let Some(detail) = &detail {
                    event = event.with_detail(detail);
                }
                tracer.log(&event);
            }

            match outcome {
                Ok(Flow::Continue) => {}
                Ok(Flow::Stop) => {
                    warn!(scenario = %scenario.name, step = i, "check failed, stopping scenario");
                    return Self::finish(scenario, ctx, i + 1, None, started);
                }
                Err(e) => {
                    warn!(scenario = %scenario.name, step = i, error = %e, "step failed");
                    let error = format!("Step {} ({}) failed: {}", i, step.label(), e);
                    return Self::finish(scenario, ctx, i + 1, Some(error), started);
                }
            }
        }

        Self::finish(scenario, ctx, scenario.steps.len(), None, started)
    }

    fn finish(
        scenario: &Scenario,
        ctx: TestContext,
        steps_run: usize,
        error: Option<String>,
        started: Instant,
    ) -> TestResult {
        let passed = error.is_none() && ctx.all_passed() && steps_run == scenario.steps.len();
        info!(scenario = %scenario.name, passed, "scenario finished");
        TestResult {
            scenario_name: scenario.name.clone(),
            passed,
            steps_run,
            check_results: ctx.check_results,
            error,
            duration_ms: started.elapsed().as_millis(),
        }
    }

    /// Execute a single step.
    fn execute_step(
        step: &Step,
        step_index: usize,
        harness: &Harness,
        ctx: &mut TestContext,
    ) -> Result<Flow> {
        let session = &harness.session;
        let desktop = &harness.desktop;
        let wait = &harness.wait;

        match step {
            Step::FocusTrayIcon { icon_name } => {
                let name = icon_name.as_deref().unwrap_or(&harness.tray_icon_name);
                let found = open_tray_icon(session, desktop, name, wait);
                let check = Check::TrayIconVisible {
                    icon_name: name.to_string(),
                };
                match Self::verify(ctx, step_index, check, found, |el| el.id.clone())? {
                    Some(icon) => {
                        ctx.tray_icon = Some(icon);
                        Ok(Flow::Continue)
                    }
                    None => Ok(Flow::Stop),
                }
            }

            Step::ContextClickTrayIcon => {
                let icon = ctx.tray_icon()?.clone();
                context_click(session, &icon, harness.metrics.as_ref())?;
                Ok(Flow::Continue)
            }

            Step::ClickMenuItem { command_id } => {
                let found = wait_for_context_menu(session, desktop, command_id, wait);
                let shown = Check::MenuItemShown {
                    command_id: command_id.clone(),
                };
                let Some(item) = Self::verify(ctx, step_index, shown, found, |el| el.id.clone())?
                else {
                    return Ok(Flow::Stop);
                };

                session.click(&item)?;

                let gone = wait_until_gone(session, desktop, &item, wait);
                let closed = Check::MenuClosed {
                    command_id: command_id.clone(),
                };
                match Self::verify(ctx, step_index, closed, gone, |_| "closed".to_string())? {
                    Some(()) => Ok(Flow::Continue),
                    None => Ok(Flow::Stop),
                }
            }

            Step::WaitForDialog { dialog } => {
                let found = match dialog {
                    DialogMatch::ClassName { class_name } => {
                        wait_for_dialog_class(session, class_name, wait)
                    }
                    DialogMatch::Title { title } => wait_for_dialog(session, desktop, title, wait),
                };
                let check = Check::DialogShown {
                    dialog: dialog.clone(),
                };
                match Self::verify(ctx, step_index, check, found, |el| el.id.clone())? {
                    Some(element) => {
                        ctx.dialog = Some(element);
                        Ok(Flow::Continue)
                    }
                    None => Ok(Flow::Stop),
                }
            }

            Step::CancelDialog => {
                let dialog = ctx.take_dialog()?;
                let dismissed = cancel_element(session, desktop, &dialog, wait);
                match Self::verify(ctx, step_index, Check::DialogDismissed, dismissed, |_| {
                    "dismissed".to_string()
                })? {
                    Some(()) => Ok(Flow::Continue),
                    None => Ok(Flow::Stop),
                }
            }

            Step::Wait { duration_ms } => {
                thread::sleep(Duration::from_millis(*duration_ms));
                Ok(Flow::Continue)
            }
        }
    }

    /// Record the outcome of a wait as a check.
    ///
    /// Timeouts and missing elements become failed checks (`Ok(None)`);
    /// anything else is an execution error.
    fn verify<T>(
        ctx: &mut TestContext,
        step_index: usize,
        check: Check,
        outcome: Result<T>,
        describe: impl FnOnce(&T) -> String,
    ) -> Result<Option<T>> {
        match outcome {
            Ok(value) => {
                ctx.record(CheckResult::pass(step_index, check, describe(&value)));
                Ok(Some(value))
            }
            Err(e) if e.is_timeout() || e.is_no_such_element() => {
                ctx.record(CheckResult::fail(step_index, check, e.to_string()));
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
