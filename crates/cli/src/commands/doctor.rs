use catalog_core::config::{AppConfig, LoadOptions};
use catalog_core::{Catalog, Dataset};
use serde::Serialize;

use crate::commands::load_dataset;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

pub struct DoctorOutput {
    pub passed: bool,
    pub output: String,
}

pub fn run(options: LoadOptions, json_output: bool) -> DoctorOutput {
    let report = build_report(options);
    let passed = report.overall_status == CheckStatus::Pass;

    if json_output {
        let output = serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed\",\"error\":\"{}\"}}",
                escape_json(&error.to_string())
            )
        });
        return DoctorOutput { passed, output };
    }

    DoctorOutput { passed, output: render_human(&report) }
}

fn build_report(options: LoadOptions) -> DoctorReport {
    let mut checks = Vec::new();

    match AppConfig::load(options) {
        Ok(config) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Pass,
                details: "configuration loaded and validated".to_string(),
            });
            match load_dataset(&config) {
                Ok(dataset) => {
                    checks.push(DoctorCheck {
                        name: "dataset_load",
                        status: CheckStatus::Pass,
                        details: describe_source(&config, &dataset),
                    });
                    checks.push(check_integrity(dataset));
                }
                Err(error) => {
                    checks.push(DoctorCheck {
                        name: "dataset_load",
                        status: CheckStatus::Fail,
                        details: error.to_string(),
                    });
                    checks.push(skipped("catalog_integrity", "dataset did not load"));
                }
            }
        }
        Err(error) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Fail,
                details: error.to_string(),
            });
            checks.push(skipped("dataset_load", "configuration did not load"));
            checks.push(skipped("catalog_integrity", "configuration did not load"));
        }
    }

    let all_pass = checks.iter().all(|check| check.status == CheckStatus::Pass);
    let overall_status = if all_pass { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_pass {
        "doctor: all readiness checks passed".to_string()
    } else {
        "doctor: one or more readiness checks failed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn describe_source(config: &AppConfig, dataset: &Dataset) -> String {
    let source = config
        .dataset
        .path
        .as_ref()
        .map(|path| format!("`{}`", path.display()))
        .unwrap_or_else(|| "built-in demo dataset".to_string());
    format!(
        "{source}: {} users, {} categories, {} products",
        dataset.users.len(),
        dataset.categories.len(),
        dataset.products.len()
    )
}

fn check_integrity(dataset: Dataset) -> DoctorCheck {
    match Catalog::join(dataset) {
        Ok(catalog) => DoctorCheck {
            name: "catalog_integrity",
            status: CheckStatus::Pass,
            details: format!(
                "all {} products resolve to a category and owner",
                catalog.products().len()
            ),
        },
        Err(error) => DoctorCheck {
            name: "catalog_integrity",
            status: CheckStatus::Fail,
            details: error.to_string(),
        },
    }
}

fn skipped(name: &'static str, reason: &str) -> DoctorCheck {
    DoctorCheck { name, status: CheckStatus::Skipped, details: format!("skipped because {reason}") }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = Vec::new();
    lines.push(report.summary.clone());

    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "fail",
            CheckStatus::Skipped => "skip",
        };
        lines.push(format!("- [{marker}] {}: {}", check.name, check.details));
    }

    lines.join("\n")
}

fn escape_json(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
