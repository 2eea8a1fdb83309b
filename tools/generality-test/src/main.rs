use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use log::info;
use serde::Serialize;

use sustain_kube_calibration::config::ExperimentConfig;
use sustain_kube_calibration::{CalibrationResult, CalibrationRun, HardwareProfile, ScenarioReport, WorkloadGenerator};

#[derive(Parser, Debug)]
#[command(about, long_about = None)]
/// Checks how well the Sustain-Kube model approximates the shadow power model on different hardware
struct Args {
    /// Path to YAML file with experiment configuration (default - built-in scenarios)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Workload seed, overrides the config
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of workload samples, overrides the config
    #[arg(short, long)]
    points: Option<usize>,

    /// Number of threads to use (default - use all available cores)
    #[arg(short, long, default_value_t = std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1))]
    threads: usize,

    /// Path to produced JSON file with calibration results
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory for CSV files with shadow and Sustain-Kube power traces
    #[arg(long)]
    traces_dir: Option<PathBuf>,

    /// Number of leading trace points written to CSV files
    #[arg(long, default_value_t = 300)]
    plot_points: usize,
}

fn init_logger() {
    use env_logger::Builder;
    Builder::from_default_env()
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();
}

#[derive(Serialize)]
struct ScenarioEntry<'a> {
    name: &'a str,
    profile: &'a HardwareProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<&'a CalibrationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct TracePoint {
    index: usize,
    shadow_watts: f64,
    sustain_watts: f64,
}

fn print_report(id: usize, report: &ScenarioReport) {
    println!("\n[Scenario {}]: {}", id + 1, report.name);
    println!(
        "   - Hardware: {} cores, idle {} W -> max {} W",
        report.profile.cores(),
        report.profile.p_idle(),
        report.profile.p_max()
    );
    match &report.outcome {
        Ok(outcome) => {
            println!("   - Recommended CPU coefficient: {:.4}", outcome.result.cpu_coefficient);
            println!("   - R2 score: {:.4}", outcome.result.r2);
            println!("   - Mean absolute error: {:.2} W", outcome.result.mae);
        }
        Err(e) => println!("   - Calibration failed: {}", e),
    }
}

fn write_results(path: &Path, reports: &[ScenarioReport]) -> anyhow::Result<()> {
    let entries = reports
        .iter()
        .map(|report| ScenarioEntry {
            name: &report.name,
            profile: &report.profile,
            result: report.outcome.as_ref().ok().map(|outcome| &outcome.result),
            error: report.outcome.as_ref().err().map(|e| e.to_string()),
        })
        .collect::<Vec<_>>();
    let mut file = File::create(path).with_context(|| format!("can't create {}", path.display()))?;
    serde_json::to_writer_pretty(&mut file, &entries)?;
    info!("Results saved to {}", path.display());
    Ok(())
}

fn write_traces(dir: &Path, reports: &[ScenarioReport], plot_points: usize) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir).with_context(|| format!("can't create {}", dir.display()))?;
    for (id, report) in reports.iter().enumerate() {
        let Ok(outcome) = &report.outcome else {
            continue;
        };
        let path = dir.join(format!("scenario_{}.csv", id + 1));
        let mut writer = csv::Writer::from_path(&path).with_context(|| format!("can't create {}", path.display()))?;
        let points = outcome.reference.head(plot_points).iter();
        for (index, (shadow_watts, sustain_watts)) in points.zip(outcome.reconstructed.iter()).enumerate() {
            writer.serialize(TracePoint {
                index,
                shadow_watts: *shadow_watts,
                sustain_watts,
            })?;
        }
        writer.flush()?;
        info!("Traces of '{}' saved to {}", report.name, path.display());
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_logger();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ExperimentConfig::from_file(path)?,
        None => ExperimentConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.workload.seed = seed;
    }
    if let Some(points) = args.points {
        config.workload.points = points;
    }

    let workload = WorkloadGenerator::new(config.workload)?.generate();
    let run = CalibrationRun::with_shared_workload(&config.scenarios, workload);
    let reports = run.run_parallel(args.threads);

    println!("{}", "=".repeat(80));
    println!("{:^80}", "Sustain-Kube Hardware Generality Test");
    println!("{}", "=".repeat(80));
    for (id, report) in reports.iter().enumerate() {
        print_report(id, report);
    }
    println!("\n{}", "=".repeat(80));

    if let Some(path) = &args.output {
        write_results(path, &reports)?;
    }
    if let Some(dir) = &args.traces_dir {
        write_traces(dir, &reports, args.plot_points)?;
    }

    let failed = reports.iter().filter(|r| r.outcome.is_err()).count();
    if failed > 0 {
        anyhow::bail!("{} of {} scenarios failed", failed, reports.len());
    }
    Ok(())
}
