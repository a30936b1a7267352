//! Energy-zone dashboard entry point: CLI wiring and config-driven run.

use std::path::Path;
use std::process;

use energy_zone::config::DashboardConfig;
use energy_zone::engine::types::Persona;
use energy_zone::io::export::{export_hourly_csv, export_report_json, export_zone_csv};
use energy_zone::recommend;
use energy_zone::runner::run_dashboard;

/// Parsed CLI arguments.
struct CliArgs {
    scenario_path: Option<String>,
    preset: Option<String>,
    zip: Option<String>,
    persona: Option<Persona>,
    seed_override: Option<u64>,
    zones_out: Option<String>,
    hours_out: Option<String>,
    report_out: Option<String>,
    #[cfg(feature = "api")]
    serve: bool,
    #[cfg(feature = "api")]
    port: u16,
}

fn print_help() {
    eprintln!("energy-zone: community impact scoring and ROI projection for data centers");
    eprintln!();
    eprintln!("Usage: energy-zone [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>        Load configuration from TOML file");
    eprintln!("  --preset <name>          Use a built-in preset (operator, cloud)");
    eprintln!("  --zip <code>             Override the selected zone");
    eprintln!("  --persona <name>         Override the persona (operator, cloud)");
    eprintln!("  --seed <u64>             Override random seed");
    eprintln!("  --zones-out <path>       Export zone scores to CSV");
    eprintln!("  --hours-out <path>       Export the hourly trend to CSV");
    eprintln!("  --report-out <path>      Export the impact report to JSON");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve                  Start REST API server after the run");
        eprintln!("  --port <u16>             API server port (default: 3000)");
    }
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the operator preset is used.");
}

/// Returns the value following flag `name`, exiting if it is missing.
fn flag_value(args: &[String], i: &mut usize, name: &str, kind: &str) -> String {
    *i += 1;
    match args.get(*i) {
        Some(v) => v.clone(),
        None => {
            eprintln!("error: {name} requires a {kind} argument");
            process::exit(1);
        }
    }
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        scenario_path: None,
        preset: None,
        zip: None,
        persona: None,
        seed_override: None,
        zones_out: None,
        hours_out: None,
        report_out: None,
        #[cfg(feature = "api")]
        serve: false,
        #[cfg(feature = "api")]
        port: 3000,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--scenario" => cli.scenario_path = Some(flag_value(&args, &mut i, "--scenario", "path")),
            "--preset" => cli.preset = Some(flag_value(&args, &mut i, "--preset", "name")),
            "--zip" => cli.zip = Some(flag_value(&args, &mut i, "--zip", "zip code")),
            "--persona" => {
                let value = flag_value(&args, &mut i, "--persona", "name");
                match value.parse::<Persona>() {
                    Ok(p) => cli.persona = Some(p),
                    Err(e) => {
                        eprintln!("error: {e}");
                        process::exit(1);
                    }
                }
            }
            "--seed" => {
                let value = flag_value(&args, &mut i, "--seed", "u64");
                if let Ok(s) = value.parse::<u64>() {
                    cli.seed_override = Some(s);
                } else {
                    eprintln!("error: --seed value \"{value}\" is not a valid u64");
                    process::exit(1);
                }
            }
            "--zones-out" => cli.zones_out = Some(flag_value(&args, &mut i, "--zones-out", "path")),
            "--hours-out" => cli.hours_out = Some(flag_value(&args, &mut i, "--hours-out", "path")),
            "--report-out" => {
                cli.report_out = Some(flag_value(&args, &mut i, "--report-out", "path"));
            }
            #[cfg(feature = "api")]
            "--serve" => {
                cli.serve = true;
            }
            #[cfg(feature = "api")]
            "--port" => {
                let value = flag_value(&args, &mut i, "--port", "u16");
                if let Ok(p) = value.parse::<u16>() {
                    cli.port = p;
                } else {
                    eprintln!("error: --port value \"{value}\" is not a valid u16");
                    process::exit(1);
                }
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

/// Loads the configuration: `--scenario` takes priority, then `--preset`,
/// then the operator default. CLI overrides are applied on top.
fn load_config(cli: &CliArgs) -> DashboardConfig {
    let loaded = if let Some(ref path) = cli.scenario_path {
        DashboardConfig::from_toml_file(Path::new(path))
    } else if let Some(ref name) = cli.preset {
        DashboardConfig::from_preset(name)
    } else {
        Ok(DashboardConfig::operator())
    };
    let mut cfg = loaded.unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    if let Some(ref zip) = cli.zip {
        cfg.dashboard.zip = zip.clone();
    }
    if let Some(persona) = cli.persona {
        cfg.dashboard.persona = persona;
    }
    if let Some(seed) = cli.seed_override {
        cfg.dashboard.seed = seed;
    }

    let errors = cfg.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }
    cfg
}

fn main() {
    energy_zone::logging::init();
    let cli = parse_args();
    let cfg = load_config(&cli);

    let api_key = std::env::var(&cfg.recommendation.api_key_env).ok();
    let recommender = recommend::from_config(&cfg.recommendation, api_key);

    let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("error: failed to create tokio runtime: {e}");
        process::exit(1);
    });

    let run = rt
        .block_on(run_dashboard(&cfg, &recommender))
        .unwrap_or_else(|e| {
            eprintln!("error: {e}");
            process::exit(1);
        });

    println!("{run}");

    if let Some(ref path) = cli.zones_out {
        if let Err(e) = export_zone_csv(&run.scores, Path::new(path)) {
            eprintln!("error: failed to write zone CSV: {e}");
            process::exit(1);
        }
        tracing::info!(%path, "zone scores written");
    }
    if let Some(ref path) = cli.hours_out {
        if let Err(e) = export_hourly_csv(&run.hours, &run.cleaner_hours, Path::new(path)) {
            eprintln!("error: failed to write hourly CSV: {e}");
            process::exit(1);
        }
        tracing::info!(%path, "hourly trend written");
    }
    if let Some(ref path) = cli.report_out {
        if let Err(e) = export_report_json(&run.report, Path::new(path)) {
            eprintln!("error: failed to write report JSON: {e}");
            process::exit(1);
        }
        tracing::info!(%path, "impact report written");
    }

    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = energy_zone::api::AppState::new(cfg, recommender).unwrap_or_else(|e| {
            eprintln!("error: {e}");
            process::exit(1);
        });
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        if let Err(e) = rt.block_on(energy_zone::api::serve(Arc::new(state), addr)) {
            eprintln!("error: API server failed: {e}");
            process::exit(1);
        }
    }
}
