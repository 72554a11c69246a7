//! STE CLI — demonstration runs of the Semantic Topology Engine
//!
//! Commands:
//!   ste minimal      — register, drift, focus back along the inverted drift
//!   ste drift-focus  — same walk with a seeded engine, printing every step
//!   ste artifacts    — structured noise on a seeded morphotype

use ste_core::{ArtifactConfig, Result, SemanticTopologyEngine};
use nalgebra::DVector;
use std::env;

fn print_usage() {
    println!(
        r#"
╔══════════════════════════════════════════════════════════════╗
║        STE v0.1 — Semantic Topology Engine                   ║
║        Morphotypes · Drift · Coherence · Focus · Noise       ║
╚══════════════════════════════════════════════════════════════╝

Usage: ste <command> [options]

Commands:
  minimal                      Drift a random morphotype and focus it back
  drift-focus                  Seeded drift + focus walk, printing each step
  artifacts [config.json]      Inject structured noise (default profile or JSON file)

Examples:
  ste minimal
  ste artifacts noise.json
  RUST_LOG=debug ste drift-focus
"#
    );
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_usage();
        return;
    }

    let result = match args[1].as_str() {
        "minimal" => cmd_minimal(),
        "drift-focus" => cmd_drift_focus(),
        "artifacts" => cmd_artifacts(&args[2..]),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("  Error: {}", e);
        std::process::exit(1);
    }
}

fn show(label: &str, v: &DVector<f32>) {
    let body: Vec<String> = v.iter().map(|x| format!("{:+.4}", x)).collect();
    println!("  {}\n    [{}]", label, body.join(", "));
}

fn cmd_minimal() -> Result<()> {
    let mut ste = SemanticTopologyEngine::new(32);
    ste.register("sample");
    let m = ste.lookup("sample")?;

    let drift = m.vector() * 0.1;
    ste.drift(&m, &drift)?;

    let focus = ste.invert(&drift);
    ste.focus(&m, &focus, 1.0)?;

    show("Final vector:", &m.vector());
    Ok(())
}

fn cmd_drift_focus() -> Result<()> {
    let mut ste = SemanticTopologyEngine::with_seed(32, 7);
    let m = ste.register("walker");
    show("Initial morphotype (m):", &m.vector());

    let d = m.vector() * 0.1;
    show("Drift vector (d = 0.1 * m):", &d);

    ste.drift(&m, &d)?;
    show("After drift (m1 = m + d):", &m.vector());

    let d_inv = ste.invert(&d);
    ste.focus(&m, &d_inv, 1.0)?;
    show("After focus field (m2 = m1 + (-d_inv) * alpha):", &m.vector());

    println!("\n{}", ste.summary_json()?);
    Ok(())
}

fn cmd_artifacts(args: &[String]) -> Result<()> {
    let cfg = match args.first() {
        Some(path) => {
            let json = std::fs::read_to_string(path).map_err(|e| {
                ste_core::SteError::InvalidConfig(format!("cannot read {}: {}", path, e))
            })?;
            ArtifactConfig::from_json(&json)?
        }
        None => ArtifactConfig::robustness_probe(),
    };

    let mut ste = SemanticTopologyEngine::with_seed(16, 42);
    let m = ste.register("probe");
    show("Initial morphotype:", &m.vector());

    ste.artifacts(&m, &cfg)?;
    println!("  Mode: {}", cfg.mode);
    show("Morphotype after artifact noise:", &m.vector());
    Ok(())
}
