//! Headless Drive Test
//!
//! Runs a simulation session without a display and prints telemetry, for
//! checking engine and gearbox behaviour from a terminal.
//!
//! Usage:
//!   cargo run --example drive_test -- [OPTIONS]
//!
//! Options:
//!   --cc CC              Engine displacement (default: 1200)
//!   --transmission KIND  Manual, AMT, IMT, CVT or DCT (default: AMT)
//!   --throttle PCT       Throttle opening 0-100 (default: 70)
//!   --seconds S          Simulated run time (default: 10)
//!   --seed N             Noise seed for a reproducible run

use autoguru_core::curve::{peak_horsepower, peak_torque};
use autoguru_core::prelude::*;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "autoguru_core=info".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut displacement = 1200u32;
    let mut transmission = TransmissionKind::Amt;
    let mut throttle = 70i32;
    let mut seconds = 10.0f64;
    let mut seed = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--cc" => {
                i += 1;
                if i < args.len() {
                    displacement = args[i].parse().unwrap_or(1200);
                }
            }
            "--transmission" | "-t" => {
                i += 1;
                if i < args.len() {
                    transmission = TransmissionKind::parse_lenient(&args[i]);
                }
            }
            "--throttle" => {
                i += 1;
                if i < args.len() {
                    throttle = args[i].parse().unwrap_or(70);
                }
            }
            "--seconds" | "-s" => {
                i += 1;
                if i < args.len() {
                    seconds = args[i].parse().unwrap_or(10.0);
                }
            }
            "--seed" => {
                i += 1;
                if i < args.len() {
                    seed = args[i].parse().ok();
                }
            }
            other => {
                eprintln!("Unknown option: {}", other);
                return;
            }
        }
        i += 1;
    }

    let settings = SimulationSettings {
        engine: EngineConfig::new(displacement, transmission),
        seed,
        ..Default::default()
    };
    let ticks = (seconds / settings.tick_seconds()).round() as usize;

    let mut session = Session::new(settings);
    session.start();
    session.set_throttle(throttle);
    if transmission != TransmissionKind::Manual {
        session.gear_up();
    }

    println!("{:>6} {:>6} {:>8} {:>8} {:>5}", "t(s)", "rpm", "Nm", "HP", "gear");
    for tick in 0..ticks {
        let Some(t) = session.step() else { break };
        if tick % 5 == 4 || t.shifting {
            println!(
                "{:>6.1} {:>6.0} {:>8.1} {:>8.1} {:>5}{}",
                t.sim_time,
                t.rpm,
                t.torque,
                t.horsepower,
                t.gear_label,
                if t.shifting { "  (shifting)" } else { "" }
            );
        }
    }

    let curve = session.power_curve();
    if let (Some(tq), Some(hp)) = (peak_torque(&curve), peak_horsepower(&curve)) {
        println!();
        println!("Peak torque:     {:.1} Nm @ {:.0} rpm", tq.torque, tq.rpm);
        println!("Peak horsepower: {:.1} HP @ {:.0} rpm", hp.horsepower, hp.rpm);
    }

    session.stop();
}
