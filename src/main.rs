//! Demo binary: bearing-only localization on a scripted circular drive.
//!
//! Generates a noisy ground-truth trajectory, runs the particle filter
//! on the recorded controls and bearings, and reports whether the
//! estimate lands within the acceptance tolerances.
//!
//! # Usage
//!
//! ```bash
//! disha-mcl
//! disha-mcl --seed 42 --steps 8 --particles 1000
//! ```

use std::io::Write;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::f64::consts::PI;

use disha_mcl::sim::{generate_ground_truth, within_tolerance};
use disha_mcl::{Control, ParticleFilter, ParticleFilterConfig, Tolerances};

struct Args {
    seed: u64,
    steps: usize,
    particles: usize,
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut parsed = Args {
        seed: 0,
        steps: 6,
        particles: 500,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                let value = args.get(i).ok_or("--seed requires a value")?;
                parsed.seed = value.parse().map_err(|_| format!("bad seed: {}", value))?;
            }
            "--steps" => {
                i += 1;
                let value = args.get(i).ok_or("--steps requires a value")?;
                parsed.steps = value.parse().map_err(|_| format!("bad steps: {}", value))?;
            }
            "--particles" => {
                i += 1;
                let value = args.get(i).ok_or("--particles requires a value")?;
                parsed.particles = value
                    .parse()
                    .map_err(|_| format!("bad particles: {}", value))?;
            }
            "--help" | "-h" => return Err("help".into()),
            other => return Err(format!("unknown argument: {}", other)),
        }
        i += 1;
    }

    Ok(parsed)
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} [--seed N] [--steps N] [--particles N]", program);
    eprintln!();
    eprintln!("  --seed N       RNG seed (0 = entropy, default 0)");
    eprintln!("  --steps N      control steps in the scripted drive (default 6)");
    eprintln!("  --particles N  population size (default 500)");
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {} - {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();

    let args: Vec<String> = std::env::args().collect();
    let args = match parse_args(&args) {
        Ok(args) => args,
        Err(e) => {
            if e != "help" {
                eprintln!("Error: {}", e);
            }
            print_usage(&args[0]);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = ParticleFilterConfig {
        num_particles: args.particles,
        seed: args.seed,
        ..Default::default()
    };

    // Reference scenario: constant left arc, 12 units per step.
    let motions = vec![Control::new(2.0 * PI / 20.0, 12.0); args.steps];

    log::info!("disha-mcl demo starting");
    log::info!("  Steps: {}, particles: {}", args.steps, args.particles);
    log::info!(
        "  Noise: bearing {}, steering {}, distance {}",
        config.noise.bearing,
        config.noise.steering,
        config.noise.distance
    );

    // Offset ground-truth seed so the truth and the filter draw
    // different streams even with a shared --seed.
    let mut rng = if args.seed == 0 {
        SmallRng::from_entropy()
    } else {
        SmallRng::seed_from_u64(args.seed.wrapping_add(1))
    };
    let truth = generate_ground_truth(&motions, &config.world, config.motion, config.noise, &mut rng)?;

    let mut filter = ParticleFilter::new(config)?;
    let estimate = filter.run(&motions, &truth.measurements)?;

    let tolerances = Tolerances::default();
    let passed = within_tolerance(&truth.final_pose, &estimate, &tolerances);

    log::info!("Ground truth:    {}", truth.final_pose);
    log::info!("Particle filter: {}", estimate);
    log::info!(
        "Within tolerance (xy {}, heading {}): {}",
        tolerances.xy,
        tolerances.heading,
        passed
    );

    Ok(())
}
