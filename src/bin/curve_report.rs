//! Print projected career totals by starting age for every curve
//! Used to review curve calibration side by side

use anyhow::{Context, Result};
use career_projection::curves::{load_curves, CurveSet, CurveShape, Role};
use career_projection::projection::{AccumulationPolicy, ProjectionConfig, ProjectionEngine};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "curve_report", about = "Projected totals by starting age for each aging curve")]
struct Args {
    /// Starting single-season value
    #[arg(long, default_value_t = 3.0)]
    value: f64,

    #[arg(long, default_value_t = 16)]
    min_age: u8,

    #[arg(long, default_value_t = 45)]
    max_age: u8,

    #[arg(long)]
    discount: bool,

    #[arg(long)]
    policy: Option<AccumulationPolicy>,

    /// CSV of replacement curves (role,shape,age,delta)
    #[arg(long)]
    curves: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let curves = match &args.curves {
        Some(path) => load_curves(path).with_context(|| format!("loading curves from {}", path.display()))?,
        None => CurveSet::default(),
    };

    let mut engines = Vec::with_capacity(4);
    for role in Role::ALL {
        for shape in CurveShape::ALL {
            let mut config = ProjectionConfig::new(role, shape);
            config.discount = args.discount;
            if let Some(policy) = args.policy {
                config.policy = policy;
            }
            let engine = ProjectionEngine::with_curves(config, &curves)
                .with_context(|| format!("building {} {} engine", role, shape))?;
            engines.push(engine);
        }
    }

    // Ages the selected curves cover, before falling back
    for engine in &engines {
        let config = engine.config();
        match engine.table().age_range() {
            Some((lo, hi)) => log::info!("{}/{} curve covers ages {}-{}", config.role, config.curve_shape, lo, hi),
            None => log::warn!("{}/{} curve is empty", config.role, config.curve_shape),
        }
    }

    let first = engines.first().map(ProjectionEngine::config).context("no curves to report")?;
    println!(
        "Projected totals from value {:.1} (discount: {}, ceiling: {}, policy: {:?})",
        args.value,
        if first.discount { format!("{:.0}%", first.discount_rate * 100.0) } else { "No".to_string() },
        first.ceiling_age,
        first.policy
    );
    print!("{:<6}", "Age");
    for engine in &engines {
        let config = engine.config();
        print!(" {:>18}", format!("{}/{}", config.role, config.curve_shape));
    }
    println!();

    for age in args.min_age..=args.max_age {
        print!("{:<6}", age);
        for engine in &engines {
            let total = engine.project_value(age as f64, args.value)?;
            print!(" {:>18.1}", total);
        }
        println!();
    }

    Ok(())
}
