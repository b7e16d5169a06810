//! Project career value for every player in a roster CSV
//!
//! Appends one projection column per curve shape to the original rows

use anyhow::{bail, Context, Result};
use career_projection::curves::{load_curves, CurveSet, CurveShape, Role};
use career_projection::projection::{AccumulationPolicy, ProjectionConfig, ProjectionEngine};
use career_projection::roster::{
    as_of_or_today, load_roster, project_roster, write_projected_csv, write_projected_json, ColumnMap,
    ProjectionColumn, FLAT_COLUMN, STANDARD_COLUMN,
};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ShapeArg {
    Standard,
    Flat,
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "project_roster", about = "Aging-curve career projections for a roster CSV")]
struct Args {
    /// Roster CSV with age (or birth date) and value columns
    #[arg(short, long)]
    input: PathBuf,

    /// Destination file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON projection config; flags below override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// hitter or pitcher (inferred from the input file name when omitted)
    #[arg(long)]
    role: Option<Role>,

    /// Curve shape(s) to project
    #[arg(long, value_enum, default_value_t = ShapeArg::Both)]
    shape: ShapeArg,

    /// Discount future seasons
    #[arg(long)]
    discount: bool,

    /// Annual discount rate; implies --discount
    #[arg(long)]
    discount_rate: Option<f64>,

    /// Project ages strictly below this
    #[arg(long)]
    ceiling_age: Option<f64>,

    /// accumulate_always or stop_on_non_positive
    #[arg(long)]
    policy: Option<AccumulationPolicy>,

    /// CSV of replacement curves (role,shape,age,delta)
    #[arg(long)]
    curves: Option<PathBuf>,

    #[arg(long, default_value = "Age")]
    age_col: String,

    #[arg(long, default_value = "WAR")]
    value_col: String,

    #[arg(long, default_value = "BirthDate")]
    birth_date_col: String,

    /// Output column name (single shape only)
    #[arg(long)]
    output_col: Option<String>,

    /// Reference date for ages computed from birth dates (YYYY-MM-DD, default today)
    #[arg(long)]
    as_of: Option<NaiveDate>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    /// Drop rows that cannot be projected instead of leaving blank cells
    #[arg(long)]
    skip_invalid: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let start = Instant::now();

    let base = build_config(&args)?;
    let curves = match &args.curves {
        Some(path) => load_curves(path).with_context(|| format!("loading curves from {}", path.display()))?,
        None => CurveSet::default(),
    };
    let columns = build_columns(&args, &base, &curves)?;

    let column_map = ColumnMap {
        age: args.age_col.clone(),
        value: args.value_col.clone(),
        birth_date: args.birth_date_col.clone(),
    };
    let roster = load_roster(&args.input, &column_map)
        .with_context(|| format!("loading roster from {}", args.input.display()))?;

    let as_of = as_of_or_today(args.as_of);
    log::debug!("birth-date ages measured as of {}", as_of);

    let proj_start = Instant::now();
    let results = project_roster(&roster, &columns, Some(as_of));
    log::info!("projected {} rows in {:?}", results.len(), proj_start.elapsed());

    for (idx, result) in results.iter().enumerate() {
        if let Err(err) = result {
            // Header is line 1
            log::warn!("line {}: {}", idx + 2, err);
        }
    }

    let out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
    let written = match args.format {
        OutputFormat::Csv => write_projected_csv(out, &roster, &names, &results, args.skip_invalid)?,
        OutputFormat::Json => write_projected_json(out, &roster, &names, &results, args.skip_invalid)?,
    };

    log::info!("wrote {} rows in {:?}", written, start.elapsed());
    Ok(())
}

/// Config file (if any) overridden by command-line flags
fn build_config(args: &Args) -> Result<ProjectionConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            ProjectionConfig::from_json(&json)?
        }
        None => ProjectionConfig {
            role: infer_role(&args.input),
            ..Default::default()
        },
    };

    if let Some(role) = args.role {
        config.role = role;
    }
    if args.discount {
        config.discount = true;
    }
    if let Some(rate) = args.discount_rate {
        if !config.discount {
            log::info!("--discount-rate given; discounting at {}", rate);
        }
        config = config.with_discount(rate);
    }
    if let Some(ceiling) = args.ceiling_age {
        config.ceiling_age = ceiling;
    }
    if let Some(policy) = args.policy {
        config.policy = policy;
    }
    Ok(config)
}

fn build_columns(args: &Args, base: &ProjectionConfig, curves: &CurveSet) -> Result<Vec<ProjectionColumn>> {
    let shapes: &[(CurveShape, &str)] = match args.shape {
        ShapeArg::Standard => &[(CurveShape::Standard, STANDARD_COLUMN)],
        ShapeArg::Flat => &[(CurveShape::Flat, FLAT_COLUMN)],
        ShapeArg::Both => &[(CurveShape::Standard, STANDARD_COLUMN), (CurveShape::Flat, FLAT_COLUMN)],
    };
    if args.output_col.is_some() && shapes.len() > 1 {
        bail!("--output-col needs a single --shape");
    }

    shapes
        .iter()
        .map(|&(shape, default_name)| {
            let config = ProjectionConfig {
                curve_shape: shape,
                ..base.clone()
            };
            let engine = ProjectionEngine::with_curves(config, curves)?;
            let name = args.output_col.clone().unwrap_or_else(|| default_name.to_string());
            Ok(ProjectionColumn::new(name, engine))
        })
        .collect()
}

/// Pitcher files are named like `zips-pitchers-2025.csv`
fn infer_role(path: &Path) -> Role {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    if name.contains("pitcher") {
        log::info!("treating {} as a pitcher roster", path.display());
        Role::Pitcher
    } else {
        Role::Hitter
    }
}
