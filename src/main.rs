use anyhow::{Context, Result, ensure};
use clap::{Args, Parser, Subcommand};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, info};

use curvesim_measure::{
    Coordinates, Curve, CurveMeasure, DistanceMatrix, Measure, Metric, Point,
};

#[derive(Parser)]
#[command(name = "curvesim")]
#[command(about = "Fréchet, Dynamic Time Warping, and Hausdorff distances between curves")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// RNG seed for reproducible random curves
    #[arg(long, default_value_t = 42, global = true)]
    seed: u64,

    /// Enable verbose (debug-level) logging
    #[arg(long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Number of threads for parallel computation (defaults to all cores)
    #[arg(long, global = true)]
    threads: Option<usize>,
}

/// Which measures and metrics to evaluate.
#[derive(Args, Debug, Clone)]
struct SelectionArgs {
    /// Curve measure: frechet, dtw, hausdorff, or all
    #[arg(long, default_value = "all")]
    measure: String,

    /// Point metric: euclidean, minkowski, manhattan, chebyshev, cosine, haversine, or all
    #[arg(long, default_value = "all")]
    metric: String,

    /// Minkowski exponent (only used by the minkowski metric)
    #[arg(long, default_value_t = 1.0)]
    p: f64,

    /// Treat unrecognized metric names as euclidean instead of failing
    #[arg(long, default_value_t = false)]
    lenient_metric: bool,
}

/// Shape of randomly generated curves.
#[derive(Args, Debug, Clone)]
struct RandomCurveArgs {
    /// Points per curve
    #[arg(long, default_value_t = 10)]
    points: usize,

    /// Coordinates per point
    #[arg(long, default_value_t = 2)]
    dims: usize,

    /// Coordinates are integers drawn from [0, bound)
    #[arg(long, default_value_t = 10)]
    bound: u32,
}

#[derive(Subcommand)]
enum Command {
    /// Generate two random integer-valued curves and compare them
    Random {
        #[command(flatten)]
        shape: RandomCurveArgs,

        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// Compare two curves given inline as "x,y;x,y;..."
    Compare {
        /// First curve
        #[arg(long)]
        a: String,

        /// Second curve
        #[arg(long)]
        b: String,

        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// Compute a pairwise distance matrix over random curves
    Pairwise {
        /// Number of curves
        #[arg(long, default_value_t = 8)]
        curves: usize,

        #[command(flatten)]
        shape: RandomCurveArgs,

        #[command(flatten)]
        selection: SelectionArgs,
    },
}

#[derive(Serialize)]
struct MeasureRow {
    measure: &'static str,
    metric: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct CompareOutput {
    curve_a: Vec<Vec<f64>>,
    curve_b: Vec<Vec<f64>>,
    results: Vec<MeasureRow>,
}

#[derive(Serialize)]
struct PairwiseOutput {
    measure: &'static str,
    metric: String,
    curves: Vec<Vec<Vec<f64>>>,
    matrix: Vec<Vec<f64>>,
}

fn parse_measures(s: &str) -> Result<Vec<Measure>> {
    if s.eq_ignore_ascii_case("all") {
        return Ok(Measure::ALL.to_vec());
    }
    Ok(vec![s.parse::<Measure>()?])
}

fn parse_metrics(selection: &SelectionArgs) -> Result<Vec<Metric>> {
    if selection.metric.eq_ignore_ascii_case("all") {
        let metrics = Metric::all(selection.p);
        for metric in &metrics {
            metric.validate()?;
        }
        return Ok(metrics.to_vec());
    }
    let metric = if selection.lenient_metric {
        Metric::from_selector_or_euclidean(&selection.metric, selection.p)?
    } else {
        Metric::from_selector(&selection.metric, selection.p)?
    };
    Ok(vec![metric])
}

fn parse_curve(s: &str) -> Result<Vec<Point>> {
    s.split(';')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .enumerate()
        .map(|(i, p)| {
            let coords = p
                .split(',')
                .map(|c| c.trim().parse::<f64>())
                .collect::<Result<Vec<_>, _>>()
                .with_context(|| format!("invalid coordinate in point {i}: {p:?}"))?;
            Ok(Point::new(coords))
        })
        .collect()
}

fn random_curve(rng: &mut ChaCha8Rng, shape: &RandomCurveArgs) -> Vec<Point> {
    (0..shape.points)
        .map(|_| {
            Point::new(
                (0..shape.dims)
                    .map(|_| f64::from(rng.gen_range(0..shape.bound)))
                    .collect(),
            )
        })
        .collect()
}

fn describe(points: &[Point]) -> String {
    points
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn to_rows(points: &[Point]) -> Vec<Vec<f64>> {
    points.iter().map(|p| p.coordinates().to_vec()).collect()
}

/// Evaluate every selected measure/metric combination. Per-combination
/// failures (e.g. cosine on a zero vector) are reported in the row.
fn evaluate_all(a: &Curve, b: &Curve, measures: &[Measure], metrics: &[Metric]) -> Vec<MeasureRow> {
    let mut rows = Vec::with_capacity(measures.len() * metrics.len());
    for &measure in measures {
        for &metric in metrics {
            let result = measure
                .with_metric(metric)
                .and_then(|calc| calc.distance(a.as_view(), b.as_view()));
            debug!(%measure, %metric, ?result, "evaluated");
            let (distance, error) = match result {
                Ok(d) => (Some(d.value()), None),
                Err(e) => (None, Some(e.to_string())),
            };
            rows.push(MeasureRow {
                measure: measure.name(),
                metric: metric.to_string(),
                distance,
                error,
            });
        }
    }
    rows
}

fn compare(a: Vec<Point>, b: Vec<Point>, selection: &SelectionArgs) -> Result<CompareOutput> {
    let measures = parse_measures(&selection.measure)?;
    let metrics = parse_metrics(selection)?;

    let curve_a = Curve::from_points(&a).context("invalid first curve")?;
    let curve_b = Curve::from_points(&b).context("invalid second curve")?;
    info!(
        m = curve_a.len(),
        p = curve_b.len(),
        dims = curve_a.dims(),
        "curves loaded"
    );

    let results = evaluate_all(&curve_a, &curve_b, &measures, &metrics);
    Ok(CompareOutput {
        curve_a: to_rows(&a),
        curve_b: to_rows(&b),
        results,
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match (cli.verbose, cli.quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ => "info",
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Configure Rayon thread pool
    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure thread pool")?;
        info!(threads, "thread pool configured");
    }

    match cli.command {
        Command::Random { shape, selection } => {
            ensure!(shape.bound > 0, "--bound must be at least 1");
            let mut rng = ChaCha8Rng::seed_from_u64(cli.seed);
            let a = random_curve(&mut rng, &shape);
            let b = random_curve(&mut rng, &shape);
            info!(curve_a = %describe(&a), "generated");
            info!(curve_b = %describe(&b), "generated");

            let output = compare(a, b, &selection)?;
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Command::Compare { a, b, selection } => {
            let a = parse_curve(&a).context("failed to parse --a")?;
            let b = parse_curve(&b).context("failed to parse --b")?;

            let output = compare(a, b, &selection)?;
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Command::Pairwise {
            curves,
            shape,
            selection,
        } => {
            ensure!(shape.bound > 0, "--bound must be at least 1");
            let measures = parse_measures(&selection.measure)?;
            let metrics = parse_metrics(&selection)?;
            let (&[measure], &[metric]) = (measures.as_slice(), metrics.as_slice()) else {
                anyhow::bail!("pairwise needs exactly one --measure and one --metric");
            };

            let mut rng = ChaCha8Rng::seed_from_u64(cli.seed);
            let points: Vec<Vec<Point>> = (0..curves).map(|_| random_curve(&mut rng, &shape)).collect();
            let parsed = points
                .iter()
                .enumerate()
                .map(|(i, p)| Curve::from_points(p).with_context(|| format!("invalid curve {i}")))
                .collect::<Result<Vec<_>>>()?;

            let calculator = measure.with_metric(metric)?;
            let matrix = DistanceMatrix::pairwise(&calculator, &parsed)
                .context("pairwise computation failed")?;
            info!(n_curves = matrix.len(), %measure, %metric, "pairwise matrix complete");

            let output = PairwiseOutput {
                measure: measure.name(),
                metric: metric.to_string(),
                curves: points.iter().map(|p| to_rows(p)).collect(),
                matrix: matrix.to_rows(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
