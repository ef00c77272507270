//! reslice CLI - align a 3D stack to the plane through three picked points.
//!
//! Logging goes to stderr; set `RUST_LOG=debug` to see the intermediate
//! normal and angles.

use clap::{Args, Parser, Subcommand, ValueEnum};
use reslice_core::{
    points, roi_csv, solve_from_points, Interpolation, Point3D, RotationAngles, RotationRequest,
};
use reslice_terminal::{Preview, SolveReport};
use std::io::stdout;
use std::path::{Path, PathBuf};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

/// Upper bound on each preview panel dimension, in characters
const MAX_PANEL_SIZE: usize = 1000;

#[derive(Parser)]
#[command(name = "reslice")]
#[command(about = "Compute the x/y rotation that aligns a 3D stack with a plane through three points")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the plane normal, rotation angles and TransformJ options.
    Solve(SolveArgs),

    /// Draw the picked triangle before and after rotation (illustrative only).
    ///
    /// The rotation is applied as x then y about the triangle's centroid. The
    /// resampler's own axis convention is not modelled, so the rotated panel
    /// need not come out face-on.
    Preview(PreviewArgs),

    /// Turn a bounding-box CSV export into ImageJ line ROI macro calls.
    Lines {
        /// CSV with a header row; columns 4-7 hold x, y, width, height.
        #[arg(long)]
        csv: PathBuf,
    },
}

#[derive(Debug, Clone, Args)]
struct PointArgs {
    /// File with one `x y z` (or `x,y,z`) point per line; the first three are used.
    #[arg(long, conflicts_with_all = ["p0", "p1", "p2"])]
    points: Option<PathBuf>,

    /// First point, `x,y,z`. The normal is (p1 - p0) x (p2 - p0).
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    p0: Option<Point3D>,

    /// Second point, `x,y,z`.
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    p1: Option<Point3D>,

    /// Third point, `x,y,z`.
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    p2: Option<Point3D>,
}

impl PointArgs {
    fn load(&self) -> CliResult<Vec<Point3D>> {
        if let Some(path) = &self.points {
            log::info!("Loading points: {}", path.display());
            let text = std::fs::read_to_string(path).map_err(|e| -> CliError {
                format!("Failed to read {}: {}", path.display(), e).into()
            })?;
            return Ok(points::parse_points(&text)?);
        }
        // Missing inline points are reported by the solver as too few points
        Ok([self.p0, self.p1, self.p2].into_iter().flatten().collect())
    }
}

fn parse_point(s: &str) -> Result<Point3D, String> {
    points::parse_point_arg(s).map_err(|e| e.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum InterpolationArg {
    Nearest,
    Linear,
    CubicConvolution,
    CubicBspline,
    CubicOmoms,
    QuinticBspline,
}

impl From<InterpolationArg> for Interpolation {
    fn from(arg: InterpolationArg) -> Self {
        match arg {
            InterpolationArg::Nearest => Interpolation::NearestNeighbor,
            InterpolationArg::Linear => Interpolation::Linear,
            InterpolationArg::CubicConvolution => Interpolation::CubicConvolution,
            InterpolationArg::CubicBspline => Interpolation::CubicBSpline,
            InterpolationArg::CubicOmoms => Interpolation::CubicOMoms,
            InterpolationArg::QuinticBspline => Interpolation::QuinticBSpline,
        }
    }
}

#[derive(Debug, Clone, Args)]
struct RotateArgs {
    /// Interpolation scheme requested from the resampler.
    #[arg(long, value_enum, default_value_t = InterpolationArg::QuinticBspline)]
    interpolation: InterpolationArg,

    /// Value for voxels rotated in from outside the stack.
    #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
    background: f64,

    /// Keep the original stack size instead of growing it to fit.
    #[arg(long)]
    no_adjust: bool,
}

impl RotateArgs {
    fn request(&self, angles: RotationAngles) -> RotationRequest {
        RotationRequest::new(angles)
            .with_interpolation(self.interpolation.into())
            .with_background(self.background)
            .with_adjust(!self.no_adjust)
    }
}

#[derive(Debug, Clone, Args)]
struct SolveArgs {
    #[command(flatten)]
    points: PointArgs,

    #[command(flatten)]
    rotate: RotateArgs,

    /// Print the result as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Args)]
struct PreviewArgs {
    #[command(flatten)]
    points: PointArgs,

    #[command(flatten)]
    rotate: RotateArgs,

    /// Width of each panel in characters.
    #[arg(long, default_value = "36")]
    width: usize,

    /// Height of each panel in characters.
    #[arg(long, default_value = "18")]
    height: usize,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Solve(args) => run_solve(&args),
        Commands::Preview(args) => run_preview(&args),
        Commands::Lines { csv } => run_lines(&csv),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

// ── solve ──────────────────────────────────────────────────────────────

fn run_solve(args: &SolveArgs) -> CliResult<()> {
    let points = args.points.load()?;
    let alignment = solve_from_points(&points)?;
    let request = args.rotate.request(alignment.rotation);
    let report = SolveReport::new(&alignment, &request);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.to_text());
    }
    Ok(())
}

// ── preview ────────────────────────────────────────────────────────────

fn run_preview(args: &PreviewArgs) -> CliResult<()> {
    if args.width == 0 || args.height == 0 {
        return Err("panel width and height must be positive".into());
    }
    if args.width > MAX_PANEL_SIZE || args.height > MAX_PANEL_SIZE {
        return Err(format!(
            "panel width and height must be at most {}, got {}x{}",
            MAX_PANEL_SIZE, args.width, args.height
        )
        .into());
    }
    let points = args.points.load()?;
    let alignment = solve_from_points(&points)?;
    let request = args.rotate.request(alignment.rotation);

    let picked = [points[0], points[1], points[2]];
    let preview = Preview::new(picked, &request, args.width, args.height);
    preview.render(&mut stdout())?;
    Ok(())
}

// ── lines ──────────────────────────────────────────────────────────────

fn run_lines(csv: &Path) -> CliResult<()> {
    log::info!("Loading ROI table: {}", csv.display());
    let text = std::fs::read_to_string(csv).map_err(|e| -> CliError {
        format!("Failed to read {}: {}", csv.display(), e).into()
    })?;
    let rois = roi_csv::parse_line_rois(&text)?;
    for roi in &rois {
        println!("{}", roi.to_macro());
    }
    log::info!("Wrote {} line ROIs", rois.len());
    Ok(())
}
