use std::path::PathBuf;

use anyhow::Result;
use aoer_sketch_rs::prelude::*;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Renders the classic sketchy test card to an SVG.
#[derive(Parser, Debug)]
struct Args {
    /// TTF/OTF font for the lettering. Skipped if not given.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Sketch state (segment_size, shake) as RON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed. Picks one if not given.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value = "hello_sketch.svg")]
    out: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let args = Args::parse();

    let state = match &args.config {
        Some(path) => SketchState::from_file(path)?,
        None => SketchState::default(),
    };
    let rng = match args.seed {
        Some(seed) => SeededRandom::new(seed),
        None => SeededRandom::from_entropy(),
    };
    tracing::info!(seed = rng.seed(), ?state, "Rendering");

    let mut ctx = PlotContext::new();
    if let Some(path) = &args.font {
        let mut typography = Typography::from_file(path)?;
        typography.size(40.0);
        ctx.typography(&typography);
    }

    let mut s = Sketch::with_state(&mut ctx, rng, state);
    s.fill_circle(400.0, 400.0, 300.0)?;

    s.set_line_width(0.5).set_stroke_color("white");
    if args.font.is_some() {
        s.draw_string("Hello world", 280.0, 640.0)?;
    }

    let r = 10.0;
    let num = 3;
    s.state.segment_size = 40.0;
    s.stroke_multi_rect(250.0, 350.0, 200.0, 200.0, r, num)?;
    s.stroke_multi_rect(350.0, 250.0, 200.0, 200.0, r, num)?;
    s.stroke_multi_line(250.0, 350.0, 350.0, 250.0, r, num)?;
    s.stroke_multi_line(450.0, 350.0, 550.0, 250.0, r, num)?;
    s.stroke_multi_line(450.0, 550.0, 550.0, 450.0, r, num)?;
    s.stroke_multi_line(250.0, 550.0, 350.0, 450.0, r, num)?;

    s.state.segment_size = 10.0;
    for (x, y, fill) in [
        (10.0, 10.0, "#800000"),
        (690.0, 10.0, "#000080"),
        (690.0, 690.0, "#008000"),
        (10.0, 690.0, "#800080"),
    ] {
        s.set_fill_color(fill);
        s.fill_rectangle(x, y, 100.0, 100.0)?;
    }
    drop(s);

    let svg = ctx.to_svg(800.0, 800.0)?;
    svg::save(&args.out, &svg)?;
    tracing::info!(out = %args.out.display(), operations = ctx.operations().len(), "Saved");
    Ok(())
}
