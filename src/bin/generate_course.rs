//! Course generator binary — generates a course from a seed and prints it.
//!
//! Usage: cargo run --release --bin generate_course -- [OPTIONS]
//!
//! Options:
//!   --width <W>       Board width in cells (default: 25)
//!   --height <H>      Board height in cells (default: 15)
//!   --seed <SEED>     Random seed (default: 12345)
//!   --margin-x <M>    Tee/hole margin from the left/right edges (default: 1)
//!   --margin-y <M>    Tee/hole margin from the top/bottom edges (default: 1)
//!   --json <PATH>     Also write the course as a JSON manifest to PATH

use std::path::PathBuf;

use serde_json::json;

use coursegen::core::rng::GameRng;
use coursegen::terrain::{CellKind, Course, CourseParams};

fn main() {
    coursegen::core::logging::init();

    let args: Vec<String> = std::env::args().collect();
    let width = parse_usize_arg(&args, "--width").unwrap_or(25);
    let height = parse_usize_arg(&args, "--height").unwrap_or(15);
    let seed = parse_u64_arg(&args, "--seed").unwrap_or(12345);
    let margin_x = parse_i32_arg(&args, "--margin-x").unwrap_or(1);
    let margin_y = parse_i32_arg(&args, "--margin-y").unwrap_or(1);
    let json_path = parse_str_arg(&args, "--json").map(PathBuf::from);

    let params = CourseParams {
        width,
        height,
        edge_margin_x: margin_x,
        edge_margin_y: margin_y,
        ..Default::default()
    };

    let mut rng = GameRng::seed_from_u64(seed);
    let course = match Course::generate(&params, &mut rng) {
        Ok(course) => course,
        Err(e) => {
            eprintln!("Generation failed: {}", e);
            std::process::exit(1);
        }
    };

    println!("=== Coursegen ===");
    println!("Board: {}x{}", width, height);
    println!("Seed:  {}", seed);
    println!();
    print!("{}", course.render_ascii());
    println!();
    println!("Tee:  ({}, {})", course.tee().x, course.tee().y);
    println!("Hole: ({}, {})", course.hole().x, course.hole().y);

    let tally = |kind: CellKind| {
        course
            .layout()
            .cells()
            .iter()
            .filter(|&&cell| cell == kind)
            .count()
    };
    println!(
        "Cells: {} fairway, {} rough, {} water, {} sand, {} tree, {} rock",
        tally(CellKind::Fairway),
        tally(CellKind::Rough),
        tally(CellKind::Water),
        tally(CellKind::Sand),
        tally(CellKind::Tree),
        tally(CellKind::Rock),
    );

    if let Some(path) = json_path {
        let manifest = json!({
            "seed": seed,
            "width": width,
            "height": height,
            "tee": [course.tee().x, course.tee().y],
            "hole": [course.hole().x, course.hole().y],
            "layout": course.layout(),
        });
        std::fs::write(
            &path,
            serde_json::to_string_pretty(&manifest).expect("Failed to serialize course"),
        )
        .expect("Failed to write course JSON");
        println!("Wrote {}", path.display());
    }
}

fn parse_usize_arg(args: &[String], flag: &str) -> Option<usize> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_u64_arg(args: &[String], flag: &str) -> Option<u64> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_i32_arg(args: &[String], flag: &str) -> Option<i32> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.clone())
}
