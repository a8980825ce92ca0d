//! Render a wheel to stdout. Pass a theme style map (JSON) as the first
//! argument, and optionally a rotation in degrees as the second.

use spinwheel::render::segments::{SegmentContent, SegmentRequest, compute_segments_with};
use spinwheel::{Center, StyleMap, render_wheel_svg};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let styles: StyleMap = args
        .next()
        .map(|path| {
            std::fs::read_to_string(&path).expect("Failed to read file")
        })
        .map(|json| {
            serde_json::from_str(&json).expect("Failed to parse style map")
        })
        .unwrap_or_else(|| {
            serde_json::from_str(
                r##"{
                    "jackpot": {"outer": {"fill": {"type": "solid", "color": "#f1c40f"}}},
                    "nowin": {"outer": {"fill": {"type": "solid", "color": "#7f8c8d"}}},
                    "odd": {"outer": {"fill": {"type": "solid", "color": "#c0392b"}}},
                    "even": {"outer": {"fill": {"type": "solid", "color": "#2980b9"}}}
                }"##,
            )
            .expect("built-in theme")
        });
    let rotation = args
        .next()
        .and_then(|r| r.parse::<f64>().ok())
        .unwrap_or(0.0);

    let labels = [
        "JACKPOT",
        "Try again",
        "10",
        "20",
        "50",
        "Free spin",
        "5",
        "100",
    ];
    let contents: Vec<_> = labels
        .into_iter()
        .map(SegmentContent::text)
        .collect();
    let center = Center::new(200.0, 200.0, 180.0);
    let request = SegmentRequest::new(8, &styles, center, 1.0)
        .with_contents(&contents);

    let document = compute_segments_with(&request)
        .and_then(|segs| render_wheel_svg(&segs, center, 1.0, rotation));
    match document {
        Ok(svg) => println!("{}", svg),
        Err(e) => eprintln!("Error: {}", e),
    }
}
