use std::time::Duration;

use spinwheel::{SpinConfig, SpinController};
use tokio::sync::mpsc;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let spins: usize = std::env::args()
        .nth(1)
        .and_then(|n| n.parse().ok())
        .unwrap_or(3);

    let config = SpinConfig {
        spin_duration_ms: 1500,
        ..SpinConfig::default()
    };
    let (tx, mut rx) = mpsc::unbounded_channel();
    let wheel = SpinController::with_config(8, config, None, move |index| {
        let _ = tx.send(index);
    })
    .expect("Failed to create controller");

    for _ in 0..spins {
        wheel.start_spin();
        let snapshot = wheel.snapshot();
        println!(
            "spinning {} -> {} over {:?}",
            snapshot.current_rotation,
            snapshot.target_rotation,
            snapshot
                .transition()
                .map(|t| t.duration)
                .unwrap_or(Duration::ZERO)
        );
        match rx.recv().await {
            Some(index) => println!("landed on segment {index} at {}", wheel.current_rotation()),
            None => break,
        }
        wheel.reset();
    }
}
