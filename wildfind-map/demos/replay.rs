//! Replays recorded detections into a headless map view and loads the heatmap for their extent.
//!
//! ```sh
//! cargo run --example replay -- demos/detections.csv http://localhost:12015
//! ```

use anyhow::Context;
use serde::Deserialize;
use wildfind_map::layer::HeatmapBounds;
use wildfind_map::loader::HttpImageLoader;
use wildfind_map::wildfind_types::geo::GeoPoint;
use wildfind_map::{LoggingBridge, MapConfig, MapViewBuilder};

#[derive(Debug, Deserialize)]
struct Detection {
    frequency: u64,
    rate: f64,
    level: f64,
    lon: f64,
    lat: f64,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .unwrap_or_else(|| "wildfind-map/demos/detections.csv".to_string());
    let config = MapConfig::default();
    let base_url = args
        .next()
        .unwrap_or_else(|| config.heatmap.base_url.clone());

    let mut map = MapViewBuilder::default()
        .with_config(config)
        .with_bridge(LoggingBridge {})
        .build()?;
    map.initialize()?;

    let mut reader = csv::Reader::from_path(&path).with_context(|| format!("opening {path}"))?;
    for detection in reader.deserialize() {
        let detection: Detection = detection?;
        map.add_location(
            detection.frequency,
            detection.rate,
            detection.level,
            detection.lon,
            detection.lat,
        )?;
        map.set_harrier(detection.lon, detection.lat)?;
    }
    map.follow();

    let positions: Vec<_> = map.locations().iter().map(|l| l.position()).collect();
    let Some(first) = positions.first() else {
        println!("No detections in {path}");
        return Ok(());
    };
    let bounds = positions.iter().fold(
        HeatmapBounds::new(first.lat(), first.lat(), first.lon(), first.lon()),
        |b, p| {
            HeatmapBounds::new(
                b.north.max(p.lat()),
                b.south.min(p.lat()),
                b.east.max(p.lon()),
                b.west.min(p.lon()),
            )
        },
    );

    let loader = HttpImageLoader::new(base_url)?;
    let outcome = map.load_heatmap(bounds, &loader).await?;

    let (center, zoom) = map.get_pos();
    println!("{} locations, track of {} points", map.locations().len(), map.track().len());
    println!("View center {:.1}, {:.1} at zoom {zoom:.2}", center.x, center.y);
    println!("Scale: {}", map.scale_line().label);
    println!("Heatmap: {outcome:?}");

    Ok(())
}
