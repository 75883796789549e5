//! Basic example demonstrating anomaly detection
//!
//! Run with: cargo run --example basic -p anomaly

use anomaly::{detect, generate, DataType, DetectionConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== anomaly Basic Examples ===\n");

    let mut rng = StdRng::seed_from_u64(42);
    let series = generate(DataType::Affiliations, 30, &mut rng)?;
    println!(
        "Generated {} days of {} (reference {})\n",
        series.len(),
        DataType::Affiliations,
        series.reference_value()
    );

    let configs = [
        DetectionConfig::iqr(1.5)?,
        DetectionConfig::std_dev(3.0)?,
        DetectionConfig::percentile(5.0, 95.0)?,
    ];

    for (i, config) in configs.iter().enumerate() {
        let result = detect(&series, config)?;
        println!("{}. {}", i + 1, config);
        println!(
            "   Bounds: [{:.1}, {:.1}]",
            result.bounds.lower, result.bounds.upper
        );
        println!("   Anomalous days: {:?}", result.anomaly_days());
        println!("   {}\n", result.recommendation);
    }

    println!("=== Examples Complete ===");
    Ok(())
}
