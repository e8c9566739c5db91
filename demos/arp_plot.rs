//! Plot out the arpeggiator stepping through a few patterns on its internal clock
//!
//! Look in /images/ for the resulting plot.
//!
//! Requires plotters lib: https://docs.rs/plotters/latest/plotters/.

use arp_core::{
    arpeggiator::{Arpeggiator, Inputs},
    clock::TempoSource,
    config::ArpConfig,
};
use plotters::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    const NUM_MS_TO_PLOT: u32 = 4_000;

    let mut config = ArpConfig::new(60);
    config.tempo_source = TempoSource::Fixed(90.0);
    let mut arp = Arpeggiator::seeded(config, 1).map_err(|e| e.to_string())?;

    // walk the pattern selector through the table, the root note goes up a fourth halfway through
    let mut pitch = Vec::new();
    let mut gate = Vec::new();
    let mut led = Vec::new();
    for t in 0..NUM_MS_TO_PLOT {
        let inputs = Inputs {
            root_cv: if t < NUM_MS_TO_PLOT / 2 { 0.0 } else { 5. / 12. / 5. },
            selector: t as f32 / NUM_MS_TO_PLOT as f32,
            internal_clock: true,
            ..Inputs::default()
        };
        let out = arp.tick(t, &inputs);

        let secs = t as f32 / 1_000.0;
        pitch.push((secs, out.pitch_volts));
        gate.push((secs, if out.gate { 1.0 } else { 0.0 }));
        led.push((secs, out.activity_volts));
    }

    std::fs::create_dir_all("images")?;
    let root = BitMapBackend::new("images/arp_example_plot.png", (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled("Arpeggiator", ("sans-serif", 40))?;

    let sub_areas = root.split_evenly((3, 1));

    let details = [
        ("Pitch", &pitch, RED, 5.1_f32),
        ("Gate", &gate, BLUE, 1.1_f32),
        ("Activity LED", &led, GREEN, 5.1_f32),
    ];

    for ((name, data, color, y_max), area) in details.iter().zip(sub_areas.iter()) {
        let mut chart = ChartBuilder::on(area)
            .caption(*name, ("Arial", 15).into_font())
            .x_label_area_size(30)
            .y_label_area_size(40)
            .build_cartesian_2d(0f32..NUM_MS_TO_PLOT as f32 / 1_000.0, -0.1f32..*y_max)?;

        chart
            .configure_mesh()
            .x_desc("Time (seconds)")
            .y_desc("Volts")
            .draw()?;

        chart.draw_series(LineSeries::new(data.iter().copied(), *color))?;
    }

    root.present()?;

    Ok(())
}
