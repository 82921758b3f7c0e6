// Synthetic demo records, one per kind. Signal recipes follow the
// simulated monitor data the product demos with: alpha-band sine plus
// noise for EEG, composite ECG/ABP shapes for vitals waveforms, and slow
// sinusoidal HR/SpO2/MAP series for vitals numerics.

use std::f64::consts::PI;

use rand::Rng;

use crate::error::Result;
use crate::types::{ChannelRecord, ChannelSeries, RecordKind};

const EEG_DURATION_S: f64 = 60.0;
const EEG_SAMPLE_RATE: f64 = 200.0;
const WAVE_DURATION_S: f64 = 30.0;
const WAVE_SAMPLE_RATE: f64 = 125.0;
const NUMERIC_DURATION_S: f64 = 300.0;
const NUMERIC_INTERVAL_S: f64 = 0.5;

/// Build the simulated record for a kind.
pub fn demo_record(kind: RecordKind) -> Result<ChannelRecord> {
    match kind {
        RecordKind::Eeg => demo_eeg(),
        RecordKind::VitalsWaves => demo_vitals_waves(),
        RecordKind::VitalsNumerics => demo_vitals_numerics(),
    }
}

fn demo_eeg() -> Result<ChannelRecord> {
    let mut rng = rand::thread_rng();
    let n = (EEG_DURATION_S * EEG_SAMPLE_RATE) as usize;
    let times: Vec<f64> = (0..n).map(|i| i as f64 / EEG_SAMPLE_RATE).collect();

    // Alpha-band rhythms at slightly different frequencies per electrode.
    let montage: [(&str, f64); 4] = [("Fp1", 8.0), ("Fp2", 9.0), ("O1", 10.0), ("O2", 11.0)];
    let channels = montage
        .iter()
        .map(|&(label, freq)| {
            let values: Vec<f64> = times
                .iter()
                .map(|t| (2.0 * PI * freq * t).sin() + 0.3 * rng.gen_range(-1.0..1.0))
                .collect();
            ChannelSeries::new(label, times.clone(), values).with_sample_rate(EEG_SAMPLE_RATE)
        })
        .collect();

    ChannelRecord::new(RecordKind::Eeg, channels)
}

fn demo_vitals_waves() -> Result<ChannelRecord> {
    let mut rng = rand::thread_rng();
    let n = (WAVE_DURATION_S * WAVE_SAMPLE_RATE) as usize;
    let times: Vec<f64> = (0..n).map(|i| i as f64 / WAVE_SAMPLE_RATE).collect();

    let ecg: Vec<f64> = times
        .iter()
        .map(|t| {
            1.5 * (2.0 * PI * 1.3 * t).sin()
                + 0.5 * (2.0 * PI * 10.0 * t).sin()
                + 0.1 * rng.gen_range(-1.0..1.0)
        })
        .collect();
    let abp: Vec<f64> = times
        .iter()
        .map(|t| 80.0 + 20.0 * (2.0 * PI * 1.2 * t).sin() + 5.0 * rng.gen_range(-1.0..1.0))
        .collect();

    ChannelRecord::new(
        RecordKind::VitalsWaves,
        vec![
            ChannelSeries::new("ECG", times.clone(), ecg).with_sample_rate(WAVE_SAMPLE_RATE),
            ChannelSeries::new("ABP", times, abp).with_sample_rate(WAVE_SAMPLE_RATE),
        ],
    )
}

fn demo_vitals_numerics() -> Result<ChannelRecord> {
    let mut rng = rand::thread_rng();
    let n = (NUMERIC_DURATION_S / NUMERIC_INTERVAL_S) as usize;
    let times: Vec<f64> = (0..n).map(|i| i as f64 * NUMERIC_INTERVAL_S).collect();

    let hr: Vec<f64> = times
        .iter()
        .map(|t| 70.0 + 5.0 * (2.0 * PI * t / 30.0).sin() + rng.gen_range(-1.0..1.0))
        .collect();
    let spo2: Vec<f64> = times
        .iter()
        .map(|t| 97.0 + 0.5 * (2.0 * PI * t / 45.0).sin() + 0.3 * rng.gen_range(-1.0..1.0))
        .collect();
    let map: Vec<f64> = times
        .iter()
        .map(|t| 90.0 + 8.0 * (2.0 * PI * t / 40.0).sin() + rng.gen_range(-1.0..1.0))
        .collect();

    ChannelRecord::new(
        RecordKind::VitalsNumerics,
        vec![
            ChannelSeries::new("HR", times.clone(), hr),
            ChannelSeries::new("SpO2", times.clone(), spo2),
            ChannelSeries::new("MAP", times, map),
        ],
    )
}
