//! Input sequences: parsed from the command line or generated.

use anyhow::{Context, Result, bail};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::io::config::{InputConfig, MAX_INPUT_SIZE};

/// Parse a comma-separated list such as `5, 3, -1`.
///
/// A blank string is the empty sequence.
pub fn parse_values(text: &str) -> Result<Vec<i64>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    let values = text
        .split(',')
        .enumerate()
        .map(|(position, item)| {
            let item = item.trim();
            item.parse::<i64>()
                .with_context(|| format!("parse value #{} ({item:?})", position + 1))
        })
        .collect::<Result<Vec<_>>>()?;
    if values.len() > MAX_INPUT_SIZE {
        bail!("{} values given, at most {MAX_INPUT_SIZE} allowed", values.len());
    }
    Ok(values)
}

/// Build an input from `cfg`, reproducibly when `seed` is set.
pub fn generate(cfg: &InputConfig, seed: Option<u64>) -> Vec<i64> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    if cfg.uniform {
        let mut values = evenly_spaced(cfg.size, cfg.min_value, cfg.max_value);
        values.shuffle(&mut rng);
        values
    } else {
        (0..cfg.size)
            .map(|_| rng.gen_range(cfg.min_value..=cfg.max_value))
            .collect()
    }
}

/// `size` values from `min` to `max` inclusive with even spacing.
fn evenly_spaced(size: usize, min: i64, max: i64) -> Vec<i64> {
    if size <= 1 {
        return vec![min; size];
    }
    let span = i128::from(max) - i128::from(min);
    let steps = (size - 1) as i128;
    (0..size)
        .map(|i| {
            let offset = span * i as i128 / steps;
            // min + offset never leaves min..=max.
            i64::try_from(i128::from(min) + offset).unwrap_or(max)
        })
        .collect()
}
