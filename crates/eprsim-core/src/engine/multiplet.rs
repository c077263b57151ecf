//! Hyperfine stick-spectrum enumeration.
//!
//! Each nucleus entry contributes a site pattern: `2I + 1` equally weighted lines spaced
//! by the coupling, self-convolved once per equivalent nucleus. The radical's stick
//! spectrum is the convolution of all site patterns, taken in `nucs` order, with lines
//! at coincident positions merged. Weights always sum to one.

use super::config::SynthesisConfig;
use super::error::SimulationError;
use super::validation::{equivalent_count, spin_steps};
use crate::core::models::nucleus::Nucleus;
use crate::core::models::radical::Radical;
use itertools::iproduct;
use tracing::trace;

/// A single line of a stick spectrum, positioned relative to the radical's centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stick {
    /// Field offset from the centre.
    pub offset: f64,
    /// Relative weight of the line.
    pub intensity: f64,
}

/// Relative weights of the `count * two_i + 1` lines produced by `count` equivalent
/// nuclei with `2I = two_i`. Entry `k` sits at `(k - count * I) * hpf`.
pub fn equivalent_pattern(two_i: u32, count: u32) -> Vec<f64> {
    let width = two_i as usize + 1;
    let share = 1.0 / width as f64;
    let mut weights = vec![1.0];
    for _ in 0..count {
        let mut next = vec![0.0; weights.len() + width - 1];
        for (k, &weight) in weights.iter().enumerate() {
            for slot in &mut next[k..k + width] {
                *slot += weight * share;
            }
        }
        weights = next;
    }
    weights
}

fn site_pattern(two_i: u32, count: u32, hpf: f64) -> Vec<Stick> {
    let weights = equivalent_pattern(two_i, count);
    let half_span = 0.5 * (weights.len() - 1) as f64;
    weights
        .into_iter()
        .enumerate()
        .map(|(k, intensity)| Stick {
            offset: (k as f64 - half_span) * hpf,
            intensity,
        })
        .collect()
}

/// Sorts sticks by position and merges neighbours closer than `tolerance`.
pub fn collapse(mut sticks: Vec<Stick>, tolerance: f64) -> Vec<Stick> {
    sticks.sort_by(|a, b| a.offset.total_cmp(&b.offset));
    let mut merged: Vec<Stick> = Vec::with_capacity(sticks.len());
    for stick in sticks {
        match merged.last_mut() {
            Some(last) if (stick.offset - last.offset).abs() <= tolerance => {
                last.intensity += stick.intensity;
            }
            _ => merged.push(stick),
        }
    }
    merged
}

/// Checks spin and equivalence of `nucleus` and returns `(2I, count)`.
///
/// # Errors
///
/// Returns [`SimulationError::InvalidSpin`] or [`SimulationError::InvalidEquivalence`]
/// naming the radical and nucleus positions.
fn site_shape(
    radical_index: usize,
    nucleus_index: usize,
    nucleus: &Nucleus,
) -> Result<(u32, u32), SimulationError> {
    let two_i = spin_steps(nucleus.spin.val).ok_or(SimulationError::InvalidSpin {
        radical: radical_index,
        nucleus: nucleus_index,
        spin: nucleus.spin.val,
    })?;
    let count = equivalent_count(nucleus.eqs.val).ok_or(SimulationError::InvalidEquivalence {
        radical: radical_index,
        nucleus: nucleus_index,
        eqs: nucleus.eqs.val,
    })?;
    Ok((two_i, count))
}

/// Number of distinct positions in the pattern of `count` nuclei with `2I = two_i`.
fn site_line_count(two_i: u32, count: u32) -> usize {
    let lines = u64::from(count) * u64::from(two_i) + 1;
    usize::try_from(lines).unwrap_or(usize::MAX)
}

/// Enumerates the stick spectrum of `radical`, normalized to unit total intensity.
///
/// # Arguments
///
/// * `radical` - The radical whose nuclei split the line.
/// * `index` - The radical's position in its simulator, used in error reports.
/// * `config` - Supplies the merge tolerance and the line limit.
///
/// # Errors
///
/// Returns an error for a non half-integer spin or a non-integral equivalence count,
/// and [`SimulationError::TooManyLines`] as soon as the next nucleus would push the
/// line count past `config.max_lines`. The limit is checked before a site pattern is
/// built, so rejected radicals cost no more than their accepted prefix.
pub fn stick_spectrum(
    radical: &Radical,
    index: usize,
    config: &SynthesisConfig,
) -> Result<Vec<Stick>, SimulationError> {
    let mut sticks = vec![Stick {
        offset: 0.0,
        intensity: 1.0,
    }];

    for (n, nucleus) in radical.nucs.iter().enumerate() {
        let (two_i, count) = site_shape(index, n, nucleus)?;
        if sticks.len().saturating_mul(site_line_count(two_i, count)) > config.max_lines {
            return Err(SimulationError::TooManyLines {
                radical: index,
                limit: config.max_lines,
            });
        }
        let pattern = site_pattern(two_i, count, nucleus.hpf.val);
        let combined = iproduct!(&sticks, &pattern)
            .map(|(line, site)| Stick {
                offset: line.offset + site.offset,
                intensity: line.intensity * site.intensity,
            })
            .collect();
        sticks = collapse(combined, config.merge_tolerance);
        trace!(
            radical = index,
            nucleus = n,
            lines = sticks.len(),
            "Combined nucleus into stick spectrum"
        );
    }

    Ok(sticks)
}
