//! Integer sampling on top of a [`RandomSource`].

use crate::random_source::RandomSource;

/// Draw a single integer uniformly from `min..=max`.
pub fn sample<R>(rng: &mut R, min: usize, max: usize) -> Result<usize, SamplingError>
where
    R: RandomSource + ?Sized,
{
    if min > max {
        return Err(SamplingError::InvalidRange { min, max });
    }
    let n = rng.next_in_range(min, max);
    log::trace!("sampled {n} from {min}..={max}");
    Ok(n)
}

/// Draw `count` pairwise-distinct integers from `min..=max`, every subset of that size being
/// equally likely.
///
/// The values are returned in the order they were drawn, which is itself uniformly random; when
/// `count` equals the size of the range the result is a uniform permutation of the range.
///
/// Each draw picks an index among the candidates not yet taken, counted in ascending order, so
/// this always takes exactly `count` draws. Only the taken values are stored, never the range.
///
/// Asking for no values always succeeds, even from an empty range such as `1..=0`.
pub fn sample_unique<R>(
    rng: &mut R,
    count: usize,
    min: usize,
    max: usize,
) -> Result<Vec<usize>, SamplingError>
where
    R: RandomSource + ?Sized,
{
    if count == 0 {
        return Ok(Vec::new());
    }
    if min > max {
        return Err(SamplingError::InvalidRange { min, max });
    }
    // `None` means the range is all of `usize`, which no `count` can exceed.
    if let Some(available) = (max - min).checked_add(1) {
        if count > available {
            return Err(SamplingError::InsufficientRange {
                count,
                min,
                max,
            });
        }
    }

    let mut drawn = Vec::with_capacity(count);
    // Sorted ascending.
    let mut taken: Vec<usize> = Vec::with_capacity(count);
    for i in 0..count {
        let idx = sample(rng, 0, (max - min) - i)?;
        let mut value = min + idx;
        for &t in &taken {
            if t <= value {
                value += 1;
            } else {
                break;
            }
        }
        let pos = taken.binary_search(&value).unwrap_or_else(|pos| pos);
        taken.insert(pos, value);
        drawn.push(value);
    }
    Ok(drawn)
}

/// A sampler was asked for something impossible. These are bugs in the caller's arithmetic, not
/// bad input.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum SamplingError {
    #[error("invalid range: the minimum ({min}) exceeds the maximum ({max})")]
    InvalidRange { min: usize, max: usize },
    #[error("cannot draw {count} distinct values from the range {min}..={max}")]
    InsufficientRange { count: usize, min: usize, max: usize },
}
