// ABOUTME: Pure resize arithmetic over size vectors.
// ABOUTME: Moves extent across one boundary and redistributes totals within pane bounds.

use crate::{LayoutError, PaneConstraints, SIZE_EPSILON};

/// Move `delta` extent across `boundary` (between pane `boundary` and `boundary + 1`).
///
/// A positive delta grows the pane before the boundary and shrinks the one after it;
/// a negative delta does the reverse. The amount is clamped so both panes stay within
/// their bounds, and whatever is moved is conserved between the pair. A layout with
/// fewer than two panes has no boundaries and is returned unchanged.
pub fn solve(
    sizes: &[f32],
    constraints: &[PaneConstraints],
    boundary: usize,
    delta: f32,
) -> Result<Vec<f32>, LayoutError> {
    if sizes.len() != constraints.len() {
        return Err(LayoutError::LengthMismatch {
            sizes: sizes.len(),
            constraints: constraints.len(),
        });
    }
    if delta.is_nan() {
        return Err(LayoutError::InvalidDelta(delta));
    }

    let mut out = sizes.to_vec();
    if sizes.len() < 2 {
        return Ok(out);
    }

    let boundaries = sizes.len() - 1;
    if boundary >= boundaries {
        return Err(LayoutError::InvalidBoundary {
            index: boundary,
            boundaries,
        });
    }
    if delta == 0.0 {
        return Ok(out);
    }

    let (before, after) = (boundary, boundary + 1);
    let (cb, ca) = (&constraints[before], &constraints[after]);

    let moved = if delta > 0.0 {
        delta
            .min(cb.grow_room(sizes[before]))
            .min(ca.shrink_room(sizes[after]))
    } else {
        -(-delta)
            .min(cb.shrink_room(sizes[before]))
            .min(ca.grow_room(sizes[after]))
    };

    // Pinned boundary: nothing can move in the requested direction
    if moved == 0.0 {
        return Ok(out);
    }

    let pair = sizes[before] + sizes[after];
    out[before] = cb.clamp(sizes[before] + moved);
    out[after] = ca.clamp(pair - out[before]);
    Ok(out)
}

/// Bring `sizes` to `target_total` while keeping every pane inside its bounds.
///
/// Sizes are clamped first, then the shortfall or excess is shared evenly among
/// panes that still have room, repeating as panes hit their bounds. When the
/// bounds make the target unreachable the result stops at the nearest total.
pub fn fit(sizes: &[f32], constraints: &[PaneConstraints], target_total: f32) -> Vec<f32> {
    let mut out: Vec<f32> = sizes
        .iter()
        .zip(constraints)
        .map(|(size, c)| c.clamp(*size))
        .collect();
    let remaining = target_total - out.iter().sum::<f32>();
    let all: Vec<usize> = (0..out.len()).collect();
    distribute(&mut out, constraints, &all, remaining);
    out
}

/// Spread `remaining` over the `candidates` panes, returning what could not be placed
pub(crate) fn distribute(
    sizes: &mut [f32],
    constraints: &[PaneConstraints],
    candidates: &[usize],
    mut remaining: f32,
) -> f32 {
    // Each round either places everything or pins at least one pane
    for _ in 0..=candidates.len() {
        if remaining.abs() <= SIZE_EPSILON {
            break;
        }
        let open: Vec<usize> = candidates
            .iter()
            .copied()
            .filter(|&i| {
                let room = if remaining > 0.0 {
                    constraints[i].grow_room(sizes[i])
                } else {
                    constraints[i].shrink_room(sizes[i])
                };
                room > SIZE_EPSILON
            })
            .collect();
        if open.is_empty() {
            break;
        }

        let share = remaining / open.len() as f32;
        for i in open {
            let previous = sizes[i];
            sizes[i] = constraints[i].clamp(previous + share);
            remaining -= sizes[i] - previous;
        }
    }
    remaining
}
