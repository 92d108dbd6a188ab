//! Lane allocation for new enemies

use rand::Rng;
use rand::seq::IndexedRandom;

/// Pick a lane in `[0, lane_count)` not in `occupied`, uniformly among the
/// free ones. Returns `None` when every lane is taken.
pub fn pick_free_lane<R>(
    occupied: impl IntoIterator<Item = usize>,
    lane_count: usize,
    rng: &mut R,
) -> Option<usize>
where
    R: Rng + ?Sized,
{
    let mut taken = vec![false; lane_count];
    for lane in occupied {
        if let Some(slot) = taken.get_mut(lane) {
            *slot = true;
        }
    }

    let free: Vec<usize> = (0..lane_count).filter(|&lane| !taken[lane]).collect();
    free.choose(rng).copied()
}
