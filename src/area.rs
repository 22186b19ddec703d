//! C1 — area kernel: corridor-spread cost for a single floor, single parity
//! side. Ported from `original_source/grasp/allocation.py::area_side`.

/// Given the distinct corridors touched on one (floor, parity) side, return
/// the non-negative corridor-spread contribution.
///
/// Quantities are accepted for call-site convenience (callers hold
/// `(floor, corridor, qty)` triples) but do not affect the result — they are
/// an input artifact, per spec.md §4.1.
pub fn area_side(corridors: &[(i64, i64, u64)]) -> u64 {
    let mut distinct: Vec<i64> = corridors.iter().map(|&(_, corridor, _)| corridor).collect();
    distinct.sort_unstable();
    distinct.dedup();

    let Some(&lo) = distinct.first() else {
        return 0;
    };
    let hi = *distinct.last().unwrap();
    let n = distinct.len() as i64;
    let ideal = (hi - lo) / 2 + 1;

    if n >= ideal {
        n as u64
    } else {
        (hi - lo) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_zero() {
        assert_eq!(area_side(&[]), 0);
    }

    #[test]
    fn single_corridor_is_one() {
        assert_eq!(area_side(&[(1, 3, 5)]), 1);
    }

    #[test]
    fn dense_pair_returns_count() {
        // corridors {3, 5}: ideal = (5-3)/2 + 1 = 2, n = 2 >= ideal -> 2
        assert_eq!(area_side(&[(1, 3, 3), (1, 5, 2)]), 2);
    }

    #[test]
    fn sparse_pair_returns_span() {
        // corridors {1, 9}: ideal = (9-1)/2 + 1 = 5, n = 2 < ideal -> span 8
        assert_eq!(area_side(&[(1, 1, 1), (1, 9, 1)]), 8);
    }

    #[test]
    fn duplicate_corridors_count_once() {
        assert_eq!(area_side(&[(1, 4, 1), (1, 4, 9), (1, 6, 1)]), 2);
    }

    #[test]
    fn quantities_do_not_affect_result() {
        let a = area_side(&[(1, 2, 1), (1, 4, 1)]);
        let b = area_side(&[(1, 2, 1000), (1, 4, 1)]);
        assert_eq!(a, b);
    }
}
