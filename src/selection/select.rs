use std::collections::HashMap;

use ordered_float::OrderedFloat;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::core::error::OError;
use crate::core::individual::Population;
use crate::core::objective;
use crate::selection::crowding::crowding_distance;
use crate::selection::dag::DominationDag;
use crate::selection::heap::IndexedMinHeap;
use crate::selection::linked_list::PositionList;

/// Which environmental selection algorithm to run once the non-dominated
/// fronts have been computed.
///
/// Both strategies are accepted solutions to the same postcondition (select
/// exactly `target_size` individuals, favouring low rank then high crowding
/// distance); they differ only in how the "last front" is trimmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionStrategy {
    /// Sort the last (partially admitted) front by crowding distance,
    /// descending, and truncate. Simpler, `O(n log n)`.
    Simple,
    /// Extract-and-update via an indexed heap and a doubly-linked position
    /// list. Recomputes crowding distance incrementally as individuals are
    /// removed, so the last front's geometry is kept faithful even as it
    /// shrinks. The default.
    #[default]
    IterativeTrim,
}

/// Assign non-domination ranks and compute the fronts for every individual
/// in `population` via pairwise Pareto comparison and a DAG peel.
pub fn non_dominated_sort(population: &mut Population) -> Result<Vec<Vec<usize>>, OError> {
    let n = population.len();
    let mut dag = DominationDag::new(n);
    for i in 0..n {
        for j in (i + 1)..n {
            let a = population.get(i).objectives()?;
            let b = population.get(j).objectives()?;
            match objective::compare(a, b)? {
                // `i` dominates `j`: an edge points from dominator to dominated.
                objective::ParetoOrdering::Greater => dag.add_edge(i, j)?,
                // `j` dominates `i`.
                objective::ParetoOrdering::Less => dag.add_edge(j, i)?,
                objective::ParetoOrdering::Equivalent | objective::ParetoOrdering::Unordered => {}
            }
        }
    }
    let fronts = dag.pop_and_get_fronts()?;
    for (rank, front) in fronts.iter().enumerate() {
        for &idx in front {
            population.get_mut(idx).set_rank(rank);
        }
    }
    Ok(fronts)
}

/// Draw one random tie-break rank per individual in `front`. Composing this
/// with the crowding-distance score gives every sort/heap comparison a total
/// order without ever falling back to index order, which would silently
/// favour whichever individual happened to land first in the population.
fn random_tie_ranks(front: &[usize], rng: &mut ChaCha8Rng) -> HashMap<usize, u64> {
    front.iter().map(|&idx| (idx, rng.gen::<u64>())).collect()
}

/// Build the next generation of size `target_size` from `population` and its
/// precomputed `fronts`, admitting whole fronts by rank and trimming the
/// first front that does not fit entirely. The crowding distance of every
/// selected individual (whether admitted whole or surviving a trim) is
/// written back onto the returned population.
pub fn select(
    population: &Population,
    fronts: &[Vec<usize>],
    target_size: usize,
    strategy: SelectionStrategy,
    rng: &mut ChaCha8Rng,
) -> Result<Population, OError> {
    let mut selected_indices: Vec<usize> = Vec::with_capacity(target_size);
    let mut distances: HashMap<usize, f64> = HashMap::with_capacity(target_size);
    let mut front_cursor = 0;

    while front_cursor < fronts.len() {
        let front = &fronts[front_cursor];
        if selected_indices.len() + front.len() > target_size {
            break;
        }
        distances.extend(crowding_distance(population, front)?);
        selected_indices.extend_from_slice(front);
        front_cursor += 1;
    }

    if selected_indices.len() != target_size {
        let remaining = target_size - selected_indices.len();
        let last_front = &fronts[front_cursor];
        let trimmed = match strategy {
            SelectionStrategy::Simple => trim_simple(population, last_front, remaining, rng)?,
            SelectionStrategy::IterativeTrim => {
                trim_iterative(population, last_front, remaining, rng)?
            }
        };
        for (idx, distance) in trimmed {
            selected_indices.push(idx);
            distances.insert(idx, distance);
        }
    }

    if selected_indices.len() != target_size {
        return Err(OError::precondition(
            "selection",
            "selected population size does not match the target size",
        ));
    }

    let mut result = population.select_by_index(&selected_indices);
    for (individual, &idx) in result.individuals_mut().iter_mut().zip(&selected_indices) {
        individual.set_crowding_distance(distances[&idx]);
    }
    Ok(result)
}

/// Sort the last front by `(crowding distance, random tie rank)`, descending,
/// and keep the top `remaining`.
fn trim_simple(
    population: &Population,
    front: &[usize],
    remaining: usize,
    rng: &mut ChaCha8Rng,
) -> Result<Vec<(usize, f64)>, OError> {
    let scores = crowding_distance(population, front)?;
    let tie_ranks = random_tie_ranks(front, rng);
    let key = |idx: &usize| (OrderedFloat(scores[idx]), tie_ranks[idx]);

    let mut sorted = front.to_vec();
    sorted.sort_by(|a, b| key(b).cmp(&key(a)));
    sorted.truncate(remaining);
    Ok(sorted.into_iter().map(|idx| (idx, scores[&idx])).collect())
}

/// The heap/linked-list incremental trim: extract the lowest-crowding
/// individual one at a time, recomputing at most its two former neighbors'
/// distance (unless a neighbor's distance is already infinite, in which case
/// it never needs updating again). Ties are broken by a random rank drawn
/// once per front and held fixed for the life of the heap.
fn trim_iterative(
    population: &Population,
    front: &[usize],
    remaining: usize,
    rng: &mut ChaCha8Rng,
) -> Result<Vec<(usize, f64)>, OError> {
    let n = front.len();
    if remaining >= n {
        let scores = crowding_distance(population, front)?;
        return Ok(front.iter().map(|&idx| (idx, scores[&idx])).collect());
    }

    let mut scores = crowding_distance(population, front)?;
    let tie_ranks = random_tie_ranks(front, rng);
    let key = |idx: usize, scores: &HashMap<usize, f64>| (OrderedFloat(scores[&idx]), tie_ranks[&idx]);

    let mut sorted_front = front.to_vec();
    sorted_front.sort_by(|&a, &b| key(b, &scores).cmp(&key(a, &scores)));

    let capacity = population.len();
    let mut positions = PositionList::new(&sorted_front, capacity);

    let mut heap = IndexedMinHeap::new();
    for &idx in front {
        heap.push(key(idx, &scores), idx)?;
    }

    let max_key = *sorted_front
        .iter()
        .map(|idx| &scores[idx])
        .filter(|v| v.is_finite())
        .fold(&f64::NEG_INFINITY, |a, b| if a > b { a } else { b });
    let min_key = *sorted_front
        .iter()
        .map(|idx| &scores[idx])
        .filter(|v| v.is_finite())
        .fold(&f64::INFINITY, |a, b| if a < b { a } else { b });
    let span = (max_key - min_key).max(1e-8);

    let to_remove = n - remaining;
    for _ in 0..to_remove {
        let (removed, _) = heap.extract_min()?;
        let has_prev = positions.has_prev(removed)?;
        let has_next = positions.has_next(removed)?;
        let prev = if has_prev { Some(positions.prev(removed)?) } else { None };
        let next = if has_next { Some(positions.next(removed)?) } else { None };
        positions.remove(removed)?;

        if let (Some(p), Some(nx)) = (prev, next) {
            if scores[&p].is_finite() && positions.has_prev(p)? {
                let pp = positions.prev(p)?;
                let pn = positions.next(p)?;
                let dist = (scores[&pn] - scores[&pp]).abs() / span;
                *scores.get_mut(&p).unwrap() = dist;
                let new_primary = OrderedFloat(dist).min(heap.get_key(p)?.0);
                heap.decrease_key(p, (new_primary, tie_ranks[&p]))?;
            }
            if scores[&nx].is_finite() && positions.has_next(nx)? {
                let np = positions.prev(nx)?;
                let nn = positions.next(nx)?;
                let dist = (scores[&nn] - scores[&np]).abs() / span;
                *scores.get_mut(&nx).unwrap() = dist;
                let new_primary = OrderedFloat(dist).min(heap.get_key(nx)?.0);
                heap.decrease_key(nx, (new_primary, tie_ranks[&nx]))?;
            }
        }
    }

    let mut kept = Vec::with_capacity(remaining);
    while !heap.is_empty() {
        let (idx, (score, _)) = heap.extract_min()?;
        kept.push((idx, score.0));
    }
    Ok(kept)
}
