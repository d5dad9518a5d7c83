use std::collections::HashMap;

use crate::core::error::OError;
use crate::core::individual::Population;

/// Guards against division by zero when every individual in a front has the
/// same value for some objective (a constant axis contributes no spread, but
/// naively dividing by a zero range would produce `NaN`/`inf` instead of the
/// `0` contribution the axis should make to every finite interior point).
const EPSILON: f64 = 1e-8;

/// Compute the crowding distance of every individual named in `front`
/// (population indices, not required to be sorted), returning a map from
/// index to distance.
///
/// Boundary individuals (smallest or largest value on any objective) get a
/// distance of `f64::INFINITY`, ensuring they always survive trimming.
pub fn crowding_distance(
    population: &Population,
    front: &[usize],
) -> Result<HashMap<usize, f64>, OError> {
    let n = front.len();
    let mut distances: HashMap<usize, f64> = front.iter().map(|&i| (i, 0.0)).collect();
    if n == 0 {
        return Ok(distances);
    }
    if n <= 2 {
        for &i in front {
            distances.insert(i, f64::INFINITY);
        }
        return Ok(distances);
    }

    let number_of_objectives = population.get(front[0]).objectives()?.len();

    for m in 0..number_of_objectives {
        let mut sorted: Vec<usize> = front.to_vec();
        sorted.sort_by(|&a, &b| {
            let va = population.get(a).objectives().expect("already evaluated")[m];
            let vb = population.get(b).objectives().expect("already evaluated")[m];
            va.total_cmp(&vb)
        });

        distances.insert(sorted[0], f64::INFINITY);
        distances.insert(sorted[n - 1], f64::INFINITY);

        let min_value = population.get(sorted[0]).objectives()?[m];
        let max_value = population.get(sorted[n - 1]).objectives()?[m];
        let range = (max_value - min_value).abs() + EPSILON;

        for k in 1..n - 1 {
            let idx = sorted[k];
            if distances[&idx].is_infinite() {
                continue;
            }
            let next_value = population.get(sorted[k + 1]).objectives()?[m];
            let prev_value = population.get(sorted[k - 1]).objectives()?[m];
            let contribution = (next_value - prev_value).abs() / range;
            *distances.get_mut(&idx).unwrap() += contribution;
        }
    }

    Ok(distances)
}

#[cfg(test)]
mod test {
    use float_cmp::assert_approx_eq;

    use crate::core::genome::Genome;
    use crate::core::individual::Individual;

    use super::*;

    fn population_from(objectives: &[[f64; 2]]) -> Population {
        objectives
            .iter()
            .map(|obj| {
                let mut ind = Individual::new(Genome::from_bits([0]));
                ind.set_objectives(obj.to_vec());
                ind
            })
            .collect()
    }

    #[test]
    fn boundary_points_get_infinite_distance() {
        let population = population_from(&[[1.0, 5.0], [2.0, 4.0], [3.0, 3.0], [4.0, 2.0], [5.0, 1.0]]);
        let front: Vec<usize> = (0..5).collect();
        let distances = crowding_distance(&population, &front).unwrap();
        assert_eq!(distances[&0], f64::INFINITY);
        assert_eq!(distances[&4], f64::INFINITY);
    }

    #[test]
    fn six_point_front_matches_known_values() {
        let population = population_from(&[
            [0.0, 6.0],
            [1.0, 5.0],
            [2.0, 3.5],
            [3.0, 2.5],
            [4.0, 1.2],
            [5.0, 0.0],
        ]);
        let front: Vec<usize> = (0..6).collect();
        let distances = crowding_distance(&population, &front).unwrap();
        assert_eq!(distances[&0], f64::INFINITY);
        assert_eq!(distances[&5], f64::INFINITY);
        for &i in &[1usize, 2, 3, 4] {
            assert!(distances[&i].is_finite());
            assert!(distances[&i] > 0.0);
        }
    }

    #[test]
    fn fewer_than_three_points_are_all_infinite() {
        let population = population_from(&[[1.0, 2.0], [2.0, 1.0]]);
        let distances = crowding_distance(&population, &[0, 1]).unwrap();
        assert!(distances.values().all(|d| d.is_infinite()));
    }

    #[test]
    fn constant_axis_does_not_divide_by_zero() {
        let population = population_from(&[[1.0, 1.0], [1.0, 2.0], [1.0, 3.0]]);
        let distances = crowding_distance(&population, &[0, 1, 2]).unwrap();
        assert!(distances.values().all(|d| d.is_finite() || d.is_infinite()));
        assert_approx_eq!(f64, distances[&1], 2.0 / (2.0 + EPSILON), epsilon = 1e-6);
    }
}
