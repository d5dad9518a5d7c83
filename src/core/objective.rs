use std::cmp::Ordering as StdOrdering;

use crate::core::error::OError;

/// The result of comparing two objective vectors under Pareto dominance.
///
/// This is a genuine partial order, not a total one: two vectors that are
/// incomparable (neither dominates the other) are [`ParetoOrdering::Unordered`],
/// which has no analogue in [`std::cmp::Ordering`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParetoOrdering {
    /// Every component is equal.
    Equivalent,
    /// `b` is no worse than `a` in every objective and strictly better in at
    /// least one: `b` dominates `a`.
    Less,
    /// `a` is no worse than `b` in every objective and strictly better in at
    /// least one: `a` dominates `b`.
    Greater,
    /// Neither vector dominates the other.
    Unordered,
}

/// All objectives are maximised. Compare two equal-length objective vectors
/// under Pareto dominance, short-circuiting as soon as both a `>` and a `<`
/// component have been observed — there is no need to scan the remaining
/// objectives once the comparison is known to be unordered.
///
/// Returns a precondition error if `a` and `b` have different lengths.
pub fn compare(a: &[f64], b: &[f64]) -> Result<ParetoOrdering, OError> {
    if a.len() != b.len() {
        return Err(OError::precondition(
            "objective",
            format!(
                "cannot compare objective vectors of different lengths ({} vs {})",
                a.len(),
                b.len()
            ),
        ));
    }
    let mut a_better = false;
    let mut b_better = false;
    for (&x, &y) in a.iter().zip(b) {
        match x.partial_cmp(&y) {
            Some(StdOrdering::Greater) => a_better = true,
            Some(StdOrdering::Less) => b_better = true,
            Some(StdOrdering::Equal) => {}
            None => return Ok(ParetoOrdering::Unordered),
        }
        if a_better && b_better {
            return Ok(ParetoOrdering::Unordered);
        }
    }
    Ok(match (a_better, b_better) {
        (false, false) => ParetoOrdering::Equivalent,
        (true, false) => ParetoOrdering::Greater,
        (false, true) => ParetoOrdering::Less,
        (true, true) => ParetoOrdering::Unordered,
    })
}

/// Does `a` dominate `b` (weakly: `a` is at least as good everywhere and
/// strictly better somewhere, or they are equivalent)?
pub fn dominates(a: &[f64], b: &[f64]) -> Result<bool, OError> {
    Ok(matches!(
        compare(a, b)?,
        ParetoOrdering::Greater | ParetoOrdering::Equivalent
    ))
}

/// Does `a` strictly dominate `b` (at least as good everywhere, strictly
/// better somewhere, and not equivalent)?
pub fn strictly_dominates(a: &[f64], b: &[f64]) -> Result<bool, OError> {
    Ok(compare(a, b)? == ParetoOrdering::Greater)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn equal_vectors_are_equivalent() {
        assert_eq!(compare(&[1.0, 2.0], &[1.0, 2.0]).unwrap(), ParetoOrdering::Equivalent);
    }

    #[test]
    fn strictly_better_everywhere_dominates() {
        assert_eq!(compare(&[2.0, 3.0], &[1.0, 2.0]).unwrap(), ParetoOrdering::Greater);
        assert!(strictly_dominates(&[2.0, 3.0], &[1.0, 2.0]).unwrap());
    }

    #[test]
    fn strictly_worse_everywhere_is_dominated() {
        assert_eq!(compare(&[1.0, 2.0], &[2.0, 3.0]).unwrap(), ParetoOrdering::Less);
        assert!(!strictly_dominates(&[1.0, 2.0], &[2.0, 3.0]).unwrap());
    }

    #[test]
    fn better_in_one_worse_in_other_is_unordered() {
        assert_eq!(compare(&[2.0, 1.0], &[1.0, 2.0]).unwrap(), ParetoOrdering::Unordered);
    }

    #[test]
    fn equivalent_vectors_dominate_weakly_but_not_strictly() {
        let a = [1.0, 2.0];
        let b = [1.0, 2.0];
        assert!(dominates(&a, &b).unwrap());
        assert!(!strictly_dominates(&a, &b).unwrap());
    }

    #[test]
    fn mismatched_lengths_are_a_precondition_error() {
        assert!(compare(&[1.0, 2.0], &[1.0]).is_err());
        assert!(dominates(&[1.0, 2.0], &[1.0]).is_err());
    }

    #[test]
    fn partial_order_is_antisymmetric() {
        let a = [3.0, 1.0, 4.0];
        let b = [1.0, 5.0, 9.0];
        let ab = compare(&a, &b).unwrap();
        let ba = compare(&b, &a).unwrap();
        match ab {
            ParetoOrdering::Less => assert_eq!(ba, ParetoOrdering::Greater),
            ParetoOrdering::Greater => assert_eq!(ba, ParetoOrdering::Less),
            ParetoOrdering::Equivalent => assert_eq!(ba, ParetoOrdering::Equivalent),
            ParetoOrdering::Unordered => assert_eq!(ba, ParetoOrdering::Unordered),
        }
    }

    #[test]
    fn dominance_is_transitive_on_a_sample_chain() {
        let a = [3.0, 3.0];
        let b = [2.0, 2.0];
        let c = [1.0, 1.0];
        assert!(strictly_dominates(&a, &b).unwrap());
        assert!(strictly_dominates(&b, &c).unwrap());
        assert!(strictly_dominates(&a, &c).unwrap());
    }
}
