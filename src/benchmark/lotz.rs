use crate::core::error::OError;
use crate::core::genome::Genome;
use crate::core::problem::Evaluator;

/// Count leading ones (`k == 0`) or trailing zeros (`k == 1`) in a bit
/// slice. These are the two LOTZ (Leading-Ones-Trailing-Zeros) objectives.
fn lotzk(k: usize, x: &[u8]) -> Result<usize, OError> {
    let n = x.len();
    match k {
        0 => Ok(x.iter().take_while(|&&b| b != 0).count()),
        1 => Ok(x.iter().rev().take_while(|&&b| b == 0).count().min(n)),
        _ => Err(OError::InvalidArgument(format!(
            "invalid LOTZ objective index {k}: must be 0 or 1"
        ))),
    }
}

/// The classic bi-objective LOTZ function: leading-ones count and
/// trailing-zeros count of `x`.
pub fn lotz(x: &[u8]) -> Result<Vec<f64>, OError> {
    Ok(vec![lotzk(0, x)? as f64, lotzk(1, x)? as f64])
}

/// The `k`-th coordinate (`0 <= k < m`) of the mLOTZ value for genome `x`.
fn mlotzk(m: usize, k: usize, x: &[u8]) -> Result<usize, OError> {
    let n2 = 2 * x.len() / m;
    let start = (k / 2) * n2;
    lotzk(k % 2, &x[start..start + n2])
}

/// The generalised `m`-objective LOTZ function: `x` is split into `m / 2`
/// equal-length blocks, each block contributing a leading-ones and a
/// trailing-zeros objective. `m` must be even and must divide `2 * x.len()`.
pub fn mlotz(m: usize, x: &[u8]) -> Result<Vec<f64>, OError> {
    let n = x.len();
    if m == 0 || m % 2 != 0 {
        return Err(OError::InvalidArgument(format!(
            "mLOTZ objective size {m} must be a positive even number"
        )));
    }
    if n % (m / 2) != 0 {
        return Err(OError::InvalidArgument(format!(
            "genome length {n} is not divisible by m/2 = {}",
            m / 2
        )));
    }
    (0..m).map(|k| mlotzk(m, k, x).map(|v| v as f64)).collect()
}

/// Is `x` on the LOTZ Pareto front? Equivalently, do the leading-ones and
/// trailing-zeros counts sum to the genome length (every bit is accounted
/// for by exactly one of the two runs, i.e. `x` is of the form `1^a 0^b`).
pub fn is_lotz_pareto_front(x: &[u8]) -> Result<bool, OError> {
    Ok(lotzk(0, x)? + lotzk(1, x)? == x.len())
}

/// Is `x` on the mLOTZ Pareto front? True when every one of the `m / 2`
/// blocks is individually on the LOTZ front.
pub fn is_mlotz_pareto_front(m: usize, x: &[u8]) -> Result<bool, OError> {
    if m == 0 || m % 2 != 0 {
        return Err(OError::InvalidArgument(format!(
            "mLOTZ objective size {m} must be a positive even number"
        )));
    }
    let n2 = 2 * x.len() / m;
    for block in 0..(m / 2) {
        let start = block * n2;
        if !is_lotz_pareto_front(&x[start..start + n2])? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// A value-semantic mLOTZ objective function, parameterised by `m`, that can
/// be handed straight to [`crate::core::problem::Problem::new`] as the
/// evaluator.
pub struct MlotzFunctor {
    m: usize,
}

impl MlotzFunctor {
    pub fn new(m: usize) -> Result<Self, OError> {
        if m == 0 || m % 2 != 0 {
            return Err(OError::InvalidArgument(format!(
                "mLOTZ objective size {m} must be a positive even number"
            )));
        }
        Ok(Self { m })
    }

    pub fn m(&self) -> usize {
        self.m
    }
}

impl Evaluator for MlotzFunctor {
    fn evaluate(&self, genome: &Genome) -> Result<Vec<f64>, OError> {
        mlotz(self.m, genome.as_slice())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn mlotz_evaluates_the_worked_example() {
        let x = Genome::from_bits([1, 1, 1, 1, 1, 0, 0, 0, 1, 1, 0, 0]);
        let result = mlotz(8, x.as_slice()).unwrap();
        assert_eq!(result, vec![3.0, 0.0, 2.0, 1.0, 0.0, 0.0, 1.0, 2.0]);
    }

    #[test]
    fn on_front_example() {
        let x = Genome::from_bits([1, 0, 1, 1, 1, 0]);
        assert!(is_mlotz_pareto_front(6, x.as_slice()).unwrap());
    }

    #[test]
    fn off_front_example() {
        let x = Genome::from_bits([1, 0, 1, 1, 1, 0]);
        assert!(!is_mlotz_pareto_front(4, x.as_slice()).unwrap());
    }

    #[test]
    fn lotz_of_all_ones_is_on_front() {
        let x = Genome::from_bits([1, 1, 1, 1]);
        assert!(is_lotz_pareto_front(x.as_slice()).unwrap());
        assert_eq!(lotz(x.as_slice()).unwrap(), vec![4.0, 0.0]);
    }

    #[test]
    fn lotz_of_all_zeros_is_on_front() {
        let x = Genome::from_bits([0, 0, 0, 0]);
        assert!(is_lotz_pareto_front(x.as_slice()).unwrap());
        assert_eq!(lotz(x.as_slice()).unwrap(), vec![0.0, 4.0]);
    }

    #[test]
    fn mixed_run_is_off_front() {
        let x = Genome::from_bits([1, 0, 1, 0]);
        assert!(!is_lotz_pareto_front(x.as_slice()).unwrap());
    }

    #[test]
    fn odd_objective_size_is_rejected() {
        let x = Genome::from_bits([1, 0, 1, 0]);
        assert!(mlotz(3, x.as_slice()).is_err());
    }

    #[test]
    fn functor_matches_the_free_function() {
        let functor = MlotzFunctor::new(4).unwrap();
        let x = Genome::from_bits([1, 1, 0, 0, 1, 0, 0, 1]);
        assert_eq!(functor.evaluate(&x).unwrap(), mlotz(4, x.as_slice()).unwrap());
    }
}
