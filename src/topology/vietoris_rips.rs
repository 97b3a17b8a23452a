//! Vietoris-Rips Complex Construction
//!
//! The Vietoris-Rips complex VR_ε(X) is a simplicial complex where:
//! - 0-simplices are the points in X
//! - A k-simplex [v₀, ..., vₖ] exists iff d(vᵢ, vⱼ) ≤ ε for all i,j
//!
//! Sweeping ε from 0 to `max_epsilon` gives a filtration in which every
//! simplex enters at the length of its longest edge.

use ndarray::Array2;
use tracing::debug;

use super::complex::FilteredComplex;
use crate::algebra::ContinuousTime;

/// Configuration for Rips filtrations
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RipsConfig {
    /// Maximum filtration value (edges longer than this are never added)
    pub max_epsilon: f64,
    /// Highest simplex dimension to build
    pub max_dim: usize,
}

impl Default for RipsConfig {
    fn default() -> Self {
        Self {
            max_epsilon: 1.0,
            max_dim: 1,
        }
    }
}

/// Vietoris-Rips filtration builder
#[derive(Debug, Clone)]
pub struct VietorisRips {
    /// Distance matrix (precomputed)
    distances: Array2<f64>,
}

impl VietorisRips {
    /// Create from a precomputed, symmetric distance matrix
    pub fn from_distance_matrix(distances: &Array2<f64>) -> Self {
        assert_eq!(
            distances.nrows(),
            distances.ncols(),
            "distance matrix must be square"
        );
        Self {
            distances: distances.clone(),
        }
    }

    /// Create from point cloud (one point per row)
    pub fn from_points(points: &Array2<f64>) -> Self {
        Self {
            distances: Self::compute_distance_matrix(points),
        }
    }

    /// Compute Euclidean distance matrix
    fn compute_distance_matrix(points: &Array2<f64>) -> Array2<f64> {
        let n = points.nrows();
        let mut dm = Array2::<f64>::zeros((n, n));

        for i in 0..n {
            for j in i + 1..n {
                let dist = points
                    .row(i)
                    .iter()
                    .zip(points.row(j).iter())
                    .map(|(a, b)| (a - b) * (a - b))
                    .sum::<f64>()
                    .sqrt();
                dm[[i, j]] = dist;
                dm[[j, i]] = dist;
            }
        }

        dm
    }

    pub fn distance_matrix(&self) -> &Array2<f64> {
        &self.distances
    }

    /// Number of points
    pub fn n_points(&self) -> usize {
        self.distances.nrows()
    }

    /// Filtered Rips complex up to `config.max_dim` and `config.max_epsilon`
    ///
    /// Cliques are grown one vertex at a time from an explicit stack; a
    /// vertex is only appended when it is larger than every current vertex,
    /// so each simplex is generated exactly once.
    pub fn complex(&self, config: &RipsConfig) -> FilteredComplex<ContinuousTime> {
        let n = self.n_points();
        let mut complex = FilteredComplex::with_capacity(n);

        let mut stack: Vec<(Vec<usize>, f64)> = (0..n).rev().map(|v| (vec![v], 0.0)).collect();

        while let Some((vertices, birth)) = stack.pop() {
            if vertices.len() <= config.max_dim {
                let last = vertices[vertices.len() - 1];
                for w in (last + 1..n).rev() {
                    let longest = vertices
                        .iter()
                        .map(|&u| self.distances[[u, w]])
                        .fold(birth, f64::max);
                    if longest <= config.max_epsilon {
                        let mut grown = vertices.clone();
                        grown.push(w);
                        stack.push((grown, longest));
                    }
                }
            }
            complex.insert(vertices, ContinuousTime::new(birth));
        }

        complex.finalize();
        debug!(
            points = n,
            simplices = complex.len(),
            max_epsilon = config.max_epsilon,
            max_dim = config.max_dim,
            "built Rips complex"
        );
        complex
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::Simplex;
    use ndarray::array;
    use rand_distr::{Distribution, Uniform};

    #[test]
    fn test_triangle() {
        // Equilateral triangle with side 1
        let points = array![[0.0, 0.0], [1.0, 0.0], [0.5, 0.866]];

        let vr = VietorisRips::from_points(&points);
        let config = RipsConfig {
            max_epsilon: 2.0,
            max_dim: 2,
        };
        let complex = vr.complex(&config);

        assert_eq!(complex.len(), 7);
        assert_eq!(complex.max_dim(), Some(2));
        assert!(complex.verify().is_ok());

        let birth = complex.time_of(&Simplex::from([0, 1, 2])).unwrap();
        assert!((birth.value() - 1.0).abs() < 1e-3);
        assert_eq!(complex.time_of(&Simplex::from([0, 1])).unwrap().value(), 1.0);
    }

    #[test]
    fn test_epsilon_cutoff() {
        let points = array![[0.0, 0.0], [1.0, 0.0], [3.0, 0.0]];
        let vr = VietorisRips::from_points(&points);

        let complex = vr.complex(&RipsConfig::default());

        assert_eq!(complex.len(), 4);
        assert!(complex.contains(&Simplex::from([0, 1])));
        assert!(!complex.contains(&Simplex::from([1, 2])));
    }

    #[test]
    fn test_from_distance_matrix() {
        let distances = array![[0.0, 0.5, 0.9], [0.5, 0.0, 0.2], [0.9, 0.2, 0.0]];
        let vr = VietorisRips::from_distance_matrix(&distances);
        let complex = vr.complex(&RipsConfig {
            max_epsilon: 1.0,
            max_dim: 2,
        });

        let order: Vec<String> = complex.iter().map(|(s, _)| s.to_string()).collect();
        assert_eq!(order, vec!["0", "1", "2", "1, 2", "0, 1", "0, 2", "0, 1, 2"]);
        assert_eq!(complex.time_of(&Simplex::from([0, 1, 2])).unwrap().value(), 0.9);
    }

    #[test]
    fn test_random_cloud_edges() {
        let mut rng = rand::thread_rng();
        let uniform = Uniform::new(0.0, 1.0);
        let points = Array2::from_shape_fn((15, 2), |_| uniform.sample(&mut rng));

        let vr = VietorisRips::from_points(&points);
        let config = RipsConfig {
            max_epsilon: 0.4,
            max_dim: 2,
        };
        let complex = vr.complex(&config);

        let dm = vr.distance_matrix();
        let expected_edges = (0..15)
            .flat_map(|i| (i + 1..15).map(move |j| (i, j)))
            .filter(|&(i, j)| dm[[i, j]] <= 0.4)
            .count();
        let edges = complex.iter().filter(|(s, _)| s.dim() == 1).count();

        assert_eq!(edges, expected_edges);
        assert!(complex.verify().is_ok());
        assert!(complex.max_dim().unwrap_or(0) <= 2);
    }
}
