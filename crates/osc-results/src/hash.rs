//! Content-based hashing for run IDs.

use osc_project::schema::ProblemDef;
use sha2::{Digest, Sha256};

pub fn compute_run_id(problem: &ProblemDef, solver_version: &str) -> String {
    let mut hasher = Sha256::new();

    let problem_json = serde_json::to_string(problem).unwrap_or_default();
    hasher.update(problem_json.as_bytes());

    hasher.update(solver_version.as_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_stability() {
        let problem = ProblemDef::bridge_example();
        let hash1 = compute_run_id(&problem, "v1");
        let hash2 = compute_run_id(&problem, "v1");

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn hash_differs_for_different_inputs() {
        let problem1 = ProblemDef::bridge_example();
        let mut problem2 = ProblemDef::bridge_example();
        problem2.time.h_s = 0.02;

        assert_ne!(
            compute_run_id(&problem1, "v1"),
            compute_run_id(&problem2, "v1")
        );
        assert_ne!(
            compute_run_id(&problem1, "v1"),
            compute_run_id(&problem1, "v2")
        );
    }
}
