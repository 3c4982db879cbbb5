//! Run storage API.

use crate::types::{RunManifest, TrajectoryRecord};
use crate::{ResultsError, ResultsResult};
use osc_compare::Method;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory of cached runs, one subdirectory per run ID:
/// `manifest.json` plus one `<method>.jsonl` per stored trajectory.
#[derive(Clone)]
pub struct RunStore {
    root_dir: PathBuf,
}

impl RunStore {
    pub fn new(root_dir: PathBuf) -> ResultsResult<Self> {
        if !root_dir.exists() {
            fs::create_dir_all(&root_dir)?;
        }
        Ok(Self { root_dir })
    }

    /// Store living next to the problem file, under `.oscillo/runs`.
    pub fn for_problem(problem_path: &Path) -> ResultsResult<Self> {
        let problem_dir = problem_path
            .parent()
            .ok_or_else(|| ResultsError::InvalidPath {
                message: "problem path has no parent directory".to_string(),
            })?;
        let runs_dir = problem_dir.join(".oscillo").join("runs");
        Self::new(runs_dir)
    }

    fn run_dir(&self, run_id: &str) -> PathBuf {
        self.root_dir.join(run_id)
    }

    fn trajectory_path(&self, run_id: &str, method: Method) -> PathBuf {
        self.run_dir(run_id).join(format!("{}.jsonl", method.slug()))
    }

    pub fn has_run(&self, run_id: &str) -> bool {
        self.run_dir(run_id).join("manifest.json").exists()
    }

    pub fn save_run(
        &self,
        manifest: &RunManifest,
        trajectories: &[(Method, Vec<TrajectoryRecord>)],
    ) -> ResultsResult<()> {
        let run_dir = self.run_dir(&manifest.run_id);
        fs::create_dir_all(&run_dir)?;

        for (method, records) in trajectories {
            let mut content = String::new();
            for record in records {
                let line = serde_json::to_string(record)?;
                content.push_str(&line);
                content.push('\n');
            }
            fs::write(self.trajectory_path(&manifest.run_id, *method), content)?;
        }

        // Manifest last: its presence marks the run complete.
        let manifest_path = run_dir.join("manifest.json");
        let manifest_json = serde_json::to_string_pretty(manifest)?;
        fs::write(manifest_path, manifest_json)?;

        Ok(())
    }

    pub fn load_manifest(&self, run_id: &str) -> ResultsResult<RunManifest> {
        let manifest_path = self.run_dir(run_id).join("manifest.json");

        if !manifest_path.exists() {
            return Err(ResultsError::RunNotFound {
                run_id: run_id.to_string(),
            });
        }

        let content = fs::read_to_string(manifest_path)?;
        let manifest = serde_json::from_str(&content)?;
        Ok(manifest)
    }

    pub fn load_trajectory(
        &self,
        run_id: &str,
        method: Method,
    ) -> ResultsResult<Vec<TrajectoryRecord>> {
        if !self.has_run(run_id) {
            return Err(ResultsError::RunNotFound {
                run_id: run_id.to_string(),
            });
        }
        let path = self.trajectory_path(run_id, method);
        if !path.exists() {
            return Err(ResultsError::TrajectoryNotFound {
                run_id: run_id.to_string(),
                method: method.slug().to_string(),
            });
        }

        let content = fs::read_to_string(path)?;
        let mut records = Vec::new();
        for line in content.lines() {
            if !line.trim().is_empty() {
                let record: TrajectoryRecord = serde_json::from_str(line)?;
                records.push(record);
            }
        }

        Ok(records)
    }

    /// Every complete run, oldest first by timestamp.
    pub fn list_runs(&self) -> ResultsResult<Vec<RunManifest>> {
        let mut runs = Vec::new();

        if !self.root_dir.exists() {
            return Ok(runs);
        }

        for entry in fs::read_dir(&self.root_dir)? {
            let entry = entry?;
            if entry.path().is_dir() {
                let run_id = entry.file_name().to_string_lossy().to_string();
                if let Ok(manifest) = self.load_manifest(&run_id) {
                    runs.push(manifest);
                }
            }
        }

        runs.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        Ok(runs)
    }

    pub fn delete_run(&self, run_id: &str) -> ResultsResult<()> {
        let run_dir = self.run_dir(run_id);
        if run_dir.exists() {
            fs::remove_dir_all(run_dir)?;
        }
        Ok(())
    }
}
