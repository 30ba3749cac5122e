//! Stage dependency graph
//!
//! Edges come from files: a stage depends on every stage that produces
//! one of its inputs. Declaration order in the manifest only breaks ties.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::error::{PipelineError, Result};
use crate::config::Manifest;

/// File-dependency graph over a manifest's stages.
#[derive(Debug)]
pub struct StageGraph {
    /// Output path → producing stage index.
    producers: HashMap<PathBuf, usize>,
    /// Stage index → indexes of stages it depends on (deduplicated).
    deps: Vec<Vec<usize>>,
    stage_count: usize,
}

impl StageGraph {
    /// Build the graph, rejecting duplicate producers and cycles.
    pub fn build(manifest: &Manifest) -> Result<Self> {
        let mut producers: HashMap<PathBuf, usize> = HashMap::new();
        for (idx, stage) in manifest.stages.iter().enumerate() {
            for output in &stage.outputs {
                if let Some(&first) = producers.get(output) {
                    return Err(PipelineError::DuplicateProducer {
                        path: output.clone(),
                        first: manifest.stages[first].name.clone(),
                        second: stage.name.clone(),
                    });
                }
                producers.insert(output.clone(), idx);
            }
        }

        let mut deps = Vec::with_capacity(manifest.stages.len());
        for stage in &manifest.stages {
            let mut stage_deps: Vec<usize> = stage
                .inputs
                .iter()
                .filter_map(|input| producers.get(input).copied())
                .collect();
            stage_deps.sort_unstable();
            stage_deps.dedup();
            deps.push(stage_deps);
        }

        let graph = Self {
            producers,
            deps,
            stage_count: manifest.stages.len(),
        };
        graph.order(manifest)?;
        Ok(graph)
    }

    /// Stage that produces a path, if any.
    pub fn producer(&self, path: &Path) -> Option<usize> {
        self.producers.get(path).copied()
    }

    /// Direct dependencies of a stage.
    pub fn deps(&self, stage: usize) -> &[usize] {
        &self.deps[stage]
    }

    /// Topological order (Kahn's algorithm); manifest order breaks ties.
    pub fn order(&self, manifest: &Manifest) -> Result<Vec<usize>> {
        let mut in_degree: Vec<usize> = self.deps.iter().map(Vec::len).collect();

        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); self.stage_count];
        for (idx, stage_deps) in self.deps.iter().enumerate() {
            for &dep in stage_deps {
                dependents[dep].push(idx);
            }
        }

        let mut ready: Vec<usize> = (0..self.stage_count)
            .filter(|&i| in_degree[i] == 0)
            .collect();
        let mut order = Vec::with_capacity(self.stage_count);

        while let Some(&next) = ready.first() {
            ready.remove(0);
            order.push(next);
            for &dependent in &dependents[next] {
                in_degree[dependent] -= 1;
                if in_degree[dependent] == 0 {
                    // Keep manifest order among simultaneously-ready stages.
                    let pos = ready
                        .iter()
                        .position(|&r| r > dependent)
                        .unwrap_or(ready.len());
                    ready.insert(pos, dependent);
                }
            }
        }

        if order.len() != self.stage_count {
            let stuck = (0..self.stage_count)
                .find(|i| !order.contains(i))
                .unwrap_or(0);
            return Err(PipelineError::Cycle {
                stage: manifest.stages[stuck].name.clone(),
            });
        }

        Ok(order)
    }

    /// A stage plus its transitive prerequisites, in dependency order.
    pub fn closure(&self, manifest: &Manifest, target: usize) -> Result<Vec<usize>> {
        let mut wanted = vec![false; self.stage_count];
        let mut stack = vec![target];
        while let Some(idx) = stack.pop() {
            if wanted[idx] {
                continue;
            }
            wanted[idx] = true;
            stack.extend_from_slice(&self.deps[idx]);
        }

        Ok(self
            .order(manifest)?
            .into_iter()
            .filter(|&i| wanted[i])
            .collect())
    }
}
