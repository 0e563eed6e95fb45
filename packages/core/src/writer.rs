//! Applying a [`Plan`] to the filesystem, and the [`Generator`] that drives
//! a whole run.
//!
//! A run is strictly sequential: plan (register, resolve, serialize), then
//! recreate every server container, then emit every person. The first error
//! aborts; output written so far is left as is.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::GenerateError;
use crate::layout::Layout;
use crate::plan::{build_plan, Plan, PlanSummary};
use crate::render::{GraphSerializer, TurtleSerializer};
use crate::types::Blueprint;

/// Where and how a run writes its output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Root directory of the generated tree.
    pub output_dir: PathBuf,

    /// Put every server's people directly under `output_dir` instead of one
    /// `ldpc-{server}` container per server.
    pub flatten: bool,
}

impl GeneratorConfig {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            flatten: false,
        }
    }

    pub fn flatten(mut self, flatten: bool) -> Self {
        self.flatten = flatten;
        self
    }

    pub fn layout(&self) -> Layout {
        Layout::new(&self.output_dir, self.flatten)
    }
}

/// Turns blueprints into LDP container trees.
pub struct Generator {
    config: GeneratorConfig,
    serializer: Box<dyn GraphSerializer>,
}

impl Generator {
    /// A generator writing Turtle documents.
    pub fn new(config: GeneratorConfig) -> Self {
        Self::with_serializer(config, Box::new(TurtleSerializer))
    }

    pub fn with_serializer(config: GeneratorConfig, serializer: Box<dyn GraphSerializer>) -> Self {
        Self { config, serializer }
    }

    /// Compute every effect of a run without touching the filesystem.
    pub fn plan(&self, blueprint: &Blueprint) -> Result<Plan, GenerateError> {
        build_plan(blueprint, &self.config.layout(), self.serializer.as_ref())
    }

    /// Plan and apply.
    pub fn run(&self, blueprint: &Blueprint) -> Result<PlanSummary, GenerateError> {
        let plan = self.plan(blueprint)?;
        apply(&plan)?;
        Ok(plan.summary())
    }
}

/// Execute a plan.
///
/// Server containers are removed if present and created fresh. Person
/// directories are created one level at a time and must not exist yet; an
/// existing one fails with [`GenerateError::Collision`].
pub fn apply(plan: &Plan) -> Result<(), GenerateError> {
    for server in &plan.servers {
        tracing::info!("writing server {}", server.location);
        recreate_dir(&server.path)?;
    }

    for person in &plan.people {
        tracing::info!("writing person {}", person.webid);
        for dir in &person.dirs {
            create_dir(dir)?;
        }
        for doc in &person.documents {
            tracing::debug!(path = %doc.path.display(), kind = %doc.kind, "writing document");
            fs::write(&doc.path, &doc.contents).map_err(|e| io_error(&doc.path, e))?;
        }
    }

    Ok(())
}

// --- helpers -----------------------------------------------------------------

fn recreate_dir(path: &Path) -> Result<(), GenerateError> {
    if path.exists() {
        tracing::debug!(path = %path.display(), "removing existing container");
        fs::remove_dir_all(path).map_err(|e| io_error(path, e))?;
    }
    fs::create_dir_all(path).map_err(|e| io_error(path, e))
}

fn create_dir(path: &Path) -> Result<(), GenerateError> {
    fs::create_dir(path).map_err(|e| match e.kind() {
        io::ErrorKind::AlreadyExists => GenerateError::Collision(path.to_path_buf()),
        _ => io_error(path, e),
    })
}

fn io_error(path: &Path, source: io::Error) -> GenerateError {
    GenerateError::Io {
        path: path.to_path_buf(),
        source,
    }
}

// --- tests -------------------------------------------------------------------
