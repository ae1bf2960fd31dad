//! The set of available exercises and random selection among them.

use crate::exercise::Exercise;
use crate::exercise_loader::{self, ExerciseLoadError};
use rand::Rng;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A freshly constructed exercise plus its display name.
pub struct Picked {
    pub exercise: Exercise,
    pub name: String,
}

/// Ordered, immutable list of exercise descriptors. Selection is an
/// independent uniform draw with replacement; repeats are possible and no
/// exhaustive coverage is guaranteed.
pub struct ExercisePool {
    descriptors: Vec<PathBuf>,
}

impl ExercisePool {
    /// Walk `root` recursively and collect every `.pgn` and `.json` file,
    /// sorted for a stable ordering.
    pub fn discover(root: &Path) -> io::Result<Self> {
        let mut descriptors = Vec::new();
        collect_descriptors(root, &mut descriptors)?;
        descriptors.sort();
        Ok(Self { descriptors })
    }

    pub fn from_paths(descriptors: Vec<PathBuf>) -> Self {
        Self { descriptors }
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Draw a descriptor uniformly at random and construct a fresh
    /// [`Exercise`] from it, so a recorded line always starts at ply zero.
    /// Load failures propagate; the caller decides whether to retry.
    ///
    /// The pool must be non-empty (checked fatally at startup).
    pub fn pick<R: Rng>(&self, rng: &mut R) -> Result<Picked, ExerciseLoadError> {
        assert!(!self.descriptors.is_empty(), "exercise pool is empty");
        let path = &self.descriptors[rng.gen_range(0..self.descriptors.len())];
        let exercise = exercise_loader::load(path)?;
        Ok(Picked {
            exercise,
            name: display_name(path),
        })
    }
}

fn collect_descriptors(dir: &Path, out: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_descriptors(&path, out)?;
        } else if matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("pgn") | Some("json")
        ) {
            out.push(path);
        }
    }
    Ok(())
}

fn display_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
