//! Build orchestration: discover, compile, link, clean up.
//!
//! One `Builder` drives one build invocation. Sources are compiled strictly
//! in discovery order, the first failing compile aborts the whole build, and
//! the link step consumes the accumulated objects in exactly the order they
//! were produced.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::config::Config;
use crate::runner::{CommandRunner, ProcessRunner, RunError};
use crate::source::{self, SourcePathError};

/// Fatal build failure.
#[derive(Debug, Error)]
pub enum BuildError {
  /// The compiler returned a nonzero exit code; the build stops here and
  /// the link step is never reached.
  #[error("compilation failed for {path} (exit code {code})")]
  CompileFailed { path: String, code: i32 },

  /// The linker ran to completion and returned a nonzero exit code.
  #[error("link failed (exit code {code})")]
  LinkFailed { code: i32 },

  /// A source file name could not be mapped to an object path.
  #[error(transparent)]
  SourcePath(#[from] SourcePathError),

  /// The compiler or linker could not be run.
  #[error(transparent)]
  Run(#[from] RunError),

  /// Directory traversal failed.
  #[error("cannot walk {path}: {source}")]
  Walk {
    path: String,
    #[source]
    source: walkdir::Error,
  },

  /// Filesystem error preparing or resolving build paths.
  #[error("io error on {path}: {source}")]
  Io {
    path: String,
    #[source]
    source: io::Error,
  },
}

/// Drives one build invocation: compile every discovered source, then link.
pub struct Builder<R = ProcessRunner> {
  config: Config,
  output: PathBuf,
  build_dir: PathBuf,
  objects: Vec<PathBuf>,
  runner: R,
}

impl Builder<ProcessRunner> {
  /// Create a builder staging objects in `build_dir` and linking them into
  /// `output` (resolved against the build directory, so an absolute output
  /// path wins and a relative one lands inside it).
  ///
  /// The build directory and its parents are created eagerly; an existing
  /// directory is fine.
  pub fn new(config: Config, output: &Path, build_dir: &Path) -> Result<Self, BuildError> {
    Self::with_runner(config, output, build_dir, ProcessRunner)
  }
}

impl<R: CommandRunner> Builder<R> {
  /// As [`Builder::new`], with a caller-supplied command runner.
  pub fn with_runner(config: Config, output: &Path, build_dir: &Path, runner: R) -> Result<Self, BuildError> {
    fs::create_dir_all(build_dir).map_err(|e| BuildError::Io {
      path: build_dir.display().to_string(),
      source: e,
    })?;
    let build_dir = dunce::canonicalize(build_dir).map_err(|e| BuildError::Io {
      path: build_dir.display().to_string(),
      source: e,
    })?;
    let output = build_dir.join(output);

    Ok(Builder {
      config,
      output,
      build_dir,
      objects: Vec::new(),
      runner,
    })
  }

  /// The path the linked binary is written to.
  pub fn output(&self) -> &Path {
    &self.output
  }

  /// Object artifacts produced so far, in compile order.
  pub fn objects(&self) -> &[PathBuf] {
    &self.objects
  }

  /// Compile `path`, or every source file under it if it is a directory.
  ///
  /// Directories are walked depth-first in file-name order and only `.jl`
  /// files inside them are compiled; a file passed here directly is
  /// compiled without consulting the filter. Stops at the first failing
  /// file.
  pub fn compile(&mut self, path: &Path) -> Result<(), BuildError> {
    if !path.is_dir() {
      return self.compile_file(path);
    }

    for entry in WalkDir::new(path).sort_by_file_name() {
      let entry = entry.map_err(|e| BuildError::Walk {
        path: path.display().to_string(),
        source: e,
      })?;

      if entry.file_type().is_dir() {
        info!(dir = %entry.path().display(), "entering directory");
      } else if entry.file_name().to_str().is_some_and(source::is_source_file) {
        self.compile_file(entry.path())?;
      }
    }

    Ok(())
  }

  fn compile_file(&mut self, path: &Path) -> Result<(), BuildError> {
    let source = dunce::canonicalize(path).map_err(|e| BuildError::Io {
      path: path.display().to_string(),
      source: e,
    })?;
    let object = source::object_path(&source, &self.build_dir)?;

    let command = self
      .config
      .compiler
      .clone()
      .arg(source.display().to_string())
      .arg("-o")
      .arg(object.display().to_string());

    info!(command = %command, "compiling");
    let code = self.runner.run(&command, source.parent())?;
    if code != 0 {
      return Err(BuildError::CompileFailed {
        path: source.display().to_string(),
        code,
      });
    }

    self.objects.push(object);
    Ok(())
  }

  /// Link every accumulated object into the output binary.
  ///
  /// Always runs the linker to completion once called; a nonzero linker
  /// exit is then reported as [`BuildError::LinkFailed`].
  pub fn link(&self) -> Result<(), BuildError> {
    let mut command = self.config.linker.clone().arg("-o").arg(self.output.display().to_string());
    for object in &self.objects {
      command = command.arg(object.display().to_string());
    }

    info!(command = %command, objects = self.objects.len(), "linking");
    let code = self.runner.run(&command, None)?;
    if code != 0 {
      return Err(BuildError::LinkFailed { code });
    }

    Ok(())
  }

  /// Delete the staged object files, best effort.
  ///
  /// An already-missing object is not an error; other deletion failures
  /// are logged and skipped. Never fatal.
  pub fn remove_objects(&self) {
    for object in &self.objects {
      info!(object = %object.display(), "removing");
      match fs::remove_file(object) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => warn!(object = %object.display(), error = %e, "failed to remove object"),
      }
    }
  }
}
