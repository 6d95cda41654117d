//! The packaging run, end to end.
//!
//! detection → configuration → invocation → location → assembly. Every stage
//! consumes only what earlier stages produced, and the first error ends the run.

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::artifact::{ArtifactSpec, LocateError, LocatedArtifact, Locator};
use crate::build::{BuildConfig, BuildError, BuildInvoker, BuildPaths, BuildStep, NativeBuildStrategy};
use crate::config::BuildEnv;
use crate::features::FeatureFlags;
use crate::package::{AssembleError, AssemblyInputs, AssemblyReport, PackageLayout, assemble};
use crate::platform::{PlatformProfile, Purity};
use crate::project::ProjectVersion;

#[derive(Debug, Error)]
pub enum PipelineError {
  #[error(transparent)]
  Build(#[from] BuildError),

  #[error(transparent)]
  Locate(#[from] LocateError),

  #[error(transparent)]
  Assemble(#[from] AssembleError),
}

/// Everything decided before any process runs or any file is touched.
#[derive(Debug, Clone, Serialize)]
pub struct BuildPlan {
  pub profile: PlatformProfile,
  pub features: FeatureFlags,
  pub purity: Purity,
  pub tag: String,
  pub version: Option<String>,
  pub spec: ArtifactSpec,
  pub config: BuildConfig,
  pub strategy: NativeBuildStrategy,
  pub steps: Vec<BuildStep>,
  pub paths: BuildPaths,
}

impl BuildPlan {
  pub fn new(profile: PlatformProfile, env: &BuildEnv, paths: BuildPaths) -> Result<Self, BuildError> {
    let features = FeatureFlags::resolve(&profile, env);
    let purity = Purity::for_profile(&profile);
    let spec = ArtifactSpec::for_target(&profile, &features);
    let config = BuildConfig::assemble(&profile, env, &paths.install_root);
    let strategy = NativeBuildStrategy::for_profile(&profile);
    let steps = strategy.plan(&config, &paths)?;

    Ok(Self {
      profile,
      features,
      purity,
      tag: purity.tag(&profile),
      version: ProjectVersion::read(&paths.project_root).map(|v| v.0),
      spec,
      config,
      strategy,
      steps,
      paths,
    })
  }

  fn assembly_inputs(&self) -> AssemblyInputs {
    AssemblyInputs {
      layout: PackageLayout::new(&self.paths.package_root),
      install_root: self.paths.install_root.clone(),
      os: self.profile.os,
      purity: self.purity,
      tag: self.tag.clone(),
      version: self.version.clone(),
    }
  }
}

#[derive(Debug, Clone)]
pub struct PipelineRequest {
  pub profile: PlatformProfile,
  pub env: BuildEnv,
  pub paths: BuildPaths,
  /// Package an existing install tree without running the native build.
  pub skip_build: bool,
  pub invoker: BuildInvoker,
}

#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
  pub plan: BuildPlan,
  pub built: bool,
  pub artifacts: Vec<LocatedArtifact>,
  pub assembly: AssemblyReport,
}

pub fn run(request: &PipelineRequest) -> Result<PipelineReport, PipelineError> {
  let plan = BuildPlan::new(request.profile, &request.env, request.paths.clone())?;
  info!(
    platform = %plan.profile,
    strategy = ?plan.strategy,
    artifacts = plan.spec.len(),
    "starting packaging run"
  );

  if request.skip_build {
    info!("skipping native build");
  } else {
    request.invoker.run(&plan.steps, &plan.paths)?;
  }

  let artifacts = Locator::new(&plan.paths.install_root).locate(&plan.spec)?;
  let assembly = assemble(&artifacts, &plan.assembly_inputs())?;

  info!(bin_dir = ?assembly.bin_dir, "package assembled");
  Ok(PipelineReport {
    plan,
    built: !request.skip_build,
    artifacts,
    assembly,
  })
}
