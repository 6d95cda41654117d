//! ncnn-bundle-lib: build orchestration and artifact assembly for sherpa-ncnn
//!
//! The pipeline runs strictly forward:
//! - `platform`: detect the host OS family, CPU architecture and packaging mode
//! - `features`: resolve optional capabilities against the platform
//! - `artifact`: map platform and features to the expected outputs, then find them
//! - `build`: assemble the CMake configuration and run the native build
//! - `package`: copy the outputs into the package layout and prune the install tree

pub mod artifact;
pub mod build;
pub mod config;
pub mod consts;
pub mod features;
pub mod package;
pub mod pipeline;
pub mod platform;
pub mod project;
pub mod util;
