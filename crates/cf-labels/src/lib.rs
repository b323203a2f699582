//! Labeled voxel volumes and category adjacency for CortenForge.
//!
//! This crate answers questions like "does the green region touch the red
//! region" on segmented 3D volumes:
//!
//! - [`LabeledVolume`] - Immutable 3D array of category codes plus its vocabulary
//! - [`Categories`] - Ordered, duplicate-free category names
//! - [`VoxelMask`] - Boolean occupancy of one category, with dilation
//! - [`check_category_adjacency`] - Do two categories touch?
//! - [`check_raw_adjacency`] - The same on a raw integer array with a code mapping
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. Arrays are
//! [`ndarray`] arrays, so volumes can come from any loader that produces them.
//!
//! # Adjacency
//!
//! Two voxels are neighbors under 26-connectivity when their indices differ by
//! at most 1 along every axis. Voxels on the volume boundary have fewer
//! neighbors; nothing wraps around. Faces-only (6) and faces-and-edges (18)
//! rules are available through [`AdjacencyParams`].
//!
//! # Example
//!
//! ```
//! use cf_labels::{LabeledVolume, check_green_touches_red};
//! use ndarray::Array3;
//!
//! let mut data = Array3::<u8>::zeros((3, 3, 3));
//! data[[0, 0, 0]] = 1; // green
//! data[[1, 0, 1]] = 2; // red, diagonal neighbor
//!
//! let volume = LabeledVolume::new(&data, ["background", "green", "red"]).unwrap();
//! assert!(check_green_touches_red(&volume).unwrap());
//! assert_eq!(volume.count_voxels("background").unwrap(), 25);
//! ```
//!
//! # Features
//!
//! - `serde` - Serialization for volumes, coordinates and parameters.
//!   Deserialized volumes are validated like freshly built ones.

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod adjacency;
mod categories;
mod connectivity;
mod error;
mod grid;
mod mask;
mod params;
mod volume;
mod voxel;

pub use adjacency::{
    AdjacencyInput, CodeMap, check_category_adjacency, check_category_adjacency_with,
    check_green_touches_red, check_raw_adjacency, check_raw_adjacency_with,
    check_raw_green_touches_red,
};
pub use categories::{Categories, CategoryCode};
pub use connectivity::Connectivity;
pub use error::{LabelError, LabelResult};
pub use grid::GridBounds;
pub use mask::VoxelMask;
pub use params::AdjacencyParams;
pub use volume::LabeledVolume;
pub use voxel::VoxelCoord;
