//! # Engine Module
//!
//! Surface area calculation over a [`Structure`](crate::core::models::structure::Structure).
//!
//! ## Overview
//!
//! Every atom is expanded by the probe radius into a sphere; the engine
//! builds a k-d tree over the sphere centres to find overlapping neighbors,
//! then measures the exposed part of every sphere with one of two
//! algorithms:
//!
//! - **Lee-Richards** ([`Algorithm::LeeRichards`](params::Algorithm)) - exact
//!   arcs over a stack of slices, the default
//! - **Shrake-Rupley** ([`Algorithm::ShrakeRupley`](params::Algorithm)) -
//!   exposed fraction of test points
//!
//! ## Architecture
//!
//! - **Parameters** ([`params`]) - algorithm, probe radius and resolution
//! - **Results** ([`result`]) - per-atom areas and class, residue and chain breakdowns
//! - **Error Handling** ([`error`]) - invalid parameters, bad coordinates, mismatched results

pub mod error;
pub(crate) mod lee_richards;
pub(crate) mod neighbors;
pub mod params;
pub mod result;
pub(crate) mod shrake_rupley;

use crate::core::models::structure::Structure;
use error::SasaError;
use neighbors::NeighborList;
use params::{Algorithm, Parameters};
use result::SasaResult;
use tracing::{debug, instrument};

#[instrument(skip_all, name = "sasa", fields(structure = structure.name(), algorithm = %parameters.algorithm))]
pub(crate) fn calculate<'s>(
    structure: &'s Structure,
    parameters: &Parameters,
) -> Result<SasaResult<'s>, SasaError> {
    parameters.validate()?;

    let atoms = structure.atoms();
    let mut centres = Vec::with_capacity(atoms.len());
    let mut radii = Vec::with_capacity(atoms.len());
    for (index, atom) in atoms.iter().enumerate() {
        let p = atom.position;
        if !(p.x.is_finite() && p.y.is_finite() && p.z.is_finite()) {
            return Err(SasaError::NonFiniteCoordinate {
                index,
                atom: atom.name.clone(),
                residue: format!("{} {}", atom.residue_name, atom.residue_number),
                chain: atom.chain_id,
            });
        }
        centres.push([p.x, p.y, p.z]);
        radii.push(atom.radius + parameters.probe_radius);
    }

    let neighbors = NeighborList::build(&centres, &radii);
    debug!(
        atoms = atoms.len(),
        resolution = parameters.resolution(),
        "Neighbor lists built, computing areas."
    );

    let atom_areas = match parameters.algorithm {
        Algorithm::LeeRichards => {
            lee_richards::atom_areas(&centres, &radii, &neighbors, parameters.n_slices)
        }
        Algorithm::ShrakeRupley => {
            shrake_rupley::atom_areas(&centres, &radii, &neighbors, parameters.n_points)
        }
    };

    let result = SasaResult::new(structure, atom_areas, *parameters);
    debug!(total = result.total(), "Surface area computed.");
    Ok(result)
}
