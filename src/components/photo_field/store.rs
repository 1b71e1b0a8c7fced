//! Generation-tagged particle storage for one load cycle.

use std::fmt;

use super::error::StoreError;
use super::types::Particle;

/// Identifies a load cycle. Strictly increases with every reset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
	pub fn next(self) -> Self {
		Self(self.0 + 1)
	}

	pub fn value(self) -> u64 {
		self.0
	}
}

impl fmt::Display for Generation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// Particles shown for the current cycle.
///
/// Only accepts particles issued under the current generation, so a slow
/// load from a superseded cycle can never leak into the field.
#[derive(Debug)]
pub struct ParticleStore<H> {
	generation: Generation,
	particles: Vec<Particle<H>>,
}

impl<H> Default for ParticleStore<H> {
	fn default() -> Self {
		Self {
			generation: Generation::default(),
			particles: Vec::new(),
		}
	}
}

impl<H> ParticleStore<H> {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn generation(&self) -> Generation {
		self.generation
	}

	pub fn is_current(&self, generation: Generation) -> bool {
		self.generation == generation
	}

	/// Drop every particle and open a new generation.
	pub fn reset(&mut self) -> Generation {
		self.particles = Vec::new();
		self.generation = self.generation.next();
		self.generation
	}

	/// Append a particle resolved under `generation`.
	pub fn push(&mut self, generation: Generation, particle: Particle<H>) -> Result<(), StoreError> {
		if !self.is_current(generation) {
			return Err(StoreError::Stale {
				issued: generation,
				current: self.generation,
			});
		}
		self.particles.push(particle);
		Ok(())
	}

	pub fn particles(&self) -> &[Particle<H>] {
		&self.particles
	}

	pub fn len(&self) -> usize {
		self.particles.len()
	}

	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}
}
