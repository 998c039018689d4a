//! Endpoint catalog and weighted selection.
//!
//! # Responsibilities
//! - Hold the static route table with relative selection weights
//! - Pick one endpoint per call, probability proportional to weight
//!
//! # Design Decisions
//! - The table is immutable after construction; construction enforces the
//!   invariants (non-empty, unique paths, positive finite weights)
//! - Selection takes the caller's own `RandomSource`, so concurrent callers
//!   need no synchronization
//! - Cumulative-walk selection falls back to the last entry when float
//!   accumulation lands short of the total, so it can never fail to select

use crate::config::schema::EndpointConfig;
use crate::config::validation::{validate_endpoints, ValidationError};
use crate::traffic::random::RandomSource;

/// A single target route with its relative selection weight.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    pub path: String,
    pub weight: f64,
}

/// Immutable weighted endpoint table.
#[derive(Debug)]
pub struct EndpointCatalog {
    endpoints: Vec<Endpoint>,
    total_weight: f64,
}

impl EndpointCatalog {
    /// Build a catalog from configuration, enforcing the table invariants.
    pub fn from_config(endpoints: &[EndpointConfig]) -> Result<Self, Vec<ValidationError>> {
        let errors = validate_endpoints(endpoints);
        if !errors.is_empty() {
            return Err(errors);
        }

        let endpoints: Vec<Endpoint> = endpoints
            .iter()
            .map(|e| Endpoint {
                path: e.path.clone(),
                weight: e.weight,
            })
            .collect();
        let total_weight = endpoints.iter().map(|e| e.weight).sum();

        Ok(Self {
            endpoints,
            total_weight,
        })
    }

    /// All endpoints, in table order.
    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// Pick one endpoint with probability proportional to its weight.
    pub fn sample<R: RandomSource + ?Sized>(&self, rng: &mut R) -> &Endpoint {
        let draw = rng.uniform(0.0, self.total_weight);

        let mut cumulative = 0.0;
        for endpoint in &self.endpoints {
            cumulative += endpoint.weight;
            if cumulative >= draw {
                return endpoint;
            }
        }

        // Float accumulation can land short of the total; the last entry
        // absorbs the remainder. The table is never empty.
        &self.endpoints[self.endpoints.len() - 1]
    }
}
