//! Request orchestration on top of [`TriangleClient`].
//!
//! These helpers assert the happy path of each endpoint and verify that the
//! service's view matches what was sent, so tests can focus on the case
//! under examination.

use crate::client::api::{CreateTriangle, DEFAULT_SEPARATOR, TriangleClient, TriangleRecord};
use crate::errors::{ProbeError, ProbeResult};
use crate::geometry::sides::SideTriple;
use uuid::Uuid;

/// Maximum number of triangles the service stores at once.
pub const SERVICE_CAPACITY: usize = 10;

/// Returns a well-formed ID that the service has never issued.
#[must_use]
pub fn random_unknown_id() -> String {
    Uuid::new_v4().to_string()
}

/// Stateful helper around a client.
#[derive(Debug, Clone)]
pub struct ProbeSession {
    client: TriangleClient,
    separator: String,
}

impl ProbeSession {
    /// Creates a session that joins sides with `;`.
    #[must_use]
    pub fn new(client: TriangleClient) -> Self {
        Self {
            client,
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }

    /// Uses a different separator for created triangles.
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Underlying client.
    #[must_use]
    pub const fn client(&self) -> &TriangleClient {
        &self.client
    }

    /// Lists every stored triangle.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::UnexpectedStatus`] unless the service answers
    /// `200`, or [`ProbeError::Decode`] for a malformed body.
    pub fn list(&self) -> ProbeResult<Vec<TriangleRecord>> {
        let response = self.client.all()?;
        response.expect_status(200)?.json()
    }

    /// IDs of every stored triangle.
    ///
    /// # Errors
    ///
    /// See [`Self::list`].
    pub fn list_ids(&self) -> ProbeResult<Vec<String>> {
        let ids: Vec<String> = self.list()?.into_iter().map(|record| record.id).collect();
        log::info!("The following triangle IDs were found: {ids:?}");
        Ok(ids)
    }

    /// Sides of the triangle stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::UnexpectedStatus`] unless the service answers
    /// `200`, or [`ProbeError::Decode`] for a malformed body.
    pub fn fetch_sides(&self, id: &str) -> ProbeResult<SideTriple> {
        let response = self.client.get(id)?;
        let record: TriangleRecord = response.expect_status(200)?.json()?;
        log::info!("Triangle {id} has sides {}", record.sides());
        Ok(record.sides())
    }

    /// Creates a triangle and returns its ID.
    ///
    /// The sides are checked locally first, as is the service's capacity.
    /// The sides echoed back by the service must match those sent.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::CapacityExceeded`] when the service is full,
    /// [`ProbeError::InvalidTriangle`] for non-positive sides or sides that
    /// violate the triangle inequality, [`ProbeError::UnexpectedStatus`]
    /// unless the service answers `200`, or [`ProbeError::Verification`] if
    /// the echoed sides differ.
    pub fn create_triangle(&self, sides: &SideTriple) -> ProbeResult<String> {
        if self.list()?.len() >= SERVICE_CAPACITY {
            return Err(ProbeError::CapacityExceeded {
                capacity: SERVICE_CAPACITY,
            });
        }
        if !sides.is_positive() {
            return Err(ProbeError::InvalidTriangle(format!(
                "all sides must be > 0, got {sides}"
            )));
        }
        if !sides.satisfies_triangle_inequality() {
            return Err(ProbeError::InvalidTriangle(format!(
                "sides {sides} must satisfy a + b > c, a + c > b and b + c > a"
            )));
        }

        let response = self
            .client
            .create(&CreateTriangle::new(sides, &self.separator))?;
        let record: TriangleRecord = response.expect_status(200)?.json()?;
        if record.sides() != *sides {
            return Err(ProbeError::Verification(format!(
                "created triangle {} echoed sides {} instead of {sides}",
                record.id,
                record.sides()
            )));
        }

        log::info!(
            "The triangle with sides {sides} was successfully created, its ID is: {}",
            record.id
        );
        Ok(record.id)
    }

    /// Deletes one triangle and checks that it is gone from the listing.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::UnexpectedStatus`] unless the service answers
    /// `200`, or [`ProbeError::Verification`] if the ID is still listed.
    pub fn delete_triangle(&self, id: &str) -> ProbeResult<()> {
        self.client.delete(id)?.expect_status(200)?;
        if self.list_ids()?.iter().any(|listed| listed == id) {
            return Err(ProbeError::Verification(format!(
                "triangle {id} is still listed after deletion"
            )));
        }
        log::info!("The triangle with ID {id} was deleted.");
        Ok(())
    }

    /// Deletes every listed triangle.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::InvalidParameters`] for an empty list, or the
    /// first error from [`Self::delete_triangle`].
    pub fn delete_all(&self, ids: &[String]) -> ProbeResult<()> {
        if ids.is_empty() {
            return Err(ProbeError::InvalidParameters(
                "the list of IDs is empty, provide at least one valid ID".to_string(),
            ));
        }
        ids.iter().try_for_each(|id| self.delete_triangle(id))
    }

    /// Deletes everything the service currently stores.
    ///
    /// # Returns
    ///
    /// The number of deleted triangles.
    ///
    /// # Errors
    ///
    /// See [`Self::list_ids`] and [`Self::delete_triangle`].
    pub fn purge(&self) -> ProbeResult<usize> {
        let ids = self.list_ids()?;
        if !ids.is_empty() {
            self.delete_all(&ids)?;
        }
        Ok(ids.len())
    }
}
