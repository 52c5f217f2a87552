//! Gateway implementation over an OpenDAL operator.

use opendal::{ErrorKind, Operator, services};

use blobgate_shared::StorageSettings;

use super::error::GatewayError;
use crate::codec;

/// Outcome of a rename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameOutcome {
    /// Copy and source delete both completed.
    Renamed,
    /// The source was already gone and the destination present; a prior
    /// partial rename had completed its copy phase, nothing to do.
    AlreadyRenamed,
}

/// Blob storage gateway for one container on one storage account.
///
/// Constructed once per process and shared across concurrent requests; holds
/// no per-request mutable state, so no locking is needed.
#[derive(Debug)]
pub struct BlobGateway {
    operator: Operator,
    container: String,
}

impl BlobGateway {
    /// Creates a gateway backed by Azure Blob Storage.
    ///
    /// Performs no network I/O; the container is verified lazily on first
    /// use of each operation.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`] if the account, credential, or
    /// container name is empty, or if the operator cannot be built.
    pub fn new(settings: &StorageSettings) -> Result<Self, GatewayError> {
        if settings.account.is_empty() {
            return Err(GatewayError::Config("account must be defined".into()));
        }
        if settings.access_key.is_empty() {
            return Err(GatewayError::Config("access key must be defined".into()));
        }
        if settings.container.is_empty() {
            return Err(GatewayError::Config("container must be defined".into()));
        }

        let endpoint = format!("https://{}.blob.core.windows.net", settings.account);
        let builder = services::Azblob::default()
            .endpoint(&endpoint)
            .account_name(&settings.account)
            .account_key(&settings.access_key)
            .container(&settings.container);

        let operator = Operator::new(builder)
            .map_err(|e| GatewayError::Config(e.to_string()))?
            .finish();

        Ok(Self {
            operator,
            container: settings.container.clone(),
        })
    }

    /// Creates a gateway over an existing operator.
    ///
    /// Seam for tests and alternative backends; any OpenDAL service with
    /// read, write, delete, stat, and copy capability works.
    #[must_use]
    pub fn with_operator(operator: Operator, container: impl Into<String>) -> Self {
        Self {
            operator,
            container: container.into(),
        }
    }

    /// Returns the container name this gateway targets.
    #[must_use]
    pub fn container(&self) -> &str {
        &self.container
    }

    /// Verifies the container is reachable.
    ///
    /// Repeated before every blob operation; side-effect free on repeated
    /// calls. Container provisioning itself is a deployment concern.
    async fn ensure_container(&self) -> Result<(), GatewayError> {
        self.operator.check().await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                GatewayError::Storage {
                    status: 404,
                    message: format!("container '{}' not found", self.container),
                }
            } else {
                classify_vendor_error(&e)
            }
        })
    }

    /// Stores a base64 payload under `name`, overwriting prior content.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] on empty name or data before any
    /// network call, [`GatewayError::Encoding`] if the data is not valid
    /// base64, or a classified vendor error.
    pub async fn put(&self, name: &str, base64_data: &str) -> Result<(), GatewayError> {
        if name.is_empty() {
            return Err(GatewayError::validation("blob name must not be empty"));
        }
        if base64_data.is_empty() {
            return Err(GatewayError::validation("blob data must not be empty"));
        }
        let bytes = codec::decode(base64_data)?;

        self.ensure_container().await?;
        self.operator
            .write(name, bytes)
            .await
            .map_err(|e| vendor_error_for(&e, name))?;
        Ok(())
    }

    /// Retrieves the blob `name` as base64 text.
    ///
    /// The stored bytes are streamed through the codec rather than encoded
    /// from one full buffer.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] if the blob is absent, or a
    /// classified vendor error.
    pub async fn get(&self, name: &str) -> Result<String, GatewayError> {
        if name.is_empty() {
            return Err(GatewayError::validation("blob name must not be empty"));
        }

        self.ensure_container().await?;
        // Readers are lazy; confirm existence up front so a missing blob
        // surfaces as NotFound instead of a mid-stream read error.
        if !self.exists(name).await? {
            return Err(GatewayError::not_found(name));
        }
        let reader = self
            .operator
            .reader(name)
            .await
            .map_err(|e| vendor_error_for(&e, name))?;
        let stream = reader
            .into_bytes_stream(..)
            .await
            .map_err(|e| vendor_error_for(&e, name))?;

        Ok(codec::encode_stream(stream).await?)
    }

    /// Deletes the blob `name`.
    ///
    /// The underlying vendor delete is idempotent; existence is confirmed
    /// first so a missing blob surfaces as [`GatewayError::NotFound`].
    pub async fn delete(&self, name: &str) -> Result<(), GatewayError> {
        if name.is_empty() {
            return Err(GatewayError::validation("blob name must not be empty"));
        }

        self.ensure_container().await?;
        if !self.exists(name).await? {
            return Err(GatewayError::not_found(name));
        }
        self.operator
            .delete(name)
            .await
            .map_err(|e| vendor_error_for(&e, name))?;
        Ok(())
    }

    /// Renames `source` to `dest` via copy then source delete; the copy is
    /// server-side when the backend supports it.
    ///
    /// The two-phase protocol is not atomic, but it is resumable: a rename
    /// whose copy phase completed earlier (source gone, destination present)
    /// returns [`RenameOutcome::AlreadyRenamed`] without copying again, and
    /// a failed source delete after a successful copy surfaces as the
    /// distinguishable [`GatewayError::RenameIncomplete`].
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] on empty or equal names before
    /// any network call, [`GatewayError::NotFound`] if neither source nor
    /// destination exists, [`GatewayError::RenameIncomplete`] on a failed
    /// delete phase, or a classified vendor error from the copy phase (which
    /// leaves the source untouched and writes nothing new).
    pub async fn copy_and_delete_source(
        &self,
        source: &str,
        dest: &str,
    ) -> Result<RenameOutcome, GatewayError> {
        if source.is_empty() || dest.is_empty() {
            return Err(GatewayError::validation("blob names must not be empty"));
        }
        if source == dest {
            return Err(GatewayError::validation(
                "source and destination names must be distinct",
            ));
        }

        self.ensure_container().await?;

        if !self.exists(source).await? {
            if self.exists(dest).await? {
                return Ok(RenameOutcome::AlreadyRenamed);
            }
            return Err(GatewayError::not_found(source));
        }

        self.copy_blob(source, dest).await?;

        if let Err(e) = self.operator.delete(source).await {
            return Err(GatewayError::RenameIncomplete {
                source_name: source.to_string(),
                dest_name: dest.to_string(),
                message: e.to_string(),
            });
        }

        Ok(RenameOutcome::Renamed)
    }

    /// Copies `source` to `dest`, server-side when the backend supports it.
    ///
    /// Backends without copy capability (the in-memory service, for one)
    /// fall back to reading the source and writing it under the new name.
    async fn copy_blob(&self, source: &str, dest: &str) -> Result<(), GatewayError> {
        if self.operator.info().full_capability().copy {
            return self
                .operator
                .copy(source, dest)
                .await
                .map_err(|e| vendor_error_for(&e, source));
        }

        let content = self
            .operator
            .read(source)
            .await
            .map_err(|e| vendor_error_for(&e, source))?;
        self.operator
            .write(dest, content)
            .await
            .map_err(|e| vendor_error_for(&e, dest))?;
        Ok(())
    }

    /// Checks whether a blob exists.
    async fn exists(&self, name: &str) -> Result<bool, GatewayError> {
        match self.operator.stat(name).await {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(classify_vendor_error(&e)),
        }
    }
}

/// Maps a vendor error on a named blob to a gateway error.
fn vendor_error_for(err: &opendal::Error, name: &str) -> GatewayError {
    if err.kind() == ErrorKind::NotFound {
        return GatewayError::not_found(name);
    }
    classify_vendor_error(err)
}

/// Classifies a vendor error by kind: statuses the vendor reports are passed
/// through, anything else collapses to `Internal`.
fn classify_vendor_error(err: &opendal::Error) -> GatewayError {
    let status = match err.kind() {
        ErrorKind::PermissionDenied => 403,
        ErrorKind::AlreadyExists => 409,
        ErrorKind::ConditionNotMatch => 412,
        ErrorKind::RateLimited => 429,
        _ => return GatewayError::Internal(err.to_string()),
    };
    GatewayError::Storage {
        status,
        message: err.to_string(),
    }
}
