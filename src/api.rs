//! The [`DiskApi`] facade.

use std::sync::Arc;

use crate::clients::{
    ApiContext, CommandsClient, DiskClientBase, DiskError, FilesClient, MetaInfoClient,
};
use crate::config::DiskConfig;

/// Entry point to the Disk API.
///
/// Builds one [`ApiContext`] and hands it to the three resource clients.
/// Clients are cheap to clone and share the context.
///
/// # Thread Safety
///
/// `DiskApi` is `Send + Sync`; one instance can serve concurrent tasks.
///
/// # Example
///
/// ```rust
/// use disk_api::{DiskApi, DiskConfig, OAuthToken};
///
/// let config = DiskConfig::builder()
///     .token(OAuthToken::new("token").unwrap())
///     .build()
///     .unwrap();
/// let api = DiskApi::new(&config).unwrap();
/// let _files = api.files();
/// ```
#[derive(Clone, Debug)]
pub struct DiskApi {
    context: Arc<ApiContext>,
    files: FilesClient,
    meta_info: MetaInfoClient,
    commands: CommandsClient,
}

// Verify DiskApi is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DiskApi>();
};

impl DiskApi {
    /// Creates a facade backed by the reqwest transport.
    ///
    /// # Errors
    ///
    /// Returns [`DiskError::Transport`] if the HTTP client cannot be created.
    pub fn new(config: &DiskConfig) -> Result<Self, DiskError> {
        Ok(Self::from_context(ApiContext::from_config(config)?))
    }

    /// Creates a facade over an existing context, such as one with a test
    /// transport or a log saver.
    #[must_use]
    pub fn from_context(context: ApiContext) -> Self {
        let context = Arc::new(context);
        let base = DiskClientBase::new(Arc::clone(&context));
        Self {
            files: FilesClient::new(base.clone()),
            meta_info: MetaInfoClient::new(base.clone()),
            commands: CommandsClient::new(base),
            context,
        }
    }

    /// Returns the shared context.
    #[must_use]
    pub fn context(&self) -> &ApiContext {
        &self.context
    }

    /// Returns the upload and download client.
    #[must_use]
    pub const fn files(&self) -> &FilesClient {
        &self.files
    }

    /// Returns the metadata client.
    #[must_use]
    pub const fn meta_info(&self) -> &MetaInfoClient {
        &self.meta_info
    }

    /// Returns the file management client.
    #[must_use]
    pub const fn commands(&self) -> &CommandsClient {
        &self.commands
    }
}
