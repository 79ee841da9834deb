//! bp kubehub – kubeconfig resolution, client construction and RBAC binding fetch

#![forbid(unsafe_code)]

use std::path::{Path, PathBuf};

use bp_core::{BindingRecord, BindingScope, Subject};
use k8s_openapi::api::rbac::v1::{ClusterRoleBinding, RoleBinding, Subject as KubeSubject};
use kube::{
    api::{Api, ListParams},
    config::{KubeConfigOptions, Kubeconfig, KubeconfigError},
    Client, Config,
};
use tracing::{debug, info};

/// Problems locating the kubeconfig. Raised before any network activity.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to determine the user's home directory.
    #[error("failed to determine user's home directory")]
    HomeDirNotFound,

    /// The kubeconfig file does not exist.
    #[error("kubeconfig file does not exist: {}", .0.display())]
    KubeconfigMissing(PathBuf),
}

/// Why a client could not be built from the kubeconfig.
#[derive(Debug, thiserror::Error)]
pub enum ClientBuildError {
    #[error("failed to process kube configuration")]
    Kubeconfig(#[from] KubeconfigError),

    #[error("failed to build kubernetes client")]
    Kube(#[from] kube::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("kubernetes client unavailable")]
    ClientUnavailable(#[source] ClientBuildError),

    #[error("listing role bindings failed")]
    RequestFailed(#[source] kube::Error),
}

impl From<ClientBuildError> for FetchError {
    fn from(e: ClientBuildError) -> Self {
        FetchError::ClientUnavailable(e)
    }
}

/// Resolve the kubeconfig path: the override if given, else `$HOME/.kube/config`.
pub fn resolve_kubeconfig(override_path: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
    let path = match override_path {
        Some(p) => p,
        None => home::home_dir().ok_or(ConfigError::HomeDirNotFound)?.join(".kube").join("config"),
    };
    if !path.exists() {
        return Err(ConfigError::KubeconfigMissing(path));
    }
    Ok(path)
}

/// Read-only access to the two RBAC binding collections.
#[async_trait::async_trait]
pub trait BindingSource: Send + Sync {
    /// List every `ClusterRoleBinding` in the cluster.
    async fn cluster_role_bindings(&self) -> Result<Vec<ClusterRoleBinding>, kube::Error>;

    /// List `RoleBinding`s in a single namespace.
    async fn role_bindings(&self, namespace: &str) -> Result<Vec<RoleBinding>, kube::Error>;
}

/// [`BindingSource`] backed by a kube-rs client.
#[derive(Clone)]
pub struct KubeBindingSource {
    client: Client,
}

impl KubeBindingSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client from the kubeconfig at `path`, optionally pinning a context.
    pub async fn connect(path: &Path, context: Option<&str>) -> Result<Self, FetchError> {
        Ok(Self::new(build_client(path, context).await?))
    }
}

async fn build_client(path: &Path, context: Option<&str>) -> Result<Client, ClientBuildError> {
    let kubeconfig = Kubeconfig::read_from(path)?;
    let options = KubeConfigOptions { context: context.map(str::to_owned), cluster: None, user: None };
    let config = Config::from_custom_kubeconfig(kubeconfig, &options).await?;
    info!(path = %path.display(), context = ?context, cluster_url = %config.cluster_url, "kube client configured");
    Ok(Client::try_from(config)?)
}

#[async_trait::async_trait]
impl BindingSource for KubeBindingSource {
    async fn cluster_role_bindings(&self) -> Result<Vec<ClusterRoleBinding>, kube::Error> {
        let api: Api<ClusterRoleBinding> = Api::all(self.client.clone());
        Ok(api.list(&ListParams::default()).await?.items)
    }

    async fn role_bindings(&self, namespace: &str) -> Result<Vec<RoleBinding>, kube::Error> {
        let api: Api<RoleBinding> = Api::namespaced(self.client.clone(), namespace);
        Ok(api.list(&ListParams::default()).await?.items)
    }
}

fn subjects_of(subjects: Option<Vec<KubeSubject>>) -> Vec<Subject> {
    subjects.unwrap_or_default().into_iter().map(|s| Subject { kind: s.kind, name: s.name }).collect()
}

pub fn cluster_record(b: ClusterRoleBinding) -> BindingRecord {
    BindingRecord::ClusterBinding {
        name: b.metadata.name.unwrap_or_default(),
        role_ref_name: b.role_ref.name,
        subjects: subjects_of(b.subjects),
    }
}

pub fn namespace_record(b: RoleBinding) -> BindingRecord {
    BindingRecord::NamespaceBinding {
        name: b.metadata.name.unwrap_or_default(),
        role_ref_name: b.role_ref.name,
        subjects: subjects_of(b.subjects),
    }
}

/// Fetch bindings for `scope`, preserving listing order.
///
/// Cluster-wide scope reads `ClusterRoleBinding`s only, a namespaced scope reads
/// that namespace's `RoleBinding`s only. The scope is used as given (no trimming).
pub async fn fetch<S: BindingSource + ?Sized>(source: &S, scope: BindingScope) -> Result<Vec<BindingRecord>, FetchError> {
    let records: Vec<BindingRecord> = match &scope {
        BindingScope::ClusterWide => {
            debug!("listing clusterrolebindings");
            let items = source.cluster_role_bindings().await.map_err(FetchError::RequestFailed)?;
            items.into_iter().map(cluster_record).collect()
        }
        BindingScope::Namespaced(ns) => {
            debug!(ns = %ns, "listing rolebindings");
            let items = source.role_bindings(ns).await.map_err(FetchError::RequestFailed)?;
            items.into_iter().map(namespace_record).collect()
        }
    };
    debug!(scope = ?scope, count = records.len(), "bindings fetched");
    Ok(records)
}
