use anyhow::{Context, Result};
use clap::Args;
use docindex_protocol::{Fragment, ImplementorRecord};
use docindex_registry::{
    FragmentRegistry, RegistryConfig, RegistryState, RegistryStats, RegistryStore,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Args)]
pub struct MergeArgs {
    /// Fragment documents (JSON), submitted in the order given
    #[arg(required = true)]
    pub fragments: Vec<PathBuf>,

    /// Attach the registry after this many fragments were submitted
    /// (default: after all of them)
    #[arg(long, value_name = "N")]
    pub attach_after: Option<usize>,

    /// Registry config file (TOML)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Only print the records merged under this key
    #[arg(long)]
    pub key: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MergeOutput {
    pub stats: RegistryStats,
    pub registry: BTreeMap<String, Vec<ImplementorRecord>>,
}

pub fn merge(args: &MergeArgs) -> Result<MergeOutput> {
    let config = match &args.config {
        Some(path) => RegistryConfig::load(path)
            .with_context(|| format!("failed to load registry config {}", path.display()))?,
        None => RegistryConfig::default(),
    };

    let fragments = args
        .fragments
        .iter()
        .map(|path| read_fragment(path))
        .collect::<Result<Vec<_>>>()?;

    let registry: FragmentRegistry<ImplementorRecord> =
        FragmentRegistry::with_config(config.clone());
    let store: Arc<RegistryStore<ImplementorRecord>> =
        Arc::new(RegistryStore::from_config(&config));
    let attach_after = args.attach_after.unwrap_or(fragments.len());

    for (idx, (path, fragment)) in args.fragments.iter().zip(fragments).enumerate() {
        if idx == attach_after {
            registry.attach_shared(store.clone());
        }
        registry
            .submit(fragment)
            .with_context(|| format!("rejected fragment {}", path.display()))?;
    }
    if registry.state() == RegistryState::Buffering {
        registry.attach_shared(store.clone());
    }

    let stats = store.stats();
    log::info!(
        "merged {} fragment(s) into {} key(s), {} record(s)",
        stats.fragments_merged,
        stats.keys,
        stats.records
    );

    let registry = match &args.key {
        Some(key) => BTreeMap::from([(key.clone(), store.lookup(key))]),
        None => store.snapshot(),
    };
    Ok(MergeOutput { stats, registry })
}

fn read_fragment(path: &Path) -> Result<Fragment<ImplementorRecord>> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_slice(&bytes)
        .with_context(|| format!("failed to decode fragment {}", path.display()))
}
