//! Network - per-contraption hostname table
//!
//! Networked components (thrusters, gyroscopes, seats) are addressed by a
//! hostname unique within their contraption. Names are either loaded from save
//! data or generated as `{prefix}_{n}` on first connection.

use std::collections::{BTreeMap, HashMap};

use super::component::Component;
use super::errors::NetworkError;
use super::ids::ComponentId;
use super::save::NetworkData;

#[derive(Clone, Debug, Default)]
pub struct Network {
    hosts: HashMap<String, ComponentId>,
    hostname_indexes: HashMap<String, u32>,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next free `{prefix}_{n}`. Deterministic: `n` starts at 0 per prefix and
    /// skips names that were registered explicitly.
    pub fn next_hostname(&mut self, prefix: &str) -> String {
        let index = self.hostname_indexes.entry(prefix.to_string()).or_insert(0);
        loop {
            let name = format!("{}_{}", prefix, index);
            *index += 1;
            if !self.hosts.contains_key(&name) {
                return name;
            }
        }
    }

    pub fn add_component(&mut self, hostname: &str, id: ComponentId) -> Result<(), NetworkError> {
        match self.hosts.get(hostname) {
            Some(existing) if *existing != id => {
                Err(NetworkError::DuplicateHostname(hostname.to_string()))
            }
            _ => {
                self.hosts.insert(hostname.to_string(), id);
                Ok(())
            }
        }
    }

    pub fn get_component(&self, hostname: &str) -> Result<ComponentId, NetworkError> {
        self.hosts
            .get(hostname)
            .copied()
            .ok_or_else(|| NetworkError::UnknownHostname(hostname.to_string()))
    }

    #[inline]
    pub fn contains(&self, hostname: &str) -> bool {
        self.hosts.contains_key(hostname)
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    /// Would `connect` accept this component?
    pub fn check(&self, component: &Component) -> Result<(), NetworkError> {
        if let Some(hostname) = component.hostname() {
            if let Some(existing) = self.hosts.get(hostname) {
                if *existing != component.id() {
                    return Err(NetworkError::DuplicateHostname(hostname.to_string()));
                }
            }
        }
        Ok(())
    }

    /// Register a networked component, generating a hostname when it has none.
    /// Non-networked components are ignored.
    pub fn connect(&mut self, component: &mut Component) -> Result<(), NetworkError> {
        let Some(prefix) = component.kind().hostname_prefix() else {
            return Ok(());
        };
        let hostname = match component.hostname() {
            Some(name) => name.to_string(),
            None => {
                let name = self.next_hostname(prefix);
                component.set_hostname(name.clone());
                name
            }
        };
        self.add_component(&hostname, component.id())
    }

    pub fn hostname_index(&self, prefix: &str) -> u32 {
        self.hostname_indexes.get(prefix).copied().unwrap_or(0)
    }

    pub fn restore_indexes(&mut self, data: &NetworkData) {
        for (prefix, index) in data.hostname_indexes.iter() {
            let slot = self.hostname_indexes.entry(prefix.clone()).or_insert(0);
            *slot = (*slot).max(*index);
        }
    }

    pub fn to_data(&self) -> NetworkData {
        NetworkData {
            hostname_indexes: self
                .hostname_indexes
                .iter()
                .map(|(k, v)| (k.clone(), *v))
                .collect::<BTreeMap<_, _>>(),
        }
    }
}
